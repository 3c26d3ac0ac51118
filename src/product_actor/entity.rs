use crate::actor_framework::Entity;
use crate::domain::{Product, ProductCreate, ProductPatch};

impl Entity for Product {
    type Id = u64;
    type CreatePayload = ProductCreate;
    type Patch = ProductPatch;

    fn id(&self) -> &u64 { &self.id }

    /// Creates a new Product from creation parameters.
    ///
    /// # Arguments
    /// * `id` - Identifier assigned by the store
    /// * `payload` - Validated creation payload; a missing description becomes `""`
    fn from_create(id: u64, payload: ProductCreate) -> Result<Self, String> {
        Ok(Self {
            id,
            name: payload.name,
            price: payload.price,
            description: payload.description.unwrap_or_default(),
            discounted_price: None,
            image_url: payload.image_url,
        })
    }

    /// Overlays every field present in the patch. The id is never touched.
    fn on_update(&mut self, patch: ProductPatch) -> Result<(), String> {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(price) = patch.price {
            self.price = price;
        }
        if let Some(description) = patch.description {
            self.description = description;
        }
        if let Some(discounted_price) = patch.discounted_price {
            self.discounted_price = Some(discounted_price);
        }
        if let Some(image_url) = patch.image_url {
            self.image_url = Some(image_url);
        }
        Ok(())
    }
}

/// One more than the highest id in the store, or 1 when it is empty.
///
/// Deleting the highest id and creating again hands that id out a second time.
pub fn next_product_id(store: &[Product]) -> u64 {
    store.iter().map(|p| p.id).max().map_or(1, |max| max + 1)
}
