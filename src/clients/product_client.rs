use tracing::{debug, instrument, warn};
use validator::Validate;

use crate::actor_framework::ResourceClient;
use crate::domain::{Deleted, Product, ProductCreate, ProductPatch};
use crate::product_actor::ProductError;

/// Catalog service handle for the Product actor.
///
/// Payloads are validated here, before anything is sent to the actor.
/// Cloning is cheap; all clones talk to the same store.
#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self), fields(name = %payload.name))]
    pub async fn create(&self, payload: ProductCreate) -> Result<Product, ProductError> {
        if let Err(errors) = payload.validate() {
            let err = ProductError::from(errors);
            warn!(error = %err, "Rejected create payload");
            return Err(err);
        }
        debug!("Sending request");
        self.inner
            .create(payload)
            .await
            .map_err(|e| ProductError::from_framework(None, e))
    }

    #[instrument(skip(self))]
    pub async fn find_all(&self) -> Result<Vec<Product>, ProductError> {
        debug!("Sending request");
        self.inner
            .list()
            .await
            .map_err(|e| ProductError::from_framework(None, e))
    }

    #[instrument(skip(self))]
    pub async fn find_one(&self, id: u64) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner
            .get(id)
            .await
            .map_err(|e| ProductError::from_framework(Some(id), e))
    }

    #[instrument(skip(self))]
    pub async fn update(&self, id: u64, patch: ProductPatch) -> Result<Product, ProductError> {
        if let Err(errors) = patch.validate() {
            let err = ProductError::from(errors);
            warn!(error = %err, "Rejected update payload");
            return Err(err);
        }
        debug!("Sending request");
        self.inner
            .update(id, patch)
            .await
            .map_err(|e| ProductError::from_framework(Some(id), e))
    }

    #[instrument(skip(self))]
    pub async fn remove(&self, id: u64) -> Result<Deleted, ProductError> {
        debug!("Sending request");
        self.inner
            .delete(id)
            .await
            .map(|_| Deleted { deleted: true })
            .map_err(|e| ProductError::from_framework(Some(id), e))
    }
}
