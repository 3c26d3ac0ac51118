use tracing::{error, info};

use crate::actor_framework::ResourceActor;
use crate::clients::ProductClient;
use crate::config::ActorConfig;
use crate::domain::{seed_products, Product};
use crate::product_actor::next_product_id;

/// The running catalog: one product actor seeded with the fixed catalog.
///
/// Responsible for starting up the actor, handing out its client, and handling shutdown.
pub struct CatalogSystem {
    pub product_client: ProductClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl CatalogSystem {
    pub fn new(config: &ActorConfig) -> Self {
        Self::with_seed(config, seed_products())
    }

    /// Starts the system over an arbitrary initial catalog.
    pub fn with_seed(config: &ActorConfig, seed: Vec<Product>) -> Self {
        info!(buffer_size = config.buffer_size, seeded = seed.len(), "Starting catalog system");

        let (product_actor, product_resource_client) =
            ResourceActor::<Product>::new(config.buffer_size, seed, next_product_id);
        let product_client = ProductClient::new(product_resource_client);
        let product_handle = tokio::spawn(product_actor.run());

        Self {
            product_client,
            handles: vec![product_handle],
        }
    }

    /// Drops this system's client and waits for the actor to drain.
    ///
    /// The actor stops once every clone of the client is gone.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        drop(self.product_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
