mod domain;
mod clients;
mod config;

mod app_system;

#[cfg(test)]
mod mock_framework;

mod actor_framework;
mod product_actor;

use serde::Serialize;
use tracing::{error, info, warn, Instrument};

use crate::app_system::{setup_tracing, CatalogSystem};
use crate::config::CatalogConfig;
use crate::domain::{ProductCreate, ProductPatch};

fn print_json<T: Serialize>(label: &str, value: &T) -> Result<(), String> {
    let json = serde_json::to_string_pretty(value).map_err(|e| e.to_string())?;
    println!("{label}:\n{json}");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), String> {
    let config = CatalogConfig::load().map_err(|e| e.to_string())?;
    setup_tracing(&config.logging);

    info!("Starting product catalog");

    let system = CatalogSystem::new(&config.actor);
    let catalog = system.product_client.clone();

    let products = catalog.find_all().await.map_err(|e| e.to_string())?;
    info!(count = products.len(), "Catalog loaded");
    print_json("findAll", &products)?;

    let span = tracing::info_span!("product_creation");
    let lamp = async {
        info!("Creating lamp");
        catalog.create(ProductCreate::new("Lamp", 100.0)).await
    }
    .instrument(span)
    .await
    .map_err(|e| e.to_string())?;
    info!(product_id = lamp.id, "Product created successfully");
    print_json("create", &lamp)?;

    let patch = ProductPatch { description: Some("updated".to_string()), ..Default::default() };
    let updated = catalog.update(1, patch).await.map_err(|e| e.to_string())?;
    print_json("update", &updated)?;

    let deleted = catalog.remove(lamp.id).await.map_err(|e| e.to_string())?;
    print_json("remove", &deleted)?;

    match catalog.find_one(lamp.id).await {
        Ok(product) => warn!(product_id = product.id, "Removed product is still present"),
        Err(e) => info!(product_id = lamp.id, error = %e, "Lookup after removal failed as expected"),
    }

    match catalog.create(ProductCreate::new("Gold-plated kettle", 25000.0)).await {
        Ok(product) => error!(product_id = product.id, "Out-of-range price was accepted"),
        Err(e) => info!(error = %e, "Out-of-range create rejected as expected"),
    }

    drop(catalog);
    system.shutdown().await?;

    info!("Application completed successfully");
    Ok(())
}
