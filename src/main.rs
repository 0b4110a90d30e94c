use crate::configuration::Configuration;
use crate::configuration_handler::ConfigurationHandler;
use crate::engine::AvailabilityEngine;
use crate::file_store::FileStore;
use crate::http::create_app;
use crate::memory_store::MemoryStore;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

mod calendar;
mod configuration;
mod configuration_handler;
mod engine;
mod error;
mod file_store;
mod http;
mod memory_store;
mod store;
#[cfg(test)]
mod testutils;
mod types;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let configuration = ConfigurationHandler::parse_arguments();

    let app = if let Some(data_dir) = configuration.data_dir() {
        let store = match FileStore::new(&data_dir) {
            Ok(store) => store,
            Err(err) => {
                error!(?data_dir, %err, "Failed to open data directory");
                return;
            }
        };
        info!(?data_dir, "Using flat-file store");
        create_app(
            AvailabilityEngine::new(store, configuration.require_phone()),
            configuration.clone(),
        )
    } else {
        info!("No data directory configured, slots and bookings are impersistent");
        create_app(
            AvailabilityEngine::new(MemoryStore::default(), configuration.require_phone()),
            configuration.clone(),
        )
    };

    let address = format!("0.0.0.0:{}", configuration.port());
    info!("Accessible at {address}");
    let listener = tokio::net::TcpListener::bind(address).await.unwrap();
    axum::serve(listener, app).await.unwrap();
}
