//! Phonebook - main entry point.
//!
//! Wires configuration, the phone normalizer, file-backed storage and the
//! service, then hands control to the interactive console loop.

use anyhow::Result;
use phonebook::storage::{JsonFilePhoneBookStateStorage, JsonFileStorageOptions};
use phonebook::{Config, LibPhoneNormalizer, PhoneBookService};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            return Err(e.into());
        }
    };

    // Logging goes to stderr so it never interleaves with the prompt.
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.clone()));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!(path = %config.storage_path.display(), "starting phonebook");

    // The normalizer's metadata is large; build it once and share it.
    let normalizer = Arc::new(LibPhoneNormalizer::new());

    let storage = Arc::new(JsonFilePhoneBookStateStorage::new(JsonFileStorageOptions {
        file_path: config.storage_path.clone(),
        pretty_print: config.pretty_json,
    }));

    let mut service =
        match PhoneBookService::with_default_region(storage, normalizer, &config.default_region) {
            Ok(service) => service,
            Err(e) => {
                error!("Failed to load phonebook state: {}", e);
                return Err(e.into());
            }
        };

    phonebook::cli::run(&mut service)?;

    info!("phonebook shutdown complete");
    Ok(())
}
