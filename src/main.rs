use std::env;
use log::{error, info};

mod config;
mod errors;
mod fields;
mod initialization;
mod manager_openmeteo;
mod models;
mod monitor;
mod reading;
mod registry;
mod sensor;
mod worker;

const DEFAULT_CONFIG_PATH: &str = "seawatch.toml";

fn main() {
    let config_path = env::args().nth(1).unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());

    let config = match config::load_config(&config_path) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error loading configuration: {}", e);
            return;
        }
    };

    if let Err(e) = initialization::setup_logger(&config.general) {
        eprintln!("Error setting up logging: {}", e);
        return;
    }

    info!("seawatch version: {}", env!("CARGO_PKG_VERSION"));

    let registry = match initialization::init(&config) {
        Ok(r) => r,
        Err(e) => {
            error!("initialization failed: {}", e);
            return;
        }
    };
    info!("{} station(s) up", registry.len());

    worker::run(&registry);
}
