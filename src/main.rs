mod app;
mod error;
mod utils;
mod workflow;

use app::PureVision;
use clap::Parser;
use tracing::{info, Level};
use workflow::StorageClient;

/// Desktop client for the Pure Vision upscaling service.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct AppConfig {
    /// Base URL of the storage project that holds the image bucket.
    #[arg(long, env = "PUREVISION_STORAGE_URL")]
    storage_url: String,

    /// Publishable API key for the storage project.
    #[arg(long, env = "PUREVISION_STORAGE_KEY", hide_env_values = true)]
    storage_key: String,
}

fn main() -> Result<(), eframe::Error> {
    let config = AppConfig::parse();

    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_target(true)
        .init();

    info!("Starting Pure Vision");

    let storage = StorageClient::new(&config.storage_url, &config.storage_key);

    let options = eframe::NativeOptions {
        viewport: eframe::egui::ViewportBuilder::default()
            .with_inner_size([900.0, 860.0])
            .with_min_inner_size([640.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Pure Vision",
        options,
        Box::new(move |cc| Box::new(PureVision::new(cc, storage))),
    )
}
