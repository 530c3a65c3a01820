pub mod config;
pub mod controller;
pub mod mapping;
pub mod roster;
pub mod session;
pub mod transport;
pub mod ui;

use crate::config::AppConfig;
use crate::controller::{GamepadSource, GilrsSource};
use crate::mapping::{InputConfig, MappingTable};
use crate::ui::RemotepadUI;
use color_eyre::{eyre::eyre, Result};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    setup()?;

    let app_config = AppConfig::load_or_default().await;
    let input_config = app_config
        .input
        .to_input_config()
        .unwrap_or_else(|e| {
            warn!("Invalid bindings in config, using defaults: {}", e);
            InputConfig {
                mapping: MappingTable::default(),
                mode: app_config.input.mode,
                player_name: app_config.input.player_name.clone(),
            }
        });

    let cancel = CancellationToken::new();
    let (transport, inbound_rx) = transport::connect(&app_config.transport, cancel.clone())
        .map_err(|e| eyre!("Failed to open transport: {}", e))?;

    let gamepad: Option<Box<dyn GamepadSource>> = if app_config.gamepad.enabled {
        match GilrsSource::create() {
            Ok(source) => Some(Box::new(source)),
            Err(e) => {
                warn!("Gamepad input unavailable: {}", e);
                None
            }
        }
    } else {
        info!("Gamepad input disabled by config");
        None
    };

    info!("Starting UI in {} mode", input_config.mode);
    let transport_label = app_config.transport.to_string();
    let result = eframe::run_native(
        "remotepad",
        eframe::NativeOptions::default(),
        Box::new(move |cc| {
            Ok(Box::new(RemotepadUI::new(
                cc,
                input_config,
                transport,
                inbound_rx,
                gamepad,
                transport_label,
            )))
        }),
    );

    info!("UI closed, shutting down transport");
    cancel.cancel();
    result.map_err(|e| eyre!("UI error: {}", e))
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    setup_logging_env();
    Ok(())
}

fn setup_logging_env() {
    let level = std::env::var("RUST_LOG")
        .ok()
        .and_then(|value| value.parse::<Level>().ok())
        .unwrap_or(Level::INFO);

    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();
}
