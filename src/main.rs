//! Tunegate gateway entry point

use anyhow::Result;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;
use tunegate::{
    config::Settings,
    store::{DocumentStore, ElasticClient},
    web::{create_router, AppState},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first so debug mode can raise the log level
    let settings = load_settings()?;

    let level = if settings.general.debug {
        Level::DEBUG
    } else {
        Level::INFO
    };
    FmtSubscriber::builder()
        .with_max_level(level)
        .with_target(false)
        .init();

    info!("Starting tunegate v{}", tunegate::VERSION);
    info!("Document store at {}", settings.store.url);

    // One shared store client for all search and bulk calls
    let store: Arc<dyn DocumentStore> = Arc::new(ElasticClient::with_settings(&settings.store)?);

    let addr = SocketAddr::new(settings.server.bind_address.parse()?, settings.server.port);

    let state = AppState::new(settings, store);
    let app = create_router(state);

    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Load settings from file or use defaults
fn load_settings() -> Result<Settings> {
    // Check environment variable first
    if let Ok(path) = std::env::var("TUNEGATE_SETTINGS_PATH") {
        let path = PathBuf::from(path);
        if path.exists() {
            let mut settings = Settings::from_file(&path)?;
            settings.merge_env();
            return Ok(settings);
        }
    }

    // Try each default path
    let paths = [
        PathBuf::from("settings.yml"),
        PathBuf::from("config/settings.yml"),
        PathBuf::from("/etc/tunegate/settings.yml"),
        dirs::config_dir()
            .map(|p| p.join("tunegate/settings.yml"))
            .unwrap_or_default(),
    ];

    for path in paths.iter() {
        if path.exists() {
            let mut settings = Settings::from_file(path)?;
            settings.merge_env();
            return Ok(settings);
        }
    }

    // Use defaults
    let mut settings = Settings::default();
    settings.merge_env();
    Ok(settings)
}
