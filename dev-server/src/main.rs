//! Development server for AidLink UI development
//!
//! Runs the stub event backend and stub media host on one port so the UI
//! can be developed without touching the real services. Every event the UI
//! creates is logged; uploaded images are kept in memory and served back.
//!
//! Configuration is read from the environment or a .env file:
//! - IP_ADDRESS (default 127.0.0.1)
//! - PORT (default 8000, 0 for an os-assigned port)
//! - ALLOWED_ORIGINS (default "*")
//! - MEDIA_UPLOAD_PRESET (default "AIDlink demo")
//!
//! Usage: cargo run -p dev-server

use anyhow::Result;
use test_helpers::{
    Config, StubBackend, build,
    telemetry::{get_subscriber, init_subscriber, log_error},
};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file if available
    let _ = dotenvy::dotenv();

    let subscriber = get_subscriber("info".into());
    init_subscriber(subscriber);

    info!("🚀 Starting AidLink development server");

    let mut config = Config::from_env()?;
    let backend = StubBackend::new(&config.upload_preset);
    let server = build(&mut config, backend)?;
    let handle = server.handle();
    let server = tokio::spawn(server);

    let address = format!("http://{}:{}", config.ip, config.port);
    info!("✅ Stub backend running on {address}");
    info!("🎯 Development server ready!");
    info!("   Events: {address}/api/admin/events");
    info!("   Media:  {address}/media/upload");
    info!(
        "   UI:  cd ui && BACKEND_URL={address} \
         MEDIA_UPLOAD_URL={address}/media/upload \
         MEDIA_UPLOAD_PRESET='{}' trunk serve",
        config.upload_preset
    );
    info!("👋 Press Ctrl+C to shutdown");

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("🛑 Shutting down development server");
            handle.stop(true).await;
        }
        result = server => {
            if let Err(e) = result? {
                log_error(e);
            }
        }
    }
    Ok(())
}
