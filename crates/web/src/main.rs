use std::net::SocketAddr;

use tracing::{info, warn};

use storycase_common::GeneratorConfig;
use storycase_web::server::{WebServerConfig, WEB_TEMPERATURE};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Best effort: a missing .env is fine.
    let _ = dotenvy::dotenv();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let web_addr: SocketAddr = std::env::var("STORYCASE_WEB_ADDR")
        .unwrap_or_else(|_| "127.0.0.1:8501".to_string())
        .parse()?;

    let password = std::env::var("APP_PASSWORD")
        .ok()
        .filter(|p| !p.is_empty());
    if password.is_none() {
        warn!("APP_PASSWORD is not set; every login attempt will be rejected");
    }

    let generator = GeneratorConfig::from_env().with_temperature(WEB_TEMPERATURE);
    if !generator.has_api_key() {
        warn!("OPENAI_API_KEY is not set; exports will contain the story only");
    }

    let cfg = WebServerConfig::new(password, generator);

    info!(
        "Starting Storycase on http://{} (model: {})",
        web_addr, cfg.generator.model
    );

    storycase_web::server::serve(web_addr, cfg).await
}
