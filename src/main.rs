//! Service binary: wires configuration, the registry client and the lead
//! pipeline into the HTTP router.

use std::sync::Arc;

use anyhow::Context;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use lead_gateway::api::{self, ApiState};
use lead_gateway::config::AppConfig;
use lead_gateway::lead::LeadPipeline;
use lead_gateway::registry::RegistryClient;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = AppConfig::from_env().context("Failed to load configuration")?;

    if !config.crm.primary_configured() {
        tracing::warn!("primary CRM credentials missing, leads will use the fallback path");
    }

    let registry =
        Arc::new(RegistryClient::new(&config.registry).context("Failed to create registry client")?);
    let pipeline =
        Arc::new(LeadPipeline::from_config(&config.crm).context("Failed to create lead pipeline")?);

    let app = api::router(ApiState { registry, pipeline }).layer(TraceLayer::new_for_http());

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.bind_addr))?;

    tracing::info!(addr = %config.bind_addr, "lead-gateway listening");
    axum::serve(listener, app).await.context("Server error")?;

    Ok(())
}
