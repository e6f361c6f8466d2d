//! Shopprr Report - sales reporting service for the storefront admin

use anyhow::Result;
use shopprr_report::{routes, Config, HttpStorefrontClient, ReportService};
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::registry().with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into())).with(tracing_subscriber::fmt::layer()).init();

    let config = Config::from_env()?;
    if config.session.is_none() {
        tracing::warn!("STOREFRONT_SESSION not set; the order listing will likely reject requests");
    }
    let client = HttpStorefrontClient::from_config(&config)?;
    tracing::info!(upstream = client.base_url(), "using storefront API");
    let service = Arc::new(ReportService::new(Arc::new(client)));

    // A failed warm-up is not fatal: queries retry the fetch on demand.
    if config.refresh_on_start {
        if let Err(e) = service.refresh().await {
            tracing::warn!(error = %e, "initial report refresh failed");
        }
    }

    let app = routes::router(service);
    tracing::info!("📊 Shopprr report listening on 0.0.0.0:{}", config.port);
    axum::serve(tokio::net::TcpListener::bind(format!("0.0.0.0:{}", config.port)).await?, app).await?;
    Ok(())
}
