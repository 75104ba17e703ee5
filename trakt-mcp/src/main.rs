use anyhow::{anyhow, Context, Result};
use std::sync::Arc;
use trakt_auth::Settings;
use trakt_mcp::{init_logging, transport, AppContext, McpServer};

#[tokio::main]
async fn main() -> Result<()> {
    // A .env file is optional; real environment variables win
    dotenvy::dotenv().ok();

    let settings = Settings::new().context("Failed to load configuration")?;
    settings
        .validate()
        .map_err(|e| anyhow!("Invalid configuration: {}", e))?;

    let log_guard = init_logging(settings.log_dir.as_deref())?;
    if let Some(path) = &log_guard.log_path {
        tracing::info!("Logging to {}", path.display());
    }

    let ctx = AppContext::new(&settings).context("Failed to initialize Trakt client")?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        authenticated = ctx.session().is_authenticated().await,
        "Starting Trakt MCP server on stdio"
    );

    let (source, sink) = transport::stdio();
    Arc::new(McpServer::new(Arc::new(ctx)))
        .serve(source, sink)
        .await?;

    Ok(())
}
