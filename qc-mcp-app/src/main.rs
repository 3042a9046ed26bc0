use anyhow::{Context, Result};
use qc_mcp_app::{bootstrap, init_logging, AppConfig, McpServer};
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;
    init_logging(&config.log_level);

    let app = match bootstrap(config) {
        Ok(app) => app,
        Err(e) => {
            error!("Startup failed: {:#}", e);
            return Err(e);
        }
    };

    info!("QuantConnect MCP server listening on stdio");
    let server = Arc::new(McpServer::new(app.registry, app.context));
    server
        .serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
        .await?;

    info!("Shutting down");
    Ok(())
}
