use crate::config::AppConfig;
use crate::workspace::OrganizationWorkspace;
use anyhow::{Context, Result};
use qc_mcp_tools::catalog::build_registry;
use qc_mcp_tools::{ToolContext, ToolRegistry};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Logs go to stderr; stdout carries protocol messages only.
pub fn init_logging(default_filter: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .try_init();
}

pub struct App {
    pub config: AppConfig,
    pub registry: Arc<ToolRegistry>,
    pub context: Arc<ToolContext>,
    pub workspace: OrganizationWorkspace,
}

pub fn bootstrap(config: AppConfig) -> Result<App> {
    config.validate().context("Invalid configuration")?;

    info!(
        user_id = %config.user_id,
        token_set = !config.api_token.is_empty(),
        api_url = %config.api_url,
        agent = %config.agent_name,
        "Loaded configuration"
    );

    let registry = Arc::new(build_registry(config.profile));
    info!(profile = %config.profile, tools = registry.count(), "Registered tools");

    let workspace = OrganizationWorkspace::load(
        config.mount_source_path.as_deref(),
        config.mount_dst_path.as_deref(),
    );
    if workspace.available {
        info!(
            projects = workspace.project_count(),
            "Indexed mounted organization workspace"
        );
    }

    let context = Arc::new(config.tool_context());

    Ok(App {
        config,
        registry,
        context,
        workspace,
    })
}
