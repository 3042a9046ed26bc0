//! Every QuantConnect operation exposed as a tool, grouped by API area.

pub mod account;
pub mod ai;
pub mod backtests;
pub mod collaboration;
pub mod compile;
pub mod files;
pub mod lean;
pub mod live;
pub mod live_commands;
pub mod nodes;
pub mod object_store;
pub mod optimizations;
pub mod project;
pub mod server_version;

use crate::registry::{ToolRegistry, ToolRegistryBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

/// Which set of tools the server exposes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolProfile {
    #[default]
    Full,
    /// Project, file, compile and backtest essentials plus search.
    Minimal,
}

impl FromStr for ToolProfile {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "full" => Ok(ToolProfile::Full),
            "minimal" => Ok(ToolProfile::Minimal),
            other => Err(format!("Unknown tool profile: {}", other)),
        }
    }
}

impl fmt::Display for ToolProfile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ToolProfile::Full => write!(f, "full"),
            ToolProfile::Minimal => write!(f, "minimal"),
        }
    }
}

pub fn build_registry(profile: ToolProfile) -> ToolRegistry {
    let mut builder = ToolRegistryBuilder::new();
    match profile {
        ToolProfile::Full => register_all(&mut builder),
        ToolProfile::Minimal => register_minimal(&mut builder),
    }
    builder.build()
}

pub fn register_all(builder: &mut ToolRegistryBuilder) {
    account::register(builder);
    project::register(builder);
    collaboration::register(builder);
    nodes::register(builder);
    compile::register(builder);
    files::register(builder);
    backtests::register(builder);
    optimizations::register(builder);
    live::register(builder);
    live_commands::register(builder);
    object_store::register(builder);
    lean::register(builder);
    ai::register(builder);
    server_version::register(builder);
}

pub fn register_minimal(builder: &mut ToolRegistryBuilder) {
    builder.register(Arc::new(project::create_project()));
    builder.register(Arc::new(files::read_file()));
    builder.register(Arc::new(files::update_file_contents()));
    builder.register(Arc::new(compile::create_compile()));
    builder.register(Arc::new(compile::read_compile()));
    builder.register(Arc::new(backtests::create_backtest_brief()));
    builder.register(Arc::new(backtests::read_backtest_brief()));
    builder.register(Arc::new(backtests::read_backtest_statistics()));
    builder.register(Arc::new(ai::search_quantconnect()));
}
