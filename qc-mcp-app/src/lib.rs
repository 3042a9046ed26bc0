pub mod bootstrap;
pub mod config;
pub mod dispatcher;
pub mod jsonrpc;
pub mod server;
pub mod workspace;

pub use bootstrap::{bootstrap, init_logging, App};
pub use config::AppConfig;
pub use dispatcher::ToolDispatcher;
pub use server::McpServer;
pub use workspace::OrganizationWorkspace;
