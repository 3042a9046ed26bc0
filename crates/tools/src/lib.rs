//! QuantConnect operations exposed as MCP tools.
//!
//! Each tool parses its typed request, makes one API call and either relays
//! the body or reduces it to a brief projection. Tools are collected into an
//! immutable [`ToolRegistry`] at startup.

pub mod catalog;
pub mod context;
pub mod error;
pub mod forward;
pub mod normalize;
pub mod registry;
pub mod schema;
pub mod traits;

pub use catalog::ToolProfile;
pub use context::ToolContext;
pub use error::ToolError;
pub use forward::{ForwardTool, ProjectedTool};
pub use normalize::{normalize, Normalized, NormalizeError, Projection};
pub use registry::{ToolDescriptor, ToolRegistry, ToolRegistryBuilder};
pub use traits::{Tool, ToolAnnotations};
