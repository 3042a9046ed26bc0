use crate::traits::{Tool, ToolAnnotations};
use serde_json::{json, Value};
use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::warn;

/// A registered tool with its schemas resolved once at registration.
#[derive(Clone)]
pub struct ToolDescriptor {
    pub name: &'static str,
    pub description: &'static str,
    pub annotations: ToolAnnotations,
    pub input_schema: Value,
    pub output_schema: Value,
    tool: Arc<dyn Tool>,
}

impl ToolDescriptor {
    pub fn new(tool: Arc<dyn Tool>) -> Self {
        Self {
            name: tool.name(),
            description: tool.description(),
            annotations: tool.annotations(),
            input_schema: tool.input_schema(),
            output_schema: tool.output_schema(),
            tool,
        }
    }

    pub fn tool(&self) -> Arc<dyn Tool> {
        self.tool.clone()
    }

    /// Entry for an MCP `tools/list` result.
    pub fn listing(&self) -> Value {
        json!({
            "name": self.name,
            "title": self.annotations.title,
            "description": self.description,
            "inputSchema": self.input_schema,
            "outputSchema": self.output_schema,
            "annotations": self.annotations,
        })
    }
}

#[derive(Default)]
pub struct ToolRegistryBuilder {
    tools: HashMap<&'static str, ToolDescriptor>,
}

impl ToolRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, tool: Arc<dyn Tool>) -> &ToolDescriptor {
        let descriptor = ToolDescriptor::new(tool);
        match self.tools.entry(descriptor.name) {
            Entry::Occupied(mut entry) => {
                warn!("Tool {} registered twice, keeping the latest", descriptor.name);
                entry.insert(descriptor);
                entry.into_mut()
            }
            Entry::Vacant(entry) => entry.insert(descriptor),
        }
    }

    pub fn build(self) -> ToolRegistry {
        ToolRegistry { tools: self.tools }
    }
}

/// Immutable name -> tool table.
pub struct ToolRegistry {
    tools: HashMap<&'static str, ToolDescriptor>,
}

impl ToolRegistry {
    pub fn get(&self, name: &str) -> Option<&ToolDescriptor> {
        self.tools.get(name)
    }

    /// Tool names, sorted.
    pub fn list(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.tools.keys().copied().collect();
        names.sort_unstable();
        names
    }

    pub fn count(&self) -> usize {
        self.tools.len()
    }

    pub fn descriptors(&self) -> Vec<&ToolDescriptor> {
        let mut descriptors: Vec<_> = self.tools.values().collect();
        descriptors.sort_by_key(|d| d.name);
        descriptors
    }

    pub fn listings(&self) -> Vec<Value> {
        self.descriptors().into_iter().map(ToolDescriptor::listing).collect()
    }
}
