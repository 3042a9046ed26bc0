use crate::forward::{ForwardTool, NoInput};
use crate::registry::ToolRegistryBuilder;
use crate::traits::ToolAnnotations;
use std::sync::Arc;

pub fn read_lean_versions() -> ForwardTool<NoInput> {
    ForwardTool::new(
        "read_lean_versions",
        "/lean/versions/read",
        "Returns a list of LEAN versions with basic information for each version.",
        ToolAnnotations::titled("Read LEAN versions").read_only(true),
    )
    .returns(&[("versions", "array")])
}

pub fn register(builder: &mut ToolRegistryBuilder) {
    builder.register(Arc::new(read_lean_versions()));
}
