use crate::forward::{ForwardTool, NoInput};
use crate::registry::ToolRegistryBuilder;
use crate::traits::ToolAnnotations;
use std::sync::Arc;

pub fn read_account() -> ForwardTool<NoInput> {
    ForwardTool::new(
        "read_account",
        "/account/read",
        "Read the organization account status.",
        ToolAnnotations::titled("Read account")
            .read_only(true)
            .open_world(true),
    )
    .returns(&[
        ("organizationId", "string"),
        ("creditBalance", "number"),
        ("card", "object"),
    ])
}

pub fn register(builder: &mut ToolRegistryBuilder) {
    builder.register(Arc::new(read_account()));
}
