//! Assistant endpoints under `/ai/tools`.

use crate::forward::ForwardTool;
use crate::registry::ToolRegistryBuilder;
use crate::traits::ToolAnnotations;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum AiLanguage {
    Py,
    #[serde(rename = "C#")]
    CSharp,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SourceFile {
    pub name: String,
    pub content: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BasicFilesRequest {
    pub language: AiLanguage,
    pub files: Vec<SourceFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CodeCompletionRequest {
    pub language: AiLanguage,
    /// Text to complete, e.g. `self.add_`.
    pub sentence: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_size_limit: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ErrorDetails {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stacktrace: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ErrorEnhanceRequest {
    pub language: AiLanguage,
    pub error: ErrorDetails,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct Pep8ConvertRequest {
    pub files: Vec<SourceFile>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SearchCriterion {
    /// Search text.
    pub input: String,
    /// `Docs`, `Forum`, `Examples` or `Lean`.
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
}

#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SearchRequest {
    pub language: AiLanguage,
    pub criteria: Vec<SearchCriterion>,
}

const STATE: &[(&str, &str)] = &[("state", "string"), ("version", "string"), ("payload", "object")];

pub fn check_initialization_errors() -> ForwardTool<BasicFilesRequest> {
    ForwardTool::new(
        "check_initialization_errors",
        "/ai/tools/backtest-init",
        "Run a backtest for a few seconds to initialize the algorithm and get \
         initialization errors if any.",
        ToolAnnotations::titled("Check initialization errors").read_only(true),
    )
    .returns(STATE)
}

pub fn complete_code() -> ForwardTool<CodeCompletionRequest> {
    ForwardTool::new(
        "complete_code",
        "/ai/tools/complete",
        "Show the code completion for a specific text input.",
        ToolAnnotations::titled("Complete code").read_only(true),
    )
    .returns(STATE)
}

pub fn enhance_error_message() -> ForwardTool<ErrorEnhanceRequest> {
    ForwardTool::new(
        "enhance_error_message",
        "/ai/tools/error-enhance",
        "Show additional context and suggestions for error messages.",
        ToolAnnotations::titled("Enhance error message").read_only(true),
    )
    .returns(STATE)
}

pub fn update_code_to_pep8() -> ForwardTool<Pep8ConvertRequest> {
    ForwardTool::new(
        "update_code_to_pep8",
        "/ai/tools/pep8-convert",
        "Update Python code to follow PEP8 style.",
        ToolAnnotations::titled("Update code to PEP8").read_only(true),
    )
    .returns(STATE)
}

pub fn check_syntax() -> ForwardTool<BasicFilesRequest> {
    ForwardTool::new(
        "check_syntax",
        "/ai/tools/syntax-check",
        "Check the syntax of a code.",
        ToolAnnotations::titled("Check syntax").read_only(true),
    )
    .returns(STATE)
}

pub fn search_quantconnect() -> ForwardTool<SearchRequest> {
    ForwardTool::new(
        "search_quantconnect",
        "/ai/tools/search",
        "Search for content in QuantConnect.",
        ToolAnnotations::titled("Search QuantConnect").read_only(true),
    )
    .returns(&[("state", "string"), ("retrivalResults", "array")])
}

pub fn register(builder: &mut ToolRegistryBuilder) {
    builder.register(Arc::new(check_initialization_errors()));
    builder.register(Arc::new(complete_code()));
    builder.register(Arc::new(enhance_error_message()));
    builder.register(Arc::new(update_code_to_pep8()));
    builder.register(Arc::new(check_syntax()));
    builder.register(Arc::new(search_quantconnect()));
}
