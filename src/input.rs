//! Hook payload decoding.

use serde::Deserialize;
use serde_json::{Map, Value};
use std::io::Read;

use crate::error::InputError;

/// Prompt used when the submitted text is empty.
pub const DEFAULT_PROMPT: &str = "commit my changes";

/// A tool invocation awaiting approval. Accepts both `{tool, params}` and the
/// host-native `{tool_name, tool_input}` field names. When a payload carries
/// both, `tool`/`params` win.
#[derive(Debug, Default, Deserialize)]
#[serde(from = "RawToolEvent")]
pub struct ToolEvent {
    pub tool: Option<String>,
    pub params: Option<Map<String, Value>>,
}

#[derive(Deserialize)]
struct RawToolEvent {
    #[serde(default)]
    tool: Option<String>,
    #[serde(default)]
    tool_name: Option<String>,
    #[serde(default)]
    params: Option<Map<String, Value>>,
    #[serde(default)]
    tool_input: Option<Map<String, Value>>,
}

impl From<RawToolEvent> for ToolEvent {
    fn from(raw: RawToolEvent) -> Self {
        Self {
            tool: raw.tool.or(raw.tool_name),
            params: raw.params.or(raw.tool_input),
        }
    }
}

/// Read stdin to end-of-stream.
pub fn read_stdin() -> Result<String, InputError> {
    let mut input = String::new();
    std::io::stdin().read_to_string(&mut input)?;
    Ok(input)
}

/// Decode a guard payload. Blank input is an empty event.
pub fn parse_tool_event(input: &str) -> Result<ToolEvent, InputError> {
    if input.trim().is_empty() {
        return Ok(ToolEvent::default());
    }
    Ok(serde_json::from_str(input)?)
}

/// Extract the prompt text from a JSON string, a `{"prompt": ...}` object,
/// or bare text. Empty text becomes [`DEFAULT_PROMPT`].
pub fn parse_prompt(input: &str) -> String {
    let trimmed = input.trim();
    let text = match serde_json::from_str::<Value>(trimmed) {
        Ok(Value::String(s)) => s,
        Ok(Value::Object(map)) => map
            .get("prompt")
            .and_then(Value::as_str)
            .map(String::from)
            .unwrap_or_else(|| trimmed.to_string()),
        _ => trimmed.to_string(),
    };
    match text.trim() {
        "" => DEFAULT_PROMPT.to_string(),
        t => t.to_string(),
    }
}
