use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::models::{GenerationInputs, GenerationOutput, ToolType};

/// Body of `POST /generate`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    pub tool_type: ToolType,
    #[serde(default)]
    pub inputs: GenerationInputs,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uid: Option<String>,
    /// Prior output, present only when refining. Kept as raw JSON on the wire
    /// and decoded against the tool's schema by the dispatcher.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_result: Option<Value>,
}

impl GenerateRequest {
    pub fn new(tool_type: ToolType, inputs: GenerationInputs) -> Self {
        Self {
            tool_type,
            inputs,
            uid: None,
            previous_result: None,
        }
    }

    pub fn with_uid(mut self, uid: impl Into<String>) -> Self {
        self.uid = Some(uid.into());
        self
    }

    pub fn with_previous_result(mut self, previous: Value) -> Self {
        self.previous_result = Some(previous);
        self
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerateResponse {
    pub output: GenerationOutput,
}

/// Raw success envelope as the composer reads it, before schema decoding.
#[derive(Debug, Deserialize)]
pub struct RawGenerateResponse {
    pub output: Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

impl ErrorResponse {
    pub fn new(error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
        }
    }
}
