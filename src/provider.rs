//! Provider-neutral model invocation.
//!
//! The dispatcher only talks to [`ModelProvider`]; the Gemini client is one
//! implementation, tests plug in scripted ones.

use async_trait::async_trait;
use serde_json::Value;

use crate::{error::Result, models::AspectRatio};

#[derive(Debug, Clone, PartialEq)]
pub enum ContentPart {
    Text(String),
    /// Raw base64 payload, no data-URI prefix.
    InlineImage { mime_type: String, data: String },
}

impl ContentPart {
    pub fn text(text: impl Into<String>) -> Self {
        ContentPart::Text(text.into())
    }
}

/// How the model is asked to shape its answer.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseFormat {
    /// JSON constrained by a schema.
    Json { schema: Value },
    /// Image output; the image model takes no structured response format.
    Image { aspect_ratio: AspectRatio },
}

#[derive(Debug, Clone, PartialEq)]
pub struct ContentRequest {
    pub model: String,
    pub parts: Vec<ContentPart>,
    pub system_instruction: Option<String>,
    pub format: ResponseFormat,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ContentResponse {
    pub parts: Vec<ContentPart>,
}

impl ContentResponse {
    pub fn new(parts: Vec<ContentPart>) -> Self {
        Self { parts }
    }

    /// All text parts concatenated in order.
    pub fn text(&self) -> String {
        self.parts
            .iter()
            .filter_map(|part| match part {
                ContentPart::Text(text) => Some(text.as_str()),
                ContentPart::InlineImage { .. } => None,
            })
            .collect()
    }
}

#[async_trait]
pub trait ModelProvider: Send + Sync {
    /// Perform exactly one model invocation.
    async fn generate_content(&self, request: ContentRequest) -> Result<ContentResponse>;

    fn name(&self) -> &str;
}
