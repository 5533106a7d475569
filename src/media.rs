//! Data-URI handling for image payloads.

use base64::{engine::general_purpose::STANDARD, Engine as _};

use crate::error::{AdcraftError, Result};

pub const DEFAULT_IMAGE_MIME: &str = "image/png";

/// An image split into mime type and raw base64 payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage {
    pub mime_type: String,
    pub data: String,
}

impl EncodedImage {
    /// Parse either a `data:image/<kind>;base64,<payload>` URI or a bare
    /// base64 payload (assumed PNG). The payload must decode.
    pub fn parse(input: &str) -> Result<Self> {
        let input = input.trim();
        let (mime_type, data) = match split_data_uri(input) {
            Some((mime, data)) => (mime.to_string(), data),
            None => (DEFAULT_IMAGE_MIME.to_string(), input),
        };

        if data.is_empty() {
            return Err(AdcraftError::InvalidRequest("image payload is empty".into()));
        }
        STANDARD
            .decode(data)
            .map_err(|e| AdcraftError::InvalidRequest(format!("image is not valid base64: {}", e)))?;

        Ok(Self {
            mime_type,
            data: data.to_string(),
        })
    }

    pub fn to_data_uri(&self) -> String {
        to_data_uri(&self.mime_type, &self.data)
    }
}

pub fn to_data_uri(mime_type: &str, data: &str) -> String {
    let mime_type = if mime_type.is_empty() {
        DEFAULT_IMAGE_MIME
    } else {
        mime_type
    };
    format!("data:{};base64,{}", mime_type, data)
}

fn split_data_uri(input: &str) -> Option<(&str, &str)> {
    let rest = input.strip_prefix("data:")?;
    let (meta, data) = rest.split_once(',')?;
    let mime = meta.strip_suffix(";base64")?;
    let kind = mime.strip_prefix("image/")?;
    if kind.is_empty() || !kind.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return None;
    }
    Some((mime, data))
}
