use serde::{Deserialize, Serialize};
use std::fmt;

/// Brand and creative parameters supplied by the user.
///
/// Every field is optional on the wire; the composer decides which ones a
/// given tool requires before anything is sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerationInputs {
    #[serde(default)]
    pub business_name: String,
    #[serde(default)]
    pub niche: String,
    #[serde(default)]
    pub audience: String,
    #[serde(default)]
    pub tone: String,
    #[serde(default)]
    pub offer_details: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub writing_sample: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_style: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_colors: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_icons: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aspect_ratio: Option<AspectRatio>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub style_preset: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refinement_prompt: Option<String>,
}

impl GenerationInputs {
    pub fn new(business_name: impl Into<String>) -> Self {
        Self {
            business_name: business_name.into(),
            ..Default::default()
        }
    }

    pub fn with_brand(mut self, niche: impl Into<String>, audience: impl Into<String>) -> Self {
        self.niche = niche.into();
        self.audience = audience.into();
        self
    }

    pub fn with_tone(mut self, tone: impl Into<String>) -> Self {
        self.tone = tone.into();
        self
    }

    pub fn with_offer(mut self, offer_details: impl Into<String>) -> Self {
        self.offer_details = offer_details.into();
        self
    }

    pub fn with_writing_sample(mut self, sample: impl Into<String>) -> Self {
        self.writing_sample = Some(sample.into());
        self
    }

    pub fn with_logo(
        mut self,
        style: impl Into<String>,
        colors: impl Into<String>,
        icons: Option<String>,
    ) -> Self {
        self.logo_style = Some(style.into());
        self.logo_colors = Some(colors.into());
        self.logo_icons = icons;
        self
    }

    pub fn with_aspect_ratio(mut self, ratio: AspectRatio) -> Self {
        self.aspect_ratio = Some(ratio);
        self
    }

    pub fn with_style_preset(mut self, preset: impl Into<String>) -> Self {
        self.style_preset = Some(preset.into());
        self
    }

    /// Trimmed refinement instruction, `None` when absent or blank.
    pub fn refinement(&self) -> Option<&str> {
        self.refinement_prompt
            .as_deref()
            .map(str::trim)
            .filter(|prompt| !prompt.is_empty())
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum AspectRatio {
    #[default]
    #[serde(rename = "1:1")]
    Square,
    #[serde(rename = "16:9")]
    Landscape,
    #[serde(rename = "9:16")]
    Portrait,
    #[serde(rename = "4:3")]
    Standard,
    #[serde(rename = "3:4")]
    Tall,
}

impl AspectRatio {
    pub fn as_str(&self) -> &'static str {
        match self {
            AspectRatio::Square => "1:1",
            AspectRatio::Landscape => "16:9",
            AspectRatio::Portrait => "9:16",
            AspectRatio::Standard => "4:3",
            AspectRatio::Tall => "3:4",
        }
    }
}

impl fmt::Display for AspectRatio {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
