use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::{
    error::{AdcraftError, Result},
    models::ToolType,
    schema::SchemaKind,
};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandingPageCopy {
    pub hero_headline: String,
    pub problem_description: String,
    pub solution_description: String,
    pub cta_text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesPageCopy {
    pub headline: String,
    pub subheadline: String,
    pub story_section: String,
    pub benefits: Vec<String>,
    pub faq: Vec<FaqEntry>,
    pub cta: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FaqEntry {
    pub question: String,
    pub answer: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgencySiteCopy {
    pub sections: Vec<SiteSection>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteSection {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenericCopy {
    pub headline: String,
    pub content: String,
    pub cta: String,
}

/// Image task result: a data URI and whatever caption the model wrote.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageAsset {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub description: String,
}

impl ImageAsset {
    pub fn is_empty(&self) -> bool {
        self.image.as_deref().map_or(true, str::is_empty) && self.description.trim().is_empty()
    }
}

/// The output of one generation or refinement call.
///
/// Serialized untagged, so the wire form is exactly the tool's schema.
/// Decoding goes through [`GenerationOutput::from_value`], which needs the
/// tool selector to know which shape to expect.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum GenerationOutput {
    LandingPage(LandingPageCopy),
    SalesPage(SalesPageCopy),
    AgencySite(AgencySiteCopy),
    Generic(GenericCopy),
    Image(ImageAsset),
}

impl GenerationOutput {
    /// Decode and validate a result against the tool's authoritative schema.
    ///
    /// Missing fields, wrong types and blank text all yield
    /// [`AdcraftError::SchemaMismatch`].
    pub fn from_value(tool: &ToolType, value: Value) -> Result<Self> {
        if tool.is_image_task() {
            let asset: ImageAsset = serde_json::from_value(value).map_err(|e| {
                AdcraftError::InvalidRequest(format!("image result is malformed: {}", e))
            })?;
            if asset.is_empty() {
                return Err(AdcraftError::InvalidRequest(
                    "image result carries neither an image nor a description".into(),
                ));
            }
            return Ok(GenerationOutput::Image(asset));
        }

        let kind = SchemaKind::for_tool(tool);
        let output = match kind {
            SchemaKind::LandingPage => GenerationOutput::LandingPage(decode(kind, value)?),
            SchemaKind::SalesPage => GenerationOutput::SalesPage(decode(kind, value)?),
            SchemaKind::AgencySite => GenerationOutput::AgencySite(decode(kind, value)?),
            SchemaKind::Generic => GenerationOutput::Generic(decode(kind, value)?),
        };

        if let Some(field) = output.first_blank_field() {
            return Err(AdcraftError::schema_mismatch(
                kind,
                format!("field `{}` is empty", field),
            ));
        }

        Ok(output)
    }

    pub fn schema(&self) -> Option<SchemaKind> {
        match self {
            GenerationOutput::LandingPage(_) => Some(SchemaKind::LandingPage),
            GenerationOutput::SalesPage(_) => Some(SchemaKind::SalesPage),
            GenerationOutput::AgencySite(_) => Some(SchemaKind::AgencySite),
            GenerationOutput::Generic(_) => Some(SchemaKind::Generic),
            GenerationOutput::Image(_) => None,
        }
    }

    pub fn as_image(&self) -> Option<&ImageAsset> {
        match self {
            GenerationOutput::Image(asset) => Some(asset),
            _ => None,
        }
    }

    pub fn to_value(&self) -> Result<Value> {
        serde_json::to_value(self).map_err(|e| AdcraftError::Serialization(e.to_string()))
    }

    fn first_blank_field(&self) -> Option<&'static str> {
        fn blank(text: &str) -> bool {
            text.trim().is_empty()
        }

        match self {
            GenerationOutput::LandingPage(copy) => [
                ("heroHeadline", &copy.hero_headline),
                ("problemDescription", &copy.problem_description),
                ("solutionDescription", &copy.solution_description),
                ("ctaText", &copy.cta_text),
            ]
            .into_iter()
            .find(|(_, text)| blank(text))
            .map(|(name, _)| name),
            GenerationOutput::SalesPage(copy) => {
                if blank(&copy.headline) {
                    Some("headline")
                } else if blank(&copy.subheadline) {
                    Some("subheadline")
                } else if blank(&copy.story_section) {
                    Some("storySection")
                } else if blank(&copy.cta) {
                    Some("cta")
                } else if copy
                    .faq
                    .iter()
                    .any(|entry| blank(&entry.question) || blank(&entry.answer))
                {
                    Some("faq")
                } else {
                    None
                }
            }
            GenerationOutput::AgencySite(copy) => {
                let incomplete = copy
                    .sections
                    .iter()
                    .any(|section| blank(&section.title) || blank(&section.content));
                (copy.sections.is_empty() || incomplete).then_some("sections")
            }
            GenerationOutput::Generic(copy) => [
                ("headline", &copy.headline),
                ("content", &copy.content),
                ("cta", &copy.cta),
            ]
            .into_iter()
            .find(|(_, text)| blank(text))
            .map(|(name, _)| name),
            GenerationOutput::Image(_) => None,
        }
    }
}

fn decode<T: DeserializeOwned>(kind: SchemaKind, value: Value) -> Result<T> {
    if !value.is_object() {
        return Err(AdcraftError::schema_mismatch(kind, "expected a JSON object"));
    }
    serde_json::from_value(value).map_err(|e| AdcraftError::schema_mismatch(kind, e.to_string()))
}
