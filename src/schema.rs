//! Response contracts for text tasks.
//!
//! Every text tool maps to exactly one [`SchemaKind`]. The mapping is a table
//! rather than a chain of comparisons so that adding a tool is a one-line
//! change, and anything missing from the table is served with the generic
//! three-field schema.

use once_cell::sync::Lazy;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::HashMap;
use std::fmt;

use crate::models::ToolType;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SchemaKind {
    LandingPage,
    SalesPage,
    AgencySite,
    Generic,
}

static SCHEMA_TABLE: Lazy<HashMap<ToolType, SchemaKind>> = Lazy::new(|| {
    HashMap::from([
        (ToolType::LandingPage, SchemaKind::LandingPage),
        (ToolType::SalesPage, SchemaKind::SalesPage),
        (ToolType::AgencySite, SchemaKind::AgencySite),
        (ToolType::FacebookAds, SchemaKind::Generic),
        (ToolType::GoogleAds, SchemaKind::Generic),
        (ToolType::AdsCreative, SchemaKind::Generic),
        (ToolType::VideoAds, SchemaKind::Generic),
        (ToolType::Newsletter, SchemaKind::Generic),
        (ToolType::Followup, SchemaKind::Generic),
        (ToolType::BrandTwin, SchemaKind::Generic),
        (ToolType::VisualDna, SchemaKind::Generic),
        (ToolType::BrandStrategy, SchemaKind::Generic),
    ])
});

impl SchemaKind {
    /// Schema descriptor for a tool. Image tools and unrecognized selectors
    /// are not in the table and fall back to [`SchemaKind::Generic`]; callers
    /// route image tools away before asking.
    pub fn for_tool(tool: &ToolType) -> SchemaKind {
        SCHEMA_TABLE
            .get(tool)
            .copied()
            .unwrap_or(SchemaKind::Generic)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaKind::LandingPage => "landing_page",
            SchemaKind::SalesPage => "sales_page",
            SchemaKind::AgencySite => "agency_site",
            SchemaKind::Generic => "generic",
        }
    }

    pub fn required_fields(&self) -> &'static [&'static str] {
        match self {
            SchemaKind::LandingPage => &[
                "heroHeadline",
                "problemDescription",
                "solutionDescription",
                "ctaText",
            ],
            SchemaKind::SalesPage => &[
                "headline",
                "subheadline",
                "storySection",
                "benefits",
                "faq",
                "cta",
            ],
            SchemaKind::AgencySite => &["sections"],
            SchemaKind::Generic => &["headline", "content", "cta"],
        }
    }

    /// The structured-output schema sent to the model, in the provider's
    /// OpenAPI subset.
    pub fn response_schema(&self) -> Value {
        match self {
            SchemaKind::LandingPage => json!({
                "type": "OBJECT",
                "properties": {
                    "heroHeadline": { "type": "STRING" },
                    "problemDescription": { "type": "STRING" },
                    "solutionDescription": { "type": "STRING" },
                    "ctaText": { "type": "STRING" }
                },
                "required": self.required_fields()
            }),
            SchemaKind::SalesPage => json!({
                "type": "OBJECT",
                "properties": {
                    "headline": { "type": "STRING" },
                    "subheadline": { "type": "STRING" },
                    "storySection": { "type": "STRING" },
                    "benefits": { "type": "ARRAY", "items": { "type": "STRING" } },
                    "faq": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "question": { "type": "STRING" },
                                "answer": { "type": "STRING" }
                            },
                            "required": ["question", "answer"]
                        }
                    },
                    "cta": { "type": "STRING" }
                },
                "required": self.required_fields()
            }),
            SchemaKind::AgencySite => json!({
                "type": "OBJECT",
                "properties": {
                    "sections": {
                        "type": "ARRAY",
                        "items": {
                            "type": "OBJECT",
                            "properties": {
                                "title": { "type": "STRING" },
                                "content": { "type": "STRING" }
                            },
                            "required": ["title", "content"]
                        }
                    }
                },
                "required": self.required_fields()
            }),
            SchemaKind::Generic => json!({
                "type": "OBJECT",
                "properties": {
                    "headline": { "type": "STRING" },
                    "content": { "type": "STRING" },
                    "cta": { "type": "STRING" }
                },
                "required": self.required_fields()
            }),
        }
    }
}

impl fmt::Display for SchemaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_builders_have_dedicated_schemas() {
        assert_eq!(SchemaKind::for_tool(&ToolType::LandingPage), SchemaKind::LandingPage);
        assert_eq!(SchemaKind::for_tool(&ToolType::SalesPage), SchemaKind::SalesPage);
        assert_eq!(SchemaKind::for_tool(&ToolType::AgencySite), SchemaKind::AgencySite);
    }

    #[test]
    fn test_other_text_tools_use_generic() {
        let dedicated = [ToolType::LandingPage, ToolType::SalesPage, ToolType::AgencySite];
        for tool in ToolType::ALL {
            if tool.is_image_task() || dedicated.contains(&tool) {
                continue;
            }
            assert_eq!(SchemaKind::for_tool(&tool), SchemaKind::Generic, "{}", tool);
        }
        assert_eq!(
            SchemaKind::for_tool(&ToolType::Other("press_release".into())),
            SchemaKind::Generic
        );
    }

    #[test]
    fn test_response_schema_lists_required_fields() {
        let schema = SchemaKind::SalesPage.response_schema();
        let required: Vec<&str> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(
            required,
            vec!["headline", "subheadline", "storySection", "benefits", "faq", "cta"]
        );
        assert_eq!(schema["properties"]["benefits"]["type"], "ARRAY");
        assert_eq!(
            SchemaKind::AgencySite.response_schema()["properties"]["sections"]["items"]["required"],
            json!(["title", "content"])
        );
    }
}
