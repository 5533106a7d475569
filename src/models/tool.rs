use serde::{Deserialize, Serialize};
use std::fmt;

/// Which content type a request asks for.
///
/// The wire form is the snake_case name (`"landing_page"`). Selectors outside
/// the catalogue survive as [`ToolType::Other`] and are served as generic text
/// tasks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ToolType {
    FacebookAds,
    GoogleAds,
    AdsCreative,
    VideoAds,
    SalesPage,
    Newsletter,
    Followup,
    LandingPage,
    AgencySite,
    BrandTwin,
    VisualDna,
    BrandStrategy,
    LogoGenerator,
    ImageGenerator,
    Other(String),
}

/// The two mutually exclusive processing paths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskKind {
    Text,
    Image,
}

impl ToolType {
    pub const ALL: [ToolType; 14] = [
        ToolType::FacebookAds,
        ToolType::GoogleAds,
        ToolType::AdsCreative,
        ToolType::VideoAds,
        ToolType::SalesPage,
        ToolType::Newsletter,
        ToolType::Followup,
        ToolType::LandingPage,
        ToolType::AgencySite,
        ToolType::BrandTwin,
        ToolType::VisualDna,
        ToolType::BrandStrategy,
        ToolType::LogoGenerator,
        ToolType::ImageGenerator,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            ToolType::FacebookAds => "facebook_ads",
            ToolType::GoogleAds => "google_ads",
            ToolType::AdsCreative => "ads_creative",
            ToolType::VideoAds => "video_ads",
            ToolType::SalesPage => "sales_page",
            ToolType::Newsletter => "newsletter",
            ToolType::Followup => "followup",
            ToolType::LandingPage => "landing_page",
            ToolType::AgencySite => "agency_site",
            ToolType::BrandTwin => "brand_twin",
            ToolType::VisualDna => "visual_dna",
            ToolType::BrandStrategy => "brand_strategy",
            ToolType::LogoGenerator => "logo_generator",
            ToolType::ImageGenerator => "image_generator",
            ToolType::Other(name) => name,
        }
    }

    pub fn task_kind(&self) -> TaskKind {
        match self {
            ToolType::LogoGenerator | ToolType::ImageGenerator => TaskKind::Image,
            _ => TaskKind::Text,
        }
    }

    pub fn is_image_task(&self) -> bool {
        self.task_kind() == TaskKind::Image
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, ToolType::Other(_))
    }
}

impl From<String> for ToolType {
    fn from(value: String) -> Self {
        ToolType::ALL
            .into_iter()
            .find(|tool| tool.as_str() == value)
            .unwrap_or(ToolType::Other(value))
    }
}

impl From<&str> for ToolType {
    fn from(value: &str) -> Self {
        ToolType::from(value.to_string())
    }
}

impl From<ToolType> for String {
    fn from(tool: ToolType) -> Self {
        tool.as_str().to_string()
    }
}

impl fmt::Display for ToolType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
