//! Export targets and their canvas sizes.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::RenderError;

/// Fixed oversampling factor applied to every export format.
pub const OVERSAMPLING: f64 = 2.0;

/// A named social-sharing target with fixed logical dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ExportFormat {
    #[default]
    #[serde(rename = "instagram-post")]
    InstagramPost,
    #[serde(rename = "instagram-story")]
    InstagramStory,
    #[serde(rename = "tiktok")]
    TikTok,
    #[serde(rename = "twitter")]
    Twitter,
    #[serde(rename = "general-social")]
    GeneralSocial,
}

impl ExportFormat {
    /// All formats in catalog order.
    pub const ALL: [ExportFormat; 5] = [
        ExportFormat::InstagramPost,
        ExportFormat::InstagramStory,
        ExportFormat::TikTok,
        ExportFormat::Twitter,
        ExportFormat::GeneralSocial,
    ];

    /// Look up a format by its catalog name.
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|f| f.name() == name)
    }

    /// Catalog name, e.g. `"instagram-post"`.
    pub fn name(self) -> &'static str {
        match self {
            ExportFormat::InstagramPost => "instagram-post",
            ExportFormat::InstagramStory => "instagram-story",
            ExportFormat::TikTok => "tiktok",
            ExportFormat::Twitter => "twitter",
            ExportFormat::GeneralSocial => "general-social",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ExportFormat::InstagramPost => "Instagram Post",
            ExportFormat::InstagramStory => "Instagram Story",
            ExportFormat::TikTok => "TikTok",
            ExportFormat::Twitter => "Twitter/X",
            ExportFormat::GeneralSocial => "General Social",
        }
    }

    /// Logical size `(width, height)` before oversampling.
    pub fn logical_size(self) -> (f64, f64) {
        match self {
            ExportFormat::InstagramPost | ExportFormat::GeneralSocial => (1080.0, 1080.0),
            ExportFormat::InstagramStory | ExportFormat::TikTok => (1080.0, 1920.0),
            ExportFormat::Twitter => (1200.0, 675.0),
        }
    }

    /// Pixel size of the render canvas (logical size × [`OVERSAMPLING`]).
    pub fn canvas_size(self) -> (u32, u32) {
        let (w, h) = self.logical_size();
        (
            (w * OVERSAMPLING).round() as u32,
            (h * OVERSAMPLING).round() as u32,
        )
    }

    pub fn aspect_ratio(self) -> f64 {
        let (w, h) = self.logical_size();
        w / h
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExportFormat {
    type Err = RenderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_name(s).ok_or_else(|| RenderError::UnknownFormat(s.to_string()))
    }
}
