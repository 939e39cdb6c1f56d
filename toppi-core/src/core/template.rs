//! Named starting points for a design.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Default values a template contributes to [`DesignSettings`](super::model::DesignSettings).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemplateDefaults {
    pub background_color: &'static str,
    pub primary_color: &'static str,
    pub secondary_color: &'static str,
    pub font_name: &'static str,
    pub font_size: f64,
    pub corner_radius: f64,
    pub shadow_enabled: bool,
    pub border_width: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ListTemplate {
    Modern,
    Minimalist,
    Pop,
    Vintage,
    Neon,
    Handwritten,
    Professional,
    Polaroid,
    Comic,
    Gradient,
}

impl ListTemplate {
    pub const ALL: [ListTemplate; 10] = [
        ListTemplate::Modern,
        ListTemplate::Minimalist,
        ListTemplate::Pop,
        ListTemplate::Vintage,
        ListTemplate::Neon,
        ListTemplate::Handwritten,
        ListTemplate::Professional,
        ListTemplate::Polaroid,
        ListTemplate::Comic,
        ListTemplate::Gradient,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            ListTemplate::Modern => "modern",
            ListTemplate::Minimalist => "minimalist",
            ListTemplate::Pop => "pop",
            ListTemplate::Vintage => "vintage",
            ListTemplate::Neon => "neon",
            ListTemplate::Handwritten => "handwritten",
            ListTemplate::Professional => "professional",
            ListTemplate::Polaroid => "polaroid",
            ListTemplate::Comic => "comic",
            ListTemplate::Gradient => "gradient",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            ListTemplate::Modern => "Modern",
            ListTemplate::Minimalist => "Minimalist",
            ListTemplate::Pop => "Pop",
            ListTemplate::Vintage => "Vintage",
            ListTemplate::Neon => "Neon",
            ListTemplate::Handwritten => "Handwritten",
            ListTemplate::Professional => "Professional",
            ListTemplate::Polaroid => "Polaroid",
            ListTemplate::Comic => "Comic",
            ListTemplate::Gradient => "Gradient",
        }
    }

    pub fn defaults(self) -> TemplateDefaults {
        let base = TemplateDefaults {
            background_color: "#FFFFFF",
            primary_color: "#2C3E50",
            secondary_color: "#34495E",
            font_name: "system",
            font_size: 24.0,
            corner_radius: 16.0,
            shadow_enabled: true,
            border_width: 0.0,
        };
        match self {
            ListTemplate::Modern => base,
            ListTemplate::Minimalist => TemplateDefaults {
                background_color: "#F8F9FA",
                primary_color: "#212529",
                secondary_color: "#6C757D",
                font_size: 20.0,
                shadow_enabled: false,
                ..base
            },
            ListTemplate::Pop => TemplateDefaults {
                background_color: "#FF6B6B",
                primary_color: "#FFFFFF",
                secondary_color: "#FFE66D",
                font_name: "system-bold",
                font_size: 28.0,
                border_width: 3.0,
                ..base
            },
            ListTemplate::Vintage => TemplateDefaults {
                background_color: "#F4F1DE",
                primary_color: "#3D405B",
                secondary_color: "#81B29A",
                font_name: "system-serif",
                font_size: 22.0,
                shadow_enabled: false,
                border_width: 2.0,
                ..base
            },
            ListTemplate::Neon => TemplateDefaults {
                background_color: "#0F0F0F",
                primary_color: "#00FFF0",
                secondary_color: "#FF00FF",
                font_name: "system-bold",
                font_size: 26.0,
                border_width: 1.0,
                ..base
            },
            ListTemplate::Handwritten => TemplateDefaults {
                background_color: "#FFFEF7",
                primary_color: "#2F4F4F",
                secondary_color: "#8B4513",
                font_name: "system-handwritten",
                shadow_enabled: false,
                ..base
            },
            ListTemplate::Professional => TemplateDefaults {
                primary_color: "#1F2937",
                secondary_color: "#4B5563",
                font_size: 22.0,
                border_width: 1.0,
                ..base
            },
            ListTemplate::Polaroid => TemplateDefaults {
                secondary_color: "#7F8C8D",
                font_size: 20.0,
                border_width: 8.0,
                ..base
            },
            ListTemplate::Comic => TemplateDefaults {
                background_color: "#FFEB3B",
                primary_color: "#E91E63",
                secondary_color: "#9C27B0",
                font_name: "system-bold",
                border_width: 4.0,
                ..base
            },
            ListTemplate::Gradient => TemplateDefaults {
                background_color: "#667eea",
                primary_color: "#FFFFFF",
                secondary_color: "#f093fb",
                ..base
            },
        }
    }
}

impl fmt::Display for ListTemplate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
