//! Input model for a render call.
//!
//! These types are owned by whoever manages list records; the renderer only
//! borrows them for the duration of one call.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::template::ListTemplate;

/// The text of a ranked list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ListContent {
    pub title: String,
    /// Ranked entries, first is #1. Callers cap this at five.
    #[serde(default)]
    pub items: Vec<String>,
}

impl ListContent {
    pub fn new(title: impl Into<String>, items: impl IntoIterator<Item = impl Into<String>>) -> Self {
        ListContent {
            title: title.into(),
            items: items.into_iter().map(Into::into).collect(),
        }
    }
}

/// Where the base layer's image comes from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BackgroundImage {
    /// Encoded image bytes supplied by the user (PNG or JPEG)
    Uploaded(#[serde(with = "base64_bytes")] Vec<u8>),
    /// Name of a bundled asset or stock background
    Named(String),
}

/// A point in canvas-logical coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }
}

/// A decorative overlay placed on top of everything else.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StickerItem {
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
    #[serde(alias = "name")]
    pub asset_name: String,
    #[serde(default)]
    pub position: Point,
    #[serde(default = "default_scale")]
    pub scale: f64,
    #[serde(default, alias = "rotation")]
    pub rotation_radians: f64,
}

fn default_scale() -> f64 {
    1.0
}

impl StickerItem {
    pub fn new(asset_name: impl Into<String>, position: Point) -> Self {
        StickerItem {
            id: Uuid::new_v4(),
            asset_name: asset_name.into(),
            position,
            scale: 1.0,
            rotation_radians: 0.0,
        }
    }

    pub fn with_scale(mut self, scale: f64) -> Self {
        self.scale = scale;
        self
    }

    pub fn with_rotation(mut self, radians: f64) -> Self {
        self.rotation_radians = radians;
        self
    }
}

/// Visual configuration of a list image.
///
/// Colors are kept as the hex strings the editor produced; they are parsed
/// (leniently) at render time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DesignSettings {
    pub template_type: String,
    pub background_color: String,
    pub background_image: Option<BackgroundImage>,
    pub use_gradient: bool,
    pub gradient_colors: Vec<String>,
    pub font_name: String,
    pub font_size: f64,
    pub text_color: String,
    pub stickers: Vec<StickerItem>,
    pub border_width: f64,
    pub border_color: String,
    pub corner_radius: f64,
}

impl Default for DesignSettings {
    fn default() -> Self {
        DesignSettings {
            template_type: "modern".to_string(),
            background_color: "#FFFFFF".to_string(),
            background_image: None,
            use_gradient: false,
            gradient_colors: vec!["#FF6B6B".to_string(), "#4ECDC4".to_string()],
            font_name: "system".to_string(),
            font_size: 24.0,
            text_color: "#000000".to_string(),
            stickers: Vec::new(),
            border_width: 0.0,
            border_color: "#000000".to_string(),
            corner_radius: 16.0,
        }
    }
}

impl DesignSettings {
    /// Default settings with a template's values applied on top.
    pub fn from_template(template: ListTemplate) -> Self {
        let mut settings = DesignSettings::default();
        settings.apply_template(template);
        settings
    }

    /// Overwrite the template-controlled fields, leaving content such as
    /// stickers and background images untouched.
    ///
    /// The template's two colors become the gradient stops, but the gradient
    /// itself is switched off.
    pub fn apply_template(&mut self, template: ListTemplate) {
        let defaults = template.defaults();
        self.template_type = template.name().to_string();
        self.background_color = defaults.background_color.to_string();
        self.use_gradient = false;
        self.gradient_colors = vec![
            defaults.primary_color.to_string(),
            defaults.secondary_color.to_string(),
        ];
        self.font_name = defaults.font_name.to_string();
        self.font_size = defaults.font_size;
        self.text_color = defaults.primary_color.to_string();
        self.border_width = defaults.border_width;
        self.border_color = defaults.secondary_color.to_string();
        self.corner_radius = defaults.corner_radius;
    }
}

mod base64_bytes {
    use base64::Engine;
    use base64::engine::general_purpose::STANDARD;
    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(bytes: &[u8], serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&STANDARD.encode(bytes))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<u8>, D::Error> {
        let encoded = String::deserialize(deserializer)?;
        STANDARD
            .decode(encoded.as_bytes())
            .map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_settings() {
        let settings = DesignSettings::default();
        assert_eq!(settings.background_color, "#FFFFFF");
        assert_eq!(settings.text_color, "#000000");
        assert_eq!(settings.border_width, 0.0);
        assert_eq!(settings.corner_radius, 16.0);
        assert!(!settings.use_gradient);
        assert_eq!(settings.gradient_colors.len(), 2);
        assert!(settings.background_image.is_none());
    }

    #[test]
    fn test_sticker_builder() {
        let sticker = StickerItem::new("star", Point::new(200.0, 200.0))
            .with_scale(1.5)
            .with_rotation(0.25);
        assert_eq!(sticker.asset_name, "star");
        assert_eq!(sticker.scale, 1.5);
        assert_eq!(sticker.rotation_radians, 0.25);
    }

    #[test]
    fn test_sticker_ids_are_distinct() {
        let a = StickerItem::new("star", Point::default());
        let b = StickerItem::new("star", Point::default());
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn test_apply_gradient_template() {
        let settings = DesignSettings::from_template(ListTemplate::Gradient);
        assert_eq!(settings.template_type, "gradient");
        assert!(!settings.use_gradient);
        assert_eq!(settings.background_color, "#667eea");
        assert_eq!(settings.gradient_colors, vec!["#FFFFFF", "#f093fb"]);
        assert_eq!(settings.text_color, "#FFFFFF");
    }

    #[test]
    fn test_template_border_uses_secondary_color() {
        let comic = DesignSettings::from_template(ListTemplate::Comic);
        assert_eq!(comic.text_color, "#E91E63");
        assert_eq!(comic.border_color, "#9C27B0");

        for template in ListTemplate::ALL {
            let settings = DesignSettings::from_template(template);
            let defaults = template.defaults();
            assert_eq!(settings.border_color, defaults.secondary_color);
            assert_eq!(
                settings.gradient_colors,
                vec![defaults.primary_color, defaults.secondary_color]
            );
        }
    }

    #[test]
    fn test_apply_template_turns_gradient_off() {
        let mut settings = DesignSettings::default();
        settings.use_gradient = true;
        settings.apply_template(ListTemplate::Pop);
        assert!(!settings.use_gradient);
    }

    #[test]
    fn test_apply_template_keeps_stickers() {
        let mut settings = DesignSettings::default();
        settings.stickers.push(StickerItem::new("star", Point::default()));
        settings.apply_template(ListTemplate::Polaroid);
        assert_eq!(settings.stickers.len(), 1);
        assert_eq!(settings.border_width, 8.0);
    }

    #[test]
    fn test_design_from_partial_json() {
        let json = r##"{
            "backgroundColor": "#112233",
            "backgroundImage": { "named": "gradient-blue" },
            "stickers": [{ "name": "star", "position": { "x": 10, "y": 20 }, "rotation": 1.5 }]
        }"##;
        let settings: DesignSettings = serde_json::from_str(json).unwrap();

        assert_eq!(settings.background_color, "#112233");
        assert_eq!(
            settings.background_image,
            Some(BackgroundImage::Named("gradient-blue".to_string()))
        );
        assert_eq!(settings.text_color, "#000000");
        let sticker = &settings.stickers[0];
        assert_eq!(sticker.asset_name, "star");
        assert_eq!(sticker.position, Point::new(10.0, 20.0));
        assert_eq!(sticker.scale, 1.0);
        assert_eq!(sticker.rotation_radians, 1.5);
    }

    #[test]
    fn test_uploaded_image_is_base64() {
        let image = BackgroundImage::Uploaded(vec![0xFF, 0xD8, 0xFF]);
        let json = serde_json::to_string(&image).unwrap();
        assert_eq!(json, r#"{"uploaded":"/9j/"}"#);
        assert_eq!(serde_json::from_str::<BackgroundImage>(&json).unwrap(), image);
    }
}
