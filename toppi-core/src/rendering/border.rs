//! Rounded-rectangle frame around the canvas.

use super::device::{Device, Paint, PathDrawMode};
use super::graphics_state::{Color, StrokeProps};
use super::path::Path;

/// Where the border stroke runs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderGeometry {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub corner_radius: f64,
    pub line_width: f64,
}

/// Clamp `radius` to `[0, min(width, height) / 2]`. NaN becomes 0.
pub fn effective_corner_radius(radius: f64, width: f64, height: f64) -> f64 {
    let max_radius = (width.min(height) / 2.0).max(0.0);
    if radius.is_nan() {
        return 0.0;
    }
    radius.clamp(0.0, max_radius)
}

/// Geometry of a border of `border_width` on a `(w, h)` canvas.
///
/// The stroke is centered on a rectangle inset by half its width, so the
/// outer edge touches the canvas edge. Returns `None` when there is nothing
/// to draw.
pub fn border_geometry(
    (w, h): (f64, f64),
    border_width: f64,
    corner_radius: f64,
) -> Option<BorderGeometry> {
    if !border_width.is_finite() || border_width <= 0.0 {
        return None;
    }

    let inset = border_width / 2.0;
    let (width, height) = (w - border_width, h - border_width);
    if width < 0.0 || height < 0.0 {
        log::debug!("Border of width {} does not fit a {}x{} canvas", border_width, w, h);
        return None;
    }

    Some(BorderGeometry {
        x: inset,
        y: inset,
        width,
        height,
        corner_radius: effective_corner_radius(corner_radius, width, height),
        line_width: border_width,
    })
}

pub struct BorderCompositor;

impl BorderCompositor {
    pub fn draw(
        device: &mut dyn Device,
        size: (f64, f64),
        border_width: f64,
        corner_radius: f64,
        color: Color,
    ) {
        let Some(geometry) = border_geometry(size, border_width, corner_radius) else {
            return;
        };

        let mut path = Path::new();
        path.rounded_rect(
            geometry.x,
            geometry.y,
            geometry.width,
            geometry.height,
            geometry.corner_radius,
        );
        device.draw_path(
            &path,
            PathDrawMode::Stroke,
            &Paint::Solid(color),
            &StrokeProps::rounded(geometry.line_width),
        );
    }
}
