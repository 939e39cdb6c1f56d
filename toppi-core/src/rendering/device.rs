//! Device trait for rendering backend abstraction.
//!
//! Compositors describe what to draw in canvas-logical coordinates; a device
//! turns that into pixels (or, for [`RecordingDevice`], into a log of calls).

use tiny_skia::Pixmap;

use super::graphics_state::{self, Color, FillRule, GraphicsState, StrokeProps};
use super::path::Path;

/// How to draw a path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathDrawMode {
    /// Fill the path
    Fill(FillRule),
    /// Stroke the path outline
    Stroke,
}

/// How a shape is colored.
#[derive(Debug, Clone, PartialEq)]
pub enum Paint {
    /// Solid color
    Solid(Color),
    /// Linear gradient between two points with evenly spaced color stops
    LinearGradient {
        start: (f64, f64),
        end: (f64, f64),
        colors: Vec<Color>,
    },
}

impl Paint {
    /// Evenly spaced gradient stops as `(offset, color)` pairs.
    ///
    /// A single color yields one stop at 0.0; no colors yields none.
    pub fn gradient_stops(colors: &[Color]) -> Vec<(f64, Color)> {
        match colors.len() {
            0 => Vec::new(),
            1 => vec![(0.0, colors[0])],
            n => colors
                .iter()
                .enumerate()
                .map(|(i, c)| (i as f64 / (n - 1) as f64, *c))
                .collect(),
        }
    }
}

impl Default for Paint {
    fn default() -> Self {
        Paint::Solid(Color::BLACK)
    }
}

/// A destination rectangle in user space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DestRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl DestRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        DestRect { x, y, width, height }
    }

    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }
}

/// A surface the compositors draw onto.
///
/// Coordinates are user space; the device maps them through its current
/// transformation matrix.
pub trait Device {
    /// Pixel size of the underlying surface.
    fn size(&self) -> (u32, u32);

    /// Save the graphics state.
    fn save_state(&mut self);

    /// Restore the graphics state. Restoring past the initial state is a no-op.
    fn restore_state(&mut self);

    /// Concatenate a transformation matrix to the current CTM.
    fn concat_matrix(&mut self, matrix: &[f64; 6]);

    /// Fill or stroke a path. Empty or degenerate paths draw nothing.
    fn draw_path(
        &mut self,
        path: &Path,
        mode: PathDrawMode,
        paint: &Paint,
        stroke_props: &StrokeProps,
    );

    /// Draw `image` scaled to cover `dest`.
    fn draw_image(&mut self, image: &Pixmap, dest: DestRect);
}

/// A device that records drawing operations instead of rasterizing them.
///
/// Useful for checking layer order and geometry without comparing pixels.
#[derive(Debug)]
pub struct RecordingDevice {
    width: u32,
    height: u32,
    state_stack: Vec<GraphicsState>,
    operations: Vec<String>,
    images: Vec<RecordedImage>,
}

/// Where an image ended up on the device.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordedImage {
    /// Destination in user space
    pub dest: DestRect,
    /// CTM in effect when the image was drawn
    pub ctm: [f64; 6],
}

impl RecordedImage {
    /// Center of the destination rectangle in device space.
    pub fn device_center(&self) -> (f64, f64) {
        let (cx, cy) = self.dest.center();
        graphics_state::apply(&self.ctm, cx, cy)
    }
}

impl RecordingDevice {
    pub fn new(width: u32, height: u32) -> Self {
        RecordingDevice {
            width,
            height,
            state_stack: vec![GraphicsState::default()],
            operations: Vec::new(),
            images: Vec::new(),
        }
    }

    /// Get the recorded operations.
    pub fn operations(&self) -> &[String] {
        &self.operations
    }

    /// Images drawn so far, in draw order.
    pub fn images(&self) -> &[RecordedImage] {
        &self.images
    }

    fn ctm(&self) -> [f64; 6] {
        self.state_stack
            .last()
            .map(|s| s.ctm)
            .unwrap_or(graphics_state::IDENTITY)
    }
}

impl Device for RecordingDevice {
    fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    fn save_state(&mut self) {
        let current = self.state_stack.last().cloned().unwrap_or_default();
        self.state_stack.push(current);
        self.operations.push("save_state".to_string());
    }

    fn restore_state(&mut self) {
        if self.state_stack.len() > 1 {
            self.state_stack.pop();
        }
        self.operations.push("restore_state".to_string());
    }

    fn concat_matrix(&mut self, matrix: &[f64; 6]) {
        if let Some(state) = self.state_stack.last_mut() {
            state.concat_matrix(matrix);
        }
        self.operations.push(format!("concat_matrix({:?})", matrix));
    }

    fn draw_path(
        &mut self,
        path: &Path,
        mode: PathDrawMode,
        paint: &Paint,
        stroke_props: &StrokeProps,
    ) {
        let kind = match paint {
            Paint::Solid(_) => "solid",
            Paint::LinearGradient { .. } => "gradient",
        };
        let op = match mode {
            PathDrawMode::Fill(rule) => format!("fill({:?}, {}, {} elements)", rule, kind, path.len()),
            PathDrawMode::Stroke => format!(
                "stroke({}, width {}, {} elements)",
                kind,
                stroke_props.line_width,
                path.len()
            ),
        };
        self.operations.push(op);
    }

    fn draw_image(&mut self, image: &Pixmap, dest: DestRect) {
        self.operations.push(format!(
            "draw_image({}x{} -> {},{} {}x{})",
            image.width(),
            image.height(),
            dest.x,
            dest.y,
            dest.width,
            dest.height
        ));
        let ctm = self.ctm();
        self.images.push(RecordedImage { dest, ctm });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_recording_device_operations() {
        let mut device = RecordingDevice::new(200, 200);
        let mut path = Path::new();
        path.rect(10.0, 10.0, 80.0, 80.0);

        device.draw_path(
            &path,
            PathDrawMode::Stroke,
            &Paint::default(),
            &StrokeProps::rounded(4.0),
        );
        device.draw_path(
            &path,
            PathDrawMode::Fill(FillRule::NonZero),
            &Paint::default(),
            &StrokeProps::default(),
        );

        let ops = device.operations();
        assert_eq!(ops[0], "stroke(solid, width 4, 5 elements)");
        assert_eq!(ops[1], "fill(NonZero, solid, 5 elements)");
    }

    #[test]
    fn test_state_save_restore() {
        let mut device = RecordingDevice::new(100, 100);
        let image = Pixmap::new(4, 4).unwrap();

        device.save_state();
        device.concat_matrix(&graphics_state::scaling(2.0, 2.0));
        device.draw_image(&image, DestRect::new(0.0, 0.0, 10.0, 10.0));
        device.restore_state();
        device.draw_image(&image, DestRect::new(0.0, 0.0, 10.0, 10.0));

        let images = device.images();
        assert_eq!(images[0].device_center(), (10.0, 10.0));
        assert_eq!(images[1].device_center(), (5.0, 5.0));
    }

    #[test]
    fn test_restore_past_initial_state_is_noop() {
        let mut device = RecordingDevice::new(10, 10);
        device.restore_state();
        device.restore_state();
        assert_eq!(device.ctm(), graphics_state::IDENTITY);
    }

    #[test]
    fn test_gradient_stops_are_evenly_spaced() {
        let colors = [Color::BLACK, Color::WHITE, Color::rgb(255, 0, 0)];
        let stops = Paint::gradient_stops(&colors);
        assert_eq!(
            stops,
            vec![(0.0, Color::BLACK), (0.5, Color::WHITE), (1.0, Color::rgb(255, 0, 0))]
        );
        assert!(Paint::gradient_stops(&[]).is_empty());
    }
}
