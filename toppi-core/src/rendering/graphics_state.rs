//! Colors, stroke properties and the transformation state shared by devices.
//!
//! Matrices are 6-element arrays `[a b c d e f]` representing the affine
//! transform
//! ```text
//! | a c e |
//! | b d f |
//! | 0 0 1 |
//! ```

/// Line cap style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineCap {
    /// Stroke is squared off at the endpoint
    #[default]
    Butt,
    /// Semicircular arc centered at the endpoint
    Round,
}

/// Line join style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LineJoin {
    /// Outer edges meet at a sharp point
    #[default]
    Miter,
    /// Circular arc between the edges
    Round,
}

/// Fill rule for path filling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FillRule {
    /// Nonzero winding number rule
    #[default]
    NonZero,
}

/// Stroke properties for path rendering.
#[derive(Debug, Clone, PartialEq)]
pub struct StrokeProps {
    /// Line width in user space units (default: 1.0)
    pub line_width: f64,

    /// Line cap style (default: Butt)
    pub line_cap: LineCap,

    /// Line join style (default: Miter)
    pub line_join: LineJoin,

    /// Maximum ratio of miter length to line width before a bevel is used
    pub miter_limit: f64,
}

impl Default for StrokeProps {
    fn default() -> Self {
        StrokeProps {
            line_width: 1.0,
            line_cap: LineCap::default(),
            line_join: LineJoin::default(),
            miter_limit: 10.0,
        }
    }
}

impl StrokeProps {
    /// Stroke of the given width with round caps and joins.
    pub fn rounded(line_width: f64) -> Self {
        StrokeProps {
            line_width,
            line_cap: LineCap::Round,
            line_join: LineJoin::Round,
            ..StrokeProps::default()
        }
    }
}

/// Straight (non-premultiplied) 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const BLACK: Color = Color::rgb(0, 0, 0);
    pub const WHITE: Color = Color::rgb(255, 255, 255);

    /// Opaque color from 8-bit channels.
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color { r, g, b, a: 255 }
    }

    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Color { r, g, b, a }
    }

    /// Same color with its alpha replaced by `opacity` (0.0-1.0).
    pub fn with_opacity(self, opacity: f64) -> Self {
        Color {
            a: (opacity.clamp(0.0, 1.0) * 255.0).round() as u8,
            ..self
        }
    }

    /// Get RGBA components as a tuple.
    pub fn components(&self) -> (u8, u8, u8, u8) {
        (self.r, self.g, self.b, self.a)
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

pub const IDENTITY: [f64; 6] = [1.0, 0.0, 0.0, 1.0, 0.0, 0.0];

pub fn translation(tx: f64, ty: f64) -> [f64; 6] {
    [1.0, 0.0, 0.0, 1.0, tx, ty]
}

pub fn scaling(sx: f64, sy: f64) -> [f64; 6] {
    [sx, 0.0, 0.0, sy, 0.0, 0.0]
}

/// Rotation by `radians`; positive angles turn clockwise on a y-down canvas.
pub fn rotation(radians: f64) -> [f64; 6] {
    let (sin, cos) = radians.sin_cos();
    [cos, sin, -sin, cos, 0.0, 0.0]
}

/// Rotation by `radians` about the point `(px, py)`.
pub fn rotation_about(radians: f64, px: f64, py: f64) -> [f64; 6] {
    let m = multiply(&translation(px, py), &rotation(radians));
    multiply(&m, &translation(-px, -py))
}

/// Matrix product `lhs × rhs`: `rhs` is applied first.
pub fn multiply(lhs: &[f64; 6], rhs: &[f64; 6]) -> [f64; 6] {
    let [a, b, c, d, e, f] = *rhs;
    let [la, lb, lc, ld, le, lf] = *lhs;
    [
        la * a + lc * b,
        lb * a + ld * b,
        la * c + lc * d,
        lb * c + ld * d,
        la * e + lc * f + le,
        lb * e + ld * f + lf,
    ]
}

/// Apply `matrix` to a point.
pub fn apply(matrix: &[f64; 6], x: f64, y: f64) -> (f64, f64) {
    let [a, b, c, d, e, f] = *matrix;
    (a * x + c * y + e, b * x + d * y + f)
}

/// Transformation state tracked by a device.
#[derive(Debug, Clone, PartialEq)]
pub struct GraphicsState {
    /// Current transformation matrix
    pub ctm: [f64; 6],
}

impl Default for GraphicsState {
    fn default() -> Self {
        GraphicsState { ctm: IDENTITY }
    }
}

impl GraphicsState {
    /// Concatenate a transformation matrix to the CTM (`CTM = CTM × transform`).
    pub fn concat_matrix(&mut self, transform: &[f64; 6]) {
        self.ctm = multiply(&self.ctm, transform);
    }
}
