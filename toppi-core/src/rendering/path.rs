//! Device-independent path construction.
//!
//! Paths are built in user space (canvas-logical coordinates) and converted
//! by each device into whatever its backend needs.

use std::fmt;

/// Control-point distance for approximating a quarter circle with a cubic.
const KAPPA: f64 = 0.552_284_749_831;

/// One drawing command.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathElement {
    MoveTo(f64, f64),
    LineTo(f64, f64),
    /// `(cpx, cpy, x, y)`
    QuadTo(f64, f64, f64, f64),
    /// `(cp1x, cp1y, cp2x, cp2y, x, y)`
    CurveTo(f64, f64, f64, f64, f64, f64),
    ClosePath,
}

impl fmt::Display for PathElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PathElement::MoveTo(x, y) => write!(f, "M {} {}", x, y),
            PathElement::LineTo(x, y) => write!(f, "L {} {}", x, y),
            PathElement::QuadTo(a, b, x, y) => write!(f, "Q {} {} {} {}", a, b, x, y),
            PathElement::CurveTo(a, b, c, d, x, y) => {
                write!(f, "C {} {} {} {} {} {}", a, b, c, d, x, y)
            }
            PathElement::ClosePath => f.write_str("Z"),
        }
    }
}

/// The subpath currently being built.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
struct Cursor {
    /// Segments were added since the last move or close
    drawn: bool,
}

/// A sequence of subpaths in user space.
///
/// Segment commands without a preceding move start a subpath at their first
/// point. Closing a subpath with no segments is ignored.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Path {
    elements: Vec<PathElement>,
    cursor: Option<Cursor>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.elements.push(PathElement::MoveTo(x, y));
        self.cursor = Some(Cursor { drawn: false });
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        if self.cursor.is_none() {
            self.move_to(x, y);
        } else {
            self.segment(PathElement::LineTo(x, y));
        }
    }

    pub fn quad_to(&mut self, cpx: f64, cpy: f64, x: f64, y: f64) {
        self.ensure_started(cpx, cpy);
        self.segment(PathElement::QuadTo(cpx, cpy, x, y));
    }

    pub fn curve_to(&mut self, cp1x: f64, cp1y: f64, cp2x: f64, cp2y: f64, x: f64, y: f64) {
        self.ensure_started(cp1x, cp1y);
        self.segment(PathElement::CurveTo(cp1x, cp1y, cp2x, cp2y, x, y));
    }

    pub fn close_path(&mut self) {
        let Some(cursor) = self.cursor.as_mut().filter(|c| c.drawn) else {
            return;
        };
        cursor.drawn = false;
        self.elements.push(PathElement::ClosePath);
    }

    fn ensure_started(&mut self, x: f64, y: f64) {
        if self.cursor.is_none() {
            self.move_to(x, y);
        }
    }

    fn segment(&mut self, element: PathElement) {
        if let Some(cursor) = self.cursor.as_mut() {
            cursor.drawn = true;
        }
        self.elements.push(element);
    }

    /// Add a closed axis-aligned rectangle.
    pub fn rect(&mut self, x: f64, y: f64, width: f64, height: f64) {
        self.move_to(x, y);
        self.line_to(x + width, y);
        self.line_to(x + width, y + height);
        self.line_to(x, y + height);
        self.close_path();
    }

    /// Add a closed rectangle with circular corners of `radius`.
    ///
    /// The radius is used as given; callers clamp it to half the shorter side.
    pub fn rounded_rect(&mut self, x: f64, y: f64, width: f64, height: f64, radius: f64) {
        if radius <= 0.0 {
            self.rect(x, y, width, height);
            return;
        }

        let r = radius;
        let k = r * KAPPA;
        let (right, bottom) = (x + width, y + height);

        self.move_to(x + r, y);
        self.line_to(right - r, y);
        self.curve_to(right - r + k, y, right, y + r - k, right, y + r);
        self.line_to(right, bottom - r);
        self.curve_to(right, bottom - r + k, right - r + k, bottom, right - r, bottom);
        self.line_to(x + r, bottom);
        self.curve_to(x + r - k, bottom, x, bottom - r + k, x, bottom - r);
        self.line_to(x, y + r);
        self.curve_to(x, y + r - k, x + r - k, y, x + r, y);
        self.close_path();
    }

    /// Add a closed ellipse inscribed in the given rectangle.
    pub fn ellipse(&mut self, x: f64, y: f64, width: f64, height: f64) {
        let (rx, ry) = (width / 2.0, height / 2.0);
        let (cx, cy) = (x + rx, y + ry);
        let (kx, ky) = (rx * KAPPA, ry * KAPPA);

        self.move_to(cx + rx, cy);
        self.curve_to(cx + rx, cy + ky, cx + kx, cy + ry, cx, cy + ry);
        self.curve_to(cx - kx, cy + ry, cx - rx, cy + ky, cx - rx, cy);
        self.curve_to(cx - rx, cy - ky, cx - kx, cy - ry, cx, cy - ry);
        self.curve_to(cx + kx, cy - ry, cx + rx, cy - ky, cx + rx, cy);
        self.close_path();
    }

    pub fn elements(&self) -> &[PathElement] {
        &self.elements
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }
}

impl fmt::Display for Path {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.elements.iter().try_for_each(|el| write!(f, "{} ", el))
    }
}
