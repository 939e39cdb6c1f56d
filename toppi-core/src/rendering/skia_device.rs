//! A tiny-skia based rendering device.

use tiny_skia::{
    FillRule as SkiaFillRule, FilterQuality, GradientStop, LineCap as SkiaLineCap,
    LineJoin as SkiaLineJoin, LinearGradient, Paint as SkiaPaint, PathBuilder, Pixmap, PixmapMut,
    PixmapPaint, SpreadMode, Stroke, Transform,
};

use super::device::{DestRect, Device, Paint, PathDrawMode};
use super::graphics_state::{self, Color, FillRule, LineCap, LineJoin, StrokeProps};
use super::path::{Path, PathElement};

// --- Conversion helpers ---

pub(crate) fn to_skia_color(color: Color) -> tiny_skia::Color {
    tiny_skia::Color::from_rgba8(color.r, color.g, color.b, color.a)
}

fn to_skia_paint(paint: &Paint) -> Option<SkiaPaint<'static>> {
    let mut sk_paint = SkiaPaint::default();
    match paint {
        Paint::Solid(color) => {
            sk_paint.set_color(to_skia_color(*color));
        }
        Paint::LinearGradient { start, end, colors } => {
            let stops: Vec<GradientStop> = Paint::gradient_stops(colors)
                .into_iter()
                .map(|(offset, color)| GradientStop::new(offset as f32, to_skia_color(color)))
                .collect();
            sk_paint.shader = LinearGradient::new(
                tiny_skia::Point::from_xy(start.0 as f32, start.1 as f32),
                tiny_skia::Point::from_xy(end.0 as f32, end.1 as f32),
                stops,
                SpreadMode::Pad,
                Transform::identity(),
            )?;
        }
    }
    sk_paint.anti_alias = true;
    Some(sk_paint)
}

fn to_skia_line_cap(line_cap: LineCap) -> SkiaLineCap {
    match line_cap {
        LineCap::Butt => SkiaLineCap::Butt,
        LineCap::Round => SkiaLineCap::Round,
    }
}

fn to_skia_line_join(line_join: LineJoin) -> SkiaLineJoin {
    match line_join {
        LineJoin::Miter => SkiaLineJoin::Miter,
        LineJoin::Round => SkiaLineJoin::Round,
    }
}

fn to_skia_fill_rule(fill_rule: FillRule) -> SkiaFillRule {
    match fill_rule {
        FillRule::NonZero => SkiaFillRule::Winding,
    }
}

fn to_skia_stroke(stroke_props: &StrokeProps) -> Stroke {
    Stroke {
        width: stroke_props.line_width as f32,
        miter_limit: stroke_props.miter_limit as f32,
        line_cap: to_skia_line_cap(stroke_props.line_cap),
        line_join: to_skia_line_join(stroke_props.line_join),
        dash: None,
    }
}

fn to_skia_transform(m: &[f64; 6]) -> Transform {
    Transform::from_row(
        m[0] as f32, m[1] as f32, m[2] as f32, m[3] as f32, m[4] as f32, m[5] as f32,
    )
}

fn to_skia_path(path: &Path) -> Option<tiny_skia::Path> {
    let mut pb = PathBuilder::new();
    for el in path.elements() {
        match *el {
            PathElement::MoveTo(x, y) => pb.move_to(x as f32, y as f32),
            PathElement::LineTo(x, y) => pb.line_to(x as f32, y as f32),
            PathElement::QuadTo(cpx, cpy, x, y) => {
                pb.quad_to(cpx as f32, cpy as f32, x as f32, y as f32)
            }
            PathElement::CurveTo(cp1x, cp1y, cp2x, cp2y, x, y) => pb.cubic_to(
                cp1x as f32, cp1y as f32, cp2x as f32, cp2y as f32, x as f32, y as f32,
            ),
            PathElement::ClosePath => pb.close(),
        }
    }
    pb.finish()
}

/// Draws onto a borrowed tiny-skia pixmap.
pub struct SkiaDevice<'a> {
    pixmap: PixmapMut<'a>,
    state_stack: Vec<[f64; 6]>,
}

impl<'a> SkiaDevice<'a> {
    pub fn new(pixmap: PixmapMut<'a>) -> Self {
        SkiaDevice {
            pixmap,
            state_stack: vec![graphics_state::IDENTITY],
        }
    }

    fn transform(&self) -> Transform {
        to_skia_transform(self.state_stack.last().unwrap_or(&graphics_state::IDENTITY))
    }
}

impl<'a> Device for SkiaDevice<'a> {
    fn size(&self) -> (u32, u32) {
        (self.pixmap.width(), self.pixmap.height())
    }

    fn save_state(&mut self) {
        let current = *self.state_stack.last().unwrap_or(&graphics_state::IDENTITY);
        self.state_stack.push(current);
    }

    fn restore_state(&mut self) {
        if self.state_stack.len() > 1 {
            self.state_stack.pop();
        }
    }

    fn concat_matrix(&mut self, matrix: &[f64; 6]) {
        if let Some(ctm) = self.state_stack.last_mut() {
            *ctm = graphics_state::multiply(ctm, matrix);
        }
    }

    fn draw_path(
        &mut self,
        path: &Path,
        mode: PathDrawMode,
        paint: &Paint,
        stroke_props: &StrokeProps,
    ) {
        let Some(sk_path) = to_skia_path(path) else {
            return;
        };
        let Some(sk_paint) = to_skia_paint(paint) else {
            log::debug!("Skipping path with degenerate paint {:?}", paint);
            return;
        };
        let transform = self.transform();

        match mode {
            PathDrawMode::Fill(fill_rule) => {
                self.pixmap.fill_path(
                    &sk_path,
                    &sk_paint,
                    to_skia_fill_rule(fill_rule),
                    transform,
                    None,
                );
            }
            PathDrawMode::Stroke => {
                let sk_stroke = to_skia_stroke(stroke_props);
                self.pixmap
                    .stroke_path(&sk_path, &sk_paint, &sk_stroke, transform, None);
            }
        }
    }

    fn draw_image(&mut self, image: &Pixmap, dest: DestRect) {
        if image.width() == 0 || image.height() == 0 || dest.width <= 0.0 || dest.height <= 0.0 {
            return;
        }

        let placement = graphics_state::multiply(
            &graphics_state::translation(dest.x, dest.y),
            &graphics_state::scaling(
                dest.width / image.width() as f64,
                dest.height / image.height() as f64,
            ),
        );
        let transform = self.transform().pre_concat(to_skia_transform(&placement));

        let paint = PixmapPaint {
            quality: FilterQuality::Bicubic,
            ..PixmapPaint::default()
        };
        self.pixmap
            .draw_pixmap(0, 0, image.as_ref(), &paint, transform, None);
    }
}
