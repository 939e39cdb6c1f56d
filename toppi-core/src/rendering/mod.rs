//! Composition layer.
//!
//! Everything here draws through the [`Device`] trait:
//! - [`SkiaDevice`] rasterizes onto a tiny-skia pixmap
//! - [`RecordingDevice`] logs calls, for tests
//!
//! The compositors (background, text, border, sticker) are combined in a
//! fixed order by [`RenderPipeline`].

pub mod background;
pub mod border;
pub mod color;
pub mod device;
pub mod font;
pub mod graphics_state;
pub mod path;
pub mod pipeline;
pub mod skia_device;
pub mod sticker;
pub mod stock;
pub mod text;

// Re-export key types
pub use background::{BackgroundCompositor, BackgroundSource, aspect_fill_rect, resolve_background};
pub use border::{BorderCompositor, BorderGeometry, border_geometry, effective_corner_radius};
pub use color::parse_hex;
pub use device::{DestRect, Device, Paint, PathDrawMode, RecordedImage, RecordingDevice};
pub use font::{Font, FontBook, FontFamilyKind};
pub use graphics_state::{Color, FillRule, GraphicsState, LineCap, LineJoin, StrokeProps};
pub use path::{Path, PathElement};
pub use pipeline::{RandomSource, RasterImage, RenderPipeline, RendererConfig};
pub use skia_device::SkiaDevice;
pub use sticker::{BASE_STICKER_SIZE, StickerCompositor, StickerPlacement};
pub use stock::{
    ProceduralBackgroundGenerator, STOCK_BACKGROUNDS, StockBackground, StockCategory,
    backgrounds_by_category, find_stock_background,
};
pub use text::{TextBlock, TextCompositor, TextMeasure, layout_list, wrap_text};
