//! # toppi-core: ranked-list share image composition
//!
//! Turns a short ranked list (a title plus up to five items) and a design
//! configuration into a fixed-size raster image for a social platform.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use toppi_core::{DesignSettings, ExportFormat, ListContent, RenderPipeline, RendererConfig};
//!
//! let pipeline = RenderPipeline::new(RendererConfig::default().with_seed(7));
//! let content = ListContent::new("Best Pizza Toppings", ["Pepperoni", "Mushroom", "Basil"]);
//! let settings = DesignSettings::default();
//!
//! let image = pipeline.render(&content, &settings, ExportFormat::InstagramPost)?;
//! assert_eq!((image.width(), image.height()), (2160, 2160));
//! # Ok::<(), toppi_core::RenderError>(())
//! ```
//!
//! ## Architecture
//!
//! 1. **Model** (`core`): list content, design settings, templates and export formats
//! 2. **Devices** (`rendering::device`): a drawing surface abstraction over tiny-skia
//! 3. **Compositors** (`rendering`): background, text, border and sticker layers
//! 4. **Pipeline** (`rendering::pipeline`): canvas setup and layer order
//!
//! Colors are parsed leniently and missing assets are skipped, so a render
//! only fails when the canvas itself cannot be created.

pub mod core;
pub mod rendering;

// Re-export main types for convenience
pub use core::{
    AssetLibrary, AssetSource, BackgroundImage, DesignSettings, ExportFormat, ListContent,
    ListTemplate, Point, RenderError, RenderResult, StickerItem,
};

pub use rendering::{
    Color, FontBook, ProceduralBackgroundGenerator, RandomSource, RasterImage, RenderPipeline,
    RendererConfig, parse_hex,
};
