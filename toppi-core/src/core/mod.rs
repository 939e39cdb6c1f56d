pub mod assets;
pub mod error;
pub mod format;
pub mod image;
pub mod model;
pub mod template;

pub use assets::{AssetLibrary, AssetSource};
pub use error::{RenderError, RenderResult};
pub use format::{ExportFormat, OVERSAMPLING};
pub use image::{ImageFormat, decode_image};
pub use model::{BackgroundImage, DesignSettings, ListContent, Point, StickerItem};
pub use template::{ListTemplate, TemplateDefaults};
