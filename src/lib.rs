//! # toppi: share images for ranked lists
//!
//! Wraps the [`toppi_core`] composition engine with the pieces an app needs
//! around a render:
//!
//! - [`RenderService`]: renders on a blocking worker and flags superseded results
//! - [`export`]: JPEG/PNG encoding of finished images
//! - [`library`]: saving to a photo library and handing off to share targets

pub mod error;
pub mod export;
pub mod library;
pub mod service;

pub use error::{ExportError, SaveError, ServiceError};
pub use export::{DEFAULT_JPEG_QUALITY, Encoding, compress, encode_png};
pub use library::{DirectoryLibrary, LoggingShareSink, PhotoLibrary, SharePlatform, ShareSink, save_async};
pub use service::{Completion, RenderService};

pub use toppi_core;
