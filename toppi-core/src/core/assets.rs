//! Bundled image assets (stickers and named backgrounds).

use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use tiny_skia::Pixmap;

use super::error::RenderResult;
use super::image::decode_image;

/// Resolves asset names to decoded images.
///
/// Implementations must be shareable between concurrent renders.
pub trait AssetSource: Send + Sync {
    /// The image registered under `name`, if any.
    fn image(&self, name: &str) -> Option<Arc<Pixmap>>;
}

/// An in-memory asset table.
#[derive(Debug, Clone, Default)]
pub struct AssetLibrary {
    images: HashMap<String, Arc<Pixmap>>,
}

impl AssetLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, image: Pixmap) {
        self.images.insert(name.into(), Arc::new(image));
    }

    /// Decode PNG or JPEG bytes and register them under `name`.
    pub fn insert_encoded(&mut self, name: impl Into<String>, data: &[u8]) -> RenderResult<()> {
        let image = decode_image(data)?;
        self.insert(name, image);
        Ok(())
    }

    /// Load every `.png`, `.jpg` and `.jpeg` file in `dir`, keyed by file stem.
    ///
    /// Files that fail to decode are skipped with a warning. Returns the
    /// number of assets loaded.
    pub fn load_dir(&mut self, dir: &Path) -> std::io::Result<usize> {
        let mut loaded = 0;

        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            let is_image = path
                .extension()
                .and_then(|ext| ext.to_str())
                .map(|ext| matches!(ext.to_ascii_lowercase().as_str(), "png" | "jpg" | "jpeg"))
                .unwrap_or(false);
            let Some(stem) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            if !is_image {
                continue;
            }

            let data = std::fs::read(&path)?;
            match self.insert_encoded(stem, &data) {
                Ok(()) => loaded += 1,
                Err(e) => log::warn!("Skipping asset {}: {}", path.display(), e),
            }
        }

        log::debug!("Loaded {} assets from {}", loaded, dir.display());
        Ok(loaded)
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    /// Registered names in sorted order.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.images.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl AssetSource for AssetLibrary {
    fn image(&self, name: &str) -> Option<Arc<Pixmap>> {
        self.images.get(name).cloned()
    }
}
