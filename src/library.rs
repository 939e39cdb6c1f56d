//! Where finished images go: a photo library or a share target.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use toppi_core::core::image::ImageFormat;

use crate::error::SaveError;

/// Persistent image storage that may require the user's permission.
pub trait PhotoLibrary: Send + Sync {
    fn save(&self, bytes: &[u8]) -> Result<(), SaveError>;
}

/// Save on a blocking worker thread.
pub async fn save_async(library: Arc<dyn PhotoLibrary>, bytes: Vec<u8>) -> Result<(), SaveError> {
    tokio::task::spawn_blocking(move || library.save(&bytes))
        .await
        .map_err(|e| SaveError::WriteFailed(e.to_string()))?
}

/// A photo library backed by a directory on disk.
///
/// Each save writes a new uniquely named file. An unauthorized library
/// rejects every save with [`SaveError::PermissionDenied`].
#[derive(Debug, Clone)]
pub struct DirectoryLibrary {
    root: PathBuf,
    authorized: bool,
}

impl DirectoryLibrary {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        DirectoryLibrary {
            root: root.into(),
            authorized: true,
        }
    }

    pub fn with_authorization(mut self, authorized: bool) -> Self {
        self.authorized = authorized;
        self
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn file_name(bytes: &[u8]) -> String {
        let extension = match ImageFormat::from_header(bytes) {
            ImageFormat::Png => "png",
            ImageFormat::Jpeg | ImageFormat::Unknown => "jpg",
        };
        format!("toppi-{}.{}", uuid::Uuid::new_v4(), extension)
    }
}

impl PhotoLibrary for DirectoryLibrary {
    fn save(&self, bytes: &[u8]) -> Result<(), SaveError> {
        if !self.authorized {
            log::warn!("Save rejected: library at {} is not authorized", self.root.display());
            return Err(SaveError::PermissionDenied);
        }

        let path = self.root.join(Self::file_name(bytes));
        fs::write(&path, bytes).map_err(|e| match e.kind() {
            io::ErrorKind::PermissionDenied => SaveError::PermissionDenied,
            _ => SaveError::WriteFailed(format!("{}: {}", path.display(), e)),
        })?;

        log::info!("Saved {} bytes to {}", bytes.len(), path.display());
        Ok(())
    }
}

/// Platforms recognised in share target identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SharePlatform {
    Instagram,
    TikTok,
    Twitter,
    Other,
}

impl SharePlatform {
    /// Classify a free-form platform identifier such as
    /// `"com.burbn.instagram.shareextension"`.
    pub fn classify(platform: &str) -> Self {
        let platform = platform.to_ascii_lowercase();
        if platform.contains("instagram") {
            SharePlatform::Instagram
        } else if platform.contains("tiktok") {
            SharePlatform::TikTok
        } else if platform.contains("twitter") {
            SharePlatform::Twitter
        } else {
            SharePlatform::Other
        }
    }
}

/// Hand-off of encoded image bytes to an external share target.
pub trait ShareSink: Send + Sync {
    fn share(&self, bytes: &[u8], platform: &str);
}

/// A share sink that only records and logs what was shared.
#[derive(Debug, Default)]
pub struct LoggingShareSink {
    history: Mutex<Vec<SharePlatform>>,
}

impl LoggingShareSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Platforms shared to so far, oldest first.
    pub fn history(&self) -> Vec<SharePlatform> {
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }
}

impl ShareSink for LoggingShareSink {
    fn share(&self, bytes: &[u8], platform: &str) {
        let kind = SharePlatform::classify(platform);
        log::info!("Shared {} bytes to {:?} ({})", bytes.len(), kind, platform);
        self.history
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_platform() {
        assert_eq!(
            SharePlatform::classify("com.burbn.instagram.shareextension"),
            SharePlatform::Instagram
        );
        assert_eq!(SharePlatform::classify("com.zhiliaoapp.musically.TikTok"), SharePlatform::TikTok);
        assert_eq!(SharePlatform::classify("com.atebits.Tweetie2.twitter"), SharePlatform::Twitter);
        assert_eq!(SharePlatform::classify("com.apple.UIKit.activity.Mail"), SharePlatform::Other);
    }

    #[test]
    fn test_file_name_follows_content() {
        let png = DirectoryLibrary::file_name(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]);
        assert!(png.starts_with("toppi-") && png.ends_with(".png"));
        assert!(DirectoryLibrary::file_name(&[0xFF, 0xD8, 0xFF]).ends_with(".jpg"));
    }

    #[test]
    fn test_share_history() {
        let sink = LoggingShareSink::new();
        sink.share(b"jpeg", "instagram");
        sink.share(b"jpeg", "messages");
        assert_eq!(sink.history(), vec![SharePlatform::Instagram, SharePlatform::Other]);
    }
}
