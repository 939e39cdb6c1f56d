//! Async rendering with last-request-wins semantics.
//!
//! Callers that re-render on every edit (a live preview, say) only care about
//! the most recent request for a given target. Each call gets a fresh request
//! id; when a render finishes after a newer request for the same target was
//! issued, it is reported as [`Completion::Stale`] so the caller can drop it.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

use toppi_core::{
    DesignSettings, ExportFormat, ListContent, RasterImage, RenderPipeline, RenderResult,
};

use crate::error::ServiceError;

/// Outcome of an async render.
#[derive(Debug)]
pub enum Completion {
    /// The latest request for its target
    Current { request: u64, image: RasterImage },
    /// Superseded by a newer request for the same target
    Stale { request: u64 },
}

impl Completion {
    pub fn request(&self) -> u64 {
        match self {
            Completion::Current { request, .. } | Completion::Stale { request } => *request,
        }
    }

    /// The image, if this completion is still current.
    pub fn into_current(self) -> Option<RasterImage> {
        match self {
            Completion::Current { image, .. } => Some(image),
            Completion::Stale { .. } => None,
        }
    }
}

/// Shares one [`RenderPipeline`] between sync and async callers.
pub struct RenderService {
    pipeline: Arc<RenderPipeline>,
    next_request: AtomicU64,
    latest: Mutex<HashMap<String, u64>>,
}

impl RenderService {
    pub fn new(pipeline: Arc<RenderPipeline>) -> Self {
        RenderService {
            pipeline,
            next_request: AtomicU64::new(1),
            latest: Mutex::new(HashMap::new()),
        }
    }

    pub fn pipeline(&self) -> &RenderPipeline {
        &self.pipeline
    }

    /// Render on the calling thread.
    pub fn render(
        &self,
        content: &ListContent,
        settings: &DesignSettings,
        format: ExportFormat,
    ) -> RenderResult<RasterImage> {
        self.pipeline.render(content, settings, format)
    }

    /// Register a new request for `target` and return its id.
    pub fn begin(&self, target: &str) -> u64 {
        let request = self.next_request.fetch_add(1, Ordering::Relaxed);
        self.latest
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .insert(target.to_string(), request);
        request
    }

    /// Whether `request` is still the newest one issued for `target`.
    pub fn is_latest(&self, target: &str, request: u64) -> bool {
        self.latest
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .get(target)
            .is_some_and(|&latest| latest == request)
    }

    /// Render on a blocking worker thread.
    ///
    /// The request is registered before the first await point, so of several
    /// calls for one target the last one started is the one reported current.
    pub async fn render_async(
        &self,
        target: &str,
        content: ListContent,
        settings: DesignSettings,
        format: ExportFormat,
    ) -> Result<Completion, ServiceError> {
        log::debug!("Queueing {} render for {:?}", format, target);
        self.render_async_with_size(target, content, settings, format.logical_size())
            .await
    }

    /// Like [`render_async`](Self::render_async) for an arbitrary logical size.
    pub async fn render_async_with_size(
        &self,
        target: &str,
        content: ListContent,
        settings: DesignSettings,
        size: (f64, f64),
    ) -> Result<Completion, ServiceError> {
        let request = self.begin(target);
        let pipeline = Arc::clone(&self.pipeline);

        let image = tokio::task::spawn_blocking(move || {
            pipeline.render_with_size(&content, &settings, size)
        })
        .await
        .map_err(|e| ServiceError::WorkerFailed(e.to_string()))??;

        if self.is_latest(target, request) {
            Ok(Completion::Current { request, image })
        } else {
            log::debug!("Discarding stale render {} for {:?}", request, target);
            Ok(Completion::Stale { request })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use toppi_core::{AssetLibrary, FontBook, RendererConfig};

    fn service() -> RenderService {
        RenderService::new(Arc::new(RenderPipeline::with_parts(
            RendererConfig::default().with_seed(3),
            Arc::new(FontBook::empty()),
            Arc::new(AssetLibrary::new()),
        )))
    }

    #[test]
    fn test_request_ids_increase() {
        let service = service();
        let a = service.begin("preview");
        let b = service.begin("export");
        let c = service.begin("preview");
        assert!(a < b && b < c);
        assert!(!service.is_latest("preview", a));
        assert!(service.is_latest("preview", c));
        assert!(service.is_latest("export", b));
        assert!(!service.is_latest("unknown", a));
    }
}
