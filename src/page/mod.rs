//! Page environment
//!
//! The explicit stand-in for the ambient browser page: the document's
//! script elements, the vendor call-handle slot, the generic event log and
//! the page-wide pixel registry live here. One [`Page`] exists per page
//! lifetime; it is created at page start and simply dropped at unload,
//! there is no teardown.

pub mod document;
pub mod event_log;

use std::sync::Arc;

use tokio::sync::RwLock;

use crate::registry::PixelRegistry;
use crate::vendor::call::VendorCall;
use crate::vendor::handle::{HandleSlot, VendorHandle};

pub use document::{Document, ScriptElement};
pub use event_log::{EventLog, LogEntry};

/// Page-scoped runtime environment
///
/// All bootstrap and dispatch operations act through one of these. A client
/// built without a page (outside a browser context) is a no-op client.
pub struct Page {
    document: Document,
    vendor: HandleSlot,
    event_log: RwLock<Option<Arc<EventLog>>>,
    registry: PixelRegistry,
}

impl Page {
    /// Create a fresh page with an empty document and no vendor handle
    pub fn new() -> Self {
        Self {
            document: Document::new(),
            vendor: HandleSlot::new(),
            event_log: RwLock::new(None),
            registry: PixelRegistry::new(),
        }
    }

    /// Create a page around an existing document, e.g. one that already
    /// carries the application's own script elements
    pub fn with_document(document: Document) -> Self {
        Self {
            document,
            vendor: HandleSlot::new(),
            event_log: RwLock::new(None),
            registry: PixelRegistry::new(),
        }
    }

    /// Create a page whose vendor handle was already provided by another
    /// integration, so the bootstrap will not inject anything
    pub fn with_vendor_handle(handle: Arc<dyn VendorHandle>) -> Self {
        Self {
            document: Document::new(),
            vendor: HandleSlot::with_handle(handle),
            event_log: RwLock::new(None),
            registry: PixelRegistry::new(),
        }
    }

    /// The page's document
    pub fn document(&self) -> &Document {
        &self.document
    }

    /// The page's vendor handle slot
    pub fn vendor(&self) -> &HandleSlot {
        &self.vendor
    }

    /// The page-wide pixel registry
    pub fn registry(&self) -> &PixelRegistry {
        &self.registry
    }

    /// The generic event log, if one has been created or installed
    pub async fn event_log(&self) -> Option<Arc<EventLog>> {
        self.event_log.read().await.clone()
    }

    /// Get the generic event log, creating an empty one on first touch
    ///
    /// An already-present log is returned untouched: external consumers may
    /// be appending to it, so it is never replaced.
    pub async fn ensure_event_log(&self) -> Arc<EventLog> {
        let mut slot = self.event_log.write().await;
        match slot.as_ref() {
            Some(log) => Arc::clone(log),
            None => {
                let log = Arc::new(EventLog::new());
                *slot = Some(Arc::clone(&log));
                log
            }
        }
    }

    /// Install an externally-created event log
    ///
    /// Returns `false` (leaving the existing log in place) when one is
    /// already present.
    pub async fn install_event_log(&self, log: Arc<EventLog>) -> bool {
        let mut slot = self.event_log.write().await;
        if slot.is_some() {
            return false;
        }
        *slot = Some(log);
        true
    }

    /// Called when the real vendor script has loaded
    ///
    /// Swaps the stub for the delivered runtime and returns the calls the
    /// stub buffered, oldest first, for the runtime's owner to drain.
    pub async fn vendor_script_loaded(&self, real: Arc<dyn VendorHandle>) -> Vec<VendorCall> {
        let buffered = self.vendor.promote(real).await;
        tracing::debug!(buffered = buffered.len(), "vendor script loaded, stub promoted");
        buffered
    }
}

impl Default for Page {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use tokio_test::assert_ok;

    use crate::vendor::call::{PixelId, VendorCall};
    use crate::vendor::recording::RecordingHandle;

    use super::*;

    #[tokio::test]
    async fn test_event_log_created_once() {
        let page = Page::new();
        assert!(page.event_log().await.is_none());

        let first = page.ensure_event_log().await;
        let second = page.ensure_event_log().await;
        assert!(Arc::ptr_eq(&first, &second));
    }

    #[tokio::test]
    async fn test_install_event_log_never_replaces() {
        let page = Page::new();
        let external = Arc::new(EventLog::new());
        assert!(page.install_event_log(Arc::clone(&external)).await);

        // The ensure path hands back the installed log
        let log = page.ensure_event_log().await;
        assert!(Arc::ptr_eq(&log, &external));

        // A second install is refused
        assert!(!page.install_event_log(Arc::new(EventLog::new())).await);
        let still = page.event_log().await.unwrap();
        assert!(Arc::ptr_eq(&still, &external));
    }

    #[tokio::test]
    async fn test_vendor_script_loaded_hands_over_queue() {
        let page = Page::new();
        page.vendor().install_stub().await;

        let id = PixelId::parse("P1").unwrap();
        let stub = page.vendor().current().await.unwrap();
        assert_ok!(stub.call(VendorCall::init(id.clone())));

        let real = Arc::new(RecordingHandle::new());
        let buffered = page
            .vendor_script_loaded(Arc::clone(&real) as Arc<dyn VendorHandle>)
            .await;
        assert_eq!(buffered.len(), 1);
        assert_eq!(buffered[0].pixel_id(), Some(&id));

        // Fresh calls bypass the queue from now on
        let current = page.vendor().current().await.unwrap();
        assert_ok!(current.call(VendorCall::page_view(id)));
        assert_eq!(real.call_count(), 1);
    }
}
