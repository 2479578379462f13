//! Bootstrap lifecycle
//!
//! The client-side lifecycle of the tracking pixel: script presence,
//! identifier resolution, initialization dedup and readiness orchestration.
//! Every operation here is safe to call repeatedly and from any call site;
//! the registry carries the state that makes repeats no-ops.

use std::sync::Arc;

use crate::page::Page;
use crate::vendor::call::{PixelId, VendorCall};

use super::config::{ClientConfig, ReadyOptions};

/// Bootstrap and dispatch controller for one page
///
/// Built attached to a [`Page`], or detached when no page environment
/// exists (server-side rendering, tests of embedding code); a detached
/// client turns every operation into a safe no-op.
pub struct PixelClient {
    config: ClientConfig,
    page: Option<Arc<Page>>,
}

impl PixelClient {
    /// Create a client bound to a page
    pub fn new(config: ClientConfig, page: Arc<Page>) -> Self {
        Self {
            config,
            page: Some(page),
        }
    }

    /// Create a client with no page environment
    pub fn detached(config: ClientConfig) -> Self {
        Self { config, page: None }
    }

    /// The client's configuration
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// The page this client is bound to, if any
    pub fn page(&self) -> Option<&Arc<Page>> {
        self.page.as_ref()
    }

    /// Whether chatty diagnostics are enabled
    pub(crate) async fn diagnostics(&self) -> bool {
        match &self.page {
            Some(page) => page.registry().debug().await,
            None => false,
        }
    }

    /// Ensure the vendor script is present, injecting it at most once
    ///
    /// If a vendor handle already occupies the slot (provided by another
    /// integration), nothing is injected and the script is marked loaded.
    /// Otherwise the queueing stub is installed and a script element for
    /// the configured URL is inserted adjacent to the document's first
    /// script element. Repeat calls are no-ops.
    pub async fn ensure_script(&self) {
        let Some(page) = &self.page else {
            return;
        };
        let registry = page.registry();
        if registry.script_loaded().await {
            return;
        }

        if page.vendor().is_installed().await {
            registry.mark_script_loaded().await;
            if registry.debug().await {
                tracing::debug!("vendor handle already present, nothing injected");
            }
            return;
        }

        // Only the caller that wins the stub install inserts the element
        if page.vendor().install_stub().await {
            page.document().insert_script(&self.config.script_url).await;
            tracing::debug!(
                url = %self.config.script_url,
                "vendor stub installed, script element injected"
            );
        }
        registry.mark_script_loaded().await;
    }

    /// Set or clear the runtime pixel id override
    ///
    /// Input is trimmed; `None` or an effectively-empty string clears the
    /// override, reverting resolution to the build-time configuration.
    pub async fn set_runtime_pixel_id(&self, pixel_id: Option<&str>) {
        let Some(page) = &self.page else {
            return;
        };
        let parsed = pixel_id.and_then(PixelId::parse);
        page.registry().set_override(parsed.clone()).await;
        if page.registry().debug().await {
            match &parsed {
                Some(id) => tracing::debug!(pixel_id = %id, "runtime pixel id set"),
                None => tracing::debug!("runtime pixel id cleared"),
            }
        }
    }

    /// Resolve the pixel id to use for global tracking
    ///
    /// Precedence: runtime override, then the build-time configured id,
    /// then none. State is re-read on every call; nothing is cached.
    pub async fn resolve_pixel_id(&self) -> Option<PixelId> {
        if let Some(page) = &self.page {
            if let Some(id) = page.registry().override_id().await {
                return Some(id);
            }
        }
        self.config
            .default_pixel_id
            .as_deref()
            .and_then(PixelId::parse)
    }

    /// Initialize a pixel exactly once per page
    ///
    /// The first call for an id issues the vendor init call followed by an
    /// initial visibility beacon scoped to that id only. Later calls for
    /// the same id issue nothing. Vendor faults are logged, never returned;
    /// initialization counts as done once the id is marked.
    pub async fn ensure_pixel(&self, pixel_id: &PixelId) {
        self.ensure_script().await;
        let Some(page) = &self.page else {
            return;
        };
        let registry = page.registry();

        if !registry.mark_loaded(pixel_id).await {
            if registry.debug().await {
                tracing::debug!(pixel_id = %pixel_id, "pixel already initialized");
            }
            return;
        }

        let handle = match page.vendor().require().await {
            Ok(handle) => handle,
            Err(err) => {
                tracing::debug!(pixel_id = %pixel_id, error = %err, "init calls dropped");
                return;
            }
        };

        if let Err(err) = handle.call(VendorCall::init(pixel_id.clone())) {
            tracing::warn!(pixel_id = %pixel_id, error = %err, "vendor init call failed");
        }
        // Initial visibility beacon, addressed to this pixel only
        if let Err(err) = handle.call(VendorCall::page_view(pixel_id.clone())) {
            tracing::warn!(pixel_id = %pixel_id, error = %err, "initial PageView failed");
        }
        if registry.debug().await {
            tracing::debug!(pixel_id = %pixel_id, "pixel initialized");
        }
    }

    /// Readiness entry point: script, options, event log, activation
    ///
    /// Intended to be called once from application startup and safe to call
    /// more than once. Never fails: every fallible step inside degrades to
    /// logging.
    pub async fn ensure_ready(&self, opts: ReadyOptions) {
        self.ensure_script().await;
        let Some(page) = &self.page else {
            tracing::debug!("no page environment, bootstrap skipped");
            return;
        };
        let registry = page.registry();

        match opts.debug {
            Some(debug) => registry.set_debug(debug).await,
            // The build-time flag only ever turns diagnostics on
            None if self.config.debug => registry.set_debug(true).await,
            None => {}
        }

        if let Some(raw) = opts.pixel_id.as_deref() {
            self.set_runtime_pixel_id(Some(raw)).await;
        }

        // Created empty if absent; an existing log is never replaced
        page.ensure_event_log().await;

        match self.resolve_pixel_id().await {
            Some(pixel_id) => {
                self.ensure_pixel(&pixel_id).await;
                registry.set_active(pixel_id.clone()).await;
                if registry.debug().await {
                    tracing::debug!(pixel_id = %pixel_id, "analytics ready");
                }
            }
            None => {
                if registry.debug().await {
                    tracing::debug!("no pixel id configured, nothing activated");
                }
            }
        }
    }
}
