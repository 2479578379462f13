//! Pixel registry implementation
//!
//! The single page-wide record of which pixels have been initialized,
//! which one is active, and the bootstrap flags.

use std::collections::HashSet;

use tokio::sync::RwLock;

use crate::vendor::call::PixelId;

/// Mutable registry state, guarded as one unit
#[derive(Debug, Default)]
struct State {
    /// Pixels already passed through initialization; insert-only
    loaded_ids: HashSet<PixelId>,
    /// Pixel designated to receive per-pixel event routing
    active_id: Option<PixelId>,
    /// Whether the vendor script has been injected (or found present)
    script_loaded: bool,
    /// Whether chatty diagnostics are emitted
    debug: bool,
    /// Runtime identifier override; feeds resolution, not routing
    override_id: Option<PixelId>,
}

/// Page-wide pixel state
///
/// Thread-safe via `RwLock`. Every operation leaves the registry in a
/// consistent state under repeated invocation; the membership check-and-set
/// in [`mark_loaded`](PixelRegistry::mark_loaded) happens under a single
/// write-lock acquisition so concurrent initializers cannot both win.
pub struct PixelRegistry {
    state: RwLock<State>,
}

impl PixelRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State::default()),
        }
    }

    /// Whether the vendor script has been injected or adopted
    pub async fn script_loaded(&self) -> bool {
        self.state.read().await.script_loaded
    }

    /// Record that the vendor script is present
    ///
    /// Monotonic false→true. Returns `true` when this call made the
    /// transition.
    pub async fn mark_script_loaded(&self) -> bool {
        let mut state = self.state.write().await;
        let transitioned = !state.script_loaded;
        state.script_loaded = true;
        transitioned
    }

    /// Record a pixel as initialized
    ///
    /// Returns `true` when the pixel was not yet a member; membership is
    /// permanent for the page's lifetime.
    pub async fn mark_loaded(&self, pixel_id: &PixelId) -> bool {
        self.state.write().await.loaded_ids.insert(pixel_id.clone())
    }

    /// Whether a pixel has been initialized
    pub async fn is_loaded(&self, pixel_id: &PixelId) -> bool {
        self.state.read().await.loaded_ids.contains(pixel_id)
    }

    /// Number of initialized pixels
    pub async fn loaded_count(&self) -> usize {
        self.state.read().await.loaded_ids.len()
    }

    /// Designate the pixel that receives per-pixel routing
    ///
    /// Overwrites any previous designation.
    pub async fn set_active(&self, pixel_id: PixelId) {
        self.state.write().await.active_id = Some(pixel_id);
    }

    /// The currently active pixel, if any
    pub async fn active_id(&self) -> Option<PixelId> {
        self.state.read().await.active_id.clone()
    }

    /// Set or clear the diagnostic flag
    pub async fn set_debug(&self, debug: bool) {
        self.state.write().await.debug = debug;
    }

    /// Whether diagnostics are enabled
    pub async fn debug(&self) -> bool {
        self.state.read().await.debug
    }

    /// Set (`Some`) or clear (`None`) the runtime identifier override
    pub async fn set_override(&self, pixel_id: Option<PixelId>) {
        self.state.write().await.override_id = pixel_id;
    }

    /// The runtime identifier override, if set
    pub async fn override_id(&self) -> Option<PixelId> {
        self.state.read().await.override_id.clone()
    }

    /// Point-in-time view of the registry
    pub async fn snapshot(&self) -> RegistrySnapshot {
        let state = self.state.read().await;
        RegistrySnapshot {
            loaded_count: state.loaded_ids.len(),
            active_id: state.active_id.clone(),
            script_loaded: state.script_loaded,
            debug: state.debug,
            has_override: state.override_id.is_some(),
        }
    }
}

impl Default for PixelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Point-in-time registry view for diagnostics and tests
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RegistrySnapshot {
    /// Number of initialized pixels
    pub loaded_count: usize,
    /// Currently active pixel
    pub active_id: Option<PixelId>,
    /// Whether the vendor script is present
    pub script_loaded: bool,
    /// Whether diagnostics are enabled
    pub debug: bool,
    /// Whether a runtime override is set
    pub has_override: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pid(raw: &str) -> PixelId {
        PixelId::parse(raw).unwrap()
    }

    #[tokio::test]
    async fn test_mark_loaded_dedups() {
        let registry = PixelRegistry::new();
        let id = pid("111");

        assert!(registry.mark_loaded(&id).await);
        assert!(!registry.mark_loaded(&id).await);
        assert!(registry.is_loaded(&id).await);
        assert_eq!(registry.loaded_count().await, 1);
    }

    #[tokio::test]
    async fn test_script_loaded_is_monotonic() {
        let registry = PixelRegistry::new();
        assert!(!registry.script_loaded().await);

        assert!(registry.mark_script_loaded().await);
        assert!(!registry.mark_script_loaded().await);
        assert!(registry.script_loaded().await);
    }

    #[tokio::test]
    async fn test_set_active_overwrites() {
        let registry = PixelRegistry::new();

        registry.set_active(pid("111")).await;
        registry.set_active(pid("222")).await;

        assert_eq!(registry.active_id().await, Some(pid("222")));
    }

    #[tokio::test]
    async fn test_override_set_and_clear() {
        let registry = PixelRegistry::new();
        assert_eq!(registry.override_id().await, None);

        registry.set_override(Some(pid("ABC"))).await;
        assert_eq!(registry.override_id().await, Some(pid("ABC")));

        registry.set_override(None).await;
        assert_eq!(registry.override_id().await, None);
    }

    #[tokio::test]
    async fn test_snapshot() {
        let registry = PixelRegistry::new();
        registry.mark_loaded(&pid("111")).await;
        registry.set_active(pid("111")).await;
        registry.mark_script_loaded().await;
        registry.set_debug(true).await;

        let snapshot = registry.snapshot().await;
        assert_eq!(
            snapshot,
            RegistrySnapshot {
                loaded_count: 1,
                active_id: Some(pid("111")),
                script_loaded: true,
                debug: true,
                has_override: false,
            }
        );
    }
}
