//! Pixel registry
//!
//! The registry is the page-wide mutable record behind every idempotence
//! guarantee in this crate: which pixels are initialized, which one is
//! active, whether the vendor script is present, the diagnostic flag and
//! the runtime identifier override.
//!
//! # Architecture
//!
//! ```text
//!                          PixelRegistry
//!                     ┌──────────────────────┐
//!                     │ loaded_ids: HashSet  │◄── ensure_pixel (dedup)
//!                     │ active_id: Option    │◄── ensure_ready
//!                     │ script_loaded: bool  │◄── ensure_script
//!                     │ debug: bool          │
//!                     │ override_id: Option  │◄── set_runtime_pixel_id
//!                     └──────────────────────┘
//!                                │
//!                                ▼
//!                     resolve_pixel_id / track_event
//! ```
//!
//! Created with its [`Page`](crate::page::Page), lives for the page's
//! lifetime, discarded with it.

pub mod store;

pub use store::{PixelRegistry, RegistrySnapshot};
