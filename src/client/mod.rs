//! Bootstrap & dispatch controller
//!
//! The public client surface: configuration, the idempotent bootstrap
//! lifecycle (script presence, identifier resolution, pixel activation,
//! readiness orchestration) and identifier-aware event dispatch.

pub mod bootstrap;
pub mod config;
pub mod dispatch;

pub use bootstrap::PixelClient;
pub use config::{ClientConfig, ReadyOptions, ENV_PIXEL_DEBUG, ENV_PIXEL_ID, VENDOR_SCRIPT_URL};
