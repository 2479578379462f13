//! Idempotent tracking-pixel bootstrap and deduplicated event dispatch
//!
//! This crate models the client-side lifecycle of a third-party tracking
//! pixel: inject the vendor script at most once, initialize each pixel id
//! at most once, keep a single active pixel for scoped event routing, and
//! translate business events into vendor calls plus generic analytics log
//! entries.
//!
//! # Architecture
//!
//! ```text
//!   ensure_ready / track_* ──► PixelClient ──► Page
//!                                               ├── Document      (script elements)
//!                                               ├── HandleSlot ──► stub │ real runtime
//!                                               ├── EventLog      (generic analytics)
//!                                               └── PixelRegistry (dedup + active id)
//! ```
//!
//! The [`page::Page`] is the explicit stand-in for the browser page: one
//! per page lifetime, dropped at unload. A [`client::PixelClient`] built
//! without a page degrades every operation to a safe no-op. No public
//! operation returns an error or panics; all failure is absorbed into
//! logging, since tracking is non-critical to the host application.
//!
//! # Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use pixel_rs::{ClientConfig, Page, PixelClient, ReadyOptions, ReservationEvent};
//!
//! # async fn example() {
//! let page = Arc::new(Page::new());
//! let client = PixelClient::new(ClientConfig::with_pixel_id("123456"), Arc::clone(&page));
//!
//! // Once, from application startup; repeats are safe
//! client.ensure_ready(ReadyOptions::new()).await;
//!
//! // From any call site, any number of times
//! client
//!     .track_reservation_made(&ReservationEvent::new().full_name("Jane Doe"))
//!     .await;
//! # }
//! ```

pub mod client;
pub mod error;
pub mod events;
pub mod page;
pub mod registry;
pub mod vendor;

pub use client::{ClientConfig, PixelClient, ReadyOptions};
pub use error::{Error, Result};
pub use events::ReservationEvent;
pub use page::{Document, EventLog, LogEntry, Page, ScriptElement};
pub use registry::{PixelRegistry, RegistrySnapshot};
pub use vendor::{
    EventPayload, FieldValue, HandleSlot, PixelId, QueuedHandle, RecordingHandle, VendorCall,
    VendorHandle,
};
