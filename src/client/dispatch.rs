//! Event dispatch and routing
//!
//! Translates named events into vendor calls with identifier-aware routing:
//! a resolvable or active pixel receives a scoped call, otherwise the event
//! falls back to the unaddressed custom channel rather than being dropped.
//! Business events additionally land in the generic event log, independent
//! of vendor delivery.

use crate::page::LogEntry;
use crate::vendor::call::{EventPayload, VendorCall};

use super::bootstrap::PixelClient;

impl PixelClient {
    /// Dispatch a named event to the vendor
    ///
    /// Skipped entirely (diagnostic log only) when no vendor handle exists,
    /// the "tracking unavailable" case, e.g. a blocking extension. With a
    /// handle present, the event goes to the resolvable-or-active pixel as
    /// a scoped call, or to the custom channel when no pixel is known.
    /// Vendor faults are logged, never returned.
    pub async fn track_event(&self, event: &str, payload: EventPayload) {
        let Some(page) = self.page() else {
            return;
        };

        let handle = match page.vendor().require().await {
            Ok(handle) => handle,
            Err(err) => {
                tracing::debug!(event, error = %err, "dispatch skipped");
                return;
            }
        };

        let target = match self.resolve_pixel_id().await {
            Some(pixel_id) => Some(pixel_id),
            None => page.registry().active_id().await,
        };

        let call = match target {
            Some(pixel_id) => {
                if self.diagnostics().await {
                    tracing::debug!(event, pixel_id = %pixel_id, "scoped dispatch");
                }
                VendorCall::track_single(pixel_id, event, payload)
            }
            None => {
                if self.diagnostics().await {
                    tracing::debug!(event, "custom dispatch, no pixel id known");
                }
                VendorCall::track_custom(event, payload)
            }
        };

        if let Err(err) = handle.call(call) {
            tracing::warn!(event, error = %err, "vendor track call failed");
        }
    }

    /// Issue a visibility beacon for the current route
    ///
    /// Addressed to the resolvable-or-active pixel. PageView is a standard
    /// vendor event and is never demoted to the custom channel: with no
    /// pixel known (or no handle) the beacon is skipped.
    pub async fn track_page_view(&self) {
        let Some(page) = self.page() else {
            return;
        };

        let handle = match page.vendor().require().await {
            Ok(handle) => handle,
            Err(err) => {
                tracing::debug!(error = %err, "page view skipped");
                return;
            }
        };

        let target = match self.resolve_pixel_id().await {
            Some(pixel_id) => Some(pixel_id),
            None => page.registry().active_id().await,
        };
        let Some(pixel_id) = target else {
            if self.diagnostics().await {
                tracing::debug!("page view skipped, no pixel id known");
            }
            return;
        };

        if let Err(err) = handle.call(VendorCall::page_view(pixel_id.clone())) {
            tracing::warn!(pixel_id = %pixel_id, error = %err, "PageView call failed");
        }
    }

    /// Vendor dispatch plus the generic log entry for one business event
    pub(crate) async fn dispatch_business(
        &self,
        vendor_event: &str,
        log_event: &str,
        payload: EventPayload,
    ) {
        self.track_event(vendor_event, payload.clone()).await;

        // The log entry lands regardless of vendor delivery
        if let Some(page) = self.page() {
            let log = page.ensure_event_log().await;
            log.push(LogEntry::new(log_event, &payload)).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::client::config::{ClientConfig, ReadyOptions};
    use crate::page::Page;
    use crate::vendor::call::{PixelId, PAGE_VIEW};
    use crate::vendor::handle::VendorHandle;
    use crate::vendor::recording::RecordingHandle;

    use super::*;

    fn pid(raw: &str) -> PixelId {
        PixelId::parse(raw).unwrap()
    }

    fn recorded_page() -> (Arc<Page>, Arc<RecordingHandle>) {
        let handle = Arc::new(RecordingHandle::new());
        let page = Arc::new(Page::with_vendor_handle(
            Arc::clone(&handle) as Arc<dyn VendorHandle>
        ));
        (page, handle)
    }

    #[tokio::test]
    async fn test_track_event_scoped_to_active_pixel() {
        let (page, handle) = recorded_page();
        let client = PixelClient::new(ClientConfig::with_pixel_id("P1"), Arc::clone(&page));
        client.ensure_ready(ReadyOptions::new()).await;

        let payload = EventPayload::new().with("status", "confirmed");
        client.track_event("Reservation Made", payload.clone()).await;

        let calls = handle.calls_for_event("Reservation Made");
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0],
            VendorCall::track_single(pid("P1"), "Reservation Made", payload)
        );
    }

    #[tokio::test]
    async fn test_track_event_custom_fallback_without_pixel() {
        let (page, handle) = recorded_page();
        let client = PixelClient::new(ClientConfig::default(), page);

        let payload = EventPayload::new().with("status", "confirmed");
        client.track_event("Reservation Made", payload.clone()).await;

        let calls = handle.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(
            calls[0],
            VendorCall::track_custom("Reservation Made", payload)
        );
    }

    #[tokio::test]
    async fn test_track_event_routes_to_active_when_override_cleared() {
        let (page, handle) = recorded_page();
        let client = PixelClient::new(ClientConfig::default(), Arc::clone(&page));

        // Activated through an override that is later cleared
        client
            .ensure_ready(ReadyOptions::new().pixel_id("P9"))
            .await;
        client.set_runtime_pixel_id(None).await;

        client.track_event("Signup", EventPayload::new()).await;

        let calls = handle.calls_for_event("Signup");
        assert_eq!(calls[0].pixel_id(), Some(&pid("P9")));
    }

    #[tokio::test]
    async fn test_track_event_skipped_without_handle() {
        // No bootstrap ran: the page has no vendor handle at all
        let page = Arc::new(Page::new());
        let client = PixelClient::new(ClientConfig::with_pixel_id("P1"), Arc::clone(&page));

        client.track_event("Signup", EventPayload::new()).await;

        assert!(!page.vendor().is_installed().await);
    }

    #[tokio::test]
    async fn test_track_event_detached_is_noop() {
        let client = PixelClient::detached(ClientConfig::default());
        client.track_event("Signup", EventPayload::new()).await;
    }

    #[tokio::test]
    async fn test_rejecting_vendor_never_propagates() {
        let handle = Arc::new(RecordingHandle::rejecting());
        let page = Arc::new(Page::with_vendor_handle(
            Arc::clone(&handle) as Arc<dyn VendorHandle>
        ));
        let client = PixelClient::new(ClientConfig::with_pixel_id("P1"), Arc::clone(&page));

        client
            .dispatch_business("Reservation Made", "reservation_made", EventPayload::new())
            .await;

        // Vendor rejected the call; the generic log entry still landed
        assert_eq!(handle.call_count(), 1);
        let log = page.event_log().await.unwrap();
        assert_eq!(log.len().await, 1);
        assert_eq!(log.entries().await[0].event, "reservation_made");
    }

    #[tokio::test]
    async fn test_business_log_lands_without_handle() {
        let page = Arc::new(Page::new());
        let client = PixelClient::new(ClientConfig::default(), Arc::clone(&page));

        client
            .dispatch_business("Reservation Made", "reservation_made", EventPayload::new())
            .await;

        let log = page.event_log().await.unwrap();
        assert_eq!(log.len().await, 1);
    }

    #[tokio::test]
    async fn test_track_page_view_scoped() {
        let (page, handle) = recorded_page();
        let client = PixelClient::new(ClientConfig::with_pixel_id("P1"), Arc::clone(&page));
        client.ensure_ready(ReadyOptions::new()).await;

        client.track_page_view().await;

        // One beacon from activation, one from the route change
        assert_eq!(handle.calls_for_event(PAGE_VIEW).len(), 2);
        let beacons = handle.calls_for_event(PAGE_VIEW);
        assert!(beacons.iter().all(|c| c.pixel_id() == Some(&pid("P1"))));
    }

    #[tokio::test]
    async fn test_track_page_view_skipped_without_pixel() {
        let (page, handle) = recorded_page();
        let client = PixelClient::new(ClientConfig::default(), page);

        client.track_page_view().await;

        assert_eq!(handle.call_count(), 0);
    }
}
