//! Reservation business events
//!
//! The two reservation events and their normalization rules: every free-text
//! field is trimmed and an absent field becomes the empty string, so the
//! vendor payload and the generic log entry always carry the full field set.

use crate::client::PixelClient;
use crate::vendor::call::EventPayload;

/// Vendor event name for a completed reservation
pub const RESERVATION_MADE: &str = "Reservation Made";

/// Vendor event name for a reservation check-in
pub const RESERVATION_CHECKIN: &str = "Reservation Checkin";

const LOG_RESERVATION_MADE: &str = "reservation_made";
const LOG_RESERVATION_CHECKIN: &str = "reservation_checkin";

/// Free-text reservation record as supplied by call sites
///
/// All fields are optional; normalization fills the gaps before dispatch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReservationEvent {
    /// Reservation code
    pub reservation_code: Option<String>,
    /// Guest full name
    pub full_name: Option<String>,
    /// Guest email
    pub email: Option<String>,
    /// Guest phone
    pub phone: Option<String>,
    /// Reserved unit
    pub unit: Option<String>,
    /// Area within the venue
    pub area: Option<String>,
    /// Reservation status
    pub status: Option<String>,
    /// Acquisition source
    pub source: Option<String>,
}

impl ReservationEvent {
    /// Create an empty record
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the reservation code
    pub fn reservation_code(mut self, value: impl Into<String>) -> Self {
        self.reservation_code = Some(value.into());
        self
    }

    /// Set the guest full name
    pub fn full_name(mut self, value: impl Into<String>) -> Self {
        self.full_name = Some(value.into());
        self
    }

    /// Set the guest email
    pub fn email(mut self, value: impl Into<String>) -> Self {
        self.email = Some(value.into());
        self
    }

    /// Set the guest phone
    pub fn phone(mut self, value: impl Into<String>) -> Self {
        self.phone = Some(value.into());
        self
    }

    /// Set the reserved unit
    pub fn unit(mut self, value: impl Into<String>) -> Self {
        self.unit = Some(value.into());
        self
    }

    /// Set the area
    pub fn area(mut self, value: impl Into<String>) -> Self {
        self.area = Some(value.into());
        self
    }

    /// Set the status
    pub fn status(mut self, value: impl Into<String>) -> Self {
        self.status = Some(value.into());
        self
    }

    /// Set the acquisition source
    pub fn source(mut self, value: impl Into<String>) -> Self {
        self.source = Some(value.into());
        self
    }

    /// Normalized payload with the full field set in fixed order
    pub fn payload(&self) -> EventPayload {
        EventPayload::new()
            .with("reservation_code", norm(&self.reservation_code))
            .with("full_name", norm(&self.full_name))
            .with("email", norm(&self.email))
            .with("phone", norm(&self.phone))
            .with("unit", norm(&self.unit))
            .with("area", norm(&self.area))
            .with("status", norm(&self.status))
            .with("source", norm(&self.source))
    }
}

fn norm(value: &Option<String>) -> String {
    value.as_deref().unwrap_or("").trim().to_string()
}

impl PixelClient {
    /// Track a completed reservation
    ///
    /// Dispatches the vendor event and appends a `reservation_made` entry
    /// to the generic event log. Completes once dispatch has been
    /// attempted; delivery is fire-and-forget.
    pub async fn track_reservation_made(&self, event: &ReservationEvent) {
        self.dispatch_business(RESERVATION_MADE, LOG_RESERVATION_MADE, event.payload())
            .await;
    }

    /// Track a reservation check-in
    ///
    /// Dispatches the vendor event and appends a `reservation_checkin`
    /// entry to the generic event log.
    pub async fn track_reservation_checkin(&self, event: &ReservationEvent) {
        self.dispatch_business(RESERVATION_CHECKIN, LOG_RESERVATION_CHECKIN, event.payload())
            .await;
    }
}
