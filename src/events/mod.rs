//! Business events
//!
//! Named, typed events translated into vendor calls plus generic log
//! entries by the dispatch layer.

pub mod reservation;

pub use reservation::{ReservationEvent, RESERVATION_CHECKIN, RESERVATION_MADE};
