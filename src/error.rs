//! Error types
//!
//! Nothing in the public API propagates these errors to callers; they exist
//! so vendor-handle implementations can report delivery faults, which the
//! dispatch layer degrades to warning-level logs.

/// Error type for vendor call delivery
#[derive(Debug, Clone)]
pub enum Error {
    /// No vendor call-handle is installed on the page
    VendorUnavailable,
    /// The vendor runtime rejected a call
    Delivery(String),
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Error::VendorUnavailable => write!(f, "Vendor call-handle not installed"),
            Error::Delivery(reason) => write!(f, "Vendor call rejected: {}", reason),
        }
    }
}

impl std::error::Error for Error {}

/// Convenience result alias used throughout the crate
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(
            Error::VendorUnavailable.to_string(),
            "Vendor call-handle not installed"
        );
        assert_eq!(
            Error::Delivery("blocked".into()).to_string(),
            "Vendor call rejected: blocked"
        );
    }
}
