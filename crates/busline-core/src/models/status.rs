//! Status enumeration for bookings.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Type-safe enumeration of booking statuses as reported by the service.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum BookingStatus {
    /// Accepted by the service but not yet confirmed
    Pending,

    /// Seats are held for the customer
    Confirmed,

    /// Cancelled by the customer
    Cancelled,
}

impl FromStr for BookingStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "pending" => Ok(BookingStatus::Pending),
            "confirmed" => Ok(BookingStatus::Confirmed),
            "cancelled" | "canceled" => Ok(BookingStatus::Cancelled),
            _ => Err(format!("Invalid booking status: {s}")),
        }
    }
}

impl BookingStatus {
    /// Wire representation of the status.
    pub fn as_str(&self) -> &'static str {
        match self {
            BookingStatus::Pending => "pending",
            BookingStatus::Confirmed => "confirmed",
            BookingStatus::Cancelled => "cancelled",
        }
    }

    /// Whether a cancellation may be requested for a booking in this status.
    ///
    /// Only confirmed bookings can be cancelled; pending bookings have nothing
    /// to release yet and cancelled ones are terminal.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use busline_core::models::BookingStatus;
    ///
    /// assert!(BookingStatus::Confirmed.is_cancellable());
    /// assert!(!BookingStatus::Pending.is_cancellable());
    /// assert!(!BookingStatus::Cancelled.is_cancellable());
    /// ```
    pub fn is_cancellable(&self) -> bool {
        matches!(self, BookingStatus::Confirmed)
    }

    /// Get status with consistent icon formatting for display.
    pub fn with_icon(&self) -> &'static str {
        match self {
            BookingStatus::Confirmed => "✓ Confirmed",
            BookingStatus::Pending => "… Pending",
            BookingStatus::Cancelled => "✗ Cancelled",
        }
    }
}
