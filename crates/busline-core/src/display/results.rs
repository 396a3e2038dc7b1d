//! Result wrapper types for displaying operation outcomes.

use std::{borrow::Borrow, fmt};

use super::models::Taka;
use crate::models::{Booking, BookingDraft, CustomerInfo};

/// The confirmation shown after a booking is created.
///
/// # Examples
///
/// ```rust
/// use busline_core::{
///     display::CreateResult,
///     models::{Booking, BookingStatus},
/// };
/// use jiff::{civil::date, Timestamp};
///
/// let booking = Booking {
///     id: 12,
///     customer_name: "Rahim".to_string(),
///     customer_email: "rahim@example.com".to_string(),
///     customer_phone: "+8801700000000".to_string(),
///     from_district: "Dhaka".to_string(),
///     to_district: "Sylhet".to_string(),
///     provider: "Hanif".to_string(),
///     travel_date: date(2026, 11, 2),
///     num_seats: 3,
///     dropping_point: None,
///     status: BookingStatus::Confirmed,
///     total_fare: 1500,
///     created_at: Timestamp::now(),
///     updated_at: Timestamp::now(),
/// };
///
/// let output = CreateResult::new(booking).to_string();
/// assert!(output.contains("Booking confirmed with ID: 12"));
/// ```
pub struct CreateResult<T> {
    pub resource: T,
}

impl<T> CreateResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl<B: Borrow<Booking>> fmt::Display for CreateResult<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let booking = self.resource.borrow();
        writeln!(f, "Booking confirmed with ID: {}", booking.id)?;
        writeln!(f)?;
        write!(f, "{booking}")
    }
}

/// The outcome of a cancellation, showing the record as the service now has it.
pub struct CancelResult<T> {
    pub resource: T,
}

impl<T> CancelResult<T> {
    pub fn new(resource: T) -> Self {
        Self { resource }
    }
}

impl<B: Borrow<Booking>> fmt::Display for CancelResult<B> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let booking = self.resource.borrow();
        writeln!(f, "Cancelled booking #{}", booking.id)?;
        writeln!(f)?;
        write!(f, "{booking}")
    }
}

/// The review shown on the Confirm step before anything is sent.
pub struct BookingSummary<'a> {
    pub customer: &'a CustomerInfo,
    pub draft: &'a BookingDraft,
    pub fare: u32,
}

impl fmt::Display for BookingSummary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let draft = self.draft;

        writeln!(f, "## Review your booking")?;
        writeln!(f)?;
        writeln!(f, "### Passenger")?;
        writeln!(f)?;
        write!(f, "{}", self.customer)?;
        writeln!(f)?;
        writeln!(f, "### Trip")?;
        writeln!(f)?;
        writeln!(
            f,
            "- **Route**: {} → {}",
            draft.from_district, draft.to_district
        )?;
        writeln!(f, "- **Provider**: {}", draft.provider)?;
        if let Some(date) = draft.travel_date {
            writeln!(f, "- **Travel date**: {date}")?;
        }
        writeln!(f, "- **Seats**: {}", draft.num_seats())?;
        if let Some(point) = &draft.dropping_point {
            writeln!(f, "- **Dropping point**: {point}")?;
        }
        writeln!(f)?;
        writeln!(f, "**Total fare: {}**", Taka(self.fare))
    }
}

#[cfg(test)]
mod tests {
    use jiff::civil::date;

    use super::*;
    use crate::models::DraftUpdate;

    #[test]
    fn test_summary_shows_fare_and_trip() {
        let customer = CustomerInfo::new("Rahim", "rahim@example.com", "+8801700000000");
        let mut draft = BookingDraft::default();
        draft.apply(DraftUpdate {
            from_district: Some("Dhaka".to_string()),
            to_district: Some("Sylhet".to_string()),
            provider: Some("Hanif".to_string()),
            travel_date: Some(date(2026, 11, 2)),
            num_seats: Some(2),
            dropping_point: Some("Kadamtoli".to_string()),
        });

        let output = BookingSummary {
            customer: &customer,
            draft: &draft,
            fare: 1000,
        }
        .to_string();

        assert!(output.contains("- **Route**: Dhaka → Sylhet"));
        assert!(output.contains("- **Travel date**: 2026-11-02"));
        assert!(output.contains("- **Dropping point**: Kadamtoli"));
        assert!(output.contains("**Total fare: ৳1000**"));
    }
}
