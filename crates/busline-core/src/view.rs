//! The view context surrounding the booking flow.

use crate::models::BookingLookup;

/// Which page the session is showing.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum View {
    /// Route search, the landing page
    #[default]
    Search,
    /// The booking wizard
    Booking,
    /// A customer's bookings, pre-queried when a lookup is known
    Bookings { lookup: Option<BookingLookup> },
    /// The chat assistant
    Chat,
}
