//! Parameter structures for busline operations
//!
//! Interface-neutral inputs for the operations the CLI exposes. Interface
//! layers define their own argument structs with framework derives and
//! convert into these via `From`, so the core stays free of clap.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │  Core Params    │
//! │  (clap derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘
//! ```

use jiff::civil::Date;

use crate::models::{DraftUpdate, RouteQuery};

/// Parameters for operations on a single booking.
#[derive(Debug, Clone)]
pub struct Id {
    pub id: u64,
}

/// Parameters for searching routes.
#[derive(Debug, Clone, Default)]
pub struct SearchRoutes {
    pub from_district: String,
    pub to_district: String,
    pub provider: Option<String>,
}

impl From<&SearchRoutes> for RouteQuery {
    fn from(params: &SearchRoutes) -> Self {
        RouteQuery::new(params.from_district.as_str(), params.to_district.as_str())
            .with_provider(params.provider.clone())
    }
}

/// Parameters for listing bus providers.
#[derive(Debug, Clone, Default)]
pub struct ListProviders {
    pub district: Option<String>,
}

/// Parameters for listing a customer's bookings. Exactly one of the two
/// identifiers is expected.
#[derive(Debug, Clone, Default)]
pub struct FindBookings {
    pub email: Option<String>,
    pub phone: Option<String>,
}

/// Parameters for cancelling a booking.
///
/// Nothing is sent unless `confirmed` is set.
#[derive(Debug, Clone)]
pub struct CancelBooking {
    pub id: u64,
    pub confirmed: bool,
}

/// Trip details for a booking made in one pass.
#[derive(Debug, Clone)]
pub struct TripDetails {
    pub from_district: String,
    pub to_district: String,
    pub provider: String,
    pub travel_date: Date,
    pub num_seats: i64,
    pub dropping_point: Option<String>,
}

impl From<TripDetails> for DraftUpdate {
    fn from(trip: TripDetails) -> Self {
        DraftUpdate {
            from_district: Some(trip.from_district),
            to_district: Some(trip.to_district),
            provider: Some(trip.provider),
            travel_date: Some(trip.travel_date),
            num_seats: Some(trip.num_seats),
            dropping_point: trip.dropping_point,
        }
    }
}
