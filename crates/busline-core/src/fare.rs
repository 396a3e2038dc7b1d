//! Fare calculation for booking drafts.
//!
//! The fare is a pure function of the route context, the selected dropping
//! point and the seat count. Callers recompute it after every change to any
//! of those inputs; nothing here caches or mutates.

use crate::models::Route;

/// Per-seat price used when there is no route context at all.
///
/// Matches the lowest fare seen on the service. Not a confirmed business
/// rule; kept so totals agree with what the service has been charging.
pub const FALLBACK_SEAT_PRICE: u32 = 500;

/// Resolve the per-seat price.
///
/// Uses the selected dropping point's price when it names one of the route's
/// dropping points, otherwise the route's minimum price, otherwise
/// [`FALLBACK_SEAT_PRICE`].
pub fn price_per_seat(route: Option<&Route>, dropping_point: Option<&str>) -> u32 {
    let Some(route) = route else {
        return FALLBACK_SEAT_PRICE;
    };

    dropping_point
        .and_then(|name| route.dropping_point(name))
        .map(|dp| dp.price)
        .or(route.min_price)
        .unwrap_or(FALLBACK_SEAT_PRICE)
}

/// Total fare for `num_seats` seats.
///
/// # Examples
///
/// ```rust
/// use busline_core::{
///     fare::compute_fare,
///     models::{DroppingPoint, Route},
/// };
///
/// let route = Route {
///     provider: "Hanif".to_string(),
///     from_district: "Dhaka".to_string(),
///     to_district: "Sylhet".to_string(),
///     min_price: Some(500),
///     max_price: None,
///     dropping_points: vec![DroppingPoint::new("Kadamtoli", 500)],
///     description: String::new(),
/// };
///
/// assert_eq!(compute_fare(Some(&route), Some("Kadamtoli"), 2), 1000);
/// assert_eq!(compute_fare(Some(&route), None, 3), 1500);
/// assert_eq!(compute_fare(None, None, 1), 500);
/// ```
pub fn compute_fare(route: Option<&Route>, dropping_point: Option<&str>, num_seats: u32) -> u32 {
    price_per_seat(route, dropping_point).saturating_mul(num_seats)
}
