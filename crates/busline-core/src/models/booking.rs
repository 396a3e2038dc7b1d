//! Booking records and the payload that creates them.

use jiff::{civil::Date, Timestamp};
use serde::{Deserialize, Serialize};

use super::{BookingDraft, BookingStatus, CustomerInfo};

/// A booking as owned and returned by the service.
///
/// Treated as immutable once received; a cancellation produces a new record
/// from the service rather than a local edit.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Booking {
    pub id: u64,
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub from_district: String,
    pub to_district: String,
    pub provider: String,
    pub travel_date: Date,
    pub num_seats: u32,
    #[serde(default)]
    pub dropping_point: Option<String>,
    pub status: BookingStatus,
    pub total_fare: u32,
    #[serde(with = "server_time")]
    pub created_at: Timestamp,
    #[serde(with = "server_time")]
    pub updated_at: Timestamp,
}

/// Body of a booking creation request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BookingCreateRequest {
    pub customer_name: String,
    pub customer_email: String,
    pub customer_phone: String,
    pub from_district: String,
    pub to_district: String,
    pub provider: String,
    pub travel_date: Date,
    pub num_seats: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dropping_point: Option<String>,
}

impl BookingCreateRequest {
    /// Assemble the payload from the customer identity and a trip draft.
    ///
    /// Returns `None` while the draft has no travel date; callers validate
    /// the draft before getting here.
    pub fn from_parts(customer: &CustomerInfo, draft: &BookingDraft) -> Option<Self> {
        Some(Self {
            customer_name: customer.name.clone(),
            customer_email: customer.email.clone(),
            customer_phone: customer.phone.clone(),
            from_district: draft.from_district.clone(),
            to_district: draft.to_district.clone(),
            provider: draft.provider.clone(),
            travel_date: draft.travel_date?,
            num_seats: draft.num_seats(),
            dropping_point: draft.dropping_point.clone(),
        })
    }
}

/// Bookings matching a lookup, newest first.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct BookingList {
    pub bookings: Vec<Booking>,
    pub total_bookings: u32,
}

/// Lenient (de)serialization for service timestamps.
///
/// The service emits either RFC 3339 timestamps or naive ISO datetimes; the
/// latter are read as UTC.
pub(crate) mod server_time {
    use jiff::{civil::DateTime, tz::TimeZone, Timestamp};
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(ts: &Timestamp, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(ts)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timestamp, D::Error> {
        let raw = String::deserialize(deserializer)?;
        parse(&raw).map_err(D::Error::custom)
    }

    pub fn parse(raw: &str) -> Result<Timestamp, jiff::Error> {
        if let Ok(ts) = raw.parse::<Timestamp>() {
            return Ok(ts);
        }
        let civil: DateTime = raw.parse()?;
        Ok(civil.to_zoned(TimeZone::UTC)?.timestamp())
    }
}
