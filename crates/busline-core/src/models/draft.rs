//! The in-progress booking form.

use jiff::civil::Date;

use super::Route;

/// Fewest seats a single booking may hold.
pub const MIN_SEATS: u32 = 1;

/// Most seats a single booking may hold.
pub const MAX_SEATS: u32 = 10;

/// Clamp a requested seat count into `MIN_SEATS..=MAX_SEATS`.
///
/// Out-of-range input is pulled to the nearest bound rather than rejected.
///
/// # Examples
///
/// ```rust
/// use busline_core::models::clamp_seats;
///
/// assert_eq!(clamp_seats(0), 1);
/// assert_eq!(clamp_seats(-1), 1);
/// assert_eq!(clamp_seats(4), 4);
/// assert_eq!(clamp_seats(11), 10);
/// ```
pub fn clamp_seats(requested: i64) -> u32 {
    requested.clamp(i64::from(MIN_SEATS), i64::from(MAX_SEATS)) as u32
}

/// Trip details collected by the second wizard step.
///
/// The seat count is private so every write goes through [`clamp_seats`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingDraft {
    pub from_district: String,
    pub to_district: String,
    pub provider: String,
    pub travel_date: Option<Date>,
    num_seats: u32,
    pub dropping_point: Option<String>,
}

impl Default for BookingDraft {
    fn default() -> Self {
        Self {
            from_district: String::new(),
            to_district: String::new(),
            provider: String::new(),
            travel_date: None,
            num_seats: MIN_SEATS,
            dropping_point: None,
        }
    }
}

impl BookingDraft {
    /// Start a draft pre-filled from a selected route.
    pub fn from_route(route: &Route) -> Self {
        Self {
            from_district: route.from_district.clone(),
            to_district: route.to_district.clone(),
            provider: route.provider.clone(),
            ..Self::default()
        }
    }

    pub fn num_seats(&self) -> u32 {
        self.num_seats
    }

    /// Write the seat count, clamping it into range. Returns the stored value.
    pub fn set_num_seats(&mut self, requested: i64) -> u32 {
        self.num_seats = clamp_seats(requested);
        self.num_seats
    }

    /// True when nothing has been entered yet.
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Names of the trip fields that still block the Confirm step.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.from_district.is_empty() {
            missing.push("from_district");
        }
        if self.to_district.is_empty() {
            missing.push("to_district");
        }
        if self.provider.is_empty() {
            missing.push("provider");
        }
        if self.travel_date.is_none() {
            missing.push("travel_date");
        }
        if self.num_seats == 0 {
            missing.push("num_seats");
        }
        missing
    }

    /// Merge a partial update into the draft, field by field.
    ///
    /// Changing the destination invalidates any dropping point chosen for the
    /// old destination, unless the same update picks a new one.
    pub fn apply(&mut self, update: DraftUpdate) {
        if let Some(from) = update.from_district {
            self.from_district = from;
        }
        if let Some(to) = update.to_district {
            if to != self.to_district {
                self.dropping_point = None;
            }
            self.to_district = to;
        }
        if let Some(provider) = update.provider {
            self.provider = provider;
        }
        if let Some(date) = update.travel_date {
            self.travel_date = Some(date);
        }
        if let Some(seats) = update.num_seats {
            self.set_num_seats(seats);
        }
        if let Some(point) = update.dropping_point {
            self.dropping_point = Some(point).filter(|p| !p.is_empty());
        }
    }
}

/// Partial draft update; `None` leaves a field untouched.
///
/// An empty `dropping_point` clears the selection.
#[derive(Debug, Clone, Default)]
pub struct DraftUpdate {
    pub from_district: Option<String>,
    pub to_district: Option<String>,
    pub provider: Option<String>,
    pub travel_date: Option<Date>,
    pub num_seats: Option<i64>,
    pub dropping_point: Option<String>,
}
