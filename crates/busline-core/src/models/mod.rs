//! Data models for routes, drafts and bookings.
//!
//! This module contains the domain records exchanged with the booking
//! service and the client-side form state that precedes them. Display
//! implementations live in [`crate::display::models`] so the records stay
//! free of presentation logic.
//!
//! ## Ownership
//!
//! - **Service-owned**: [`Route`], [`Booking`], [`BusProvider`] and the chat
//!   reply are read-only here; they are whatever the service last said.
//! - **Client-owned**: [`CustomerInfo`] (persisted) and [`BookingDraft`]
//!   (ephemeral) are mutated by the booking wizard only.
//!
//! # Examples
//!
//! ```rust
//! use busline_core::models::{BookingDraft, DroppingPoint, Route};
//!
//! let route = Route {
//!     provider: "Hanif".to_string(),
//!     from_district: "Dhaka".to_string(),
//!     to_district: "Sylhet".to_string(),
//!     min_price: Some(500),
//!     max_price: Some(700),
//!     dropping_points: vec![DroppingPoint::new("Kadamtoli", 500)],
//!     description: String::new(),
//! };
//!
//! let mut draft = BookingDraft::from_route(&route);
//! assert_eq!(draft.provider, "Hanif");
//! assert_eq!(draft.set_num_seats(12), 10);
//! ```

pub mod booking;
pub mod chat;
pub mod customer;
pub mod draft;
pub mod lookup;
pub mod route;
pub mod status;


pub use booking::{Booking, BookingCreateRequest, BookingList};
pub use chat::{ChatHistory, ChatMessage, ChatReply, ChatRequest, ChatRole};
pub use customer::CustomerInfo;
pub use draft::{clamp_seats, BookingDraft, DraftUpdate, MAX_SEATS, MIN_SEATS};
pub use lookup::BookingLookup;
pub use route::{BusProvider, DroppingPoint, ProviderList, Route, RouteQuery, RouteSearch};
pub use status::BookingStatus;
