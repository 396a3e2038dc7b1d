//! Core library for the busline bus-ticket booking client.
//!
//! This crate holds everything between the user and the booking service:
//! the booking wizard and its fare calculation, the bookings page with its
//! lookup cache and guarded cancellation, the travel assistant chat, and the
//! small amount of state that persists between runs.
//!
//! # Architecture
//!
//! - **Models** ([`models`]): wire records and client-side form state
//! - **Gateway** ([`gateway`]): the [`BookingGateway`] trait with HTTP and
//!   in-memory implementations
//! - **Controllers** ([`wizard`], [`browser`], [`chat`], [`catalog`]): the
//!   flows a front end drives
//! - **Store** ([`store`]): key-scoped persistence of the customer identity
//!   and chat history
//! - **Display** ([`display`]): markdown formatting and user notices
//!
//! # Quick Start
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use busline_core::{
//!     models::{CustomerInfo, DraftUpdate, DroppingPoint, Route},
//!     BookingCache, CustomerProfile, InMemoryGateway, MemoryStateStore, Wizard, WizardStep,
//! };
//! use jiff::civil::date;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
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
//! let gateway = Arc::new(InMemoryGateway::new().with_routes(vec![route.clone()]));
//! let profile = CustomerProfile::open(Arc::new(MemoryStateStore::new())).await;
//! let mut wizard = Wizard::new(profile, gateway, Arc::new(BookingCache::new())).with_route(route);
//!
//! wizard.set_customer_form(CustomerInfo::new("Rahim", "rahim@example.com", "+8801700000000"));
//! wizard.advance().await?;
//!
//! wizard.update_draft(DraftUpdate {
//!     travel_date: Some(date(2026, 11, 2)),
//!     num_seats: Some(2),
//!     dropping_point: Some("Kadamtoli".to_string()),
//!     ..DraftUpdate::default()
//! });
//! assert_eq!(wizard.fare(), 1000);
//! assert_eq!(wizard.advance().await?, WizardStep::Confirm);
//!
//! let booking = wizard.submit().await?.expect("submitted");
//! println!("{}", booking);
//! # Ok(())
//! # }
//! ```

pub mod browser;
pub mod cache;
pub mod catalog;
pub mod chat;
pub mod display;
pub mod error;
pub mod fare;
pub mod gateway;
pub mod models;
pub mod params;
pub mod profile;
pub mod store;
pub mod view;
pub mod wizard;

// Re-export commonly used types
pub use browser::BookingsBrowser;
pub use cache::BookingCache;
pub use chat::ChatSession;
pub use display::{Bookings, BookingSummary, CancelResult, CreateResult, Notice, Routes, Severity};
pub use error::{BookingError, Result};
pub use fare::compute_fare;
pub use gateway::{BookingGateway, GatewayConfig, HttpGateway, InMemoryGateway};
pub use models::{Booking, BookingDraft, BookingLookup, BookingStatus, CustomerInfo, Route};
pub use params::{CancelBooking, FindBookings, Id, ListProviders, SearchRoutes, TripDetails};
pub use profile::CustomerProfile;
pub use store::{MemoryStateStore, SqliteStateStore, StateStore, StoreBuilder};
pub use view::View;
pub use wizard::{Wizard, WizardStep};
