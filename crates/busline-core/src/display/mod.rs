//! Display formatting and user-facing result types.
//!
//! Domain models implement `Display` directly (see [`models`]); this module
//! adds newtype wrappers for collections and operation outcomes, plus the
//! [`Notice`] type used to report what happened to the user. Everything
//! renders as markdown for the terminal renderer.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  Domain Models  │    │ Wrappers &      │    │   Formatted     │
//! │ (Booking, Route)│───▶│ Notices         │───▶│    Output       │
//! │                 │    │                 │    │   (Terminal)    │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`collections`]: Routes, Bookings, Providers, Transcript
//! - [`results`]: CreateResult, CancelResult, BookingSummary
//! - [`notice`]: Notice and Severity
//! - [`datetime`]: local time formatting
//! - [`models`]: Display implementations for domain models
//!
//! # Examples
//!
//! ```rust
//! use busline_core::display::Notice;
//!
//! let notice = Notice::error("Failed to cancel booking");
//! print!("{notice}");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod notice;
pub mod results;

pub use collections::{Bookings, Providers, Routes, Transcript};
pub use datetime::LocalDateTime;
pub use models::Taka;
pub use notice::{Notice, Severity};
pub use results::{BookingSummary, CancelResult, CreateResult};
