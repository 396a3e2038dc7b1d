//! The confirmation shown after a successful submission.

use super::Wizard;
use crate::{
    display::CreateResult,
    models::{Booking, BookingLookup},
    view::View,
};

/// Terminal state of a booking flow.
#[derive(Debug, Clone, PartialEq)]
pub struct Confirmation {
    booking: Booking,
}

impl Confirmation {
    pub(crate) fn new(booking: Booking) -> Self {
        Self { booking }
    }

    pub fn booking(&self) -> &Booking {
        &self.booking
    }

    /// Markdown rendering of the created booking.
    pub fn display(&self) -> CreateResult<&Booking> {
        CreateResult::new(&self.booking)
    }
}

impl Wizard {
    /// Close the confirmation and switch to this customer's bookings.
    ///
    /// Returns `None` when no confirmation is being shown.
    pub fn view_bookings(&mut self) -> Option<View> {
        let confirmation = self.confirmation.take()?;
        self.abandon();

        let booking = confirmation.booking;
        let lookup = if booking.customer_email.is_empty() {
            BookingLookup::Phone(booking.customer_phone)
        } else {
            BookingLookup::Email(booking.customer_email)
        };

        Some(View::Bookings {
            lookup: Some(lookup),
        })
    }

    /// Close the confirmation and start a fresh flow for the same customer.
    ///
    /// Returns false when no confirmation is being shown.
    pub fn book_another(&mut self) -> bool {
        if self.confirmation.is_none() {
            return false;
        }

        self.abandon();
        true
    }
}
