//! Booking list queries.

use crate::error::{BookingError, Result};

use super::CustomerInfo;

/// A booking list query by exactly one customer identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum BookingLookup {
    Email(String),
    Phone(String),
}

impl BookingLookup {
    /// Build a lookup from raw form input.
    ///
    /// Input is trimmed. Returns `Ok(None)` when both fields are empty, which
    /// callers treat as "no query" and never send. Supplying both is an input
    /// error because the service filters on one identifier at a time.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use busline_core::models::BookingLookup;
    ///
    /// let lookup = BookingLookup::from_input(Some(" a@b.com "), None)?;
    /// assert_eq!(lookup, Some(BookingLookup::Email("a@b.com".to_string())));
    ///
    /// assert_eq!(BookingLookup::from_input(Some("  "), None)?, None);
    /// assert!(BookingLookup::from_input(Some("a@b.com"), Some("+8801700000000")).is_err());
    /// # Ok::<(), busline_core::BookingError>(())
    /// ```
    pub fn from_input(email: Option<&str>, phone: Option<&str>) -> Result<Option<Self>> {
        let email = email.map(str::trim).filter(|e| !e.is_empty());
        let phone = phone.map(str::trim).filter(|p| !p.is_empty());

        match (email, phone) {
            (Some(_), Some(_)) => Err(BookingError::invalid_input("lookup")
                .with_reason("Provide either an email address or a phone number, not both")),
            (Some(email), None) => Ok(Some(Self::Email(email.to_string()))),
            (None, Some(phone)) => Ok(Some(Self::Phone(phone.to_string()))),
            (None, None) => Ok(None),
        }
    }

    /// Lookups that would list this customer's bookings.
    pub fn for_customer(customer: &CustomerInfo) -> Vec<Self> {
        let mut keys = Vec::with_capacity(2);
        if !customer.email.is_empty() {
            keys.push(Self::Email(customer.email.clone()));
        }
        if !customer.phone.is_empty() {
            keys.push(Self::Phone(customer.phone.clone()));
        }
        keys
    }

    /// Query string pair understood by the booking service.
    pub fn query_pair(&self) -> (&'static str, &str) {
        match self {
            Self::Email(email) => ("customer_email", email),
            Self::Phone(phone) => ("customer_phone", phone),
        }
    }

    /// Human label for the identifier kind.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Email(_) => "email",
            Self::Phone(_) => "phone",
        }
    }
}
