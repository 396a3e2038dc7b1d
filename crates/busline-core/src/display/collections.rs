//! Collection wrapper types for displaying groups of domain objects.
//!
//! Each wrapper handles the empty case with a one-line message and otherwise
//! defers to the element's own `Display`.

use std::fmt;

use crate::models::{Booking, BookingList, BusProvider, ChatMessage, ProviderList, Route, RouteSearch};

/// Newtype wrapper for displaying route search results.
///
/// # Examples
///
/// ```rust
/// use busline_core::display::Routes;
///
/// let routes = Routes(vec![]);
/// assert_eq!(routes.to_string(), "No routes found.\n");
/// ```
pub struct Routes(pub Vec<Route>);

impl Routes {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<RouteSearch> for Routes {
    fn from(search: RouteSearch) -> Self {
        Self(search.routes)
    }
}

impl fmt::Display for Routes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No routes found.");
        }

        writeln!(f, "Found {} route(s).", self.0.len())?;
        writeln!(f)?;
        for route in &self.0 {
            write!(f, "{route}")?;
        }
        Ok(())
    }
}

/// Newtype wrapper for displaying a booking listing, newest first.
pub struct Bookings(pub Vec<Booking>);

impl Bookings {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Booking> {
        self.0.iter()
    }
}

impl From<BookingList> for Bookings {
    fn from(list: BookingList) -> Self {
        Self(list.bookings)
    }
}

impl<'a> IntoIterator for &'a Bookings {
    type Item = &'a Booking;
    type IntoIter = std::slice::Iter<'a, Booking>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for Bookings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No bookings found.")
        } else {
            for booking in &self.0 {
                write!(f, "{booking}")?;
            }
            Ok(())
        }
    }
}

pub struct Providers(pub Vec<BusProvider>);

impl From<ProviderList> for Providers {
    fn from(list: ProviderList) -> Self {
        Self(list.providers)
    }
}

impl fmt::Display for Providers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No providers found.")
        } else {
            for provider in &self.0 {
                write!(f, "{provider}")?;
            }
            Ok(())
        }
    }
}

/// A chat conversation rendered oldest message first.
pub struct Transcript<'a>(pub &'a [ChatMessage]);

impl fmt::Display for Transcript<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            writeln!(f, "No messages yet.")
        } else {
            for message in self.0 {
                write!(f, "{message}")?;
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ChatRole;

    #[test]
    fn test_empty_collections() {
        assert_eq!(Bookings(vec![]).to_string(), "No bookings found.\n");
        assert_eq!(Providers(vec![]).to_string(), "No providers found.\n");
        assert_eq!(Transcript(&[]).to_string(), "No messages yet.\n");
    }

    #[test]
    fn test_transcript_order() {
        let messages = vec![
            ChatMessage::now(ChatRole::User, "Any bus to Sylhet?"),
            ChatMessage::now(ChatRole::Assistant, "Hanif runs daily."),
        ];

        let output = Transcript(&messages).to_string();
        let user = output.find("**You**").unwrap();
        let assistant = output.find("**Assistant**").unwrap();
        assert!(user < assistant);
    }
}
