//! Short-lived cache of booking list results.

use dashmap::DashMap;
use jiff::{SignedDuration, Timestamp};
use log::debug;

use crate::models::{BookingList, BookingLookup, CustomerInfo};

/// How long a cached listing is served without asking the service again.
pub const FRESHNESS: SignedDuration = SignedDuration::from_secs(120);

/// Booking listings keyed by lookup.
///
/// Shared between the wizard, which invalidates after a booking is created,
/// and the bookings browser, which reads and refreshes it.
#[derive(Debug)]
pub struct BookingCache {
    entries: DashMap<BookingLookup, (Timestamp, BookingList)>,
    freshness: SignedDuration,
}

impl Default for BookingCache {
    fn default() -> Self {
        Self::new()
    }
}

impl BookingCache {
    pub fn new() -> Self {
        Self::with_freshness(FRESHNESS)
    }

    /// Cache with a custom freshness window.
    pub fn with_freshness(freshness: SignedDuration) -> Self {
        Self {
            entries: DashMap::new(),
            freshness,
        }
    }

    /// Cached listing for `lookup` if it is still fresh.
    pub fn get_fresh(&self, lookup: &BookingLookup) -> Option<BookingList> {
        let entry = self.entries.get(lookup)?;
        let (stored_at, list) = entry.value();

        if Timestamp::now().duration_since(*stored_at) < self.freshness {
            debug!("Booking cache hit for {} lookup", lookup.kind());
            Some(list.clone())
        } else {
            None
        }
    }

    pub fn put(&self, lookup: BookingLookup, list: BookingList) {
        self.entries.insert(lookup, (Timestamp::now(), list));
    }

    pub fn invalidate(&self, lookup: &BookingLookup) {
        self.entries.remove(lookup);
    }

    /// Drop every listing that could include this customer's bookings.
    pub fn invalidate_customer(&self, customer: &CustomerInfo) {
        for lookup in BookingLookup::for_customer(customer) {
            self.invalidate(&lookup);
        }
    }

    pub fn clear(&self) {
        self.entries.clear();
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn email(value: &str) -> BookingLookup {
        BookingLookup::Email(value.to_string())
    }

    #[test]
    fn test_fresh_entry_is_served() {
        let cache = BookingCache::new();
        cache.put(email("a@example.com"), BookingList::default());

        assert!(cache.get_fresh(&email("a@example.com")).is_some());
        assert!(cache.get_fresh(&email("b@example.com")).is_none());
    }

    #[test]
    fn test_stale_entry_is_not_served() {
        let cache = BookingCache::with_freshness(SignedDuration::ZERO);
        cache.put(email("a@example.com"), BookingList::default());

        assert!(cache.get_fresh(&email("a@example.com")).is_none());
    }

    #[test]
    fn test_invalidate_customer_drops_both_keys() {
        let cache = BookingCache::new();
        let customer = CustomerInfo::new("Rahim", "rahim@example.com", "+8801700000000");
        cache.put(email("rahim@example.com"), BookingList::default());
        cache.put(
            BookingLookup::Phone("+8801700000000".to_string()),
            BookingList::default(),
        );
        cache.put(email("other@example.com"), BookingList::default());

        cache.invalidate_customer(&customer);
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }
}
