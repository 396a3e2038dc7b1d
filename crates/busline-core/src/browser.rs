//! Listing and cancelling a customer's bookings.
//!
//! The [`BookingsBrowser`] backs the bookings page: look bookings up by
//! email or phone (never both), serve repeat lookups from the shared
//! [`BookingCache`], and cancel confirmed bookings behind an explicit second
//! confirmation. Nothing is changed locally on a failed cancellation; the
//! list only moves when the service says so.

use std::sync::Arc;

use log::{debug, info, warn};

use crate::{
    cache::BookingCache,
    display::Notice,
    error::{BookingError, Result},
    gateway::BookingGateway,
    models::{Booking, BookingList, BookingLookup},
    params::CancelBooking,
};

const CANCEL_FAILED: &str = "Failed to cancel booking";
const LOAD_FAILED: &str = "Failed to load bookings";

/// Controller for the bookings page.
pub struct BookingsBrowser {
    gateway: Arc<dyn BookingGateway>,
    cache: Arc<BookingCache>,
    lookup: Option<BookingLookup>,
    results: Option<BookingList>,
    pending_cancel: Option<u64>,
    notice: Option<Notice>,
}

impl BookingsBrowser {
    pub fn new(gateway: Arc<dyn BookingGateway>, cache: Arc<BookingCache>) -> Self {
        Self {
            gateway,
            cache,
            lookup: None,
            results: None,
            pending_cancel: None,
            notice: None,
        }
    }

    /// The lookup the current results answer.
    pub fn lookup(&self) -> Option<&BookingLookup> {
        self.lookup.as_ref()
    }

    pub fn results(&self) -> Option<&BookingList> {
        self.results.as_ref()
    }

    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// Booking awaiting the second confirmation, if any.
    pub fn pending_cancel(&self) -> Option<u64> {
        self.pending_cancel
    }

    /// Look bookings up from raw form input.
    ///
    /// Blank input clears the results without a request. Supplying both an
    /// email and a phone number is refused.
    pub async fn search(
        &mut self,
        email: Option<&str>,
        phone: Option<&str>,
    ) -> Result<Option<&BookingList>> {
        let lookup = match BookingLookup::from_input(email, phone) {
            Ok(lookup) => lookup,
            Err(e) => {
                self.notice = Some(e.notice(LOAD_FAILED));
                return Err(e);
            }
        };

        match lookup {
            Some(lookup) => self.load(lookup).await.map(Some),
            None => {
                self.lookup = None;
                self.results = None;
                self.notice = None;
                Ok(None)
            }
        }
    }

    /// Show the listing for `lookup`, from cache when fresh.
    pub async fn load(&mut self, lookup: BookingLookup) -> Result<&BookingList> {
        let list = match self.cache.get_fresh(&lookup) {
            Some(list) => list,
            None => self.fetch(&lookup).await?,
        };

        self.notice = None;
        self.lookup = Some(lookup);
        Ok(self.results.insert(list))
    }

    /// Re-query the current lookup, bypassing the cache.
    pub async fn refresh(&mut self) -> Result<Option<&BookingList>> {
        let Some(lookup) = self.lookup.clone() else {
            return Ok(None);
        };

        self.cache.invalidate(&lookup);
        self.load(lookup).await.map(Some)
    }

    async fn fetch(&mut self, lookup: &BookingLookup) -> Result<BookingList> {
        debug!("Fetching bookings by {}", lookup.kind());

        match self.gateway.list_bookings(lookup).await {
            Ok(list) => {
                self.cache.put(lookup.clone(), list.clone());
                Ok(list)
            }
            Err(e) => {
                self.notice = Some(e.notice(LOAD_FAILED));
                Err(e)
            }
        }
    }

    /// Fetch a single booking.
    pub async fn show(&self, id: u64) -> Result<Booking> {
        self.gateway.get_booking(id).await
    }

    /// Ask to cancel a booking. Opens the confirmation gate only for
    /// bookings the service would accept a cancellation for.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::NotCancellable` for bookings that are not
    /// confirmed; nothing is sent to the service.
    pub async fn request_cancel(&mut self, id: u64) -> Result<()> {
        self.pending_cancel = None;

        if let Err(e) = self.ensure_cancellable(id).await {
            self.notice = Some(e.notice(CANCEL_FAILED));
            return Err(e);
        }

        self.pending_cancel = Some(id);
        Ok(())
    }

    /// Close the confirmation gate without cancelling.
    pub fn dismiss_cancel(&mut self) {
        self.pending_cancel = None;
    }

    /// Cancel the booking the gate was opened for. `Ok(None)` when the gate
    /// is closed.
    pub async fn confirm_cancel(&mut self) -> Result<Option<Booking>> {
        let Some(id) = self.pending_cancel.take() else {
            return Ok(None);
        };

        self.cancel(id).await.map(Some)
    }

    /// Cancel in one call, for interfaces that collect the confirmation up
    /// front.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::InvalidInput` when `confirmed` is not set and
    /// `BookingError::NotCancellable` for bookings that are not confirmed.
    /// Neither sends a cancellation.
    pub async fn cancel_booking(&mut self, params: &CancelBooking) -> Result<Booking> {
        if !params.confirmed {
            return Err(BookingError::invalid_input("confirmed")
                .with_reason("Cancellation must be confirmed before it is sent"));
        }

        self.pending_cancel = None;
        if let Err(e) = self.ensure_cancellable(params.id).await {
            self.notice = Some(e.notice(CANCEL_FAILED));
            return Err(e);
        }

        self.cancel(params.id).await
    }

    async fn ensure_cancellable(&self, id: u64) -> Result<()> {
        let listed = self
            .results
            .as_ref()
            .and_then(|list| list.bookings.iter().find(|b| b.id == id))
            .map(|b| b.status);

        let status = match listed {
            Some(status) => status,
            None => self.gateway.get_booking(id).await?.status,
        };

        if status.is_cancellable() {
            Ok(())
        } else {
            Err(BookingError::NotCancellable { id, status })
        }
    }

    async fn cancel(&mut self, id: u64) -> Result<Booking> {
        let booking = match self.gateway.cancel_booking(id).await {
            Ok(booking) => booking,
            Err(e) => {
                warn!("Cancelling booking #{id} failed: {e}");
                self.notice = Some(e.notice(CANCEL_FAILED));
                return Err(e);
            }
        };

        info!("Booking #{id} cancelled");
        self.cache.invalidate(&BookingLookup::Email(booking.customer_email.clone()));
        self.cache.invalidate(&BookingLookup::Phone(booking.customer_phone.clone()));

        if let Err(e) = self.refresh().await {
            warn!("Reloading bookings after cancellation failed: {e}");
        }
        self.notice = Some(Notice::success("Booking cancelled successfully"));

        Ok(booking)
    }
}
