//! In-process gateway backed by plain collections.
//!
//! Behaves like the booking service for the parts this crate relies on:
//! created bookings are confirmed, fares follow [`compute_fare`], listings
//! come back newest first, and cancelling twice is refused. Call counters
//! and injected faults make it usable as a test double.

use std::{
    collections::VecDeque,
    sync::atomic::{AtomicU64, AtomicUsize, Ordering},
};

use async_trait::async_trait;
use jiff::Timestamp;
use log::debug;
use tokio::sync::Mutex;

use super::BookingGateway;
use crate::{
    error::{BookingError, Result},
    fare::compute_fare,
    models::{
        Booking, BookingCreateRequest, BookingList, BookingLookup, BookingStatus, BusProvider,
        ChatReply, ChatRequest, ProviderList, Route, RouteQuery, RouteSearch, MAX_SEATS,
        MIN_SEATS,
    },
};

/// A failure to inject into the next gateway call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fault {
    /// The service refuses the request with this detail (422).
    Rejection(String),
    /// The service is unavailable (503).
    Outage,
}

impl From<Fault> for BookingError {
    fn from(fault: Fault) -> Self {
        match fault {
            Fault::Rejection(detail) => BookingError::Rejected {
                status: 422,
                detail,
            },
            Fault::Outage => BookingError::Server {
                status: 503,
                detail: "Service unavailable".to_string(),
            },
        }
    }
}

#[derive(Debug, Default)]
struct Calls {
    search: AtomicUsize,
    create: AtomicUsize,
    list: AtomicUsize,
    get: AtomicUsize,
    cancel: AtomicUsize,
    chat: AtomicUsize,
}

/// Gateway holding routes, providers and bookings in memory.
#[derive(Debug)]
pub struct InMemoryGateway {
    routes: Vec<Route>,
    providers: Vec<BusProvider>,
    bookings: Mutex<Vec<Booking>>,
    faults: Mutex<VecDeque<Fault>>,
    next_id: AtomicU64,
    calls: Calls,
}

impl Default for InMemoryGateway {
    fn default() -> Self {
        Self {
            routes: Vec::new(),
            providers: Vec::new(),
            bookings: Mutex::new(Vec::new()),
            faults: Mutex::new(VecDeque::new()),
            next_id: AtomicU64::new(1),
            calls: Calls::default(),
        }
    }
}

impl InMemoryGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Routes served by searches, in the order given.
    pub fn with_routes(mut self, routes: Vec<Route>) -> Self {
        self.routes = routes;
        self
    }

    pub fn with_providers(mut self, providers: Vec<BusProvider>) -> Self {
        self.providers = providers;
        self
    }

    /// Make the next call fail. Faults queue up and are consumed one per call.
    pub async fn fail_next(&self, fault: Fault) {
        self.faults.lock().await.push_back(fault);
    }

    /// Store a booking as-is, e.g. one in a non-confirmed state.
    pub async fn insert_booking(&self, booking: Booking) {
        self.next_id.fetch_max(booking.id + 1, Ordering::SeqCst);
        self.bookings.lock().await.push(booking);
    }

    /// Snapshot of every stored booking.
    pub async fn bookings(&self) -> Vec<Booking> {
        self.bookings.lock().await.clone()
    }

    pub fn search_calls(&self) -> usize {
        self.calls.search.load(Ordering::SeqCst)
    }

    pub fn create_calls(&self) -> usize {
        self.calls.create.load(Ordering::SeqCst)
    }

    pub fn list_calls(&self) -> usize {
        self.calls.list.load(Ordering::SeqCst)
    }

    pub fn get_calls(&self) -> usize {
        self.calls.get.load(Ordering::SeqCst)
    }

    pub fn cancel_calls(&self) -> usize {
        self.calls.cancel.load(Ordering::SeqCst)
    }

    pub fn chat_calls(&self) -> usize {
        self.calls.chat.load(Ordering::SeqCst)
    }

    async fn take_fault(&self) -> Result<()> {
        match self.faults.lock().await.pop_front() {
            Some(fault) => Err(fault.into()),
            None => Ok(()),
        }
    }

    fn route_for(&self, request: &BookingCreateRequest) -> Option<&Route> {
        self.routes.iter().find(|route| {
            route.provider == request.provider
                && route.from_district == request.from_district
                && route.to_district == request.to_district
        })
    }

    fn not_found() -> BookingError {
        BookingError::NotFound {
            detail: "Booking not found".to_string(),
        }
    }
}

#[async_trait]
impl BookingGateway for InMemoryGateway {
    async fn search_routes(&self, query: &RouteQuery) -> Result<RouteSearch> {
        self.calls.search.fetch_add(1, Ordering::SeqCst);
        self.take_fault().await?;

        let routes: Vec<Route> = self
            .routes
            .iter()
            .filter(|r| r.from_district.eq_ignore_ascii_case(&query.from_district))
            .filter(|r| r.to_district.eq_ignore_ascii_case(&query.to_district))
            .filter(|r| {
                query
                    .provider
                    .as_deref()
                    .map_or(true, |p| r.provider.eq_ignore_ascii_case(p))
            })
            .cloned()
            .collect();

        Ok(RouteSearch {
            total_results: routes.len() as u32,
            routes,
        })
    }

    async fn providers(&self, district: Option<&str>) -> Result<ProviderList> {
        self.take_fault().await?;

        let providers: Vec<BusProvider> = self
            .providers
            .iter()
            .filter(|p| {
                district.map_or(true, |d| {
                    p.coverage_districts
                        .iter()
                        .any(|c| c.eq_ignore_ascii_case(d))
                })
            })
            .cloned()
            .collect();

        Ok(ProviderList {
            total_providers: providers.len() as u32,
            providers,
        })
    }

    async fn provider(&self, name: &str) -> Result<BusProvider> {
        self.take_fault().await?;

        self.providers
            .iter()
            .find(|p| p.name.eq_ignore_ascii_case(name))
            .cloned()
            .ok_or_else(|| BookingError::NotFound {
                detail: format!("Provider '{name}' not found"),
            })
    }

    async fn create_booking(&self, request: &BookingCreateRequest) -> Result<Booking> {
        self.calls.create.fetch_add(1, Ordering::SeqCst);
        self.take_fault().await?;

        if !(MIN_SEATS..=MAX_SEATS).contains(&request.num_seats) {
            return Err(BookingError::Rejected {
                status: 422,
                detail: format!("Number of seats must be between {MIN_SEATS} and {MAX_SEATS}"),
            });
        }

        let now = Timestamp::now();
        let booking = Booking {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            customer_name: request.customer_name.clone(),
            customer_email: request.customer_email.clone(),
            customer_phone: request.customer_phone.clone(),
            from_district: request.from_district.clone(),
            to_district: request.to_district.clone(),
            provider: request.provider.clone(),
            travel_date: request.travel_date,
            num_seats: request.num_seats,
            dropping_point: request.dropping_point.clone(),
            status: BookingStatus::Confirmed,
            total_fare: compute_fare(
                self.route_for(request),
                request.dropping_point.as_deref(),
                request.num_seats,
            ),
            created_at: now,
            updated_at: now,
        };

        debug!("Stored booking #{}", booking.id);
        self.bookings.lock().await.push(booking.clone());
        Ok(booking)
    }

    async fn list_bookings(&self, lookup: &BookingLookup) -> Result<BookingList> {
        self.calls.list.fetch_add(1, Ordering::SeqCst);
        self.take_fault().await?;

        let mut bookings: Vec<Booking> = self
            .bookings
            .lock()
            .await
            .iter()
            .filter(|b| match lookup {
                BookingLookup::Email(email) => &b.customer_email == email,
                BookingLookup::Phone(phone) => &b.customer_phone == phone,
            })
            .cloned()
            .collect();
        bookings.sort_by(|a, b| b.created_at.cmp(&a.created_at).then(b.id.cmp(&a.id)));

        Ok(BookingList {
            total_bookings: bookings.len() as u32,
            bookings,
        })
    }

    async fn get_booking(&self, id: u64) -> Result<Booking> {
        self.calls.get.fetch_add(1, Ordering::SeqCst);
        self.take_fault().await?;

        self.bookings
            .lock()
            .await
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(Self::not_found)
    }

    async fn cancel_booking(&self, id: u64) -> Result<Booking> {
        self.calls.cancel.fetch_add(1, Ordering::SeqCst);
        self.take_fault().await?;

        let mut bookings = self.bookings.lock().await;
        let booking = bookings
            .iter_mut()
            .find(|b| b.id == id)
            .ok_or_else(Self::not_found)?;

        if booking.status == BookingStatus::Cancelled {
            return Err(BookingError::Rejected {
                status: 400,
                detail: "Booking is already cancelled".to_string(),
            });
        }

        booking.status = BookingStatus::Cancelled;
        booking.updated_at = Timestamp::now();
        Ok(booking.clone())
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply> {
        let turn = self.calls.chat.fetch_add(1, Ordering::SeqCst) + 1;
        self.take_fault().await?;

        Ok(ChatReply {
            response: format!("You asked: {}", request.message),
            conversation_id: request
                .conversation_id
                .clone()
                .unwrap_or_else(|| format!("conversation-{turn}")),
            sources: Vec::new(),
        })
    }
}
