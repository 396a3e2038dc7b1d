//! Boundary to the remote booking service.
//!
//! Everything this crate needs from the outside world goes through the
//! [`BookingGateway`] trait: route search, the provider directory, booking
//! create/list/get/cancel, and the chat assistant. Each call is a single-shot
//! request; nothing here retries, and a request once sent runs to completion.
//!
//! ```text
//! ┌──────────────┐    ┌──────────────────┐    ┌──────────────────┐
//! │ Wizard /     │    │  BookingGateway  │    │ HttpGateway      │
//! │ Browser /    │───▶│     (trait)      │───▶│ InMemoryGateway  │
//! │ ChatSession  │    │                  │    │                  │
//! └──────────────┘    └──────────────────┘    └──────────────────┘
//! ```

use async_trait::async_trait;

use crate::{
    error::Result,
    models::{
        Booking, BookingCreateRequest, BookingList, BookingLookup, BusProvider, ChatReply,
        ChatRequest, ProviderList, RouteQuery, RouteSearch,
    },
};

pub mod config;
pub mod http;
pub mod memory;

pub use config::{GatewayConfig, DEFAULT_API_URL};
pub use http::HttpGateway;
pub use memory::{Fault, InMemoryGateway};

/// Remote operations consumed by the booking flow.
#[async_trait]
pub trait BookingGateway: Send + Sync {
    /// Routes between two districts, in the service's order.
    async fn search_routes(&self, query: &RouteQuery) -> Result<RouteSearch>;

    /// Provider directory, optionally limited to one district.
    async fn providers(&self, district: Option<&str>) -> Result<ProviderList>;

    /// Details of a single provider.
    async fn provider(&self, name: &str) -> Result<BusProvider>;

    /// Create a booking; rejections carry the service's detail message.
    async fn create_booking(&self, request: &BookingCreateRequest) -> Result<Booking>;

    /// Bookings matching exactly one customer identifier.
    async fn list_bookings(&self, lookup: &BookingLookup) -> Result<BookingList>;

    async fn get_booking(&self, id: u64) -> Result<Booking>;

    /// Cancel a booking and return the updated record.
    async fn cancel_booking(&self, id: u64) -> Result<Booking>;

    /// Send one user turn to the chat assistant.
    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply>;
}
