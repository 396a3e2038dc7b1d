//! HTTP implementation of the booking gateway.

use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::{Client, Method, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{BookingGateway, GatewayConfig};
use crate::{
    error::{BookingError, Result},
    models::{
        Booking, BookingCreateRequest, BookingList, BookingLookup, BusProvider, ChatReply,
        ChatRequest, ProviderList, RouteQuery, RouteSearch,
    },
};

/// Gateway talking JSON over HTTP to the booking service.
#[derive(Debug, Clone)]
pub struct HttpGateway {
    client: Client,
    base_url: Url,
    token: Option<String>,
}

impl HttpGateway {
    /// Create a gateway from configuration.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Configuration` if the base URL is not an
    /// absolute http(s) URL, `BookingError::Transport` if the HTTP client
    /// cannot be built.
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let base_url = Url::parse(config.base_url.trim_end_matches('/'))
            .ok()
            .filter(|url| !url.cannot_be_a_base())
            .ok_or_else(|| BookingError::Configuration {
                message: format!("Invalid booking service URL '{}'", config.base_url),
            })?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(Self {
            client,
            base_url,
            token: config.token.clone(),
        })
    }

    pub fn base_url(&self) -> &str {
        self.base_url.as_str().trim_end_matches('/')
    }

    /// Endpoint URL for `segments` below the base URL. Each segment is
    /// percent-encoded, so names may contain `/`, `?` or `#`.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.endpoint(segments);
        debug!("{method} {url}");

        let request = self.client.request(method, url);
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request.send().await?;
        Self::handle_response(response).await
    }

    /// Map the HTTP status onto the error taxonomy, or decode the body.
    async fn handle_response<T: DeserializeOwned>(response: reqwest::Response) -> Result<T> {
        let status = response.status();

        if !status.is_success() {
            let text = response.text().await?;
            let detail = error_detail(&text).unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("Request failed")
                    .to_string()
            });

            return Err(match status {
                StatusCode::UNAUTHORIZED => BookingError::Unauthorized,
                StatusCode::NOT_FOUND => BookingError::NotFound { detail },
                StatusCode::BAD_REQUEST | StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => {
                    BookingError::Rejected {
                        status: status.as_u16(),
                        detail,
                    }
                }
                _ => BookingError::Server {
                    status: status.as_u16(),
                    detail,
                },
            });
        }

        let body = response.bytes().await?;
        let body: &[u8] = if body.is_empty() { b"null" } else { &body };
        Ok(serde_json::from_slice(body)?)
    }
}

/// Pull a human-readable message out of an error body.
///
/// Understands `{"detail": "..."}` and the list form used for field
/// validation errors (`{"detail": [{"msg": "..."}, ...]}`). Plain-text bodies
/// are passed through.
fn error_detail(body: &str) -> Option<String> {
    let body = body.trim();
    if body.is_empty() {
        return None;
    }

    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return Some(body.to_string());
    };

    match value.get("detail")? {
        Value::String(detail) => Some(detail.clone()),
        Value::Array(items) => {
            let messages: Vec<&str> = items
                .iter()
                .filter_map(|item| item.get("msg").and_then(Value::as_str))
                .collect();
            (!messages.is_empty()).then(|| messages.join("; "))
        }
        other => Some(other.to_string()),
    }
}

#[async_trait]
impl BookingGateway for HttpGateway {
    async fn search_routes(&self, query: &RouteQuery) -> Result<RouteSearch> {
        self.send(self.request(Method::GET, &["buses", "search"]).query(query))
            .await
    }

    async fn providers(&self, district: Option<&str>) -> Result<ProviderList> {
        let mut request = self.request(Method::GET, &["buses", "providers"]);
        if let Some(district) = district {
            request = request.query(&[("district", district)]);
        }
        self.send(request).await
    }

    async fn provider(&self, name: &str) -> Result<BusProvider> {
        self.send(self.request(Method::GET, &["buses", "providers", name]))
            .await
    }

    async fn create_booking(&self, request: &BookingCreateRequest) -> Result<Booking> {
        self.send(self.request(Method::POST, &["bookings"]).json(request))
            .await
    }

    async fn list_bookings(&self, lookup: &BookingLookup) -> Result<BookingList> {
        self.send(
            self.request(Method::GET, &["bookings"])
                .query(&[lookup.query_pair()]),
        )
        .await
    }

    async fn get_booking(&self, id: u64) -> Result<Booking> {
        self.send(self.request(Method::GET, &["bookings", &id.to_string()]))
            .await
    }

    async fn cancel_booking(&self, id: u64) -> Result<Booking> {
        let ack: Value = self
            .send(self.request(Method::DELETE, &["bookings", &id.to_string()]))
            .await?;

        // Some deployments answer with an acknowledgement message instead of
        // the record; read it back so callers always see the new status.
        match serde_json::from_value::<Booking>(ack) {
            Ok(booking) => Ok(booking),
            Err(_) => self.get_booking(id).await,
        }
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply> {
        self.send(self.request(Method::POST, &["chat"]).json(request))
            .await
    }
}
