//! Route and provider records supplied by the search service.

use serde::{Deserialize, Serialize};

/// A named disembarkation location with its own per-seat price.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DroppingPoint {
    pub name: String,
    pub price: u32,
}

impl DroppingPoint {
    pub fn new(name: impl Into<String>, price: u32) -> Self {
        Self {
            name: name.into(),
            price,
        }
    }
}

/// One provider's service between two districts.
///
/// Routes are read-only for this crate: they come back from a search and are
/// used as pre-fill and fare context for the booking wizard.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Route {
    pub provider: String,
    pub from_district: String,
    pub to_district: String,
    /// Cheapest per-seat fare on the route
    #[serde(default)]
    pub min_price: Option<u32>,
    /// Most expensive per-seat fare on the route
    #[serde(default)]
    pub max_price: Option<u32>,
    /// Dropping points in the order the service lists them
    #[serde(default)]
    pub dropping_points: Vec<DroppingPoint>,
    #[serde(default)]
    pub description: String,
}

impl Route {
    /// Look up a dropping point by exact name.
    pub fn dropping_point(&self, name: &str) -> Option<&DroppingPoint> {
        self.dropping_points.iter().find(|dp| dp.name == name)
    }
}

/// Parameters for a route search.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct RouteQuery {
    pub from_district: String,
    pub to_district: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub provider: Option<String>,
}

impl RouteQuery {
    pub fn new(from_district: impl Into<String>, to_district: impl Into<String>) -> Self {
        Self {
            from_district: from_district.into().trim().to_string(),
            to_district: to_district.into().trim().to_string(),
            provider: None,
        }
    }

    /// Restrict the search to a single provider.
    pub fn with_provider(mut self, provider: Option<String>) -> Self {
        self.provider = provider.filter(|p| !p.trim().is_empty());
        self
    }

    /// A search needs both ends of the trip.
    pub fn is_complete(&self) -> bool {
        !self.from_district.is_empty() && !self.to_district.is_empty()
    }
}

/// Result of a route search.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct RouteSearch {
    pub routes: Vec<Route>,
    pub total_results: u32,
}

/// A bus operator and the districts it serves.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct BusProvider {
    pub name: String,
    #[serde(default)]
    pub coverage_districts: Vec<String>,
    #[serde(default)]
    pub details: Option<String>,
}

/// Provider directory listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProviderList {
    pub providers: Vec<BusProvider>,
    pub total_providers: u32,
}
