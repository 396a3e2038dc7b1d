//! Route search and the provider directory.
//!
//! Thin wrappers over the gateway that add the client-side guards: an
//! incomplete search is answered locally without a request.

use log::debug;

use crate::{
    error::Result,
    gateway::BookingGateway,
    models::{BusProvider, ProviderList, Route, RouteQuery, RouteSearch},
};

/// Search routes between two districts.
///
/// Returns an empty result without contacting the service when either
/// district is blank.
pub async fn search_routes(gateway: &dyn BookingGateway, query: &RouteQuery) -> Result<RouteSearch> {
    if !query.is_complete() {
        debug!("Skipping route search with incomplete query");
        return Ok(RouteSearch::default());
    }

    gateway.search_routes(query).await
}

/// Find the route a booking would travel on, used as fare context.
pub async fn find_route(
    gateway: &dyn BookingGateway,
    from_district: &str,
    to_district: &str,
    provider: &str,
) -> Result<Option<Route>> {
    let query = RouteQuery::new(from_district, to_district).with_provider(Some(provider.to_string()));
    let found = search_routes(gateway, &query).await?;

    Ok(found
        .routes
        .into_iter()
        .find(|route| route.provider.eq_ignore_ascii_case(provider)))
}

/// List providers, optionally only those serving `district`.
pub async fn providers(gateway: &dyn BookingGateway, district: Option<&str>) -> Result<ProviderList> {
    let district = district.map(str::trim).filter(|d| !d.is_empty());
    gateway.providers(district).await
}

pub async fn provider(gateway: &dyn BookingGateway, name: &str) -> Result<BusProvider> {
    gateway.provider(name.trim()).await
}
