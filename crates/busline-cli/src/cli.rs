//! Command handlers
//!
//! Each handler drives the core the same way a page of the booking front end
//! would, then renders the outcome as markdown.

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use busline_core::{
    catalog,
    display::{Bookings, BookingSummary, CancelResult, CreateResult, Providers, Routes, Transcript},
    models::{BookingLookup, RouteQuery},
    params::{CancelBooking, FindBookings, Id, ListProviders, SearchRoutes},
    BookingCache, BookingGateway, BookingsBrowser, ChatSession, CustomerProfile, Notice,
    StateStore, Wizard,
};
use log::{debug, warn};

use crate::{
    args::{BookArgs, BookingsArgs, CancelArgs, ChatArgs, ProfileCommands, ProviderArgs},
    renderer::TerminalRenderer,
};

pub struct Cli {
    store: Arc<dyn StateStore>,
    gateway: Arc<dyn BookingGateway>,
    cache: Arc<BookingCache>,
    renderer: TerminalRenderer,
}

impl Cli {
    pub fn new(
        store: Arc<dyn StateStore>,
        gateway: Arc<dyn BookingGateway>,
        renderer: TerminalRenderer,
    ) -> Self {
        Self {
            store,
            gateway,
            cache: Arc::new(BookingCache::new()),
            renderer,
        }
    }

    pub async fn search(&self, params: SearchRoutes) -> Result<()> {
        let query = RouteQuery::from(&params);
        let found = catalog::search_routes(self.gateway.as_ref(), &query)
            .await
            .context("Failed to search routes")?;

        let title = format!("# Routes from {} to {}", query.from_district, query.to_district);
        self.renderer
            .render(&format!("{title}\n\n{}", Routes::from(found)))
    }

    pub async fn providers(&self, params: ListProviders) -> Result<()> {
        let list = catalog::providers(self.gateway.as_ref(), params.district.as_deref())
            .await
            .context("Failed to list providers")?;

        let title = match params.district.as_deref() {
            Some(district) => format!("# Providers serving {district}"),
            None => "# Providers".to_string(),
        };
        self.renderer
            .render(&format!("{title}\n\n{}", Providers::from(list)))
    }

    pub async fn provider(&self, args: ProviderArgs) -> Result<()> {
        let provider = catalog::provider(self.gateway.as_ref(), &args.name)
            .await
            .with_context(|| format!("Failed to get provider '{}'", args.name))?;

        self.renderer.render(&provider.to_string())
    }

    pub async fn book(&self, args: BookArgs) -> Result<()> {
        let profile = CustomerProfile::open(Arc::clone(&self.store)).await;
        let form = args.customer(profile.customer());
        let mut wizard = Wizard::new(profile, Arc::clone(&self.gateway), Arc::clone(&self.cache));

        wizard.set_customer_form(form);
        wizard
            .advance()
            .await
            .context("Customer details are incomplete; pass --name, --email and --phone or run `busline profile set`")?;

        let trip = args.trip();
        match catalog::find_route(
            self.gateway.as_ref(),
            &trip.from_district,
            &trip.to_district,
            &trip.provider,
        )
        .await
        {
            Ok(Some(route)) => wizard.prefill(route),
            Ok(None) => debug!("No matching route; fare uses the standard rate"),
            Err(e) => {
                warn!("Route lookup failed: {e}");
                self.renderer.notice(&Notice::warning(
                    "Route details unavailable; the fare shown uses the standard rate",
                ))?;
            }
        }

        wizard.update_draft(trip.into());
        wizard
            .advance()
            .await
            .context("Trip details are incomplete")?;

        let summary = BookingSummary {
            customer: wizard.profile().customer(),
            draft: wizard.draft(),
            fare: wizard.fare(),
        };
        self.renderer.render(&summary.to_string())?;

        if !args.confirm {
            return self
                .renderer
                .notice(&Notice::info("Run again with --confirm to book these seats."));
        }

        let booking = wizard
            .submit()
            .await
            .context("Failed to create booking")?
            .context("Booking was not submitted")?;

        self.renderer.render(&format!("\n{}", CreateResult::new(booking)))
    }

    pub async fn bookings(&self, args: BookingsArgs) -> Result<()> {
        let params = FindBookings::from(&args);
        let mut browser = BookingsBrowser::new(Arc::clone(&self.gateway), Arc::clone(&self.cache));

        let lookup = match BookingLookup::from_input(params.email.as_deref(), params.phone.as_deref())? {
            Some(lookup) => lookup,
            None => {
                let profile = CustomerProfile::open(Arc::clone(&self.store)).await;
                match BookingLookup::for_customer(profile.customer()).into_iter().next() {
                    Some(lookup) => lookup,
                    None => {
                        return self.renderer.notice(&Notice::info(
                            "Enter an email address or phone number to look up bookings.",
                        ))
                    }
                }
            }
        };

        if args.refresh {
            self.cache.invalidate(&lookup);
        }
        let list = browser.load(lookup.clone()).await?.clone();

        let (_, value) = lookup.query_pair();
        debug!("Listed {} booking(s) by {}", list.total_bookings, lookup.kind());
        self.renderer.render(&format!(
            "# Bookings for {value}\n\n{}",
            Bookings::from(list)
        ))
    }

    pub async fn show(&self, params: Id) -> Result<()> {
        let browser = BookingsBrowser::new(Arc::clone(&self.gateway), Arc::clone(&self.cache));
        let booking = browser
            .show(params.id)
            .await
            .with_context(|| format!("Failed to get booking {}", params.id))?;

        self.renderer.render(&booking.to_string())
    }

    pub async fn cancel(&self, args: CancelArgs) -> Result<()> {
        if !args.confirm {
            bail!(
                "Cancelling booking {} needs confirmation. Run again with --confirm.",
                args.id
            );
        }

        let mut browser = BookingsBrowser::new(Arc::clone(&self.gateway), Arc::clone(&self.cache));
        let booking = browser
            .cancel_booking(&CancelBooking::from(args))
            .await
            .context("Failed to cancel booking")?;

        self.renderer.render(&CancelResult::new(booking).to_string())
    }

    pub async fn profile(&self, command: ProfileCommands) -> Result<()> {
        let mut profile = CustomerProfile::open(Arc::clone(&self.store)).await;

        match command {
            ProfileCommands::Show => {}
            ProfileCommands::Set(args) => {
                let merged = args.merge(profile.customer());
                profile.set_customer(merged).await;
                self.renderer.notice(&Notice::success("Profile saved"))?;
            }
            ProfileCommands::Clear => {
                profile.clear().await;
                return self.renderer.notice(&Notice::success("Profile cleared"));
            }
        }

        self.renderer
            .render(&format!("# Profile\n\n{}", profile.customer()))
    }

    pub async fn chat(&self, args: ChatArgs) -> Result<()> {
        let mut session = ChatSession::open(Arc::clone(&self.store)).await;

        if args.clear {
            session.clear().await;
            return self.renderer.notice(&Notice::success("Conversation cleared"));
        }

        let Some(message) = args.message else {
            return self
                .renderer
                .render(&format!("# Conversation\n\n{}", Transcript(session.messages())));
        };

        match session.send(self.gateway.as_ref(), &message).await {
            Ok(Some(reply)) => self.renderer.render(&format!("{}\n", reply.response)),
            Ok(None) => self.renderer.notice(&Notice::info("Nothing to send.")),
            Err(e) => Err(e).context("Failed to reach the assistant"),
        }
    }
}

#[cfg(test)]
mod tests {
    use busline_core::{InMemoryGateway, MemoryStateStore};

    use super::*;

    fn cli(gateway: &Arc<InMemoryGateway>) -> Cli {
        Cli::new(
            Arc::new(MemoryStateStore::new()),
            gateway.clone(),
            TerminalRenderer::new(false),
        )
    }

    fn by_email(refresh: bool) -> BookingsArgs {
        BookingsArgs {
            email: Some("rahim@example.com".to_string()),
            phone: None,
            refresh,
        }
    }

    #[tokio::test]
    async fn test_refresh_lists_once() {
        let gateway = Arc::new(InMemoryGateway::new());
        let cli = cli(&gateway);

        cli.bookings(by_email(true)).await.unwrap();
        assert_eq!(gateway.list_calls(), 1);
    }

    #[tokio::test]
    async fn test_repeat_lookup_uses_cache_unless_refreshed() {
        let gateway = Arc::new(InMemoryGateway::new());
        let cli = cli(&gateway);

        cli.bookings(by_email(false)).await.unwrap();
        cli.bookings(by_email(false)).await.unwrap();
        assert_eq!(gateway.list_calls(), 1);

        cli.bookings(by_email(true)).await.unwrap();
        assert_eq!(gateway.list_calls(), 2);
    }
}
