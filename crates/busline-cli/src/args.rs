//! Command-line argument definitions
//!
//! Clap-derived argument structs, each converting into the matching core
//! parameter type via `From` so the core stays free of clap:
//!
//! ```text
//! User Input → CLI Args (clap) → Core Params → Controllers
//! ```

use std::path::PathBuf;

use busline_core::{
    gateway::DEFAULT_API_URL,
    models::CustomerInfo,
    params::{CancelBooking, FindBookings, Id, ListProviders, SearchRoutes, TripDetails},
};
use clap::{Args as ClapArgs, Parser, Subcommand};
use jiff::civil::Date;

/// Search bus routes, book seats and manage bookings from the terminal
///
/// Talks to a bus booking service over HTTP. Your name, email and phone are
/// remembered between runs so you only enter them once; the chat assistant
/// conversation is remembered too.
#[derive(Parser)]
#[command(version, about, name = "busline")]
pub struct Args {
    /// Path to the local state file. Defaults to
    /// $XDG_DATA_HOME/busline/state.db
    #[arg(long, global = true)]
    pub state_file: Option<PathBuf>,

    /// Base URL of the booking service API
    #[arg(long, global = true, env = "BUSLINE_API_URL", default_value = DEFAULT_API_URL)]
    pub api_url: String,

    /// Bearer token for the booking service
    #[arg(long, global = true, env = "BUSLINE_API_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Request timeout in seconds
    #[arg(long, global = true, default_value_t = 30)]
    pub timeout: u64,

    /// Disable colored output and use plain text
    #[arg(long, global = true)]
    pub no_color: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Search routes between two districts
    #[command(alias = "s")]
    Search(SearchArgs),
    /// List bus providers
    Providers(ProvidersArgs),
    /// Show one provider
    Provider(ProviderArgs),
    /// Book seats on a route
    #[command(alias = "b")]
    Book(BookArgs),
    /// List bookings by email or phone
    #[command(alias = "ls")]
    Bookings(BookingsArgs),
    /// Show one booking
    Show(ShowArgs),
    /// Cancel a confirmed booking
    Cancel(CancelArgs),
    /// Show or change the remembered customer details
    Profile {
        #[command(subcommand)]
        command: ProfileCommands,
    },
    /// Ask the travel assistant
    Chat(ChatArgs),
}

/// Search routes between two districts
#[derive(ClapArgs)]
pub struct SearchArgs {
    #[arg(help = "District the trip starts from")]
    pub from: String,
    #[arg(help = "District the trip ends in")]
    pub to: String,
    #[arg(short, long, help = "Only show routes run by this provider")]
    pub provider: Option<String>,
}

impl From<SearchArgs> for SearchRoutes {
    fn from(val: SearchArgs) -> Self {
        SearchRoutes {
            from_district: val.from,
            to_district: val.to,
            provider: val.provider,
        }
    }
}

#[derive(ClapArgs)]
pub struct ProvidersArgs {
    #[arg(short, long, help = "Only providers serving this district")]
    pub district: Option<String>,
}

impl From<ProvidersArgs> for ListProviders {
    fn from(val: ProvidersArgs) -> Self {
        ListProviders {
            district: val.district,
        }
    }
}

#[derive(ClapArgs)]
pub struct ProviderArgs {
    #[arg(help = "Provider name, e.g. Hanif")]
    pub name: String,
}

/// Book seats on a route
///
/// Walks the booking steps in one go: customer details (from the saved
/// profile unless overridden), trip details, then a review with the total
/// fare. Nothing is booked unless --confirm is given.
#[derive(ClapArgs)]
pub struct BookArgs {
    #[arg(long, help = "District the trip starts from")]
    pub from: String,
    #[arg(long, help = "District the trip ends in")]
    pub to: String,
    #[arg(long, help = "Bus provider")]
    pub provider: String,
    #[arg(long, help = "Travel date (YYYY-MM-DD)")]
    pub date: Date,
    #[arg(long, default_value_t = 1, help = "Number of seats (1-10)")]
    pub seats: i64,
    #[arg(long, help = "Where you get off; priced per dropping point")]
    pub dropping_point: Option<String>,
    #[arg(long, help = "Passenger name (defaults to the saved profile)")]
    pub name: Option<String>,
    #[arg(long, help = "Passenger email (defaults to the saved profile)")]
    pub email: Option<String>,
    #[arg(long, help = "Passenger phone (defaults to the saved profile)")]
    pub phone: Option<String>,
    #[arg(long, help = "Submit the booking instead of only showing the review")]
    pub confirm: bool,
}

impl BookArgs {
    /// Fill the identity form: flags win over the saved profile.
    pub fn customer(&self, saved: &CustomerInfo) -> CustomerInfo {
        let pick = |flag: &Option<String>, saved: &str| {
            flag.as_deref().map_or_else(|| saved.to_string(), |v| v.trim().to_string())
        };

        CustomerInfo {
            name: pick(&self.name, &saved.name),
            email: pick(&self.email, &saved.email),
            phone: pick(&self.phone, &saved.phone),
        }
    }

    pub fn trip(&self) -> TripDetails {
        TripDetails {
            from_district: self.from.trim().to_string(),
            to_district: self.to.trim().to_string(),
            provider: self.provider.trim().to_string(),
            travel_date: self.date,
            num_seats: self.seats,
            dropping_point: self.dropping_point.clone(),
        }
    }
}

/// List bookings by email or phone
///
/// Without either flag the saved profile's email is used.
#[derive(ClapArgs)]
pub struct BookingsArgs {
    #[arg(long, help = "Customer email address")]
    pub email: Option<String>,
    #[arg(long, help = "Customer phone number")]
    pub phone: Option<String>,
    #[arg(long, help = "Ask the service again instead of using recent results")]
    pub refresh: bool,
}

impl From<&BookingsArgs> for FindBookings {
    fn from(val: &BookingsArgs) -> Self {
        FindBookings {
            email: val.email.clone(),
            phone: val.phone.clone(),
        }
    }
}

#[derive(ClapArgs)]
pub struct ShowArgs {
    #[arg(help = "Booking ID")]
    pub id: u64,
}

impl From<ShowArgs> for Id {
    fn from(val: ShowArgs) -> Self {
        Id { id: val.id }
    }
}

/// Cancel a confirmed booking
///
/// Requires --confirm; without it nothing is sent.
#[derive(ClapArgs)]
pub struct CancelArgs {
    #[arg(help = "Booking ID")]
    pub id: u64,
    #[arg(long, help = "Confirm the cancellation")]
    pub confirm: bool,
}

impl From<CancelArgs> for CancelBooking {
    fn from(val: CancelArgs) -> Self {
        CancelBooking {
            id: val.id,
            confirmed: val.confirm,
        }
    }
}

#[derive(Subcommand)]
pub enum ProfileCommands {
    /// Show the saved customer details
    Show,
    /// Change the saved customer details
    Set(ProfileSetArgs),
    /// Forget the saved customer details
    Clear,
}

#[derive(ClapArgs)]
pub struct ProfileSetArgs {
    #[arg(long)]
    pub name: Option<String>,
    #[arg(long)]
    pub email: Option<String>,
    #[arg(long)]
    pub phone: Option<String>,
}

impl ProfileSetArgs {
    /// Apply the given flags on top of the saved details.
    pub fn merge(self, saved: &CustomerInfo) -> CustomerInfo {
        CustomerInfo {
            name: self.name.unwrap_or_else(|| saved.name.clone()),
            email: self.email.unwrap_or_else(|| saved.email.clone()),
            phone: self.phone.unwrap_or_else(|| saved.phone.clone()),
        }
    }
}

/// Ask the travel assistant
#[derive(ClapArgs)]
pub struct ChatArgs {
    #[arg(help = "Your question; omit to show the conversation so far")]
    pub message: Option<String>,
    #[arg(long, conflicts_with = "message", help = "Forget the conversation")]
    pub clear: bool,
}
