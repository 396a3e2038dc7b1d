//! Display implementations for domain models.
//!
//! Kept apart from the model definitions so the records stay free of
//! presentation logic. All output is markdown.

use std::fmt;

use super::datetime::LocalDateTime;
use crate::models::{
    Booking, BookingStatus, BusProvider, ChatMessage, ChatRole, CustomerInfo, Route,
};

/// An amount of money in taka.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Taka(pub u32);

impl fmt::Display for Taka {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "৳{}", self.0)
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for Booking {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "## Booking #{}: {} → {} ({})",
            self.id,
            self.from_district,
            self.to_district,
            self.status.with_icon()
        )?;
        writeln!(f)?;

        writeln!(f, "- **Provider**: {}", self.provider)?;
        writeln!(f, "- **Travel date**: {}", self.travel_date)?;
        writeln!(f, "- **Seats**: {}", self.num_seats)?;
        if let Some(point) = &self.dropping_point {
            writeln!(f, "- **Dropping point**: {point}")?;
        }
        writeln!(f, "- **Total fare**: {}", Taka(self.total_fare))?;
        writeln!(
            f,
            "- **Passenger**: {} ({}, {})",
            self.customer_name, self.customer_email, self.customer_phone
        )?;
        writeln!(f, "- **Booked**: {}", LocalDateTime(&self.created_at))?;
        if self.updated_at != self.created_at {
            writeln!(f, "- **Updated**: {}", LocalDateTime(&self.updated_at))?;
        }
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "## {}: {} → {}",
            self.provider, self.from_district, self.to_district
        )?;
        writeln!(f)?;

        match (self.min_price, self.max_price) {
            (Some(min), Some(max)) if min != max => {
                writeln!(f, "- **Fare**: {} – {}", Taka(min), Taka(max))?;
            }
            (Some(price), _) | (None, Some(price)) => writeln!(f, "- **Fare**: {}", Taka(price))?,
            (None, None) => {}
        }

        if !self.description.is_empty() {
            writeln!(f, "- **About**: {}", self.description)?;
        }

        if !self.dropping_points.is_empty() {
            writeln!(f)?;
            writeln!(f, "| Dropping point | Fare |")?;
            writeln!(f, "|---|---|")?;
            for point in &self.dropping_points {
                writeln!(f, "| {} | {} |", point.name, Taka(point.price))?;
            }
        }
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for BusProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {}", self.name)?;
        writeln!(f)?;

        if !self.coverage_districts.is_empty() {
            writeln!(f, "- **Districts**: {}", self.coverage_districts.join(", "))?;
        }
        if let Some(details) = &self.details {
            writeln!(f)?;
            writeln!(f, "{details}")?;
        }
        writeln!(f)?;

        Ok(())
    }
}

impl fmt::Display for CustomerInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let or_unset = |value: &str| {
            if value.is_empty() {
                "(not set)".to_string()
            } else {
                value.to_string()
            }
        };

        writeln!(f, "- **Name**: {}", or_unset(&self.name))?;
        writeln!(f, "- **Email**: {}", or_unset(&self.email))?;
        writeln!(f, "- **Phone**: {}", or_unset(&self.phone))
    }
}

impl fmt::Display for ChatMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let speaker = match self.role {
            ChatRole::User => "You",
            ChatRole::Assistant => "Assistant",
        };
        writeln!(f, "**{speaker}**: {}", self.content)?;
        writeln!(f)
    }
}
