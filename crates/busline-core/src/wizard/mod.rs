//! The three-step booking wizard.
//!
//! A [`Wizard`] walks the customer through identity, trip details and a final
//! review, in that order and without skipping:
//!
//! ```text
//! ┌───────────────┐ advance ┌───────────────┐ advance ┌───────────────┐ submit ┌──────────────┐
//! │ Customer Info │────────▶│ Trip Details  │────────▶│    Confirm    │───────▶│ Confirmation │
//! │      (0)      │◀────────│      (1)      │◀────────│      (2)      │        │              │
//! └───────────────┘ retreat └───────────────┘ retreat └───────────────┘        └──────────────┘
//! ```
//!
//! Forward moves are gated on the fields of the step being left; backward
//! moves are free except while a submission is in flight. The fare is
//! recomputed after every change that can affect it.

use std::{
    fmt,
    sync::{Arc, Weak},
};

use log::debug;

use crate::{
    cache::BookingCache,
    display::Notice,
    error::{BookingError, Result},
    fare::compute_fare,
    gateway::BookingGateway,
    models::{BookingDraft, CustomerInfo, DraftUpdate, Route},
    profile::CustomerProfile,
};

pub mod confirmation;
pub mod submit;

#[cfg(test)]
mod tests;

pub use confirmation::Confirmation;
pub use submit::{PendingSubmission, SubmissionOutcome};

/// The wizard's position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum WizardStep {
    CustomerInfo,
    TripDetails,
    Confirm,
}

impl WizardStep {
    /// Zero-based position, as shown in a progress indicator.
    pub fn index(self) -> usize {
        match self {
            WizardStep::CustomerInfo => 0,
            WizardStep::TripDetails => 1,
            WizardStep::Confirm => 2,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            WizardStep::CustomerInfo => "Customer Info",
            WizardStep::TripDetails => "Trip Details",
            WizardStep::Confirm => "Confirm",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {} of 3: {}", self.index() + 1, self.title())
    }
}

/// Booking flow controller.
///
/// Owns the customer form buffer and the trip draft. The customer identity
/// is committed to the shared [`CustomerProfile`] when leaving the first
/// step; the draft is never persisted.
pub struct Wizard {
    step: WizardStep,
    form: CustomerInfo,
    draft: BookingDraft,
    route: Option<Route>,
    fare: u32,
    profile: CustomerProfile,
    gateway: Arc<dyn BookingGateway>,
    cache: Arc<BookingCache>,
    in_flight: Weak<()>,
    notice: Option<Notice>,
    confirmation: Option<Confirmation>,
}

impl Wizard {
    /// Start a flow at the first step, pre-filled from the stored identity.
    pub fn new(
        profile: CustomerProfile,
        gateway: Arc<dyn BookingGateway>,
        cache: Arc<BookingCache>,
    ) -> Self {
        let form = profile.customer().clone();
        let draft = BookingDraft::default();
        let fare = compute_fare(None, None, draft.num_seats());

        Self {
            step: WizardStep::CustomerInfo,
            form,
            draft,
            route: None,
            fare,
            profile,
            gateway,
            cache,
            in_flight: Weak::new(),
            notice: None,
            confirmation: None,
        }
    }

    /// Start a flow pre-filled from a route picked on the search page.
    pub fn with_route(mut self, route: Route) -> Self {
        self.prefill(route);
        self
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn customer_form(&self) -> &CustomerInfo {
        &self.form
    }

    /// Replace the identity form contents. Nothing is stored until the
    /// first step is left.
    pub fn set_customer_form(&mut self, customer: CustomerInfo) {
        self.form = customer;
    }

    pub fn draft(&self) -> &BookingDraft {
        &self.draft
    }

    /// Route used as fare context, if the flow started from one.
    pub fn route(&self) -> Option<&Route> {
        self.route.as_ref()
    }

    /// Current total fare for the draft.
    pub fn fare(&self) -> u32 {
        self.fare
    }

    pub fn profile(&self) -> &CustomerProfile {
        &self.profile
    }

    /// True while a submission is in flight. A dropped
    /// [`PendingSubmission`] no longer counts.
    pub fn is_pending(&self) -> bool {
        self.in_flight.strong_count() > 0
    }

    /// Message about the last action, if any.
    pub fn notice(&self) -> Option<&Notice> {
        self.notice.as_ref()
    }

    /// The confirmation, once a submission has succeeded.
    pub fn confirmation(&self) -> Option<&Confirmation> {
        self.confirmation.as_ref()
    }

    /// Copy the route's provider and districts into the draft and use it as
    /// fare context.
    pub fn prefill(&mut self, route: Route) {
        self.draft.apply(DraftUpdate {
            from_district: Some(route.from_district.clone()),
            to_district: Some(route.to_district.clone()),
            provider: Some(route.provider.clone()),
            ..DraftUpdate::default()
        });
        self.route = Some(route);
        self.recompute_fare();
    }

    /// Merge a partial update into the draft.
    pub fn update_draft(&mut self, update: DraftUpdate) {
        self.draft.apply(update);
        self.recompute_fare();
    }

    /// Set the seat count, clamped to the allowed range. Returns the stored
    /// value.
    pub fn set_num_seats(&mut self, requested: i64) -> u32 {
        let seats = self.draft.set_num_seats(requested);
        self.recompute_fare();
        seats
    }

    /// Select a dropping point, or clear the selection with `None`.
    pub fn select_dropping_point(&mut self, name: Option<String>) {
        self.draft.dropping_point = name.filter(|n| !n.is_empty());
        self.recompute_fare();
    }

    fn recompute_fare(&mut self) {
        self.fare = compute_fare(
            self.route.as_ref(),
            self.draft.dropping_point.as_deref(),
            self.draft.num_seats(),
        );
    }

    /// Move forward one step.
    ///
    /// Leaving the first step stores the identity in the profile. On the
    /// Confirm step this submits instead of moving.
    ///
    /// # Errors
    ///
    /// Returns `BookingError::Validation` naming every missing field of the
    /// current step, or the submission error on the Confirm step.
    pub async fn advance(&mut self) -> Result<WizardStep> {
        match self.step {
            WizardStep::CustomerInfo => {
                self.check(self.form.missing_fields())?;
                self.profile.set_customer(self.form.clone()).await;
                self.step = WizardStep::TripDetails;
            }
            WizardStep::TripDetails => {
                self.check(self.draft.missing_fields())?;
                self.step = WizardStep::Confirm;
            }
            WizardStep::Confirm => {
                self.submit().await?;
            }
        }

        debug!("Wizard at {}", self.step);
        Ok(self.step)
    }

    fn check(&mut self, missing: Vec<&'static str>) -> Result<()> {
        if missing.is_empty() {
            self.notice = None;
            return Ok(());
        }

        let error = BookingError::Validation { fields: missing };
        self.notice = Some(error.notice("Please fill in all required fields"));
        Err(error)
    }

    /// Whether [`retreat`](Self::retreat) would move.
    pub fn can_retreat(&self) -> bool {
        self.step != WizardStep::CustomerInfo && !self.is_pending()
    }

    /// Move back one step without validation. Returns false when already at
    /// the first step or while submitting.
    pub fn retreat(&mut self) -> bool {
        if !self.can_retreat() {
            return false;
        }

        self.step = match self.step {
            WizardStep::Confirm => WizardStep::TripDetails,
            WizardStep::TripDetails | WizardStep::CustomerInfo => WizardStep::CustomerInfo,
        };
        self.notice = None;
        true
    }

    /// Leave the flow: back to the first step with an empty draft and no
    /// route context. The stored identity is kept, and the outcome of any
    /// submission still in flight no longer applies to this wizard.
    pub fn abandon(&mut self) {
        self.step = WizardStep::CustomerInfo;
        self.in_flight = Weak::new();
        self.form = self.profile.customer().clone();
        self.draft = BookingDraft::default();
        self.route = None;
        self.notice = None;
        self.confirmation = None;
        self.recompute_fare();
    }
}
