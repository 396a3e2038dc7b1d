//! Booking submission from the Confirm step.
//!
//! Submission is split so that the single in-flight request is visible as a
//! value: [`Wizard::begin_submit`] freezes the payload and marks the wizard
//! pending, [`PendingSubmission::send`] makes the one network call, and
//! [`Wizard::finish_submit`] applies the outcome. While a submission is
//! pending, further `begin_submit` calls yield nothing.
//!
//! The wizard only holds a weak handle on the submission, so dropping a
//! `PendingSubmission` or `SubmissionOutcome` without finishing it (a
//! cancelled future, a timeout) leaves the wizard free to submit again.

use std::sync::Arc;

use log::{debug, info, warn};

use super::{Confirmation, Wizard, WizardStep};
use crate::{
    display::Notice,
    error::{BookingError, Result},
    gateway::BookingGateway,
    models::{Booking, BookingCreateRequest, BookingDraft},
};

/// Fallback message for failures that carry no detail worth showing.
const CREATE_FAILED: &str = "Failed to create booking";

/// A booking request that has been handed to the gateway exactly once.
pub struct PendingSubmission {
    request: BookingCreateRequest,
    gateway: Arc<dyn BookingGateway>,
    token: Arc<()>,
}

impl PendingSubmission {
    /// The frozen payload.
    pub fn request(&self) -> &BookingCreateRequest {
        &self.request
    }

    /// Send the request. Consumes the submission so it cannot be sent twice.
    pub async fn send(self) -> SubmissionOutcome {
        let result = self.gateway.create_booking(&self.request).await;

        SubmissionOutcome {
            result,
            token: self.token,
        }
    }
}

/// The service's answer to a [`PendingSubmission`], waiting to be applied.
pub struct SubmissionOutcome {
    result: Result<Booking>,
    token: Arc<()>,
}

impl SubmissionOutcome {
    pub fn result(&self) -> &Result<Booking> {
        &self.result
    }
}

impl Wizard {
    /// Start a submission.
    ///
    /// Returns `None`, and sends nothing, unless the wizard is on the Confirm
    /// step with a complete draft, no submission already in flight and no
    /// booking already confirmed.
    pub fn begin_submit(&mut self) -> Option<PendingSubmission> {
        if self.step != WizardStep::Confirm || self.is_pending() || self.confirmation.is_some() {
            return None;
        }

        let missing = self.draft.missing_fields();
        if !missing.is_empty() {
            self.notice = Some(BookingError::Validation { fields: missing }.notice(CREATE_FAILED));
            return None;
        }

        let request = BookingCreateRequest::from_parts(self.profile.customer(), &self.draft)?;
        let token = Arc::new(());
        self.in_flight = Arc::downgrade(&token);
        self.notice = None;

        Some(PendingSubmission {
            request,
            gateway: Arc::clone(&self.gateway),
            token,
        })
    }

    /// Apply the outcome of a submission.
    ///
    /// On success the draft is cleared, cached listings for the customer are
    /// dropped and the confirmation is shown. On failure the wizard stays on
    /// the Confirm step with the draft intact, ready to send the same payload
    /// again. An outcome that arrives after [`abandon`](Wizard::abandon) only
    /// drops the cached listings. The result is passed back to the caller
    /// either way.
    pub fn finish_submit(&mut self, outcome: SubmissionOutcome) -> Result<Booking> {
        let SubmissionOutcome { result, token } = outcome;
        let current = std::ptr::eq(self.in_flight.as_ptr(), Arc::as_ptr(&token));
        drop(token);

        if !current {
            debug!("Ignoring outcome of an abandoned submission");
            if result.is_ok() {
                self.cache.invalidate_customer(self.profile.customer());
            }
            return result;
        }

        match result {
            Ok(booking) => {
                info!("Booking #{} created", booking.id);
                self.cache.invalidate_customer(self.profile.customer());
                self.draft = BookingDraft::default();
                self.recompute_fare();
                self.notice = Some(Notice::success("Booking created successfully!"));
                self.confirmation = Some(Confirmation::new(booking.clone()));
                Ok(booking)
            }
            Err(e) => {
                warn!("Booking submission failed: {e}");
                self.notice = Some(e.notice(CREATE_FAILED));
                Err(e)
            }
        }
    }

    /// Submit in one go. Returns `Ok(None)` when nothing was sent.
    pub async fn submit(&mut self) -> Result<Option<Booking>> {
        let Some(pending) = self.begin_submit() else {
            return Ok(None);
        };

        let outcome = pending.send().await;
        self.finish_submit(outcome).map(Some)
    }
}
