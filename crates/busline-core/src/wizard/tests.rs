use jiff::civil::date;

use super::*;
use crate::{
    display::Severity,
    gateway::{Fault, InMemoryGateway},
    models::{BookingList, BookingLookup, DroppingPoint},
    store::{MemoryStateStore, StateStore},
    view::View,
};

fn hanif() -> Route {
    Route {
        provider: "Hanif".to_string(),
        from_district: "Dhaka".to_string(),
        to_district: "Sylhet".to_string(),
        min_price: Some(500),
        max_price: Some(700),
        dropping_points: vec![
            DroppingPoint::new("Kadamtoli", 500),
            DroppingPoint::new("Ambarkhana", 700),
        ],
        description: String::new(),
    }
}

fn rahim() -> CustomerInfo {
    CustomerInfo::new("Rahim", "rahim@example.com", "+8801700000000")
}

struct Harness {
    store: Arc<dyn StateStore>,
    gateway: Arc<InMemoryGateway>,
    cache: Arc<BookingCache>,
}

impl Harness {
    fn new() -> Self {
        Self {
            store: Arc::new(MemoryStateStore::new()),
            gateway: Arc::new(InMemoryGateway::new().with_routes(vec![hanif()])),
            cache: Arc::new(BookingCache::new()),
        }
    }

    async fn wizard(&self) -> Wizard {
        let profile = CustomerProfile::open(Arc::clone(&self.store)).await;
        Wizard::new(profile, self.gateway.clone(), Arc::clone(&self.cache))
    }

    /// A wizard on the Confirm step for Hanif Dhaka → Sylhet.
    async fn at_confirm(&self) -> Wizard {
        let mut wizard = self.wizard().await.with_route(hanif());
        wizard.set_customer_form(rahim());
        wizard.advance().await.unwrap();
        wizard.update_draft(DraftUpdate {
            travel_date: Some(date(2026, 11, 2)),
            ..DraftUpdate::default()
        });
        wizard.set_num_seats(2);
        wizard.select_dropping_point(Some("Kadamtoli".to_string()));
        assert_eq!(wizard.advance().await.unwrap(), WizardStep::Confirm);
        wizard
    }
}

#[tokio::test]
async fn test_customer_step_requires_every_field() {
    let harness = Harness::new();
    let mut wizard = harness.wizard().await;

    for missing in ["name", "email", "phone"] {
        let mut info = rahim();
        match missing {
            "name" => info.name.clear(),
            "email" => info.email.clear(),
            _ => info.phone.clear(),
        }
        wizard.set_customer_form(info);

        let err = wizard.advance().await.unwrap_err();
        assert!(matches!(err, BookingError::Validation { ref fields } if fields == &vec![missing]));
        assert_eq!(wizard.step(), WizardStep::CustomerInfo);
        assert_eq!(
            wizard.notice().map(|n| n.severity),
            Some(Severity::Warning)
        );
    }

    wizard.set_customer_form(rahim());
    assert_eq!(wizard.advance().await.unwrap(), WizardStep::TripDetails);
    assert_eq!(wizard.profile().customer(), &rahim());
    assert!(wizard.notice().is_none());
}

#[tokio::test]
async fn test_trip_step_requires_route_fields_and_date() {
    let harness = Harness::new();
    let mut wizard = harness.wizard().await;
    wizard.set_customer_form(rahim());
    wizard.advance().await.unwrap();

    let err = wizard.advance().await.unwrap_err();
    match err {
        BookingError::Validation { fields } => assert_eq!(
            fields,
            vec!["from_district", "to_district", "provider", "travel_date"]
        ),
        other => panic!("unexpected error: {other}"),
    }

    wizard.prefill(hanif());
    assert!(wizard.advance().await.is_err());

    wizard.update_draft(DraftUpdate {
        travel_date: Some(date(2026, 11, 2)),
        ..DraftUpdate::default()
    });
    assert_eq!(wizard.advance().await.unwrap(), WizardStep::Confirm);
}

#[tokio::test]
async fn test_retreat_is_free_but_stops_at_first_step() {
    let harness = Harness::new();
    let mut wizard = harness.at_confirm().await;

    assert!(wizard.retreat());
    assert_eq!(wizard.step(), WizardStep::TripDetails);
    assert!(wizard.retreat());
    assert_eq!(wizard.step(), WizardStep::CustomerInfo);
    assert!(!wizard.retreat());
    assert_eq!(wizard.step().index(), 0);
}

#[tokio::test]
async fn test_fare_follows_every_change() {
    let harness = Harness::new();
    let mut wizard = harness.wizard().await;
    assert_eq!(wizard.fare(), 500);

    wizard.prefill(hanif());
    wizard.set_num_seats(3);
    assert_eq!(wizard.fare(), 1500);

    wizard.select_dropping_point(Some("Ambarkhana".to_string()));
    assert_eq!(wizard.fare(), 2100);

    assert_eq!(wizard.set_num_seats(0), 1);
    assert_eq!(wizard.fare(), 700);

    assert_eq!(wizard.set_num_seats(25), 10);
    assert_eq!(wizard.fare(), 7000);

    wizard.select_dropping_point(None);
    assert_eq!(wizard.fare(), 5000);
}

#[tokio::test]
async fn test_hanif_kadamtoli_two_seats() {
    let harness = Harness::new();
    let wizard = harness.at_confirm().await;
    assert_eq!(wizard.fare(), 1000);
}

#[tokio::test]
async fn test_double_trigger_sends_once() {
    let harness = Harness::new();
    let mut wizard = harness.at_confirm().await;

    let first = wizard.begin_submit().expect("first trigger starts a submission");
    assert!(wizard.is_pending());
    assert!(wizard.begin_submit().is_none());
    assert!(!wizard.retreat());

    let outcome = first.send().await;
    let booking = wizard.finish_submit(outcome).unwrap();

    assert_eq!(harness.gateway.create_calls(), 1);
    assert_eq!(booking.total_fare, 1000);
    assert!(!wizard.is_pending());
}

#[tokio::test]
async fn test_success_clears_draft_and_keeps_identity() {
    let harness = Harness::new();
    let mut wizard = harness.at_confirm().await;

    let booking = wizard.submit().await.unwrap().expect("submitted");
    assert!(wizard.draft().is_empty());
    assert_eq!(wizard.profile().customer(), &rahim());
    assert_eq!(wizard.confirmation().map(|c| c.booking()), Some(&booking));
    assert_eq!(
        wizard.notice().map(|n| n.severity),
        Some(Severity::Success)
    );

    let reopened = harness.wizard().await;
    assert_eq!(reopened.step(), WizardStep::CustomerInfo);
    assert_eq!(reopened.customer_form(), &rahim());
    assert!(reopened.draft().is_empty());
}

#[tokio::test]
async fn test_success_invalidates_customer_listings() {
    let harness = Harness::new();
    let lookup = BookingLookup::Email("rahim@example.com".to_string());
    harness.cache.put(lookup.clone(), BookingList::default());

    let mut wizard = harness.at_confirm().await;
    wizard.submit().await.unwrap();

    assert!(harness.cache.get_fresh(&lookup).is_none());
}

#[tokio::test]
async fn test_rejection_keeps_draft_and_retries_same_payload() {
    let harness = Harness::new();
    let mut wizard = harness.at_confirm().await;
    harness
        .gateway
        .fail_next(Fault::Rejection("Travel date must be in the future".to_string()))
        .await;

    let draft_before = wizard.draft().clone();
    let first = wizard.begin_submit().unwrap();
    let payload = first.request().clone();
    let outcome = first.send().await;
    assert!(wizard.finish_submit(outcome).is_err());

    assert_eq!(wizard.step(), WizardStep::Confirm);
    assert_eq!(wizard.draft(), &draft_before);
    let notice = wizard.notice().unwrap();
    assert_eq!(notice.severity, Severity::Error);
    assert_eq!(notice.message, "Travel date must be in the future");

    let retry = wizard.begin_submit().unwrap();
    assert_eq!(retry.request(), &payload);
}

#[tokio::test]
async fn test_outage_shows_generic_notice() {
    let harness = Harness::new();
    let mut wizard = harness.at_confirm().await;
    harness.gateway.fail_next(Fault::Outage).await;

    assert!(wizard.advance().await.is_err());
    assert_eq!(wizard.step(), WizardStep::Confirm);
    assert_eq!(
        wizard.notice().map(|n| n.message.as_str()),
        Some("Failed to create booking")
    );
    assert!(!wizard.draft().is_empty());
}

#[tokio::test]
async fn test_book_another_resets_to_first_step() {
    let harness = Harness::new();
    let mut wizard = harness.at_confirm().await;
    assert!(!wizard.book_another());

    wizard.submit().await.unwrap();
    assert!(wizard.book_another());

    assert_eq!(wizard.step(), WizardStep::CustomerInfo);
    assert!(wizard.draft().is_empty());
    assert!(wizard.route().is_none());
    assert!(wizard.confirmation().is_none());
    assert_eq!(wizard.customer_form(), &rahim());
}

#[tokio::test]
async fn test_view_bookings_switches_to_customer_listing() {
    let harness = Harness::new();
    let mut wizard = harness.at_confirm().await;
    assert_eq!(wizard.view_bookings(), None);

    wizard.submit().await.unwrap();
    assert_eq!(
        wizard.view_bookings(),
        Some(View::Bookings {
            lookup: Some(BookingLookup::Email("rahim@example.com".to_string()))
        })
    );
    assert!(wizard.confirmation().is_none());
    assert!(wizard.route().is_none());
}

#[tokio::test]
async fn test_submit_outside_confirm_sends_nothing() {
    let harness = Harness::new();
    let mut wizard = harness.wizard().await;

    assert!(wizard.begin_submit().is_none());
    assert_eq!(wizard.submit().await.unwrap(), None);
    assert_eq!(harness.gateway.create_calls(), 0);
}

#[tokio::test]
async fn test_changing_destination_resets_dropping_point_and_fare() {
    let harness = Harness::new();
    let mut wizard = harness.wizard().await.with_route(hanif());
    wizard.select_dropping_point(Some("Ambarkhana".to_string()));
    assert_eq!(wizard.fare(), 700);

    wizard.update_draft(DraftUpdate {
        to_district: Some("Moulvibazar".to_string()),
        ..DraftUpdate::default()
    });
    assert_eq!(wizard.draft().dropping_point, None);
    assert_eq!(wizard.fare(), 500);
}

#[tokio::test]
async fn test_dropped_submission_does_not_block_the_wizard() {
    let harness = Harness::new();
    let mut wizard = harness.at_confirm().await;

    let submission = wizard.begin_submit().unwrap();
    assert!(wizard.is_pending());
    drop(submission);

    assert!(!wizard.is_pending());
    assert!(wizard.can_retreat());
    let booking = wizard.submit().await.unwrap().expect("resubmitted");
    assert_eq!(booking.total_fare, 1000);
    assert_eq!(harness.gateway.create_calls(), 1);
}

#[tokio::test]
async fn test_abandon_while_pending_starts_over() {
    let harness = Harness::new();
    let mut wizard = harness.at_confirm().await;

    let stale = wizard.begin_submit().unwrap();
    wizard.abandon();
    assert!(!wizard.is_pending());
    assert_eq!(wizard.step(), WizardStep::CustomerInfo);

    wizard.advance().await.unwrap();
    wizard.prefill(hanif());
    wizard.update_draft(DraftUpdate {
        travel_date: Some(date(2026, 11, 3)),
        num_seats: Some(1),
        ..DraftUpdate::default()
    });
    assert_eq!(wizard.advance().await.unwrap(), WizardStep::Confirm);

    // The old request completing later leaves the new flow untouched
    let outcome = stale.send().await;
    assert!(wizard.finish_submit(outcome).is_ok());
    assert_eq!(wizard.step(), WizardStep::Confirm);
    assert!(wizard.confirmation().is_none());
    assert!(!wizard.draft().is_empty());

    let booking = wizard.submit().await.unwrap().expect("submitted");
    assert_eq!(booking.travel_date, date(2026, 11, 3));
    assert_eq!(harness.gateway.create_calls(), 2);
}

#[tokio::test]
async fn test_confirmed_wizard_does_not_submit_again() {
    let harness = Harness::new();
    let mut wizard = harness.at_confirm().await;
    wizard.submit().await.unwrap();

    assert!(wizard.begin_submit().is_none());
    assert_eq!(wizard.advance().await.unwrap(), WizardStep::Confirm);
    assert_eq!(
        wizard.notice().map(|n| n.message.as_str()),
        Some("Booking created successfully!")
    );
    assert_eq!(harness.gateway.create_calls(), 1);
}
