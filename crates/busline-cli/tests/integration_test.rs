//! Integration tests comparing CLI output with the core Display
//! implementations and checking what the CLI leaves behind in the state file.

use std::{process::Command, sync::Arc};

use busline_core::{
    compute_fare,
    display::BookingSummary,
    models::{BookingDraft, CustomerInfo, DraftUpdate},
    ChatSession, CustomerProfile, StateStore, StoreBuilder,
};
use jiff::civil::date;
use tempfile::TempDir;

const OFFLINE_API: &str = "http://127.0.0.1:9/api/v1";

/// Run a CLI command against an unreachable service and capture its output
fn run_cli_command(state_path: &str, args: &[&str]) -> (bool, String, String) {
    let mut cmd = Command::new(env!("CARGO_BIN_EXE_busline"));
    cmd.env_remove("BUSLINE_API_TOKEN")
        .arg("--no-color")
        .arg("--state-file")
        .arg(state_path)
        .arg("--api-url")
        .arg(OFFLINE_API)
        .arg("--timeout")
        .arg("2");

    for arg in args {
        cmd.arg(arg);
    }

    let output = cmd.output().expect("Failed to run CLI command");
    (
        output.status.success(),
        String::from_utf8(output.stdout).expect("Invalid UTF-8 in CLI output"),
        String::from_utf8(output.stderr).expect("Invalid UTF-8 in CLI error output"),
    )
}

async fn open_store(state_path: &std::path::Path) -> Arc<dyn StateStore> {
    let store = StoreBuilder::new()
        .with_state_path(Some(state_path))
        .build()
        .await
        .expect("Failed to open state store");
    Arc::new(store)
}

/// Without route details the review prices every seat at the standard rate,
/// and nothing is booked without --confirm.
#[tokio::test]
async fn test_book_review_matches_summary_display() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let state_path = temp_dir.path().join("state.db");
    let state_str = state_path.to_str().unwrap();

    let (success, stdout, _) = run_cli_command(
        state_str,
        &[
            "book",
            "--from",
            "Dhaka",
            "--to",
            "Sylhet",
            "--provider",
            "Hanif",
            "--date",
            "2026-11-02",
            "--seats",
            "2",
            "--name",
            "Rahim Uddin",
            "--email",
            "rahim@example.com",
            "--phone",
            "+8801700000000",
        ],
    );
    assert!(success, "review should not need the service");

    let customer = CustomerInfo::new("Rahim Uddin", "rahim@example.com", "+8801700000000");
    let mut draft = BookingDraft::default();
    draft.apply(DraftUpdate {
        from_district: Some("Dhaka".to_string()),
        to_district: Some("Sylhet".to_string()),
        provider: Some("Hanif".to_string()),
        travel_date: Some(date(2026, 11, 2)),
        num_seats: Some(2),
        dropping_point: None,
    });
    let fare = compute_fare(None, None, 2);
    assert_eq!(fare, 1000);

    let expected = BookingSummary {
        customer: &customer,
        draft: &draft,
        fare,
    }
    .to_string();

    assert!(stdout.contains("Warning: Route details unavailable"));
    assert!(stdout.contains(&expected));
    assert!(stdout.contains("Run again with --confirm"));

    // Leaving the identity step remembers the customer
    let profile = CustomerProfile::open(open_store(&state_path).await).await;
    assert_eq!(profile.customer(), &customer);
}

/// A later booking reuses the remembered identity without any flags.
#[tokio::test]
async fn test_book_reuses_saved_profile() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let state_path = temp_dir.path().join("state.db");
    let state_str = state_path.to_str().unwrap();

    let (success, _, _) = run_cli_command(
        state_str,
        &[
            "profile",
            "set",
            "--name",
            "Karim",
            "--email",
            "karim@example.com",
            "--phone",
            "+8801800000000",
        ],
    );
    assert!(success);

    let (success, stdout, _) = run_cli_command(
        state_str,
        &[
            "book", "--from", "Dhaka", "--to", "Khulna", "--provider", "Eagle", "--date",
            "2026-12-01", "--seats", "15",
        ],
    );
    assert!(success);
    assert!(stdout.contains("- **Name**: Karim"));
    // Seats are clamped to the maximum of 10
    assert!(stdout.contains("- **Seats**: 10"));
    assert!(stdout.contains("**Total fare: ৳5000**"));
}

/// The user's message is kept even when the assistant is unreachable.
#[tokio::test]
async fn test_chat_history_survives_failed_send() {
    let temp_dir = TempDir::new().expect("Failed to create temporary directory");
    let state_path = temp_dir.path().join("state.db");
    let state_str = state_path.to_str().unwrap();

    let (success, _, stderr) = run_cli_command(state_str, &["chat", "Any buses to Sylhet?"]);
    assert!(!success);
    assert!(stderr.contains("Failed to reach the assistant"));

    let (success, stdout, _) = run_cli_command(state_str, &["chat"]);
    assert!(success);
    assert!(stdout.contains("**You**: Any buses to Sylhet?"));

    let session = ChatSession::open(open_store(&state_path).await).await;
    assert_eq!(session.messages().len(), 1);
    assert_eq!(session.conversation_id(), None);

    let (success, _, _) = run_cli_command(state_str, &["chat", "--clear"]);
    assert!(success);

    let (_, stdout, _) = run_cli_command(state_str, &["chat"]);
    assert!(stdout.contains("No messages yet."));
}
