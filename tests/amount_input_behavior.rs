//! Behavior-driven tests for the debounced amount input.
//!
//! Timing tests run on tokio's paused clock, so every millisecond is explicit.

use std::time::Duration;

use fxconv_core::{AmountInput, DebouncedInput, EditOutcome, InputConfig, InputPhase};
use tokio::time::Instant;

// =============================================================================
// Input: Validation
// =============================================================================

#[test]
fn when_text_is_not_numeric_edit_is_rejected() {
    // Given: An input holding "12"
    let mut input = AmountInput::new("12", InputConfig::default());

    // When: The user types letters
    let outcome = input.edit("abc", Instant::now());

    // Then: Nothing changes
    assert_eq!(outcome, EditOutcome::Rejected);
    assert_eq!(input.raw_text(), "12");
    assert_eq!(input.phase(), InputPhase::Idle);
}

#[test]
fn when_text_is_a_decimal_it_is_kept_verbatim() {
    let mut input = AmountInput::new("", InputConfig::default());

    assert_eq!(input.edit("123.45", Instant::now()), EditOutcome::Accepted);
    assert_eq!(input.raw_text(), "123.45");
    assert_eq!(input.error(), None);
}

#[test]
fn when_value_exceeds_maximum_it_is_clamped_with_message() {
    // Given: An empty input
    let mut input = AmountInput::new("", InputConfig::default());

    // When: The user types two billion
    let outcome = input.edit("2000000000", Instant::now());

    // Then: The text is clamped and the message names the limit
    assert_eq!(outcome, EditOutcome::Clamped);
    assert_eq!(input.raw_text(), "1000000000");
    assert!(input
        .error()
        .is_some_and(|message| message.contains("1,000,000,000")));
}

// =============================================================================
// Input: Debounce
// =============================================================================

#[tokio::test(start_paused = true)]
async fn when_user_types_in_a_burst_only_last_value_commits() {
    // Given: An empty debounced input
    let (mut input, mut commits) = DebouncedInput::new("", InputConfig::default());
    let start = Instant::now();

    // When: Edits arrive at 0, 200 and 400 ms
    input.edit("1");
    tokio::time::advance(Duration::from_millis(200)).await;
    input.edit("12");
    tokio::time::advance(Duration::from_millis(200)).await;
    input.edit("123");

    // Then: Nothing is committed before 900 ms
    tokio::time::advance(Duration::from_millis(499)).await;
    tokio::task::yield_now().await;
    assert!(commits.try_recv().is_err());
    assert_eq!(input.snapshot().committed_value, "");

    // And: "123" is committed at 900 ms, exactly once
    let committed = commits.recv().await.expect("commit");
    assert_eq!(committed, "123");
    assert!(start.elapsed() >= Duration::from_millis(900));
    assert_eq!(input.snapshot().committed_value, "123");

    tokio::time::advance(Duration::from_secs(5)).await;
    tokio::task::yield_now().await;
    assert!(commits.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn when_clamped_value_commits_the_maximum_is_emitted() {
    let (mut input, mut commits) = DebouncedInput::new("", InputConfig::default());

    input.edit("5000000000");

    assert_eq!(commits.recv().await.as_deref(), Some("1000000000"));
}

#[tokio::test(start_paused = true)]
async fn when_amount_changes_externally_pending_commit_is_dropped() {
    // Given: A pending edit
    let (mut input, mut commits) = DebouncedInput::new("10", InputConfig::default());
    input.edit("99");
    assert_eq!(input.phase(), InputPhase::PendingCommit);

    // When: The amount is replaced from outside
    input.sync_external("25");

    // Then: The text follows immediately and nothing is committed later
    let state = input.snapshot();
    assert_eq!(state.raw_text, "25");
    assert_eq!(state.committed_value, "25");
    tokio::time::advance(Duration::from_secs(1)).await;
    tokio::task::yield_now().await;
    assert!(commits.try_recv().is_err());
}

#[tokio::test(start_paused = true)]
async fn when_committed_value_equals_known_amount_nothing_is_emitted() {
    // Given: An input already holding "100"
    let (mut input, mut commits) = DebouncedInput::new("100", InputConfig::default());

    // When: The user retypes the same amount
    input.edit("10");
    input.edit("100");
    tokio::time::advance(Duration::from_millis(600)).await;
    tokio::task::yield_now().await;

    // Then: No commit is emitted
    assert!(commits.try_recv().is_err());
    assert_eq!(input.phase(), InputPhase::Idle);
}

#[tokio::test(start_paused = true)]
async fn when_input_is_dropped_nothing_is_emitted_afterwards() {
    let (mut input, mut commits) = DebouncedInput::new("", InputConfig::default());
    input.edit("42");

    drop(input);

    assert_eq!(commits.recv().await, None);
}

#[tokio::test(start_paused = true)]
async fn when_debounce_is_configured_it_is_honored() {
    let config = InputConfig {
        max_value: 100,
        debounce: Duration::from_millis(50),
    };
    let (mut input, mut commits) = DebouncedInput::new("", config);
    let start = Instant::now();

    input.edit("150");
    assert_eq!(
        input.snapshot().error.as_deref(),
        Some("Value cannot exceed 100")
    );

    assert_eq!(commits.recv().await.as_deref(), Some("100"));
    assert!(start.elapsed() >= Duration::from_millis(50));
}

#[tokio::test(start_paused = true)]
async fn when_input_settles_after_restoring_amount_channel_closes() {
    // Given: An input holding "100" with an edit that restores it still pending
    let (mut input, mut commits) = DebouncedInput::new("100", InputConfig::default());
    input.edit("5");
    input.edit("100");
    assert_eq!(input.phase(), InputPhase::PendingCommit);

    // When: The input is settled
    input.settle().await;

    // Then: The channel closes without a commit
    assert_eq!(commits.recv().await, None);
}

#[tokio::test(start_paused = true)]
async fn when_input_settles_pending_edit_is_delivered_first() {
    let (mut input, mut commits) = DebouncedInput::new("", InputConfig::default());
    input.edit("5");

    input.settle().await;

    assert_eq!(commits.recv().await.as_deref(), Some("5"));
    assert_eq!(commits.recv().await, None);
}
