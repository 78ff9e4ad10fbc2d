//! Debounced amount input.
//!
//! [`AmountInput`] is the clock-driven state machine: it validates edits,
//! clamps oversized values and decides when a commit is due. [`DebouncedInput`]
//! drives it on the tokio clock, owning at most one [`ScopedTimer`] and
//! emitting commits on a channel.
//!
//! ```text
//!            edit (valid)                 quiet period elapsed
//!   Idle ───────────────────▶ PendingCommit ─────────────────────▶ Idle (commit)
//!                               │     ▲
//!                               └─────┘ edit: restart timer, last write wins
//!   external amount change / drop: cancel pending commit
//! ```

use std::future::Future;
use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;

use crate::config::InputConfig;
use crate::format::group_thousands;
use crate::ValidationError;

/// Text, committed value and validation message of the amount field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct InputState {
    pub raw_text: String,
    pub committed_value: String,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputPhase {
    Idle,
    PendingCommit,
}

/// Result of applying one edit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    /// Text failed the numeric pattern; nothing changed.
    Rejected,
    /// Text stored verbatim.
    Accepted,
    /// Value exceeded the maximum; the maximum was stored instead.
    Clamped,
}

/// `true` for empty text or digits with at most one decimal point.
pub fn is_numeric_text(text: &str) -> bool {
    let mut seen_dot = false;
    text.chars().all(|ch| match ch {
        '0'..='9' => true,
        '.' if !seen_dot => {
            seen_dot = true;
            true
        }
        _ => false,
    })
}

/// Validate a complete amount the way the input would, clamping to `max_value`.
///
/// Returns the stored text and the validation message, if any.
pub fn validate_amount(text: &str, max_value: u64) -> Result<(String, Option<String>), ValidationError> {
    if !is_numeric_text(text) {
        return Err(ValidationError::InvalidAmount {
            value: text.to_owned(),
        });
    }

    match text.parse::<f64>() {
        Ok(value) if value > max_value as f64 => {
            Ok((max_value.to_string(), Some(max_value_message(max_value))))
        }
        _ => Ok((text.to_owned(), None)),
    }
}

pub fn max_value_message(max_value: u64) -> String {
    format!("Value cannot exceed {}", group_thousands(max_value))
}

/// Clock-driven amount input state machine.
#[derive(Debug, Clone)]
pub struct AmountInput {
    config: InputConfig,
    state: InputState,
    external_amount: String,
    deadline: Option<Instant>,
}

impl AmountInput {
    pub fn new(amount: impl Into<String>, config: InputConfig) -> Self {
        let amount = amount.into();
        Self {
            config,
            state: InputState {
                raw_text: amount.clone(),
                committed_value: amount.clone(),
                error: None,
            },
            external_amount: amount,
            deadline: None,
        }
    }

    /// Apply a keystroke-level edit observed at `now`.
    pub fn edit(&mut self, text: &str, now: Instant) -> EditOutcome {
        let Ok((stored, error)) = validate_amount(text, self.config.max_value) else {
            tracing::trace!(text, "rejected non-numeric edit");
            return EditOutcome::Rejected;
        };

        let outcome = if error.is_some() {
            tracing::debug!(text, max = self.config.max_value, "clamped amount");
            EditOutcome::Clamped
        } else {
            EditOutcome::Accepted
        };

        self.state.raw_text = stored;
        self.state.error = error;
        self.deadline = Some(now + self.config.debounce);
        outcome
    }

    /// Adopt an amount changed outside this input, dropping any pending commit.
    ///
    /// Returns `false` when `amount` is already the known amount (the echo of
    /// this input's own commit).
    pub fn sync_external(&mut self, amount: &str) -> bool {
        if amount == self.external_amount {
            return false;
        }

        self.external_amount = amount.to_owned();
        self.state.raw_text = amount.to_owned();
        self.state.committed_value = amount.to_owned();
        self.state.error = None;
        self.deadline = None;
        true
    }

    /// Commit the stored text once the quiet period has elapsed.
    ///
    /// Yields the value to emit upward, or `None` when nothing is due or the
    /// value equals the last known external amount.
    pub fn poll_commit(&mut self, now: Instant) -> Option<String> {
        let deadline = self.deadline?;
        if now < deadline {
            return None;
        }

        self.deadline = None;
        self.state.committed_value = self.state.raw_text.clone();
        if self.state.committed_value == self.external_amount {
            return None;
        }

        self.external_amount = self.state.committed_value.clone();
        Some(self.state.committed_value.clone())
    }

    /// Drop the pending commit, if any.
    pub fn cancel(&mut self) {
        self.deadline = None;
    }

    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn phase(&self) -> InputPhase {
        if self.deadline.is_some() {
            InputPhase::PendingCommit
        } else {
            InputPhase::Idle
        }
    }

    pub fn state(&self) -> &InputState {
        &self.state
    }

    pub fn raw_text(&self) -> &str {
        &self.state.raw_text
    }

    pub fn error(&self) -> Option<&str> {
        self.state.error.as_deref()
    }

    pub fn config(&self) -> InputConfig {
        self.config
    }
}

/// Spawned task aborted when the handle is dropped.
#[derive(Debug)]
pub struct ScopedTimer(JoinHandle<()>);

impl ScopedTimer {
    pub fn spawn<F>(future: F) -> Self
    where
        F: Future<Output = ()> + Send + 'static,
    {
        Self(tokio::spawn(future))
    }

    pub fn is_finished(&self) -> bool {
        self.0.is_finished()
    }

    /// Wait for the task to run to completion.
    pub async fn finished(mut self) {
        let _ = (&mut self.0).await;
    }
}

impl Drop for ScopedTimer {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// [`AmountInput`] driven by the tokio clock. Must be used inside a runtime.
///
/// Committed values arrive on the receiver returned by [`DebouncedInput::new`].
/// Dropping the input cancels a pending commit.
#[derive(Debug)]
pub struct DebouncedInput {
    state: Arc<Mutex<AmountInput>>,
    timer: Option<ScopedTimer>,
    commits: mpsc::UnboundedSender<String>,
}

impl DebouncedInput {
    pub fn new(
        amount: impl Into<String>,
        config: InputConfig,
    ) -> (Self, mpsc::UnboundedReceiver<String>) {
        let (commits, receiver) = mpsc::unbounded_channel();
        let input = Self {
            state: Arc::new(Mutex::new(AmountInput::new(amount, config))),
            timer: None,
            commits,
        };
        (input, receiver)
    }

    pub fn edit(&mut self, text: &str) -> EditOutcome {
        let (outcome, deadline) = {
            let mut state = self.lock();
            let outcome = state.edit(text, Instant::now());
            (outcome, state.deadline())
        };

        if outcome != EditOutcome::Rejected {
            if let Some(deadline) = deadline {
                self.schedule(deadline);
            }
        }
        outcome
    }

    /// Reset the text to an externally changed amount, bypassing the debounce.
    pub fn sync_external(&mut self, amount: &str) {
        if self.lock().sync_external(amount) {
            self.timer = None;
        }
    }

    /// Cancel the pending commit without changing the text.
    pub fn cancel(&mut self) {
        self.lock().cancel();
        self.timer = None;
    }

    /// Let a pending commit fire, then close the commit channel.
    ///
    /// Once this returns the receiver yields the final commit, if one was
    /// emitted, followed by `None`.
    pub async fn settle(mut self) {
        if let Some(timer) = self.timer.take() {
            timer.finished().await;
        }
    }

    pub fn snapshot(&self) -> InputState {
        self.lock().state().clone()
    }

    pub fn phase(&self) -> InputPhase {
        self.lock().phase()
    }

    fn schedule(&mut self, deadline: Instant) {
        let state = Arc::clone(&self.state);
        let commits = self.commits.clone();

        // Replacing the handle aborts the previous timer.
        self.timer = Some(ScopedTimer::spawn(async move {
            tokio::time::sleep_until(deadline).await;
            let committed = state
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .poll_commit(Instant::now());
            if let Some(value) = committed {
                tracing::debug!(value = %value, "committing amount");
                let _ = commits.send(value);
            }
        }));
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, AmountInput> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
