//! Submit guard
//!
//! At most one submission per form may be in flight. A submit takes a
//! [`SubmitTicket`]; while it is alive further submits are refused with
//! `SubmitInFlight`. Dropping the ticket (request settled either way)
//! re-opens the guard.

use std::future::Future;
use std::sync::atomic::{AtomicBool, Ordering};

use shared::{AppError, AppResult};

#[derive(Debug, Default)]
pub struct SubmitGuard {
    in_flight: AtomicBool,
}

/// Held while a submission is running; releases the guard on drop
#[derive(Debug)]
#[must_use = "the guard re-opens as soon as the ticket is dropped"]
pub struct SubmitTicket<'a> {
    guard: &'a SubmitGuard,
}

impl Drop for SubmitTicket<'_> {
    fn drop(&mut self) {
        self.guard.in_flight.store(false, Ordering::Release);
        tracing::debug!("Submit settled");
    }
}

impl SubmitGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a submission, or refuse if one is already running
    pub fn try_begin(&self) -> AppResult<SubmitTicket<'_>> {
        if self
            .in_flight
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            tracing::warn!("Submit refused: a submission is already in flight");
            return Err(AppError::submit_in_flight());
        }
        Ok(SubmitTicket { guard: self })
    }

    pub fn is_in_flight(&self) -> bool {
        self.in_flight.load(Ordering::Acquire)
    }

    /// Run `submission` under the guard
    ///
    /// The guard is released when the future completes, fails, or is
    /// dropped before completion.
    pub async fn run<F, T>(&self, submission: F) -> AppResult<T>
    where
        F: Future<Output = AppResult<T>>,
    {
        let _ticket = self.try_begin()?;
        submission.await
    }
}
