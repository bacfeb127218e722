//! Whole-attempt retry loop shared by every generator
//!
//! Each attempt starts from a cleared grid. Two wall-clock deadlines apply:
//! the attempt deadline restarts the attempt, the call deadline ends the
//! call with `GenError::Timeout`. The attempt count is capped as well.

use std::time::{Duration, Instant};

use log::{debug, info, warn};
use strum::Display;

use super::Grid;
use crate::error::GenError;

/// Why an attempt was thrown away
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub(crate) enum RetryReason {
    #[strum(serialize = "attempt ran out of time")]
    Stalled,
    #[strum(serialize = "bounds too small")]
    BoundsTooSmall,
    #[strum(serialize = "no convexity")]
    NoConvexity,
    #[strum(serialize = "walk enclosed every free cell")]
    Enclosed,
    #[strum(serialize = "first room does not fit")]
    FirstRoomBlocked,
}

/// How an attempt ended early
#[derive(Debug)]
pub(crate) enum Interrupt {
    /// Clear the grid and start over
    Retry(RetryReason),
    /// End the call with this error
    Fail(GenError),
}

impl From<GenError> for Interrupt {
    fn from(err: GenError) -> Self {
        Interrupt::Fail(err)
    }
}

/// Timers for the attempt in progress
#[derive(Debug, Clone, Copy)]
pub(crate) struct Clock {
    call_start: Instant,
    attempt_start: Instant,
    retry_after: Duration,
    fail_after: Duration,
    attempt: u32,
}

impl Clock {
    /// Fail if the call is over budget, retry if the attempt is
    pub(crate) fn check(&self) -> Result<(), Interrupt> {
        let now = Instant::now();
        let elapsed = now.duration_since(self.call_start);
        if elapsed > self.fail_after {
            return Err(Interrupt::Fail(GenError::Timeout {
                attempts: self.attempt,
                elapsed,
            }));
        }
        if now.duration_since(self.attempt_start) > self.retry_after {
            warn!("attempt {} timed out, retrying generation", self.attempt);
            return Err(Interrupt::Retry(RetryReason::Stalled));
        }
        Ok(())
    }

    /// A clock that never fires, for driving attempt internals in tests
    #[cfg(test)]
    pub(crate) fn unbounded() -> Self {
        let now = Instant::now();
        Self {
            call_start: now,
            attempt_start: now,
            retry_after: Duration::MAX,
            fail_after: Duration::MAX,
            attempt: 1,
        }
    }
}

/// Run `attempt` until it succeeds, fails, or the budget is spent
pub(crate) fn run<F>(grid: &mut Grid, strategy: &str, mut attempt: F) -> Result<(), GenError>
where
    F: FnMut(&mut Grid, &Clock) -> Result<(), Interrupt>,
{
    let call_start = Instant::now();
    let retry_after = grid.config.retry_after;
    let fail_after = grid.config.fail_after;
    let max_attempts = grid.config.max_attempts;

    for n in 1..=max_attempts {
        let elapsed = call_start.elapsed();
        if elapsed > fail_after {
            return Err(GenError::Timeout {
                attempts: n - 1,
                elapsed,
            });
        }

        grid.reset();
        let clock = Clock {
            call_start,
            attempt_start: Instant::now(),
            retry_after,
            fail_after,
            attempt: n,
        };

        match attempt(grid, &clock) {
            Ok(()) => {
                info!(
                    "{strategy}: generated after {n} attempt(s) in {:?}",
                    call_start.elapsed()
                );
                return Ok(());
            }
            Err(Interrupt::Retry(reason)) => {
                debug!("{strategy}: attempt {n} rejected ({reason}), retrying");
            }
            Err(Interrupt::Fail(err)) => return Err(err),
        }
    }

    Err(GenError::Timeout {
        attempts: max_attempts,
        elapsed: call_start.elapsed(),
    })
}
