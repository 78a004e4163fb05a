// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for clock operations.

use std::time::Duration;
use thiserror::Error;

/// Inputs a clock rejects instead of scheduling.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ClockError {
    /// A ticker needs a non-zero interval.
    #[error("non-positive interval for ticker")]
    ZeroInterval,

    /// A checked set asked virtual time to move backward.
    #[error("virtual time cannot move backward (requested {behind:?} before current time)")]
    BackwardJump {
        /// How far behind the current virtual time the request was.
        behind: Duration,
    },
}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
