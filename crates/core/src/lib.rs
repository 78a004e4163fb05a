// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! vtime: controllable time for testing time-dependent code
//!
//! This crate provides:
//! - The [`Clock`] trait: now, sleep, one-shot timers and repeating tickers
//! - [`RealClock`], a pass-through to tokio's timers
//! - [`MockClock`], a virtual clock that only moves on `advance`/`set` and
//!   fires due timers and tickers deterministically

pub mod macros;

pub mod clock;
pub mod config;
pub mod env;
pub mod error;
pub mod mock;
pub mod real;
pub mod ticker;
pub mod timer;

#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

pub use clock::{Clock, Notification};
pub use config::MockConfig;
pub use error::ClockError;
pub use mock::{MockClock, MockTicker, MockTimer};
pub use real::{RealClock, RealTicker, RealTimer};
pub use ticker::Ticker;
pub use timer::Timer;
