// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access.

/// Variable holding the tracing filter used by test support.
pub const LOG_ENV: &str = "VTIME_LOG";

const DEFAULT_LOG_FILTER: &str = "warn";

/// Tracing filter directive: VTIME_LOG > "warn"
pub fn log_filter() -> String {
    std::env::var(LOG_ENV)
        .ok()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string())
}
