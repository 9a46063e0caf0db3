//! Time and timestamp helpers.
//!
//! Wall-clock [`Timestamp`]s stamp snapshots. Monotonic [`Instant`]s drive
//! the forwarding interval.

use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

/// UTC timestamp used for `captured_at` and the payload `timestamp`.
pub type Timestamp = DateTime<Utc>;

/// Return the current UTC time.
#[must_use]
pub fn now() -> Timestamp {
    Utc::now()
}

/// Time elapsed from `earlier` to `now`, saturating at zero when `earlier`
/// is in the future.
#[must_use]
pub fn elapsed_between(earlier: Instant, now: Instant) -> Duration {
    now.saturating_duration_since(earlier)
}
