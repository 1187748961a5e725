//! Message identifier generation
//!
//! Identifiers are derived purely from wall-clock time; there is no counter
//! state. Two identifiers requested within the same millisecond collide,
//! which is acceptable for their purpose of disambiguating nearby log lines.

use chrono::Utc;

use super::format::{MUID_KEY, RMUID_KEY};

/// Modulus keeping muids short: six trailing digits of the epoch millis
const MUID_MODULUS: i64 = 1_000_000;

/// Quasi-unique message identifier, e.g. `muid834017`
///
/// Distinguishes log lines of concurrent call stacks within a short window;
/// not unique across a run.
#[must_use]
pub fn next_muid() -> String {
    format!("{}{}", MUID_KEY, Utc::now().timestamp_millis() % MUID_MODULUS)
}

/// Run-unique message identifier carrying the full epoch millis
#[must_use]
pub fn next_rmuid() -> String {
    format!("{}{}", RMUID_KEY, Utc::now().timestamp_millis())
}
