//! Clock accounting. Pure arithmetic over (previous clock, elapsed
//! wall-clock seconds); only the mover's clock is ever touched, and only by
//! the elapsed time since the last recorded move.

use chrono::{DateTime, Utc};

/// Remaining time after `elapsed_secs` have been spent, floored at zero.
pub fn deduct(previous_secs: u64, elapsed_secs: u64) -> u64 {
    previous_secs.saturating_sub(elapsed_secs)
}

/// Whether the mover's flag fell: the elapsed time consumed the whole
/// remaining clock. The move is still recorded, but the session terminates
/// with reason timeout and the opponent wins.
pub fn is_flagged(previous_secs: u64, elapsed_secs: u64) -> bool {
    elapsed_secs >= previous_secs
}

/// Whole seconds between two instants, clamped to zero for skewed inputs.
pub fn elapsed_secs(since: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    (now - since).num_seconds().max(0) as u64
}
