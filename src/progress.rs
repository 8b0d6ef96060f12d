//! Progress estimation
//!
//! Derives a 0-100 activity estimate and a compact elapsed/timeout string from
//! wall-clock time and status. Nothing here is stored on the record; callers
//! recompute on every render.

use crate::constants::{ELAPSED_COLUMN_WIDTH, PROGRESS_RAMP_SECS, PROGRESS_RUNNING_CAP};
use crate::state::AgentStatus;
use chrono::{DateTime, Utc};
use std::time::Duration;

/// Estimate progress of an agent as a percentage
///
/// # Arguments
/// * `started_at` - Start of the current run, if any
/// * `status` - Current status of the agent
///
/// # Returns
/// * `u8` - 100 when done, 0 when not running, otherwise 1..=95
pub fn estimate_progress(started_at: Option<DateTime<Utc>>, status: AgentStatus) -> u8 {
    estimate_progress_at(started_at, status, Utc::now())
}

/// Same as [`estimate_progress`] against an explicit clock reading
pub fn estimate_progress_at(
    started_at: Option<DateTime<Utc>>,
    status: AgentStatus,
    now: DateTime<Utc>,
) -> u8 {
    match status {
        AgentStatus::Done => 100,
        AgentStatus::Running => match started_at {
            Some(started) => {
                let elapsed = (now - started).num_milliseconds() as f64 / 1000.0;
                let cap = f64::from(PROGRESS_RUNNING_CAP);
                let percent = (elapsed / PROGRESS_RAMP_SECS * cap).round();
                percent.clamp(1.0, cap) as u8
            }
            None => 0,
        },
        AgentStatus::Disabled | AgentStatus::Idle | AgentStatus::Error => 0,
    }
}

/// Format elapsed time since `started_at` for tabular display
///
/// Appends `/<timeout>` when a timeout is configured and pads the result to a
/// fixed column width. Returns an empty string when the agent was never started.
pub fn format_elapsed(started_at: Option<DateTime<Utc>>, max_timeout_secs: u64) -> String {
    format_elapsed_at(started_at, max_timeout_secs, Utc::now())
}

/// Same as [`format_elapsed`] against an explicit clock reading
pub fn format_elapsed_at(
    started_at: Option<DateTime<Utc>>,
    max_timeout_secs: u64,
    now: DateTime<Utc>,
) -> String {
    let Some(started) = started_at else {
        return String::new();
    };
    let mut text = format_duration(elapsed_since(started, now));
    if max_timeout_secs > 0 {
        text.push('/');
        text.push_str(&format_timeout(max_timeout_secs));
    }
    format!("{:<width$}", text, width = ELAPSED_COLUMN_WIDTH)
}

/// Wall-clock time between `started` and `now`, zero if the clock went backwards
pub fn elapsed_since(started: DateTime<Utc>, now: DateTime<Utc>) -> Duration {
    (now - started).to_std().unwrap_or_default()
}

/// Compact duration: `5s`, `1m`, `1m30s`, `1h00m`
pub fn format_duration(duration: Duration) -> String {
    let secs = duration.as_secs();
    if secs < 60 {
        format!("{}s", secs)
    } else if secs < 3600 {
        match secs % 60 {
            0 => format!("{}m", secs / 60),
            rem => format!("{}m{:02}s", secs / 60, rem),
        }
    } else {
        format!("{}h{:02}m", secs / 3600, (secs % 3600) / 60)
    }
}

/// Compact timeout: `30s`, `5m`, `2h` for whole units, `1m30s`, `1h30m` otherwise
pub fn format_timeout(secs: u64) -> String {
    if secs % 3600 == 0 && secs > 0 {
        format!("{}h", secs / 3600)
    } else {
        format_duration(Duration::from_secs(secs))
    }
}
