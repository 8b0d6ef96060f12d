//! Tracker constants
//!
//! Centralized constants used by the lifecycle operations, the progress
//! estimator and the event dispatcher.

/// Largest token increment accepted from a single `completed` event.
/// Anything above this is treated as corrupted telemetry.
pub const MAX_TOKEN_INCREMENT: i64 = 500_000;

/// Seconds of running time over which the progress estimate ramps to its cap
pub const PROGRESS_RAMP_SECS: f64 = 90.0;

/// Highest percentage reported for an agent that is still running.
/// 96-99 stay unused so "almost done" never looks like "done".
pub const PROGRESS_RUNNING_CAP: u8 = 95;

/// Column width of the elapsed/timeout string
pub const ELAPSED_COLUMN_WIDTH: usize = 12;

/// Activity icon for tool use
pub const ICON_TOOL_USE: &str = "🔧";

/// Activity icon for model thinking
pub const ICON_THINKING: &str = "💭";

/// Activity icon for progress and retries
pub const ICON_PROGRESS: &str = "⟳";

/// Activity text shown while the model is thinking
pub const THINKING_ACTIVITY: &str = "thinking...";
