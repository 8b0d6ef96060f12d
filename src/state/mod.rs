// State management module
// Handles the agent registry, lifecycle operations, and shared tracker state

pub mod app_state;
pub mod lifecycle;
pub mod record;
pub mod registry;

pub use app_state::AppState;
pub use lifecycle::Completion;
pub use record::{AgentRecord, AgentStatus};
pub use registry::{Aggregate, Registry};
