//! API module
//!
//! Contains HTTP request handlers for the tracker endpoints

pub mod agents;
pub mod events;
pub mod logs;
