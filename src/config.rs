//! Application configuration
//!
//! Centralized configuration management with environment variable support
//! and sensible defaults.

use crate::error::AppError;
use std::env;

/// Application configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Server configuration
    pub server: ServerConfig,
    /// Agent slots for the session
    pub agents: AgentsConfig,
    /// Event intake configuration
    pub events: EventsConfig,
    /// Log buffer configuration
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Port to bind the server to
    pub port: u16,
    /// Host address to bind to
    pub host: String,
}

/// Agent slots known to the tracker
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AgentsConfig {
    /// Every known agent name, in display order
    pub names: Vec<String>,
    /// Names configured for this session; the rest are disabled
    pub enabled: Vec<String>,
}

/// Event intake configuration
#[derive(Debug, Clone)]
pub struct EventsConfig {
    /// Capacity of the queue feeding the dispatcher task
    pub queue_capacity: usize,
}

/// Log buffer configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Number of dispatcher log lines kept for the API (0 = unlimited)
    pub buffer_lines: usize,
}

/// Default agent names when `AGENT_NAMES` is not set
pub const DEFAULT_AGENT_NAMES: &str = "claude,gemini,codex";

impl AgentsConfig {
    /// Whether `name` is enabled for this session (case-insensitive)
    pub fn is_enabled(&self, name: &str) -> bool {
        let name = name.to_lowercase();
        self.enabled.iter().any(|n| n.to_lowercase() == name)
    }

    /// Validate the agent list
    /// Returns Ok(()) if valid, Err with message if invalid
    pub fn validate(&self) -> Result<(), String> {
        if self.names.is_empty() {
            return Err("At least one agent name is required".to_string());
        }
        let mut seen: Vec<String> = Vec::new();
        for name in &self.names {
            let folded = name.to_lowercase();
            if folded.trim().is_empty() {
                return Err("Agent name cannot be empty".to_string());
            }
            if seen.contains(&folded) {
                return Err(format!("Duplicate agent name: {}", name));
            }
            seen.push(folded);
        }
        for name in &self.enabled {
            if !seen.contains(&name.to_lowercase()) {
                return Err(format!("Enabled agent is not a known agent: {}", name));
            }
        }
        Ok(())
    }
}

impl Config {
    /// Load configuration from environment variables with defaults
    pub fn from_env() -> Result<Self, AppError> {
        let names = parse_list(
            &env::var("AGENT_NAMES").unwrap_or_else(|_| DEFAULT_AGENT_NAMES.to_string()),
        );
        let enabled = env::var("ENABLED_AGENTS")
            .map(|list| parse_list(&list))
            .unwrap_or_else(|_| names.clone());

        let config = Self {
            server: ServerConfig {
                port: env::var("PORT")
                    .ok()
                    .and_then(|p| p.parse().ok())
                    .unwrap_or(8080),
                host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            },
            agents: AgentsConfig { names, enabled },
            events: EventsConfig {
                queue_capacity: env::var("EVENT_QUEUE_CAPACITY")
                    .ok()
                    .and_then(|c| c.parse().ok())
                    .unwrap_or(256),
            },
            logging: LoggingConfig {
                buffer_lines: env::var("LOG_BUFFER_LINES")
                    .ok()
                    .and_then(|n| n.parse().ok())
                    .unwrap_or(500),
            },
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), AppError> {
        self.agents.validate().map_err(AppError::InvalidConfig)?;
        if self.events.queue_capacity == 0 {
            return Err(AppError::InvalidConfig(
                "EVENT_QUEUE_CAPACITY must be > 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Get the server address as a string
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

// Comma-separated list, whitespace trimmed, empty entries skipped
fn parse_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}
