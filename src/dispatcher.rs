//! Event dispatcher
//!
//! Classifies inbound stream events and routes each one to the lifecycle
//! operations on the [`Registry`], extracting payload fields and filtering
//! anomalies first. Events are applied synchronously, at most once, in the
//! order they are handed in. Nothing here fails: malformed payloads degrade
//! to zero values and events for unknown agents are dropped.

use crate::constants::{ICON_PROGRESS, ICON_THINKING, ICON_TOOL_USE, THINKING_ACTIVITY};
use crate::events::payload::{int_field, str_field, value_kind};
use crate::events::{EventKind, StreamEvent};
use crate::logging::{LogLevel, LogSink};
use crate::state::Registry;
use serde_json::{Map, Value};
use tracing::debug;

/// Apply one event to the registry
///
/// # Arguments
/// * `registry` - Registry to mutate
/// * `event` - Event to apply
/// * `sink` - Destination for the log lines the event produces
pub fn dispatch<S: LogSink>(registry: &mut Registry, event: &StreamEvent, sink: &mut S) {
    let agent = event.agent.as_str();
    match event.kind {
        EventKind::Started => on_started(registry, event, sink),
        EventKind::ToolUse => {
            registry.update_activity(agent, ICON_TOOL_USE, &event.message);
        }
        EventKind::Thinking => {
            registry.update_activity(agent, ICON_THINKING, THINKING_ACTIVITY);
        }
        // Too frequent to be individually actionable
        EventKind::Chunk => {}
        EventKind::Progress => on_progress(registry, event, sink),
        EventKind::Completed => on_completed(registry, event, sink),
        EventKind::Error => on_error(registry, event, sink),
        EventKind::Unknown => {
            debug!(agent = %agent, "Dropping event of unknown kind");
        }
    }
}

fn on_started<S: LogSink>(registry: &mut Registry, event: &StreamEvent, sink: &mut S) {
    let phase = str_field(&event.data, "phase");
    let model = str_field(&event.data, "model");
    let timeout_secs = u64::try_from(int_field(&event.data, "timeout_seconds")).unwrap_or(0);

    if !registry.start(&event.agent, phase, timeout_secs, model) {
        return;
    }
    if !phase.is_empty() {
        sink.log(
            LogLevel::Info,
            &event.agent,
            &format!("[{}] {} [{}]", phase, event.message, model),
        );
    }
}

fn on_progress<S: LogSink>(registry: &mut Registry, event: &StreamEvent, sink: &mut S) {
    let attempt = int_field(&event.data, "attempt");
    let details = match (attempt, str_field(&event.data, "error")) {
        (attempt, "") if attempt > 0 => format!("retry #{}", attempt),
        (attempt, error) if attempt > 0 => format!("retry #{}: {}", attempt, error),
        _ => event.message.clone(),
    };

    if !registry.update_activity(&event.agent, ICON_PROGRESS, &details) {
        return;
    }
    if attempt > 0 {
        sink.log(LogLevel::Warn, &event.agent, &details);
    }
}

fn on_completed<S: LogSink>(registry: &mut Registry, event: &StreamEvent, sink: &mut S) {
    let tokens_in = int_field(&event.data, "tokens_in");
    let tokens_out = int_field(&event.data, "tokens_out");
    registry.set_model(&event.agent, str_field(&event.data, "model"));

    let Some(completion) = registry.complete(&event.agent, tokens_in, tokens_out) else {
        return;
    };

    if completion.has_rejections() {
        sink.log(
            LogLevel::Warn,
            &event.agent,
            &format!(
                "rejected anomalous token counts: in={} ({}) out={} ({})",
                completion.rejected_in,
                value_kind(&event.data, "tokens_in"),
                completion.rejected_out,
                value_kind(&event.data, "tokens_out"),
            ),
        );
    }

    let Some(record) = registry.find_by_name(&event.agent) else {
        return;
    };
    let accepted_in = if completion.rejected_in == 0 { tokens_in.max(0) } else { 0 };
    let accepted_out = if completion.rejected_out == 0 { tokens_out.max(0) } else { 0 };
    let mut summary = event.message.clone();
    if !record.model.is_empty() {
        summary.push_str(&format!(" [{}]", record.model));
    }
    summary.push_str(&format!(" +{}/+{} tokens", accepted_in, accepted_out));
    if !record.time.is_empty() {
        summary.push_str(&format!(" in {}", record.time));
    }
    sink.log(LogLevel::Success, &event.agent, summary.trim_start());
}

fn on_error<S: LogSink>(registry: &mut Registry, event: &StreamEvent, sink: &mut S) {
    if !registry.fail(&event.agent, &event.message) {
        return;
    }

    let data = &event.data;
    let mut line = event.message.clone();
    let mut details = Vec::new();
    let error_type = match str_field(data, "error_type") {
        "" => str_field(data, "category"),
        error_type => error_type,
    };
    for (label, value) in [
        ("type", error_type),
        ("model", str_field(data, "model")),
        ("phase", str_field(data, "phase")),
    ] {
        if !value.is_empty() {
            details.push(format!("{}={}", label, value));
        }
    }
    if is_number(data, "duration_ms") {
        details.push(format!("duration={}ms", int_field(data, "duration_ms")));
    }
    if is_number(data, "retry_count") {
        details.push(format!("retries={}", int_field(data, "retry_count")));
    }
    if !details.is_empty() {
        line.push_str(&format!(" ({})", details.join(", ")));
    }
    sink.log(LogLevel::Error, &event.agent, &line);
}

fn is_number(data: &Map<String, Value>, key: &str) -> bool {
    data.get(key).is_some_and(Value::is_number)
}
