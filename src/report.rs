//! Effect reporting for trace replay.
//!
//! `page simulate` prints one record per dispatched event. Human output is
//! for eyeballing a replay; JSON output is one object per line on stdout so
//! scripts can consume it. The default follows the terminal: human on a
//! TTY, JSON otherwise.

use anyhow::{bail, Result};
use serde_json::json;

use crate::events::{Effect, PageEvent};

/// Reports dispatched events. Implementations write to stdout.
pub trait EffectReporter {
    /// Emit one record for an event and the effects it produced.
    fn event(&mut self, seq: usize, event: &PageEvent, effects: &[Effect]);
}

/// Human-friendly replay log.
pub struct HumanReporter;

impl EffectReporter for HumanReporter {
    fn event(&mut self, seq: usize, event: &PageEvent, effects: &[Effect]) {
        if effects.is_empty() {
            println!("#{:<4} {:<24} (no effects)", seq, describe_event(event));
            return;
        }
        println!("#{:<4} {}", seq, describe_event(event));
        for effect in effects {
            println!("      → {}", describe_effect(effect));
        }
    }
}

/// Machine-readable replay log: one JSON object per line.
pub struct JsonReporter;

impl EffectReporter for JsonReporter {
    fn event(&mut self, seq: usize, event: &PageEvent, effects: &[Effect]) {
        let obj = json!({
            "seq": seq,
            "event": event,
            "effects": effects,
        });
        if let Ok(line) = serde_json::to_string(&obj) {
            println!("{}", line);
        }
    }
}

/// No-op reporter when output is disabled.
pub struct NullReporter;

impl EffectReporter for NullReporter {
    fn event(&mut self, _seq: usize, _event: &PageEvent, _effects: &[Effect]) {}
}

/// Output mode for `page simulate`: human, JSON lines, or off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportMode {
    Human,
    Json,
    Off,
}

impl ReportMode {
    /// Resolve a `--format` flag, defaulting by TTY when absent.
    pub fn resolve(flag: Option<&str>) -> Result<Self> {
        match flag {
            None => Ok(Self::default_for_tty()),
            Some("human") => Ok(ReportMode::Human),
            Some("json") => Ok(ReportMode::Json),
            Some("off") => Ok(ReportMode::Off),
            Some(other) => bail!(
                "unknown report format '{}'. Must be human, json, or off.",
                other
            ),
        }
    }

    /// Default: human when stdout is a TTY, otherwise JSON for piping.
    pub fn default_for_tty() -> Self {
        if atty::is(atty::Stream::Stdout) {
            ReportMode::Human
        } else {
            ReportMode::Json
        }
    }

    pub fn reporter(&self) -> Box<dyn EffectReporter> {
        match self {
            ReportMode::Human => Box::new(HumanReporter),
            ReportMode::Json => Box::new(JsonReporter),
            ReportMode::Off => Box::new(NullReporter),
        }
    }
}

fn describe_event(event: &PageEvent) -> String {
    match event {
        PageEvent::Load => "load".to_string(),
        PageEvent::Scroll { y } => format!("scroll y={}", y),
        PageEvent::Tick => "tick".to_string(),
        PageEvent::Click { anchor } => format!("click {}", anchor),
        PageEvent::PointerEnter { target } => format!("pointer-enter {}", target),
        PageEvent::PointerLeave { target } => format!("pointer-leave {}", target),
        PageEvent::MediaPlay { time } => format!("media-play t={}", time),
        PageEvent::MediaPause { time } => format!("media-pause t={}", time),
    }
}

fn describe_effect(effect: &Effect) -> String {
    match effect {
        Effect::AddClass { target, class } => format!("add-class {} .{}", target, class),
        Effect::RemoveClass { target, class } => format!("remove-class {} .{}", target, class),
        Effect::SetStyle {
            target,
            property,
            value,
        } => format!("set-style {} {}: {}", target, property, value),
        Effect::ClearStyle { target, property } => {
            format!("clear-style {} {}", target, property)
        }
        Effect::PreventDefault => "prevent-default".to_string(),
        Effect::ScrollIntoView { target } => format!("scroll-into-view {}", target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_flags() {
        assert_eq!(ReportMode::resolve(Some("human")).unwrap(), ReportMode::Human);
        assert_eq!(ReportMode::resolve(Some("json")).unwrap(), ReportMode::Json);
        assert_eq!(ReportMode::resolve(Some("off")).unwrap(), ReportMode::Off);
        assert!(ReportMode::resolve(Some("yaml")).is_err());
    }
}
