//! Event-trace replay.
//!
//! `page simulate` loads a trace (a page description plus an ordered event
//! list), dispatches every event through the binding table, and reports the
//! effects. The final state summary goes to stderr so stdout stays a clean
//! effect log.
//!
//! # Trace format
//!
//! ```json
//! {
//!   "page": { "viewport_height": 900, "elements": [ ... ] },
//!   "events": [
//!     { "type": "load" },
//!     { "type": "scroll", "y": 420 },
//!     { "type": "tick" }
//!   ]
//! }
//! ```

use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::Path;

use crate::bindings::BindingRegistry;
use crate::config::PageConfig;
use crate::dom::PageDoc;
use crate::events::PageEvent;
use crate::interactions::{NavStyle, PageState};
use crate::report::ReportMode;

/// A replayable trace: the page and the events to drive through it.
#[derive(Debug, Deserialize)]
pub struct Trace {
    #[serde(default)]
    pub page: PageDoc,
    pub events: Vec<PageEvent>,
}

pub fn load_trace(path: &Path) -> Result<Trace> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read trace file: {}", path.display()))?;
    let trace: Trace =
        serde_json::from_str(&content).with_context(|| "Failed to parse trace file")?;
    Ok(trace)
}

pub fn run_simulate(page: &PageConfig, trace_path: &Path, mode: ReportMode) -> Result<()> {
    let trace = load_trace(trace_path)?;
    let registry = BindingRegistry::register(trace.page, page.clone());
    let mut state = PageState::new();
    let mut reporter = mode.reporter();

    let mut total_effects = 0usize;
    for (seq, event) in trace.events.iter().enumerate() {
        let effects = registry.dispatch(&mut state, event);
        total_effects += effects.len();
        reporter.event(seq, event, &effects);
    }

    eprintln!(
        "replayed {} events, {} effects — revealed {}/{}, carousel at {}, nav {}, overlay {}",
        trace.events.len(),
        total_effects,
        state.revealed.len(),
        registry.doc().reveal_elements().len(),
        state.carousel.active,
        match state.nav {
            NavStyle::Gradient => "gradient",
            NavStyle::Opaque => "opaque",
        },
        if state.overlay_hidden { "hidden" } else { "shown" }
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn trace_parses_with_default_page() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(br#"{ "events": [ { "type": "load" }, { "type": "tick" } ] }"#)
            .unwrap();
        let trace = load_trace(file.path()).unwrap();
        assert_eq!(trace.events.len(), 2);
        assert!(trace.page.elements.is_empty());
    }

    #[test]
    fn missing_trace_file_is_an_error() {
        let err = load_trace(Path::new("/nonexistent/trace.json")).unwrap_err();
        assert!(err.to_string().contains("trace"));
    }

    #[test]
    fn malformed_trace_is_an_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"{ not json }").unwrap();
        assert!(load_trace(file.path()).is_err());
    }

    #[test]
    fn simulate_runs_a_trace_end_to_end() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let trace = serde_json::json!({
            "page": {
                "viewport_height": 900,
                "elements": [
                    { "id": "nav", "classes": ["nav"], "tag": "nav" },
                    { "id": "hero", "classes": ["reveal"], "doc_top": 100 }
                ]
            },
            "events": [
                { "type": "load" },
                { "type": "scroll", "y": 250 }
            ]
        });
        file.write_all(trace.to_string().as_bytes()).unwrap();
        run_simulate(&PageConfig::default(), file.path(), ReportMode::Off).unwrap();
    }
}
