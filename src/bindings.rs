//! Event-handler registration table and dispatch.
//!
//! The page script attaches a fixed set of listeners once at load time;
//! this module models that as an explicit table keyed by (event kind,
//! selector). Each selector is queried once at registration, and bindings
//! whose selector matched nothing are kept in the table but marked skipped,
//! mirroring the page's guard clauses around the carousel and the video
//! overlay.
//!
//! Dispatch is single-threaded and run-to-completion: every binding
//! registered for an event runs, in table order, before the next event is
//! looked at.

use anyhow::Result;

use crate::config::PageConfig;
use crate::dom::PageDoc;
use crate::events::{Effect, EventKind, PageEvent};
use crate::interactions::{self, PageState};

/// What a binding does when its event fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Behavior {
    RevealOnScroll,
    AnchorScroll,
    NavRestyle,
    CarouselAdvance,
    OverlayHideOnPlay,
    OverlayHideOnPause,
    CardHover,
    RowHover,
}

impl Behavior {
    pub fn as_str(&self) -> &'static str {
        match self {
            Behavior::RevealOnScroll => "reveal",
            Behavior::AnchorScroll => "anchor-scroll",
            Behavior::NavRestyle => "nav-restyle",
            Behavior::CarouselAdvance => "carousel",
            Behavior::OverlayHideOnPlay => "overlay-hide",
            Behavior::OverlayHideOnPause => "overlay-hide",
            Behavior::CardHover => "card-hover",
            Behavior::RowHover => "row-hover",
        }
    }
}

/// One row of the registration table.
#[derive(Debug, Clone)]
pub struct Binding {
    pub event: EventKind,
    pub selector: &'static str,
    pub behavior: Behavior,
    /// Element ids the selector matched at registration time.
    pub targets: Vec<String>,
}

impl Binding {
    /// A binding with no matched elements never fires.
    pub fn is_registered(&self) -> bool {
        !self.targets.is_empty()
    }
}

/// The page's listeners, registered once against a document.
pub struct BindingRegistry {
    doc: PageDoc,
    page: PageConfig,
    bindings: Vec<Binding>,
}

impl BindingRegistry {
    /// Query the document once per selector and build the fixed table, in
    /// the page script's registration order.
    pub fn register(doc: PageDoc, page: PageConfig) -> Self {
        let ids = |els: Vec<&crate::dom::Element>| -> Vec<String> {
            els.into_iter().map(|el| el.id.clone()).collect()
        };

        let reveal = ids(doc.reveal_elements());
        let anchors = ids(doc.anchors());
        let nav: Vec<String> = doc.nav().map(|el| vec![el.id.clone()]).unwrap_or_default();
        let cards = ids(doc.carousel_cards());
        // Both overlay listeners require the overlay and the video.
        let overlay: Vec<String> = match (doc.video_overlay(), doc.demo_video()) {
            (Some(overlay), Some(_)) => vec![overlay.id.clone()],
            _ => Vec::new(),
        };
        let hover_cards = ids(doc.hover_cards());
        let rows = ids(doc.example_rows());

        let bindings = vec![
            Binding {
                event: EventKind::Scroll,
                selector: ".reveal",
                behavior: Behavior::RevealOnScroll,
                targets: reveal.clone(),
            },
            Binding {
                event: EventKind::Load,
                selector: ".reveal",
                behavior: Behavior::RevealOnScroll,
                targets: reveal,
            },
            Binding {
                event: EventKind::Click,
                selector: "a[href^=\"#\"]",
                behavior: Behavior::AnchorScroll,
                targets: anchors,
            },
            Binding {
                event: EventKind::Scroll,
                selector: ".nav",
                behavior: Behavior::NavRestyle,
                targets: nav,
            },
            Binding {
                event: EventKind::Tick,
                selector: ".code-standard",
                behavior: Behavior::CarouselAdvance,
                targets: cards,
            },
            Binding {
                event: EventKind::MediaPlay,
                selector: ".demo-video video",
                behavior: Behavior::OverlayHideOnPlay,
                targets: overlay.clone(),
            },
            Binding {
                event: EventKind::MediaPause,
                selector: ".demo-video video",
                behavior: Behavior::OverlayHideOnPause,
                targets: overlay,
            },
            Binding {
                event: EventKind::PointerEnter,
                selector: ".code-card",
                behavior: Behavior::CardHover,
                targets: hover_cards.clone(),
            },
            Binding {
                event: EventKind::PointerLeave,
                selector: ".code-card",
                behavior: Behavior::CardHover,
                targets: hover_cards,
            },
            Binding {
                event: EventKind::PointerEnter,
                selector: ".example-row:not(.example-header)",
                behavior: Behavior::RowHover,
                targets: rows.clone(),
            },
            Binding {
                event: EventKind::PointerLeave,
                selector: ".example-row:not(.example-header)",
                behavior: Behavior::RowHover,
                targets: rows,
            },
        ];

        Self {
            doc,
            page,
            bindings,
        }
    }

    pub fn bindings(&self) -> &[Binding] {
        &self.bindings
    }

    pub fn doc(&self) -> &PageDoc {
        &self.doc
    }

    /// Run every registered binding for this event, in table order.
    pub fn dispatch(&self, state: &mut PageState, event: &PageEvent) -> Vec<Effect> {
        // The browser updates the scroll position before handlers see it.
        if let PageEvent::Scroll { y } = event {
            state.scroll_y = *y;
        }

        let kind = event.kind();
        let mut effects = Vec::new();
        for binding in self.bindings.iter().filter(|b| b.event == kind) {
            if !binding.is_registered() {
                continue;
            }
            effects.extend(self.fire(binding, state, event));
        }
        effects
    }

    fn fire(&self, binding: &Binding, state: &mut PageState, event: &PageEvent) -> Vec<Effect> {
        match (binding.behavior, event) {
            (Behavior::RevealOnScroll, PageEvent::Scroll { .. } | PageEvent::Load) => {
                interactions::reveal_on_scroll(&self.doc, state, self.page.reveal_margin_px)
            }
            (Behavior::AnchorScroll, PageEvent::Click { anchor }) => {
                if binding.targets.iter().any(|id| id == anchor) {
                    interactions::anchor_click(&self.doc, anchor)
                } else {
                    Vec::new()
                }
            }
            (Behavior::NavRestyle, PageEvent::Scroll { y }) => {
                interactions::nav_restyle(state, &binding.targets[0], *y, self.page.nav_threshold_px)
            }
            (Behavior::CarouselAdvance, PageEvent::Tick) => {
                interactions::carousel_tick(&self.doc, state)
            }
            (Behavior::OverlayHideOnPlay, PageEvent::MediaPlay { .. }) => {
                interactions::overlay_on_play(&self.doc, state)
            }
            (Behavior::OverlayHideOnPause, PageEvent::MediaPause { time }) => {
                interactions::overlay_on_pause(&self.doc, state, *time)
            }
            (Behavior::CardHover, PageEvent::PointerEnter { target }) => {
                if binding.targets.iter().any(|id| id == target) {
                    interactions::card_hover(target, true)
                } else {
                    Vec::new()
                }
            }
            (Behavior::CardHover, PageEvent::PointerLeave { target }) => {
                if binding.targets.iter().any(|id| id == target) {
                    interactions::card_hover(target, false)
                } else {
                    Vec::new()
                }
            }
            (Behavior::RowHover, PageEvent::PointerEnter { target }) => {
                if binding.targets.iter().any(|id| id == target) {
                    interactions::row_hover(target, true)
                } else {
                    Vec::new()
                }
            }
            (Behavior::RowHover, PageEvent::PointerLeave { target }) => {
                if binding.targets.iter().any(|id| id == target) {
                    interactions::row_hover(target, false)
                } else {
                    Vec::new()
                }
            }
            // Binding/event pairs that cannot fire together.
            _ => Vec::new(),
        }
    }
}

/// List the registration table for a document (`page bindings`).
pub fn run_bindings(doc: PageDoc, page: PageConfig) -> Result<()> {
    let registry = BindingRegistry::register(doc, page);

    println!(
        "{:<14} {:<38} {:<14} MATCHED",
        "EVENT", "SELECTOR", "BEHAVIOR"
    );
    for binding in registry.bindings() {
        let matched = if binding.is_registered() {
            format!("{}", binding.targets.len())
        } else {
            "0 (skipped)".to_string()
        };
        println!(
            "{:<14} {:<38} {:<14} {}",
            binding.event.as_str(),
            binding.selector,
            binding.behavior.as_str(),
            matched
        );
    }

    Ok(())
}
