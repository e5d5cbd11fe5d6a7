//! Landing-page interaction behaviors.
//!
//! Each behavior is a pure function over the page model and an explicit
//! [`PageState`], returning the effects the browser adapter would apply.
//! The state object replaces the page script's module-level closures so
//! every behavior is independently testable.
//!
//! Transition rules worth naming:
//!
//! - reveal and the video overlay are one-way latches (no reverse path);
//! - the nav style is a pure function of the current scroll offset, with
//!   the boundary offset itself taking the gradient branch;
//! - the carousel marks the active card first, then advances, so the first
//!   tick activates card 0 and count ticks return the index to the start.

use std::collections::HashSet;

use crate::dom::PageDoc;
use crate::events::Effect;

/// Opaque background applied to the nav past the scroll threshold.
pub const NAV_OPAQUE_BACKGROUND: &str = "rgba(10, 15, 20, 0.95)";
pub const NAV_OPAQUE_BORDER: &str = "1px solid rgba(42, 53, 68, 0.5)";
/// Gradient background applied to the nav near the top of the page.
pub const NAV_GRADIENT_BACKGROUND: &str = "linear-gradient(to bottom, rgb(10, 15, 20), transparent)";

const CARD_HOVER_TRANSFORM: &str = "translateY(-2px)";
const CARD_HOVER_SHADOW: &str = "0 8px 30px rgba(0, 212, 170, 0.1)";
const ROW_HOVER_TINT: &str = "rgba(0, 212, 170, 0.05)";

/// Nav bar style, a pure function of scroll offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavStyle {
    Gradient,
    Opaque,
}

/// Carousel rotation state. `active` cycles modulo the card count.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CarouselState {
    pub active: usize,
}

/// The page's transient UI state, owned by the dispatcher and reset on
/// every page load.
#[derive(Debug, Clone)]
pub struct PageState {
    /// Ids of elements that have crossed the reveal threshold. Entries are
    /// never removed.
    pub revealed: HashSet<String>,
    pub carousel: CarouselState,
    pub nav: NavStyle,
    /// One-way latch; there is no show path.
    pub overlay_hidden: bool,
    /// Current scroll offset, updated before scroll handlers run.
    pub scroll_y: i64,
    /// Offset recorded by the nav handler. Read by nothing downstream; the
    /// page keeps it, so the model does too.
    pub last_scroll: i64,
}

impl Default for PageState {
    fn default() -> Self {
        Self {
            revealed: HashSet::new(),
            carousel: CarouselState::default(),
            nav: NavStyle::Gradient,
            overlay_hidden: false,
            scroll_y: 0,
            last_scroll: 0,
        }
    }
}

impl PageState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Scroll reveal. Marks every revealable element whose viewport-relative
/// top has crossed the threshold. One-way: once revealed, later scrolls
/// never emit anything for that element.
pub fn reveal_on_scroll(doc: &PageDoc, state: &mut PageState, margin_px: i64) -> Vec<Effect> {
    let mut effects = Vec::new();
    for el in doc.reveal_elements() {
        let viewport_top = el.doc_top - state.scroll_y;
        if viewport_top < doc.viewport_height - margin_px && !state.revealed.contains(&el.id) {
            state.revealed.insert(el.id.clone());
            effects.push(Effect::add_class(&el.id, "visible"));
        }
    }
    effects
}

/// Anchor click: default navigation is always suppressed (the page calls
/// `preventDefault` before the target lookup); scrolling happens only when
/// the target exists. A missing target is a silent no-op.
pub fn anchor_click(doc: &PageDoc, anchor_id: &str) -> Vec<Effect> {
    let mut effects = vec![Effect::PreventDefault];
    if let Some(target) = doc
        .get(anchor_id)
        .and_then(|anchor| anchor.href.as_deref())
        .and_then(|href| doc.anchor_target(href))
    {
        effects.push(Effect::ScrollIntoView {
            target: target.id.clone(),
        });
    }
    effects
}

/// Nav restyle. No hysteresis: both style properties are set on every
/// scroll, and an offset equal to the threshold keeps the gradient.
pub fn nav_restyle(state: &mut PageState, nav_id: &str, y: i64, threshold_px: i64) -> Vec<Effect> {
    state.last_scroll = y;
    state.nav = if y > threshold_px {
        NavStyle::Opaque
    } else {
        NavStyle::Gradient
    };
    match state.nav {
        NavStyle::Opaque => vec![
            Effect::set_style(nav_id, "background", NAV_OPAQUE_BACKGROUND),
            Effect::set_style(nav_id, "border-bottom", NAV_OPAQUE_BORDER),
        ],
        NavStyle::Gradient => vec![
            Effect::set_style(nav_id, "background", NAV_GRADIENT_BACKGROUND),
            Effect::set_style(nav_id, "border-bottom", "none"),
        ],
    }
}

/// Carousel advance: exactly one card is marked active per tick, then the
/// rotation index moves on, wrapping modulo the card count.
pub fn carousel_tick(doc: &PageDoc, state: &mut PageState) -> Vec<Effect> {
    let cards = doc.carousel_cards();
    if cards.is_empty() {
        return Vec::new();
    }
    let mut effects = Vec::with_capacity(cards.len());
    for (i, card) in cards.iter().enumerate() {
        if i == state.carousel.active {
            effects.push(Effect::add_class(&card.id, "active"));
        } else {
            effects.push(Effect::remove_class(&card.id, "active"));
        }
    }
    state.carousel.active = (state.carousel.active + 1) % cards.len();
    effects
}

/// Video overlay on play: hide unconditionally, even at time zero.
pub fn overlay_on_play(doc: &PageDoc, state: &mut PageState) -> Vec<Effect> {
    hide_overlay(doc, state)
}

/// Video overlay on pause: hide only when playback has advanced past zero.
pub fn overlay_on_pause(doc: &PageDoc, state: &mut PageState, time: f64) -> Vec<Effect> {
    if time > 0.0 {
        hide_overlay(doc, state)
    } else {
        Vec::new()
    }
}

fn hide_overlay(doc: &PageDoc, state: &mut PageState) -> Vec<Effect> {
    let Some(overlay) = doc.video_overlay() else {
        return Vec::new();
    };
    if state.overlay_hidden {
        return Vec::new();
    }
    state.overlay_hidden = true;
    vec![Effect::set_style(&overlay.id, "display", "none")]
}

/// Code card hover: lift and shadow on enter, cleared on leave.
pub fn card_hover(card_id: &str, enter: bool) -> Vec<Effect> {
    if enter {
        vec![
            Effect::set_style(card_id, "transform", CARD_HOVER_TRANSFORM),
            Effect::set_style(card_id, "box-shadow", CARD_HOVER_SHADOW),
        ]
    } else {
        vec![
            Effect::clear_style(card_id, "transform"),
            Effect::clear_style(card_id, "box-shadow"),
        ]
    }
}

/// Example row hover: background tint on enter, cleared on leave.
pub fn row_hover(row_id: &str, enter: bool) -> Vec<Effect> {
    if enter {
        vec![Effect::set_style(row_id, "background", ROW_HOVER_TINT)]
    } else {
        vec![Effect::clear_style(row_id, "background")]
    }
}
