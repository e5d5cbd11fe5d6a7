//! Headless page model.
//!
//! A flat, minimal description of the landing page's elements, just enough
//! structure for the interaction engine to resolve its fixed selector
//! patterns. Real DOM and layout belong to the browser; here an element is
//! an id, a class list, a tag name, a document-space top offset, and an
//! optional `href`. The page has no nesting, so the one descendant selector
//! on the real page (`.demo-video video`) flattens to a tag query.
//!
//! A [`PageDoc`] deserializes from JSON for trace replay and is
//! constructible directly in tests.

use serde::Deserialize;

/// One element of the headless page.
#[derive(Debug, Clone, Deserialize)]
pub struct Element {
    pub id: String,
    #[serde(default)]
    pub classes: Vec<String>,
    /// Lowercase tag name ("a", "video", "div", ...).
    #[serde(default = "default_tag")]
    pub tag: String,
    /// Top offset in document coordinates (px). Viewport-relative top is
    /// `doc_top - scroll_y`.
    #[serde(default)]
    pub doc_top: i64,
    /// `href` attribute, present on anchors.
    #[serde(default)]
    pub href: Option<String>,
}

fn default_tag() -> String {
    "div".to_string()
}

impl Element {
    pub fn has_class(&self, class: &str) -> bool {
        self.classes.iter().any(|c| c == class)
    }
}

/// The headless document: a viewport height and a flat element list in
/// document order.
#[derive(Debug, Clone, Deserialize)]
pub struct PageDoc {
    /// Viewport height in px (`window.innerHeight`).
    #[serde(default = "default_viewport_height")]
    pub viewport_height: i64,
    #[serde(default)]
    pub elements: Vec<Element>,
}

fn default_viewport_height() -> i64 {
    900
}

impl Default for PageDoc {
    fn default() -> Self {
        Self {
            viewport_height: default_viewport_height(),
            elements: Vec::new(),
        }
    }
}

impl PageDoc {
    /// Look up an element by id.
    pub fn get(&self, id: &str) -> Option<&Element> {
        self.elements.iter().find(|el| el.id == id)
    }

    /// All elements carrying a class, in document order.
    pub fn query_class(&self, class: &str) -> Vec<&Element> {
        self.elements.iter().filter(|el| el.has_class(class)).collect()
    }

    /// `.reveal`: elements eligible for the scroll-triggered reveal.
    pub fn reveal_elements(&self) -> Vec<&Element> {
        self.query_class("reveal")
    }

    /// `a[href^="#"]`: same-page anchors.
    pub fn anchors(&self) -> Vec<&Element> {
        self.elements
            .iter()
            .filter(|el| {
                el.tag == "a"
                    && el
                        .href
                        .as_deref()
                        .map(|href| href.starts_with('#'))
                        .unwrap_or(false)
            })
            .collect()
    }

    /// `.nav`: the navigation bar, when present.
    pub fn nav(&self) -> Option<&Element> {
        self.elements.iter().find(|el| el.has_class("nav"))
    }

    /// `.code-standard`: the carousel cards, in document order.
    pub fn carousel_cards(&self) -> Vec<&Element> {
        self.query_class("code-standard")
    }

    /// `.video-overlay`: the play overlay, when present.
    pub fn video_overlay(&self) -> Option<&Element> {
        self.elements.iter().find(|el| el.has_class("video-overlay"))
    }

    /// The demo video element, when present.
    pub fn demo_video(&self) -> Option<&Element> {
        self.elements.iter().find(|el| el.tag == "video")
    }

    /// `.code-card`: hoverable code cards.
    pub fn hover_cards(&self) -> Vec<&Element> {
        self.query_class("code-card")
    }

    /// `.example-row:not(.example-header)`: hoverable example rows.
    pub fn example_rows(&self) -> Vec<&Element> {
        self.elements
            .iter()
            .filter(|el| el.has_class("example-row") && !el.has_class("example-header"))
            .collect()
    }

    /// Resolve a same-page href (`"#features"`) to its target element.
    pub fn anchor_target(&self, href: &str) -> Option<&Element> {
        let id = href.strip_prefix('#')?;
        if id.is_empty() {
            return None;
        }
        self.get(id)
    }

    /// The landing page's structure, used by `page bindings` and
    /// `page run` when no trace supplies a document.
    pub fn sample() -> Self {
        fn el(id: &str, classes: &[&str], tag: &str, doc_top: i64, href: Option<&str>) -> Element {
            Element {
                id: id.to_string(),
                classes: classes.iter().map(|c| c.to_string()).collect(),
                tag: tag.to_string(),
                doc_top,
                href: href.map(|h| h.to_string()),
            }
        }

        Self {
            viewport_height: 900,
            elements: vec![
                el("nav", &["nav"], "nav", 0, None),
                el("nav-features", &[], "a", 10, Some("#features")),
                el("nav-examples", &[], "a", 10, Some("#examples")),
                el("nav-demo", &[], "a", 10, Some("#demo")),
                el("hero", &["reveal"], "section", 120, None),
                el("features", &["reveal"], "section", 1100, None),
                el("standard-0", &["code-standard"], "div", 1200, None),
                el("standard-1", &["code-standard"], "div", 1200, None),
                el("standard-2", &["code-standard"], "div", 1200, None),
                el("standard-3", &["code-standard"], "div", 1200, None),
                el("examples", &["reveal"], "section", 2100, None),
                el("example-head", &["example-row", "example-header"], "div", 2150, None),
                el("example-0", &["example-row"], "div", 2200, None),
                el("example-1", &["example-row"], "div", 2250, None),
                el("example-2", &["example-row"], "div", 2300, None),
                el("card-0", &["code-card"], "div", 2500, None),
                el("card-1", &["code-card"], "div", 2500, None),
                el("demo", &["reveal"], "section", 3100, None),
                el("video-overlay", &["video-overlay"], "div", 3200, None),
                el("demo-video", &["demo-video"], "video", 3200, None),
            ],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_resolves_every_selector() {
        let doc = PageDoc::sample();
        assert!(!doc.reveal_elements().is_empty());
        assert_eq!(doc.anchors().len(), 3);
        assert!(doc.nav().is_some());
        assert_eq!(doc.carousel_cards().len(), 4);
        assert!(doc.video_overlay().is_some());
        assert!(doc.demo_video().is_some());
        assert_eq!(doc.hover_cards().len(), 2);
        // Header row is excluded from hoverable rows.
        assert_eq!(doc.example_rows().len(), 3);
    }

    #[test]
    fn anchor_target_resolution() {
        let doc = PageDoc::sample();
        assert_eq!(doc.anchor_target("#features").unwrap().id, "features");
        assert!(doc.anchor_target("#missing").is_none());
        assert!(doc.anchor_target("#").is_none());
        assert!(doc.anchor_target("features").is_none());
    }

    #[test]
    fn doc_deserializes_with_defaults() {
        let doc: PageDoc = serde_json::from_str(
            r#"{ "elements": [ { "id": "a", "classes": ["reveal"] } ] }"#,
        )
        .unwrap();
        assert_eq!(doc.viewport_height, 900);
        assert_eq!(doc.elements[0].tag, "div");
        assert_eq!(doc.elements[0].doc_top, 0);
        assert_eq!(doc.reveal_elements().len(), 1);
    }
}
