use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScrollEdge {
    Top,
    Bottom,
}

/// Where a navigation command sends the page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum NavAction {
    /// Scroll a section anchor into view. The id is not checked against the page here.
    Section(String),
    Scroll(ScrollEdge),
}

#[derive(Debug, Clone, Copy)]
enum Target {
    Section(&'static str),
    Edge(ScrollEdge),
}

impl Target {
    fn action(&self) -> NavAction {
        match self {
            Target::Section(id) => NavAction::Section((*id).to_string()),
            Target::Edge(edge) => NavAction::Scroll(*edge),
        }
    }
}

// Checked in order; the first entry with a matching phrase wins.
const NAVIGATION_TABLE: &[(&[&str], Target)] = &[
    (
        &["take me to pricing", "go to pricing", "show pricing", "pricing section"],
        Target::Section("pricing"),
    ),
    (
        &["take me to features", "go to features", "show features", "features section"],
        Target::Section("features"),
    ),
    (
        &["take me to demo", "go to demo", "show demo", "demo section"],
        Target::Section("demo"),
    ),
    (
        &["take me to contact", "go to contact", "show contact", "contact section"],
        Target::Section("contact"),
    ),
    (
        &["take me to top", "go to top", "scroll to top", "back to top"],
        Target::Edge(ScrollEdge::Top),
    ),
    (
        &["take me to bottom", "go to bottom", "scroll to bottom"],
        Target::Edge(ScrollEdge::Bottom),
    ),
];

pub(crate) fn contains_any(text: &str, phrases: &[&str]) -> bool {
    phrases.iter().any(|phrase| text.contains(phrase))
}

/// Match an utterance against the fixed navigation phrases.
/// Comparison is case-insensitive substring containment; first table entry wins.
pub fn match_navigation(utterance: &str) -> Option<NavAction> {
    let lowered = utterance.to_lowercase();

    NAVIGATION_TABLE
        .iter()
        .find(|(phrases, _)| contains_any(&lowered, phrases))
        .map(|(_, target)| target.action())
}

/// Every trigger phrase with the action it maps to, in table order.
pub fn trigger_phrases() -> impl Iterator<Item = (&'static str, NavAction)> {
    NAVIGATION_TABLE.iter().flat_map(|(phrases, target)| {
        phrases.iter().map(move |phrase| (*phrase, target.action()))
    })
}

/// Spoken confirmation for a navigation that reached its target.
pub fn confirmation(action: &NavAction) -> String {
    match action {
        NavAction::Section(id) => format!("Navigating to the {} section.", id),
        NavAction::Scroll(ScrollEdge::Top) => "Scrolling to the top of the page.".to_string(),
        NavAction::Scroll(ScrollEdge::Bottom) => "Scrolling to the bottom of the page.".to_string(),
    }
}

pub fn missing_section(id: &str) -> String {
    format!("I couldn't find the {} section.", id)
}
