use std::collections::HashSet;
use tracing::info;

use crate::dispatch::navigation::ScrollEdge;

pub const DEFAULT_SECTIONS: [&str; 4] = ["pricing", "features", "demo", "contact"];

/// The page the assistant lives on: navigable anchors plus a message area.
pub trait PageSurface: Send {
    fn has_section(&self, id: &str) -> bool;
    fn scroll_to_section(&mut self, id: &str);
    fn scroll_to_edge(&mut self, edge: ScrollEdge);
    /// Replace the assistant message shown to the user.
    fn show_message(&mut self, message: &str);
}

impl<P: PageSurface + ?Sized> PageSurface for Box<P> {
    fn has_section(&self, id: &str) -> bool {
        (**self).has_section(id)
    }
    fn scroll_to_section(&mut self, id: &str) {
        (**self).scroll_to_section(id)
    }
    fn scroll_to_edge(&mut self, edge: ScrollEdge) {
        (**self).scroll_to_edge(edge)
    }
    fn show_message(&mut self, message: &str) {
        (**self).show_message(message)
    }
}

/// Terminal rendition of the page.
#[derive(Debug)]
pub struct ConsolePage {
    sections: HashSet<String>,
    message: String,
}

impl ConsolePage {
    pub fn new<I, S>(sections: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            sections: sections.into_iter().map(Into::into).collect(),
            message: String::new(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl Default for ConsolePage {
    fn default() -> Self {
        Self::new(DEFAULT_SECTIONS)
    }
}

impl PageSurface for ConsolePage {
    fn has_section(&self, id: &str) -> bool {
        self.sections.contains(id)
    }

    fn scroll_to_section(&mut self, id: &str) {
        info!("Scrolling section '{}' into view", id);
        println!("[PAGE] #{}", id);
    }

    fn scroll_to_edge(&mut self, edge: ScrollEdge) {
        info!("Scrolling page to {:?}", edge);
        println!("[PAGE] {:?}", edge);
    }

    fn show_message(&mut self, message: &str) {
        self.message = message.to_string();
        println!("[ASSISTANT] {}", message);
    }
}
