use tracing::info;

use crate::constants::{BACK_TO_TOP_THRESHOLD, SHOW};
use crate::document::{Document, ElementId};
use crate::error::{CarouselError, Result};
use crate::event::PageEvent;
use crate::layout;
use crate::page::Component;

/// Shows `#backToTop` once the page is scrolled down; clicking it scrolls home.
/// The button is pinned to the bottom right corner and follows window resizes.
pub struct BackToTop {
    button: ElementId,
}

impl BackToTop {
    pub fn mount(doc: &mut Document, _now_ms: u64) -> Result<Self> {
        let button = doc
            .get_element_by_id("backToTop")
            .ok_or_else(|| CarouselError::missing("#backToTop"))?;
        let back_to_top = Self { button };
        back_to_top.sync(doc);
        info!("back to top button mounted");
        Ok(back_to_top)
    }

    fn sync(&self, doc: &mut Document) {
        let show = doc.scroll_y() > BACK_TO_TOP_THRESHOLD;
        doc.toggle_class(self.button, SHOW, show);
    }
}

impl Component for BackToTop {
    fn name(&self) -> &'static str {
        "back-to-top"
    }

    fn handle_event(&mut self, doc: &mut Document, event: &PageEvent, _now_ms: u64) {
        match *event {
            PageEvent::Scroll { .. } => self.sync(doc),
            PageEvent::Click(target) if target == self.button => {
                doc.scroll_to(0.0);
                self.sync(doc);
            }
            PageEvent::Resize { width, height } => {
                doc.element_mut(self.button).bounds = layout::back_to_top_bounds(width, height);
            }
            _ => {}
        }
    }

    fn tick(&mut self, _doc: &mut Document, _now_ms: u64) {}
}
