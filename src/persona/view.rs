use crate::constants::{ACTIVE, PREV};
use crate::document::{Document, ElementId};
use crate::error::{CarouselError, Result};

#[derive(Debug, Clone)]
pub struct PersonaView {
    pub container: ElementId,
    pub slides: Vec<ElementId>,
    pub dots: Vec<ElementId>,
    pub prev_btn: ElementId,
    pub next_btn: ElementId,
}

impl PersonaView {
    pub fn resolve(doc: &Document) -> Result<Self> {
        let slides = doc.query_all(&["persona-slide"]);
        if slides.is_empty() {
            return Err(CarouselError::missing(".persona-slide"));
        }
        let dots = doc.query_all(&["persona-dot"]);
        if dots.len() != slides.len() {
            return Err(CarouselError::IndicatorMismatch {
                expected: slides.len(),
                found: dots.len(),
            });
        }
        let find = |classes: &[&str]| {
            doc.query(classes)
                .ok_or_else(|| CarouselError::missing(format!(".{}", classes.join("."))))
        };

        Ok(Self {
            container: find(&["persona-slideshow"])?,
            prev_btn: find(&["persona-nav-btn", "prev"])?,
            next_btn: find(&["persona-nav-btn", "next"])?,
            slides,
            dots,
        })
    }

    /// Applies `index` in one step; there is no fade on persona cards.
    pub fn render(&self, doc: &mut Document, index: usize, before: usize) {
        for slide in &self.slides {
            doc.remove_class(*slide, ACTIVE);
            doc.remove_class(*slide, PREV);
        }
        for dot in &self.dots {
            doc.remove_class(*dot, ACTIVE);
        }

        doc.add_class(self.slides[index], ACTIVE);
        doc.add_class(self.dots[index], ACTIVE);
        // With a single card the previous card is the active one.
        if before != index {
            doc.add_class(self.slides[before], PREV);
        }

        doc.element_mut(self.prev_btn).disabled = index == 0;
        doc.element_mut(self.next_btn).disabled = index == self.slides.len() - 1;
    }

    pub fn dot_index(&self, target: ElementId) -> Option<usize> {
        self.dots.iter().position(|d| *d == target)
    }
}
