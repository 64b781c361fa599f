use crate::constants::ACTIVE;
use crate::document::{Document, ElementId};
use crate::error::{CarouselError, Result};

/// Element references for the image slideshow, resolved once at mount.
#[derive(Debug, Clone)]
pub struct ImageView {
    pub main_slide: ElementId,
    pub counter: ElementId,
    pub total: ElementId,
    pub container: ElementId,
    pub prev_btn: ElementId,
    pub next_btn: ElementId,
    pub thumbnails: Vec<ElementId>,
}

impl ImageView {
    pub fn resolve(doc: &Document, image_count: usize) -> Result<Self> {
        let by_id = |id: &str| {
            doc.get_element_by_id(id)
                .ok_or_else(|| CarouselError::missing(format!("#{id}")))
        };
        let by_class = |class: &str| {
            doc.query(&[class])
                .ok_or_else(|| CarouselError::missing(format!(".{class}")))
        };

        let view = Self {
            main_slide: by_id("main-slide")?,
            counter: by_id("current-slide")?,
            total: by_id("total-slides")?,
            container: by_class("slideshow-container")?,
            prev_btn: by_class("prev-btn")?,
            next_btn: by_class("next-btn")?,
            thumbnails: doc.query_all(&["thumbnail"]),
        };

        if view.thumbnails.len() != image_count {
            return Err(CarouselError::IndicatorMismatch {
                expected: image_count,
                found: view.thumbnails.len(),
            });
        }
        Ok(view)
    }

    pub fn set_total(&self, doc: &mut Document, total: usize) {
        doc.element_mut(self.total).text = total.to_string();
    }

    /// Starts the fade-out and updates everything that changes immediately.
    pub fn begin_fade(&self, doc: &mut Document, index: usize) {
        doc.element_mut(self.main_slide).opacity = 0.0;
        doc.element_mut(self.counter).text = (index + 1).to_string();
        for (i, thumb) in self.thumbnails.iter().enumerate() {
            doc.toggle_class(*thumb, ACTIVE, i == index);
        }
    }

    /// Deferred half of a transition: new source in, fade back up.
    pub fn swap(&self, doc: &mut Document, src: &str, alt: String) {
        let slide = doc.element_mut(self.main_slide);
        slide.src = Some(src.to_string());
        slide.alt = alt;
        slide.opacity = 1.0;
    }

    pub fn thumbnail_index(&self, target: ElementId) -> Option<usize> {
        self.thumbnails.iter().position(|t| *t == target)
    }
}
