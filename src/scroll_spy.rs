//! Section nav dots: the dot of the section under the top of the viewport
//! is marked active, and clicking a dot centres its section on screen.

use tracing::{debug, info};

use crate::constants::*;
use crate::document::{Document, ElementId};
use crate::error::{CarouselError, Result};
use crate::event::PageEvent;
use crate::layout;
use crate::page::Component;
use crate::scheduler::{Scheduler, TaskHandle};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum SpyTask {
    Update,
}

struct Section {
    element: ElementId,
    id: String,
}

pub struct ScrollSpy {
    dots: Vec<ElementId>,
    sections: Vec<Section>,
    current: Option<String>,
    scheduler: Scheduler<SpyTask>,
    debounce: Option<TaskHandle>,
}

impl ScrollSpy {
    pub fn mount(doc: &mut Document, _now_ms: u64) -> Result<Self> {
        let dots = doc.query_all(&["nav-dot"]);
        if dots.is_empty() {
            return Err(CarouselError::missing(".nav-dot"));
        }
        let sections = doc
            .query_all(&["section"])
            .into_iter()
            .filter_map(|element| {
                doc.element(element).id.clone().map(|id| Section { element, id })
            })
            .collect();

        let mut spy = Self {
            dots,
            sections,
            current: None,
            scheduler: Scheduler::new(),
            debounce: None,
        };
        spy.update(doc);

        info!(
            dots = spy.dots.len(),
            sections = spy.sections.len(),
            "scroll spy mounted"
        );
        Ok(spy)
    }

    /// Id of the section the active dot points at, if any.
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    fn update(&mut self, doc: &mut Document) {
        let line = doc.scroll_y() + SCROLL_SPY_OFFSET;
        // Later sections win when they overlap.
        self.current = self
            .sections
            .iter()
            .rev()
            .find(|s| {
                let bounds = doc.page_bounds(s.element);
                line >= bounds.y && line < bounds.y + bounds.height
            })
            .map(|s| s.id.clone());

        for dot in &self.dots {
            let on = self.current.is_some()
                && doc.element(*dot).attr("data-section") == self.current.as_deref();
            doc.toggle_class(*dot, ACTIVE, on);
        }
    }

    fn scroll_to_section(&self, doc: &mut Document, dot: ElementId) {
        let Some(target) = doc
            .element(dot)
            .attr("href")
            .and_then(|href| href.strip_prefix('#'))
            .and_then(|id| doc.get_element_by_id(id))
        else {
            debug!(?dot, "nav dot points at no section");
            return;
        };
        let bounds = doc.page_bounds(target);
        let centred = bounds.y - (doc.viewport().height - bounds.height) / 2.0;
        doc.scroll_to(centred.max(0.0));
    }

    fn anchor(&self, doc: &mut Document, width: f32, height: f32) {
        for (i, dot) in self.dots.iter().enumerate() {
            doc.element_mut(*dot).bounds = layout::nav_dot_bounds(i, self.dots.len(), width, height);
        }
    }
}

impl Component for ScrollSpy {
    fn name(&self) -> &'static str {
        "scroll-spy"
    }

    fn handle_event(&mut self, doc: &mut Document, event: &PageEvent, now_ms: u64) {
        match *event {
            PageEvent::Click(target) if self.dots.contains(&target) => {
                self.scroll_to_section(doc, target);
            }
            PageEvent::Scroll { .. } => {
                if let Some(handle) = self.debounce.take() {
                    self.scheduler.cancel(handle);
                }
                self.debounce = Some(self.scheduler.schedule_once(
                    now_ms,
                    SCROLL_SPY_DEBOUNCE_MS,
                    SpyTask::Update,
                ));
            }
            PageEvent::Resize { width, height } => {
                self.anchor(doc, width, height);
                self.update(doc);
            }
            _ => {}
        }
    }

    fn tick(&mut self, doc: &mut Document, now_ms: u64) {
        while let Some(SpyTask::Update) = self.scheduler.pop_due(now_ms) {
            self.debounce = None;
            self.update(doc);
        }
    }
}
