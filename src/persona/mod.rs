//! Persona cards: one active card, dots underneath, and nav buttons that
//! disable at the ends even though the index itself wraps.

pub mod view;

use tracing::{debug, info};

use crate::carousel::{AutoAdvanceTimer, IndexCycle};
use crate::document::Document;
use crate::error::Result;
use crate::event::{Key, PageEvent};
use crate::page::Component;
use crate::scheduler::Scheduler;

pub use view::PersonaView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersonaTask {
    Advance,
}

pub struct PersonaSlideshow {
    cycle: IndexCycle,
    view: PersonaView,
    scheduler: Scheduler<PersonaTask>,
    timer: Option<AutoAdvanceTimer>,
    hovered: bool,
    page_hidden: bool,
}

impl PersonaSlideshow {
    pub fn mount(doc: &mut Document, auto_advance_ms: Option<u64>, now_ms: u64) -> Result<Self> {
        let view = PersonaView::resolve(doc)?;
        let cycle = IndexCycle::new(view.slides.len(), 0)?;

        let mut persona = Self {
            cycle,
            view,
            scheduler: Scheduler::new(),
            timer: auto_advance_ms.map(AutoAdvanceTimer::new),
            hovered: false,
            page_hidden: false,
        };
        persona.render(doc);
        persona.start(now_ms);

        info!(cards = persona.cycle.len(), "persona slideshow mounted");
        Ok(persona)
    }

    pub fn current(&self) -> usize {
        self.cycle.current()
    }

    pub fn is_auto_advancing(&self) -> bool {
        self.timer.as_ref().is_some_and(AutoAdvanceTimer::is_running)
    }

    pub fn go_to(&mut self, doc: &mut Document, requested: i64) -> usize {
        let applied = self.cycle.go_to(requested);
        self.render(doc);
        applied
    }

    pub fn next(&mut self, doc: &mut Document) -> usize {
        let applied = self.cycle.next();
        self.render(doc);
        applied
    }

    pub fn prev(&mut self, doc: &mut Document) -> usize {
        let applied = self.cycle.prev();
        self.render(doc);
        applied
    }

    pub fn start(&mut self, now_ms: u64) {
        if let Some(timer) = self.timer.as_mut() {
            timer.start(&mut self.scheduler, now_ms, PersonaTask::Advance);
        }
    }

    pub fn stop(&mut self) {
        if let Some(timer) = self.timer.as_mut() {
            timer.stop(&mut self.scheduler);
        }
    }

    fn render(&self, doc: &mut Document) {
        let index = self.cycle.current();
        self.view.render(doc, index, self.cycle.before(index));
        debug!(index, "persona card shown");
    }

    fn resume_if_allowed(&mut self, now_ms: u64) {
        if !self.hovered && !self.page_hidden {
            self.start(now_ms);
        }
    }
}

impl Component for PersonaSlideshow {
    fn name(&self) -> &'static str {
        "persona-slideshow"
    }

    fn routes_keyboard(&self) -> bool {
        true
    }

    fn handle_event(&mut self, doc: &mut Document, event: &PageEvent, now_ms: u64) {
        match *event {
            PageEvent::Click(target) if target == self.view.prev_btn => {
                self.prev(doc);
            }
            PageEvent::Click(target) if target == self.view.next_btn => {
                self.next(doc);
            }
            PageEvent::Click(target) => {
                if let Some(index) = self.view.dot_index(target) {
                    self.go_to(doc, index as i64);
                }
            }
            PageEvent::KeyDown(key) if doc.is_in_viewport(self.view.container) => match key {
                Key::ArrowLeft => {
                    self.prev(doc);
                }
                Key::ArrowRight => {
                    self.next(doc);
                }
                Key::Other => {}
            },
            PageEvent::PointerEnter(target) if target == self.view.container => {
                self.hovered = true;
                self.stop();
            }
            PageEvent::PointerLeave(target) if target == self.view.container => {
                self.hovered = false;
                self.resume_if_allowed(now_ms);
            }
            PageEvent::VisibilityChanged { hidden } => {
                self.page_hidden = hidden;
                if hidden {
                    self.stop();
                } else {
                    self.resume_if_allowed(now_ms);
                }
            }
            _ => {}
        }
    }

    fn tick(&mut self, doc: &mut Document, now_ms: u64) {
        while let Some(PersonaTask::Advance) = self.scheduler.pop_due(now_ms) {
            self.next(doc);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CarouselConfig;
    use crate::constants::{ACTIVE, PREV};
    use crate::layout;

    fn setup(auto_advance_ms: Option<u64>) -> (Document, PersonaSlideshow) {
        let mut doc = layout::build_document(&[], &CarouselConfig::default(), 1280.0, 2000.0);
        let persona = PersonaSlideshow::mount(&mut doc, auto_advance_ms, 0).unwrap();
        (doc, persona)
    }

    fn with_class(doc: &Document, query: &str, class: &str) -> Vec<usize> {
        doc.query_all(&[query])
            .into_iter()
            .enumerate()
            .filter(|(_, e)| doc.has_class(*e, class))
            .map(|(i, _)| i)
            .collect()
    }

    #[test]
    fn first_card_marks_last_as_prev() {
        let (doc, persona) = setup(None);

        assert_eq!(persona.current(), 0);
        assert_eq!(with_class(&doc, "persona-slide", ACTIVE), vec![0]);
        assert_eq!(with_class(&doc, "persona-slide", PREV), vec![3]);
        assert_eq!(with_class(&doc, "persona-dot", ACTIVE), vec![0]);
    }

    #[test]
    fn dot_click_jumps_directly() {
        let (mut doc, mut persona) = setup(None);
        let dots = doc.query_all(&["persona-dot"]);

        persona.handle_event(&mut doc, &PageEvent::Click(dots[2]), 0);

        assert_eq!(persona.current(), 2);
        assert_eq!(with_class(&doc, "persona-slide", ACTIVE), vec![2]);
        assert_eq!(with_class(&doc, "persona-slide", PREV), vec![1]);
        assert_eq!(with_class(&doc, "persona-dot", ACTIVE), vec![2]);
    }

    #[test]
    fn keyboard_wraps_even_though_buttons_disable() {
        let (mut doc, mut persona) = setup(None);

        persona.handle_event(&mut doc, &PageEvent::KeyDown(Key::ArrowLeft), 0);
        assert_eq!(persona.current(), 3);

        let next = doc.query(&["persona-nav-btn", "next"]).unwrap();
        assert!(doc.element(next).disabled);
    }

    #[test]
    fn keyboard_ignored_when_scrolled_away() {
        let (mut doc, mut persona) = setup(None);
        doc.scroll_to(1900.0);

        persona.handle_event(&mut doc, &PageEvent::KeyDown(Key::ArrowRight), 0);
        assert_eq!(persona.current(), 0);
    }

    #[test]
    fn optional_auto_advance_pauses_on_hover() {
        let (mut doc, mut persona) = setup(Some(1000));
        let container = doc.query(&["persona-slideshow"]).unwrap();

        persona.tick(&mut doc, 1000);
        assert_eq!(persona.current(), 1);

        persona.handle_event(&mut doc, &PageEvent::PointerEnter(container), 1100);
        persona.tick(&mut doc, 5000);
        assert_eq!(persona.current(), 1);

        persona.handle_event(&mut doc, &PageEvent::PointerLeave(container), 5000);
        persona.tick(&mut doc, 6000);
        assert_eq!(persona.current(), 2);
    }

    #[test]
    fn manual_mode_never_schedules() {
        let (mut doc, mut persona) = setup(None);
        assert!(!persona.is_auto_advancing());
        persona.tick(&mut doc, 60_000);
        assert_eq!(persona.current(), 0);
    }
}
