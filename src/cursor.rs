//! Custom cursor that trails the pointer, grows over interactive controls
//! and marks itself while the page scrolls.

use std::collections::HashSet;

use tracing::info;

use crate::constants::*;
use crate::document::{Document, Element, ElementId, Rect};
use crate::error::{CarouselError, Result};
use crate::event::PageEvent;
use crate::page::Component;
use crate::scheduler::{Scheduler, TaskHandle};

const INTERACTIVE: &[&str] = &[
    "prev-btn",
    "next-btn",
    "thumbnail",
    "persona-nav-btn",
    "persona-dot",
    "filter-btn",
    "nav-dot",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CursorTask {
    ScrollIdle,
}

/// Whether hovering `element` puts the cursor in its `hovering` state.
pub fn is_interactive(element: &Element) -> bool {
    element.id.as_deref() == Some("backToTop") || INTERACTIVE.iter().any(|c| element.has_class(c))
}

pub struct CustomCursor {
    element: ElementId,
    pointer: (f32, f32),
    position: (f32, f32),
    last_frame_ms: u64,
    hovered: HashSet<ElementId>,
    scheduler: Scheduler<CursorTask>,
    scroll_idle: Option<TaskHandle>,
}

impl CustomCursor {
    pub fn mount(doc: &mut Document, now_ms: u64) -> Result<Self> {
        let element = doc
            .query(&["custom-cursor"])
            .ok_or_else(|| CarouselError::missing(".custom-cursor"))?;
        let cursor = Self {
            element,
            pointer: (0.0, 0.0),
            position: (0.0, 0.0),
            last_frame_ms: now_ms,
            hovered: HashSet::new(),
            scheduler: Scheduler::new(),
            scroll_idle: None,
        };
        cursor.place(doc);
        info!("custom cursor mounted");
        Ok(cursor)
    }

    /// Eased position in viewport coordinates.
    pub fn position(&self) -> (f32, f32) {
        self.position
    }

    fn place(&self, doc: &mut Document) {
        let (x, y) = self.position;
        doc.element_mut(self.element).bounds =
            Rect::new(x - CURSOR_SIZE / 2.0, y - CURSOR_SIZE / 2.0, CURSOR_SIZE, CURSOR_SIZE);
    }

    /// Closes `CURSOR_EASING` of the gap once per elapsed frame.
    fn ease(&mut self, now_ms: u64) {
        let frames = now_ms.saturating_sub(self.last_frame_ms) / CURSOR_FRAME_MS;
        if frames == 0 {
            return;
        }
        self.last_frame_ms += frames * CURSOR_FRAME_MS;
        let keep = (1.0 - CURSOR_EASING).powi(frames.min(i32::MAX as u64) as i32);
        let (px, py) = self.pointer;
        let (x, y) = self.position;
        self.position = (px + (x - px) * keep, py + (y - py) * keep);
    }
}

impl Component for CustomCursor {
    fn name(&self) -> &'static str {
        "custom-cursor"
    }

    fn handle_event(&mut self, doc: &mut Document, event: &PageEvent, now_ms: u64) {
        match *event {
            PageEvent::PointerMove { x, y } => self.pointer = (x, y),
            PageEvent::PointerEnter(target) if is_interactive(doc.element(target)) => {
                self.hovered.insert(target);
                doc.add_class(self.element, HOVERING);
            }
            PageEvent::PointerLeave(target) => {
                if self.hovered.remove(&target) && self.hovered.is_empty() {
                    doc.remove_class(self.element, HOVERING);
                }
            }
            PageEvent::Scroll { .. } => {
                doc.add_class(self.element, SCROLLING);
                if let Some(handle) = self.scroll_idle.take() {
                    self.scheduler.cancel(handle);
                }
                self.scroll_idle = Some(self.scheduler.schedule_once(
                    now_ms,
                    CURSOR_SCROLL_IDLE_MS,
                    CursorTask::ScrollIdle,
                ));
            }
            _ => {}
        }
    }

    fn tick(&mut self, doc: &mut Document, now_ms: u64) {
        while let Some(CursorTask::ScrollIdle) = self.scheduler.pop_due(now_ms) {
            self.scroll_idle = None;
            doc.remove_class(self.element, SCROLLING);
        }
        self.ease(now_ms);
        self.place(doc);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout;

    fn setup() -> (Document, ElementId, CustomCursor) {
        let mut doc = Document::new(800.0, 600.0);
        let element = layout::cursor(&mut doc);
        let cursor = CustomCursor::mount(&mut doc, 0).unwrap();
        (doc, element, cursor)
    }

    #[test]
    fn trails_the_pointer_a_tenth_per_frame() {
        let (mut doc, element, mut cursor) = setup();

        cursor.handle_event(&mut doc, &PageEvent::PointerMove { x: 100.0, y: 200.0 }, 0);
        cursor.tick(&mut doc, 15);
        assert_eq!(cursor.position(), (0.0, 0.0));

        cursor.tick(&mut doc, 16);
        let (x, y) = cursor.position();
        assert!((x - 10.0).abs() < 1e-3);
        assert!((y - 20.0).abs() < 1e-3);

        cursor.tick(&mut doc, 32);
        let (x, _) = cursor.position();
        assert!((x - 19.0).abs() < 1e-3);

        let bounds = doc.element(element).bounds;
        assert!((bounds.x + CURSOR_SIZE / 2.0 - 19.0).abs() < 1e-3);
        assert!(doc.element(element).fixed);
    }

    #[test]
    fn long_pauses_settle_on_the_pointer() {
        let (mut doc, _, mut cursor) = setup();
        cursor.handle_event(&mut doc, &PageEvent::PointerMove { x: 300.0, y: 40.0 }, 0);
        cursor.tick(&mut doc, 60_000);

        let (x, y) = cursor.position();
        assert!((x - 300.0).abs() < 1e-3);
        assert!((y - 40.0).abs() < 1e-3);
    }

    #[test]
    fn hovering_lasts_while_any_control_is_under_the_pointer() {
        let (mut doc, element, mut cursor) = setup();
        let button = doc.add(Element::new().with_class("filter-btn"));
        let dot = doc.add(Element::new().with_class("nav-dot"));
        let panel = doc.add(Element::new().with_class("project-card"));

        cursor.handle_event(&mut doc, &PageEvent::PointerEnter(panel), 0);
        assert!(!doc.has_class(element, HOVERING));

        cursor.handle_event(&mut doc, &PageEvent::PointerEnter(button), 0);
        cursor.handle_event(&mut doc, &PageEvent::PointerEnter(dot), 0);
        cursor.handle_event(&mut doc, &PageEvent::PointerLeave(button), 0);
        assert!(doc.has_class(element, HOVERING));

        cursor.handle_event(&mut doc, &PageEvent::PointerLeave(dot), 0);
        assert!(!doc.has_class(element, HOVERING));
    }

    #[test]
    fn scrolling_clears_after_the_page_settles() {
        let (mut doc, element, mut cursor) = setup();

        cursor.handle_event(&mut doc, &PageEvent::Scroll { y: 100.0 }, 1000);
        assert!(doc.has_class(element, SCROLLING));
        cursor.handle_event(&mut doc, &PageEvent::Scroll { y: 200.0 }, 1100);

        cursor.tick(&mut doc, 1150);
        assert!(doc.has_class(element, SCROLLING));
        cursor.tick(&mut doc, 1250);
        assert!(!doc.has_class(element, SCROLLING));
    }

    #[test]
    fn clicks_pass_through_the_cursor() {
        let mut doc = Document::new(800.0, 600.0);
        let button = doc.add(
            Element::new()
                .with_class("next-btn")
                .with_bounds(Rect::new(90.0, 90.0, 40.0, 40.0)),
        );
        let element = layout::cursor(&mut doc);
        let mut cursor = CustomCursor::mount(&mut doc, 0).unwrap();
        cursor.handle_event(&mut doc, &PageEvent::PointerMove { x: 100.0, y: 100.0 }, 0);
        cursor.tick(&mut doc, 60_000);

        assert!(doc.element(element).bounds.contains_point(100.0, 100.0));
        assert_eq!(doc.hit_test(100.0, 100.0), Some(button));
    }
}
