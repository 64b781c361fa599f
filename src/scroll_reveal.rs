//! Reveals page blocks once they scroll into view.
//!
//! Every target starts out with the `reveal-pending` class. When enough of
//! it is on screen the class is swapped for its marker (`revealed`, or
//! `animate` for timeline entries). Project cards are staggered so they
//! land one after another. A block is revealed at most once.

use tracing::{debug, info};

use crate::constants::*;
use crate::document::{Document, Element, ElementId};
use crate::error::Result;
use crate::event::PageEvent;
use crate::page::Component;
use crate::scheduler::Scheduler;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealRule {
    pub class: &'static str,
    pub marker: &'static str,
    pub threshold: f32,
    /// Delay added per element of this class, by document order.
    pub stagger_ms: u64,
}

pub const RULES: &[RevealRule] = &[
    RevealRule {
        class: "bio-text",
        marker: REVEALED,
        threshold: REVEAL_THRESHOLD,
        stagger_ms: 0,
    },
    RevealRule {
        class: "skill-category",
        marker: REVEALED,
        threshold: REVEAL_THRESHOLD,
        stagger_ms: 0,
    },
    RevealRule {
        class: "contact-item",
        marker: REVEALED,
        threshold: REVEAL_THRESHOLD,
        stagger_ms: 0,
    },
    RevealRule {
        class: "timeline-content",
        marker: ANIMATE,
        threshold: TIMELINE_THRESHOLD,
        stagger_ms: 0,
    },
    RevealRule {
        class: "project-card",
        marker: REVEALED,
        threshold: REVEAL_THRESHOLD,
        stagger_ms: REVEAL_STAGGER_MS,
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    Waiting,
    Scheduled,
    Revealed,
}

struct Target {
    element: ElementId,
    marker: &'static str,
    threshold: f32,
    delay_ms: u64,
    phase: Phase,
}

pub struct ScrollReveal {
    targets: Vec<Target>,
    scheduler: Scheduler<usize>,
}

/// True while `element` is still waiting for its reveal.
pub fn is_pending(element: &Element) -> bool {
    element.has_class(REVEAL_PENDING)
}

impl ScrollReveal {
    pub fn mount(doc: &mut Document, now_ms: u64) -> Result<Self> {
        let mut targets = Vec::new();
        for rule in RULES {
            for (i, element) in doc.query_all(&[rule.class]).into_iter().enumerate() {
                doc.add_class(element, REVEAL_PENDING);
                targets.push(Target {
                    element,
                    marker: rule.marker,
                    threshold: rule.threshold,
                    delay_ms: i as u64 * rule.stagger_ms,
                    phase: Phase::Waiting,
                });
            }
        }

        let mut reveal = Self {
            targets,
            scheduler: Scheduler::new(),
        };
        reveal.check(doc, now_ms);

        info!(targets = reveal.targets.len(), "scroll reveal mounted");
        Ok(reveal)
    }

    pub fn pending(&self) -> usize {
        self.targets
            .iter()
            .filter(|t| t.phase != Phase::Revealed)
            .count()
    }

    fn check(&mut self, doc: &mut Document, now_ms: u64) {
        for i in 0..self.targets.len() {
            let target = &self.targets[i];
            if target.phase != Phase::Waiting {
                continue;
            }
            let ratio = doc.visible_ratio(target.element, REVEAL_BOTTOM_MARGIN);
            if ratio <= 0.0 || ratio < target.threshold {
                continue;
            }
            if target.delay_ms == 0 {
                self.reveal(doc, i);
            } else {
                self.scheduler.schedule_once(now_ms, target.delay_ms, i);
                self.targets[i].phase = Phase::Scheduled;
            }
        }
    }

    fn reveal(&mut self, doc: &mut Document, index: usize) {
        let target = &mut self.targets[index];
        doc.remove_class(target.element, REVEAL_PENDING);
        doc.add_class(target.element, target.marker);
        target.phase = Phase::Revealed;
        debug!(element = ?target.element, marker = target.marker, "block revealed");
    }
}

impl Component for ScrollReveal {
    fn name(&self) -> &'static str {
        "scroll-reveal"
    }

    fn handle_event(&mut self, doc: &mut Document, event: &PageEvent, now_ms: u64) {
        // Clicks can unhide filtered cards without any scrolling.
        if let PageEvent::Scroll { .. } | PageEvent::Resize { .. } | PageEvent::Click(_) = event {
            self.check(doc, now_ms);
        }
    }

    fn tick(&mut self, doc: &mut Document, now_ms: u64) {
        while let Some(index) = self.scheduler.pop_due(now_ms) {
            self.reveal(doc, index);
        }
    }
}
