//! Photo slideshow: fades the main image, swaps its source after a short
//! delay, keeps the counter and thumbnails in step and auto-advances
//! while the pointer is away.

pub mod view;

use tracing::{debug, info};

use crate::carousel::{AutoAdvanceTimer, IndexCycle, TransitionState};
use crate::config::SlideshowConfig;
use crate::document::Document;
use crate::error::{CarouselError, Result};
use crate::event::{Key, PageEvent};
use crate::page::Component;
use crate::scheduler::Scheduler;

pub use view::ImageView;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageTask {
    Advance,
    Swap { index: usize },
}

pub struct ImageSlideshow {
    images: Vec<String>,
    cycle: IndexCycle,
    view: ImageView,
    state: TransitionState,
    pending_swaps: usize,
    scheduler: Scheduler<ImageTask>,
    timer: AutoAdvanceTimer,
    fade_ms: u64,
    alt_prefix: String,
    hovered: bool,
    page_hidden: bool,
}

impl ImageSlideshow {
    pub fn mount(
        doc: &mut Document,
        images: Vec<String>,
        config: &SlideshowConfig,
        now_ms: u64,
    ) -> Result<Self> {
        if images.is_empty() {
            return Err(CarouselError::EmptySequence);
        }
        let view = ImageView::resolve(doc, images.len())?;
        let cycle = IndexCycle::new(images.len(), config.initial_index)?;

        let mut slideshow = Self {
            state: TransitionState::Idle(cycle.current()),
            images,
            cycle,
            view,
            pending_swaps: 0,
            scheduler: Scheduler::new(),
            timer: AutoAdvanceTimer::new(config.auto_advance_ms),
            fade_ms: config.fade_ms,
            alt_prefix: config.alt_prefix.clone(),
            hovered: false,
            page_hidden: false,
        };

        slideshow.view.set_total(doc, slideshow.images.len());
        slideshow.render(doc, slideshow.cycle.current(), now_ms);
        slideshow.timer.start(&mut slideshow.scheduler, now_ms, ImageTask::Advance);

        info!(
            images = slideshow.images.len(),
            initial = slideshow.cycle.current(),
            "image slideshow mounted"
        );
        Ok(slideshow)
    }

    pub fn current(&self) -> usize {
        self.cycle.current()
    }

    pub fn state(&self) -> TransitionState {
        self.state
    }

    pub fn is_auto_advancing(&self) -> bool {
        self.timer.is_running()
    }

    pub fn go_to(&mut self, doc: &mut Document, requested: i64, now_ms: u64) -> usize {
        let applied = self.cycle.go_to(requested);
        self.render(doc, applied, now_ms);
        applied
    }

    pub fn next(&mut self, doc: &mut Document, now_ms: u64) -> usize {
        let applied = self.cycle.next();
        self.render(doc, applied, now_ms);
        applied
    }

    pub fn prev(&mut self, doc: &mut Document, now_ms: u64) -> usize {
        let applied = self.cycle.prev();
        self.render(doc, applied, now_ms);
        applied
    }

    pub fn start(&mut self, now_ms: u64) {
        self.timer.start(&mut self.scheduler, now_ms, ImageTask::Advance);
    }

    pub fn stop(&mut self) {
        self.timer.stop(&mut self.scheduler);
    }

    fn render(&mut self, doc: &mut Document, index: usize, now_ms: u64) {
        let from = match self.state {
            TransitionState::Idle(i) => i,
            TransitionState::Transitioning { to, .. } => to,
        };
        self.view.begin_fade(doc, index);
        // A swap already in flight is not cancelled; the later one lands last.
        self.scheduler
            .schedule_once(now_ms, self.fade_ms, ImageTask::Swap { index });
        self.pending_swaps += 1;
        self.state = TransitionState::Transitioning { from, to: index };
        debug!(from, to = index, "image slideshow transition");
    }

    fn finish_swap(&mut self, doc: &mut Document, index: usize) {
        let alt = format!("{} - Slide {}", self.alt_prefix, index + 1);
        self.view.swap(doc, &self.images[index], alt);
        self.pending_swaps = self.pending_swaps.saturating_sub(1);
        if self.pending_swaps == 0 {
            self.state = TransitionState::Idle(self.cycle.current());
        }
    }

    fn resume_if_allowed(&mut self, now_ms: u64) {
        if !self.hovered && !self.page_hidden {
            self.start(now_ms);
        }
    }
}

impl Component for ImageSlideshow {
    fn name(&self) -> &'static str {
        "image-slideshow"
    }

    fn routes_keyboard(&self) -> bool {
        true
    }

    fn handle_event(&mut self, doc: &mut Document, event: &PageEvent, now_ms: u64) {
        match *event {
            PageEvent::Click(target) if target == self.view.prev_btn => {
                self.prev(doc, now_ms);
            }
            PageEvent::Click(target) if target == self.view.next_btn => {
                self.next(doc, now_ms);
            }
            PageEvent::Click(target) => {
                if let Some(index) = self.view.thumbnail_index(target) {
                    self.go_to(doc, index as i64, now_ms);
                }
            }
            PageEvent::KeyDown(key) => {
                if !doc.is_in_viewport(self.view.container) {
                    return;
                }
                match key {
                    Key::ArrowLeft => {
                        self.prev(doc, now_ms);
                    }
                    Key::ArrowRight => {
                        self.next(doc, now_ms);
                    }
                    Key::Other => {}
                }
            }
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
        while let Some(task) = self.scheduler.pop_due(now_ms) {
            match task {
                ImageTask::Advance => {
                    self.next(doc, now_ms);
                }
                ImageTask::Swap { index } => self.finish_swap(doc, index),
            }
        }
    }
}
