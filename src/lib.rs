//! Behaviour layer for a portfolio page: photo slideshow, persona cards,
//! project tag filter, back-to-top button, scroll reveals, section nav dots
//! and a trailing cursor, all driven by a logical millisecond clock so the
//! host decides when time passes.

pub mod back_to_top;
pub mod carousel;
pub mod config;
pub mod constants;
pub mod cursor;
pub mod document;
pub mod error;
pub mod event;
pub mod filter;
pub mod image_slideshow;
pub mod layout;
pub mod page;
pub mod persona;
pub mod scheduler;
pub mod scroll_reveal;
pub mod scroll_spy;

use tracing::info;

use crate::back_to_top::BackToTop;
use crate::config::CarouselConfig;
use crate::cursor::CustomCursor;
use crate::filter::ProjectFilter;
use crate::image_slideshow::ImageSlideshow;
use crate::page::Page;
use crate::persona::PersonaSlideshow;
use crate::scroll_reveal::ScrollReveal;
use crate::scroll_spy::ScrollSpy;

/// Lays out the page and mounts every component. A component whose markup
/// is missing is logged and left out; the rest still work.
pub fn build_page(
    images: Vec<String>,
    config: &CarouselConfig,
    viewport_width: f32,
    viewport_height: f32,
    now_ms: u64,
) -> Page {
    let document = layout::build_document(&images, config, viewport_width, viewport_height);
    let mut page = Page::new(document);

    let slideshow = config.slideshow.clone();
    let persona_interval = config.persona.auto_advance_ms;
    let mounted = [
        page.mount(now_ms, |doc, now| ImageSlideshow::mount(doc, images, &slideshow, now)),
        page.mount(now_ms, |doc, now| PersonaSlideshow::mount(doc, persona_interval, now)),
        page.mount(now_ms, ProjectFilter::mount),
        page.mount(now_ms, BackToTop::mount),
        page.mount(now_ms, ScrollReveal::mount),
        page.mount(now_ms, ScrollSpy::mount),
        page.mount(now_ms, CustomCursor::mount),
    ];
    let failed = mounted.iter().filter(|m| m.is_err()).count();
    info!(mounted = mounted.len() - failed, failed, "page assembled");

    page
}
