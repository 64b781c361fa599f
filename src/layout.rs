//! Builds the page markup the components mount against.
//!
//! Sections are stacked top to bottom: photo slideshow, persona cards,
//! project grid with its filter bar and the about blocks. Fixed on top of
//! them sit the section nav dots, the back-to-top button and the cursor.

use std::collections::BTreeSet;

use crate::config::{AboutConfig, CarouselConfig};
use crate::constants::CURSOR_SIZE;
use crate::document::{Document, Element, ElementId, Rect};

const MARGIN: f32 = 40.0;
const SECTION_GAP: f32 = 60.0;
const BUTTON_SIZE: f32 = 48.0;
const THUMB_HEIGHT: f32 = 48.0;
const THUMB_GAP: f32 = 8.0;
const CARD_WIDTH: f32 = 260.0;
const CARD_HEIGHT: f32 = 140.0;
const TAG_HEIGHT: f32 = 22.0;
const BLOCK_GAP: f32 = 8.0;
const NAV_DOT_SIZE: f32 = 12.0;
const NAV_DOT_PITCH: f32 = 24.0;

pub fn build_document(
    images: &[String],
    config: &CarouselConfig,
    viewport_width: f32,
    viewport_height: f32,
) -> Document {
    let mut doc = Document::new(viewport_width, viewport_height);
    let content_width = (viewport_width - 2.0 * MARGIN).max(200.0);

    let mut y = MARGIN;
    let mut sections = Vec::new();

    let section = open_section(&mut doc, "photos");
    let bottom = image_slideshow(&mut doc, images, MARGIN, y, content_width);
    close_section(&mut doc, section, MARGIN, y, content_width, bottom);
    sections.push("photos");
    y = bottom + SECTION_GAP;

    let titles: Vec<(&str, &str)> = config
        .persona
        .cards
        .iter()
        .map(|c| (c.title.as_str(), c.body.as_str()))
        .collect();
    let section = open_section(&mut doc, "personas");
    let bottom = persona_slideshow(&mut doc, &titles, MARGIN, y, content_width);
    close_section(&mut doc, section, MARGIN, y, content_width, bottom);
    sections.push("personas");
    y = bottom + SECTION_GAP;

    let projects: Vec<(&str, Vec<&str>)> = config
        .projects
        .iter()
        .map(|p| (p.title.as_str(), p.tags.iter().map(String::as_str).collect()))
        .collect();
    let section = open_section(&mut doc, "projects");
    let bottom = project_grid(&mut doc, &projects, MARGIN, y, content_width);
    close_section(&mut doc, section, MARGIN, y, content_width, bottom);
    sections.push("projects");
    y = bottom + SECTION_GAP;

    let section = open_section(&mut doc, "about");
    let bottom = about_section(&mut doc, &config.about, MARGIN, y, content_width);
    close_section(&mut doc, section, MARGIN, y, content_width, bottom);
    sections.push("about");

    nav_dots(&mut doc, &sections, viewport_width, viewport_height);
    back_to_top(&mut doc, viewport_width, viewport_height);
    cursor(&mut doc);

    doc
}

/// Sections are added before their content so hit testing prefers the content.
fn open_section(doc: &mut Document, id: &str) -> ElementId {
    doc.add(Element::new().with_id(id).with_class("section"))
}

fn close_section(doc: &mut Document, section: ElementId, x: f32, top: f32, width: f32, bottom: f32) {
    doc.element_mut(section).bounds = Rect::new(x, top, width, bottom - top);
}

/// Returns the bottom edge of the section.
pub fn image_slideshow(doc: &mut Document, images: &[String], x: f32, y: f32, width: f32) -> f32 {
    let slide_height = (width * 0.5).min(480.0);
    let height = slide_height + THUMB_HEIGHT + 3.0 * THUMB_GAP + 24.0;
    let container = doc.add(
        Element::new()
            .with_class("slideshow-container")
            .with_bounds(Rect::new(x, y, width, height)),
    );

    doc.add(
        Element::new()
            .with_id("main-slide")
            .with_parent(container)
            .with_bounds(Rect::new(x, y, width, slide_height)),
    );
    let mid = y + (slide_height - BUTTON_SIZE) / 2.0;
    doc.add(
        Element::new()
            .with_class("prev-btn")
            .with_text("<")
            .with_parent(container)
            .with_bounds(Rect::new(x + THUMB_GAP, mid, BUTTON_SIZE, BUTTON_SIZE)),
    );
    doc.add(
        Element::new()
            .with_class("next-btn")
            .with_text(">")
            .with_parent(container)
            .with_bounds(Rect::new(
                x + width - BUTTON_SIZE - THUMB_GAP,
                mid,
                BUTTON_SIZE,
                BUTTON_SIZE,
            )),
    );

    let counter_y = y + slide_height + THUMB_GAP;
    doc.add(
        Element::new()
            .with_id("current-slide")
            .with_parent(container)
            .with_bounds(Rect::new(x, counter_y, 40.0, 20.0)),
    );
    doc.add(
        Element::new()
            .with_text("/")
            .with_parent(container)
            .with_bounds(Rect::new(x + 40.0, counter_y, 16.0, 20.0)),
    );
    doc.add(
        Element::new()
            .with_id("total-slides")
            .with_parent(container)
            .with_bounds(Rect::new(x + 56.0, counter_y, 40.0, 20.0)),
    );

    let thumbs_y = counter_y + 24.0;
    let count = images.len().max(1) as f32;
    let thumb_width = ((width - THUMB_GAP * (count - 1.0)) / count).clamp(8.0, 72.0);
    for (i, image) in images.iter().enumerate() {
        let mut thumb = Element::new()
            .with_class("thumbnail")
            .with_parent(container)
            .with_bounds(Rect::new(
                x + i as f32 * (thumb_width + THUMB_GAP),
                thumbs_y,
                thumb_width,
                THUMB_HEIGHT,
            ));
        thumb.src = Some(image.clone());
        doc.add(thumb);
    }

    y + height
}

pub fn persona_slideshow(
    doc: &mut Document,
    cards: &[(&str, &str)],
    x: f32,
    y: f32,
    width: f32,
) -> f32 {
    let card_height = 220.0;
    let height = card_height + BUTTON_SIZE + THUMB_GAP;
    let container = doc.add(
        Element::new()
            .with_class("persona-slideshow")
            .with_bounds(Rect::new(x, y, width, height)),
    );

    let card_x = x + BUTTON_SIZE + THUMB_GAP;
    let card_width = width - 2.0 * (BUTTON_SIZE + THUMB_GAP);
    for (title, body) in cards {
        doc.add(
            Element::new()
                .with_class("persona-slide")
                .with_text(&format!("{title}\n{body}"))
                .with_parent(container)
                .with_bounds(Rect::new(card_x, y, card_width, card_height)),
        );
    }

    let mid = y + (card_height - BUTTON_SIZE) / 2.0;
    doc.add(
        Element::new()
            .with_class("persona-nav-btn prev")
            .with_text("<")
            .with_parent(container)
            .with_bounds(Rect::new(x, mid, BUTTON_SIZE, BUTTON_SIZE)),
    );
    doc.add(
        Element::new()
            .with_class("persona-nav-btn next")
            .with_text(">")
            .with_parent(container)
            .with_bounds(Rect::new(x + width - BUTTON_SIZE, mid, BUTTON_SIZE, BUTTON_SIZE)),
    );

    let dot = 16.0;
    let dots_width = cards.len() as f32 * (dot + THUMB_GAP);
    let dots_x = x + (width - dots_width) / 2.0;
    for i in 0..cards.len() {
        doc.add(
            Element::new()
                .with_class("persona-dot")
                .with_parent(container)
                .with_bounds(Rect::new(
                    dots_x + i as f32 * (dot + THUMB_GAP),
                    y + card_height + THUMB_GAP,
                    dot,
                    dot,
                )),
        );
    }

    y + height
}

pub fn project_grid(
    doc: &mut Document,
    projects: &[(&str, Vec<&str>)],
    x: f32,
    y: f32,
    width: f32,
) -> f32 {
    let tags: BTreeSet<&str> = projects.iter().flat_map(|(_, t)| t.iter().copied()).collect();
    let mut filters = vec!["all"];
    filters.extend(tags);

    let mut bx = x;
    for filter in &filters {
        let w = 16.0 + filter.len() as f32 * 10.0;
        doc.add(
            Element::new()
                .with_class("filter-btn")
                .with_attr("data-filter", &filter.to_lowercase())
                .with_text(filter)
                .with_bounds(Rect::new(bx, y, w, 30.0)),
        );
        bx += w + THUMB_GAP;
    }

    let grid_y = y + 30.0 + 2.0 * THUMB_GAP;
    let columns = ((width / (CARD_WIDTH + THUMB_GAP)).floor() as usize).max(1);
    let rows = projects.len().div_ceil(columns);
    let grid_height = rows as f32 * (CARD_HEIGHT + THUMB_GAP);
    let grid = doc.add(
        Element::new()
            .with_class("projects-grid")
            .with_bounds(Rect::new(x, grid_y, width, grid_height)),
    );

    for (i, (title, card_tags)) in projects.iter().enumerate() {
        let cx = x + (i % columns) as f32 * (CARD_WIDTH + THUMB_GAP);
        let cy = grid_y + (i / columns) as f32 * (CARD_HEIGHT + THUMB_GAP);
        let card = doc.add(
            Element::new()
                .with_class("project-card")
                .with_text(title)
                .with_parent(grid)
                .with_bounds(Rect::new(cx, cy, CARD_WIDTH, CARD_HEIGHT)),
        );
        add_tags(doc, card, card_tags, cx, cy + CARD_HEIGHT - TAG_HEIGHT - THUMB_GAP);
    }

    grid_y + grid_height
}

fn add_tags(doc: &mut Document, card: ElementId, tags: &[&str], x: f32, y: f32) {
    let mut tx = x + THUMB_GAP;
    for tag in tags {
        let w = 12.0 + tag.len() as f32 * 8.0;
        doc.add(
            Element::new()
                .with_class("tag")
                .with_text(tag)
                .with_parent(card)
                .with_bounds(Rect::new(tx, y, w, TAG_HEIGHT)),
        );
        tx += w + 4.0;
    }
}

/// Bio, timeline, skills and contacts, in the order the page shows them.
pub fn about_section(doc: &mut Document, about: &AboutConfig, x: f32, y: f32, width: f32) -> f32 {
    let mut y = y;
    doc.add(
        Element::new()
            .with_class("bio-text")
            .with_text(&about.bio)
            .with_bounds(Rect::new(x, y, width, 80.0)),
    );
    y += 80.0 + BLOCK_GAP;

    for entry in &about.timeline {
        doc.add(
            Element::new()
                .with_class("timeline-content")
                .with_text(&format!("{}\n{}", entry.period, entry.title))
                .with_bounds(Rect::new(x, y, width, 70.0)),
        );
        y += 70.0 + BLOCK_GAP;
    }

    y = row(doc, "skill-category", &about.skills, x, y, width, 60.0);
    row(doc, "contact-item", &about.contacts, x, y, width, 40.0)
}

/// Lays `items` out left to right, wrapping at `width`. Returns the bottom edge.
fn row(doc: &mut Document, class: &str, items: &[String], x: f32, y: f32, width: f32, height: f32) -> f32 {
    if items.is_empty() {
        return y;
    }
    let item_width = 180.0;
    let columns = ((width / (item_width + BLOCK_GAP)).floor() as usize).max(1);
    for (i, item) in items.iter().enumerate() {
        doc.add(
            Element::new()
                .with_class(class)
                .with_text(item)
                .with_bounds(Rect::new(
                    x + (i % columns) as f32 * (item_width + BLOCK_GAP),
                    y + (i / columns) as f32 * (height + BLOCK_GAP),
                    item_width,
                    height,
                )),
        );
    }
    y + items.len().div_ceil(columns) as f32 * (height + BLOCK_GAP)
}

/// Viewport-relative slot of the `index`th of `count` nav dots.
pub fn nav_dot_bounds(index: usize, count: usize, viewport_width: f32, viewport_height: f32) -> Rect {
    let top = (viewport_height - count as f32 * NAV_DOT_PITCH) / 2.0;
    Rect::new(
        viewport_width - MARGIN / 2.0 - NAV_DOT_SIZE,
        top + index as f32 * NAV_DOT_PITCH,
        NAV_DOT_SIZE,
        NAV_DOT_SIZE,
    )
}

pub fn nav_dots(doc: &mut Document, sections: &[&str], viewport_width: f32, viewport_height: f32) {
    for (i, section) in sections.iter().enumerate() {
        doc.add(
            Element::new()
                .with_class("nav-dot")
                .with_attr("data-section", section)
                .with_attr("href", &format!("#{section}"))
                .fixed()
                .with_bounds(nav_dot_bounds(i, sections.len(), viewport_width, viewport_height)),
        );
    }
}

pub fn back_to_top_bounds(viewport_width: f32, viewport_height: f32) -> Rect {
    Rect::new(
        viewport_width - MARGIN - BUTTON_SIZE,
        viewport_height - MARGIN - BUTTON_SIZE,
        BUTTON_SIZE,
        BUTTON_SIZE,
    )
}

pub fn back_to_top(doc: &mut Document, viewport_width: f32, viewport_height: f32) -> ElementId {
    doc.add(
        Element::new()
            .with_id("backToTop")
            .with_text("^")
            .fixed()
            .with_bounds(back_to_top_bounds(viewport_width, viewport_height)),
    )
}

/// Drawn last so it sits above everything; pointer input passes through it.
pub fn cursor(doc: &mut Document) -> ElementId {
    doc.add(
        Element::new()
            .with_class("custom-cursor")
            .fixed()
            .ignore_pointer()
            .with_bounds(Rect::new(-CURSOR_SIZE / 2.0, -CURSOR_SIZE / 2.0, CURSOR_SIZE, CURSOR_SIZE)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_every_section_the_components_expect() {
        let images: Vec<String> = (0..5).map(|i| format!("img{i}.jpg")).collect();
        let doc = build_document(&images, &CarouselConfig::default(), 1280.0, 800.0);

        assert!(doc.get_element_by_id("main-slide").is_some());
        assert_eq!(doc.query_all(&["thumbnail"]).len(), 5);
        assert_eq!(doc.query_all(&["persona-slide"]).len(), 4);
        assert_eq!(doc.query_all(&["persona-dot"]).len(), 4);
        assert!(doc.query(&["persona-nav-btn", "prev"]).is_some());
        assert!(doc.query(&["projects-grid"]).is_some());
        assert!(doc.get_element_by_id("backToTop").is_some());
        assert!(doc.query(&["custom-cursor"]).is_some());
        assert_eq!(doc.query_all(&["timeline-content"]).len(), 3);
        assert_eq!(doc.query_all(&["skill-category"]).len(), 3);
        assert_eq!(doc.query_all(&["contact-item"]).len(), 2);
        assert!(doc.query(&["bio-text"]).is_some());

        let first_filter = doc.query(&["filter-btn"]).unwrap();
        assert_eq!(doc.element(first_filter).attr("data-filter"), Some("all"));
    }

    #[test]
    fn every_section_gets_an_id_and_a_nav_dot() {
        let images: Vec<String> = (0..5).map(|i| format!("img{i}.jpg")).collect();
        let doc = build_document(&images, &CarouselConfig::default(), 1280.0, 800.0);

        let dots: Vec<&str> = doc
            .query_all(&["nav-dot"])
            .into_iter()
            .filter_map(|d| doc.element(d).attr("data-section"))
            .collect();
        assert_eq!(dots, vec!["photos", "personas", "projects", "about"]);

        let photos = doc.get_element_by_id("photos").unwrap();
        let container = doc.query(&["slideshow-container"]).unwrap();
        assert_eq!(doc.element(photos).bounds, doc.element(container).bounds);

        // Sections sit under their content for hit testing.
        let next = doc.query(&["next-btn"]).unwrap();
        let bounds = doc.element(next).bounds;
        assert_eq!(doc.hit_test(bounds.x + 4.0, bounds.y + 4.0), Some(next));
    }
}
