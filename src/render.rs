use std::collections::HashMap;

use raylib::prelude::*;

use carousel::constants::{ACTIVE, HOVERING, SCROLLING, SHOW};
use carousel::document::{Document, Element, ElementId};
use carousel::scroll_reveal;

const PANEL: Color = Color::new(38, 40, 52, 255);
const BUTTON: Color = Color::new(70, 74, 96, 255);
const TAG: Color = Color::new(52, 92, 120, 255);
const ACCENT: Color = Color::new(255, 170, 60, 255);
const TEXT: Color = Color::new(230, 230, 235, 255);
const FONT_SIZE: i32 = 20;

fn with_alpha(color: Color, alpha: f32) -> Color {
    Color::new(color.r, color.g, color.b, (color.a as f32 * alpha.clamp(0.0, 1.0)) as u8)
}

/// Stylesheet stand-in: which elements are drawn at all.
fn is_displayed(doc: &Document, id: ElementId, element: &Element) -> bool {
    if element.hidden || doc.ancestor_hidden(id) || awaiting_reveal(doc, element) {
        return false;
    }
    if element.has_class("persona-slide") && !element.has_class(ACTIVE) {
        return false;
    }
    if element.id.as_deref() == Some("backToTop") && !element.has_class(SHOW) {
        return false;
    }
    true
}

fn awaiting_reveal(doc: &Document, element: &Element) -> bool {
    let mut current = Some(element);
    while let Some(e) = current {
        if scroll_reveal::is_pending(e) {
            return true;
        }
        current = e.parent.map(|p| doc.element(p));
    }
    false
}

fn effective_opacity(doc: &Document, element: &Element) -> f32 {
    let mut opacity = element.opacity;
    let mut parent = element.parent;
    while let Some(p) = parent {
        let e = doc.element(p);
        opacity *= e.opacity;
        parent = e.parent;
    }
    opacity
}

fn fill_for(element: &Element) -> Option<Color> {
    if element.has_class("persona-slide")
        || element.has_class("project-card")
        || element.has_class("bio-text")
        || element.has_class("timeline-content")
        || element.has_class("skill-category")
        || element.has_class("contact-item")
    {
        Some(PANEL)
    } else if element.has_class("tag") {
        Some(TAG)
    } else if element.has_class("prev-btn")
        || element.has_class("next-btn")
        || element.has_class("persona-nav-btn")
        || element.has_class("filter-btn")
        || element.id.as_deref() == Some("backToTop")
    {
        Some(BUTTON)
    } else {
        None
    }
}

pub fn draw_page(d: &mut RaylibDrawHandle, doc: &Document, textures: &HashMap<String, Texture2D>) {
    let viewport = doc.viewport();

    for (id, element) in doc.iter() {
        if !is_displayed(doc, id, element) {
            continue;
        }
        let page = doc.page_bounds(id);
        if page.y > viewport.y + viewport.height || page.y + page.height < viewport.y {
            continue;
        }
        let screen = Rectangle::new(page.x, page.y - viewport.y, page.width, page.height);
        let mut alpha = effective_opacity(doc, element);
        if element.disabled {
            alpha *= 0.35;
        }

        if element.has_class("custom-cursor") {
            let radius = if element.has_class(HOVERING) { screen.width } else { screen.width / 2.0 };
            let color = if element.has_class(SCROLLING) { TAG } else { ACCENT };
            d.draw_circle_lines(
                (screen.x + screen.width / 2.0) as i32,
                (screen.y + screen.height / 2.0) as i32,
                radius,
                color,
            );
            continue;
        }

        if element.has_class("persona-dot") || element.has_class("nav-dot") {
            let color = if element.has_class(ACTIVE) { ACCENT } else { BUTTON };
            d.draw_circle(
                (screen.x + screen.width / 2.0) as i32,
                (screen.y + screen.height / 2.0) as i32,
                screen.width / 2.0,
                with_alpha(color, alpha),
            );
            continue;
        }

        if let Some(fill) = fill_for(element) {
            d.draw_rectangle_rec(screen, with_alpha(fill, alpha));
        }

        if let Some(texture) = element.src.as_ref().and_then(|src| textures.get(src)) {
            draw_contained(d, texture, screen, alpha);
        }

        if !element.text.is_empty() {
            for (line, text) in element.text.lines().enumerate() {
                d.draw_text(
                    text,
                    screen.x as i32 + 8,
                    screen.y as i32 + 6 + line as i32 * (FONT_SIZE + 4),
                    FONT_SIZE,
                    with_alpha(TEXT, alpha),
                );
            }
        }

        if element.has_class(ACTIVE) {
            d.draw_rectangle_lines_ex(screen, 3.0, with_alpha(ACCENT, alpha));
        }
    }
}

/// Scales the texture to fit inside `area` keeping its aspect ratio.
fn draw_contained(d: &mut RaylibDrawHandle, texture: &Texture2D, area: Rectangle, alpha: f32) {
    let tex_width = texture.width() as f32;
    let tex_height = texture.height() as f32;
    let scale = (area.width / tex_width).min(area.height / tex_height);
    let width = tex_width * scale;
    let height = tex_height * scale;

    d.draw_texture_pro(
        texture,
        Rectangle::new(0.0, 0.0, tex_width, tex_height),
        Rectangle::new(
            area.x + (area.width - width) / 2.0,
            area.y + (area.height - height) / 2.0,
            width,
            height,
        ),
        Vector2::new(0.0, 0.0),
        0.0,
        with_alpha(Color::WHITE, alpha),
    );
}
