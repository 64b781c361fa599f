//! Retained page model the controllers read from and write to.
//!
//! This is the subset of a DOM the carousels need: elements with ids,
//! class lists, text, an image source, opacity and a disabled flag, laid
//! out in page coordinates under a scrollable viewport.

use std::collections::{BTreeSet, HashMap};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl Rect {
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    pub fn contains_point(&self, px: f32, py: f32) -> bool {
        px >= self.x && px < self.x + self.width && py >= self.y && py < self.y + self.height
    }

    /// True when `other` lies entirely inside `self`.
    pub fn contains_rect(&self, other: &Rect) -> bool {
        other.x >= self.x
            && other.y >= self.y
            && other.x + other.width <= self.x + self.width
            && other.y + other.height <= self.y + self.height
    }
}

#[derive(Debug, Clone)]
pub struct Element {
    pub id: Option<String>,
    classes: BTreeSet<String>,
    attributes: HashMap<String, String>,
    pub parent: Option<ElementId>,
    pub text: String,
    pub src: Option<String>,
    pub alt: String,
    pub opacity: f32,
    pub disabled: bool,
    pub hidden: bool,
    /// Bounds are viewport-relative and do not scroll with the page.
    pub fixed: bool,
    /// False for overlays that clicks and hovers pass through.
    pub pointer_events: bool,
    pub bounds: Rect,
}

impl Element {
    pub fn new() -> Self {
        Self {
            id: None,
            classes: BTreeSet::new(),
            attributes: HashMap::new(),
            parent: None,
            text: String::new(),
            src: None,
            alt: String::new(),
            opacity: 1.0,
            disabled: false,
            hidden: false,
            fixed: false,
            pointer_events: true,
            bounds: Rect::default(),
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.id = Some(id.to_string());
        self
    }

    /// Adds every whitespace separated class in `classes`.
    pub fn with_class(mut self, classes: &str) -> Self {
        for class in classes.split_whitespace() {
            self.classes.insert(class.to_string());
        }
        self
    }

    pub fn with_text(mut self, text: &str) -> Self {
        self.text = text.to_string();
        self
    }

    pub fn with_attr(mut self, name: &str, value: &str) -> Self {
        self.attributes.insert(name.to_string(), value.to_string());
        self
    }

    pub fn with_bounds(mut self, bounds: Rect) -> Self {
        self.bounds = bounds;
        self
    }

    pub fn fixed(mut self) -> Self {
        self.fixed = true;
        self
    }

    pub fn ignore_pointer(mut self) -> Self {
        self.pointer_events = false;
        self
    }

    pub fn with_parent(mut self, parent: ElementId) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.classes.contains(class)
    }

    pub fn classes(&self) -> impl Iterator<Item = &str> {
        self.classes.iter().map(String::as_str)
    }

    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attributes.get(name).map(String::as_str)
    }

    fn matches(&self, classes: &[&str]) -> bool {
        !classes.is_empty() && classes.iter().all(|c| self.classes.contains(*c))
    }
}

impl Default for Element {
    fn default() -> Self {
        Self::new()
    }
}

#[derive(Debug, Clone)]
pub struct Document {
    elements: Vec<Element>,
    viewport: Rect,
}

impl Document {
    pub fn new(viewport_width: f32, viewport_height: f32) -> Self {
        Self {
            elements: Vec::new(),
            viewport: Rect::new(0.0, 0.0, viewport_width, viewport_height),
        }
    }

    pub fn add(&mut self, element: Element) -> ElementId {
        self.elements.push(element);
        ElementId(self.elements.len() - 1)
    }

    pub fn element(&self, id: ElementId) -> &Element {
        &self.elements[id.0]
    }

    pub fn element_mut(&mut self, id: ElementId) -> &mut Element {
        &mut self.elements[id.0]
    }

    pub fn iter(&self) -> impl DoubleEndedIterator<Item = (ElementId, &Element)> {
        self.elements.iter().enumerate().map(|(i, e)| (ElementId(i), e))
    }

    pub fn get_element_by_id(&self, id: &str) -> Option<ElementId> {
        self.elements
            .iter()
            .position(|e| e.id.as_deref() == Some(id))
            .map(ElementId)
    }

    /// First element carrying every class in `classes`.
    pub fn query(&self, classes: &[&str]) -> Option<ElementId> {
        self.elements
            .iter()
            .position(|e| e.matches(classes))
            .map(ElementId)
    }

    /// All elements carrying every class in `classes`, in insertion order.
    pub fn query_all(&self, classes: &[&str]) -> Vec<ElementId> {
        self.iter()
            .filter(|(_, e)| e.matches(classes))
            .map(|(id, _)| id)
            .collect()
    }

    pub fn children_with_class(&self, parent: ElementId, class: &str) -> Vec<ElementId> {
        self.iter()
            .filter(|(_, e)| e.parent == Some(parent) && e.has_class(class))
            .map(|(id, _)| id)
            .collect()
    }

    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.element(id).has_class(class)
    }

    pub fn add_class(&mut self, id: ElementId, class: &str) {
        self.element_mut(id).classes.insert(class.to_string());
    }

    pub fn remove_class(&mut self, id: ElementId, class: &str) {
        self.element_mut(id).classes.remove(class);
    }

    pub fn toggle_class(&mut self, id: ElementId, class: &str, on: bool) {
        if on {
            self.add_class(id, class);
        } else {
            self.remove_class(id, class);
        }
    }

    pub fn viewport(&self) -> Rect {
        self.viewport
    }

    pub fn set_viewport_size(&mut self, width: f32, height: f32) {
        self.viewport.width = width;
        self.viewport.height = height;
    }

    pub fn scroll_y(&self) -> f32 {
        self.viewport.y
    }

    pub fn scroll_to(&mut self, y: f32) {
        self.viewport.y = y.max(0.0);
    }

    /// Bottom edge of the lowest element, used to clamp scrolling.
    pub fn content_height(&self) -> f32 {
        self.elements
            .iter()
            .filter(|e| !e.fixed)
            .map(|e| e.bounds.y + e.bounds.height)
            .fold(0.0, f32::max)
    }

    /// Element bounds in page coordinates, resolving fixed positioning.
    pub fn page_bounds(&self, id: ElementId) -> Rect {
        let element = self.element(id);
        if element.fixed {
            Rect {
                y: element.bounds.y + self.viewport.y,
                ..element.bounds
            }
        } else {
            element.bounds
        }
    }

    /// True when the element's box sits entirely inside the viewport.
    pub fn is_in_viewport(&self, id: ElementId) -> bool {
        !self.element(id).hidden && self.viewport.contains_rect(&self.page_bounds(id))
    }

    /// Share of the element's height inside the viewport, with the bottom
    /// edge pulled up by `bottom_margin`.
    pub fn visible_ratio(&self, id: ElementId, bottom_margin: f32) -> f32 {
        let bounds = self.page_bounds(id);
        if self.element(id).hidden || bounds.height <= 0.0 {
            return 0.0;
        }
        let top = bounds.y.max(self.viewport.y);
        let bottom = (bounds.y + bounds.height)
            .min(self.viewport.y + self.viewport.height - bottom_margin);
        ((bottom - top) / bounds.height).clamp(0.0, 1.0)
    }

    /// Topmost visible, non-hidden, pointer-receiving element under a page-space point.
    pub fn hit_test(&self, x: f32, y: f32) -> Option<ElementId> {
        self.iter()
            .rev()
            .find(|(id, e)| {
                !e.hidden
                    && e.pointer_events
                    && !self.ancestor_hidden(*id)
                    && self.page_bounds(*id).contains_point(x, y)
            })
            .map(|(id, _)| id)
    }

    pub fn ancestor_hidden(&self, id: ElementId) -> bool {
        let mut current = self.element(id).parent;
        while let Some(parent) = current {
            let element = self.element(parent);
            if element.hidden {
                return true;
            }
            current = element.parent;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_requires_every_class() {
        let mut doc = Document::new(800.0, 600.0);
        doc.add(Element::new().with_class("persona-nav-btn next"));
        let prev = doc.add(Element::new().with_class("persona-nav-btn prev"));

        assert_eq!(doc.query(&["persona-nav-btn", "prev"]), Some(prev));
        assert_eq!(doc.query_all(&["persona-nav-btn"]).len(), 2);
        assert_eq!(doc.query(&["persona-nav-btn", "missing"]), None);
        assert_eq!(doc.query(&[]), None);
    }

    #[test]
    fn viewport_check_needs_whole_box() {
        let mut doc = Document::new(800.0, 600.0);
        let inside = doc.add(Element::new().with_bounds(Rect::new(10.0, 10.0, 100.0, 100.0)));
        let straddling = doc.add(Element::new().with_bounds(Rect::new(10.0, 550.0, 100.0, 100.0)));

        assert!(doc.is_in_viewport(inside));
        assert!(!doc.is_in_viewport(straddling));

        doc.scroll_to(100.0);
        assert!(!doc.is_in_viewport(inside));
        assert!(doc.is_in_viewport(straddling));
    }

    #[test]
    fn visible_ratio_honours_the_bottom_margin() {
        let mut doc = Document::new(800.0, 600.0);
        let block = doc.add(Element::new().with_bounds(Rect::new(0.0, 450.0, 100.0, 200.0)));

        assert_eq!(doc.visible_ratio(block, 0.0), 0.75);
        assert_eq!(doc.visible_ratio(block, 50.0), 0.5);
        doc.scroll_to(700.0);
        assert_eq!(doc.visible_ratio(block, 50.0), 0.0);
    }

    #[test]
    fn hit_test_prefers_later_elements_and_skips_hidden_subtrees() {
        let mut doc = Document::new(800.0, 600.0);
        let card = doc.add(Element::new().with_bounds(Rect::new(0.0, 0.0, 200.0, 200.0)));
        let tag = doc.add(
            Element::new()
                .with_parent(card)
                .with_bounds(Rect::new(10.0, 10.0, 50.0, 20.0)),
        );

        assert_eq!(doc.hit_test(20.0, 15.0), Some(tag));
        doc.element_mut(card).hidden = true;
        assert_eq!(doc.hit_test(20.0, 15.0), None);
    }

    #[test]
    fn hit_test_passes_through_overlays() {
        let mut doc = Document::new(800.0, 600.0);
        let button = doc.add(Element::new().with_bounds(Rect::new(0.0, 0.0, 50.0, 50.0)));
        doc.add(
            Element::new()
                .fixed()
                .ignore_pointer()
                .with_bounds(Rect::new(0.0, 0.0, 20.0, 20.0)),
        );

        assert_eq!(doc.hit_test(10.0, 10.0), Some(button));
    }

    #[test]
    fn fixed_elements_follow_the_viewport() {
        let mut doc = Document::new(800.0, 600.0);
        let button = doc.add(
            Element::new()
                .fixed()
                .with_bounds(Rect::new(700.0, 500.0, 50.0, 50.0)),
        );
        doc.scroll_to(1000.0);

        assert_eq!(doc.page_bounds(button).y, 1500.0);
        assert!(doc.is_in_viewport(button));
        assert_eq!(doc.hit_test(720.0, 1520.0), Some(button));
    }
}
