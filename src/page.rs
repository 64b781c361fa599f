use tracing::{debug, warn};

use crate::document::Document;
use crate::error::Result;
use crate::event::PageEvent;

/// A behaviour mounted on the page. Each one owns its own state and
/// scheduler; nothing is shared between components.
pub trait Component {
    fn name(&self) -> &'static str;

    /// Whether this component reacts to global arrow keys.
    fn routes_keyboard(&self) -> bool {
        false
    }

    fn handle_event(&mut self, doc: &mut Document, event: &PageEvent, now_ms: u64);

    /// Runs whatever deferred work is due at `now_ms`.
    fn tick(&mut self, doc: &mut Document, now_ms: u64);
}

pub struct Page {
    document: Document,
    components: Vec<Box<dyn Component>>,
}

impl Page {
    pub fn new(document: Document) -> Self {
        Self {
            document,
            components: Vec::new(),
        }
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn document_mut(&mut self) -> &mut Document {
        &mut self.document
    }

    pub fn component_names(&self) -> Vec<&'static str> {
        self.components.iter().map(|c| c.name()).collect()
    }

    /// Builds a component against the document. On failure nothing is
    /// wired and the error is handed back after being logged.
    pub fn mount<C, F>(&mut self, now_ms: u64, mount: F) -> Result<()>
    where
        C: Component + 'static,
        F: FnOnce(&mut Document, u64) -> Result<C>,
    {
        match mount(&mut self.document, now_ms) {
            Ok(component) => {
                self.add(Box::new(component));
                Ok(())
            }
            Err(e) => {
                warn!(error = %e, "component not mounted");
                Err(e)
            }
        }
    }

    pub fn add(&mut self, component: Box<dyn Component>) {
        if component.routes_keyboard() {
            if let Some(other) = self.components.iter().find(|c| c.routes_keyboard()) {
                // Both listen for arrow keys; only viewport scoping keeps them apart.
                warn!(
                    first = other.name(),
                    second = component.name(),
                    "two carousels route arrow keys on this page"
                );
            }
        }
        self.components.push(component);
    }

    /// Routes `event` to every component. When a component moves the
    /// viewport while handling something else, a `Scroll` follows.
    pub fn dispatch(&mut self, event: PageEvent, now_ms: u64) {
        match event {
            PageEvent::Click(target) if self.document.element(target).disabled => {
                debug!(?target, "click on disabled element dropped");
                return;
            }
            PageEvent::Scroll { y } => self.document.scroll_to(y),
            PageEvent::Resize { width, height } => self.document.set_viewport_size(width, height),
            _ => {}
        }

        let scroll_before = self.document.scroll_y();
        for component in self.components.iter_mut() {
            component.handle_event(&mut self.document, &event, now_ms);
        }

        let scroll_after = self.document.scroll_y();
        if scroll_after != scroll_before && !matches!(event, PageEvent::Scroll { .. }) {
            self.dispatch(PageEvent::Scroll { y: scroll_after }, now_ms);
        }
    }

    pub fn tick(&mut self, now_ms: u64) {
        for component in self.components.iter_mut() {
            component.tick(&mut self.document, now_ms);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document::Element;
    use crate::error::CarouselError;

    struct Recorder {
        keyboard: bool,
        clicks: std::rc::Rc<std::cell::Cell<usize>>,
    }

    impl Component for Recorder {
        fn name(&self) -> &'static str {
            "recorder"
        }

        fn routes_keyboard(&self) -> bool {
            self.keyboard
        }

        fn handle_event(&mut self, _doc: &mut Document, event: &PageEvent, _now_ms: u64) {
            if matches!(event, PageEvent::Click(_)) {
                self.clicks.set(self.clicks.get() + 1);
            }
        }

        fn tick(&mut self, _doc: &mut Document, _now_ms: u64) {}
    }

    #[test]
    fn disabled_clicks_never_reach_components() {
        let mut doc = Document::new(800.0, 600.0);
        let button = doc.add(Element::new());
        let mut page = Page::new(doc);
        let clicks = std::rc::Rc::new(std::cell::Cell::new(0));
        page.add(Box::new(Recorder {
            keyboard: false,
            clicks: clicks.clone(),
        }));

        page.dispatch(PageEvent::Click(button), 0);
        page.document_mut().element_mut(button).disabled = true;
        page.dispatch(PageEvent::Click(button), 0);

        assert_eq!(clicks.get(), 1);
    }

    #[test]
    fn failed_mount_adds_nothing() {
        let mut page = Page::new(Document::new(800.0, 600.0));
        let result = page.mount(0, |_doc, _now| -> Result<Recorder> {
            Err(CarouselError::missing("#main-slide"))
        });

        assert!(result.is_err());
        assert!(page.component_names().is_empty());
    }

    struct Jumper;

    impl Component for Jumper {
        fn name(&self) -> &'static str {
            "jumper"
        }

        fn handle_event(&mut self, doc: &mut Document, event: &PageEvent, _now_ms: u64) {
            if let PageEvent::KeyDown(_) = event {
                doc.scroll_to(900.0);
            }
        }

        fn tick(&mut self, _doc: &mut Document, _now_ms: u64) {}
    }

    struct ScrollLog(std::rc::Rc<std::cell::RefCell<Vec<f32>>>);

    impl Component for ScrollLog {
        fn name(&self) -> &'static str {
            "scroll-log"
        }

        fn handle_event(&mut self, _doc: &mut Document, event: &PageEvent, _now_ms: u64) {
            if let PageEvent::Scroll { y } = event {
                self.0.borrow_mut().push(*y);
            }
        }

        fn tick(&mut self, _doc: &mut Document, _now_ms: u64) {}
    }

    #[test]
    fn programmatic_scroll_is_announced() {
        let mut page = Page::new(Document::new(800.0, 600.0));
        let log = std::rc::Rc::new(std::cell::RefCell::new(Vec::new()));
        page.add(Box::new(Jumper));
        page.add(Box::new(ScrollLog(log.clone())));

        page.dispatch(PageEvent::KeyDown(crate::event::Key::Other), 0);
        assert_eq!(*log.borrow(), vec![900.0]);
    }

    #[test]
    fn resize_updates_the_viewport() {
        let mut page = Page::new(Document::new(800.0, 600.0));
        page.dispatch(
            PageEvent::Resize {
                width: 640.0,
                height: 480.0,
            },
            0,
        );
        assert_eq!(page.document().viewport().width, 640.0);
        assert_eq!(page.document().viewport().height, 480.0);
    }

    #[test]
    fn scroll_moves_the_viewport() {
        let mut page = Page::new(Document::new(800.0, 600.0));
        page.dispatch(PageEvent::Scroll { y: 420.0 }, 0);
        assert_eq!(page.document().scroll_y(), 420.0);
    }
}
