use crate::document::ElementId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    ArrowLeft,
    ArrowRight,
    Other,
}

/// Input delivered to every mounted component.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PageEvent {
    Click(ElementId),
    KeyDown(Key),
    PointerEnter(ElementId),
    PointerLeave(ElementId),
    VisibilityChanged { hidden: bool },
    Scroll { y: f32 },
    /// Pointer position in viewport coordinates.
    PointerMove { x: f32, y: f32 },
    Resize { width: f32, height: f32 },
}
