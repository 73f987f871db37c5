use crate::{
    design::state::ElementId,
    foundation::core::Point,
};

/// An overlay text block as the interaction layer sees it.
#[derive(Clone, Debug, PartialEq)]
pub struct OverlayElement {
    pub id: ElementId,
    /// Absolute top-left position on the poster surface.
    pub position: Point,
    pub text: String,
    /// True only while the element is in [`DragState::Editing`].
    pub editable: bool,
}

/// One pointer-driven repositioning gesture.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragSession {
    pub element: ElementId,
    /// Element position when the gesture started.
    pub origin_position: Point,
    /// Pointer position when the gesture started.
    pub pointer_origin: Point,
    /// Latest pointer position.
    pub pointer: Point,
}

impl DragSession {
    /// Position for the pointer at `pointer`: origin plus net displacement.
    pub fn position_for(&self, pointer: Point) -> Point {
        self.origin_position + (pointer - self.pointer_origin)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub enum DragState {
    #[default]
    Idle,
    Dragging(DragSession),
    Editing,
}

/// What an input did, for the host to react to.
#[derive(Clone, Debug, PartialEq)]
pub enum DragEvent {
    /// Input has no meaning in the current state.
    Ignored,
    /// Input conflicts with the current state and was refused.
    Rejected,
    Started(DragSession),
    Moved { id: ElementId, position: Point },
    Released { id: ElementId, position: Point },
    /// The host should focus the element for text input.
    EditStarted(ElementId),
    EditEnded { id: ElementId, text: String },
    TextChanged(ElementId),
}

/// Idle / Dragging / Editing state machine for one overlay element.
///
/// Dragging and editing exclude each other: a double-activate during a drag is rejected, and so
/// is a pointer-down during an edit.
#[derive(Clone, Debug)]
pub struct DragController {
    element: OverlayElement,
    state: DragState,
}

impl DragController {
    pub fn new(id: ElementId, position: Point, text: impl Into<String>) -> Self {
        Self {
            element: OverlayElement {
                id,
                position,
                text: text.into(),
                editable: false,
            },
            state: DragState::Idle,
        }
    }

    pub fn element(&self) -> &OverlayElement {
        &self.element
    }

    pub fn state(&self) -> DragState {
        self.state
    }

    pub fn is_dragging(&self) -> bool {
        matches!(self.state, DragState::Dragging(_))
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.state, DragState::Editing)
    }

    /// Move the element without a gesture (layout reset, loaded design).
    pub fn place(&mut self, position: Point) {
        self.element.position = position;
    }

    /// Replace the text from outside an edit (form input, loaded design).
    pub fn sync_text(&mut self, text: &str) {
        if !self.is_editing() && self.element.text != text {
            self.element.text = text.to_owned();
        }
    }

    pub fn pointer_down(&mut self, pointer: Point) -> DragEvent {
        match self.state {
            DragState::Idle => {
                let session = DragSession {
                    element: self.element.id,
                    origin_position: self.element.position,
                    pointer_origin: pointer,
                    pointer,
                };
                self.state = DragState::Dragging(session);
                tracing::debug!(element = %self.element.id, ?pointer, "drag start");
                DragEvent::Started(session)
            }
            DragState::Dragging(_) => DragEvent::Ignored,
            DragState::Editing => DragEvent::Rejected,
        }
    }

    pub fn pointer_move(&mut self, pointer: Point) -> DragEvent {
        let DragState::Dragging(session) = &mut self.state else {
            return DragEvent::Ignored;
        };
        session.pointer = pointer;
        self.element.position = session.position_for(pointer);
        DragEvent::Moved {
            id: self.element.id,
            position: self.element.position,
        }
    }

    /// End the drag. The element keeps the position of the last move.
    pub fn pointer_up(&mut self) -> DragEvent {
        self.end_drag("drag release")
    }

    pub fn pointer_cancel(&mut self) -> DragEvent {
        self.end_drag("drag cancel")
    }

    fn end_drag(&mut self, why: &'static str) -> DragEvent {
        if !self.is_dragging() {
            return DragEvent::Ignored;
        }
        self.state = DragState::Idle;
        tracing::debug!(element = %self.element.id, position = ?self.element.position, "{why}");
        DragEvent::Released {
            id: self.element.id,
            position: self.element.position,
        }
    }

    pub fn double_activate(&mut self) -> DragEvent {
        match self.state {
            DragState::Idle => {
                self.state = DragState::Editing;
                self.element.editable = true;
                DragEvent::EditStarted(self.element.id)
            }
            DragState::Dragging(_) => DragEvent::Rejected,
            DragState::Editing => DragEvent::Ignored,
        }
    }

    pub fn set_text(&mut self, text: &str) -> DragEvent {
        if !self.is_editing() {
            return DragEvent::Rejected;
        }
        self.element.text = text.to_owned();
        DragEvent::TextChanged(self.element.id)
    }

    /// Focus loss. Leaves editing exactly once per entry.
    pub fn blur(&mut self) -> DragEvent {
        if !self.is_editing() {
            return DragEvent::Ignored;
        }
        self.state = DragState::Idle;
        self.element.editable = false;
        DragEvent::EditEnded {
            id: self.element.id,
            text: self.element.text.clone(),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/drag.rs"]
mod tests;
