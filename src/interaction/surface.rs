use std::collections::{BTreeMap, HashMap};

use crate::{
    design::state::ElementId,
    foundation::core::Point,
    interaction::drag::{DragController, DragEvent, OverlayElement},
    render::layout,
};

/// Identifies one pointer (mouse, pen, or a single touch contact).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct PointerId(pub u32);

/// The interactive poster surface: every overlay element plus the routing of in-flight drags.
///
/// Moves and releases are routed by pointer, not by hit-testing, so a drag keeps tracking after
/// the pointer leaves the element it started on.
#[derive(Clone, Debug, Default)]
pub struct DragSurface {
    controllers: BTreeMap<ElementId, DragController>,
    sessions: HashMap<PointerId, ElementId>,
}

impl DragSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add (or replace) an element.
    pub fn insert(&mut self, id: ElementId, position: Point, text: &str) {
        self.sessions.retain(|_, e| *e != id);
        self.controllers
            .insert(id, DragController::new(id, position, text));
    }

    pub fn element(&self, id: ElementId) -> Option<&OverlayElement> {
        self.controllers.get(&id).map(DragController::element)
    }

    pub fn controller(&self, id: ElementId) -> Option<&DragController> {
        self.controllers.get(&id)
    }

    pub fn elements(&self) -> impl Iterator<Item = &OverlayElement> {
        self.controllers.values().map(DragController::element)
    }

    pub fn active_sessions(&self) -> usize {
        self.sessions.len()
    }

    /// Move an element outside of a gesture.
    pub fn place(&mut self, id: ElementId, position: Point) {
        if let Some(c) = self.controllers.get_mut(&id) {
            c.place(position);
        }
    }

    pub fn sync_text(&mut self, id: ElementId, text: &str) {
        if let Some(c) = self.controllers.get_mut(&id) {
            c.sync_text(text);
        }
    }

    pub fn pointer_down(&mut self, pointer: PointerId, id: ElementId, at: Point) -> DragEvent {
        if self.sessions.contains_key(&pointer) {
            return DragEvent::Ignored;
        }
        let Some(c) = self.controllers.get_mut(&id) else {
            return DragEvent::Ignored;
        };
        let ev = c.pointer_down(at);
        if matches!(ev, DragEvent::Started(_)) {
            self.sessions.insert(pointer, id);
        }
        ev
    }

    pub fn pointer_move(&mut self, pointer: PointerId, at: Point) -> DragEvent {
        match self.session_controller(pointer) {
            Some(c) => c.pointer_move(at),
            None => DragEvent::Ignored,
        }
    }

    pub fn pointer_up(&mut self, pointer: PointerId) -> DragEvent {
        let Some(id) = self.sessions.remove(&pointer) else {
            return DragEvent::Ignored;
        };
        self.controllers
            .get_mut(&id)
            .map_or(DragEvent::Ignored, DragController::pointer_up)
    }

    pub fn pointer_cancel(&mut self, pointer: PointerId) -> DragEvent {
        let Some(id) = self.sessions.remove(&pointer) else {
            return DragEvent::Ignored;
        };
        self.controllers
            .get_mut(&id)
            .map_or(DragEvent::Ignored, DragController::pointer_cancel)
    }

    pub fn double_activate(&mut self, id: ElementId) -> DragEvent {
        self.controllers
            .get_mut(&id)
            .map_or(DragEvent::Ignored, DragController::double_activate)
    }

    pub fn set_text(&mut self, id: ElementId, text: &str) -> DragEvent {
        self.controllers
            .get_mut(&id)
            .map_or(DragEvent::Ignored, |c| c.set_text(text))
    }

    pub fn blur(&mut self, id: ElementId) -> DragEvent {
        self.controllers
            .get_mut(&id)
            .map_or(DragEvent::Ignored, DragController::blur)
    }

    /// Top-most drawn element whose approximate text box contains `at`.
    ///
    /// `font_px` supplies each element's rendered font size. Blank elements are not drawn and
    /// never hit.
    pub fn hit_test(&self, at: Point, font_px: impl Fn(ElementId) -> f64) -> Option<ElementId> {
        self.controllers
            .values()
            .rev()
            .map(DragController::element)
            .filter(|e| !e.text.trim().is_empty())
            .find(|e| layout::text_box(e.position, &e.text, font_px(e.id)).contains(at))
            .map(|e| e.id)
    }

    fn session_controller(&mut self, pointer: PointerId) -> Option<&mut DragController> {
        let id = self.sessions.get(&pointer)?;
        self.controllers.get_mut(id)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/interaction/surface.rs"]
mod tests;
