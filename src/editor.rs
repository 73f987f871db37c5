use std::time::Instant;

use crate::{
    assets::image::{Background, image_ref_from_bytes},
    catalog::template::TemplateCatalog,
    config,
    design::{
        state::{DesignState, ElementId, Field},
        storage::SlotStorage,
        store::{Confirm, DesignStore, LoadOutcome},
    },
    foundation::{
        core::{Canvas, Point},
        error::{PosterError, PosterResult},
    },
    interaction::{
        drag::DragEvent,
        surface::{DragSurface, PointerId},
    },
    render::{
        export::Rasterizer,
        layout,
        preview::{self, Preview},
    },
    status::{StatusLine, StatusMessage},
};

/// One editing session: the single owner of the design state.
///
/// Every visual output is derived from [`Editor::state`] through [`Editor::preview`]. Overlay
/// elements on the [`DragSurface`] mirror the preview's text blocks; drags and inline edits
/// flow back into the state, never the other way around.
pub struct Editor<S> {
    store: DesignStore<S>,
    catalog: TemplateCatalog,
    surface: DragSurface,
    canvas: Canvas,
    status: StatusLine,
}

impl<S: SlotStorage> Editor<S> {
    pub fn new(catalog: TemplateCatalog, storage: S, canvas: Canvas) -> Self {
        let mut editor = Self {
            store: DesignStore::new(storage),
            catalog,
            surface: DragSurface::new(),
            canvas,
            status: StatusLine::default(),
        };
        editor.rebuild_surface();
        editor
    }

    pub fn state(&self) -> &DesignState {
        self.store.state()
    }

    pub fn store(&self) -> &DesignStore<S> {
        &self.store
    }

    pub fn catalog(&self) -> &TemplateCatalog {
        &self.catalog
    }

    pub fn surface(&self) -> &DragSurface {
        &self.surface
    }

    pub fn canvas(&self) -> Canvas {
        self.canvas
    }

    pub fn preview(&self) -> Preview {
        preview::preview(self.store.state(), self.canvas)
    }

    /// Status text visible at `now`.
    pub fn status_at(&self, now: Instant) -> StatusMessage {
        self.status.current(now)
    }

    pub fn status(&self) -> StatusMessage {
        self.status_at(Instant::now())
    }

    fn show(&mut self, message: StatusMessage) {
        self.status.show(message, Instant::now());
    }

    /// A form field changed.
    ///
    /// A non-empty template id is applied like [`Editor::select_template`]; ids the catalog does
    /// not know change nothing.
    pub fn input(&mut self, field: Field, value: &str) -> bool {
        if field == Field::Template && !value.is_empty() {
            return self.select_template(value);
        }
        let changed = self.store.update(field, value);
        if changed {
            self.sync_surface_text();
        }
        changed
    }

    pub fn select_template(&mut self, id: &str) -> bool {
        let applied = self.store.apply_template(&self.catalog, id);
        if applied {
            self.sync_surface_text();
        }
        applied
    }

    /// Use the bytes of a user-selected image file as the background.
    pub fn upload_background(&mut self, bytes: &[u8]) -> bool {
        match image_ref_from_bytes(bytes) {
            Ok(image) => {
                self.store.state_mut().background = Some(Background::Image(image));
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "background upload rejected");
                self.show(StatusMessage::BackgroundRejected);
                false
            }
        }
    }

    /// Resize the poster surface. Elements without a dragged position follow the default layout.
    pub fn set_canvas(&mut self, canvas: Canvas) {
        if self.canvas == canvas {
            return;
        }
        self.canvas = canvas;
        for id in ElementId::ALL {
            if !self.store.state().positions.contains_key(&id) {
                self.surface
                    .place(id, layout::default_position(id, canvas));
            }
        }
    }

    pub fn save(&mut self) -> bool {
        match self.store.save() {
            Ok(()) => {
                self.show(StatusMessage::Saved);
                true
            }
            Err(e) => {
                tracing::warn!(error = %e, "save failed");
                self.show(StatusMessage::SaveFailed);
                false
            }
        }
    }

    /// Restore the saved design. The outcome is also shown on the status line.
    pub fn load(&mut self) -> PosterResult<LoadOutcome> {
        let res = self.store.load();
        match &res {
            Ok(LoadOutcome::Loaded) => {
                self.rebuild_surface();
                self.show(StatusMessage::Loaded);
            }
            Ok(LoadOutcome::NotFound) => self.show(StatusMessage::NoSavedDesign),
            Err(PosterError::MalformedState(_)) => self.show(StatusMessage::MalformedSave),
            Err(e) => {
                tracing::warn!(error = %e, "load failed");
                self.show(StatusMessage::LoadFailed);
            }
        }
        res
    }

    pub fn clear(&mut self, confirm: &mut dyn Confirm) -> bool {
        let cleared = self.store.clear(confirm);
        if cleared {
            self.rebuild_surface();
        }
        cleared
    }

    /// Pointer pressed at `at`; starts a drag on the top-most element there, if any.
    pub fn pointer_down(&mut self, pointer: PointerId, at: Point) -> DragEvent {
        let state = self.store.state();
        match self
            .surface
            .hit_test(at, |id| f64::from(preview::font_px(state, id)))
        {
            Some(id) => self.surface.pointer_down(pointer, id, at),
            None => DragEvent::Ignored,
        }
    }

    /// Pointer pressed on a known element.
    pub fn pointer_down_on(&mut self, pointer: PointerId, id: ElementId, at: Point) -> DragEvent {
        self.surface.pointer_down(pointer, id, at)
    }

    pub fn pointer_move(&mut self, pointer: PointerId, at: Point) -> DragEvent {
        let ev = self.surface.pointer_move(pointer, at);
        self.apply(&ev);
        ev
    }

    pub fn pointer_up(&mut self, pointer: PointerId) -> DragEvent {
        let ev = self.surface.pointer_up(pointer);
        self.apply(&ev);
        ev
    }

    pub fn pointer_cancel(&mut self, pointer: PointerId) -> DragEvent {
        let ev = self.surface.pointer_cancel(pointer);
        self.apply(&ev);
        ev
    }

    pub fn double_activate(&mut self, id: ElementId) -> DragEvent {
        self.surface.double_activate(id)
    }

    pub fn edit_text(&mut self, id: ElementId, text: &str) -> DragEvent {
        self.surface.set_text(id, text)
    }

    pub fn blur(&mut self, id: ElementId) -> DragEvent {
        let ev = self.surface.blur(id);
        self.apply(&ev);
        ev
    }

    /// Render the poster and hand back PNG bytes, or `None` if the rasterizer failed.
    #[tracing::instrument(skip(self, rasterizer))]
    pub fn export(&mut self, rasterizer: &dyn Rasterizer, scale: f32) -> Option<Vec<u8>> {
        self.show(StatusMessage::Rendering);
        match rasterizer.rasterize(&self.preview(), scale) {
            Ok(png) => {
                self.show(StatusMessage::Exported);
                Some(png)
            }
            Err(e) => {
                tracing::warn!(error = %e, "export failed");
                self.show(StatusMessage::ExportFailed);
                None
            }
        }
    }

    fn apply(&mut self, ev: &DragEvent) {
        match ev {
            DragEvent::Moved { id, position } | DragEvent::Released { id, position } => {
                self.store.state_mut().positions.insert(*id, *position);
            }
            DragEvent::EditEnded { id, text } => {
                let value = field_value_from_display(*id, text);
                self.store.update(id.field(), &value);
                self.sync_surface_text();
            }
            _ => {}
        }
    }

    /// Re-create every overlay element from state. Drops in-flight gestures.
    fn rebuild_surface(&mut self) {
        let p = self.preview();
        let mut surface = DragSurface::new();
        for block in &p.blocks {
            surface.insert(block.id, block.position, &block.text);
        }
        self.surface = surface;
    }

    fn sync_surface_text(&mut self) {
        for block in self.preview().blocks {
            self.surface.sync_text(block.id, &block.text);
        }
    }
}

/// Map an element's displayed text back to the field value it came from.
fn field_value_from_display(id: ElementId, text: &str) -> String {
    let placeholder = match id {
        ElementId::Title => Some(config::TITLE_PLACEHOLDER),
        ElementId::Subtitle => Some(config::SUBTITLE_PLACEHOLDER),
        ElementId::Body => Some(config::BODY_PLACEHOLDER),
        ElementId::Date => None,
    };
    if placeholder == Some(text) {
        return String::new();
    }
    match id {
        ElementId::Date => text.strip_prefix("Date: ").unwrap_or(text).to_owned(),
        _ => text.to_owned(),
    }
}

#[cfg(test)]
#[path = "../tests/unit/editor.rs"]
mod tests;
