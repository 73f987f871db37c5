//! PosterCraft is a single-poster design editor core.
//!
//! A design is one flat [`DesignState`] record: template, text fields, accent color, title size,
//! font, background, and the positions of any dragged text blocks. Everything a user sees is
//! derived from that record.
//!
//! # Flow
//!
//! 1. **Edit**: form inputs, template picks, and background uploads mutate the state through
//!    an [`Editor`] (or directly through a [`DesignStore`]).
//! 2. **Interact**: pointer gestures and inline text edits go through a [`DragSurface`] of
//!    per-element [`DragController`] state machines; results are written back into the state.
//! 3. **Preview**: `DesignState + Canvas -> Preview` is a pure derivation ([`preview`]).
//! 4. **Persist / export**: the state is saved to a single JSON slot in a [`SlotStorage`];
//!    a [`Rasterizer`] turns a preview into PNG bytes.
//!
//! Collaborators with side effects (template fetching, slot storage, confirmation, rasterizing)
//! are injected through traits so the core stays testable without a display or filesystem.
#![forbid(unsafe_code)]

mod assets;
mod catalog;
mod design;
mod editor;
mod foundation;
mod interaction;
mod render;
mod status;

pub mod config;

pub use assets::color::HexColor;
pub use assets::image::{Background, ImageRef, image_ref_from_bytes, load_image_ref};
pub use catalog::template::{
    FsTemplateSource, Template, TemplateCatalog, TemplateSource, load_catalog, parse_templates,
};
pub use design::state::{DesignState, ElementId, Field};
pub use design::storage::{FileStorage, MemoryStorage, SlotStorage};
pub use design::store::{Confirm, DesignStore, LoadOutcome};
pub use editor::Editor;
pub use foundation::core::{Canvas, Point, Rect, Vec2};
pub use foundation::error::{PosterError, PosterResult};
pub use interaction::drag::{DragController, DragEvent, DragSession, DragState, OverlayElement};
pub use interaction::surface::{DragSurface, PointerId};
pub use render::export::{Rasterizer, SvgRasterizer};
pub use render::layout::{default_position, text_box};
pub use render::preview::{Preview, TextBlock, font_px, preview};
pub use render::svg::to_svg;
pub use status::{StatusLine, StatusMessage};
