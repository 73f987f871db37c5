use crate::{
    design::state::ElementId,
    foundation::core::{Canvas, Point, Rect},
};

/// Line height as a multiple of font size.
pub const LINE_HEIGHT: f64 = 1.2;
/// Average advance of a glyph as a multiple of font size. Good enough for hit boxes.
const AVG_ADVANCE: f64 = 0.55;
/// Baseline offset from the top of a line box, as a multiple of font size.
pub const ASCENT: f64 = 0.8;

/// Where an element sits before the user drags it.
pub fn default_position(element: ElementId, canvas: Canvas) -> Point {
    let w = f64::from(canvas.width);
    let h = f64::from(canvas.height);
    let pad = (w * 0.08).round();
    let y = match element {
        ElementId::Title => 0.30,
        ElementId::Subtitle => 0.45,
        ElementId::Body => 0.58,
        ElementId::Date => 0.86,
    };
    Point::new(pad, (h * y).round())
}

/// Approximate bounding box of a text block whose top-left corner is `origin`.
pub fn text_box(origin: Point, text: &str, font_px: f64) -> Rect {
    let (lines, widest) = text
        .split('\n')
        .fold((0usize, 0usize), |(n, widest), line| {
            (n + 1, widest.max(line.chars().count()))
        });
    let width = (widest.max(1) as f64) * AVG_ADVANCE * font_px;
    let height = (lines.max(1) as f64) * LINE_HEIGHT * font_px;
    Rect::new(origin.x, origin.y, origin.x + width, origin.y + height)
}

#[cfg(test)]
#[path = "../../tests/unit/render/layout.rs"]
mod tests;
