use crate::{
    assets::{
        color::HexColor,
        image::{Background, ImageRef},
    },
    config,
    design::state::{DesignState, ElementId},
    foundation::core::{Canvas, Point},
    render::layout,
};

const INK_ON_PLAIN: &str = "#111827";
const INK_ON_IMAGE: &str = "#ffffff";

/// One positioned text block of the poster.
#[derive(Clone, Debug, PartialEq)]
pub struct TextBlock {
    pub id: ElementId,
    /// Display text after placeholders; may be empty (an unset date).
    pub text: String,
    /// Top-left corner.
    pub position: Point,
    pub font_px: u32,
    pub bold: bool,
}

/// Everything needed to draw the poster, derived from a [`DesignState`] and nothing else.
#[derive(Clone, Debug, PartialEq)]
pub struct Preview {
    pub canvas: Canvas,
    pub font_family: String,
    /// Flat fill under everything: an explicit background color, or the accent tint.
    pub fill: HexColor,
    pub image: Option<ImageRef>,
    /// Brightness filter over `image`. Uploads are dimmed less than template samples.
    pub image_brightness: f64,
    pub ink: HexColor,
    pub blocks: Vec<TextBlock>,
}

impl Preview {
    pub fn block(&self, id: ElementId) -> Option<&TextBlock> {
        self.blocks.iter().find(|b| b.id == id)
    }
}

/// Derive the preview of `state` on a `canvas`.
pub fn preview(state: &DesignState, canvas: Canvas) -> Preview {
    fn or_placeholder(v: &str, placeholder: &str) -> String {
        if v.is_empty() {
            placeholder.to_owned()
        } else {
            v.to_owned()
        }
    }

    let (fill, image) = match &state.background {
        Some(Background::Color(c)) => (c.clone(), None),
        Some(Background::Image(r)) => (state.color.with_alpha(config::TINT_ALPHA), Some(r.clone())),
        None => (state.color.with_alpha(config::TINT_ALPHA), None),
    };
    let ink = if image.is_some() {
        INK_ON_IMAGE
    } else {
        INK_ON_PLAIN
    };

    let blocks = ElementId::ALL
        .into_iter()
        .map(|id| {
            let text = match id {
                ElementId::Title => or_placeholder(&state.title, config::TITLE_PLACEHOLDER),
                ElementId::Subtitle => {
                    or_placeholder(&state.subtitle, config::SUBTITLE_PLACEHOLDER)
                }
                ElementId::Body => or_placeholder(&state.body, config::BODY_PLACEHOLDER),
                ElementId::Date if state.date.is_empty() => String::new(),
                ElementId::Date => format!("Date: {}", state.date),
            };
            TextBlock {
                id,
                text,
                position: state
                    .positions
                    .get(&id)
                    .copied()
                    .unwrap_or_else(|| layout::default_position(id, canvas)),
                font_px: font_px(state, id),
                bold: id == ElementId::Title,
            }
        })
        .collect();

    Preview {
        canvas,
        font_family: state.font.clone(),
        fill,
        image_brightness: match &image {
            Some(r) if !r.is_data_url() => config::SAMPLE_IMAGE_BRIGHTNESS,
            _ => config::UPLOADED_IMAGE_BRIGHTNESS,
        },
        image,
        ink: HexColor::parse(ink).unwrap_or_default(),
        blocks,
    }
}

/// Font size of an element as drawn for `state`.
pub fn font_px(state: &DesignState, id: ElementId) -> u32 {
    match id {
        ElementId::Title => state.title_size,
        ElementId::Subtitle => config::SUBTITLE_SIZE,
        ElementId::Body => config::BODY_SIZE,
        ElementId::Date => config::DATE_SIZE,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/preview.rs"]
mod tests;
