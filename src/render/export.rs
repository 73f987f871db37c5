use std::{
    io::Cursor,
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    foundation::error::{PosterError, PosterResult},
    render::{preview::Preview, svg},
};

/// Turns a rendered poster surface into encoded image bytes.
pub trait Rasterizer {
    /// Render `preview` at `scale` times its canvas size and return PNG bytes.
    fn rasterize(&self, preview: &Preview, scale: f32) -> PosterResult<Vec<u8>>;
}

/// CPU rasterizer: preview -> SVG -> `resvg` pixmap -> PNG.
///
/// Relative image references (template samples) resolve against `resources_dir`. Fonts come from
/// the system plus any `fonts/` directory under it.
pub struct SvgRasterizer {
    resources_dir: Option<PathBuf>,
    fontdb: Arc<usvg::fontdb::Database>,
}

impl SvgRasterizer {
    pub fn new(resources_dir: Option<PathBuf>) -> Self {
        let fontdb = build_fontdb(resources_dir.as_deref());
        Self {
            resources_dir,
            fontdb,
        }
    }

    pub fn font_faces(&self) -> usize {
        self.fontdb.faces().count()
    }
}

impl Default for SvgRasterizer {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Rasterizer for SvgRasterizer {
    #[tracing::instrument(skip(self, preview), fields(canvas = %preview.canvas))]
    fn rasterize(&self, preview: &Preview, scale: f32) -> PosterResult<Vec<u8>> {
        if !scale.is_finite() || scale <= 0.0 {
            return Err(PosterError::export("scale must be finite and > 0"));
        }

        let doc = svg::to_svg(preview);
        let opts = usvg::Options {
            resources_dir: self.resources_dir.clone(),
            fontdb: Arc::clone(&self.fontdb),
            ..Default::default()
        };
        let tree = usvg::Tree::from_str(&doc, &opts)
            .map_err(|e| PosterError::export(format!("parse poster svg: {e}")))?;

        let width = scaled_dim(preview.canvas.width, scale)?;
        let height = scaled_dim(preview.canvas.height, scale)?;
        let mut pixmap = resvg::tiny_skia::Pixmap::new(width, height)
            .ok_or_else(|| PosterError::export("failed to allocate poster pixmap"))?;
        resvg::render(
            &tree,
            resvg::tiny_skia::Transform::from_scale(scale, scale),
            &mut pixmap.as_mut(),
        );

        let rgba = unpremultiply(pixmap.data());
        let img = image::RgbaImage::from_raw(width, height, rgba)
            .ok_or_else(|| PosterError::export("pixmap size mismatch"))?;
        let mut png = Vec::new();
        image::DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut png), image::ImageFormat::Png)
            .map_err(|e| PosterError::export(format!("encode png: {e}")))?;

        tracing::debug!(width, height, bytes = png.len(), "poster rasterized");
        Ok(png)
    }
}

fn scaled_dim(v: u32, scale: f32) -> PosterResult<u32> {
    // Avoid pathological allocations.
    const MAX_DIM: f32 = 16_384.0;
    let px = (v as f32 * scale).round();
    if px < 1.0 || px > MAX_DIM {
        return Err(PosterError::export(format!(
            "export size {px}px out of range (1..={MAX_DIM})"
        )));
    }
    Ok(px as u32)
}

/// `tiny_skia` pixmaps are premultiplied; PNG wants straight alpha.
fn unpremultiply(premul: &[u8]) -> Vec<u8> {
    let mut out = premul.to_vec();
    for px in out.chunks_exact_mut(4) {
        let a = u16::from(px[3]);
        if a == 0 || a == 255 {
            continue;
        }
        for c in &mut px[..3] {
            *c = ((u16::from(*c) * 255 + a / 2) / a).min(255) as u8;
        }
    }
    out
}

fn build_fontdb(resources_dir: Option<&Path>) -> Arc<usvg::fontdb::Database> {
    let mut db = usvg::fontdb::Database::new();
    db.load_system_fonts();
    if let Some(dir) = resources_dir {
        load_fonts_from_dir(&mut db, &dir.join("fonts"));
    }
    Arc::new(db)
}

fn load_fonts_from_dir(db: &mut usvg::fontdb::Database, dir: &Path) {
    let Ok(rd) = std::fs::read_dir(dir) else {
        return;
    };
    for path in rd.flatten().map(|e| e.path()) {
        let is_font = path
            .extension()
            .and_then(|s| s.to_str())
            .is_some_and(|ext| matches!(ext.to_ascii_lowercase().as_str(), "ttf" | "otf" | "ttc"));
        if is_font && db.load_font_file(&path).is_err() {
            tracing::warn!(path = %path.display(), "skipping unreadable font");
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/render/export.rs"]
mod tests;
