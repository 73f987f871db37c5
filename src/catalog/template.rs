use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::{
    assets::{color::HexColor, image::ImageRef},
    foundation::error::{PosterError, PosterResult},
};

/// A named preset supplying field values and a sample background image.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Template {
    /// Stable identifier referenced by [`crate::DesignState::template`].
    pub id: String,
    /// Display name.
    pub name: String,
    /// Accent color applied on selection.
    pub color: HexColor,
    /// Sample background image.
    pub sample: ImageRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "crate::design::state::lenient_size::deserialize_opt"
    )]
    pub title_size: Option<u32>,
}

impl Template {
    fn preset(id: &str, name: &str, color: &str, sample: &str) -> PosterResult<Self> {
        Ok(Self {
            id: id.to_owned(),
            name: name.to_owned(),
            color: HexColor::parse(color)?,
            sample: ImageRef::new(sample),
            title: None,
            subtitle: None,
            body: None,
            title_size: None,
        })
    }
}

/// Ordered list of templates offered to the user.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TemplateCatalog {
    templates: Vec<Template>,
}

impl TemplateCatalog {
    pub fn new(templates: Vec<Template>) -> Self {
        Self { templates }
    }

    /// The built-in degraded-mode catalog used when fetching fails.
    pub fn fallback() -> Self {
        let templates = [
            ("clean", "Clean Modern", "#ff7a59", "assets/sample1.jpg"),
            ("bold", "Bold & Bright", "#7dd3fc", "assets/sample2.jpg"),
            ("retro", "Retro Pop", "#fef08a", "assets/sample3.jpg"),
        ]
        .into_iter()
        .filter_map(|(id, name, color, sample)| Template::preset(id, name, color, sample).ok())
        .collect();
        Self { templates }
    }

    pub fn find(&self, id: &str) -> Option<&Template> {
        self.templates.iter().find(|t| t.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.templates.iter()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

/// Provider of the template catalog.
pub trait TemplateSource {
    /// Fetch the ordered template list. Failures are reported as [`PosterError::Fetch`].
    fn fetch(&self) -> PosterResult<Vec<Template>>;
}

/// Reads the catalog from a `templates.json` file.
#[derive(Clone, Debug)]
pub struct FsTemplateSource {
    path: PathBuf,
}

impl FsTemplateSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl TemplateSource for FsTemplateSource {
    fn fetch(&self) -> PosterResult<Vec<Template>> {
        let raw = std::fs::read_to_string(&self.path)
            .with_context(|| format!("open templates '{}'", self.path.display()))
            .map_err(|e| PosterError::fetch(format!("{e:#}")))?;
        parse_templates(&raw)
    }
}

/// Parse a JSON array of template records.
pub fn parse_templates(raw: &str) -> PosterResult<Vec<Template>> {
    serde_json::from_str(raw).map_err(|e| PosterError::fetch(format!("parse templates JSON: {e}")))
}

/// Fetch the catalog, degrading to [`TemplateCatalog::fallback`] on any failure.
///
/// An empty catalog counts as a failure: the editor always needs something to offer.
#[tracing::instrument(skip(source))]
pub fn load_catalog(source: &dyn TemplateSource) -> TemplateCatalog {
    match source.fetch() {
        Ok(templates) if !templates.is_empty() => TemplateCatalog::new(templates),
        Ok(_) => {
            tracing::warn!("template source returned no templates, using built-in set");
            TemplateCatalog::fallback()
        }
        Err(e) => {
            tracing::warn!(error = %e, "could not fetch templates, using built-in set");
            TemplateCatalog::fallback()
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/catalog/template.rs"]
mod tests;
