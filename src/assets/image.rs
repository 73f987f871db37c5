use std::path::Path;

use anyhow::Context as _;
use base64::Engine as _;

use crate::{
    assets::color::HexColor,
    foundation::error::{PosterError, PosterResult},
};

/// A displayable image reference: a `data:` URL, a relative asset path, or a URL.
#[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct ImageRef(String);

impl ImageRef {
    pub fn new(reference: impl Into<String>) -> Self {
        Self(reference.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_data_url(&self) -> bool {
        self.0.starts_with("data:")
    }

    /// CSS `url(...)` form.
    pub fn to_css_url(&self) -> String {
        format!("url(\"{}\")", self.0)
    }
}

impl std::fmt::Display for ImageRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Background override of a poster. An image and a flat color are mutually exclusive.
///
/// Serialized as the CSS string the browser editor stored: `url("...")` for images, a color for
/// flat fills.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Background {
    /// Cover-fitted background image.
    Image(ImageRef),
    /// Flat fill.
    Color(HexColor),
}

impl Background {
    /// Parse the stored CSS form. Empty input means "no override".
    pub fn parse(s: &str) -> PosterResult<Option<Self>> {
        let s = s.trim();
        if s.is_empty() {
            return Ok(None);
        }
        if let Some(inner) = s.strip_prefix("url(").and_then(|r| r.strip_suffix(')')) {
            let inner = inner.trim().trim_matches(|c| c == '"' || c == '\'');
            if inner.is_empty() {
                return Err(PosterError::validation("background url must be non-empty"));
            }
            return Ok(Some(Self::Image(ImageRef::new(inner))));
        }
        HexColor::parse_css(s).map(|c| Some(Self::Color(c)))
    }

    pub fn to_css(&self) -> String {
        match self {
            Self::Image(r) => r.to_css_url(),
            Self::Color(c) => c.to_string(),
        }
    }

    pub fn image(&self) -> Option<&ImageRef> {
        match self {
            Self::Image(r) => Some(r),
            Self::Color(_) => None,
        }
    }
}

/// Serde adapter for `Option<Background>` fields, mapping `None` to `""`.
pub(crate) mod background_css {
    use super::Background;

    pub(crate) fn serialize<S>(bg: &Option<Background>, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        match bg {
            Some(bg) => serializer.serialize_str(&bg.to_css()),
            None => serializer.serialize_str(""),
        }
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<Option<Background>, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s: Option<String> = serde::Deserialize::deserialize(deserializer)?;
        match s {
            Some(s) => Background::parse(&s).map_err(serde::de::Error::custom),
            None => Ok(None),
        }
    }
}

/// Turn the raw bytes of a user-selected image file into a displayable `data:` URL.
///
/// The bytes must decode as an image; the original encoding is kept as-is.
pub fn image_ref_from_bytes(bytes: &[u8]) -> PosterResult<ImageRef> {
    let format = image::guess_format(bytes)
        .map_err(|e| PosterError::validation(format!("unrecognized image format: {e}")))?;
    image::load_from_memory_with_format(bytes, format)
        .map_err(|e| PosterError::validation(format!("undecodable image: {e}")))?;

    let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
    Ok(ImageRef::new(format!(
        "data:{};base64,{encoded}",
        format.to_mime_type()
    )))
}

/// Read an image file from disk and turn it into a `data:` URL.
pub fn load_image_ref(path: &Path) -> PosterResult<ImageRef> {
    let bytes =
        std::fs::read(path).with_context(|| format!("read image '{}'", path.display()))?;
    image_ref_from_bytes(&bytes)
}

#[cfg(test)]
#[path = "../../tests/unit/assets/image.rs"]
mod tests;
