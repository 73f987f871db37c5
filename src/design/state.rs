use std::collections::BTreeMap;

use crate::{
    assets::{
        color::HexColor,
        image::{Background, background_css},
    },
    config,
    foundation::{core::Point, error::PosterError},
};

/// The serializable record of every user-editable poster field.
///
/// Missing fields take their construction defaults when deserializing, so records written by
/// older editors keep loading. `null` and `""` are treated as missing where the browser editor
/// treated them that way.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct DesignState {
    /// Id of the last applied template, or empty.
    #[serde(deserialize_with = "null_as_default")]
    pub template: String,
    #[serde(deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(deserialize_with = "null_as_default")]
    pub subtitle: String,
    #[serde(deserialize_with = "null_as_default")]
    pub body: String,
    #[serde(deserialize_with = "null_as_default")]
    pub date: String,
    /// Accent color; tints the background.
    #[serde(deserialize_with = "lenient_color")]
    pub color: HexColor,
    /// Title font size in pixels, always > 0.
    #[serde(with = "lenient_size")]
    pub title_size: u32,
    /// CSS font-family descriptor.
    #[serde(deserialize_with = "lenient_font")]
    pub font: String,
    #[serde(rename = "bg", with = "background_css")]
    pub background: Option<Background>,
    /// Drag-adjusted element positions. Elements without an entry use the default layout.
    pub positions: BTreeMap<ElementId, Point>,
}

impl Default for DesignState {
    fn default() -> Self {
        Self {
            template: String::new(),
            title: String::new(),
            subtitle: String::new(),
            body: String::new(),
            date: String::new(),
            color: HexColor::default(),
            title_size: config::DEFAULT_TITLE_SIZE,
            font: config::DEFAULT_FONT.to_owned(),
            background: None,
            positions: BTreeMap::new(),
        }
    }
}

/// Editable fields addressed by [`DesignState::update`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Field {
    Template,
    Title,
    Subtitle,
    Body,
    Date,
    Color,
    TitleSize,
    Font,
}

impl Field {
    pub const ALL: [Field; 8] = [
        Field::Template,
        Field::Title,
        Field::Subtitle,
        Field::Body,
        Field::Date,
        Field::Color,
        Field::TitleSize,
        Field::Font,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Field::Template => "template",
            Field::Title => "title",
            Field::Subtitle => "subtitle",
            Field::Body => "body",
            Field::Date => "date",
            Field::Color => "color",
            Field::TitleSize => "titleSize",
            Field::Font => "font",
        }
    }

    /// The overlay element showing this field, if any.
    pub fn element(self) -> Option<ElementId> {
        match self {
            Field::Title => Some(ElementId::Title),
            Field::Subtitle => Some(ElementId::Subtitle),
            Field::Body => Some(ElementId::Body),
            Field::Date => Some(ElementId::Date),
            _ => None,
        }
    }
}

/// The draggable, editable text blocks on the poster, in paint order.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum ElementId {
    Title,
    Subtitle,
    Body,
    Date,
}

impl ElementId {
    pub const ALL: [ElementId; 4] = [
        ElementId::Title,
        ElementId::Subtitle,
        ElementId::Body,
        ElementId::Date,
    ];

    pub fn name(self) -> &'static str {
        match self {
            ElementId::Title => "title",
            ElementId::Subtitle => "subtitle",
            ElementId::Body => "body",
            ElementId::Date => "date",
        }
    }

    pub fn field(self) -> Field {
        match self {
            ElementId::Title => Field::Title,
            ElementId::Subtitle => Field::Subtitle,
            ElementId::Body => Field::Body,
            ElementId::Date => Field::Date,
        }
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for ElementId {
    type Err = PosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|e| e.name() == s.trim())
            .ok_or_else(|| PosterError::validation(format!("unknown element \"{s}\"")))
    }
}

impl DesignState {
    /// Set one field from raw UI input.
    ///
    /// Numeric and color input that does not parse, and an empty font, keep the previous value.
    /// Returns whether the stored value changed.
    pub fn update(&mut self, field: Field, raw: &str) -> bool {
        fn replace<T: PartialEq>(slot: &mut T, value: T) -> bool {
            if *slot == value {
                return false;
            }
            *slot = value;
            true
        }

        match field {
            Field::Template => replace(&mut self.template, raw.to_owned()),
            Field::Title => replace(&mut self.title, raw.to_owned()),
            Field::Subtitle => replace(&mut self.subtitle, raw.to_owned()),
            Field::Body => replace(&mut self.body, raw.to_owned()),
            Field::Date => replace(&mut self.date, raw.to_owned()),
            Field::Color => match HexColor::parse(raw) {
                Ok(c) => replace(&mut self.color, c),
                Err(_) => false,
            },
            Field::TitleSize => match raw.trim().parse::<u32>() {
                Ok(px) if px > 0 => replace(&mut self.title_size, px),
                _ => false,
            },
            Field::Font => {
                let font = raw.trim();
                if font.is_empty() {
                    return false;
                }
                replace(&mut self.font, font.to_owned())
            }
        }
    }

    /// Drop a color background that is just the accent tint.
    ///
    /// Older records stored the rendered tint in `bg` whenever no image was set. Kept as an
    /// override it would freeze the fill against later accent-color edits.
    pub(crate) fn drop_stored_tint(&mut self) {
        if let Some(Background::Color(c)) = &self.background
            && *c == self.color.with_alpha(config::TINT_ALPHA)
        {
            self.background = None;
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: serde::Deserialize<'de> + Default,
{
    let v: Option<T> = serde::Deserialize::deserialize(deserializer)?;
    Ok(v.unwrap_or_default())
}

fn lenient_color<'de, D>(deserializer: D) -> Result<HexColor, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v: Option<String> = serde::Deserialize::deserialize(deserializer)?;
    match v.as_deref().map(str::trim) {
        None | Some("") => Ok(HexColor::default()),
        Some(s) => HexColor::parse(s).map_err(serde::de::Error::custom),
    }
}

fn lenient_font<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let v: Option<String> = serde::Deserialize::deserialize(deserializer)?;
    Ok(match v.as_deref().map(str::trim) {
        None | Some("") => config::DEFAULT_FONT.to_owned(),
        Some(s) => s.to_owned(),
    })
}

/// Pixel sizes stored either as numbers or as the numeric strings an `<input>` yields.
///
/// Zero, empty and `null` all fall back to the default title size.
pub(crate) mod lenient_size {
    use crate::config;

    #[derive(serde::Deserialize)]
    #[serde(untagged)]
    enum Repr {
        Num(u64),
        Str(String),
    }

    fn resolve<E: serde::de::Error>(repr: Option<Repr>) -> Result<Option<u32>, E> {
        let n = match repr {
            None => return Ok(None),
            Some(Repr::Num(n)) => n,
            Some(Repr::Str(s)) => {
                let s = s.trim();
                if s.is_empty() {
                    return Ok(None);
                }
                s.parse::<u64>()
                    .map_err(|_| E::custom(format!("invalid pixel size \"{s}\"")))?
            }
        };
        if n == 0 {
            return Ok(None);
        }
        u32::try_from(n)
            .map(Some)
            .map_err(|_| E::custom(format!("pixel size {n} out of range")))
    }

    pub(crate) fn serialize<S>(px: &u32, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_u32(*px)
    }

    pub(crate) fn deserialize<'de, D>(deserializer: D) -> Result<u32, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let repr: Option<Repr> = serde::Deserialize::deserialize(deserializer)?;
        Ok(resolve(repr)?.unwrap_or(config::DEFAULT_TITLE_SIZE))
    }

    pub(crate) fn deserialize_opt<'de, D>(deserializer: D) -> Result<Option<u32>, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let repr: Option<Repr> = serde::Deserialize::deserialize(deserializer)?;
        resolve(repr)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/design/state.rs"]
mod tests;
