use crate::foundation::error::{PosterError, PosterResult};

/// A validated CSS hex color, normalized to lowercase `#rrggbb` or `#rrggbbaa`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct HexColor(String);

impl HexColor {
    /// Parse `#rgb`, `#rrggbb` or `#rrggbbaa` (leading `#` optional, case-insensitive).
    pub fn parse(s: &str) -> PosterResult<Self> {
        let s = s.trim();
        let digits = s.strip_prefix('#').unwrap_or(s);
        if !digits.chars().all(|c| c.is_ascii_hexdigit()) {
            return Err(PosterError::validation(format!(
                "invalid hex color \"{s}\""
            )));
        }

        let normalized = match digits.len() {
            3 => digits.chars().flat_map(|c| [c, c]).collect::<String>(),
            6 | 8 => digits.to_owned(),
            _ => {
                return Err(PosterError::validation(
                    "hex color must be #RGB, #RRGGBB or #RRGGBBAA",
                ));
            }
        };

        Ok(Self(format!("#{}", normalized.to_ascii_lowercase())))
    }

    /// Parse a hex color or the `rgb(r, g, b)` / `rgba(r, g, b, a)` form a browser reports for
    /// computed colors.
    pub fn parse_css(s: &str) -> PosterResult<Self> {
        let t = s.trim();
        let Some(args) = t
            .strip_prefix("rgba(")
            .or_else(|| t.strip_prefix("rgb("))
            .and_then(|rest| rest.strip_suffix(')'))
        else {
            return Self::parse(t);
        };

        let parts: Vec<&str> = args.split(',').map(str::trim).collect();
        if parts.len() != 3 && parts.len() != 4 {
            return Err(PosterError::validation(format!(
                "invalid css color \"{t}\""
            )));
        }
        let channel = |p: &str| {
            p.parse::<u8>()
                .map_err(|_| PosterError::validation(format!("invalid color channel \"{p}\"")))
        };
        let (r, g, b) = (channel(parts[0])?, channel(parts[1])?, channel(parts[2])?);
        let a = match parts.get(3) {
            Some(p) => {
                let a = p
                    .parse::<f64>()
                    .map_err(|_| PosterError::validation(format!("invalid alpha \"{p}\"")))?;
                (a.clamp(0.0, 1.0) * 255.0).round() as u8
            }
            None => 255,
        };

        let base = Self(format!("#{r:02x}{g:02x}{b:02x}"));
        Ok(if a == 255 { base } else { base.with_alpha(a) })
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Straight (non-premultiplied) RGBA components.
    pub fn rgba(&self) -> [u8; 4] {
        let hex = &self.0[1..];
        let byte = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).unwrap_or(0);
        let a = if hex.len() == 8 { byte(6) } else { 255 };
        [byte(0), byte(2), byte(4), a]
    }

    /// Same color with its alpha channel replaced.
    pub fn with_alpha(&self, alpha: u8) -> Self {
        let [r, g, b, _] = self.rgba();
        Self(format!("#{r:02x}{g:02x}{b:02x}{alpha:02x}"))
    }

    /// `#rrggbb` without alpha, as accepted by SVG `fill`.
    pub fn rgb_hex(&self) -> String {
        self.0[..7].to_owned()
    }

    /// Alpha as a `0..=1` opacity.
    pub fn opacity(&self) -> f64 {
        f64::from(self.rgba()[3]) / 255.0
    }
}

impl Default for HexColor {
    fn default() -> Self {
        Self(crate::config::DEFAULT_COLOR.to_owned())
    }
}

impl std::fmt::Display for HexColor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::str::FromStr for HexColor {
    type Err = PosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl serde::Serialize for HexColor {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for HexColor {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/color.rs"]
mod tests;
