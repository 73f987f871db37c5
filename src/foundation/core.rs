use crate::foundation::error::{PosterError, PosterResult};

pub use kurbo::{Point, Rect, Vec2};

/// Poster surface dimensions in CSS pixels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Canvas {
    /// Surface width.
    pub width: u32,
    /// Surface height.
    pub height: u32,
}

impl Default for Canvas {
    fn default() -> Self {
        Self {
            width: 800,
            height: 1000,
        }
    }
}

impl Canvas {
    /// Build a canvas, rejecting zero-sized dimensions.
    pub fn new(width: u32, height: u32) -> PosterResult<Self> {
        if width == 0 || height == 0 {
            return Err(PosterError::validation("canvas width and height must be > 0"));
        }
        Ok(Self { width, height })
    }

    /// Parse a `WIDTHxHEIGHT` size selection such as `800x1000`.
    pub fn parse(s: &str) -> PosterResult<Self> {
        let Some((w, h)) = s.trim().split_once(['x', 'X']) else {
            return Err(PosterError::validation(format!(
                "canvas size \"{s}\" must look like WIDTHxHEIGHT"
            )));
        };
        let parse_dim = |v: &str| {
            v.trim().parse::<u32>().map_err(|_| {
                PosterError::validation(format!("canvas size \"{s}\" has a non-numeric dimension"))
            })
        };
        Self::new(parse_dim(w)?, parse_dim(h)?)
    }

    pub fn rect(self) -> Rect {
        Rect::new(0.0, 0.0, f64::from(self.width), f64::from(self.height))
    }
}

impl std::fmt::Display for Canvas {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

impl std::str::FromStr for Canvas {
    type Err = PosterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
