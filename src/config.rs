//! Fixed configuration values shared by the design core.

use std::time::Duration;

/// Key of the single persisted design slot.
pub const STORAGE_KEY: &str = "posterCraft_design";

/// Default accent color of a fresh design.
pub const DEFAULT_COLOR: &str = "#ff7a59";
/// Default title font size in pixels.
pub const DEFAULT_TITLE_SIZE: u32 = 42;
/// Default font-family descriptor.
pub const DEFAULT_FONT: &str = "Inter, sans-serif";

/// Prompt shown before a destructive clear.
pub const CLEAR_PROMPT: &str = "Clear current design?";

/// How long a transient status message stays before reverting to [`STATUS_READY`].
pub const STATUS_REVERT_DELAY: Duration = Duration::from_millis(1200);
/// Neutral status text.
pub const STATUS_READY: &str = "Ready";

pub const TITLE_PLACEHOLDER: &str = "Your Event";
pub const SUBTITLE_PLACEHOLDER: &str = "Tagline";
pub const BODY_PLACEHOLDER: &str = "Details here...";

/// Alpha applied to the accent color for the background tint (`#rrggbb33`).
pub const TINT_ALPHA: u8 = 0x33;
/// Brightness filter applied over an uploaded background image.
pub const UPLOADED_IMAGE_BRIGHTNESS: f64 = 0.85;
/// Brightness filter applied over a template's sample image.
pub const SAMPLE_IMAGE_BRIGHTNESS: f64 = 0.8;

pub const SUBTITLE_SIZE: u32 = 22;
pub const BODY_SIZE: u32 = 16;
pub const DATE_SIZE: u32 = 14;

/// Exported PNGs are rendered at this multiple of the canvas size.
pub const DEFAULT_EXPORT_SCALE: f32 = 2.0;
/// File name offered for exported posters.
pub const EXPORT_FILE_NAME: &str = "poster-design.png";

/// File the catalog is fetched from, relative to the working directory.
pub const TEMPLATES_FILE: &str = "templates.json";
