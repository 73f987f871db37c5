pub mod export;
pub mod layout;
pub mod preview;
pub mod svg;
