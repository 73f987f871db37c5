pub mod color;
pub mod image;
