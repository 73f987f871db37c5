pub mod drag;
pub mod surface;
