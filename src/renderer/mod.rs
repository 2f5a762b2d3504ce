//! CPU per-pixel driver for the fragment kernels.

mod field;
mod text;
mod types;

#[cfg(test)]
mod tests;

pub use field::render_field;
pub use text::render_text;
pub use types::{Atlas, Image, RenderError};
