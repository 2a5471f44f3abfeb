pub mod pdf;

pub use pdf::{render_with_fallback, RenderError};
