pub mod blocks;
pub mod builder;
pub mod markdown;

pub use blocks::DocumentKind;
pub use builder::build_document;
pub use markdown::render_markdown;
