// Page layout for exported documents.
// Implements: greedy line wrap, cursor-driven page flow, multi-column tag rows.
// Pure CPU work; async callers run it inside tokio::task::spawn_blocking.

pub mod columns;
pub mod engine;
pub mod font_metrics;
pub mod geometry;
pub mod wrap;

pub use engine::{layout, page_count};
pub use geometry::{letter_geometry, PageGeometry};
