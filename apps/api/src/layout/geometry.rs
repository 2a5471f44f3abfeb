use serde::{Deserialize, Serialize};

/// Physical page and flow parameters for one export. All lengths in points.
///
/// Example: US letter (612 × 792pt) with 0.75" (54pt) margins leaves a
/// 504 × 684pt content box.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageGeometry {
    pub page_width_pt: f32,
    pub page_height_pt: f32,
    /// Uniform margin on all four sides.
    pub margin_pt: f32,
    /// Line box height = font size × this multiplier.
    pub line_height_factor: f32,
    /// Number of columns a tag row is split into.
    pub tag_columns: usize,
    pub column_gap_pt: f32,
}

/// US letter, 0.75" margins, 1.4 line height, 4 tag columns 0.15" apart.
pub fn letter_geometry() -> PageGeometry {
    PageGeometry {
        page_width_pt: 612.0,
        page_height_pt: 792.0,
        margin_pt: 54.0,
        line_height_factor: 1.4,
        tag_columns: 4,
        column_gap_pt: 10.8,
    }
}

impl PageGeometry {
    pub fn content_width(&self) -> f32 {
        self.page_width_pt - 2.0 * self.margin_pt
    }

    #[cfg(test)]
    pub fn content_height(&self) -> f32 {
        self.page_height_pt - 2.0 * self.margin_pt
    }

    /// Vertical offset where every page's flow starts.
    pub fn top(&self) -> f32 {
        self.margin_pt
    }

    /// No line box may extend below this offset.
    pub fn bottom_limit(&self) -> f32 {
        self.page_height_pt - self.margin_pt
    }

    pub fn line_height(&self, font_size_pt: f32) -> f32 {
        font_size_pt * self.line_height_factor
    }

    pub fn column_width(&self) -> f32 {
        let n = self.tag_columns.max(1) as f32;
        (self.content_width() - self.column_gap_pt * (n - 1.0)) / n
    }

    pub fn column_x(&self, column: usize) -> f32 {
        self.margin_pt + column as f32 * (self.column_width() + self.column_gap_pt)
    }
}
