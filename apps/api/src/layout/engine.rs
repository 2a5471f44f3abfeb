//! Page layout engine. Flows document blocks onto fixed-size pages.
//!
//! # Flow rules
//! - A single cursor tracks the current page and vertical offset.
//! - Before any line (or tag row) is placed, if `y + line_height` would pass
//!   the bottom margin a new page starts and `y` resets to the top margin.
//!   That check is the only page-break trigger.
//! - Paragraphs and bullets wrap and may split across pages. Headings are a
//!   single unwrapped line.
//! - Tag rows are chunked into columns and placed row by row; the break check
//!   runs per row.
//!
//! Output is ordered by page, and by `y` within a page.

use serde::{Deserialize, Serialize};

use crate::document::blocks::{DocumentBlock, HeadingLevel, ParagraphTone, TagEntry};
use crate::layout::columns::{chunk_columns, row_count};
use crate::layout::font_metrics::{get_metrics, FontFace};
use crate::layout::geometry::PageGeometry;
use crate::layout::wrap::wrap_text;

const BULLET_PREFIX: &str = "\u{2022} ";

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub face: FontFace,
    pub size_pt: f32,
}

impl LineStyle {
    const fn new(face: FontFace, size_pt: f32) -> Self {
        Self { face, size_pt }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    Left,
    Center,
}

/// A line of text at a fixed position. `y` is the top of the line box,
/// measured downward from the top edge of the page. Pages are 0-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedLine {
    pub page: usize,
    pub x: f32,
    pub y: f32,
    pub text: String,
    pub style: LineStyle,
}

/// A horizontal divider from `x1` to `x2` at offset `y`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedRule {
    pub page: usize,
    pub x1: f32,
    pub x2: f32,
    pub y: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Placement {
    Text(PlacedLine),
    Rule(PlacedRule),
}

impl Placement {
    pub fn page(&self) -> usize {
        match self {
            Placement::Text(line) => line.page,
            Placement::Rule(rule) => rule.page,
        }
    }

    #[cfg(test)]
    pub fn y(&self) -> f32 {
        match self {
            Placement::Text(line) => line.y,
            Placement::Rule(rule) => rule.y,
        }
    }

    #[cfg(test)]
    pub fn as_text(&self) -> Option<&PlacedLine> {
        match self {
            Placement::Text(line) => Some(line),
            Placement::Rule(_) => None,
        }
    }
}

/// Number of pages the placements occupy. An empty document is one blank page.
pub fn page_count(placements: &[Placement]) -> usize {
    placements
        .iter()
        .map(Placement::page)
        .max()
        .map_or(1, |last| last + 1)
}

// ────────────────────────────────────────────────────────────────────────────
// Block styles
// ────────────────────────────────────────────────────────────────────────────

fn heading_style(level: HeadingLevel) -> (LineStyle, Align) {
    match level {
        HeadingLevel::Title => (LineStyle::new(FontFace::TimesBold, 18.0), Align::Center),
        HeadingLevel::Section => (LineStyle::new(FontFace::TimesBold, 12.0), Align::Left),
        HeadingLevel::Entry => (LineStyle::new(FontFace::TimesBold, 11.0), Align::Left),
    }
}

fn paragraph_style(tone: ParagraphTone) -> (LineStyle, Align) {
    match tone {
        ParagraphTone::Subtitle => (LineStyle::new(FontFace::TimesRoman, 12.0), Align::Center),
        ParagraphTone::Contact => (LineStyle::new(FontFace::TimesRoman, 10.0), Align::Center),
        ParagraphTone::Body => (LineStyle::new(FontFace::TimesRoman, 10.0), Align::Left),
        ParagraphTone::Detail => (LineStyle::new(FontFace::TimesRoman, 9.0), Align::Left),
    }
}

const BULLET_STYLE: LineStyle = LineStyle::new(FontFace::TimesRoman, 10.0);
const TAG_STYLE: LineStyle = LineStyle::new(FontFace::TimesRoman, 10.0);

// ────────────────────────────────────────────────────────────────────────────
// Cursor
// ────────────────────────────────────────────────────────────────────────────

/// Current page and vertical offset of one layout pass.
#[derive(Debug, Clone, Copy)]
struct LayoutCursor {
    page: usize,
    y: f32,
}

impl LayoutCursor {
    fn new(geometry: &PageGeometry) -> Self {
        Self {
            page: 0,
            y: geometry.top(),
        }
    }

    /// Starts a new page if a box of `height` would cross the bottom margin.
    fn reserve(&mut self, height: f32, geometry: &PageGeometry) {
        if self.y + height > geometry.bottom_limit() {
            self.page += 1;
            self.y = geometry.top();
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Layout pass
// ────────────────────────────────────────────────────────────────────────────

/// Lays out `blocks` onto pages described by `geometry`.
pub fn layout(blocks: &[DocumentBlock], geometry: &PageGeometry) -> Vec<Placement> {
    let mut engine = LayoutPass {
        geometry,
        cursor: LayoutCursor::new(geometry),
        out: Vec::new(),
    };

    for block in blocks {
        match block {
            DocumentBlock::Heading { text, level } => {
                let (style, align) = heading_style(*level);
                engine.place_line(text.trim(), style, align);
            }
            DocumentBlock::Paragraph { text, tone } => {
                let (style, align) = paragraph_style(*tone);
                engine.place_wrapped(text, style, align);
            }
            DocumentBlock::BulletItem { text } => {
                let bulleted = format!("{BULLET_PREFIX}{}", text.trim());
                engine.place_wrapped(&bulleted, BULLET_STYLE, Align::Left);
            }
            DocumentBlock::TagRow { entries } => engine.place_tag_row(entries),
            DocumentBlock::Spacer { height_pt } => engine.cursor.y += height_pt.max(0.0),
            DocumentBlock::Rule => engine.place_rule(),
        }
    }

    engine.out
}

struct LayoutPass<'a> {
    geometry: &'a PageGeometry,
    cursor: LayoutCursor,
    out: Vec<Placement>,
}

impl LayoutPass<'_> {
    fn place_wrapped(&mut self, text: &str, style: LineStyle, align: Align) {
        let metrics = get_metrics(style.face);
        let lines = wrap_text(text, metrics, style.size_pt, self.geometry.content_width());
        for line in lines {
            self.place_line(&line, style, align);
        }
    }

    fn place_line(&mut self, text: &str, style: LineStyle, align: Align) {
        if text.is_empty() {
            return;
        }
        let line_height = self.geometry.line_height(style.size_pt);
        self.cursor.reserve(line_height, self.geometry);

        let x = match align {
            Align::Left => self.geometry.margin_pt,
            Align::Center => {
                // Centered lines are never wrapped; an over-wide one starts at the margin
                let width = get_metrics(style.face).measure_pt(text, style.size_pt);
                ((self.geometry.page_width_pt - width) / 2.0).max(self.geometry.margin_pt)
            }
        };

        self.out.push(Placement::Text(PlacedLine {
            page: self.cursor.page,
            x,
            y: self.cursor.y,
            text: text.to_string(),
            style,
        }));
        self.cursor.y += line_height;
    }

    fn place_tag_row(&mut self, entries: &[TagEntry]) {
        let columns = chunk_columns(entries, self.geometry.tag_columns);
        let line_height = self.geometry.line_height(TAG_STYLE.size_pt);

        for row in 0..row_count(&columns) {
            self.cursor.reserve(line_height, self.geometry);
            for (col, column) in columns.iter().enumerate() {
                if let Some(entry) = column.get(row) {
                    self.out.push(Placement::Text(PlacedLine {
                        page: self.cursor.page,
                        x: self.geometry.column_x(col),
                        y: self.cursor.y,
                        text: entry.display(),
                        style: TAG_STYLE,
                    }));
                }
            }
            self.cursor.y += line_height;
        }
    }

    fn place_rule(&mut self) {
        self.cursor.reserve(0.0, self.geometry);
        self.out.push(Placement::Rule(PlacedRule {
            page: self.cursor.page,
            x1: self.geometry.margin_pt,
            x2: self.geometry.page_width_pt - self.geometry.margin_pt,
            y: self.cursor.y,
        }));
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
