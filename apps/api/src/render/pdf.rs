//! Serializes placed lines into a PDF using the base-14 Times fonts.
//!
//! Coordinates from the layout engine are top-down; PDF user space is
//! bottom-up, so every line is flipped against the page height and drawn at
//! its baseline (`top of line box + font size`).

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, ObjectId, Stream};
use thiserror::Error;
use tracing::{debug, warn};

use crate::layout::engine::{page_count, PlacedLine, Placement};
use crate::layout::font_metrics::FontFace;
use crate::layout::geometry::PageGeometry;

const RULE_WIDTH_PT: f32 = 0.75;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF serialization failed: {0}")]
    Pdf(String),

    #[error("Character {0:?} has no WinAnsi code point")]
    Unencodable(char),
}

impl From<lopdf::Error> for RenderError {
    fn from(e: lopdf::Error) -> Self {
        RenderError::Pdf(e.to_string())
    }
}

/// How text and content streams are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderStrategy {
    /// Exact WinAnsi text, Flate-compressed streams. Fails on any character
    /// outside the code page.
    Strict,
    /// Unmappable characters become `?`, streams stay uncompressed. The
    /// fallback path.
    Lossy,
}

/// Renders with `Strict`, retrying once with `Lossy` if that fails.
pub fn render_with_fallback(
    placements: &[Placement],
    geometry: &PageGeometry,
) -> Result<Vec<u8>, RenderError> {
    retry_with_fallback(|strategy| render_pdf(placements, geometry, strategy))
}

/// Runs `attempt` with `Strict`, then once more with `Lossy` on error. The
/// second error is returned as is.
pub fn retry_with_fallback<T, F>(mut attempt: F) -> Result<T, RenderError>
where
    F: FnMut(RenderStrategy) -> Result<T, RenderError>,
{
    match attempt(RenderStrategy::Strict) {
        Ok(out) => Ok(out),
        Err(e) => {
            warn!(error = %e, "Strict render failed, retrying with lossy text");
            attempt(RenderStrategy::Lossy)
        }
    }
}

pub fn render_pdf(
    placements: &[Placement],
    geometry: &PageGeometry,
    strategy: RenderStrategy,
) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.7");
    let pages_id = doc.new_object_id();

    let roman_id = doc.add_object(font_dictionary(FontFace::TimesRoman));
    let bold_id = doc.add_object(font_dictionary(FontFace::TimesBold));
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            FontFace::TimesRoman.resource_name() => roman_id,
            FontFace::TimesBold.resource_name() => bold_id,
        },
    });

    let pages = page_count(placements);
    let mut page_contents: Vec<Content> = (0..pages)
        .map(|_| Content { operations: Vec::new() })
        .collect();

    for placement in placements {
        let Some(content) = page_contents.get_mut(placement.page()) else {
            continue;
        };
        match placement {
            Placement::Text(line) => push_text(content, line, geometry, strategy)?,
            Placement::Rule(rule) => {
                let y = geometry.page_height_pt - rule.y;
                content.operations.extend([
                    Operation::new("w", vec![RULE_WIDTH_PT.into()]),
                    Operation::new("m", vec![rule.x1.into(), y.into()]),
                    Operation::new("l", vec![rule.x2.into(), y.into()]),
                    Operation::new("S", vec![]),
                ]);
            }
        }
    }

    let mut page_ids: Vec<ObjectId> = Vec::with_capacity(pages);
    for content in page_contents {
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "MediaBox" => vec![
                0.into(),
                0.into(),
                geometry.page_width_pt.into(),
                geometry.page_height_pt.into(),
            ],
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        page_ids.push(page_id);
    }

    let kids: Vec<Object> = page_ids.iter().map(|id| Object::from(*id)).collect();
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => page_ids.len() as i64,
        }),
    );
    let catalog_id = doc.add_object(dictionary! { "Type" => "Catalog", "Pages" => pages_id });
    doc.trailer.set("Root", catalog_id);

    if strategy == RenderStrategy::Strict {
        doc.compress();
    }

    let mut out = Vec::new();
    doc.save_to(&mut out)
        .map_err(|e| RenderError::Pdf(e.to_string()))?;
    debug!(pages, bytes = out.len(), ?strategy, "PDF rendered");
    Ok(out)
}

fn font_dictionary(face: FontFace) -> lopdf::Dictionary {
    dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => face.base_font(),
        "Encoding" => "WinAnsiEncoding",
    }
}

fn push_text(
    content: &mut Content,
    line: &PlacedLine,
    geometry: &PageGeometry,
    strategy: RenderStrategy,
) -> Result<(), RenderError> {
    let text = match strategy {
        RenderStrategy::Strict => to_win_ansi(&line.text)?,
        RenderStrategy::Lossy => to_win_ansi_lossy(&line.text),
    };
    let baseline = geometry.page_height_pt - (line.y + line.style.size_pt);
    content.operations.extend([
        Operation::new("BT", vec![]),
        Operation::new(
            "Tf",
            vec![
                Object::Name(line.style.face.resource_name().as_bytes().to_vec()),
                line.style.size_pt.into(),
            ],
        ),
        Operation::new("Td", vec![line.x.into(), baseline.into()]),
        Operation::new("Tj", vec![Object::string_literal(text)]),
        Operation::new("ET", vec![]),
    ]);
    Ok(())
}

/// Transcodes to WinAnsiEncoding bytes, failing on the first character
/// outside the code page.
pub fn to_win_ansi(text: &str) -> Result<Vec<u8>, RenderError> {
    text.chars()
        .map(|c| win_ansi_byte(c).ok_or(RenderError::Unencodable(c)))
        .collect()
}

/// Like [`to_win_ansi`], with `?` standing in for unmappable characters.
pub fn to_win_ansi_lossy(text: &str) -> Vec<u8> {
    text.chars().map(|c| win_ansi_byte(c).unwrap_or(b'?')).collect()
}

fn win_ansi_byte(c: char) -> Option<u8> {
    let byte = match c {
        ' '..='~' => c as u8,
        '\u{2022}' => 0x95,
        '\u{2013}' => 0x96,
        '\u{2014}' => 0x97,
        '\u{2018}' => 0x91,
        '\u{2019}' => 0x92,
        '\u{201C}' => 0x93,
        '\u{201D}' => 0x94,
        '\u{20AC}' => 0x80,
        '\u{A0}'..='\u{FF}' => c as u32 as u8,
        _ => return None,
    };
    Some(byte)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
