use serde::{Deserialize, Serialize};

/// Which document an export produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentKind {
    Resume,
    CoverLetter,
}

impl DocumentKind {
    /// File-name suffix appended after the person's name.
    pub fn artifact_suffix(&self) -> &'static str {
        match self {
            DocumentKind::Resume => "Resume",
            DocumentKind::CoverLetter => "Cover_Letter",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeadingLevel {
    /// Person's name at the top of the page.
    Title,
    /// Section header ("PROFESSIONAL SUMMARY").
    Section,
    /// Job role inside the experience section.
    Entry,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParagraphTone {
    /// Centered line under the title (job title).
    Subtitle,
    /// Centered contact line.
    Contact,
    Body,
    /// Small print, e.g. the technologies line of a job.
    Detail,
}

/// One entry of a multi-column tag row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TagEntry {
    pub tag: String,
    pub duration: String,
}

impl TagEntry {
    pub fn display(&self) -> String {
        format!("{} ({})", self.tag, self.duration)
    }
}

/// Renderer-agnostic unit of document content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DocumentBlock {
    /// Always a single, unwrapped line.
    Heading { text: String, level: HeadingLevel },
    Paragraph { text: String, tone: ParagraphTone },
    BulletItem { text: String },
    TagRow { entries: Vec<TagEntry> },
    /// Vertical gap in points.
    Spacer { height_pt: f32 },
    /// Full-width horizontal divider.
    Rule,
}

impl DocumentBlock {
    pub fn heading(text: impl Into<String>, level: HeadingLevel) -> Self {
        DocumentBlock::Heading {
            text: text.into(),
            level,
        }
    }

    pub fn paragraph(text: impl Into<String>, tone: ParagraphTone) -> Self {
        DocumentBlock::Paragraph {
            text: text.into(),
            tone,
        }
    }

    pub fn bullet(text: impl Into<String>) -> Self {
        DocumentBlock::BulletItem { text: text.into() }
    }

    pub fn spacer(height_pt: f32) -> Self {
        DocumentBlock::Spacer { height_pt }
    }
}
