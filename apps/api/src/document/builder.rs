//! Document model builder: turns the résumé record into an ordered block list.
//!
//! The section order is fixed per document kind. Vertical gaps between
//! sections are emitted as explicit spacer blocks so the layout engine stays
//! free of document-specific knowledge.

use tracing::warn;

use crate::contact::deobfuscate_email;
use crate::document::blocks::{DocumentBlock, DocumentKind, HeadingLevel, ParagraphTone, TagEntry};
use crate::experience::aggregator::{aggregate_at, alphabetical};
use crate::experience::format::format_experience;
use crate::experience::period::YearMonth;
use crate::models::resume::{JobRecord, PersonalInfo, ResumeData};

// Gaps in points (0.05" / 0.1" / 0.15" / 0.2" / 0.3").
const GAP_HAIR: f32 = 3.6;
const GAP_TIGHT: f32 = 7.2;
const GAP_SMALL: f32 = 10.8;
const GAP_MEDIUM: f32 = 14.4;
const GAP_LARGE: f32 = 21.6;

/// Builds the block sequence for `kind`. `today` closes ongoing jobs when
/// technology durations are computed.
pub fn build_document(resume: &ResumeData, kind: DocumentKind, today: YearMonth) -> Vec<DocumentBlock> {
    let mut blocks = Vec::new();
    push_header(&mut blocks, &resume.personal);

    match kind {
        DocumentKind::CoverLetter => {
            push_section(&mut blocks, "PROFESSIONAL SUMMARY");
            blocks.push(DocumentBlock::paragraph(
                resume.personal.summary.clone(),
                ParagraphTone::Body,
            ));
            if !resume.personal.summary_extended.trim().is_empty() {
                blocks.push(DocumentBlock::spacer(GAP_MEDIUM));
                blocks.push(DocumentBlock::paragraph(
                    resume.personal.summary_extended.clone(),
                    ParagraphTone::Body,
                ));
            }
        }
        DocumentKind::Resume => {
            push_section(&mut blocks, "PROFESSIONAL SUMMARY");
            blocks.push(DocumentBlock::paragraph(
                combined_summary(&resume.personal),
                ParagraphTone::Body,
            ));
            blocks.push(DocumentBlock::spacer(GAP_LARGE));

            let entries = technology_entries(&resume.experience, today);
            if !entries.is_empty() {
                push_section(&mut blocks, "TECHNICAL SKILLS");
                blocks.push(DocumentBlock::TagRow { entries });
                blocks.push(DocumentBlock::spacer(GAP_MEDIUM));
            }

            if !resume.languages.is_empty() {
                push_section(&mut blocks, "LANGUAGES");
                for lang in &resume.languages {
                    blocks.push(DocumentBlock::paragraph(
                        format!("{}: {}", lang.name, lang.level),
                        ParagraphTone::Body,
                    ));
                }
                blocks.push(DocumentBlock::spacer(GAP_LARGE));
            }

            if !resume.experience.is_empty() {
                push_section(&mut blocks, "PROFESSIONAL EXPERIENCE");
                for job in &resume.experience {
                    push_job(&mut blocks, job);
                }
            }
        }
    }

    blocks
}

/// `"{email} | {linkedin} | {website}"`. The address is omitted if the stored
/// form cannot be decoded.
pub fn contact_line(personal: &PersonalInfo) -> String {
    match deobfuscate_email(&personal.email) {
        Ok(email) => format!("{email} | {} | {}", personal.linkedin, personal.website),
        Err(e) => {
            warn!(error = %e, "Contact email could not be decoded; leaving it out");
            format!("{} | {}", personal.linkedin, personal.website)
        }
    }
}

/// Alphabetical tag entries paired with formatted durations.
pub fn technology_entries(jobs: &[JobRecord], today: YearMonth) -> Vec<TagEntry> {
    alphabetical(&aggregate_at(jobs, today))
        .into_iter()
        .map(|t| TagEntry {
            duration: format_experience(t.years),
            tag: t.technology,
        })
        .collect()
}

fn combined_summary(personal: &PersonalInfo) -> String {
    format!("{} {}", personal.summary, personal.summary_extended)
        .trim()
        .to_string()
}

fn push_header(blocks: &mut Vec<DocumentBlock>, personal: &PersonalInfo) {
    blocks.push(DocumentBlock::heading(personal.name.clone(), HeadingLevel::Title));
    blocks.push(DocumentBlock::spacer(GAP_SMALL));
    blocks.push(DocumentBlock::paragraph(personal.title.clone(), ParagraphTone::Subtitle));
    blocks.push(DocumentBlock::spacer(GAP_SMALL));
    blocks.push(DocumentBlock::paragraph(contact_line(personal), ParagraphTone::Contact));
    blocks.push(DocumentBlock::spacer(GAP_LARGE));
    blocks.push(DocumentBlock::Rule);
    blocks.push(DocumentBlock::spacer(GAP_LARGE));
}

fn push_section(blocks: &mut Vec<DocumentBlock>, title: &str) {
    blocks.push(DocumentBlock::heading(title, HeadingLevel::Section));
    blocks.push(DocumentBlock::spacer(GAP_SMALL));
}

fn push_job(blocks: &mut Vec<DocumentBlock>, job: &JobRecord) {
    blocks.push(DocumentBlock::heading(job.role.clone(), HeadingLevel::Entry));
    blocks.push(DocumentBlock::paragraph(
        format!("{} | {}", job.company, job.period),
        ParagraphTone::Body,
    ));
    blocks.push(DocumentBlock::spacer(GAP_TIGHT));

    for achievement in &job.achievements {
        blocks.push(DocumentBlock::bullet(format!(
            "{}. {}",
            achievement.headline, achievement.description
        )));
    }

    if !job.technologies.is_empty() {
        blocks.push(DocumentBlock::spacer(GAP_HAIR));
        blocks.push(DocumentBlock::paragraph(
            format!("Technologies: {}", job.technologies.join(", ")),
            ParagraphTone::Detail,
        ));
    }
    blocks.push(DocumentBlock::spacer(GAP_LARGE));
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
