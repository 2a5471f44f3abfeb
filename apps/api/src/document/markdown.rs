//! Markdown rendition of the résumé, served by the markdown export route.

use crate::document::builder::contact_line;
use crate::experience::aggregator::{aggregate_at, alphabetical};
use crate::experience::format::experience_stars;
use crate::experience::period::YearMonth;
use crate::models::resume::{JobRecord, ResumeData};

pub fn render_markdown(resume: &ResumeData, today: YearMonth) -> String {
    let personal = &resume.personal;

    let skills = alphabetical(&aggregate_at(&resume.experience, today))
        .iter()
        .map(|t| format!("{} {}", t.technology, experience_stars(t.years)))
        .collect::<Vec<_>>()
        .join(", ");

    let languages = resume
        .languages
        .iter()
        .map(|l| format!("* {} ({})", l.name, l.level))
        .collect::<Vec<_>>()
        .join("\n");

    let experience = resume
        .experience
        .iter()
        .map(job_markdown)
        .collect::<Vec<_>>()
        .join("\n\n\n");

    format!(
        "# {name} - {title}\n\n{contact}\n\n{summary} {extended}\n\n## Skills\n\n{skills}\n\n## Languages\n\n{languages}\n\n## Experience\n\n{experience}\n",
        name = personal.name,
        title = personal.title,
        contact = contact_line(personal),
        summary = personal.summary,
        extended = personal.summary_extended,
    )
}

fn job_markdown(job: &JobRecord) -> String {
    let achievements = job
        .achievements
        .iter()
        .map(|a| format!("* {}. {}", a.headline, a.description))
        .collect::<Vec<_>>()
        .join("\n\n");

    let mut out = format!("**{}** {}\n### {}\n{}", job.company, job.period, job.role, achievements);
    if !job.technologies.is_empty() {
        out.push_str("\n\n");
        out.push_str(&job.technologies.join(" - "));
    }
    out
}
