use std::collections::HashSet;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::experience::period::{deserialize_optional_period, YearMonth};

/// Static résumé record, loaded once at startup and shared read-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResumeData {
    pub personal: PersonalInfo,
    #[serde(default)]
    pub soft_skills: Vec<String>,
    #[serde(default)]
    pub languages: Vec<Language>,
    pub experience: Vec<JobRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub name: String,
    pub title: String,
    pub linkedin: String,
    pub website: String,
    pub summary: String,
    #[serde(default)]
    pub summary_extended: String,
    /// Contact address in obfuscated form; see `contact::deobfuscate_email`.
    pub email: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Language {
    pub name: String,
    pub level: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Achievement {
    pub headline: String,
    pub description: String,
}

/// One employment period. `end_date = None` means the job is ongoing.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobRecord {
    pub id: String,
    pub company: String,
    pub role: String,
    /// Display period, e.g. "January 2020 - March 2022".
    pub period: String,
    pub start_date: YearMonth,
    #[serde(default, deserialize_with = "deserialize_optional_period")]
    pub end_date: Option<YearMonth>,
    #[serde(default)]
    pub achievements: Vec<Achievement>,
    #[serde(default)]
    pub technologies: Vec<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DataError {
    #[error("personal.name must not be empty")]
    MissingName,

    #[error("duplicate job id '{0}'")]
    DuplicateJobId(String),
}

impl ResumeData {
    /// Reads and validates the data file. Any failure here is a configuration
    /// error and aborts startup.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read resume data from {}", path.display()))?;
        Self::from_json(&raw).with_context(|| format!("Invalid resume data in {}", path.display()))
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let data: ResumeData =
            serde_json::from_str(raw).context("Resume data is not valid JSON for the schema")?;
        data.validate()?;
        Ok(data)
    }

    pub fn validate(&self) -> Result<(), DataError> {
        if self.personal.name.trim().is_empty() {
            return Err(DataError::MissingName);
        }

        let mut seen = HashSet::new();
        for job in &self.experience {
            if !seen.insert(job.id.as_str()) {
                return Err(DataError::DuplicateJobId(job.id.clone()));
            }
            if let Some(end) = job.end_date {
                if end < job.start_date {
                    // Aggregation clamps this job to zero months.
                    warn!(job = %job.id, %end, start = %job.start_date, "Job ends before it starts");
                }
            }
        }
        Ok(())
    }
}
