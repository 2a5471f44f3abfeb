use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::errors::AppError;
use crate::experience::aggregator::{
    aggregate, alphabetical, by_experience, jobs_using, TechnologyExperience,
};
use crate::experience::format::format_experience;
use crate::models::resume::{JobRecord, ResumeData};
use crate::state::AppState;

#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TechnologyOrder {
    /// Longest total duration first.
    #[default]
    Experience,
    Alphabetical,
}

#[derive(Debug, Deserialize)]
pub struct TechnologyQuery {
    #[serde(default)]
    pub order: TechnologyOrder,
}

#[derive(Debug, Serialize)]
pub struct TechnologySummary {
    pub technology: String,
    pub years: f64,
    /// Human-readable duration, e.g. "2.5 years".
    pub duration: String,
    pub companies: Vec<String>,
    pub first_used: String,
    pub last_used: String,
}

impl From<TechnologyExperience> for TechnologySummary {
    fn from(t: TechnologyExperience) -> Self {
        Self {
            duration: format_experience(t.years),
            first_used: t.first_used.label(),
            last_used: t.last_used.label(),
            technology: t.technology,
            years: t.years,
            companies: t.companies,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TechnologyDetail {
    #[serde(flatten)]
    pub summary: TechnologySummary,
    pub jobs: Vec<JobRecord>,
}

/// GET /api/v1/resume
pub async fn get_resume(State(state): State<AppState>) -> Json<ResumeData> {
    Json(state.resume.as_ref().clone())
}

/// GET /api/v1/technologies?order=experience|alphabetical
pub async fn list_technologies(
    State(state): State<AppState>,
    Query(params): Query<TechnologyQuery>,
) -> Json<Vec<TechnologySummary>> {
    let map = aggregate(&state.resume.experience);
    let ordered = match params.order {
        TechnologyOrder::Experience => by_experience(&map),
        TechnologyOrder::Alphabetical => alphabetical(&map),
    };
    Json(ordered.into_iter().map(TechnologySummary::from).collect())
}

/// GET /api/v1/technologies/:name
pub async fn get_technology(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> Result<Json<TechnologyDetail>, AppError> {
    let map = aggregate(&state.resume.experience);
    let technology = map
        .get(&name)
        .cloned()
        .ok_or_else(|| AppError::NotFound(format!("Technology '{name}' not found")))?;

    let jobs = jobs_using(&state.resume.experience, &name)
        .into_iter()
        .cloned()
        .collect();

    Ok(Json(TechnologyDetail {
        summary: technology.into(),
        jobs,
    }))
}
