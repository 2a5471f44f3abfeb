//! Experience aggregator. Folds job records into per-technology summaries.
//!
//! Durations are summed per job, not unioned: two overlapping jobs that both
//! list a technology each contribute their full span. Technology keys are
//! case-insensitive; the first-seen spelling is kept for display.
//!
//! Nothing here is cached. The dataset is small and static, so every caller
//! recomputes from the source records.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::experience::period::{months_between, YearMonth};
use crate::models::resume::JobRecord;

// ────────────────────────────────────────────────────────────────────────────
// Types
// ────────────────────────────────────────────────────────────────────────────

/// The latest point a technology was used.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LastUsed {
    /// At least one contributing job is ongoing.
    Present,
    Until(YearMonth),
}

impl LastUsed {
    pub fn label(&self) -> String {
        match self {
            LastUsed::Present => "Present".to_string(),
            LastUsed::Until(month) => month.label(),
        }
    }

    /// True if `self` is strictly later than `other`. `Present` is later than
    /// any month and never later than itself.
    fn is_later_than(&self, other: &LastUsed) -> bool {
        match (self, other) {
            (LastUsed::Present, LastUsed::Present) => false,
            (LastUsed::Present, LastUsed::Until(_)) => true,
            (LastUsed::Until(_), LastUsed::Present) => false,
            (LastUsed::Until(a), LastUsed::Until(b)) => a > b,
        }
    }
}

/// Aggregated experience for one technology across all jobs that list it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnologyExperience {
    /// Display name, first-seen casing.
    pub technology: String,
    /// Sum of each contributing job's span, in fractional years (months / 12).
    pub years: f64,
    /// Distinct employers in first-seen order.
    pub companies: Vec<String>,
    /// Distinct job ids in first-seen order.
    pub experiences: Vec<String>,
    pub first_used: YearMonth,
    pub last_used: LastUsed,
}

/// Technology key → summary, iterating in first-seen order.
#[derive(Debug, Clone, Default)]
pub struct TechnologyMap {
    entries: Vec<TechnologyExperience>,
    index: HashMap<String, usize>,
}

impl TechnologyMap {
    pub fn get(&self, technology: &str) -> Option<&TechnologyExperience> {
        self.index
            .get(&technology_key(technology))
            .map(|&i| &self.entries[i])
    }

    pub fn iter(&self) -> impl Iterator<Item = &TechnologyExperience> {
        self.entries.iter()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Aggregation
// ────────────────────────────────────────────────────────────────────────────

/// Aggregates using the current month for ongoing jobs.
pub fn aggregate(jobs: &[JobRecord]) -> TechnologyMap {
    aggregate_at(jobs, YearMonth::current())
}

/// Aggregates with `today` standing in for the end of every ongoing job.
pub fn aggregate_at(jobs: &[JobRecord], today: YearMonth) -> TechnologyMap {
    let mut map = TechnologyMap::default();

    for job in jobs {
        let years = job_years(job, today);
        let last = match job.end_date {
            Some(end) => LastUsed::Until(end),
            None => LastUsed::Present,
        };

        for tag in &job.technologies {
            let key = technology_key(tag);
            if key.is_empty() {
                continue;
            }

            let idx = *map.index.entry(key).or_insert_with(|| {
                map.entries.push(TechnologyExperience {
                    technology: tag.trim().to_string(),
                    years: 0.0,
                    companies: Vec::new(),
                    experiences: Vec::new(),
                    first_used: job.start_date,
                    last_used: last,
                });
                map.entries.len() - 1
            });
            let entry = &mut map.entries[idx];

            entry.years += years;
            if !entry.companies.contains(&job.company) {
                entry.companies.push(job.company.clone());
            }
            if !entry.experiences.contains(&job.id) {
                entry.experiences.push(job.id.clone());
            }
            // Strict comparisons: an equal date never displaces the earlier job.
            if job.start_date < entry.first_used {
                entry.first_used = job.start_date;
            }
            if last.is_later_than(&entry.last_used) {
                entry.last_used = last;
            }
        }
    }

    map
}

/// One job's span in fractional years, clamped at zero.
pub fn job_years(job: &JobRecord, today: YearMonth) -> f64 {
    let end = job.end_date.unwrap_or(today);
    let months = months_between(job.start_date, end).max(0);
    months as f64 / 12.0
}

// ────────────────────────────────────────────────────────────────────────────
// Presentation orderings
// ────────────────────────────────────────────────────────────────────────────

/// Ranked view: most experience first. Ties keep first-seen order.
pub fn by_experience(map: &TechnologyMap) -> Vec<TechnologyExperience> {
    let mut list: Vec<_> = map.iter().cloned().collect();
    list.sort_by(|a, b| {
        b.years
            .partial_cmp(&a.years)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    list
}

/// Alphabetical view, case-insensitive ascending.
pub fn alphabetical(map: &TechnologyMap) -> Vec<TechnologyExperience> {
    let mut list: Vec<_> = map.iter().cloned().collect();
    list.sort_by_cached_key(|t| t.technology.to_lowercase());
    list
}

/// Jobs whose tags include `technology`, in input order.
pub fn jobs_using<'a>(jobs: &'a [JobRecord], technology: &str) -> Vec<&'a JobRecord> {
    let key = technology_key(technology);
    jobs.iter()
        .filter(|job| job.technologies.iter().any(|t| technology_key(t) == key))
        .collect()
}

fn technology_key(tag: &str) -> String {
    tag.trim().to_lowercase()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::fixtures::{job, ym};

    const TODAY: YearMonth = YearMonth {
        year: 2024,
        month: 6,
    };

    #[test]
    fn test_same_month_job_contributes_zero() {
        let jobs = vec![job("a", "Acme", ym(2022, 3), Some(ym(2022, 3)), &["Rust"])];
        let map = aggregate_at(&jobs, TODAY);
        assert_eq!(map.get("rust").unwrap().years, 0.0);
    }

    #[test]
    fn test_end_before_start_clamps_to_zero() {
        let jobs = vec![job("a", "Acme", ym(2022, 5), Some(ym(2022, 1)), &["Go"])];
        let map = aggregate_at(&jobs, TODAY);
        assert_eq!(map.get("Go").unwrap().years, 0.0);
    }

    #[test]
    fn test_overlapping_jobs_sum_not_union() {
        let jobs = vec![
            job("a", "Acme", ym(2020, 1), Some(ym(2021, 1)), &["Rust"]),
            job("b", "Beta", ym(2020, 1), Some(ym(2021, 1)), &["rust"]),
        ];
        let map = aggregate_at(&jobs, TODAY);
        let rust = map.get("RUST").unwrap();
        assert!((rust.years - 2.0).abs() < 1e-9, "got {}", rust.years);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_first_seen_casing_is_display_name() {
        let jobs = vec![
            job("a", "Acme", ym(2020, 1), Some(ym(2020, 6)), &["PostgreSQL"]),
            job("b", "Beta", ym(2021, 1), Some(ym(2021, 6)), &["postgresql"]),
        ];
        let map = aggregate_at(&jobs, TODAY);
        assert_eq!(map.get("postgresql").unwrap().technology, "PostgreSQL");
    }

    #[test]
    fn test_companies_are_deduplicated_in_order() {
        let jobs = vec![
            job("a", "Acme", ym(2018, 1), Some(ym(2019, 1)), &["Rust"]),
            job("b", "Beta", ym(2019, 2), Some(ym(2020, 1)), &["Rust"]),
            job("c", "Acme", ym(2020, 2), Some(ym(2021, 1)), &["Rust"]),
        ];
        let map = aggregate_at(&jobs, TODAY);
        let rust = map.get("rust").unwrap();
        assert_eq!(rust.companies, vec!["Acme", "Beta"]);
        assert_eq!(rust.experiences, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_first_and_last_used_track_extremes() {
        let jobs = vec![
            job("b", "Beta", ym(2019, 1), Some(ym(2020, 1)), &["Rust"]),
            job("a", "Acme", ym(2016, 4), Some(ym(2017, 1)), &["Rust"]),
            job("c", "Core", ym(2020, 3), Some(ym(2022, 9)), &["Rust"]),
        ];
        let map = aggregate_at(&jobs, TODAY);
        let rust = map.get("rust").unwrap();
        assert_eq!(rust.first_used, ym(2016, 4));
        assert_eq!(rust.last_used, LastUsed::Until(ym(2022, 9)));
    }

    #[test]
    fn test_ongoing_job_makes_last_used_present() {
        let jobs = vec![
            job("a", "Acme", ym(2019, 1), None, &["Rust"]),
            job("b", "Beta", ym(2017, 1), Some(ym(2030, 1)), &["Rust"]),
        ];
        let map = aggregate_at(&jobs, TODAY);
        assert_eq!(map.get("rust").unwrap().last_used, LastUsed::Present);
    }

    #[test]
    fn test_equal_start_keeps_first_job() {
        let jobs = vec![
            job("a", "Acme", ym(2020, 1), Some(ym(2020, 6)), &["Rust"]),
            job("b", "Beta", ym(2020, 1), Some(ym(2020, 9)), &["Rust"]),
        ];
        let map = aggregate_at(&jobs, TODAY);
        let rust = map.get("rust").unwrap();
        assert_eq!(rust.first_used, ym(2020, 1));
        assert_eq!(rust.companies[0], "Acme");
    }

    #[test]
    fn test_two_job_end_to_end() {
        let jobs = vec![
            job("a", "Acme", ym(2020, 1), Some(ym(2021, 1)), &["X"]),
            job("b", "Beta", ym(2021, 6), None, &["X"]),
        ];
        let map = aggregate_at(&jobs, TODAY);
        let x = map.get("x").unwrap();
        // 12 months + (2021-06 → 2024-06) 36 months
        assert!((x.years - (1.0 + 36.0 / 12.0)).abs() < 1e-9);
        assert_eq!(x.last_used, LastUsed::Present);
        assert_eq!(x.last_used.label(), "Present");
        assert_eq!(x.first_used.label(), "January 2020");
        assert_eq!(x.companies, vec!["Acme", "Beta"]);
    }

    #[test]
    fn test_blank_tags_are_skipped() {
        let jobs = vec![job("a", "Acme", ym(2020, 1), Some(ym(2021, 1)), &["  ", "Rust"])];
        let map = aggregate_at(&jobs, TODAY);
        assert_eq!(map.len(), 1);
    }

    #[test]
    fn test_by_experience_sorts_descending_stable() {
        let jobs = vec![
            job("a", "Acme", ym(2020, 1), Some(ym(2021, 1)), &["Go", "Rust"]),
            job("b", "Beta", ym(2021, 1), Some(ym(2023, 1)), &["Rust"]),
            job("c", "Core", ym(2019, 1), Some(ym(2020, 1)), &["Zig"]),
        ];
        let map = aggregate_at(&jobs, TODAY);
        let ranked: Vec<_> = by_experience(&map)
            .into_iter()
            .map(|t| t.technology)
            .collect();
        // Go and Zig both have 1.0 years; Go was seen first.
        assert_eq!(ranked, vec!["Rust", "Go", "Zig"]);
    }

    #[test]
    fn test_alphabetical_is_case_insensitive() {
        let jobs = vec![job(
            "a",
            "Acme",
            ym(2020, 1),
            Some(ym(2021, 1)),
            &["kubernetes", "AWS", "Docker", "ansible"],
        )];
        let map = aggregate_at(&jobs, TODAY);
        let names: Vec<_> = alphabetical(&map)
            .into_iter()
            .map(|t| t.technology)
            .collect();
        assert_eq!(names, vec!["ansible", "AWS", "Docker", "kubernetes"]);
    }

    #[test]
    fn test_jobs_using_matches_case_insensitively() {
        let jobs = vec![
            job("a", "Acme", ym(2020, 1), Some(ym(2021, 1)), &["Rust"]),
            job("b", "Beta", ym(2021, 1), None, &["Go"]),
            job("c", "Core", ym(2022, 1), None, &["RUST"]),
        ];
        let ids: Vec<_> = jobs_using(&jobs, "rust").iter().map(|j| j.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
    }
}
