//! Facet filters that narrow the candidate set before ranking.
//!
//! All pure predicates over consumed records; the search API owns the
//! candidates and this module never mutates them.

use yaadwork_core::{GeoPoint, JobCandidate};
use yaadwork_geo::is_within_radius;

use crate::salary_filter::SalaryRange;

/// Active facet selections for a search. `None` means "any".
#[derive(Debug, Clone, Default)]
pub struct Facets {
    pub job_type: Option<String>,
    pub industry: Option<String>,
    pub experience_level: Option<String>,
    /// Parish name matched against the candidate's location label.
    pub parish: Option<String>,
    pub salary: Option<SalaryRange>,
    /// Straight-line distance cutoff; only effective with a user position.
    pub radius_km: Option<f64>,
}

/// Does the candidate's advertised pay fall inside the filter range?
///
/// With `show_unspecified` the range is not applied at all. Otherwise a
/// candidate without an advertised salary is excluded, an exact figure must
/// sit inside the range, and a band must overlap it.
#[must_use]
pub fn salary_matches(job: &JobCandidate, range: SalaryRange) -> bool {
    if range.show_unspecified {
        return true;
    }
    match job.salary {
        None => false,
        Some(salary) => {
            let (lo, hi) = salary.bounds();
            lo <= range.max && hi >= range.min
        }
    }
}

fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.eq_ignore_ascii_case(b)
}

/// Apply every active facet. Radius filtering needs the user's position; with
/// `user == None` a radius facet excludes everything it cannot place, which
/// collapses to "no radius filter" only when the facet itself is unset.
#[must_use]
pub fn apply_facets(
    candidates: &[JobCandidate],
    facets: &Facets,
    user: Option<GeoPoint>,
) -> Vec<JobCandidate> {
    candidates
        .iter()
        .filter(|job| {
            facets
                .job_type
                .as_deref()
                .is_none_or(|t| eq_ignore_case(&job.job_type, t))
        })
        .filter(|job| {
            facets
                .industry
                .as_deref()
                .is_none_or(|i| eq_ignore_case(&job.industry, i))
        })
        .filter(|job| {
            facets
                .experience_level
                .as_deref()
                .is_none_or(|e| eq_ignore_case(&job.experience_level, e))
        })
        .filter(|job| {
            facets.parish.as_deref().is_none_or(|p| {
                job.location_label
                    .to_lowercase()
                    .contains(&p.to_lowercase())
            })
        })
        .filter(|job| {
            facets
                .salary
                .is_none_or(|range| salary_matches(job, range))
        })
        .filter(|job| {
            facets
                .radius_km
                .is_none_or(|radius| is_within_radius(user, job.position, radius))
        })
        .cloned()
        .collect()
}
