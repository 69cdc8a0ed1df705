//! Capped recommendation view over upstream-scored candidates.
//!
//! Relevance and proximity are separate signals: a highly relevant distant
//! job must not be hidden by a mediocre nearby one, so the distance
//! annotation never feeds the ordering. The upstream score sort is trusted
//! as-is; callers wanting distance order sort explicitly with
//! `yaadwork_geo::sort_by_distance` before ranking.

use yaadwork_core::{Coordinate, JobCandidate, RankedJob};
use yaadwork_geo::distance_km;

/// How many recommendations the capped view shows by default.
pub const DEFAULT_DISPLAY_CAP: usize = 6;

/// Display tier of a recommendation score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchBadge {
    PerfectMatch,
    GreatMatch,
    GoodMatch,
    Suggested,
}

impl MatchBadge {
    /// Tier a score. Thresholds are strict: a score of exactly 50 lands in
    /// `GreatMatch`, not `PerfectMatch`. Downstream consumers depend on this
    /// tie-breaking.
    #[must_use]
    pub fn for_score(score: f64) -> Self {
        if score > 50.0 {
            MatchBadge::PerfectMatch
        } else if score > 30.0 {
            MatchBadge::GreatMatch
        } else if score > 15.0 {
            MatchBadge::GoodMatch
        } else {
            MatchBadge::Suggested
        }
    }

    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            MatchBadge::PerfectMatch => "Perfect Match",
            MatchBadge::GreatMatch => "Great Match",
            MatchBadge::GoodMatch => "Good Match",
            MatchBadge::Suggested => "Suggested",
        }
    }
}

impl std::fmt::Display for MatchBadge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Badge for a candidate; an unscored candidate is merely `Suggested`.
#[must_use]
pub fn badge_for(job: &JobCandidate) -> MatchBadge {
    MatchBadge::for_score(job.recommendation_score.unwrap_or(0.0))
}

/// Annotate candidates with advisory distance and truncate to `cap`.
///
/// Output order is the input order. Candidates without a position, or calls
/// without a user coordinate, carry no distance.
#[must_use]
pub fn rank(candidates: &[JobCandidate], user: Option<&Coordinate>, cap: usize) -> Vec<RankedJob> {
    candidates
        .iter()
        .take(cap)
        .map(|job| RankedJob {
            distance_km: match (user, job.position) {
                (Some(u), Some(p)) => Some(distance_km(u.point(), p)),
                _ => None,
            },
            job: job.clone(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use uuid::Uuid;
    use yaadwork_core::GeoPoint;

    use super::*;

    fn job(title: &str, score: Option<f64>, position: Option<GeoPoint>) -> JobCandidate {
        JobCandidate {
            id: Uuid::new_v4(),
            title: title.to_string(),
            company_name: "Acme".to_string(),
            location_label: String::new(),
            position,
            salary: None,
            job_type: "full-time".to_string(),
            industry: "retail".to_string(),
            experience_level: "entry".to_string(),
            recommendation_score: score,
        }
    }

    fn kingston_user() -> Coordinate {
        Coordinate::new(17.997, -76.7936, 15.0, Utc::now(), false, None).unwrap()
    }

    #[test]
    fn badge_boundaries_are_strict() {
        assert_eq!(MatchBadge::for_score(50.0), MatchBadge::GreatMatch);
        assert_eq!(MatchBadge::for_score(50.0001), MatchBadge::GreatMatch);
        assert_eq!(MatchBadge::for_score(51.0), MatchBadge::PerfectMatch);

        assert_eq!(MatchBadge::for_score(30.0), MatchBadge::GoodMatch);
        assert_eq!(MatchBadge::for_score(30.5), MatchBadge::GreatMatch);

        assert_eq!(MatchBadge::for_score(15.0), MatchBadge::Suggested);
        assert_eq!(MatchBadge::for_score(15.1), MatchBadge::GoodMatch);
        assert_eq!(MatchBadge::for_score(0.0), MatchBadge::Suggested);
    }

    #[test]
    fn badge_labels() {
        assert_eq!(MatchBadge::PerfectMatch.to_string(), "Perfect Match");
        assert_eq!(MatchBadge::Suggested.to_string(), "Suggested");
    }

    #[test]
    fn unscored_candidate_is_suggested() {
        assert_eq!(badge_for(&job("any", None, None)), MatchBadge::Suggested);
    }

    #[test]
    fn rank_preserves_input_order_and_caps() {
        let candidates: Vec<JobCandidate> = (0..10)
            .map(|i| job(&format!("job-{i}"), Some(f64::from(i)), None))
            .collect();

        let ranked = rank(&candidates, None, DEFAULT_DISPLAY_CAP);
        assert_eq!(ranked.len(), 6);
        let titles: Vec<&str> = ranked.iter().map(|r| r.job.title.as_str()).collect();
        assert_eq!(
            titles,
            ["job-0", "job-1", "job-2", "job-3", "job-4", "job-5"]
        );
    }

    #[test]
    fn rank_annotates_distance_without_reordering() {
        let mobay = GeoPoint {
            lat: 18.4762,
            lng: -77.9189,
        };
        let near = GeoPoint {
            lat: 18.01,
            lng: -76.80,
        };
        // Far job listed first by upstream score; it must stay first.
        let candidates = vec![
            job("far-but-relevant", Some(80.0), Some(mobay)),
            job("near-but-mediocre", Some(20.0), Some(near)),
            job("unplaced", Some(10.0), None),
        ];

        let user = kingston_user();
        let ranked = rank(&candidates, Some(&user), DEFAULT_DISPLAY_CAP);

        assert_eq!(ranked[0].job.title, "far-but-relevant");
        assert!(ranked[0].distance_km.unwrap() > 100.0);
        assert!(ranked[1].distance_km.unwrap() < 10.0);
        assert!(ranked[2].distance_km.is_none());
        // Scores are consumed, never rewritten
        assert_eq!(ranked[0].job.recommendation_score, Some(80.0));
    }

    #[test]
    fn rank_without_user_coordinate_has_no_distances() {
        let candidates = vec![job(
            "placed",
            Some(40.0),
            Some(GeoPoint {
                lat: 18.0,
                lng: -76.8,
            }),
        )];
        let ranked = rank(&candidates, None, DEFAULT_DISPLAY_CAP);
        assert!(ranked[0].distance_km.is_none());
    }
}
