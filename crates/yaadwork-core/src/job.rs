//! Consumed job-candidate records and the derived ranking view.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::coordinate::GeoPoint;

/// Advertised pay for a posting, either a single figure or a band.
/// Whole JMD dollars, no minor units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Salary {
    Exact(i64),
    Band { min: i64, max: i64 },
}

impl Salary {
    /// Lower and upper bound of the advertised pay; an exact figure is a
    /// zero-width band.
    #[must_use]
    pub fn bounds(self) -> (i64, i64) {
        match self {
            Salary::Exact(v) => (v, v),
            Salary::Band { min, max } => (min, max),
        }
    }
}

/// A job posting as returned by the search API.
///
/// This system never creates or persists candidates; it reads position and
/// salary fields and derives a ranked working copy for display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobCandidate {
    pub id: Uuid,
    pub title: String,
    pub company_name: String,
    /// Human-readable location, e.g. "Half Way Tree, St. Andrew".
    pub location_label: String,
    pub position: Option<GeoPoint>,
    pub salary: Option<Salary>,
    pub job_type: String,
    pub industry: String,
    pub experience_level: String,
    /// Relevance score computed upstream; consumed here, never written back.
    pub recommendation_score: Option<f64>,
}

/// A candidate annotated for display.
///
/// `distance_km` is advisory only. Proximity and relevance are separate
/// signals and the distance never feeds back into `recommendation_score`.
#[derive(Debug, Clone, Serialize)]
pub struct RankedJob {
    pub job: JobCandidate,
    pub distance_km: Option<f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salary_bounds_exact_is_zero_width() {
        assert_eq!(Salary::Exact(120_000).bounds(), (120_000, 120_000));
    }

    #[test]
    fn salary_bounds_band() {
        let band = Salary::Band {
            min: 80_000,
            max: 150_000,
        };
        assert_eq!(band.bounds(), (80_000, 150_000));
    }

    #[test]
    fn salary_deserializes_untagged() {
        let exact: Salary = serde_json::from_str("95000").unwrap();
        assert_eq!(exact, Salary::Exact(95_000));

        let band: Salary = serde_json::from_str(r#"{"min": 80000, "max": 150000}"#).unwrap();
        assert_eq!(
            band,
            Salary::Band {
                min: 80_000,
                max: 150_000
            }
        );
    }

    #[test]
    fn job_candidate_round_trips_through_json() {
        let job = JobCandidate {
            id: Uuid::new_v4(),
            title: "Line Cook".to_string(),
            company_name: "Pelican Grill".to_string(),
            location_label: "Montego Bay, St. James".to_string(),
            position: Some(GeoPoint {
                lat: 18.4762,
                lng: -77.9189,
            }),
            salary: Some(Salary::Exact(65_000)),
            job_type: "full-time".to_string(),
            industry: "hospitality".to_string(),
            experience_level: "entry".to_string(),
            recommendation_score: Some(41.5),
        };

        let json = serde_json::to_string(&job).unwrap();
        let back: JobCandidate = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, job.id);
        assert_eq!(back.salary, job.salary);
        assert_eq!(back.recommendation_score, Some(41.5));
    }
}
