//! Pairwise great-circle distance math for job discovery.
//!
//! Pure functions over small candidate sets returned by the search API; no
//! spatial index, no state.

use std::cmp::Ordering;

use yaadwork_core::{GeoPoint, JobCandidate};

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Haversine great-circle distance in kilometers, rounded to one decimal
/// place. Total over all valid coordinates; there are no error cases.
#[must_use]
pub fn distance_km(a: GeoPoint, b: GeoPoint) -> f64 {
    let lat_a = a.lat.to_radians();
    let lat_b = b.lat.to_radians();
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();

    let h = (d_lat / 2.0).sin().powi(2)
        + lat_a.cos() * lat_b.cos() * (d_lng / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());

    round_one_decimal(EARTH_RADIUS_KM * c)
}

fn round_one_decimal(km: f64) -> f64 {
    (km * 10.0).round() / 10.0
}

/// Radius membership. An absent point on either side is "unknown, exclude",
/// not an error.
#[must_use]
pub fn is_within_radius(
    user: Option<GeoPoint>,
    job: Option<GeoPoint>,
    radius_km: f64,
) -> bool {
    match (user, job) {
        (Some(u), Some(j)) => distance_km(u, j) <= radius_km,
        _ => false,
    }
}

/// Stable ascending sort by distance from `user`.
///
/// Jobs without a position sort after every positioned job, keeping their
/// relative input order. Without a user point the input is returned unchanged.
#[must_use]
pub fn sort_by_distance(mut jobs: Vec<JobCandidate>, user: Option<GeoPoint>) -> Vec<JobCandidate> {
    let Some(user) = user else {
        return jobs;
    };

    jobs.sort_by(|a, b| {
        let d_a = a.position.map(|p| distance_km(user, p));
        let d_b = b.position.map(|p| distance_km(user, p));
        match (d_a, d_b) {
            (Some(x), Some(y)) => x.total_cmp(&y),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        }
    });
    jobs
}

/// Tiered distance display. GPS precision below ~50 m is not meaningful and
/// meter-level display above 10 km is noise, so the unit coarsens with range.
#[must_use]
pub fn format_distance(km: f64) -> String {
    if km < 1.0 {
        format!("{:.0}m away", km * 1000.0)
    } else if km <= 10.0 {
        format!("{km:.1}km away")
    } else {
        format!("{km:.0}km away")
    }
}
