#![cfg_attr(feature = "fail-on-warnings", deny(warnings))]
#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(clippy::multiple_crate_versions, clippy::cargo_common_metadata)]

//! Great-circle distances for charter routes.
//!
//! Distances use the haversine formula on a spherical Earth of radius
//! [`EARTH_RADIUS_KM`]. A route is an ordered list of waypoints; its total
//! is the sum of consecutive legs. Routes with fewer than two usable points
//! cannot be measured.

use charter_quote_models::Point;
use serde::{Deserialize, Serialize};

/// Mean Earth radius in kilometres.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Kilometres in one nautical mile.
pub const KM_PER_NM: f64 = 1.852;

/// Great-circle distance between two points in kilometres.
#[must_use]
pub fn distance_km(a: Point, b: Point) -> f64 {
    let d_lat = (b.lat - a.lat).to_radians();
    let d_lng = (b.lng - a.lng).to_radians();
    let lat1 = a.lat.to_radians();
    let lat2 = b.lat.to_radians();

    let h = (d_lat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (d_lng / 2.0).sin().powi(2);

    // Rounding can push `h` a hair above 1 for antipodal points.
    2.0 * EARTH_RADIUS_KM * h.clamp(0.0, 1.0).sqrt().asin()
}

/// Sum of consecutive leg distances in kilometres.
///
/// Returns `0.0` for fewer than two points.
#[must_use]
pub fn route_total_km(points: &[Point]) -> f64 {
    points.windows(2).map(|leg| distance_km(leg[0], leg[1])).sum()
}

/// Converts kilometres to nautical miles.
#[must_use]
pub fn km_to_nm(km: f64) -> f64 {
    km / KM_PER_NM
}

/// Converts nautical miles to kilometres.
#[must_use]
pub fn nm_to_km(nm: f64) -> f64 {
    nm * KM_PER_NM
}

/// Bounding box of a set of waypoints, in degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Minimum latitude.
    pub south: f64,
    /// Minimum longitude.
    pub west: f64,
    /// Maximum latitude.
    pub north: f64,
    /// Maximum longitude.
    pub east: f64,
}

impl Bounds {
    /// Computes the bounds of `points`, or `None` if empty.
    #[must_use]
    pub fn of(points: &[Point]) -> Option<Self> {
        let first = points.first()?;
        Some(points.iter().skip(1).fold(
            Self {
                south: first.lat,
                west: first.lng,
                north: first.lat,
                east: first.lng,
            },
            |b, p| Self {
                south: b.south.min(p.lat),
                west: b.west.min(p.lng),
                north: b.north.max(p.lat),
                east: b.east.max(p.lng),
            },
        ))
    }
}

/// A measured route: the polyline, its length and its extent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RouteMeasurement {
    /// Waypoints in flight order.
    pub waypoints: Vec<Point>,
    /// Per-leg distances in kilometres.
    pub legs_km: Vec<f64>,
    /// Total distance in kilometres.
    pub total_km: f64,
    /// Total distance in nautical miles.
    pub total_nm: f64,
    /// Bounding box of the waypoints.
    pub bounds: Bounds,
}

/// Measures a route after dropping non-finite points.
///
/// Returns `None` when fewer than two usable points remain.
#[must_use]
pub fn measure(points: &[Point]) -> Option<RouteMeasurement> {
    let waypoints: Vec<Point> = points.iter().copied().filter(Point::is_finite).collect();

    if waypoints.len() < 2 {
        log::debug!(
            "Route has {} usable waypoint(s); not enough to measure",
            waypoints.len()
        );
        return None;
    }

    let legs_km: Vec<f64> = waypoints
        .windows(2)
        .map(|leg| distance_km(leg[0], leg[1]))
        .collect();
    let total_km: f64 = legs_km.iter().sum();
    let bounds = Bounds::of(&waypoints)?;

    log::debug!(
        "Measured {} waypoint route: {total_km:.1} km",
        waypoints.len()
    );

    Some(RouteMeasurement {
        waypoints,
        legs_km,
        total_km,
        total_nm: km_to_nm(total_km),
        bounds,
    })
}

fn parse_field(raw: &str) -> Option<f64> {
    raw.trim()
        .replacen(',', ".", 1)
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
}

/// Value for the kilometre field after the NM field was edited to `raw`.
///
/// One decimal place, or an empty string when `raw` is not a number.
#[must_use]
pub fn km_field_from_nm(raw: &str) -> String {
    parse_field(raw).map_or_else(String::new, |nm| format!("{:.1}", nm_to_km(nm)))
}

/// Value for the NM field after the kilometre field was edited to `raw`.
///
/// One decimal place, or an empty string when `raw` is not a number.
#[must_use]
pub fn nm_field_from_km(raw: &str) -> String {
    parse_field(raw).map_or_else(String::new, |km| format!("{:.1}", km_to_nm(km)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pt(lat: f64, lng: f64) -> Point {
        Point::new(lat, lng).unwrap()
    }

    #[test]
    fn same_point_is_zero() {
        let a = pt(-23.62, -46.66);
        assert!(distance_km(a, a).abs() < 1e-9);
    }

    #[test]
    fn distance_is_symmetric() {
        let a = pt(-23.62, -46.66);
        let b = pt(40.64, -73.78);
        assert!((distance_km(a, b) - distance_km(b, a)).abs() < 1e-9);
    }

    #[test]
    fn legs_on_a_great_circle_add_up() {
        let a = pt(0.0, 0.0);
        let b = pt(0.0, 10.0);
        let c = pt(0.0, 25.0);
        let direct = distance_km(a, c);
        let via = distance_km(a, b) + distance_km(b, c);
        assert!((direct - via).abs() < 1e-6);

        let north = [pt(-30.0, -47.0), pt(-10.0, -47.0), pt(5.0, -47.0)];
        let total = route_total_km(&north);
        assert!((total - distance_km(north[0], north[2])).abs() < 1e-6);
    }

    #[test]
    fn sao_paulo_to_rio() {
        let km = route_total_km(&[pt(-23.62, -46.66), pt(-22.81, -43.25)]);
        assert!((357.0..=361.0).contains(&km), "got {km}");
    }

    #[test]
    fn short_routes_total_zero() {
        assert!(route_total_km(&[]).abs() < f64::EPSILON);
        assert!(route_total_km(&[pt(1.0, 1.0)]).abs() < f64::EPSILON);
    }

    #[test]
    fn unit_round_trip() {
        for x in [0.0, 1.0, 500.0, 12_345.6] {
            assert!((nm_to_km(km_to_nm(x)) - x).abs() < 0.1);
        }
        assert!((km_to_nm(1.852) - 1.0).abs() < 1e-12);
    }

    #[test]
    fn measure_needs_two_points() {
        assert!(measure(&[pt(1.0, 1.0)]).is_none());
        let nan = Point {
            lat: f64::NAN,
            lng: 0.0,
        };
        assert!(measure(&[pt(1.0, 1.0), nan]).is_none());
    }

    #[test]
    fn measure_reports_legs_and_bounds() {
        let route = measure(&[pt(-23.62, -46.66), pt(-22.91, -47.13), pt(-22.81, -43.25)]).unwrap();
        assert_eq!(route.legs_km.len(), 2);
        assert!((route.total_km - route.legs_km.iter().sum::<f64>()).abs() < 1e-9);
        assert!((route.total_nm - route.total_km / KM_PER_NM).abs() < 1e-9);
        assert!((route.bounds.south + 23.62).abs() < 1e-9);
        assert!((route.bounds.north + 22.81).abs() < 1e-9);
        assert!((route.bounds.west + 47.13).abs() < 1e-9);
        assert!((route.bounds.east + 43.25).abs() < 1e-9);
    }

    #[test]
    fn distance_fields_stay_in_sync() {
        assert_eq!(km_field_from_nm("100"), "185.2");
        assert_eq!(nm_field_from_km("185,2"), "100.0");
        assert_eq!(km_field_from_nm("abc"), "");
        assert_eq!(nm_field_from_km(""), "");
    }
}
