//! Coordinate extraction from station payloads.
//!
//! The AVWX station document has top-level `latitude`/`longitude` numbers,
//! which [`extract_point`] reads through a typed schema. Anything else
//! (proxies, older API versions, GeoJSON-ish wrappers) falls back to
//! [`scan_for_point`], a bounded-depth search of the JSON tree for keys that
//! look like latitude and longitude.

use charter_quote_models::Point;
use serde::Deserialize;
use serde_json::{Map, Value};

/// Deepest nesting level the generic scan descends to (root is level 0).
pub const MAX_SCAN_DEPTH: usize = 6;

#[derive(Debug, Deserialize)]
struct StationDto {
    latitude: f64,
    longitude: f64,
}

/// Pulls a point out of a station payload.
///
/// Tries the typed station schema first, then the generic scan.
#[must_use]
pub fn extract_point(body: &Value) -> Option<Point> {
    if let Ok(station) = StationDto::deserialize(body)
        && let Some(point) = Point::new(station.latitude, station.longitude)
    {
        return Some(point);
    }

    log::debug!("Station payload does not match the typed schema; scanning for coordinates");
    scan_for_point(body)
}

/// Searches `body` for the first object holding both a latitude-like and a
/// longitude-like key with finite values.
///
/// At each object, every key containing `lat` is paired with every other
/// key containing `lon`/`lng`/`long` (case-insensitive), in key order, and
/// the first pair that parses to a finite point wins. Only when no pair at
/// this level works does the search continue into nested objects and
/// arrays in order, no deeper than [`MAX_SCAN_DEPTH`].
#[must_use]
pub fn scan_for_point(body: &Value) -> Option<Point> {
    scan(body, 0)
}

fn scan(value: &Value, depth: usize) -> Option<Point> {
    if depth > MAX_SCAN_DEPTH {
        return None;
    }

    match value {
        Value::Object(map) => point_at_level(map)
            .or_else(|| map.values().find_map(|child| scan(child, depth + 1))),
        Value::Array(items) => items.iter().find_map(|child| scan(child, depth + 1)),
        _ => None,
    }
}

fn point_at_level(map: &Map<String, Value>) -> Option<Point> {
    let candidates = |pred: fn(&str) -> bool| {
        map.iter()
            .filter(move |(key, _)| pred(key))
            .filter_map(|(key, value)| Some((key, parse_coordinate(value)?)))
            .collect::<Vec<_>>()
    };
    let lats = candidates(is_lat_key);
    let lngs = candidates(is_lng_key);

    lats.iter().find_map(|(lat_key, lat)| {
        lngs.iter()
            .filter(|(lng_key, _)| lng_key != lat_key)
            .find_map(|(_, lng)| Point::new(*lat, *lng))
    })
}

fn is_lat_key(key: &str) -> bool {
    key.to_ascii_lowercase().contains("lat")
}

fn is_lng_key(key: &str) -> bool {
    let key = key.to_ascii_lowercase();
    key.contains("lon") || key.contains("lng") || key.contains("long")
}

/// Reads a coordinate from a JSON number or numeric string.
///
/// Strings may use a comma as the decimal separator. Anything else,
/// including blank strings, is rejected.
#[must_use]
pub fn parse_coordinate(value: &Value) -> Option<f64> {
    let parsed = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().replacen(',', ".", 1).parse::<f64>().ok(),
        _ => None,
    };
    parsed.filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn reads_typed_station_document() {
        let body = json!({
            "icao": "SBSP",
            "name": "Congonhas Airport",
            "latitude": -23.626_1,
            "longitude": -46.656_4,
            "elevation_ft": 2631,
        });
        let point = extract_point(&body).unwrap();
        assert!((point.lat + 23.6261).abs() < 1e-6);
        assert!((point.lng + 46.6564).abs() < 1e-6);
    }

    #[test]
    fn scans_nested_shapes_with_comma_decimals() {
        let body = json!({
            "data": {
                "station": {
                    "position": { "Lat": "-22,8100", "Long": "-43,2500" }
                }
            }
        });
        let point = extract_point(&body).unwrap();
        assert!((point.lat + 22.81).abs() < 1e-9);
        assert!((point.lng + 43.25).abs() < 1e-9);
    }

    #[test]
    fn skips_non_finite_level_and_descends() {
        let body = json!({
            "lat": "n/a",
            "lon": "n/a",
            "results": [{ "coords": { "latitude": 10.5, "lng": 20.25 } }]
        });
        let point = scan_for_point(&body).unwrap();
        assert!((point.lat - 10.5).abs() < 1e-9);
        assert!((point.lng - 20.25).abs() < 1e-9);
    }

    #[test]
    fn skips_unparseable_pair_on_same_level() {
        let body = json!({
            "lat_dms": "23 37 S",
            "lon_dms": "46 39 W",
            "latitude": "-23.62",
            "longitude": "-46.66",
            "nested": { "lat": 1.0, "lon": 2.0 }
        });
        let point = extract_point(&body).unwrap();
        assert!((point.lat + 23.62).abs() < 1e-9);
        assert!((point.lng + 46.66).abs() < 1e-9);
    }

    #[test]
    fn takes_first_success_in_key_order() {
        let body = json!({
            "first": { "lat": 1.0, "lng": 2.0 },
            "second": { "lat": 3.0, "lng": 4.0 }
        });
        let point = scan_for_point(&body).unwrap();
        assert!((point.lat - 1.0).abs() < 1e-9);
    }

    #[test]
    fn stops_at_depth_limit() {
        let mut body = json!({ "lat": 5.0, "lon": 6.0 });
        for _ in 0..MAX_SCAN_DEPTH {
            body = json!({ "wrap": body });
        }
        assert!(scan_for_point(&body).is_some());

        let too_deep = json!({ "wrap": body });
        assert!(scan_for_point(&too_deep).is_none());
    }

    #[test]
    fn missing_coordinates_is_none() {
        assert!(extract_point(&json!({ "error": "Station not found" })).is_none());
        assert!(extract_point(&json!([])).is_none());
        assert!(extract_point(&json!({ "lat": "", "lon": "" })).is_none());
    }

    #[test]
    fn parses_coordinate_variants() {
        assert_eq!(parse_coordinate(&json!(1.5)), Some(1.5));
        assert_eq!(parse_coordinate(&json!(" 2,25 ")), Some(2.25));
        assert_eq!(parse_coordinate(&json!(true)), None);
        assert_eq!(parse_coordinate(&json!(null)), None);
    }
}
