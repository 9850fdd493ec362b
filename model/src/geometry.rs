use geo::{Coord, LineString, MultiPolygon, Point, Polygon};
use geojson::GeoJson;

use crate::base_types::{Degrees, Kilometer};

pub const EARTH_RADIUS_KM: Kilometer = 6371.0;

pub const GEOMETRY_ERROR_MSG: &str = "Not a valid GeoJSON dictionary or valid geometry. \
     Check the validity of the GeoJSON, or whether the geometry contains \
     polygons with at least three distinct points.";

/// Great-circle distance in kilometers between two (lat, lng) pairs,
/// computed with the haversine formula.
pub fn spherical_distance_km(from: (Degrees, Degrees), to: (Degrees, Degrees)) -> Kilometer {
    let (lat1, lng1) = (from.0.to_radians(), from.1.to_radians());
    let (lat2, lng2) = (to.0.to_radians(), to.1.to_radians());

    let dlat = lat2 - lat1;
    let dlng = lng2 - lng1;

    let a = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlng / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c
}

/// Geometries live in (x, y) = (lng, lat) coordinates.
pub fn point_at(lat: Degrees, lng: Degrees) -> Point<f64> {
    Point::new(lng, lat)
}

pub fn empty_multipolygon() -> MultiPolygon<f64> {
    MultiPolygon::new(Vec::new())
}

/// Accepts a GeoJSON Polygon, MultiPolygon or GeometryCollection (flattened
/// to its polygon members) and turns it into a valid multipolygon: only
/// exterior rings are kept, duplicate points are removed (first occurrence
/// wins) and rings with fewer than three distinct points are discarded.
pub fn multipolygon_from_geojson(geojson_value: &serde_json::Value) -> Result<MultiPolygon<f64>, String> {
    let geojson = GeoJson::from_json_value(geojson_value.clone())
        .map_err(|_| GEOMETRY_ERROR_MSG.to_string())?;

    // Feature and FeatureCollection inputs are rejected.
    let geometry = match geojson {
        GeoJson::Geometry(geometry) => geometry,
        _ => return Err(GEOMETRY_ERROR_MSG.to_string()),
    };

    let rings = exterior_rings(&geometry.value)?;

    if rings.is_empty() {
        return Ok(empty_multipolygon());
    }

    let polygons: Vec<Polygon<f64>> = rings
        .iter()
        .filter_map(|ring| build_valid_polygon(ring))
        .collect();

    if polygons.is_empty() {
        return Err(GEOMETRY_ERROR_MSG.to_string());
    }

    Ok(MultiPolygon::new(polygons))
}

pub fn multipolygon_to_geojson(area: &MultiPolygon<f64>) -> serde_json::Value {
    let geometry = geojson::Geometry::new(geojson::Value::from(area));
    serde_json::to_value(&geometry).expect("multipolygon is always serialisable")
}

/// Collects the exterior ring of every polygon in the geometry. Inner rings
/// (holes) are dropped. Non-polygonal members of a GeometryCollection are
/// skipped, but a collection without any polygon member is an error.
fn exterior_rings(value: &geojson::Value) -> Result<Vec<Vec<Coord<f64>>>, String> {
    let mut rings = Vec::new();
    match value {
        geojson::Value::Polygon(polygon) => {
            push_exterior_ring(polygon, &mut rings);
        }
        geojson::Value::MultiPolygon(polygons) => {
            for polygon in polygons {
                push_exterior_ring(polygon, &mut rings);
            }
        }
        geojson::Value::GeometryCollection(members) => {
            for member in members {
                match &member.value {
                    geojson::Value::Polygon(polygon) => push_exterior_ring(polygon, &mut rings),
                    geojson::Value::MultiPolygon(polygons) => {
                        for polygon in polygons {
                            push_exterior_ring(polygon, &mut rings);
                        }
                    }
                    _ => continue,
                }
            }
            if rings.is_empty() {
                return Err(GEOMETRY_ERROR_MSG.to_string());
            }
        }
        _ => return Err(GEOMETRY_ERROR_MSG.to_string()),
    }
    Ok(rings)
}

fn push_exterior_ring(polygon: &[Vec<Vec<f64>>], rings: &mut Vec<Vec<Coord<f64>>>) {
    if let Some(exterior) = polygon.first() {
        rings.push(
            exterior
                .iter()
                .filter(|position| position.len() >= 2)
                .map(|position| Coord {
                    x: position[0],
                    y: position[1],
                })
                .collect(),
        );
    }
}

fn build_valid_polygon(ring: &[Coord<f64>]) -> Option<Polygon<f64>> {
    let mut unique: Vec<Coord<f64>> = Vec::new();
    for coord in ring {
        if !unique.contains(coord) {
            unique.push(*coord);
        }
    }

    if unique.len() > 2 {
        // Polygon::new closes the ring.
        Some(Polygon::new(LineString::from(unique), Vec::new()))
    } else {
        None
    }
}
