use geo::{Intersects, MultiPolygon, Point};

use crate::base_types::{Degrees, DemandBound};
use crate::geometry;

/// A facility of the assignment problem.
///
/// A facility with a non-empty exclusive service area must serve every
/// client located inside that area. `max_demand` of 0 means unbounded.
#[derive(Debug, Clone, PartialEq)]
pub struct Facility {
    id: String,
    name: String,
    lat: Degrees,
    lng: Degrees,
    min_demand: DemandBound,
    max_demand: DemandBound,
    exclusive_service_area: MultiPolygon<f64>,
}

// methods
impl Facility {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lat(&self) -> Degrees {
        self.lat
    }

    pub fn lng(&self) -> Degrees {
        self.lng
    }

    pub fn min_demand(&self) -> DemandBound {
        self.min_demand
    }

    pub fn max_demand(&self) -> DemandBound {
        self.max_demand
    }

    pub fn exclusive_service_area(&self) -> &MultiPolygon<f64> {
        &self.exclusive_service_area
    }

    pub fn has_exclusive_service_area(&self) -> bool {
        !self.exclusive_service_area.0.is_empty()
    }

    /// Point-in-area test for the exclusive service area; a point on the
    /// boundary counts as covered.
    pub fn exclusive_service_area_covers(&self, point: Point<f64>) -> bool {
        self.has_exclusive_service_area() && self.exclusive_service_area.intersects(&point)
    }
}

// static
impl Facility {
    pub fn new(
        id: &str,
        name: &str,
        lat: Degrees,
        lng: Degrees,
        min_demand: DemandBound,
        max_demand: DemandBound,
        exclusive_service_area: MultiPolygon<f64>,
    ) -> Facility {
        Facility {
            id: String::from(id),
            name: String::from(name),
            lat,
            lng,
            min_demand,
            max_demand,
            exclusive_service_area,
        }
    }

    pub fn without_exclusive_service_area(
        id: &str,
        name: &str,
        lat: Degrees,
        lng: Degrees,
        min_demand: DemandBound,
        max_demand: DemandBound,
    ) -> Facility {
        Facility::new(
            id,
            name,
            lat,
            lng,
            min_demand,
            max_demand,
            geometry::empty_multipolygon(),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn unit_square_facility() -> Facility {
        let area = geometry::multipolygon_from_geojson(&json!({
            "type": "Polygon",
            "coordinates": [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 1.0], [0.0, 0.0]]],
        }))
        .unwrap();
        Facility::new("1", "FC1", 0.5, 0.5, 0, 0, area)
    }

    #[test]
    fn exclusive_area_covers_interior_and_boundary_points() {
        let facility = unit_square_facility();

        assert!(facility.exclusive_service_area_covers(geometry::point_at(0.5, 0.5)));
        assert!(facility.exclusive_service_area_covers(geometry::point_at(0.0, 0.0)));
        assert!(!facility.exclusive_service_area_covers(geometry::point_at(2.0, 2.0)));
    }

    #[test]
    fn facility_without_area_covers_nothing() {
        let facility = Facility::without_exclusive_service_area("1", "FC1", 0.5, 0.5, 0, 0);

        assert!(!facility.has_exclusive_service_area());
        assert!(!facility.exclusive_service_area_covers(geometry::point_at(0.5, 0.5)));
    }
}
