use geo::{Area, BooleanOps, MultiPolygon};
use itertools::izip;

use model::base_types::Demand;
use model::config::ServiceAreaConfig;

use crate::service_area::compute_service_area;
use crate::AssignedFacility;

/// Evaluate assigned facilities: aggregate the expected demand, build the
/// service areas, remove any overlap of a service area with another
/// facility's exclusive area and estimate the optimal TSP route length to
/// serve the assigned clients.
///
/// The route estimate is `0.75 * sqrt(n * A * 12321)` following
/// Beardwood-Halton-Hammersley; 12321 = 111² converts squared degrees to
/// km², which is only exact near the equator. Known limitation, kept as is.
///
/// Returns a new list; the input stays untouched.
pub fn evaluate_assigned_facilities(
    assigned_facilities: &[AssignedFacility],
    config: &ServiceAreaConfig,
) -> Vec<AssignedFacility> {
    let expected_demands: Vec<Demand> = assigned_facilities
        .iter()
        .map(|assigned| {
            assigned
                .assigned_clients()
                .iter()
                .map(|client| client.demand())
                .sum::<Demand>()
                .round()
        })
        .collect();

    let mut service_areas: Vec<MultiPolygon<f64>> = assigned_facilities
        .iter()
        .map(|assigned| {
            compute_service_area(assigned.facility(), assigned.assigned_clients(), config)
        })
        .collect();

    // remove intersections between exclusive areas and the service areas of
    // other facilities
    for i in 0..assigned_facilities.len() {
        let facility = assigned_facilities[i].facility();
        if !facility.has_exclusive_service_area() {
            continue;
        }
        let exclusive_area = facility.exclusive_service_area();

        for j in 0..assigned_facilities.len() {
            if i == j || service_areas[j].0.is_empty() {
                continue;
            }
            let intersection = exclusive_area.intersection(&service_areas[j]);
            if !intersection.0.is_empty() {
                service_areas[j] = service_areas[j].difference(&intersection);
            }
        }
    }

    izip!(assigned_facilities, expected_demands, service_areas)
        .map(|(assigned, expected_demand, service_area)| {
            let client_count = assigned.assigned_clients().len();
            let route_distance =
                0.75 * (client_count as f64 * service_area.unsigned_area() * 12_321.0).sqrt();

            AssignedFacility::evaluated(
                assigned.facility().clone(),
                assigned.assigned_clients().to_vec(),
                expected_demand,
                service_area,
                round_2(route_distance),
            )
        })
        .collect()
}

fn round_2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    use model::client::Client;
    use model::facility::Facility;
    use model::geometry;

    fn config() -> ServiceAreaConfig {
        ServiceAreaConfig {
            concave_hull_concavity: 2.0,
            dispersed_subset_size: 10,
        }
    }

    fn diamond_facility() -> Facility {
        let area = geometry::multipolygon_from_geojson(&json!({
            "type": "Polygon",
            "coordinates": [[
                [0.5, 0.75], [0.25, 0.5], [0.5, 0.25], [0.75, 0.5], [0.5, 0.75],
            ]],
        }))
        .unwrap();
        Facility::new("0", "Facility", 0.5, 0.5, 0, 0, area)
    }

    fn unit_square_facility() -> Facility {
        let area = geometry::multipolygon_from_geojson(&json!({
            "type": "Polygon",
            "coordinates": [[
                [0.0, 0.0], [0.0, 1.0], [1.0, 1.0], [1.0, 0.0], [0.0, 0.0],
            ]],
        }))
        .unwrap();
        Facility::new("1", "Other Facility", 0.5, 0.5, 0, 0, area)
    }

    fn clients_within_square() -> Vec<Client> {
        let coordinates = [
            (0.0, 0.0),
            (0.0, 1.0),
            (1.0, 1.0),
            (1.0, 0.0),
            (0.5, 0.75),
            (0.25, 0.5),
            (0.5, 0.25),
            (0.75, 0.5),
        ];

        coordinates
            .iter()
            .enumerate()
            .map(|(i, &(lng, lat))| Client::new(&(i + 1).to_string(), lat, lng, 1.0))
            .collect()
    }

    #[test]
    fn service_areas_lose_the_overlap_with_other_exclusive_areas() {
        let assigned_facilities = vec![
            AssignedFacility::new(diamond_facility(), clients_within_square()),
            AssignedFacility::new(unit_square_facility(), Vec::new()),
        ];

        let evaluated = evaluate_assigned_facilities(&assigned_facilities, &config());

        for assigned in &evaluated {
            let demand_sum: f64 = assigned
                .assigned_clients()
                .iter()
                .map(|client| client.demand())
                .sum();
            assert!((assigned.expected_demand() - demand_sum).abs() < 1e-9);
        }

        // everything the diamond facility covered lies inside the square
        // facility's exclusive area, so nothing is left of its service area
        assert!(evaluated[0].service_area().0.is_empty());

        // the square facility keeps its exclusive area minus the diamond
        let remaining_area = evaluated[1].service_area().unsigned_area();
        assert!(
            (remaining_area - (1.0 - 0.125)).abs() < 1e-9,
            "area was {}",
            remaining_area
        );
    }

    #[test]
    fn route_estimate_follows_the_tsp_formula() {
        let facility = Facility::without_exclusive_service_area("0", "Facility", 0.5, 0.5, 0, 0);
        let corner_clients: Vec<Client> = clients_within_square().into_iter().take(4).collect();

        let evaluated = evaluate_assigned_facilities(
            &[AssignedFacility::new(facility, corner_clients)],
            &config(),
        );

        // hull area 1.0 with 4 clients: 0.75 * sqrt(4 * 1.0 * 12321) = 166.5
        assert_eq!(evaluated[0].expected_optimal_tsp_route_distance(), 166.5);
        assert_eq!(evaluated[0].expected_demand(), 4.0);
    }

    #[test]
    fn facilities_without_clients_and_area_get_a_zero_route_estimate() {
        let facility = Facility::without_exclusive_service_area("0", "Facility", 0.5, 0.5, 0, 0);

        let evaluated =
            evaluate_assigned_facilities(&[AssignedFacility::new(facility, Vec::new())], &config());

        assert_eq!(evaluated[0].expected_optimal_tsp_route_distance(), 0.0);
        assert_eq!(evaluated[0].expected_demand(), 0.0);
        assert!(evaluated[0].service_area().0.is_empty());
    }
}
