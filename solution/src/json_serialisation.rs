use serde::{Deserialize, Serialize};

use model::geometry;

use crate::{AssignedFacility, AssignmentSolution};

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonSolution {
    objective_value: f64,
    assigned_facilities: Vec<JsonAssignedFacility>,
    solution_status: u8,
    message: String,
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonAssignedFacility {
    facility: String,
    assigned_clients: Vec<String>,
    expected_demand: f64,
    service_area: serde_json::Value,
    expected_optimal_tsp_route_distance: f64,
}

/// Serialize a solution into the camelCase response body. Facilities and
/// clients are referenced by their ids, service areas become GeoJSON
/// multipolygons.
pub fn solution_to_json(solution: &AssignmentSolution) -> serde_json::Value {
    let json_solution = JsonSolution {
        objective_value: solution.objective_value(),
        assigned_facilities: solution
            .assigned_facilities()
            .iter()
            .map(assigned_facility_to_json)
            .collect(),
        solution_status: solution.solution_status().code(),
        message: String::from(solution.message()),
    };

    serde_json::to_value(&json_solution).expect("solution is always serialisable")
}

fn assigned_facility_to_json(assigned: &AssignedFacility) -> JsonAssignedFacility {
    JsonAssignedFacility {
        facility: String::from(assigned.facility().id()),
        assigned_clients: assigned
            .assigned_clients()
            .iter()
            .map(|client| String::from(client.id()))
            .collect(),
        expected_demand: assigned.expected_demand(),
        service_area: geometry::multipolygon_to_geojson(assigned.service_area()),
        expected_optimal_tsp_route_distance: assigned.expected_optimal_tsp_route_distance(),
    }
}
