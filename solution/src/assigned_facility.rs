use geo::MultiPolygon;

use model::base_types::{Demand, Kilometer};
use model::client::Client;
use model::facility::Facility;
use model::geometry;

/// A facility together with the clients assigned to it. The expected
/// demand, service area and TSP route estimate stay at their defaults until
/// the evaluator has run.
#[derive(Debug, Clone)]
pub struct AssignedFacility {
    facility: Facility,
    assigned_clients: Vec<Client>,
    expected_demand: Demand,
    service_area: MultiPolygon<f64>,
    expected_optimal_tsp_route_distance: Kilometer,
}

// methods
impl AssignedFacility {
    pub fn facility(&self) -> &Facility {
        &self.facility
    }

    pub fn assigned_clients(&self) -> &[Client] {
        &self.assigned_clients
    }

    pub fn expected_demand(&self) -> Demand {
        self.expected_demand
    }

    pub fn service_area(&self) -> &MultiPolygon<f64> {
        &self.service_area
    }

    pub fn expected_optimal_tsp_route_distance(&self) -> Kilometer {
        self.expected_optimal_tsp_route_distance
    }
}

// static
impl AssignedFacility {
    pub fn new(facility: Facility, assigned_clients: Vec<Client>) -> AssignedFacility {
        AssignedFacility {
            facility,
            assigned_clients,
            expected_demand: 0.0,
            service_area: geometry::empty_multipolygon(),
            expected_optimal_tsp_route_distance: 0.0,
        }
    }

    pub fn evaluated(
        facility: Facility,
        assigned_clients: Vec<Client>,
        expected_demand: Demand,
        service_area: MultiPolygon<f64>,
        expected_optimal_tsp_route_distance: Kilometer,
    ) -> AssignedFacility {
        AssignedFacility {
            facility,
            assigned_clients,
            expected_demand,
            service_area,
            expected_optimal_tsp_route_distance,
        }
    }
}
