use crate::assignment_problem::AlgorithmType;
use crate::base_types::Demand;
use crate::client::Client;
use crate::cost_problem::ObjectiveType;
use crate::facility::Facility;

/// A validated assignment request. Construction happens in
/// `json_serialisation`; from here on the request is immutable.
#[derive(Debug, Clone)]
pub struct AssignmentRequest {
    total_demand: Demand,
    clients: Vec<Client>,
    facilities: Vec<Facility>,
    algorithm: AlgorithmType,
    objective: ObjectiveType,
}

// methods
impl AssignmentRequest {
    pub fn total_demand(&self) -> Demand {
        self.total_demand
    }

    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn facilities(&self) -> &[Facility] {
        &self.facilities
    }

    pub fn algorithm(&self) -> AlgorithmType {
        self.algorithm
    }

    pub fn objective(&self) -> ObjectiveType {
        self.objective
    }
}

// static
impl AssignmentRequest {
    pub fn new(
        total_demand: Demand,
        clients: Vec<Client>,
        facilities: Vec<Facility>,
        algorithm: AlgorithmType,
        objective: ObjectiveType,
    ) -> AssignmentRequest {
        AssignmentRequest {
            total_demand,
            clients,
            facilities,
            algorithm,
            objective,
        }
    }
}
