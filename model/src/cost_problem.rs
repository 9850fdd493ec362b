use derive_more::Display;

use crate::client::Client;
use crate::config::RoutingConfig;
use crate::facility::Facility;

/// Objective of an assignment request, as selected on the wire.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum ObjectiveType {
    MinProximity,
    MinTravelDistance,
    MinTravelDuration,
}

impl ObjectiveType {
    pub fn from_code(code: u64) -> Result<ObjectiveType, String> {
        match code {
            1 => Ok(ObjectiveType::MinProximity),
            2 => Ok(ObjectiveType::MinTravelDistance),
            3 => Ok(ObjectiveType::MinTravelDuration),
            _ => Err(format!("{} is not a valid assignment objective", code)),
        }
    }
}

/// The cost semantics behind an objective. Every objective maps to exactly
/// one cost type, so no ambiguity survives past the request boundary.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum CostType {
    SphericalDistance,
    RoadDistance,
    RoadDuration,
}

impl From<ObjectiveType> for CostType {
    fn from(objective: ObjectiveType) -> CostType {
        match objective {
            ObjectiveType::MinProximity => CostType::SphericalDistance,
            ObjectiveType::MinTravelDistance => CostType::RoadDistance,
            ObjectiveType::MinTravelDuration => CostType::RoadDuration,
        }
    }
}

/// The cost side of an assignment request: which facility/client pairs are
/// priced with which cost semantics, and where road costs come from.
#[derive(Debug, Clone)]
pub struct CostProblem {
    clients: Vec<Client>,
    facilities: Vec<Facility>,
    cost_type: CostType,
    routing: RoutingConfig,
}

// methods
impl CostProblem {
    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn facilities(&self) -> &[Facility] {
        &self.facilities
    }

    pub fn cost_type(&self) -> CostType {
        self.cost_type
    }

    pub fn routing(&self) -> &RoutingConfig {
        &self.routing
    }
}

// static
impl CostProblem {
    pub fn new(
        clients: Vec<Client>,
        facilities: Vec<Facility>,
        cost_type: impl Into<CostType>,
        routing: RoutingConfig,
    ) -> CostProblem {
        CostProblem {
            clients,
            facilities,
            cost_type: cost_type.into(),
            routing,
        }
    }
}
