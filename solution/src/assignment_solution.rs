use model::base_types::{Cost, COST_INFINITY};

use crate::AssignedFacility;

/// Status of a solution as reported to the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolutionStatus {
    Infeasible,
    Feasible,
    Optimal,
}

impl SolutionStatus {
    pub fn code(&self) -> u8 {
        match self {
            SolutionStatus::Infeasible => 1,
            SolutionStatus::Feasible => 2,
            SolutionStatus::Optimal => 3,
        }
    }
}

/// Solution of an assignment problem: the objective value in original
/// (unscaled) units, one assigned facility per input facility in input
/// order, the solver status and a message for the caller.
///
/// Infeasible solutions carry no assigned facilities and an infinite
/// objective value.
#[derive(Debug, Clone)]
pub struct AssignmentSolution {
    objective_value: Cost,
    assigned_facilities: Vec<AssignedFacility>,
    solution_status: SolutionStatus,
    message: String,
}

// methods
impl AssignmentSolution {
    pub fn objective_value(&self) -> Cost {
        self.objective_value
    }

    pub fn assigned_facilities(&self) -> &[AssignedFacility] {
        &self.assigned_facilities
    }

    pub fn solution_status(&self) -> SolutionStatus {
        self.solution_status
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn is_infeasible(&self) -> bool {
        self.solution_status == SolutionStatus::Infeasible
    }
}

// static
impl AssignmentSolution {
    pub fn new(
        objective_value: Cost,
        assigned_facilities: Vec<AssignedFacility>,
        solution_status: SolutionStatus,
        message: String,
    ) -> AssignmentSolution {
        AssignmentSolution {
            objective_value,
            assigned_facilities,
            solution_status,
            message,
        }
    }

    pub fn infeasible(message: String) -> AssignmentSolution {
        AssignmentSolution {
            objective_value: COST_INFINITY,
            assigned_facilities: Vec::new(),
            solution_status: SolutionStatus::Infeasible,
            message,
        }
    }
}
