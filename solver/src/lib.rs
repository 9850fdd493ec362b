mod cost_calculator;
mod milp_solver;
mod min_cost_flow_solver;
mod scaling;
mod solver;


pub use cost_calculator::{
    compute_cost_matrix, road_cost_matrix, spherical_cost_matrix, RoutingServiceClient,
    TravelTable, TravelTableSource,
};
pub use milp_solver::MilpSolver;
pub use min_cost_flow_solver::MinCostFlowSolver;
pub use solver::AssignmentFormulation;

use std::sync::Arc;

use itertools::Itertools;

use model::assignment_problem::{AlgorithmType, AssignmentProblem, CostMatrix};
use model::assignment_request::AssignmentRequest;
use model::client::{scale_clients_demands, Client};
use model::config::Config;
use model::cost_problem::CostProblem;
use model::facility::Facility;
use solution::AssignmentSolution;

/// Solve the facility assignment problem end to end: price the request,
/// drop clients without resolvable costs, rescale the remaining demands to
/// the requested total demand and dispatch to the selected formulation.
pub fn solve_facility_assignment(
    request: &AssignmentRequest,
    config: Arc<Config>,
) -> AssignmentSolution {
    let cost_problem = CostProblem::new(
        request.clients().to_vec(),
        request.facilities().to_vec(),
        request.objective(),
        config.routing.clone(),
    );

    let cost_matrix = compute_cost_matrix(&cost_problem);

    let (valid_cost_matrix, scaled_valid_clients) = handle_nans(request, &cost_matrix);

    let assignment_problem = Arc::new(
        AssignmentProblem::new(
            scaled_valid_clients,
            request.facilities().to_vec(),
            valid_cost_matrix,
            request.algorithm(),
        )
        .with_solver_time_limit(config.solver.time_limit_seconds),
    );

    match assignment_problem.algorithm() {
        AlgorithmType::FlowFormulation => {
            MinCostFlowSolver::initialize(assignment_problem, config).solve()
        }
        AlgorithmType::MilpFormulation => {
            MilpSolver::initialize(assignment_problem, config).solve()
        }
    }
}

/// Some (facility, client) pairs cannot be priced and receive a NaN. There
/// is not much we can do but remove those clients from the analysis: their
/// columns are dropped from the cost matrix and the remaining clients'
/// demands are rescaled so that the total demand of the request is
/// preserved.
fn handle_nans(
    request: &AssignmentRequest,
    cost_matrix: &CostMatrix,
) -> (CostMatrix, Vec<Client>) {
    let invalid_client_indices = cost_matrix.nan_column_indices();

    let valid_cost_matrix = cost_matrix.without_columns(&invalid_client_indices);
    let valid_clients: Vec<Client> = request
        .clients()
        .iter()
        .enumerate()
        .filter(|(index, _)| invalid_client_indices.binary_search(index).is_err())
        .map(|(_, client)| client.clone())
        .collect();

    let scaled_valid_clients = scale_clients_demands(&valid_clients, request.total_demand());

    (valid_cost_matrix, scaled_valid_clients)
}

/// For each client the facility that must serve it, if any: the one whose
/// exclusive service area contains the client's position. Two facilities
/// claiming the same client make the problem unsolvable.
pub(crate) fn exclusive_area_assignments(
    clients: &[Client],
    facilities: &[Facility],
) -> Result<Vec<Option<usize>>, String> {
    let exclusive_facilities: Vec<(usize, &Facility)> = facilities
        .iter()
        .enumerate()
        .filter(|(_, facility)| facility.has_exclusive_service_area())
        .collect();

    clients
        .iter()
        .map(|client| {
            let containing_facilities: Vec<usize> = exclusive_facilities
                .iter()
                .filter(|(_, facility)| facility.exclusive_service_area_covers(client.position()))
                .map(|(index, _)| *index)
                .collect();

            match containing_facilities.len() {
                0 => Ok(None),
                1 => Ok(Some(containing_facilities[0])),
                _ => Err(format!(
                    "Impossible solve the problem! There is an intersection in the \
                     exclusive service areas of the following facilities: [{}]. \
                     The following coordinates belongs to this intersection: ({}, {}).",
                    containing_facilities
                        .iter()
                        .map(|&index| facilities[index].name())
                        .join(", "),
                    client.lat(),
                    client.lng()
                )),
            }
        })
        .collect()
}
