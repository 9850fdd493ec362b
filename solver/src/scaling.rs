use model::assignment_problem::{AlgorithmType, AssignmentProblem};
use model::base_types::{IntegerCost, IntegerDemand};

/// Integer rendition of the problem parameters, as the integer solvers
/// require. A new owned value; the problem itself stays untouched.
#[derive(Debug)]
pub struct ScaledParameters {
    demands: Vec<IntegerDemand>,
    min_demands: Vec<IntegerDemand>,
    max_demands: Vec<IntegerDemand>,
    costs: Vec<IntegerCost>, // row-major, facilities x clients
    client_count: usize,
    scale_factor: i64,
}

// methods
impl ScaledParameters {
    pub fn demand(&self, client: usize) -> IntegerDemand {
        self.demands[client]
    }

    pub fn min_demand(&self, facility: usize) -> IntegerDemand {
        self.min_demands[facility]
    }

    /// 0 keeps its "unbounded" meaning under scaling.
    pub fn max_demand(&self, facility: usize) -> IntegerDemand {
        self.max_demands[facility]
    }

    pub fn cost(&self, facility: usize, client: usize) -> IntegerCost {
        self.costs[facility * self.client_count + client]
    }

    pub fn total_demand(&self) -> IntegerDemand {
        self.demands.iter().sum()
    }

    pub fn scale_factor(&self) -> i64 {
        self.scale_factor
    }
}

/// Scale demands, demand bounds and costs by the given factor and cast them
/// to integers (costs by truncation).
///
/// For the flow formulation the demand-weighted cost is additionally
/// divided by the client's unscaled demand: the flow network routes
/// `demand` units through each client node and the arc cost applies per
/// unit of flow.
///
/// A client demand that rounds to zero under the factor would silently
/// vanish from the network, so it is rejected instead.
pub fn scale_assignment_problem_parameters(
    problem: &AssignmentProblem,
    scale_factor: i64,
) -> Result<ScaledParameters, String> {
    let factor = scale_factor as f64;

    let mut demands = Vec::with_capacity(problem.clients().len());
    for client in problem.clients() {
        let scaled_demand = (factor * client.demand()).round() as IntegerDemand;
        if scaled_demand == 0 {
            return Err(format!(
                "Client {} has demand {} which rounds to zero under scale factor {}",
                client.id(),
                client.demand(),
                scale_factor
            ));
        }
        demands.push(scaled_demand);
    }

    let min_demands: Vec<IntegerDemand> = problem
        .facilities()
        .iter()
        .map(|facility| (factor * facility.min_demand() as f64).round() as IntegerDemand)
        .collect();
    let max_demands: Vec<IntegerDemand> = problem
        .facilities()
        .iter()
        .map(|facility| (factor * facility.max_demand() as f64).round() as IntegerDemand)
        .collect();

    let matrix = problem.cost_matrix();
    let per_unit_flow_costs = problem.algorithm() == AlgorithmType::FlowFormulation;
    let mut costs = Vec::with_capacity(matrix.rows() * matrix.cols());
    for facility in 0..matrix.rows() {
        for client in 0..matrix.cols() {
            let mut cost = factor * matrix.get(facility, client);
            if per_unit_flow_costs {
                cost /= problem.clients()[client].demand();
            }
            costs.push(cost.trunc() as IntegerCost);
        }
    }

    Ok(ScaledParameters {
        demands,
        min_demands,
        max_demands,
        costs,
        client_count: matrix.cols(),
        scale_factor,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    use model::assignment_problem::CostMatrix;
    use model::client::Client;
    use model::facility::Facility;

    fn problem(algorithm: AlgorithmType) -> AssignmentProblem {
        let clients = vec![
            Client::new("1", 0.0, 0.0, 1.5),
            Client::new("2", 1.0, 1.0, 0.5),
        ];
        let facilities = vec![Facility::without_exclusive_service_area(
            "1", "FC1", 1.0, 1.0, 1, 3,
        )];
        let cost_matrix = CostMatrix::from_fn(1, 2, |_, client| 10.503 + client as f64);
        AssignmentProblem::new(clients, facilities, cost_matrix, algorithm)
    }

    #[test]
    fn parameters_are_scaled_and_cast_to_integers() {
        let scaled =
            scale_assignment_problem_parameters(&problem(AlgorithmType::MilpFormulation), 100)
                .unwrap();

        assert_eq!(scaled.demand(0), 150);
        assert_eq!(scaled.demand(1), 50);
        assert_eq!(scaled.min_demand(0), 100);
        assert_eq!(scaled.max_demand(0), 300);
        // truncated, not rounded
        assert_eq!(scaled.cost(0, 0), 1050);
        assert_eq!(scaled.cost(0, 1), 1150);
        assert_eq!(scaled.total_demand(), 200);
    }

    #[test]
    fn flow_costs_are_per_unit_of_flow() {
        let scaled =
            scale_assignment_problem_parameters(&problem(AlgorithmType::FlowFormulation), 100)
                .unwrap();

        // divided by the unscaled demand before the integer cast
        assert_eq!(scaled.cost(0, 0), (100.0 * 10.503_f64 / 1.5) as IntegerCost);
        assert_eq!(scaled.cost(0, 1), (100.0 * 11.503_f64 / 0.5) as IntegerCost);
    }

    #[test]
    fn unbounded_max_demand_stays_zero() {
        let clients = vec![Client::new("1", 0.0, 0.0, 1.0)];
        let facilities = vec![Facility::without_exclusive_service_area(
            "1", "FC1", 1.0, 1.0, 0, 0,
        )];
        let cost_matrix = CostMatrix::from_fn(1, 1, |_, _| 1.0);
        let problem = AssignmentProblem::new(
            clients,
            facilities,
            cost_matrix,
            AlgorithmType::MilpFormulation,
        );

        let scaled = scale_assignment_problem_parameters(&problem, 100).unwrap();

        assert_eq!(scaled.max_demand(0), 0);
    }

    #[test]
    fn demand_rounding_to_zero_is_rejected() {
        let clients = vec![Client::new("tiny", 0.0, 0.0, 0.0001)];
        let facilities = vec![Facility::without_exclusive_service_area(
            "1", "FC1", 1.0, 1.0, 0, 0,
        )];
        let cost_matrix = CostMatrix::from_fn(1, 1, |_, _| 1.0);
        let problem = AssignmentProblem::new(
            clients,
            facilities,
            cost_matrix,
            AlgorithmType::FlowFormulation,
        );

        let error = scale_assignment_problem_parameters(&problem, 1000).unwrap_err();

        assert!(error.contains("tiny"));
        assert!(error.contains("rounds to zero"));
    }
}
