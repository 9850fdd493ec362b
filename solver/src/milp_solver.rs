use std::sync::Arc;
use std::time;

use good_lp::{
    constraint, microlp, variable, Expression, ProblemVariables, Solution, SolverModel, Variable,
};

use model::assignment_problem::AssignmentProblem;
use model::config::Config;
use solution::evaluator::evaluate_assigned_facilities;
use solution::{AssignedFacility, AssignmentSolution, SolutionStatus};

use crate::exclusive_area_assignments;
use crate::scaling::scale_assignment_problem_parameters;
use crate::solver::{solve_with_time_limit, AssignmentFormulation};

/// Solving the problem as a binary assignment program: one 0/1 variable per
/// (facility, client) pair, every client covered exactly once, facility
/// loads kept within their demand bounds.
pub struct MilpSolver {
    problem: Arc<AssignmentProblem>,
    config: Arc<Config>,
}

impl AssignmentFormulation for MilpSolver {
    fn initialize(problem: Arc<AssignmentProblem>, config: Arc<Config>) -> Self {
        Self { problem, config }
    }

    fn solve(&self) -> AssignmentSolution {
        let problem = self.problem.clone();
        let config = self.config.clone();
        solve_with_time_limit(self.problem.solver_time_limit_seconds(), move || {
            solve_milp_formulation(&problem, &config)
        })
    }
}

fn solve_milp_formulation(problem: &AssignmentProblem, config: &Config) -> AssignmentSolution {
    let start_time = time::Instant::now();

    let scale_factor = config.scaling.milp_scale_factor;
    let scaled = match scale_assignment_problem_parameters(problem, scale_factor) {
        Ok(scaled) => scaled,
        Err(message) => return AssignmentSolution::infeasible(message),
    };

    let clients = problem.clients();
    let facilities = problem.facilities();

    let mandatory_facilities = match exclusive_area_assignments(clients, facilities) {
        Ok(mandatory_facilities) => mandatory_facilities,
        Err(message) => return AssignmentSolution::infeasible(message),
    };

    let mut variables = ProblemVariables::new();
    let assignment_variables: Vec<Vec<Variable>> = (0..facilities.len())
        .map(|i| {
            (0..clients.len())
                .map(|j| variables.add(variable().binary().name(format!("x_{}_{}", i, j))))
                .collect()
        })
        .collect();

    let objective: Expression = (0..facilities.len())
        .flat_map(|i| (0..clients.len()).map(move |j| (i, j)))
        .map(|(i, j)| scaled.cost(i, j) as f64 * assignment_variables[i][j])
        .sum();

    let mut milp_model = variables.minimise(objective).using(microlp);

    // every client is assigned to exactly one facility
    for j in 0..clients.len() {
        let covering: Expression = (0..facilities.len())
            .map(|i| Expression::from(assignment_variables[i][j]))
            .sum();
        milp_model = milp_model.with(constraint!(covering == 1.0));
    }

    // a client inside an exclusive service area is pinned to its facility
    for (j, mandatory_facility) in mandatory_facilities.iter().enumerate() {
        if let Some(i) = mandatory_facility {
            let pinned: Expression = assignment_variables[*i][j].into();
            milp_model = milp_model.with(constraint!(pinned == 1.0));
        }
    }

    // facility loads stay within the demand bounds
    for (i, facility) in facilities.iter().enumerate() {
        if facility.min_demand() > 0 {
            let load: Expression = (0..clients.len())
                .map(|j| scaled.demand(j) as f64 * assignment_variables[i][j])
                .sum();
            milp_model = milp_model.with(constraint!(load >= scaled.min_demand(i) as f64));
        }
        if facility.max_demand() > 0 {
            let load: Expression = (0..clients.len())
                .map(|j| scaled.demand(j) as f64 * assignment_variables[i][j])
                .sum();
            milp_model = milp_model.with(constraint!(load <= scaled.max_demand(i) as f64));
        }
    }

    let solved = match milp_model.solve() {
        Ok(solved) => solved,
        Err(_) => return AssignmentSolution::infeasible(String::from("No optimal solution found")),
    };

    println!(
        "MILP solved (elapsed time for solver: {:0.2}sec)",
        start_time.elapsed().as_secs_f32()
    );

    let mut assignments: Vec<Vec<usize>> = vec![Vec::new(); facilities.len()];
    let mut total_cost = 0;
    for j in 0..clients.len() {
        for i in 0..facilities.len() {
            if solved.value(assignment_variables[i][j]) > 0.5 {
                assignments[i].push(j);
                total_cost += scaled.cost(i, j);
                break;
            }
        }
    }

    let assigned_facilities: Vec<AssignedFacility> = facilities
        .iter()
        .enumerate()
        .map(|(i, facility)| {
            AssignedFacility::new(
                facility.clone(),
                assignments[i].iter().map(|&j| clients[j].clone()).collect(),
            )
        })
        .collect();

    let evaluated_facilities =
        evaluate_assigned_facilities(&assigned_facilities, &config.service_area);

    let objective_value = (total_cost as f64 / scale_factor as f64).round();

    AssignmentSolution::new(
        objective_value,
        evaluated_facilities,
        SolutionStatus::Optimal,
        String::from("Optimal solution found"),
    )
}
