use std::collections::HashMap;
use std::sync::Arc;
use std::time;

use rs_graph::linkedlistgraph::Edge as RsEdge;
use rs_graph::linkedlistgraph::Node as RsNode;
use rs_graph::mcf::network_simplex;
use rs_graph::traits::Directed;
use rs_graph::Buildable;
use rs_graph::Builder;
use rs_graph::IndexGraph;
use rs_graph::LinkedListGraph;

use model::assignment_problem::AssignmentProblem;
use model::config::Config;
use solution::evaluator::evaluate_assigned_facilities;
use solution::{AssignedFacility, AssignmentSolution, SolutionStatus};

use crate::exclusive_area_assignments;
use crate::scaling::scale_assignment_problem_parameters;
use crate::solver::{solve_with_time_limit, AssignmentFormulation};

type FlowValue = i64;

type LowerBound = FlowValue;
type UpperBound = FlowValue;
type Cost = FlowValue;

/// Solving the problem as a min-cost flow: each client node supplies its
/// scaled demand, which flows over exactly one facility into a sink. The
/// facility nodes drain their minimal demands themselves, the sink absorbs
/// the rest, capped by the facilities' maximal demands.
pub struct MinCostFlowSolver {
    problem: Arc<AssignmentProblem>,
    config: Arc<Config>,
}

impl AssignmentFormulation for MinCostFlowSolver {
    fn initialize(problem: Arc<AssignmentProblem>, config: Arc<Config>) -> Self {
        Self { problem, config }
    }

    fn solve(&self) -> AssignmentSolution {
        let problem = self.problem.clone();
        let config = self.config.clone();
        solve_with_time_limit(self.problem.solver_time_limit_seconds(), move || {
            solve_flow_formulation(&problem, &config)
        })
    }
}

fn solve_flow_formulation(problem: &AssignmentProblem, config: &Config) -> AssignmentSolution {
    let start_time = time::Instant::now();

    let scale_factor = config.scaling.flow_scale_factor;
    let scaled = match scale_assignment_problem_parameters(problem, scale_factor) {
        Ok(scaled) => scaled,
        Err(message) => return AssignmentSolution::infeasible(message),
    };

    let clients = problem.clients();
    let facilities = problem.facilities();

    // Clients inside an exclusive service area only get an arc to its
    // facility; overlapping exclusive areas make the problem unsolvable.
    let mandatory_facilities = match exclusive_area_assignments(clients, facilities) {
        Ok(mandatory_facilities) => mandatory_facilities,
        Err(message) => return AssignmentSolution::infeasible(message),
    };

    let mut builder = LinkedListGraph::<u32>::new_builder();

    let mut balances: HashMap<RsNode, FlowValue> = HashMap::new();
    let mut edges: HashMap<RsEdge, (LowerBound, UpperBound, Cost)> = HashMap::new();

    let client_nodes: Vec<RsNode> = clients.iter().map(|_| builder.add_node()).collect();
    let facility_nodes: Vec<RsNode> = facilities.iter().map(|_| builder.add_node()).collect();
    let sink_node = builder.add_node();

    let client_of_node: HashMap<RsNode, usize> = client_nodes
        .iter()
        .enumerate()
        .map(|(index, node)| (*node, index))
        .collect();

    let total_supply: FlowValue = (0..clients.len()).map(|j| scaled.demand(j)).sum();
    let total_minimal_demand: FlowValue = (0..facilities.len()).map(|i| scaled.min_demand(i)).sum();

    for (j, client_node) in client_nodes.iter().enumerate() {
        balances.insert(*client_node, scaled.demand(j));
    }
    for (i, facility_node) in facility_nodes.iter().enumerate() {
        balances.insert(*facility_node, -scaled.min_demand(i));
    }
    // the sink absorbs everything the facilities do not drain themselves
    balances.insert(sink_node, -(total_supply - total_minimal_demand));

    // arcs from clients to facilities
    for (j, client_node) in client_nodes.iter().enumerate() {
        let allowed_facilities: Vec<usize> = match mandatory_facilities[j] {
            Some(facility_index) => vec![facility_index],
            None => (0..facilities.len()).collect(),
        };
        for i in allowed_facilities {
            edges.insert(
                builder.add_edge(*client_node, facility_nodes[i]),
                (0, scaled.demand(j), scaled.cost(i, j)),
            );
        }
    }

    // arcs from facilities to the sink
    for (i, facility_node) in facility_nodes.iter().enumerate() {
        let mut capacity = if scaled.max_demand(i) > 0 {
            scaled.max_demand(i)
        } else {
            total_supply
        };
        // the facility node already drains its minimal demand
        capacity -= scaled.min_demand(i);
        edges.insert(builder.add_edge(*facility_node, sink_node), (0, capacity, 0));
    }

    let graph = builder.into_graph();

    println!(
        "Min-Cost-Flow network built (elapsed time for solver: {:0.2}sec)",
        start_time.elapsed().as_secs_f32()
    );

    let result = network_simplex(
        &graph,
        |n| *balances.get(&n).unwrap_or(&0),
        |e| edges[&e].0,
        |e| edges[&e].1,
        |e| edges[&e].2,
    );

    let (total_cost, flow) = match result {
        Some(solution) => solution,
        None => return AssignmentSolution::infeasible(String::from("No optimal solution found")),
    };

    println!(
        "Min-Cost-Flow computed (elapsed time for solver: {:0.2}sec)",
        start_time.elapsed().as_secs_f32()
    );

    // decode: every arc into a facility with positive flow assigns its
    // tail client to that facility
    let mut assignments: Vec<Vec<usize>> = vec![Vec::new(); facilities.len()];
    for (i, facility_node) in facility_nodes.iter().enumerate() {
        for (edge, tail) in graph.inedges(*facility_node) {
            if flow[graph.edge_id(edge)].1 > 0 {
                if let Some(&j) = client_of_node.get(&tail) {
                    assignments[i].push(j);
                }
            }
        }
        assignments[i].sort_unstable(); // clients in input order
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

    let objective_value = (total_cost as f64 / (scale_factor * scale_factor) as f64).round();

    AssignmentSolution::new(
        objective_value,
        evaluated_facilities,
        SolutionStatus::Optimal,
        String::from("Optimal solution found"),
    )
}
