mod routing_client;

pub use routing_client::RoutingServiceClient;

use model::assignment_problem::CostMatrix;
use model::base_types::Degrees;
use model::client::Client;
use model::cost_problem::{CostProblem, CostType};
use model::facility::Facility;
use model::geometry::spherical_distance_km;

/// A batched source of road distances and durations between coordinates.
/// The production implementation talks to the external routing service.
pub trait TravelTableSource {
    fn travel_table(
        &self,
        sources: &[(Degrees, Degrees)],
        destinations: &[(Degrees, Degrees)],
    ) -> Result<TravelTable, String>;
}

/// Road distances (meters) and durations (seconds) between each source and
/// each destination. None marks pairs the service cannot resolve.
#[derive(Debug, Clone)]
pub struct TravelTable {
    pub distances: Vec<Vec<Option<f64>>>,
    pub durations: Vec<Vec<Option<f64>>>,
}

/// Compute the demand-weighted facility-by-client cost matrix for the given
/// cost problem. NaN entries are kept; filtering them is the caller's job.
pub fn compute_cost_matrix(cost_problem: &CostProblem) -> CostMatrix {
    let raw_costs = match cost_problem.cost_type() {
        CostType::SphericalDistance => {
            spherical_cost_matrix(cost_problem.facilities(), cost_problem.clients())
        }
        CostType::RoadDistance | CostType::RoadDuration => {
            let routing_client =
                RoutingServiceClient::new(cost_problem.routing().server_address.clone());
            road_cost_matrix(
                &routing_client,
                cost_problem.facilities(),
                cost_problem.clients(),
                cost_problem.cost_type(),
                cost_problem.routing().batch_size,
            )
        }
    };

    let clients = cost_problem.clients();
    CostMatrix::from_fn(raw_costs.rows(), raw_costs.cols(), |facility, client| {
        clients[client].demand() * raw_costs.get(facility, client)
    })
}

/// Great-circle distances in kilometers between every facility and every
/// client.
pub fn spherical_cost_matrix(facilities: &[Facility], clients: &[Client]) -> CostMatrix {
    CostMatrix::from_fn(facilities.len(), clients.len(), |i, j| {
        spherical_distance_km(
            (facilities[i].lat(), facilities[i].lng()),
            (clients[j].lat(), clients[j].lng()),
        )
    })
}

/// Road distances or durations between every facility and every client,
/// fetched in destination batches of at most `batch_size` pairs. Cells of
/// unresolvable pairs and of failed batches become NaN.
pub fn road_cost_matrix(
    source: &impl TravelTableSource,
    facilities: &[Facility],
    clients: &[Client],
    cost_type: CostType,
    batch_size: usize,
) -> CostMatrix {
    let sources: Vec<(Degrees, Degrees)> = facilities
        .iter()
        .map(|facility| (facility.lat(), facility.lng()))
        .collect();
    let destinations: Vec<(Degrees, Degrees)> = clients
        .iter()
        .map(|client| (client.lat(), client.lng()))
        .collect();

    let mut rows: Vec<Vec<f64>> = vec![Vec::with_capacity(clients.len()); facilities.len()];

    for batch in destinations.chunks(batch_size.max(1)) {
        match source.travel_table(&sources, batch) {
            Ok(table) => {
                let values = match cost_type {
                    CostType::RoadDistance => &table.distances,
                    _ => &table.durations,
                };
                for (i, row) in rows.iter_mut().enumerate() {
                    for j in 0..batch.len() {
                        row.push(
                            values
                                .get(i)
                                .and_then(|value_row| value_row.get(j))
                                .copied()
                                .flatten()
                                .unwrap_or(f64::NAN),
                        );
                    }
                }
            }
            Err(error) => {
                println!("WARNING: routing service request failed: {}", error);
                for row in rows.iter_mut() {
                    for _ in 0..batch.len() {
                        row.push(f64::NAN);
                    }
                }
            }
        }
    }

    CostMatrix::from_fn(facilities.len(), clients.len(), |i, j| rows[i][j])
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    use model::config::RoutingConfig;
    use model::cost_problem::ObjectiveType;

    fn clients() -> Vec<Client> {
        vec![
            Client::new("1", 0.1, 0.1, 1.0),
            Client::new("2", 1.1, 1.1, 1.0),
            Client::new("3", 2.1, 2.1, 1.0),
            Client::new("4", 3.1, 3.1, 1.0),
            Client::new("5", 100.0, 100.0, 1.0),
        ]
    }

    fn facilities() -> Vec<Facility> {
        vec![
            Facility::without_exclusive_service_area("1", "Facility 1", 1.0, 1.0, 0, 0),
            Facility::without_exclusive_service_area("2", "Facility 2", 2.0, 2.0, 0, 0),
            Facility::without_exclusive_service_area("3", "Facility 3", 3.0, 3.0, 0, 0),
        ]
    }

    /// Stub routing source: distance 1000m everywhere, duration 60s, except
    /// for destinations beyond 90 degrees of latitude, which are
    /// unresolvable. Counts its invocations.
    struct StubTableSource {
        calls: RefCell<usize>,
    }

    impl StubTableSource {
        fn new() -> StubTableSource {
            StubTableSource {
                calls: RefCell::new(0),
            }
        }
    }

    impl TravelTableSource for StubTableSource {
        fn travel_table(
            &self,
            sources: &[(Degrees, Degrees)],
            destinations: &[(Degrees, Degrees)],
        ) -> Result<TravelTable, String> {
            *self.calls.borrow_mut() += 1;
            let cell = |destination: &(Degrees, Degrees), value: f64| {
                if destination.0 > 90.0 {
                    None
                } else {
                    Some(value)
                }
            };
            Ok(TravelTable {
                distances: sources
                    .iter()
                    .map(|_| destinations.iter().map(|d| cell(d, 1000.0)).collect())
                    .collect(),
                durations: sources
                    .iter()
                    .map(|_| destinations.iter().map(|d| cell(d, 60.0)).collect())
                    .collect(),
            })
        }
    }

    #[test]
    fn spherical_cost_matrix_has_a_row_per_facility_and_a_column_per_client() {
        let matrix = spherical_cost_matrix(&facilities(), &clients());

        assert_eq!(matrix.rows(), 3);
        assert_eq!(matrix.cols(), 5);
        // a facility has distance zero to a client at its own position
        assert!(matrix.get(2, 3) < matrix.get(0, 3));
    }

    #[test]
    fn cost_matrix_entries_are_demand_weighted() {
        let facilities = facilities();
        let unit_demand_clients = clients();
        let heavy_clients: Vec<Client> = unit_demand_clients
            .iter()
            .map(|client| Client::new(client.id(), client.lat(), client.lng(), 10.0))
            .collect();
        let routing = RoutingConfig {
            server_address: String::from("http://localhost:5000"),
            batch_size: 100,
        };

        let unit_matrix = compute_cost_matrix(&CostProblem::new(
            unit_demand_clients,
            facilities.clone(),
            ObjectiveType::MinProximity,
            routing.clone(),
        ));
        let heavy_matrix = compute_cost_matrix(&CostProblem::new(
            heavy_clients,
            facilities,
            ObjectiveType::MinProximity,
            routing,
        ));

        for i in 0..unit_matrix.rows() {
            for j in 0..unit_matrix.cols() {
                assert!((heavy_matrix.get(i, j) - 10.0 * unit_matrix.get(i, j)).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn road_costs_select_distances_or_durations() {
        let stub = StubTableSource::new();

        let distances =
            road_cost_matrix(&stub, &facilities(), &clients(), CostType::RoadDistance, 100);
        let durations =
            road_cost_matrix(&stub, &facilities(), &clients(), CostType::RoadDuration, 100);

        assert_eq!(distances.get(0, 0), 1000.0);
        assert_eq!(durations.get(0, 0), 60.0);
    }

    #[test]
    fn unresolvable_pairs_become_nan_columns() {
        let stub = StubTableSource::new();

        let matrix =
            road_cost_matrix(&stub, &facilities(), &clients(), CostType::RoadDistance, 100);

        // the client at latitude 100 cannot be resolved
        assert_eq!(matrix.nan_column_indices(), vec![4]);
    }

    #[test]
    fn destinations_are_fetched_in_batches() {
        let stub = StubTableSource::new();

        road_cost_matrix(&stub, &facilities(), &clients(), CostType::RoadDistance, 2);

        // five clients in batches of two
        assert_eq!(*stub.calls.borrow(), 3);
    }
}
