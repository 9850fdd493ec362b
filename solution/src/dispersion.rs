//! Discrete p-dispersion: choose p among n given points such that the
//! minimum distance between any pair of chosen points is as large as
//! possible. The problem is NP-hard; here it is solved with the greedy
//! construction heuristic of Erkut (1994), which is good enough to find a
//! dispersed subset of clients representing a facility's service area.

use model::client::Client;
use model::geometry::spherical_distance_km;

/// Compute a well dispersed subset of clients of the given size.
///
/// The subset is seeded with both endpoints of the globally farthest pair
/// (row-major argmax, so duplicates can be seeded twice) and then grown by
/// repeatedly adding the client with the greatest minimum distance to the
/// already selected ones, ties broken by first index. If the subset size is
/// not less than the number of clients, all clients are returned.
pub fn solve_clients_dispersion_problem(clients: &[Client], subset_size: usize) -> Vec<Client> {
    if subset_size >= clients.len() {
        return clients.to_vec();
    }

    let n = clients.len();
    let mut distances = vec![0.0; n * n];
    for i in 0..n {
        for j in 0..n {
            distances[i * n + j] = spherical_distance_km(
                (clients[i].lat(), clients[i].lng()),
                (clients[j].lat(), clients[j].lng()),
            );
        }
    }

    // seed with the farthest pair
    let mut farthest = 0;
    for position in 1..n * n {
        if distances[position] > distances[farthest] {
            farthest = position;
        }
    }
    let mut selected = vec![farthest / n, farthest % n];

    while selected.len() < subset_size {
        let mut best_candidate = 0;
        let mut best_min_distance = f64::NEG_INFINITY;
        for candidate in 0..n {
            let min_distance = selected
                .iter()
                .map(|&index| distances[candidate * n + index])
                .fold(f64::INFINITY, f64::min);
            if min_distance > best_min_distance {
                best_min_distance = min_distance;
                best_candidate = candidate;
            }
        }
        selected.push(best_candidate);
    }

    selected.iter().map(|&index| clients[index].clone()).collect()
}
