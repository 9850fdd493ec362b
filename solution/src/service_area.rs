use geo::{ConcaveHull, Contains, MultiPoint, MultiPolygon, Point, Polygon};

use model::client::Client;
use model::config::ServiceAreaConfig;
use model::facility::Facility;

use crate::dispersion::solve_clients_dispersion_problem;

/// Compute a facility's service area: the polygons of its exclusive service
/// area plus the concave hull of a dispersed subset of the assigned clients
/// located outside of it.
///
/// The hull is only built from at least four distinct client coordinates
/// and only appended if it is not already contained in one of the exclusive
/// polygons.
pub fn compute_service_area(
    facility: &Facility,
    assigned_clients: &[Client],
    config: &ServiceAreaConfig,
) -> MultiPolygon<f64> {
    let considered_clients: Vec<Client> = if facility.has_exclusive_service_area() {
        assigned_clients
            .iter()
            .filter(|client| !facility.exclusive_service_area_covers(client.position()))
            .cloned()
            .collect()
    } else {
        assigned_clients.to_vec()
    };

    let clients_subset =
        solve_clients_dispersion_problem(&considered_clients, config.dispersed_subset_size);

    let mut polygons: Vec<Polygon<f64>> = facility.exclusive_service_area().0.clone();

    let mut coordinates: Vec<Point<f64>> = Vec::new();
    for client in &clients_subset {
        let point = client.position();
        if !coordinates.contains(&point) {
            coordinates.push(point);
        }
    }

    if coordinates.len() > 3 {
        let hull = MultiPoint::new(coordinates).concave_hull(config.concave_hull_concavity);
        if !polygons.iter().any(|polygon| polygon.contains(&hull)) {
            polygons.push(hull);
        }
    }

    MultiPolygon::new(polygons)
}
