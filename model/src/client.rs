use geo::Point;

use crate::base_types::{Degrees, Demand};
use crate::geometry;

/// A client of the assignment problem.
///
/// The demand can be fractional, such as in a scenario with 100 clients and
/// a total demand of 150, where each demand would be 1.5.
#[derive(Debug, Clone, PartialEq)]
pub struct Client {
    id: String,
    lat: Degrees,
    lng: Degrees,
    demand: Demand,
}

// methods
impl Client {
    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn lat(&self) -> Degrees {
        self.lat
    }

    pub fn lng(&self) -> Degrees {
        self.lng
    }

    pub fn demand(&self) -> Demand {
        self.demand
    }

    pub fn position(&self) -> Point<f64> {
        geometry::point_at(self.lat, self.lng)
    }
}

// static
impl Client {
    pub fn new(id: &str, lat: Degrees, lng: Degrees, demand: Demand) -> Client {
        Client {
            id: String::from(id),
            lat,
            lng,
            demand,
        }
    }
}

/// Scale the clients' demands so that they sum up to `new_total_demand`,
/// rounded to two decimals. Returns new clients, the input stays untouched.
pub fn scale_clients_demands(clients: &[Client], new_total_demand: Demand) -> Vec<Client> {
    if clients.is_empty() {
        return Vec::new();
    }

    let original_total_demand: Demand = clients.iter().map(|client| client.demand()).sum();
    let scale_factor = new_total_demand / original_total_demand;

    clients
        .iter()
        .map(|client| {
            Client::new(
                client.id(),
                client.lat(),
                client.lng(),
                round_2(scale_factor * client.demand()),
            )
        })
        .collect()
}

fn round_2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}
