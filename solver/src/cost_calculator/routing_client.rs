use serde::{Deserialize, Serialize};

use model::base_types::Degrees;

use super::{TravelTable, TravelTableSource};

#[derive(Serialize, Debug)]
#[serde(rename_all = "camelCase")]
struct TableRequest {
    sources: Vec<JsonCoordinate>,
    destinations: Vec<JsonCoordinate>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy)]
struct JsonCoordinate {
    lat: Degrees,
    lng: Degrees,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct TableResponse {
    distances: Vec<Vec<Option<f64>>>,
    durations: Vec<Vec<Option<f64>>>,
}

/// Blocking client for the external routing service's table endpoint.
pub struct RoutingServiceClient {
    http_client: reqwest::blocking::Client,
    server_address: String,
}

// static
impl RoutingServiceClient {
    pub fn new(server_address: String) -> RoutingServiceClient {
        RoutingServiceClient {
            http_client: reqwest::blocking::Client::new(),
            server_address,
        }
    }
}

impl TravelTableSource for RoutingServiceClient {
    fn travel_table(
        &self,
        sources: &[(Degrees, Degrees)],
        destinations: &[(Degrees, Degrees)],
    ) -> Result<TravelTable, String> {
        let request = TableRequest {
            sources: sources
                .iter()
                .map(|&(lat, lng)| JsonCoordinate { lat, lng })
                .collect(),
            destinations: destinations
                .iter()
                .map(|&(lat, lng)| JsonCoordinate { lat, lng })
                .collect(),
        };

        let response: TableResponse = self
            .http_client
            .post(format!("{}/table", self.server_address))
            .json(&request)
            .send()
            .and_then(|response| response.error_for_status())
            .and_then(|response| response.json())
            .map_err(|error| error.to_string())?;

        Ok(TravelTable {
            distances: response.distances,
            durations: response.durations,
        })
    }
}
