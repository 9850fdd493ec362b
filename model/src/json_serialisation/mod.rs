#[cfg(test)]
mod tests;

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::assignment_problem::AlgorithmType;
use crate::assignment_request::AssignmentRequest;
use crate::client::Client;
use crate::cost_problem::ObjectiveType;
use crate::facility::Facility;
use crate::geometry;

type IdType = String;

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonClient {
    id: IdType,
    lat: f64,
    lng: f64,
    #[serde(default = "default_demand")]
    demand: f64,
}

fn default_demand() -> f64 {
    1.0
}

#[derive(Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
struct JsonFacility {
    id: IdType,
    name: String,
    lat: f64,
    lng: f64,
    #[serde(default)]
    min_demand: u32,
    #[serde(default)]
    max_demand: u32,
    #[serde(default)]
    exclusive_service_area: Option<JsonValue>,
}

/// A single offending field of a request, as reported to the caller.
#[derive(Serialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct FieldError {
    pub error: String,
    pub path_error: String,
    pub input: JsonValue,
}

/// All validation failures of one request, collected field by field.
#[derive(Debug, Clone)]
pub struct ValidationError {
    fields: Vec<FieldError>,
}

// methods
impl ValidationError {
    pub fn fields(&self) -> &[FieldError] {
        &self.fields
    }

    pub fn to_json(&self) -> JsonValue {
        serde_json::json!({
            "message": self.to_string(),
            "fields": self.fields,
        })
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} fields with validation error", self.fields.len())
    }
}

/// Turns the camelCase request body into a validated `AssignmentRequest`.
/// All field errors are collected before the request is rejected.
pub fn load_assignment_request_from_json(
    input_data: JsonValue,
) -> Result<AssignmentRequest, ValidationError> {
    let mut errors: Vec<FieldError> = Vec::new();

    let object = match input_data.as_object() {
        Some(object) => object,
        None => {
            return Err(ValidationError {
                fields: vec![field_error("expected a JSON object", "", &input_data)],
            })
        }
    };

    let total_demand = match object.get("totalDemand") {
        None => 1.0,
        Some(value) => match value.as_u64() {
            Some(demand) if demand >= 1 => demand as f64,
            _ => {
                errors.push(field_error(
                    "must be a positive integer",
                    "total_demand",
                    value,
                ));
                1.0
            }
        },
    };

    let clients = parse_clients(object.get("clients"), &mut errors);
    let facilities = parse_facilities(object.get("facilities"), &mut errors);

    let algorithm = parse_code(
        object.get("algorithm"),
        "algorithm",
        AlgorithmType::FlowFormulation,
        AlgorithmType::from_code,
        &mut errors,
    );
    let objective = parse_code(
        object.get("objective"),
        "objective",
        ObjectiveType::MinProximity,
        ObjectiveType::from_code,
        &mut errors,
    );

    if !errors.is_empty() {
        return Err(ValidationError { fields: errors });
    }

    Ok(AssignmentRequest::new(
        total_demand,
        clients,
        facilities,
        algorithm,
        objective,
    ))
}

fn parse_clients(value: Option<&JsonValue>, errors: &mut Vec<FieldError>) -> Vec<Client> {
    let entries = match value.and_then(JsonValue::as_array) {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            errors.push(field_error(
                "at least one client is required",
                "clients",
                value.unwrap_or(&JsonValue::Null),
            ));
            return Vec::new();
        }
    };

    let mut clients = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        match serde_json::from_value::<JsonClient>(entry.clone()) {
            Ok(client) if client.demand > 0.0 => {
                clients.push(Client::new(&client.id, client.lat, client.lng, client.demand));
            }
            Ok(_) => errors.push(field_error(
                "demand must be strictly positive",
                &format!("clients->{}->demand", index),
                entry,
            )),
            Err(error) => errors.push(field_error(
                &error.to_string(),
                &format!("clients->{}", index),
                entry,
            )),
        }
    }
    clients
}

fn parse_facilities(value: Option<&JsonValue>, errors: &mut Vec<FieldError>) -> Vec<Facility> {
    let entries = match value.and_then(JsonValue::as_array) {
        Some(entries) if !entries.is_empty() => entries,
        _ => {
            errors.push(field_error(
                "at least one facility is required",
                "facilities",
                value.unwrap_or(&JsonValue::Null),
            ));
            return Vec::new();
        }
    };

    let mut facilities = Vec::with_capacity(entries.len());
    for (index, entry) in entries.iter().enumerate() {
        let facility = match serde_json::from_value::<JsonFacility>(entry.clone()) {
            Ok(facility) => facility,
            Err(error) => {
                errors.push(field_error(
                    &error.to_string(),
                    &format!("facilities->{}", index),
                    entry,
                ));
                continue;
            }
        };

        if facility.max_demand > 0 && facility.min_demand > facility.max_demand {
            errors.push(field_error(
                "min_demand must not exceed max_demand",
                &format!("facilities->{}->min_demand", index),
                entry,
            ));
            continue;
        }

        let exclusive_service_area = match &facility.exclusive_service_area {
            None => Ok(geometry::empty_multipolygon()),
            Some(geojson) => geometry::multipolygon_from_geojson(geojson),
        };

        match exclusive_service_area {
            Ok(area) => facilities.push(Facility::new(
                &facility.id,
                &facility.name,
                facility.lat,
                facility.lng,
                facility.min_demand,
                facility.max_demand,
                area,
            )),
            Err(error) => errors.push(field_error(
                &error,
                &format!("facilities->{}->exclusive_service_area", index),
                entry,
            )),
        }
    }
    facilities
}

fn parse_code<T: Copy>(
    value: Option<&JsonValue>,
    path: &str,
    default: T,
    from_code: impl Fn(u64) -> Result<T, String>,
    errors: &mut Vec<FieldError>,
) -> T {
    let value = match value {
        None => return default,
        Some(value) => value,
    };

    match value.as_u64().map(&from_code) {
        Some(Ok(parsed)) => parsed,
        Some(Err(error)) => {
            errors.push(field_error(&error, path, value));
            default
        }
        None => {
            errors.push(field_error("must be an integer code", path, value));
            default
        }
    }
}

fn field_error(error: &str, path_error: &str, input: &JsonValue) -> FieldError {
    FieldError {
        error: String::from(error),
        path_error: String::from(path_error),
        input: input.clone(),
    }
}
