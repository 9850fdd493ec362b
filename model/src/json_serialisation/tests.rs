use serde_json::json;

use crate::assignment_problem::AlgorithmType;
use crate::cost_problem::ObjectiveType;
use crate::json_serialisation::load_assignment_request_from_json;

fn full_request() -> serde_json::Value {
    json!({
        "totalDemand": 8,
        "clients": [
            {"id": "C1", "lat": 0.75, "lng": 0.75, "demand": 2.5},
            {"id": "C2", "lat": 1.5, "lng": 0.5},
        ],
        "facilities": [
            {"id": "F1", "name": "FC1", "lat": 1.0, "lng": 1.0, "minDemand": 1, "maxDemand": 5},
            {
                "id": "F2",
                "name": "FC2",
                "lat": 3.0,
                "lng": 3.0,
                "exclusiveServiceArea": {
                    "type": "Polygon",
                    "coordinates": [
                        [[2.25, 2.25], [2.75, 2.25], [2.75, 2.75], [2.25, 2.75], [2.25, 2.25]]
                    ],
                },
            },
        ],
        "algorithm": 2,
        "objective": 3,
    })
}

#[test]
fn test_load_full_request() {
    // ACT
    let request = load_assignment_request_from_json(full_request()).unwrap();

    // ASSERT
    assert_eq!(request.total_demand(), 8.0);

    assert_eq!(request.clients().len(), 2);
    assert_eq!(request.clients()[0].id(), "C1");
    assert_eq!(request.clients()[0].demand(), 2.5);
    assert_eq!(request.clients()[1].demand(), 1.0); // default

    assert_eq!(request.facilities().len(), 2);
    assert_eq!(request.facilities()[0].name(), "FC1");
    assert_eq!(request.facilities()[0].min_demand(), 1);
    assert_eq!(request.facilities()[0].max_demand(), 5);
    assert!(!request.facilities()[0].has_exclusive_service_area());
    assert!(request.facilities()[1].has_exclusive_service_area());

    assert_eq!(request.algorithm(), AlgorithmType::MilpFormulation);
    assert_eq!(request.objective(), ObjectiveType::MinTravelDuration);
}

#[test]
fn test_defaults_of_a_minimal_request() {
    let request = load_assignment_request_from_json(json!({
        "clients": [{"id": "C1", "lat": 1.0, "lng": 1.0}],
        "facilities": [{"id": "F1", "name": "FC1", "lat": 1.0, "lng": 1.0}],
    }))
    .unwrap();

    assert_eq!(request.total_demand(), 1.0);
    assert_eq!(request.algorithm(), AlgorithmType::FlowFormulation);
    assert_eq!(request.objective(), ObjectiveType::MinProximity);
    assert_eq!(request.facilities()[0].min_demand(), 0);
    assert_eq!(request.facilities()[0].max_demand(), 0);
}

#[test]
fn test_missing_clients_and_facilities() {
    let error = load_assignment_request_from_json(json!({"totalDemand": 100})).unwrap_err();

    let paths: Vec<&str> = error
        .fields()
        .iter()
        .map(|field| field.path_error.as_str())
        .collect();
    assert!(paths.contains(&"clients"));
    assert!(paths.contains(&"facilities"));
}

#[test]
fn test_empty_clients_are_rejected() {
    let error = load_assignment_request_from_json(json!({
        "clients": [],
        "facilities": [{"id": "F1", "name": "FC1", "lat": 1.0, "lng": 1.0}],
    }))
    .unwrap_err();

    assert_eq!(error.fields().len(), 1);
    assert_eq!(error.fields()[0].path_error, "clients");
    assert_eq!(error.fields()[0].error, "at least one client is required");
}

#[test]
fn test_non_positive_demand_is_rejected() {
    let error = load_assignment_request_from_json(json!({
        "clients": [
            {"id": "C1", "lat": 1.0, "lng": 1.0, "demand": 0.0},
            {"id": "C2", "lat": 1.0, "lng": 1.0, "demand": -2.0},
        ],
        "facilities": [{"id": "F1", "name": "FC1", "lat": 1.0, "lng": 1.0}],
    }))
    .unwrap_err();

    assert_eq!(error.fields().len(), 2);
    assert_eq!(error.fields()[0].path_error, "clients->0->demand");
    assert_eq!(error.fields()[1].path_error, "clients->1->demand");
}

#[test]
fn test_unknown_objective_and_algorithm_codes() {
    let error = load_assignment_request_from_json(json!({
        "clients": [{"id": "C1", "lat": 1.0, "lng": 1.0}],
        "facilities": [{"id": "F1", "name": "FC1", "lat": 1.0, "lng": 1.0}],
        "algorithm": 7,
        "objective": "invalid",
    }))
    .unwrap_err();

    assert_eq!(error.fields().len(), 2);
    assert_eq!(error.fields()[0].path_error, "algorithm");
    assert_eq!(error.fields()[1].path_error, "objective");
    assert_eq!(error.to_string(), "2 fields with validation error");
}

#[test]
fn test_malformed_geojson_is_rejected() {
    let error = load_assignment_request_from_json(json!({
        "clients": [{"id": "C1", "lat": 1.0, "lng": 1.0}],
        "facilities": [{
            "id": "F1",
            "name": "FC1",
            "lat": 1.0,
            "lng": 1.0,
            "exclusiveServiceArea": {"type": "FeatureCollection", "features": []},
        }],
    }))
    .unwrap_err();

    assert_eq!(error.fields().len(), 1);
    assert_eq!(
        error.fields()[0].path_error,
        "facilities->0->exclusive_service_area"
    );
}

#[test]
fn test_min_demand_above_max_demand_is_rejected() {
    let error = load_assignment_request_from_json(json!({
        "clients": [{"id": "C1", "lat": 1.0, "lng": 1.0}],
        "facilities": [{
            "id": "F1", "name": "FC1", "lat": 1.0, "lng": 1.0,
            "minDemand": 10, "maxDemand": 5,
        }],
    }))
    .unwrap_err();

    assert_eq!(error.fields().len(), 1);
    assert_eq!(error.fields()[0].path_error, "facilities->0->min_demand");
}

#[test]
fn test_validation_error_json_shape() {
    let error = load_assignment_request_from_json(json!({
        "totalDemand": 0,
        "clients": [{"id": "C1", "lat": 1.0, "lng": 1.0}],
        "facilities": [{"id": "F1", "name": "FC1", "lat": 1.0, "lng": 1.0}],
    }))
    .unwrap_err();

    let body = error.to_json();
    assert_eq!(body["message"], "1 fields with validation error");
    assert_eq!(body["fields"][0]["pathError"], "total_demand");
    assert_eq!(body["fields"][0]["input"], 0);
}
