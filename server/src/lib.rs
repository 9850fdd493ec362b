use std::sync::Arc;

use axum::http::StatusCode;

use model::config::Config;
use model::json_serialisation::load_assignment_request_from_json;
use solution::json_serialisation::solution_to_json;
use solver::solve_facility_assignment;

/// Handle one solve request: returns the HTTP status code and the response
/// body. Validation failures map to 400 with one entry per offending field,
/// infeasible problems to 500 with the solver's message.
pub fn solve_instance(
    input_data: serde_json::Value,
    config: Arc<Config>,
) -> (StatusCode, serde_json::Value) {
    let request = match load_assignment_request_from_json(input_data) {
        Ok(request) => request,
        Err(validation_error) => {
            return (StatusCode::BAD_REQUEST, validation_error.to_json());
        }
    };

    let solution = solve_facility_assignment(&request, config);

    if solution.is_infeasible() {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            serde_json::json!({ "detail": solution.message() }),
        );
    }

    (StatusCode::OK, solution_to_json(&solution))
}
