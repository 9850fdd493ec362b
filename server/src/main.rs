use std::sync::Arc;

use model::config::Config;

#[tokio::main]
pub async fn main() {
    let config = Arc::new(Config::from_env());

    let app = axum::Router::new()
        .fallback(axum::routing::get(|| async {
            "No Route! Use /health or /v1/solve-assignment"
        }))
        .route("/health", axum::routing::get(healthy))
        .route("/v1/solve-assignment", axum::routing::post(solve_assignment))
        .with_state(config);

    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    println!("Server running on port 3000 (http://localhost:3000/health)");
    axum::serve(listener, app).await.unwrap();
}

pub async fn healthy() -> &'static str {
    println!("Healthy");
    "Healthy"
}

pub async fn solve_assignment(
    axum::extract::State(config): axum::extract::State<Arc<Config>>,
    axum::extract::Json(input_data): axum::extract::Json<serde_json::Value>,
) -> (axum::http::StatusCode, axum::response::Json<serde_json::Value>) {
    println!("Solving");
    // the engine and the routing client are synchronous
    let (status, body) =
        tokio::task::spawn_blocking(move || server::solve_instance(input_data, config))
            .await
            .expect("solver task panicked");
    (status, axum::response::Json(body))
}
