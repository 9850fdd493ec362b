use std::fmt::Debug;
use std::str::FromStr;

/// Process-wide, read-only configuration. Built once at startup and passed
/// explicitly through the call graph.
#[derive(Debug, Clone)]
pub struct Config {
    pub routing: RoutingConfig,
    pub scaling: ScalingConfig,
    pub solver: SolverConfig,
    pub service_area: ServiceAreaConfig,
}

#[derive(Debug, Clone)]
pub struct RoutingConfig {
    pub server_address: String,
    pub batch_size: usize,
}

#[derive(Debug, Clone)]
pub struct ScalingConfig {
    pub flow_scale_factor: i64,
    pub milp_scale_factor: i64,
}

#[derive(Debug, Clone)]
pub struct SolverConfig {
    pub time_limit_seconds: u64,
}

#[derive(Debug, Clone)]
pub struct ServiceAreaConfig {
    pub concave_hull_concavity: f64,
    pub dispersed_subset_size: usize,
}

impl Config {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        routing_server_address: String,
        routing_batch_size: usize,
        flow_scale_factor: i64,
        milp_scale_factor: i64,
        solver_time_limit_seconds: u64,
        concave_hull_concavity: f64,
        dispersed_subset_size: usize,
    ) -> Config {
        Config {
            routing: RoutingConfig {
                server_address: routing_server_address,
                batch_size: routing_batch_size,
            },
            scaling: ScalingConfig {
                flow_scale_factor,
                milp_scale_factor,
            },
            solver: SolverConfig {
                time_limit_seconds: solver_time_limit_seconds,
            },
            service_area: ServiceAreaConfig {
                concave_hull_concavity,
                dispersed_subset_size,
            },
        }
    }

    /// Reads the configuration from the environment. Invalid values abort
    /// the process before any request is accepted.
    pub fn from_env() -> Config {
        Config::new(
            env_or("ROUTING_SERVER_ADDRESS", String::from("http://localhost:5000")),
            env_or("ROUTING_BATCH_SIZE", 100),
            env_or("FLOW_SCALE_FACTOR", 1000),
            env_or("MILP_SCALE_FACTOR", 100),
            env_or("SOLVER_TIME_LIMIT_SECONDS", 80),
            env_or("CONCAVE_HULL_CONCAVITY", 2.0),
            env_or("DISPERSED_SUBSET_SIZE", 10),
        )
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T
where
    T::Err: Debug,
{
    match std::env::var(key) {
        Ok(value) => value
            .parse()
            .unwrap_or_else(|error| panic!("Invalid value for {}: {:?}", key, error)),
        Err(_) => default,
    }
}
