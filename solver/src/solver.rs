use std::sync::mpsc;
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use model::assignment_problem::AssignmentProblem;
use model::config::Config;
use solution::AssignmentSolution;

/// An interchangeable formulation of the assignment problem. Formulations
/// scale the problem parameters themselves, as each requires its own scale
/// factor, and run the evaluator on success.
pub trait AssignmentFormulation {
    fn initialize(problem: Arc<AssignmentProblem>, config: Arc<Config>) -> Self;

    fn solve(&self) -> AssignmentSolution;
}

/// Run a formulation on its own thread and wait for at most the given
/// wall-clock time limit. On expiry the solver thread is abandoned and the
/// problem is reported as unsolved; a best-found (feasible) answer would
/// require a solver backend that yields incumbents.
pub(crate) fn solve_with_time_limit(
    time_limit_seconds: u64,
    formulation: impl FnOnce() -> AssignmentSolution + Send + 'static,
) -> AssignmentSolution {
    let (sender, receiver) = mpsc::channel();

    thread::spawn(move || {
        // the receiver is gone if the time limit has expired in the meantime
        let _ = sender.send(formulation());
    });

    match receiver.recv_timeout(Duration::from_secs(time_limit_seconds)) {
        Ok(solution) => solution,
        Err(_) => AssignmentSolution::infeasible(format!(
            "No optimal solution found within the time limit of {} seconds",
            time_limit_seconds
        )),
    }
}
