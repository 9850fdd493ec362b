use derive_more::Display;

use crate::base_types::Cost;
use crate::client::Client;
use crate::facility::Facility;

pub const DEFAULT_SOLVER_TIME_LIMIT_SECONDS: u64 = 80;

/// Formulation used for solving the assignment problem.
#[derive(Debug, Display, Clone, Copy, PartialEq, Eq)]
pub enum AlgorithmType {
    FlowFormulation,
    MilpFormulation,
}

impl AlgorithmType {
    pub fn from_code(code: u64) -> Result<AlgorithmType, String> {
        match code {
            1 => Ok(AlgorithmType::FlowFormulation),
            2 => Ok(AlgorithmType::MilpFormulation),
            _ => Err(format!("{} is not a valid assignment algorithm", code)),
        }
    }
}

/// Dense facility-by-client cost matrix in row-major order. Entry (i, j) is
/// the demand-weighted cost of serving client j from facility i; NaN marks
/// pairs the cost source could not resolve.
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    rows: usize,
    cols: usize,
    entries: Vec<Cost>,
}

// methods
impl CostMatrix {
    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    pub fn get(&self, row: usize, col: usize) -> Cost {
        self.entries[row * self.cols + col]
    }

    pub fn column_has_nan(&self, col: usize) -> bool {
        (0..self.rows).any(|row| self.get(row, col).is_nan())
    }

    /// Column indices for which at least one entry is NaN, in ascending
    /// order.
    pub fn nan_column_indices(&self) -> Vec<usize> {
        (0..self.cols)
            .filter(|&col| self.column_has_nan(col))
            .collect()
    }

    /// A copy of the matrix without the given columns (ascending indices).
    pub fn without_columns(&self, dropped: &[usize]) -> CostMatrix {
        let kept: Vec<usize> = (0..self.cols)
            .filter(|col| dropped.binary_search(col).is_err())
            .collect();
        CostMatrix::from_fn(self.rows, kept.len(), |row, col| self.get(row, kept[col]))
    }
}

// static
impl CostMatrix {
    pub fn from_fn(rows: usize, cols: usize, mut entry: impl FnMut(usize, usize) -> Cost) -> CostMatrix {
        let mut entries = Vec::with_capacity(rows * cols);
        for row in 0..rows {
            for col in 0..cols {
                entries.push(entry(row, col));
            }
        }
        CostMatrix { rows, cols, entries }
    }
}

/// A fully priced assignment problem, ready for one of the formulations.
#[derive(Debug, Clone)]
pub struct AssignmentProblem {
    clients: Vec<Client>,
    facilities: Vec<Facility>,
    cost_matrix: CostMatrix,
    algorithm: AlgorithmType,
    solver_time_limit_seconds: u64,
}

// methods
impl AssignmentProblem {
    pub fn clients(&self) -> &[Client] {
        &self.clients
    }

    pub fn facilities(&self) -> &[Facility] {
        &self.facilities
    }

    pub fn cost_matrix(&self) -> &CostMatrix {
        &self.cost_matrix
    }

    pub fn algorithm(&self) -> AlgorithmType {
        self.algorithm
    }

    pub fn solver_time_limit_seconds(&self) -> u64 {
        self.solver_time_limit_seconds
    }
}

// static
impl AssignmentProblem {
    pub fn new(
        clients: Vec<Client>,
        facilities: Vec<Facility>,
        cost_matrix: CostMatrix,
        algorithm: AlgorithmType,
    ) -> AssignmentProblem {
        AssignmentProblem {
            clients,
            facilities,
            cost_matrix,
            algorithm,
            solver_time_limit_seconds: DEFAULT_SOLVER_TIME_LIMIT_SECONDS,
        }
    }

    pub fn with_solver_time_limit(mut self, seconds: u64) -> AssignmentProblem {
        self.solver_time_limit_seconds = seconds;
        self
    }
}
