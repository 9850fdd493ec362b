pub type Degrees = f64;
pub type Kilometer = f64;

pub type Demand = f64;

/// facility lower/upper demand bound as it appears in a request;
/// 0 means "unbounded" for the upper bound.
pub type DemandBound = u32;

pub type Cost = f64;

/// integer rendition of demands and costs after scaling, as required by the
/// integer solvers.
pub type IntegerDemand = i64;
pub type IntegerCost = i64;

pub const COST_INFINITY: Cost = f64::INFINITY;
