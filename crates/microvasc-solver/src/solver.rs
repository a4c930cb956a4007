//! Solver capability interface.

use microvasc_core::CircuitModel;

use crate::error::Result;
use crate::results::ResultSet;

/// A reduced-order hydraulic solver.
///
/// Implementations must be deterministic for a given model and must return a
/// result set covering every vessel in it. A call blocks until the solve
/// completes; failures are returned, never retried.
pub trait ZeroDSolver {
    /// Simulate the model and return per-vessel result series.
    fn simulate(&self, model: &CircuitModel) -> Result<ResultSet>;
}
