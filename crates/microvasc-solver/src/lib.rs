//! Zero-dimensional hydraulic solvers for microvasc.
//!
//! This crate provides:
//! - The [`ZeroDSolver`] capability trait that decouples circuit models from
//!   the numerical solve
//! - An in-memory steady nodal-pressure solver for purely resistive models
//! - A subprocess adapter for an external svZeroD-compatible solver binary
//! - Extraction of per-vessel hemodynamics (pressure, flow, wall shear
//!   stress) from simulation output

pub mod error;
pub mod extract;
pub mod nodal;
pub mod results;
pub mod solver;
pub mod steady;
pub mod svzerod;

pub use error::{Error, Result};
pub use extract::{NetworkPressures, NetworkResults};
pub use nodal::NodalSystem;
pub use results::{BranchSeries, ResultSet};
pub use solver::ZeroDSolver;
pub use steady::SteadySolver;
pub use svzerod::{SvZeroDConfig, SvZeroDRunner, is_solver_available};
