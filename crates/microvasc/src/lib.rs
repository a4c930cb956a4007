//! # Microvasc
//!
//! Reduced-order hemodynamics for measured microvascular networks.
//!
//! Microvasc converts flat-file vessel measurements (the rat-mesentery table
//! format) into a zero-dimensional hydraulic circuit model and derives
//! per-vessel hemodynamics from a simulation of that circuit:
//! - Network file parsing
//! - Junction inference and boundary-condition placement
//! - Poiseuille resistance assembly into a circuit model
//! - Steady in-process solve, or delegation to an external svZeroD binary
//! - Per-vessel pressure, flow, and wall shear stress extraction
//!
//! ## Quick Start
//!
//! ```rust
//! use microvasc::prelude::*;
//!
//! let text = "RAT MESENTERY 2 SEGMENTS\n\
//!             Name\tFrom\tTo\tDiam\n\
//!             SegA\t1\t2\t0.02\n\
//!             SegB\t2\t3\t0.02\n\
//!             boundary_nodes\n\
//!             1\n\
//!             3\n";
//!
//! let mut network = microvasc::parse(text).unwrap();
//! network.fill_lengths(&LengthLaw::default());
//!
//! let model = build_circuit(&network, &BuildConfig::default()).unwrap();
//! let results = SteadySolver::new().simulate(&model).unwrap();
//!
//! let queries = NetworkResults::new(&model, &results);
//! let flows = queries.network_flows(true).unwrap();
//! assert_eq!(flows.nrows(), 2);
//! ```

// Re-export component crates
pub use microvasc_core as core;
pub use microvasc_parser as parser;
pub use microvasc_solver as solver;

// ============================================================================
// Convenient re-exports from microvasc_core
// ============================================================================

pub use microvasc_core::{
    BcValues,
    BloodVessel,
    BoundaryCondition,
    BoundaryDefaults,
    BoundaryNodes,
    // Circuit assembly
    BuildConfig,
    // Circuit model
    CircuitModel,
    // Solver config export
    ConfigDocument,
    // Errors
    Error as CoreError,
    Junction,
    LengthLaw,
    // Network representation
    Network,
    NodeId,
    Segment,
    SimulationParameters,
    // Classification
    Topology,
    VesselEnd,
    VesselId,
    build_circuit,
};

// ============================================================================
// Convenient re-exports from microvasc_parser
// ============================================================================

pub use microvasc_parser::{
    // Errors
    Error as ParseError,
    // Main parse function
    parse,
};

// ============================================================================
// Convenient re-exports from microvasc_solver
// ============================================================================

pub use microvasc_solver::{
    BranchSeries,
    // Errors
    Error as SolverError,
    NetworkPressures,
    // Result extraction
    NetworkResults,
    NodalSystem,
    ResultSet,
    // In-process steady solve
    SteadySolver,
    SvZeroDConfig,
    // External solver
    SvZeroDRunner,
    // Solver capability
    ZeroDSolver,
    is_solver_available,
};

// ============================================================================
// Re-export commonly used external types
// ============================================================================

/// Re-export of nalgebra's dynamic vector type.
pub use nalgebra::DVector;

/// Re-export of nalgebra's dynamic matrix type.
pub use nalgebra::DMatrix;

// ============================================================================
// Prelude module for convenient imports
// ============================================================================

/// Prelude module containing commonly used types and traits.
///
/// ```rust
/// use microvasc::prelude::*;
/// ```
pub mod prelude {
    // Network and circuit types
    pub use crate::{
        BuildConfig, CircuitModel, ConfigDocument, LengthLaw, Network, NodeId, Topology,
        VesselId, build_circuit, parse,
    };

    // Solvers and results
    pub use crate::{NetworkResults, ResultSet, SteadySolver, SvZeroDRunner, ZeroDSolver};

    // Common external types
    pub use crate::{DMatrix, DVector};
}
