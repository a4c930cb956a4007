//! Assembled zero-dimensional circuit model.

use crate::element::{BloodVessel, BoundaryCondition, Junction};
use crate::network::VesselId;

/// Global simulation parameters carried by every model.
#[derive(Debug, Clone, Copy)]
pub struct SimulationParameters {
    /// Blood density in g/cm^3.
    pub density: f64,
    /// Dynamic viscosity in poise (dyn·s/cm^2).
    pub viscosity: f64,
    /// Number of cardiac cycles to simulate.
    pub cardiac_cycles: u32,
    /// Time points per cardiac cycle.
    pub time_pts_per_cycle: u32,
}

impl SimulationParameters {
    /// Nominal cardiac cycle period in seconds, used for steady waveforms.
    pub const CYCLE_PERIOD: f64 = 1.0;

    /// Total number of output time points.
    pub fn num_timepoints(&self) -> usize {
        (self.cardiac_cycles * self.time_pts_per_cycle) as usize
    }

    /// Total simulated time in seconds.
    pub fn total_time(&self) -> f64 {
        f64::from(self.cardiac_cycles) * Self::CYCLE_PERIOD
    }
}

impl Default for SimulationParameters {
    fn default() -> Self {
        Self {
            density: 1.06,
            viscosity: 0.04,
            cardiac_cycles: 1,
            time_pts_per_cycle: 100,
        }
    }
}

/// Complete zero-dimensional hydraulic circuit model of a vessel network.
///
/// Built once by the circuit builder and read-only afterwards. Vessels are
/// stored in ascending vessel-ID order.
#[derive(Debug, Clone)]
pub struct CircuitModel {
    name: String,
    vessels: Vec<BloodVessel>,
    junctions: Vec<Junction>,
    boundary_conditions: Vec<BoundaryCondition>,
    simulation: SimulationParameters,
}

impl CircuitModel {
    /// Assemble a model from its parts. Vessels must be in ascending ID order.
    pub fn new(
        name: impl Into<String>,
        vessels: Vec<BloodVessel>,
        junctions: Vec<Junction>,
        boundary_conditions: Vec<BoundaryCondition>,
        simulation: SimulationParameters,
    ) -> Self {
        Self {
            name: name.into(),
            vessels,
            junctions,
            boundary_conditions,
            simulation,
        }
    }

    /// The model name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All vessels in ascending vessel-ID order.
    pub fn vessels(&self) -> &[BloodVessel] {
        &self.vessels
    }

    /// Look up a vessel by ID.
    pub fn vessel(&self, id: VesselId) -> Option<&BloodVessel> {
        self.vessels.get(id.index()).filter(|v| v.id == id)
    }

    /// Look up a vessel by element name.
    pub fn vessel_by_name(&self, name: &str) -> Option<&BloodVessel> {
        self.vessels.iter().find(|v| v.name == name)
    }

    /// All junction elements.
    pub fn junctions(&self) -> &[Junction] {
        &self.junctions
    }

    /// All boundary conditions.
    pub fn boundary_conditions(&self) -> &[BoundaryCondition] {
        &self.boundary_conditions
    }

    /// Look up a boundary condition by name.
    pub fn boundary_condition(&self, name: &str) -> Option<&BoundaryCondition> {
        self.boundary_conditions.iter().find(|bc| bc.name == name)
    }

    /// Global simulation parameters.
    pub fn simulation(&self) -> &SimulationParameters {
        &self.simulation
    }

    /// Number of vessels.
    pub fn num_vessels(&self) -> usize {
        self.vessels.len()
    }

    /// Number of junctions.
    pub fn num_junctions(&self) -> usize {
        self.junctions.len()
    }
}
