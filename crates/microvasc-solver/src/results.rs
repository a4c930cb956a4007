//! Per-vessel simulation result series.

use indexmap::IndexMap;
use nalgebra::DVector;

use microvasc_core::{CircuitModel, VesselId};

use crate::error::{Error, Result};

/// Time series for one vessel.
///
/// All vectors have the same length as the owning [`ResultSet`]'s time axis.
#[derive(Debug, Clone)]
pub struct BranchSeries {
    /// Pressure at the vessel inlet, barye.
    pub pressure_in: DVector<f64>,
    /// Pressure at the vessel outlet, barye.
    pub pressure_out: DVector<f64>,
    /// Flow into the vessel, cm^3/s.
    pub flow_in: DVector<f64>,
}

/// Simulation output: a shared time axis plus per-vessel series.
///
/// Produced by a solver, consumed by result extraction, and replaced
/// wholesale on re-run.
#[derive(Debug, Clone)]
pub struct ResultSet {
    times: DVector<f64>,
    branches: IndexMap<VesselId, BranchSeries>,
}

impl ResultSet {
    /// Create an empty result set over the given time axis.
    pub fn new(times: DVector<f64>) -> Self {
        Self {
            times,
            branches: IndexMap::new(),
        }
    }

    /// Record the series for a vessel.
    pub fn insert(&mut self, vessel: VesselId, series: BranchSeries) {
        debug_assert_eq!(series.pressure_in.len(), self.times.len());
        debug_assert_eq!(series.pressure_out.len(), self.times.len());
        debug_assert_eq!(series.flow_in.len(), self.times.len());
        self.branches.insert(vessel, series);
    }

    /// The shared time axis, seconds.
    pub fn times(&self) -> &DVector<f64> {
        &self.times
    }

    /// Number of time points.
    pub fn num_timepoints(&self) -> usize {
        self.times.len()
    }

    /// Number of vessels with results.
    pub fn num_branches(&self) -> usize {
        self.branches.len()
    }

    /// Get the series for a vessel, if present.
    pub fn get(&self, vessel: VesselId) -> Option<&BranchSeries> {
        self.branches.get(&vessel)
    }

    /// Get the series for a vessel, failing when it is absent.
    pub fn branch(&self, vessel: VesselId) -> Result<&BranchSeries> {
        self.branches
            .get(&vessel)
            .ok_or(Error::VesselNotFound(vessel))
    }

    /// Verify that every vessel of the model has a series.
    pub fn check_coverage(&self, model: &CircuitModel) -> Result<()> {
        for vessel in model.vessels() {
            if !self.branches.contains_key(&vessel.id) {
                return Err(Error::IncompleteCoverage {
                    vessel: vessel.id,
                    name: vessel.name.clone(),
                });
            }
        }
        Ok(())
    }
}
