//! Extraction of per-vessel hemodynamic quantities from simulation output.

use std::f64::consts::PI;

use nalgebra::{DMatrix, DVector};

use microvasc_core::{BloodVessel, CircuitModel};

use crate::error::Result;
use crate::results::{BranchSeries, ResultSet};

/// Per-vessel pressure matrices: one row per vessel, one column per retained
/// time point.
#[derive(Debug, Clone)]
pub struct NetworkPressures {
    /// Pressure at each vessel inlet, barye.
    pub inlet: DMatrix<f64>,
    /// Pressure at each vessel outlet, barye.
    pub outlet: DMatrix<f64>,
    /// Midpoint pressure, the mean of inlet and outlet.
    pub mean: DMatrix<f64>,
}

/// Query interface over one simulation run.
///
/// Every returned matrix has one row per vessel, in ascending vessel-ID
/// order over the model's vessel set. With `steady` set, series are averaged
/// over time into a single column; otherwise columns follow the result set's
/// time axis. A vessel missing from the results is an error, never silently
/// skipped.
#[derive(Debug, Clone, Copy)]
pub struct NetworkResults<'a> {
    model: &'a CircuitModel,
    results: &'a ResultSet,
}

impl<'a> NetworkResults<'a> {
    /// Wrap a model and its simulation output.
    pub fn new(model: &'a CircuitModel, results: &'a ResultSet) -> Self {
        Self { model, results }
    }

    /// Inlet, outlet, and mean pressure per vessel.
    pub fn network_pressures(&self, steady: bool) -> Result<NetworkPressures> {
        let inlet = self.series_matrix(steady, |_, b| b.pressure_in.clone())?;
        let outlet = self.series_matrix(steady, |_, b| b.pressure_out.clone())?;
        let mean = (&inlet + &outlet) / 2.0;
        Ok(NetworkPressures {
            inlet,
            outlet,
            mean,
        })
    }

    /// Flow through each vessel, cm^3/s.
    pub fn network_flows(&self, steady: bool) -> Result<DMatrix<f64>> {
        self.series_matrix(steady, |_, b| b.flow_in.clone())
    }

    /// Wall shear stress in each vessel, dyn/cm^2.
    ///
    /// Poiseuille relation: tau = 4 * mu * Q / (pi * r^3), with the vessel
    /// radius in cm and the model's configured viscosity.
    pub fn network_wss(&self, steady: bool) -> Result<DMatrix<f64>> {
        let viscosity = self.model.simulation().viscosity;
        self.series_matrix(steady, |vessel, branch| {
            let r = vessel.radius();
            let scale = 4.0 * viscosity / (PI * r.powi(3));
            branch.flow_in.map(|q| scale * q)
        })
    }

    fn series_matrix<F>(&self, steady: bool, series: F) -> Result<DMatrix<f64>>
    where
        F: Fn(&BloodVessel, &BranchSeries) -> DVector<f64>,
    {
        let num_timepoints = self.results.num_timepoints();
        let num_vessels = self.model.num_vessels();
        let mut matrix = DMatrix::zeros(num_vessels, num_timepoints);

        for (row, vessel) in self.model.vessels().iter().enumerate() {
            let branch = self.results.branch(vessel.id)?;
            let values = series(vessel, branch);
            for (col, value) in values.iter().enumerate() {
                matrix[(row, col)] = *value;
            }
        }

        if steady {
            Ok(time_average(&matrix))
        } else {
            Ok(matrix)
        }
    }
}

/// Collapse a per-vessel series matrix to one time-averaged column.
fn time_average(matrix: &DMatrix<f64>) -> DMatrix<f64> {
    let num_timepoints = matrix.ncols().max(1);
    DMatrix::from_fn(matrix.nrows(), 1, |row, _| {
        matrix.row(row).sum() / num_timepoints as f64
    })
}
