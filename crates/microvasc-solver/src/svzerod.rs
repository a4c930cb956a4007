//! svZeroDSolver process runner.
//!
//! This module handles invoking an svZeroD-compatible solver binary as a
//! subprocess: the circuit model is serialized to a JSON config, the solver
//! writes per-branch results as CSV, and the CSV is parsed back into a
//! [`ResultSet`].

use std::io::Write;
use std::process::{Command, Stdio};

use indexmap::IndexMap;
use nalgebra::DVector;
use tempfile::NamedTempFile;

use microvasc_core::{CircuitModel, ConfigDocument};

use crate::error::{Error, Result};
use crate::results::{BranchSeries, ResultSet};
use crate::solver::ZeroDSolver;

/// Configuration for the svZeroDSolver runner.
#[derive(Debug, Clone)]
pub struct SvZeroDConfig {
    /// Path to the solver executable (default: "svzerodsolver" in PATH).
    pub executable: String,
}

impl Default for SvZeroDConfig {
    fn default() -> Self {
        Self {
            executable: "svzerodsolver".to_string(),
        }
    }
}

/// Check if the solver binary is available.
pub fn is_solver_available(config: &SvZeroDConfig) -> bool {
    Command::new(&config.executable)
        .arg("--version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|s| s.success())
        .unwrap_or(false)
}

/// Get the solver version string.
pub fn solver_version(config: &SvZeroDConfig) -> Result<String> {
    let output = Command::new(&config.executable)
        .arg("--version")
        .output()
        .map_err(|e| Error::ExecutableNotFound(e.to_string()))?;

    if !output.status.success() {
        return Err(Error::ExecutableNotFound("--version failed".to_string()));
    }

    let version = String::from_utf8_lossy(&output.stdout);
    Ok(version.lines().next().unwrap_or("unknown").to_string())
}

/// Runs circuit models through an external svZeroD-compatible solver.
///
/// The subprocess call blocks until the solver exits; no timeout is applied.
#[derive(Debug, Clone, Default)]
pub struct SvZeroDRunner {
    config: SvZeroDConfig,
}

impl SvZeroDRunner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a specific solver binary instead of searching PATH.
    pub fn with_executable(executable: impl Into<String>) -> Self {
        Self {
            config: SvZeroDConfig {
                executable: executable.into(),
            },
        }
    }

    pub fn config(&self) -> &SvZeroDConfig {
        &self.config
    }

    /// Run the model through the solver and parse its CSV output.
    pub fn run(&self, model: &CircuitModel) -> Result<ResultSet> {
        let json = ConfigDocument::from_model(model).to_json_string()?;

        let mut config_file =
            NamedTempFile::new().map_err(|e| Error::TempFile(e.to_string()))?;
        config_file
            .write_all(json.as_bytes())
            .map_err(|e| Error::TempFile(e.to_string()))?;

        let csv_file = NamedTempFile::new().map_err(|e| Error::TempFile(e.to_string()))?;

        // Usage: svzerodsolver <config.json> <output.csv>
        let output = Command::new(&self.config.executable)
            .arg(config_file.path())
            .arg(csv_file.path())
            .output()
            .map_err(|e| Error::ExecutableNotFound(e.to_string()))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let stdout = String::from_utf8_lossy(&output.stdout);
            return Err(Error::ExecutionFailed(format!(
                "solver exited with {}\nstderr: {stderr}\nstdout: {stdout}",
                output.status
            )));
        }

        let csv = std::fs::read_to_string(csv_file.path())
            .map_err(|e| Error::OutputParse(format!("failed to read results: {e}")))?;

        if csv.trim().is_empty() {
            return Err(Error::OutputParse(
                "solver produced empty output".to_string(),
            ));
        }

        let results = parse_result_csv(&csv, model)?;
        results.check_coverage(model)?;
        Ok(results)
    }
}

impl ZeroDSolver for SvZeroDRunner {
    fn simulate(&self, model: &CircuitModel) -> Result<ResultSet> {
        self.run(model)
    }
}

#[derive(Default)]
struct SeriesColumns {
    times: Vec<f64>,
    pressure_in: Vec<f64>,
    pressure_out: Vec<f64>,
    flow_in: Vec<f64>,
}

/// Parse svZeroDSolver CSV output into per-vessel series.
///
/// The header row locates columns by name, so extra columns (flow_out, etc.)
/// and reordering are tolerated. Rows are grouped by branch name; every
/// branch must cover the same time points.
pub fn parse_result_csv(csv: &str, model: &CircuitModel) -> Result<ResultSet> {
    let mut lines = csv.lines();
    let header = lines
        .next()
        .ok_or_else(|| Error::OutputParse("empty results".to_string()))?;
    let columns: Vec<&str> = header.split(',').map(str::trim).collect();

    let name_col = find_column(&columns, "name")?;
    let time_col = find_column(&columns, "time")?;
    let flow_col = find_column(&columns, "flow_in")?;
    let p_in_col = find_column(&columns, "pressure_in")?;
    let p_out_col = find_column(&columns, "pressure_out")?;

    let mut groups: IndexMap<String, SeriesColumns> = IndexMap::new();
    for (idx, line) in lines.enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        // Header is line 1, first data row is line 2.
        let lineno = idx + 2;
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() < columns.len() {
            return Err(Error::OutputParse(format!(
                "row {lineno}: expected {} fields, found {}",
                columns.len(),
                fields.len()
            )));
        }

        let entry = groups.entry(fields[name_col].to_string()).or_default();
        entry.times.push(parse_field(fields[time_col], "time", lineno)?);
        entry
            .flow_in
            .push(parse_field(fields[flow_col], "flow_in", lineno)?);
        entry
            .pressure_in
            .push(parse_field(fields[p_in_col], "pressure_in", lineno)?);
        entry
            .pressure_out
            .push(parse_field(fields[p_out_col], "pressure_out", lineno)?);
    }

    let Some(first) = groups.first() else {
        return Err(Error::OutputParse("no data rows".to_string()));
    };
    let num_timepoints = first.1.times.len();
    let times = DVector::from_vec(first.1.times.clone());

    let mut results = ResultSet::new(times);
    for (name, series) in &groups {
        let vessel = model.vessel_by_name(name).ok_or_else(|| {
            Error::OutputParse(format!("unknown vessel name {name:?} in results"))
        })?;
        if series.times.len() != num_timepoints {
            return Err(Error::OutputParse(format!(
                "vessel {name} has {} time points, expected {num_timepoints}",
                series.times.len()
            )));
        }
        results.insert(
            vessel.id,
            BranchSeries {
                pressure_in: DVector::from_vec(series.pressure_in.clone()),
                pressure_out: DVector::from_vec(series.pressure_out.clone()),
                flow_in: DVector::from_vec(series.flow_in.clone()),
            },
        );
    }

    Ok(results)
}

fn find_column(columns: &[&str], name: &str) -> Result<usize> {
    columns
        .iter()
        .position(|c| *c == name)
        .ok_or_else(|| Error::OutputParse(format!("missing column {name:?} in results header")))
}

fn parse_field(raw: &str, column: &str, lineno: usize) -> Result<f64> {
    raw.parse()
        .map_err(|_| Error::OutputParse(format!("row {lineno}: invalid {column} value {raw:?}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use microvasc_core::{
        BloodVessel, BoundaryNodes, BuildConfig, LengthLaw, Network, NodeId, Segment,
        SimulationParameters, VesselId, build_circuit,
    };

    fn two_vessel_model() -> CircuitModel {
        let vessels = vec![
            BloodVessel::new(
                VesselId::new(0),
                "branch0_seg0",
                NodeId::new(1),
                NodeId::new(2),
                0.02,
                0.004,
                1.0e6,
            ),
            BloodVessel::new(
                VesselId::new(1),
                "branch1_seg0",
                NodeId::new(2),
                NodeId::new(3),
                0.02,
                0.002,
                2.0e6,
            ),
        ];
        CircuitModel::new(
            "2-segments",
            vessels,
            Vec::new(),
            Vec::new(),
            SimulationParameters::default(),
        )
    }

    #[test]
    fn test_default_config() {
        let config = SvZeroDConfig::default();
        assert_eq!(config.executable, "svzerodsolver");
    }

    #[test]
    fn test_parse_result_csv() {
        let model = two_vessel_model();
        // Interleaved rows and an extra flow_out column, as the real solver
        // writes them.
        let csv = "name,time,flow_in,flow_out,pressure_in,pressure_out\n\
                   branch0_seg0,0.0,2.0,2.0,100.0,50.0\n\
                   branch1_seg0,0.0,2.0,2.0,50.0,10.0\n\
                   branch0_seg0,0.5,4.0,4.0,200.0,100.0\n\
                   branch1_seg0,0.5,4.0,4.0,100.0,20.0\n";

        let results = parse_result_csv(csv, &model).unwrap();
        assert_eq!(results.num_timepoints(), 2);
        assert_eq!(results.num_branches(), 2);
        assert_eq!(results.times()[1], 0.5);

        let b0 = results.branch(VesselId::new(0)).unwrap();
        assert_eq!(b0.pressure_in[1], 200.0);
        assert_eq!(b0.flow_in[0], 2.0);
        let b1 = results.branch(VesselId::new(1)).unwrap();
        assert_eq!(b1.pressure_out[1], 20.0);
    }

    #[test]
    fn test_parse_missing_column() {
        let model = two_vessel_model();
        let csv = "name,time,flow_in,pressure_in\n\
                   branch0_seg0,0.0,2.0,100.0\n";
        let err = parse_result_csv(csv, &model).unwrap_err();
        assert!(matches!(err, Error::OutputParse(_)));
        assert!(err.to_string().contains("pressure_out"));
    }

    #[test]
    fn test_parse_bad_number() {
        let model = two_vessel_model();
        let csv = "name,time,flow_in,pressure_in,pressure_out\n\
                   branch0_seg0,0.0,oops,100.0,50.0\n";
        let err = parse_result_csv(csv, &model).unwrap_err();
        assert!(err.to_string().contains("flow_in"));
        assert!(err.to_string().contains("row 2"));
    }

    #[test]
    fn test_parse_unknown_vessel_name() {
        let model = two_vessel_model();
        let csv = "name,time,flow_in,pressure_in,pressure_out\n\
                   branch7_seg0,0.0,2.0,100.0,50.0\n";
        let err = parse_result_csv(csv, &model).unwrap_err();
        assert!(err.to_string().contains("branch7_seg0"));
    }

    #[test]
    fn test_parse_ragged_groups() {
        let model = two_vessel_model();
        let csv = "name,time,flow_in,pressure_in,pressure_out\n\
                   branch0_seg0,0.0,2.0,100.0,50.0\n\
                   branch0_seg0,0.5,4.0,200.0,100.0\n\
                   branch1_seg0,0.0,2.0,50.0,10.0\n";
        let err = parse_result_csv(csv, &model).unwrap_err();
        assert!(err.to_string().contains("time points"));
    }

    #[test]
    fn test_coverage_failure_on_partial_output() {
        let model = two_vessel_model();
        let csv = "name,time,flow_in,pressure_in,pressure_out\n\
                   branch0_seg0,0.0,2.0,100.0,50.0\n";
        let results = parse_result_csv(csv, &model).unwrap();
        assert!(matches!(
            results.check_coverage(&model),
            Err(Error::IncompleteCoverage { .. })
        ));
    }

    #[test]
    #[ignore] // Requires svzerodsolver to be installed
    fn test_run_bifurcation() {
        let runner = SvZeroDRunner::new();
        if !is_solver_available(runner.config()) {
            return;
        }

        let segments = vec![
            Segment::new(VesselId::new(0), "Seg0", NodeId::new(1), NodeId::new(2), 0.02),
            Segment::new(VesselId::new(1), "Seg1", NodeId::new(2), NodeId::new(3), 0.015),
            Segment::new(VesselId::new(2), "Seg2", NodeId::new(2), NodeId::new(4), 0.015),
        ];
        let boundary: BoundaryNodes =
            [NodeId::new(1), NodeId::new(3), NodeId::new(4)].into_iter().collect();
        let mut network = Network::new("RAT MESENTERY 3", 3, segments, boundary);
        network.fill_lengths(&LengthLaw::default());

        let model = build_circuit(&network, &BuildConfig::default()).unwrap();
        let results = runner.run(&model).unwrap();
        assert_eq!(results.num_branches(), 3);
        // Inlet pressure exceeds outlet pressure along the feeding vessel.
        let b0 = results.branch(VesselId::new(0)).unwrap();
        assert!(b0.pressure_in.mean() > b0.pressure_out.mean());
    }
}
