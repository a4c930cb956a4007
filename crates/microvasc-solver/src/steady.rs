//! In-memory steady-flow solver.

use indexmap::IndexMap;
use nalgebra::DVector;

use microvasc_core::{BcValues, CircuitModel, NodeId};

use crate::error::Result;
use crate::nodal::NodalSystem;
use crate::results::{BranchSeries, ResultSet};
use crate::solver::ZeroDSolver;

/// Steady nodal-pressure solver for purely resistive models.
///
/// Each vessel stamps its hydraulic conductance between its end nodes.
/// Inflow boundary conditions inject their prescribed flow at the attached
/// node; outflow boundary conditions connect the attached node to the distal
/// reference through the outlet resistance, with the distal pressure folded
/// into the source vector. Junction elements need no stamp of their own: a
/// junction is pressure continuity at its node, which nodal analysis gives
/// for free.
///
/// The steady solution is replicated across the model's configured time
/// points so steady and time-series extraction see the same shapes as a
/// transient run would produce.
#[derive(Debug, Clone, Copy, Default)]
pub struct SteadySolver;

impl SteadySolver {
    pub fn new() -> Self {
        Self
    }

    /// Index every distinct vessel end node, then solve for its pressure.
    fn solve_pressures(model: &CircuitModel) -> Result<(IndexMap<NodeId, usize>, DVector<f64>)> {
        let mut index: IndexMap<NodeId, usize> = IndexMap::new();
        for vessel in model.vessels() {
            for node in [vessel.node_from, vessel.node_to] {
                let next = index.len();
                index.entry(node).or_insert(next);
            }
        }

        let mut system = NodalSystem::new(index.len());
        for vessel in model.vessels() {
            let i = index[&vessel.node_from];
            let j = index[&vessel.node_to];
            system.stamp_conductance(Some(i), Some(j), 1.0 / vessel.resistance);
        }

        for bc in model.boundary_conditions() {
            // Boundary nodes are always vessel ends, so the lookup succeeds
            // for any model the builder produced.
            let Some(&i) = index.get(&bc.node) else {
                log::warn!("boundary condition {} at unknown node {}", bc.name, bc.node);
                continue;
            };
            match bc.values {
                BcValues::Flow { q } => {
                    system.stamp_flow_source(None, Some(i), q);
                }
                BcValues::Resistance { r, distal_pressure } => {
                    let g = 1.0 / r;
                    system.stamp_conductance(Some(i), None, g);
                    system.stamp_flow_source(None, Some(i), distal_pressure * g);
                }
            }
        }

        let pressures = system.solve()?;
        Ok((index, pressures))
    }
}

impl ZeroDSolver for SteadySolver {
    fn simulate(&self, model: &CircuitModel) -> Result<ResultSet> {
        let (index, pressures) = Self::solve_pressures(model)?;

        let sim = model.simulation();
        let n = sim.num_timepoints().max(1);
        let total = sim.total_time();
        let times = DVector::from_fn(n, |k, _| {
            if n == 1 {
                0.0
            } else {
                total * k as f64 / (n - 1) as f64
            }
        });

        let mut results = ResultSet::new(times);
        for vessel in model.vessels() {
            let p_in = pressures[index[&vessel.node_from]];
            let p_out = pressures[index[&vessel.node_to]];
            let flow = (p_in - p_out) / vessel.resistance;
            results.insert(
                vessel.id,
                BranchSeries {
                    pressure_in: DVector::from_element(n, p_in),
                    pressure_out: DVector::from_element(n, p_out),
                    flow_in: DVector::from_element(n, flow),
                },
            );
        }

        results.check_coverage(model)?;
        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use microvasc_core::{BloodVessel, BoundaryCondition, SimulationParameters, VesselId};

    use crate::error::Error;

    fn vessel(id: u32, from: u32, to: u32, resistance: f64) -> BloodVessel {
        BloodVessel::new(
            VesselId::new(id),
            format!("branch{id}_seg0"),
            NodeId::new(from),
            NodeId::new(to),
            0.02,
            0.003,
            resistance,
        )
    }

    fn model(
        vessels: Vec<BloodVessel>,
        boundary_conditions: Vec<BoundaryCondition>,
    ) -> CircuitModel {
        let n = vessels.len();
        CircuitModel::new(
            format!("{n}-segments"),
            vessels,
            Vec::new(),
            boundary_conditions,
            SimulationParameters::default(),
        )
    }

    #[test]
    fn test_single_vessel() {
        // q = 10 into node 1, vessel R = 1e5 to node 2, outlet Rd = 100 to
        // the reference at Pd = 0:
        //   p2 = q * Rd = 1000
        //   p1 = p2 + q * R = 1_001_000
        let m = model(
            vec![vessel(0, 1, 2, 1.0e5)],
            vec![
                BoundaryCondition::flow("INFLOW_1", NodeId::new(1), 10.0),
                BoundaryCondition::resistance("OUT_2", NodeId::new(2), 100.0, 0.0),
            ],
        );

        let results = SteadySolver::new().simulate(&m).unwrap();
        let branch = results.branch(VesselId::new(0)).unwrap();

        assert_eq!(results.num_timepoints(), 100);
        assert!((branch.pressure_in[0] - 1_001_000.0).abs() < 1e-6);
        assert!((branch.pressure_out[0] - 1_000.0).abs() < 1e-6);
        assert!((branch.flow_in[0] - 10.0).abs() < 1e-9);
        // Constant in time.
        assert_eq!(branch.flow_in[99], branch.flow_in[0]);
        assert!((results.times()[99] - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_series_chain_conserves_flow() {
        //   INFLOW --> 1 ==v0== 2 ==v1== 3 --> OUT
        let m = model(
            vec![vessel(0, 1, 2, 2.0e5), vessel(1, 2, 3, 2.0e5)],
            vec![
                BoundaryCondition::flow("INFLOW_1", NodeId::new(1), 10.0),
                BoundaryCondition::resistance("OUT_3", NodeId::new(3), 100.0, 0.0),
            ],
        );

        let results = SteadySolver::new().simulate(&m).unwrap();
        let b0 = results.branch(VesselId::new(0)).unwrap();
        let b1 = results.branch(VesselId::new(1)).unwrap();

        assert!((b0.flow_in[0] - 10.0).abs() < 1e-9);
        assert!((b1.flow_in[0] - 10.0).abs() < 1e-9);
        // Pressure drop across each vessel is q * R = 2e6.
        assert!((b0.pressure_in[0] - b0.pressure_out[0] - 2.0e6).abs() < 1e-5);
        // Shared node pressures agree across vessels.
        assert!((b0.pressure_out[0] - b1.pressure_in[0]).abs() < 1e-9);
    }

    #[test]
    fn test_bifurcation_splits_flow() {
        // Equal daughter resistances halve the inflow.
        let m = model(
            vec![
                vessel(0, 1, 2, 1.0e5),
                vessel(1, 2, 3, 4.0e5),
                vessel(2, 2, 4, 4.0e5),
            ],
            vec![
                BoundaryCondition::flow("INFLOW_1", NodeId::new(1), 10.0),
                BoundaryCondition::resistance("OUT_3", NodeId::new(3), 100.0, 0.0),
                BoundaryCondition::resistance("OUT_4", NodeId::new(4), 100.0, 0.0),
            ],
        );

        let results = SteadySolver::new().simulate(&m).unwrap();
        let q1 = results.branch(VesselId::new(1)).unwrap().flow_in[0];
        let q2 = results.branch(VesselId::new(2)).unwrap().flow_in[0];

        assert!((q1 - 5.0).abs() < 1e-9);
        assert!((q2 - 5.0).abs() < 1e-9);
    }

    #[test]
    fn test_distal_pressure_offsets_outlet() {
        let pd = 50_000.0;
        let m = model(
            vec![vessel(0, 1, 2, 1.0e5)],
            vec![
                BoundaryCondition::flow("INFLOW_1", NodeId::new(1), 10.0),
                BoundaryCondition::resistance("OUT_2", NodeId::new(2), 100.0, pd),
            ],
        );

        let results = SteadySolver::new().simulate(&m).unwrap();
        let branch = results.branch(VesselId::new(0)).unwrap();

        // p2 = Pd + q * Rd
        assert!((branch.pressure_out[0] - (pd + 1000.0)).abs() < 1e-6);
        assert!((branch.flow_in[0] - 10.0).abs() < 1e-9);
    }

    #[test]
    fn test_no_outlet_is_singular() {
        let m = model(
            vec![vessel(0, 1, 2, 1.0e5)],
            vec![BoundaryCondition::flow("INFLOW_1", NodeId::new(1), 10.0)],
        );

        assert!(matches!(
            SteadySolver::new().simulate(&m),
            Err(Error::SingularSystem)
        ));
    }
}
