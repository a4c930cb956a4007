//! Circuit assembly from a classified network.

use std::f64::consts::PI;

use crate::circuit::{CircuitModel, SimulationParameters};
use crate::element::{BloodVessel, BoundaryCondition, Junction};
use crate::error::{Error, Result};
use crate::network::Network;
use crate::topology::{Topology, VesselEnd};
use crate::units::mm_to_cm;

/// Default magnitudes for generated boundary conditions.
///
/// Real inflow waveforms and outlet impedances are measurement-specific;
/// these stand in until calibrated values are available and can be
/// overridden per run.
#[derive(Debug, Clone, Copy)]
pub struct BoundaryDefaults {
    /// Steady inflow rate prescribed at each network inlet, in cm^3/s.
    pub inflow: f64,
    /// Resistance prescribed at each network outlet, in dyn·s/cm^5.
    pub outflow_resistance: f64,
    /// Distal reference pressure behind each outlet, in barye.
    pub distal_pressure: f64,
}

impl Default for BoundaryDefaults {
    fn default() -> Self {
        Self {
            inflow: 10.0,
            outflow_resistance: 100.0,
            distal_pressure: 0.0,
        }
    }
}

/// Configuration for circuit assembly.
#[derive(Debug, Clone, Copy, Default)]
pub struct BuildConfig {
    /// Global simulation parameters written into the model.
    pub simulation: SimulationParameters,
    /// Magnitudes for generated boundary conditions.
    pub boundaries: BoundaryDefaults,
}

/// Poiseuille resistance of a cylindrical vessel, CGS units.
///
/// `8 * viscosity * length / (pi * diameter^4)` with length and diameter
/// in cm.
pub fn poiseuille_resistance(viscosity: f64, length_cm: f64, diameter_cm: f64) -> f64 {
    8.0 * viscosity * length_cm / (PI * diameter_cm.powi(4))
}

/// Classify the network and build its circuit model in one step.
pub fn build_circuit(network: &Network, config: &BuildConfig) -> Result<CircuitModel> {
    let topology = Topology::classify(network)?;
    build_from_topology(network, &topology, config)
}

/// Build a circuit model from an already-classified network.
///
/// Emits one resistive vessel element per segment, one junction element per
/// retained junction, and one boundary condition per boundary attachment.
/// Every segment must carry a length.
pub fn build_from_topology(
    network: &Network,
    topology: &Topology,
    config: &BuildConfig,
) -> Result<CircuitModel> {
    if network.segments().is_empty() {
        return Err(Error::EmptyNetwork);
    }

    let viscosity = config.simulation.viscosity;
    let mut vessels = Vec::with_capacity(network.num_segments());
    for seg in network.segments() {
        let length_mm = seg.length.ok_or(Error::MissingLength { vessel: seg.id })?;
        let length = mm_to_cm(length_mm);
        let diameter = mm_to_cm(seg.diameter);
        let resistance = poiseuille_resistance(viscosity, length, diameter);
        vessels.push(BloodVessel::new(
            seg.id,
            format!("branch{}_seg0", seg.id.as_u32()),
            seg.node_from,
            seg.node_to,
            length,
            diameter,
            resistance,
        ));
    }

    let defaults = &config.boundaries;
    let mut boundary_conditions = Vec::new();
    for att in topology.inflows() {
        let name = format!("INFLOW_{}", att.node);
        attach(&mut vessels[att.vessel.index()], att.end, &name);
        boundary_conditions.push(BoundaryCondition::flow(name, att.node, defaults.inflow));
    }
    for att in topology.outflows() {
        let name = format!("OUT_{}", att.node);
        attach(&mut vessels[att.vessel.index()], att.end, &name);
        boundary_conditions.push(BoundaryCondition::resistance(
            name,
            att.node,
            defaults.outflow_resistance,
            defaults.distal_pressure,
        ));
    }

    let junctions = topology
        .junctions()
        .iter()
        .map(|(node, branches)| {
            Junction::new(
                format!("J{node}"),
                *node,
                branches.inlets.clone(),
                branches.outlets.clone(),
            )
        })
        .collect();

    log::debug!(
        "built circuit: {} vessels, {} junctions, {} boundary conditions",
        vessels.len(),
        topology.num_junctions(),
        boundary_conditions.len()
    );

    Ok(CircuitModel::new(
        format!("{}-segments", network.declared_count()),
        vessels,
        junctions,
        boundary_conditions,
        config.simulation,
    ))
}

fn attach(vessel: &mut BloodVessel, end: VesselEnd, bc_name: &str) {
    match end {
        VesselEnd::Inlet => vessel.inlet_bc = Some(bc_name.to_string()),
        VesselEnd::Outlet => vessel.outlet_bc = Some(bc_name.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::element::BcValues;
    use crate::length::LengthLaw;
    use crate::network::{BoundaryNodes, Segment, VesselId};
    use crate::node::NodeId;

    fn segment(id: u32, from: u32, to: u32, diameter: f64) -> Segment {
        Segment::new(
            VesselId::new(id),
            format!("s{id}"),
            NodeId::new(from),
            NodeId::new(to),
            diameter,
        )
    }

    fn bifurcation_network() -> Network {
        let segments = vec![
            segment(0, 1, 2, 0.03),
            segment(1, 2, 3, 0.02),
            segment(2, 2, 4, 0.02),
        ];
        let boundary: BoundaryNodes = [1, 3, 4].into_iter().map(NodeId::new).collect();
        let mut network = Network::new("RAT MESENTERY 3", 3, segments, boundary);
        network.fill_lengths(&LengthLaw::default());
        network
    }

    #[test]
    fn test_build_bifurcation() {
        let network = bifurcation_network();
        let model = build_circuit(&network, &BuildConfig::default()).unwrap();

        assert_eq!(model.name(), "3-segments");
        assert_eq!(model.num_vessels(), 3);
        assert_eq!(model.num_junctions(), 1);
        assert_eq!(model.boundary_conditions().len(), 3);

        let j = &model.junctions()[0];
        assert_eq!(j.name, "J2");
        assert_eq!(j.inlet_vessels, vec![VesselId::new(0)]);
        assert_eq!(j.outlet_vessels, vec![VesselId::new(1), VesselId::new(2)]);

        let v0 = model.vessel(VesselId::new(0)).unwrap();
        assert_eq!(v0.name, "branch0_seg0");
        assert_eq!(v0.inlet_bc.as_deref(), Some("INFLOW_1"));
        assert!(v0.outlet_bc.is_none());

        let v1 = model.vessel(VesselId::new(1)).unwrap();
        assert!(v1.inlet_bc.is_none());
        assert_eq!(v1.outlet_bc.as_deref(), Some("OUT_3"));

        let inflow = model.boundary_condition("INFLOW_1").unwrap();
        assert!(inflow.is_flow());
        let out = model.boundary_condition("OUT_4").unwrap();
        assert_eq!(
            out.values,
            BcValues::Resistance {
                r: 100.0,
                distal_pressure: 0.0
            }
        );
    }

    #[test]
    fn test_junctions_have_both_sides() {
        let model = build_circuit(&bifurcation_network(), &BuildConfig::default()).unwrap();
        for j in model.junctions() {
            assert!(!j.inlet_vessels.is_empty());
            assert!(!j.outlet_vessels.is_empty());
        }
    }

    #[test]
    fn test_reference_resistance() {
        // d = 0.02 mm, estimated length, viscosity 0.04 P:
        // R = 8 * 0.04 * 0.01677 / (pi * 0.002^4) ~ 1.0677e8 dyn·s/cm^5
        let segments = vec![segment(0, 1, 2, 0.02)];
        let boundary: BoundaryNodes = [1, 2].into_iter().map(NodeId::new).collect();
        let mut network = Network::new("RAT MESENTERY 1", 1, segments, boundary);
        network.fill_lengths(&LengthLaw::default());

        let model = build_circuit(&network, &BuildConfig::default()).unwrap();
        let r = model.vessels()[0].resistance;
        assert!((r - 1.06767e8).abs() / 1.06767e8 < 1e-4);
    }

    #[test]
    fn test_resistance_monotonicity() {
        // Shrinking diameter at fixed length raises resistance; longer
        // vessels at fixed diameter resist more.
        let r_thin = poiseuille_resistance(0.04, 0.02, 0.002);
        let r_wide = poiseuille_resistance(0.04, 0.02, 0.003);
        assert!(r_thin > r_wide);

        let r_short = poiseuille_resistance(0.04, 0.01, 0.002);
        let r_long = poiseuille_resistance(0.04, 0.02, 0.002);
        assert!(r_long > r_short);
    }

    #[test]
    fn test_missing_length_is_error() {
        let segments = vec![segment(0, 1, 2, 0.02)];
        let boundary: BoundaryNodes = [1, 2].into_iter().map(NodeId::new).collect();
        let network = Network::new("RAT MESENTERY 1", 1, segments, boundary);

        let err = build_circuit(&network, &BuildConfig::default()).unwrap_err();
        assert!(matches!(
            err,
            Error::MissingLength {
                vessel
            } if vessel == VesselId::new(0)
        ));
    }

    #[test]
    fn test_empty_network_is_error() {
        let network = Network::new("RAT MESENTERY 0", 0, Vec::new(), BoundaryNodes::new());
        assert!(matches!(
            build_circuit(&network, &BuildConfig::default()),
            Err(Error::EmptyNetwork)
        ));
    }

    #[test]
    fn test_viscosity_scales_resistance() {
        let network = bifurcation_network();
        let thick = BuildConfig {
            simulation: SimulationParameters {
                viscosity: 0.08,
                ..Default::default()
            },
            ..Default::default()
        };
        let base = build_circuit(&network, &BuildConfig::default()).unwrap();
        let doubled = build_circuit(&network, &thick).unwrap();

        let ratio = doubled.vessels()[0].resistance / base.vessels()[0].resistance;
        assert!((ratio - 2.0).abs() < 1e-12);
    }
}
