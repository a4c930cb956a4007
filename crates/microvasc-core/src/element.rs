//! Hydraulic circuit elements emitted by the circuit builder.

use crate::network::VesselId;
use crate::node::NodeId;

/// A vessel segment as a lumped resistive element.
#[derive(Debug, Clone)]
pub struct BloodVessel {
    /// Vessel identifier, matching the source segment.
    pub id: VesselId,
    /// Element name (e.g. "branch3_seg0").
    pub name: String,
    /// Upstream end node.
    pub node_from: NodeId,
    /// Downstream end node.
    pub node_to: NodeId,
    /// Vessel length in cm.
    pub length: f64,
    /// Vessel diameter in cm.
    pub diameter: f64,
    /// Poiseuille resistance in dyn·s/cm^5.
    pub resistance: f64,
    /// Lumped compliance. Zero: vessel compliance is not modeled.
    pub capacitance: f64,
    /// Lumped inertance. Zero: flow inertia is not modeled.
    pub inductance: f64,
    /// Stenosis coefficient. Zero: no stenosis model.
    pub stenosis_coefficient: f64,
    /// Boundary condition name at the upstream end, for network inlets.
    pub inlet_bc: Option<String>,
    /// Boundary condition name at the downstream end, for network outlets.
    pub outlet_bc: Option<String>,
}

impl BloodVessel {
    /// Create a purely resistive vessel with no boundary attachments.
    pub fn new(
        id: VesselId,
        name: impl Into<String>,
        node_from: NodeId,
        node_to: NodeId,
        length: f64,
        diameter: f64,
        resistance: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            node_from,
            node_to,
            length,
            diameter,
            resistance,
            capacitance: 0.0,
            inductance: 0.0,
            stenosis_coefficient: 0.0,
            inlet_bc: None,
            outlet_bc: None,
        }
    }

    /// Vessel radius in cm.
    pub fn radius(&self) -> f64 {
        self.diameter / 2.0
    }
}

/// A junction joining vessel downstream ends to vessel upstream ends.
#[derive(Debug, Clone)]
pub struct Junction {
    /// Unique junction name (e.g. "J2").
    pub name: String,
    /// The internal node this junction models.
    pub node: NodeId,
    /// Vessels whose downstream ends feed this junction. Never empty.
    pub inlet_vessels: Vec<VesselId>,
    /// Vessels this junction feeds. Never empty.
    pub outlet_vessels: Vec<VesselId>,
}

impl Junction {
    pub fn new(
        name: impl Into<String>,
        node: NodeId,
        inlet_vessels: Vec<VesselId>,
        outlet_vessels: Vec<VesselId>,
    ) -> Self {
        Self {
            name: name.into(),
            node,
            inlet_vessels,
            outlet_vessels,
        }
    }
}

/// Parameter values for a boundary condition.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BcValues {
    /// Prescribed steady inflow rate in cm^3/s.
    Flow { q: f64 },
    /// Downstream resistance in dyn·s/cm^5 with a distal pressure in barye.
    Resistance { r: f64, distal_pressure: f64 },
}

/// A boundary condition applied at one boundary node.
///
/// Each boundary condition is referenced by exactly one vessel end, through
/// its name.
#[derive(Debug, Clone)]
pub struct BoundaryCondition {
    /// Unique name (e.g. "INFLOW_1", "OUT_4").
    pub name: String,
    /// The boundary node this condition applies at.
    pub node: NodeId,
    /// Condition values; the variant determines the condition type.
    pub values: BcValues,
}

impl BoundaryCondition {
    /// Create a prescribed-flow (inlet) condition.
    pub fn flow(name: impl Into<String>, node: NodeId, q: f64) -> Self {
        Self {
            name: name.into(),
            node,
            values: BcValues::Flow { q },
        }
    }

    /// Create a resistance (outlet) condition.
    pub fn resistance(name: impl Into<String>, node: NodeId, r: f64, distal_pressure: f64) -> Self {
        Self {
            name: name.into(),
            node,
            values: BcValues::Resistance { r, distal_pressure },
        }
    }

    /// Whether this is a prescribed-flow condition.
    pub fn is_flow(&self) -> bool {
        matches!(self.values, BcValues::Flow { .. })
    }
}
