//! Export of a circuit model as a zero-d solver configuration document.
//!
//! These types match the svZeroD solver input schema; they are kept separate
//! from the internal model types so the wire format can evolve independently.

use serde::{Deserialize, Serialize};

use crate::circuit::{CircuitModel, SimulationParameters};
use crate::element::BcValues;
use crate::error::Result;

/// Top-level solver configuration document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigDocument {
    /// Global solve settings.
    pub simulation_parameters: SimParamsEntry,
    /// One entry per boundary condition.
    pub boundary_conditions: Vec<BcEntry>,
    /// One entry per junction.
    pub junctions: Vec<JunctionEntry>,
    /// One entry per vessel.
    pub vessels: Vec<VesselEntry>,
}

/// Global solve settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimParamsEntry {
    pub model_name: String,
    pub number_of_cardiac_cycles: u32,
    pub number_of_time_pts_per_cardiac_cycle: u32,
    /// Blood density (g/cm^3).
    pub density: f64,
    /// Dynamic viscosity (poise).
    pub viscosity: f64,
}

/// A boundary condition entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BcEntry {
    pub bc_name: String,
    /// "FLOW" or "RESISTANCE".
    pub bc_type: String,
    pub bc_values: BcValuesEntry,
}

/// Values for a boundary condition; the field set determines the variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum BcValuesEntry {
    /// Prescribed flow waveform over one cycle.
    Flow {
        #[serde(rename = "Q")]
        q: Vec<f64>,
        t: Vec<f64>,
    },
    /// Resistance with distal pressure.
    Resistance {
        #[serde(rename = "R")]
        r: f64,
        #[serde(rename = "Pd")]
        pd: f64,
    },
}

/// A junction entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JunctionEntry {
    pub junction_name: String,
    /// Always "NORMAL_JUNCTION".
    pub junction_type: String,
    pub inlet_vessels: Vec<u32>,
    pub outlet_vessels: Vec<u32>,
}

/// A vessel entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VesselEntry {
    pub vessel_id: u32,
    pub vessel_name: String,
    /// Vessel length (cm).
    pub vessel_length: f64,
    /// Always "BloodVessel".
    pub zero_d_element_type: String,
    pub zero_d_element_values: ElementValuesEntry,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub boundary_conditions: Option<VesselBcEntry>,
}

/// Lumped element values for a vessel.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ElementValuesEntry {
    #[serde(rename = "R_poiseuille")]
    pub r_poiseuille: f64,
    #[serde(rename = "C")]
    pub c: f64,
    #[serde(rename = "L")]
    pub l: f64,
    pub stenosis_coefficient: f64,
}

/// Boundary condition names attached to a vessel's ends.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VesselBcEntry {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inlet: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub outlet: Option<String>,
}

impl ConfigDocument {
    /// Build the export document for a circuit model.
    pub fn from_model(model: &CircuitModel) -> Self {
        let sim = model.simulation();
        let simulation_parameters = SimParamsEntry {
            model_name: model.name().to_string(),
            number_of_cardiac_cycles: sim.cardiac_cycles,
            number_of_time_pts_per_cardiac_cycle: sim.time_pts_per_cycle,
            density: sim.density,
            viscosity: sim.viscosity,
        };

        let boundary_conditions = model
            .boundary_conditions()
            .iter()
            .map(|bc| match bc.values {
                BcValues::Flow { q } => BcEntry {
                    bc_name: bc.name.clone(),
                    bc_type: "FLOW".to_string(),
                    // Steady flow as a two-point constant waveform.
                    bc_values: BcValuesEntry::Flow {
                        q: vec![q, q],
                        t: vec![0.0, SimulationParameters::CYCLE_PERIOD],
                    },
                },
                BcValues::Resistance { r, distal_pressure } => BcEntry {
                    bc_name: bc.name.clone(),
                    bc_type: "RESISTANCE".to_string(),
                    bc_values: BcValuesEntry::Resistance {
                        r,
                        pd: distal_pressure,
                    },
                },
            })
            .collect();

        let junctions = model
            .junctions()
            .iter()
            .map(|j| JunctionEntry {
                junction_name: j.name.clone(),
                junction_type: "NORMAL_JUNCTION".to_string(),
                inlet_vessels: j.inlet_vessels.iter().map(|v| v.as_u32()).collect(),
                outlet_vessels: j.outlet_vessels.iter().map(|v| v.as_u32()).collect(),
            })
            .collect();

        let vessels = model
            .vessels()
            .iter()
            .map(|v| {
                let bcs = if v.inlet_bc.is_some() || v.outlet_bc.is_some() {
                    Some(VesselBcEntry {
                        inlet: v.inlet_bc.clone(),
                        outlet: v.outlet_bc.clone(),
                    })
                } else {
                    None
                };
                VesselEntry {
                    vessel_id: v.id.as_u32(),
                    vessel_name: v.name.clone(),
                    vessel_length: v.length,
                    zero_d_element_type: "BloodVessel".to_string(),
                    zero_d_element_values: ElementValuesEntry {
                        r_poiseuille: v.resistance,
                        c: v.capacitance,
                        l: v.inductance,
                        stenosis_coefficient: v.stenosis_coefficient,
                    },
                    boundary_conditions: bcs,
                }
            })
            .collect();

        Self {
            simulation_parameters,
            boundary_conditions,
            junctions,
            vessels,
        }
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::{BuildConfig, build_circuit};
    use crate::length::LengthLaw;
    use crate::network::{BoundaryNodes, Network, Segment, VesselId};
    use crate::node::NodeId;

    fn model() -> CircuitModel {
        let segments = vec![
            Segment::new(VesselId::new(0), "s0", NodeId::new(1), NodeId::new(2), 0.03),
            Segment::new(VesselId::new(1), "s1", NodeId::new(2), NodeId::new(3), 0.02),
            Segment::new(VesselId::new(2), "s2", NodeId::new(2), NodeId::new(4), 0.02),
        ];
        let boundary: BoundaryNodes = [1, 3, 4].into_iter().map(NodeId::new).collect();
        let mut network = Network::new("RAT MESENTERY 3", 3, segments, boundary);
        network.fill_lengths(&LengthLaw::default());
        build_circuit(&network, &BuildConfig::default()).unwrap()
    }

    #[test]
    fn test_document_sections() {
        let doc = ConfigDocument::from_model(&model());

        assert_eq!(doc.simulation_parameters.model_name, "3-segments");
        assert_eq!(doc.vessels.len(), 3);
        assert_eq!(doc.junctions.len(), 1);
        assert_eq!(doc.boundary_conditions.len(), 3);

        let j = &doc.junctions[0];
        assert_eq!(j.junction_type, "NORMAL_JUNCTION");
        assert_eq!(j.inlet_vessels, vec![0]);
        assert_eq!(j.outlet_vessels, vec![1, 2]);

        let v0 = &doc.vessels[0];
        assert_eq!(v0.zero_d_element_type, "BloodVessel");
        let bcs = v0.boundary_conditions.as_ref().unwrap();
        assert_eq!(bcs.inlet.as_deref(), Some("INFLOW_1"));
        assert!(bcs.outlet.is_none());
    }

    #[test]
    fn test_flow_waveform_is_constant() {
        let doc = ConfigDocument::from_model(&model());
        let inflow = doc
            .boundary_conditions
            .iter()
            .find(|bc| bc.bc_name == "INFLOW_1")
            .unwrap();
        assert_eq!(inflow.bc_type, "FLOW");
        match &inflow.bc_values {
            BcValuesEntry::Flow { q, t } => {
                assert_eq!(q, &vec![10.0, 10.0]);
                assert_eq!(t, &vec![0.0, 1.0]);
            }
            other => panic!("unexpected bc values: {other:?}"),
        }
    }

    #[test]
    fn test_json_field_names() {
        let json = ConfigDocument::from_model(&model()).to_json_string().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert!(value["vessels"][0]["zero_d_element_values"]["R_poiseuille"].is_f64());
        assert!(value["vessels"][0]["zero_d_element_values"]["stenosis_coefficient"].is_f64());
        assert_eq!(value["boundary_conditions"][0]["bc_type"], "FLOW");
        assert!(value["boundary_conditions"][0]["bc_values"]["Q"].is_array());
        assert_eq!(
            value["simulation_parameters"]["number_of_time_pts_per_cardiac_cycle"],
            100
        );
        // Unattached vessel ends carry no boundary_conditions key at all.
        assert!(value["vessels"][0]["boundary_conditions"]["outlet"].is_null());
    }

    #[test]
    fn test_round_trip() {
        let doc = ConfigDocument::from_model(&model());
        let json = doc.to_json_string().unwrap();
        let back: ConfigDocument = serde_json::from_str(&json).unwrap();

        assert_eq!(back.vessels.len(), doc.vessels.len());
        assert_eq!(back.boundary_conditions.len(), doc.boundary_conditions.len());
        match &back.boundary_conditions[0].bc_values {
            BcValuesEntry::Flow { q, .. } => assert_eq!(q.len(), 2),
            other => panic!("unexpected bc values: {other:?}"),
        }
    }
}
