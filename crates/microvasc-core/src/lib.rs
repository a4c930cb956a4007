//! Core vessel-network and hydraulic-circuit structures for microvasc.
//!
//! This crate provides the data model for measured microvascular networks
//! (segments, boundary nodes), the topology classification that splits nodes
//! into junctions and boundary-condition sites, and the builder that turns a
//! classified network into a zero-dimensional hydraulic circuit model.

pub mod builder;
pub mod circuit;
pub mod config;
pub mod element;
pub mod error;
pub mod length;
pub mod network;
pub mod node;
pub mod topology;
pub mod units;

pub use builder::{BoundaryDefaults, BuildConfig, build_circuit};
pub use circuit::{CircuitModel, SimulationParameters};
pub use config::ConfigDocument;
pub use element::{BcValues, BloodVessel, BoundaryCondition, Junction};
pub use error::{Error, Result};
pub use length::LengthLaw;
pub use network::{BoundaryNodes, Network, Segment, VesselId};
pub use node::NodeId;
pub use topology::{Topology, VesselEnd};
