//! Error types for microvasc-core.

use thiserror::Error;

use crate::network::VesselId;
use crate::node::NodeId;

#[derive(Debug, Error)]
pub enum Error {
    #[error("boundary node {node} is attached to {count} segment ends, expected exactly one")]
    BoundaryConflict { node: NodeId, count: usize },

    #[error("segment {vessel} has no length; estimate lengths before building")]
    MissingLength { vessel: VesselId },

    #[error("network has no segments")]
    EmptyNetwork,

    #[error("config serialization: {0}")]
    Serialize(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
