//! Node identifiers for the vessel network graph.

use std::fmt;

/// Unique identifier for a node shared by vessel segment ends.
///
/// Node IDs come straight from the data file and are 1-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) u32);

impl NodeId {
    /// Create a new NodeId from a raw value.
    pub fn new(id: u32) -> Self {
        NodeId(id)
    }

    /// Get the raw node ID value.
    pub fn as_u32(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id() {
        let id = NodeId::new(42);
        assert_eq!(id.as_u32(), 42);
        assert_eq!(id.to_string(), "42");
    }

    #[test]
    fn test_node_id_equality() {
        assert_eq!(NodeId::new(3), NodeId::new(3));
        assert_ne!(NodeId::new(3), NodeId::new(4));
    }
}
