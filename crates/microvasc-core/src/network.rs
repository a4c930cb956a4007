//! Vessel network representation loaded from measurement files.

use std::fmt;

use indexmap::IndexSet;

use crate::length::LengthLaw;
use crate::node::NodeId;

/// Unique identifier for a vessel segment.
///
/// Assigned as the row ordinal (0-based) of the segment in the source file
/// and stable for the lifetime of the network and every model built from it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VesselId(pub(crate) u32);

impl VesselId {
    /// Create a new VesselId from a raw value.
    pub fn new(id: u32) -> Self {
        VesselId(id)
    }

    /// Get the raw vessel ID value.
    pub fn as_u32(self) -> u32 {
        self.0
    }

    /// The vessel's position in row-ordered collections.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for VesselId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A measured vessel segment: one edge of the network graph.
#[derive(Debug, Clone)]
pub struct Segment {
    /// Stable segment identifier (row ordinal).
    pub id: VesselId,
    /// Segment name from the data file.
    pub name: String,
    /// Upstream end node.
    pub node_from: NodeId,
    /// Downstream end node.
    pub node_to: NodeId,
    /// Measured diameter in mm.
    pub diameter: f64,
    /// Length in mm. Absent until measured or estimated from diameter.
    pub length: Option<f64>,
}

impl Segment {
    /// Create a new segment without a length.
    pub fn new(
        id: VesselId,
        name: impl Into<String>,
        node_from: NodeId,
        node_to: NodeId,
        diameter: f64,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            node_from,
            node_to,
            diameter,
            length: None,
        }
    }
}

/// The set of node IDs designated as network inlets/outlets.
///
/// Iteration order is insertion (file) order.
#[derive(Debug, Clone, Default)]
pub struct BoundaryNodes {
    nodes: IndexSet<NodeId>,
}

impl BoundaryNodes {
    /// Create an empty boundary-node set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a node to the set. Returns false if it was already present.
    pub fn insert(&mut self, node: NodeId) -> bool {
        self.nodes.insert(node)
    }

    /// Check whether a node is a boundary node.
    pub fn contains(&self, node: NodeId) -> bool {
        self.nodes.contains(&node)
    }

    /// Iterate over boundary nodes in file order.
    pub fn iter(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.iter().copied()
    }

    /// Number of boundary nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the set is empty.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

impl FromIterator<NodeId> for BoundaryNodes {
    fn from_iter<I: IntoIterator<Item = NodeId>>(iter: I) -> Self {
        Self {
            nodes: iter.into_iter().collect(),
        }
    }
}

/// A vessel network: segments plus designated boundary nodes.
#[derive(Debug, Clone)]
pub struct Network {
    /// Title line from the data file.
    title: String,
    /// Vessel count declared on the title line. Informational only; never
    /// checked against the actual number of parsed segments.
    declared_count: usize,
    segments: Vec<Segment>,
    boundary: BoundaryNodes,
}

impl Network {
    /// Create a network from parsed parts.
    pub fn new(
        title: impl Into<String>,
        declared_count: usize,
        segments: Vec<Segment>,
        boundary: BoundaryNodes,
    ) -> Self {
        Self {
            title: title.into(),
            declared_count,
            segments,
            boundary,
        }
    }

    /// The title line of the source file.
    pub fn title(&self) -> &str {
        &self.title
    }

    /// The vessel count declared on the title line.
    pub fn declared_count(&self) -> usize {
        self.declared_count
    }

    /// All segments in row order.
    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Look up a segment by ID.
    pub fn segment(&self, id: VesselId) -> Option<&Segment> {
        self.segments.get(id.index()).filter(|s| s.id == id)
    }

    /// The designated boundary-node set.
    pub fn boundary_nodes(&self) -> &BoundaryNodes {
        &self.boundary
    }

    /// Number of segments actually parsed.
    pub fn num_segments(&self) -> usize {
        self.segments.len()
    }

    /// Fill in missing segment lengths from the given diameter law.
    ///
    /// Segments that already carry a length are left untouched, so repeated
    /// calls are no-ops. Returns the number of lengths estimated.
    pub fn fill_lengths(&mut self, law: &LengthLaw) -> usize {
        let mut filled = 0;
        for seg in &mut self.segments {
            if seg.length.is_none() {
                seg.length = Some(law.length_for(seg.diameter));
                filled += 1;
            }
        }
        filled
    }
}
