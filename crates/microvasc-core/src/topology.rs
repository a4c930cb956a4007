//! Classification of network nodes into junctions and boundary sites.

use indexmap::IndexMap;

use crate::error::{Error, Result};
use crate::network::{Network, VesselId};
use crate::node::NodeId;

/// Which end of a vessel segment an attachment refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VesselEnd {
    /// The upstream (node_from) end.
    Inlet,
    /// The downstream (node_to) end.
    Outlet,
}

/// One boundary-condition site: a boundary node met by exactly one vessel end.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoundaryAttachment {
    /// The boundary node.
    pub node: NodeId,
    /// The vessel touching it.
    pub vessel: VesselId,
    /// Which end of the vessel touches it.
    pub end: VesselEnd,
}

/// Branch lists accumulated for one internal node.
#[derive(Debug, Clone, Default)]
pub struct JunctionBranches {
    /// Segments whose downstream end meets this node.
    pub inlets: Vec<VesselId>,
    /// Segments whose upstream end leaves this node.
    pub outlets: Vec<VesselId>,
}

/// An internal node discarded for having branches on only one side.
///
/// A one-sided node means a dangling vessel end: either the measurement is
/// truncated there or the node should have been listed as a boundary node.
#[derive(Debug, Clone)]
pub struct PrunedNode {
    /// The discarded node.
    pub node: NodeId,
    /// Segments that ended at it.
    pub inlets: Vec<VesselId>,
    /// Segments that started at it.
    pub outlets: Vec<VesselId>,
}

/// Classified topology of a network: junctions, boundary sites, pruned nodes.
#[derive(Debug, Clone)]
pub struct Topology {
    junctions: IndexMap<NodeId, JunctionBranches>,
    inflows: Vec<BoundaryAttachment>,
    outflows: Vec<BoundaryAttachment>,
    pruned: Vec<PrunedNode>,
}

impl Topology {
    /// Classify every node of the network.
    ///
    /// Candidate junctions are seeded over the node-ID range
    /// `[1, max(node_from)]`; the source format numbers nodes so that every
    /// internal node appears as some segment's node_from. For each segment in
    /// row order, each end either attaches a boundary condition (when the end
    /// node is in the boundary set) or extends the candidate's branch lists.
    /// Candidates left with branches on only one side are pruned and reported.
    ///
    /// Fails if any boundary node is attached to more than one segment end:
    /// its boundary condition could not be referenced by exactly one vessel.
    pub fn classify(network: &Network) -> Result<Topology> {
        let max_from = network
            .segments()
            .iter()
            .map(|s| s.node_from.as_u32())
            .max()
            .unwrap_or(0);

        let mut candidates: IndexMap<NodeId, JunctionBranches> = (1..=max_from)
            .map(|id| (NodeId::new(id), JunctionBranches::default()))
            .collect();

        let mut inflows: Vec<BoundaryAttachment> = Vec::new();
        let mut outflows: Vec<BoundaryAttachment> = Vec::new();
        let mut pruned: Vec<PrunedNode> = Vec::new();
        let boundary = network.boundary_nodes();

        for seg in network.segments() {
            if boundary.contains(seg.node_from) {
                inflows.push(BoundaryAttachment {
                    node: seg.node_from,
                    vessel: seg.id,
                    end: VesselEnd::Inlet,
                });
            } else if let Some(branches) = candidates.get_mut(&seg.node_from) {
                branches.outlets.push(seg.id);
            } else {
                // node_from outside the 1-based candidate range.
                pruned.push(PrunedNode {
                    node: seg.node_from,
                    inlets: Vec::new(),
                    outlets: vec![seg.id],
                });
            }

            if boundary.contains(seg.node_to) {
                outflows.push(BoundaryAttachment {
                    node: seg.node_to,
                    vessel: seg.id,
                    end: VesselEnd::Outlet,
                });
            } else if let Some(branches) = candidates.get_mut(&seg.node_to) {
                branches.inlets.push(seg.id);
            } else {
                // node_to above the candidate range and not a boundary node:
                // nothing can ever leave it.
                pruned.push(PrunedNode {
                    node: seg.node_to,
                    inlets: vec![seg.id],
                    outlets: Vec::new(),
                });
            }
        }

        check_boundary_usage(network, &inflows, &outflows)?;

        let mut junctions = IndexMap::new();
        for (node, branches) in candidates {
            if branches.inlets.is_empty() && branches.outlets.is_empty() {
                // Node ID never referenced by any segment end; not a node.
                continue;
            }
            if branches.inlets.is_empty() || branches.outlets.is_empty() {
                pruned.push(PrunedNode {
                    node,
                    inlets: branches.inlets,
                    outlets: branches.outlets,
                });
            } else {
                junctions.insert(node, branches);
            }
        }

        for p in &pruned {
            log::warn!(
                "node {} has {} inlet and {} outlet branches; dropped (dangling vessel or missing boundary marker)",
                p.node,
                p.inlets.len(),
                p.outlets.len()
            );
        }

        Ok(Topology {
            junctions,
            inflows,
            outflows,
            pruned,
        })
    }

    /// Retained junctions in node-ID order. Both branch lists are non-empty.
    pub fn junctions(&self) -> &IndexMap<NodeId, JunctionBranches> {
        &self.junctions
    }

    /// Inflow sites: boundary nodes met by a segment's upstream end.
    pub fn inflows(&self) -> &[BoundaryAttachment] {
        &self.inflows
    }

    /// Outflow sites: boundary nodes met by a segment's downstream end.
    pub fn outflows(&self) -> &[BoundaryAttachment] {
        &self.outflows
    }

    /// Nodes discarded during classification.
    pub fn pruned(&self) -> &[PrunedNode] {
        &self.pruned
    }

    /// Number of retained junctions.
    pub fn num_junctions(&self) -> usize {
        self.junctions.len()
    }
}

/// Verify each boundary node is attached exactly once, warning on unused ones.
fn check_boundary_usage(
    network: &Network,
    inflows: &[BoundaryAttachment],
    outflows: &[BoundaryAttachment],
) -> Result<()> {
    let mut uses: IndexMap<NodeId, usize> = IndexMap::new();
    for att in inflows.iter().chain(outflows) {
        *uses.entry(att.node).or_insert(0) += 1;
    }

    for (node, count) in &uses {
        if *count > 1 {
            return Err(Error::BoundaryConflict {
                node: *node,
                count: *count,
            });
        }
    }

    for node in network.boundary_nodes().iter() {
        if !uses.contains_key(&node) {
            log::warn!("boundary node {node} is not referenced by any segment");
        }
    }

    Ok(())
}
