//! Line-oriented parser for the Pries network data format.
//!
//! The format has three parts:
//! 1. a title line starting with `RAT MESENTERY`, whose third whitespace
//!    token is the declared vessel count;
//! 2. a segment table (one header line, then one whitespace- or
//!    tab-delimited row per segment: name, node_from, node_to, diameter);
//! 3. a `boundary_nodes` marker line followed by one integer node ID per
//!    line.
//!
//! Blank lines are skipped everywhere. Columns are positional; the header
//! line is only used to mark where data rows begin. Segment rows may carry
//! extra trailing columns, which are ignored.

use microvasc_core::{BoundaryNodes, Network, NodeId, Segment, VesselId};

use crate::error::{Error, Result};

/// Parse the contents of a network data file.
///
/// The declared vessel count on the title line is recorded but never checked
/// against the number of parsed rows.
pub fn parse(input: &str) -> Result<Network> {
    let mut title: Option<(String, usize)> = None;
    let mut header_seen = false;
    let mut in_boundary = false;
    let mut segments: Vec<Segment> = Vec::new();
    let mut boundary = BoundaryNodes::new();

    for (idx, raw) in input.lines().enumerate() {
        let line_no = idx + 1;
        let line = raw.trim();
        if line.is_empty() {
            continue;
        }

        if in_boundary {
            let node = parse_boundary_node(line, line_no)?;
            if !boundary.insert(node) {
                log::warn!("duplicate boundary node {node} at line {line_no}");
            }
        } else if line.starts_with("RAT MESENTERY") {
            title = Some((line.to_string(), parse_declared_count(line, line_no)?));
        } else if line.starts_with("boundary_nodes") {
            in_boundary = true;
        } else if !header_seen {
            header_seen = true;
        } else {
            let id = VesselId::new(segments.len() as u32);
            segments.push(parse_segment(line, line_no, id)?);
        }
    }

    let (title, declared_count) = title.ok_or(Error::MissingTitle)?;
    Ok(Network::new(title, declared_count, segments, boundary))
}

/// Extract the declared vessel count: the third whitespace token of the title.
fn parse_declared_count(line: &str, line_no: usize) -> Result<usize> {
    let token = line
        .split_whitespace()
        .nth(2)
        .ok_or_else(|| Error::ParseError {
            line: line_no,
            message: "title line has no vessel count".to_string(),
        })?;
    token.parse().map_err(|_| Error::ParseError {
        line: line_no,
        message: format!("vessel count is not an integer: '{token}'"),
    })
}

fn parse_segment(line: &str, line_no: usize, id: VesselId) -> Result<Segment> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() < 4 {
        return Err(Error::ParseError {
            line: line_no,
            message: format!("segment row has {} fields, expected at least 4", fields.len()),
        });
    }

    let node_from = parse_node(fields[1], line_no, "node_from")?;
    let node_to = parse_node(fields[2], line_no, "node_to")?;
    let diameter: f64 = fields[3].parse().map_err(|_| Error::ParseError {
        line: line_no,
        message: format!("diameter is not a number: '{}'", fields[3]),
    })?;

    Ok(Segment::new(id, fields[0], node_from, node_to, diameter))
}

fn parse_node(token: &str, line_no: usize, field: &str) -> Result<NodeId> {
    let id: u32 = token.parse().map_err(|_| Error::ParseError {
        line: line_no,
        message: format!("{field} is not an integer: '{token}'"),
    })?;
    Ok(NodeId::new(id))
}

fn parse_boundary_node(line: &str, line_no: usize) -> Result<NodeId> {
    let id: u32 = line.parse().map_err(|_| Error::ParseError {
        line: line_no,
        message: format!("boundary node is not an integer: '{line}'"),
    })?;
    Ok(NodeId::new(id))
}
