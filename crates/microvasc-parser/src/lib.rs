//! Pries-format network file parser for microvasc.
//!
//! This crate parses the flat-file microvascular network format of
//! Pries et al. (1990): a title line, a whitespace-delimited segment table,
//! and a boundary-node list.
//!
//! # Example
//!
//! ```
//! use microvasc_parser::parse;
//!
//! let network = parse(
//!     "RAT MESENTERY 2 SEGMENT DATA\n\
//!      name from to diameter\n\
//!      1a 1 2 0.032\n\
//!      1b 2 3 0.025\n\
//!      boundary_nodes\n\
//!      1\n\
//!      3\n",
//! )
//! .unwrap();
//!
//! assert_eq!(network.num_segments(), 2);
//! assert_eq!(network.declared_count(), 2);
//! ```

pub mod error;
pub mod parser;

pub use error::{Error, Result};
pub use parser::parse;
