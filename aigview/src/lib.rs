//! Utilities for projecting and-inverter graph networks into tensors.
//!
//! And-inverter graphs represent boolean logic as two-input AND gates with
//! inversion flags on their fanins. These two primitives are enough to
//! represent any combinational function, and the flat, densely indexed shape
//! of the representation makes it a convenient substrate for machine-learning
//! tooling: every object maps to one feature row, every connection to one
//! signed edge.
//!
//! This crate is a read-only projection layer. It never synthesizes,
//! optimizes or mutates a network; it walks one and reports what it saw:
//!
//! - [`aig_graph`] turns a structurally hashed network into an edge list and
//!   a one-hot node feature matrix, parameterized by two independent
//!   encoding version axes (node-type grouping and inversion encoding).
//! - [`aig_stats`] computes structural counts, logic depth, and an inferred
//!   AND/OR/NOT gate census from local fanout patterns.
//! - [`aig_scl`] reports post-mapping area and critical-path delay by timing
//!   a private topologically ordered duplicate against a cell library.
//! - [`frame`] holds the current network and library handles and offers a
//!   timed, shell-style command pass-through.
//!
//! Every projection is deterministic: running it twice over an unmodified
//! network yields identical results, and object creation order is preserved
//! end to end into the row order of every tensor.

#![forbid(unsafe_code)]
#![warn(clippy::pedantic, clippy::nursery)]

pub mod aig;
pub mod aig_graph;
pub mod aig_scl;
pub mod aig_stats;
pub mod classify;
pub mod error;
pub mod frame;

pub use aig::{Aig, Fanin, NtkForm, Obj, ObjKind};
pub use aig_graph::GraphData;
pub use aig_scl::{SclCell, SclLib, SclStats};
pub use aig_stats::{CellCensus, NtkStats};
pub use error::{Error, Result};
pub use frame::Frame;
