//! Standard-cell area and timing over a mapped logic network.

use std::cmp::Ordering;

use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::aig::{Aig, ObjKind};
use crate::error::{Error, Result};

/// A combinational standard cell: area plus pin-to-pin delays per transition.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SclCell {
    /// Cell name, e.g. `AND2_X1`.
    pub name: String,
    /// Cell area.
    pub area: f64,
    /// Worst rise delay through the cell.
    pub rise_delay: f64,
    /// Worst fall delay through the cell.
    pub fall_delay: f64,
}

/// A standard-cell library.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SclLib {
    name: String,
    cells: Vec<SclCell>,
}

impl SclLib {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cells: Vec::new(),
        }
    }

    /// A small builtin library, enough to map simple networks.
    #[must_use]
    pub fn generic() -> Self {
        let mut lib = Self::new("generic");
        for (name, area, rise, fall) in [
            ("BUF_X1", 1.0, 0.4, 0.4),
            ("INV_X1", 1.0, 0.3, 0.25),
            ("NAND2_X1", 2.0, 0.5, 0.45),
            ("NOR2_X1", 2.0, 0.55, 0.5),
            ("AND2_X1", 3.0, 0.7, 0.65),
            ("OR2_X1", 3.0, 0.75, 0.7),
            ("XOR2_X1", 5.0, 1.1, 1.0),
        ] {
            lib.add_cell(SclCell {
                name: name.to_string(),
                area,
                rise_delay: rise,
                fall_delay: fall,
            });
        }
        lib
    }

    /// Add a cell, returning its id.
    pub fn add_cell(&mut self, cell: SclCell) -> usize {
        self.cells.push(cell);
        self.cells.len() - 1
    }

    #[must_use]
    pub fn cell(&self, id: usize) -> &SclCell {
        &self.cells[id]
    }

    /// Look up a cell id by name.
    #[must_use]
    pub fn cell_named(&self, name: &str) -> Option<usize> {
        self.cells.iter().position(|cell| cell.name == name)
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Area and critical-path delay of a mapped network.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SclStats {
    /// Summed cell area.
    pub area: f64,
    /// Arrival time of the critical combinational output, worst transition.
    pub delay: f64,
}

/// Arrival-time bookkeeping over one mapped network.
///
/// The network must already be in topological order; arrivals then propagate
/// in a single index-order pass, rise and fall tracked separately.
pub struct SclMan<'a> {
    lib: &'a SclLib,
    ntk: &'a Aig,
    arrival_rise: Vec<f64>,
    arrival_fall: Vec<f64>,
}

impl<'a> SclMan<'a> {
    #[must_use]
    pub fn new(lib: &'a SclLib, ntk: &'a Aig) -> Self {
        let len = ntk.object_count();
        Self {
            lib,
            ntk,
            arrival_rise: vec![0.0; len],
            arrival_fall: vec![0.0; len],
        }
    }

    /// Propagate arrival times from the combinational inputs.
    pub fn compute_arrivals(&mut self) -> Result<()> {
        for (id, obj) in self.ntk.objects() {
            match obj.kind {
                ObjKind::Node => {
                    let cell = obj
                        .cell
                        .and_then(|cell| self.lib.cells.get(cell))
                        .ok_or(Error::MalformedNode {
                            id,
                            kind: obj.kind,
                            fanins: obj.fanins.len(),
                        })?;
                    let mut rise: f64 = 0.0;
                    let mut fall: f64 = 0.0;
                    for fanin in &obj.fanins {
                        rise = rise.max(self.arrival_rise[fanin.src]);
                        fall = fall.max(self.arrival_fall[fanin.src]);
                    }
                    self.arrival_rise[id] = rise + cell.rise_delay;
                    self.arrival_fall[id] = fall + cell.fall_delay;
                }
                kind if kind.is_co() => {
                    let fanin = obj.fanins[0].src;
                    self.arrival_rise[id] = self.arrival_rise[fanin];
                    self.arrival_fall[id] = self.arrival_fall[fanin];
                }
                // Combinational inputs and latch internals arrive at zero.
                _ => {}
            }
        }
        Ok(())
    }

    /// Arrival time at a combinational output for one transition.
    #[must_use]
    pub fn co_arrival(&self, co: usize, rise: bool) -> f64 {
        if rise {
            self.arrival_rise[co]
        } else {
            self.arrival_fall[co]
        }
    }

    /// The output/transition pair with the worst arrival, if any output exists.
    #[must_use]
    pub fn critical_co(&self) -> Option<(usize, bool)> {
        (0..self.ntk.object_count())
            .filter(|&id| self.ntk.obj(id).kind.is_co())
            .cartesian_product([true, false].iter().copied())
            .max_by(|&(a, ar), &(b, br)| {
                self.co_arrival(a, ar)
                    .partial_cmp(&self.co_arrival(b, br))
                    .unwrap_or(Ordering::Equal)
            })
    }

    /// Summed area of all mapped cells.
    #[must_use]
    pub fn total_area(&self) -> f64 {
        self.ntk
            .objects()
            .filter(|(_, obj)| obj.kind == ObjKind::Node)
            .filter_map(|(_, obj)| obj.cell)
            .map(|cell| self.lib.cell(cell).area)
            .sum()
    }
}

impl Aig {
    /// Post-mapping area and critical-path delay.
    ///
    /// Works on private duplicates only: the network is first duplicated in
    /// topological order, and if that duplicate carries barrier buffers a
    /// second duplicate without them replaces it. The duplicates and the
    /// timing state are dropped before returning on every path.
    pub fn scl_stats(&self, lib: &SclLib) -> Result<SclStats> {
        if !(self.is_logic() && self.has_mapping()) {
            return Err(Error::UnsupportedRepresentation {
                form: self.form(),
                want: "a technology mapped logic network",
            });
        }

        let mut dup = self.dup_topo()?;
        if dup.bar_buf_count() > 0 {
            dup = dup.dup_topo_no_barbufs()?;
        }
        debug!(
            objects = dup.object_count(),
            nodes = dup.node_count(),
            "running timing over the duplicate"
        );

        let mut man = SclMan::new(lib, &dup);
        man.compute_arrivals()?;
        let delay = man
            .critical_co()
            .map_or(0.0, |(co, rise)| man.co_arrival(co, rise));
        Ok(SclStats {
            area: man.total_area(),
            delay,
        })
    }
}
