//! Structural statistics and the inferred gate census.

use serde::{Deserialize, Serialize};

use crate::aig::{Aig, ObjKind};
use crate::error::{Error, Result};

/// Structural counts and logic depth of a network.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct NtkStats {
    /// True if the network is structurally hashed.
    pub is_strash: bool,
    /// Primary input count.
    pub num_pis: usize,
    /// Primary output count.
    pub num_pos: usize,
    /// Latch count.
    pub num_latches: usize,
    /// Logic node count.
    pub num_nodes: usize,
    /// Summed fanin count over logic nodes.
    pub num_fanins: usize,
    /// Logic depth.
    pub depth: usize,
}

/// Inferred AND/OR/NOT gate counts of a strash network.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct CellCensus {
    /// Nodes censused as AND gates.
    pub num_and: usize,
    /// Nodes censused as OR gates.
    pub num_or: usize,
    /// Inverters implied by the fanin and output polarities.
    pub num_not: usize,
}

impl Aig {
    /// Structural counts plus logic depth.
    ///
    /// The depth metric differs by representation: strash networks use the
    /// AND-level walk, anything else the general logic-level walk. Netlist
    /// form is rejected.
    pub fn ntk_stats(&self) -> Result<NtkStats> {
        if self.is_netlist() {
            return Err(Error::UnsupportedRepresentation {
                form: self.form(),
                want: "a logic or structurally hashed network",
            });
        }
        let is_strash = self.is_strash();
        Ok(NtkStats {
            is_strash,
            num_pis: self.pi_count(),
            num_pos: self.po_count(),
            num_latches: self.latch_count(),
            num_nodes: self.node_count(),
            num_fanins: self.total_fanins(),
            depth: if is_strash {
                self.aig_level()
            } else {
                self.ntk_level()
            },
        })
    }

    /// Infer AND/OR/NOT gate counts by local fanout inspection.
    ///
    /// A node whose first consumer is a combinational output reached through
    /// an inverted arc reads as an OR of the complements of its fanins, so
    /// it contributes `2 - inv_count` inverters; every other node reads as a
    /// plain AND contributing `inv_count`. Only the first consumer is
    /// inspected: a multi-fanout node is censused by that consumer alone,
    /// and a node with no consumer counts as an AND.
    pub fn cell_census(&self) -> Result<CellCensus> {
        if !self.is_strash() {
            return Err(Error::UnsupportedRepresentation {
                form: self.form(),
                want: "a structurally hashed network",
            });
        }
        let mut census = CellCensus::default();
        for (id, obj) in self.objects() {
            if obj.kind != ObjKind::Node {
                continue;
            }
            let ninv = obj.inv_count();
            let or_like = self.fanout0(id).is_some_and(|consumer| {
                let consumer = self.obj(consumer);
                consumer.kind.is_co() && consumer.fanins[0].inv
            });
            if or_like {
                census.num_or += 1;
                census.num_not += 2 - ninv;
            } else {
                census.num_and += 1;
                census.num_not += ninv;
            }
        }
        Ok(census)
    }
}

#[cfg(test)]
mod tests {
    use super::CellCensus;
    use crate::aig::Aig;
    use crate::error::Error;

    #[test]
    fn stats_on_a_strash_network() {
        let mut aig = Aig::new();
        let a = aig.add_pi();
        let b = aig.add_pi();
        let bo = aig.add_latch(b, false);
        let n1 = aig.add_and(a, false, bo, false);
        let n2 = aig.add_and(n1, true, b, false);
        aig.add_po(n2, false);

        let stats = aig.ntk_stats().unwrap();
        assert!(stats.is_strash);
        assert_eq!(stats.num_pis, 2);
        assert_eq!(stats.num_pos, 1);
        assert_eq!(stats.num_latches, 1);
        assert_eq!(stats.num_nodes, 2);
        assert_eq!(stats.num_fanins, 4);
        assert_eq!(stats.depth, 2);
    }

    #[test]
    fn stats_on_a_mapped_network() {
        let mut aig = Aig::new_logic();
        let a = aig.add_pi();
        let b = aig.add_pi();
        let n1 = aig.add_mapped_node(&[a, b], 0);
        let n2 = aig.add_mapped_node(&[n1, a], 1);
        aig.add_po(n2, false);

        let stats = aig.ntk_stats().unwrap();
        assert!(!stats.is_strash);
        assert_eq!(stats.num_nodes, 2);
        assert_eq!(stats.depth, 2);
    }

    #[test]
    fn stats_reject_netlists() {
        assert!(matches!(
            Aig::new_netlist().ntk_stats(),
            Err(Error::UnsupportedRepresentation { .. })
        ));
    }

    #[test]
    fn census_plain_and() {
        let mut aig = Aig::new();
        let a = aig.add_pi();
        let b = aig.add_pi();
        let n = aig.add_and(a, false, b, false);
        aig.add_po(n, false);

        assert_eq!(
            aig.cell_census().unwrap(),
            CellCensus { num_and: 1, num_or: 0, num_not: 0 }
        );
    }

    #[test]
    fn census_counts_fanin_inverters() {
        let mut aig = Aig::new();
        let a = aig.add_pi();
        let b = aig.add_pi();
        let n = aig.add_and(a, true, b, true);
        aig.add_po(n, false);

        assert_eq!(
            aig.cell_census().unwrap(),
            CellCensus { num_and: 1, num_or: 0, num_not: 2 }
        );
    }

    #[test]
    fn census_reads_inverted_outputs_as_or() {
        let mut aig = Aig::new();
        let a = aig.add_pi();
        let b = aig.add_pi();
        let n = aig.add_and(a, false, b, false);
        aig.add_po(n, true);

        assert_eq!(
            aig.cell_census().unwrap(),
            CellCensus { num_and: 0, num_or: 1, num_not: 2 }
        );
    }

    #[test]
    fn census_partitions_every_node() {
        let mut aig = Aig::new();
        let a = aig.add_pi();
        let b = aig.add_pi();
        let c = aig.add_pi();
        let n1 = aig.add_and(a, true, b, false);
        let n2 = aig.add_and(n1, false, c, true);
        let n3 = aig.add_and(n1, true, n2, false);
        aig.add_po(n2, true);
        aig.add_po(n3, false);

        let census = aig.cell_census().unwrap();
        assert_eq!(census.num_and + census.num_or, aig.node_count());
    }

    #[test]
    fn census_rejects_non_strash() {
        assert!(matches!(
            Aig::new_logic().cell_census(),
            Err(Error::UnsupportedRepresentation { .. })
        ));
    }
}
