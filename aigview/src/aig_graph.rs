//! Projection of a strash network into edge lists and node features.

use serde::{Deserialize, Serialize};

use crate::aig::{Aig, ObjKind};
use crate::classify::{feature_width, type_slot, INV_VERSIONS};
use crate::error::{Error, Result};

/// Graph tensors extracted from a network.
///
/// Edges are a COO triple of parallel arrays; `features` is a row-major
/// `num_nodes` by `nfeats` matrix. Row order is object creation order.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub struct GraphData {
    /// Edge source object ids.
    pub edge_src: Vec<i32>,
    /// Edge destination object ids.
    pub edge_dst: Vec<i32>,
    /// Edge weights: -1 for an inverted connection, +1 otherwise.
    pub edge_weight: Vec<i32>,
    /// Node feature matrix, row-major.
    pub features: Vec<i32>,
    /// Number of feature rows.
    pub num_nodes: usize,
    /// Width of each feature row.
    pub nfeats: usize,
}

impl GraphData {
    /// Number of edges in the projection.
    #[must_use]
    pub fn edge_count(&self) -> usize {
        self.edge_src.len()
    }

    /// One node's feature row.
    #[must_use]
    pub fn feature_row(&self, id: usize) -> &[i32] {
        &self.features[id * self.nfeats..(id + 1) * self.nfeats]
    }
}

impl Aig {
    /// Project the network into graph tensors.
    ///
    /// `tver` selects the node-type encoding, `iver` the inversion encoding:
    /// 0 folds a node's inverted-fanin count into its type slot, 1 stores it
    /// in a trailing scalar slot, 2 leaves it to the edge weights.
    ///
    /// The network must be structurally hashed. A single pass over the
    /// objects in creation order emits two edges per node (first fanin
    /// first) and one edge per combinational output; output edges always
    /// carry weight +1, as output polarity is deliberately not folded into
    /// the arc.
    pub fn graph_data(&self, tver: usize, iver: usize) -> Result<GraphData> {
        if iver >= INV_VERSIONS {
            return Err(Error::InvalidVersion {
                axis: "inversion",
                got: iver,
            });
        }
        let nfeats = feature_width(tver, iver)?;
        if !self.is_strash() {
            return Err(Error::UnsupportedRepresentation {
                form: self.form(),
                want: "a structurally hashed network",
            });
        }

        let mut data = GraphData {
            nfeats,
            ..GraphData::default()
        };
        let mut add_edge = |src: usize, dst: usize, inv: bool| {
            data.edge_src.push(src as i32);
            data.edge_dst.push(dst as i32);
            data.edge_weight.push(if inv { -1 } else { 1 });
        };

        let mut features = Vec::with_capacity(self.object_count() * nfeats);
        for (id, obj) in self.objects() {
            let malformed = || Error::MalformedNode {
                id,
                kind: obj.kind,
                fanins: obj.fanins.len(),
            };
            let mut slot = type_slot(obj.kind, tver)?.ok_or_else(malformed)?;
            let mut ninv = 0;

            match obj.kind {
                ObjKind::Node => {
                    if obj.fanins.len() != 2 {
                        return Err(malformed());
                    }
                    for fanin in &obj.fanins {
                        add_edge(fanin.src, id, fanin.inv);
                    }
                    ninv = obj.inv_count();
                    if iver == 0 {
                        slot += ninv;
                    }
                }
                kind if kind.is_co() => {
                    if obj.fanins.len() != 1 {
                        return Err(malformed());
                    }
                    add_edge(obj.fanins[0].src, id, false);
                }
                _ => {}
            }

            let row = features.len();
            features.resize(row + nfeats, 0);
            features[row + slot] = 1;
            if iver == 1 {
                features[row + nfeats - 1] = ninv as i32;
            }
        }

        data.features = features;
        data.num_nodes = self.object_count();
        Ok(data)
    }
}
