//! Classification of object kinds into feature-vector slots.
//!
//! Feature vectors are one-hot over a slot index chosen per object kind. Two
//! independent version axes select the encoding: the type version picks one
//! of several groupings of kinds into slots, the inversion version decides
//! how a node's inverted-fanin count is represented (folded into the slot,
//! appended as a scalar, or carried on the edge weights and absent here).

use crate::aig::ObjKind;
use crate::error::{Error, Result};

/// Number of supported type encoding versions.
pub const TYPE_VERSIONS: usize = 3;

/// Number of supported inversion encoding versions.
pub const INV_VERSIONS: usize = 3;

/// Slot table, indexed by kind discriminant then type version.
///
/// Version 0 is combinational-only, version 1 gives every sequential kind its
/// own slot, version 2 folds box pins into the input/output slots. A node
/// always holds the highest slot of its column; the feature-vector width is
/// derived from it.
#[rustfmt::skip]
const TYPE_SLOT: [[i8; TYPE_VERSIONS]; 8] = [
    [ 0,  0,  0], // Const1
    [ 1,  1,  1], // Pi
    [ 2,  2,  2], // Po
    [-1,  3,  2], // Bi
    [-1,  4,  1], // Bo
    [-1, -1, -1], // Net
    [ 3,  6,  4], // Node
    [-1,  5,  3], // Latch
];

/// Look up the feature slot for `kind` under type version `tver`.
///
/// Returns `None` for kinds the version cannot express; `Net` is `None`
/// under every version. An out-of-range version is an error.
pub fn type_slot(kind: ObjKind, tver: usize) -> Result<Option<usize>> {
    if tver >= TYPE_VERSIONS {
        return Err(Error::InvalidVersion {
            axis: "type",
            got: tver,
        });
    }
    match TYPE_SLOT[kind as usize][tver] {
        -1 => Ok(None),
        slot => Ok(Some(slot as usize)),
    }
}

/// Feature-vector width for a version pair.
///
/// The node slot is the highest of its column, so the one-hot block is that
/// slot plus one; inversion version 0 reserves two more slots for the folded
/// inverted-fanin count, version 1 appends one auxiliary scalar slot, and
/// later versions add nothing.
pub fn feature_width(tver: usize, iver: usize) -> Result<usize> {
    if iver >= INV_VERSIONS {
        return Err(Error::InvalidVersion {
            axis: "inversion",
            got: iver,
        });
    }
    let node_slot = type_slot(ObjKind::Node, tver)?
        .expect("a node is classifiable under every supported version");
    let extra = match iver {
        0 => 2,
        1 => 1,
        _ => 0,
    };
    Ok(node_slot + 1 + extra)
}

#[cfg(test)]
mod tests {
    use super::{feature_width, type_slot, INV_VERSIONS, TYPE_VERSIONS};
    use crate::aig::ObjKind;
    use crate::error::Error;

    #[test]
    fn node_has_the_highest_slot() {
        for tver in 0..TYPE_VERSIONS {
            let node = type_slot(ObjKind::Node, tver).unwrap().unwrap();
            for kind in [
                ObjKind::Const1,
                ObjKind::Pi,
                ObjKind::Po,
                ObjKind::Bi,
                ObjKind::Bo,
                ObjKind::Net,
                ObjKind::Latch,
            ] {
                if let Some(slot) = type_slot(kind, tver).unwrap() {
                    assert!(slot < node, "{kind:?} outranks the node slot in version {tver}");
                }
            }
        }
    }

    #[test]
    fn net_is_never_classifiable() {
        for tver in 0..TYPE_VERSIONS {
            assert_eq!(type_slot(ObjKind::Net, tver).unwrap(), None);
        }
    }

    #[test]
    fn version_zero_is_combinational_only() {
        assert_eq!(type_slot(ObjKind::Bi, 0).unwrap(), None);
        assert_eq!(type_slot(ObjKind::Bo, 0).unwrap(), None);
        assert_eq!(type_slot(ObjKind::Latch, 0).unwrap(), None);
        assert_eq!(type_slot(ObjKind::Latch, 1).unwrap(), Some(5));
        assert_eq!(type_slot(ObjKind::Latch, 2).unwrap(), Some(3));
    }

    #[test]
    fn version_two_folds_box_pins() {
        assert_eq!(type_slot(ObjKind::Bi, 2).unwrap(), type_slot(ObjKind::Po, 2).unwrap());
        assert_eq!(type_slot(ObjKind::Bo, 2).unwrap(), type_slot(ObjKind::Pi, 2).unwrap());
    }

    #[test]
    fn out_of_range_versions_are_rejected() {
        assert!(matches!(
            type_slot(ObjKind::Node, TYPE_VERSIONS),
            Err(Error::InvalidVersion { axis: "type", .. })
        ));
        assert!(matches!(
            feature_width(0, INV_VERSIONS),
            Err(Error::InvalidVersion { axis: "inversion", .. })
        ));
    }

    #[test]
    fn widths() {
        // One-hot block widths are 4, 7 and 5; the inversion axis pads them.
        assert_eq!(feature_width(0, 0).unwrap(), 6);
        assert_eq!(feature_width(0, 1).unwrap(), 5);
        assert_eq!(feature_width(0, 2).unwrap(), 4);
        assert_eq!(feature_width(1, 0).unwrap(), 9);
        assert_eq!(feature_width(1, 1).unwrap(), 8);
        assert_eq!(feature_width(1, 2).unwrap(), 7);
        assert_eq!(feature_width(2, 0).unwrap(), 7);
        assert_eq!(feature_width(2, 1).unwrap(), 6);
        assert_eq!(feature_width(2, 2).unwrap(), 5);
    }
}
