//! Error types for network projection.

use thiserror::Error;

use crate::aig::{NtkForm, ObjKind};

/// Everything that can go wrong while projecting a network.
#[derive(Error, Debug)]
pub enum Error {
    /// A graph encoding version outside the supported range was requested.
    #[error("unsupported {axis} encoding version {got}")]
    InvalidVersion {
        /// Which versioning axis was out of range.
        axis: &'static str,
        /// The rejected version number.
        got: usize,
    },

    /// No network has been loaded into the frame.
    #[error("no current network")]
    NoCurrentNetwork,

    /// The network is in the wrong structural form for the requested operation.
    #[error("unexpected network type: the network is {form}, but this operation needs {want}")]
    UnsupportedRepresentation {
        /// The form the network is actually in.
        form: NtkForm,
        /// What the operation needed.
        want: &'static str,
    },

    /// An object that cannot be encoded was encountered mid-traversal.
    #[error("object {id} of kind {kind:?} with {fanins} fanins cannot be encoded")]
    MalformedNode {
        /// Creation index of the offending object.
        id: usize,
        /// Its structural kind.
        kind: ObjKind,
        /// How many fanins it carried.
        fanins: usize,
    },

    /// Mapping statistics were requested without an attached cell library.
    #[error("no standard-cell library attached")]
    MissingLibrary,

    /// Topological duplication found a combinational cycle.
    #[error("topological sort failed: cycle through object {id}")]
    TopoSortFailure {
        /// An object on the cycle.
        id: usize,
    },

    /// The frame was asked to execute a command it does not know.
    #[error("unknown command {0:?}")]
    UnknownCommand(String),

    /// I/O error while reading a network from disk.
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    /// The AIGER reader rejected the input file.
    #[error("invalid aiger file: {0}")]
    InvalidAiger(String),
}

/// Shorthand result type used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn messages_name_the_offender() {
        let err = Error::MalformedNode {
            id: 7,
            kind: crate::aig::ObjKind::Net,
            fanins: 0,
        };
        let text = err.to_string();
        assert!(text.contains('7'));
        assert!(text.contains("Net"));
    }
}
