//! The session frame: a current network, an attached library, and a timed
//! command pass-through.
//!
//! Extraction itself always takes the network handle explicitly; the frame
//! only owns the handles and answers for their absence.

use std::time::{Duration, Instant};

use tracing::{info, warn};

use crate::aig::Aig;
use crate::aig_graph::GraphData;
use crate::aig_scl::{SclLib, SclStats};
use crate::aig_stats::{CellCensus, NtkStats};
use crate::error::{Error, Result};

/// A session holding the current network and the attached cell library.
#[derive(Default)]
pub struct Frame {
    ntk: Option<Aig>,
    lib: Option<SclLib>,
}

impl Frame {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a network as the current one, dropping any previous network.
    pub fn set_network(&mut self, ntk: Aig) {
        self.ntk = Some(ntk);
    }

    /// Remove and return the current network.
    pub fn take_network(&mut self) -> Option<Aig> {
        self.ntk.take()
    }

    /// The current network, if one is loaded.
    pub fn current(&self) -> Result<&Aig> {
        self.ntk.as_ref().ok_or(Error::NoCurrentNetwork)
    }

    /// Attach a standard-cell library.
    pub fn attach_library(&mut self, lib: SclLib) {
        self.lib = Some(lib);
    }

    /// The attached library, if any.
    pub fn library(&self) -> Result<&SclLib> {
        self.lib.as_ref().ok_or(Error::MissingLibrary)
    }

    /// Total object count of the current network.
    pub fn num_nodes(&self) -> Result<usize> {
        Ok(self.current()?.object_count())
    }

    /// Structural counts of the current network.
    pub fn ntk_stats(&self) -> Result<NtkStats> {
        self.current()?.ntk_stats()
    }

    /// Mapping statistics of the current network against the attached library.
    pub fn scl_stats(&self) -> Result<SclStats> {
        let lib = self.library()?;
        self.current()?.scl_stats(lib)
    }

    /// Inferred gate census of the current network.
    pub fn cell_census(&self) -> Result<CellCensus> {
        self.current()?.cell_census()
    }

    /// Graph tensors of the current network.
    pub fn graph_data(&self, tver: usize, iver: usize) -> Result<GraphData> {
        self.current()?.graph_data(tver, iver)
    }

    /// Execute a `;`-separated command string, returning the elapsed time
    /// and a success flag.
    ///
    /// Failures never propagate as errors: the first failing command is
    /// logged and flips the flag, mirroring an interactive shell.
    pub fn run(&mut self, cmd: &str) -> (Duration, bool) {
        let start = Instant::now();
        let mut ok = true;
        for part in cmd.split(';').map(str::trim).filter(|part| !part.is_empty()) {
            if let Err(err) = self.dispatch(part) {
                warn!(command = part, error = %err, "cannot execute command");
                ok = false;
                break;
            }
        }
        (start.elapsed(), ok)
    }

    fn dispatch(&mut self, cmd: &str) -> Result<()> {
        let mut tokens = cmd.split_whitespace();
        let name = tokens.next().unwrap_or_default();
        match name {
            "read_aiger" | "r" => {
                let path = tokens
                    .next()
                    .ok_or_else(|| Error::UnknownCommand(cmd.to_string()))?;
                self.ntk = Some(Aig::from_aiger(path)?);
                Ok(())
            }
            // The reader already produces the strash form; this is a check,
            // not a conversion.
            "strash" | "st" => {
                let ntk = self.current()?;
                if ntk.is_strash() {
                    Ok(())
                } else {
                    Err(Error::UnsupportedRepresentation {
                        form: ntk.form(),
                        want: "a structurally hashed network",
                    })
                }
            }
            "print_stats" | "ps" => {
                let stats = self.ntk_stats()?;
                info!(
                    pis = stats.num_pis,
                    pos = stats.num_pos,
                    latches = stats.num_latches,
                    nodes = stats.num_nodes,
                    depth = stats.depth,
                    "network statistics"
                );
                Ok(())
            }
            _ => Err(Error::UnknownCommand(cmd.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::Frame;
    use crate::aig::Aig;
    use crate::aig_scl::SclLib;
    use crate::error::Error;

    fn write_aag(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn empty_frame_has_no_network() {
        let frame = Frame::new();
        assert!(matches!(frame.current(), Err(Error::NoCurrentNetwork)));
        assert!(matches!(frame.ntk_stats(), Err(Error::NoCurrentNetwork)));
        assert!(matches!(frame.library(), Err(Error::MissingLibrary)));
    }

    #[test]
    fn run_reads_and_checks() {
        let file = write_aag("aag 3 2 0 1 1\n2\n4\n6\n6 2 4\n");
        let mut frame = Frame::new();
        let cmd = format!("read_aiger {}; st; ps", file.path().display());
        let (elapsed, ok) = frame.run(&cmd);

        assert!(ok);
        assert!(elapsed.as_nanos() > 0);
        assert_eq!(frame.num_nodes().unwrap(), 5);
        assert!(frame.graph_data(0, 0).is_ok());
    }

    #[test]
    fn run_flags_unknown_commands() {
        let mut frame = Frame::new();
        let (_, ok) = frame.run("frobnicate");
        assert!(!ok);
    }

    #[test]
    fn run_flags_missing_files() {
        let mut frame = Frame::new();
        let (_, ok) = frame.run("read_aiger /nonexistent/path.aag");
        assert!(!ok);
        assert!(matches!(frame.current(), Err(Error::NoCurrentNetwork)));
    }

    #[test]
    fn scl_stats_needs_a_library() {
        let mut frame = Frame::new();
        frame.set_network(Aig::new());
        assert!(matches!(frame.scl_stats(), Err(Error::MissingLibrary)));

        frame.attach_library(SclLib::generic());
        // With the library attached the network form is the next gate.
        assert!(matches!(
            frame.scl_stats(),
            Err(Error::UnsupportedRepresentation { .. })
        ));
    }

    #[test]
    fn set_and_take_network() {
        let mut frame = Frame::new();
        frame.set_network(Aig::new());
        assert!(frame.current().is_ok());
        assert!(frame.take_network().is_some());
        assert!(frame.current().is_err());
    }
}
