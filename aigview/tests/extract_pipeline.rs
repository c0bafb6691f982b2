//! End-to-end checks: AIGER in, tensors and statistics out.

use std::io::Write;

use aigview::{Aig, CellCensus, Frame};

/// Three inputs feeding a chain of three ANDs with mixed inversions and two
/// outputs, one of them complemented.
const CHAIN: &str = "aag 6 3 0 2 3\n2\n4\n6\n12\n9\n8 2 4\n10 9 6\n12 3 11\n";

fn write_aag(contents: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn stats_of_the_chain() {
    let file = write_aag(CHAIN);
    let aig = Aig::from_aiger(file.path()).unwrap();
    let stats = aig.ntk_stats().unwrap();

    assert!(stats.is_strash);
    assert_eq!(stats.num_pis, 3);
    assert_eq!(stats.num_pos, 2);
    assert_eq!(stats.num_latches, 0);
    assert_eq!(stats.num_nodes, 3);
    assert_eq!(stats.num_fanins, 6);
    assert_eq!(stats.depth, 3);
}

#[test]
fn graph_invariants_hold_for_every_version_pair() {
    let file = write_aag(CHAIN);
    let aig = Aig::from_aiger(file.path()).unwrap();

    for tver in 0..3 {
        for iver in 0..3 {
            let data = aig.graph_data(tver, iver).unwrap();
            assert_eq!(data.num_nodes, aig.object_count());
            assert_eq!(data.edge_count(), 2 * aig.node_count() + aig.po_count());
            assert_eq!(data.features.len(), data.num_nodes * data.nfeats);

            for id in 0..data.num_nodes {
                let row = data.feature_row(id);
                let block = if iver == 1 { &row[..row.len() - 1] } else { row };
                assert_eq!(block.iter().filter(|&&v| v == 1).count(), 1);
            }
            for (i, &weight) in data.edge_weight.iter().enumerate() {
                assert!(weight == 1 || weight == -1);
                assert!((data.edge_src[i] as usize) < data.num_nodes);
                assert!((data.edge_dst[i] as usize) < data.num_nodes);
            }
        }
    }
}

#[test]
fn extraction_is_repeatable() {
    let file = write_aag(CHAIN);
    let aig = Aig::from_aiger(file.path()).unwrap();
    assert_eq!(aig.graph_data(2, 1).unwrap(), aig.graph_data(2, 1).unwrap());
}

#[test]
fn census_of_the_chain() {
    let file = write_aag(CHAIN);
    let aig = Aig::from_aiger(file.path()).unwrap();
    let census = aig.cell_census().unwrap();

    assert_eq!(
        census,
        CellCensus {
            num_and: 3,
            num_or: 0,
            num_not: 3
        }
    );
    assert_eq!(census.num_and + census.num_or, aig.node_count());
}

#[test]
fn frame_runs_the_whole_pipeline() {
    let file = write_aag(CHAIN);
    let mut frame = Frame::new();
    let (_, ok) = frame.run(&format!("read_aiger {}; st; ps", file.path().display()));

    assert!(ok);
    assert_eq!(frame.num_nodes().unwrap(), 9);
    let data = frame.graph_data(1, 2).unwrap();
    assert_eq!(data.num_nodes, 9);
}
