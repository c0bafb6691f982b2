use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use aigview::{Aig, Frame};

/// Dump graph tensors and statistics from an AIGER file.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// AIGER file to read.
    input: PathBuf,

    /// Node-type encoding version.
    #[arg(long, default_value_t = 0)]
    tver: usize,

    /// Inversion encoding version.
    #[arg(long, default_value_t = 0)]
    iver: usize,

    /// Also dump the graph tensors.
    #[arg(long)]
    graph: bool,

    /// Also dump the inferred gate census.
    #[arg(long)]
    census: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    let mut frame = Frame::new();
    frame.set_network(Aig::from_aiger(&args.input)?);

    let stats = frame.ntk_stats()?;
    println!("{}", serde_json::to_string_pretty(&stats)?);

    if args.census {
        let census = frame.cell_census()?;
        println!("{}", serde_json::to_string_pretty(&census)?);
    }

    if args.graph {
        let data = frame.graph_data(args.tver, args.iver)?;
        println!("{}", serde_json::to_string_pretty(&data)?);
    }

    Ok(())
}
