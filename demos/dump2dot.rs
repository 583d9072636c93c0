//! Example: rendering a DAWG with Graphviz.
//!
//! Reads a sorted word list (one word per line, `#` comments allowed) and
//! prints the automaton in DOT format. Final states are drawn as double
//! circles.
//!
//! Run with: cargo run --example dump2dot -- words.txt | dot -Tsvg > dawg.svg

use std::error::Error;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use dawgdict::dawg::builder::{build_dawg_from_file, build_dawg_from_reader};
use dawgdict::dawg::DawgGraph;

/// Print a DAWG built from a word list as a Graphviz digraph.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Word list, sorted. Reads standard input when omitted.
    input: Option<PathBuf>,

    /// Graph name used in the output.
    #[arg(long, default_value = "DAWG")]
    name: String,

    /// Print statistics to standard error.
    #[arg(long)]
    stats: bool,
}

fn escape(symbol: char) -> String {
    match symbol {
        '"' => "\\\"".to_string(),
        '\\' => "\\\\".to_string(),
        c => c.to_string(),
    }
}

fn write_dot(out: &mut impl Write, graph: &DawgGraph<char>, name: &str) -> io::Result<()> {
    writeln!(out, "digraph {name} {{")?;
    for node in &graph.nodes {
        let shape = if node.is_final { "doublecircle" } else { "circle" };
        writeln!(out, "N{:x} [shape={shape}, label=\"\"]", node.id)?;
    }
    for edge in &graph.edges {
        writeln!(
            out,
            "N{:x} -> N{:x} [label=\"{}\"]",
            edge.source,
            edge.target,
            escape(edge.symbol)
        )?;
    }
    writeln!(out, "}}")
}

fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    let dawg = match &args.input {
        Some(path) => build_dawg_from_file(path)?,
        None => build_dawg_from_reader(io::stdin().lock())?,
    };

    if args.stats {
        let stats = dawg.stats();
        eprintln!(
            "{} words, {} states, {} edges, longest word {}",
            stats.words_count, stats.nodes_count, stats.edges_count, stats.longest_word
        );
    }

    let mut out = io::BufWriter::new(io::stdout().lock());
    write_dot(&mut out, &dawg.graph(), &args.name)?;
    out.flush()?;
    Ok(())
}
