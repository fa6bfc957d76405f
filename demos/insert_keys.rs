//! Builds a tree from comma-separated integers and prints it as a Graphviz
//! digraph.
//!
//! ```text
//! cargo run --example insert_keys --features graphviz -- "10, 20, 30" 15 | dot -Tsvg > tree.svg
//! ```

use std::collections::HashSet;
use std::error::Error;

use log::info;
use rb_tree::RedBlackTree;
use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

fn parse_keys(input: &str) -> Result<Vec<i64>, String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<i64>()
                .map_err(|e| format!("invalid integer {s:?}: {e}"))
        })
        .collect()
}

fn main() -> Result<(), Box<dyn Error>> {
    TermLogger::init(
        LevelFilter::Info,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    let input = std::env::args().skip(1).collect::<Vec<_>>().join(",");
    let keys = parse_keys(&input)?;

    // the tree keeps duplicates, so drop repeats before inserting
    let mut seen = HashSet::new();
    let mut tree = RedBlackTree::new();
    tree.extend(keys.into_iter().filter(|k| seen.insert(*k)));

    tree.check_invariants()?;
    info!(
        "inserted {:?}: height {}, black height {}",
        tree.insertion_order().collect::<Vec<_>>(),
        tree.height(),
        tree.black_height()
    );
    print!("{}", tree.to_dot());
    Ok(())
}
