//! Shardring CLI - demo driver
//!
//! Builds a ring of named nodes, exercises a membership change, and
//! resolves keys against the result.

use anyhow::Result;
use clap::{Parser, Subcommand};
use shardring_ring::Ring;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "shardring-cli")]
#[command(about = "Shardring demo driver")]
#[command(version)]
struct Args {
    /// Log level
    #[arg(long, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Build a ring, drop one node, and print the membership
    Demo {
        /// Number of nodes to add (node1..nodeN)
        #[arg(long, default_value_t = 5)]
        nodes: usize,

        /// Node to remove once the ring is built
        #[arg(long, default_value = "node1")]
        remove: String,
    },
    /// Resolve keys against a ring of named nodes
    Lookup {
        /// Number of nodes to add (node1..nodeN)
        #[arg(long, default_value_t = 5)]
        nodes: usize,

        /// Keys to resolve
        #[arg(required = true)]
        keys: Vec<String>,
    },
}

fn main() -> Result<()> {
    let args = Args::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| args.log_level.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    match args.command {
        Commands::Demo { nodes, remove } => demo(nodes, &remove),
        Commands::Lookup { nodes, keys } => lookup(nodes, &keys),
    }
}

fn build_ring(nodes: usize) -> Ring {
    let mut ring = Ring::new();
    for i in 1..=nodes {
        let node = format!("node{i}");
        let position = ring.add_node(node.as_str());
        info!(%node, %position, "added node");
    }
    ring
}

fn demo(nodes: usize, remove: &str) -> Result<()> {
    let mut ring = build_ring(nodes);

    println!("ring with {} nodes:", ring.len());
    print_ring(&ring);

    if ring.remove_node(remove) {
        println!("removed {remove}");
    } else {
        println!("{remove} is not on the ring");
    }

    println!("ring with {} nodes:", ring.len());
    print_ring(&ring);

    Ok(())
}

fn lookup(nodes: usize, keys: &[String]) -> Result<()> {
    let ring = build_ring(nodes);

    for key in keys {
        let owner = ring.node_for_key(key)?;
        println!("{key} -> {owner}");
    }

    Ok(())
}

fn print_ring(ring: &Ring) {
    for (position, node) in ring.positions() {
        println!("  {position}  {node}");
    }
}
