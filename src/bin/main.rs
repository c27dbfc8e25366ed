use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use clap::{Parser, Subcommand};
use mailgraph::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "mailgraph")]
#[command(about = "Email-graph spam detection CLI")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Score senders and print ranked verdicts as JSON
    Score {
        /// Edge list file: sender,recipient,weight[,rfc3339-timestamp]
        #[arg(short, long)]
        edges: PathBuf,
        /// Optional JSON detection config (weights, thresholds, strategies)
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Limit output to the N highest-scored senders
        #[arg(short, long)]
        top: Option<usize>,
    },
    /// Print aggregate network metrics as JSON
    Metrics {
        #[arg(short, long)]
        edges: PathBuf,
    },
}

fn main() -> Result<()> {
    env_logger::init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Score { edges, config, top } => {
            let graph = load_graph(&edges)?;
            let config = match config {
                Some(path) => {
                    let raw = fs::read_to_string(&path)
                        .with_context(|| format!("reading config {}", path.display()))?;
                    serde_json::from_str::<DetectionConfig>(&raw)
                        .with_context(|| format!("parsing config {}", path.display()))?
                }
                None => DetectionConfig::default(),
            };

            let pipeline = DetectionPipeline::new(config)?;
            let mut report = pipeline.run(&graph)?;
            if let Some(n) = top {
                report.ranked.truncate(n);
            }
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Commands::Metrics { edges } => {
            let graph = load_graph(&edges)?;
            let summary = NetworkMetrics.summary(&graph, DiameterMode::Hops);
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
    }

    Ok(())
}

/// Thin ingestion shim: one edge per line, comma-separated. The core
/// library performs no I/O; anything beyond this format belongs to a real
/// parser upstream.
fn load_graph(path: &Path) -> Result<MailGraph> {
    let raw = fs::read_to_string(path)
        .with_context(|| format!("reading edge list {}", path.display()))?;

    let mut graph = MailGraph::new();
    for (line_no, line) in raw.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = line.split(',').map(str::trim).collect();
        if fields.len() < 3 {
            anyhow::bail!("line {}: expected sender,recipient,weight", line_no + 1);
        }
        let weight: u64 = fields[2]
            .parse()
            .with_context(|| format!("line {}: invalid weight {:?}", line_no + 1, fields[2]))?;
        let timestamp: Option<DateTime<Utc>> = match fields.get(3) {
            Some(raw_ts) if !raw_ts.is_empty() => Some(
                DateTime::parse_from_rfc3339(raw_ts)
                    .with_context(|| format!("line {}: invalid timestamp {raw_ts:?}", line_no + 1))?
                    .with_timezone(&Utc),
            ),
            _ => None,
        };
        graph.add_edge(fields[0], fields[1], weight, timestamp)?;
    }

    log::info!(
        "loaded {} nodes, {} edges from {}",
        graph.node_count(),
        graph.edge_count(),
        path.display()
    );
    Ok(graph)
}
