//! Cartelera CLI — catalog download and graph queries.
//!
//! Usage:
//!   cartelera download [--cap N] [--out FILE] [--api-doc FILE]
//!   cartelera graph [filter flags] [--limit N]

use cartelera::{
    full_ingestion, graph_query, BuildOptions, CatalogClient, EventFilter, IngestError,
    DEFAULT_API_BASE,
};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "cartelera",
    version,
    about = "Concert-catalog ingestion and graph normalization engine"
)]
struct Cli {
    /// Base URL of the catalog API
    #[arg(long, global = true, default_value = DEFAULT_API_BASE)]
    api_url: String,

    /// Also emit full-location nodes alongside derived city nodes
    #[arg(long, global = true)]
    location_nodes: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Download the whole catalog into a timestamped JSON archive
    Download {
        /// Maximum number of events to fetch
        #[arg(long, default_value_t = 10_000)]
        cap: usize,
        /// Output file (defaults to concert_data_<timestamp>.json)
        #[arg(long)]
        out: Option<PathBuf>,
        /// Local API documentation JSON to embed in the archive
        #[arg(long)]
        api_doc: Option<PathBuf>,
    },
    /// Run one filtered query and print the resulting graph as JSON
    Graph {
        #[command(flatten)]
        filter: FilterArgs,
    },
}

/// The passthrough filter set, forwarded verbatim to the upstream endpoint.
#[derive(Args)]
struct FilterArgs {
    /// Event name search
    #[arg(long)]
    name: Option<String>,
    /// Composer name search
    #[arg(long)]
    composer: Option<String>,
    /// Participant name search
    #[arg(long)]
    participant: Option<String>,
    /// Piece name search
    #[arg(long)]
    piece: Option<String>,
    /// Activity search
    #[arg(long)]
    activity: Option<String>,
    /// Gender search
    #[arg(long)]
    gender: Option<String>,
    #[arg(long)]
    year: Option<i32>,
    #[arg(long)]
    city_id: Option<u64>,
    #[arg(long)]
    location_id: Option<u64>,
    #[arg(long)]
    event_type_id: Option<u64>,
    #[arg(long)]
    cycle_id: Option<u64>,
    #[arg(long)]
    organization_id: Option<u64>,
    #[arg(long)]
    instrument_id: Option<u64>,
    #[arg(long)]
    ensemble_id: Option<u64>,
    #[arg(long)]
    premiere_type_id: Option<u64>,
    #[arg(long)]
    composer_id: Option<u64>,
    #[arg(long)]
    participant_id: Option<u64>,
    /// Result cap
    #[arg(long, default_value_t = 500)]
    limit: u32,
}

impl FilterArgs {
    fn into_filter(self) -> EventFilter {
        EventFilter {
            name_q: self.name,
            composer_q: self.composer,
            participant_q: self.participant,
            piece_q: self.piece,
            activity_q: self.activity,
            gender_q: self.gender,
            year: self.year,
            city_id: self.city_id,
            location_id: self.location_id,
            event_type_id: self.event_type_id,
            cycle_id: self.cycle_id,
            organization_id: self.organization_id,
            instrument_id: self.instrument_id,
            ensemble_id: self.ensemble_id,
            premiere_type_id: self.premiere_type_id,
            composer_id: self.composer_id,
            participant_id: self.participant_id,
            limit: Some(self.limit),
        }
    }
}

fn build_options(cli: &Cli) -> BuildOptions {
    BuildOptions {
        emit_location_nodes: cli.location_nodes,
        ..Default::default()
    }
}

async fn cmd_download(
    api_url: &str,
    options: BuildOptions,
    cap: usize,
    out: Option<PathBuf>,
    api_doc: Option<PathBuf>,
) -> i32 {
    let client = match CatalogClient::new(api_url) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    let snapshot = full_ingestion(&client, cap, options).await;

    let now = chrono::Utc::now();
    let mut archive = serde_json::json!({
        "params": snapshot.params,
        "events": snapshot.events,
        "nodes": snapshot.nodes,
        "links": snapshot.links,
        "timestamp": snapshot.timestamp,
        "metadata": {
            "total_events": snapshot.total_events,
            "ingestion_date": now.to_rfc3339(),
            "api_version": "1.0",
        },
    });

    if let Some(path) = api_doc {
        match cartelera::ingest::load_api_documentation(&path) {
            Ok(doc) => {
                archive["api_documentation"] = doc;
            }
            Err(IngestError::Configuration(msg)) => {
                eprintln!("Warning: {} — continuing without it", msg);
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                return 1;
            }
        }
    }

    let out = out.unwrap_or_else(|| {
        PathBuf::from(format!("concert_data_{}.json", now.format("%Y%m%d_%H%M%S")))
    });
    let text = match serde_json::to_string_pretty(&archive) {
        Ok(text) => text,
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };
    if let Err(e) = std::fs::write(&out, &text) {
        eprintln!("Error: failed to write {}: {}", out.display(), e);
        return 1;
    }

    println!(
        "Saved {} events ({} nodes, {} links) to {}",
        snapshot.total_events,
        snapshot.nodes.len(),
        snapshot.links.len(),
        out.display()
    );
    0
}

async fn cmd_graph(api_url: &str, options: BuildOptions, filter: FilterArgs) -> i32 {
    let cap = filter.limit as usize;
    let client = match CatalogClient::new(api_url) {
        Ok(client) => client.with_filter(filter.into_filter()),
        Err(e) => {
            eprintln!("Error: {}", e);
            return 1;
        }
    };

    match graph_query(&client, cap, options).await {
        Ok(graph) => match serde_json::to_string_pretty(&graph) {
            Ok(text) => {
                println!("{}", text);
                0
            }
            Err(e) => {
                eprintln!("Error: {}", e);
                1
            }
        },
        Err(e) => {
            eprintln!("Error: {}", e);
            1
        }
    }
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let options = build_options(&cli);
    let api_url = cli.api_url.clone();

    let code = match cli.command {
        Commands::Download { cap, out, api_doc } => {
            cmd_download(&api_url, options, cap, out, api_doc).await
        }
        Commands::Graph { filter } => cmd_graph(&api_url, options, filter).await,
    };
    std::process::exit(code);
}
