//! CLI entry point for the FalkorDB gateway.
//!
//! One-shot subcommands print a single envelope to stdout. `serve` reads
//! newline-delimited JSON tool requests from stdin and answers each with
//! one envelope per line, processing requests one at a time.

#![recursion_limit = "256"]

use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use tokio::io::BufReader;
use tracing_subscriber::{fmt, EnvFilter};

use falkor_core::{GatewayConfig, QueryParams};
use falkor_gateway::Gateway;
use falkor_graph::FalkorConnector;

#[derive(Parser)]
#[command(name = "falkor-gateway")]
#[command(about = "Tool gateway for FalkorDB graph queries and introspection")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Execute a Cypher query against a graph.
    Query {
        /// Graph name.
        #[arg(short, long)]
        graph: String,
        /// Cypher query text.
        #[arg(short, long)]
        query: String,
        /// Query parameters as a JSON object, e.g. '{"name": "Alice"}'.
        #[arg(short, long)]
        params: Option<String>,
    },
    /// List all graphs.
    ListGraphs,
    /// Show the labels of a graph.
    Metadata {
        /// Graph name.
        #[arg(short, long)]
        graph: String,
    },
    /// Show connection status and server address.
    Status,
    /// Answer JSON tool requests from stdin, one per line.
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .json()
        .init();

    let cli = Cli::parse();

    let config = GatewayConfig::load().map_err(|e| {
        tracing::error!(error = %e, "Invalid FalkorDB configuration");
        e
    })?;
    tracing::info!(addr = %config, "FalkorDB gateway starting");

    let gateway = Gateway::with_connector(FalkorConnector, Arc::new(config));

    let response = match cli.command {
        Command::Query {
            graph,
            query,
            params,
        } => {
            let params = params
                .as_deref()
                .map(serde_json::from_str::<QueryParams>)
                .transpose()
                .map_err(|e| anyhow::anyhow!("Invalid --params JSON: {e}"))?;
            gateway
                .execute_query(&graph, &query, params.as_ref())
                .await
                .to_json()
        }
        Command::ListGraphs => gateway.list_graphs().await.to_json(),
        Command::Metadata { graph } => gateway.get_graph_metadata(&graph).await.to_json(),
        Command::Status => gateway.status_resource().await.to_json(),
        Command::Serve => {
            tracing::info!("Serving tool requests on stdin");
            let served = gateway
                .serve(BufReader::new(tokio::io::stdin()), tokio::io::stdout())
                .await;
            gateway.shutdown().await;
            served?;
            tracing::info!("Input closed, shutting down");
            return Ok(ExitCode::SUCCESS);
        }
    };

    gateway.shutdown().await;
    println!("{}", serde_json::to_string_pretty(&response)?);

    if response["outcome"] == "success" {
        Ok(ExitCode::SUCCESS)
    } else {
        Ok(ExitCode::FAILURE)
    }
}
