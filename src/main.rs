use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use rolegraph::domain;
use rolegraph::export::{self, ExportFormat};
use rolegraph::grapher::{build_graph, GraphOptions};

#[derive(Parser)]
#[command(name = "rolegraph")]
#[command(author = "Zachary Woods <143150513+zach-fau@users.noreply.github.com>")]
#[command(version)]
#[command(about = "Graph visualizer for playbooks, roles, tasks and variables", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Build a graph from a JSON domain tree and export it
    Render {
        /// Domain tree produced by the playbook loader
        path: PathBuf,

        /// Keep variable nodes in the graph
        #[arg(long)]
        show_vars: bool,

        /// Output format: dot or json
        #[arg(short, long, default_value = "dot")]
        format: ExportFormat,

        /// Output file path (writes to stdout if omitted)
        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Reject dangling references and identity collisions
        #[arg(long)]
        strict: bool,
    },
    /// Show version information
    Version,
}

fn render(
    path: &Path,
    options: &GraphOptions,
    format: ExportFormat,
    output: Option<&Path>,
    strict: bool,
) -> Result<()> {
    let tree = domain::parse_file(path)
        .with_context(|| format!("failed to load domain tree from {}", path.display()))?;
    if strict {
        domain::validate(&tree)?;
    }
    tracing::info!(
        roles = tree.role.len(),
        playbooks = tree.playbook.len(),
        "loaded domain tree"
    );

    let graph = build_graph(&tree, options);

    match output {
        Some(out) => {
            let file = File::create(out)
                .with_context(|| format!("failed to create {}", out.display()))?;
            let mut writer = BufWriter::new(file);
            export::export(format, &graph, &mut writer)?;
            writer.flush()?;
            tracing::info!(path = %out.display(), %format, "output written");
        }
        None => {
            let stdout = io::stdout();
            export::export(format, &graph, &mut stdout.lock())?;
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_writer(std::io::stderr)
            .init();
    }

    let cli = Cli::parse();

    match &cli.command {
        Some(Commands::Render {
            path,
            show_vars,
            format,
            output,
            strict,
        }) => {
            let options = GraphOptions {
                show_vars: *show_vars,
            };
            render(path, &options, *format, output.as_deref(), *strict)?;
        }
        Some(Commands::Version) => {
            println!("rolegraph v{}", env!("CARGO_PKG_VERSION"));
        }
        None => {
            println!("Rolegraph - playbook graph visualizer");
            println!("Run 'rolegraph render <domain.json>' to build a graph");
            println!("Run 'rolegraph --help' for more information");
        }
    }
    Ok(())
}
