//! cpk-view: print the summary and tree of a CPK package
//!
//! Usage:
//!   cpk-view model.cpk
//!   cpk-view --format paths model.cpk
//!   CPK_MAX_DEPTH=64 cpk-view --summary-only untrusted.cpk

use std::path::PathBuf;

use anyhow::{Context, Result, anyhow};
use clap::Parser;
use tracing::info;

use cpk::{DEFAULT_MAX_DEPTH, Decoder, DecoderConfig, RendererRegistry};

/// Inspect a CPK package
#[derive(Parser, Debug)]
#[command(name = "cpk-view")]
#[command(about = "Print the summary and node tree of a CPK package")]
struct Args {
    /// Package file to read
    file: PathBuf,

    /// Renderer to use (tree, paths)
    #[arg(long, short = 'f', default_value = "tree")]
    format: String,

    /// Reject packages nested deeper than this
    #[arg(long, env = "CPK_MAX_DEPTH", default_value_t = DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Only print the one-line summary
    #[arg(long)]
    summary_only: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let registry = RendererRegistry::with_builtins();
    let renderer = registry.create(&args.format).with_context(|| {
        let known: Vec<&str> = registry.keys().collect();
        format!("available formats: {}", known.join(", "))
    })?;

    let decoder = Decoder::new(DecoderConfig::default().with_max_depth(args.max_depth));
    let package = decoder
        .decode_file(&args.file)
        .with_context(|| format!("Failed to decode {}", args.file.display()))?;

    let summary = package.summary();
    info!(
        file = %args.file.display(),
        nodes = summary.total_nodes,
        "loaded package"
    );
    println!("{}", summary);

    if args.summary_only {
        return Ok(());
    }

    let mut out = String::new();
    renderer
        .render(&package, &mut out)
        .map_err(|_| anyhow!("renderer {:?} failed", args.format))?;
    print!("{}", out);

    Ok(())
}
