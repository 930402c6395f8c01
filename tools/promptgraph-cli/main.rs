//! CLI: Extract prompts or the full workflow JSON from PNG images with an embedded workflow.
//!
//! Usage: `promptgraph-cli (-f <PNG> | -d <DIR>) [-o <DIR>] [--json | --both] [--force]`
//!
//! Set RUST_LOG=promptgraph=debug to see every candidate node and link the resolver inspects.

use clap::{ArgGroup, Parser};
use promptgraph::export::{self, ExportMode, ExtractOptions, ExtractSummary};
use promptgraph::prelude::*;
use std::path::PathBuf;
use std::process;
use std::time::Instant;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Extract prompts or full workflow JSON from PNG images with an embedded workflow,
/// from a single file or a directory.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
#[command(group(ArgGroup::new("input").required(true).args(["file", "directory"])))]
struct Cli {
    /// Path to a single PNG image file with an embedded workflow
    #[arg(short, long, value_name = "PNG")]
    file: Option<PathBuf>,

    /// Path to a directory containing PNG image files
    #[arg(short, long, value_name = "DIR")]
    directory: Option<PathBuf>,

    /// Directory for the extracted files. Defaults to the source file's directory
    #[arg(short, long, value_name = "DIR", alias = "output_dir")]
    output_dir: Option<PathBuf>,

    /// Extract the full workflow JSON instead of the prompt text (.json instead of .txt).
    /// Takes precedence over --both
    #[arg(short, long)]
    json: bool,

    /// Write both positive and negative prompts as JSON instead of a single text file
    #[arg(long)]
    both: bool,

    /// Overwrite existing output files instead of skipping them
    #[arg(long)]
    force: bool,

    /// Breadth-first layers searched when checking whether a sampler reaches an output node
    #[arg(long, value_name = "N", default_value_t = DEFAULT_MAX_HOPS)]
    max_hops: usize,
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let cli = Cli::parse();
    let start = Instant::now();

    let output_dir = resolve_output_dir(&cli);
    let options = ExtractOptions::new(output_dir)
        .with_mode(export_mode(&cli))
        .with_force(cli.force);
    let resolver = PromptResolver::builder().max_hops(cli.max_hops).build();

    let inputs = collect_inputs(&cli);
    let mut summary = ExtractSummary::default();
    for input in &inputs {
        let result = export::process_image(input, &options, &resolver);
        if let Err(e) = &result {
            error!(input = %input.display(), "{}", e);
        }
        summary.record(&result);
        if inputs.len() > 1 {
            info!("---");
        }
    }

    info!(
        written = summary.written,
        skipped = summary.skipped,
        no_workflow = summary.without_workflow,
        no_prompt = summary.without_prompt,
        failed = summary.failed,
        elapsed = ?start.elapsed(),
        "processing complete"
    );
}

fn export_mode(cli: &Cli) -> ExportMode {
    if cli.json {
        ExportMode::Workflow
    } else if cli.both {
        ExportMode::Both
    } else {
        ExportMode::Prompt
    }
}

/// The explicit output directory (created if needed), or the input's own directory.
fn resolve_output_dir(cli: &Cli) -> PathBuf {
    let dir = match (&cli.output_dir, &cli.file, &cli.directory) {
        (Some(dir), _, _) => {
            if !dir.is_dir() {
                export::ensure_output_dir(dir).unwrap_or_else(|e| {
                    exit_with_error(&format!("Could not create output directory: {}", e))
                });
                info!(dir = %dir.display(), "created output directory");
            }
            dir.clone()
        }
        (None, Some(file), _) => file
            .parent()
            .map(|parent| parent.to_path_buf())
            .unwrap_or_default(),
        (None, None, Some(directory)) => directory.clone(),
        (None, None, None) => exit_with_error("Either --file or --directory is required."),
    };

    // An empty parent means the current directory.
    let dir = if dir.as_os_str().is_empty() {
        PathBuf::from(".")
    } else {
        dir
    };
    if !dir.is_dir() {
        exit_with_error(&format!(
            "Output directory '{}' is not valid or could not be determined.",
            dir.display()
        ));
    }
    dir
}

fn collect_inputs(cli: &Cli) -> Vec<PathBuf> {
    if let Some(file) = &cli.file {
        if !file.is_file() {
            exit_with_error(&format!("File not found at {}", file.display()));
        }
        return vec![file.clone()];
    }

    let Some(directory) = &cli.directory else {
        exit_with_error("Either --file or --directory is required.");
    };
    if !directory.is_dir() {
        exit_with_error(&format!("Directory not found at {}", directory.display()));
    }
    let files = export::png_files_in(directory).unwrap_or_else(|e| {
        exit_with_error(&format!("Could not list {}: {}", directory.display(), e))
    });
    if files.is_empty() {
        info!(directory = %directory.display(), "no PNG files found");
    } else {
        info!(directory = %directory.display(), count = files.len(), "found PNG files");
    }
    files
}

fn exit_with_error(message: &str) -> ! {
    eprintln!("\nError: {}", message);
    process::exit(1);
}
