use std::fs::File;
use std::io::Write;
use std::path::Path;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use serde_json::json;

use motifseq::{generate_motifs_with, read_sequence_text, tokenize, MotifConfig};

/// Discover recurring motifs in a comma-separated symbolic sequence.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// File containing the comma-separated sequence (gzip supported)
    input: Option<String>,

    /// Inline comma-separated sequence (alternative to the input file)
    #[arg(long, short = 's')]
    sequence: Option<String>,

    /// Minimum number of occurrences a motif must have
    #[arg(long, default_value_t = 2)]
    min_frequency: usize,

    /// Maximum gap between a motif occurrence and its extension
    #[arg(long, default_value_t = 1)]
    max_gap: usize,

    /// Minimum motif length to report
    #[arg(long, default_value_t = 1)]
    min_length: usize,

    /// Maximum motif length
    #[arg(long, default_value_t = 4)]
    max_length: usize,

    /// Optional output JSON file for the discovered motifs
    #[arg(long)]
    output_json: Option<String>,

    /// Enable threaded merging (default: off)
    #[arg(long, default_value_t = false)]
    threads: bool,

    /// Number of worker threads for merging (default: max available - 1)
    #[arg(long, default_value_t = num_cpus::get() - 1)]
    max_workers: usize,

    /// Verbose/info output (default: quiet)
    #[arg(long, short = 'v', alias = "info")]
    verbose: bool,

    /// Debug output
    #[arg(long)]
    debug: bool,

    /// Trace output
    #[arg(long)]
    trace: bool,
}

fn main() {
    let args = Args::parse();
    let log_level = if args.trace {
        "trace"
    } else if args.debug {
        "debug"
    } else if args.verbose {
        "info"
    } else {
        "error"
    };
    std::env::set_var("RUST_LOG", log_level);
    env_logger::init();

    if let Err(error) = run_pipeline(&args) {
        eprintln!("Motif discovery failed: {error:?}");
        std::process::exit(1);
    }
}

fn run_pipeline(args: &Args) -> Result<()> {
    let text = match (&args.input, &args.sequence) {
        (Some(path), None) => read_sequence_text(Path::new(path))
            .with_context(|| format!("Failed to read sequence from {path}"))?,
        (None, Some(inline)) => inline.clone(),
        (Some(_), Some(_)) => bail!("Provide either an input file or --sequence, not both"),
        (None, None) => bail!("Provide an input file or --sequence"),
    };

    let units = tokenize(&text);
    info!("Tokenized {} units", units.len());

    let config = MotifConfig {
        min_frequency: args.min_frequency,
        max_gap: args.max_gap,
        min_length: args.min_length,
        max_length: args.max_length,
        use_threads: args.threads,
        max_workers: args.max_workers,
    };
    let motifs = generate_motifs_with(&units, config).context("Motif generation failed")?;
    info!("Discovered {} motifs", motifs.len());

    if let Some(json_path) = &args.output_json {
        if let Some(parent) = Path::new(json_path).parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let motifs_json: Vec<_> = motifs
            .iter()
            .map(|motif| {
                json!({
                    "units": motif.units().iter().map(|unit| unit.name()).collect::<Vec<_>>(),
                    "frequency": motif.frequency(),
                    "positions": motif
                        .positions()
                        .iter()
                        .map(|position| json!({"start": position.start, "length": position.length}))
                        .collect::<Vec<_>>(),
                })
            })
            .collect();
        let output = json!({
            "parameters": {
                "min_frequency": args.min_frequency,
                "max_gap": args.max_gap,
                "min_length": args.min_length,
                "max_length": args.max_length,
            },
            "motifs": motifs_json,
        });
        let mut file = File::create(json_path)?;
        writeln!(file, "{}", serde_json::to_string_pretty(&output)?)?;
        info!("Motifs written to {json_path}");
    } else {
        for motif in &motifs {
            println!("{motif}");
        }
    }

    Ok(())
}
