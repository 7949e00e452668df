use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use ocrscore::input::{load_ground_truth, load_ocr_results};
use ocrscore::pipeline::{evaluate, EvalConfig, DEFAULT_IOU_THRESHOLD};
use ocrscore::report;

#[derive(Parser, Debug)]
#[command(name = "ocrscore")]
#[command(version, about = "OCR accuracy review: CER and IoU scoring against ground-truth annotations", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable diagnostic logging on stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Score OCR results against ground-truth annotations
    Evaluate {
        /// OCR results CSV (page,block_id,x0,y0,x1,y1,text,confidence)
        #[arg(long)]
        ocr_csv: PathBuf,

        /// Ground-truth JSON keyed by page number
        #[arg(long)]
        ground_truth: PathBuf,

        /// Minimum IoU for a ground-truth/prediction match
        #[arg(long, default_value_t = DEFAULT_IOU_THRESHOLD)]
        iou_threshold: f64,

        /// Apply NFC normalization to all text before scoring
        #[arg(long)]
        normalize: bool,

        /// Also write the report as JSON to this path
        #[arg(long)]
        json: Option<PathBuf>,
    },

    /// Show page and region counts for an input file
    Info {
        /// OCR results CSV or ground-truth JSON (selected by extension)
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let level = if cli.verbose {
        Level::DEBUG
    } else {
        Level::WARN
    };
    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    match cli.command {
        Commands::Evaluate {
            ocr_csv,
            ground_truth,
            iou_threshold,
            normalize,
            json,
        } => run_evaluate(ocr_csv, ground_truth, iou_threshold, normalize, json),
        Commands::Info { input } => show_info(input),
    }
}

fn run_evaluate(
    ocr_csv: PathBuf,
    ground_truth: PathBuf,
    iou_threshold: f64,
    normalize: bool,
    json: Option<PathBuf>,
) -> Result<()> {
    let config = EvalConfig {
        ocr_csv,
        ground_truth,
        iou_threshold,
        normalize,
    };

    let result = evaluate(&config)?;
    print!("{}", report::render(&result));

    if let Some(path) = json {
        let data = serde_json::to_string_pretty(&result)?;
        std::fs::write(&path, data)
            .with_context(|| format!("failed to write JSON report: {}", path.display()))?;
    }

    Ok(())
}

fn show_info(input: PathBuf) -> Result<()> {
    let pages = match input.extension().and_then(|e| e.to_str()) {
        Some("csv") => load_ocr_results(&input)?,
        Some("json") => load_ground_truth(&input)?,
        _ => anyhow::bail!(
            "unsupported input type: {} (expected .csv or .json)",
            input.display()
        ),
    };

    println!("File: {}", input.display());
    println!("Pages: {}", pages.len());
    println!(
        "Regions: {}",
        pages.values().map(Vec::len).sum::<usize>()
    );
    for (page, regions) in &pages {
        println!("  Page {}: {} region(s)", page, regions.len());
    }

    Ok(())
}
