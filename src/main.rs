//! Command-line interface for leaf_health
//!
//! Classifies one leaf photograph against the healthy reference baseline.

use clap::error::ErrorKind;
use clap::Parser;
use leaf_health::image_loader::load_image;
use leaf_health::{
    logger, AnalysisError, BaselineProfiler, FeaturePipeline, HealthReport, PipelineConfig, Result,
};
use std::path::PathBuf;
use std::process;
use tracing::debug;

#[derive(Parser, Debug)]
#[command(name = "leaf_health", version, about = "Screen a leaf photograph for nutrient deficiency")]
struct Args {
    /// Leaf photograph to classify
    #[arg(long)]
    image: PathBuf,

    /// JSON configuration naming the three healthy reference images
    #[arg(long)]
    config: Option<PathBuf>,

    /// Keep background pixels instead of masking them out
    #[arg(long)]
    no_mask: bool,

    /// Print the full report as JSON
    #[arg(long)]
    json: bool,
}

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => e.exit(),
        Err(e) => {
            let usage = AnalysisError::UsageError { message: e.to_string() };
            eprint!("{}", e.render());
            eprintln!("{}", usage.user_message());
            process::exit(usage.exit_code());
        }
    };
    logger::init();

    match run(&args) {
        Ok(report) => print_report(&report, args.json),
        Err(err) => {
            eprintln!("Analysis failed: {}", err);
            eprintln!("{}", err.user_message());
            process::exit(err.exit_code());
        }
    }
}

fn run(args: &Args) -> Result<HealthReport> {
    let mut config = match &args.config {
        Some(path) => PipelineConfig::from_json_file(path)?,
        None => PipelineConfig::default_reference_set(),
    };
    if args.no_mask {
        config.leaf_masking = false;
    }

    debug!(?config, "configuration resolved");
    let pipeline = FeaturePipeline::with_masking(config.leaf_masking);

    // Load the test image first so a bad --image is reported as such.
    let image = load_image(&args.image)?;
    let features = pipeline.features(&image)?;

    let baseline = BaselineProfiler::new(pipeline).profile(&config)?;
    Ok(HealthReport::from_features(features, &baseline))
}

fn print_report(report: &HealthReport, json: bool) {
    if json {
        match serde_json::to_string_pretty(report) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error serializing report: {}", e);
                process::exit(1);
            }
        }
        return;
    }

    println!("Hue difference: {:.2}", report.difference.hue_diff);
    println!("Saturation difference: {:.2}", report.difference.saturation_diff);
    println!("Value difference: {:.2}", report.difference.value_diff);
    println!("Classification: {}", report.classification);
}
