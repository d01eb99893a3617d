//! finflow-runner: headless pipeline runner for FinFlow.
//!
//! Usage:
//!   finflow-runner --raw-dir data/raw --out-dir data/analytics
//!   finflow-runner --config finflow.json --json

use anyhow::Result;
use finflow_core::{config::PipelineConfig, pipeline::DataPipeline};
use std::env;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let json_mode = args.iter().any(|a| a == "--json");

    let mut config = match flag_value(&args, "--config") {
        Some(path) => PipelineConfig::load(path)?,
        None => PipelineConfig::default(),
    };
    if let Some(raw) = flag_value(&args, "--raw-dir") {
        config.raw_data_dir = raw.into();
    }
    if let Some(out) = flag_value(&args, "--out-dir") {
        config.analytics_dir = out.into();
    }

    if !json_mode {
        println!("FinFlow data pipeline");
        println!("  raw dir:   {}", config.raw_data_dir.display());
        println!("  out dir:   {}", config.analytics_dir.display());
        println!();
    }

    let pipeline = DataPipeline::new(config);
    let outcome = pipeline.run()?;

    if json_mode {
        println!("{}", serde_json::to_string_pretty(&outcome)?);
    } else {
        println!("=== RUN SUMMARY ===");
        println!("  customers:     {}", outcome.customers_loaded);
        println!("  transactions:  {}", outcome.transactions_loaded);
        println!("  loans:         {}", outcome.loans_loaded);
        println!(
            "  quality:       {}",
            if outcome.quality.passed() { "passed" } else { "failed" }
        );
        println!("  elapsed:       {:.1} sec", outcome.timings.total.as_secs_f64());
        println!();
        print!("{}", pipeline.summary(&outcome));
    }

    Ok(())
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
