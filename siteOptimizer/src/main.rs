use std::path::Path;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing::info;

use solar_siting::analysis::reporting;
use solar_siting::cli::cli::Args;
use solar_siting::config::optimizer_config::OptimizerConfig;
use solar_siting::core::pipeline::{default_reference_date, SiteOptimizer};
use solar_siting::data::scene_loader::load_scene;
use solar_siting::utils::csv_export::{export_outcome_json, export_sites_csv};
use solar_siting::utils::logging;

fn main() -> Result<()> {
    let args = Args::parse();

    logging::init_logging(args.enable_timing(), args.debug_logging())
        .map_err(|e| anyhow!(e))
        .context("failed to initialize logging")?;

    println!("Solar Site Optimizer");
    println!("Debug logging: {}, Timing: {}",
             if args.debug_logging() { "enabled" } else { "disabled" },
             if args.enable_timing() { "enabled" } else { "disabled" });

    let mut config = match args.config() {
        Some(path) => OptimizerConfig::from_json_file(path)
            .with_context(|| format!("failed to load config from {}", path))?,
        None => OptimizerConfig::default(),
    };
    args.apply_overrides(&mut config);

    let scene = load_scene(args.scene())
        .with_context(|| format!("failed to load scene from {}", args.scene()))?;

    let mut rng = match config.seed {
        Some(seed) => {
            info!("Using seed {}", seed);
            StdRng::seed_from_u64(seed)
        }
        None => StdRng::from_entropy(),
    };

    let reference_date = args.date().unwrap_or_else(default_reference_date);
    let optimizer = SiteOptimizer::new(config)?.with_progress(args.show_progress());
    let outcome = optimizer.run(&scene, reference_date, &mut rng)?;

    reporting::print_sunlight_summary(&outcome);
    reporting::print_optimization_summary(&outcome);

    let output_dir = Path::new(args.output_dir());
    export_sites_csv(&outcome.candidate_sites, output_dir.join("candidate_sites.csv"))?;
    export_outcome_json(&outcome, output_dir.join("optimization_outcome.json"))?;
    println!("\nResults written to {}", output_dir.display());

    if logging::is_timing_enabled() {
        logging::print_timing_report();
    }

    Ok(())
}
