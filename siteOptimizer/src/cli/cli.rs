use chrono::NaiveDate;
use clap::Parser;

use crate::config::optimizer_config::OptimizerConfig;

#[derive(Parser)]
#[command(author, version, about = "Recommends solar installation sites on a classified terrain scene", long_about = None)]
pub struct Args {
    #[arg(help = "Scene JSON produced by the vision and geospatial stages")]
    scene: String,

    #[arg(short, long, help = "Optimizer configuration JSON; defaults apply when omitted")]
    config: Option<String>,

    #[arg(short = 'p', long)]
    population_size: Option<usize>,

    #[arg(short = 'g', long)]
    max_generations: Option<usize>,

    #[arg(short = 'n', long)]
    top_n: Option<usize>,

    #[arg(long, help = "Random seed for deterministic runs")]
    seed: Option<u64>,

    #[arg(short, long, help = "Reference date for shadow prediction (YYYY-MM-DD), today when omitted")]
    date: Option<NaiveDate>,

    #[arg(long, help = "Processing budget in seconds")]
    timeout: Option<u64>,

    #[arg(long, help = "Re-score offspring with the full scorer instead of inheriting a decayed parent score", default_value_t = false)]
    rescore_offspring: bool,

    #[arg(short, long, default_value = "output")]
    output_dir: String,

    #[arg(long, default_value_t = false)]
    enable_timing: bool,

    #[arg(long, default_value_t = false)]
    debug_logging: bool,

    #[arg(long, default_value_t = false)]
    no_progress: bool,
}

impl Args {
    pub fn scene(&self) -> &str {
        &self.scene
    }

    pub fn config(&self) -> Option<&str> {
        self.config.as_deref()
    }

    pub fn date(&self) -> Option<NaiveDate> {
        self.date
    }

    pub fn output_dir(&self) -> &str {
        &self.output_dir
    }

    pub fn enable_timing(&self) -> bool {
        self.enable_timing
    }

    pub fn debug_logging(&self) -> bool {
        self.debug_logging
    }

    pub fn show_progress(&self) -> bool {
        !self.no_progress
    }

    pub fn apply_overrides(&self, config: &mut OptimizerConfig) {
        let opt = &mut config.optimization;
        if let Some(population_size) = self.population_size {
            opt.population_size = population_size;
        }
        if let Some(max_generations) = self.max_generations {
            opt.max_generations = max_generations;
        }
        if let Some(top_n) = self.top_n {
            opt.top_n = top_n;
        }
        if self.rescore_offspring {
            opt.offspring_scoring = crate::config::optimizer_config::OffspringScoring::Rescore;
        }
        if let Some(timeout) = self.timeout {
            config.processing_timeout_secs = timeout;
        }
        if self.seed.is_some() {
            config.seed = self.seed;
        }
    }
}
