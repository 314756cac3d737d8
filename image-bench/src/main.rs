use anyhow::Result;
use log::info;
use std::{io::stdout, path::PathBuf, process};
use structopt::StructOpt;

use backends::CliEngine;
use config::BenchConfig;
use runner::{Benchmark, Outcome};

mod backends;
mod config;
mod models;
mod runner;
mod services;
mod units;

#[derive(Debug, StructOpt)]
#[structopt(
    name = "image-bench",
    about = "Builds the same project with several Dockerfiles and compares image size and build time."
)]
struct Opt {
    #[structopt(long, parse(from_os_str))]
    /// YAML file listing the images to compare.
    config: Option<PathBuf>,

    #[structopt(long)]
    /// Container engine executable, e.g. docker or podman.
    engine: Option<String>,

    #[structopt(long, parse(from_os_str))]
    /// Build context directory.
    context: Option<PathBuf>,

    #[structopt(long)]
    /// Remove the built images when done.
    cleanup: bool,
}

fn main() -> Result<()> {
    pretty_env_logger::init_custom_env("LOG");

    let opt = Opt::from_args();

    let mut config = match opt.config {
        Some(path) => BenchConfig::load(path)?,
        None => BenchConfig::default(),
    };
    if let Some(engine) = opt.engine {
        config.engine = engine;
    }
    if let Some(context) = opt.context {
        config.context = context;
    }
    config.cleanup |= opt.cleanup;
    info!("using {:?}", config);

    let engine = CliEngine::new(config.engine.clone());
    let mut benchmark = Benchmark::new(engine, config);

    let mut stdout = stdout();
    match benchmark.run(&mut stdout)? {
        Outcome::Aborted => process::exit(1),
        Outcome::Completed(results) => info!("measured {} images", results.len()),
    }

    Ok(())
}
