use std::path::Path;

use anyhow::{Context, bail};
use facility_registry::{Pipeline, PipelineConfig};
use log::info;

#[global_allocator]
static ALLOC: snmalloc_rs::SnMalloc = snmalloc_rs::SnMalloc;

const USAGE: &str = "usage: facility-pipeline [prepare|geo|all] [config.json]";

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let mut args = std::env::args().skip(1);
    let phase = args.next().unwrap_or_else(|| "all".to_string());

    let config = match args.next() {
        Some(path) => PipelineConfig::from_json_file(Path::new(&path))
            .with_context(|| format!("loading configuration from {path}"))?,
        None => PipelineConfig::from_env().context("reading configuration from the environment")?,
    };
    info!(
        "Working directory {}, data month {}",
        config.work_dir().display(),
        config.data_month
    );

    let pipeline = Pipeline::new(&config);
    match phase.as_str() {
        "prepare" => pipeline.run_prepare().context("prepare phase failed")?,
        "geo" => pipeline.run_geo().context("geo phase failed")?,
        "all" => pipeline.run_all().context("pipeline failed")?,
        other => bail!("unknown phase '{other}'\n{USAGE}"),
    }

    Ok(())
}
