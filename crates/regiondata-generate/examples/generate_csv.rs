use std::env;
use std::path::PathBuf;

use regiondata_core::{DatasetKind, GeneratorConfig};
use regiondata_generate::GenerationEngine;
use tracing_subscriber::EnvFilter;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let mut args = env::args().skip(1);
    let mut config = GeneratorConfig::default();

    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--out" => {
                config.out_dir = args.next().map(PathBuf::from).ok_or("missing --out path")?
            }
            "--seed" => config.seed = Some(args.next().ok_or("missing --seed value")?.parse()?),
            _ => return Err(format!("unexpected argument '{arg}'").into()),
        }
    }

    let engine = GenerationEngine::new(config);
    let result = engine.run(&DatasetKind::ALL)?;

    for dataset in &result.report.datasets {
        println!("{}={}", dataset.dataset, dataset.path.display());
    }
    Ok(())
}
