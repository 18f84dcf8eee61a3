use anyhow::Result;
use clap::Parser;
use rab_core::DatasetConfig;
use rab_proto::load_dataset;

/// Converts a base64-encoded session log into a trajectory dataset.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Args {
    /// Session log file
    path: String,

    /// Dataset configuration in YAML, defaults to the claw game layout
    #[arg(long)]
    config: Option<String>,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let args = Args::parse();

    let config = match &args.config {
        Some(path) => DatasetConfig::load(path)?,
        None => DatasetConfig::default(),
    };
    let dataset = load_dataset(&args.path, &config)?;
    dataset.log_stats();

    println!("actions: {:?}", dataset.actions.shape());
    println!("observations: {:?}", dataset.observations.shape());
    println!("rewards: {:?}", dataset.rewards.shape());
    println!("step_types: {:?}", dataset.step_types.shape());
    println!("next_step_types: {:?}", dataset.next_step_types.shape());

    Ok(())
}
