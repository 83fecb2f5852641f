use anyhow::Context;
use clap::Parser;
use tessera_app::{logging, Args};

fn main() -> anyhow::Result<()> {
    let config = Args::parse().app_config()?;

    logging::init(config.level_filter()?).context("failed to install logger")?;
    log::debug!("config: {config:?}");

    let report = tessera_app::run(&config)?;
    println!("{report}");
    Ok(())
}
