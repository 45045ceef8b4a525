//! PBS CLI - Streamflow estimation and forecasting for the Polochic basin.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "pbs-cli",
    version,
    about = "Polochic basin streamflow forecasting toolkit"
)]
struct Cli {
    #[command(subcommand)]
    command: pbs_cmd::Command,
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();
    pbs_cmd::run(cli.command)
}
