use brrtmvc::cli::{init_logging, run_cli, Cli};
use clap::Parser;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_format)?;
    run_cli(cli)
}
