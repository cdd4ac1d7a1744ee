use clap::Parser;

use mandelbrot_explorer::{CliArgs, run_cli};

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = CliArgs::parse();
    run_cli(&args)
}
