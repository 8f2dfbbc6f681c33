//! CFP CLI - run the estimation proxy or submit lifestyle data to it.

use clap::Parser;

#[derive(Parser)]
#[command(
    name = "cfp-cli",
    version,
    about = "AI-assisted carbon footprint estimator"
)]
struct Cli {
    #[command(subcommand)]
    command: cfp_cmd::Command,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    log::debug!("Starting cfp-cli {}", env!("CARGO_PKG_VERSION"));
    cfp_cmd::run(cli.command).await
}
