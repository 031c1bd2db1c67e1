use anyhow::Result;
use clap::Parser;
use heart_risk::cli::Cli;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("heart_risk=info".parse()?),
        )
        .init();

    let cli = Cli::parse();
    cli.run()
}
