use self::args::{ToolArgs, ToolSubcommand};
use clap::Parser;
use std::env;
use tracing_subscriber::{
    filter::{LevelFilter, Targets},
    layer::SubscriberExt,
    Layer, Registry,
};

mod args;
mod parse_header;
mod sign;
mod util;
mod verify;

fn initialise_logging() -> miette::Result<()> {
    let env_filter = env::var("RUST_LOG")
        .ok()
        .and_then(|targets| targets.parse().ok())
        .unwrap_or_else(|| Targets::default().with_default(LevelFilter::INFO));

    let subscriber = Registry::default().with(
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_filter(env_filter),
    );

    tracing::subscriber::set_global_default(subscriber)
        .map_err(|err| miette::miette!("Couldn't install the global tracing subscriber: {err}"))?;

    Ok(())
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> miette::Result<()> {
    initialise_logging()?;

    let args = ToolArgs::parse();
    match args.subcommand {
        ToolSubcommand::ParseHeader(args) => parse_header::header(args),
        ToolSubcommand::ParseInput(args) => parse_header::input(args),
        ToolSubcommand::Sign(args) => sign::run(args).await,
        ToolSubcommand::Verify(args) => verify::run(args).await,
    }
}
