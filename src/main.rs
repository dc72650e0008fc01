use anyhow::Result;
use clap::Parser;
use spendbook::cli::Cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    cli.run().await
}

/// Initialize logging with tracing. `RUST_LOG` overrides the defaults.
fn init_logging(verbose: bool) {
    let default_filter = if verbose {
        "spendbook=debug,tower_http=debug"
    } else {
        "spendbook=info,tower_http=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
