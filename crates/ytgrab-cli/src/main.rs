//! CLI entry point - the composition root.

use clap::Parser;

use ytgrab_cli::{Cli, Commands, init_tracing};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env before parsing so it can feed clap's `env` defaults
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Web(args) => ytgrab_axum::start_server(args.into_config()).await,
        Commands::Static(args) => ytgrab_axum::start_static_server(args.into_config()?).await,
    }
}
