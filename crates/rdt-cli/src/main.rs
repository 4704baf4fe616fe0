//! CLI entry point - the composition root.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use rdt_cli::{Cli, CliConfig, CliError, Commands, bootstrap, handlers};

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(mut cli: Cli) -> Result<(), CliError> {
    let Some(command) = cli.command.take() else {
        Cli::command()
            .print_help()
            .map_err(|e| CliError::Arguments(e.to_string()))?;
        return Ok(());
    };

    let config = CliConfig::from_cli(&cli)?;
    let ctx = bootstrap(config)?;

    match command {
        Commands::Download { uri, path, gid } => {
            let args = handlers::download::DownloadArgs { uri, path, gid };
            handlers::download::execute(&ctx, args).await
        }
        Commands::Status { gid, json } => handlers::control::status(&ctx, &gid, json).await,
        Commands::Pause { gid } => handlers::control::pause(&ctx, &gid).await,
        Commands::Resume { gid } => handlers::control::resume(&ctx, &gid).await,
        Commands::Remove { gid } => handlers::control::remove(&ctx, &gid).await,
        Commands::Ping => handlers::ping::execute(&ctx).await,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before clap reads RDT_ARIA2_*
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        std::process::exit(err.exit_code());
    }
    Ok(())
}
