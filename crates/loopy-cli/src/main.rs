//! CLI entry point - the composition root.
//!
//! Infrastructure is wired together once via bootstrap, then command
//! dispatch routes to handlers.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use loopy_cli::handlers::open::OpenOptions;
use loopy_cli::{Cli, CliConfig, Commands, bootstrap, handlers};

/// Install the fmt subscriber on stderr so stdout stays machine-readable.
///
/// `RUST_LOG` wins over `--verbose` when set.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables before clap reads its env fallbacks
    dotenvy::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Dispatch to appropriate handler
    let Some(command) = cli.command else {
        // No command provided - show help
        use clap::CommandFactory;
        Cli::command().print_help()?;
        return Ok(());
    };

    // Hashing needs no context
    if let Commands::Hash { input } = &command {
        handlers::hash::execute(input);
        return Ok(());
    }

    // Bootstrap the CLI context (composition root)
    let ctx = bootstrap(CliConfig::from_args(&cli.device)?)?;

    match command {
        Commands::Device => handlers::device::execute(&ctx)?,
        Commands::App => handlers::app::execute(&ctx)?,
        Commands::Hash { .. } => {}
        Commands::Open {
            url_prefix,
            api_key,
            retries,
            dry_run,
        } => {
            let options = OpenOptions {
                url_prefix,
                api_key,
                retries,
                dry_run,
            };
            handlers::open::execute(&ctx, options).await?;
        }
        Commands::ResetAdId => handlers::reset::execute(&ctx)?,
    }

    Ok(())
}
