mod cli;
mod commands;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() -> miette::Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Render {
            name,
            data,
            layout,
            lang,
            source,
        } => commands::render::run(&source, name, data, layout, lang),
        Commands::List { source } => commands::list::run(&source),
        Commands::Check { source } => commands::check::run(&source),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose { "velvet=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
