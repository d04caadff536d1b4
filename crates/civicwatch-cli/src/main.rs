//! CivicWatch CLI: the `civicwatch` command.

mod cli;
mod commands;
mod support;

use clap::Parser;
use cli::{Cli, Commands};
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Submit {
            title,
            description,
            category,
            custom_category,
            severity,
            image,
            lat,
            lon,
            address,
            user,
            at,
            config,
            issues,
            json,
        } => commands::submit::run(commands::submit::Args {
            title,
            description,
            category,
            custom_category,
            severity,
            image,
            lat,
            lon,
            address,
            user,
            at,
            config,
            issues,
            json,
        }),

        Commands::Update {
            id,
            status,
            description,
            by,
            issues,
            json,
        } => commands::update::run(id, status, description, by, issues, json),

        Commands::List {
            category,
            severity,
            status,
            zone,
            overdue,
            limit,
            config,
            issues,
            json,
        } => commands::list::run(commands::list::Args {
            category,
            severity,
            status,
            zone,
            overdue,
            limit,
            config,
            issues,
            json,
        }),

        Commands::Show {
            id,
            config,
            issues,
            json,
        } => commands::show::run(id, config, issues, json),

        Commands::Share {
            token,
            config,
            issues,
            json,
        } => commands::share::run(token, config, issues, json),

        Commands::Stats { issues, json } => commands::stats::run(issues, json),
    }
}
