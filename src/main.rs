//! Stackfleet CLI - package and deploy stack sets across a fleet
//!
//! Usage: stackfleet <COMMAND>
//!
//! Commands:
//!   package  Package the template for every target and upload it
//!   deploy   Package, then create or update the stack set and its instances

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod ui;

use cli::{Cli, Commands};
use ui::context::UiContext;

fn main() {
    let cli = Cli::parse();
    let ui = UiContext::new(cli.json, cli.verbose, cli.color);

    if let Err(err) = run(&cli, &ui) {
        ui::error::print_error(&err, &ui);
        std::process::exit(1);
    }
}

fn run(cli: &Cli, ui: &UiContext) -> Result<()> {
    let config = commands::load_deploy_config(cli.config.as_deref(), cli.command.fleet(), ui)?;

    match &cli.command {
        Commands::Package { .. } => commands::cmd_package(&config, ui),
        Commands::Deploy { .. } => commands::cmd_deploy(&config, ui),
    }
}
