//! Mtrack CLI - maintenance tracker for the department's machines
//!
//! This is the command-line interface for Mtrack. It signs in against the
//! remote tracker API, records repairs and renders the repair reports built
//! by the core library.

mod app;
mod cli;
mod commands;
mod config;
mod constants;
mod errors;
mod helpers;
mod output;
mod ui;

use clap::Parser;
use mtrack_core::{TrackerError, VERSION};
use tracing_subscriber::EnvFilter;

use crate::app::AppContext;
use crate::cli::{Cli, Commands, MachinesSubcommand, RepairsSubcommand};
use crate::commands::{auth, machines, misc, repairs, report};
use crate::errors::exit_code_for;
use crate::ui::render::print_error;

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);
    let ctx = AppContext::new(&cli);

    if let Err(e) = run(&ctx, &cli) {
        tracing::debug!(error = ?e, "command failed");
        // Get UI context for error formatting
        let ui_ctx = ctx.ui_context(false, None);

        let error_msg = format!("{}", e);
        let hint = extract_error_hint(&e, &error_msg);
        let message = strip_hint(&error_msg);

        print_error(&ui_ctx, message, hint.as_deref());
        std::process::exit(exit_code_for(&e));
    }
}

/// Log to stderr. `RUST_LOG` wins; otherwise `-v` raises the level from warn.
fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

/// Message without an embedded "Hint:" line.
fn strip_hint(error: &str) -> &str {
    match error.find("\nHint:") {
        Some(idx) => &error[..idx],
        None => error,
    }
}

/// Extract a hint from an error message if it contains "Hint:",
/// or provide contextual hints for common error types.
fn extract_error_hint(error: &anyhow::Error, message: &str) -> Option<String> {
    // Check for explicit hint patterns in error messages
    if let Some(idx) = message.find("\nHint:") {
        return Some(message[idx + 1..].to_string());
    }

    match error.downcast_ref::<TrackerError>() {
        Some(TrackerError::Unauthorized(_)) => {
            Some("Hint: Your session may have expired. Run `mtrack login`.".to_string())
        }
        Some(TrackerError::Network(_)) => Some(
            "Hint: Check your connection, or point --api-url (MTRACK_API_URL) at the tracker API."
                .to_string(),
        ),
        Some(TrackerError::NotFound(what)) if what.contains("machine") => {
            Some("Hint: Run `mtrack machines list` to find machine IDs.".to_string())
        }
        Some(TrackerError::NotFound(_)) => {
            Some("Hint: Run `mtrack report` to find repair IDs.".to_string())
        }
        Some(TrackerError::Session(_)) => {
            Some("Hint: Run `mtrack logout`, then `mtrack login` again.".to_string())
        }
        _ => None,
    }
}

fn run(ctx: &AppContext, cli: &Cli) -> anyhow::Result<()> {
    match &cli.command {
        Some(Commands::Login(args)) => {
            auth::handle_login(ctx, args)?;
        }
        Some(Commands::Logout) => {
            auth::handle_logout(ctx)?;
        }
        Some(Commands::Register(args)) => {
            auth::handle_register(ctx, args)?;
        }
        Some(Commands::Whoami(args)) => {
            auth::handle_whoami(ctx, args)?;
        }
        Some(Commands::Machines(args)) => match &args.command {
            MachinesSubcommand::List(list_args) => {
                machines::handle_list(ctx, list_args)?;
            }
            MachinesSubcommand::Add(add_args) => {
                machines::handle_add(ctx, add_args)?;
            }
        },
        Some(Commands::Repairs(args)) => match &args.command {
            RepairsSubcommand::Add(add_args) => {
                repairs::handle_add(ctx, add_args)?;
            }
            RepairsSubcommand::Show(show_args) => {
                repairs::handle_show(ctx, show_args)?;
            }
            RepairsSubcommand::EditPrice(edit_args) => {
                repairs::handle_edit_price(ctx, edit_args)?;
            }
            RepairsSubcommand::Delete(delete_args) => {
                repairs::handle_delete(ctx, delete_args)?;
            }
            RepairsSubcommand::Types(types_args) => {
                repairs::handle_types(ctx, types_args)?;
            }
        },
        Some(Commands::Report(args)) => {
            report::handle_report(ctx, args)?;
        }
        Some(Commands::Export(args)) => {
            report::handle_export(ctx, args)?;
        }
        Some(Commands::Completions(args)) => {
            misc::handle_completions(args)?;
        }
        None => {
            println!("Mtrack v{}", VERSION);
            println!("\nQuickstart:");
            println!("  mtrack login --username <name>");
            println!("  mtrack machines list");
            println!("  mtrack repairs add --machine <id> --type <id> --price 1500");
            println!("  mtrack report --month 2024-03");
            println!("  mtrack report --machine <id>");
            println!("\nRun `mtrack --help` for full usage.");
        }
    }

    Ok(())
}
