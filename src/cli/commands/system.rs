use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::help;
use crate::cli::io;
use crate::cli::output::{self, section as output_section};
use crate::cli::registry::CommandEntry;
use crate::core::connectivity::ConnectivityState;
use crate::utils::build_info;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "status",
            "Show connectivity and storage state",
            "status",
            cmd_status,
        ),
        CommandEntry::new(
            "connectivity",
            "Report the network as online or offline",
            "connectivity <online|offline>",
            cmd_connectivity,
        ),
        CommandEntry::new("version", "Show build metadata", "version", cmd_version),
        CommandEntry::new(
            "help",
            "Show available commands",
            "help [command]",
            cmd_help,
        ),
        CommandEntry::new("exit", "Exit the shell", "exit", cmd_exit).with_aliases(&["quit", "q"]),
    ]
}

/// Connectivity badge plus ledger size and save state.
pub(crate) fn print_status(context: &ShellContext) {
    let state = context.monitor.state();
    let badge = format!("● {}", state);
    let tint = if state.is_online() {
        colored::Color::Green
    } else {
        colored::Color::Yellow
    };
    output::line(badge, Some(tint));
    io::print_info(format!("  Transactions: {}", context.ledger.len()));
    io::print_info(format!(
        "  Storage     : {}",
        if context.ledger.is_synced() {
            "saved"
        } else {
            "unsaved changes"
        }
    ));
}

fn cmd_status(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    print_status(context);
    Ok(())
}

fn cmd_connectivity(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let state = match args.first().map(|value| value.to_ascii_lowercase()) {
        Some(value) if value == "online" => ConnectivityState::Online,
        Some(value) if value == "offline" => ConnectivityState::Offline,
        _ => {
            return Err(CommandError::InvalidArguments(
                "usage: connectivity <online|offline>".into(),
            ))
        }
    };
    context.notifier.set(state);
    io::print_info(format!("● {}", context.monitor.state()));
    Ok(())
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let meta = build_info::current();
    output_section(format!("Transaction Tracker {}", meta.version));
    io::print_info(format!("  CLI version  : {}", build_info::CLI_VERSION));
    io::print_info(format!(
        "  Build hash   : {} ({})",
        meta.git_hash, meta.git_status
    ));
    io::print_info(format!("  Built at     : {}", meta.timestamp));
    io::print_info(format!("  Target       : {}", meta.target));
    io::print_info(format!("  Profile      : {}", meta.profile));
    io::print_info(format!("  Rustc        : {}", meta.rustc));
    Ok(())
}

fn cmd_help(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if let Some(command) = args.first().map(|name| name.to_lowercase()) {
        if let Some(command) = context.command(&command) {
            help::print_command(command);
        } else {
            context.suggest_command(args[0]);
        }
        return Ok(());
    }

    help::print_overview(&context.registry);
    Ok(())
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Err(CommandError::ExitRequested)
}
