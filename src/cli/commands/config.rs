use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{self, OutputPreferences};
use crate::cli::registry::CommandEntry;
use crate::cli::shell_context::CliMode;
use crate::config::Config;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![CommandEntry::new(
        "config",
        "View and change preferences",
        "config [show|set <key> <value>]",
        cmd_config,
    )]
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if args.is_empty() || args[0].eq_ignore_ascii_case("show") {
        show_config(context);
        return Ok(());
    }

    match args[0].to_lowercase().as_str() {
        "set" => {
            if args.len() < 3 {
                return Err(CommandError::InvalidArguments(format!(
                    "usage: config set <{}> <value>",
                    Config::KEYS.join("|")
                )));
            }
            let key = args[1];
            let value = args[2..].join(" ");
            set_config_value(context, key, value.trim())
        }
        other => Err(CommandError::InvalidArguments(format!(
            "unknown config subcommand `{}`",
            other
        ))),
    }
}

fn show_config(context: &ShellContext) {
    output::section("Configuration");
    for (key, value) in context.config.entries() {
        io::print_info(format!("  {:<17} {}", key, value));
    }
    io::print_info(format!(
        "  file: {}",
        context.config_manager.config_path().display()
    ));
}

fn set_config_value(context: &mut ShellContext, key: &str, value: &str) -> CommandResult {
    let mut updated = context.config.clone();
    updated.set(key, value)?;
    context.config = updated;
    context.persist_config()?;

    if key == "ui_color_enabled" {
        output::set_preferences(OutputPreferences {
            color_enabled: context.config.ui_color_enabled && context.mode == CliMode::Interactive,
        });
    }
    io::print_success(format!("Set {} = {}.", key, value));
    if key == "data_dir" || key == "start_offline" {
        io::print_hint("Takes effect the next time the shell starts.");
    }
    Ok(())
}
