//! Core CLI dispatch, construction and error plumbing for the shell context.

use std::{env, io, path::PathBuf, sync::Arc};

use dialoguer::theme::ColorfulTheme;
use rustyline::error::ReadlineError;
use strsim::levenshtein;

use crate::{
    config::{self, ConfigError, ConfigManager},
    core::connectivity::{ConnectivityMonitor, ConnectivityNotifier, ConnectivityState},
    core::errors::TrackerError,
    core::services::{ExchangeError, TransactionQuery},
    core::time::SystemClock,
    core::LedgerStore,
    storage::JsonFileStore,
};

pub use crate::core::errors::CliError;

use super::commands;
use super::io as cli_io;
use super::output::{self, OutputPreferences};
use super::registry::{CommandEntry, CommandRegistry};
pub use super::shell_context::{CliMode, ShellContext};

/// Starts the shell offline regardless of the saved configuration.
pub const OFFLINE_ENV: &str = "TXN_TRACKER_OFFLINE";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub type CommandResult = Result<(), CommandError>;

impl ShellContext {
    /// Opens the shell against the default application home.
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let manager = config::default_manager()?;
        Self::from_manager(mode, manager)
    }

    /// Opens the shell with configuration and data rooted at `base`.
    pub fn with_base_dir(mode: CliMode, base: PathBuf) -> Result<Self, CliError> {
        let manager = ConfigManager::with_base_dir(base)?;
        Self::from_manager(mode, manager)
    }

    fn from_manager(mode: CliMode, config_manager: ConfigManager) -> Result<Self, CliError> {
        let config = config_manager.load()?;
        output::set_preferences(OutputPreferences {
            color_enabled: config.ui_color_enabled && mode == CliMode::Interactive,
        });

        let data_dir = config.resolve_data_dir(config_manager.base_dir());
        let store = JsonFileStore::new(data_dir)?;
        let ledger = LedgerStore::open(Box::new(store), Arc::new(SystemClock));

        let online = !(config.start_offline || offline_from_env());
        let notifier = Arc::new(ConnectivityNotifier::new(ConnectivityState::from_online(
            online,
        )));
        let monitor = ConnectivityMonitor::new(notifier.clone());

        let mut registry = CommandRegistry::new();
        commands::register_all(&mut registry);

        Ok(ShellContext {
            mode,
            registry,
            ledger,
            query: TransactionQuery::default(),
            notifier,
            monitor,
            config_manager,
            config,
            theme: ColorfulTheme::default(),
            running: true,
        })
    }

    pub(crate) fn mode(&self) -> CliMode {
        self.mode
    }

    pub(crate) fn command(&self, name: &str) -> Option<&CommandEntry> {
        self.registry.get(name)
    }

    pub(crate) fn command_names(&self) -> Vec<&'static str> {
        self.registry.spellings().collect()
    }

    pub(crate) fn prompt(&self) -> String {
        format!(
            "txn [{} | {}]> ",
            self.ledger.len(),
            self.monitor.state().label().to_lowercase()
        )
    }

    pub(crate) fn persist_config(&self) -> CommandResult {
        self.config_manager
            .save(&self.config)
            .map_err(CommandError::from)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        if let Some(handler) = self.registry.handler(command) {
            match handler(self, args) {
                Ok(()) => Ok(LoopControl::Continue),
                Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
                Err(err) => Err(err),
            }
        } else {
            self.suggest_command(raw);
            Ok(LoopControl::Continue)
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        cli_io::print_warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));

        let lowered = input.to_lowercase();
        let best = self
            .registry
            .names()
            .map(|key| (levenshtein(key, &lowered), key))
            .min_by_key(|(distance, _)| *distance);

        if let Some((distance, name)) = best {
            if distance <= 3 {
                cli_io::print_hint(format!("Did you mean `{}`?", name));
            }
        }
    }

    pub(crate) fn confirm_exit(&self) -> Result<bool, CliError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        cli_io::confirm_action(&self.theme, "Exit shell?", true).map_err(CliError::from)
    }

    pub(crate) fn report_error(&self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::ExitRequested => Ok(()),
            CommandError::InvalidArguments(message) => {
                self.print_error(&message);
                cli_io::print_hint("Use `help <command>` for usage details.");
                Ok(())
            }
            CommandError::Exchange(ExchangeError::EmptyLedger) => {
                self.print_warning("Nothing to export yet. Add a transaction first.");
                Ok(())
            }
            other => {
                self.print_error(&other.to_string());
                Ok(())
            }
        }
    }

    pub(crate) fn print_error(&self, message: &str) {
        cli_io::print_error(message);
    }

    pub(crate) fn print_warning(&self, message: &str) {
        cli_io::print_warning(message);
    }
}

fn offline_from_env() -> bool {
    env::var(OFFLINE_ENV)
        .map(|value| matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
        .unwrap_or(false)
}

#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error(transparent)]
    Core(#[from] TrackerError),
    #[error(transparent)]
    Exchange(#[from] ExchangeError),
    #[error(transparent)]
    Dialoguer(#[from] dialoguer::Error),
    #[error("exit requested")]
    ExitRequested,
}

impl From<ConfigError> for CommandError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::InvalidValue(message) => CommandError::InvalidArguments(message),
            other => CommandError::Core(TrackerError::from(other)),
        }
    }
}

impl From<CliError> for CommandError {
    fn from(err: CliError) -> Self {
        match err {
            CliError::Core(inner) => CommandError::Core(inner),
            CliError::Input(message) | CliError::Command(message) => {
                CommandError::InvalidArguments(message)
            }
        }
    }
}

impl From<CommandError> for CliError {
    fn from(err: CommandError) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Command(err.to_string())
    }
}

impl From<ReadlineError> for CliError {
    fn from(err: ReadlineError) -> Self {
        CliError::Input(err.to_string())
    }
}

#[cfg(test)]
pub(crate) fn process_script_in(
    base: &std::path::Path,
    lines: &[&str],
) -> Result<ShellContext, CliError> {
    let mut app = ShellContext::with_base_dir(CliMode::Script, base.to_path_buf())?;
    let script = lines.join("\n");
    crate::cli::shell::run_script(&mut app, script.as_bytes())?;
    Ok(app)
}
