use std::sync::Arc;

use dialoguer::theme::ColorfulTheme;

use crate::{
    config::{Config, ConfigManager},
    core::connectivity::{ConnectivityMonitor, ConnectivityNotifier},
    core::services::TransactionQuery,
    core::LedgerStore,
};

use super::formatters::CliFormatters;
use super::registry::CommandRegistry;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Everything a command handler can reach: the ledger, the listing view
/// state, connectivity and configuration.
pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub ledger: LedgerStore,
    /// Filter and search applied by `list` and by `#index` references.
    pub query: TransactionQuery,
    pub notifier: Arc<ConnectivityNotifier>,
    pub monitor: ConnectivityMonitor,
    pub config_manager: ConfigManager,
    pub config: Config,
    pub theme: ColorfulTheme,
    pub running: bool,
}

impl ShellContext {
    pub fn formatters(&self) -> CliFormatters {
        CliFormatters::new(self.config.currency_symbol.clone())
    }
}
