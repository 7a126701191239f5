use std::path::PathBuf;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::core::services::ExchangeService;

use super::transaction::warn_if_unsynced;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "export",
            "Write the whole ledger to transactions_<date>.json",
            "export [directory]",
            cmd_export,
        ),
        CommandEntry::new(
            "import",
            "Prepend transactions from an exported JSON file",
            "import <file.json>",
            cmd_import,
        ),
    ]
}

fn cmd_export(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let dir = args
        .first()
        .map(PathBuf::from)
        .unwrap_or_else(|| context.config.resolve_export_dir());
    let document = ExchangeService::export(context.ledger.transactions(), context.ledger.today())?;
    let path = document.write_to(&dir)?;
    io::print_success(format!(
        "Exported {} transactions to {}.",
        context.ledger.len(),
        path.display()
    ));
    Ok(())
}

fn cmd_import(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let path = args
        .first()
        .map(PathBuf::from)
        .ok_or_else(|| CommandError::InvalidArguments("usage: import <file.json>".into()))?;
    let count = ExchangeService::import_file(&mut context.ledger, &path)?;
    io::print_success(format!("Imported {} transactions.", count));
    warn_if_unsynced(context);
    Ok(())
}
