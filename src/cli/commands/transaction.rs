use std::str::FromStr;

use crate::cli::core::{CliMode, CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::registry::CommandEntry;
use crate::domain::{Category, Displayable, Transaction, TransactionInput, TransactionKind};

const ADD_USAGE: &str = "add <description> <amount> [income|expense] [category] [YYYY-MM-DD]";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("add", "Record a transaction", ADD_USAGE, cmd_add),
        CommandEntry::new(
            "remove",
            "Delete a transaction by id or listing number",
            "remove <id|#index>",
            cmd_remove,
        )
        .with_aliases(&["rm"]),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let input = match args {
        [] if context.mode() == CliMode::Interactive => prompt_input(context)?,
        [description, amount, rest @ ..] => {
            parse_options(TransactionInput::new(*description, *amount, context.ledger.today()), rest)?
        }
        _ => {
            return Err(CommandError::InvalidArguments(format!("usage: {}", ADD_USAGE)));
        }
    };

    match context.ledger.add(input) {
        Some(transaction) => {
            io::print_success(format!(
                "Added `{}` ({}).",
                transaction.description,
                context.formatters().signed_amount(&transaction)
            ));
            warn_if_unsynced(context);
        }
        None => io::print_warning(
            "Nothing added: a description and a numeric amount are required.",
        ),
    }
    Ok(())
}

/// Optional trailing fields are recognised by shape, so any subset may be given
/// in any order.
fn parse_options(mut input: TransactionInput, rest: &[&str]) -> Result<TransactionInput, CommandError> {
    for token in rest {
        if let Ok(kind) = TransactionKind::from_str(token) {
            input = input.kind(kind);
        } else if let Ok(category) = Category::from_str(token) {
            input = input.category(category.as_str());
        } else if let Ok(date) = io::parse_date(token) {
            input = input.date(date);
        } else {
            return Err(CommandError::InvalidArguments(format!(
                "unrecognised value `{}` (expected a type, category or YYYY-MM-DD date)",
                token
            )));
        }
    }
    Ok(input)
}

fn prompt_input(context: &ShellContext) -> Result<TransactionInput, CommandError> {
    let theme = &context.theme;
    let description = io::prompt_text(theme, "Description")?;
    let amount = io::prompt_text(theme, "Amount")?;

    let kinds = [TransactionKind::Expense, TransactionKind::Income];
    let labels: Vec<&str> = kinds.iter().map(|kind| kind.as_str()).collect();
    let kind = kinds[io::select_from(theme, "Type", &labels, 0)?];

    let categories: Vec<&str> = Category::ALL.iter().map(|c| c.as_str()).collect();
    let default_category = Category::ALL
        .iter()
        .position(|c| *c == Category::default())
        .unwrap_or(0);
    let category = Category::ALL[io::select_from(theme, "Category", &categories, default_category)?];

    let date = io::prompt_date(theme, "Date", context.ledger.today())?;

    Ok(TransactionInput::new(description, amount, date)
        .kind(kind)
        .category(category.as_str()))
}

fn cmd_remove(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let reference = args
        .first()
        .map(|arg| arg.trim())
        .filter(|arg| !arg.is_empty())
        .ok_or_else(|| CommandError::InvalidArguments("usage: remove <id|#index>".into()))?;

    let Some(target) = resolve_reference(context, reference)? else {
        io::print_warning(format!("No transaction matches `{}`.", reference));
        return Ok(());
    };

    if context.mode() == CliMode::Interactive {
        let prompt = format!("Remove {}?", target.display_label());
        if !io::confirm_action(&context.theme, &prompt, false)? {
            io::print_info("Operation cancelled.");
            return Ok(());
        }
    }

    let removed = context.ledger.remove(target.id.as_str());
    io::print_success(format!(
        "Removed `{}`{}.",
        target.description,
        if removed > 1 {
            format!(" ({} entries shared its id)", removed)
        } else {
            String::new()
        }
    ));
    warn_if_unsynced(context);
    Ok(())
}

/// `#n` picks the n-th row of the current listing; anything else is an id or
/// an unambiguous id prefix.
fn resolve_reference(
    context: &ShellContext,
    reference: &str,
) -> Result<Option<Transaction>, CommandError> {
    if let Some(index) = reference.strip_prefix('#') {
        let position: usize = index.parse().map_err(|_| {
            CommandError::InvalidArguments(format!("invalid listing number `{}`", reference))
        })?;
        let view = context.query.apply(context.ledger.transactions());
        return Ok(position
            .checked_sub(1)
            .and_then(|idx| view.get(idx))
            .map(|txn| (*txn).clone()));
    }

    if let Some(exact) = context.ledger.get(reference) {
        return Ok(Some(exact.clone()));
    }

    let matches: Vec<&Transaction> = context
        .ledger
        .transactions()
        .iter()
        .filter(|txn| txn.id.as_str().starts_with(reference))
        .collect();
    match matches.as_slice() {
        [] => Ok(None),
        [only] => Ok(Some((*only).clone())),
        [first, rest @ ..] if rest.iter().all(|txn| txn.id == first.id) => {
            Ok(Some((*first).clone()))
        }
        _ => Err(CommandError::InvalidArguments(format!(
            "`{}` matches several transactions; use more of the id",
            reference
        ))),
    }
}

pub(crate) fn warn_if_unsynced(context: &ShellContext) {
    if !context.ledger.is_synced() {
        io::print_warning("Changes are kept in memory but could not be saved.");
    }
}
