use std::str::FromStr;

use colored::Color;

use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output;
use crate::cli::registry::CommandEntry;
use crate::core::services::{SummaryService, TypeFilter};

pub(crate) const EMPTY_LISTING: &str = "No transactions yet. Add your first one above!";

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new("list", "Show transactions in the current view", "list", cmd_list)
            .with_aliases(&["ls"]),
        CommandEntry::new(
            "filter",
            "Restrict the view by type",
            "filter <all|income|expense>",
            cmd_filter,
        ),
        CommandEntry::new(
            "search",
            "Match description or category (no term clears the search)",
            "search [term]",
            cmd_search,
        ),
        CommandEntry::new(
            "summary",
            "Show income, expense and balance for the whole ledger",
            "summary",
            cmd_summary,
        ),
    ]
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let view = context.query.apply(context.ledger.transactions());
    output::section(format!("Transactions ({})", view.len()));
    if !context.query.is_unfiltered() {
        io::print_info(format!(
            "  view: {} / search `{}`",
            context.query.type_filter, context.query.search
        ));
    }

    if view.is_empty() {
        io::print_info(EMPTY_LISTING);
        return Ok(());
    }

    let formatters = context.formatters();
    for (idx, transaction) in view.iter().enumerate() {
        let tint = if transaction.is_income() {
            Color::Green
        } else {
            Color::Red
        };
        output::line(formatters.row(idx + 1, transaction), Some(tint));
    }
    Ok(())
}

fn cmd_filter(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let value = args.first().ok_or_else(|| {
        CommandError::InvalidArguments("usage: filter <all|income|expense>".into())
    })?;
    let filter = TypeFilter::from_str(value)?;
    context.query.type_filter = filter;
    io::print_info(format!("Showing {} transactions.", filter));
    Ok(())
}

fn cmd_search(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let term = args.join(" ");
    let term = term.trim();
    context.query.search = term.to_string();
    if term.is_empty() {
        io::print_info("Search cleared.");
    } else {
        io::print_info(format!("Searching for `{}`.", term));
    }
    Ok(())
}

fn cmd_summary(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let totals = SummaryService::aggregate(context.ledger.transactions());
    let formatters = context.formatters();
    output::section("Summary");
    output::line(
        format!("  Income : {}", formatters.amount(totals.income)),
        Some(Color::Green),
    );
    output::line(
        format!("  Expense: {}", formatters.amount(totals.expense)),
        Some(Color::Red),
    );
    let balance_tint = if totals.balance >= 0.0 {
        Color::Green
    } else {
        Color::Red
    };
    output::line(
        format!("  Balance: {}", formatters.amount(totals.balance)),
        Some(balance_tint),
    );
    Ok(())
}
