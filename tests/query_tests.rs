mod common;

use common::{seed, setup_test_env};
use txn_tracker::core::services::{QueryService, SummaryService, Totals, TransactionQuery, TypeFilter};
use txn_tracker::domain::TransactionInput;

fn descriptions(view: &[&txn_tracker::domain::Transaction]) -> Vec<String> {
    view.iter().map(|txn| txn.description.clone()).collect()
}

#[test]
fn type_filter_keeps_ledger_order() {
    let (mut store, _) = setup_test_env();
    seed(&mut store);
    let expenses = QueryService::filter_by_type(store.transactions(), TypeFilter::Expense);
    assert_eq!(descriptions(&expenses), vec!["Bus", "Coffee"]);
    let all = QueryService::filter_by_type(store.transactions(), TypeFilter::All);
    assert_eq!(all.len(), store.len());
}

#[test]
fn search_matches_description_or_category() {
    let (mut store, _) = setup_test_env();
    seed(&mut store);
    let by_category = QueryService::filter_by_search(store.transactions(), "TRANS");
    assert_eq!(descriptions(&by_category), vec!["Bus"]);
    let by_description = QueryService::filter_by_search(store.transactions(), "sal");
    assert_eq!(descriptions(&by_description), vec!["Salary"]);
    assert!(QueryService::filter_by_search(store.transactions(), "zzz").is_empty());
}

#[test]
fn combined_query_applies_both_predicates() {
    let (mut store, _) = setup_test_env();
    seed(&mut store);
    let today = store.today();
    store.add(TransactionInput::new("Food truck", "8", today));

    let query = TransactionQuery::new(TypeFilter::Expense, "food");
    assert_eq!(descriptions(&query.apply(store.transactions())), vec!["Food truck", "Coffee"]);

    let query = TransactionQuery::new(TypeFilter::Income, "food");
    assert!(query.apply(store.transactions()).is_empty());
}

#[test]
fn totals_cover_the_whole_ledger() {
    let (mut store, _) = setup_test_env();
    seed(&mut store);
    let totals = SummaryService::aggregate(store.transactions());
    assert_eq!(totals.income, 2000.0);
    assert!((totals.expense - 7.25).abs() < 1e-9);
    assert!((totals.balance - 1992.75).abs() < 1e-9);
}

#[test]
fn totals_of_an_empty_ledger_are_zero() {
    let (store, _) = setup_test_env();
    assert_eq!(SummaryService::aggregate(store.transactions()), Totals::default());
}
