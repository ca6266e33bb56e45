//! Display-only projections derived from the store and the user's filters.

use std::collections::HashSet;

use crate::{
    filter::{FilterCriteria, filter_transactions},
    store::DashboardStore,
    transaction::Transaction,
};

/// Every distinct category in `transactions`, in first-seen order.
pub fn distinct_categories(transactions: &[Transaction]) -> Vec<String> {
    let mut seen = HashSet::new();

    transactions
        .iter()
        .filter(|transaction| seen.insert(transaction.category.as_str()))
        .map(|transaction| transaction.category.clone())
        .collect()
}

/// What the transactions page needs, recomputed whenever the store or the
/// filters change.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardView<'a> {
    /// The transactions that pass the filters, in store order.
    pub filtered_transactions: Vec<Transaction>,
    /// The options for the category select.
    pub categories: Vec<String>,
    /// The number of transactions before filtering.
    pub total_count: usize,
    /// The store the view was derived from, for the aggregate view models.
    pub store: &'a DashboardStore,
}

/// Apply `criteria` to the store's transactions and collect the category options.
pub fn derive_view<'a>(store: &'a DashboardStore, criteria: &FilterCriteria) -> DashboardView<'a> {
    DashboardView {
        filtered_transactions: filter_transactions(&store.transactions, criteria),
        categories: distinct_categories(&store.transactions),
        total_count: store.transactions.len(),
        store,
    }
}
