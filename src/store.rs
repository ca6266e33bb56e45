//! The snapshot of backend data the dashboard renders from.

use std::sync::{Arc, RwLock};

use crate::{
    Error,
    analytics::{CategoryTotal, MonthlyTotal, SpendInsights, Summary, TaxSummary},
    transaction::Transaction,
};

/// Everything fetched from the backend in one load.
///
/// A store is never edited in place. A successful load replaces the whole
/// store, and a failed load leaves the previous one untouched.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct DashboardStore {
    /// Every transaction, unfiltered, in the order the backend sent them.
    pub transactions: Vec<Transaction>,
    /// `None` until the first successful load.
    pub summary: Option<Summary>,
    /// Expense totals per category.
    pub category_summary: Vec<CategoryTotal>,
    /// Income and expenses per month.
    pub monthly_summary: Vec<MonthlyTotal>,
    /// `None` until the first successful load.
    pub tax_summary: Option<TaxSummary>,
    /// `None` until the first successful load.
    pub spend_insights: Option<SpendInsights>,
}

impl DashboardStore {
    /// Whether no load has succeeded yet.
    pub fn is_empty(&self) -> bool {
        self.summary.is_none() && self.transactions.is_empty()
    }
}

/// A [DashboardStore] shared between request handlers.
#[derive(Debug, Default, Clone)]
pub struct SharedStore(Arc<RwLock<Arc<DashboardStore>>>);

impl SharedStore {
    /// Wrap `store` for sharing.
    pub fn new(store: DashboardStore) -> Self {
        Self(Arc::new(RwLock::new(Arc::new(store))))
    }

    /// Get the current snapshot.
    ///
    /// The snapshot stays valid after a later [SharedStore::replace].
    ///
    /// # Errors
    /// Returns [Error::StoreLock] if a writer panicked while holding the lock.
    pub fn snapshot(&self) -> Result<Arc<DashboardStore>, Error> {
        self.0
            .read()
            .map(|store| Arc::clone(&store))
            .inspect_err(|error| tracing::error!("could not acquire store lock: {error}"))
            .map_err(|_| Error::StoreLock)
    }

    /// Replace the whole snapshot with `store`.
    ///
    /// # Errors
    /// Returns [Error::StoreLock] if a writer panicked while holding the lock.
    pub fn replace(&self, store: DashboardStore) -> Result<(), Error> {
        let mut current = self
            .0
            .write()
            .inspect_err(|error| tracing::error!("could not acquire store lock: {error}"))
            .map_err(|_| Error::StoreLock)?;
        *current = Arc::new(store);

        Ok(())
    }
}
