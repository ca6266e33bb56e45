//! Dashboard module
//!
//! Provides the overview, transactions, insights and tax tabs, and the
//! action that reloads their data from the backend.

mod cards;
mod charts;
mod filter_form;
mod handlers;
mod tables;

pub use handlers::{
    get_index_page, get_insights_page, get_overview_page, get_tax_page, get_transactions_page,
    refresh_dashboard,
};
