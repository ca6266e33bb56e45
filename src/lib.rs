//! Finboard is a personal finance dashboard for Indian Rupee accounts.
//!
//! It loads transactions and pre-aggregated analytics from a backend JSON API
//! and serves them as HTML pages: summary cards, charts, tax deductions and a
//! filterable transaction table.
//!
//! The data is fetched once at startup and again whenever the user asks for a
//! refresh. Filtering happens per request on the loaded snapshot.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use tokio::signal;

mod alert;
mod analytics;
mod app_state;
mod backend;
mod config;
mod dashboard;
mod endpoints;
mod error;
mod filter;
mod format;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod routing;
mod store;
mod transaction;
mod view;

pub use analytics::{
    CategoryTotal, DailySpend, MerchantTotal, MonthlyTotal, SpendInsights, Summary, TaxSummary,
    TaxTotals, TaxTransaction,
};
pub use app_state::AppState;
pub use backend::{BackendClient, refresh_store};
pub use config::{Config, DEFAULT_LOG_FILE, DEFAULT_PORT, DEFAULT_REQUEST_TIMEOUT};
pub use error::Error;
pub use filter::{
    CategoryFilter, FilterCriteria, HighValueFilter, ModeFilter, TaxFilter, TypeFilter,
    filter_transactions,
};
pub use format::{INVALID_DATE, format_currency, format_date, format_mode};
pub use logging::{DEFAULT_SUPPRESSION_PATTERNS, NoiseFilter};
pub use routing::build_router;
pub use store::{DashboardStore, SharedStore};
pub use transaction::{PaymentMode, Transaction, TransactionType};
pub use view::{DashboardView, derive_view, distinct_categories};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {error}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(error) => {
                tracing::error!("failed to install signal handler: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}
