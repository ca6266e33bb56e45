//! Application router configuration.

use axum::{
    Router,
    routing::{get, post},
};

use crate::{
    AppState,
    dashboard::{
        get_index_page, get_insights_page, get_overview_page, get_tax_page, get_transactions_page,
        refresh_dashboard,
    },
    endpoints,
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::OVERVIEW_VIEW, get(get_overview_page))
        .route(endpoints::TRANSACTIONS_VIEW, get(get_transactions_page))
        .route(endpoints::INSIGHTS_VIEW, get(get_insights_page))
        .route(endpoints::TAX_VIEW, get(get_tax_page))
        .route(endpoints::REFRESH, post(refresh_dashboard))
        .fallback(get_404_not_found)
        .with_state(state)
}
