//! Route handlers for the dashboard tabs and the refresh action.

use axum::{
    extract::{Query, State, rejection::QueryRejection},
    http::{HeaderMap, StatusCode, Uri},
    response::{IntoResponse, Redirect, Response},
};
use axum_htmx::HxRedirect;
use maud::{Markup, html};

use crate::{
    AppState, Error,
    backend::refresh_store,
    dashboard::{
        cards::{insight_cards, summary_cards, tax_cards},
        charts::{
            DashboardChart, category_chart, charts_script, charts_view, daily_trend_chart,
            monthly_chart,
        },
        filter_form::filter_form,
        tables::{
            tax_transactions_table, top_categories_table, top_merchants_table,
            transactions_table,
        },
    },
    endpoints,
    filter::FilterCriteria,
    html::{ECHARTS_SCRIPT, HeadElement, PAGE_CONTAINER_STYLE, base, no_data_view},
    navigation::NavBar,
    store::SharedStore,
    view::derive_view,
};

/// Redirect to the overview tab.
pub async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::OVERVIEW_VIEW)
}

/// Display the summary cards and the category and monthly charts.
pub async fn get_overview_page(State(store): State<SharedStore>) -> Result<Response, Error> {
    let store = store.snapshot()?;
    let nav_bar = NavBar::new(endpoints::OVERVIEW_VIEW);

    let Some(summary) = &store.summary else {
        return Ok(page("Overview", nav_bar, &[], no_data_view()).into_response());
    };

    let charts = [
        DashboardChart {
            id: "category-chart",
            options: category_chart(&store.category_summary).to_string(),
        },
        DashboardChart {
            id: "monthly-chart",
            options: monthly_chart(&store.monthly_summary).to_string(),
        },
    ];

    let content = html!(
        (summary_cards(summary))
        (charts_view(&charts))
    );

    Ok(page("Overview", nav_bar, &chart_scripts(&charts), content).into_response())
}

/// Display the filter form and the filtered transaction table.
///
/// htmx requests get only the table so the form keeps its focus, except
/// history restores which need the whole page. An unparsable query string falls back to no filters.
pub async fn get_transactions_page(
    State(store): State<SharedStore>,
    headers: HeaderMap,
    query: Result<Query<FilterCriteria>, QueryRejection>,
) -> Result<Response, Error> {
    let criteria = match query {
        Ok(Query(criteria)) => criteria,
        Err(rejection) => {
            tracing::warn!("ignoring invalid transaction filters: {rejection}");
            FilterCriteria::default()
        }
    };
    let store = store.snapshot()?;
    let view = derive_view(&store, &criteria);
    tracing::debug!(
        "filters \"{criteria}\" matched {} of {} transactions",
        view.filtered_transactions.len(),
        view.total_count
    );

    let table = transactions_table(&view.filtered_transactions, view.total_count);

    if is_htmx_request(&headers) && !is_history_restore(&headers) {
        return Ok(table.into_response());
    }

    let nav_bar = NavBar::new(endpoints::TRANSACTIONS_VIEW);

    if store.is_empty() {
        return Ok(page("Transactions", nav_bar, &[], no_data_view()).into_response());
    }

    let content = html!(
        (filter_form(&criteria, &view.categories))
        (table)
    );

    Ok(page("Transactions", nav_bar, &[], content).into_response())
}

/// Display the daily trend, headline insights and the top five tables.
pub async fn get_insights_page(State(store): State<SharedStore>) -> Result<Response, Error> {
    let store = store.snapshot()?;
    let nav_bar = NavBar::new(endpoints::INSIGHTS_VIEW);

    let Some(insights) = &store.spend_insights else {
        return Ok(page("Insights", nav_bar, &[], no_data_view()).into_response());
    };

    let charts = [DashboardChart {
        id: "daily-trend-chart",
        options: daily_trend_chart(&insights.daily_trend).to_string(),
    }];

    let content = html!(
        (insight_cards(insights))
        (charts_view(&charts))

        div class="grid grid-cols-1 xl:grid-cols-2 gap-4 w-full"
        {
            (top_categories_table(&insights.top_categories))
            (top_merchants_table(&insights.top_merchants))
        }
    );

    Ok(page("Insights", nav_bar, &chart_scripts(&charts), content).into_response())
}

/// Display the deduction totals per section and the tax-eligible transactions.
pub async fn get_tax_page(State(store): State<SharedStore>) -> Result<Response, Error> {
    let store = store.snapshot()?;
    let nav_bar = NavBar::new(endpoints::TAX_VIEW);

    let Some(tax) = &store.tax_summary else {
        return Ok(page("Tax", nav_bar, &[], no_data_view()).into_response());
    };

    let content = html!(
        (tax_cards(tax))
        (tax_transactions_table(&tax.tax_transactions))
    );

    Ok(page("Tax", nav_bar, &[], content).into_response())
}

/// Reload all data from the backend.
///
/// On success htmx requests are redirected back to the page they came from
/// and other requests to the overview. On failure the previous data is kept
/// and an alert is returned.
pub async fn refresh_dashboard(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Err(error) = refresh_store(&state.backend, &state.store).await {
        return error.into_alert_response();
    }

    if is_htmx_request(&headers) {
        let target = current_page(&headers).unwrap_or_else(|| endpoints::OVERVIEW_VIEW.to_owned());
        (HxRedirect(target), StatusCode::OK).into_response()
    } else {
        Redirect::to(endpoints::OVERVIEW_VIEW).into_response()
    }
}

fn is_htmx_request(headers: &HeaderMap) -> bool {
    header_is_true(headers, "hx-request")
}

fn is_history_restore(headers: &HeaderMap) -> bool {
    header_is_true(headers, "hx-history-restore-request")
}

fn header_is_true(headers: &HeaderMap, name: &str) -> bool {
    headers
        .get(name)
        .and_then(|header| header.to_str().ok())
        .map(|header| header.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

/// The path and query of the page an htmx request was sent from.
fn current_page(headers: &HeaderMap) -> Option<String> {
    let current_url = headers
        .get("hx-current-url")
        .and_then(|header| header.to_str().ok())?;
    let uri = current_url.parse::<Uri>().ok()?;
    let path_and_query = uri.path_and_query()?.as_str();

    // Only redirect within this site.
    (path_and_query.starts_with('/') && !path_and_query.starts_with("//"))
        .then(|| path_and_query.to_owned())
}

fn chart_scripts(charts: &[DashboardChart]) -> [HeadElement; 2] {
    [
        HeadElement::ScriptLink(ECHARTS_SCRIPT.to_owned()),
        charts_script(charts),
    ]
}

fn page(title: &str, nav_bar: NavBar, head_elements: &[HeadElement], content: Markup) -> Markup {
    let content = html!(
        (nav_bar.into_html())

        div class=(PAGE_CONTAINER_STYLE)
        {
            h1 class="text-2xl font-bold" { (title) }

            (content)
        }
    );

    base(title, head_elements, &content)
}
