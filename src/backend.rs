//! The HTTP client for the backend analytics API.
//!
//! All six endpoints are requested at once and applied all-or-nothing: if any
//! request fails, none of the results are used.

use std::time::Duration;

use reqwest::{Client, Url};
use serde::de::DeserializeOwned;

use crate::{Error, store::DashboardStore, store::SharedStore};

/// The path prefix every backend route lives under.
const API_PREFIX: &str = "/api";

/// Backend routes, relative to [API_PREFIX].
pub mod routes {
    /// The full list of transactions.
    pub const TRANSACTIONS: &str = "/transactions";
    /// Income, expense and high value totals.
    pub const SUMMARY: &str = "/analytics/summary";
    /// Expense totals per category.
    pub const CATEGORY_SUMMARY: &str = "/analytics/category-summary";
    /// Income and expenses per month.
    pub const MONTHLY_SUMMARY: &str = "/analytics/monthly-summary";
    /// Tax deduction totals and eligible transactions.
    pub const TAX_SUMMARY: &str = "/analytics/tax-summary";
    /// Daily trend, weekly average and top spends.
    pub const SPEND_INSIGHTS: &str = "/analytics/spend-insights";
}

/// Fetches dashboard data from the backend.
#[derive(Debug, Clone)]
pub struct BackendClient {
    http: Client,
    api_base: String,
}

impl BackendClient {
    /// Create a client for the backend at `base_url`, e.g. `http://localhost:8001`.
    ///
    /// Each request fails after `timeout`.
    ///
    /// # Errors
    /// Returns [Error::InvalidBackendUrl] if `base_url` is not an absolute
    /// HTTP(S) URL, or [Error::HttpClient] if the client cannot be built.
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, Error> {
        let url = Url::parse(base_url)
            .map_err(|error| Error::InvalidBackendUrl(format!("{base_url}: {error}")))?;

        if !matches!(url.scheme(), "http" | "https") {
            return Err(Error::InvalidBackendUrl(format!(
                "{base_url}: the scheme must be http or https"
            )));
        }

        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|error| Error::HttpClient(error.to_string()))?;

        Ok(Self {
            http,
            api_base: format!("{}{API_PREFIX}", base_url.trim_end_matches('/')),
        })
    }

    /// The absolute URL for a backend `route`.
    pub fn url_for(&self, route: &str) -> String {
        format!("{}{route}", self.api_base)
    }

    async fn get_json<T: DeserializeOwned>(&self, route: &'static str) -> Result<T, Error> {
        let url = self.url_for(route);
        tracing::debug!("GET {url}");

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .map_err(|error| Error::Fetch {
                endpoint: route,
                message: error.to_string(),
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(Error::UnexpectedStatus {
                endpoint: route,
                status: status.as_u16(),
            });
        }

        response.json::<T>().await.map_err(|error| {
            if error.is_decode() {
                Error::Decode {
                    endpoint: route,
                    message: error.to_string(),
                }
            } else {
                Error::Fetch {
                    endpoint: route,
                    message: error.to_string(),
                }
            }
        })
    }

    /// Request all six endpoints concurrently and build a new store.
    ///
    /// Returns the first error as soon as any request fails. The outstanding
    /// requests are dropped.
    pub async fn load_dashboard(&self) -> Result<DashboardStore, Error> {
        let (
            transactions,
            summary,
            category_summary,
            monthly_summary,
            tax_summary,
            spend_insights,
        ) = tokio::try_join!(
            self.get_json(routes::TRANSACTIONS),
            self.get_json(routes::SUMMARY),
            self.get_json(routes::CATEGORY_SUMMARY),
            self.get_json(routes::MONTHLY_SUMMARY),
            self.get_json(routes::TAX_SUMMARY),
            self.get_json(routes::SPEND_INSIGHTS),
        )?;

        Ok(DashboardStore {
            transactions,
            summary: Some(summary),
            category_summary,
            monthly_summary,
            tax_summary: Some(tax_summary),
            spend_insights: Some(spend_insights),
        })
    }
}

/// Load fresh data into `store`.
///
/// On failure the error is logged and returned, and `store` keeps whatever it
/// held before.
pub async fn refresh_store(client: &BackendClient, store: &SharedStore) -> Result<(), Error> {
    match client.load_dashboard().await {
        Ok(fresh) => {
            tracing::info!(
                "loaded {} transactions from the backend",
                fresh.transactions.len()
            );
            store.replace(fresh)
        }
        Err(error) => {
            tracing::error!("could not load dashboard data: {error}");
            Err(error)
        }
    }
}

#[cfg(test)]
pub(crate) mod test_utils {
    use std::net::SocketAddr;

    use axum::{Json, Router, http::StatusCode, routing::get};
    use serde_json::{Value, json};
    use tokio::net::TcpListener;

    use super::routes;

    pub(crate) fn transactions_json() -> Value {
        json!([
            {
                "id": "t1", "date": "2024-03-01T09:30:00+00:00", "amount": 85000.0,
                "type": "income", "mode": "bank_transfer", "category": "Salary",
                "subCategory": "Monthly Salary", "merchant": "Acme Corp", "tags": [],
                "taxFlags": [], "narration": "Salary credit", "isHighValue": true
            },
            {
                "id": "t2", "date": "2024-03-04T12:00:00+00:00", "amount": 24000.0,
                "type": "expense", "mode": "upi", "category": "Insurance",
                "subCategory": "Life", "merchant": "LIC", "tags": [],
                "taxFlags": ["80C"], "narration": "Annual premium", "isHighValue": true
            },
            {
                "id": "t3", "date": "2024-03-05T19:15:00+00:00", "amount": 1499.0,
                "type": "expense", "mode": "card", "category": "Shopping",
                "subCategory": "Electronics", "merchant": "Amazon", "tags": [],
                "taxFlags": [], "narration": "Headphones", "isHighValue": false
            }
        ])
    }

    pub(crate) fn summary_json() -> Value {
        json!({
            "totalIncome": 85000.0, "totalExpenses": 25499.0, "netCashFlow": 59501.0,
            "highValueCount": 2, "totalTransactions": 3
        })
    }

    pub(crate) fn category_summary_json() -> Value {
        json!([
            {"category": "Insurance", "amount": 24000.0},
            {"category": "Shopping", "amount": 1499.0}
        ])
    }

    pub(crate) fn monthly_summary_json() -> Value {
        json!([{"month": "Mar 2024", "income": 85000.0, "expenses": 25499.0}])
    }

    pub(crate) fn tax_summary_json() -> Value {
        json!({
            "taxTotals": {"80C": 24000.0, "80D": 0, "80G": 0, "HRA": 0},
            "totalDeductions": 24000.0,
            "taxTransactions": [
                {"date": "2024-03-04T12:00:00+00:00", "merchant": "LIC",
                 "category": "Insurance", "amount": 24000.0, "taxFlags": ["80C"]}
            ]
        })
    }

    pub(crate) fn spend_insights_json() -> Value {
        json!({
            "dailyTrend": [
                {"date": "2024-03-04", "amount": 24000.0},
                {"date": "2024-03-05", "amount": 1499.0}
            ],
            "weeklyAverage": 89246.5,
            "topCategories": [
                {"category": "Insurance", "amount": 24000.0},
                {"category": "Shopping", "amount": 1499.0}
            ],
            "topMerchants": [
                {"merchant": "LIC", "amount": 24000.0},
                {"merchant": "Amazon", "amount": 1499.0}
            ],
            "highSpendAlerts": [{"date": "2024-03-04", "amount": 24000.0}]
        })
    }

    /// A backend router serving `transactions` and canned analytics.
    pub(crate) fn fake_backend(transactions: Value) -> Router {
        Router::new()
            .route(
                &format!("/api{}", routes::TRANSACTIONS),
                get(move || {
                    let transactions = transactions.clone();
                    async move { Json(transactions) }
                }),
            )
            .route(
                &format!("/api{}", routes::SUMMARY),
                get(|| async { Json(summary_json()) }),
            )
            .route(
                &format!("/api{}", routes::CATEGORY_SUMMARY),
                get(|| async { Json(category_summary_json()) }),
            )
            .route(
                &format!("/api{}", routes::MONTHLY_SUMMARY),
                get(|| async { Json(monthly_summary_json()) }),
            )
            .route(
                &format!("/api{}", routes::TAX_SUMMARY),
                get(|| async { Json(tax_summary_json()) }),
            )
            .route(
                &format!("/api{}", routes::SPEND_INSIGHTS),
                get(|| async { Json(spend_insights_json()) }),
            )
    }

    /// The fake backend with the tax summary route failing.
    pub(crate) fn failing_tax_backend() -> Router {
        let failing_route = format!("/api{}", routes::TAX_SUMMARY);

        Router::new()
            .route(
                &format!("/api{}", routes::TRANSACTIONS),
                get(|| async { Json(transactions_json()) }),
            )
            .route(
                &format!("/api{}", routes::SUMMARY),
                get(|| async { Json(summary_json()) }),
            )
            .route(
                &format!("/api{}", routes::CATEGORY_SUMMARY),
                get(|| async { Json(category_summary_json()) }),
            )
            .route(
                &format!("/api{}", routes::MONTHLY_SUMMARY),
                get(|| async { Json(monthly_summary_json()) }),
            )
            .route(
                &failing_route,
                get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "database unavailable") }),
            )
            .route(
                &format!("/api{}", routes::SPEND_INSIGHTS),
                get(|| async { Json(spend_insights_json()) }),
            )
    }

    /// Serve `router` on an ephemeral local port and return the base URL.
    pub(crate) async fn serve(router: Router) -> String {
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], 0)))
            .await
            .expect("Could not bind fake backend");
        let address = listener
            .local_addr()
            .expect("Could not get fake backend address");

        tokio::spawn(async move {
            axum::serve(listener, router)
                .await
                .expect("Fake backend stopped unexpectedly");
        });

        format!("http://{address}")
    }
}
