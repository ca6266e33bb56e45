//! The pre-aggregated view models served by the backend's `/analytics` endpoints.
//!
//! These are consumed as-is and never recomputed here.

use serde::{Deserialize, Serialize};

/// Totals across every transaction, from `/analytics/summary`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Summary {
    /// Sum of all income.
    pub total_income: f64,
    /// Sum of all expenses.
    pub total_expenses: f64,
    /// Income minus expenses, may be negative.
    pub net_cash_flow: f64,
    /// Number of transactions flagged as high value.
    pub high_value_count: u64,
    /// Number of transactions, if the backend reports it.
    #[serde(default)]
    pub total_transactions: Option<u64>,
}

/// Expense total for one category, from `/analytics/category-summary`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CategoryTotal {
    /// The category name.
    pub category: String,
    /// Total spent in the category.
    pub amount: f64,
}

/// Income and expenses for one month, from `/analytics/monthly-summary`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MonthlyTotal {
    /// Display label such as "Mar 2024".
    pub month: String,
    /// Income received in the month.
    pub income: f64,
    /// Expenses paid in the month.
    pub expenses: f64,
}

/// Deduction totals per tax section.
#[derive(Debug, Default, Clone, PartialEq, Deserialize, Serialize)]
pub struct TaxTotals {
    /// Investments and insurance premiums.
    #[serde(rename = "80C", default)]
    pub section_80c: f64,
    /// Health insurance.
    #[serde(rename = "80D", default)]
    pub section_80d: f64,
    /// Donations.
    #[serde(rename = "80G", default)]
    pub section_80g: f64,
    /// House rent allowance.
    #[serde(rename = "HRA", default)]
    pub hra: f64,
}

impl TaxTotals {
    /// Pairs of (section label, total) in display order.
    pub fn sections(&self) -> [(&'static str, f64); 4] {
        [
            ("Section 80C", self.section_80c),
            ("Section 80D", self.section_80d),
            ("Section 80G", self.section_80g),
            ("HRA", self.hra),
        ]
    }
}

/// The reduced transaction record the tax summary lists.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxTransaction {
    /// ISO 8601 date or date-time string.
    pub date: String,
    /// Who was paid.
    pub merchant: String,
    /// The transaction's category.
    pub category: String,
    /// The amount in rupees.
    pub amount: f64,
    /// The tax sections this transaction counts towards.
    #[serde(default)]
    pub tax_flags: Vec<String>,
}

/// Tax deductions, from `/analytics/tax-summary`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxSummary {
    /// Totals per tax section.
    pub tax_totals: TaxTotals,
    /// Sum of all section totals.
    pub total_deductions: f64,
    /// Every tax-eligible transaction.
    #[serde(default)]
    pub tax_transactions: Vec<TaxTransaction>,
}

/// Amount spent on one day.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct DailySpend {
    /// A `YYYY-MM-DD` date.
    pub date: String,
    /// Total spent on the day.
    pub amount: f64,
}

/// Amount spent with one merchant.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct MerchantTotal {
    /// The merchant name.
    pub merchant: String,
    /// Total spent with the merchant.
    pub amount: f64,
}

/// Spending patterns, from `/analytics/spend-insights`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendInsights {
    /// Spend per day, oldest first.
    pub daily_trend: Vec<DailySpend>,
    /// Average spend per week over the trend period.
    pub weekly_average: f64,
    /// Days on which spending exceeded the backend's alert threshold.
    #[serde(default)]
    pub high_spend_alerts: Vec<DailySpend>,
    /// The five categories with the highest spend, largest first.
    #[serde(default)]
    pub top_categories: Vec<CategoryTotal>,
    /// The five merchants with the highest spend, largest first.
    #[serde(default)]
    pub top_merchants: Vec<MerchantTotal>,
}
