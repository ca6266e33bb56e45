//! The URIs of the pages and actions the server handles.

/// The root route which redirects to the overview tab.
pub const ROOT: &str = "/";
/// The summary cards, category breakdown and monthly chart.
pub const OVERVIEW_VIEW: &str = "/overview";
/// The filterable transaction table.
pub const TRANSACTIONS_VIEW: &str = "/transactions";
/// Spending trends and top categories and merchants.
pub const INSIGHTS_VIEW: &str = "/insights";
/// Tax deductions per section.
pub const TAX_VIEW: &str = "/tax";
/// Reload all data from the backend.
pub const REFRESH: &str = "/refresh";
