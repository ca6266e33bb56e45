//! Table views for transactions, top spends and tax-eligible transactions.

use maud::{Markup, html};

use crate::{
    analytics::{CategoryTotal, MerchantTotal, TaxTransaction},
    format::{format_currency, format_date, format_mode},
    html::{
        BADGE_STYLE, EXPENSE_TEXT_STYLE, HIGH_VALUE_BADGE_STYLE, INCOME_TEXT_STYLE,
        TABLE_CELL_STYLE, TABLE_HEADER_STYLE, TABLE_ROW_STYLE, TABLE_STYLE, TAX_BADGE_STYLE,
    },
    transaction::{Transaction, TransactionType},
};

/// The most rows the transaction table shows.
pub(super) const MAX_TABLE_ROWS: usize = 50;

/// The id of the element htmx swaps when the filters change.
pub(super) const TRANSACTIONS_TABLE_ID: &str = "transactions-table";

/// Formats an amount with a `+` for income and a `-` for expenses.
fn signed_amount(transaction: &Transaction) -> (String, &'static str) {
    let amount = format_currency(transaction.amount.abs());

    match transaction.transaction_type {
        TransactionType::Income => (format!("+{amount}"), INCOME_TEXT_STYLE),
        TransactionType::Expense => (format!("-{amount}"), EXPENSE_TEXT_STYLE),
        TransactionType::Other => (format_currency(transaction.amount), ""),
    }
}

/// Renders the filtered transactions, at most [MAX_TABLE_ROWS] of them.
///
/// `total_count` is the number of transactions before filtering.
pub(super) fn transactions_table(filtered: &[Transaction], total_count: usize) -> Markup {
    let shown = &filtered[..filtered.len().min(MAX_TABLE_ROWS)];

    html! {
        div id=(TRANSACTIONS_TABLE_ID) class="w-full"
        {
            p id="transaction-count" class="mb-2 text-sm text-gray-600 dark:text-gray-400"
            {
                "Showing " (shown.len()) " of " (filtered.len()) " matching transactions ("
                (total_count) " in total)"
            }

            div class="overflow-x-auto rounded-lg shadow"
            {
                table class=(TABLE_STYLE)
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Merchant" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Mode" }
                            th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Amount" }
                        }
                    }

                    tbody
                    {
                        @for transaction in shown {
                            (transaction_row(transaction))
                        }

                        @if shown.is_empty() {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td colspan="5" class={(TABLE_CELL_STYLE) " text-center"}
                                {
                                    "No transactions match the filters."
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

fn transaction_row(transaction: &Transaction) -> Markup {
    let (amount, amount_style) = signed_amount(transaction);

    html! {
        tr class=(TABLE_ROW_STYLE) data-transaction-id=(transaction.id)
        {
            td class={(TABLE_CELL_STYLE) " whitespace-nowrap"} { (format_date(&transaction.date)) }

            td class=(TABLE_CELL_STYLE)
            {
                div class="font-medium text-gray-900 dark:text-white" { (transaction.merchant) }
                div class="text-xs" { (transaction.narration) }

                div class="flex flex-wrap gap-1 mt-1"
                {
                    @if transaction.is_high_value == Some(true) {
                        span class=(HIGH_VALUE_BADGE_STYLE) { "High Value" }
                    }

                    @for flag in &transaction.tax_flags {
                        span class=(TAX_BADGE_STYLE) { (flag) }
                    }
                }
            }

            td class=(TABLE_CELL_STYLE)
            {
                (transaction.category)

                @if let Some(sub_category) = &transaction.sub_category {
                    div class="text-xs" { (sub_category) }
                }
            }

            td class=(TABLE_CELL_STYLE)
            {
                span class=(BADGE_STYLE) { (format_mode(transaction.mode)) }
            }

            td class={(TABLE_CELL_STYLE) " text-right font-semibold whitespace-nowrap " (amount_style)}
            {
                (amount)
            }
        }
    }
}

fn ranked_table<'a>(
    title: &str,
    name_header: &str,
    rows: impl Iterator<Item = (&'a str, f64)>,
) -> Markup {
    html! {
        div
        {
            h3 class="text-xl font-semibold mb-4" { (title) }

            div class="overflow-x-auto rounded-lg shadow"
            {
                table class=(TABLE_STYLE)
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "#" }
                            th scope="col" class=(TABLE_CELL_STYLE) { (name_header) }
                            th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Amount" }
                        }
                    }

                    tbody
                    {
                        @for (rank, (name, amount)) in rows.enumerate() {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td class=(TABLE_CELL_STYLE) { (rank + 1) }
                                td class={(TABLE_CELL_STYLE) " font-medium text-gray-900 dark:text-white"} { (name) }
                                td class={(TABLE_CELL_STYLE) " text-right"} { (format_currency(amount)) }
                            }
                        }
                    }
                }
            }
        }
    }
}

pub(super) fn top_categories_table(categories: &[CategoryTotal]) -> Markup {
    ranked_table(
        "Top Categories",
        "Category",
        categories
            .iter()
            .map(|total| (total.category.as_str(), total.amount)),
    )
}

pub(super) fn top_merchants_table(merchants: &[MerchantTotal]) -> Markup {
    ranked_table(
        "Top Merchants",
        "Merchant",
        merchants
            .iter()
            .map(|total| (total.merchant.as_str(), total.amount)),
    )
}

pub(super) fn tax_transactions_table(transactions: &[TaxTransaction]) -> Markup {
    html! {
        div class="w-full"
        {
            h3 class="text-xl font-semibold mb-4" { "Tax-Eligible Transactions" }

            div class="overflow-x-auto rounded-lg shadow"
            {
                table class=(TABLE_STYLE)
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            th scope="col" class=(TABLE_CELL_STYLE) { "Date" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Merchant" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Category" }
                            th scope="col" class=(TABLE_CELL_STYLE) { "Sections" }
                            th scope="col" class={(TABLE_CELL_STYLE) " text-right"} { "Amount" }
                        }
                    }

                    tbody
                    {
                        @for transaction in transactions {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td class={(TABLE_CELL_STYLE) " whitespace-nowrap"} { (format_date(&transaction.date)) }
                                td class={(TABLE_CELL_STYLE) " font-medium text-gray-900 dark:text-white"} { (transaction.merchant) }
                                td class=(TABLE_CELL_STYLE) { (transaction.category) }
                                td class=(TABLE_CELL_STYLE)
                                {
                                    div class="flex flex-wrap gap-1"
                                    {
                                        @for flag in &transaction.tax_flags {
                                            span class=(TAX_BADGE_STYLE) { (flag) }
                                        }
                                    }
                                }
                                td class={(TABLE_CELL_STYLE) " text-right"} { (format_currency(transaction.amount)) }
                            }
                        }

                        @if transactions.is_empty() {
                            tr class=(TABLE_ROW_STYLE)
                            {
                                td colspan="5" class={(TABLE_CELL_STYLE) " text-center"}
                                {
                                    "No tax-eligible transactions."
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}
