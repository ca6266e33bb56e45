//! Headline number cards for the overview, insights and tax tabs.

use maud::{Markup, html};

use crate::{
    analytics::{SpendInsights, Summary, TaxSummary},
    format::format_currency,
    html::{CARD_STYLE, EXPENSE_TEXT_STYLE, INCOME_TEXT_STYLE},
};

const NEUTRAL_TEXT_STYLE: &str = "text-gray-900 dark:text-white";

/// Picks the colour for an amount that may be negative.
fn signed_amount_style(amount: f64) -> &'static str {
    if amount >= 0.0 {
        INCOME_TEXT_STYLE
    } else {
        EXPENSE_TEXT_STYLE
    }
}

fn stat_card(label: &str, value: &str, value_style: &str) -> Markup {
    stat_card_with_detail(label, value, None, value_style)
}

fn stat_card_with_detail(
    label: &str,
    value: &str,
    detail: Option<&str>,
    value_style: &str,
) -> Markup {
    html! {
        div class=(CARD_STYLE) data-card=(label)
        {
            p class="text-sm font-medium text-gray-500 dark:text-gray-400" { (label) }
            p class={"mt-2 text-2xl font-bold " (value_style)} { (value) }

            @if let Some(detail) = detail {
                span data-card-detail class="block mt-1 text-sm text-gray-500 dark:text-gray-400"
                {
                    (detail)
                }
            }
        }
    }
}

fn cards_grid(cards: &[Markup]) -> Markup {
    html! {
        section class="grid grid-cols-1 sm:grid-cols-2 xl:grid-cols-4 gap-4 w-full"
        {
            @for card in cards {
                (card)
            }
        }
    }
}

/// Total income, expenses, net cash flow and the high value count.
pub(super) fn summary_cards(summary: &Summary) -> Markup {
    cards_grid(&[
        stat_card(
            "Total Income",
            &format_currency(summary.total_income),
            INCOME_TEXT_STYLE,
        ),
        stat_card(
            "Total Expenses",
            &format_currency(summary.total_expenses),
            EXPENSE_TEXT_STYLE,
        ),
        stat_card(
            "Net Cash Flow",
            &format_currency(summary.net_cash_flow),
            signed_amount_style(summary.net_cash_flow),
        ),
        stat_card(
            "High Value Transactions",
            &summary.high_value_count.to_string(),
            NEUTRAL_TEXT_STYLE,
        ),
    ])
}

/// Weekly average, number of high spend days and the top category.
pub(super) fn insight_cards(insights: &SpendInsights) -> Markup {
    let top = insights.top_categories.first();
    let top_category = top.map(|top| top.category.as_str()).unwrap_or("None");
    let top_amount = top.map(|top| format_currency(top.amount));

    cards_grid(&[
        stat_card(
            "Weekly Average",
            &format_currency(insights.weekly_average),
            NEUTRAL_TEXT_STYLE,
        ),
        stat_card(
            "High Spend Alerts",
            &insights.high_spend_alerts.len().to_string(),
            if insights.high_spend_alerts.is_empty() {
                NEUTRAL_TEXT_STYLE
            } else {
                EXPENSE_TEXT_STYLE
            },
        ),
        stat_card_with_detail(
            "Top Category",
            top_category,
            top_amount.as_deref(),
            NEUTRAL_TEXT_STYLE,
        ),
    ])
}

/// One card per tax section, plus the total.
pub(super) fn tax_cards(tax: &TaxSummary) -> Markup {
    let mut cards: Vec<Markup> = tax
        .tax_totals
        .sections()
        .into_iter()
        .map(|(label, amount)| stat_card(label, &format_currency(amount), NEUTRAL_TEXT_STYLE))
        .collect();
    cards.push(stat_card(
        "Total Deductions",
        &format_currency(tax.total_deductions),
        INCOME_TEXT_STYLE,
    ));

    cards_grid(&cards)
}

#[cfg(test)]
mod tests {
    use scraper::{ElementRef, Html, Selector};

    use crate::analytics::{
        CategoryTotal, DailySpend, SpendInsights, Summary, TaxSummary, TaxTotals,
    };

    use super::{insight_cards, summary_cards, tax_cards};

    fn card_value(html: &Html, label: &str) -> String {
        let selector = Selector::parse(&format!("[data-card='{label}'] p")).unwrap();
        let paragraphs: Vec<ElementRef> = html.select(&selector).collect();
        assert_eq!(paragraphs.len(), 2, "card {label} not found in {}", html.html());

        paragraphs[1].text().collect()
    }

    fn card_detail(html: &Html, label: &str) -> Option<String> {
        let selector = Selector::parse(&format!("[data-card='{label}'] [data-card-detail]")).unwrap();
        html.select(&selector)
            .next()
            .map(|detail| detail.text().collect::<String>().trim().to_owned())
    }

    #[test]
    fn summary_cards_show_formatted_totals() {
        let summary = Summary {
            total_income: 1234567.0,
            total_expenses: 45000.0,
            net_cash_flow: -2500.0,
            high_value_count: 7,
            total_transactions: None,
        };

        let html = Html::parse_fragment(&summary_cards(&summary).into_string());

        assert_eq!(card_value(&html, "Total Income"), "₹12,34,567");
        assert_eq!(card_value(&html, "Total Expenses"), "₹45,000");
        assert_eq!(card_value(&html, "Net Cash Flow"), "-₹2,500");
        assert_eq!(card_value(&html, "High Value Transactions"), "7");
    }

    #[test]
    fn insight_cards_without_top_category() {
        let insights = SpendInsights {
            daily_trend: vec![],
            weekly_average: 0.0,
            high_spend_alerts: vec![DailySpend {
                date: "2024-03-04".to_owned(),
                amount: 24000.0,
            }],
            top_categories: vec![],
            top_merchants: vec![],
        };

        let html = Html::parse_fragment(&insight_cards(&insights).into_string());

        assert_eq!(card_value(&html, "High Spend Alerts"), "1");
        assert_eq!(card_value(&html, "Top Category"), "None");
        assert_eq!(card_detail(&html, "Top Category"), None);
    }

    #[test]
    fn insight_cards_show_first_top_category() {
        let insights = SpendInsights {
            daily_trend: vec![],
            weekly_average: 8403.2,
            high_spend_alerts: vec![],
            top_categories: vec![
                CategoryTotal {
                    category: "Rent".to_owned(),
                    amount: 25000.0,
                },
                CategoryTotal {
                    category: "Shopping".to_owned(),
                    amount: 1499.0,
                },
            ],
            top_merchants: vec![],
        };

        let html = Html::parse_fragment(&insight_cards(&insights).into_string());

        assert_eq!(card_value(&html, "Top Category"), "Rent");
        assert_eq!(card_detail(&html, "Top Category").as_deref(), Some("₹25,000"));
        assert_eq!(card_value(&html, "Weekly Average"), "₹8,403");
    }

    #[test]
    fn tax_cards_show_every_section_and_total() {
        let tax = TaxSummary {
            tax_totals: TaxTotals {
                section_80c: 150000.0,
                section_80d: 25000.0,
                section_80g: 5000.0,
                hra: 0.0,
            },
            total_deductions: 180000.0,
            tax_transactions: vec![],
        };

        let html = Html::parse_fragment(&tax_cards(&tax).into_string());

        assert_eq!(card_value(&html, "Section 80C"), "₹1,50,000");
        assert_eq!(card_value(&html, "Section 80D"), "₹25,000");
        assert_eq!(card_value(&html, "Section 80G"), "₹5,000");
        assert_eq!(card_value(&html, "HRA"), "₹0");
        assert_eq!(card_value(&html, "Total Deductions"), "₹1,80,000");
    }
}
