//! ECharts visualizations for the pre-aggregated backend data:
//! - **Category chart**: expenses per category as a doughnut
//! - **Monthly chart**: income against expenses per month
//! - **Daily trend chart**: spend per day
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with a container div and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{
        AxisLabel, AxisPointer, AxisPointerType, AxisType, JsFunction, Tooltip, Trigger,
    },
    series::{Bar, Line, Pie},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    analytics::{CategoryTotal, DailySpend, MonthlyTotal},
    html::HeadElement,
};

/// A dashboard chart with its HTML container ID and ECharts configuration.
pub(super) struct DashboardChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML containers for `charts` in a responsive grid.
pub(super) fn charts_view(charts: &[DashboardChart]) -> Markup {
    html!(
        section
            class="w-full mx-auto"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded bg-white dark:bg-gray-100 shadow"
                    {}
                }
            }
        }
    )
}

/// Generates JavaScript initialization code for dashboard charts.
///
/// Creates scripts that initialize ECharts instances with dark mode support
/// and responsive resizing.
pub(super) fn charts_script(charts: &[DashboardChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chartDom = document.getElementById("{}");
                    const chart = echarts.init(chartDom);
                    const option = {};
                    chart.setOption(option);

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        const isDarkMode = darkModeMediaQuery.matches;
                        chart.setTheme(isDarkMode ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id, chart.options
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    let wrapped_script = format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{}\n}});",
        script_content
    );

    HeadElement::ScriptSource(PreEscaped(wrapped_script))
}

pub(super) fn category_chart(categories: &[CategoryTotal]) -> Chart {
    let data: Vec<(f64, &str)> = categories
        .iter()
        .map(|total| (total.amount, total.category.as_str()))
        .collect();

    Chart::new()
        .title(Title::new().text("Expenses by Category").left(20).top("1%"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().bottom("1%"))
        .series(
            Pie::new()
                .name("Expenses")
                .radius(vec!["40%", "65%"])
                .data(data),
        )
}

pub(super) fn monthly_chart(months: &[MonthlyTotal]) -> Chart {
    let labels: Vec<String> = months.iter().map(|month| month.month.clone()).collect();
    let income: Vec<f64> = months.iter().map(|month| month.income).collect();
    let expenses: Vec<f64> = months.iter().map(|month| month.expenses).collect();

    Chart::new()
        .title(
            Title::new()
                .text("Income vs Expenses")
                .subtext("Per month")
                .left(20)
                .top("1%"),
        )
        .tooltip(currency_tooltip())
        .legend(Legend::new().right(20).top("1%"))
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .top(90)
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Bar::new().name("Income").data(income))
        .series(Bar::new().name("Expenses").data(expenses))
}

/// The number of most recent days plotted by the daily trend chart.
pub(super) const DAILY_TREND_DAYS: usize = 30;

/// Plots the last [DAILY_TREND_DAYS] entries of `daily_trend`.
pub(super) fn daily_trend_chart(daily_trend: &[DailySpend]) -> Chart {
    let daily_trend = &daily_trend[daily_trend.len().saturating_sub(DAILY_TREND_DAYS)..];
    let labels: Vec<String> = daily_trend.iter().map(|day| day.date.clone()).collect();
    let values: Vec<f64> = daily_trend.iter().map(|day| day.amount).collect();

    Chart::new()
        .title(Title::new().text("Daily Spend").left(20).top("1%"))
        .tooltip(currency_tooltip())
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Line::new().name("Spend").data(values))
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-IN', {
              style: 'currency',
              currency: 'INR',
              maximumFractionDigits: 0
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}

/// Creates a tooltip configuration for currency values
fn currency_tooltip() -> Tooltip {
    Tooltip::new()
        .trigger(Trigger::Axis)
        .value_formatter(currency_formatter())
        .axis_pointer(AxisPointer::new().type_(AxisPointerType::Shadow))
}

#[cfg(test)]
mod tests {
    use crate::analytics::{CategoryTotal, DailySpend, MonthlyTotal};

    use super::{DAILY_TREND_DAYS, category_chart, daily_trend_chart, monthly_chart};

    #[test]
    fn category_chart_lists_every_category() {
        let options = category_chart(&[
            CategoryTotal {
                category: "Rent".to_owned(),
                amount: 25000.0,
            },
            CategoryTotal {
                category: "Food & Dining".to_owned(),
                amount: 8200.0,
            },
        ])
        .to_string();

        assert!(options.contains("Rent"), "got {options}");
        assert!(options.contains("Food & Dining"), "got {options}");
    }

    #[test]
    fn monthly_chart_has_income_and_expense_series() {
        let options = monthly_chart(&[MonthlyTotal {
            month: "Mar 2024".to_owned(),
            income: 85000.0,
            expenses: 25499.0,
        }])
        .to_string();

        assert!(options.contains("Mar 2024"), "got {options}");
        assert!(options.contains("\"Income\""), "got {options}");
        assert!(options.contains("\"Expenses\""), "got {options}");
    }

    #[test]
    fn daily_trend_chart_uses_dates_as_labels() {
        let options = daily_trend_chart(&[DailySpend {
            date: "2024-03-04".to_owned(),
            amount: 24000.0,
        }])
        .to_string();

        assert!(options.contains("2024-03-04"), "got {options}");
    }

    #[test]
    fn daily_trend_chart_keeps_most_recent_days() {
        let days: Vec<DailySpend> = (0..45)
            .map(|day| DailySpend {
                date: format!("day-{day:02}"),
                amount: 100.0 + day as f64,
            })
            .collect();

        let options = daily_trend_chart(&days).to_string();

        assert_eq!(DAILY_TREND_DAYS, 30);
        assert!(!options.contains("day-00"), "got {options}");
        assert!(!options.contains("day-14"), "got {options}");
        assert!(options.contains("day-15"), "got {options}");
        assert!(options.contains("day-44"), "got {options}");
    }
}
