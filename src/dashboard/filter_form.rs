//! The filter controls above the transaction table.
//!
//! The form works as a plain GET form, and with htmx it swaps only the table
//! whenever a control changes.

use maud::{Markup, html};

use crate::{
    endpoints,
    filter::{CategoryFilter, FilterCriteria, HighValueFilter, ModeFilter, TaxFilter, TypeFilter},
    html::{BUTTON_PRIMARY_STYLE, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE, LINK_STYLE},
    transaction::PaymentMode,
};

use super::tables::TRANSACTIONS_TABLE_ID;

struct SelectOption<'a> {
    value: &'a str,
    label: &'a str,
    is_selected: bool,
}

fn select_input(name: &str, label: &str, options: &[SelectOption<'_>]) -> Markup {
    html! {
        div
        {
            label for=(name) class=(FORM_LABEL_STYLE) { (label) }

            select id=(name) name=(name) class=(FORM_TEXT_INPUT_STYLE)
            {
                @for option in options {
                    option value=(option.value) selected[option.is_selected] { (option.label) }
                }
            }
        }
    }
}

fn type_options(selected: TypeFilter) -> [SelectOption<'static>; 3] {
    [
        (TypeFilter::All, "all", "All types"),
        (TypeFilter::Income, "income", "Income"),
        (TypeFilter::Expense, "expense", "Expense"),
    ]
    .map(|(filter, value, label)| SelectOption {
        value,
        label,
        is_selected: filter == selected,
    })
}

/// The filter that selects exactly `mode`, if there is one.
fn mode_filter(mode: PaymentMode) -> Option<ModeFilter> {
    match mode {
        PaymentMode::Cash => Some(ModeFilter::Cash),
        PaymentMode::Card => Some(ModeFilter::Card),
        PaymentMode::Upi => Some(ModeFilter::Upi),
        PaymentMode::BankTransfer => Some(ModeFilter::BankTransfer),
        PaymentMode::Other => None,
    }
}

fn mode_options(selected: ModeFilter) -> Vec<SelectOption<'static>> {
    let all = SelectOption {
        value: "all",
        label: "All modes",
        is_selected: selected == ModeFilter::All,
    };

    std::iter::once(all)
        .chain(PaymentMode::ALL.into_iter().map(|mode| SelectOption {
            value: mode.as_str(),
            label: mode.label(),
            is_selected: mode_filter(mode) == Some(selected),
        }))
        .collect()
}

fn tax_options(selected: TaxFilter) -> [SelectOption<'static>; 3] {
    [
        (TaxFilter::All, "all", "All"),
        (TaxFilter::Eligible, "eligible", "Tax eligible"),
        (TaxFilter::NotEligible, "not-eligible", "Not eligible"),
    ]
    .map(|(filter, value, label)| SelectOption {
        value,
        label,
        is_selected: filter == selected,
    })
}

fn high_value_options(selected: HighValueFilter) -> [SelectOption<'static>; 3] {
    [
        (HighValueFilter::All, "all", "All"),
        (HighValueFilter::Yes, "yes", "High value"),
        (HighValueFilter::No, "no", "Regular"),
    ]
    .map(|(filter, value, label)| SelectOption {
        value,
        label,
        is_selected: filter == selected,
    })
}

/// The category options, keeping a chosen category that is missing from
/// `categories` so the form still shows the filter that is applied.
fn category_options<'a>(
    selected: &'a CategoryFilter,
    categories: &'a [String],
) -> Vec<SelectOption<'a>> {
    let all = SelectOption {
        value: "all",
        label: "All categories",
        is_selected: *selected == CategoryFilter::All,
    };
    let missing = match selected {
        CategoryFilter::Only(category) if !categories.contains(category) => Some(SelectOption {
            value: category,
            label: category,
            is_selected: true,
        }),
        _ => None,
    };

    std::iter::once(all)
        .chain(missing)
        .chain(categories.iter().map(|category| SelectOption {
            value: category,
            label: category,
            is_selected: selected.is_selected(category),
        }))
        .collect()
}

/// Renders the filter form with `criteria` pre-selected.
///
/// `categories` are the options for the category select.
pub(super) fn filter_form(criteria: &FilterCriteria, categories: &[String]) -> Markup {
    let category_options = category_options(&criteria.category, categories);

    html! {
        form
            id="filter-form"
            method="get"
            action=(endpoints::TRANSACTIONS_VIEW)
            hx-get=(endpoints::TRANSACTIONS_VIEW)
            hx-target={"#" (TRANSACTIONS_TABLE_ID)}
            hx-target-error="#alert-container"
            hx-swap="outerHTML"
            hx-push-url="true"
            hx-trigger="input changed delay:300ms from:#search, change"
            class="w-full grid grid-cols-1 sm:grid-cols-2 lg:grid-cols-3 xl:grid-cols-6 gap-4
                p-4 rounded-lg bg-white dark:bg-gray-800 shadow"
        {
            div
            {
                label for="search" class=(FORM_LABEL_STYLE) { "Search" }

                input
                    type="search"
                    id="search"
                    name="search"
                    placeholder="Merchant, category or note"
                    value=(criteria.search)
                    class=(FORM_TEXT_INPUT_STYLE);
            }

            (select_input("type", "Type", &type_options(criteria.transaction_type)))
            (select_input("mode", "Mode", &mode_options(criteria.mode)))
            (select_input("category", "Category", &category_options))
            (select_input("tax", "Tax", &tax_options(criteria.tax)))
            (select_input("high_value", "Value", &high_value_options(criteria.high_value)))

            div class="flex items-end gap-4"
            {
                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Apply" }

                @if !criteria.is_default() {
                    a href=(endpoints::TRANSACTIONS_VIEW) class={(LINK_STYLE) " text-sm"}
                    {
                        "Clear filters"
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use scraper::{Html, Selector};

    use crate::filter::{CategoryFilter, FilterCriteria, ModeFilter, TaxFilter};

    use super::filter_form;

    fn selected_value(html: &Html, name: &str) -> String {
        let selector = Selector::parse(&format!("select[name='{name}'] option[selected]")).unwrap();
        let selected: Vec<_> = html.select(&selector).collect();
        assert_eq!(selected.len(), 1, "want one selected option for {name}");

        selected[0].value().attr("value").unwrap().to_owned()
    }

    #[test]
    fn defaults_select_all() {
        let categories = ["Rent".to_owned(), "Shopping".to_owned()];

        let html = Html::parse_fragment(
            &filter_form(&FilterCriteria::default(), &categories).into_string(),
        );

        for name in ["type", "mode", "category", "tax", "high_value"] {
            assert_eq!(selected_value(&html, name), "all");
        }
        let clear = Selector::parse("a").unwrap();
        assert_eq!(html.select(&clear).count(), 0);
    }

    #[test]
    fn marks_chosen_options() {
        let categories = ["Rent".to_owned(), "Insurance".to_owned()];
        let criteria = FilterCriteria {
            search: "lic".to_owned(),
            mode: ModeFilter::BankTransfer,
            category: CategoryFilter::Only("Insurance".to_owned()),
            tax: TaxFilter::NotEligible,
            ..Default::default()
        };

        let html = Html::parse_fragment(&filter_form(&criteria, &categories).into_string());

        assert_eq!(selected_value(&html, "mode"), "bank_transfer");
        assert_eq!(selected_value(&html, "category"), "Insurance");
        assert_eq!(selected_value(&html, "tax"), "not-eligible");
        let search = Selector::parse("input[name='search']").unwrap();
        let search = html.select(&search).next().unwrap();
        assert_eq!(search.value().attr("value"), Some("lic"));
    }

    #[test]
    fn category_options_come_from_categories() {
        let categories = ["Food & Dining".to_owned(), "Transportation".to_owned()];

        let html = Html::parse_fragment(
            &filter_form(&FilterCriteria::default(), &categories).into_string(),
        );
        let selector = Selector::parse("select[name='category'] option").unwrap();
        let values: Vec<&str> = html
            .select(&selector)
            .filter_map(|option| option.value().attr("value"))
            .collect();

        assert_eq!(values, ["all", "Food & Dining", "Transportation"]);
    }

    #[test]
    fn keeps_chosen_category_missing_from_options() {
        let categories = ["Rent".to_owned()];
        let criteria = FilterCriteria {
            category: CategoryFilter::Only("Gone".to_owned()),
            ..Default::default()
        };

        let html = Html::parse_fragment(&filter_form(&criteria, &categories).into_string());

        assert_eq!(selected_value(&html, "category"), "Gone");
        let selector = Selector::parse("select[name='category'] option").unwrap();
        let values: Vec<&str> = html
            .select(&selector)
            .filter_map(|option| option.value().attr("value"))
            .collect();
        assert_eq!(values, ["all", "Gone", "Rent"]);
        let clear = Selector::parse("a").unwrap();
        assert_eq!(html.select(&clear).count(), 1);
    }

    #[test]
    fn unknown_mode_is_never_an_option() {
        let html = Html::parse_fragment(
            &filter_form(&FilterCriteria::default(), &[]).into_string(),
        );
        let selector = Selector::parse("select[name='mode'] option").unwrap();
        let values: Vec<&str> = html
            .select(&selector)
            .filter_map(|option| option.value().attr("value"))
            .collect();

        assert_eq!(values, ["all", "cash", "card", "upi", "bank_transfer"]);
    }
}
