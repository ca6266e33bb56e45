//! The transaction filters behind the transaction table.
//!
//! [FilterCriteria] is parsed from the query string of the transactions page.
//! Each criterion is skipped while it holds its default value and the rest
//! are combined with logical AND, so the order they are checked in never
//! changes the result.

use std::fmt::Display;

use serde::{Deserialize, Serialize};

use crate::transaction::{PaymentMode, Transaction, TransactionType};

/// The value every select filter uses to mean "do not filter".
const ALL: &str = "all";

/// Filter by income or expense.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TypeFilter {
    /// Do not filter by type.
    #[default]
    All,
    /// Only income.
    Income,
    /// Only expenses.
    Expense,
}

impl TypeFilter {
    fn matches(self, transaction_type: TransactionType) -> bool {
        match self {
            TypeFilter::All => true,
            TypeFilter::Income => transaction_type == TransactionType::Income,
            TypeFilter::Expense => transaction_type == TransactionType::Expense,
        }
    }
}

/// Filter by payment mode.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ModeFilter {
    /// Do not filter by mode.
    #[default]
    All,
    /// Only cash payments.
    Cash,
    /// Only card payments.
    Card,
    /// Only UPI payments.
    Upi,
    /// Only bank transfers.
    BankTransfer,
}

impl ModeFilter {
    fn matches(self, mode: PaymentMode) -> bool {
        match self {
            ModeFilter::All => true,
            ModeFilter::Cash => mode == PaymentMode::Cash,
            ModeFilter::Card => mode == PaymentMode::Card,
            ModeFilter::Upi => mode == PaymentMode::Upi,
            ModeFilter::BankTransfer => mode == PaymentMode::BankTransfer,
        }
    }
}

/// Filter by an exact category name.
///
/// Uses the string "all" on the wire for [CategoryFilter::All].
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(from = "String", into = "String")]
pub enum CategoryFilter {
    /// Do not filter by category.
    #[default]
    All,
    /// Only the category with exactly this name.
    Only(String),
}

impl CategoryFilter {
    fn matches(&self, category: &str) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(wanted) => wanted == category,
        }
    }

    /// Whether this filter selects `category`, used to mark select options.
    pub fn is_selected(&self, category: &str) -> bool {
        matches!(self, CategoryFilter::Only(wanted) if wanted == category)
    }
}

impl From<String> for CategoryFilter {
    fn from(value: String) -> Self {
        if value == ALL {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(value)
        }
    }
}

impl From<CategoryFilter> for String {
    fn from(value: CategoryFilter) -> Self {
        match value {
            CategoryFilter::All => ALL.to_owned(),
            CategoryFilter::Only(category) => category,
        }
    }
}

/// Filter by whether a transaction qualifies for a tax deduction.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaxFilter {
    /// Do not filter by tax eligibility.
    #[default]
    All,
    /// Only transactions with at least one tax flag.
    Eligible,
    /// Only transactions with no tax flags.
    NotEligible,
}

impl TaxFilter {
    fn matches(self, transaction: &Transaction) -> bool {
        match self {
            TaxFilter::All => true,
            TaxFilter::Eligible => transaction.is_tax_eligible(),
            TaxFilter::NotEligible => !transaction.is_tax_eligible(),
        }
    }
}

/// Filter by the backend's high value flag.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HighValueFilter {
    /// Do not filter by value.
    #[default]
    All,
    /// Only transactions explicitly flagged as high value.
    Yes,
    /// Only transactions explicitly flagged as not high value.
    No,
}

impl HighValueFilter {
    /// A missing flag matches neither [HighValueFilter::Yes] nor [HighValueFilter::No].
    fn matches(self, is_high_value: Option<bool>) -> bool {
        match self {
            HighValueFilter::All => true,
            HighValueFilter::Yes => is_high_value == Some(true),
            HighValueFilter::No => is_high_value == Some(false),
        }
    }
}

/// The filters a user has chosen for the transaction table.
///
/// All fields default to "all" (or an empty search), which matches every
/// transaction.
#[derive(Debug, Default, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct FilterCriteria {
    /// Case-insensitive text searched for in the merchant, category and narration.
    ///
    /// An empty string disables the text search.
    pub search: String,
    /// Filter by income or expense.
    #[serde(rename = "type")]
    pub transaction_type: TypeFilter,
    /// Filter by payment mode.
    pub mode: ModeFilter,
    /// Filter by category.
    pub category: CategoryFilter,
    /// Filter by tax eligibility.
    pub tax: TaxFilter,
    /// Filter by the high value flag.
    pub high_value: HighValueFilter,
}

impl FilterCriteria {
    /// Whether every criterion is at its default, i.e. nothing is filtered out.
    pub fn is_default(&self) -> bool {
        *self == Self::default()
    }

    /// Whether `transaction` passes every active criterion.
    pub fn matches(&self, transaction: &Transaction) -> bool {
        self.matches_search(transaction)
            && self.transaction_type.matches(transaction.transaction_type)
            && self.mode.matches(transaction.mode)
            && self.category.matches(&transaction.category)
            && self.tax.matches(transaction)
            && self.high_value.matches(transaction.is_high_value)
    }

    fn matches_search(&self, transaction: &Transaction) -> bool {
        if self.search.is_empty() {
            return true;
        }

        let needle = self.search.to_lowercase();

        [
            &transaction.merchant,
            &transaction.category,
            &transaction.narration,
        ]
        .iter()
        .any(|haystack| haystack.to_lowercase().contains(&needle))
    }

    /// Encode the criteria as a URL query string, e.g. `search=&type=income&...`.
    pub fn to_query_string(&self) -> String {
        serde_urlencoded::to_string(self)
            .inspect_err(|error| tracing::error!("could not encode filter criteria: {error}"))
            .unwrap_or_default()
    }
}

impl Display for FilterCriteria {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_query_string())
    }
}

/// Return the transactions that pass every active criterion.
///
/// The result keeps the input order and never duplicates or invents records.
pub fn filter_transactions(
    transactions: &[Transaction],
    criteria: &FilterCriteria,
) -> Vec<Transaction> {
    transactions
        .iter()
        .filter(|transaction| criteria.matches(transaction))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use crate::transaction::{PaymentMode, Transaction, TransactionType};

    use super::{
        CategoryFilter, FilterCriteria, HighValueFilter, ModeFilter, TaxFilter, TypeFilter,
        filter_transactions,
    };

    fn amazon_and_lic() -> Vec<Transaction> {
        vec![
            Transaction::build("1", "Amazon", "Shopping").tax_flags(&[]),
            Transaction::build("2", "LIC", "Insurance").tax_flags(&["80C"]),
        ]
    }

    fn ids(transactions: &[Transaction]) -> Vec<&str> {
        transactions
            .iter()
            .map(|transaction| transaction.id.as_str())
            .collect()
    }

    #[test]
    fn default_criteria_return_everything() {
        let transactions = amazon_and_lic();

        let got = filter_transactions(&transactions, &FilterCriteria::default());

        assert_eq!(got, transactions);
    }

    #[test]
    fn empty_input_gives_empty_output() {
        let criteria = FilterCriteria {
            search: "anything".to_owned(),
            tax: TaxFilter::Eligible,
            ..Default::default()
        };

        assert!(filter_transactions(&[], &criteria).is_empty());
    }

    #[test]
    fn tax_eligible_selects_flagged_transactions() {
        let criteria = FilterCriteria {
            tax: TaxFilter::Eligible,
            ..Default::default()
        };

        let got = filter_transactions(&amazon_and_lic(), &criteria);

        assert_eq!(ids(&got), ["2"]);
    }

    #[test]
    fn tax_not_eligible_selects_unflagged_transactions() {
        let criteria = FilterCriteria {
            tax: TaxFilter::NotEligible,
            ..Default::default()
        };

        let got = filter_transactions(&amazon_and_lic(), &criteria);

        assert_eq!(ids(&got), ["1"]);
    }

    #[test]
    fn search_is_case_insensitive_substring() {
        let criteria = FilterCriteria {
            search: "amaz".to_owned(),
            ..Default::default()
        };

        let got = filter_transactions(&amazon_and_lic(), &criteria);

        assert_eq!(ids(&got), ["1"]);

        let criteria = FilterCriteria {
            search: "AMAZ".to_owned(),
            ..Default::default()
        };

        let got = filter_transactions(&amazon_and_lic(), &criteria);

        assert_eq!(ids(&got), ["1"]);
    }

    #[test]
    fn search_checks_category_and_narration() {
        let transactions = vec![
            Transaction::build("1", "Zomato", "Food & Dining").narration("late dinner"),
            Transaction::build("2", "Uber", "Transportation").narration("airport DROP"),
            Transaction::build("3", "HDFC", "Investment").narration("SIP"),
        ];

        let by_category = FilterCriteria {
            search: "food".to_owned(),
            ..Default::default()
        };
        let by_narration = FilterCriteria {
            search: "drop".to_owned(),
            ..Default::default()
        };

        assert_eq!(ids(&filter_transactions(&transactions, &by_category)), ["1"]);
        assert_eq!(ids(&filter_transactions(&transactions, &by_narration)), ["2"]);
    }

    #[test]
    fn type_and_mode_filters_use_equality() {
        let transactions = vec![
            Transaction::build("1", "Acme", "Salary")
                .transaction_type(TransactionType::Income)
                .mode(PaymentMode::BankTransfer),
            Transaction::build("2", "Chaayos", "Food & Dining").mode(PaymentMode::Upi),
            Transaction::build("3", "Odd", "Misc")
                .transaction_type(TransactionType::Other)
                .mode(PaymentMode::Other),
        ];

        let income = FilterCriteria {
            transaction_type: TypeFilter::Income,
            ..Default::default()
        };
        let expense = FilterCriteria {
            transaction_type: TypeFilter::Expense,
            ..Default::default()
        };
        let upi = FilterCriteria {
            mode: ModeFilter::Upi,
            ..Default::default()
        };

        assert_eq!(ids(&filter_transactions(&transactions, &income)), ["1"]);
        assert_eq!(ids(&filter_transactions(&transactions, &expense)), ["2"]);
        assert_eq!(ids(&filter_transactions(&transactions, &upi)), ["2"]);
    }

    #[test]
    fn category_filter_is_exact() {
        let transactions = vec![
            Transaction::build("1", "Apollo", "Healthcare"),
            Transaction::build("2", "Apollo", "healthcare"),
            Transaction::build("3", "Apollo", "Healthcare Plus"),
        ];
        let criteria = FilterCriteria {
            category: CategoryFilter::Only("Healthcare".to_owned()),
            ..Default::default()
        };

        assert_eq!(ids(&filter_transactions(&transactions, &criteria)), ["1"]);
    }

    #[test]
    fn high_value_filter_is_strict() {
        let transactions = vec![
            Transaction::build("1", "Landlord", "Rent").high_value(Some(true)),
            Transaction::build("2", "Cafe", "Food & Dining").high_value(Some(false)),
            Transaction::build("3", "Unknown", "Misc").high_value(None),
        ];
        let yes = FilterCriteria {
            high_value: HighValueFilter::Yes,
            ..Default::default()
        };
        let no = FilterCriteria {
            high_value: HighValueFilter::No,
            ..Default::default()
        };

        assert_eq!(ids(&filter_transactions(&transactions, &yes)), ["1"]);
        assert_eq!(ids(&filter_transactions(&transactions, &no)), ["2"]);
    }

    #[test]
    fn criteria_combine_with_and() {
        let transactions = vec![
            Transaction::build("1", "LIC", "Insurance")
                .tax_flags(&["80C"])
                .high_value(Some(true)),
            Transaction::build("2", "LIC", "Insurance")
                .tax_flags(&["80C"])
                .high_value(Some(false)),
            Transaction::build("3", "Star Health", "Insurance")
                .tax_flags(&["80D"])
                .high_value(Some(true)),
        ];
        let criteria = FilterCriteria {
            search: "lic".to_owned(),
            category: CategoryFilter::Only("Insurance".to_owned()),
            tax: TaxFilter::Eligible,
            high_value: HighValueFilter::Yes,
            ..Default::default()
        };

        assert_eq!(ids(&filter_transactions(&transactions, &criteria)), ["1"]);
    }

    #[test]
    fn parses_query_string() {
        let criteria: FilterCriteria = serde_urlencoded::from_str(
            "search=rent&type=expense&mode=bank_transfer&category=Food+%26+Dining\
            &tax=not-eligible&high_value=no",
        )
        .unwrap();

        assert_eq!(
            criteria,
            FilterCriteria {
                search: "rent".to_owned(),
                transaction_type: TypeFilter::Expense,
                mode: ModeFilter::BankTransfer,
                category: CategoryFilter::Only("Food & Dining".to_owned()),
                tax: TaxFilter::NotEligible,
                high_value: HighValueFilter::No,
            }
        );
    }

    #[test]
    fn missing_and_all_query_params_are_default() {
        let empty: FilterCriteria = serde_urlencoded::from_str("").unwrap();
        let all: FilterCriteria = serde_urlencoded::from_str(
            "search=&type=all&mode=all&category=all&tax=all&high_value=all",
        )
        .unwrap();

        assert!(empty.is_default());
        assert!(all.is_default());
    }

    #[test]
    fn query_string_round_trips_category() {
        let criteria = FilterCriteria {
            category: CategoryFilter::Only("Food & Dining".to_owned()),
            ..Default::default()
        };

        let query = criteria.to_query_string();
        let parsed: FilterCriteria = serde_urlencoded::from_str(&query).unwrap();

        assert_eq!(parsed, criteria);
    }
}
