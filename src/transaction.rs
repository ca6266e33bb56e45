//! The transaction record as served by the backend's `/transactions` endpoint.

use serde::{Deserialize, Serialize};

/// Whether money came in or went out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    /// Money received, e.g., salary.
    Income,
    /// Money spent.
    Expense,
    /// A value the backend sent that this dashboard does not know about.
    ///
    /// Never matches a type filter.
    #[serde(other)]
    Other,
}

impl TransactionType {
    /// The value used on the wire and in query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
            TransactionType::Other => "other",
        }
    }
}

/// How a transaction was paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMode {
    /// Paid in cash.
    Cash,
    /// Paid by debit or credit card.
    Card,
    /// Paid via the Unified Payments Interface.
    Upi,
    /// A direct bank transfer.
    BankTransfer,
    /// A value the backend sent that this dashboard does not know about.
    ///
    /// Never matches a mode filter.
    #[serde(other)]
    Other,
}

impl PaymentMode {
    /// All the modes a user can filter by, in display order.
    pub const ALL: [PaymentMode; 4] = [
        PaymentMode::Cash,
        PaymentMode::Card,
        PaymentMode::Upi,
        PaymentMode::BankTransfer,
    ];

    /// The value used on the wire and in query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMode::Cash => "cash",
            PaymentMode::Card => "card",
            PaymentMode::Upi => "upi",
            PaymentMode::BankTransfer => "bank_transfer",
            PaymentMode::Other => "other",
        }
    }

    /// The human readable name for select options.
    pub fn label(self) -> &'static str {
        match self {
            PaymentMode::Cash => "Cash",
            PaymentMode::Card => "Card",
            PaymentMode::Upi => "UPI",
            PaymentMode::BankTransfer => "Bank Transfer",
            PaymentMode::Other => "Other",
        }
    }
}

/// A single income or expense, precomputed and classified by the backend.
///
/// The fields used for display and search are required, so a record missing
/// one of them fails to decode. Optional fields degrade to "no match" in the
/// filters instead.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique within a fetched batch and stable across fetches.
    pub id: String,
    /// ISO 8601 date or date-time string, see [crate::format::format_date].
    pub date: String,
    /// Who the money was paid to or received from.
    pub merchant: String,
    /// Free text category from an open set, e.g. "Food & Dining".
    pub category: String,
    /// A finer grained category, e.g. "Groceries".
    #[serde(default)]
    pub sub_category: Option<String>,
    /// Free text description.
    pub narration: String,
    /// The non-negative amount in rupees.
    pub amount: f64,
    /// Whether this is income or an expense.
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// How the transaction was paid.
    pub mode: PaymentMode,
    /// Free form labels attached by the backend.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Whether the backend flagged this transaction as high value.
    ///
    /// `None` when the field was missing, which matches neither "yes" nor "no".
    #[serde(default)]
    pub is_high_value: Option<bool>,
    /// Tax sections this transaction qualifies under, e.g. "80C".
    ///
    /// A missing field decodes as an empty list.
    #[serde(default)]
    pub tax_flags: Vec<String>,
}

impl Transaction {
    /// Whether the transaction qualifies for at least one tax deduction.
    pub fn is_tax_eligible(&self) -> bool {
        !self.tax_flags.is_empty()
    }

    /// Create an expense with placeholder text fields for tests.
    #[cfg(test)]
    pub(crate) fn build(id: &str, merchant: &str, category: &str) -> Self {
        Self {
            id: id.to_owned(),
            date: "2024-01-15".to_owned(),
            merchant: merchant.to_owned(),
            category: category.to_owned(),
            sub_category: None,
            narration: String::new(),
            amount: 100.0,
            transaction_type: TransactionType::Expense,
            mode: PaymentMode::Card,
            tags: Vec::new(),
            is_high_value: Some(false),
            tax_flags: Vec::new(),
        }
    }

    #[cfg(test)]
    pub(crate) fn narration(mut self, narration: &str) -> Self {
        self.narration = narration.to_owned();
        self
    }

    #[cfg(test)]
    pub(crate) fn amount(mut self, amount: f64) -> Self {
        self.amount = amount;
        self
    }

    #[cfg(test)]
    pub(crate) fn date(mut self, date: &str) -> Self {
        self.date = date.to_owned();
        self
    }

    #[cfg(test)]
    pub(crate) fn transaction_type(mut self, transaction_type: TransactionType) -> Self {
        self.transaction_type = transaction_type;
        self
    }

    #[cfg(test)]
    pub(crate) fn mode(mut self, mode: PaymentMode) -> Self {
        self.mode = mode;
        self
    }

    #[cfg(test)]
    pub(crate) fn high_value(mut self, is_high_value: Option<bool>) -> Self {
        self.is_high_value = is_high_value;
        self
    }

    #[cfg(test)]
    pub(crate) fn tax_flags(mut self, tax_flags: &[&str]) -> Self {
        self.tax_flags = tax_flags.iter().map(|flag| flag.to_string()).collect();
        self
    }
}
