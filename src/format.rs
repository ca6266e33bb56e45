//! Display formatting for rupee amounts and transaction dates.
//!
//! Both functions mirror the `en-IN` locale: amounts use lakh/crore digit
//! grouping (`₹12,34,567`) and dates render as `05 Jan 2024`.

use time::{
    Date, OffsetDateTime, PrimitiveDateTime, format_description::well_known::Rfc3339,
    macros::format_description,
};

use crate::transaction::PaymentMode;

/// The text shown in place of a date that could not be parsed.
pub const INVALID_DATE: &str = "Invalid Date";

const RUPEE: &str = "₹";

/// Format `amount` as Indian Rupees rounded to whole rupees.
///
/// Digits are grouped the Indian way: the last three digits, then groups of
/// two, e.g. `₹12,34,567`. Halves round away from zero. Negative amounts are
/// prefixed with a minus sign (`-₹500`); callers that want `+`/`-` markers for
/// income and expenses add those themselves.
pub fn format_currency(amount: f64) -> String {
    if amount.is_nan() {
        return format!("{RUPEE}NaN");
    }

    if amount.is_infinite() {
        let sign = if amount < 0.0 { "-" } else { "" };
        return format!("{sign}{RUPEE}∞");
    }

    let rounded = amount.round();
    // Avoid rendering "-₹0" for small negative amounts.
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    format!("{sign}{RUPEE}{}", group_indian(&digits))
}

/// Insert separators into a string of ASCII digits using Indian grouping.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_owned();
    }

    let (head, last_three) = digits.split_at(digits.len() - 3);
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 2);

    for (i, digit) in head.chars().enumerate() {
        if i > 0 && (head.len() - i) % 2 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    grouped.push(',');
    grouped.push_str(last_three);
    grouped
}

/// Format an ISO 8601 date string as `DD Mon YYYY`, e.g. `05 Jan 2024`.
///
/// Accepts RFC 3339 date-times, date-times without an offset and plain
/// `YYYY-MM-DD` dates. Date-times are shown on the calendar date of their own
/// offset. Returns [INVALID_DATE] for anything else.
pub fn format_date(date_string: &str) -> String {
    match parse_date(date_string.trim()) {
        Some(date) => date
            .format(format_description!("[day] [month repr:short] [year]"))
            .unwrap_or_else(|error| {
                tracing::debug!("could not format date {date}: {error}");
                INVALID_DATE.to_owned()
            }),
        None => INVALID_DATE.to_owned(),
    }
}

fn parse_date(date_string: &str) -> Option<Date> {
    if let Ok(date_time) = OffsetDateTime::parse(date_string, &Rfc3339) {
        return Some(date_time.date());
    }

    if let Ok(date_time) = PrimitiveDateTime::parse(
        date_string,
        format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second][optional [.[subsecond]]]"
        ),
    ) {
        return Some(date_time.date());
    }

    Date::parse(date_string, format_description!("[year]-[month]-[day]")).ok()
}

/// Format a payment mode for a badge, e.g. `bank transfer`.
pub fn format_mode(mode: PaymentMode) -> String {
    mode.as_str().replace('_', " ")
}
