//! Suppression of known-noisy log messages.
//!
//! [NoiseFilter] is a per-layer filter: install it on the `tracing_subscriber`
//! layers that should not see the noise, instead of changing any global hook.

use std::fmt;

use regex::RegexSet;
use tracing::{
    Event, Metadata,
    field::{Field, Visit},
};
use tracing_subscriber::layer::{Context, Filter};

use crate::Error;

/// Messages dropped unless the configuration says otherwise.
pub const DEFAULT_SUPPRESSION_PATTERNS: [&str; 3] = [
    "ResizeObserver loop",
    r"Could not establish connection\. Receiving end does not exist",
    "Extension context invalidated",
];

/// Drops events whose message matches any of a set of regex patterns.
#[derive(Debug, Clone)]
pub struct NoiseFilter {
    patterns: RegexSet,
}

impl NoiseFilter {
    /// Create a filter from `patterns`.
    ///
    /// # Errors
    /// Returns [Error::InvalidSuppressionPattern] if any pattern is not a valid
    /// regular expression.
    pub fn new<I, P>(patterns: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<str>,
    {
        RegexSet::new(patterns)
            .map(|patterns| Self { patterns })
            .map_err(|error| Error::InvalidSuppressionPattern(error.to_string()))
    }

    /// A filter with [DEFAULT_SUPPRESSION_PATTERNS] followed by `extra` patterns.
    ///
    /// # Errors
    /// Returns [Error::InvalidSuppressionPattern] if any extra pattern is not a
    /// valid regular expression.
    pub fn with_defaults(extra: &[String]) -> Result<Self, Error> {
        Self::new(
            DEFAULT_SUPPRESSION_PATTERNS
                .iter()
                .copied()
                .chain(extra.iter().map(String::as_str)),
        )
    }

    /// Whether `message` should be dropped.
    pub fn is_suppressed(&self, message: &str) -> bool {
        self.patterns.is_match(message)
    }
}

impl<S> Filter<S> for NoiseFilter {
    fn enabled(&self, _metadata: &Metadata<'_>, _context: &Context<'_, S>) -> bool {
        true
    }

    fn event_enabled(&self, event: &Event<'_>, _context: &Context<'_, S>) -> bool {
        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        !self.is_suppressed(&visitor.message)
    }
}

/// Collects the `message` field of an event.
#[derive(Default)]
struct MessageVisitor {
    message: String,
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_owned();
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }
}
