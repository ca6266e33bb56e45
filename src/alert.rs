//! Dismissable alert messages that htmx swaps into the page's alert container.

use maud::{Markup, html};

/// An error alert with a headline and optional details.
#[derive(Debug, Clone, PartialEq)]
pub struct Alert {
    message: String,
    details: String,
}

impl Alert {
    /// Create a new error alert.
    pub fn error(message: impl Into<String>, details: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: details.into(),
        }
    }

    /// Render the alert.
    pub fn into_html(self) -> Markup {
        html! {
            div
                class="flex items-start gap-3 p-4 text-sm rounded-lg shadow-lg border \
                    text-red-800 bg-red-50 border-red-300 \
                    dark:bg-gray-800 dark:text-red-400 dark:border-red-800"
                role="alert"
            {
                span class="font-bold" aria-hidden="true" { "!" }

                div class="flex-1"
                {
                    p class="font-medium" { (self.message) }

                    @if !self.details.is_empty() {
                        p class="mt-1" { (self.details) }
                    }
                }

                button
                    type="button"
                    class="ms-auto font-bold"
                    aria-label="Dismiss"
                    onclick="this.closest('[role=alert]').remove()"
                {
                    "×"
                }
            }
        }
    }
}
