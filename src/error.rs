//! The app level error type and its conversions to rendered HTML pages and alerts.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::{
    alert::Alert, internal_server_error::InternalServerError, not_found::get_404_not_found_response,
};

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The request to a backend endpoint could not be sent, or the response
    /// body could not be read.
    #[error("could not fetch {endpoint}: {message}")]
    Fetch {
        /// The backend route, e.g. "/analytics/summary".
        endpoint: &'static str,
        /// The underlying client error.
        message: String,
    },

    /// A backend endpoint responded with a non-success status code.
    #[error("{endpoint} responded with status {status}")]
    UnexpectedStatus {
        /// The backend route, e.g. "/analytics/summary".
        endpoint: &'static str,
        /// The HTTP status code.
        status: u16,
    },

    /// A backend response body was not the expected JSON shape.
    ///
    /// For `/transactions` this happens when any record is missing one of the
    /// required display fields.
    #[error("could not decode the response from {endpoint}: {message}")]
    Decode {
        /// The backend route, e.g. "/transactions".
        endpoint: &'static str,
        /// The underlying decode error.
        message: String,
    },

    /// The configured backend URL is not an absolute HTTP(S) URL.
    #[error("invalid backend URL {0}")]
    InvalidBackendUrl(String),

    /// The HTTP client could not be created.
    #[error("could not create the HTTP client: {0}")]
    HttpClient(String),

    /// A log suppression pattern is not a valid regular expression.
    #[error("invalid log suppression pattern: {0}")]
    InvalidSuppressionPattern(String),

    /// Could not acquire the store lock.
    #[error("could not acquire the store lock")]
    StoreLock,

    /// The requested page does not exist.
    #[error("the requested resource could not be found")]
    NotFound,
}

impl Error {
    /// Whether the error came from talking to the backend.
    pub fn is_backend_error(&self) -> bool {
        matches!(
            self,
            Error::Fetch { .. } | Error::UnexpectedStatus { .. } | Error::Decode { .. }
        )
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound => get_404_not_found_response(),
            Error::StoreLock => InternalServerError::default().into_response(),
            error if error.is_backend_error() => {
                tracing::error!("could not load data from the backend: {error}");
                InternalServerError {
                    description: "Could not load data",
                    fix: "The analytics backend did not respond as expected. \
                        Check that it is running and try again.",
                }
                .into_response()
            }
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    /// Convert the error into an HTTP response with an HTML alert.
    pub fn into_alert_response(self) -> Response {
        let (status_code, alert) = match self {
            Error::Fetch { endpoint, .. } => (
                StatusCode::BAD_GATEWAY,
                Alert::error(
                    "Could not refresh data",
                    format!(
                        "The backend could not be reached while fetching {endpoint}. \
                        The data shown is from the last successful load."
                    ),
                ),
            ),
            Error::UnexpectedStatus { endpoint, status } => (
                StatusCode::BAD_GATEWAY,
                Alert::error(
                    "Could not refresh data",
                    format!(
                        "The backend responded to {endpoint} with status {status}. \
                        The data shown is from the last successful load."
                    ),
                ),
            ),
            Error::Decode { endpoint, .. } => (
                StatusCode::BAD_GATEWAY,
                Alert::error(
                    "Could not refresh data",
                    format!(
                        "The response from {endpoint} was not in the expected format. \
                        The data shown is from the last successful load."
                    ),
                ),
            ),
            _ => (
                StatusCode::INTERNAL_SERVER_ERROR,
                Alert::error(
                    "Something went wrong",
                    "An unexpected error occurred, check the server logs for more details.",
                ),
            ),
        };

        (status_code, alert.into_html()).into_response()
    }
}
