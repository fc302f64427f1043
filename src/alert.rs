//! Alert fragments for displaying success and error messages to the user.
//!
//! Alerts are rendered as HTML fragments that htmx swaps into the fixed
//! alert container defined by the base layout.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

/// A message to surface to the user after an action.
#[derive(Debug, Clone, PartialEq)]
pub enum Alert {
    /// An action completed successfully.
    Success {
        /// Short headline for the alert.
        message: String,
        /// Supporting detail text.
        details: String,
    },
    /// An action failed.
    Error {
        /// Short headline for the alert.
        message: String,
        /// Supporting detail text.
        details: String,
    },
}

impl Alert {
    /// Create a success alert.
    pub fn success(message: &str, details: &str) -> Self {
        Self::Success {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    /// Create an error alert.
    pub fn error(message: &str, details: &str) -> Self {
        Self::Error {
            message: message.to_owned(),
            details: details.to_owned(),
        }
    }

    /// Render the alert as markup for the alert container.
    pub fn into_markup(self) -> Markup {
        let (container_style, heading, message, details) = match self {
            Alert::Success { message, details } => (
                "p-4 text-sm rounded-lg bg-green-50 text-green-800 \
                dark:bg-gray-800 dark:text-green-400",
                "Success",
                message,
                details,
            ),
            Alert::Error { message, details } => (
                "p-4 text-sm rounded-lg bg-red-50 text-red-800 \
                dark:bg-gray-800 dark:text-red-400",
                "Error",
                message,
                details,
            ),
        };

        html!(
            div
                id="alert-container"
                hx-swap-oob="true"
                class="w-full max-w-md px-4"
                style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
            {
                div class=(container_style) role="alert"
                {
                    span class="sr-only" { (heading) }
                    span class="font-medium" { (message) }

                    @if !details.is_empty() {
                        " " (details)
                    }
                }
            }
        )
    }
}

impl IntoResponse for Alert {
    fn into_response(self) -> Response {
        let status_code = match self {
            Alert::Success { .. } => StatusCode::OK,
            Alert::Error { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        };

        render(status_code, self)
    }
}

/// Render `alert` as an HTML response with the given status code.
#[inline]
pub fn render(status_code: StatusCode, alert: Alert) -> Response {
    (status_code, alert.into_markup()).into_response()
}
