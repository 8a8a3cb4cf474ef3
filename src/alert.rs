//! Alert messages shown to the user when a form submission fails.
//!
//! Forms send their errors to the page's `#alert-container` (see
//! [crate::html::base]) via the htmx `hx-target-error` attribute, so the
//! user's input stays in the form while the alert explains what went wrong.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};

/// An error message with a short title and a longer explanation.
#[derive(Debug, Clone)]
pub struct Alert<'a> {
    pub message: &'a str,
    pub details: &'a str,
}

impl<'a> Alert<'a> {
    /// Create an error alert.
    pub fn error(message: &'a str, details: &'a str) -> Self {
        Self { message, details }
    }

    pub fn into_html(self) -> Markup {
        html! {
            div
                role="alert"
                data-alert="error"
                class="flex items-start gap-3 p-4 mb-4 text-sm rounded-lg shadow
                    text-red-800 bg-red-50 border border-red-300
                    dark:bg-gray-800 dark:text-red-400 dark:border-red-800"
            {
                div class="flex-1"
                {
                    p class="font-semibold" { (self.message) }
                    p { (self.details) }
                }

                button
                    type="button"
                    aria-label="Dismiss"
                    class="font-bold"
                    onclick="this.closest('[role=alert]').remove()"
                {
                    "×"
                }
            }
        }
    }

    /// Render the alert as a response with the HTTP status code `status`.
    pub fn into_response_with_status(self, status: StatusCode) -> Response {
        (status, self.into_html()).into_response()
    }
}

#[cfg(test)]
mod tests {
    use axum::http::StatusCode;
    use scraper::Selector;

    use crate::{alert::Alert, test_utils::parse_html_fragment};

    #[tokio::test]
    async fn renders_message_and_details() {
        let response = Alert::error("Invalid expense", "Category is required.")
            .into_response_with_status(StatusCode::UNPROCESSABLE_ENTITY);

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let html = parse_html_fragment(response).await;
        let text: Vec<_> = html
            .select(&Selector::parse("[role=alert] p").unwrap())
            .map(|p| p.text().collect::<String>())
            .collect();
        assert_eq!(text, vec!["Invalid expense", "Category is required."]);
    }
}
