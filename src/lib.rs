//! Expense Tracker is a small web app for recording day-to-day expenses and
//! seeing where the money went.
//!
//! This library provides the in-memory expense store, the filtering, sorting,
//! aggregation and pagination of expenses, and an axum router that serves the
//! HTML pages and htmx endpoints built on top of them.
//!
//! Expenses only live for as long as the server process does.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_server::Handle;
use tokio::signal;

mod alert;
mod app_state;
mod dashboard;
mod endpoints;
mod expense;
mod html;
mod internal_server_error;
mod logging;
mod navigation;
mod not_found;
mod pagination;
mod routing;
mod timezone;

#[cfg(test)]
mod test_utils;

pub use app_state::AppState;
pub use dashboard::{MonthBucket, Totals, category_totals, monthly_totals};
pub use expense::{
    DateRange, Expense, ExpenseField, ExpenseFields, ExpenseId, ExpenseStore, FilterCriteria,
    PaymentMethod, SortDirection, SortKey, SortOrder, filter_expenses, sort_expenses,
};
pub use logging::logging_middleware;
pub use pagination::{PaginationConfig, page_count, paginate};
pub use routing::build_router;

use crate::{
    alert::Alert, internal_server_error::InternalServerError,
    not_found::get_404_not_found_response,
};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::error!("could not listen for the ctrl+c signal: {error}");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut terminate) => {
                terminate.recv().await;
            }
            Err(error) => {
                tracing::error!("could not listen for the terminate signal: {error}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// The user submitted an expense with an invalid field.
    ///
    /// The expense is not stored, and the user should correct the named field
    /// and submit the form again.
    #[error("invalid expense field: {0}")]
    InvalidExpense(ExpenseField),

    /// Tried to update an expense that does not exist.
    #[error("tried to update expense {0}, which is not in the store")]
    UpdateMissingExpense(ExpenseId),

    /// The requested resource was not found.
    ///
    /// For HTTP request handlers, the client should check that the parameters
    /// (e.g., ID) are correct and that the resource has been created.
    #[error("the requested resource could not be found")]
    NotFound,

    /// A date in the filter bar could not be parsed.
    ///
    /// Callers should pass in the date string that caused the error.
    #[error("could not parse the filter date \"{0}\", expected YYYY-MM-DD")]
    InvalidFilterDate(String),

    /// Could not acquire the expense store lock.
    #[error("could not acquire the expense store lock")]
    StoreLockError,

    /// An error occurred while getting the local timezone from a canonical timezone string.
    #[error("invalid timezone {0}")]
    InvalidTimezoneError(String),
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Error::NotFound | Error::UpdateMissingExpense(_) => get_404_not_found_response(),
            Error::InvalidTimezoneError(timezone) => InternalServerError {
                description: "Invalid Timezone Settings",
                fix: &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            }
            .into_response(),
            Error::StoreLockError => InternalServerError::default().into_response(),
            // Any errors that are not handled above are not intended to be shown to the client.
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                InternalServerError::default().into_response()
            }
        }
    }
}

impl Error {
    fn into_alert_response(self) -> Response {
        match self {
            Error::InvalidExpense(field) => Alert::error("Invalid expense", field.message())
                .into_response_with_status(StatusCode::UNPROCESSABLE_ENTITY),
            Error::UpdateMissingExpense(_) => Alert::error(
                "Could not update expense",
                "The expense could not be found. \
                Try refreshing the page to see the latest expenses.",
            )
            .into_response_with_status(StatusCode::NOT_FOUND),
            Error::InvalidFilterDate(date) => Alert::error(
                "Invalid filter date",
                &format!("\"{date}\" is not a valid date. Use the format YYYY-MM-DD."),
            )
            .into_response_with_status(StatusCode::BAD_REQUEST),
            Error::InvalidTimezoneError(timezone) => Alert::error(
                "Invalid Timezone Settings",
                &format!(
                    "Could not get local timezone \"{timezone}\". Check your server settings and \
                    ensure the timezone has been set to valid, canonical timezone string"
                ),
            )
            .into_response_with_status(StatusCode::INTERNAL_SERVER_ERROR),
            error => {
                tracing::error!("An unexpected error occurred: {}", error);
                Alert::error(
                    "Something went wrong",
                    "An unexpected error occurred, check the server logs for more details.",
                )
                .into_response_with_status(StatusCode::INTERNAL_SERVER_ERROR)
            }
        }
    }
}
