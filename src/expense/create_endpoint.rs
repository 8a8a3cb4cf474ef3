//! Defines the endpoint for recording a new expense.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
// Must use axum_extra's Form since that parses an empty string as None instead
// of crashing like axum::Form.
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;

use crate::{Error, app_state::ExpenseStoreState, endpoints, expense::core::ExpenseFields};

/// A route handler for recording a new expense, redirects to the expenses view on success.
///
/// Invalid input is answered with an alert and nothing is stored.
pub async fn create_expense_endpoint(
    State(state): State<ExpenseStoreState>,
    Form(fields): Form<ExpenseFields>,
) -> Response {
    let mut store = match state.expense_store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire expense store lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    match store.add_expense(fields) {
        Ok(expense) => {
            tracing::info!("created expense {}", expense.id);

            (
                HxRedirect(endpoints::EXPENSES_VIEW.to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error) => {
            tracing::debug!("rejected new expense: {error}");
            error.into_alert_response()
        }
    }
}
