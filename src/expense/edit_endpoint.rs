//! Defines the endpoint for saving changes to an existing expense.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;

use crate::{
    Error,
    app_state::ExpenseStoreState,
    expense::{
        core::{ExpenseFields, ExpenseId},
        edit_page::RedirectQuery,
    },
};

/// A route handler that replaces an expense with the submitted fields.
///
/// Redirects to `redirect_url` on success. Invalid input or an unknown ID is
/// answered with an alert and the stored expense is left unchanged.
pub async fn edit_expense_endpoint(
    State(state): State<ExpenseStoreState>,
    Path(expense_id): Path<ExpenseId>,
    Query(query): Query<RedirectQuery>,
    Form(fields): Form<ExpenseFields>,
) -> Response {
    let mut store = match state.expense_store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire expense store lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    match store.update_expense(expense_id, fields) {
        Ok(_) => {
            tracing::info!("updated expense {expense_id}");

            (
                HxRedirect(query.redirect_url().to_owned()),
                StatusCode::SEE_OTHER,
            )
                .into_response()
        }
        Err(error @ Error::UpdateMissingExpense(_)) => {
            tracing::error!("could not update expense: {error}");
            error.into_alert_response()
        }
        Err(error) => {
            tracing::debug!("rejected changes to expense {expense_id}: {error}");
            error.into_alert_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Path, Query, State},
        http::StatusCode,
    };
    use axum_extra::extract::Form;

    use crate::{
        app_state::ExpenseStoreState,
        expense::{
            ExpenseFields, ExpenseStore, PaymentMethod, edit_endpoint::edit_expense_endpoint,
            edit_page::RedirectQuery,
        },
        test_utils::assert_hx_redirect,
    };

    fn fields(amount: &str, category: &str) -> ExpenseFields {
        ExpenseFields {
            amount: amount.to_owned(),
            description: "Groceries".to_owned(),
            date: "2024-02-29".to_owned(),
            category: category.to_owned(),
            payment_method: PaymentMethod::Cash,
        }
    }

    fn state_with_two_expenses() -> ExpenseStoreState {
        let mut store = ExpenseStore::new();
        store.add_expense(fields("10", "Food")).unwrap();
        store.add_expense(fields("20", "Bills")).unwrap();

        ExpenseStoreState {
            expense_store: Arc::new(Mutex::new(store)),
        }
    }

    #[tokio::test]
    async fn can_update_expense_in_place() {
        let state = state_with_two_expenses();

        let response = edit_expense_endpoint(
            State(state.clone()),
            Path(1),
            Query(RedirectQuery {
                redirect_url: Some("/expenses?page=2".to_owned()),
            }),
            Form(fields("15.25", "Healthcare")),
        )
        .await;

        assert_hx_redirect(&response, "/expenses?page=2");
        let store = state.expense_store.lock().unwrap();
        let ids: Vec<_> = store.expenses().iter().map(|expense| expense.id).collect();
        assert_eq!(ids, vec![1, 2]);
        let updated = store.get_expense(1).unwrap();
        assert_eq!(updated.amount, 15.25);
        assert_eq!(updated.category, "Healthcare");
    }

    #[tokio::test]
    async fn redirects_to_expenses_by_default() {
        let state = state_with_two_expenses();

        let response = edit_expense_endpoint(
            State(state),
            Path(2),
            Query(RedirectQuery::default()),
            Form(fields("1", "Others")),
        )
        .await;

        assert_hx_redirect(&response, "/expenses");
    }

    #[tokio::test]
    async fn invalid_date_leaves_expense_unchanged() {
        let state = state_with_two_expenses();
        let before = state.expense_store.lock().unwrap().get_expense(2).unwrap().clone();
        let invalid = ExpenseFields {
            date: "2024-02-30".to_owned(),
            ..fields("99", "Others")
        };

        let response = edit_expense_endpoint(
            State(state.clone()),
            Path(2),
            Query(RedirectQuery::default()),
            Form(invalid),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let store = state.expense_store.lock().unwrap();
        assert_eq!(store.get_expense(2).unwrap(), &before);
    }

    #[tokio::test]
    async fn missing_expense_gives_not_found_alert() {
        let state = state_with_two_expenses();

        let response = edit_expense_endpoint(
            State(state.clone()),
            Path(3),
            Query(RedirectQuery::default()),
            Form(fields("5", "Food")),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(state.expense_store.lock().unwrap().len(), 2);
    }
}
