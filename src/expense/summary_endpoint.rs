//! A JSON view of the expense list: the current page plus the monthly and
//! category totals of every expense that matches the filters and search.

use axum::{
    Json,
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use serde::Serialize;

use crate::{
    Error,
    dashboard::{category_totals, monthly_totals},
    expense::{
        core::Expense,
        list_page::{ExpenseListQuery, ExpenseListState, ExpenseListing},
    },
};

#[derive(Debug, Serialize)]
struct MonthTotal {
    /// e.g. "January 2024".
    month: String,
    total: f64,
}

#[derive(Debug, Serialize)]
struct CategoryTotal {
    category: String,
    total: f64,
}

/// The response body of the summary endpoint.
#[derive(Debug, Serialize)]
struct ExpenseSummary {
    current_page: u64,
    total_pages: u64,
    current_page_records: Vec<Expense>,
    monthly_totals: Vec<MonthTotal>,
    category_totals: Vec<CategoryTotal>,
}

impl From<&ExpenseListing> for ExpenseSummary {
    fn from(listing: &ExpenseListing) -> Self {
        Self {
            current_page: listing.page,
            total_pages: listing.page_count,
            current_page_records: listing.current_page().to_vec(),
            monthly_totals: monthly_totals(&listing.expenses)
                .iter()
                .map(|(month, total)| MonthTotal {
                    month: month.to_string(),
                    total,
                })
                .collect(),
            category_totals: category_totals(&listing.expenses)
                .iter()
                .map(|(category, total)| CategoryTotal {
                    category: category.clone(),
                    total,
                })
                .collect(),
        }
    }
}

/// A route handler that summarises the expense list as JSON.
///
/// Takes the same query string as the expenses page.
pub async fn get_expense_summary(
    State(state): State<ExpenseListState>,
    Query(query): Query<ExpenseListQuery>,
) -> Response {
    let store = match state.expense_store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire expense store lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    let listing = ExpenseListing::new(&store, &query, &state.pagination_config);

    Json(ExpenseSummary::from(&listing)).into_response()
}
