//! The expenses page: the new expense form, the filter bar and a sortable,
//! paginated table of the expenses that match the filters.

use std::sync::{Arc, Mutex};

use axum::{
    extract::{FromRef, Query, State},
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};

use crate::{
    AppState, Error, endpoints,
    expense::{
        core::Expense,
        filter::{FilterCriteria, filter_expenses},
        sort::{SortDirection, SortKey, SortOrder, sort_expenses},
        store::ExpenseStore,
        view::{ExpenseListView, expenses_view},
    },
    pagination::{PaginationConfig, clamp_page, page_count, paginate},
    timezone::local_today,
};

/// The query string of the expenses page.
///
/// Every field is optional so that `/expenses` on its own shows the first
/// page sorted by date.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExpenseListQuery {
    /// The page to show, starting from 1.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<u64>,
    /// The column to sort by.
    #[serde(default)]
    pub sort: SortKey,
    /// Which way to sort.
    #[serde(default)]
    pub direction: SortDirection,
    /// Text from the search box.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub q: String,
}

impl ExpenseListQuery {
    /// The sort order selected by the query.
    pub fn order(&self) -> SortOrder {
        SortOrder::new(self.sort, self.direction)
    }

    /// The same query showing `page`.
    pub fn with_page(&self, page: u64) -> Self {
        Self {
            page: Some(page),
            ..self.clone()
        }
    }

    /// The same query sorted by `order`, starting from the first page.
    pub fn with_order(&self, order: SortOrder) -> Self {
        Self {
            page: Some(1),
            sort: order.key,
            direction: order.direction,
            ..self.clone()
        }
    }

    /// The URL of the expenses page for this query.
    pub fn to_url(&self) -> String {
        match serde_urlencoded::to_string(self) {
            Ok(query) if !query.is_empty() => format!("{}?{query}", endpoints::EXPENSES_VIEW),
            Ok(_) => endpoints::EXPENSES_VIEW.to_owned(),
            Err(error) => {
                tracing::error!("could not encode expense list query {self:?}: {error}");
                endpoints::EXPENSES_VIEW.to_owned()
            }
        }
    }
}

/// The expenses to show for a query, after filtering, searching and sorting.
#[derive(Debug)]
pub(crate) struct ExpenseListing {
    /// Every matching expense in display order.
    pub expenses: Vec<Expense>,
    /// The page being shown, clamped to the pages that exist.
    pub page: u64,
    /// The number of pages.
    pub page_count: u64,
    /// The number of expenses per page.
    pub page_size: u64,
}

impl ExpenseListing {
    /// Run the expenses in `store` through the active filters, the search
    /// text and the sort order of `query`.
    pub(crate) fn new(
        store: &ExpenseStore,
        query: &ExpenseListQuery,
        config: &PaginationConfig,
    ) -> Self {
        let matching = store.query();
        let searched = filter_expenses(&matching, &FilterCriteria::free_text(query.q.trim()));
        let expenses = sort_expenses(&searched, query.order());

        let page_count = page_count(expenses.len(), config.page_size);
        let page = clamp_page(query.page.unwrap_or(config.default_page), page_count);

        Self {
            expenses,
            page,
            page_count,
            page_size: config.page_size,
        }
    }

    /// The expenses on the current page.
    pub(crate) fn current_page(&self) -> &[Expense] {
        paginate(&self.expenses, self.page_size, self.page)
    }
}

/// The state needed for the expenses page.
#[derive(Debug, Clone)]
pub struct ExpenseListState {
    /// The store holding every expense.
    pub expense_store: Arc<Mutex<ExpenseStore>>,
    /// The config that controls how to display pages of expenses.
    pub pagination_config: PaginationConfig,
    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,
}

impl FromRef<AppState> for ExpenseListState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            expense_store: state.expense_store.clone(),
            pagination_config: state.pagination_config.clone(),
            local_timezone: state.local_timezone.clone(),
        }
    }
}

/// Display the expenses page.
pub async fn get_expenses_page(
    State(state): State<ExpenseListState>,
    Query(query): Query<ExpenseListQuery>,
) -> Result<Response, Error> {
    let today = local_today(&state.local_timezone).ok_or_else(|| {
        tracing::error!("Invalid timezone {}", state.local_timezone);
        Error::InvalidTimezoneError(state.local_timezone.clone())
    })?;

    let store = state
        .expense_store
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire expense store lock: {error}"))
        .map_err(|_| Error::StoreLockError)?;

    let listing = ExpenseListing::new(&store, &query, &state.pagination_config);

    Ok(expenses_view(ExpenseListView {
        listing: &listing,
        query: &query,
        criteria: store.filters(),
        has_any_expenses: !store.is_empty(),
        max_pages: state.pagination_config.max_pages,
        today,
    })
    .into_response())
}
