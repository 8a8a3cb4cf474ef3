//! Implements a struct that holds the state of the web server.

use std::sync::{Arc, Mutex};

use axum::extract::FromRef;

use crate::{expense::ExpenseStore, pagination::PaginationConfig};

/// The state of the web server.
#[derive(Debug, Clone)]
pub struct AppState {
    /// The store holding every expense recorded while the server is running.
    pub expense_store: Arc<Mutex<ExpenseStore>>,

    /// The local timezone as a canonical timezone name, e.g. "Pacific/Auckland".
    pub local_timezone: String,

    /// The config that controls how to display pages of data.
    pub pagination_config: PaginationConfig,
}

impl AppState {
    /// Create a new [AppState] with an empty expense store.
    ///
    /// `local_timezone` should be a valid, canonical timezone name, e.g. "Pacific/Auckland".
    pub fn new(local_timezone: &str, pagination_config: PaginationConfig) -> Self {
        Self::with_store(ExpenseStore::new(), local_timezone, pagination_config)
    }

    /// Create a new [AppState] around an existing `store`.
    pub fn with_store(
        store: ExpenseStore,
        local_timezone: &str,
        pagination_config: PaginationConfig,
    ) -> Self {
        Self {
            expense_store: Arc::new(Mutex::new(store)),
            local_timezone: local_timezone.to_owned(),
            pagination_config,
        }
    }
}

/// The state needed by handlers that only read or write the expense store.
#[derive(Debug, Clone)]
pub struct ExpenseStoreState {
    /// The store holding every expense.
    pub expense_store: Arc<Mutex<ExpenseStore>>,
}

impl FromRef<AppState> for ExpenseStoreState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            expense_store: state.expense_store.clone(),
        }
    }
}
