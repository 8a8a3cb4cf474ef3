//! Expenses: the core model, the in-memory store, filtering and sorting, and
//! the pages and endpoints for recording, editing and listing expenses.

mod core;
mod create_endpoint;
mod edit_endpoint;
mod edit_page;
mod filter;
mod filters_endpoint;
mod form;
mod list_page;
mod sort;
mod store;
mod suggestions;
mod summary_endpoint;
mod view;

pub use self::core::{Expense, ExpenseField, ExpenseFields, ExpenseId, PaymentMethod};
pub use create_endpoint::create_expense_endpoint;
pub use edit_endpoint::edit_expense_endpoint;
pub use edit_page::get_edit_expense_page;
pub use filter::{DateRange, FilterCriteria, filter_expenses};
pub use filters_endpoint::set_filters_endpoint;
pub use list_page::get_expenses_page;
pub use sort::{SortDirection, SortKey, SortOrder, sort_expenses};
pub use store::ExpenseStore;
pub use suggestions::{get_category_suggestions, get_search_suggestions};
pub use summary_endpoint::get_expense_summary;
