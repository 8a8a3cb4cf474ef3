//! The URIs of the pages and API endpoints.
//!
//! For endpoints that take a parameter, e.g., '/expenses/{expense_id}/edit', use [format_endpoint].

/// The root route which redirects to the expense list.
pub const ROOT: &str = "/";
/// The page listing the recorded expenses.
pub const EXPENSES_VIEW: &str = "/expenses";
/// The page for editing an existing expense.
pub const EDIT_EXPENSE_VIEW: &str = "/expenses/{expense_id}/edit";
/// The page with the monthly and category charts.
pub const CHARTS_VIEW: &str = "/charts";

/// The route to create an expense.
pub const POST_EXPENSE: &str = "/api/expenses";
/// The route to update an expense.
pub const PUT_EXPENSE: &str = "/api/expenses/{expense_id}";
/// The route to set the filters applied to the expense list.
pub const FILTERS: &str = "/api/filters";
/// The route for the JSON summary of the expense list and totals.
pub const SUMMARY: &str = "/api/summary";
/// The route for category suggestions while filling in the expense form.
pub const CATEGORY_SUGGESTIONS: &str = "/api/suggestions/categories";
/// The route for category suggestions while typing in the search box.
pub const SEARCH_SUGGESTIONS: &str = "/api/suggestions/search";

/// Replace the parameter in `endpoint_path` with `id`.
///
/// A parameter starts with a left brace and ends with a right brace,
/// e.g. '{expense_id}' in '/expenses/{expense_id}/edit'.
/// Only the first parameter is replaced.
///
/// If no parameter is found in `endpoint_path`, the original path is returned.
pub fn format_endpoint(endpoint_path: &str, id: u64) -> String {
    let Some((head, rest)) = endpoint_path.split_once('{') else {
        return endpoint_path.to_owned();
    };

    let tail = rest.split_once('}').map_or("", |(_, tail)| tail);

    format!("{head}{id}{tail}")
}
