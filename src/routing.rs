//! Application router configuration.

use axum::{
    Router,
    response::Redirect,
    routing::{get, post, put},
};

use crate::{
    AppState,
    dashboard::get_charts_page,
    endpoints,
    expense::{
        create_expense_endpoint, edit_expense_endpoint, get_category_suggestions,
        get_edit_expense_page, get_expense_summary, get_expenses_page, get_search_suggestions,
        set_filters_endpoint,
    },
    not_found::get_404_not_found,
};

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::EXPENSES_VIEW, get(get_expenses_page))
        .route(endpoints::EDIT_EXPENSE_VIEW, get(get_edit_expense_page))
        .route(endpoints::CHARTS_VIEW, get(get_charts_page))
        .route(endpoints::POST_EXPENSE, post(create_expense_endpoint))
        .route(endpoints::PUT_EXPENSE, put(edit_expense_endpoint))
        .route(endpoints::FILTERS, post(set_filters_endpoint))
        .route(endpoints::SUMMARY, get(get_expense_summary))
        .route(
            endpoints::CATEGORY_SUGGESTIONS,
            get(get_category_suggestions),
        )
        .route(endpoints::SEARCH_SUGGESTIONS, get(get_search_suggestions))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the expenses page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::EXPENSES_VIEW)
}
