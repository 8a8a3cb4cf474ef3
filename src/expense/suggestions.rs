//! Category autosuggestion for the expense form and the expense search box.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{Error, app_state::ExpenseStoreState, expense::core::Expense};

/// The categories offered while typing into the category input of the expense form.
pub const KNOWN_CATEGORIES: [&str; 6] = [
    "Food",
    "Transport",
    "Entertainment",
    "Bills",
    "Healthcare",
    "Others",
];

fn contains_ignoring_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Get the known categories that contain `input`, ignoring case.
///
/// An empty input gives no suggestions.
pub fn suggest_known_categories(input: &str) -> Vec<&'static str> {
    if input.is_empty() {
        return Vec::new();
    }

    KNOWN_CATEGORIES
        .into_iter()
        .filter(|category| contains_ignoring_case(category, input))
        .collect()
}

/// Get the distinct categories already used by `expenses` that contain
/// `input`, ignoring case, in the order they were first used.
///
/// An empty input gives no suggestions.
pub fn suggest_recorded_categories<'a>(expenses: &'a [Expense], input: &str) -> Vec<&'a str> {
    if input.is_empty() {
        return Vec::new();
    }

    let mut suggestions: Vec<&str> = Vec::new();

    for expense in expenses {
        let category = expense.category.as_str();

        if !suggestions.contains(&category) && contains_ignoring_case(category, input) {
            suggestions.push(category);
        }
    }

    suggestions
}

/// The query string sent by the category input of the expense form.
#[derive(Debug, Default, Deserialize)]
pub struct CategorySuggestionsQuery {
    /// The text typed so far.
    #[serde(default)]
    pub category: String,
}

/// The query string sent by the expense search box.
#[derive(Debug, Default, Deserialize)]
pub struct SearchSuggestionsQuery {
    /// The text typed so far.
    #[serde(default)]
    pub q: String,
}

/// Render suggestions as the options of a `<datalist>`.
pub(crate) fn suggestion_options(suggestions: &[&str]) -> Markup {
    html! {
        @for suggestion in suggestions {
            option value=(suggestion) {}
        }
    }
}

/// A route handler that returns the known categories matching the category input.
pub async fn get_category_suggestions(Query(query): Query<CategorySuggestionsQuery>) -> Markup {
    suggestion_options(&suggest_known_categories(query.category.trim()))
}

/// A route handler that returns the recorded categories matching the search box.
pub async fn get_search_suggestions(
    State(state): State<ExpenseStoreState>,
    Query(query): Query<SearchSuggestionsQuery>,
) -> Response {
    let store = match state.expense_store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire expense store lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    suggestion_options(&suggest_recorded_categories(
        store.expenses(),
        query.q.trim(),
    ))
    .into_response()
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use axum::{
        extract::{Query, State},
        response::IntoResponse,
    };
    use scraper::Selector;

    use crate::{
        app_state::ExpenseStoreState,
        expense::{
            ExpenseFields, ExpenseStore,
            suggestions::{
                CategorySuggestionsQuery, SearchSuggestionsQuery, get_category_suggestions,
                get_search_suggestions, suggest_known_categories, suggest_recorded_categories,
            },
        },
        test_utils::parse_html_fragment,
    };

    fn add(store: &mut ExpenseStore, category: &str) {
        store
            .add_expense(ExpenseFields {
                amount: "1".to_owned(),
                date: "2024-01-01".to_owned(),
                category: category.to_owned(),
                ..Default::default()
            })
            .expect("could not create test expense");
    }

    #[test]
    fn known_categories_match_substring_ignoring_case() {
        assert_eq!(suggest_known_categories("ENT"), vec!["Entertainment"]);
        assert_eq!(suggest_known_categories("o"), vec![
            "Food",
            "Transport",
            "Others"
        ]);
    }

    #[test]
    fn empty_input_gives_no_suggestions() {
        assert!(suggest_known_categories("").is_empty());
        assert!(suggest_recorded_categories(&[], "").is_empty());
    }

    #[test]
    fn recorded_categories_are_unique_in_first_seen_order() {
        let mut store = ExpenseStore::new();
        add(&mut store, "Groceries");
        add(&mut store, "Food");
        add(&mut store, "Groceries");
        add(&mut store, "Rent");

        let got = suggest_recorded_categories(store.expenses(), "r");

        assert_eq!(got, vec!["Groceries", "Rent"]);
    }

    #[tokio::test]
    async fn category_endpoint_renders_options() {
        let response = get_category_suggestions(Query(CategorySuggestionsQuery {
            category: "bi".to_owned(),
        }))
        .await
        .into_response();

        let html = parse_html_fragment(response).await;
        let values: Vec<_> = html
            .select(&Selector::parse("option").unwrap())
            .filter_map(|option| option.value().attr("value"))
            .collect();
        assert_eq!(values, vec!["Bills"]);
    }

    #[tokio::test]
    async fn search_endpoint_renders_recorded_categories() {
        let mut store = ExpenseStore::new();
        add(&mut store, "Coffee");
        add(&mut store, "Concerts");
        add(&mut store, "Rent");
        let state = ExpenseStoreState {
            expense_store: Arc::new(Mutex::new(store)),
        };

        let response = get_search_suggestions(
            State(state),
            Query(SearchSuggestionsQuery { q: "CO".to_owned() }),
        )
        .await;

        let html = parse_html_fragment(response).await;
        let values: Vec<_> = html
            .select(&Selector::parse("option").unwrap())
            .filter_map(|option| option.value().attr("value"))
            .collect();
        assert_eq!(values, vec!["Coffee", "Concerts"]);
    }
}
