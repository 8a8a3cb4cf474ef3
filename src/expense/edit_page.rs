//! The page for editing an existing expense.

use axum::{
    extract::{Path, Query, State},
    http::Uri,
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    Error,
    app_state::ExpenseStoreState,
    endpoints::{self, format_endpoint},
    expense::{
        core::{ExpenseFields, ExpenseId},
        form::expense_form_fields,
    },
    html::{BUTTON_PRIMARY_STYLE, FORM_CONTAINER_STYLE, base, link},
    navigation::NavBar,
};

/// Where to send the user once the expense has been saved.
#[derive(Debug, Default, Deserialize)]
pub struct RedirectQuery {
    /// A path on this site, e.g. "/expenses?page=2".
    pub redirect_url: Option<String>,
}

/// Whether `url` is a path on this site.
///
/// Backslashes and control characters are rejected since browsers read a
/// backslash as a slash and drop tabs and newlines, turning the path into a
/// link to another host.
fn is_same_site_path(url: &str) -> bool {
    if !url.starts_with('/') || url.starts_with("//") {
        return false;
    }

    if url.chars().any(|c| c == '\\' || c.is_ascii_control()) {
        return false;
    }

    url.parse::<Uri>()
        .is_ok_and(|uri| uri.scheme().is_none() && uri.authority().is_none())
}

impl RedirectQuery {
    /// The redirect URL if it is a path on this site, otherwise the expenses page.
    pub fn redirect_url(&self) -> &str {
        self.redirect_url
            .as_deref()
            .filter(|url| is_same_site_path(url))
            .unwrap_or(endpoints::EXPENSES_VIEW)
    }
}

/// Renders the page for editing an expense.
pub async fn get_edit_expense_page(
    State(state): State<ExpenseStoreState>,
    Path(expense_id): Path<ExpenseId>,
    Query(query): Query<RedirectQuery>,
) -> Result<Response, Error> {
    let store = state
        .expense_store
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire expense store lock: {error}"))
        .map_err(|_| Error::StoreLockError)?;

    let expense = store.get_expense(expense_id).inspect_err(|error| {
        tracing::debug!("could not get expense {expense_id} for editing: {error}")
    })?;

    let redirect_url = query.redirect_url();
    let update_endpoint = format!(
        "{}?{}",
        format_endpoint(endpoints::PUT_EXPENSE, expense_id),
        serde_urlencoded::to_string([("redirect_url", redirect_url)]).unwrap_or_default()
    );

    Ok(edit_expense_view(
        &update_endpoint,
        redirect_url,
        &ExpenseFields::from(expense),
    )
    .into_response())
}

fn edit_expense_view(update_endpoint: &str, cancel_url: &str, values: &ExpenseFields) -> Markup {
    let nav_bar = NavBar::new(endpoints::EDIT_EXPENSE_VIEW).into_html();

    let content = html! {
        (nav_bar)

        div class=(FORM_CONTAINER_STYLE)
        {
            h1 class="text-xl font-bold mb-4" { "Edit Expense" }

            form
                hx-put=(update_endpoint)
                hx-target-error="#alert-container"
                class="w-full space-y-4 md:space-y-6"
            {
                (expense_form_fields(values))

                button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Save Changes" }
            }

            p class="mt-4" { (link(cancel_url, "Cancel")) }
        }
    };

    base("Edit Expense", &[], &content)
}
