//! The endpoint that replaces the filters applied to the expense list.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use axum_extra::extract::Form;
use axum_htmx::HxRedirect;
use serde::Deserialize;
use time::Date;

use crate::{
    Error,
    app_state::ExpenseStoreState,
    endpoints,
    expense::{
        core::{PaymentMethod, parse_date},
        filter::{DateRange, FilterCriteria},
    },
};

/// The filter bar as submitted. Empty inputs are `None`.
#[derive(Debug, Default, Deserialize)]
pub struct FilterForm {
    pub category: Option<String>,
    pub payment_method: Option<PaymentMethod>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
}

fn parse_filter_date(text: Option<&str>) -> Result<Option<Date>, Error> {
    match text.map(str::trim).filter(|text| !text.is_empty()) {
        None => Ok(None),
        Some(text) => parse_date(text)
            .map(Some)
            .ok_or_else(|| Error::InvalidFilterDate(text.to_owned())),
    }
}

impl TryFrom<FilterForm> for FilterCriteria {
    type Error = Error;

    fn try_from(form: FilterForm) -> Result<Self, Self::Error> {
        let start = parse_filter_date(form.start_date.as_deref())?;
        let end = parse_filter_date(form.end_date.as_deref())?;

        Ok(FilterCriteria {
            category: form
                .category
                .map(|category| category.trim().to_owned())
                .filter(|category| !category.is_empty()),
            payment_method: form.payment_method,
            date_range: DateRange { start, end },
            free_text: None,
        })
    }
}

/// A route handler that replaces the active filters and reloads the expense list.
pub async fn set_filters_endpoint(
    State(state): State<ExpenseStoreState>,
    Form(form): Form<FilterForm>,
) -> Response {
    let criteria = match FilterCriteria::try_from(form) {
        Ok(criteria) => criteria,
        Err(error) => {
            tracing::debug!("rejected filters: {error}");
            return error.into_alert_response();
        }
    };

    let mut store = match state.expense_store.lock() {
        Ok(store) => store,
        Err(error) => {
            tracing::error!("could not acquire expense store lock: {error}");
            return Error::StoreLockError.into_alert_response();
        }
    };

    tracing::info!("setting expense filters to {criteria:?}");
    store.set_filters(criteria);

    (
        HxRedirect(endpoints::EXPENSES_VIEW.to_owned()),
        StatusCode::SEE_OTHER,
    )
        .into_response()
}
