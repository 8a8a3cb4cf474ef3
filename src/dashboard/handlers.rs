//! The charts page handler and view rendering.

use axum::{
    extract::{Query, State},
    response::{IntoResponse, Response},
};
use maud::{Markup, html};
use serde::Deserialize;

use crate::{
    Error,
    app_state::ExpenseStoreState,
    dashboard::{
        aggregation::{MonthBucket, Totals, category_totals, monthly_totals, select_for_charts},
        charts::{
            ExpenseChart, category_breakdown_chart, charts_script, charts_view,
            monthly_expenses_chart,
        },
    },
    endpoints,
    expense::{SortDirection, SortKey, SortOrder, sort_expenses},
    html::{
        BUTTON_SECONDARY_STYLE, ECHARTS_SCRIPT, FORM_LABEL_STYLE, FORM_TEXT_INPUT_STYLE,
        HeadElement, base, link,
    },
    navigation::NavBar,
};

/// The month and category selected on the charts page.
///
/// Empty values select everything.
#[derive(Debug, Default, Deserialize)]
pub struct ChartsQuery {
    /// The selected month as "YYYY-MM".
    #[serde(default)]
    pub month: String,
    /// The selected category.
    #[serde(default)]
    pub category: String,
}

impl ChartsQuery {
    fn month(&self) -> Option<MonthBucket> {
        let month = self.month.trim();

        if month.is_empty() {
            return None;
        }

        match month.parse() {
            Ok(bucket) => Some(bucket),
            Err(()) => {
                tracing::warn!("ignoring invalid month selection \"{month}\"");
                None
            }
        }
    }

    fn category(&self) -> Option<&str> {
        Some(self.category.trim()).filter(|category| !category.is_empty())
    }
}

/// Display the monthly and category charts for the expenses matching the active filters.
pub async fn get_charts_page(
    State(state): State<ExpenseStoreState>,
    Query(query): Query<ChartsQuery>,
) -> Result<Response, Error> {
    let expenses = state
        .expense_store
        .lock()
        .inspect_err(|error| tracing::error!("could not acquire expense store lock: {error}"))
        .map_err(|_| Error::StoreLockError)?
        .query();
    // Oldest first so the month axis and month selector read chronologically.
    let expenses = sort_expenses(
        &expenses,
        SortOrder::new(SortKey::Date, SortDirection::Ascending),
    );

    let nav_bar = NavBar::new(endpoints::CHARTS_VIEW);

    if expenses.is_empty() {
        return Ok(charts_no_data_view(nav_bar).into_response());
    }

    // The selector options always list every month and category.
    let month_options = monthly_totals(&expenses);
    let category_options = category_totals(&expenses);

    let selected_month = query.month();
    let selected_category = query.category();
    let selected = select_for_charts(&expenses, selected_month, selected_category);

    let charts = [
        ExpenseChart {
            id: "monthly-expenses-chart",
            options: monthly_expenses_chart(&monthly_totals(&selected)).to_string(),
        },
        ExpenseChart {
            id: "category-breakdown-chart",
            options: category_breakdown_chart(&category_totals(&selected)).to_string(),
        },
    ];

    let selectors = chart_selectors(
        &month_options,
        &category_options,
        selected_month,
        selected_category,
    );

    Ok(charts_page_view(nav_bar, &selectors, &charts).into_response())
}

fn chart_selectors(
    months: &Totals<MonthBucket>,
    categories: &Totals<String>,
    selected_month: Option<MonthBucket>,
    selected_category: Option<&str>,
) -> Markup {
    html!(
        form
            method="get"
            action=(endpoints::CHARTS_VIEW)
            class="flex flex-wrap gap-4 items-end mb-4"
        {
            div
            {
                label for="month" class=(FORM_LABEL_STYLE) { "Month" }

                select
                    id="month"
                    name="month"
                    class=(FORM_TEXT_INPUT_STYLE)
                    onchange="this.form.submit()"
                {
                    option value="" selected[selected_month.is_none()] { "All Months" }

                    @for month in months.keys() {
                        option
                            value=(month.query_value())
                            selected[selected_month == Some(*month)]
                        {
                            (month)
                        }
                    }
                }
            }

            div
            {
                label for="category" class=(FORM_LABEL_STYLE) { "Category" }

                select
                    id="category"
                    name="category"
                    class=(FORM_TEXT_INPUT_STYLE)
                    onchange="this.form.submit()"
                {
                    option value="" selected[selected_category.is_none()] { "All Categories" }

                    @for category in categories.keys() {
                        option
                            value=(category)
                            selected[selected_category == Some(category.as_str())]
                        {
                            (category)
                        }
                    }
                }
            }

            button type="submit" class=(BUTTON_SECONDARY_STYLE) { "Apply" }
        }
    )
}

fn charts_no_data_view(nav_bar: NavBar) -> Markup {
    let nav_bar = nav_bar.into_html();
    let expenses_link = link(endpoints::EXPENSES_VIEW, "expenses page");

    let content = html!(
        (nav_bar)

        div class="flex flex-col items-center px-6 py-8 mx-auto text-gray-900 dark:text-white"
        {
            h2 class="text-xl font-bold"
            {
                "Nothing here yet..."
            }

            p
            {
                "Charts will show up here once you record some expenses on the "
                (expenses_link) "."
            }
        }
    );

    base("Charts", &[], &content)
}

fn charts_page_view(nav_bar: NavBar, selectors: &Markup, charts: &[ExpenseChart]) -> Markup {
    let nav_bar = nav_bar.into_html();

    let content = html!(
        (nav_bar)

        div
            class="flex flex-col items-center px-2 lg:px-6 lg:py-8 mx-auto
                max-w-screen-xl text-gray-900 dark:text-white"
        {
            h1 class="text-xl font-bold mb-4" { "Charts" }

            (selectors)

            (charts_view(charts))
        }
    );

    let scripts = [
        HeadElement::ScriptLink(ECHARTS_SCRIPT.to_owned()),
        charts_script(charts),
    ];

    base("Charts", &scripts, &content)
}
