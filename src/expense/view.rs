//! Renders the expenses page.

use maud::{Markup, html};
use time::Date;
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    endpoints::{self, format_endpoint},
    expense::{
        core::{Expense, ExpenseFields, PaymentMethod, format_date},
        filter::FilterCriteria,
        form::expense_form_fields,
        list_page::{ExpenseListQuery, ExpenseListing},
        sort::{SortDirection, SortKey},
    },
    html::{
        BUTTON_PRIMARY_STYLE, BUTTON_SECONDARY_STYLE, CATEGORY_BADGE_STYLE, FORM_LABEL_STYLE,
        FORM_TEXT_INPUT_STYLE, LINK_STYLE, PAGE_CONTAINER_STYLE, TABLE_CELL_STYLE,
        TABLE_HEADER_STYLE, TABLE_ROW_STYLE, base, format_currency,
    },
    navigation::NavBar,
    pagination::{create_pagination_indicators, pagination_view},
};

/// Descriptions longer than this many graphemes are shortened in the table.
const DESCRIPTION_MAX_GRAPHEMES: usize = 40;

/// Everything the expenses page shows.
pub(crate) struct ExpenseListView<'a> {
    pub listing: &'a ExpenseListing,
    pub query: &'a ExpenseListQuery,
    pub criteria: &'a FilterCriteria,
    /// Whether anything has been recorded, used to pick the empty message.
    pub has_any_expenses: bool,
    pub max_pages: u64,
    /// The default date for new expenses.
    pub today: Date,
}

/// The description cut down to fit the table, or `None` if it already fits.
fn shorten_description(description: &str) -> Option<String> {
    let mut graphemes = description.graphemes(true);
    let head: String = graphemes
        .by_ref()
        .take(DESCRIPTION_MAX_GRAPHEMES - 1)
        .collect();

    // One grapheme of room is left for the ellipsis, so a description of
    // exactly the maximum length is shown whole.
    match (graphemes.next(), graphemes.next()) {
        (None, _) | (Some(_), None) => None,
        (Some(_), Some(_)) => Some(format!("{}…", head.trim_end())),
    }
}

pub(crate) fn expenses_view(view: ExpenseListView) -> Markup {
    let nav_bar = NavBar::new(endpoints::EXPENSES_VIEW).into_html();
    let new_expense = ExpenseFields {
        date: format_date(view.today),
        ..Default::default()
    };

    let content = html! {
        (nav_bar)

        div class=(PAGE_CONTAINER_STYLE)
        {
            div class="w-full max-w-5xl space-y-6"
            {
                section class="bg-white dark:bg-gray-800 rounded shadow p-6"
                {
                    h2 class="text-xl font-bold mb-4" { "Add Expense" }

                    form
                        hx-post=(endpoints::POST_EXPENSE)
                        hx-target-error="#alert-container"
                        class="grid gap-4 md:grid-cols-2"
                    {
                        (expense_form_fields(&new_expense))

                        div class="md:col-span-2"
                        {
                            button type="submit" class=(BUTTON_PRIMARY_STYLE) { "Add Expense" }
                        }
                    }
                }

                (filter_bar(view.criteria))

                (search_box(view.query))

                (expense_table(&view))
            }
        }
    };

    base("Expenses", &[], &content)
}

fn filter_bar(criteria: &FilterCriteria) -> Markup {
    let start_date = criteria.date_range.start.map(format_date);
    let end_date = criteria.date_range.end.map(format_date);

    html! {
        section class="bg-white dark:bg-gray-800 rounded shadow p-6"
        {
            h2 class="text-lg font-semibold mb-4" { "Filters" }

            form
                id="filter-form"
                hx-post=(endpoints::FILTERS)
                hx-target-error="#alert-container"
                class="grid gap-4 md:grid-cols-4"
            {
                div
                {
                    label for="filter-category" class=(FORM_LABEL_STYLE) { "Category" }

                    input
                        name="category"
                        id="filter-category"
                        type="text"
                        placeholder="Any category"
                        value=[criteria.category.as_deref()]
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="filter-payment-method" class=(FORM_LABEL_STYLE) { "Payment method" }

                    select
                        name="payment_method"
                        id="filter-payment-method"
                        class=(FORM_TEXT_INPUT_STYLE)
                    {
                        option value="" selected[criteria.payment_method.is_none()] { "Any" }

                        @for payment_method in PaymentMethod::ALL {
                            option
                                value=(payment_method.as_str())
                                selected[criteria.payment_method == Some(payment_method)]
                            { (payment_method) }
                        }
                    }
                }

                div
                {
                    label for="filter-start-date" class=(FORM_LABEL_STYLE) { "From" }

                    input
                        name="start_date"
                        id="filter-start-date"
                        type="date"
                        value=[start_date]
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div
                {
                    label for="filter-end-date" class=(FORM_LABEL_STYLE) { "To" }

                    input
                        name="end_date"
                        id="filter-end-date"
                        type="date"
                        value=[end_date]
                        class=(FORM_TEXT_INPUT_STYLE);
                }

                div class="md:col-span-4 flex gap-2 justify-end"
                {
                    button
                        type="button"
                        hx-post=(endpoints::FILTERS)
                        hx-params="none"
                        hx-target-error="#alert-container"
                        class=(BUTTON_SECONDARY_STYLE)
                    {
                        "Clear"
                    }

                    button type="submit" class=(BUTTON_SECONDARY_STYLE) { "Apply Filters" }
                }
            }
        }
    }
}

fn search_box(query: &ExpenseListQuery) -> Markup {
    html! {
        form
            method="get"
            action=(endpoints::EXPENSES_VIEW)
            role="search"
            class="flex gap-2"
        {
            input type="hidden" name="sort" value=(sort_key_value(query.sort));
            input type="hidden" name="direction" value=(direction_value(query.direction));

            input
                name="q"
                type="search"
                aria-label="Search expenses"
                placeholder="Search by category or description"
                autocomplete="off"
                list="search-suggestions"
                value=(query.q)
                hx-get=(endpoints::SEARCH_SUGGESTIONS)
                hx-trigger="input changed delay:200ms"
                hx-target="#search-suggestions"
                hx-swap="innerHTML"
                class=(FORM_TEXT_INPUT_STYLE);

            datalist id="search-suggestions" {}

            button type="submit" class=(BUTTON_SECONDARY_STYLE) { "Search" }
        }
    }
}

fn sort_key_value(key: SortKey) -> &'static str {
    match key {
        SortKey::Date => "date",
        SortKey::Amount => "amount",
        SortKey::Category => "category",
        SortKey::Unsorted => "unsorted",
    }
}

fn direction_value(direction: SortDirection) -> &'static str {
    match direction {
        SortDirection::Ascending => "ascending",
        SortDirection::Descending => "descending",
    }
}

fn sortable_header(query: &ExpenseListQuery, key: SortKey, title: &str) -> Markup {
    let order = query.order();
    let url = query.with_order(order.toggled(key)).to_url();
    let (aria_sort, arrow) = match (order.key == key, order.direction) {
        (false, _) => (None, ""),
        (true, SortDirection::Ascending) => (Some("ascending"), " ▲"),
        (true, SortDirection::Descending) => (Some("descending"), " ▼"),
    };

    html! {
        th
            scope="col"
            class=(TABLE_CELL_STYLE)
            data-column=(sort_key_value(key))
            aria-sort=[aria_sort]
        {
            a href=(url) class="hover:underline" { (title) (arrow) }
        }
    }
}

fn expense_row(expense: &Expense, edit_url: &str) -> Markup {
    let shortened = shorten_description(&expense.description);
    let (description, tooltip) = match &shortened {
        Some(short) => (short.as_str(), Some(expense.description.as_str())),
        None => (expense.description.as_str(), None),
    };

    html! {
        tr class=(TABLE_ROW_STYLE) data-expense-id=(expense.id)
        {
            td class=(TABLE_CELL_STYLE) data-column="date"
            {
                time datetime=(format_date(expense.date)) { (format_date(expense.date)) }
            }
            td class=(TABLE_CELL_STYLE) data-column="description" title=[tooltip]
            {
                (description)
            }
            td class=(TABLE_CELL_STYLE) data-column="category"
            {
                span class=(CATEGORY_BADGE_STYLE) { (expense.category) }
            }
            td class=(TABLE_CELL_STYLE) data-column="payment_method"
            {
                (expense.payment_method)
            }
            td class={ (TABLE_CELL_STYLE) " text-right" } data-column="amount"
            {
                (format_currency(expense.amount))
            }
            td class=(TABLE_CELL_STYLE)
            {
                a href=(edit_url) class=(LINK_STYLE) { "Edit" }
            }
        }
    }
}

fn edit_url(expense: &Expense, current_url: &str) -> String {
    let endpoint = format_endpoint(endpoints::EDIT_EXPENSE_VIEW, expense.id);

    match serde_urlencoded::to_string([("redirect_url", current_url)]) {
        Ok(query) => format!("{endpoint}?{query}"),
        Err(error) => {
            tracing::error!("could not encode redirect URL {current_url}: {error}");
            endpoint
        }
    }
}

fn expense_table(view: &ExpenseListView) -> Markup {
    let listing = view.listing;
    let query = view.query;
    let current_url = query.with_page(listing.page).to_url();
    let total: f64 = listing.expenses.iter().map(|expense| expense.amount).sum();
    let indicators =
        create_pagination_indicators(listing.page, listing.page_count, view.max_pages);

    html! {
        section class="bg-white dark:bg-gray-800 rounded shadow overflow-x-auto"
        {
            @if listing.expenses.is_empty() {
                p data-empty-message class="p-6 text-center text-gray-500"
                {
                    @if view.has_any_expenses {
                        "No expenses match the current filters."
                    } @else {
                        "No expenses recorded yet."
                    }
                }
            } @else {
                p class="px-6 pt-4 text-sm text-gray-600 dark:text-gray-300"
                {
                    "Showing " (listing.expenses.len())
                    @if listing.expenses.len() == 1 { " expense" } @else { " expenses" }
                    " totalling " strong { (format_currency(total)) }
                }

                table class="w-full text-sm text-left rtl:text-right text-gray-500 dark:text-gray-400"
                {
                    thead class=(TABLE_HEADER_STYLE)
                    {
                        tr
                        {
                            (sortable_header(query, SortKey::Date, "Date"))
                            th scope="col" class=(TABLE_CELL_STYLE) data-column="description"
                            { "Description" }
                            (sortable_header(query, SortKey::Category, "Category"))
                            th scope="col" class=(TABLE_CELL_STYLE) data-column="payment_method"
                            { "Payment" }
                            (sortable_header(query, SortKey::Amount, "Amount"))
                            th scope="col" class=(TABLE_CELL_STYLE) { span class="sr-only" { "Actions" } }
                        }
                    }

                    tbody
                    {
                        @for expense in listing.current_page() {
                            (expense_row(expense, &edit_url(expense, &current_url)))
                        }
                    }
                }

                div class="p-4"
                {
                    (pagination_view(&indicators, |page| query.with_page(page).to_url()))
                }
            }
        }

        @if !view.criteria.is_empty() {
            p class="text-sm text-gray-500" data-filters-active
            {
                "Only expenses matching the filters above are shown."
            }
        }
    }
}
