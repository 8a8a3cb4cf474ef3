use maud::{DOCTYPE, Markup, PreEscaped, html};

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

// Link styles
pub const LINK_STYLE: &str = "text-blue-600 hover:text-blue-500 \
    dark:text-blue-500 dark:hover:text-blue-400 underline";

// Button styles
pub const BUTTON_PRIMARY_STYLE: &str = "w-full px-4 py-2 bg-blue-500
    dark:bg-blue-600 disabled:bg-blue-700 hover:enabled:bg-blue-600 \
    hover:enabled:dark:bg-blue-700 text-white rounded";

pub const BUTTON_SECONDARY_STYLE: &str = "px-4 py-2 text-sm font-medium \
    text-gray-900 bg-white rounded border border-gray-200 hover:bg-gray-100 \
    hover:text-blue-700 dark:bg-gray-800 dark:text-gray-400 \
    dark:border-gray-600 dark:hover:text-white dark:hover:bg-gray-700";

// Form styles
pub const FORM_CONTAINER_STYLE: &str = "flex flex-col items-center px-6 py-8 \
    mx-auto max-w-md w-full text-gray-900 dark:text-white";
pub const FORM_RADIO_GROUP_STYLE: &str = "flex gap-2";
pub const FORM_RADIO_INPUT_STYLE: &str = "peer sr-only";
pub const FORM_RADIO_LABEL_STYLE: &str = "flex-1 rounded border border-gray-300 \
    dark:border-gray-600 bg-white dark:bg-gray-700 px-3 py-2 text-sm font-medium \
    text-gray-700 dark:text-white cursor-pointer text-center \
    hover:border-gray-400 hover:bg-gray-50 peer-checked:border-blue-600 \
    peer-checked:bg-blue-50 peer-checked:text-blue-700 \
    peer-checked:dark:border-blue-500 peer-checked:dark:bg-blue-600/20";
pub const FORM_LABEL_STYLE: &str = "block mb-2 text-sm font-medium text-gray-900 dark:text-white";
pub const FORM_TEXT_INPUT_STYLE: &str = "block w-full p-2.5 rounded text-sm \
    text-gray-900 dark:text-white disabled:text-gray-500 bg-gray-50 \
    dark:bg-gray-700 border border-gray-300 dark:border-gray-600 \
    dark:placeholder-gray-400 focus:ring-blue-600 focus:border-blue-600 \
    focus:dark:border-blue-500 focus:dark:ring-blue-500";

// Table styles
pub const TABLE_HEADER_STYLE: &str = "text-xs text-gray-700 uppercase \
    bg-gray-50 dark:bg-gray-700 dark:text-gray-400";

pub const TABLE_ROW_STYLE: &str = "bg-white border-b dark:bg-gray-800 dark:border-gray-700";

pub const TABLE_CELL_STYLE: &str = "px-6 py-4";

// Category badge style
pub const CATEGORY_BADGE_STYLE: &str = "inline-flex items-center px-2.5 py-0.5 \
    text-xs font-semibold text-green-800 bg-green-100 rounded-full \
    dark:bg-green-900 dark:text-green-300";

// Page container
pub const PAGE_CONTAINER_STYLE: &str =
    "flex flex-col items-center px-6 py-8 mx-auto lg:py-5 text-gray-900 dark:text-white";

const HTMX_SCRIPT: &str = "https://unpkg.com/htmx.org@2.0.8/dist/htmx.min.js";
const HTMX_RESPONSE_TARGETS_SCRIPT: &str =
    "https://unpkg.com/htmx-ext-response-targets@2.0.4/dist/response-targets.js";
const TAILWIND_SCRIPT: &str = "https://cdn.tailwindcss.com";

/// The script that provides the ECharts library for rendering charts.
pub const ECHARTS_SCRIPT: &str = "https://cdn.jsdelivr.net/npm/echarts@5.6.0/dist/echarts.min.js";

pub enum HeadElement {
    /// The file path or URL to a JavaScript script.
    ScriptLink(String),
    /// JavaScript source code.
    ScriptSource(PreEscaped<String>),
}

pub fn base(title: &str, head_elements: &[HeadElement], content: &Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en"
        {
            head
            {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) " - Expense Tracker" }

                script src=(TAILWIND_SCRIPT) {}
                script src=(HTMX_SCRIPT) {}
                script src=(HTMX_RESPONSE_TARGETS_SCRIPT) {}

                @for element in head_elements
                {
                    @match element
                    {
                        HeadElement::ScriptSource(text) => script { (text) }
                        HeadElement::ScriptLink(path) => script src=(path) {}
                    }
                }
            }

            body
                hx-ext="response-targets"
                class="container max-w-full min-h-screen bg-gray-50 dark:bg-gray-900"
            {
                (content)

                // Form errors are swapped in here.
                div
                    id="alert-container"
                    class="w-full max-w-md px-4"
                    style="position: fixed; bottom: 1rem; left: 50%; transform: translateX(-50%); z-index: 9999;"
                {}
            }
        }
    }
}

pub fn error_view(title: &str, header: &str, description: &str, fix: &str) -> Markup {
    // Template adapted from https://flowbite.com/blocks/marketing/404/
    let content = html!(
        section class="bg-white dark:bg-gray-900"
        {
            div class="py-8 px-4 mx-auto max-w-screen-xl lg:py-16 lg:px-6"
            {
                div class="mx-auto max-w-screen-sm text-center"
                {
                    h1
                        class="mb-4 text-7xl tracking-tight font-extrabold
                            lg:text-9xl text-green-600 dark:text-green-500"
                    {
                        (header)
                    }

                    p
                        class="mb-4 text-3xl md:text-4xl tracking-tight
                            font-bold text-gray-900 dark:text-white"
                    {
                        (description)
                    }

                    p
                        class="mb-4 text-1xl md:text-2xl tracking-tight
                            text-gray-900 dark:text-white"
                    {
                        (fix)
                    }

                    a
                        href="/"
                        class="inline-flex text-white bg-green-600
                            hover:bg-green-800 focus:ring-4 focus:outline-hidden
                            focus:ring-green-300 font-medium rounded text-sm px-5
                            py-2.5 text-center dark:focus:ring-green-900 my-4"
                    {
                        "Back to Expenses"
                    }
                }
            }
        }
    );

    base(title, &[], &content)
}

/// Format `number` as dollars and cents, e.g. "$1,234.50".
pub fn format_currency(number: f64) -> String {
    static FMT: OnceLock<Formatter> = OnceLock::new();

    let fmt = FMT.get_or_init(|| {
        Formatter::currency("$")
            .unwrap_or_default()
            .precision(Precision::Decimals(2))
    });

    if number == 0.0 {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        return "$0.00".to_owned();
    }

    let formatted = fmt.fmt_string(number.abs());

    // numfmt omits trailing zeros, e.g. "12.30" is rendered as "12.3"
    let formatted = match formatted.split_once('.') {
        Some((whole, cents)) if cents.len() < 2 => format!("{whole}.{cents:0<2}"),
        Some(_) => formatted,
        None => format!("{formatted}.00"),
    };

    if number < 0.0 {
        format!("-{formatted}")
    } else {
        formatted
    }
}

/// A link with blue text for use in a <p> tag.
pub fn link(url: &str, text: &str) -> Markup {
    html! (
        a href=(url) class=(LINK_STYLE) { (text) }
    )
}
