//! Chart generation and rendering for the charts page.
//!
//! This module creates interactive ECharts visualizations for expense data:
//! - **Monthly Expenses Chart**: Line chart of the total spent in each month
//! - **Category Breakdown Chart**: Pie chart of the total spent in each category
//!
//! Each chart is generated as JSON configuration for the ECharts library and
//! rendered with corresponding HTML containers and JavaScript initialization code.

use charming::{
    Chart,
    component::{Axis, Grid, Legend, Title},
    element::{AxisLabel, AxisType, JsFunction, Tooltip, Trigger},
    series::{Line, Pie},
};
use maud::{Markup, PreEscaped, html};

use crate::{
    dashboard::aggregation::{MonthBucket, Totals},
    html::HeadElement,
};

/// A chart with its HTML container ID and ECharts configuration.
pub(super) struct ExpenseChart {
    /// The HTML element ID to use for the chart (kebab-case)
    pub id: &'static str,
    /// The ECharts configuration as a JSON string
    pub options: String,
}

/// Renders the HTML containers for the charts.
pub(super) fn charts_view(charts: &[ExpenseChart]) -> Markup {
    html!(
        section
            id="charts"
            class="w-full mx-auto mb-4"
        {
            div class="grid grid-cols-1 xl:grid-cols-2 gap-4"
            {
                @for chart in charts {
                    div
                        id=(chart.id)
                        class="min-h-[380px] rounded dark:bg-gray-100"
                    {}
                }
            }
        }
    )
}

/// Make chart options safe to place inside an inline `<script>`.
///
/// Category names are user input, so a name containing "</script>" or "<!--"
/// must not end or corrupt the script element. `\/` and `\!` are the same
/// characters inside a JavaScript string.
fn escape_inline_script(options: &str) -> String {
    options.replace("</", "<\\/").replace("<!--", "<\\!--")
}

/// Generates JavaScript initialization code for the charts.
///
/// Each chart follows the browser's dark mode setting and resizes with the window.
pub(super) fn charts_script(charts: &[ExpenseChart]) -> HeadElement {
    let script_content = charts
        .iter()
        .map(|chart| {
            format!(
                r#"(function() {{
                    const chart = echarts.init(document.getElementById("{}"));
                    chart.setOption({});

                    window.addEventListener('resize', chart.resize);

                    const darkModeMediaQuery = window.matchMedia('(prefers-color-scheme: dark)');
                    const updateTheme = () => {{
                        chart.setTheme(darkModeMediaQuery.matches ? 'dark' : 'default');
                    }}
                    darkModeMediaQuery.addEventListener('change', updateTheme);
                    updateTheme();
                }})();"#,
                chart.id,
                escape_inline_script(&chart.options)
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    HeadElement::ScriptSource(PreEscaped(format!(
        "document.addEventListener('DOMContentLoaded', function() {{\n{script_content}\n}});"
    )))
}

pub(super) fn monthly_expenses_chart(monthly_totals: &Totals<MonthBucket>) -> Chart {
    let labels: Vec<String> = monthly_totals.keys().map(ToString::to_string).collect();
    let values: Vec<f64> = monthly_totals.iter().map(|(_, total)| total).collect();

    Chart::new()
        .title(Title::new().text("Monthly Expenses"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Axis)
                .value_formatter(currency_formatter()),
        )
        .grid(
            Grid::new()
                .left("3%")
                .right("4%")
                .bottom("3%")
                .contain_label(true),
        )
        .x_axis(Axis::new().type_(AxisType::Category).data(labels))
        .y_axis(
            Axis::new()
                .type_(AxisType::Value)
                .axis_label(AxisLabel::new().formatter(currency_formatter())),
        )
        .series(Line::new().name("Spent").data(values))
}

pub(super) fn category_breakdown_chart(category_totals: &Totals<String>) -> Chart {
    let data: Vec<(f64, &str)> = category_totals
        .iter()
        .map(|(category, total)| (total, category.as_str()))
        .collect();

    Chart::new()
        .title(Title::new().text("Category Breakdown"))
        .tooltip(
            Tooltip::new()
                .trigger(Trigger::Item)
                .value_formatter(currency_formatter()),
        )
        .legend(Legend::new().bottom("2%"))
        .series(Pie::new().name("Spent").radius("60%").data(data))
}

#[inline]
fn currency_formatter() -> JsFunction {
    JsFunction::new_with_args(
        "number",
        "const currencyFormatter = new Intl.NumberFormat('en-US', {
              style: 'currency',
              currency: 'USD'
            });
            return (number) ? currencyFormatter.format(number) : \"-\";",
    )
}
