//! Charts module
//!
//! Buckets expense totals by month and by category, and displays them as
//! a line chart and a pie chart.

mod aggregation;
mod charts;
mod handlers;

pub use aggregation::{MonthBucket, Totals, category_totals, monthly_totals};
pub use handlers::get_charts_page;
