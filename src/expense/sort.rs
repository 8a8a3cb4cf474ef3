//! Orders expenses for display in the expenses table.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::expense::core::Expense;

/// The expense field to order by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortKey {
    /// Order chronologically.
    #[default]
    Date,
    /// Order numerically by amount.
    Amount,
    /// Order alphabetically by category.
    Category,
    /// Keep the expenses in the order they were given.
    #[serde(other)]
    Unsorted,
}

/// Which way to order expenses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

/// A sort key paired with a direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SortOrder {
    /// The field to order by.
    pub key: SortKey,
    /// Which way to order.
    pub direction: SortDirection,
}

impl SortOrder {
    /// Create a sort order.
    pub fn new(key: SortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// The order to use after the column for `key` is clicked.
    ///
    /// Clicking the column that is already sorted ascending flips it to
    /// descending, any other click sorts ascending by `key`.
    pub fn toggled(self, key: SortKey) -> Self {
        let direction = if self.key == key && self.direction == SortDirection::Ascending {
            SortDirection::Descending
        } else {
            SortDirection::Ascending
        };

        Self { key, direction }
    }
}

fn compare(a: &Expense, b: &Expense, key: SortKey) -> Ordering {
    match key {
        SortKey::Date => a.date.cmp(&b.date),
        SortKey::Amount => a.amount.total_cmp(&b.amount),
        SortKey::Category => a.category.cmp(&b.category),
        SortKey::Unsorted => Ordering::Equal,
    }
}

/// Get a copy of `expenses` ordered by `order`.
///
/// The sort is stable in both directions: expenses with equal keys keep the
/// relative order they had in `expenses`.
pub fn sort_expenses(expenses: &[Expense], order: SortOrder) -> Vec<Expense> {
    let mut sorted = expenses.to_vec();

    match order.direction {
        SortDirection::Ascending => sorted.sort_by(|a, b| compare(a, b, order.key)),
        SortDirection::Descending => sorted.sort_by(|a, b| compare(b, a, order.key)),
    }

    sorted
}
