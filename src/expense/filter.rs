//! Selects the expenses that match a set of filter criteria.

use time::Date;

use crate::expense::core::{Expense, PaymentMethod};

/// An inclusive range of dates.
///
/// The range only constrains dates when both bounds are set. A range with a
/// single bound matches every date.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DateRange {
    /// The earliest date to include.
    pub start: Option<Date>,
    /// The latest date to include.
    pub end: Option<Date>,
}

impl DateRange {
    /// Create a range that includes every date from `start` to `end`.
    pub fn new(start: Date, end: Date) -> Self {
        Self {
            start: Some(start),
            end: Some(end),
        }
    }

    /// Whether `date` falls within the range.
    pub fn contains(&self, date: Date) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => start <= date && date <= end,
            _ => true,
        }
    }
}

/// The active set of constraints on which expenses to show.
///
/// A criterion that is `None` (or empty text) matches every expense.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FilterCriteria {
    /// Only show expenses with exactly this category.
    pub category: Option<String>,
    /// Only show expenses paid this way.
    pub payment_method: Option<PaymentMethod>,
    /// Only show expenses within this date range.
    pub date_range: DateRange,
    /// Only show expenses whose category or description contains this text,
    /// ignoring case.
    pub free_text: Option<String>,
}

impl FilterCriteria {
    /// Criteria that only match on free text, as used by the list search box.
    pub fn free_text(text: &str) -> Self {
        Self {
            free_text: Some(text.to_owned()),
            ..Default::default()
        }
    }

    /// Whether `expense` satisfies every criterion that is set.
    pub fn matches(&self, expense: &Expense) -> bool {
        let matches_category = self
            .category
            .as_deref()
            .filter(|category| !category.is_empty())
            .is_none_or(|category| expense.category == category);

        let matches_payment_method = self
            .payment_method
            .is_none_or(|payment_method| expense.payment_method == payment_method);

        let matches_date_range = self.date_range.contains(expense.date);

        let matches_free_text = self
            .free_text
            .as_deref()
            .filter(|text| !text.is_empty())
            .is_none_or(|text| {
                let text = text.to_lowercase();
                expense.category.to_lowercase().contains(&text)
                    || expense.description.to_lowercase().contains(&text)
            });

        matches_category && matches_payment_method && matches_date_range && matches_free_text
    }

    /// Whether no criterion is set, i.e. every expense matches.
    pub fn is_empty(&self) -> bool {
        let blank = |text: &Option<String>| text.as_deref().is_none_or(str::is_empty);

        blank(&self.category)
            && self.payment_method.is_none()
            && self.date_range.start.is_none()
            && self.date_range.end.is_none()
            && blank(&self.free_text)
    }
}

/// Get the expenses that match `criteria`, keeping their relative order.
pub fn filter_expenses(expenses: &[Expense], criteria: &FilterCriteria) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|expense| criteria.matches(expense))
        .cloned()
        .collect()
}
