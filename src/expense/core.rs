//! Defines the core data models for expenses and the validation of raw form input.

use std::fmt::Display;

use serde::{Deserialize, Serialize};
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::Error;

// ============================================================================
// MODELS
// ============================================================================

/// The identifier the store assigns to an expense when it is created.
pub type ExpenseId = u64;

/// The format used for dates in forms, query strings and JSON, e.g. "2024-01-15".
pub(crate) const DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

/// How an expense was paid for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentMethod {
    /// Paid with cash.
    #[default]
    Cash,
    /// Paid with a credit card.
    Credit,
}

impl PaymentMethod {
    /// All payment methods in the order they are offered in forms.
    pub const ALL: [PaymentMethod; 2] = [PaymentMethod::Cash, PaymentMethod::Credit];

    /// The value used for this payment method in forms and query strings.
    pub fn as_str(self) -> &'static str {
        match self {
            PaymentMethod::Cash => "cash",
            PaymentMethod::Credit => "credit",
        }
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentMethod::Cash => write!(f, "Cash"),
            PaymentMethod::Credit => write!(f, "Credit"),
        }
    }
}

/// A single recorded expense.
///
/// Expenses only exist in a valid state: use [ExpenseFields::validate] (or the
/// store, which calls it) to create one from user input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Expense {
    /// The ID of the expense, unique within a store.
    pub id: ExpenseId,
    /// How much was spent, always a finite number greater than zero.
    pub amount: f64,
    /// A text description of what the money was spent on.
    pub description: String,
    /// When the money was spent.
    #[serde(with = "iso_date")]
    pub date: Date,
    /// The spending category, e.g. "Food".
    pub category: String,
    /// How the expense was paid for.
    pub payment_method: PaymentMethod,
}

/// The fields of an expense form exactly as the user entered them.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct ExpenseFields {
    /// The amount as typed, e.g. "12.50".
    #[serde(default)]
    pub amount: String,
    /// Text detailing the expense.
    #[serde(default)]
    pub description: String,
    /// The date as typed, expected to be in the format "YYYY-MM-DD".
    #[serde(default)]
    pub date: String,
    /// The category name.
    #[serde(default)]
    pub category: String,
    /// How the expense was paid for.
    #[serde(default)]
    pub payment_method: PaymentMethod,
}

/// A field of an expense that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExpenseField {
    /// The amount was not a finite number greater than zero.
    Amount,
    /// The date was not a valid calendar date.
    Date,
    /// The category was empty.
    Category,
}

impl ExpenseField {
    /// The message shown to the user when this field is invalid.
    pub fn message(self) -> &'static str {
        match self {
            ExpenseField::Amount => "Amount must be a positive number.",
            ExpenseField::Date => "Please enter a valid date.",
            ExpenseField::Category => "Category is required.",
        }
    }
}

impl Display for ExpenseField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpenseField::Amount => write!(f, "amount"),
            ExpenseField::Date => write!(f, "date"),
            ExpenseField::Category => write!(f, "category"),
        }
    }
}

impl ExpenseFields {
    /// Check the fields and turn them into an [Expense] with the given `id`.
    ///
    /// The amount, date and category are checked in that order and the first
    /// invalid field is reported.
    ///
    /// # Errors
    /// Returns [Error::InvalidExpense] naming the offending field.
    pub fn validate(self, id: ExpenseId) -> Result<Expense, Error> {
        let amount = parse_amount(&self.amount).ok_or(Error::InvalidExpense(ExpenseField::Amount))?;
        let date = parse_date(&self.date).ok_or(Error::InvalidExpense(ExpenseField::Date))?;
        let category = self.category.trim();

        if category.is_empty() {
            return Err(Error::InvalidExpense(ExpenseField::Category));
        }

        Ok(Expense {
            id,
            amount,
            description: self.description.trim().to_owned(),
            date,
            category: category.to_owned(),
            payment_method: self.payment_method,
        })
    }
}

impl From<&Expense> for ExpenseFields {
    fn from(expense: &Expense) -> Self {
        Self {
            amount: format!("{:.2}", expense.amount),
            description: expense.description.clone(),
            date: format_date(expense.date),
            category: expense.category.clone(),
            payment_method: expense.payment_method,
        }
    }
}

// ============================================================================
// PARSING
// ============================================================================

/// Parse an amount of money rounded to whole cents, accepting only finite
/// amounts of at least one cent.
///
/// This is the only place amounts are parsed, so stored amounts, the amounts
/// shown in forms and the totals computed from them always agree.
pub fn parse_amount(text: &str) -> Option<f64> {
    text.trim()
        .parse::<f64>()
        .ok()
        .map(|amount| (amount * 100.0).round() / 100.0)
        .filter(|amount| amount.is_finite() && *amount > 0.0)
}

/// Parse a calendar date in the format "YYYY-MM-DD".
pub fn parse_date(text: &str) -> Option<Date> {
    Date::parse(text.trim(), DATE_FORMAT).ok()
}

/// Format a date as "YYYY-MM-DD" for use in form inputs and URLs.
pub fn format_date(date: Date) -> String {
    date.format(DATE_FORMAT)
        .unwrap_or_else(|_| date.to_string())
}

// ============================================================================
// TESTS
// ============================================================================
