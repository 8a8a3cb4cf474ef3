//! Expense aggregation for the charts and the summary endpoint.
//!
//! Totals are bucketed by calendar month and by category. Buckets keep the
//! order in which their key was first seen in the input, so charts fed with
//! date-sorted expenses read chronologically.

use std::{
    borrow::Borrow,
    collections::HashMap,
    fmt::Display,
    hash::Hash,
    str::FromStr,
};

use time::{Date, Month};

use crate::expense::Expense;

/// A calendar month in a specific year, e.g. January 2024.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MonthBucket {
    /// The calendar year.
    pub year: i32,
    /// The month of the year.
    pub month: Month,
}

impl MonthBucket {
    /// Create the bucket for `month` of `year`.
    pub fn new(year: i32, month: Month) -> Self {
        Self { year, month }
    }

    /// The bucket that `date` falls into.
    pub fn from_date(date: Date) -> Self {
        Self::new(date.year(), date.month())
    }

    /// The bucket as used in query strings, e.g. "2024-01".
    pub fn query_value(&self) -> String {
        format!("{:04}-{:02}", self.year, u8::from(self.month))
    }
}

impl Display for MonthBucket {
    /// Display the bucket as the full month name and year, e.g. "January 2024".
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.month, self.year)
    }
}

impl FromStr for MonthBucket {
    type Err = ();

    /// Parse a bucket from its query string form, e.g. "2024-01".
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (year, month) = s.split_once('-').ok_or(())?;
        let year = year.parse().map_err(|_| ())?;
        let month: u8 = month.parse().map_err(|_| ())?;
        let month = Month::try_from(month).map_err(|_| ())?;

        Ok(Self::new(year, month))
    }
}

/// Summed expense amounts per key, in the order the keys were first seen.
#[derive(Debug, Clone, PartialEq)]
pub struct Totals<K> {
    entries: Vec<(K, f64)>,
}

impl<K> Totals<K> {
    /// The total for `key`, or `None` if no expense fell into that bucket.
    pub fn get<Q>(&self, key: &Q) -> Option<f64>
    where
        K: Borrow<Q>,
        Q: PartialEq + ?Sized,
    {
        self.entries
            .iter()
            .find(|(bucket, _)| bucket.borrow() == key)
            .map(|(_, total)| *total)
    }

    /// Iterate over the buckets and their totals in first-seen order.
    pub fn iter(&self) -> impl Iterator<Item = (&K, f64)> {
        self.entries.iter().map(|(key, total)| (key, *total))
    }

    /// Iterate over the bucket keys in first-seen order.
    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(key, _)| key)
    }

    /// The number of buckets.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether there are no buckets.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The sum over all buckets.
    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, total)| total).sum()
    }
}

fn accumulate<K, F>(expenses: &[Expense], bucket_of: F) -> Totals<K>
where
    K: Clone + Eq + Hash,
    F: Fn(&Expense) -> K,
{
    let mut positions: HashMap<K, usize> = HashMap::new();
    let mut entries: Vec<(K, f64)> = Vec::new();

    for expense in expenses {
        let key = bucket_of(expense);

        match positions.get(&key) {
            Some(&position) => entries[position].1 += expense.amount,
            None => {
                positions.insert(key.clone(), entries.len());
                entries.push((key, expense.amount));
            }
        }
    }

    Totals { entries }
}

/// Sum the expense amounts for each calendar month.
pub fn monthly_totals(expenses: &[Expense]) -> Totals<MonthBucket> {
    accumulate(expenses, |expense| MonthBucket::from_date(expense.date))
}

/// Sum the expense amounts for each category.
pub fn category_totals(expenses: &[Expense]) -> Totals<String> {
    accumulate(expenses, |expense| expense.category.clone())
}

/// Narrow `expenses` to those in `month` and `category`.
///
/// A selector that is `None` matches every expense.
pub fn select_for_charts(
    expenses: &[Expense],
    month: Option<MonthBucket>,
    category: Option<&str>,
) -> Vec<Expense> {
    expenses
        .iter()
        .filter(|expense| month.is_none_or(|month| MonthBucket::from_date(expense.date) == month))
        .filter(|expense| category.is_none_or(|category| expense.category == category))
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use time::{Month, macros::date};

    use crate::{
        dashboard::aggregation::{
            MonthBucket, category_totals, monthly_totals, select_for_charts,
        },
        expense::{Expense, PaymentMethod},
    };

    fn expense(id: u64, amount: f64, date: time::Date, category: &str) -> Expense {
        Expense {
            id,
            amount,
            description: String::new(),
            date,
            category: category.to_owned(),
            payment_method: PaymentMethod::Cash,
        }
    }

    #[test]
    fn sums_same_month_and_category() {
        let expenses = vec![
            expense(1, 50.0, date!(2024 - 01 - 15), "Food"),
            Expense {
                payment_method: PaymentMethod::Credit,
                ..expense(2, 30.0, date!(2024 - 01 - 20), "Food")
            },
        ];

        let monthly = monthly_totals(&expenses);
        let categories = category_totals(&expenses);

        let january = MonthBucket::new(2024, Month::January);
        assert_eq!(january.to_string(), "January 2024");
        assert_eq!(monthly.get(&january), Some(80.0));
        assert_eq!(monthly.len(), 1);
        assert_eq!(categories.get("Food"), Some(80.0));
        assert_eq!(categories.len(), 1);
    }

    #[test]
    fn same_month_in_different_years_are_separate_buckets() {
        let expenses = vec![
            expense(1, 10.0, date!(2023 - 03 - 01), "Bills"),
            expense(2, 20.0, date!(2024 - 03 - 01), "Bills"),
        ];

        let monthly = monthly_totals(&expenses);

        assert_eq!(monthly.get(&MonthBucket::new(2023, Month::March)), Some(10.0));
        assert_eq!(monthly.get(&MonthBucket::new(2024, Month::March)), Some(20.0));
    }

    #[test]
    fn buckets_keep_first_seen_order() {
        let expenses = vec![
            expense(1, 1.0, date!(2024 - 03 - 01), "Transport"),
            expense(2, 2.0, date!(2024 - 01 - 01), "Food"),
            expense(3, 3.0, date!(2024 - 03 - 09), "Bills"),
            expense(4, 4.0, date!(2024 - 02 - 01), "Food"),
        ];

        let months: Vec<_> = monthly_totals(&expenses).keys().map(|m| m.month).collect();
        let categories: Vec<_> = category_totals(&expenses).keys().cloned().collect();

        assert_eq!(months, vec![Month::March, Month::January, Month::February]);
        assert_eq!(categories, vec!["Transport", "Food", "Bills"]);
    }

    #[test]
    fn bucket_totals_conserve_the_grand_total() {
        let expenses: Vec<_> = (1..=20)
            .map(|i| {
                let day = time::Date::from_calendar_date(2024, Month::January, 1)
                    .unwrap()
                    .saturating_add(time::Duration::days(i as i64 * 9));
                let category = ["Food", "Bills", "Others"][i as usize % 3];
                expense(i, i as f64 * 1.25, day, category)
            })
            .collect();
        let want: f64 = expenses.iter().map(|expense| expense.amount).sum();

        let monthly = monthly_totals(&expenses);
        let categories = category_totals(&expenses);

        assert!((monthly.total() - want).abs() < 1e-9);
        assert!((categories.total() - want).abs() < 1e-9);
        for (category, total) in categories.iter() {
            let want: f64 = expenses
                .iter()
                .filter(|expense| &expense.category == category)
                .map(|expense| expense.amount)
                .sum();
            assert!((total - want).abs() < 1e-9, "wrong total for {category}");
        }
    }

    #[test]
    fn empty_input_has_no_buckets() {
        assert!(monthly_totals(&[]).is_empty());
        assert!(category_totals(&[]).is_empty());
        assert_eq!(monthly_totals(&[]).total(), 0.0);
    }

    #[test]
    fn month_bucket_round_trips_query_value() {
        let bucket = MonthBucket::new(2024, Month::September);

        assert_eq!(bucket.query_value(), "2024-09");
        assert_eq!("2024-09".parse::<MonthBucket>(), Ok(bucket));
        assert!("2024-13".parse::<MonthBucket>().is_err());
        assert!("September 2024".parse::<MonthBucket>().is_err());
    }

    #[test]
    fn chart_selection_narrows_by_month_and_category() {
        let expenses = vec![
            expense(1, 1.0, date!(2024 - 01 - 01), "Food"),
            expense(2, 2.0, date!(2024 - 01 - 02), "Bills"),
            expense(3, 3.0, date!(2024 - 02 - 01), "Food"),
        ];
        let january = Some(MonthBucket::new(2024, Month::January));

        let ids = |selected: Vec<Expense>| -> Vec<u64> {
            selected.iter().map(|expense| expense.id).collect()
        };

        assert_eq!(ids(select_for_charts(&expenses, None, None)), vec![1, 2, 3]);
        assert_eq!(ids(select_for_charts(&expenses, january, None)), vec![1, 2]);
        assert_eq!(ids(select_for_charts(&expenses, None, Some("Food"))), vec![1, 3]);
        assert_eq!(ids(select_for_charts(&expenses, january, Some("Food"))), vec![1]);
    }
}
