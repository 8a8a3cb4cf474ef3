//! The in-memory store that owns every expense and the active filter criteria.

use crate::{
    Error,
    expense::{
        core::{Expense, ExpenseFields, ExpenseId},
        filter::{FilterCriteria, filter_expenses},
    },
};

/// Holds the expenses recorded during this session, in the order they were
/// added, along with the filter criteria chosen in the filter bar.
///
/// The store is the only place expenses are created or changed. Everything
/// else works on copies returned by [ExpenseStore::query] or slices from
/// [ExpenseStore::expenses].
#[derive(Debug)]
pub struct ExpenseStore {
    expenses: Vec<Expense>,
    criteria: FilterCriteria,
    next_id: ExpenseId,
}

impl ExpenseStore {
    /// Create an empty store with no active filters.
    pub fn new() -> Self {
        Self {
            expenses: Vec::new(),
            criteria: FilterCriteria::default(),
            next_id: 1,
        }
    }

    /// Validate `fields` and append the resulting expense.
    ///
    /// IDs are handed out in increasing order and never reused, so every
    /// expense in the store has a unique ID.
    ///
    /// # Errors
    /// Returns [Error::InvalidExpense] if the amount, date or category is
    /// invalid. Nothing is stored in that case.
    pub fn add_expense(&mut self, fields: ExpenseFields) -> Result<&Expense, Error> {
        let id = self.next_id;
        let expense = fields.validate(id)?;

        self.next_id = id + 1;
        self.expenses.push(expense);

        let index = self.expenses.len() - 1;
        Ok(&self.expenses[index])
    }

    /// Replace the expense with the ID `id`, keeping its position in the store.
    ///
    /// # Errors
    /// Returns:
    /// - [Error::UpdateMissingExpense] if no expense has the ID `id`,
    /// - or [Error::InvalidExpense] if the new fields are invalid, in which
    ///   case the stored expense is left unchanged.
    pub fn update_expense(
        &mut self,
        id: ExpenseId,
        fields: ExpenseFields,
    ) -> Result<&Expense, Error> {
        let index = self
            .expenses
            .iter()
            .position(|expense| expense.id == id)
            .ok_or(Error::UpdateMissingExpense(id))?;

        self.expenses[index] = fields.validate(id)?;

        Ok(&self.expenses[index])
    }

    /// Get the expense with the ID `id`.
    ///
    /// # Errors
    /// Returns [Error::NotFound] if no expense has the ID `id`.
    pub fn get_expense(&self, id: ExpenseId) -> Result<&Expense, Error> {
        self.expenses
            .iter()
            .find(|expense| expense.id == id)
            .ok_or(Error::NotFound)
    }

    /// Replace the active filter criteria.
    pub fn set_filters(&mut self, criteria: FilterCriteria) {
        self.criteria = criteria;
    }

    /// The active filter criteria.
    pub fn filters(&self) -> &FilterCriteria {
        &self.criteria
    }

    /// Get the expenses that match the active filter criteria, in insertion order.
    pub fn query(&self) -> Vec<Expense> {
        filter_expenses(&self.expenses, &self.criteria)
    }

    /// Every expense in the store, in insertion order, ignoring the filters.
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    /// The number of expenses in the store.
    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    /// Whether the store has no expenses.
    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }
}

impl Default for ExpenseStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        Error,
        expense::{
            core::{ExpenseField, ExpenseFields, PaymentMethod},
            filter::{DateRange, FilterCriteria},
            store::ExpenseStore,
        },
    };

    fn fields(amount: &str, date: &str, category: &str) -> ExpenseFields {
        ExpenseFields {
            amount: amount.to_owned(),
            description: format!("{category} on {date}"),
            date: date.to_owned(),
            category: category.to_owned(),
            payment_method: PaymentMethod::Cash,
        }
    }

    #[test]
    fn saving_prefilled_fields_keeps_expense_unchanged() {
        let mut store = ExpenseStore::new();
        let before = store
            .add_expense(fields("7.129", "2024-02-01", "Food"))
            .unwrap()
            .clone();

        let prefilled = ExpenseFields::from(&before);
        let after = store.update_expense(before.id, prefilled).unwrap();

        assert_eq!(after, &before);
        assert_eq!(after.amount, 7.13);
    }

    #[test]
    fn sub_cent_amounts_are_rejected() {
        let mut store = ExpenseStore::new();

        let result = store.add_expense(fields("0.004", "2024-02-01", "Food"));

        assert_eq!(result, Err(Error::InvalidExpense(ExpenseField::Amount)));
        assert!(store.is_empty());
    }

    #[test]
    fn add_appends_in_insertion_order_with_unique_ids() {
        let mut store = ExpenseStore::new();

        store.add_expense(fields("10", "2024-02-01", "Food")).unwrap();
        store.add_expense(fields("20", "2024-01-01", "Bills")).unwrap();
        store.add_expense(fields("30", "2024-03-01", "Food")).unwrap();

        let ids: Vec<_> = store.expenses().iter().map(|expense| expense.id).collect();
        assert_eq!(ids, vec![1, 2, 3]);
        assert_eq!(store.expenses()[1].category, "Bills");
    }

    #[test]
    fn add_rejects_negative_amount_and_stores_nothing() {
        let mut store = ExpenseStore::new();

        let result = store.add_expense(fields("-5", "2024-01-15", "Food"));

        assert_eq!(result, Err(Error::InvalidExpense(ExpenseField::Amount)));
        assert!(store.is_empty());
    }

    #[test]
    fn rejected_add_does_not_consume_an_id() {
        let mut store = ExpenseStore::new();

        store
            .add_expense(fields("5", "2024-01-15", ""))
            .expect_err("want blank category to be rejected");
        let expense = store.add_expense(fields("5", "2024-01-15", "Food")).unwrap();

        assert_eq!(expense.id, 1);
    }

    #[test]
    fn update_replaces_in_place() {
        let mut store = ExpenseStore::new();
        store.add_expense(fields("10", "2024-01-01", "Food")).unwrap();
        store.add_expense(fields("20", "2024-01-02", "Bills")).unwrap();
        store.add_expense(fields("30", "2024-01-03", "Food")).unwrap();

        let updated = store
            .update_expense(2, fields("25.5", "2024-02-02", "Healthcare"))
            .unwrap()
            .clone();

        assert_eq!(updated.id, 2);
        assert_eq!(updated.amount, 25.5);
        assert_eq!(store.len(), 3);
        assert_eq!(store.expenses()[1], updated);
        assert_eq!(store.expenses()[1].date, date!(2024 - 02 - 02));
    }

    #[test]
    fn update_missing_expense_fails() {
        let mut store = ExpenseStore::new();
        store.add_expense(fields("10", "2024-01-01", "Food")).unwrap();

        let result = store.update_expense(42, fields("10", "2024-01-01", "Food"));

        assert_eq!(result, Err(Error::UpdateMissingExpense(42)));
    }

    #[test]
    fn invalid_update_leaves_expense_unchanged() {
        let mut store = ExpenseStore::new();
        store.add_expense(fields("10", "2024-01-01", "Food")).unwrap();
        let before = store.expenses()[0].clone();

        let result = store.update_expense(1, fields("10", "2024-99-01", "Food"));

        assert_eq!(result, Err(Error::InvalidExpense(ExpenseField::Date)));
        assert_eq!(store.expenses()[0], before);
    }

    #[test]
    fn get_missing_expense_is_not_found() {
        let store = ExpenseStore::new();

        assert_eq!(store.get_expense(1), Err(Error::NotFound));
    }

    #[test]
    fn query_applies_active_filters() {
        let mut store = ExpenseStore::new();
        for day in 1..=10 {
            store
                .add_expense(fields("1", &format!("2024-01-{day:02}"), "Food"))
                .unwrap();
        }

        store.set_filters(FilterCriteria {
            date_range: DateRange::new(date!(2024 - 01 - 05), date!(2024 - 01 - 08)),
            ..Default::default()
        });
        let got: Vec<_> = store.query().iter().map(|expense| expense.date).collect();

        assert_eq!(
            got,
            vec![
                date!(2024 - 01 - 05),
                date!(2024 - 01 - 06),
                date!(2024 - 01 - 07),
                date!(2024 - 01 - 08),
            ]
        );
        assert_eq!(store.len(), 10, "query must not remove expenses");
    }

    #[test]
    fn set_filters_replaces_criteria_wholesale() {
        let mut store = ExpenseStore::new();
        store.set_filters(FilterCriteria {
            category: Some("Food".to_owned()),
            payment_method: Some(PaymentMethod::Credit),
            ..Default::default()
        });

        store.set_filters(FilterCriteria {
            category: Some("Bills".to_owned()),
            ..Default::default()
        });

        assert_eq!(store.filters().category.as_deref(), Some("Bills"));
        assert_eq!(store.filters().payment_method, None);
    }
}
