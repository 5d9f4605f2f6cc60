//! In-memory owner of the transactions, categories and budgets.
//!
//! Reports never hold on to the store. They read a [`Snapshot`], which
//! borrows all three collections at once, so no mutation can interleave with
//! an aggregation.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::domain::{
    find_by_id, find_by_name, position_by_id, validate_amount, Budget, Category, EntryKind,
    NewTransaction, Transaction,
};
use crate::errors::{FinanceError, Result};

/// Read-only access to the three domain collections.
pub trait DomainSource {
    fn transactions(&self) -> &[Transaction];
    fn categories(&self) -> &[Category];
    fn budgets(&self) -> &[Budget];

    fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            transactions: self.transactions(),
            categories: self.categories(),
            budgets: self.budgets(),
        }
    }
}

/// Consistent point-in-time view of a [`DomainSource`].
#[derive(Debug, Clone, Copy)]
pub struct Snapshot<'a> {
    pub transactions: &'a [Transaction],
    pub categories: &'a [Category],
    pub budgets: &'a [Budget],
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DomainStore {
    #[serde(default)]
    transactions: Vec<Transaction>,
    #[serde(default)]
    categories: Vec<Category>,
    #[serde(default)]
    budgets: Vec<Budget>,
}

impl DomainStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store seeded with the stock Salary, Groceries, Rent and Entertainment categories.
    pub fn with_default_categories() -> Self {
        let categories = [
            ("Salary", EntryKind::Income),
            ("Groceries", EntryKind::Expense),
            ("Rent", EntryKind::Expense),
            ("Entertainment", EntryKind::Expense),
        ]
        .into_iter()
        .map(|(name, kind)| Category::new(name, kind))
        .collect();
        Self {
            categories,
            ..Self::default()
        }
    }

    pub fn from_parts(
        transactions: Vec<Transaction>,
        categories: Vec<Category>,
        budgets: Vec<Budget>,
    ) -> Self {
        Self {
            transactions,
            categories,
            budgets,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.transactions.is_empty() && self.categories.is_empty() && self.budgets.is_empty()
    }

    pub fn transaction(&self, id: &str) -> Option<&Transaction> {
        find_by_id(&self.transactions, id)
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        find_by_id(&self.categories, id)
    }

    /// Looks a category up by id, then by case-insensitive name.
    pub fn resolve_category(&self, id_or_name: &str) -> Option<&Category> {
        self.category(id_or_name)
            .or_else(|| find_by_name(&self.categories, id_or_name))
    }

    pub fn budget(&self, id: &str) -> Option<&Budget> {
        find_by_id(&self.budgets, id)
    }

    /// Checks every stored amount, e.g. after deserializing from disk.
    pub fn validate(&self) -> Result<()> {
        let amounts = self
            .transactions
            .iter()
            .map(|txn| ("transaction", txn.id.as_str(), txn.amount))
            .chain(
                self.budgets
                    .iter()
                    .map(|budget| ("budget", budget.id.as_str(), budget.amount)),
            );
        for (kind, id, amount) in amounts {
            validate_amount(amount).map_err(|err| match err {
                FinanceError::Validation(reason) => {
                    FinanceError::Validation(format!("{kind} {id}: {reason}"))
                }
                other => other,
            })?;
        }
        Ok(())
    }

    pub fn add_transaction(&mut self, input: NewTransaction) -> Result<&Transaction> {
        validate_amount(input.amount)?;
        let txn = input.into_transaction();
        tracing::info!(id = %txn.id, kind = %txn.kind, amount = txn.amount, "transaction added");
        self.transactions.push(txn);
        Ok(&self.transactions[self.transactions.len() - 1])
    }

    /// Replaces the transaction with the same id, keeping its position.
    pub fn update_transaction(&mut self, txn: Transaction) -> Result<()> {
        validate_amount(txn.amount)?;
        let pos = position_by_id(&self.transactions, &txn.id)
            .ok_or_else(|| FinanceError::TransactionNotFound(txn.id.clone()))?;
        tracing::info!(id = %txn.id, "transaction updated");
        self.transactions[pos] = txn;
        Ok(())
    }

    pub fn remove_transaction(&mut self, id: &str) -> Result<Transaction> {
        let pos = position_by_id(&self.transactions, id)
            .ok_or_else(|| FinanceError::TransactionNotFound(id.to_string()))?;
        tracing::info!(id, "transaction removed");
        Ok(self.transactions.remove(pos))
    }

    pub fn add_category(&mut self, name: impl Into<String>, kind: EntryKind) -> Result<&Category> {
        let name = name.into();
        if name.trim().is_empty() {
            return Err(FinanceError::Validation(
                "category name must not be empty".into(),
            ));
        }
        let category = Category::new(name.trim(), kind);
        tracing::info!(id = %category.id, name = %category.name, "category added");
        self.categories.push(category);
        Ok(&self.categories[self.categories.len() - 1])
    }

    pub fn update_category(&mut self, category: Category) -> Result<()> {
        if category.name.trim().is_empty() {
            return Err(FinanceError::Validation(
                "category name must not be empty".into(),
            ));
        }
        let pos = position_by_id(&self.categories, &category.id)
            .ok_or_else(|| FinanceError::CategoryNotFound(category.id.clone()))?;
        tracing::info!(id = %category.id, "category updated");
        self.categories[pos] = category;
        Ok(())
    }

    /// Removes a category. Transactions and budgets that reference it are kept.
    pub fn remove_category(&mut self, id: &str) -> Result<Category> {
        let pos = position_by_id(&self.categories, id)
            .ok_or_else(|| FinanceError::CategoryNotFound(id.to_string()))?;
        tracing::info!(id, "category removed");
        Ok(self.categories.remove(pos))
    }

    /// Adds a budget row. Existing budgets for the same category are left alone.
    pub fn set_budget(&mut self, category_id: impl Into<String>, amount: f64) -> Result<&Budget> {
        validate_amount(amount)?;
        let budget = Budget::new(category_id, amount);
        tracing::info!(id = %budget.id, category_id = %budget.category_id, amount, "budget set");
        self.budgets.push(budget);
        Ok(&self.budgets[self.budgets.len() - 1])
    }

    pub fn update_budget(&mut self, budget: Budget) -> Result<()> {
        validate_amount(budget.amount)?;
        let pos = position_by_id(&self.budgets, &budget.id)
            .ok_or_else(|| FinanceError::BudgetNotFound(budget.id.clone()))?;
        tracing::info!(id = %budget.id, "budget updated");
        self.budgets[pos] = budget;
        Ok(())
    }

    pub fn remove_budget(&mut self, id: &str) -> Result<Budget> {
        let pos = position_by_id(&self.budgets, id)
            .ok_or_else(|| FinanceError::BudgetNotFound(id.to_string()))?;
        tracing::info!(id, "budget removed");
        Ok(self.budgets.remove(pos))
    }

    /// Detects dangling references and other anomalies. Nothing is repaired.
    pub fn warnings(&self) -> Vec<String> {
        let kinds: HashMap<&str, EntryKind> = self
            .categories
            .iter()
            .map(|category| (category.id.as_str(), category.kind))
            .collect();
        let mut warnings = Vec::new();

        for txn in &self.transactions {
            if validate_amount(txn.amount).is_err() {
                warnings.push(format!(
                    "transaction {} has an invalid amount {}",
                    txn.id, txn.amount
                ));
            }
            match kinds.get(txn.category_id.as_str()) {
                None => warnings.push(format!(
                    "transaction {} references missing category {}",
                    txn.id, txn.category_id
                )),
                Some(kind) if *kind != txn.kind => warnings.push(format!(
                    "transaction {} is {} but category {} is {}",
                    txn.id, txn.kind, txn.category_id, kind
                )),
                Some(_) => {}
            }
        }

        let mut budgeted = HashSet::new();
        for budget in &self.budgets {
            if !kinds.contains_key(budget.category_id.as_str()) {
                warnings.push(format!(
                    "budget {} references missing category {}",
                    budget.id, budget.category_id
                ));
            }
            if !budgeted.insert(budget.category_id.as_str()) {
                warnings.push(format!(
                    "category {} has more than one budget; amounts are added",
                    budget.category_id
                ));
            }
            if validate_amount(budget.amount).is_err() {
                warnings.push(format!(
                    "budget {} has an invalid amount {}",
                    budget.id, budget.amount
                ));
            } else if budget.amount == 0.0 {
                warnings.push(format!("budget {} has a zero amount", budget.id));
            }
        }
        warnings
    }
}

impl DomainSource for DomainStore {
    fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    fn categories(&self) -> &[Category] {
        &self.categories
    }

    fn budgets(&self) -> &[Budget] {
        &self.budgets
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;

    fn expense(category_id: &str, amount: f64) -> NewTransaction {
        NewTransaction {
            kind: EntryKind::Expense,
            amount,
            category_id: category_id.to_string(),
            date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
            description: None,
        }
    }

    #[test]
    fn default_categories_match_stock_set() {
        let store = DomainStore::with_default_categories();
        let names: Vec<_> = store.categories().iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Salary", "Groceries", "Rent", "Entertainment"]);
        assert_eq!(store.categories()[0].kind, EntryKind::Income);
        assert!(store.transactions().is_empty());
    }

    #[test]
    fn update_keeps_position() {
        let mut store = DomainStore::new();
        let first = store.add_transaction(expense("c1", 1.0)).unwrap().id.clone();
        store.add_transaction(expense("c1", 2.0)).unwrap();

        let mut edited = store.transaction(&first).unwrap().clone();
        edited.amount = 9.0;
        store.update_transaction(edited).unwrap();

        assert_eq!(store.transactions()[0].id, first);
        assert_eq!(store.transactions()[0].amount, 9.0);
    }

    #[test]
    fn unknown_ids_are_reported() {
        let mut store = DomainStore::new();
        assert!(matches!(
            store.remove_transaction("nope"),
            Err(FinanceError::TransactionNotFound(_))
        ));
        assert!(matches!(
            store.remove_category("nope"),
            Err(FinanceError::CategoryNotFound(_))
        ));
        assert!(matches!(
            store.update_budget(Budget::new("c", 1.0)),
            Err(FinanceError::BudgetNotFound(_))
        ));
    }

    #[test]
    fn negative_amounts_are_rejected() {
        let mut store = DomainStore::new();
        assert!(store.add_transaction(expense("c1", -5.0)).is_err());
        assert!(store.set_budget("c1", -1.0).is_err());
        assert!(store.set_budget("c1", 0.0).is_ok());
    }

    #[test]
    fn removing_a_category_does_not_cascade() {
        let mut store = DomainStore::new();
        let id = store
            .add_category("Travel", EntryKind::Expense)
            .unwrap()
            .id
            .clone();
        store.add_transaction(expense(&id, 10.0)).unwrap();
        store.set_budget(id.clone(), 50.0).unwrap();

        store.remove_category(&id).unwrap();
        assert_eq!(store.transactions().len(), 1);
        assert_eq!(store.budgets().len(), 1);
    }

    #[test]
    fn warnings_flag_integrity_gaps() {
        let mut store = DomainStore::new();
        let salary = store
            .add_category("Salary", EntryKind::Income)
            .unwrap()
            .id
            .clone();
        store.add_transaction(expense(&salary, 10.0)).unwrap();
        store.add_transaction(expense("ghost", 1.0)).unwrap();
        store.set_budget(salary.clone(), 0.0).unwrap();
        store.set_budget(salary, 5.0).unwrap();

        let warnings = store.warnings();
        assert!(warnings.iter().any(|w| w.contains("missing category ghost")));
        assert!(warnings.iter().any(|w| w.contains("is Expense but category")));
        assert!(warnings.iter().any(|w| w.contains("more than one budget")));
        assert!(warnings.iter().any(|w| w.contains("zero amount")));
    }

    #[test]
    fn resolves_categories_by_id_or_name() {
        let store = DomainStore::with_default_categories();
        let rent = store.categories()[2].clone();
        assert_eq!(store.resolve_category(&rent.id), Some(&rent));
        assert_eq!(store.resolve_category("rent"), Some(&rent));
        assert!(store.resolve_category("Holidays").is_none());
    }

    #[test]
    fn validate_and_warnings_catch_negative_stored_amounts() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let store = DomainStore::from_parts(
            vec![Transaction::new(EntryKind::Expense, -40.0, "c1", date)],
            vec![Category::with_id("c1", "Food", EntryKind::Expense)],
            vec![Budget::new("c1", -100.0)],
        );
        let err = store.validate().expect_err("negative amounts");
        assert!(matches!(err, FinanceError::Validation(_)));

        let warnings = store.warnings();
        assert_eq!(
            warnings
                .iter()
                .filter(|w| w.contains("invalid amount"))
                .count(),
            2
        );
        assert!(DomainStore::with_default_categories().validate().is_ok());
    }

    #[test]
    fn snapshot_borrows_all_collections() {
        let mut store = DomainStore::with_default_categories();
        store.add_transaction(expense("c1", 3.0)).unwrap();
        let snapshot = store.snapshot();
        assert_eq!(snapshot.transactions.len(), 1);
        assert_eq!(snapshot.categories.len(), 4);
        assert!(snapshot.budgets.is_empty());
    }
}
