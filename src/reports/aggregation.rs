//! Single-pass reducers that turn the domain collections into chart data.
//!
//! Every function here is pure: it reads the slices it is given, keeps no
//! state between calls and never fails. Empty input gives empty output.

use std::collections::{BTreeMap, HashMap};

use serde::{Deserialize, Serialize};

use crate::domain::{find_by_id, Budget, Category, Transaction};

use super::period::MonthKey;

/// Display name used when a category id does not resolve.
pub const UNKNOWN_CATEGORY: &str = "Unknown";

/// Income and expense totals for one month bucket.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTotals {
    pub month: String,
    pub income: f64,
    pub expense: f64,
}

impl MonthlyTotals {
    pub fn net(&self) -> f64 {
        self.income - self.expense
    }
}

/// Total expense for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategorySpend {
    pub name: String,
    pub value: f64,
}

/// Budgeted ceiling next to actual expense for one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetComparison {
    pub category: String,
    pub budget: f64,
    pub actual: f64,
}

impl BudgetComparison {
    pub fn remaining(&self) -> f64 {
        self.budget - self.actual
    }
}

/// Budget comparison with the spend-to-budget percentage.
///
/// `utilization` is `None` when the budget total is exactly zero, since the
/// ratio has no meaning there. It serializes as `null`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetUtilization {
    pub category: String,
    pub budget: f64,
    pub actual: f64,
    pub utilization: Option<f64>,
}

impl BudgetUtilization {
    /// Spend above 100 % of the budget. A zero budget with any spend counts.
    pub fn is_over_budget(&self) -> bool {
        match self.utilization {
            Some(percent) => percent > 100.0,
            None => self.actual > 0.0,
        }
    }
}

/// Resolves a category id to its display name, falling back to `"Unknown"`.
pub fn category_name<'a>(categories: &'a [Category], category_id: &str) -> &'a str {
    match find_by_id(categories, category_id) {
        Some(category) => &category.name,
        None => {
            tracing::debug!(category_id, "category not found, using fallback name");
            UNKNOWN_CATEGORY
        }
    }
}

/// Income and expense per month, oldest month first.
///
/// Used for both the income-vs-expense and the monthly-trend views.
pub fn monthly_series(transactions: &[Transaction]) -> Vec<MonthlyTotals> {
    let mut buckets: BTreeMap<MonthKey, (f64, f64)> = BTreeMap::new();

    for txn in transactions {
        let totals = buckets.entry(MonthKey::from_date(txn.date)).or_default();
        if txn.is_income() {
            totals.0 += txn.amount;
        } else {
            totals.1 += txn.amount;
        }
    }

    tracing::debug!(
        transactions = transactions.len(),
        months = buckets.len(),
        "aggregated monthly series"
    );

    buckets
        .into_iter()
        .map(|(key, (income, expense))| MonthlyTotals {
            month: key.to_string(),
            income,
            expense,
        })
        .collect()
}

/// Expense totals per category, in order of each category's first expense.
///
/// Income transactions are ignored, whatever their category.
pub fn category_spending(
    transactions: &[Transaction],
    categories: &[Category],
) -> Vec<CategorySpend> {
    let mut order: Vec<(&str, f64)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for txn in transactions.iter().filter(|txn| txn.is_expense()) {
        let slot = *index.entry(txn.category_id.as_str()).or_insert_with(|| {
            order.push((txn.category_id.as_str(), 0.0));
            order.len() - 1
        });
        order[slot].1 += txn.amount;
    }

    tracing::debug!(categories = order.len(), "aggregated category spending");

    order
        .into_iter()
        .map(|(category_id, value)| CategorySpend {
            name: category_name(categories, category_id).to_string(),
            value,
        })
        .collect()
}

/// Budget totals joined with matching expenses, in order of first budget.
///
/// Categories without a budget never appear, even if they have expenses.
pub fn budget_vs_actual(
    transactions: &[Transaction],
    categories: &[Category],
    budgets: &[Budget],
) -> Vec<BudgetComparison> {
    let comparisons = join_budgets(transactions, categories, budgets);
    tracing::debug!(
        budgets = budgets.len(),
        categories = comparisons.len(),
        "aggregated budget vs actual"
    );
    comparisons
}

/// Budget vs actual with a utilization percentage per category.
pub fn budget_utilization(
    transactions: &[Transaction],
    categories: &[Category],
    budgets: &[Budget],
) -> Vec<BudgetUtilization> {
    join_budgets(transactions, categories, budgets)
        .into_iter()
        .map(|row| {
            let utilization = utilization_percent(row.actual, row.budget);
            if utilization.is_none() {
                tracing::warn!(category = %row.category, "zero budget, utilization undefined");
            }
            BudgetUtilization {
                category: row.category,
                budget: row.budget,
                actual: row.actual,
                utilization,
            }
        })
        .collect()
}

/// `actual / budget * 100`, or `None` for a zero budget.
pub fn utilization_percent(actual: f64, budget: f64) -> Option<f64> {
    if budget == 0.0 {
        None
    } else {
        Some(actual / budget * 100.0)
    }
}

fn join_budgets(
    transactions: &[Transaction],
    categories: &[Category],
    budgets: &[Budget],
) -> Vec<BudgetComparison> {
    let mut rows: Vec<BudgetComparison> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();

    for budget in budgets {
        let existing = index.get(budget.category_id.as_str()).copied();
        match existing {
            Some(slot) => rows[slot].budget += budget.amount,
            None => {
                index.insert(budget.category_id.as_str(), rows.len());
                rows.push(BudgetComparison {
                    category: category_name(categories, &budget.category_id).to_string(),
                    budget: budget.amount,
                    actual: 0.0,
                });
            }
        }
    }

    for txn in transactions.iter().filter(|txn| txn.is_expense()) {
        if let Some(&slot) = index.get(txn.category_id.as_str()) {
            rows[slot].actual += txn.amount;
        }
    }

    rows
}
