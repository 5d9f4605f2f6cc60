use serde::Serialize;

use crate::store::{DomainSource, Snapshot};

use super::aggregation::{
    budget_utilization, budget_vs_actual, category_spending, monthly_series, BudgetComparison,
    BudgetUtilization, CategorySpend, MonthlyTotals,
};

/// Every chart-ready view, computed from one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    pub income_expense: Vec<MonthlyTotals>,
    pub category_spending: Vec<CategorySpend>,
    pub monthly_trends: Vec<MonthlyTotals>,
    pub budget_vs_actual: Vec<BudgetComparison>,
    pub budget_utilization: Vec<BudgetUtilization>,
}

impl Dashboard {
    pub fn assemble(snapshot: &Snapshot<'_>) -> Self {
        let series = monthly_series(snapshot.transactions);
        let dashboard = Self {
            income_expense: series.clone(),
            category_spending: category_spending(snapshot.transactions, snapshot.categories),
            monthly_trends: series,
            budget_vs_actual: budget_vs_actual(
                snapshot.transactions,
                snapshot.categories,
                snapshot.budgets,
            ),
            budget_utilization: budget_utilization(
                snapshot.transactions,
                snapshot.categories,
                snapshot.budgets,
            ),
        };
        tracing::debug!(
            transactions = snapshot.transactions.len(),
            budgets = snapshot.budgets.len(),
            "dashboard assembled"
        );
        dashboard
    }

    pub fn from_source<S: DomainSource + ?Sized>(source: &S) -> Self {
        Self::assemble(&source.snapshot())
    }

    pub fn is_empty(&self) -> bool {
        self.income_expense.is_empty()
            && self.category_spending.is_empty()
            && self.budget_vs_actual.is_empty()
    }
}
