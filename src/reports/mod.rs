//! Reporting pipeline: month bucketing, aggregation and dashboard assembly.

pub mod aggregation;
pub mod dashboard;
pub mod period;

pub use aggregation::{
    budget_utilization, budget_vs_actual, category_spending, monthly_series, BudgetComparison,
    BudgetUtilization, CategorySpend, MonthlyTotals, UNKNOWN_CATEGORY,
};
pub use dashboard::Dashboard;
pub use period::{bucket_key, compare_keys, MonthKey};
