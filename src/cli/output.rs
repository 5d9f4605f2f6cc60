use colored::Colorize;

use crate::reports::{BudgetUtilization, Dashboard, MonthlyTotals};

use super::table::{Table, TableColumn};

const EMPTY_VIEW: &str = "No data yet.";
const NO_BUDGETS: &str = "No budgets set yet.";

pub fn format_amount(value: f64) -> String {
    format!("{value:.2}")
}

/// Percentage text for a utilization row, `n/a` for a zero budget.
pub fn format_utilization(row: &BudgetUtilization) -> String {
    let text = match row.utilization {
        Some(percent) => format!("{percent:.2}%"),
        None => "n/a".to_string(),
    };
    if row.is_over_budget() {
        text.red().to_string()
    } else {
        text.green().to_string()
    }
}

fn section(title: &str, body: String) -> String {
    format!("{}\n{}\n", title.bold(), body)
}

fn monthly_table(rows: &[MonthlyTotals], currency: &str) -> String {
    if rows.is_empty() {
        return EMPTY_VIEW.to_string();
    }
    let mut table = Table::new(vec![
        TableColumn::left("Month"),
        TableColumn::right(format!("Income ({currency})")),
        TableColumn::right(format!("Expense ({currency})")),
        TableColumn::right("Net"),
    ]);
    for row in rows {
        table.push_row(vec![
            row.month.clone(),
            format_amount(row.income),
            format_amount(row.expense),
            format_amount(row.net()),
        ]);
    }
    table.render()
}

pub fn render_dashboard(dashboard: &Dashboard, currency: &str) -> String {
    let mut out = Vec::new();

    out.push(section(
        "Income vs Expense",
        monthly_table(&dashboard.income_expense, currency),
    ));

    let spending = if dashboard.category_spending.is_empty() {
        EMPTY_VIEW.to_string()
    } else {
        let mut table = Table::new(vec![
            TableColumn::left("Category"),
            TableColumn::right(format!("Spent ({currency})")),
        ]);
        for row in &dashboard.category_spending {
            table.push_row(vec![row.name.clone(), format_amount(row.value)]);
        }
        table.render()
    };
    out.push(section("Category Spending", spending));

    out.push(section(
        "Monthly Trends",
        monthly_table(&dashboard.monthly_trends, currency),
    ));

    let comparison = if dashboard.budget_vs_actual.is_empty() {
        NO_BUDGETS.to_string()
    } else {
        let mut table = Table::new(vec![
            TableColumn::left("Category"),
            TableColumn::right(format!("Budget ({currency})")),
            TableColumn::right(format!("Actual ({currency})")),
            TableColumn::right("Remaining"),
        ]);
        for row in &dashboard.budget_vs_actual {
            table.push_row(vec![
                row.category.clone(),
                format_amount(row.budget),
                format_amount(row.actual),
                format_amount(row.remaining()),
            ]);
        }
        table.render()
    };
    out.push(section("Budget vs Actual", comparison));

    let utilization = if dashboard.budget_utilization.is_empty() {
        NO_BUDGETS.to_string()
    } else {
        let mut table = Table::new(vec![
            TableColumn::left("Category"),
            TableColumn::right(format!("Budget ({currency})")),
            TableColumn::right(format!("Actual ({currency})")),
            TableColumn::right("Utilization (%)"),
        ]);
        for row in &dashboard.budget_utilization {
            table.push_row(vec![
                row.category.clone(),
                format_amount(row.budget),
                format_amount(row.actual),
                format_utilization(row),
            ]);
        }
        table.render()
    };
    out.push(section("Budget Utilization", utilization));

    out.join("\n")
}

pub fn render_warnings(warnings: &[String]) -> String {
    if warnings.is_empty() {
        return "No integrity warnings.".green().to_string();
    }
    warnings
        .iter()
        .map(|warning| format!("{} {}", "[!]".yellow(), warning))
        .collect::<Vec<_>>()
        .join("\n")
}
