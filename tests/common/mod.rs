#![allow(dead_code)]

use std::sync::Mutex;

use chrono::NaiveDate;
use finance_reports::domain::{Budget, Category, EntryKind, Transaction};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates an isolated directory that outlives the calling test.
pub fn temp_home() -> std::path::PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let path = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    path
}

pub fn date(value: &str) -> NaiveDate {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").expect("valid test date")
}

pub fn income(amount: f64, category_id: &str, on: &str) -> Transaction {
    Transaction::new(EntryKind::Income, amount, category_id, date(on))
}

pub fn expense(amount: f64, category_id: &str, on: &str) -> Transaction {
    Transaction::new(EntryKind::Expense, amount, category_id, date(on))
}

pub fn groceries() -> Category {
    Category::with_id("C1", "Groceries", EntryKind::Expense)
}

/// Income in April, expenses in April and May, one Groceries budget of 300.
pub fn april_may_fixture() -> (Vec<Transaction>, Vec<Category>, Vec<Budget>) {
    let transactions = vec![
        income(1000.0, "S1", "2024-04-01"),
        expense(200.0, "C1", "2024-04-15"),
        expense(50.0, "C1", "2024-05-01"),
    ];
    let categories = vec![groceries()];
    let budgets = vec![Budget::new("C1", 300.0)];
    (transactions, categories, budgets)
}

/// Deterministic pseudo-random transactions spread over several years.
pub fn generated_transactions(count: usize, seed: u64) -> Vec<Transaction> {
    let mut state = seed.max(1);
    let mut next = move || {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        state
    };
    let category_ids = ["C1", "C2", "C3", "S1", "missing"];
    (0..count)
        .map(|_| {
            let year = 2021 + (next() % 4) as i32;
            let month = 1 + (next() % 12) as u32;
            let day = 1 + (next() % 28) as u32;
            let amount = (next() % 500) as f64;
            let category = category_ids[(next() % category_ids.len() as u64) as usize];
            let kind = if next() % 3 == 0 {
                EntryKind::Income
            } else {
                EntryKind::Expense
            };
            Transaction::new(
                kind,
                amount,
                category,
                NaiveDate::from_ymd_opt(year, month, day).expect("generated date"),
            )
        })
        .collect()
}

/// Reorders a slice using the same generator so tests can vary insertion order.
pub fn shuffled<T: Clone>(items: &[T], seed: u64) -> Vec<T> {
    let mut out = items.to_vec();
    let mut state = seed.max(1);
    for idx in (1..out.len()).rev() {
        state ^= state << 13;
        state ^= state >> 7;
        state ^= state << 17;
        let swap = (state % (idx as u64 + 1)) as usize;
        out.swap(idx, swap);
    }
    out
}

pub fn approx_eq(left: f64, right: f64) -> bool {
    (left - right).abs() < 1e-6
}
