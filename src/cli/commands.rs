//! Subcommands that edit the store or the configuration.
//!
//! Every mutation loads the store, goes through [`DomainStore`] so amounts
//! and ids are checked there, then writes the whole store back.

use std::collections::HashMap;
use std::io::Write;
use std::path::PathBuf;

use chrono::NaiveDate;
use colored::Colorize;

use crate::{
    config::{Config, ConfigManager},
    domain::{parse_amount, parse_date, Category, EntryKind, NewTransaction},
    errors::FinanceError,
    reports::aggregation::category_name,
    storage::StoreStorage,
    store::{DomainSource, DomainStore},
};

use super::{
    output::format_amount,
    table::{Table, TableColumn},
    CliError,
};

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TransactionChanges {
    pub kind: Option<EntryKind>,
    pub amount: Option<f64>,
    pub category: Option<String>,
    pub date: Option<NaiveDate>,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransactionAction {
    Add {
        kind: EntryKind,
        amount: f64,
        category: String,
        date: NaiveDate,
        description: Option<String>,
    },
    Edit {
        id: String,
        changes: TransactionChanges,
    },
    Remove {
        id: String,
    },
    List,
}

#[derive(Debug, Clone, PartialEq)]
pub enum CategoryAction {
    Add {
        name: String,
        kind: EntryKind,
    },
    Edit {
        category: String,
        name: Option<String>,
        kind: Option<EntryKind>,
    },
    Remove {
        category: String,
    },
    List,
}

#[derive(Debug, Clone, PartialEq)]
pub enum BudgetAction {
    Set {
        category: String,
        amount: f64,
    },
    Edit {
        id: String,
        category: Option<String>,
        amount: Option<f64>,
    },
    Remove {
        id: String,
    },
    List,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigAction {
    Show,
    SetCurrency(String),
    SetDataFile(PathBuf),
}

/// Splits `--flag value` pairs from positional words. Only the listed flags are accepted.
fn split_flags(
    args: &[String],
    allowed: &[&str],
) -> Result<(Vec<String>, HashMap<String, String>), CliError> {
    let mut positional = Vec::new();
    let mut flags = HashMap::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if let Some(name) = arg.strip_prefix("--") {
            if !allowed.contains(&name) {
                return Err(CliError::Usage(format!("unknown option `{arg}`")));
            }
            let value = iter
                .next()
                .ok_or_else(|| CliError::Usage(format!("{arg} needs a value")))?;
            flags.insert(name.to_string(), value.clone());
        } else {
            positional.push(arg.clone());
        }
    }
    Ok((positional, flags))
}

fn expect_positional(
    positional: &[String],
    min: usize,
    max: usize,
    usage: &str,
) -> Result<(), CliError> {
    if positional.len() < min || positional.len() > max {
        return Err(CliError::Usage(format!("usage: {usage}")));
    }
    Ok(())
}

fn split_action(args: &[String], usage: &str) -> Result<(String, Vec<String>), CliError> {
    let (action, rest) = args
        .split_first()
        .ok_or_else(|| CliError::Usage(format!("usage: {usage}")))?;
    Ok((action.to_lowercase(), rest.to_vec()))
}

fn optional_amount(flags: &HashMap<String, String>) -> Result<Option<f64>, CliError> {
    Ok(flags.get("amount").map(|v| parse_amount(v)).transpose()?)
}

fn optional_kind(flags: &HashMap<String, String>) -> Result<Option<EntryKind>, CliError> {
    Ok(flags.get("type").map(|v| v.parse::<EntryKind>()).transpose()?)
}

pub fn parse_transaction(args: &[String]) -> Result<TransactionAction, CliError> {
    const USAGE: &str = "transaction <add|edit|remove|list> ...";
    let (action, rest) = split_action(args, USAGE)?;
    match action.as_str() {
        "add" => {
            let (positional, _) = split_flags(&rest, &[])?;
            expect_positional(
                &positional,
                4,
                5,
                "transaction add <income|expense> <amount> <category> <YYYY-MM-DD> [description]",
            )?;
            Ok(TransactionAction::Add {
                kind: positional[0].parse()?,
                amount: parse_amount(&positional[1])?,
                category: positional[2].clone(),
                date: parse_date(&positional[3])?,
                description: positional.get(4).cloned(),
            })
        }
        "edit" => {
            let (positional, flags) = split_flags(
                &rest,
                &["amount", "category", "date", "type", "description"],
            )?;
            expect_positional(&positional, 1, 1, "transaction edit <id> [--amount X] ...")?;
            let changes = TransactionChanges {
                kind: optional_kind(&flags)?,
                amount: optional_amount(&flags)?,
                category: flags.get("category").cloned(),
                date: flags.get("date").map(|v| parse_date(v)).transpose()?,
                description: flags.get("description").cloned(),
            };
            if changes == TransactionChanges::default() {
                return Err(CliError::Usage("transaction edit: nothing to change".into()));
            }
            Ok(TransactionAction::Edit {
                id: positional[0].clone(),
                changes,
            })
        }
        "remove" => {
            let (positional, _) = split_flags(&rest, &[])?;
            expect_positional(&positional, 1, 1, "transaction remove <id>")?;
            Ok(TransactionAction::Remove {
                id: positional[0].clone(),
            })
        }
        "list" if rest.is_empty() => Ok(TransactionAction::List),
        other => Err(CliError::Usage(format!(
            "unknown transaction subcommand `{other}`"
        ))),
    }
}

pub fn parse_category(args: &[String]) -> Result<CategoryAction, CliError> {
    const USAGE: &str = "category <add|edit|remove|list> ...";
    let (action, rest) = split_action(args, USAGE)?;
    match action.as_str() {
        "add" => {
            let (positional, _) = split_flags(&rest, &[])?;
            expect_positional(&positional, 2, 2, "category add <name> <income|expense>")?;
            Ok(CategoryAction::Add {
                name: positional[0].clone(),
                kind: positional[1].parse()?,
            })
        }
        "edit" => {
            let (positional, flags) = split_flags(&rest, &["name", "type"])?;
            expect_positional(&positional, 1, 1, "category edit <category> [--name N] [--type T]")?;
            let name = flags.get("name").cloned();
            let kind = optional_kind(&flags)?;
            if name.is_none() && kind.is_none() {
                return Err(CliError::Usage("category edit: nothing to change".into()));
            }
            Ok(CategoryAction::Edit {
                category: positional[0].clone(),
                name,
                kind,
            })
        }
        "remove" => {
            let (positional, _) = split_flags(&rest, &[])?;
            expect_positional(&positional, 1, 1, "category remove <category>")?;
            Ok(CategoryAction::Remove {
                category: positional[0].clone(),
            })
        }
        "list" if rest.is_empty() => Ok(CategoryAction::List),
        other => Err(CliError::Usage(format!(
            "unknown category subcommand `{other}`"
        ))),
    }
}

pub fn parse_budget(args: &[String]) -> Result<BudgetAction, CliError> {
    const USAGE: &str = "budget <set|edit|remove|list> ...";
    let (action, rest) = split_action(args, USAGE)?;
    match action.as_str() {
        "set" => {
            let (positional, _) = split_flags(&rest, &[])?;
            expect_positional(&positional, 2, 2, "budget set <category> <amount>")?;
            Ok(BudgetAction::Set {
                category: positional[0].clone(),
                amount: parse_amount(&positional[1])?,
            })
        }
        "edit" => {
            let (positional, flags) = split_flags(&rest, &["category", "amount"])?;
            expect_positional(&positional, 1, 1, "budget edit <id> [--category C] [--amount X]")?;
            let category = flags.get("category").cloned();
            let amount = optional_amount(&flags)?;
            if category.is_none() && amount.is_none() {
                return Err(CliError::Usage("budget edit: nothing to change".into()));
            }
            Ok(BudgetAction::Edit {
                id: positional[0].clone(),
                category,
                amount,
            })
        }
        "remove" => {
            let (positional, _) = split_flags(&rest, &[])?;
            expect_positional(&positional, 1, 1, "budget remove <id>")?;
            Ok(BudgetAction::Remove {
                id: positional[0].clone(),
            })
        }
        "list" if rest.is_empty() => Ok(BudgetAction::List),
        other => Err(CliError::Usage(format!("unknown budget subcommand `{other}`"))),
    }
}

pub fn parse_config(args: &[String]) -> Result<ConfigAction, CliError> {
    match args {
        [] => Ok(ConfigAction::Show),
        [show] if show == "show" => Ok(ConfigAction::Show),
        [set, key, value] if set == "set" => match key.as_str() {
            "currency" if !value.trim().is_empty() => {
                Ok(ConfigAction::SetCurrency(value.trim().to_uppercase()))
            }
            "currency" => Err(CliError::Usage("currency must not be empty".into())),
            "data-file" => Ok(ConfigAction::SetDataFile(PathBuf::from(value))),
            other => Err(CliError::Usage(format!("unknown config key `{other}`"))),
        },
        _ => Err(CliError::Usage(
            "usage: config [show | set <currency|data-file> <value>]".into(),
        )),
    }
}

fn resolve_category_id(store: &DomainStore, id_or_name: &str) -> Result<String, FinanceError> {
    store
        .resolve_category(id_or_name)
        .map(|category| category.id.clone())
        .ok_or_else(|| FinanceError::CategoryNotFound(id_or_name.to_string()))
}

fn success(out: &mut impl Write, message: String) -> Result<(), CliError> {
    writeln!(out, "{}", message.green())?;
    Ok(())
}

pub fn run_transaction(
    storage: &impl StoreStorage,
    store: &mut DomainStore,
    action: &TransactionAction,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let message = match action {
        TransactionAction::List => {
            writeln!(out, "{}", transaction_table(store))?;
            return Ok(());
        }
        TransactionAction::Add {
            kind,
            amount,
            category,
            date,
            description,
        } => {
            let category_id = resolve_category_id(store, category)?;
            let txn = store.add_transaction(NewTransaction {
                kind: *kind,
                amount: *amount,
                category_id,
                date: *date,
                description: description.clone(),
            })?;
            format!("Added transaction {}", txn.id)
        }
        TransactionAction::Edit { id, changes } => {
            let mut txn = store
                .transaction(id)
                .cloned()
                .ok_or_else(|| FinanceError::TransactionNotFound(id.clone()))?;
            if let Some(category) = &changes.category {
                txn.category_id = resolve_category_id(store, category)?;
            }
            if let Some(kind) = changes.kind {
                txn.kind = kind;
            }
            if let Some(amount) = changes.amount {
                txn.amount = amount;
            }
            if let Some(date) = changes.date {
                txn.date = date;
            }
            if let Some(description) = &changes.description {
                txn.description = Some(description.trim())
                    .filter(|text| !text.is_empty())
                    .map(str::to_string);
            }
            store.update_transaction(txn)?;
            format!("Updated transaction {id}")
        }
        TransactionAction::Remove { id } => {
            let removed = store.remove_transaction(id)?;
            format!("Removed transaction {}", removed.id)
        }
    };
    storage.save(store)?;
    success(out, message)
}

pub fn run_category(
    storage: &impl StoreStorage,
    store: &mut DomainStore,
    action: &CategoryAction,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let message = match action {
        CategoryAction::List => {
            writeln!(out, "{}", category_table(store.categories()))?;
            return Ok(());
        }
        CategoryAction::Add { name, kind } => {
            if store.resolve_category(name).is_some() {
                return Err(FinanceError::Validation(format!(
                    "category `{}` already exists",
                    name.trim()
                ))
                .into());
            }
            let category = store.add_category(name.as_str(), *kind)?;
            format!("Added category {} ({})", category.name, category.id)
        }
        CategoryAction::Edit {
            category,
            name,
            kind,
        } => {
            let mut edited: Category = store
                .resolve_category(category)
                .cloned()
                .ok_or_else(|| FinanceError::CategoryNotFound(category.clone()))?;
            if let Some(name) = name {
                edited.name = name.trim().to_string();
            }
            if let Some(kind) = kind {
                edited.kind = *kind;
            }
            let id = edited.id.clone();
            store.update_category(edited)?;
            format!("Updated category {id}")
        }
        CategoryAction::Remove { category } => {
            let id = resolve_category_id(store, category)?;
            let removed = store.remove_category(&id)?;
            format!("Removed category {} ({})", removed.name, removed.id)
        }
    };
    storage.save(store)?;
    success(out, message)
}

pub fn run_budget(
    storage: &impl StoreStorage,
    store: &mut DomainStore,
    action: &BudgetAction,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let message = match action {
        BudgetAction::List => {
            writeln!(out, "{}", budget_table(store))?;
            return Ok(());
        }
        BudgetAction::Set { category, amount } => {
            let category_id = resolve_category_id(store, category)?;
            let budget = store.set_budget(category_id, *amount)?;
            format!(
                "Budget {} set to {}",
                budget.id,
                format_amount(budget.amount)
            )
        }
        BudgetAction::Edit {
            id,
            category,
            amount,
        } => {
            let mut budget = store
                .budget(id)
                .cloned()
                .ok_or_else(|| FinanceError::BudgetNotFound(id.clone()))?;
            if let Some(category) = category {
                budget.category_id = resolve_category_id(store, category)?;
            }
            if let Some(amount) = amount {
                budget.amount = *amount;
            }
            store.update_budget(budget)?;
            format!("Updated budget {id}")
        }
        BudgetAction::Remove { id } => {
            let removed = store.remove_budget(id)?;
            format!("Removed budget {}", removed.id)
        }
    };
    storage.save(store)?;
    success(out, message)
}

pub fn run_config(
    manager: &ConfigManager,
    mut config: Config,
    action: &ConfigAction,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match action {
        ConfigAction::Show => {
            writeln!(out, "currency:  {}", config.currency)?;
            writeln!(
                out,
                "data file: {}",
                config.resolve_data_file(manager.base_dir()).display()
            )?;
            return Ok(());
        }
        ConfigAction::SetCurrency(code) => config.currency = code.clone(),
        ConfigAction::SetDataFile(path) => config.data_file = Some(path.clone()),
    }
    manager.save(&config)?;
    success(out, format!("Configuration saved to {}", manager.path().display()))
}

fn transaction_table(store: &DomainStore) -> String {
    if store.transactions().is_empty() {
        return "No transactions recorded.".to_string();
    }
    let mut table = Table::new(vec![
        TableColumn::left("Id"),
        TableColumn::left("Date"),
        TableColumn::left("Type"),
        TableColumn::left("Category"),
        TableColumn::right("Amount"),
        TableColumn::left("Description"),
    ]);
    for txn in store.transactions() {
        table.push_row(vec![
            txn.id.clone(),
            txn.date.to_string(),
            txn.kind.to_string(),
            category_name(store.categories(), &txn.category_id).to_string(),
            format_amount(txn.amount),
            txn.description.clone().unwrap_or_default(),
        ]);
    }
    table.render()
}

fn category_table(categories: &[Category]) -> String {
    if categories.is_empty() {
        return "No categories defined.".to_string();
    }
    let mut table = Table::new(vec![
        TableColumn::left("Id"),
        TableColumn::left("Name"),
        TableColumn::left("Type"),
    ]);
    for category in categories {
        table.push_row(vec![
            category.id.clone(),
            category.name.clone(),
            category.kind.to_string(),
        ]);
    }
    table.render()
}

fn budget_table(store: &DomainStore) -> String {
    if store.budgets().is_empty() {
        return "No budgets set yet.".to_string();
    }
    let mut table = Table::new(vec![
        TableColumn::left("Id"),
        TableColumn::left("Category"),
        TableColumn::right("Amount"),
    ]);
    for budget in store.budgets() {
        table.push_row(vec![
            budget.id.clone(),
            category_name(store.categories(), &budget.category_id).to_string(),
            format_amount(budget.amount),
        ]);
    }
    table.render()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::JsonStoreStorage;

    fn words(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn transaction_add_parses_typed_values() {
        let action =
            parse_transaction(&words(&["add", "expense", "12.5", "Rent", "2024-04-01", "keys"]))
                .unwrap();
        assert_eq!(
            action,
            TransactionAction::Add {
                kind: EntryKind::Expense,
                amount: 12.5,
                category: "Rent".into(),
                date: NaiveDate::from_ymd_opt(2024, 4, 1).unwrap(),
                description: Some("keys".into()),
            }
        );
    }

    #[test]
    fn bad_values_are_validation_errors() {
        let err = parse_transaction(&words(&["add", "expense", "-40", "Rent", "2024-04-01"]))
            .expect_err("negative amount");
        assert!(matches!(err, CliError::Finance(FinanceError::Validation(_))));

        let err = parse_transaction(&words(&["add", "expense", "4", "Rent", "01/04/2024"]))
            .expect_err("bad date");
        assert!(matches!(err, CliError::Finance(FinanceError::Validation(_))));

        let err = parse_budget(&words(&["set", "Rent", "abc"])).expect_err("bad amount");
        assert!(matches!(err, CliError::Finance(FinanceError::Validation(_))));
    }

    #[test]
    fn edits_need_at_least_one_change() {
        assert!(matches!(
            parse_transaction(&words(&["edit", "t1"])),
            Err(CliError::Usage(_))
        ));
        assert!(matches!(
            parse_budget(&words(&["edit", "b1", "--colour", "red"])),
            Err(CliError::Usage(_))
        ));
        let action = parse_category(&words(&["edit", "Rent", "--name", "Housing"])).unwrap();
        assert_eq!(
            action,
            CategoryAction::Edit {
                category: "Rent".into(),
                name: Some("Housing".into()),
                kind: None,
            }
        );
    }

    #[test]
    fn config_set_normalises_currency() {
        assert_eq!(
            parse_config(&words(&["set", "currency", " eur "])).unwrap(),
            ConfigAction::SetCurrency("EUR".into())
        );
        assert!(matches!(
            parse_config(&words(&["set", "colour", "red"])),
            Err(CliError::Usage(_))
        ));
    }

    #[test]
    fn mutations_are_saved_through_storage() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStoreStorage::in_dir(dir.path());
        let mut store = storage.load().unwrap();
        let mut out = Vec::new();

        run_budget(
            &storage,
            &mut store,
            &BudgetAction::Set {
                category: "groceries".into(),
                amount: 300.0,
            },
            &mut out,
        )
        .unwrap();
        run_transaction(
            &storage,
            &mut store,
            &TransactionAction::Add {
                kind: EntryKind::Expense,
                amount: 75.0,
                category: "Groceries".into(),
                date: NaiveDate::from_ymd_opt(2024, 4, 2).unwrap(),
                description: None,
            },
            &mut out,
        )
        .unwrap();

        let reloaded = storage.load().unwrap();
        assert_eq!(reloaded, store);
        let groceries = reloaded.resolve_category("Groceries").unwrap();
        assert_eq!(reloaded.budgets()[0].category_id, groceries.id);
        assert_eq!(reloaded.transactions()[0].category_id, groceries.id);
    }

    #[test]
    fn unknown_category_is_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStoreStorage::in_dir(dir.path());
        let mut store = storage.load().unwrap();
        let err = run_budget(
            &storage,
            &mut store,
            &BudgetAction::Set {
                category: "Holidays".into(),
                amount: 10.0,
            },
            &mut Vec::new(),
        )
        .expect_err("no such category");
        assert!(matches!(
            err,
            CliError::Finance(FinanceError::CategoryNotFound(_))
        ));
        assert!(!storage.path().exists());
    }

    #[test]
    fn duplicate_category_names_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let storage = JsonStoreStorage::in_dir(dir.path());
        let mut store = storage.load().unwrap();
        let err = run_category(
            &storage,
            &mut store,
            &CategoryAction::Add {
                name: "rent".into(),
                kind: EntryKind::Expense,
            },
            &mut Vec::new(),
        )
        .expect_err("Rent is a stock category");
        assert!(matches!(err, CliError::Finance(FinanceError::Validation(_))));
    }
}
