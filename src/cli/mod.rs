//! Command-line front end: the dashboard plus store and configuration edits.

pub mod commands;
pub mod output;
pub mod table;

use std::io::Write;
use std::path::PathBuf;

use thiserror::Error;

use crate::{
    config::ConfigManager,
    errors::FinanceError,
    reports::Dashboard,
    storage::{JsonStoreStorage, StoreStorage},
};

use commands::{BudgetAction, CategoryAction, ConfigAction, TransactionAction};

pub const USAGE: &str = "\
usage: finance_reports_cli [--data <path>] <command>

commands:
  dashboard [--json]   print every report view
  warnings             list store integrity warnings
  transaction add <income|expense> <amount> <category> <YYYY-MM-DD> [description]
  transaction edit <id> [--amount X] [--category C] [--date D] [--type T] [--description S]
  transaction remove <id>
  transaction list
  category add <name> <income|expense>
  category edit <category> [--name N] [--type T]
  category remove <category>
  category list
  budget set <category> <amount>
  budget edit <id> [--category C] [--amount X]
  budget remove <id>
  budget list
  config [show | set <currency|data-file> <value>]
  help                 show this message

<category> is a category id or name.";

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Finance(#[from] FinanceError),
    #[error("output error: {0}")]
    Io(#[from] std::io::Error),
    #[error("{0}\n\n{}", USAGE)]
    Usage(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Dashboard { json: bool },
    Warnings,
    Transaction(TransactionAction),
    Category(CategoryAction),
    Budget(BudgetAction),
    Config(ConfigAction),
    Help,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Invocation {
    pub data: Option<PathBuf>,
    pub command: Command,
}

pub fn parse_args<I, S>(args: I) -> Result<Invocation, CliError>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    let mut data = None;
    let mut words = Vec::new();
    let mut args = args.into_iter().map(Into::<String>::into);

    while let Some(arg) = args.next() {
        if arg == "--data" {
            let path = args
                .next()
                .ok_or_else(|| CliError::Usage("--data needs a path".into()))?;
            data = Some(PathBuf::from(path));
        } else {
            words.push(arg);
        }
    }

    let wants_help = words.first().is_some_and(|word| word == "help")
        || words
            .iter()
            .any(|word| matches!(word.as_str(), "-h" | "--help"));
    if wants_help {
        return Ok(Invocation {
            data,
            command: Command::Help,
        });
    }

    let (name, rest) = match words.split_first() {
        Some((first, rest)) if !first.starts_with('-') => (first.as_str(), rest),
        _ => ("dashboard", words.as_slice()),
    };
    let command = match name {
        "dashboard" => parse_dashboard(rest)?,
        "warnings" => {
            no_extra_args(rest)?;
            Command::Warnings
        }
        "transaction" => Command::Transaction(commands::parse_transaction(rest)?),
        "category" => Command::Category(commands::parse_category(rest)?),
        "budget" => Command::Budget(commands::parse_budget(rest)?),
        "config" => Command::Config(commands::parse_config(rest)?),
        other => return Err(CliError::Usage(format!("unknown command `{other}`"))),
    };
    Ok(Invocation { data, command })
}

fn parse_dashboard(args: &[String]) -> Result<Command, CliError> {
    let mut json = false;
    for arg in args {
        match arg.as_str() {
            "--json" => json = true,
            other if other.starts_with('-') => {
                return Err(CliError::Usage(format!("unknown option `{other}`")));
            }
            other => return Err(CliError::Usage(format!("unexpected argument `{other}`"))),
        }
    }
    Ok(Command::Dashboard { json })
}

fn no_extra_args(args: &[String]) -> Result<(), CliError> {
    match args.first().map(String::as_str) {
        None => Ok(()),
        Some("--json") => Err(CliError::Usage("--json only applies to dashboard".into())),
        Some(other) => Err(CliError::Usage(format!("unexpected argument `{other}`"))),
    }
}

pub fn run_cli() -> Result<(), CliError> {
    let invocation = parse_args(std::env::args().skip(1))?;
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    execute(&invocation, &mut out)
}

pub fn execute(invocation: &Invocation, out: &mut impl Write) -> Result<(), CliError> {
    if invocation.command == Command::Help {
        writeln!(out, "{USAGE}")?;
        return Ok(());
    }

    let manager = ConfigManager::new()?;
    let config = manager.load()?;
    if let Command::Config(action) = &invocation.command {
        return commands::run_config(&manager, config, action, out);
    }

    let data_file = invocation
        .data
        .clone()
        .unwrap_or_else(|| config.resolve_data_file(manager.base_dir()));
    tracing::debug!(path = %data_file.display(), "using store file");
    let storage = JsonStoreStorage::new(data_file);
    let mut store = storage.load()?;

    match &invocation.command {
        Command::Dashboard { json: true } => {
            let dashboard = Dashboard::from_source(&store);
            writeln!(
                out,
                "{}",
                serde_json::to_string_pretty(&dashboard).map_err(FinanceError::from)?
            )?;
        }
        Command::Dashboard { json: false } => {
            let dashboard = Dashboard::from_source(&store);
            writeln!(out, "{}", output::render_dashboard(&dashboard, &config.currency))?;
        }
        Command::Warnings => {
            writeln!(out, "{}", output::render_warnings(&store.warnings()))?;
        }
        Command::Transaction(action) => {
            commands::run_transaction(&storage, &mut store, action, out)?;
        }
        Command::Category(action) => commands::run_category(&storage, &mut store, action, out)?,
        Command::Budget(action) => commands::run_budget(&storage, &mut store, action, out)?,
        Command::Config(_) | Command::Help => {}
    }
    Ok(())
}
