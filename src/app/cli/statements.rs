//! Statement management commands.

use std::io::ErrorKind;
use std::path::PathBuf;

use clap::Subcommand;
use dialoguer::{Error as DialoguerError, Input, Select};

use crate::domain::AppError;

#[derive(Subcommand)]
pub enum StatementCommands {
    /// List statements with their keys
    #[clap(visible_alias = "ls")]
    List,
    /// Print one statement
    Get {
        key: String,
    },
    /// Replace an editable statement; prompts for missing arguments
    Set {
        key: Option<String>,
        content: Option<String>,
    },
    /// Restore the built-in statements
    Reset,
}

pub fn run_statements(command: StatementCommands) -> Result<(), AppError> {
    match command {
        StatementCommands::List => {
            for statement in crate::app::api::list_statements()? {
                let marker = if statement.editable { "" } else { " (read-only)" };
                println!("{}{}  {}", statement.key, marker, statement.description);
            }
        }
        StatementCommands::Get { key } => {
            println!("{}", crate::app::api::get_statement(&key)?);
        }
        StatementCommands::Set { key, content } => {
            let Some((key, content)) = resolve_set_inputs(key, content)? else {
                return Ok(());
            };
            let backup = crate::app::api::update_statement(&key, &content)?;
            report_backup(backup);
            println!("✅ Updated statement '{}'", key);
        }
        StatementCommands::Reset => {
            let backup = crate::app::api::reset_statements()?;
            report_backup(backup);
            println!("✅ Restored default statements");
        }
    }
    Ok(())
}

fn report_backup(backup: Option<PathBuf>) {
    if let Some(path) = backup {
        println!("  Backed up previous file to {}", path.display());
    }
}

fn resolve_set_inputs(
    key: Option<String>,
    content: Option<String>,
) -> Result<Option<(String, String)>, AppError> {
    let key = match key {
        Some(value) => value,
        None => match prompt_statement_key()? {
            Some(value) => value,
            None => return Ok(None),
        },
    };

    let content = match content {
        Some(value) => value,
        None => match prompt_content(&key)? {
            Some(value) => value,
            None => return Ok(None),
        },
    };

    Ok(Some((key, content)))
}

fn prompt_statement_key() -> Result<Option<String>, AppError> {
    let keys = crate::app::api::editable_statement_keys()?;
    if keys.is_empty() {
        return Err(AppError::StatementNotFound("<editable>".to_string()));
    }

    let selection = Select::new()
        .with_prompt("Select statement")
        .items(&keys)
        .default(0)
        .interact_opt()
        .map_err(|err| AppError::config_error(format!("Failed to select statement: {}", err)))?;

    Ok(selection.map(|index| keys[index].clone()))
}

fn prompt_content(key: &str) -> Result<Option<String>, AppError> {
    let current = crate::app::api::get_statement(key)?;
    match Input::<String>::new().with_prompt("New content").with_initial_text(current).interact_text() {
        Ok(value) => Ok(Some(value)),
        Err(DialoguerError::IO(err)) if err.kind() == ErrorKind::Interrupted => Ok(None),
        Err(err) => Err(AppError::config_error(format!("Failed to read content: {}", err))),
    }
}
