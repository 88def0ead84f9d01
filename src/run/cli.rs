use anyhow::{Context, Result};
use std::io::Write;
use std::path::PathBuf;

use super::display::{entry_table, format_amount, summary_lines};
use super::input::{parse_amount, parse_entry_type, parse_id, parse_month, parse_name};
use crate::db::EntryStore;
use crate::models::{EntryUpdate, Month};

pub(crate) fn as_cli<W: Write>(args: &[String], store: &mut EntryStore, out: &mut W) -> Result<()> {
    match args[1].as_str() {
        "summary" | "s" => cli_summary(&args[2..], store, out),
        "list" | "ls" => cli_list(&args[2..], store, out),
        "add" => cli_add(&args[2..], store, out),
        "show" => cli_show(&args[2..], store, out),
        "delete" | "rm" => cli_delete(&args[2..], store, out),
        "edit" => cli_edit(&args[2..], store, out),
        "export" => cli_export(&args[2..], store, out),
        "--help" | "-h" | "help" => print_usage(out),
        "--version" | "-V" | "version" => {
            writeln!(out, "finledger {}", env!("CARGO_PKG_VERSION"))?;
            Ok(())
        }
        other => {
            print_usage(out)?;
            anyhow::bail!("Unknown command: {other}");
        }
    }
}

fn print_usage<W: Write>(out: &mut W) -> Result<()> {
    let usage = "\
finledger: monthly income and expense ledger

Usage: finledger [command]

Commands:
  (none)                              Interactive menu
  summary [YYYY-MM]                   Print income, expenses and balance
  list [YYYY-MM]                      List entries, most recent first
    --month <YYYY-MM>                 Same as the positional month (default: current)
  add <type> <name> <amount>          Add an entry (type: expense, income, account_state)
    --month <YYYY-MM>                 Month to file it under (default: current)
  show <id>                           Show one entry
  delete <id>                         Delete one entry
  edit <id>                           Change fields of one entry, all or nothing
    --type <type> --name <name> --value <amount>
  export [path]                       Export entries to CSV
    --month <YYYY-MM>                 Month to export (default: current)
  --help, -h                          Show this help
  --version, -V                       Show version

Environment:
  DB_CONNECTION_STRING                PostgreSQL connection string or SQLite path (required)
  RUST_LOG                            Log filter (default: info)";
    writeln!(out, "{usage}")?;
    Ok(())
}

/// Value of `--flag <value>` anywhere in `args`.
fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

/// Arguments that are neither flags nor flag values.
fn positional(args: &[String]) -> Vec<&str> {
    let mut result = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg.starts_with("--") {
            iter.next();
        } else {
            result.push(arg.as_str());
        }
    }
    result
}

fn month_arg(value: Option<&str>) -> Result<Month> {
    value.map(parse_month).unwrap_or_else(|| Ok(Month::current()))
}

/// Month given either positionally or with `--month`; both must agree.
fn listing_month(args: &[String]) -> Result<Month> {
    let words = positional(args);
    match (words.first().copied(), flag_value(args, "--month")) {
        (Some(word), Some(flag)) if word != flag => {
            anyhow::bail!("Conflicting months '{word}' and --month '{flag}'")
        }
        (Some(month), _) | (None, Some(month)) => parse_month(month),
        (None, None) => Ok(Month::current()),
    }
}

/// Parses the id argument and confirms the entry exists.
fn existing_id(args: &[String], usage: &str, store: &mut EntryStore) -> Result<i64> {
    let Some(id) = positional(args).first().copied() else {
        anyhow::bail!("Usage: finledger {usage}");
    };
    let id = parse_id(id)?;
    if !store.entry_exists(id)? {
        anyhow::bail!("No entry found with ID {id}");
    }
    Ok(id)
}

fn cli_summary<W: Write>(args: &[String], store: &mut EntryStore, out: &mut W) -> Result<()> {
    let month = listing_month(args)?;
    let summary = store.month_summary(month)?;
    writeln!(out, "{}", summary_lines(&summary))?;
    Ok(())
}

fn cli_list<W: Write>(args: &[String], store: &mut EntryStore, out: &mut W) -> Result<()> {
    let month = listing_month(args)?;
    let entries = store.get_entries_by_month(month)?;
    if entries.is_empty() {
        writeln!(out, "No entries for {month}")?;
        return Ok(());
    }
    writeln!(out, "Entries for {month}")?;
    writeln!(out, "{}", entry_table(&entries))?;
    Ok(())
}

fn cli_add<W: Write>(args: &[String], store: &mut EntryStore, out: &mut W) -> Result<()> {
    let words = positional(args);
    let [entry_type, name, amount] = words.as_slice() else {
        anyhow::bail!("Usage: finledger add <type> <name> <amount> [--month <YYYY-MM>]");
    };
    let entry_type = parse_entry_type(entry_type)?;
    let name = parse_name(name)?;
    let value = parse_amount(amount)?;
    let month = month_arg(flag_value(args, "--month"))?;

    let id = store.add_entry(month, entry_type, &name, value)?;
    writeln!(
        out,
        "Added {} '{name}' {} to {month} (ID {id})",
        entry_type.label(),
        format_amount(value)
    )?;
    Ok(())
}

fn cli_show<W: Write>(args: &[String], store: &mut EntryStore, out: &mut W) -> Result<()> {
    let id = existing_id(args, "show <id>", store)?;
    let entries = store.entry_info(id)?;
    if entries.is_empty() {
        anyhow::bail!("No entry found with ID {id}");
    }
    writeln!(out, "{}", entry_table(&entries))?;
    Ok(())
}

fn cli_delete<W: Write>(args: &[String], store: &mut EntryStore, out: &mut W) -> Result<()> {
    let id = existing_id(args, "delete <id>", store)?;
    if store.delete_entry(id)? == 0 {
        anyhow::bail!("No entry found with ID {id}");
    }
    writeln!(out, "Entry {id} was successfully deleted.")?;
    Ok(())
}

fn cli_edit<W: Write>(args: &[String], store: &mut EntryStore, out: &mut W) -> Result<()> {
    let usage = "edit <id> [--type <type>] [--name <name>] [--value <amount>]";
    let id = existing_id(args, usage, store)?;

    let mut update = EntryUpdate::new();
    if let Some(t) = flag_value(args, "--type") {
        update = update.with_type(parse_entry_type(t)?);
    }
    if let Some(n) = flag_value(args, "--name") {
        update = update.with_name(parse_name(n)?);
    }
    if let Some(v) = flag_value(args, "--value") {
        update = update.with_value(parse_amount(v)?);
    }
    if update.is_empty() {
        anyhow::bail!("Nothing to change. Usage: finledger {usage}");
    }

    if !store.apply_update(id, &update)? {
        anyhow::bail!("No entry found with ID {id}");
    }
    writeln!(out, "Entry {id} updated ({} field(s))", update.len())?;
    Ok(())
}

fn cli_export<W: Write>(args: &[String], store: &mut EntryStore, out: &mut W) -> Result<()> {
    let month = month_arg(flag_value(args, "--month"))?;
    let path = positional(args)
        .first()
        .map(|p| PathBuf::from(shellexpand(p)))
        .unwrap_or_else(|| PathBuf::from(format!("finledger-export-{month}.csv")));

    let count = crate::export::export_month(store, month, &path)
        .with_context(|| format!("Failed to export {month}"))?;
    if count == 0 {
        writeln!(out, "No entries for {month} (wrote header only to {})", path.display())?;
    } else {
        writeln!(out, "Exported {count} entries to {}", path.display())?;
    }
    Ok(())
}

fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        let home = std::env::var("HOME").unwrap_or_else(|_| ".".into());
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
