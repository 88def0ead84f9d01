use anyhow::Result;
use std::io::{BufRead, Write};

use super::display::{entry_table, summary_lines};
use super::input::{parse_amount, parse_id, parse_month, parse_name};
use crate::db::{EntryStore, StoreError};
use crate::models::{EntryType, Month};

const MAIN_MENU: &[&str] = &[
    "Add Expense",
    "Add Income",
    "Add Account State",
    "Edit Entry",
    "View Month Summary",
    "View All Entries",
    "Change Month",
    "Exit",
];

const EDIT_MENU: &[&str] = &[
    "Expense",
    "Income",
    "Account State",
    "Name",
    "Value",
    "Delete entry",
    "Exit",
];

/// Interactive session over one working month. Reads choices line by line
/// and stops at "Exit" or end of input.
pub(crate) struct Menu<'a, R, W> {
    store: &'a mut EntryStore,
    input: R,
    out: W,
    month: Month,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub(crate) fn new(store: &'a mut EntryStore, input: R, out: W) -> Self {
        Self {
            store,
            input,
            out,
            month: Month::current(),
        }
    }

    pub(crate) fn run(&mut self) -> Result<()> {
        let Some(month) = self.ask_month()? else {
            return Ok(());
        };
        self.month = month;

        loop {
            self.print_menu("Finance Tracker", MAIN_MENU)?;
            let Some(choice) = self.read_line()? else {
                writeln!(self.out)?;
                return Ok(());
            };
            match choice.trim() {
                "1" => self.add_entry(EntryType::Expense)?,
                "2" => self.add_entry(EntryType::Income)?,
                "3" => self.add_entry(EntryType::AccountState)?,
                "4" => self.edit_entry()?,
                "5" => self.view_summary()?,
                "6" => self.view_entries()?,
                "7" => match self.ask_month()? {
                    Some(month) => self.month = month,
                    None => return Ok(()),
                },
                "8" => {
                    writeln!(self.out, "Goodbye!")?;
                    return Ok(());
                }
                _ => writeln!(self.out, "Invalid choice!")?,
            }
        }
    }

    /// `None` at end of input.
    fn read_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\n', '\r']).to_string()))
    }

    fn prompt(&mut self, label: &str) -> Result<Option<String>> {
        write!(self.out, "{label}")?;
        self.out.flush()?;
        self.read_line()
    }

    fn print_menu(&mut self, title: &str, items: &[&str]) -> Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "=== {title} ({}) ===", self.month)?;
        for (i, item) in items.iter().enumerate() {
            writeln!(self.out, "{}. {item}", i + 1)?;
        }
        write!(self.out, "\nChoice: ")?;
        self.out.flush()?;
        Ok(())
    }

    fn ask_month(&mut self) -> Result<Option<Month>> {
        loop {
            let Some(line) = self.prompt("\nEnter month (YYYY-MM): ")? else {
                return Ok(None);
            };
            match parse_month(&line) {
                Ok(month) => return Ok(Some(month)),
                Err(e) => writeln!(self.out, "{e}")?,
            }
        }
    }

    fn add_entry(&mut self, entry_type: EntryType) -> Result<()> {
        let label = entry_type.label();
        let Some(name) = self.prompt(&format!("\nEnter {label} name: "))? else {
            return Ok(());
        };
        let name = match parse_name(&name) {
            Ok(name) => name,
            Err(e) => return Ok(writeln!(self.out, "{e}")?),
        };
        let Some(amount) = self.prompt("Enter amount: ")? else {
            return Ok(());
        };
        let value = match parse_amount(&amount) {
            Ok(value) => value,
            Err(e) => return Ok(writeln!(self.out, "{e}")?),
        };

        match self.store.add_entry(self.month, entry_type, &name, value) {
            Ok(id) => writeln!(self.out, "✓ {label} added successfully! (ID {id})")?,
            Err(e) => writeln!(self.out, "✗ Failed to add {label}: {e}")?,
        }
        Ok(())
    }

    fn edit_entry(&mut self) -> Result<()> {
        let Some(line) = self.prompt("\nEnter the entry id to be edited: ")? else {
            return Ok(());
        };
        let id = match parse_id(&line) {
            Ok(id) => id,
            Err(e) => return Ok(writeln!(self.out, "{e}")?),
        };

        match self.store.entry_exists_in_month(id, self.month) {
            Ok(true) => {}
            Ok(false) => return self.not_found(id),
            Err(e) => return Ok(writeln!(self.out, "✗ Failed to look up entry {id}: {e}")?),
        }
        match self.store.entry_info(id) {
            Ok(entries) if !entries.is_empty() => {
                writeln!(self.out, "\n=== Editing Entry ===")?;
                writeln!(self.out, "{}", entry_table(&entries))?;
            }
            Ok(_) => return self.not_found(id),
            Err(e) => return Ok(writeln!(self.out, "✗ Failed to load entry {id}: {e}")?),
        }

        self.print_menu("Edit Entry", EDIT_MENU)?;
        let Some(choice) = self.read_line()? else {
            return Ok(());
        };
        match choice.trim() {
            "1" => self.set_type(id, EntryType::Expense),
            "2" => self.set_type(id, EntryType::Income),
            "3" => self.set_type(id, EntryType::AccountState),
            "4" => self.set_name(id),
            "5" => self.set_value(id),
            "6" => self.delete(id),
            "7" => Ok(writeln!(self.out, "Edit cancelled.")?),
            _ => Ok(writeln!(self.out, "Invalid choice!")?),
        }
    }

    fn set_type(&mut self, id: i64, entry_type: EntryType) -> Result<()> {
        let result = self.store.update_type(id, entry_type);
        self.report_update(id, result)
    }

    fn set_name(&mut self, id: i64) -> Result<()> {
        let Some(line) = self.prompt("Enter new name: ")? else {
            return Ok(());
        };
        match parse_name(&line) {
            Ok(name) => {
                let result = self.store.update_name(id, &name);
                self.report_update(id, result)
            }
            Err(e) => Ok(writeln!(self.out, "{e}")?),
        }
    }

    fn set_value(&mut self, id: i64) -> Result<()> {
        let Some(line) = self.prompt("Enter new value: ")? else {
            return Ok(());
        };
        match parse_amount(&line) {
            Ok(value) => {
                let result = self.store.update_value(id, value);
                self.report_update(id, result)
            }
            Err(e) => Ok(writeln!(self.out, "Invalid value! {e}")?),
        }
    }

    fn delete(&mut self, id: i64) -> Result<()> {
        match self.store.delete_entry(id) {
            Ok(0) => self.not_found(id),
            Ok(_) => Ok(writeln!(self.out, "Entry {id} was successfully deleted.")?),
            Err(e) => Ok(writeln!(self.out, "✗ Failed to delete entry {id}: {e}")?),
        }
    }

    fn report_update(&mut self, id: i64, result: Result<bool, StoreError>) -> Result<()> {
        match result {
            Ok(true) => writeln!(self.out, "✓ Entry {id} updated.")?,
            Ok(false) => self.not_found(id)?,
            Err(e) => writeln!(self.out, "✗ Failed to update entry {id}: {e}")?,
        }
        Ok(())
    }

    fn not_found(&mut self, id: i64) -> Result<()> {
        writeln!(self.out, "Error: No entry found with ID {id} in {}", self.month)?;
        Ok(())
    }

    fn view_summary(&mut self) -> Result<()> {
        match self.store.month_summary(self.month) {
            Ok(summary) => writeln!(self.out, "\n{}", summary_lines(&summary))?,
            Err(e) => writeln!(self.out, "✗ Failed to load summary: {e}")?,
        }
        Ok(())
    }

    fn view_entries(&mut self) -> Result<()> {
        match self.store.get_entries_by_month(self.month) {
            Ok(entries) if entries.is_empty() => {
                writeln!(self.out, "\nNo entries found for this month.")?
            }
            Ok(entries) => {
                writeln!(self.out, "\n=== Entries for {} ===", self.month)?;
                writeln!(self.out, "{}", entry_table(&entries))?;
            }
            Err(e) => writeln!(self.out, "✗ Failed to load entries: {e}")?,
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "menu_tests.rs"]
mod tests;
