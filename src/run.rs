mod cli;
mod display;
mod input;
mod menu;

use anyhow::Result;
use std::io;

use crate::db::EntryStore;

pub(crate) fn as_cli(args: &[String], store: &mut EntryStore) -> Result<()> {
    let stdout = io::stdout();
    cli::as_cli(args, store, &mut stdout.lock())
}

pub(crate) fn as_menu(store: &mut EntryStore) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    menu::Menu::new(store, stdin.lock(), stdout.lock()).run()
}
