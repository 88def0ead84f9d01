mod entry;
mod summary;
mod update;

pub use entry::{to_currency, Entry, EntryType, Month};
pub use summary::MonthSummary;
pub use update::EntryUpdate;

#[cfg(test)]
mod tests;
