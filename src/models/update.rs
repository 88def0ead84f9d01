use rust_decimal::Decimal;

use super::EntryType;

/// The fields to change on one entry. Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EntryUpdate {
    pub entry_type: Option<EntryType>,
    pub name: Option<String>,
    pub value: Option<Decimal>,
}

impl EntryUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type(mut self, entry_type: EntryType) -> Self {
        self.entry_type = Some(entry_type);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_value(mut self, value: Decimal) -> Self {
        self.value = Some(value);
        self
    }

    pub fn is_empty(&self) -> bool {
        self.entry_type.is_none() && self.name.is_none() && self.value.is_none()
    }

    /// Number of fields present.
    pub fn len(&self) -> usize {
        usize::from(self.entry_type.is_some())
            + usize::from(self.name.is_some())
            + usize::from(self.value.is_some())
    }
}
