// history.rs

use std::fmt;

/// One finished calculation, already formatted for display.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CalculationRecord(String);

impl CalculationRecord {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CalculationRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Append-only list of records for the current session.
#[derive(Default)]
pub struct HistoryStore {
    entries: Vec<CalculationRecord>,
}

impl HistoryStore {
    pub fn new() -> Self {
        Self { entries: Vec::new() }
    }
    pub fn append(&mut self, record: CalculationRecord) {
        self.entries.push(record);
    }
    pub fn len(&self) -> usize {
        self.entries.len()
    }
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
    /// Callers must have confirmed with the user first.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
    /// Oldest first. `None` means nothing has been calculated yet.
    pub fn all(&self) -> Option<&[CalculationRecord]> {
        if self.entries.is_empty() {
            None
        } else {
            Some(&self.entries)
        }
    }
    /// Entries paired with their 1-based display index.
    pub fn numbered(&self) -> impl Iterator<Item = (usize, &CalculationRecord)> {
        self.entries.iter().enumerate().map(|(i, r)| (i + 1, r))
    }
}
