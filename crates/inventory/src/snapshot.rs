//! Point-in-time view of the whole stock table, grouped by section.

use crate::item::{InventoryRecord, Quantity};

/// One `(item, quantity)` line inside a section.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotEntry {
    pub item: String,
    pub quantity: Quantity,
}

/// A named group of entries, in insertion order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub name: String,
    pub entries: Vec<SnapshotEntry>,
}

/// Ordered mapping from section name to its entries.
///
/// Sections appear in the order their first record was seen; entries keep the
/// order of the records they were built from. Used for display only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    sections: Vec<Section>,
}

impl Snapshot {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Group records by section. Callers pass records in insertion (id) order.
    pub fn from_records<I>(records: I) -> Self
    where
        I: IntoIterator<Item = InventoryRecord>,
    {
        let mut snapshot = Self::empty();
        for record in records {
            snapshot.push(record.section, record.item, record.quantity);
        }
        snapshot
    }

    fn push(&mut self, section: String, item: String, quantity: Quantity) {
        let entry = SnapshotEntry { item, quantity };
        match self.sections.iter_mut().find(|s| s.name == section) {
            Some(existing) => existing.entries.push(entry),
            None => self.sections.push(Section {
                name: section,
                entries: vec![entry],
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Total number of entries across all sections.
    pub fn len(&self) -> usize {
        self.sections.iter().map(|s| s.entries.len()).sum()
    }

    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.sections.iter()
    }

    pub fn section(&self, name: &str) -> Option<&Section> {
        self.sections.iter().find(|s| s.name == name)
    }

    pub fn quantity_of(&self, item: &str) -> Option<Quantity> {
        self.find(item).map(|(_, entry)| entry.quantity)
    }

    pub fn section_of(&self, item: &str) -> Option<&str> {
        self.find(item).map(|(section, _)| section.name.as_str())
    }

    pub fn contains(&self, item: &str) -> bool {
        self.find(item).is_some()
    }

    fn find(&self, item: &str) -> Option<(&Section, &SnapshotEntry)> {
        self.sections.iter().find_map(|section| {
            section
                .entries
                .iter()
                .find(|entry| entry.item == item)
                .map(|entry| (section, entry))
        })
    }
}
