use stockbot_core::{DomainError, DomainResult, ItemId};

/// Stock counter of an item. Never negative.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Quantity(i64);

impl Quantity {
    pub const ZERO: Quantity = Quantity(0);

    pub fn new(value: i64) -> DomainResult<Self> {
        if value < 0 {
            return Err(DomainError::invariant("quantity cannot be negative"));
        }
        Ok(Self(value))
    }

    pub fn get(&self) -> i64 {
        self.0
    }

    /// Whether this quantity sits strictly below the low-stock threshold.
    pub fn is_low(&self, threshold: i64) -> bool {
        self.0 < threshold
    }
}

impl TryFrom<i64> for Quantity {
    type Error = DomainError;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Quantity> for i64 {
    fn from(value: Quantity) -> Self {
        value.0
    }
}

impl core::fmt::Display for Quantity {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        core::fmt::Display::fmt(&self.0, f)
    }
}

/// A validated record that is ready to be inserted.
///
/// Labels are trimmed and must be non-empty; the quantity is already checked,
/// so nothing built through `NewItem::new` can violate the table invariants.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewItem {
    section: String,
    item: String,
    quantity: Quantity,
}

impl NewItem {
    pub fn new(section: impl AsRef<str>, item: impl AsRef<str>, quantity: i64) -> DomainResult<Self> {
        let section = section.as_ref().trim();
        let item = item.as_ref().trim();

        if section.is_empty() {
            return Err(DomainError::validation("section cannot be empty"));
        }
        if item.is_empty() {
            return Err(DomainError::validation("item name cannot be empty"));
        }

        Ok(Self {
            section: section.to_string(),
            item: item.to_string(),
            quantity: Quantity::new(quantity)?,
        })
    }

    pub fn section(&self) -> &str {
        &self.section
    }

    pub fn item(&self) -> &str {
        &self.item
    }

    pub fn quantity(&self) -> Quantity {
        self.quantity
    }
}

/// A stored inventory row, detached from the store that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InventoryRecord {
    pub id: ItemId,
    pub section: String,
    pub item: String,
    pub quantity: Quantity,
}

impl InventoryRecord {
    /// Materialize a record from an accepted insert.
    pub fn from_new(id: ItemId, new_item: NewItem) -> Self {
        Self {
            id,
            section: new_item.section,
            item: new_item.item,
            quantity: new_item.quantity,
        }
    }
}
