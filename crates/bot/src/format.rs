//! HTML rendering of inventory snapshots.

use stockbot_inventory::{Snapshot, StockLevel, classify};

pub const NO_DATA: &str = "No inventory data.";

const SECTION_ICON: &str = "📦";
const LOW_MARKER: &str = "🔴";
const OK_MARKER: &str = "🟢";

/// Render a snapshot as Telegram-flavoured HTML.
///
/// Each section gets a bold header followed by one line per item, marked red
/// when its quantity is below `threshold` and green otherwise.
pub fn format_inventory(snapshot: &Snapshot, threshold: i64) -> String {
    if snapshot.is_empty() {
        return NO_DATA.to_string();
    }

    let mut out = String::new();
    for section in snapshot.sections() {
        out.push_str(&format!("{SECTION_ICON} <b>{}</b>\n", escape_html(&section.name)));
        for entry in &section.entries {
            out.push_str(&format!(
                " {} {} — {} pcs.\n",
                marker(classify(entry.quantity, threshold)),
                escape_html(&entry.item),
                entry.quantity
            ));
        }
        out.push('\n');
    }
    out
}

pub fn marker(level: StockLevel) -> &'static str {
    match level {
        StockLevel::Low => LOW_MARKER,
        StockLevel::Ok => OK_MARKER,
    }
}

/// Escape the characters Telegram's HTML parse mode treats as markup.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use stockbot_core::ItemId;
    use stockbot_inventory::{InventoryRecord, Quantity};

    fn snapshot(rows: &[(&str, &str, i64)]) -> Snapshot {
        Snapshot::from_records(rows.iter().enumerate().map(|(i, (s, item, q))| InventoryRecord {
            id: ItemId::new(i as i64 + 1),
            section: s.to_string(),
            item: item.to_string(),
            quantity: Quantity::new(*q).unwrap(),
        }))
    }

    #[test]
    fn marks_low_and_ok_items() {
        let rendered = format_inventory(&snapshot(&[("A", "x", 2), ("A", "y", 5)]), 4);
        assert_eq!(
            rendered,
            "📦 <b>A</b>\n 🔴 x — 2 pcs.\n 🟢 y — 5 pcs.\n\n"
        );
    }

    #[test]
    fn quantity_at_threshold_is_ok() {
        let rendered = format_inventory(&snapshot(&[("A", "x", 4)]), 4);
        assert!(rendered.contains("🟢 x — 4 pcs."));
    }

    #[test]
    fn empty_snapshot_renders_no_data() {
        assert_eq!(format_inventory(&Snapshot::empty(), 4), NO_DATA);
    }

    #[test]
    fn sections_keep_their_order() {
        let rendered = format_inventory(&snapshot(&[("B", "b", 9), ("A", "a", 9)]), 4);
        let b = rendered.find("<b>B</b>").unwrap();
        let a = rendered.find("<b>A</b>").unwrap();
        assert!(b < a);
    }

    #[test]
    fn markup_in_names_is_escaped() {
        let rendered = format_inventory(&snapshot(&[("<i>", "a&b", 9)]), 4);
        assert!(rendered.contains("<b>&lt;i&gt;</b>"));
        assert!(rendered.contains("a&amp;b"));
    }
}
