//! Starting catalogue written into a fresh store.

use crate::item::NewItem;

const STEEL: &str = "Сталь";
const GRADE_09G2S: &str = "09г2с";

const CATALOGUE: &[(&str, &str, i64)] = &[
    (STEEL, "4мм(1250×2500мм)", 10),
    (STEEL, "4мм(1250×4000мм)", 10),
    (STEEL, "4мм(1500×6000мм)", 10),
    (STEEL, "5мм(1500×6000мм)", 10),
    (STEEL, "8мм(1500×6000мм)", 10),
    (STEEL, "10мм(1500×6000мм)", 10),
    (STEEL, "14мм (размер указывает пользователь)", 5),
    (STEEL, "20мм (размер указывает пользователь)", 5),
    (STEEL, "30мм (размер указывает пользователь)", 5),
    (GRADE_09G2S, "4мм(1500×6000мм)", 10),
    (GRADE_09G2S, "5мм(1500×6000мм)", 10),
    (GRADE_09G2S, "6мм(1500×6000мм)", 10),
    (GRADE_09G2S, "8мм(1500×6000мм)", 10),
    (GRADE_09G2S, "16мм(1500×4000мм)", 10),
    (GRADE_09G2S, "16мм(1500×6000мм)", 10),
];

/// The fixed seed catalogue, in insertion order.
///
/// Item names are globally unique in the store, so the second section's
/// entries that repeat a first-section name are skipped by the
/// insert-or-ignore seeding.
pub fn catalogue() -> Vec<NewItem> {
    CATALOGUE
        .iter()
        .filter_map(|(section, item, quantity)| NewItem::new(section, item, *quantity).ok())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalogue_is_fully_valid() {
        assert_eq!(catalogue().len(), CATALOGUE.len());
    }

    #[test]
    fn catalogue_has_two_sections() {
        let mut sections: Vec<_> = catalogue().iter().map(|i| i.section().to_string()).collect();
        sections.dedup();
        assert_eq!(sections, vec![STEEL.to_string(), GRADE_09G2S.to_string()]);
    }
}
