use std::collections::BTreeSet;

use crate::core::Card;

pub const FALLBACK_SET_NAME: &str = "Sample Set";

/// Placeholder cards installed when the very first load fails, so the binder is never blank.
pub fn fallback_cards() -> Vec<Card> {
    [
        ("001", 'M', "R", "Legendary Creature"),
        ("002", 'R', "U", "Creature"),
        ("003", 'U', "B", "Instant"),
        ("004", 'C', "G", "Sorcery"),
        ("005", 'C', "W", "Enchantment"),
    ]
    .into_iter()
    .enumerate()
    .map(|(index, (number, rarity, color, type_line))| Card {
        id: index as u32 + 1,
        name: format!("Sample Card {}", index + 1),
        collector_number: number.to_string(),
        rarity,
        color_identity: color.to_string(),
        type_line: type_line.to_string(),
        image_url: None,
        external_id: String::new(),
        mana_cost: String::new(),
        converted_mana_cost: 0.0,
        set_name: FALLBACK_SET_NAME.to_string(),
        layout: "normal".to_string(),
        is_double_faced: false,
        frame_effects: BTreeSet::new(),
        is_promo: false,
        finishes: BTreeSet::new(),
    })
    .collect()
}
