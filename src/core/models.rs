use std::collections::BTreeSet;

use serde::{
    Deserialize,
    Serialize,
};

/// Anything ordered and filtered by its printed collector number.
pub trait CollectorNumbered {
    fn collector_number(&self) -> &str;
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Card {
    pub id: u32,                      // 1-based position in the sorted set
    pub name: String,
    pub collector_number: String,     // Unique within a loaded set
    pub rarity: char,                 // M / R / U / C
    pub color_identity: String,       // First color identity code, "C" for colorless
    pub type_line: String,
    pub image_url: Option<String>,
    pub external_id: String,          // Catalog id of the printing
    pub mana_cost: String,
    pub converted_mana_cost: f64,
    pub set_name: String,
    pub layout: String,
    pub is_double_faced: bool,
    pub frame_effects: BTreeSet<String>,
    pub is_promo: bool,
    pub finishes: BTreeSet<String>,
}

impl CollectorNumbered for Card {
    fn collector_number(&self) -> &str {
        &self.collector_number
    }
}

impl Card {
    /// Short labels for the cosmetic treatments of this printing, in display order.
    pub fn variant_labels(&self) -> Vec<&'static str> {
        let mut labels = Vec::new();

        if self.frame_effects.contains("showcase") {
            labels.push("Showcase");
        }
        if self.frame_effects.contains("borderless") {
            labels.push("Borderless");
        }
        if self.frame_effects.contains("extendedart") {
            labels.push("Extended");
        }
        if self.is_promo {
            labels.push("Promo");
        }

        let foil = self.finishes.contains("foil");
        if foil && self.finishes.contains("nonfoil") {
            labels.push("Foil");
        } else if foil {
            labels.push("Foil Only");
        }

        labels
    }

    /// `variant_labels` joined for a single caption line, empty when the card has none.
    pub fn variant_caption(&self) -> String {
        self.variant_labels().join(" • ")
    }

    pub fn matches_search(&self, query: &str) -> bool {
        if query.is_empty() {
            return true;
        }
        self.name.to_lowercase().contains(&query.to_lowercase())
            || self.collector_number.contains(query)
    }
}
