use super::api::RawRecord;
use crate::core::Card;

/// Builds the canonical card for `record`. `assigned_id` is its 1-based sorted position.
pub fn normalize(record: RawRecord, assigned_id: u32) -> Card {
    let rarity = record.rarity.chars().next().map(|c| c.to_ascii_uppercase()).unwrap_or('?');

    let color_identity =
        record.color_identity.into_iter().next().unwrap_or_else(|| "C".to_string());

    let is_double_faced = record.card_faces.len() > 1;

    // Double-faced layouts carry their art on the faces rather than the card.
    let image_url = record.image_uris.and_then(|uris| uris.normal).or_else(|| {
        if is_double_faced {
            record.card_faces.into_iter().next().and_then(|face| face.image_uris?.normal)
        } else {
            None
        }
    });

    Card {
        id: assigned_id,
        name: record.name,
        collector_number: record.collector_number,
        rarity,
        color_identity,
        type_line: record.type_line,
        image_url,
        external_id: record.id,
        mana_cost: record.mana_cost.unwrap_or_default(),
        converted_mana_cost: record.cmc.unwrap_or(0.0),
        set_name: record.set_name,
        layout: record.layout,
        is_double_faced,
        frame_effects: record.frame_effects.into_iter().collect(),
        is_promo: record.promo,
        finishes: record.finishes.into_iter().collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::api::{
        CardFace,
        ImageUris,
    };

    fn image(url: &str) -> Option<ImageUris> {
        Some(ImageUris { normal: Some(url.to_string()), ..ImageUris::default() })
    }

    fn face(url: Option<&str>) -> CardFace {
        CardFace { name: "Face".to_string(), image_uris: url.and_then(image) }
    }

    #[test]
    fn test_normalize_copies_and_derives_fields() {
        let record = RawRecord {
            id: "0f1c".to_string(),
            name: "Tifa Lockhart".to_string(),
            collector_number: "206".to_string(),
            rarity: "rare".to_string(),
            color_identity: vec!["G".to_string(), "R".to_string()],
            type_line: "Legendary Creature — Human Monk".to_string(),
            image_uris: image("https://img/206.jpg"),
            mana_cost: Some("{1}{G}".to_string()),
            cmc: Some(2.0),
            set: "fin".to_string(),
            set_name: "Final Fantasy".to_string(),
            layout: "normal".to_string(),
            frame_effects: vec!["showcase".to_string()],
            promo: true,
            finishes: vec!["nonfoil".to_string(), "foil".to_string()],
            ..RawRecord::default()
        };

        let card = normalize(record, 7);
        assert_eq!(card.id, 7);
        assert_eq!(card.rarity, 'R');
        assert_eq!(card.color_identity, "G");
        assert_eq!(card.image_url.as_deref(), Some("https://img/206.jpg"));
        assert_eq!(card.external_id, "0f1c");
        assert_eq!(card.mana_cost, "{1}{G}");
        assert_eq!(card.converted_mana_cost, 2.0);
        assert!(!card.is_double_faced);
        assert!(card.is_promo);
        assert!(card.frame_effects.contains("showcase"));
        assert_eq!(card.finishes.len(), 2);
    }

    #[test]
    fn test_normalize_defaults() {
        let card = normalize(
            RawRecord { collector_number: "1".to_string(), ..RawRecord::default() },
            1,
        );
        assert_eq!(card.rarity, '?');
        assert_eq!(card.color_identity, "C");
        assert_eq!(card.image_url, None);
        assert_eq!(card.mana_cost, "");
        assert_eq!(card.converted_mana_cost, 0.0);
        assert!(!card.is_promo);
        assert!(card.frame_effects.is_empty());
        assert!(card.finishes.is_empty());
    }

    #[test]
    fn test_double_faced_image_fallback() {
        let transform = RawRecord {
            collector_number: "99".to_string(),
            rarity: "mythic".to_string(),
            card_faces: vec![face(Some("https://img/front.jpg")), face(Some("https://img/back.jpg"))],
            ..RawRecord::default()
        };
        let card = normalize(transform, 1);
        assert!(card.is_double_faced);
        assert_eq!(card.rarity, 'M');
        assert_eq!(card.image_url.as_deref(), Some("https://img/front.jpg"));

        // A card-level image wins over the faces.
        let split = RawRecord {
            image_uris: image("https://img/card.jpg"),
            card_faces: vec![face(Some("https://img/left.jpg")), face(None)],
            ..RawRecord::default()
        };
        assert_eq!(normalize(split, 1).image_url.as_deref(), Some("https://img/card.jpg"));

        // A lone face is not double-faced and is not consulted for art.
        let single = RawRecord { card_faces: vec![face(Some("https://img/only.jpg"))], ..RawRecord::default() };
        let card = normalize(single, 1);
        assert!(!card.is_double_faced);
        assert_eq!(card.image_url, None);
    }
}
