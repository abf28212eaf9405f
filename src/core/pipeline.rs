use std::time::Instant;

use tracing::{
    info,
    warn,
};

use super::{
    Card,
    CatalogError,
};
use crate::catalog::{
    normalize,
    sort_by_collector_number,
    CatalogClient,
    PageTransport,
    RawRecord,
    VariantPolicy,
};

/// Cards of one set in binder order, plus the metadata shown alongside them.
#[derive(Debug, Clone, PartialEq)]
pub struct CardSet {
    pub set_code: String,
    pub set_name: String,
    pub cards: Vec<Card>,
}

/// Filters, orders, and normalizes raw records. Ids follow the final order, starting at 1.
pub fn prepare_cards(records: Vec<RawRecord>, policy: &VariantPolicy) -> Vec<Card> {
    let fetched = records.len();
    let mut records = sort_by_collector_number(policy.filter(records));

    // Sorting puts identical collector numbers next to each other; keep the first.
    let before_dedup = records.len();
    records.dedup_by(|a, b| a.collector_number == b.collector_number);
    if records.len() != before_dedup {
        warn!(
            dropped = before_dedup - records.len(),
            "Dropped printings with duplicate collector numbers"
        );
    }

    let cards: Vec<Card> = records
        .into_iter()
        .enumerate()
        .map(|(index, record)| normalize(record, index as u32 + 1))
        .collect();

    info!(fetched, kept = cards.len(), "Prepared cards");
    cards
}

pub async fn build_card_set<T: PageTransport>(
    client: &CatalogClient<T>,
    policy: &VariantPolicy,
    set_code: &str,
) -> Result<CardSet, CatalogError> {
    let start = Instant::now();

    let records = client.fetch(set_code).await?;
    let cards = prepare_cards(records, policy);

    let set_code = set_code.to_uppercase();
    let set_name = cards
        .first()
        .map(|card| card.set_name.clone())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| set_code.clone());

    info!("Loaded {} cards for {} ({:.1}s)", cards.len(), set_code, start.elapsed().as_secs_f32());
    Ok(CardSet { set_code, set_name, cards })
}
