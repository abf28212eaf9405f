use std::collections::{
    BTreeMap,
    HashMap,
};

use super::layout::{
    self,
    SlotAddress,
};
use crate::core::{
    BinderError,
    Card,
};

/// Which card sits in which slot, plus the cards of the loaded set.
///
/// Slots are sparse: an address with no entry is empty, and addresses past the
/// last loaded card are valid and always start out empty.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BinderStore {
    slots: HashMap<SlotAddress, u32>,
    cards: Vec<Card>,
    by_id: HashMap<u32, usize>, // Card id -> index into `cards`
}

impl BinderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding `cards`, each placed at the slot its position maps to.
    pub fn populated(cards: Vec<Card>) -> Self {
        let mut store = Self::new();
        store.populate(cards);
        store
    }

    /// Replaces the card set and every slot assignment.
    pub fn populate(&mut self, cards: Vec<Card>) {
        self.by_id = cards.iter().enumerate().map(|(index, card)| (card.id, index)).collect();
        self.slots = cards
            .iter()
            .enumerate()
            .map(|(index, card)| (SlotAddress::from_index(index), card.id))
            .collect();
        self.cards = cards;
    }

    /// Puts `card_id` at `address`, replacing whatever was there.
    pub fn set(&mut self, address: SlotAddress, card_id: u32) -> Result<(), BinderError> {
        if !self.by_id.contains_key(&card_id) {
            return Err(BinderError::UnknownCard(card_id));
        }
        self.slots.insert(address, card_id);
        Ok(())
    }

    /// Empties `address`, returning the id that was there.
    pub fn remove(&mut self, address: SlotAddress) -> Option<u32> {
        self.slots.remove(&address)
    }

    pub fn get(&self, address: SlotAddress) -> Option<&Card> {
        self.slots.get(&address).and_then(|id| self.card(*id))
    }

    pub fn card(&self, card_id: u32) -> Option<&Card> {
        self.by_id.get(&card_id).map(|&index| &self.cards[index])
    }

    /// Cards in sorted order.
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    pub fn card_count(&self) -> usize {
        self.cards.len()
    }

    pub fn occupied_slots(&self) -> usize {
        self.slots.len()
    }

    /// Page count for navigation, derived from the card count alone.
    pub fn total_pages(&self) -> usize {
        layout::total_pages(self.cards.len())
    }

    /// The 18 slots of `page_index`, left side first.
    pub fn page(&self, page_index: usize) -> Vec<(SlotAddress, Option<&Card>)> {
        layout::page_addresses(page_index).map(|address| (address, self.get(address))).collect()
    }

    pub fn find_cards(&self, query: &str) -> Vec<&Card> {
        self.cards.iter().filter(|card| card.matches_search(query)).collect()
    }

    /// Number of cards per rarity letter.
    pub fn rarity_counts(&self) -> BTreeMap<char, usize> {
        let mut counts = BTreeMap::new();
        for card in &self.cards {
            *counts.entry(card.rarity).or_insert(0) += 1;
        }
        counts
    }
}
