//! Mapping between a card's position in the sorted set and its place in the binder.
//!
//! A binder page holds 18 cards: nine on the left side followed by nine on the
//! right. Positions fill left before right, then move on to the next page.

use std::fmt;

use serde::{
    Deserialize,
    Serialize,
};

use crate::core::BinderError;

pub const SLOTS_PER_SIDE: usize = 9;
pub const PAGE_CAPACITY: usize = SLOTS_PER_SIDE * 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Left,
    Right,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Left => f.pad("left"),
            Side::Right => f.pad("right"),
        }
    }
}

/// Deserialization goes through `SlotAddress::new`, so a stored address can
/// never carry a slot index outside the side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "RawSlotAddress")]
pub struct SlotAddress {
    page_index: usize,
    slot_index: usize,
    side: Side,
}

impl SlotAddress {
    pub fn new(page_index: usize, slot_index: usize, side: Side) -> Result<Self, BinderError> {
        if slot_index >= SLOTS_PER_SIDE {
            return Err(BinderError::SlotOutOfRange(slot_index));
        }
        Ok(Self { page_index, slot_index, side })
    }

    /// Address of the card at `index` in the sorted set.
    pub fn from_index(index: usize) -> Self {
        let offset = index % PAGE_CAPACITY;
        let side = if offset < SLOTS_PER_SIDE { Side::Left } else { Side::Right };
        Self { page_index: index / PAGE_CAPACITY, slot_index: offset % SLOTS_PER_SIDE, side }
    }

    /// Position in the sorted set, `None` for pages too far out to be numbered.
    pub fn to_index(&self) -> Option<usize> {
        let offset = match self.side {
            Side::Left => self.slot_index,
            Side::Right => self.slot_index + SLOTS_PER_SIDE,
        };
        self.page_index.checked_mul(PAGE_CAPACITY)?.checked_add(offset)
    }

    pub fn page_index(&self) -> usize {
        self.page_index
    }

    pub fn slot_index(&self) -> usize {
        self.slot_index
    }

    pub fn side(&self) -> Side {
        self.side
    }
}

#[derive(Deserialize)]
struct RawSlotAddress {
    page_index: usize,
    slot_index: usize,
    side: Side,
}

impl TryFrom<RawSlotAddress> for SlotAddress {
    type Error = BinderError;

    fn try_from(raw: RawSlotAddress) -> Result<Self, Self::Error> {
        SlotAddress::new(raw.page_index, raw.slot_index, raw.side)
    }
}

impl fmt::Display for SlotAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}-{}", self.page_index, self.slot_index, self.side)
    }
}

/// Every address on `page_index`, left side first.
pub fn page_addresses(page_index: usize) -> impl Iterator<Item = SlotAddress> {
    [Side::Left, Side::Right].into_iter().flat_map(move |side| {
        (0..SLOTS_PER_SIDE).map(move |slot_index| SlotAddress { page_index, slot_index, side })
    })
}

pub fn total_pages(card_count: usize) -> usize {
    card_count.div_ceil(PAGE_CAPACITY)
}
