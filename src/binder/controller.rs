use std::{
    collections::BTreeMap,
    sync::atomic::{
        AtomicBool,
        Ordering,
    },
};

use tokio::sync::watch;
use tracing::{
    info,
    warn,
};

use super::{
    fallback::{
        fallback_cards,
        FALLBACK_SET_NAME,
    },
    layout::{
        Side,
        SlotAddress,
    },
    store::BinderStore,
};
use crate::{
    catalog::{
        CatalogClient,
        HttpTransport,
        PageTransport,
        VariantPolicy,
    },
    core::{
        pipeline::build_card_set,
        BinderConfig,
        BinderError,
        Card,
        CardSet,
        FailureKind,
        LoadError,
    },
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadFailure {
    pub kind: FailureKind,
    pub message: String,
}

/// What a failed load left on display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recovery {
    /// The last successfully loaded set is still shown.
    KeptPrevious,
    /// Nothing had loaded yet, so the sample cards were installed.
    Fallback,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadStatus {
    Idle,
    Loading { set_code: String },
    Ready,
    Failed { failure: LoadFailure, recovery: Recovery },
}

/// Everything a presentation layer needs, published as one value.
#[derive(Debug, Clone, PartialEq)]
pub struct BinderState {
    pub status: LoadStatus,
    pub set_code: String,
    pub set_name: String,
    pub store: BinderStore,
    pub current_page: usize,
    has_loaded: bool, // A real set has been installed at least once
}

impl Default for BinderState {
    fn default() -> Self {
        Self {
            status: LoadStatus::Idle,
            set_code: String::new(),
            set_name: String::new(),
            store: BinderStore::new(),
            current_page: 0,
            has_loaded: false,
        }
    }
}

impl BinderState {
    pub fn is_loading(&self) -> bool {
        matches!(self.status, LoadStatus::Loading { .. })
    }

    pub fn cards(&self) -> &[Card] {
        self.store.cards()
    }

    pub fn total_pages(&self) -> usize {
        self.store.total_pages()
    }

    pub fn get_slot(&self, page_index: usize, slot_index: usize, side: Side) -> Option<&Card> {
        let address = SlotAddress::new(page_index, slot_index, side).ok()?;
        self.store.get(address)
    }

    pub fn find_cards(&self, query: &str) -> Vec<&Card> {
        self.store.find_cards(query)
    }

    pub fn rarity_counts(&self) -> BTreeMap<char, usize> {
        self.store.rarity_counts()
    }

    fn install(&mut self, set: CardSet) {
        self.store.populate(set.cards);
        self.set_code = set.set_code;
        self.set_name = set.set_name;
        self.current_page = 0;
        self.has_loaded = true;
        self.status = LoadStatus::Ready;
    }

    fn fail(&mut self, set_code: &str, failure: LoadFailure) -> Recovery {
        let recovery = if self.has_loaded {
            Recovery::KeptPrevious
        } else {
            self.store.populate(fallback_cards());
            self.set_code = set_code.to_uppercase();
            self.set_name = FALLBACK_SET_NAME.to_string();
            self.current_page = 0;
            Recovery::Fallback
        };
        self.status = LoadStatus::Failed { failure, recovery };
        recovery
    }
}

/// Owns the binder state and is the only way to change it.
///
/// Loads are single-flight: a `load_set` issued while another is running is
/// rejected with `LoadError::LoadInProgress` rather than racing it. Slot edits
/// are synchronous and apply to the current state immediately.
pub struct Binder<T> {
    client: CatalogClient<T>,
    policy: VariantPolicy,
    state: watch::Sender<BinderState>,
    in_flight: AtomicBool,
}

impl Binder<HttpTransport> {
    pub fn from_config(config: &BinderConfig) -> Result<Self, BinderError> {
        Ok(Self::new(CatalogClient::from_config(config)?, config.variant_policy()?))
    }
}

impl<T: PageTransport> Binder<T> {
    pub fn new(client: CatalogClient<T>, policy: VariantPolicy) -> Self {
        let (state, _) = watch::channel(BinderState::default());
        Self { client, policy, state, in_flight: AtomicBool::new(false) }
    }

    /// Fetches `set_code` and replaces the whole card set and layout.
    ///
    /// Returns the number of cards installed; an empty set is a success. On
    /// failure the previous set is kept, or the sample cards are installed if
    /// nothing has loaded yet, and the error is returned.
    pub async fn load_set(&self, set_code: &str) -> Result<usize, LoadError> {
        let set_code = set_code.trim();
        if set_code.is_empty() {
            return Err(LoadError::InvalidSetCode);
        }

        let _guard = LoadGuard::acquire(&self.in_flight, &self.state, set_code)
            .ok_or(LoadError::LoadInProgress)?;

        match build_card_set(&self.client, &self.policy, set_code).await {
            Ok(set) => {
                let count = set.cards.len();
                info!(set_code = %set.set_code, set_name = %set.set_name, count, "Set installed");
                self.state.send_modify(|state| state.install(set));
                Ok(count)
            }
            Err(e) => {
                let failure = LoadFailure { kind: e.kind(), message: e.to_string() };
                let mut recovery = Recovery::KeptPrevious;
                self.state.send_modify(|state| recovery = state.fail(set_code, failure));
                match recovery {
                    Recovery::KeptPrevious => {
                        warn!("Failed to load {}: {}. Keeping the previous set.", set_code, e)
                    }
                    Recovery::Fallback => {
                        warn!("Failed to load {}: {}. Showing sample cards.", set_code, e)
                    }
                }
                Err(e.into())
            }
        }
    }

    pub fn set_slot(
        &self,
        page_index: usize,
        slot_index: usize,
        side: Side,
        card_id: u32,
    ) -> Result<(), BinderError> {
        let address = SlotAddress::new(page_index, slot_index, side)?;
        let mut result = Ok(());
        self.state.send_if_modified(|state| match state.store.set(address, card_id) {
            Ok(()) => true,
            Err(e) => {
                result = Err(e);
                false
            }
        });
        result
    }

    /// Empties a slot, returning the id that was there. Clearing an empty slot is not an error.
    pub fn clear_slot(
        &self,
        page_index: usize,
        slot_index: usize,
        side: Side,
    ) -> Result<Option<u32>, BinderError> {
        let address = SlotAddress::new(page_index, slot_index, side)?;
        let mut removed = None;
        self.state.send_if_modified(|state| {
            removed = state.store.remove(address);
            removed.is_some()
        });
        Ok(removed)
    }

    pub fn get_slot(&self, page_index: usize, slot_index: usize, side: Side) -> Option<Card> {
        self.state.borrow().get_slot(page_index, slot_index, side).cloned()
    }

    pub fn find_cards(&self, query: &str) -> Vec<Card> {
        self.state.borrow().find_cards(query).into_iter().cloned().collect()
    }

    /// Moves to `page_index`, clamped to the loaded pages. Returns the page shown.
    pub fn go_to_page(&self, page_index: usize) -> usize {
        let mut shown = 0;
        self.state.send_if_modified(|state| {
            let last = state.total_pages().saturating_sub(1);
            shown = page_index.min(last);
            let changed = state.current_page != shown;
            state.current_page = shown;
            changed
        });
        shown
    }

    pub fn next_page(&self) -> usize {
        let current = self.state.borrow().current_page;
        self.go_to_page(current + 1)
    }

    pub fn prev_page(&self) -> usize {
        let current = self.state.borrow().current_page;
        self.go_to_page(current.saturating_sub(1))
    }

    pub fn snapshot(&self) -> BinderState {
        self.state.borrow().clone()
    }

    /// Receiver that is notified after every load transition and slot edit.
    pub fn subscribe(&self) -> watch::Receiver<BinderState> {
        self.state.subscribe()
    }
}

/// Holds the single-flight flag for one load.
///
/// If the load future is dropped before it finishes, the status it set to
/// `Loading` is rolled back so the state never stays stuck there.
struct LoadGuard<'a> {
    flag: &'a AtomicBool,
    state: &'a watch::Sender<BinderState>,
    previous: LoadStatus,
}

impl<'a> LoadGuard<'a> {
    fn acquire(
        flag: &'a AtomicBool,
        state: &'a watch::Sender<BinderState>,
        set_code: &str,
    ) -> Option<Self> {
        if flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire).is_err() {
            return None;
        }

        let mut previous = LoadStatus::Idle;
        state.send_modify(|state| {
            previous = std::mem::replace(
                &mut state.status,
                LoadStatus::Loading { set_code: set_code.to_uppercase() },
            );
        });
        Some(Self { flag, state, previous })
    }
}

impl Drop for LoadGuard<'_> {
    fn drop(&mut self) {
        let previous = std::mem::replace(&mut self.previous, LoadStatus::Idle);
        self.state.send_if_modified(|state| {
            if state.is_loading() {
                state.status = previous;
                true
            } else {
                false
            }
        });
        self.flag.store(false, Ordering::Release);
    }
}
