pub mod controller;
pub mod fallback;
pub mod layout;
pub mod store;

pub use controller::{
    Binder,
    BinderState,
    LoadFailure,
    LoadStatus,
    Recovery,
};
pub use layout::{
    total_pages,
    Side,
    SlotAddress,
    PAGE_CAPACITY,
};
pub use store::BinderStore;
