pub mod binder;
pub mod catalog;
pub mod core;
pub mod logging;
pub mod persistence;

pub use binder::{
    Binder,
    BinderState,
    LoadStatus,
    Side,
    SlotAddress,
};
pub use catalog::VariantPolicy;
pub use crate::core::{
    BinderConfig,
    BinderError,
    Card,
    CatalogError,
    LoadError,
};
