pub mod config;
pub mod errors;
pub mod models;
pub mod pipeline;

pub use config::BinderConfig;
pub use errors::{
    BinderError,
    CatalogError,
    FailureKind,
    LoadError,
};
pub use models::{
    Card,
    CollectorNumbered,
};
pub use pipeline::CardSet;
