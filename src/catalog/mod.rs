pub mod api;
pub mod filter;
pub mod normalize;
pub mod sort;

pub use api::{
    CatalogClient,
    HttpTransport,
    PageTransport,
    RawRecord,
    SearchEnvelope,
};
pub use filter::VariantPolicy;
pub use normalize::normalize;
pub use sort::sort_by_collector_number;
