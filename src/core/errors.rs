use thiserror::Error;

/// Failures raised while paging through the upstream catalog.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("HTTP error! status: {status}")]
    Http { status: u16 },

    #[error("Catalog API error: {details}")]
    Api { details: String },

    #[error("Request failed: {0}")]
    Transport(Box<reqwest::Error>),

    #[error("Malformed catalog response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Invalid catalog URL: {0}")]
    InvalidUrl(String),
}

impl From<reqwest::Error> for CatalogError {
    fn from(error: reqwest::Error) -> Self {
        CatalogError::Transport(Box::new(error))
    }
}

/// Errors returned by `Binder::load_set`.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("Set code must not be empty")]
    InvalidSetCode,

    #[error("A set load is already in progress")]
    LoadInProgress,
}

#[derive(Error, Debug)]
pub enum BinderError {
    #[error("I/O error: {0}")]
    Io(Box<std::io::Error>),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Regex error: {0}")]
    Regex(#[from] regex::Error),

    #[error("HTTP client build failed: {0}")]
    ClientBuild(Box<reqwest::Error>),

    #[error("Slot index {0} is outside 0..=8")]
    SlotOutOfRange(usize),

    #[error("Card id {0} is not part of the loaded set")]
    UnknownCard(u32),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl From<std::io::Error> for BinderError {
    fn from(error: std::io::Error) -> Self {
        BinderError::Io(Box::new(error))
    }
}

/// Coarse classification of a failed load, kept in the binder state so a
/// presentation layer can render a diagnostic without holding the error itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Http,
    Api,
    Transport,
    Decode,
    InvalidUrl,
}

impl CatalogError {
    pub fn kind(&self) -> FailureKind {
        match self {
            CatalogError::Http { .. } => FailureKind::Http,
            CatalogError::Api { .. } => FailureKind::Api,
            CatalogError::Transport(_) => FailureKind::Transport,
            CatalogError::Decode(_) => FailureKind::Decode,
            CatalogError::InvalidUrl(_) => FailureKind::InvalidUrl,
        }
    }
}
