#[derive(Debug, thiserror::Error)]
pub enum SnapshotError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Provider error: {0}")]
    Provider(String),

    #[error("Symbol missing from provider response: {0}")]
    MissingSymbol(String),

    #[error("Previous close for {symbol} on {date} is zero; percent change is undefined")]
    ZeroPreviousClose { symbol: String, date: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

pub type Result<T> = std::result::Result<T, SnapshotError>;
