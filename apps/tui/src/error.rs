use thiserror::Error;

/// Failures surfaced by the catalog, the forecast endpoint and the store.
///
/// None of these are fatal: each is caught where it happens and rendered
/// into the pane that triggered it.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("area data unavailable: {0}")]
    DataUnavailable(String),

    #[error("malformed area data: {0}")]
    MalformedData(#[source] serde_json::Error),

    #[error("forecast fetch failed: {0}")]
    FetchFailed(String),

    #[error("malformed forecast response: {0}")]
    MalformedResponse(String),

    #[error("failed to persist forecast: {0}")]
    PersistenceFailed(#[from] sqlx::Error),
}

impl AppError {
    /// Message shown in the UI pane that owns the failing operation.
    pub fn user_message(&self) -> String {
        match self {
            Self::DataUnavailable(cause) => format!("Could not read the region list: {cause}"),
            Self::MalformedData(cause) => format!("The region list is not valid JSON: {cause}"),
            Self::FetchFailed(cause) => format!("Failed to fetch weather information: {cause}"),
            Self::MalformedResponse(cause) => {
                format!("The forecast response could not be read: {cause}")
            }
            Self::PersistenceFailed(cause) => format!("Forecast shown but not saved: {cause}"),
        }
    }
}
