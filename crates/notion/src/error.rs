//! Error types for Notion API operations.

use thiserror::Error;

/// Errors that can occur when talking to the Notion API.
#[derive(Debug, Error)]
pub enum NotionError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// API returned an error response.
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    /// The API key was rejected.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource does not exist or is not shared with the integration.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl NotionError {
    /// Remediation hint for errors the user can fix themselves.
    ///
    /// Unauthorized means a bad credential; not-found usually means the
    /// page or database was never shared with the integration.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Unauthorized(_) => {
                Some("Your API key may be invalid. Check the NOTION_API_KEY environment variable")
            }
            Self::NotFound(_) => {
                Some("The resource may not be shared with your integration. Go to Notion > Share > Invite your integration")
            }
            _ => None,
        }
    }
}
