use thiserror::Error;

/// Errors returned by the marketplace API client.
#[derive(Debug, Error)]
pub enum ClientError {
    /// Network or TLS failure, or a non-success HTTP status.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A request URL could not be built from the base URL and path.
    #[error("invalid URL: {0}")]
    Url(String),

    /// The response body could not be deserialized into the expected type.
    #[error("JSON deserialization error for {context}: {source}")]
    Deserialize {
        context: String,
        #[source]
        source: serde_json::Error,
    },
}
