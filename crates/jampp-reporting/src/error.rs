/// Errors returned by the reporting client
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The token endpoint could not be reached, rejected the credentials or
    /// issued an empty token
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The GraphQL endpoint could not be reached or answered with a
    /// non-success status
    #[error("API request failed: {0}")]
    ApiRequest(String),

    /// The underlying HTTP client could not be constructed
    #[error("Failed to build HTTP client: {0}")]
    HttpClient(#[source] reqwest::Error),
}
