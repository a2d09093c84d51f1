//! Top-level error type for the BAOS client

/// Errors occurring while talking to the gateway.
///
/// Every variant that belongs to a remote call carries the service query
/// (path and query string, relative to the gateway base URL) that
/// triggered it.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The request could not be sent, or the response body could not be
    /// read.
    #[error("http request for {1} failed: {0}")]
    Request(#[source] reqwest::Error, String),

    /// The gateway answered with 401.
    #[error("authorisation required for {0}")]
    Unauthorized(String),

    /// The response body is not a valid envelope.
    #[error("could not decode the response envelope for {1}: {0}")]
    DecodeEnvelope(#[source] serde_json::Error, String),

    /// The envelope decoded fine but reports `Result: false`.
    #[error("{query}: BAOS error in {service}: {error}")]
    Remote {
        /// The query that was rejected.
        query: String,
        /// The service name reported by the gateway.
        service: String,
        /// The error text reported by the gateway.
        error: String,
    },

    /// The envelope's `Data` does not match the expected record shape.
    #[error("could not decode the data of the response for {1}: {0}")]
    DecodePayload(#[source] serde_json::Error, String),

    /// The gateway returned a different number of records than the run
    /// asked for.
    #[error("{query}: expected {expected} records, got {actual}")]
    RecordCountMismatch {
        /// The query for the run.
        query: String,
        /// The length of the run.
        expected: usize,
        /// The number of records in the response.
        actual: usize,
    },

    /// The base URL, or the base URL joined with a service query, is not a
    /// valid URL.
    #[error("invalid gateway url {1}: {0}")]
    InvalidUrl(#[source] url::ParseError, String),

    /// The base URL cannot be used as a base for service paths.
    #[error("gateway url cannot be a base: {0}")]
    CannotBeABase(url::Url),

    /// Could not build the underlying HTTP client.
    #[error("could not build the http client: {0}")]
    HttpClientBuild(#[source] reqwest::Error),
}

impl Error {
    /// The error text reported by the gateway, if this error came from an
    /// envelope with `Result: false`.
    pub fn remote_error(&self) -> Option<&str> {
        match self {
            Error::Remote { error, .. } => Some(error),
            _ => None,
        }
    }

    /// The service query that triggered this error, if any.
    pub fn query(&self) -> Option<&str> {
        match self {
            Error::Request(_, query)
            | Error::Unauthorized(query)
            | Error::DecodeEnvelope(_, query)
            | Error::DecodePayload(_, query)
            | Error::Remote { query, .. }
            | Error::RecordCountMismatch { query, .. } => Some(query),
            Error::InvalidUrl(..) | Error::CannotBeABase(_) | Error::HttpClientBuild(_) => None,
        }
    }
}
