use thiserror::Error;

/// Errors from [`crate::routing::RouteProvider::route`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RoutingError {
    /// The request did not complete within the configured timeout.
    #[error("request to {url} timed out after {timeout_secs}s")]
    Timeout {
        /// Requested URL.
        url: String,
        /// Timeout applied to the request.
        timeout_secs: u64,
    },
    /// The routing service answered with a non-success HTTP status.
    #[error("request to {url} failed with HTTP {status}: {message}")]
    HttpError {
        /// Requested URL.
        url: String,
        /// HTTP status code.
        status: u16,
        /// Error detail from the client or response body.
        message: String,
    },
    /// The request could not be sent or the connection failed.
    #[error("request to {url} failed: {message}")]
    NetworkError {
        /// Requested URL.
        url: String,
        /// Error detail from the client.
        message: String,
    },
    /// The response body did not have the expected shape.
    #[error("failed to parse routing response: {message}")]
    ParseError {
        /// Description of the parse failure.
        message: String,
    },
    /// The routing service reported an error in its response body.
    #[error("routing service error {code}: {message}")]
    ServiceError {
        /// Service-specific error code.
        code: String,
        /// Service-provided description.
        message: String,
    },
    /// The service found no route between the two points.
    #[error("no route found")]
    NoRoute,
}
