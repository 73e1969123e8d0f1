//! Remote lookup failures.

use thiserror::Error;

use super::wire::DecodeError;

/// A lookup against the backend did not produce a usable response.
#[derive(Debug, Error)]
pub enum RemoteError {
    /// Curl reported an error (DNS, connect, timeout, ...).
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: curl::Error,
    },
    /// Response had a non-2xx status. The body is not inspected.
    #[error("{url} returned HTTP {code}")]
    Status { url: String, code: u32 },
    /// 2xx response whose body is not the expected JSON shape.
    #[error("unexpected response from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: DecodeError,
    },
}
