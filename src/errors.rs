//! Daemon Event Monitoring Error Hierarchy
//!
//! Defines the error types for one monitor session, categorized by the
//! phase in which they occur: subscribing to the daemon stream, or
//! decoding records off an established stream.

use config::ConfigError;

#[doc(hidden)]
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The stream source could not be opened (daemon unreachable, auth
    /// rejected). Retry policy is a caller concern.
    #[error(transparent)]
    Subscribe(#[from] SubscribeError),

    /// A record on the stream could not be parsed. Fatal to the session;
    /// no resynchronization is attempted.
    #[error(transparent)]
    Decode(#[from] DecodeError),

    /// Monitor configuration validation failures
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// The dispatch side of the event channel is gone. Internal signal,
    /// treated as a clean stop by the supervisor.
    #[doc(hidden)]
    #[error("event dispatch stopped")]
    DispatchStopped,

    /// Unrecoverable failures requiring session termination
    #[error("Fatal error: {0}")]
    Fatal(String),
}

#[derive(Debug, thiserror::Error)]
pub enum SubscribeError {
    /// Daemon endpoint unavailable
    #[error("daemon unreachable: {0}")]
    Unreachable(String),

    /// Daemon refused the subscription (e.g. auth failure)
    #[error("subscription rejected: {0}")]
    Rejected(String),

    /// Transport-level I/O failure while opening the stream
    #[error("subscribe I/O failure")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// Framing or JSON parse failure for one record
    #[error("malformed event record: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The underlying stream failed mid-read
    #[error("event stream read failed")]
    Read(#[from] std::io::Error),
}
