use thiserror::Error;

/// Errors surfaced by [`SpeakerClient`](crate::SpeakerClient).
///
/// `InvalidArgument` is always raised before any I/O happens. The other
/// variants carry the endpoint so a caller juggling several speakers can
/// tell which request went wrong.
#[derive(Debug, Error)]
pub enum Error {
    /// Input rejected by client-side validation; no request was sent.
    #[error("invalid argument: {message}")]
    InvalidArgument { message: String },

    /// An action POST failed -- transport error or non-success response.
    #[error("command {endpoint} failed: {message}")]
    CommandFailed { endpoint: String, message: String },

    /// A status GET failed at the transport level.
    #[error("query {endpoint} failed: {message}")]
    QueryFailed { endpoint: String, message: String },

    /// The speaker answered, but the body did not match the expected shape.
    #[error("malformed response from {endpoint}: {message}")]
    Decode { endpoint: String, message: String },
}
