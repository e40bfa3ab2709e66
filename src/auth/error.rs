//! Error types for SIWS authentication and authorization.

use thiserror::Error;

/// Errors that can occur while authenticating or authorizing a write.
///
/// All variants are terminal for the request that produced them; nothing
/// here is retried. Every variant except `Internal` describes a condition
/// the caller can correct and is safe to report verbatim.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Missing SIWS auth header")]
    HeaderMissing,

    #[error("Malformed SIWS payload: {0}")]
    PayloadMalformed(String),

    #[error("SIWS signature verification failed: {0}")]
    SignatureInvalid(String),

    #[error("Invalid statement in SIWS message: {statement:?}")]
    StatementInvalid { statement: String },

    #[error("Invalid domain: expected {expected:?}, received {received:?}")]
    DomainInvalid { expected: String, received: String },

    #[error("User is not authorized to perform this action")]
    NotAuthorized,

    #[error("Project not found")]
    ProjectNotFound,

    #[error("Authorization check failed: {0}")]
    Internal(String),
}

/// Errors from decoding an ss58-encoded address.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum Ss58Error {
    #[error("Address is not valid base58")]
    BadBase58,

    #[error("Address has unexpected length {0}")]
    BadLength(usize),

    #[error("Address checksum mismatch")]
    BadChecksum,
}
