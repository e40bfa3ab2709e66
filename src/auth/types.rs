//! Types for SIWS authentication.

use serde::{Deserialize, Serialize};

use crate::auth::statement::ParsedStatement;

/// Transport envelope carried in the `x-siws-auth` header, base64-encoded.
///
/// `message` is the canonical SIWS text the wallet signed; `signature` is the
/// hex-encoded sr25519 signature over it; `address` is the ss58 address the
/// caller claims to control.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SignedEnvelope {
    pub message: String,
    pub signature: String,
    pub address: String,
}

/// Structured fields recovered from a verified SIWS message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SiwsFields {
    /// Domain the message was issued for (first line of the message).
    pub domain: String,

    /// ss58 address embedded in the message body.
    pub address: String,

    /// Free-text action statement.
    pub statement: String,

    /// Nonce, when the message carries one. Recorded but not yet checked
    /// against a spent-nonce store.
    pub nonce: Option<String>,
}

/// An authenticated identity.
///
/// `address` is lower-cased here, at the single point where identities are
/// produced. Downstream comparisons rely on that and never re-normalize.
#[derive(Debug, Clone)]
pub struct AuthIdentity {
    pub address: String,
    pub statement: ParsedStatement,
}

/// Authorization result attached to a request for downstream use, e.g.
/// stamping milestone provenance.
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub address: String,
    pub is_admin: bool,
}
