//! Write authorization for the project registry.
//!
//! Every write request carries a base64-encoded SIWS envelope in the
//! `x-siws-auth` header. The modules here turn that opaque header into an
//! authorize-or-reject decision:
//!
//! ```text
//! ┌───────────────────┐     ┌─────────────────────┐     ┌──────────────┐
//! │ SiwsAuthenticator │────▶│ AuthorizationPolicy │────▶│ AccessGuard  │
//! │ (signature, domain│     │ (admin set + team   │     │ (per-request │
//! │  statement checks)│     │  membership)        │     │  gate)       │
//! └───────────────────┘     └─────────────────────┘     └──────────────┘
//!          │
//!          ▼
//! ┌───────────────────┐
//! │  MessageVerifier  │  sr25519 collaborator (schnorrkel)
//! └───────────────────┘
//! ```
//!
//! Authentication is pure verification with no store access; the policy
//! performs at most one lazy project read, and only for non-admin signers.
//! Addresses are lower-cased once, when the [`AuthIdentity`] is produced;
//! nothing downstream re-normalizes the identity side of a comparison.

pub mod authenticator;
pub mod error;
pub mod guard;
pub mod policy;
pub mod siws;
pub mod ss58;
pub mod statement;
pub mod types;

pub use authenticator::{SiwsAuthenticator, SIWS_AUTH_HEADER};
pub use error::AuthError;
pub use guard::AccessGuard;
pub use policy::AuthorizationPolicy;
pub use siws::{MessageVerifier, Sr25519Verifier};
pub use statement::{ParsedStatement, StatementAction};
pub use types::{AuthContext, AuthIdentity, SignedEnvelope, SiwsFields};
