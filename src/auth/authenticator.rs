//! Header-to-identity authentication.

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use log::{debug, warn};

use crate::auth::error::AuthError;
use crate::auth::siws::MessageVerifier;
use crate::auth::statement::parse_statement;
use crate::auth::types::{AuthIdentity, SignedEnvelope};

/// Header carrying the base64-encoded signed envelope.
pub const SIWS_AUTH_HEADER: &str = "x-siws-auth";

/// Verifies a signed authorization payload into an [`AuthIdentity`].
///
/// Pure verification: no store access, no side effects. The produced
/// identity carries the address in canonical (lower-cased) form.
pub struct SiwsAuthenticator {
    expected_domain: String,
    verifier: Arc<dyn MessageVerifier>,
}

impl SiwsAuthenticator {
    pub fn new(expected_domain: impl Into<String>, verifier: Arc<dyn MessageVerifier>) -> Self {
        Self {
            expected_domain: expected_domain.into(),
            verifier,
        }
    }

    /// Authenticate the value of the `x-siws-auth` header.
    ///
    /// Steps, each failing closed: decode the transport envelope, verify the
    /// signature for the claimed address, check the domain, then parse the
    /// statement against the permitted vocabulary.
    pub fn authenticate(&self, header: Option<&str>) -> Result<AuthIdentity, AuthError> {
        let header = header.ok_or(AuthError::HeaderMissing)?;

        let envelope = decode_envelope(header)?;
        debug!("Verifying SIWS payload for address {}", envelope.address);

        let fields =
            self.verifier
                .verify(&envelope.message, &envelope.signature, &envelope.address)?;

        if fields.domain != self.expected_domain {
            warn!(
                "SIWS domain mismatch: expected {:?}, received {:?}",
                self.expected_domain, fields.domain
            );
            return Err(AuthError::DomainInvalid {
                expected: self.expected_domain.clone(),
                received: fields.domain,
            });
        }

        let statement = parse_statement(&fields.statement).ok_or_else(|| {
            warn!("Rejected SIWS statement {:?}", fields.statement);
            AuthError::StatementInvalid {
                statement: fields.statement.clone(),
            }
        })?;

        Ok(AuthIdentity {
            address: fields.address.to_lowercase(),
            statement,
        })
    }
}

fn decode_envelope(header: &str) -> Result<SignedEnvelope, AuthError> {
    let decoded = BASE64
        .decode(header)
        .map_err(|_| AuthError::PayloadMalformed("header is not valid base64".to_string()))?;
    let decoded = String::from_utf8(decoded)
        .map_err(|_| AuthError::PayloadMalformed("header is not valid UTF-8".to_string()))?;
    let envelope: SignedEnvelope = serde_json::from_str(&decoded)
        .map_err(|_| AuthError::PayloadMalformed("header is not a signed envelope".to_string()))?;

    if envelope.message.is_empty() || envelope.signature.is_empty() || envelope.address.is_empty() {
        return Err(AuthError::PayloadMalformed(
            "envelope is missing message, signature, or address".to_string(),
        ));
    }

    Ok(envelope)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::types::SiwsFields;

    /// Verifier that accepts everything and echoes canned fields.
    struct StubVerifier {
        domain: &'static str,
        statement: &'static str,
    }

    impl MessageVerifier for StubVerifier {
        fn verify(
            &self,
            _message: &str,
            _signature: &str,
            address: &str,
        ) -> Result<SiwsFields, AuthError> {
            Ok(SiwsFields {
                domain: self.domain.to_string(),
                address: address.to_string(),
                statement: self.statement.to_string(),
                nonce: None,
            })
        }
    }

    fn authenticator(domain: &'static str, statement: &'static str) -> SiwsAuthenticator {
        SiwsAuthenticator::new("localhost", Arc::new(StubVerifier { domain, statement }))
    }

    fn header_for(address: &str) -> String {
        let envelope = serde_json::json!({
            "message": "irrelevant for the stub",
            "signature": "0xdeadbeef",
            "address": address,
        });
        BASE64.encode(envelope.to_string())
    }

    #[test]
    fn missing_header_is_distinguished() {
        let auth = authenticator("localhost", "Sign in to Stadium");
        assert!(matches!(
            auth.authenticate(None),
            Err(AuthError::HeaderMissing)
        ));
    }

    #[test]
    fn bad_base64_is_malformed() {
        let auth = authenticator("localhost", "Sign in to Stadium");
        assert!(matches!(
            auth.authenticate(Some("%%%not-base64%%%")),
            Err(AuthError::PayloadMalformed(_))
        ));
    }

    #[test]
    fn incomplete_envelope_is_malformed() {
        let auth = authenticator("localhost", "Sign in to Stadium");
        let header = BASE64.encode(r#"{"message":"m","signature":"","address":"a"}"#);
        assert!(matches!(
            auth.authenticate(Some(&header)),
            Err(AuthError::PayloadMalformed(_))
        ));
    }

    #[test]
    fn domain_mismatch_is_rejected() {
        let auth = authenticator("evil.example", "Sign in to Stadium");
        let err = auth.authenticate(Some(&header_for("5FStadium"))).unwrap_err();
        assert!(matches!(err, AuthError::DomainInvalid { .. }));
    }

    #[test]
    fn unknown_statement_is_rejected() {
        let auth = authenticator("localhost", "Drain the treasury on Stadium");
        let err = auth.authenticate(Some(&header_for("5FStadium"))).unwrap_err();
        assert!(matches!(err, AuthError::StatementInvalid { .. }));
    }

    #[test]
    fn identity_address_is_lower_cased() {
        let auth = authenticator("localhost", "Sign in to Stadium");
        let identity = auth.authenticate(Some(&header_for("5FsTaDiUm"))).unwrap();
        assert_eq!(identity.address, "5fstadium");
    }
}
