//! SIWS message verification against the sr25519 signature scheme.
//!
//! The cryptography itself is delegated to `schnorrkel`; this module only
//! orchestrates it: decode the claimed address, check the signature over the
//! signed text (both the raw form and the `<Bytes>`-wrapped form produced by
//! polkadot-js `signRaw`), and recover the structured SIWS fields from the
//! message body.

use schnorrkel::{PublicKey, Signature};

use crate::auth::error::AuthError;
use crate::auth::ss58;
use crate::auth::types::SiwsFields;

/// Signing context used by Substrate wallets for raw payloads.
const SIGNING_CONTEXT: &[u8] = b"substrate";

/// Marker in the first line of every SIWS message.
const SIGN_IN_MARKER: &str = " wants you to sign in with your Substrate account:";

/// Field prefixes that terminate the statement block of a SIWS message.
const FIELD_PREFIXES: &[&str] = &[
    "URI:",
    "Version:",
    "Chain ID:",
    "Nonce:",
    "Issued At:",
    "Expiration Time:",
    "Not Before:",
    "Request ID:",
    "Resources:",
];

/// Fixed-contract collaborator that verifies a signed message for a claimed
/// address and returns the message's structured fields.
///
/// Abstracted behind a trait so the authenticator can be exercised in tests
/// without real key material.
pub trait MessageVerifier: Send + Sync {
    fn verify(
        &self,
        message: &str,
        signature: &str,
        address: &str,
    ) -> Result<SiwsFields, AuthError>;
}

/// Production verifier backed by schnorrkel sr25519 verification.
#[derive(Debug, Default)]
pub struct Sr25519Verifier;

impl Sr25519Verifier {
    pub fn new() -> Self {
        Self {}
    }
}

impl MessageVerifier for Sr25519Verifier {
    fn verify(
        &self,
        message: &str,
        signature: &str,
        address: &str,
    ) -> Result<SiwsFields, AuthError> {
        let key_bytes = ss58::decode(address)
            .map_err(|e| AuthError::SignatureInvalid(format!("invalid signer address: {}", e)))?;
        let public_key = PublicKey::from_bytes(&key_bytes)
            .map_err(|_| AuthError::SignatureInvalid("invalid sr25519 public key".to_string()))?;

        let sig_hex = signature.strip_prefix("0x").unwrap_or(signature);
        let sig_bytes = hex::decode(sig_hex)
            .map_err(|_| AuthError::SignatureInvalid("signature is not valid hex".to_string()))?;
        let sig = Signature::from_bytes(&sig_bytes)
            .map_err(|_| AuthError::SignatureInvalid("malformed sr25519 signature".to_string()))?;

        let context = schnorrkel::signing_context(SIGNING_CONTEXT);

        // Wallets sign either the raw message or the <Bytes>-wrapped form.
        let wrapped = format!("<Bytes>{}</Bytes>", message);
        let verified = public_key
            .verify(context.bytes(wrapped.as_bytes()), &sig)
            .or_else(|_| public_key.verify(context.bytes(message.as_bytes()), &sig))
            .is_ok();
        if !verified {
            return Err(AuthError::SignatureInvalid(
                "signature does not match the claimed address".to_string(),
            ));
        }

        let fields = parse_siws_message(message)?;
        if fields.address != address {
            return Err(AuthError::SignatureInvalid(
                "message address does not match the signer".to_string(),
            ));
        }

        Ok(fields)
    }
}

/// Recover the structured fields from the canonical SIWS message text.
///
/// Expected shape:
///
/// ```text
/// {domain} wants you to sign in with your Substrate account:
/// {address}
///
/// {statement}
///
/// URI: ...
/// Nonce: ...
/// Issued At: ...
/// ```
pub fn parse_siws_message(message: &str) -> Result<SiwsFields, AuthError> {
    let mut lines = message.lines();

    let first = lines
        .next()
        .ok_or_else(|| AuthError::PayloadMalformed("empty SIWS message".to_string()))?;
    let domain = first
        .strip_suffix(SIGN_IN_MARKER)
        .ok_or_else(|| {
            AuthError::PayloadMalformed("SIWS message missing sign-in preamble".to_string())
        })?
        .trim()
        .to_string();

    let address = lines
        .next()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .ok_or_else(|| {
            AuthError::PayloadMalformed("SIWS message missing account address".to_string())
        })?
        .to_string();

    let mut statement = String::new();
    let mut nonce = None;
    for line in lines {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }
        if let Some(value) = trimmed.strip_prefix("Nonce:") {
            nonce = Some(value.trim().to_string());
            continue;
        }
        if FIELD_PREFIXES.iter().any(|p| trimmed.starts_with(p)) {
            continue;
        }
        if statement.is_empty() {
            statement = trimmed.to_string();
        }
    }

    if statement.is_empty() {
        return Err(AuthError::PayloadMalformed(
            "SIWS message missing statement".to_string(),
        ));
    }

    Ok(SiwsFields {
        domain,
        address,
        statement,
        nonce,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use schnorrkel::{ExpansionMode, Keypair, MiniSecretKey};

    fn test_keypair(seed: u8) -> Keypair {
        MiniSecretKey::from_bytes(&[seed; 32])
            .unwrap()
            .expand_to_keypair(ExpansionMode::Ed25519)
    }

    fn siws_message(domain: &str, address: &str, statement: &str) -> String {
        format!(
            "{}{}\n{}\n\n{}\n\nURI: https://{}\nVersion: 1.0.0\nNonce: 7f3b2a\nIssued At: 2026-08-01T12:00:00Z",
            domain, SIGN_IN_MARKER, address, statement, domain
        )
    }

    fn sign(keypair: &Keypair, message: &str) -> String {
        let context = schnorrkel::signing_context(SIGNING_CONTEXT);
        let wrapped = format!("<Bytes>{}</Bytes>", message);
        let sig = keypair.sign(context.bytes(wrapped.as_bytes()));
        format!("0x{}", hex::encode(sig.to_bytes()))
    }

    #[test]
    fn verifies_wrapped_signature_and_returns_fields() {
        let keypair = test_keypair(1);
        let address = ss58::encode(&keypair.public.to_bytes(), 42);
        let message = siws_message("localhost", &address, "Sign in to Stadium");
        let signature = sign(&keypair, &message);

        let fields = Sr25519Verifier::new()
            .verify(&message, &signature, &address)
            .unwrap();
        assert_eq!(fields.domain, "localhost");
        assert_eq!(fields.address, address);
        assert_eq!(fields.statement, "Sign in to Stadium");
        assert_eq!(fields.nonce.as_deref(), Some("7f3b2a"));
    }

    #[test]
    fn rejects_signature_from_another_key() {
        let signer = test_keypair(1);
        let claimed = test_keypair(2);
        let address = ss58::encode(&claimed.public.to_bytes(), 42);
        let message = siws_message("localhost", &address, "Sign in to Stadium");
        let signature = sign(&signer, &message);

        let err = Sr25519Verifier::new()
            .verify(&message, &signature, &address)
            .unwrap_err();
        assert!(matches!(err, AuthError::SignatureInvalid(_)));
    }

    #[test]
    fn rejects_message_signed_for_different_address() {
        let keypair = test_keypair(1);
        let address = ss58::encode(&keypair.public.to_bytes(), 42);
        let other = ss58::encode(&test_keypair(3).public.to_bytes(), 42);
        // Message body names a different account than the signer.
        let message = siws_message("localhost", &other, "Sign in to Stadium");
        let signature = sign(&keypair, &message);

        let err = Sr25519Verifier::new()
            .verify(&message, &signature, &address)
            .unwrap_err();
        assert!(matches!(err, AuthError::SignatureInvalid(_)));
    }

    #[test]
    fn parses_statement_between_field_lines() {
        let fields = parse_siws_message(
            "stadium.example wants you to sign in with your Substrate account:\n5Fa1...\n\nUpdate project details for Orbital on Stadium\n\nURI: https://stadium.example\nNonce: abc123",
        )
        .unwrap();
        assert_eq!(fields.domain, "stadium.example");
        assert_eq!(
            fields.statement,
            "Update project details for Orbital on Stadium"
        );
        assert_eq!(fields.nonce.as_deref(), Some("abc123"));
    }

    #[test]
    fn rejects_message_without_statement() {
        let err = parse_siws_message(
            "localhost wants you to sign in with your Substrate account:\n5Fa1...\n\nURI: https://localhost",
        )
        .unwrap_err();
        assert!(matches!(err, AuthError::PayloadMalformed(_)));
    }
}
