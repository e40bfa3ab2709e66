//! Shared fixtures for the integration tests: deterministic wallets, signed
//! auth headers, and an app wired to an in-memory store.
#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use http_body_util::BodyExt;
use schnorrkel::{ExpansionMode, Keypair, MiniSecretKey};
use serde_json::Value;
use tower::ServiceExt;

use stadium::api::{self, AppState};
use stadium::auth::{ss58, AccessGuard, AuthorizationPolicy, SiwsAuthenticator, Sr25519Verifier};
use stadium::store::memory::MemoryProjectStore;

pub const TEST_DOMAIN: &str = "localhost";

/// A wallet with a deterministic sr25519 keypair.
pub struct TestWallet {
    keypair: Keypair,
    pub address: String,
}

impl TestWallet {
    pub fn new(seed: u8) -> Self {
        let keypair = MiniSecretKey::from_bytes(&[seed; 32])
            .expect("static seed")
            .expand_to_keypair(ExpansionMode::Ed25519);
        let address = ss58::encode(&keypair.public.to_bytes(), 42);
        Self { keypair, address }
    }

    /// The canonical (lower-cased) identity the service derives for us.
    pub fn canonical_address(&self) -> String {
        self.address.to_lowercase()
    }

    pub fn siws_message(&self, domain: &str, statement: &str) -> String {
        format!(
            "{} wants you to sign in with your Substrate account:\n{}\n\n{}\n\nURI: https://{}\nVersion: 1.0.0\nNonce: 6f2c1d\nIssued At: 2026-08-01T12:00:00Z",
            domain, self.address, statement, domain
        )
    }

    pub fn sign(&self, message: &str) -> String {
        let context = schnorrkel::signing_context(b"substrate");
        let wrapped = format!("<Bytes>{}</Bytes>", message);
        let signature = self.keypair.sign(context.bytes(wrapped.as_bytes()));
        format!("0x{}", hex::encode(signature.to_bytes()))
    }

    /// A complete `x-siws-auth` header value for the given statement.
    pub fn auth_header(&self, statement: &str) -> String {
        self.auth_header_for_domain(TEST_DOMAIN, statement)
    }

    pub fn auth_header_for_domain(&self, domain: &str, statement: &str) -> String {
        let message = self.siws_message(domain, statement);
        let envelope = serde_json::json!({
            "message": message,
            "signature": self.sign(&message),
            "address": self.address,
        });
        BASE64.encode(envelope.to_string())
    }
}

/// Build the app against a fresh in-memory store.
pub fn test_app(admins: &[&TestWallet]) -> (Router, Arc<MemoryProjectStore>) {
    let store = Arc::new(MemoryProjectStore::new());
    let policy = AuthorizationPolicy::new(admins.iter().map(|w| w.address.as_str()));
    let authenticator = SiwsAuthenticator::new(TEST_DOMAIN, Arc::new(Sr25519Verifier::new()));
    let guard = Arc::new(AccessGuard::new(authenticator, policy));
    let app = api::router(AppState {
        guard,
        store: store.clone(),
    });
    (app, store)
}

/// Fire one request and decode the JSON response.
pub async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    auth: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(header) = auth {
        builder = builder.header("x-siws-auth", header);
    }
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, json)
}

/// A minimal valid creation body for a project with one wallet-bearing
/// team member.
pub fn create_body(name: &str, member: &TestWallet) -> Value {
    serde_json::json!({
        "projectName": name,
        "description": "Built in a weekend",
        "teamMembers": [
            { "name": "ada", "walletAddress": member.address },
            { "name": "bob" }
        ],
        "hackathon": {
            "id": "hackathon-2026",
            "name": "Stadium Hackathon 2026",
            "endDate": "2026-06-30T00:00:00Z"
        },
        "techStack": ["rust", "substrate"],
        "categories": ["DeFi"]
    })
}
