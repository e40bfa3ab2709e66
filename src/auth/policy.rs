//! Authorization decisions over authenticated identities.

use std::collections::HashSet;
use std::future::Future;

use log::{debug, info};

use crate::auth::error::AuthError;
use crate::auth::types::{AuthContext, AuthIdentity};
use crate::project::types::TeamMember;

/// Decides whether an authenticated identity may write to a project.
///
/// The administrative address set is injected at construction so tests can
/// substitute it freely; there is no process-global state. The policy never
/// verifies signatures — it consumes identities the authenticator already
/// produced.
pub struct AuthorizationPolicy {
    admin_wallets: HashSet<String>,
}

impl AuthorizationPolicy {
    /// Build a policy from administrative addresses. Addresses are
    /// lower-cased here once, matching the canonical identity form.
    pub fn new<I, S>(admins: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            admin_wallets: admins
                .into_iter()
                .map(|a| a.as_ref().trim().to_lowercase())
                .filter(|a| !a.is_empty())
                .collect(),
        }
    }

    /// Parse the `ADMIN_WALLETS` configuration form: a comma-separated list.
    pub fn from_comma_list(raw: &str) -> Self {
        Self::new(raw.split(','))
    }

    /// Whether a canonical (lower-cased) address is administrative.
    pub fn is_admin(&self, address: &str) -> bool {
        self.admin_wallets.contains(address)
    }

    /// Authorize a write that requires administrative privileges and no
    /// specific resource. Performs zero resource reads.
    pub fn authorize_admin(&self, identity: &AuthIdentity) -> Result<AuthContext, AuthError> {
        if self.is_admin(&identity.address) {
            info!("Admin {} authorized for {}", identity.address, identity.statement.action);
            return Ok(AuthContext {
                address: identity.address.clone(),
                is_admin: true,
            });
        }
        debug!("Address {} is not in the admin set", identity.address);
        Err(AuthError::NotAuthorized)
    }

    /// Authorize a write against a specific project.
    ///
    /// Admins are allowed unconditionally, without the resource ever being
    /// fetched. For anyone else `lookup` runs exactly once; a missing
    /// project is reported as such, distinct from an authorization failure.
    pub async fn authorize_for_project<F, Fut>(
        &self,
        identity: &AuthIdentity,
        lookup: F,
    ) -> Result<AuthContext, AuthError>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<Option<Vec<TeamMember>>, AuthError>>,
    {
        if self.is_admin(&identity.address) {
            info!("Admin {} authorized for {}", identity.address, identity.statement.action);
            return Ok(AuthContext {
                address: identity.address.clone(),
                is_admin: true,
            });
        }

        let team = lookup().await?.ok_or(AuthError::ProjectNotFound)?;

        let is_member = team.iter().any(|member| {
            member
                .wallet_address
                .as_deref()
                .is_some_and(|w| w.to_lowercase() == identity.address)
        });

        if is_member {
            info!(
                "Team member {} authorized for {}",
                identity.address, identity.statement.action
            );
            Ok(AuthContext {
                address: identity.address.clone(),
                is_admin: false,
            })
        } else {
            debug!(
                "Address {} is neither admin nor a team member",
                identity.address
            );
            Err(AuthError::NotAuthorized)
        }
    }
}
