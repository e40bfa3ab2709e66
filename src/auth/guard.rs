//! Per-request authorization gate.

use log::warn;

use crate::auth::authenticator::SiwsAuthenticator;
use crate::auth::error::AuthError;
use crate::auth::policy::AuthorizationPolicy;
use crate::auth::statement::StatementAction;
use crate::auth::types::{AuthContext, AuthIdentity};
use crate::project::types::Project;
use crate::store::ProjectStore;

/// Orchestrates authenticator, policy, and the lazy resource lookup into a
/// single authorize-or-reject decision per incoming write.
///
/// Authentication failures short-circuit before any store access, so
/// unauthenticated callers learn nothing about resource existence. The
/// guard itself never writes; it performs zero store reads for admins and
/// exactly one for team-member authorization.
pub struct AccessGuard {
    authenticator: SiwsAuthenticator,
    policy: AuthorizationPolicy,
}

impl AccessGuard {
    pub fn new(authenticator: SiwsAuthenticator, policy: AuthorizationPolicy) -> Self {
        Self {
            authenticator,
            policy,
        }
    }

    /// Authorize a write that needs administrative privileges and no
    /// project lookup (e.g. project creation).
    pub fn authorize_admin(
        &self,
        header: Option<&str>,
        permitted: &[StatementAction],
    ) -> Result<AuthContext, AuthError> {
        let identity = self.authenticate_for(header, permitted)?;
        self.policy.authorize_admin(&identity)
    }

    /// Authorize a write to a specific project.
    ///
    /// Returns the project when the authorization path had to fetch it
    /// (team-member checks), so callers can avoid a second read. Admin
    /// writes return `None` — the guard never touched the store.
    pub async fn authorize_project_write(
        &self,
        header: Option<&str>,
        permitted: &[StatementAction],
        store: &dyn ProjectStore,
        project_id: &str,
    ) -> Result<(AuthContext, Option<Project>), AuthError> {
        let identity = self.authenticate_for(header, permitted)?;

        let mut fetched: Option<Project> = None;
        let fetched_ref = &mut fetched;
        let context = self
            .policy
            .authorize_for_project(&identity, || async move {
                let project = store
                    .get(project_id)
                    .await
                    .map_err(|e| AuthError::Internal(e.to_string()))?;
                Ok(match project {
                    Some(project) => {
                        let team = project.team_members.clone();
                        *fetched_ref = Some(project);
                        Some(team)
                    }
                    None => None,
                })
            })
            .await?;

        Ok((context, fetched))
    }

    /// Authenticate the header and gate the parsed action against the set
    /// this route accepts. Statement problems are reported before any
    /// resource access, and distinctly from authorization failures.
    fn authenticate_for(
        &self,
        header: Option<&str>,
        permitted: &[StatementAction],
    ) -> Result<AuthIdentity, AuthError> {
        let identity = self.authenticator.authenticate(header)?;

        if !permitted.contains(&identity.statement.action) {
            warn!(
                "Statement action {} is not permitted for this operation",
                identity.statement.action
            );
            return Err(AuthError::StatementInvalid {
                statement: identity.statement.action.to_string(),
            });
        }

        Ok(identity)
    }
}
