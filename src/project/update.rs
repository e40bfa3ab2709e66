//! Partial-update merging with invariant enforcement.

use chrono::Utc;
use serde::Deserialize;

use crate::project::categories::validate_categories;
use crate::project::error::ValidationError;
use crate::project::types::{
    BountyPrize, HackathonRef, Milestone, Project, ProjectState, TeamMember,
};

/// A client-authored milestone. Provenance stamps are never accepted from
/// the wire; they are derived from the authenticated actor at merge time.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MilestoneDraft {
    pub description: String,
}

/// Fields a PATCH request may carry.
///
/// `project_state`, `bounty_prize`, and `bounties_processed` are accepted
/// into the struct so that echoing the stored value back is tolerated, but
/// any attempt to *change* them through a patch is a validation error —
/// those fields move only through the lifecycle actions.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectPatch {
    pub id: Option<String>,
    pub project_name: Option<String>,
    pub description: Option<String>,
    pub team_members: Option<Vec<TeamMember>>,
    pub hackathon: Option<HackathonRef>,
    pub project_repo: Option<String>,
    pub demo_url: Option<String>,
    pub slides_url: Option<String>,
    pub tech_stack: Option<Vec<String>>,
    pub categories: Option<Vec<String>>,
    pub milestones: Option<Vec<MilestoneDraft>>,
    pub donation_address: Option<String>,
    pub project_state: Option<ProjectState>,
    pub bounty_prize: Option<Vec<BountyPrize>>,
    pub bounties_processed: Option<bool>,
}

impl ProjectPatch {
    /// True when the patch carries nothing at all.
    pub fn is_empty(&self) -> bool {
        self.id.is_none()
            && self.project_name.is_none()
            && self.description.is_none()
            && self.team_members.is_none()
            && self.hackathon.is_none()
            && self.project_repo.is_none()
            && self.demo_url.is_none()
            && self.slides_url.is_none()
            && self.tech_stack.is_none()
            && self.categories.is_none()
            && self.milestones.is_none()
            && self.donation_address.is_none()
            && self.project_state.is_none()
            && self.bounty_prize.is_none()
            && self.bounties_processed.is_none()
    }
}

/// Validate a full team-replacement list.
pub fn validate_team(team: &[TeamMember]) -> Result<(), ValidationError> {
    if team.is_empty() {
        return Err(ValidationError::EmptyTeamList);
    }
    if team.iter().any(|m| m.name.trim().is_empty()) {
        return Err(ValidationError::MissingMemberName);
    }
    Ok(())
}

/// Merge a patch into a project.
///
/// All validation happens before the first field is touched, so a rejected
/// patch leaves the project unchanged. Applying the same patch twice yields
/// the same document: milestone provenance survives re-application.
pub fn apply_patch(
    project: &mut Project,
    patch: ProjectPatch,
    actor: &str,
) -> Result<(), ValidationError> {
    if patch.id.as_ref().is_some_and(|id| *id != project.id) {
        return Err(ValidationError::FieldImmutable("id"));
    }
    if patch
        .hackathon
        .as_ref()
        .is_some_and(|h| *h != project.hackathon)
    {
        return Err(ValidationError::FieldImmutable("hackathon"));
    }
    if patch
        .project_state
        .is_some_and(|s| s != project.project_state)
    {
        return Err(ValidationError::DirectStateChange);
    }
    if patch
        .bounty_prize
        .as_ref()
        .is_some_and(|p| *p != project.bounty_prize)
    {
        return Err(ValidationError::FieldImmutable("bountyPrize"));
    }
    if patch
        .bounties_processed
        .is_some_and(|b| b != project.bounties_processed)
    {
        return Err(ValidationError::FieldImmutable("bountiesProcessed"));
    }
    if let Some(categories) = &patch.categories {
        validate_categories(categories)?;
    }
    if let Some(team) = &patch.team_members {
        validate_team(team)?;
    }
    if let Some(drafts) = &patch.milestones {
        if drafts.iter().any(|d| d.description.trim().is_empty()) {
            return Err(ValidationError::EmptyMilestoneDescription);
        }
    }

    if let Some(name) = patch.project_name {
        project.project_name = name;
    }
    if let Some(description) = patch.description {
        project.description = description;
    }
    if let Some(team) = patch.team_members {
        project.team_members = team;
    }
    if let Some(repo) = patch.project_repo {
        project.project_repo = Some(repo);
    }
    if let Some(demo) = patch.demo_url {
        project.demo_url = Some(demo);
    }
    if let Some(slides) = patch.slides_url {
        project.slides_url = Some(slides);
    }
    if let Some(stack) = patch.tech_stack {
        project.tech_stack = stack;
    }
    if let Some(categories) = patch.categories {
        project.categories = categories;
    }
    if let Some(address) = patch.donation_address {
        project.donation_address = Some(address);
    }
    if let Some(drafts) = patch.milestones {
        project.milestones = merge_milestones(&project.milestones, drafts, actor)?;
    }

    Ok(())
}

/// Merge milestone drafts against the existing log, position by position.
///
/// An unchanged description keeps its original stamps; an edited one keeps
/// its creation stamps and records the actor as updater; a new entry is
/// stamped entirely to the actor. Re-submitting the same drafts is a no-op.
pub fn merge_milestones(
    existing: &[Milestone],
    drafts: Vec<MilestoneDraft>,
    actor: &str,
) -> Result<Vec<Milestone>, ValidationError> {
    if drafts.iter().any(|d| d.description.trim().is_empty()) {
        return Err(ValidationError::EmptyMilestoneDescription);
    }

    let now = Utc::now();
    let merged = drafts
        .into_iter()
        .enumerate()
        .map(|(i, draft)| match existing.get(i) {
            Some(current) if current.description == draft.description => current.clone(),
            Some(current) => Milestone {
                description: draft.description,
                created_at: current.created_at,
                created_by: current.created_by.clone(),
                updated_at: now,
                updated_by: actor.to_string(),
            },
            None => Milestone {
                description: draft.description,
                created_at: now,
                created_by: actor.to_string(),
                updated_at: now,
                updated_by: actor.to_string(),
            },
        })
        .collect();

    Ok(merged)
}
