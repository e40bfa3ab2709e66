//! Lifecycle state machine and the domain actions that drive it.
//!
//! There is no generic set-state operation. Each action below encapsulates
//! one edge of the machine together with its side effects on
//! `bounties_processed` and the milestone log:
//!
//! ```text
//! Submitted ──▶ BountyPayoutPending ──▶ MilestoneDelivered
//!     │                  │
//!     └──────────────────┴──▶ Abandoned
//! ```
//!
//! `MilestoneDelivered` and `Abandoned` are terminal for these rules;
//! administrators may still append documentation through ordinary updates,
//! but the state no longer advances.

use chrono::Utc;
use log::info;

use crate::project::error::ValidationError;
use crate::project::types::{BountyPrize, Milestone, Project, ProjectState};

impl ProjectState {
    /// Whether `next` is reachable from this state through a single edge.
    pub fn can_transition_to(self, next: ProjectState) -> bool {
        use ProjectState::*;
        matches!(
            (self, next),
            (Submitted, BountyPayoutPending)
                | (BountyPayoutPending, BountyPayoutPending)
                | (BountyPayoutPending, MilestoneDelivered)
                | (Submitted, Abandoned)
                | (BountyPayoutPending, Abandoned)
        )
    }
}

fn transition(project: &mut Project, next: ProjectState) -> Result<(), ValidationError> {
    if !project.project_state.can_transition_to(next) {
        return Err(ValidationError::InvalidTransition {
            from: project.project_state,
            to: next,
        });
    }
    info!(
        "Project {} moves {} -> {}",
        project.id, project.project_state, next
    );
    project.project_state = next;
    Ok(())
}

/// Record a non-empty prize list and move the project to payout-pending.
///
/// Mirrors "declared winner, payout owed". Repeating the action while the
/// payout is pending replaces the recorded prizes.
pub fn declare_winner(
    project: &mut Project,
    prizes: Vec<BountyPrize>,
    actor: &str,
) -> Result<(), ValidationError> {
    if prizes.is_empty() {
        return Err(ValidationError::EmptyPrizeList);
    }
    transition(project, ProjectState::BountyPayoutPending)?;
    info!(
        "Project {} declared winner of {} prize(s) by {}",
        project.id,
        prizes.len(),
        actor
    );
    project.bounty_prize = prizes;
    Ok(())
}

/// Record delivery evidence after an award: appends a provenance-stamped
/// milestone, settles the payout flag, and closes the lifecycle.
pub fn confirm_milestone_delivery(
    project: &mut Project,
    evidence: &str,
    actor: &str,
) -> Result<(), ValidationError> {
    let evidence = evidence.trim();
    if evidence.is_empty() {
        return Err(ValidationError::EmptyMilestoneDescription);
    }
    transition(project, ProjectState::MilestoneDelivered)?;

    let now = Utc::now();
    project.milestones.push(Milestone {
        description: evidence.to_string(),
        created_at: now,
        created_by: actor.to_string(),
        updated_at: now,
        updated_by: actor.to_string(),
    });
    project.bounties_processed = true;
    Ok(())
}

/// Mark a project as abandoned: no further milestone is expected, and no
/// financial obligation remains.
pub fn declare_abandoned(project: &mut Project, actor: &str) -> Result<(), ValidationError> {
    transition(project, ProjectState::Abandoned)?;
    info!("Project {} declared abandoned by {}", project.id, actor);
    project.bounties_processed = true;
    Ok(())
}
