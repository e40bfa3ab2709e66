//! Validation errors for project writes.

use thiserror::Error;

use crate::project::types::ProjectState;

/// A request body violated a data-model invariant.
///
/// Raised before any persistence call executes; a rejected write has no
/// partial side effects.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Unknown categories: {}", .0.join(", "))]
    UnknownCategories(Vec<String>),

    #[error("The Winners category is derived from bounty awards and cannot be set directly")]
    WinnersNotSettable,

    #[error("Team member list cannot be empty")]
    EmptyTeamList,

    #[error("Every team member requires a name")]
    MissingMemberName,

    #[error("Field {0:?} cannot be modified")]
    FieldImmutable(&'static str),

    #[error("projectState moves only through its dedicated actions, not direct writes")]
    DirectStateChange,

    #[error("Invalid state transition: {from} -> {to}")]
    InvalidTransition {
        from: ProjectState,
        to: ProjectState,
    },

    #[error("A winner declaration requires at least one bounty prize")]
    EmptyPrizeList,

    #[error("Milestone description cannot be empty")]
    EmptyMilestoneDescription,

    #[error("Field {0:?} is required")]
    MissingField(&'static str),
}
