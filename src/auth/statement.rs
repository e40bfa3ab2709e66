//! SIWS statement vocabulary.
//!
//! A signed statement is parsed once into a [`ParsedStatement`] — an action
//! plus an optional free-text project target — instead of being re-matched
//! against string lists at every checkpoint. Two tables define the accepted
//! vocabulary: exact statements, and parameterized shapes of the form
//! `"<verb> <target> on Stadium"`.

use std::fmt;

/// Public service name used in every signed statement.
pub const SERVICE_NAME: &str = "Stadium";

/// Actions a signed statement can authorize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementAction {
    UpdateTeam,
    SubmitDeliverable,
    UpdateProject,
    RegisterAddress,
    AdminAction,
    SignIn,
    CreateProject,
    DeleteProject,
    ReviewProject,
    ApproveProject,
    RejectProject,
}

impl fmt::Display for StatementAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StatementAction::UpdateTeam => "update-team",
            StatementAction::SubmitDeliverable => "submit-deliverable",
            StatementAction::UpdateProject => "update-project",
            StatementAction::RegisterAddress => "register-address",
            StatementAction::AdminAction => "admin-action",
            StatementAction::SignIn => "sign-in",
            StatementAction::CreateProject => "create-project",
            StatementAction::DeleteProject => "delete-project",
            StatementAction::ReviewProject => "review-project",
            StatementAction::ApproveProject => "approve-project",
            StatementAction::RejectProject => "reject-project",
        };
        f.write_str(name)
    }
}

/// A statement parsed into structured form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedStatement {
    pub action: StatementAction,

    /// Project name embedded in a parameterized statement, when present.
    /// The generic placeholder `"project"` is treated as no target.
    pub target: Option<String>,
}

/// Statements accepted verbatim, with no project target.
const EXACT_STATEMENTS: &[(&str, StatementAction)] = &[
    ("Submit milestone deliverables for Stadium", StatementAction::SubmitDeliverable),
    ("Update team members for Stadium", StatementAction::UpdateTeam),
    ("Update project details for Stadium", StatementAction::UpdateProject),
    ("Register team address for Stadium", StatementAction::RegisterAddress),
    ("Register team address for project on Stadium", StatementAction::RegisterAddress),
    ("Perform administrative action on Stadium", StatementAction::AdminAction),
    ("Sign in to Stadium", StatementAction::SignIn),
    ("Create new project on Stadium", StatementAction::CreateProject),
    ("Delete project on Stadium", StatementAction::DeleteProject),
    ("Review project on Stadium", StatementAction::ReviewProject),
    ("Approve project on Stadium", StatementAction::ApproveProject),
    ("Reject project on Stadium", StatementAction::RejectProject),
];

/// Parameterized shapes: prefix + free-text project name + fixed suffix.
const STATEMENT_SHAPES: &[(&str, StatementAction)] = &[
    ("Update team members for ", StatementAction::UpdateTeam),
    ("Submit milestone deliverables for ", StatementAction::SubmitDeliverable),
    ("Update project details for ", StatementAction::UpdateProject),
    ("Delete project ", StatementAction::DeleteProject),
    ("Review project ", StatementAction::ReviewProject),
    ("Approve project ", StatementAction::ApproveProject),
    ("Reject project ", StatementAction::RejectProject),
];

const SHAPE_SUFFIX: &str = " on Stadium";

/// Parse a statement against the permitted vocabulary.
///
/// Returns `None` for anything outside it; callers map that to an
/// invalid-statement rejection.
pub fn parse_statement(statement: &str) -> Option<ParsedStatement> {
    for (exact, action) in EXACT_STATEMENTS {
        if statement == *exact {
            return Some(ParsedStatement {
                action: *action,
                target: None,
            });
        }
    }

    for (prefix, action) in STATEMENT_SHAPES {
        if let Some(rest) = statement.strip_prefix(prefix) {
            if let Some(target) = rest.strip_suffix(SHAPE_SUFFIX) {
                let target = target.trim();
                if target.is_empty() {
                    continue;
                }
                let target = if target == "project" {
                    None
                } else {
                    Some(target.to_string())
                };
                return Some(ParsedStatement {
                    action: *action,
                    target,
                });
            }
        }
    }

    None
}
