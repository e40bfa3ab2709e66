//! The Project aggregate root and its sub-records.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::project::categories::WINNERS_CATEGORY;

/// A member of a project team. `wallet_address` is the authorization anchor
/// for non-admin writes; it is optional and not unique across projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamMember {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wallet_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_url: Option<String>,
}

/// The hackathon a project was submitted to. Immutable once set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HackathonRef {
    pub id: String,
    pub name: String,
    pub end_date: DateTime<Utc>,
}

/// A provenance-stamped narrative record of delivered work.
///
/// `created_by`/`updated_by` always hold the authenticated address that
/// performed the write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub created_by: String,
    pub updated_at: DateTime<Utc>,
    pub updated_by: String,
}

/// A recorded award. Presence of at least one entry is the sole source of
/// truth for "this project won something".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BountyPrize {
    pub name: String,
    pub amount: u64,
    pub hackathon_won_at_id: String,
}

/// Lifecycle stage of a project. Wire strings match the historical data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProjectState {
    #[serde(rename = "Hackathon Submission")]
    Submitted,
    #[serde(rename = "Bounty Payout")]
    BountyPayoutPending,
    #[serde(rename = "Milestone Delivered")]
    MilestoneDelivered,
    #[serde(rename = "Abandoned")]
    Abandoned,
}

impl fmt::Display for ProjectState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ProjectState::Submitted => "Hackathon Submission",
            ProjectState::BountyPayoutPending => "Bounty Payout",
            ProjectState::MilestoneDelivered => "Milestone Delivered",
            ProjectState::Abandoned => "Abandoned",
        };
        f.write_str(name)
    }
}

/// The aggregate root, stored as one JSON document per project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    /// Slug of the project name plus a random suffix; immutable.
    pub id: String,
    pub project_name: String,
    pub description: String,
    #[serde(default)]
    pub team_members: Vec<TeamMember>,
    pub hackathon: HackathonRef,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_repo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slides_url: Option<String>,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    /// Client-writable categories. `"Winners"` is never stored here; the
    /// read path derives it from `bounty_prize`.
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub milestones: Vec<Milestone>,
    #[serde(default)]
    pub bounty_prize: Vec<BountyPrize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub donation_address: Option<String>,
    pub project_state: ProjectState,
    #[serde(default)]
    pub bounties_processed: bool,
    pub updated_at: DateTime<Utc>,
}

impl Project {
    /// Whether this project has won anything.
    pub fn has_won(&self) -> bool {
        !self.bounty_prize.is_empty()
    }

    /// Categories as the read path reports them: the stored set plus the
    /// derived `"Winners"` entry when a bounty has been recorded.
    pub fn effective_categories(&self) -> Vec<String> {
        let mut categories: Vec<String> = self
            .categories
            .iter()
            .filter(|c| *c != WINNERS_CATEGORY)
            .cloned()
            .collect();
        if self.has_won() {
            categories.push(WINNERS_CATEGORY.to_string());
        }
        categories
    }

    /// A copy with `categories` replaced by the derived read-path view.
    pub fn read_view(&self) -> Project {
        let mut view = self.clone();
        view.categories = self.effective_categories();
        view
    }

    #[cfg(test)]
    pub fn sample(id: &str, name: &str) -> Project {
        Project {
            id: id.to_string(),
            project_name: name.to_string(),
            description: "A sample project".to_string(),
            team_members: Vec::new(),
            hackathon: HackathonRef {
                id: "hackathon-2026".to_string(),
                name: "Stadium Hackathon 2026".to_string(),
                end_date: Utc::now(),
            },
            project_repo: None,
            demo_url: None,
            slides_url: None,
            tech_stack: vec!["rust".to_string()],
            categories: Vec::new(),
            milestones: Vec::new(),
            bounty_prize: Vec::new(),
            donation_address: None,
            project_state: ProjectState::Submitted,
            bounties_processed: false,
            updated_at: Utc::now(),
        }
    }
}
