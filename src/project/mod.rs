//! The Project aggregate and the rules that keep it consistent.
//!
//! `projectState`, the `"Winners"` category, and `bountiesProcessed` are
//! derived or action-driven; no write path may set them directly. The
//! lifecycle module owns the state edges, the categories module owns the
//! client-writable vocabulary, and the update module merges PATCH bodies
//! without letting either rule slip through.

pub mod categories;
pub mod error;
pub mod id;
pub mod lifecycle;
pub mod types;
pub mod update;

pub use error::ValidationError;
pub use types::{BountyPrize, HackathonRef, Milestone, Project, ProjectState, TeamMember};
pub use update::{MilestoneDraft, ProjectPatch};
