//! Route handlers for the project registry.

use std::cmp::Reverse;
use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use log::info;
use serde::Deserialize;
use serde_json::json;

use crate::api::error::ApiError;
use crate::auth::{AccessGuard, AuthError, StatementAction, SIWS_AUTH_HEADER};
use crate::project::categories::validate_categories;
use crate::project::id::generate_id;
use crate::project::lifecycle;
use crate::project::types::{
    BountyPrize, HackathonRef, Project, ProjectState, TeamMember,
};
use crate::project::update::{apply_patch, merge_milestones, validate_team, MilestoneDraft, ProjectPatch};
use crate::project::ValidationError;
use crate::store::ProjectStore;

/// Shared state for the project API.
#[derive(Clone)]
pub struct AppState {
    pub guard: Arc<AccessGuard>,
    pub store: Arc<dyn ProjectStore>,
}

/// Statement actions accepted per route. `AdminAction` is the catch-all an
/// administrator may sign for any operation.
const CREATE_ACTIONS: &[StatementAction] = &[
    StatementAction::CreateProject,
    StatementAction::AdminAction,
];
const UPDATE_ACTIONS: &[StatementAction] = &[
    StatementAction::UpdateProject,
    StatementAction::SubmitDeliverable,
    StatementAction::RegisterAddress,
    StatementAction::AdminAction,
];
const TEAM_ACTIONS: &[StatementAction] = &[
    StatementAction::UpdateTeam,
    StatementAction::RegisterAddress,
    StatementAction::AdminAction,
];
const DECLARE_WINNER_ACTIONS: &[StatementAction] = &[
    StatementAction::ApproveProject,
    StatementAction::AdminAction,
];
const CONFIRM_DELIVERY_ACTIONS: &[StatementAction] = &[
    StatementAction::ReviewProject,
    StatementAction::AdminAction,
];
const DECLARE_ABANDONED_ACTIONS: &[StatementAction] = &[
    StatementAction::RejectProject,
    StatementAction::AdminAction,
];

fn siws_header(headers: &HeaderMap) -> Result<Option<&str>, ApiError> {
    match headers.get(SIWS_AUTH_HEADER) {
        None => Ok(None),
        Some(value) => value.to_str().map(Some).map_err(|_| {
            AuthError::PayloadMalformed("header is not valid ASCII".to_string()).into()
        }),
    }
}

// ==================== Read routes (public) ====================

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    pub search: Option<String>,
    pub project_state: Option<ProjectState>,
    pub hackathon_id: Option<String>,
    pub winners_only: Option<bool>,
    pub bounties_processed: Option<bool>,
    pub sort_by: Option<String>,
    pub sort_order: Option<String>,
    pub page: Option<u32>,
    pub limit: Option<u32>,
}

pub async fn list_projects(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let mut projects = state.store.list().await?;

    if let Some(search) = &query.search {
        let needle = search.to_lowercase();
        projects.retain(|p| p.project_name.to_lowercase().contains(&needle));
    }
    if let Some(wanted) = query.project_state {
        projects.retain(|p| p.project_state == wanted);
    }
    if let Some(processed) = query.bounties_processed {
        projects.retain(|p| p.bounties_processed == processed);
    }
    if let Some(hackathon_id) = &query.hackathon_id {
        projects.retain(|p| p.hackathon.id == *hackathon_id);
    }
    if query.winners_only.unwrap_or(false) {
        match &query.hackathon_id {
            // Scoped to the event: the prize must come from it.
            Some(hackathon_id) => projects.retain(|p| {
                p.bounty_prize
                    .iter()
                    .any(|prize| prize.hackathon_won_at_id == *hackathon_id)
            }),
            None => projects.retain(Project::has_won),
        }
    }

    let descending = query.sort_order.as_deref() != Some("asc");
    match query.sort_by.as_deref() {
        Some("projectName") => {
            projects.sort_by(|a, b| {
                a.project_name
                    .to_lowercase()
                    .cmp(&b.project_name.to_lowercase())
            });
            if descending {
                projects.reverse();
            }
        }
        _ => {
            if descending {
                projects.sort_by_key(|p| Reverse(p.updated_at));
            } else {
                projects.sort_by_key(|p| p.updated_at);
            }
        }
    }

    let total = projects.len();
    let limit = query.limit.unwrap_or(10).max(1) as usize;
    let page = query.page.unwrap_or(1).max(1) as usize;
    let data: Vec<Project> = projects
        .into_iter()
        .skip((page - 1) * limit)
        .take(limit)
        .map(|p| p.read_view())
        .collect();
    let count = data.len();

    Ok(Json(json!({
        "status": "success",
        "data": data,
        "meta": {
            "total": total,
            "count": count,
            "limit": limit,
            "page": page,
        },
    })))
}

pub async fn get_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
) -> Result<impl IntoResponse, ApiError> {
    let project = match state.store.get(&project_id).await? {
        Some(project) => Some(project),
        // Historical clients link winners by their payout destination.
        None => state
            .store
            .list()
            .await?
            .into_iter()
            .find(|p| p.donation_address.as_deref() == Some(project_id.as_str())),
    };

    let project = project.ok_or_else(|| ApiError::not_found("Project not found"))?;
    Ok(Json(json!({ "status": "success", "data": project.read_view() })))
}

// ==================== Write routes ====================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateProjectRequest {
    pub project_name: String,
    pub description: String,
    #[serde(default)]
    pub team_members: Vec<TeamMember>,
    pub hackathon: HackathonRef,
    #[serde(default)]
    pub tech_stack: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub milestones: Vec<MilestoneDraft>,
    #[serde(default)]
    pub project_repo: Option<String>,
    #[serde(default)]
    pub demo_url: Option<String>,
    #[serde(default)]
    pub slides_url: Option<String>,
    #[serde(default)]
    pub donation_address: Option<String>,
}

pub async fn create_project(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(request): Json<CreateProjectRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let header = siws_header(&headers)?;
    let context = state.guard.authorize_admin(header, CREATE_ACTIONS)?;

    if request.project_name.trim().is_empty() {
        return Err(ValidationError::MissingField("projectName").into());
    }
    if request.description.trim().is_empty() {
        return Err(ValidationError::MissingField("description").into());
    }
    validate_categories(&request.categories)?;
    if !request.team_members.is_empty() {
        validate_team(&request.team_members)?;
    }

    let id = fresh_id(&state, &request.project_name).await?;
    let milestones = merge_milestones(&[], request.milestones, &context.address)?;

    let project = Project {
        id,
        project_name: request.project_name,
        description: request.description,
        team_members: request.team_members,
        hackathon: request.hackathon,
        project_repo: request.project_repo,
        demo_url: request.demo_url,
        slides_url: request.slides_url,
        tech_stack: request.tech_stack,
        categories: request.categories,
        milestones,
        bounty_prize: Vec::new(),
        donation_address: request.donation_address,
        project_state: ProjectState::Submitted,
        bounties_processed: false,
        updated_at: Utc::now(),
    };

    state.store.put(&project).await?;
    info!("Project {} created by {}", project.id, context.address);

    Ok((
        StatusCode::CREATED,
        Json(json!({ "status": "success", "data": project.read_view() })),
    ))
}

/// Generated ids are collision-resistant but not collision-free; retry a
/// few times before giving up.
async fn fresh_id(state: &AppState, name: &str) -> Result<String, ApiError> {
    for _ in 0..3 {
        let id = generate_id(name);
        if state.store.get(&id).await?.is_none() {
            return Ok(id);
        }
    }
    Err(ApiError::bad_request("Could not allocate a project id"))
}

pub async fn update_project(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    headers: HeaderMap,
    Json(patch): Json<ProjectPatch>,
) -> Result<impl IntoResponse, ApiError> {
    let header = siws_header(&headers)?;
    let (context, prefetched) = state
        .guard
        .authorize_project_write(header, UPDATE_ACTIONS, state.store.as_ref(), &project_id)
        .await?;

    if patch.is_empty() {
        return Err(ApiError::bad_request("Request body cannot be empty."));
    }

    let mut project = match prefetched {
        Some(project) => project,
        None => state
            .store
            .get(&project_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Project not found"))?,
    };

    apply_patch(&mut project, patch, &context.address)?;
    project.updated_at = Utc::now();
    state.store.put(&project).await?;
    info!("Project {} updated by {}", project.id, context.address);

    Ok(Json(json!({ "status": "success", "data": project.read_view() })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReplaceTeamRequest {
    pub team_members: Vec<TeamMember>,
}

pub async fn replace_team(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<ReplaceTeamRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let header = siws_header(&headers)?;
    let (context, prefetched) = state
        .guard
        .authorize_project_write(header, TEAM_ACTIONS, state.store.as_ref(), &project_id)
        .await?;

    validate_team(&request.team_members)?;

    let mut project = match prefetched {
        Some(project) => project,
        None => state
            .store
            .get(&project_id)
            .await?
            .ok_or_else(|| ApiError::not_found("Project not found"))?,
    };

    project.team_members = request.team_members;
    project.updated_at = Utc::now();
    state.store.put(&project).await?;
    info!(
        "Project {} team replaced by {}",
        project.id, context.address
    );

    Ok(Json(json!({ "status": "success", "data": project.read_view() })))
}

// ==================== Lifecycle actions (admin) ====================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeclareWinnerRequest {
    pub bounty_prize: Vec<BountyPrize>,
}

pub async fn declare_winner(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<DeclareWinnerRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let header = siws_header(&headers)?;
    let context = state
        .guard
        .authorize_admin(header, DECLARE_WINNER_ACTIONS)?;

    let mut project = fetch_required(&state, &project_id).await?;
    lifecycle::declare_winner(&mut project, request.bounty_prize, &context.address)?;
    persist(&state, &mut project).await?;

    Ok(Json(json!({ "status": "success", "data": project.read_view() })))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmDeliveryRequest {
    pub evidence: String,
}

pub async fn confirm_delivery(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    headers: HeaderMap,
    Json(request): Json<ConfirmDeliveryRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let header = siws_header(&headers)?;
    let context = state
        .guard
        .authorize_admin(header, CONFIRM_DELIVERY_ACTIONS)?;

    let mut project = fetch_required(&state, &project_id).await?;
    lifecycle::confirm_milestone_delivery(&mut project, &request.evidence, &context.address)?;
    persist(&state, &mut project).await?;

    Ok(Json(json!({ "status": "success", "data": project.read_view() })))
}

pub async fn declare_abandoned(
    State(state): State<AppState>,
    Path(project_id): Path<String>,
    headers: HeaderMap,
) -> Result<impl IntoResponse, ApiError> {
    let header = siws_header(&headers)?;
    let context = state
        .guard
        .authorize_admin(header, DECLARE_ABANDONED_ACTIONS)?;

    let mut project = fetch_required(&state, &project_id).await?;
    lifecycle::declare_abandoned(&mut project, &context.address)?;
    persist(&state, &mut project).await?;

    Ok(Json(json!({ "status": "success", "data": project.read_view() })))
}

async fn fetch_required(state: &AppState, project_id: &str) -> Result<Project, ApiError> {
    state
        .store
        .get(project_id)
        .await?
        .ok_or_else(|| ApiError::not_found("Project not found"))
}

async fn persist(state: &AppState, project: &mut Project) -> Result<(), ApiError> {
    project.updated_at = Utc::now();
    state.store.put(project).await?;
    Ok(())
}
