// Copyright (C) 2026 XLSMART
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use axum::{
    Json, Router,
    extract::{Path, Query, Request, State as AxumState},
    http::{HeaderMap, HeaderValue, Method, StatusCode, header},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
};
use clap::Parser;
use serde::Deserialize;
use serde_json::{Value, json};
use std::str::FromStr;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use rolemap_api::{
    ApiAction, ApiError, AssignmentDetail, AuthenticatedActor, BulkAssignResponse,
    CatalogParseOutcome, CatalogUploadRequest, CatalogUploadResponse, CreateEmployeeRequest,
    DeactivateRoleRequest, FixMappingsResponse, ReviewMappingRequest, Role, StandardizeRequest,
    StandardizeResponse, UpdateRoleRequest, WipeResponse, authenticate_stub, authorize,
    build_standardization_prompt, parse_catalog_files, parse_standardization_reply,
    reply_to_inserts, translate_llm_error, translate_persistence_error,
};
use rolemap_domain::{
    ConfidenceSource, EmployeeProfile, MappingStatus, ParsedFile, RoleCandidate, SessionStatus,
    exceeds_drift_tolerance, select_best_candidate, similarity_confidence,
};
use rolemap_llm::{ChatMessage, LlmError, OpenAiGenerator, TextGenerator};
use rolemap_persistence::{
    NewEmployee, NewUploadSession, Persistence, PersistenceError, StandardRoleUpdate,
};

/// rolemap server - HTTP backend for HR role standardization
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses an
    /// in-memory database.
    #[arg(short, long)]
    database: Option<String>,

    /// MySQL connection URL. Takes precedence over `--database`.
    #[arg(short, long)]
    mysql_url: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, default_value_t = 3000)]
    port: u16,
}

/// Application state shared across handlers.
///
/// The persistence layer sits behind a Mutex for safe concurrent
/// access; the text generator is a trait object so tests can swap in
/// a mock.
#[derive(Clone)]
struct AppState {
    /// The persistence layer.
    persistence: Arc<Mutex<Persistence>>,
    /// The text-generation backend.
    generator: Arc<dyn TextGenerator>,
}

/// Request carrying only actor credentials.
#[derive(Debug, Clone, Deserialize)]
struct ActorOnlyRequest {
    /// The actor ID performing this action.
    actor_id: String,
    /// The role of the actor.
    role: String,
}

/// Request to approve an employee's suggested assignment.
#[derive(Debug, Clone, Deserialize)]
struct ApproveEmployeeRequest {
    /// The actor ID performing this action.
    actor_id: String,
    /// The role of the actor.
    role: String,
    /// The employee whose suggestion is being approved.
    employee_id: i64,
}

/// Query parameters for listing standard roles.
#[derive(Debug, Deserialize)]
struct StandardRolesQuery {
    /// Include soft-disabled roles.
    #[serde(default)]
    include_inactive: bool,
}

/// Query parameters for listing mappings.
#[derive(Debug, Deserialize)]
struct MappingsQuery {
    /// Restrict to one upload session.
    #[serde(default)]
    session_id: Option<i64>,
}

/// Query parameters for listing employees.
#[derive(Debug, Deserialize)]
struct EmployeesQuery {
    /// Restrict to employees with no assigned role.
    #[serde(default)]
    unassigned: bool,
}

/// HTTP error wrapper that implements `IntoResponse`.
///
/// Every failure, auth included, is rendered as HTTP 500 with the
/// uniform `{"success": false, "error": "..."}` envelope; callers
/// dispatch on the envelope, not the status code.
struct HttpError {
    /// The error message.
    message: String,
}

impl HttpError {
    fn internal(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<Value> = Json(json!({
            "success": false,
            "error": self.message,
        }));
        (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        Self {
            message: err.to_string(),
        }
    }
}

impl From<PersistenceError> for HttpError {
    fn from(err: PersistenceError) -> Self {
        translate_persistence_error(err).into()
    }
}

/// Attaches the open-CORS headers to a response.
fn apply_cors_headers(headers: &mut HeaderMap) {
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("content-type, authorization"),
    );
}

/// Middleware answering OPTIONS preflights and stamping CORS headers
/// on every response, error responses included.
async fn cors_layer(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        let mut response: Response = StatusCode::OK.into_response();
        apply_cors_headers(response.headers_mut());
        return response;
    }
    let mut response: Response = next.run(request).await;
    apply_cors_headers(response.headers_mut());
    response
}

/// Wraps a serializable payload in the success envelope.
fn success<T: serde::Serialize>(payload: &T) -> Result<Json<Value>, HttpError> {
    let mut value: Value = serde_json::to_value(payload)
        .map_err(|e| HttpError::internal(format!("Failed to encode response: {e}")))?;
    if let Some(object) = value.as_object_mut() {
        object.insert(String::from("success"), Value::Bool(true));
    }
    Ok(Json(value))
}

/// Parses the role, authenticates the actor, and authorizes the action.
fn authenticate(
    actor_id: &str,
    role: &str,
    action: ApiAction,
) -> Result<AuthenticatedActor, HttpError> {
    let role: Role = Role::from_str(role).map_err(ApiError::from)?;
    let actor: AuthenticatedActor = authenticate_stub(actor_id, role).map_err(ApiError::from)?;
    authorize(&actor, action).map_err(ApiError::from)?;
    Ok(actor)
}

/// Handler for POST `/catalog/upload`.
///
/// Parses the uploaded files and creates the upload session in the
/// `analyzing` state with the normalized catalog stored on it.
async fn handle_catalog_upload(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<CatalogUploadRequest>,
) -> Result<Json<Value>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        session_name = %req.session_name,
        files = req.files.len(),
        "Handling catalog upload request"
    );

    let actor: AuthenticatedActor =
        authenticate(&req.actor_id, &req.role, ApiAction::UploadCatalog)?;

    let outcome: CatalogParseOutcome = parse_catalog_files(&req.files);
    let raw_data: String = serde_json::to_string(&outcome.files)
        .map_err(|e| HttpError::internal(format!("Failed to encode parsed catalog: {e}")))?;

    let session: NewUploadSession = NewUploadSession {
        session_name: req.session_name,
        file_names: req.files.iter().map(|f| f.file_name.clone()).collect(),
        raw_data: Some(raw_data),
        total_rows: i32::try_from(outcome.total_rows).unwrap_or(i32::MAX),
        status: String::from(SessionStatus::Analyzing.as_str()),
        created_by: actor.actor_id,
    };

    let mut persistence = state.persistence.lock().await;
    let session_id: i64 = persistence.insert_upload_session(&session)?;
    drop(persistence);

    info!(
        session_id,
        total_rows = outcome.total_rows,
        files_parsed = outcome.files.len(),
        file_errors = outcome.file_errors.len(),
        "Catalog upload session created"
    );

    success(&CatalogUploadResponse {
        session_id,
        total_rows: outcome.total_rows,
        files_parsed: outcome.files.len(),
        file_errors: outcome.file_errors,
    })
}

/// Marks the session as errored and returns the original failure.
async fn fail_standardization(state: &AppState, session_id: i64, err: HttpError) -> HttpError {
    error!(session_id, error = %err.message, "Standardization failed");
    let mut persistence = state.persistence.lock().await;
    if let Err(persist_err) = persistence.set_session_error(session_id, &err.message) {
        error!(session_id, error = %persist_err, "Failed to record session error");
    }
    drop(persistence);
    err
}

/// Handler for POST `/standardize`.
///
/// Runs the standardization engine: builds the prompt from the stored
/// (or inline) catalog, calls the text generator, parses the reply,
/// and atomically writes the role set plus mappings. Any failure after
/// the lifecycle gate marks the session `error` and commits nothing.
async fn handle_standardize(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<StandardizeRequest>,
) -> Result<Json<Value>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        session_id = req.session_id,
        "Handling standardize request"
    );

    let actor: AuthenticatedActor = authenticate(&req.actor_id, &req.role, ApiAction::Standardize)?;

    let mut persistence = state.persistence.lock().await;
    let session = persistence
        .get_upload_session(req.session_id)?
        .ok_or_else(|| {
            HttpError::from(ApiError::ResourceNotFound {
                resource_type: String::from("Upload session"),
                message: format!("Upload session {} does not exist", req.session_id),
            })
        })?;

    let status: SessionStatus =
        SessionStatus::from_str(&session.status).map_err(|e| HttpError::internal(e.to_string()))?;
    if !status.allows_standardization() {
        return Err(ApiError::LifecycleViolation {
            message: format!(
                "Session {} is '{}' and cannot be standardized",
                req.session_id, session.status
            ),
        }
        .into());
    }
    persistence.update_session_status(req.session_id, SessionStatus::Standardizing)?;
    drop(persistence);

    let raw: String = match req.parsed_data.or(session.raw_data) {
        Some(raw) => raw,
        None => {
            let err: HttpError = ApiError::InvalidInput {
                field: String::from("parsed_data"),
                message: String::from(
                    "Session has no stored catalog and no inline data was supplied",
                ),
            }
            .into();
            return Err(fail_standardization(&state, req.session_id, err).await);
        }
    };
    let files: Vec<ParsedFile> = match serde_json::from_str(&raw) {
        Ok(files) => files,
        Err(e) => {
            let err: HttpError = HttpError::internal(format!("Stored catalog is unreadable: {e}"));
            return Err(fail_standardization(&state, req.session_id, err).await);
        }
    };

    let messages: Vec<ChatMessage> = build_standardization_prompt(&files);
    let reply: String = match state.generator.complete(&messages).await {
        Ok(reply) => reply,
        Err(e) => {
            let err: HttpError = translate_llm_error(e).into();
            return Err(fail_standardization(&state, req.session_id, err).await);
        }
    };

    let parsed = match parse_standardization_reply(&reply) {
        Ok(parsed) => parsed,
        Err(e) => {
            let err: HttpError = ApiError::from(e).into();
            return Err(fail_standardization(&state, req.session_id, err).await);
        }
    };
    let (roles, mappings) = match reply_to_inserts(&parsed, &actor.actor_id) {
        Ok(inserts) => inserts,
        Err(e) => {
            let err: HttpError = ApiError::from(e).into();
            return Err(fail_standardization(&state, req.session_id, err).await);
        }
    };

    let mut persistence = state.persistence.lock().await;
    let written = match persistence.insert_standardization_result(req.session_id, &roles, &mappings)
    {
        Ok(written) => written,
        Err(e) => {
            drop(persistence);
            let err: HttpError = e.into();
            return Err(fail_standardization(&state, req.session_id, err).await);
        }
    };
    persistence.update_session_status(req.session_id, SessionStatus::Completed)?;
    drop(persistence);

    info!(
        session_id = req.session_id,
        roles = written.roles_created,
        mappings = written.mappings_created,
        "Standardization completed"
    );

    success(&StandardizeResponse {
        standard_roles_created: written.roles_created,
        mappings_created: written.mappings_created,
    })
}

/// Handler for POST `/bulk_assign_roles`.
///
/// Runs the assignment matcher over every employee without a standard
/// role. Per-employee write failures are contained and counted; only
/// an empty role catalog fails the whole call.
async fn handle_bulk_assign_roles(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<ActorOnlyRequest>,
) -> Result<Json<Value>, HttpError> {
    info!(actor_id = %req.actor_id, "Handling bulk assignment request");

    authenticate(&req.actor_id, &req.role, ApiAction::AssignRoles)?;

    let mut persistence = state.persistence.lock().await;
    let roles = persistence.list_standard_roles(false)?;
    if roles.is_empty() {
        return Err(ApiError::ResourceNotFound {
            resource_type: String::from("Standard role"),
            message: String::from("No active standard roles exist; run standardization first"),
        }
        .into());
    }
    let candidates: Vec<RoleCandidate> = roles
        .iter()
        .map(|role| RoleCandidate {
            id: role.id,
            role_title: role.role_title.clone(),
            department: role.department.clone(),
            job_family: role.job_family.clone(),
        })
        .collect();

    let pending = persistence.list_unassigned_employees()?;
    let total: usize = pending.len();

    let mut details: Vec<AssignmentDetail> = Vec::with_capacity(total);
    let mut assigned: usize = 0;
    let mut failed: usize = 0;

    for employee in &pending {
        let profile: EmployeeProfile = EmployeeProfile {
            current_position: employee.current_position.clone(),
            current_department: employee.current_department.clone(),
            skills: employee.skills.clone(),
        };

        let Some(outcome) = select_best_candidate(&profile, &candidates) else {
            failed += 1;
            details.push(AssignmentDetail {
                employee_name: employee.employee_name.clone(),
                status: String::from("failed"),
                assigned_role: None,
                error: Some(String::from("No candidate roles available")),
            });
            continue;
        };

        let note: String = if outcome.fallback {
            String::from("fallback: no scoring signal, first active role assigned")
        } else {
            format!("matched with score {:.2}", outcome.score)
        };

        match persistence.assign_employee_role(employee.id, outcome.role_id, &note) {
            Ok(()) => {
                assigned += 1;
                let assigned_role: Option<String> = candidates
                    .iter()
                    .find(|c| c.id == outcome.role_id)
                    .map(|c| c.role_title.clone());
                details.push(AssignmentDetail {
                    employee_name: employee.employee_name.clone(),
                    status: String::from("assigned"),
                    assigned_role,
                    error: None,
                });
            }
            Err(e) => {
                warn!(employee_id = employee.id, error = %e, "Employee assignment failed");
                failed += 1;
                details.push(AssignmentDetail {
                    employee_name: employee.employee_name.clone(),
                    status: String::from("failed"),
                    assigned_role: None,
                    error: Some(e.to_string()),
                });
            }
        }
    }
    drop(persistence);

    info!(assigned, failed, total, "Bulk assignment finished");

    success(&BulkAssignResponse {
        assigned,
        failed,
        total,
        details,
    })
}

/// Handler for POST `/fix_mappings`.
///
/// Recomputes each mapping's confidence from title similarity and
/// overwrites only when the recomputed value drifts past the
/// tolerance. A second run finds nothing left to fix.
async fn handle_fix_mappings(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<ActorOnlyRequest>,
) -> Result<Json<Value>, HttpError> {
    info!(actor_id = %req.actor_id, "Handling fix_mappings request");

    authenticate(&req.actor_id, &req.role, ApiAction::FixMappings)?;

    let mut persistence = state.persistence.lock().await;
    let mappings = persistence.list_role_mappings()?;
    let total_mappings: usize = mappings.len();

    let mut mappings_fixed: usize = 0;
    for mapping in &mappings {
        let recomputed: i32 =
            similarity_confidence(&mapping.original_title, &mapping.standardized_title);
        if exceeds_drift_tolerance(mapping.confidence, recomputed) {
            persistence.update_mapping_confidence(
                mapping.id,
                recomputed,
                ConfidenceSource::Heuristic,
            )?;
            mappings_fixed += 1;
        }
    }
    drop(persistence);

    info!(
        mappings_fixed,
        total_mappings, "Confidence recalculation finished"
    );

    success(&FixMappingsResponse {
        mappings_fixed,
        total_mappings,
    })
}

/// Handler for GET `/sessions`.
async fn handle_list_sessions(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<Value>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let sessions = persistence.list_upload_sessions()?;
    drop(persistence);

    Ok(Json(json!({"success": true, "sessions": sessions})))
}

/// Handler for GET `/sessions/{session_id}`.
///
/// Returns the full session including the stored raw catalog; this is
/// the status polling interface.
async fn handle_get_session(
    AxumState(state): AxumState<AppState>,
    Path(session_id): Path<i64>,
) -> Result<Json<Value>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let session = persistence.get_upload_session(session_id)?;
    drop(persistence);

    let session = session.ok_or_else(|| {
        HttpError::from(ApiError::ResourceNotFound {
            resource_type: String::from("Upload session"),
            message: format!("Upload session {session_id} does not exist"),
        })
    })?;

    Ok(Json(json!({"success": true, "session": session})))
}

/// Handler for GET `/standard_roles`.
async fn handle_list_standard_roles(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<StandardRolesQuery>,
) -> Result<Json<Value>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let roles = persistence.list_standard_roles(query.include_inactive)?;
    drop(persistence);

    Ok(Json(json!({"success": true, "roles": roles})))
}

/// Handler for POST `/standard_roles/update`.
///
/// Applies a manual edit and bumps the role version.
async fn handle_update_standard_role(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<UpdateRoleRequest>,
) -> Result<Json<Value>, HttpError> {
    info!(actor_id = %req.actor_id, role_id = req.role_id, "Handling standard role update");

    authenticate(&req.actor_id, &req.role, ApiAction::ManageRoles)?;

    let update: StandardRoleUpdate = StandardRoleUpdate {
        role_title: req.role_title,
        job_family: req.job_family,
        role_level: req.role_level,
        role_category: req.role_category,
        department: req.department,
        description: req.description,
        required_skills: req.required_skills,
        experience_min_years: req.experience_min_years,
        experience_max_years: req.experience_max_years,
    };

    let mut persistence = state.persistence.lock().await;
    persistence.update_standard_role(req.role_id, &update)?;
    let role = persistence.get_standard_role(req.role_id)?;
    drop(persistence);

    Ok(Json(json!({"success": true, "role": role})))
}

/// Handler for POST `/standard_roles/deactivate`.
async fn handle_deactivate_standard_role(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<DeactivateRoleRequest>,
) -> Result<Json<Value>, HttpError> {
    info!(actor_id = %req.actor_id, role_id = req.role_id, "Handling standard role deactivation");

    authenticate(&req.actor_id, &req.role, ApiAction::ManageRoles)?;

    let mut persistence = state.persistence.lock().await;
    persistence.deactivate_standard_role(req.role_id)?;
    drop(persistence);

    Ok(Json(json!({"success": true, "role_id": req.role_id})))
}

/// Handler for GET `/mappings`.
async fn handle_list_mappings(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<MappingsQuery>,
) -> Result<Json<Value>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let mappings = match query.session_id {
        Some(session_id) => persistence.list_mappings_for_session(session_id)?,
        None => persistence.list_role_mappings()?,
    };
    drop(persistence);

    Ok(Json(json!({"success": true, "mappings": mappings})))
}

/// Handler for GET `/mappings/review_queue`.
async fn handle_review_queue(
    AxumState(state): AxumState<AppState>,
) -> Result<Json<Value>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let mappings = persistence.list_review_queue()?;
    drop(persistence);

    Ok(Json(json!({"success": true, "mappings": mappings})))
}

/// Handler for POST `/mappings/review`.
///
/// Records an approve/reject decision on a queued mapping.
async fn handle_review_mapping(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<ReviewMappingRequest>,
) -> Result<Json<Value>, HttpError> {
    info!(
        actor_id = %req.actor_id,
        mapping_id = req.mapping_id,
        decision = %req.decision,
        "Handling mapping review"
    );

    authenticate(&req.actor_id, &req.role, ApiAction::ReviewMappings)?;

    let decision: MappingStatus = match req.decision.trim().to_lowercase().as_str() {
        "approved" => MappingStatus::Approved,
        "rejected" => MappingStatus::Rejected,
        other => {
            return Err(ApiError::InvalidInput {
                field: String::from("decision"),
                message: format!("'{other}' is not a decision (must be approved or rejected)"),
            }
            .into());
        }
    };

    let mut persistence = state.persistence.lock().await;
    persistence.update_mapping_status(req.mapping_id, decision)?;
    drop(persistence);

    Ok(Json(json!({
        "success": true,
        "mapping_id": req.mapping_id,
        "status": decision.as_str(),
    })))
}

/// Handler for POST `/employees`.
async fn handle_create_employee(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<CreateEmployeeRequest>,
) -> Result<Json<Value>, HttpError> {
    info!(actor_id = %req.actor_id, employee_name = %req.employee_name, "Handling employee create");

    authenticate(&req.actor_id, &req.role, ApiAction::ManageEmployees)?;

    let employee: NewEmployee = NewEmployee {
        employee_name: req.employee_name,
        current_position: req.current_position,
        current_department: req.current_department,
        current_level: req.current_level,
        skills: req.skills,
    };

    let mut persistence = state.persistence.lock().await;
    let employee_id: i64 = persistence.insert_employee(&employee)?;
    drop(persistence);

    Ok(Json(json!({"success": true, "employee_id": employee_id})))
}

/// Handler for GET `/employees`.
async fn handle_list_employees(
    AxumState(state): AxumState<AppState>,
    Query(query): Query<EmployeesQuery>,
) -> Result<Json<Value>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let employees = if query.unassigned {
        persistence.list_unassigned_employees()?
    } else {
        persistence.list_employees()?
    };
    drop(persistence);

    Ok(Json(json!({"success": true, "employees": employees})))
}

/// Handler for POST `/employees/approve`.
///
/// Confirms an `ai_suggested` assignment.
async fn handle_approve_employee(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<ApproveEmployeeRequest>,
) -> Result<Json<Value>, HttpError> {
    info!(actor_id = %req.actor_id, employee_id = req.employee_id, "Handling assignment approval");

    authenticate(&req.actor_id, &req.role, ApiAction::ManageEmployees)?;

    let mut persistence = state.persistence.lock().await;
    persistence.approve_employee_assignment(req.employee_id)?;
    drop(persistence);

    Ok(Json(json!({"success": true, "employee_id": req.employee_id})))
}

/// Handler for GET `/summary`.
async fn handle_summary(AxumState(state): AxumState<AppState>) -> Result<Json<Value>, HttpError> {
    let mut persistence = state.persistence.lock().await;
    let summary = persistence.standardization_summary()?;
    drop(persistence);

    Ok(Json(json!({"success": true, "summary": summary})))
}

/// Handler for POST `/wipe`.
///
/// Admin-only. Deletes all standardization data in one transaction and
/// reports per-table counts. Employee rows survive with their role
/// references cleared.
async fn handle_wipe(
    AxumState(state): AxumState<AppState>,
    Json(req): Json<ActorOnlyRequest>,
) -> Result<Json<Value>, HttpError> {
    info!(actor_id = %req.actor_id, "Handling wipe request");

    authenticate(&req.actor_id, &req.role, ApiAction::WipeData)?;

    let mut persistence = state.persistence.lock().await;
    let outcome = persistence.wipe_all_data()?;
    drop(persistence);

    warn!(
        mappings = outcome.mappings_deleted,
        employees = outcome.employees_cleared,
        roles = outcome.roles_deleted,
        sessions = outcome.sessions_deleted,
        "All standardization data wiped"
    );

    success(&WipeResponse {
        mappings_deleted: outcome.mappings_deleted,
        employees_cleared: outcome.employees_cleared,
        roles_deleted: outcome.roles_deleted,
        sessions_deleted: outcome.sessions_deleted,
    })
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/catalog/upload", post(handle_catalog_upload))
        .route("/standardize", post(handle_standardize))
        .route("/bulk_assign_roles", post(handle_bulk_assign_roles))
        .route("/fix_mappings", post(handle_fix_mappings))
        .route("/sessions", get(handle_list_sessions))
        .route("/sessions/{session_id}", get(handle_get_session))
        .route("/standard_roles", get(handle_list_standard_roles))
        .route("/standard_roles/update", post(handle_update_standard_role))
        .route(
            "/standard_roles/deactivate",
            post(handle_deactivate_standard_role),
        )
        .route("/mappings", get(handle_list_mappings))
        .route("/mappings/review_queue", get(handle_review_queue))
        .route("/mappings/review", post(handle_review_mapping))
        .route("/employees", post(handle_create_employee))
        .route("/employees", get(handle_list_employees))
        .route("/employees/approve", post(handle_approve_employee))
        .route("/summary", get(handle_summary))
        .route("/wipe", post(handle_wipe))
        .layer(middleware::from_fn(cors_layer))
        .with_state(app_state)
}

/// Stands in for the real client when no API key is configured.
///
/// Every completion attempt fails with the configuration error before
/// any network activity, and the failing session is marked `error`.
struct UnconfiguredGenerator;

#[async_trait::async_trait]
impl TextGenerator for UnconfiguredGenerator {
    async fn complete(&self, _messages: &[ChatMessage]) -> Result<String, LlmError> {
        Err(LlmError::MissingApiKey)
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing rolemap server");

    let mut persistence: Persistence = if let Some(mysql_url) = &args.mysql_url {
        info!("Using MySQL database");
        Persistence::new_with_mysql(mysql_url)?
    } else if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };
    persistence.verify_foreign_key_enforcement()?;

    let generator: Arc<dyn TextGenerator> = match OpenAiGenerator::from_env() {
        Ok(generator) => Arc::new(generator),
        Err(e) => {
            warn!(
                error = %e,
                "AI backend not configured; standardization will fail until ROLEMAP_AI_API_KEY is set"
            );
            Arc::new(UnconfiguredGenerator)
        }
    };

    let app_state: AppState = AppState {
        persistence: Arc::new(Mutex::new(persistence)),
        generator,
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("127.0.0.1:{}", args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;
    use axum::{
        body::Body,
        http::{Request as HttpRequest, StatusCode as HttpStatusCode},
    };
    use rolemap_llm::MockGenerator;
    use tower::ServiceExt;

    fn create_test_app(generator: Arc<dyn TextGenerator>) -> Router {
        let persistence: Persistence =
            Persistence::new_in_memory().expect("Failed to create in-memory persistence");
        build_router(AppState {
            persistence: Arc::new(Mutex::new(persistence)),
            generator,
        })
    }

    fn create_test_app_with_reply(reply: &str) -> Router {
        create_test_app(Arc::new(MockGenerator::with_reply(reply)))
    }

    async fn post_json(app: Router, uri: &str, body: &Value) -> (HttpStatusCode, Value) {
        let response = app
            .oneshot(
                HttpRequest::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        (status, value)
    }

    async fn get_json(app: Router, uri: &str) -> (HttpStatusCode, Value) {
        let response = app
            .oneshot(
                HttpRequest::builder()
                    .method("GET")
                    .uri(uri)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: Value = serde_json::from_slice(&bytes).unwrap();
        (status, value)
    }

    /// A two-role reply whose third mapping falls below the review
    /// threshold.
    fn canned_reply() -> String {
        json!({
            "standardRoles": [
                {
                    "roleTitle": "Network Engineer",
                    "jobFamily": "Engineering",
                    "roleLevel": "Senior",
                    "roleCategory": "Technical",
                    "department": "Network Operations",
                    "description": "Runs the radio access network",
                    "requiredSkills": ["RAN", "LTE"],
                    "experienceMinYears": 3,
                    "experienceMaxYears": 8
                },
                {
                    "roleTitle": "HR Specialist",
                    "jobFamily": "Human Resources",
                    "roleLevel": "Mid",
                    "roleCategory": "Support",
                    "department": "People",
                    "description": "Handles people operations",
                    "requiredSkills": ["HRIS"],
                    "experienceMinYears": 2,
                    "experienceMaxYears": 5
                }
            ],
            "mappings": [
                {
                    "originalTitle": "Ntwk Eng II",
                    "originalDepartment": "Network",
                    "originalLevel": "II",
                    "standardizedTitle": "Network Engineer",
                    "standardizedDepartment": "Network Operations",
                    "standardizedLevel": "Senior",
                    "jobFamily": "Engineering",
                    "confidence": 92
                },
                {
                    "originalTitle": "Network Eng.",
                    "originalDepartment": "Network",
                    "originalLevel": "Sr",
                    "standardizedTitle": "Network Engineer",
                    "standardizedDepartment": "Network Operations",
                    "standardizedLevel": "Senior",
                    "jobFamily": "Engineering",
                    "confidence": 85
                },
                {
                    "originalTitle": "HR Officer",
                    "originalDepartment": "HR",
                    "originalLevel": "Mid",
                    "standardizedTitle": "HR Specialist",
                    "standardizedDepartment": "People",
                    "standardizedLevel": "Mid",
                    "jobFamily": "Human Resources",
                    "confidence": 61
                }
            ]
        })
        .to_string()
    }

    fn upload_request() -> Value {
        // File A carries 5 valid rows plus 2 all-empty rows; file B
        // carries 3 rows.
        json!({
            "actor_id": "analyst-1",
            "role": "analyst",
            "session_name": "q1-catalog",
            "files": [
                {
                    "file_name": "a.csv",
                    "content": "Role Title,Department\nA,Ops\n,\nB,Ops\nC,Ops\n , \nD,Ops\nE,Ops\n"
                },
                {
                    "file_name": "b.csv",
                    "content": "Role Title,Department\nX,HR\nY,HR\nZ,HR\n"
                }
            ]
        })
    }

    async fn upload_session(app: &Router) -> i64 {
        let (status, body) = post_json(app.clone(), "/catalog/upload", &upload_request()).await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["success"], true);
        body["session_id"].as_i64().unwrap()
    }

    async fn standardize(app: &Router, session_id: i64) -> (HttpStatusCode, Value) {
        post_json(
            app.clone(),
            "/standardize",
            &json!({
                "actor_id": "analyst-1",
                "role": "analyst",
                "session_id": session_id
            }),
        )
        .await
    }

    #[tokio::test]
    async fn test_catalog_upload_counts_rows_and_starts_analyzing() {
        let app = create_test_app_with_reply(&canned_reply());

        let (status, body) = post_json(app.clone(), "/catalog/upload", &upload_request()).await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["total_rows"], 8);
        assert_eq!(body["files_parsed"], 2);
        assert_eq!(body["file_errors"].as_array().unwrap().len(), 0);

        let session_id = body["session_id"].as_i64().unwrap();
        let (_, session_body) = get_json(app.clone(), &format!("/sessions/{session_id}")).await;
        assert_eq!(session_body["session"]["status"], "analyzing");
        assert!(session_body["session"]["raw_data"].is_string());

        // The listing view never carries the raw catalog.
        let (_, list_body) = get_json(app, "/sessions").await;
        assert!(list_body["sessions"][0]["raw_data"].is_null());
    }

    #[tokio::test]
    async fn test_catalog_upload_rejects_blank_actor_before_any_write() {
        let app = create_test_app_with_reply(&canned_reply());

        let mut request = upload_request();
        request["actor_id"] = json!("   ");
        let (status, body) = post_json(app.clone(), "/catalog/upload", &request).await;
        assert_eq!(status, HttpStatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert!(
            body["error"]
                .as_str()
                .unwrap()
                .contains("Authentication failed")
        );

        let (_, list_body) = get_json(app, "/sessions").await;
        assert_eq!(list_body["sessions"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_standardize_writes_roles_and_mappings() {
        let app = create_test_app_with_reply(&canned_reply());
        let session_id = upload_session(&app).await;

        let (status, body) = standardize(&app, session_id).await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["success"], true);
        assert_eq!(body["standard_roles_created"], 2);
        assert_eq!(body["mappings_created"], 3);

        let (_, session_body) = get_json(app.clone(), &format!("/sessions/{session_id}")).await;
        assert_eq!(session_body["session"]["status"], "completed");

        // The review flag tracks the threshold: 92 and 85 auto-map,
        // 61 queues.
        let (_, mappings_body) =
            get_json(app.clone(), &format!("/mappings?session_id={session_id}")).await;
        let mappings = mappings_body["mappings"].as_array().unwrap();
        assert_eq!(mappings.len(), 3);
        assert_eq!(mappings[0]["requires_manual_review"], false);
        assert_eq!(mappings[0]["status"], "auto_mapped");
        assert_eq!(mappings[1]["requires_manual_review"], false);
        assert_eq!(mappings[2]["requires_manual_review"], true);
        assert_eq!(mappings[2]["status"], "manual_review");

        let (_, queue_body) = get_json(app, "/mappings/review_queue").await;
        assert_eq!(queue_body["mappings"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_standardize_rejects_completed_session() {
        let app = create_test_app(Arc::new(MockGenerator::with_replies(vec![
            Ok(canned_reply()),
            Ok(canned_reply()),
        ])));
        let session_id = upload_session(&app).await;

        let (status, _) = standardize(&app, session_id).await;
        assert_eq!(status, HttpStatusCode::OK);

        let (status, body) = standardize(&app, session_id).await;
        assert_eq!(status, HttpStatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("completed"));

        // No duplicate roles were written by the rejected rerun.
        let (_, roles_body) = get_json(app, "/standard_roles").await;
        assert_eq!(roles_body["roles"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_reply_missing_mappings_fails_and_marks_session_error() {
        let app = create_test_app_with_reply(r#"{"standardRoles": [{"roleTitle": "X"}]}"#);
        let session_id = upload_session(&app).await;

        let (status, body) = standardize(&app, session_id).await;
        assert_eq!(status, HttpStatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("mappings"));

        // Nothing was committed and the failure is recorded on the
        // session.
        let (_, roles_body) = get_json(app.clone(), "/standard_roles?include_inactive=true").await;
        assert_eq!(roles_body["roles"].as_array().unwrap().len(), 0);
        let (_, mappings_body) = get_json(app.clone(), "/mappings").await;
        assert_eq!(mappings_body["mappings"].as_array().unwrap().len(), 0);

        let (_, session_body) = get_json(app, &format!("/sessions/{session_id}")).await;
        assert_eq!(session_body["session"]["status"], "error");
        assert!(
            session_body["session"]["error_message"]
                .as_str()
                .unwrap()
                .contains("mappings")
        );
    }

    #[tokio::test]
    async fn test_errored_session_can_retry_standardization() {
        let app = create_test_app(Arc::new(MockGenerator::with_replies(vec![
            Err(LlmError::Network(String::from("connection refused"))),
            Ok(canned_reply()),
        ])));
        let session_id = upload_session(&app).await;

        let (status, _) = standardize(&app, session_id).await;
        assert_eq!(status, HttpStatusCode::INTERNAL_SERVER_ERROR);
        let (_, session_body) = get_json(app.clone(), &format!("/sessions/{session_id}")).await;
        assert_eq!(session_body["session"]["status"], "error");

        let (status, body) = standardize(&app, session_id).await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["standard_roles_created"], 2);

        let (_, session_body) = get_json(app, &format!("/sessions/{session_id}")).await;
        assert_eq!(session_body["session"]["status"], "completed");
    }

    #[tokio::test]
    async fn test_missing_api_key_fails_before_any_network_call() {
        let app = create_test_app(Arc::new(UnconfiguredGenerator));
        let session_id = upload_session(&app).await;

        let (status, body) = standardize(&app, session_id).await;
        assert_eq!(status, HttpStatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("API key"));

        let (_, session_body) = get_json(app, &format!("/sessions/{session_id}")).await;
        assert_eq!(session_body["session"]["status"], "error");
    }

    async fn create_employee(app: &Router, name: &str, position: &str, department: &str) -> i64 {
        let (status, body) = post_json(
            app.clone(),
            "/employees",
            &json!({
                "actor_id": "analyst-1",
                "role": "analyst",
                "employee_name": name,
                "current_position": position,
                "current_department": department,
                "current_level": "Senior",
                "skills": ["RAN", "LTE"]
            }),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        body["employee_id"].as_i64().unwrap()
    }

    #[tokio::test]
    async fn test_bulk_assign_covers_every_unassigned_employee() {
        let app = create_test_app_with_reply(&canned_reply());
        let session_id = upload_session(&app).await;
        standardize(&app, session_id).await;

        create_employee(&app, "Budi Santoso", "Network Engineer", "Network Operations").await;
        create_employee(&app, "Sari Dewi", "Receptionist", "Front Desk").await;

        let (status, body) = post_json(
            app.clone(),
            "/bulk_assign_roles",
            &json!({"actor_id": "analyst-1", "role": "analyst"}),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["total"], 2);
        assert_eq!(
            body["assigned"].as_u64().unwrap() + body["failed"].as_u64().unwrap(),
            body["total"].as_u64().unwrap()
        );
        assert_eq!(body["assigned"], 2);

        let details = body["details"].as_array().unwrap();
        assert_eq!(details[0]["status"], "assigned");
        assert_eq!(details[0]["assigned_role"], "Network Engineer");

        // Everyone previously unassigned now carries a role.
        let (_, unassigned_body) = get_json(app.clone(), "/employees?unassigned=true").await;
        assert_eq!(unassigned_body["employees"].as_array().unwrap().len(), 0);

        let (_, all_body) = get_json(app, "/employees").await;
        for employee in all_body["employees"].as_array().unwrap() {
            assert!(employee["standard_role_id"].is_i64());
            assert_eq!(employee["role_assignment_status"], "ai_suggested");
        }
    }

    #[tokio::test]
    async fn test_bulk_assign_without_roles_fails_whole_call() {
        let app = create_test_app_with_reply(&canned_reply());
        create_employee(&app, "Budi Santoso", "Network Engineer", "Network Operations").await;

        let (status, body) = post_json(
            app,
            "/bulk_assign_roles",
            &json!({"actor_id": "analyst-1", "role": "analyst"}),
        )
        .await;
        assert_eq!(status, HttpStatusCode::INTERNAL_SERVER_ERROR);
        assert!(
            body["error"]
                .as_str()
                .unwrap()
                .contains("No active standard roles")
        );
    }

    #[tokio::test]
    async fn test_approve_employee_assignment_flow() {
        let app = create_test_app_with_reply(&canned_reply());
        let session_id = upload_session(&app).await;
        standardize(&app, session_id).await;
        let employee_id =
            create_employee(&app, "Budi Santoso", "Network Engineer", "Network Operations").await;

        post_json(
            app.clone(),
            "/bulk_assign_roles",
            &json!({"actor_id": "analyst-1", "role": "analyst"}),
        )
        .await;

        let (status, body) = post_json(
            app.clone(),
            "/employees/approve",
            &json!({
                "actor_id": "analyst-1",
                "role": "analyst",
                "employee_id": employee_id
            }),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["success"], true);

        let (_, employees_body) = get_json(app, "/employees").await;
        assert_eq!(
            employees_body["employees"][0]["role_assignment_status"],
            "approved"
        );
    }

    /// A reply whose first mapping keeps its title exactly and whose
    /// second drifts far from the recomputed similarity.
    fn drift_reply() -> String {
        json!({
            "standardRoles": [
                {
                    "roleTitle": "Network Engineer",
                    "jobFamily": "Engineering",
                    "roleLevel": "Senior",
                    "roleCategory": "Technical",
                    "department": "Network Operations",
                    "description": "Runs the network",
                    "requiredSkills": ["RAN"],
                    "experienceMinYears": 3,
                    "experienceMaxYears": 8
                }
            ],
            "mappings": [
                {
                    "originalTitle": "Network Engineer",
                    "originalDepartment": "Network",
                    "originalLevel": "Sr",
                    "standardizedTitle": "Network Engineer",
                    "standardizedDepartment": "Network Operations",
                    "standardizedLevel": "Senior",
                    "jobFamily": "Engineering",
                    "confidence": 92
                },
                {
                    "originalTitle": "Ntwk Eng II",
                    "originalDepartment": "Network",
                    "originalLevel": "II",
                    "standardizedTitle": "Network Engineer",
                    "standardizedDepartment": "Network Operations",
                    "standardizedLevel": "Senior",
                    "jobFamily": "Engineering",
                    "confidence": 92
                }
            ]
        })
        .to_string()
    }

    #[tokio::test]
    async fn test_fix_mappings_respects_tolerance_and_is_idempotent() {
        let app = create_test_app_with_reply(&drift_reply());
        let session_id = upload_session(&app).await;
        standardize(&app, session_id).await;

        let fix = json!({"actor_id": "analyst-1", "role": "analyst"});
        let (status, body) = post_json(app.clone(), "/fix_mappings", &fix).await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["total_mappings"], 2);
        // Identical titles recompute to 95, a delta of 3 from the
        // stored 92, inside the tolerance; the abbreviated title
        // shares no token and recomputes far below it.
        assert_eq!(body["mappings_fixed"], 1);

        let (_, mappings_body) = get_json(app.clone(), "/mappings").await;
        let mappings = mappings_body["mappings"].as_array().unwrap();
        assert_eq!(mappings[0]["confidence"], 92);
        assert_eq!(mappings[0]["confidence_source"], "model");
        assert_eq!(mappings[1]["confidence_source"], "heuristic");
        assert_eq!(mappings[1]["requires_manual_review"], true);
        // Recalculation never touches the review status.
        assert_eq!(mappings[1]["status"], "auto_mapped");

        // An immediate second run writes nothing.
        let (_, second) = post_json(app, "/fix_mappings", &fix).await;
        assert_eq!(second["mappings_fixed"], 0);
    }

    #[tokio::test]
    async fn test_review_decision_updates_queue() {
        let app = create_test_app_with_reply(&canned_reply());
        let session_id = upload_session(&app).await;
        standardize(&app, session_id).await;

        let (_, queue_body) = get_json(app.clone(), "/mappings/review_queue").await;
        let mapping_id = queue_body["mappings"][0]["id"].as_i64().unwrap();

        let (status, body) = post_json(
            app.clone(),
            "/mappings/review",
            &json!({
                "actor_id": "analyst-1",
                "role": "analyst",
                "mapping_id": mapping_id,
                "decision": "approved"
            }),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["status"], "approved");

        let (_, queue_body) = get_json(app.clone(), "/mappings/review_queue").await;
        assert_eq!(queue_body["mappings"].as_array().unwrap().len(), 0);

        // Unknown decisions are rejected outright.
        let (status, body) = post_json(
            app,
            "/mappings/review",
            &json!({
                "actor_id": "analyst-1",
                "role": "analyst",
                "mapping_id": mapping_id,
                "decision": "maybe"
            }),
        )
        .await;
        assert_eq!(status, HttpStatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("decision"));
    }

    #[tokio::test]
    async fn test_update_standard_role_bumps_version() {
        let app = create_test_app_with_reply(&canned_reply());
        let session_id = upload_session(&app).await;
        standardize(&app, session_id).await;

        let (_, roles_body) = get_json(app.clone(), "/standard_roles").await;
        let role_id = roles_body["roles"][0]["id"].as_i64().unwrap();

        let (status, body) = post_json(
            app.clone(),
            "/standard_roles/update",
            &json!({
                "actor_id": "analyst-1",
                "role": "analyst",
                "role_id": role_id,
                "role_title": "Principal Network Engineer"
            }),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["role"]["role_title"], "Principal Network Engineer");
        assert_eq!(body["role"]["version"], 2);
        // Unset fields survive the edit.
        assert_eq!(body["role"]["department"], "Network Operations");

        let (status, _) = post_json(
            app.clone(),
            "/standard_roles/deactivate",
            &json!({"actor_id": "analyst-1", "role": "analyst", "role_id": role_id}),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);

        let (_, active_body) = get_json(app, "/standard_roles").await;
        assert_eq!(active_body["roles"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_wipe_is_admin_only_and_reports_counts() {
        let app = create_test_app_with_reply(&canned_reply());
        let session_id = upload_session(&app).await;
        standardize(&app, session_id).await;
        create_employee(&app, "Budi Santoso", "Network Engineer", "Network Operations").await;
        post_json(
            app.clone(),
            "/bulk_assign_roles",
            &json!({"actor_id": "analyst-1", "role": "analyst"}),
        )
        .await;

        // Analysts cannot wipe, and nothing is deleted by the attempt.
        let (status, body) = post_json(
            app.clone(),
            "/wipe",
            &json!({"actor_id": "analyst-1", "role": "analyst"}),
        )
        .await;
        assert_eq!(status, HttpStatusCode::INTERNAL_SERVER_ERROR);
        assert!(body["error"].as_str().unwrap().contains("admin"));
        let (_, sessions_body) = get_json(app.clone(), "/sessions").await;
        assert_eq!(sessions_body["sessions"].as_array().unwrap().len(), 1);

        let (status, body) = post_json(
            app.clone(),
            "/wipe",
            &json!({"actor_id": "admin-1", "role": "admin"}),
        )
        .await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["mappings_deleted"], 3);
        assert_eq!(body["roles_deleted"], 2);
        assert_eq!(body["sessions_deleted"], 1);
        assert_eq!(body["employees_cleared"], 1);

        // Employees survive with their role references cleared.
        let (_, employees_body) = get_json(app.clone(), "/employees").await;
        let employees = employees_body["employees"].as_array().unwrap();
        assert_eq!(employees.len(), 1);
        assert!(employees[0]["standard_role_id"].is_null());
        assert_eq!(employees[0]["role_assignment_status"], "pending");

        let (_, sessions_body) = get_json(app, "/sessions").await;
        assert_eq!(sessions_body["sessions"].as_array().unwrap().len(), 0);
    }

    #[tokio::test]
    async fn test_summary_reports_aggregate_counts() {
        let app = create_test_app_with_reply(&canned_reply());
        let session_id = upload_session(&app).await;
        standardize(&app, session_id).await;
        create_employee(&app, "Budi Santoso", "Network Engineer", "Network Operations").await;

        let (status, body) = get_json(app, "/summary").await;
        assert_eq!(status, HttpStatusCode::OK);
        assert_eq!(body["summary"]["total_sessions"], 1);
        assert_eq!(body["summary"]["completed_sessions"], 1);
        assert_eq!(body["summary"]["active_roles"], 2);
        assert_eq!(body["summary"]["total_mappings"], 3);
        assert_eq!(body["summary"]["mappings_needing_review"], 1);
        assert_eq!(body["summary"]["total_employees"], 1);
        assert_eq!(body["summary"]["unassigned_employees"], 1);
    }

    #[tokio::test]
    async fn test_cors_headers_on_responses_and_preflight() {
        let app = create_test_app_with_reply(&canned_reply());

        let response = app
            .clone()
            .oneshot(
                HttpRequest::builder()
                    .method("GET")
                    .uri("/sessions")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(
            response
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );

        let preflight = app
            .oneshot(
                HttpRequest::builder()
                    .method("OPTIONS")
                    .uri("/standardize")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(preflight.status(), HttpStatusCode::OK);
        assert_eq!(
            preflight
                .headers()
                .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
                .unwrap(),
            "*"
        );
    }

    #[tokio::test]
    async fn test_get_missing_session_fails_with_envelope() {
        let app = create_test_app_with_reply(&canned_reply());

        let (status, body) = get_json(app, "/sessions/404").await;
        assert_eq!(status, HttpStatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body["success"], false);
        assert!(body["error"].as_str().unwrap().contains("404"));
    }
}
