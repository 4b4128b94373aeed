//! Handlers for `/roles` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/roles` | Body: [`RoleBody`] |
//! | `GET`    | `/roles` | All roles with count |
//! | `GET`    | `/roles/number` | Active roles with count |
//! | `GET`    | `/roles/active` | Active roles, bare array |
//! | `GET`    | `/roles/inactive` | Inactive roles with count |
//! | `GET`    | `/roles/{id}` | Single role |
//! | `PUT`    | `/roles/{id}` | Full update; body: [`RoleBody`] |
//! | `PUT`    | `/roles/inactivate/{id}` | 400 if already inactive |
//! | `PUT`    | `/roles/activate/{id}` | 400 if already active |
//! | `DELETE` | `/roles/{id}` | Hard delete |
//!
//! Every listing answers 404 when it would be empty.

use std::sync::Arc;

use axum::{Json, extract::State};
use roster_core::{
  lifecycle::{StatusFilter, Toggle},
  role::{Role, RoleInput},
  store::RosterStore,
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::{
  envelope::{Listing, ok_message, transition},
  error::ApiError,
  extract::{IntoInput, RecordId, ValidJson},
};

// ─── Body ─────────────────────────────────────────────────────────────────────

/// JSON body accepted by `POST /roles` and `PUT /roles/{id}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleBody {
  pub role_name:   String,
  pub description: Option<String>,
}

impl IntoInput for RoleBody {
  type Input = RoleInput;

  fn into_input(self) -> roster_core::Result<RoleInput> {
    let input = RoleInput {
      role_name:   self.role_name,
      description: self.description,
    };
    input.validate()?;
    Ok(input)
  }
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /roles`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  ValidJson(input): ValidJson<RoleBody>,
) -> Result<Json<Value>, ApiError>
where
  S: RosterStore,
{
  let role = store
    .create_role(input)
    .await
    .map_err(ApiError::store("Create Role"))?;
  tracing::info!(role_id = role.role_id, "role created");
  Ok(Json(json!({
    "ok":      true,
    "message": "Role created successfully",
    "newRole": role,
  })))
}

// ─── Listings ─────────────────────────────────────────────────────────────────

async fn fetch<S>(
  store: &S,
  filter: StatusFilter,
  operation: &'static str,
  resource: &str,
) -> Result<Listing<Role>, ApiError>
where
  S: RosterStore,
{
  let rows = store
    .list_roles(filter)
    .await
    .map_err(ApiError::store(operation))?;
  Listing::non_empty(rows, resource)
}

/// `GET /roles`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Value>, ApiError>
where
  S: RosterStore,
{
  let roles = fetch(&*store, StatusFilter::All, "Get Roles", "All Roles").await?;
  Ok(Json(json!({ "ok": true, "roles": roles })))
}

/// `GET /roles/number` — active roles together with their count.
pub async fn list_active_with_counter<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Value>, ApiError>
where
  S: RosterStore,
{
  let roles = fetch(
    &*store,
    StatusFilter::Active,
    "Get Active Roles with Counter",
    "Active Roles",
  )
  .await?;
  Ok(Json(json!({ "ok": true, "roles": roles })))
}

/// `GET /roles/active` — active roles as a bare array.
pub async fn list_active<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Value>, ApiError>
where
  S: RosterStore,
{
  let roles = fetch(&*store, StatusFilter::Active, "Get Active Roles", "Active Roles")
    .await?;
  Ok(Json(json!({ "ok": true, "roles": roles.rows })))
}

/// `GET /roles/inactive`
pub async fn list_inactive<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Value>, ApiError>
where
  S: RosterStore,
{
  let roles = fetch(
    &*store,
    StatusFilter::Inactive,
    "Get Inactive Roles",
    "Inactive Roles",
  )
  .await?;
  Ok(Json(json!({ "ok": true, "roles": roles })))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /roles/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  RecordId(id): RecordId,
) -> Result<Json<Value>, ApiError>
where
  S: RosterStore,
{
  let role = store
    .get_role(id)
    .await
    .map_err(ApiError::store("Get Role"))?
    .ok_or_else(|| ApiError::NotFound("Role ID".into()))?;
  Ok(Json(json!({ "ok": true, "role": role })))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /roles/{id}`
pub async fn update<S>(
  State(store): State<Arc<S>>,
  RecordId(id): RecordId,
  ValidJson(input): ValidJson<RoleBody>,
) -> Result<Json<Value>, ApiError>
where
  S: RosterStore,
{
  let count = store
    .update_role(id, input)
    .await
    .map_err(ApiError::store("Update Role"))?;
  if count == 0 {
    return Err(ApiError::NotFound("Role ID".into()));
  }
  tracing::info!(role_id = id, "role updated");
  Ok(Json(json!({
    "ok":      true,
    "message": "Role updated successfully",
    "count":   count,
  })))
}

// ─── Lifecycle ────────────────────────────────────────────────────────────────

/// `PUT /roles/inactivate/{id}`
pub async fn inactivate<S>(
  State(store): State<Arc<S>>,
  RecordId(id): RecordId,
) -> Result<Json<Value>, ApiError>
where
  S: RosterStore,
{
  let outcome = store
    .deactivate_role(id)
    .await
    .map_err(ApiError::store("Inactivate Role"))?;
  tracing::info!(role_id = id, ?outcome, "role inactivation");
  transition(outcome, Toggle::Deactivate, "Role")
}

/// `PUT /roles/activate/{id}`
pub async fn activate<S>(
  State(store): State<Arc<S>>,
  RecordId(id): RecordId,
) -> Result<Json<Value>, ApiError>
where
  S: RosterStore,
{
  let outcome = store
    .activate_role(id)
    .await
    .map_err(ApiError::store("Activate Role"))?;
  tracing::info!(role_id = id, ?outcome, "role activation");
  transition(outcome, Toggle::Activate, "Role")
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /roles/{id}`
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  RecordId(id): RecordId,
) -> Result<Json<Value>, ApiError>
where
  S: RosterStore,
{
  let removed = store
    .delete_role(id)
    .await
    .map_err(ApiError::store("Delete Role"))?;
  if removed == 0 {
    return Err(ApiError::NotFound("Role ID".into()));
  }
  tracing::info!(role_id = id, "role deleted");
  Ok(ok_message("Role deleted successfully"))
}
