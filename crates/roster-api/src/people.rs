//! Handlers for `/people` endpoints.
//!
//! | Method   | Path | Notes |
//! |----------|------|-------|
//! | `POST`   | `/people` | Body: [`PersonBody`] |
//! | `GET`    | `/people` | All people; 404 when empty |
//! | `GET`    | `/people/active` | Active people; 404 when empty |
//! | `GET`    | `/people/inactive` | Inactive people; 404 when empty |
//! | `GET`    | `/people/number` | Active people joined with their type name; 200 when empty |
//! | `GET`    | `/people/{id}` | Single person |
//! | `PUT`    | `/people/{id}` | Full update; body: [`PersonBody`] |
//! | `PUT`    | `/people/inactivate/{id}` | 400 if already inactive |
//! | `PUT`    | `/people/activate/{id}` | 400 if already active |
//! | `DELETE` | `/people/{id}` | Hard delete |

use std::sync::Arc;

use axum::{Json, extract::State};
use chrono::NaiveDate;
use roster_core::{
  lifecycle::{StatusFilter, Toggle},
  person::PersonInput,
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

/// JSON body accepted by `POST /people` and `PUT /people/{id}`.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonBody {
  pub dni:            String,
  pub birthdate:      NaiveDate,
  pub names:          String,
  pub last_names:     String,
  pub details:        Option<String>,
  pub bio:            Option<String>,
  pub image:          Option<String>,
  #[serde(rename = "personTypeID")]
  pub person_type_id: i64,
}

impl IntoInput for PersonBody {
  type Input = PersonInput;

  fn into_input(self) -> roster_core::Result<PersonInput> {
    let input = PersonInput {
      dni:            self.dni,
      birthdate:      self.birthdate,
      names:          self.names,
      last_names:     self.last_names,
      details:        self.details,
      bio:            self.bio,
      image:          self.image,
      person_type_id: self.person_type_id,
    };
    input.validate()?;
    Ok(input)
  }
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /people`
pub async fn create<S>(
  State(store): State<Arc<S>>,
  ValidJson(input): ValidJson<PersonBody>,
) -> Result<Json<Value>, ApiError>
where
  S: RosterStore,
{
  let person = store
    .create_person(input)
    .await
    .map_err(ApiError::store("Create Person"))?;
  tracing::info!(person_id = person.person_id, "person created");
  Ok(Json(json!({
    "ok":        true,
    "message":   "Person created successfully",
    "newPerson": person,
  })))
}

// ─── Listings ─────────────────────────────────────────────────────────────────

async fn listing<S>(
  store: &S,
  filter: StatusFilter,
  operation: &'static str,
  resource: &str,
) -> Result<Json<Value>, ApiError>
where
  S: RosterStore,
{
  let rows = store
    .list_people(filter)
    .await
    .map_err(ApiError::store(operation))?;
  let people = Listing::non_empty(rows, resource)?;
  Ok(Json(json!({ "ok": true, "people": people })))
}

/// `GET /people`
pub async fn list<S>(State(store): State<Arc<S>>) -> Result<Json<Value>, ApiError>
where
  S: RosterStore,
{
  listing(&*store, StatusFilter::All, "Get People", "All People").await
}

/// `GET /people/active`
pub async fn list_active<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Value>, ApiError>
where
  S: RosterStore,
{
  listing(&*store, StatusFilter::Active, "Get Active People", "Active People").await
}

/// `GET /people/inactive`
pub async fn list_inactive<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Value>, ApiError>
where
  S: RosterStore,
{
  listing(
    &*store,
    StatusFilter::Inactive,
    "Get Inactive People",
    "Inactive People",
  )
  .await
}

/// `GET /people/number` — active people with their type name. Unlike the
/// plain listings, an empty result is still a 200.
pub async fn list_active_with_type<S>(
  State(store): State<Arc<S>>,
) -> Result<Json<Value>, ApiError>
where
  S: RosterStore,
{
  let rows = store
    .list_active_people_with_type()
    .await
    .map_err(ApiError::store("Get Active People with Type"))?;
  let people = Listing::new(rows);
  Ok(Json(json!({ "ok": true, "people": people })))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /people/{id}`
pub async fn get_one<S>(
  State(store): State<Arc<S>>,
  RecordId(id): RecordId,
) -> Result<Json<Value>, ApiError>
where
  S: RosterStore,
{
  let person = store
    .get_person(id)
    .await
    .map_err(ApiError::store("Get Person"))?
    .ok_or_else(|| ApiError::NotFound("Person ID".into()))?;
  Ok(Json(json!({ "ok": true, "person": person })))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /people/{id}` — replaces every mutable column.
pub async fn update<S>(
  State(store): State<Arc<S>>,
  RecordId(id): RecordId,
  ValidJson(input): ValidJson<PersonBody>,
) -> Result<Json<Value>, ApiError>
where
  S: RosterStore,
{
  let count = store
    .update_person(id, input)
    .await
    .map_err(ApiError::store("Update Person"))?;
  if count == 0 {
    return Err(ApiError::NotFound("Person ID".into()));
  }
  tracing::info!(person_id = id, "person updated");
  Ok(Json(json!({
    "ok":      true,
    "message": "Person updated successfully",
    "count":   count,
  })))
}

// ─── Lifecycle ────────────────────────────────────────────────────────────────

/// `PUT /people/inactivate/{id}`
pub async fn inactivate<S>(
  State(store): State<Arc<S>>,
  RecordId(id): RecordId,
) -> Result<Json<Value>, ApiError>
where
  S: RosterStore,
{
  let outcome = store
    .deactivate_person(id)
    .await
    .map_err(ApiError::store("Inactivate Person"))?;
  tracing::info!(person_id = id, ?outcome, "person inactivation");
  transition(outcome, Toggle::Deactivate, "Person")
}

/// `PUT /people/activate/{id}`
pub async fn activate<S>(
  State(store): State<Arc<S>>,
  RecordId(id): RecordId,
) -> Result<Json<Value>, ApiError>
where
  S: RosterStore,
{
  let outcome = store
    .activate_person(id)
    .await
    .map_err(ApiError::store("Activate Person"))?;
  tracing::info!(person_id = id, ?outcome, "person activation");
  transition(outcome, Toggle::Activate, "Person")
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /people/{id}`
pub async fn delete<S>(
  State(store): State<Arc<S>>,
  RecordId(id): RecordId,
) -> Result<Json<Value>, ApiError>
where
  S: RosterStore,
{
  let removed = store
    .delete_person(id)
    .await
    .map_err(ApiError::store("Delete Person"))?;
  if removed == 0 {
    return Err(ApiError::NotFound("Person ID".into()));
  }
  tracing::info!(person_id = id, "person deleted");
  Ok(ok_message("Person deleted successfully"))
}
