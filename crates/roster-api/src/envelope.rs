//! Success envelopes shared by the entity handlers.

use axum::Json;
use roster_core::lifecycle::{Toggle, Transition};
use serde::Serialize;
use serde_json::{Value, json};

use crate::error::ApiError;

/// A listing with its row count, as returned under the entity's data key.
#[derive(Debug, Serialize)]
pub struct Listing<T> {
  pub count: usize,
  pub rows:  Vec<T>,
}

impl<T> Listing<T> {
  pub fn new(rows: Vec<T>) -> Self { Self { count: rows.len(), rows } }

  /// Wrap `rows`, treating an empty result as a missing `resource`.
  pub fn non_empty(rows: Vec<T>, resource: &str) -> Result<Self, ApiError> {
    if rows.is_empty() {
      return Err(ApiError::NotFound(resource.to_owned()));
    }
    Ok(Self::new(rows))
  }
}

/// `{ ok: true, message }`
pub fn ok_message(message: impl Into<String>) -> Json<Value> {
  Json(json!({ "ok": true, "message": message.into() }))
}

/// Map a guarded transition outcome for `entity` (e.g. `"Person"`) onto the
/// 200 / 400 / 404 envelopes.
pub fn transition(
  outcome: Transition,
  toggle: Toggle,
  entity: &str,
) -> Result<Json<Value>, ApiError> {
  let (done, doing, state, source) = match toggle {
    Toggle::Deactivate => ("inactivated", "inactivating", "inactive", "Active"),
    Toggle::Activate => ("activated", "activating", "active", "Inactive"),
  };
  match outcome {
    Transition::Applied => Ok(ok_message(format!("{entity} {done} successfully"))),
    Transition::Unchanged => Err(ApiError::Conflict(format!(
      "Error while {doing} a {entity} or {entity} already {state}"
    ))),
    Transition::NotFound => Err(ApiError::NotFound(format!("{source} {entity}"))),
  }
}
