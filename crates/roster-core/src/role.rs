//! Role — a named position people can be nominated for.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Result, error::require_text};

/// A role row as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Role {
  #[serde(rename = "roleID")]
  pub role_id:           i64,
  pub role_name:         String,
  pub description:       Option<String>,
  pub is_active:         bool,
  pub registered_date:   DateTime<Utc>,
  pub unregistered_date: Option<DateTime<Utc>>,
}

/// Caller-supplied columns for both create and full-field update.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoleInput {
  pub role_name:   String,
  pub description: Option<String>,
}

impl RoleInput {
  pub fn validate(&self) -> Result<()> { require_text("roleName", &self.role_name) }
}
