//! Person and PersonType.
//!
//! A person belongs to exactly one person type. Types are reference data:
//! they are joined into read models but never mutated through the API.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::{Result, error::require_text};

// ─── Stored records ──────────────────────────────────────────────────────────

/// A person row as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
  #[serde(rename = "personID")]
  pub person_id:         i64,
  pub dni:               String,
  pub birthdate:         NaiveDate,
  pub names:             String,
  pub last_names:        String,
  /// `names` and `last_names` joined at write time; never re-derived on read.
  pub complete_name:     String,
  pub details:           Option<String>,
  pub bio:               Option<String>,
  pub image:             Option<String>,
  pub is_active:         bool,
  pub registered_date:   DateTime<Utc>,
  pub unregistered_date: Option<DateTime<Utc>>,
  pub votes:             i64,
  #[serde(rename = "personTypeID")]
  pub person_type_id:    i64,
}

/// Category a person is filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonType {
  #[serde(rename = "personTypeID")]
  pub person_type_id: i64,
  pub type_name:      String,
  /// Free-form category label.
  pub person_type:    String,
}

/// Denormalised view of an active person together with their type name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonWithType {
  pub complete_name: String,
  pub is_active:     bool,
  pub birthdate:     NaiveDate,
  pub bio:           Option<String>,
  pub type_name:     String,
}

// ─── Write input ─────────────────────────────────────────────────────────────

/// Caller-supplied columns for both create and full-field update.
///
/// Server-generated columns (`person_id`, `is_active`, `registered_date`,
/// `votes`) and the derived `complete_name` are not part of the input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersonInput {
  pub dni:            String,
  pub birthdate:      NaiveDate,
  pub names:          String,
  pub last_names:     String,
  pub details:        Option<String>,
  pub bio:            Option<String>,
  pub image:          Option<String>,
  pub person_type_id: i64,
}

impl PersonInput {
  pub fn validate(&self) -> Result<()> {
    require_text("dni", &self.dni)?;
    require_text("names", &self.names)?;
    require_text("lastNames", &self.last_names)?;
    Ok(())
  }

  pub fn complete_name(&self) -> String {
    complete_name(&self.names, &self.last_names)
  }
}

/// Join given names and family names with a single space.
pub fn complete_name(names: &str, last_names: &str) -> String {
  format!("{names} {last_names}")
}
