//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Timestamps are stored as RFC 3339 strings, calendar dates as `YYYY-MM-DD`,
//! and booleans as `0`/`1` integers.

use chrono::{DateTime, NaiveDate, Utc};
use roster_core::{
  lifecycle::StatusFilter,
  person::{Person, PersonWithType},
  role::Role,
};

use crate::{Error, Result};

// ─── DateTime<Utc>
// ────────────────────────────────────────────────────────────

pub fn encode_dt(dt: DateTime<Utc>) -> String { dt.to_rfc3339() }

pub fn decode_dt(s: &str) -> Result<DateTime<Utc>> {
  DateTime::parse_from_rfc3339(s)
    .map(|dt| dt.with_timezone(&Utc))
    .map_err(|e| Error::DateParse(e.to_string()))
}

// ─── NaiveDate ───────────────────────────────────────────────────────────────

const DATE_FORMAT: &str = "%Y-%m-%d";

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── StatusFilter ────────────────────────────────────────────────────────────

/// `WHERE` clause selecting the rows admitted by `f`. Empty for
/// [`StatusFilter::All`].
pub fn status_clause(f: StatusFilter) -> &'static str {
  match f {
    StatusFilter::All => "",
    StatusFilter::Active => "WHERE is_active = 1",
    StatusFilter::Inactive => "WHERE is_active = 0",
  }
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching the field order of [`RawPerson::from_row`].
pub const PERSON_COLUMNS: &str = "person_id, dni, birthdate, names, last_names, \
   complete_name, details, bio, image, is_active, registered_date, \
   unregistered_date, votes, person_type_id";

/// Raw values read directly from a `person` row.
pub struct RawPerson {
  pub person_id:         i64,
  pub dni:               String,
  pub birthdate:         String,
  pub names:             String,
  pub last_names:        String,
  pub complete_name:     String,
  pub details:           Option<String>,
  pub bio:               Option<String>,
  pub image:             Option<String>,
  pub is_active:         bool,
  pub registered_date:   String,
  pub unregistered_date: Option<String>,
  pub votes:             i64,
  pub person_type_id:    i64,
}

impl RawPerson {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      person_id:         row.get(0)?,
      dni:               row.get(1)?,
      birthdate:         row.get(2)?,
      names:             row.get(3)?,
      last_names:        row.get(4)?,
      complete_name:     row.get(5)?,
      details:           row.get(6)?,
      bio:               row.get(7)?,
      image:             row.get(8)?,
      is_active:         row.get(9)?,
      registered_date:   row.get(10)?,
      unregistered_date: row.get(11)?,
      votes:             row.get(12)?,
      person_type_id:    row.get(13)?,
    })
  }

  pub fn into_person(self) -> Result<Person> {
    Ok(Person {
      person_id:         self.person_id,
      dni:               self.dni,
      birthdate:         decode_date(&self.birthdate)?,
      names:             self.names,
      last_names:        self.last_names,
      complete_name:     self.complete_name,
      details:           self.details,
      bio:               self.bio,
      image:             self.image,
      is_active:         self.is_active,
      registered_date:   decode_dt(&self.registered_date)?,
      unregistered_date: self
        .unregistered_date
        .as_deref()
        .map(decode_dt)
        .transpose()?,
      votes:             self.votes,
      person_type_id:    self.person_type_id,
    })
  }
}

/// Raw values for the person ⋈ person_type projection.
pub struct RawPersonWithType {
  pub complete_name: String,
  pub is_active:     bool,
  pub birthdate:     String,
  pub bio:           Option<String>,
  pub type_name:     String,
}

impl RawPersonWithType {
  pub fn into_view(self) -> Result<PersonWithType> {
    Ok(PersonWithType {
      complete_name: self.complete_name,
      is_active:     self.is_active,
      birthdate:     decode_date(&self.birthdate)?,
      bio:           self.bio,
      type_name:     self.type_name,
    })
  }
}

/// Column list matching the field order of [`RawRole::from_row`].
pub const ROLE_COLUMNS: &str =
  "role_id, role_name, description, is_active, registered_date, unregistered_date";

/// Raw values read directly from a `role` row.
pub struct RawRole {
  pub role_id:           i64,
  pub role_name:         String,
  pub description:       Option<String>,
  pub is_active:         bool,
  pub registered_date:   String,
  pub unregistered_date: Option<String>,
}

impl RawRole {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      role_id:           row.get(0)?,
      role_name:         row.get(1)?,
      description:       row.get(2)?,
      is_active:         row.get(3)?,
      registered_date:   row.get(4)?,
      unregistered_date: row.get(5)?,
    })
  }

  pub fn into_role(self) -> Result<Role> {
    Ok(Role {
      role_id:           self.role_id,
      role_name:         self.role_name,
      description:       self.description,
      is_active:         self.is_active,
      registered_date:   decode_dt(&self.registered_date)?,
      unregistered_date: self
        .unregistered_date
        .as_deref()
        .map(decode_dt)
        .transpose()?,
    })
  }
}
