//! [`SqliteStore`] — the SQLite implementation of [`RosterStore`].

use std::path::Path;

use chrono::Utc;
use rusqlite::OptionalExtension as _;

use roster_core::{
  lifecycle::{StatusFilter, Toggle, Transition},
  person::{Person, PersonInput, PersonType, PersonWithType},
  role::{Role, RoleInput},
  store::RosterStore,
};

use crate::{
  Result,
  encode::{
    PERSON_COLUMNS, ROLE_COLUMNS, RawPerson, RawPersonWithType, RawRole,
    encode_date, encode_dt, status_clause,
  },
  schema::SCHEMA,
};

// ─── Tables ──────────────────────────────────────────────────────────────────

/// The bits of a table the shared lifecycle statements need.
#[derive(Clone, Copy)]
struct Table {
  name:      &'static str,
  id_column: &'static str,
}

const PERSON: Table = Table { name: "person", id_column: "person_id" };
const ROLE: Table = Table { name: "role", id_column: "role_id" };

/// Run a guarded transition as one conditional `UPDATE`.
///
/// When nothing matched, the same transaction checks whether the row exists
/// at all so the caller can tell "already in that state" from "missing".
fn guarded_toggle(
  conn:   &mut rusqlite::Connection,
  table:  Table,
  id:     i64,
  toggle: Toggle,
  now:    &str,
) -> rusqlite::Result<Transition> {
  let Table { name, id_column } = table;
  let tx = conn.transaction()?;

  let changed = match toggle {
    Toggle::Deactivate => tx.execute(
      &format!(
        "UPDATE {name} SET is_active = 0, unregistered_date = ?2
         WHERE {id_column} = ?1 AND is_active = 1"
      ),
      rusqlite::params![id, now],
    )?,
    Toggle::Activate => tx.execute(
      &format!(
        "UPDATE {name} SET is_active = 1
         WHERE {id_column} = ?1 AND is_active = 0"
      ),
      rusqlite::params![id],
    )?,
  };

  let outcome = if changed > 0 {
    Transition::Applied
  } else {
    let exists = tx
      .query_row(
        &format!("SELECT 1 FROM {name} WHERE {id_column} = ?1"),
        rusqlite::params![id],
        |_| Ok(()),
      )
      .optional()?
      .is_some();
    if exists { Transition::Unchanged } else { Transition::NotFound }
  };

  tx.commit()?;
  Ok(outcome)
}

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Roster store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  /// Insert or refresh a person type. Person types are reference data, so
  /// this is only reachable from server start-up seeding and fixtures.
  pub async fn upsert_person_type(&self, pt: PersonType) -> Result<()> {
    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO person_type (person_type_id, type_name, person_type)
           VALUES (?1, ?2, ?3)
           ON CONFLICT (person_type_id) DO UPDATE SET
             type_name   = excluded.type_name,
             person_type = excluded.person_type",
          rusqlite::params![pt.person_type_id, pt.type_name, pt.person_type],
        )?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn toggle(&self, table: Table, id: i64, toggle: Toggle) -> Result<Transition> {
    let now = encode_dt(Utc::now());
    let outcome = self
      .conn
      .call(move |conn| Ok(guarded_toggle(conn, table, id, toggle, &now)?))
      .await?;
    tracing::debug!(table = table.name, id, ?toggle, ?outcome, "guarded transition");
    Ok(outcome)
  }

  async fn delete(&self, table: Table, id: i64) -> Result<u64> {
    let Table { name, id_column } = table;
    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          &format!("DELETE FROM {name} WHERE {id_column} = ?1"),
          rusqlite::params![id],
        )?)
      })
      .await?;
    Ok(removed as u64)
  }
}

// ─── RosterStore impl ────────────────────────────────────────────────────────

impl RosterStore for SqliteStore {
  type Error = crate::Error;

  // ── People ────────────────────────────────────────────────────────────────

  async fn create_person(&self, input: PersonInput) -> Result<Person> {
    let complete_name  = input.complete_name();
    let birthdate_str  = encode_date(input.birthdate);
    let registered_str = encode_dt(Utc::now());

    let raw: RawPerson = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          &format!(
            "INSERT INTO person (
               dni, birthdate, names, last_names, complete_name,
               details, bio, image, registered_date, person_type_id
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)
             RETURNING {PERSON_COLUMNS}"
          ),
          rusqlite::params![
            input.dni,
            birthdate_str,
            input.names,
            input.last_names,
            complete_name,
            input.details,
            input.bio,
            input.image,
            registered_str,
            input.person_type_id,
          ],
          RawPerson::from_row,
        )?)
      })
      .await?;

    raw.into_person()
  }

  async fn get_person(&self, id: i64) -> Result<Option<Person>> {
    let raw: Option<RawPerson> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {PERSON_COLUMNS} FROM person WHERE person_id = ?1"),
            rusqlite::params![id],
            RawPerson::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawPerson::into_person).transpose()
  }

  async fn list_people(&self, filter: StatusFilter) -> Result<Vec<Person>> {
    let where_clause = status_clause(filter);

    let raws: Vec<RawPerson> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PERSON_COLUMNS} FROM person {where_clause} ORDER BY person_id"
        ))?;
        let rows = stmt
          .query_map([], RawPerson::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPerson::into_person).collect()
  }

  async fn list_active_people_with_type(&self) -> Result<Vec<PersonWithType>> {
    let raws: Vec<RawPersonWithType> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT p.complete_name, p.is_active, p.birthdate, p.bio, t.type_name
           FROM person p
           JOIN person_type t ON t.person_type_id = p.person_type_id
           WHERE p.is_active = ?1
           ORDER BY p.person_id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![true], |row| {
            Ok(RawPersonWithType {
              complete_name: row.get(0)?,
              is_active:     row.get(1)?,
              birthdate:     row.get(2)?,
              bio:           row.get(3)?,
              type_name:     row.get(4)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPersonWithType::into_view).collect()
  }

  async fn update_person(&self, id: i64, input: PersonInput) -> Result<u64> {
    let complete_name = input.complete_name();
    let birthdate_str = encode_date(input.birthdate);

    let matched = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE person SET
             dni = ?2, names = ?3, last_names = ?4, complete_name = ?5,
             birthdate = ?6, details = ?7, bio = ?8, image = ?9,
             person_type_id = ?10
           WHERE person_id = ?1",
          rusqlite::params![
            id,
            input.dni,
            input.names,
            input.last_names,
            complete_name,
            birthdate_str,
            input.details,
            input.bio,
            input.image,
            input.person_type_id,
          ],
        )?)
      })
      .await?;

    Ok(matched as u64)
  }

  async fn deactivate_person(&self, id: i64) -> Result<Transition> {
    self.toggle(PERSON, id, Toggle::Deactivate).await
  }

  async fn activate_person(&self, id: i64) -> Result<Transition> {
    self.toggle(PERSON, id, Toggle::Activate).await
  }

  async fn delete_person(&self, id: i64) -> Result<u64> { self.delete(PERSON, id).await }

  // ── Roles ─────────────────────────────────────────────────────────────────

  async fn create_role(&self, input: RoleInput) -> Result<Role> {
    let registered_str = encode_dt(Utc::now());

    let raw: RawRole = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          &format!(
            "INSERT INTO role (role_name, description, registered_date)
             VALUES (?1, ?2, ?3)
             RETURNING {ROLE_COLUMNS}"
          ),
          rusqlite::params![input.role_name, input.description, registered_str],
          RawRole::from_row,
        )?)
      })
      .await?;

    raw.into_role()
  }

  async fn get_role(&self, id: i64) -> Result<Option<Role>> {
    let raw: Option<RawRole> = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            &format!("SELECT {ROLE_COLUMNS} FROM role WHERE role_id = ?1"),
            rusqlite::params![id],
            RawRole::from_row,
          )
          .optional()?)
      })
      .await?;

    raw.map(RawRole::into_role).transpose()
  }

  async fn list_roles(&self, filter: StatusFilter) -> Result<Vec<Role>> {
    let where_clause = status_clause(filter);

    let raws: Vec<RawRole> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {ROLE_COLUMNS} FROM role {where_clause} ORDER BY role_id"
        ))?;
        let rows = stmt
          .query_map([], RawRole::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawRole::into_role).collect()
  }

  async fn update_role(&self, id: i64, input: RoleInput) -> Result<u64> {
    let matched = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "UPDATE role SET role_name = ?2, description = ?3 WHERE role_id = ?1",
          rusqlite::params![id, input.role_name, input.description],
        )?)
      })
      .await?;

    Ok(matched as u64)
  }

  async fn deactivate_role(&self, id: i64) -> Result<Transition> {
    self.toggle(ROLE, id, Toggle::Deactivate).await
  }

  async fn activate_role(&self, id: i64) -> Result<Transition> {
    self.toggle(ROLE, id, Toggle::Activate).await
  }

  async fn delete_role(&self, id: i64) -> Result<u64> { self.delete(ROLE, id).await }
}
