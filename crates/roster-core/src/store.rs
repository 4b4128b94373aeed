//! The `RosterStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `roster-store-sqlite`).
//! The HTTP layer depends on this abstraction, not on any concrete backend,
//! and receives the store as an explicit handle rather than a global.

use std::future::Future;

use crate::{
  lifecycle::{StatusFilter, Transition},
  person::{Person, PersonInput, PersonWithType},
  role::{Role, RoleInput},
};

/// Abstraction over a Roster storage backend.
///
/// Every mutating method is a single conditional statement from the caller's
/// point of view: there is no separate existence probe that could race with
/// the write.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait RosterStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── People ────────────────────────────────────────────────────────────

  /// Insert a new person. The store assigns the identifier, the registration
  /// time, `is_active = true` and `votes = 0`, and derives the complete name.
  fn create_person(
    &self,
    input: PersonInput,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Retrieve a person by identifier. Returns `None` if not found.
  fn get_person(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// List people, restricted to the given status slice, ordered by id.
  fn list_people(
    &self,
    filter: StatusFilter,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  /// Active people joined with the name of their person type.
  fn list_active_people_with_type(
    &self,
  ) -> impl Future<Output = Result<Vec<PersonWithType>, Self::Error>> + Send + '_;

  /// Replace every mutable column of a person. Active status is not
  /// consulted. Returns the number of rows matched (0 or 1).
  fn update_person(
    &self,
    id: i64,
    input: PersonInput,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Flip an active person to inactive, stamping the unregistration time.
  fn deactivate_person(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Transition, Self::Error>> + Send + '_;

  /// Flip an inactive person back to active. Timestamps are left untouched.
  fn activate_person(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Transition, Self::Error>> + Send + '_;

  /// Hard-delete a person regardless of status. Returns rows removed.
  fn delete_person(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  // ── Roles ─────────────────────────────────────────────────────────────

  /// Insert a new role. The store assigns the identifier, the registration
  /// time and `is_active = true`.
  fn create_role(
    &self,
    input: RoleInput,
  ) -> impl Future<Output = Result<Role, Self::Error>> + Send + '_;

  /// Retrieve a role by identifier. Returns `None` if not found.
  fn get_role(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Role>, Self::Error>> + Send + '_;

  /// List roles, restricted to the given status slice, ordered by id.
  fn list_roles(
    &self,
    filter: StatusFilter,
  ) -> impl Future<Output = Result<Vec<Role>, Self::Error>> + Send + '_;

  /// Replace every mutable column of a role. Returns rows matched.
  fn update_role(
    &self,
    id: i64,
    input: RoleInput,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Flip an active role to inactive, stamping the unregistration time.
  fn deactivate_role(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Transition, Self::Error>> + Send + '_;

  /// Flip an inactive role back to active.
  fn activate_role(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Transition, Self::Error>> + Send + '_;

  /// Hard-delete a role regardless of status. Returns rows removed.
  fn delete_role(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;
}
