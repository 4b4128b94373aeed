//! JSON REST API for Roster.
//!
//! Exposes an axum [`Router`] backed by any [`roster_core::store::RosterStore`].
//! The store is handed in explicitly and shared through axum state.
//!
//! # Mounting
//!
//! ```rust,ignore
//! let app = roster_api::api_router(Arc::new(store));
//! ```

pub mod envelope;
pub mod error;
pub mod extract;
pub mod people;
pub mod roles;

use std::{path::PathBuf, sync::Arc};

use axum::{
  Router,
  routing::{get, put},
};
use roster_core::{person::PersonType, store::RosterStore};
use serde::Deserialize;

pub use error::ApiError;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `ROSTER_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  #[serde(default = "default_host")]
  pub host:          String,
  #[serde(default = "default_port")]
  pub port:          u16,
  #[serde(default = "default_database_path")]
  pub database_path: PathBuf,
  /// Reference rows upserted into `person_type` at start-up.
  #[serde(default)]
  pub person_types:  Vec<PersonTypeSeed>,
}

/// One `[[person_types]]` entry in the configuration file.
#[derive(Debug, Deserialize, Clone)]
pub struct PersonTypeSeed {
  pub id:        i64,
  pub type_name: String,
  pub category:  String,
}

impl From<PersonTypeSeed> for PersonType {
  fn from(seed: PersonTypeSeed) -> Self {
    PersonType {
      person_type_id: seed.id,
      type_name:      seed.type_name,
      person_type:    seed.category,
    }
  }
}

fn default_host() -> String { "127.0.0.1".to_owned() }

fn default_port() -> u16 { 8080 }

fn default_database_path() -> PathBuf { PathBuf::from("roster.db") }

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: RosterStore + 'static,
{
  Router::new()
    // People
    .route("/people", get(people::list::<S>).post(people::create::<S>))
    .route("/people/active", get(people::list_active::<S>))
    .route("/people/inactive", get(people::list_inactive::<S>))
    .route("/people/number", get(people::list_active_with_type::<S>))
    .route(
      "/people/{id}",
      get(people::get_one::<S>)
        .put(people::update::<S>)
        .delete(people::delete::<S>),
    )
    .route("/people/inactivate/{id}", put(people::inactivate::<S>))
    .route("/people/activate/{id}", put(people::activate::<S>))
    // Roles
    .route("/roles", get(roles::list::<S>).post(roles::create::<S>))
    .route("/roles/number", get(roles::list_active_with_counter::<S>))
    .route("/roles/active", get(roles::list_active::<S>))
    .route("/roles/inactive", get(roles::list_inactive::<S>))
    .route(
      "/roles/{id}",
      get(roles::get_one::<S>)
        .put(roles::update::<S>)
        .delete(roles::delete::<S>),
    )
    .route("/roles/inactivate/{id}", put(roles::inactivate::<S>))
    .route("/roles/activate/{id}", put(roles::activate::<S>))
    .with_state(store)
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
  };
  use roster_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  #[test]
  fn config_defaults_and_seeds() {
    let settings = config::Config::builder()
      .add_source(config::File::from_str(
        r#"
          port = 9000

          [[person_types]]
          id        = 3
          type_name = "Staff"
          category  = "internal"
        "#,
        config::FileFormat::Toml,
      ))
      .build()
      .unwrap();
    let cfg: ServerConfig = settings.try_deserialize().unwrap();
    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.port, 9000);
    assert_eq!(cfg.database_path, PathBuf::from("roster.db"));

    let pt = PersonType::from(cfg.person_types[0].clone());
    assert_eq!(pt.person_type_id, 3);
    assert_eq!(pt.person_type, "internal");
  }

  async fn make_store() -> Arc<SqliteStore> {
    let store = SqliteStore::open_in_memory().await.unwrap();
    store
      .upsert_person_type(PersonType {
        person_type_id: 1,
        type_name:      "Candidate".to_string(),
        person_type:    "electoral".to_string(),
      })
      .await
      .unwrap();
    Arc::new(store)
  }

  async fn call(
    store: &Arc<SqliteStore>,
    method: &str,
    uri: &str,
    body: Option<Value>,
  ) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let req = match body {
      Some(v) => builder
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(v.to_string()))
        .unwrap(),
      None => builder.body(Body::empty()).unwrap(),
    };
    let resp = api_router(store.clone()).oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
      Value::Null
    } else {
      serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
  }

  fn ana() -> Value {
    json!({
      "dni":          "123",
      "birthdate":    "1990-05-17",
      "names":        "Ana",
      "lastNames":    "Lopez",
      "details":      "runs the library",
      "bio":          "born in Quito",
      "image":        "ana.png",
      "personTypeID": 1,
    })
  }

  async fn create_ana(store: &Arc<SqliteStore>) -> i64 {
    let (status, body) = call(store, "POST", "/people", Some(ana())).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["newPerson"]["personID"].as_i64().unwrap()
  }

  // ── People: lifecycle scenario ──────────────────────────────────────────────

  #[tokio::test]
  async fn create_then_deactivate_twice() {
    let store = make_store().await;

    let (status, body) = call(&store, "POST", "/people", Some(ana())).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    let person = &body["newPerson"];
    assert_eq!(person["completeName"], "Ana Lopez");
    assert_eq!(person["isActive"], true);
    assert!(person["unregisteredDate"].is_null());
    assert_eq!(person["votes"], 0);
    let id = person["personID"].as_i64().unwrap();

    let (status, body) =
      call(&store, "PUT", &format!("/people/inactivate/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Person inactivated successfully");

    let (_, body) = call(&store, "GET", &format!("/people/{id}"), None).await;
    assert_eq!(body["person"]["isActive"], false);
    assert!(body["person"]["unregisteredDate"].is_string());

    let (status, body) =
      call(&store, "PUT", &format!("/people/inactivate/{id}"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], false);
    assert_eq!(body["error"], "Error 0");
  }

  #[tokio::test]
  async fn activate_active_person_is_rejected() {
    let store = make_store().await;
    let id = create_ana(&store).await;

    let (status, _) = call(&store, "PUT", &format!("/people/activate/{id}"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn reactivation_keeps_unregistered_date() {
    let store = make_store().await;
    let id = create_ana(&store).await;

    call(&store, "PUT", &format!("/people/inactivate/{id}"), None).await;
    let (_, before) = call(&store, "GET", &format!("/people/{id}"), None).await;

    let (status, _) = call(&store, "PUT", &format!("/people/activate/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (_, after) = call(&store, "GET", &format!("/people/{id}"), None).await;
    assert_eq!(after["person"]["isActive"], true);
    assert_eq!(
      after["person"]["unregisteredDate"],
      before["person"]["unregisteredDate"]
    );
    assert_eq!(
      after["person"]["registeredDate"],
      before["person"]["registeredDate"]
    );
  }

  #[tokio::test]
  async fn transitions_on_missing_person_are_404() {
    let store = make_store().await;
    let (status, body) = call(&store, "PUT", "/people/inactivate/41", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Active Person not found");
    let (status, body) = call(&store, "PUT", "/people/activate/41", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Inactive Person not found");
  }

  // ── People: listings ────────────────────────────────────────────────────────

  #[tokio::test]
  async fn empty_listings_are_404() {
    let store = make_store().await;
    for uri in ["/people", "/people/active", "/people/inactive"] {
      let (status, body) = call(&store, "GET", uri, None).await;
      assert_eq!(status, StatusCode::NOT_FOUND, "{uri}");
      assert_eq!(body["ok"], false);
    }
  }

  #[tokio::test]
  async fn empty_active_with_type_is_ok() {
    let store = make_store().await;
    let (status, body) = call(&store, "GET", "/people/number", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["ok"], true);
    assert_eq!(body["people"]["count"], 0);
    assert_eq!(body["people"]["rows"], json!([]));

    let id = create_ana(&store).await;
    call(&store, "PUT", &format!("/people/inactivate/{id}"), None).await;
    let (status, body) = call(&store, "GET", "/people/number", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["people"]["count"], 0);
  }

  #[tokio::test]
  async fn listings_split_by_status() {
    let store = make_store().await;
    let first = create_ana(&store).await;
    create_ana(&store).await;
    create_ana(&store).await;
    call(&store, "PUT", &format!("/people/inactivate/{first}"), None).await;

    let (_, all) = call(&store, "GET", "/people", None).await;
    let (_, active) = call(&store, "GET", "/people/active", None).await;
    let (_, inactive) = call(&store, "GET", "/people/inactive", None).await;

    assert_eq!(all["people"]["count"], 3);
    assert_eq!(active["people"]["count"], 2);
    assert_eq!(inactive["people"]["count"], 1);
    assert_eq!(inactive["people"]["rows"][0]["personID"], first);
  }

  #[tokio::test]
  async fn active_with_type_projects_joined_view() {
    let store = make_store().await;
    create_ana(&store).await;

    let (status, body) = call(&store, "GET", "/people/number", None).await;
    assert_eq!(status, StatusCode::OK);
    let row = &body["people"]["rows"][0];
    assert_eq!(row["completeName"], "Ana Lopez");
    assert_eq!(row["typeName"], "Candidate");
    assert_eq!(row["birthdate"], "1990-05-17");
    assert_eq!(row["bio"], "born in Quito");
    assert!(row.get("dni").is_none());
  }

  // ── People: update / delete ─────────────────────────────────────────────────

  #[tokio::test]
  async fn update_recomputes_complete_name() {
    let store = make_store().await;
    let id = create_ana(&store).await;

    let mut body = ana();
    body["names"] = json!("Ana Maria");
    let (status, resp) =
      call(&store, "PUT", &format!("/people/{id}"), Some(body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(resp["count"], 1);

    let (_, fetched) = call(&store, "GET", &format!("/people/{id}"), None).await;
    assert_eq!(fetched["person"]["completeName"], "Ana Maria Lopez");
  }

  #[tokio::test]
  async fn update_missing_person_is_404() {
    let store = make_store().await;
    let (status, _) = call(&store, "PUT", "/people/77", Some(ana())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn delete_then_fetch_is_404() {
    let store = make_store().await;
    let id = create_ana(&store).await;

    let (status, _) = call(&store, "DELETE", &format!("/people/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(&store, "GET", &format!("/people/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&store, "DELETE", &format!("/people/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  // ── People: bad input ───────────────────────────────────────────────────────

  #[tokio::test]
  async fn missing_field_is_400() {
    let store = make_store().await;
    let mut body = ana();
    body.as_object_mut().unwrap().remove("lastNames");
    let (status, resp) = call(&store, "POST", "/people", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(resp["ok"], false);
    assert!(resp["error"].as_str().unwrap().contains("lastNames"));
  }

  #[tokio::test]
  async fn blank_names_is_400() {
    let store = make_store().await;
    let mut body = ana();
    body["names"] = json!("  ");
    let (status, _) = call(&store, "POST", "/people", Some(body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn non_numeric_id_is_400() {
    let store = make_store().await;
    let (status, body) = call(&store, "DELETE", "/people/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["ok"], false);
  }

  #[tokio::test]
  async fn unknown_person_type_is_500() {
    let store = make_store().await;
    let mut body = ana();
    body["personTypeID"] = json!(99);
    let (status, resp) = call(&store, "POST", "/people", Some(body)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(resp["message"], "Error in Create Person");
  }

  // ── Roles ───────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn role_round_trip() {
    let store = make_store().await;

    let (status, body) = call(
      &store,
      "POST",
      "/roles",
      Some(json!({ "roleName": "President", "description": "heads the board" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["newRole"]["isActive"], true);
    let id = body["newRole"]["roleID"].as_i64().unwrap();

    let (_, counted) = call(&store, "GET", "/roles/number", None).await;
    assert_eq!(counted["roles"]["count"], 1);

    let (_, bare) = call(&store, "GET", "/roles/active", None).await;
    assert_eq!(bare["roles"][0]["roleName"], "President");

    let (status, _) = call(
      &store,
      "PUT",
      &format!("/roles/{id}"),
      Some(json!({ "roleName": "Chair" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(&store, "PUT", &format!("/roles/inactivate/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = call(&store, "PUT", &format!("/roles/inactivate/{id}"), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = call(&store, "GET", "/roles/active", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (_, inactive) = call(&store, "GET", "/roles/inactive", None).await;
    assert_eq!(inactive["roles"]["rows"][0]["roleName"], "Chair");

    let (status, _) = call(&store, "PUT", &format!("/roles/activate/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = call(&store, "DELETE", &format!("/roles/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = call(&store, "GET", "/roles", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn missing_role_is_404_everywhere() {
    let store = make_store().await;

    let (status, body) =
      call(&store, "PUT", "/roles/55", Some(json!({ "roleName": "Chair" }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Role ID not found");

    let (status, body) = call(&store, "PUT", "/roles/activate/55", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Inactive Role not found");

    let (status, body) = call(&store, "PUT", "/roles/inactivate/55", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Active Role not found");

    let (status, _) = call(&store, "DELETE", "/roles/55", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = call(&store, "GET", "/roles/55", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
  }

  #[tokio::test]
  async fn blank_role_name_is_400() {
    let store = make_store().await;
    let (status, _) =
      call(&store, "POST", "/roles", Some(json!({ "roleName": "" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
  }
}
