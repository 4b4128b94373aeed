//! Extractors that turn malformed requests into envelope-shaped 400s.
//!
//! axum's stock `Json` and `Path` rejections answer with plain-text bodies
//! and, for JSON, a 422. These wrappers route those rejections (and domain
//! validation failures) through [`ApiError::BadRequest`] instead.

use axum::{
  Json,
  extract::{FromRequest, FromRequestParts, Path, Request},
  http::request::Parts,
};
use serde::de::DeserializeOwned;

use crate::error::ApiError;

/// A JSON request body that converts into a validated domain input.
pub trait IntoInput: DeserializeOwned {
  type Input;

  fn into_input(self) -> roster_core::Result<Self::Input>;
}

/// Deserialises `B` from the body and yields its validated input.
pub struct ValidJson<B: IntoInput>(pub B::Input);

impl<S, B> FromRequest<S> for ValidJson<B>
where
  S: Send + Sync,
  B: IntoInput,
{
  type Rejection = ApiError;

  async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
    let Json(body) = Json::<B>::from_request(req, state)
      .await
      .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let input = body
      .into_input()
      .map_err(|e| ApiError::BadRequest(e.to_string()))?;
    Ok(Self(input))
  }
}

/// The integer identifier in the last path segment.
pub struct RecordId(pub i64);

impl<S> FromRequestParts<S> for RecordId
where
  S: Send + Sync,
{
  type Rejection = ApiError;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &S,
  ) -> Result<Self, Self::Rejection> {
    let Path(id) = Path::<i64>::from_request_parts(parts, state)
      .await
      .map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    Ok(Self(id))
  }
}
