//! `POST /login` — JSON counterpart of the portal's login form.
//!
//! Body: `{"id":"123456","credential":"..."}`. Validates, provisions the
//! student on first contact, and returns `{"id","display_name"}`.

use axum::{Json, extract::State};
use boletim_core::{provision::provision, store::GradeStore, student::validate_login};
use serde::{Deserialize, Serialize};

use crate::{ApiState, error::ApiError};

#[derive(Debug, Deserialize)]
pub struct LoginBody {
  #[serde(default)]
  pub id:         String,
  #[serde(default)]
  pub credential: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
  pub id:           String,
  pub display_name: String,
}

pub async fn handler<S>(
  State(state): State<ApiState<S>>,
  Json(body): Json<LoginBody>,
) -> Result<Json<LoginResponse>, ApiError>
where
  S: GradeStore,
{
  let id = validate_login(&body.id, &body.credential)
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

  let display_name =
    provision(state.store.as_ref(), &id, &body.credential, state.policy).await?;

  Ok(Json(LoginResponse { id: id.to_string(), display_name }))
}
