//! `GET /` and `POST /` — the login form.

use axum::{
  Form,
  extract::State,
  response::{Html, Redirect},
};
use boletim_core::{provision::provision, store::GradeStore, student::validate_login};
use serde::Deserialize;

use crate::{AppState, error::Error, views};

/// Fields of the login form. Missing fields deserialize as empty so they
/// reach validation instead of failing extraction.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
  #[serde(default)]
  pub ra:       String,
  #[serde(default)]
  pub password: String,
}

pub async fn page() -> Html<String> { Html(views::login_page(None)) }

pub async fn submit<S>(
  State(state): State<AppState<S>>,
  Form(form): Form<LoginForm>,
) -> Result<Redirect, Error>
where
  S: GradeStore + Clone + Send + Sync + 'static,
{
  let id = validate_login(&form.ra, &form.password)?;

  let display_name = provision(
    state.store.as_ref(),
    &id,
    &form.password,
    state.config.credential_policy,
  )
  .await?;

  tracing::info!(student_id = %id, %display_name, "login");
  Ok(Redirect::to(&format!("/results?ra={id}")))
}
