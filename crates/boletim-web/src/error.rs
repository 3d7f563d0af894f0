//! Error types and axum `IntoResponse` implementation.
//!
//! Every failure of the login form re-renders the login page with a
//! user-facing message; details only go to the log.

use axum::{
  http::StatusCode,
  response::{Html, IntoResponse, Response},
};
use boletim_core::ValidationError;
use thiserror::Error;

use crate::views;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Validation(#[from] ValidationError),
  #[error("unauthorized")]
  Unauthorized,
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
  #[error("internal error: {0}")]
  Internal(String),
}

impl From<boletim_core::Error> for Error {
  fn from(err: boletim_core::Error) -> Self {
    match err {
      boletim_core::Error::Validation(v) => Error::Validation(v),
      boletim_core::Error::Authentication(_) => Error::Unauthorized,
      boletim_core::Error::CredentialHash(m) => Error::Internal(m),
      boletim_core::Error::Store(e) => Error::Store(e),
    }
  }
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let (status, message) = match &self {
      Error::Validation(v) => (StatusCode::BAD_REQUEST, v.to_string()),
      Error::Unauthorized => {
        (StatusCode::UNAUTHORIZED, "RA ou senha inválidos.".to_string())
      }
      Error::Store(e) => {
        tracing::error!(error = %e, "database error during login");
        (
          StatusCode::INTERNAL_SERVER_ERROR,
          "Ocorreu um erro interno no banco de dados.".to_string(),
        )
      }
      Error::Internal(m) => {
        tracing::error!(error = %m, "internal error during login");
        (StatusCode::INTERNAL_SERVER_ERROR, "Ocorreu um erro interno.".to_string())
      }
    };
    (status, Html(views::login_page(Some(&message)))).into_response()
  }
}
