//! HTML portal for Boletim.
//!
//! Exposes an axum [`Router`] serving the login form and the grade report,
//! with the JSON API from `boletim-api` nested under `/api`. Backed by any
//! [`GradeStore`].

pub mod error;
pub mod handlers;
pub mod views;

pub use error::Error;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, routing::get};
use boletim_core::{credential::CredentialPolicy, store::GradeStore};
use serde::Deserialize;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `BOLETIM_*` environment variables. Every field has a default.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:              String,
  pub port:              u16,
  pub store_path:        PathBuf,
  pub credential_policy: CredentialPolicy,
  /// Insert the example students into an empty store at startup.
  pub seed_examples:     bool,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:              "127.0.0.1".to_string(),
      port:              5000,
      store_path:        PathBuf::from("boletim.db"),
      credential_policy: CredentialPolicy::default(),
      seed_examples:     true,
    }
  }
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all axum handlers.
#[derive(Clone)]
pub struct AppState<S: GradeStore> {
  pub store:  Arc<S>,
  pub config: Arc<ServerConfig>,
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the axum [`Router`] for the portal.
pub fn router<S>(state: AppState<S>) -> Router
where
  S: GradeStore + Clone + Send + Sync + 'static,
{
  let api = boletim_api::api_router(state.store.clone(), state.config.credential_policy);

  Router::new()
    .route("/", get(handlers::login::page).post(handlers::login::submit::<S>))
    .route("/results", get(handlers::results::handler::<S>))
    .with_state(state)
    .nest("/api", api)
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────
