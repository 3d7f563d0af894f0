//! JSON API for Boletim.
//!
//! Exposes an axum [`Router`] backed by any [`boletim_core::store::GradeStore`].
//! TLS and transport concerns are the caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", boletim_api::api_router(store.clone(), policy))
//! ```

pub mod error;
pub mod login;
pub mod students;

use std::sync::Arc;

use axum::{
  Router,
  routing::{get, post},
};
use boletim_core::{credential::CredentialPolicy, store::GradeStore};

pub use error::ApiError;

/// State shared by the API handlers.
#[derive(Clone)]
pub struct ApiState<S: GradeStore> {
  pub store:  Arc<S>,
  pub policy: CredentialPolicy,
}

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>, policy: CredentialPolicy) -> Router<()>
where
  S: GradeStore + Clone + Send + Sync + 'static,
{
  Router::new()
    .route("/login", post(login::handler::<S>))
    .route("/students/{id}", get(students::get_one::<S>))
    .route("/students/{id}/report", get(students::report::<S>))
    .with_state(ApiState { store, policy })
}
