//! `GET /results?ra=<id>` — the report page.

use axum::{
  extract::{Query, State},
  response::{Html, IntoResponse, Redirect, Response},
};
use boletim_core::{report::build_report, store::GradeStore};
use serde::Deserialize;

use crate::{AppState, views};

#[derive(Debug, Deserialize)]
pub struct ResultsParams {
  pub ra: Option<String>,
}

/// Without an id, or when the store fails, the client is sent back to the
/// login page rather than shown a partial report.
pub async fn handler<S>(
  State(state): State<AppState<S>>,
  Query(params): Query<ResultsParams>,
) -> Response
where
  S: GradeStore + Clone + Send + Sync + 'static,
{
  let Some(ra) = params.ra.as_deref().map(str::trim).filter(|ra| !ra.is_empty())
  else {
    return Redirect::to("/").into_response();
  };

  match build_report(state.store.as_ref(), ra).await {
    Ok(report) => Html(views::results_page(&report)).into_response(),
    Err(e) => {
      tracing::error!(student_id = ra, error = %e, "failed to load report");
      Redirect::to("/").into_response()
    }
  }
}
