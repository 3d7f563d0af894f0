//! Handlers for `/students` endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/students/:id` | 404 if not found |
//! | `GET`  | `/students/:id/report` | Placeholder report for unknown ids, 400 for a blank id |

use axum::{
  Json,
  extract::{Path, State},
};
use boletim_core::{
  ValidationError,
  grade::{Subject, round_to},
  report::{GradeStatus, build_report},
  store::GradeStore,
};
use serde::Serialize;

use crate::{ApiState, error::ApiError};

// ─── Get one ──────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
pub struct StudentBody {
  pub id:           String,
  pub display_name: String,
}

/// `GET /students/:id`
pub async fn get_one<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<String>,
) -> Result<Json<StudentBody>, ApiError>
where
  S: GradeStore,
{
  let student = state
    .store
    .find_student(id.trim())
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?
    .ok_or_else(|| ApiError::NotFound(format!("student {id} not found")))?;

  Ok(Json(StudentBody { id: student.id, display_name: student.display_name }))
}

// ─── Report ───────────────────────────────────────────────────────────────────

/// Report payload with display rounding applied: scores to one decimal, the
/// average to two.
#[derive(Debug, Serialize)]
pub struct ReportBody {
  pub id:           String,
  pub display_name: String,
  pub average:      f64,
  pub entries:      Vec<EntryBody>,
}

#[derive(Debug, Serialize)]
pub struct EntryBody {
  pub subject: Subject,
  pub score:   f64,
  pub status:  GradeStatus,
}

/// `GET /students/:id/report`
pub async fn report<S>(
  State(state): State<ApiState<S>>,
  Path(id): Path<String>,
) -> Result<Json<ReportBody>, ApiError>
where
  S: GradeStore,
{
  if id.trim().is_empty() {
    return Err(ApiError::BadRequest(ValidationError::MissingFields.to_string()));
  }

  let report = build_report(state.store.as_ref(), &id).await?;

  Ok(Json(ReportBody {
    id:           report.student_id,
    display_name: report.display_name,
    average:      round_to(report.average, 2),
    entries:      report
      .entries
      .into_iter()
      .map(|e| EntryBody {
        subject: e.subject,
        score:   round_to(e.score, 1),
        status:  e.status,
      })
      .collect(),
  }))
}
