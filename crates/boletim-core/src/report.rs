//! The report aggregator: loads a student's grades and computes the average
//! and per-subject pass/fail status.

use serde::{Deserialize, Serialize};

use crate::{
  Error, Result,
  grade::{GradeRecord, Subject},
  store::GradeStore,
  student::default_display_name,
};

/// Minimum score (inclusive) that counts as a pass.
pub const PASS_THRESHOLD: f64 = 7.0;

/// Pass/fail classification of a single grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GradeStatus {
  Pass,
  Fail,
}

impl GradeStatus {
  pub fn classify(score: f64) -> Self {
    if score >= PASS_THRESHOLD { Self::Pass } else { Self::Fail }
  }

  pub fn is_pass(self) -> bool { matches!(self, Self::Pass) }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportEntry {
  pub subject: Subject,
  pub score:   f64,
  pub status:  GradeStatus,
}

/// The computed read model behind the report page. Never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
  pub student_id:   String,
  pub display_name: String,
  pub entries:      Vec<ReportEntry>,
  /// Mean of all scores, or `0.0` when the student has no grades.
  pub average:      f64,
}

impl Report {
  pub fn from_grades(
    student_id:   impl Into<String>,
    display_name: impl Into<String>,
    grades:       &[GradeRecord],
  ) -> Self {
    let entries = grades
      .iter()
      .map(|g| ReportEntry {
        subject: g.subject,
        score:   g.score,
        status:  GradeStatus::classify(g.score),
      })
      .collect();

    Self {
      student_id: student_id.into(),
      display_name: display_name.into(),
      entries,
      average: average(grades.iter().map(|g| g.score)),
    }
  }
}

/// Arithmetic mean; an empty input averages to `0.0`.
pub fn average(scores: impl IntoIterator<Item = f64>) -> f64 {
  let (sum, count) = scores
    .into_iter()
    .fold((0.0, 0usize), |(sum, count), s| (sum + s, count + 1));
  if count == 0 { 0.0 } else { sum / count as f64 }
}

/// Build the report for `id`.
///
/// An unknown student still gets a report, under the placeholder display
/// name and with whatever grades exist (normally none).
pub async fn build_report<S: GradeStore>(store: &S, id: &str) -> Result<Report> {
  let id = id.trim();

  let display_name = store
    .find_student(id)
    .await
    .map_err(Error::store)?
    .map(|s| s.display_name)
    .unwrap_or_else(|| default_display_name(id));

  let grades = store.list_grades(id).await.map_err(Error::store)?;

  Ok(Report::from_grades(id, display_name, &grades))
}

#[cfg(test)]
mod tests {
  use super::*;

  fn grade(subject: Subject, score: f64) -> GradeRecord {
    GradeRecord { id: 0, student_id: "1".into(), subject, score }
  }

  #[test]
  fn average_of_empty_set_is_zero() {
    assert_eq!(average(std::iter::empty()), 0.0);
  }

  #[test]
  fn average_of_scores() {
    assert!((average([5.0, 7.5, 10.0]) - 7.5).abs() < 1e-12);
  }

  #[test]
  fn threshold_is_inclusive_on_pass_side() {
    assert_eq!(GradeStatus::classify(7.0), GradeStatus::Pass);
    assert_eq!(GradeStatus::classify(6.9), GradeStatus::Fail);
    assert_eq!(GradeStatus::classify(10.0), GradeStatus::Pass);
  }

  #[test]
  fn report_from_grades_classifies_each_entry() {
    let report = Report::from_grades(
      "1",
      "Aluno: 1",
      &[grade(Subject::History, 6.9), grade(Subject::Geography, 7.0)],
    );

    assert_eq!(report.entries.len(), 2);
    assert_eq!(report.entries[0].status, GradeStatus::Fail);
    assert_eq!(report.entries[1].status, GradeStatus::Pass);
    assert!((report.average - 6.95).abs() < 1e-12);
  }

  #[test]
  fn report_without_grades_has_zero_average() {
    let report = Report::from_grades("1", "Aluno: 1", &[]);
    assert!(report.entries.is_empty());
    assert_eq!(report.average, 0.0);
  }
}
