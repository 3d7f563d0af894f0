//! Grades: the fixed subject set, stored grade records, and random generation
//! of a student's initial grade set.

use rand::Rng;
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumCount, EnumIter, EnumString, IntoEnumIterator as _};

/// Lowest score a generated grade can take.
pub const SCORE_MIN: f64 = 5.0;
/// Highest score a generated grade can take.
pub const SCORE_MAX: f64 = 10.0;

// ─── Subject ─────────────────────────────────────────────────────────────────

/// The six subjects every provisioned student is graded in.
///
/// The string form (used both in the database and in JSON) is the Portuguese
/// subject name shown on the report.
#[derive(
  Debug,
  Clone,
  Copy,
  PartialEq,
  Eq,
  Hash,
  Serialize,
  Deserialize,
  AsRefStr,
  Display,
  EnumCount,
  EnumIter,
  EnumString,
)]
pub enum Subject {
  #[serde(rename = "Português")]
  #[strum(serialize = "Português")]
  Portuguese,
  #[serde(rename = "Matemática")]
  #[strum(serialize = "Matemática")]
  Mathematics,
  #[serde(rename = "Ciências")]
  #[strum(serialize = "Ciências")]
  Science,
  #[serde(rename = "História")]
  #[strum(serialize = "História")]
  History,
  #[serde(rename = "Geografia")]
  #[strum(serialize = "Geografia")]
  Geography,
  #[serde(rename = "Inglês")]
  #[strum(serialize = "Inglês")]
  English,
}

// ─── Records ─────────────────────────────────────────────────────────────────

/// A grade as stored. Never mutated after insertion.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GradeRecord {
  pub id:         i64,
  pub student_id: String,
  pub subject:    Subject,
  pub score:      f64,
}

/// A grade waiting to be inserted; the store assigns `id` and `student_id`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct NewGrade {
  pub subject: Subject,
  pub score:   f64,
}

// ─── Generation ──────────────────────────────────────────────────────────────

/// Round `value` to `places` decimal places, halves away from zero.
pub fn round_to(value: f64, places: i32) -> f64 {
  let factor = 10f64.powi(places);
  (value * factor).round() / factor
}

/// Draw one grade per subject, uniformly from `[SCORE_MIN, SCORE_MAX]` and
/// rounded to one decimal.
pub fn generate_grade_set<R: Rng + ?Sized>(rng: &mut R) -> Vec<NewGrade> {
  Subject::iter()
    .map(|subject| NewGrade {
      subject,
      score: round_to(rng.gen_range(SCORE_MIN..=SCORE_MAX), 1),
    })
    .collect()
}
