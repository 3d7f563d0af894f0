//! The `GradeStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `boletim-store-sqlite`).
//! Provisioning, reporting and the HTTP layers depend on this abstraction, not
//! on any concrete backend.

use std::future::Future;

use crate::{
  grade::{GradeRecord, NewGrade},
  student::Student,
};

/// Abstraction over the student/grade store.
///
/// Students and grades are insert-only: nothing in this trait updates or
/// deletes a row. Identifiers are passed as plain strings; validation is the
/// caller's responsibility.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait GradeStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── Students ──────────────────────────────────────────────────────────

  /// Number of students in the store.
  fn count_students(
    &self,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + '_;

  /// Retrieve a student by id. Returns `None` if not found.
  fn find_student<'a>(
    &'a self,
    id: &'a str,
  ) -> impl Future<Output = Result<Option<Student>, Self::Error>> + Send + 'a;

  /// Insert a student. Returns an error if the id is already taken.
  fn insert_student(
    &self,
    student: Student,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Insert a student unless one with the same id exists, as a single atomic
  /// operation. Returns `true` if the row was written.
  fn insert_student_if_absent(
    &self,
    student: Student,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;

  // ── Grades ────────────────────────────────────────────────────────────

  /// Number of grade records belonging to `student_id`.
  fn count_grades<'a>(
    &'a self,
    student_id: &'a str,
  ) -> impl Future<Output = Result<u64, Self::Error>> + Send + 'a;

  /// Insert a set of grades for `student_id` in one transaction.
  fn insert_grades<'a>(
    &'a self,
    student_id: &'a str,
    grades: Vec<NewGrade>,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + 'a;

  /// Insert a set of grades only if `student_id` has none yet. The check and
  /// the insert happen in one transaction. Returns `true` if rows were written.
  fn insert_grades_if_none<'a>(
    &'a self,
    student_id: &'a str,
    grades: Vec<NewGrade>,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + 'a;

  /// All grades of `student_id`, in insertion order.
  fn list_grades<'a>(
    &'a self,
    student_id: &'a str,
  ) -> impl Future<Output = Result<Vec<GradeRecord>, Self::Error>> + Send + 'a;
}
