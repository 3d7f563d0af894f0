//! Provisioning: making sure a student and their grade set exist.
//!
//! Any syntactically valid identifier that has never been seen is registered
//! on the spot ("universal login"). Identity and grades are ensured by two
//! separate idempotent operations; [`provision`] composes them.

use tracing::{debug, info, warn};

use crate::{
  Error, Result,
  credential::{CredentialPolicy, hash_credential, verify_credential},
  grade::generate_grade_set,
  store::GradeStore,
  student::{Student, StudentId, default_display_name},
};

/// Example students inserted into an empty store, as `(id, credential)`.
/// These credentials are public defaults.
pub const SEED_STUDENTS: [(&str, &str); 2] =
  [("123456", "senha123"), ("987654", "aluno123")];

/// Make sure a student record exists for `id` and return it.
///
/// A new student gets the default display name and a hash of `credential`.
/// For an existing student, `policy` decides whether `credential` is checked.
pub async fn ensure_student<S: GradeStore>(
  store:      &S,
  id:         &StudentId,
  credential: &str,
  policy:     CredentialPolicy,
) -> Result<Student> {
  if let Some(existing) = store.find_student(id.as_str()).await.map_err(Error::store)? {
    return check_credential(existing, credential, policy);
  }

  let student = Student {
    id:              id.to_string(),
    display_name:    default_display_name(id.as_str()),
    credential_hash: hash_credential(credential)?,
  };

  if store
    .insert_student_if_absent(student.clone())
    .await
    .map_err(Error::store)?
  {
    info!(student_id = %id, "new student registered");
    return Ok(student);
  }

  // A concurrent request registered the same id first; its row wins.
  debug!(student_id = %id, "student registered concurrently");
  let existing = store
    .find_student(id.as_str())
    .await
    .map_err(Error::store)?
    .ok_or_else(|| Error::Store(format!("student {id} vanished after insert").into()))?;
  check_credential(existing, credential, policy)
}

fn check_credential(
  student:    Student,
  credential: &str,
  policy:     CredentialPolicy,
) -> Result<Student> {
  match policy {
    CredentialPolicy::Permissive => Ok(student),
    CredentialPolicy::Verify => {
      if verify_credential(&student.credential_hash, credential) {
        Ok(student)
      } else {
        warn!(student_id = %student.id, "credential mismatch");
        Err(Error::Authentication(student.id))
      }
    }
  }
}

/// Make sure `id` has a grade set, generating one if it has none.
///
/// Returns `true` if grades were written by this call.
pub async fn ensure_grades<S: GradeStore>(store: &S, id: &StudentId) -> Result<bool> {
  let existing = store.count_grades(id.as_str()).await.map_err(Error::store)?;
  if existing > 0 {
    return Ok(false);
  }

  let grades = generate_grade_set(&mut rand::thread_rng());
  let written = store
    .insert_grades_if_none(id.as_str(), grades)
    .await
    .map_err(Error::store)?;

  if written {
    info!(student_id = %id, "generated grade set");
  }
  Ok(written)
}

/// The login flow: ensure the student, then their grades. Returns the display
/// name to greet the student with.
pub async fn provision<S: GradeStore>(
  store:      &S,
  id:         &StudentId,
  credential: &str,
  policy:     CredentialPolicy,
) -> Result<String> {
  let student = ensure_student(store, id, credential, policy).await?;
  ensure_grades(store, id).await?;
  Ok(student.display_name)
}

/// Insert the [`SEED_STUDENTS`] with fresh grade sets if the store has no
/// students at all. Returns the number of students inserted.
pub async fn seed_if_empty<S: GradeStore>(store: &S) -> Result<usize> {
  if store.count_students().await.map_err(Error::store)? > 0 {
    return Ok(0);
  }

  for (id, credential) in SEED_STUDENTS {
    let student = Student {
      id:              id.to_owned(),
      display_name:    default_display_name(id),
      credential_hash: hash_credential(credential)?,
    };
    store.insert_student(student).await.map_err(Error::store)?;

    let grades = generate_grade_set(&mut rand::thread_rng());
    store.insert_grades(id, grades).await.map_err(Error::store)?;

    info!(student_id = id, credential, "seeded example student");
  }

  Ok(SEED_STUDENTS.len())
}

#[cfg(test)]
mod tests {
  use std::{
    collections::HashMap,
    sync::{
      Mutex,
      atomic::{AtomicBool, Ordering},
    },
  };

  use strum::EnumCount as _;

  use super::*;
  use crate::{
    credential::legacy_digest,
    grade::{GradeRecord, NewGrade, SCORE_MAX, SCORE_MIN, Subject},
    report::build_report,
  };

  #[derive(Debug, thiserror::Error)]
  enum MemoryError {
    #[error("duplicate student {0}")]
    Duplicate(String),
    #[error("store offline")]
    Offline,
  }

  #[derive(Default)]
  struct MemoryStore {
    students: Mutex<HashMap<String, Student>>,
    grades:   Mutex<Vec<GradeRecord>>,
    offline:  AtomicBool,
  }

  impl MemoryStore {
    fn check(&self) -> Result<(), MemoryError> {
      if self.offline.load(Ordering::SeqCst) {
        Err(MemoryError::Offline)
      } else {
        Ok(())
      }
    }

    fn push_grades(&self, student_id: &str, grades: Vec<NewGrade>) {
      let mut rows = self.grades.lock().unwrap();
      for g in grades {
        let id = rows.len() as i64 + 1;
        rows.push(GradeRecord {
          id,
          student_id: student_id.to_owned(),
          subject: g.subject,
          score: g.score,
        });
      }
    }
  }

  impl GradeStore for MemoryStore {
    type Error = MemoryError;

    async fn count_students(&self) -> Result<u64, MemoryError> {
      self.check()?;
      Ok(self.students.lock().unwrap().len() as u64)
    }

    async fn find_student(&self, id: &str) -> Result<Option<Student>, MemoryError> {
      self.check()?;
      Ok(self.students.lock().unwrap().get(id).cloned())
    }

    async fn insert_student(&self, student: Student) -> Result<(), MemoryError> {
      self.check()?;
      let mut students = self.students.lock().unwrap();
      if students.contains_key(&student.id) {
        return Err(MemoryError::Duplicate(student.id));
      }
      students.insert(student.id.clone(), student);
      Ok(())
    }

    async fn insert_student_if_absent(&self, student: Student) -> Result<bool, MemoryError> {
      self.check()?;
      let mut students = self.students.lock().unwrap();
      if students.contains_key(&student.id) {
        return Ok(false);
      }
      students.insert(student.id.clone(), student);
      Ok(true)
    }

    async fn count_grades(&self, student_id: &str) -> Result<u64, MemoryError> {
      self.check()?;
      let rows = self.grades.lock().unwrap();
      Ok(rows.iter().filter(|g| g.student_id == student_id).count() as u64)
    }

    async fn insert_grades(&self, student_id: &str, grades: Vec<NewGrade>) -> Result<(), MemoryError> {
      self.check()?;
      self.push_grades(student_id, grades);
      Ok(())
    }

    async fn insert_grades_if_none(&self, student_id: &str, grades: Vec<NewGrade>) -> Result<bool, MemoryError> {
      self.check()?;
      if self.grades.lock().unwrap().iter().any(|g| g.student_id == student_id) {
        return Ok(false);
      }
      self.push_grades(student_id, grades);
      Ok(true)
    }

    async fn list_grades(&self, student_id: &str) -> Result<Vec<GradeRecord>, MemoryError> {
      self.check()?;
      let rows = self.grades.lock().unwrap();
      Ok(rows.iter().filter(|g| g.student_id == student_id).cloned().collect())
    }
  }

  fn id(raw: &str) -> StudentId { StudentId::parse(raw).unwrap() }

  // ─── ensure_student ──────────────────────────────────────────────────────────

  #[tokio::test]
  async fn new_student_gets_default_name_and_hash() {
    let store = MemoryStore::default();
    let student = ensure_student(&store, &id("555"), "pw", CredentialPolicy::Permissive)
      .await
      .unwrap();

    assert_eq!(student.display_name, "Aluno: 555");
    assert!(verify_credential(&student.credential_hash, "pw"));
    assert_eq!(store.count_students().await.unwrap(), 1);
  }

  #[tokio::test]
  async fn repeated_login_with_other_credential_is_idempotent() {
    let store = MemoryStore::default();
    let first = provision(&store, &id("123"), "one", CredentialPolicy::Permissive)
      .await
      .unwrap();
    let second = provision(&store, &id("123"), "two", CredentialPolicy::Permissive)
      .await
      .unwrap();

    assert_eq!(first, second);
    assert_eq!(store.count_students().await.unwrap(), 1);
    // The hash from first contact is kept.
    let stored = store.find_student("123").await.unwrap().unwrap();
    assert!(verify_credential(&stored.credential_hash, "one"));
  }

  #[tokio::test]
  async fn existing_display_name_is_not_recomputed() {
    let store = MemoryStore::default();
    store
      .insert_student(Student {
        id:              "77".into(),
        display_name:    "Maria".into(),
        credential_hash: legacy_digest("x"),
      })
      .await
      .unwrap();

    let name = provision(&store, &id("77"), "y", CredentialPolicy::Permissive)
      .await
      .unwrap();
    assert_eq!(name, "Maria");
  }

  #[tokio::test]
  async fn verify_policy_rejects_wrong_credential() {
    let store = MemoryStore::default();
    provision(&store, &id("9"), "right", CredentialPolicy::Verify)
      .await
      .unwrap();

    let err = provision(&store, &id("9"), "wrong", CredentialPolicy::Verify)
      .await
      .unwrap_err();
    assert!(matches!(err, Error::Authentication(ref s) if s == "9"));

    provision(&store, &id("9"), "right", CredentialPolicy::Verify)
      .await
      .unwrap();
  }

  #[tokio::test]
  async fn verify_policy_accepts_legacy_digest() {
    let store = MemoryStore::default();
    store
      .insert_student(Student {
        id:              "123456".into(),
        display_name:    "Aluno: 123456".into(),
        credential_hash: legacy_digest("senha123"),
      })
      .await
      .unwrap();

    ensure_student(&store, &id("123456"), "senha123", CredentialPolicy::Verify)
      .await
      .unwrap();
  }

  // ─── ensure_grades ───────────────────────────────────────────────────────────

  #[tokio::test]
  async fn new_student_gets_six_grades_in_range() {
    let store = MemoryStore::default();
    provision(&store, &id("1"), "x", CredentialPolicy::Permissive)
      .await
      .unwrap();

    let grades = store.list_grades("1").await.unwrap();
    assert_eq!(grades.len(), Subject::COUNT);
    for g in &grades {
      assert!((SCORE_MIN..=SCORE_MAX).contains(&g.score));
    }
  }

  #[tokio::test]
  async fn existing_grades_are_left_alone() {
    let store = MemoryStore::default();
    provision(&store, &id("1"), "x", CredentialPolicy::Permissive)
      .await
      .unwrap();
    let before = store.list_grades("1").await.unwrap();

    assert!(!ensure_grades(&store, &id("1")).await.unwrap());
    provision(&store, &id("1"), "x", CredentialPolicy::Permissive)
      .await
      .unwrap();

    assert_eq!(store.list_grades("1").await.unwrap(), before);
  }

  #[tokio::test]
  async fn student_without_grades_is_repaired() {
    let store = MemoryStore::default();
    ensure_student(&store, &id("31"), "x", CredentialPolicy::Permissive)
      .await
      .unwrap();
    assert_eq!(store.count_grades("31").await.unwrap(), 0);

    provision(&store, &id("31"), "x", CredentialPolicy::Permissive)
      .await
      .unwrap();
    assert_eq!(store.count_grades("31").await.unwrap(), 6);
  }

  // ─── Flow ────────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn report_matches_provisioned_name_and_grades() {
    let store = MemoryStore::default();
    let name = provision(&store, &id("123456"), "anything", CredentialPolicy::Permissive)
      .await
      .unwrap();
    assert_eq!(name, "Aluno: 123456");

    let report = build_report(&store, "123456").await.unwrap();
    assert_eq!(report.display_name, name);
    assert_eq!(report.entries.len(), 6);

    let mean = report.entries.iter().map(|e| e.score).sum::<f64>() / 6.0;
    assert!((report.average - mean).abs() < 1e-9);
  }

  #[tokio::test]
  async fn report_for_unknown_student_uses_placeholder() {
    let store = MemoryStore::default();
    let report = build_report(&store, " 404 ").await.unwrap();
    assert_eq!(report.student_id, "404");
    assert_eq!(report.display_name, "Aluno: 404");
    assert!(report.entries.is_empty());
    assert_eq!(report.average, 0.0);
  }

  #[tokio::test]
  async fn storage_failure_propagates() {
    let store = MemoryStore::default();
    store.offline.store(true, Ordering::SeqCst);

    let err = provision(&store, &id("1"), "x", CredentialPolicy::Permissive)
      .await
      .unwrap_err();
    assert!(matches!(err, Error::Store(_)));
    assert!(matches!(build_report(&store, "1").await, Err(Error::Store(_))));
  }

  // ─── Seeding ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn seed_fills_empty_store_once() {
    let store = MemoryStore::default();
    assert_eq!(seed_if_empty(&store).await.unwrap(), 2);
    assert_eq!(seed_if_empty(&store).await.unwrap(), 0);
    assert_eq!(store.count_students().await.unwrap(), 2);

    for (seed_id, credential) in SEED_STUDENTS {
      let student = store.find_student(seed_id).await.unwrap().unwrap();
      assert_eq!(student.display_name, format!("Aluno: {seed_id}"));
      assert!(verify_credential(&student.credential_hash, credential));
      assert_eq!(store.count_grades(seed_id).await.unwrap(), 6);
    }
  }

  #[tokio::test]
  async fn seed_skips_non_empty_store() {
    let store = MemoryStore::default();
    provision(&store, &id("1"), "x", CredentialPolicy::Permissive)
      .await
      .unwrap();
    assert_eq!(seed_if_empty(&store).await.unwrap(), 0);
    assert!(store.find_student("123456").await.unwrap().is_none());
  }
}
