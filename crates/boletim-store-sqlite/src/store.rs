//! [`SqliteStore`] — the SQLite implementation of [`GradeStore`].

use std::{
  ffi::OsString,
  io,
  path::{Path, PathBuf},
  str::FromStr as _,
};

use rusqlite::{ErrorCode, OptionalExtension as _, TransactionBehavior, ffi};
use tracing::{debug, info, warn};

use boletim_core::{
  grade::{GradeRecord, NewGrade, Subject},
  store::GradeStore,
  student::Student,
};

use crate::{
  Error, Result,
  schema::{EXPECTED_COLUMNS, INDEXES, TABLES},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A grade store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  ///
  /// A file that SQLite reports as corrupt, or whose tables do not have the
  /// expected columns, is deleted and recreated empty. Everything in the
  /// store can be regenerated, so nothing irreplaceable is lost.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let path = path.as_ref();
    match Self::open_once(path).await {
      Err(e) if e.is_corruption() => {
        warn!(path = %path.display(), error = %e, "store is corrupt, recreating it");
        remove_store_files(path)?;
        let store = Self::open_once(path).await?;
        info!(path = %path.display(), "store recreated");
        Ok(store)
      }
      other => other,
    }
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.initialize().await?;
    Ok(store)
  }

  async fn open_once(path: &Path) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    if let Err(e) = store.initialize().await {
      // Release the file before the caller decides to delete it.
      if let Err(close_err) = store.conn.close().await {
        debug!(path = %path.display(), error = %close_err, "failed to close store after init error");
      }
      return Err(e);
    }
    Ok(store)
  }

  async fn initialize(&self) -> Result<()> {
    let mismatch = self
      .conn
      .call(|conn| {
        conn.execute_batch(TABLES)?;

        for (table, expected) in EXPECTED_COLUMNS {
          let mut stmt = conn.prepare(&format!("PRAGMA table_info({table})"))?;
          let columns = stmt
            .query_map([], |row| row.get::<_, String>(1))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
          if columns.iter().map(String::as_str).ne(expected.iter().copied()) {
            return Ok(Some(table));
          }
        }

        conn.execute_batch(INDEXES)?;
        Ok(None)
      })
      .await?;

    match mismatch {
      Some(table) => Err(Error::SchemaMismatch(table)),
      None => Ok(()),
    }
  }
}

/// Delete the database file and its WAL side files, ignoring missing ones.
fn remove_store_files(path: &Path) -> Result<()> {
  for suffix in ["", "-wal", "-shm"] {
    let mut name = OsString::from(path.as_os_str());
    name.push(suffix);
    match std::fs::remove_file(PathBuf::from(name)) {
      Err(e) if e.kind() != io::ErrorKind::NotFound => return Err(e.into()),
      _ => {}
    }
  }
  Ok(())
}

fn insert_grade_rows(
  conn:       &rusqlite::Connection,
  student_id: &str,
  grades:     &[NewGrade],
) -> rusqlite::Result<()> {
  let mut stmt = conn.prepare_cached(
    "INSERT INTO grades (student_id, subject, score) VALUES (?1, ?2, ?3)",
  )?;
  for grade in grades {
    stmt.execute(rusqlite::params![student_id, grade.subject.as_ref(), grade.score])?;
  }
  Ok(())
}

// ─── Raw rows ────────────────────────────────────────────────────────────────

struct RawGrade {
  id:         i64,
  student_id: String,
  subject:    String,
  score:      f64,
}

impl RawGrade {
  fn into_record(self) -> Result<GradeRecord> {
    let subject = Subject::from_str(&self.subject)
      .map_err(|_| Error::UnknownSubject(self.subject.clone()))?;
    Ok(GradeRecord {
      id: self.id,
      student_id: self.student_id,
      subject,
      score: self.score,
    })
  }
}

// ─── GradeStore impl ─────────────────────────────────────────────────────────

impl GradeStore for SqliteStore {
  type Error = Error;

  // ── Students ──────────────────────────────────────────────────────────────

  async fn count_students(&self) -> Result<u64> {
    let count: i64 = self
      .conn
      .call(|conn| {
        Ok(conn.query_row("SELECT COUNT(*) FROM students", [], |r| r.get(0))?)
      })
      .await?;
    Ok(count as u64)
  }

  async fn find_student(&self, id: &str) -> Result<Option<Student>> {
    let id = id.to_owned();

    let student = self
      .conn
      .call(move |conn| {
        Ok(conn
          .query_row(
            "SELECT id, display_name, credential_hash FROM students WHERE id = ?1",
            rusqlite::params![id],
            |row| {
              Ok(Student {
                id:              row.get(0)?,
                display_name:    row.get(1)?,
                credential_hash: row.get(2)?,
              })
            },
          )
          .optional()?)
      })
      .await?;

    Ok(student)
  }

  async fn insert_student(&self, student: Student) -> Result<()> {
    let id = student.id.clone();

    let inserted = self
      .conn
      .call(move |conn| {
        match conn.execute(
          "INSERT INTO students (id, display_name, credential_hash) VALUES (?1, ?2, ?3)",
          rusqlite::params![student.id, student.display_name, student.credential_hash],
        ) {
          Ok(_) => Ok(true),
          Err(rusqlite::Error::SqliteFailure(e, _))
            if e.code == ErrorCode::ConstraintViolation
              && e.extended_code == ffi::SQLITE_CONSTRAINT_PRIMARYKEY =>
          {
            Ok(false)
          }
          Err(e) => Err(e.into()),
        }
      })
      .await?;

    if inserted { Ok(()) } else { Err(Error::DuplicateStudent(id)) }
  }

  async fn insert_student_if_absent(&self, student: Student) -> Result<bool> {
    let changed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute(
          "INSERT INTO students (id, display_name, credential_hash) VALUES (?1, ?2, ?3)
           ON CONFLICT (id) DO NOTHING",
          rusqlite::params![student.id, student.display_name, student.credential_hash],
        )?)
      })
      .await?;
    Ok(changed == 1)
  }

  // ── Grades ────────────────────────────────────────────────────────────────

  async fn count_grades(&self, student_id: &str) -> Result<u64> {
    let student_id = student_id.to_owned();

    let count: i64 = self
      .conn
      .call(move |conn| {
        Ok(conn.query_row(
          "SELECT COUNT(*) FROM grades WHERE student_id = ?1",
          rusqlite::params![student_id],
          |r| r.get(0),
        )?)
      })
      .await?;
    Ok(count as u64)
  }

  async fn insert_grades(&self, student_id: &str, grades: Vec<NewGrade>) -> Result<()> {
    let student_id = student_id.to_owned();

    self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        insert_grade_rows(&tx, &student_id, &grades)?;
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn insert_grades_if_none(
    &self,
    student_id: &str,
    grades:     Vec<NewGrade>,
  ) -> Result<bool> {
    let student_id = student_id.to_owned();

    let written = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction_with_behavior(TransactionBehavior::Immediate)?;
        let existing: i64 = tx.query_row(
          "SELECT COUNT(*) FROM grades WHERE student_id = ?1",
          rusqlite::params![student_id],
          |r| r.get(0),
        )?;
        if existing > 0 {
          return Ok(false);
        }
        insert_grade_rows(&tx, &student_id, &grades)?;
        tx.commit()?;
        Ok(true)
      })
      .await?;
    Ok(written)
  }

  async fn list_grades(&self, student_id: &str) -> Result<Vec<GradeRecord>> {
    let student_id = student_id.to_owned();

    let raws: Vec<RawGrade> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(
          "SELECT id, student_id, subject, score FROM grades
           WHERE student_id = ?1
           ORDER BY id",
        )?;
        let rows = stmt
          .query_map(rusqlite::params![student_id], |row| {
            Ok(RawGrade {
              id:         row.get(0)?,
              student_id: row.get(1)?,
              subject:    row.get(2)?,
              score:      row.get(3)?,
            })
          })?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawGrade::into_record).collect()
  }
}
