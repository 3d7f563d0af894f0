//! Error type for `boletim-store-sqlite`.

use rusqlite::ErrorCode;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("io error: {0}")]
  Io(#[from] std::io::Error),

  /// A table exists but its columns are not the ones this crate writes.
  #[error("schema mismatch in table {0:?}")]
  SchemaMismatch(&'static str),

  #[error("student already exists: {0}")]
  DuplicateStudent(String),

  #[error("unknown subject in grades table: {0:?}")]
  UnknownSubject(String),
}

impl Error {
  /// Whether the store file should be discarded and recreated: SQLite found
  /// the file corrupt or not a database at all, or the schema does not match.
  pub fn is_corruption(&self) -> bool {
    match self {
      Error::SchemaMismatch(_) => true,
      Error::Database(tokio_rusqlite::Error::Rusqlite(
        rusqlite::Error::SqliteFailure(e, _),
      )) => matches!(e.code, ErrorCode::DatabaseCorrupt | ErrorCode::NotADatabase),
      _ => false,
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
