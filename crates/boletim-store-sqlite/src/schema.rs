//! SQL schema for the Boletim SQLite store.

/// Table DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const TABLES: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS students (
    id              TEXT PRIMARY KEY,   -- registration identifier, digits only
    display_name    TEXT NOT NULL,
    credential_hash TEXT NOT NULL       -- argon2 PHC string or legacy sha256 hex
);

-- Grades are insert-only.
-- No UPDATE or DELETE is ever issued against this table.
CREATE TABLE IF NOT EXISTS grades (
    id         INTEGER PRIMARY KEY AUTOINCREMENT,
    student_id TEXT NOT NULL REFERENCES students(id),
    subject    TEXT NOT NULL,
    score      REAL NOT NULL
);

PRAGMA user_version = 1;
";

/// Index DDL. Runs only after the column check passes, since it names
/// columns a foreign `grades` table may lack.
pub const INDEXES: &str = "
CREATE INDEX IF NOT EXISTS grades_student_idx ON grades(student_id);
";

/// Column names each table must have, in declaration order. Checked after
/// [`TABLES`] runs, since `CREATE TABLE IF NOT EXISTS` leaves a foreign table
/// of the same name untouched.
pub const EXPECTED_COLUMNS: [(&str, &[&str]); 2] = [
  ("students", &["id", "display_name", "credential_hash"]),
  ("grades", &["id", "student_id", "subject", "score"]),
];
