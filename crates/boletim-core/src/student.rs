//! Student identity: the registration identifier (RA) and the stored record.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Prefix of every auto-generated display name.
pub const DISPLAY_NAME_PREFIX: &str = "Aluno: ";

/// Display name given to a student created on first contact.
pub fn default_display_name(id: &str) -> String {
  format!("{DISPLAY_NAME_PREFIX}{id}")
}

// ─── StudentId ───────────────────────────────────────────────────────────────

/// A validated registration identifier: non-empty, ASCII decimal digits only,
/// surrounding whitespace removed.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct StudentId(String);

impl StudentId {
  pub fn parse(raw: &str) -> Result<Self, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
      return Err(ValidationError::MissingFields);
    }
    if !trimmed.bytes().all(|b| b.is_ascii_digit()) {
      return Err(ValidationError::NonNumericId);
    }
    Ok(Self(trimmed.to_owned()))
  }

  pub fn as_str(&self) -> &str { &self.0 }
}

impl fmt::Display for StudentId {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result { f.write_str(&self.0) }
}

impl AsRef<str> for StudentId {
  fn as_ref(&self) -> &str { &self.0 }
}

/// Validate a login submission.
///
/// Both fields must be non-empty (the identifier after trimming) before the
/// identifier itself is checked for digits.
pub fn validate_login(id: &str, credential: &str) -> Result<StudentId, ValidationError> {
  if id.trim().is_empty() || credential.is_empty() {
    return Err(ValidationError::MissingFields);
  }
  StudentId::parse(id)
}

// ─── Student ─────────────────────────────────────────────────────────────────

/// A persisted student. Created once, never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
  pub id:              String,
  pub display_name:    String,
  #[serde(skip_serializing)]
  pub credential_hash: String,
}
