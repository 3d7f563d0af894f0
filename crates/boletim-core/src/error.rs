//! Error types for `boletim-core`.

use thiserror::Error;

/// Rejection of login input before any store access happens.
///
/// The `Display` text is the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("Preencha todos os campos.")]
  MissingFields,

  #[error("O Registro Acadêmico (RA) deve conter APENAS números.")]
  NonNumericId,
}

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Validation(#[from] ValidationError),

  /// The supplied credential does not match the stored hash. Only raised
  /// under [`CredentialPolicy::Verify`](crate::credential::CredentialPolicy).
  #[error("invalid credential for student {0}")]
  Authentication(String),

  #[error("credential hashing failed: {0}")]
  CredentialHash(String),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Box any backend error as an opaque storage failure.
  pub fn store<E>(err: E) -> Self
  where
    E: std::error::Error + Send + Sync + 'static,
  {
    Self::Store(Box::new(err))
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
