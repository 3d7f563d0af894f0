//! Core types and operations for the Boletim grade portal.
//!
//! This crate is deliberately free of HTTP and database dependencies. It
//! defines the domain model, the [`store::GradeStore`] abstraction, and the
//! provisioning and report logic written against that abstraction.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod credential;
pub mod error;
pub mod grade;
pub mod provision;
pub mod report;
pub mod store;
pub mod student;

pub use error::{Error, Result, ValidationError};
