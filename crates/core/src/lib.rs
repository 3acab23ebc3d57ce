//! Domain core for the Atelier management backend.
//!
//! This crate has zero internal dependencies so the persistence and API
//! layers (and any future CLI tooling) can share types, validation rules,
//! and the scheduling scan without pulling in sqlx or axum.

pub mod error;
pub mod scheduling;
pub mod status;
pub mod types;
pub mod validation;
