//! Route handlers.
//!
//! User and admin handlers share the same rendering functions and differ
//! only in the [`AccessScope`](crate::todo::services::AccessScope) they
//! pass in.

pub mod admin;
pub mod health;
pub mod lists;
pub mod tasks;

use axum::{Json, http::StatusCode};

/// Response of a successful create.
pub type Created<T> = (StatusCode, Json<T>);
