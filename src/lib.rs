//! Tasklists: list and task management over HTTP.
//!
//! Authenticated users organise tasks into lists; administrators manage
//! every list and task regardless of owner. Reads support case-insensitive
//! search, completion filtering and pagination.
//!
//! # Architecture
//!
//! Tasklists follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for persistence
//! - **Adapters**: In-memory and `PostgreSQL` stores
//!
//! # Modules
//!
//! - [`todo`]: Lists, tasks, queries and the services operating on them
//! - [`http`]: Axum routes, request context extraction and JSON envelopes
//! - [`config`]: Environment-driven configuration
//! - [`telemetry`]: Tracing subscriber set-up

pub mod config;
pub mod http;
pub mod telemetry;
pub mod todo;
