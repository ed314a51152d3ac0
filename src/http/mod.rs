//! HTTP boundary: axum router, request context extraction and JSON
//! envelopes.
//!
//! Identity arrives from the upstream authentication layer as the
//! [`USER_ID_HEADER`] and [`USER_ROLE_HEADER`] request headers.

pub mod context;
pub mod dto;
pub mod error;
pub mod handlers;
pub mod routes;
pub mod state;

pub use context::{USER_ID_HEADER, USER_ROLE_HEADER, require_admin};
pub use dto::Flash;
pub use error::ApiError;
pub use routes::create_router;
pub use state::AppState;
