//! HTTP boundary of the gait comparison service.
//!
//! `gait_api_router()` returns a composable `Router`; `server` binds it
//! and manages its lifecycle.

pub mod endpoints;
pub mod error;
pub mod router;
pub mod server;
pub mod types;

pub use router::gait_api_router;
pub use server::{start_api_server, ApiServer, ApiSession, ServerError};
pub use types::ApiContext;
