//! HTTP API for spam-api
//!
//! Three routes: `/` (capability listing), `/health` and `/predict`.

pub mod error;
pub mod handlers;
pub mod server;

pub use error::ApiError;
pub use server::{router, ApiServer, AppState};
