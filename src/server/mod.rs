//! Axum-based HTTP server for the scentwise endpoint.
//!
//! # Components
//!
//! - `handlers`: `/api/recommend`, `/health` and `/metrics`.
//! - `middleware`: CORS and request ID tracking.
//! - `routes`: The main router configuration that ties everything together.
//!
//! Author: kelexine (<https://github.com/kelexine>)

mod handlers;
mod middleware;
mod routes;

pub use routes::{create_router, AppState};
