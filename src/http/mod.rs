//! HTTP API server for driving a compression session
//!
//! This module provides a REST API over a single `CompressionSession`:
//! - POST /media/select - Pick a file
//! - POST /media/method - Choose a compression method
//! - POST /media/compress - Run the compression
//! - GET /recordings - List audio recordings
//! - GET /status - Query session status
//! - GET /health - Health check

mod handlers;
mod routes;
mod state;

pub use routes::create_router;
pub use state::AppState;
