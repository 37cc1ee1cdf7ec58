//! HTTP API module for the print pricing engine.
//!
//! This module provides the REST API endpoints for pricing product
//! configurations and broker orders.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::PriceRequest;
pub use response::{ApiError, ApiErrorResponse};
pub use state::AppState;
