//! HTTP API module for the Teller Shift Engine.
//!
//! This module exposes shift opening, transaction processing, closing and
//! the read-side reports as JSON endpoints.

mod handlers;
mod request;
mod response;
mod state;

pub use handlers::create_router;
pub use request::{CloseShiftRequest, EntryFilter, OpenShiftRequest, TransactionRequest};
pub use response::{ApiError, ApiErrorResponse, CloseShiftResponse, DomainConstants};
pub use state::AppState;
