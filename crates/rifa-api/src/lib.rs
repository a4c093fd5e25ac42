//! # rifa-api
//!
//! HTTP layer for the Rifa raffle service: the axum router, shared
//! application state, request/response DTOs, handlers, and the mapping
//! from [`rifa_core::AppError`] to HTTP responses.

pub mod dto;
pub mod error;
pub mod handlers;
pub mod router;
pub mod state;
