//! # Expenses Hex
//!
//! Application service layer and HTTP adapter for the expense payment
//! service.
//!
//! ## Architecture
//!
//! - `service/` - Application service (orchestrates domain operations)
//! - `inbound/` - HTTP adapter (Axum server) and the CSV import reader
//!
//! The service is generic over `R: PaymentRepository`, allowing
//! different repository implementations to be injected.

pub mod inbound;
pub mod openapi;
pub mod service;


pub use service::PaymentService;
