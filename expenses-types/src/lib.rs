//! # Expenses Types
//!
//! Domain types and port traits for the expense payment service.
//! This crate has ZERO external IO dependencies - only data structures,
//! business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (Payment, reference entities, typed IDs)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    Account, AccountId, Category, CategoryId, CategoryKind, Company, CompanyId, Currency,
    CurrencyCode, MediaId, Payment, PaymentFields, PaymentId, Vendor, VendorId,
};
pub use dto::*;
pub use error::{AppError, DomainError, RepoError};
pub use ports::{AttachmentStore, PaymentMethodProvider, PaymentMethodRegistry, PaymentRepository};
