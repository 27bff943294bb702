//! Port traits (interfaces for adapters).
//!
//! These are the contracts that adapters must implement.
//! The application layer depends on these traits, not concrete implementations.

mod attachments;
mod payment_methods;
mod repository;

pub use attachments::{AttachmentError, AttachmentStore};
pub use payment_methods::{PaymentMethodProvider, PaymentMethodRegistry};
pub use repository::PaymentRepository;
