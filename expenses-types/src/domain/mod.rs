//! Domain models for the expense payment service.

pub mod ids;
pub mod payment;
pub mod reference;

pub use ids::{AccountId, CategoryId, CompanyId, MediaId, PaymentId, VendorId};
pub use payment::{Payment, PaymentFields};
pub use reference::{Account, Category, CategoryKind, Company, Currency, CurrencyCode, Vendor};
