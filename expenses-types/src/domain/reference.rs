//! Reference entities: vendors, accounts, categories, currencies, companies.
//!
//! These are the lookup tables a payment points at. Each carries an `enabled`
//! flag deciding whether it is offerable in a create/edit form.

use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use super::ids::{AccountId, CategoryId, CompanyId, VendorId};
use crate::error::DomainError;

/// An uppercase ISO-style currency code ("USD", "EUR", ...).
///
/// Codes come from the per-company currency reference table rather than a
/// closed enum, so new currencies are a data change, not a code change.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct CurrencyCode(String);

impl CurrencyCode {
    /// Creates a code, normalizing to uppercase. Fails on empty input.
    pub fn new(code: impl AsRef<str>) -> Result<Self, DomainError> {
        let code = code.as_ref().trim();
        if code.is_empty() {
            return Err(DomainError::Validation(
                "currency code cannot be empty".into(),
            ));
        }
        Ok(Self(code.to_ascii_uppercase()))
    }

    /// Returns the code as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CurrencyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for CurrencyCode {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// A currency row from the reference table.
///
/// `rate` is the canonical conversion rate against the company's base
/// currency. Payments copy this value at write time (the currency snapshot),
/// so editing it later never rewrites history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Currency {
    pub company_id: CompanyId,
    pub code: CurrencyCode,
    pub name: String,
    pub rate: f64,
    pub enabled: bool,
}

/// A vendor (payee) reference entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Vendor {
    pub id: VendorId,
    pub company_id: CompanyId,
    pub name: String,
    pub enabled: bool,
}

/// A bank account reference entity. Carries the currency new payments on
/// this account default to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Account {
    pub id: AccountId,
    pub company_id: CompanyId,
    pub name: String,
    pub currency_code: CurrencyCode,
    pub enabled: bool,
}

/// Discriminator for category rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CategoryKind {
    Expense,
    Income,
    /// Marks the company's inter-account transfer category. Payments in this
    /// category cannot be deleted through the expense payment interface.
    Transfer,
    Other,
}

impl CategoryKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CategoryKind::Expense => "expense",
            CategoryKind::Income => "income",
            CategoryKind::Transfer => "transfer",
            CategoryKind::Other => "other",
        }
    }
}

impl fmt::Display for CategoryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl std::str::FromStr for CategoryKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "expense" => Ok(CategoryKind::Expense),
            "income" => Ok(CategoryKind::Income),
            "transfer" => Ok(CategoryKind::Transfer),
            "other" => Ok(CategoryKind::Other),
            other => Err(DomainError::Validation(format!(
                "unknown category kind: {other}"
            ))),
        }
    }
}

/// A category reference entity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: CategoryId,
    pub company_id: CompanyId,
    pub name: String,
    pub kind: CategoryKind,
    pub enabled: bool,
}

/// A company (tenant). The optional default account drives the preselected
/// currency on the create form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Company {
    pub id: CompanyId,
    pub name: String,
    pub default_account_id: Option<AccountId>,
}
