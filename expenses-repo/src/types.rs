//! Database row structs and conversions to domain types.
//!
//! SQLite stores UUIDs and dates as TEXT; every `into_domain` parses them
//! back and surfaces malformed rows as `RepoError::Database`.

use chrono::NaiveDate;
use sqlx::FromRow;

use expenses_types::{
    Account, AccountId, Category, CategoryId, CategoryKind, CompanyId, Currency, CurrencyCode,
    MediaId, Payment, PaymentFields, PaymentId, PaymentListItem, RepoError, Vendor, VendorId,
};

fn db_err(e: impl std::fmt::Display) -> RepoError {
    RepoError::Database(e.to_string())
}

fn parse_uuid(s: &str) -> Result<uuid::Uuid, RepoError> {
    uuid::Uuid::parse_str(s).map_err(db_err)
}

fn parse_timestamp(s: &str) -> Result<chrono::DateTime<chrono::Utc>, RepoError> {
    chrono::DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&chrono::Utc))
        .map_err(db_err)
}

fn parse_date(s: &str) -> Result<NaiveDate, RepoError> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(db_err)
}

// ─────────────────────────────────────────────────────────────────────────────
// Payment rows
// ─────────────────────────────────────────────────────────────────────────────

/// Payment row from database.
#[derive(FromRow)]
pub struct DbPayment {
    pub id: String,
    pub company_id: String,
    pub account_id: String,
    pub paid_at: String,
    pub amount: i64,
    pub currency_code: String,
    pub currency_rate: f64,
    pub vendor_id: String,
    pub description: Option<String>,
    pub category_id: String,
    pub payment_method: String,
    pub reference: Option<String>,
    pub attachment: Option<String>,
    pub created_at: String,
}

impl DbPayment {
    /// Convert database row to domain Payment.
    pub fn into_domain(self) -> Result<Payment, RepoError> {
        let fields = PaymentFields {
            account_id: AccountId::from_uuid(parse_uuid(&self.account_id)?),
            paid_at: parse_date(&self.paid_at)?,
            amount: self.amount,
            currency_code: CurrencyCode::new(&self.currency_code).map_err(db_err)?,
            currency_rate: self.currency_rate,
            vendor_id: VendorId::from_uuid(parse_uuid(&self.vendor_id)?),
            description: self.description,
            category_id: CategoryId::from_uuid(parse_uuid(&self.category_id)?),
            payment_method: self.payment_method,
            reference: self.reference,
        };

        let attachment = self
            .attachment
            .as_deref()
            .map(parse_uuid)
            .transpose()?
            .map(MediaId::from_uuid);

        Ok(Payment::from_parts(
            PaymentId::from_uuid(parse_uuid(&self.id)?),
            CompanyId::from_uuid(parse_uuid(&self.company_id)?),
            fields,
            attachment,
            parse_timestamp(&self.created_at)?,
        ))
    }
}

/// Payment row joined with reference-entity names.
#[derive(FromRow)]
pub struct DbPaymentWithNames {
    #[sqlx(flatten)]
    pub payment: DbPayment,
    pub vendor_name: String,
    pub account_name: String,
    pub category_name: String,
}

impl DbPaymentWithNames {
    pub fn into_domain(self) -> Result<PaymentListItem, RepoError> {
        Ok(PaymentListItem {
            payment: self.payment.into_domain()?,
            vendor_name: self.vendor_name,
            account_name: self.account_name,
            category_name: self.category_name,
        })
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Reference rows
// ─────────────────────────────────────────────────────────────────────────────

/// Vendor row from database.
#[derive(FromRow)]
pub struct DbVendor {
    pub id: String,
    pub company_id: String,
    pub name: String,
    pub enabled: i64,
}

impl DbVendor {
    pub fn into_domain(self) -> Result<Vendor, RepoError> {
        Ok(Vendor {
            id: VendorId::from_uuid(parse_uuid(&self.id)?),
            company_id: CompanyId::from_uuid(parse_uuid(&self.company_id)?),
            name: self.name,
            enabled: self.enabled != 0,
        })
    }
}

/// Account row from database.
#[derive(FromRow)]
pub struct DbAccount {
    pub id: String,
    pub company_id: String,
    pub name: String,
    pub currency_code: String,
    pub enabled: i64,
}

impl DbAccount {
    pub fn into_domain(self) -> Result<Account, RepoError> {
        Ok(Account {
            id: AccountId::from_uuid(parse_uuid(&self.id)?),
            company_id: CompanyId::from_uuid(parse_uuid(&self.company_id)?),
            name: self.name,
            currency_code: CurrencyCode::new(&self.currency_code).map_err(db_err)?,
            enabled: self.enabled != 0,
        })
    }
}

/// Category row from database.
#[derive(FromRow)]
pub struct DbCategory {
    pub id: String,
    pub company_id: String,
    pub name: String,
    pub kind: String,
    pub enabled: i64,
}

impl DbCategory {
    pub fn into_domain(self) -> Result<Category, RepoError> {
        let kind: CategoryKind = self.kind.parse().map_err(db_err)?;
        Ok(Category {
            id: CategoryId::from_uuid(parse_uuid(&self.id)?),
            company_id: CompanyId::from_uuid(parse_uuid(&self.company_id)?),
            name: self.name,
            kind,
            enabled: self.enabled != 0,
        })
    }
}

/// Currency row from database.
#[derive(FromRow)]
pub struct DbCurrency {
    pub company_id: String,
    pub code: String,
    pub name: String,
    pub rate: f64,
    pub enabled: i64,
}

impl DbCurrency {
    pub fn into_domain(self) -> Result<Currency, RepoError> {
        Ok(Currency {
            company_id: CompanyId::from_uuid(parse_uuid(&self.company_id)?),
            code: CurrencyCode::new(&self.code).map_err(db_err)?,
            name: self.name,
            rate: self.rate,
            enabled: self.enabled != 0,
        })
    }
}

/// Category id only, for the transfer-category lookup.
#[derive(FromRow)]
pub struct DbCategoryId {
    pub id: String,
}

impl DbCategoryId {
    pub fn into_domain(self) -> Result<CategoryId, RepoError> {
        Ok(CategoryId::from_uuid(parse_uuid(&self.id)?))
    }
}
