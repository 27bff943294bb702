//! Payment domain model.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::ids::{AccountId, CategoryId, CompanyId, MediaId, PaymentId, VendorId};
use super::reference::CurrencyCode;

/// The writable fields of a payment.
///
/// Everything except identity, tenant, attachment and timestamps. Duplicating
/// a payment means recording a fresh payment from the same fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct PaymentFields {
    /// Bank account the payment was made from
    pub account_id: AccountId,
    /// Date the payment was made
    pub paid_at: NaiveDate,
    /// Amount in the smallest currency unit (e.g. cents)
    pub amount: i64,
    /// Currency the payment was made in
    pub currency_code: CurrencyCode,
    /// Conversion rate snapshot taken at write time
    pub currency_rate: f64,
    /// Vendor the payment was made to
    pub vendor_id: VendorId,
    /// Free-form description
    pub description: Option<String>,
    /// Expense category
    pub category_id: CategoryId,
    /// Payment method identifier (e.g. "offline.cash")
    pub payment_method: String,
    /// External reference (e.g. invoice number)
    pub reference: Option<String>,
}

/// A recorded expense payment.
///
/// `currency_rate` is a historical snapshot: it holds the rate the currency
/// table carried when the payment was written, never a recomputed value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Payment {
    /// Unique identifier
    pub id: PaymentId,
    /// Owning company (tenant)
    pub company_id: CompanyId,
    #[serde(flatten)]
    #[schema(inline)]
    pub fields: PaymentFields,
    /// Stored attachment, if one was uploaded
    pub attachment: Option<MediaId>,
    /// When the record was created
    pub created_at: DateTime<Utc>,
}

impl Payment {
    /// Records a new payment for a company.
    pub fn record(company_id: CompanyId, fields: PaymentFields) -> Self {
        Self {
            id: PaymentId::new(),
            company_id,
            fields,
            attachment: None,
            created_at: Utc::now(),
        }
    }

    /// Reconstructs a payment from database fields.
    pub fn from_parts(
        id: PaymentId,
        company_id: CompanyId,
        fields: PaymentFields,
        attachment: Option<MediaId>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            company_id,
            fields,
            attachment,
            created_at,
        }
    }

    /// Returns an independent copy of the writable fields, suitable for
    /// recording a duplicate. The attachment stays with the source payment.
    pub fn duplicate_fields(&self) -> PaymentFields {
        self.fields.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_fields() -> PaymentFields {
        PaymentFields {
            account_id: AccountId::new(),
            paid_at: NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            amount: 10_000,
            currency_code: CurrencyCode::new("USD").unwrap(),
            currency_rate: 1.0,
            vendor_id: VendorId::new(),
            description: Some("Office supplies".to_string()),
            category_id: CategoryId::new(),
            payment_method: "offline.cash".to_string(),
            reference: None,
        }
    }

    #[test]
    fn test_record_assigns_identity() {
        let company = CompanyId::new();
        let payment = Payment::record(company, sample_fields());

        assert_eq!(payment.company_id, company);
        assert!(payment.attachment.is_none());
    }

    #[test]
    fn test_duplicate_fields_are_independent() {
        let payment = Payment::record(CompanyId::new(), sample_fields());
        let copy = payment.duplicate_fields();

        let clone = Payment::record(payment.company_id, copy);

        assert_ne!(clone.id, payment.id);
        assert_eq!(clone.fields, payment.fields);
    }
}
