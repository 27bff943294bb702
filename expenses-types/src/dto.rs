//! Data Transfer Objects (DTOs) for requests and responses.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::{
    AccountId, CategoryId, CurrencyCode, Payment, PaymentId, VendorId,
};

// ─────────────────────────────────────────────────────────────────────────────
// Payment write DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// An uploaded attachment file.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct AttachmentUpload {
    /// Original filename
    #[schema(example = "receipt.pdf")]
    pub filename: String,
    /// Raw file content
    pub content: Vec<u8>,
}

/// Request body for storing or updating a payment.
///
/// `currency_rate` may be supplied by the client but is always overwritten
/// with the canonical rate from the currency table before the write.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentInput {
    pub account_id: AccountId,
    pub paid_at: NaiveDate,
    /// Amount in smallest currency unit
    #[schema(example = 10000)]
    pub amount: i64,
    #[schema(example = "USD")]
    pub currency_code: CurrencyCode,
    /// Ignored on writes; the server snapshots the canonical rate
    #[serde(default)]
    pub currency_rate: Option<f64>,
    pub vendor_id: VendorId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub category_id: CategoryId,
    #[schema(example = "offline.cash")]
    pub payment_method: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Optional attachment; when absent on update, the existing association
    /// is left untouched
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<AttachmentUpload>,
}

/// One row of a tabular payment import.
///
/// Currency fields pass through exactly as supplied: imports do not
/// re-snapshot the rate.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentImportRow {
    pub account_id: AccountId,
    pub paid_at: NaiveDate,
    pub amount: i64,
    pub currency_code: CurrencyCode,
    pub currency_rate: f64,
    pub vendor_id: VendorId,
    #[serde(default)]
    pub description: Option<String>,
    pub category_id: CategoryId,
    pub payment_method: String,
    #[serde(default)]
    pub reference: Option<String>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Listing DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Optional filters for the payment index.
#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct PaymentFilters {
    #[serde(default)]
    pub vendor_id: Option<VendorId>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub account_id: Option<AccountId>,
}

/// A payment joined with the names of its reference entities.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentListItem {
    #[serde(flatten)]
    #[schema(inline)]
    pub payment: Payment,
    pub vendor_name: String,
    pub account_name: String,
    pub category_name: String,
}

/// An entry of a selectable dropdown list. `value = None` is the "all"
/// sentinel prefixed to filter lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SelectOption {
    pub value: Option<String>,
    #[schema(example = "All vendors")]
    pub label: String,
}

impl SelectOption {
    /// The "all" sentinel option.
    pub fn all(label: impl Into<String>) -> Self {
        Self {
            value: None,
            label: label.into(),
        }
    }

    /// A concrete selectable entry.
    pub fn item(value: impl ToString, label: impl Into<String>) -> Self {
        Self {
            value: Some(value.to_string()),
            label: label.into(),
        }
    }
}

/// Response payload for the payment index.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentListing {
    /// Payments ordered by paid_at descending
    pub payments: Vec<PaymentListItem>,
    pub vendors: Vec<SelectOption>,
    pub categories: Vec<SelectOption>,
    pub accounts: Vec<SelectOption>,
    /// The company's transfer category, so callers can suppress the delete
    /// affordance for protected payments
    pub transfer_category_id: Option<CategoryId>,
}

/// Data backing the create and edit forms. Side-effect free to produce.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentFormData {
    pub accounts: Vec<SelectOption>,
    pub currencies: Vec<SelectOption>,
    /// Currency of the company default account (create) or of the payment's
    /// own account (edit)
    pub account_currency_code: Option<CurrencyCode>,
    pub vendors: Vec<SelectOption>,
    pub categories: Vec<SelectOption>,
    pub payment_methods: Vec<String>,
    /// Present for the edit form only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payment: Option<Payment>,
}

// ─────────────────────────────────────────────────────────────────────────────
// Operation outcome DTOs
// ─────────────────────────────────────────────────────────────────────────────

/// Message key for a success flash. Rendering and translation are the
/// caller's concern; the service only declares which key applies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FlashKey {
    Added,
    Duplicated,
    Imported,
    Updated,
    Deleted,
}

/// A success flash descriptor: message key plus entity count for
/// pluralization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Flash {
    pub key: FlashKey,
    pub count: usize,
}

impl Flash {
    pub fn new(key: FlashKey, count: usize) -> Self {
        Self { key, count }
    }
}

/// Response after storing, duplicating or updating a payment.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct PaymentResponse {
    pub payment: Payment,
    pub flash: Flash,
    /// Where the web client should navigate next
    #[schema(example = "/expenses/payments")]
    pub redirect: String,
}

/// Summary of a bulk import.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImportSummary {
    pub imported: usize,
}

/// Response after a bulk import.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct ImportResponse {
    pub imported: usize,
    pub flash: Flash,
    pub redirect: String,
}

/// Outcome of a delete request.
///
/// `TransferProtected` is a successful no-op, not an error: transfer-linked
/// payments are deleted through the transfer workflow instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum DeleteOutcome {
    Deleted,
    TransferProtected,
}

/// Response after a delete request.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct DeleteResponse {
    pub outcome: DeleteOutcome,
    /// Present only when a record was actually deleted
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flash: Option<Flash>,
    pub redirect: String,
}

/// Builds the index redirect target.
pub fn payments_index_redirect() -> String {
    "/expenses/payments".to_string()
}

/// Builds the edit-form redirect target for a payment.
pub fn payment_edit_redirect(id: PaymentId) -> String {
    format!("/expenses/payments/{id}/edit")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_option_all_sentinel() {
        let opt = SelectOption::all("All vendors");
        assert!(opt.value.is_none());
        assert_eq!(opt.label, "All vendors");
    }

    #[test]
    fn test_edit_redirect_embeds_id() {
        let id = PaymentId::new();
        assert_eq!(
            payment_edit_redirect(id),
            format!("/expenses/payments/{id}/edit")
        );
    }
}
