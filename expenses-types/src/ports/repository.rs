//! Repository port trait.
//!
//! This is the primary port in our hexagonal architecture.
//! Adapters (SQLite, InMemory) implement this trait.

use crate::domain::{
    Account, AccountId, Category, CategoryId, CategoryKind, Company, CompanyId, Currency,
    CurrencyCode, MediaId, Payment, PaymentFields, PaymentId, Vendor,
};
use crate::dto::{PaymentFilters, PaymentListItem};
use crate::error::RepoError;

/// The main repository port for payment and reference-data operations.
///
/// Every operation is scoped by an explicit `CompanyId`; there is no ambient
/// tenant state.
#[async_trait::async_trait]
pub trait PaymentRepository: Send + Sync + 'static {
    // ─────────────────────────────────────────────────────────────────────────
    // Payment Operations
    // ─────────────────────────────────────────────────────────────────────────

    /// Persists a new payment record.
    async fn create_payment(&self, payment: Payment) -> Result<Payment, RepoError>;

    /// Gets a payment by ID within a company.
    async fn get_payment(
        &self,
        company_id: CompanyId,
        id: PaymentId,
    ) -> Result<Option<Payment>, RepoError>;

    /// Lists payments joined with vendor/account/category names, ordered by
    /// paid_at descending, optionally filtered.
    async fn list_payments(
        &self,
        company_id: CompanyId,
        filters: &PaymentFilters,
    ) -> Result<Vec<PaymentListItem>, RepoError>;

    /// Replaces the writable fields of an existing payment.
    /// Fails with `RepoError::NotFound` if the payment does not exist.
    async fn update_payment(
        &self,
        company_id: CompanyId,
        id: PaymentId,
        fields: &PaymentFields,
    ) -> Result<Payment, RepoError>;

    /// Associates a stored attachment with a payment, replacing any existing
    /// association.
    async fn set_attachment(
        &self,
        company_id: CompanyId,
        id: PaymentId,
        media: MediaId,
    ) -> Result<(), RepoError>;

    /// Deletes a payment. Returns whether a record was removed.
    async fn delete_payment(
        &self,
        company_id: CompanyId,
        id: PaymentId,
    ) -> Result<bool, RepoError>;

    // ─────────────────────────────────────────────────────────────────────────
    // Reference Data (read side)
    // ─────────────────────────────────────────────────────────────────────────

    /// Enabled vendors for a company, by name.
    async fn enabled_vendors(&self, company_id: CompanyId) -> Result<Vec<Vendor>, RepoError>;

    /// Enabled accounts for a company, by name.
    async fn enabled_accounts(&self, company_id: CompanyId) -> Result<Vec<Account>, RepoError>;

    /// Looks up an account by id, enabled or not. The edit form resolves a
    /// payment's own account through this, so disabling an account never
    /// hides the currency of payments already made from it.
    async fn get_account(
        &self,
        company_id: CompanyId,
        id: AccountId,
    ) -> Result<Option<Account>, RepoError>;

    /// Enabled categories of the given kind for a company, by name.
    async fn enabled_categories(
        &self,
        company_id: CompanyId,
        kind: CategoryKind,
    ) -> Result<Vec<Category>, RepoError>;

    /// Enabled currencies for a company, by code.
    async fn enabled_currencies(&self, company_id: CompanyId) -> Result<Vec<Currency>, RepoError>;

    /// Looks up a currency by code, enabled or not. Writes snapshot from the
    /// row this returns.
    async fn find_currency(
        &self,
        company_id: CompanyId,
        code: &CurrencyCode,
    ) -> Result<Option<Currency>, RepoError>;

    /// The company's transfer category, if one is configured.
    async fn transfer_category(
        &self,
        company_id: CompanyId,
    ) -> Result<Option<CategoryId>, RepoError>;

    /// The company's default account, if one is configured.
    async fn default_account(&self, company_id: CompanyId) -> Result<Option<Account>, RepoError>;

    // ─────────────────────────────────────────────────────────────────────────
    // Reference Data (write side, used by seeding and tests)
    // ─────────────────────────────────────────────────────────────────────────

    /// Creates a company.
    async fn create_company(&self, company: Company) -> Result<Company, RepoError>;

    /// Sets the company default account.
    async fn set_default_account(
        &self,
        company_id: CompanyId,
        account_id: AccountId,
    ) -> Result<(), RepoError>;

    /// Creates a vendor.
    async fn create_vendor(&self, vendor: Vendor) -> Result<Vendor, RepoError>;

    /// Creates an account.
    async fn create_account(&self, account: Account) -> Result<Account, RepoError>;

    /// Creates a category.
    async fn create_category(&self, category: Category) -> Result<Category, RepoError>;

    /// Inserts or replaces a currency row, keyed by (company, code).
    async fn upsert_currency(&self, currency: Currency) -> Result<Currency, RepoError>;
}
