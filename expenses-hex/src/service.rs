//! Payment Application Service
//!
//! Orchestrates domain operations through the repository port.
//! Contains NO infrastructure logic - pure business orchestration.

use std::sync::Arc;

use expenses_types::{
    AppError, AttachmentStore, CategoryKind, CompanyId, CurrencyCode, DeleteOutcome, DomainError,
    ImportSummary, Payment, PaymentFields, PaymentFilters, PaymentFormData, PaymentId,
    PaymentImportRow, PaymentInput, PaymentListing, PaymentMethodRegistry, PaymentRepository,
    SelectOption,
};

/// Storage namespace for payment attachments.
const ATTACHMENT_NAMESPACE: &str = "payments";

/// Application service for expense payment operations.
///
/// Generic over `R: PaymentRepository` - the adapter is injected at compile
/// time. The attachment store and the payment-method registry are runtime
/// collaborators resolved at startup.
pub struct PaymentService<R: PaymentRepository> {
    repo: R,
    attachments: Arc<dyn AttachmentStore>,
    methods: PaymentMethodRegistry,
}

impl<R: PaymentRepository> PaymentService<R> {
    /// Creates a new payment service with the given collaborators.
    pub fn new(
        repo: R,
        attachments: Arc<dyn AttachmentStore>,
        methods: PaymentMethodRegistry,
    ) -> Self {
        Self {
            repo,
            attachments,
            methods,
        }
    }

    /// Returns a reference to the underlying repository.
    pub fn repo(&self) -> &R {
        &self.repo
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Read side
    // ─────────────────────────────────────────────────────────────────────────

    /// Lists payments (newest paid first) together with the filter dropdown
    /// option lists, each prefixed with an "all" sentinel.
    pub async fn list(
        &self,
        company_id: CompanyId,
        filters: &PaymentFilters,
    ) -> Result<PaymentListing, AppError> {
        let payments = self.repo.list_payments(company_id, filters).await?;

        let mut vendors = vec![SelectOption::all("All vendors")];
        vendors.extend(
            self.repo
                .enabled_vendors(company_id)
                .await?
                .into_iter()
                .map(|v| SelectOption::item(v.id, v.name)),
        );

        let mut categories = vec![SelectOption::all("All categories")];
        categories.extend(
            self.repo
                .enabled_categories(company_id, CategoryKind::Expense)
                .await?
                .into_iter()
                .map(|c| SelectOption::item(c.id, c.name)),
        );

        let mut accounts = vec![SelectOption::all("All accounts")];
        accounts.extend(
            self.repo
                .enabled_accounts(company_id)
                .await?
                .into_iter()
                .map(|a| SelectOption::item(a.id, a.name)),
        );

        let transfer_category_id = self.repo.transfer_category(company_id).await?;

        Ok(PaymentListing {
            payments,
            vendors,
            categories,
            accounts,
            transfer_category_id,
        })
    }

    /// Gathers the reference data backing the create form (`payment_id` =
    /// None) or the edit form. Side-effect free.
    pub async fn prepare_form(
        &self,
        company_id: CompanyId,
        payment_id: Option<PaymentId>,
    ) -> Result<PaymentFormData, AppError> {
        let payment = match payment_id {
            Some(id) => Some(
                self.repo
                    .get_payment(company_id, id)
                    .await?
                    .ok_or_else(|| AppError::NotFound(format!("Payment {id}")))?,
            ),
            None => None,
        };

        let accounts = self.repo.enabled_accounts(company_id).await?;

        // The create form preselects the default account's currency; the
        // edit form preselects the payment's own account's currency. The
        // edit lookup is unscoped by the enabled flag: a payment keeps its
        // account's currency even after the account is disabled.
        let account_currency_code = match &payment {
            Some(p) => self
                .repo
                .get_account(company_id, p.fields.account_id)
                .await?
                .map(|a| a.currency_code),
            None => self
                .repo
                .default_account(company_id)
                .await?
                .map(|a| a.currency_code),
        };

        let currencies = self
            .repo
            .enabled_currencies(company_id)
            .await?
            .into_iter()
            .map(|c| SelectOption::item(c.code, c.name))
            .collect();

        let vendors = self
            .repo
            .enabled_vendors(company_id)
            .await?
            .into_iter()
            .map(|v| SelectOption::item(v.id, v.name))
            .collect();

        let categories = self
            .repo
            .enabled_categories(company_id, CategoryKind::Expense)
            .await?
            .into_iter()
            .map(|c| SelectOption::item(c.id, c.name))
            .collect();

        Ok(PaymentFormData {
            accounts: accounts
                .into_iter()
                .map(|a| SelectOption::item(a.id, a.name))
                .collect(),
            currencies,
            account_currency_code,
            vendors,
            categories,
            payment_methods: self.methods.list_available(),
            payment,
        })
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Write side
    // ─────────────────────────────────────────────────────────────────────────

    /// Creates a payment with a fresh currency snapshot and stores the
    /// attachment, if one was uploaded.
    pub async fn create(
        &self,
        company_id: CompanyId,
        input: PaymentInput,
    ) -> Result<Payment, AppError> {
        let fields = self.snapshot_fields(company_id, &input).await?;

        let mut payment = self
            .repo
            .create_payment(Payment::record(company_id, fields))
            .await?;

        if let Some(upload) = &input.attachment {
            if let Some(media) = self
                .attachments
                .store(upload, ATTACHMENT_NAMESPACE)
                .await
                .map_err(|e| AppError::Internal(e.to_string()))?
            {
                self.repo
                    .set_attachment(company_id, payment.id, media)
                    .await?;
                payment.attachment = Some(media);
            }
        }

        Ok(payment)
    }

    /// Records a new payment carrying the same field values as an existing
    /// one. The clone gets its own identity and shares no state with the
    /// source; the source's attachment stays where it is.
    pub async fn duplicate(
        &self,
        company_id: CompanyId,
        payment_id: PaymentId,
    ) -> Result<Payment, AppError> {
        let source = self
            .repo
            .get_payment(company_id, payment_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Payment {payment_id}")))?;

        self.repo
            .create_payment(Payment::record(company_id, source.duplicate_fields()))
            .await
            .map_err(Into::into)
    }

    /// Imports rows one write at a time, stamping the company id onto each.
    ///
    /// Currency fields pass through as supplied - imports do not re-snapshot
    /// the rate. A bad row aborts the remainder and is reported with its row
    /// number, but rows already written stay written.
    pub async fn bulk_import<I>(
        &self,
        company_id: CompanyId,
        rows: I,
    ) -> Result<ImportSummary, AppError>
    where
        I: IntoIterator<Item = Result<PaymentImportRow, DomainError>>,
    {
        let mut imported = 0usize;

        for (idx, row) in rows.into_iter().enumerate() {
            let line = idx + 1;
            let row = row.map_err(|e| AppError::BadRequest(format!("row {line}: {e}")))?;

            if row.amount <= 0 {
                return Err(AppError::BadRequest(format!(
                    "row {line}: amount must be positive"
                )));
            }

            let fields = PaymentFields {
                account_id: row.account_id,
                paid_at: row.paid_at,
                amount: row.amount,
                currency_code: row.currency_code,
                currency_rate: row.currency_rate,
                vendor_id: row.vendor_id,
                description: row.description,
                category_id: row.category_id,
                payment_method: row.payment_method,
                reference: row.reference,
            };

            self.repo
                .create_payment(Payment::record(company_id, fields))
                .await?;
            imported += 1;
        }

        Ok(ImportSummary { imported })
    }

    /// Updates a payment, re-snapshotting the currency rate. The attachment
    /// association is replaced only when the input carries a new upload.
    pub async fn update(
        &self,
        company_id: CompanyId,
        payment_id: PaymentId,
        input: PaymentInput,
    ) -> Result<Payment, AppError> {
        let _ = self
            .repo
            .get_payment(company_id, payment_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Payment {payment_id}")))?;

        let fields = self.snapshot_fields(company_id, &input).await?;

        let mut payment = self
            .repo
            .update_payment(company_id, payment_id, &fields)
            .await?;

        if let Some(upload) = &input.attachment {
            if let Some(media) = self
                .attachments
                .store(upload, ATTACHMENT_NAMESPACE)
                .await
                .map_err(|e| AppError::Internal(e.to_string()))?
            {
                self.repo
                    .set_attachment(company_id, payment_id, media)
                    .await?;
                payment.attachment = Some(media);
            }
        }

        Ok(payment)
    }

    /// Deletes a payment, unless its category is the company's transfer
    /// category - transfer-linked payments are removed through the transfer
    /// workflow, so that case is a silent, successful no-op.
    pub async fn delete(
        &self,
        company_id: CompanyId,
        payment_id: PaymentId,
    ) -> Result<DeleteOutcome, AppError> {
        let payment = self
            .repo
            .get_payment(company_id, payment_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Payment {payment_id}")))?;

        let transfer = self.repo.transfer_category(company_id).await?;
        if transfer == Some(payment.fields.category_id) {
            return Ok(DeleteOutcome::TransferProtected);
        }

        let removed = self.repo.delete_payment(company_id, payment_id).await?;
        if !removed {
            return Err(AppError::NotFound(format!("Payment {payment_id}")));
        }

        Ok(DeleteOutcome::Deleted)
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Helpers
    // ─────────────────────────────────────────────────────────────────────────

    /// Validates the input and resolves its currency against the reference
    /// table, producing fields that carry the canonical code and rate.
    /// Whatever rate the client supplied is discarded.
    async fn snapshot_fields(
        &self,
        company_id: CompanyId,
        input: &PaymentInput,
    ) -> Result<PaymentFields, AppError> {
        if input.amount <= 0 {
            return Err(AppError::BadRequest("Amount must be positive".into()));
        }

        if input.payment_method.trim().is_empty() {
            return Err(AppError::BadRequest(
                "Payment method cannot be empty".into(),
            ));
        }

        let currency = self.lookup_currency(company_id, &input.currency_code).await?;

        Ok(PaymentFields {
            account_id: input.account_id,
            paid_at: input.paid_at,
            amount: input.amount,
            currency_code: currency.code,
            currency_rate: currency.rate,
            vendor_id: input.vendor_id,
            description: input.description.clone(),
            category_id: input.category_id,
            payment_method: input.payment_method.clone(),
            reference: input.reference.clone(),
        })
    }

    async fn lookup_currency(
        &self,
        company_id: CompanyId,
        code: &CurrencyCode,
    ) -> Result<expenses_types::Currency, AppError> {
        self.repo
            .find_currency(company_id, code)
            .await?
            .ok_or_else(|| AppError::Unprocessable(format!("Currency not found: {code}")))
    }
}
