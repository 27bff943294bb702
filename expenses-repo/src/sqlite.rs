//! SQLite repository adapter.

use async_trait::async_trait;
use sqlx::SqlitePool;
use sqlx::sqlite::SqliteConnectOptions;
use std::str::FromStr;

use expenses_types::{
    Account, AccountId, Category, CategoryId, CategoryKind, Company, CompanyId, Currency,
    CurrencyCode, MediaId, Payment, PaymentFields, PaymentFilters, PaymentId, PaymentListItem,
    PaymentRepository, RepoError, Vendor,
};

use crate::types::{
    DbAccount, DbCategory, DbCategoryId, DbCurrency, DbPayment, DbPaymentWithNames, DbVendor,
};

// ─────────────────────────────────────────────────────────────────────────────
// SQLite Repository
// ─────────────────────────────────────────────────────────────────────────────

/// SQLite repository implementation.
pub struct SqliteRepo {
    pool: SqlitePool,
}

impl SqliteRepo {
    /// Creates a new SQLite repository with automatic migration.
    pub async fn new(database_url: &str) -> anyhow::Result<Self> {
        // Ensure on-disk SQLite target directory exists (no-op for in-memory).
        if let Some(path) = database_url.strip_prefix("sqlite://") {
            let path = path.split('?').next().unwrap_or(path);
            if path != ":memory:" {
                let p = std::path::Path::new(path);
                if let Some(parent) = p.parent() {
                    if !parent.as_os_str().is_empty() {
                        tokio::fs::create_dir_all(parent).await?;
                    }
                }
            }
        }

        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        let pool = SqlitePool::connect_with(options).await?;

        let ddl = include_str!("../migrations/0001_create_tables.sql");
        sqlx::query(ddl).execute(&pool).await?;

        Ok(Self { pool })
    }

    /// Returns a reference to the connection pool.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }
}

fn db_err(e: sqlx::Error) -> RepoError {
    RepoError::Database(e.to_string())
}

// ─────────────────────────────────────────────────────────────────────────────
// Repository implementation
// ─────────────────────────────────────────────────────────────────────────────

#[async_trait]
impl PaymentRepository for SqliteRepo {
    async fn create_payment(&self, payment: Payment) -> Result<Payment, RepoError> {
        let f = &payment.fields;

        sqlx::query(
            r#"INSERT INTO payments
               (id, company_id, account_id, paid_at, amount, currency_code, currency_rate,
                vendor_id, description, category_id, payment_method, reference, attachment, created_at)
               VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)"#,
        )
        .bind(payment.id.to_string())
        .bind(payment.company_id.to_string())
        .bind(f.account_id.to_string())
        .bind(f.paid_at.format("%Y-%m-%d").to_string())
        .bind(f.amount)
        .bind(f.currency_code.as_str())
        .bind(f.currency_rate)
        .bind(f.vendor_id.to_string())
        .bind(&f.description)
        .bind(f.category_id.to_string())
        .bind(&f.payment_method)
        .bind(&f.reference)
        .bind(payment.attachment.map(|m| m.to_string()))
        .bind(payment.created_at.to_rfc3339())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(payment)
    }

    async fn get_payment(
        &self,
        company_id: CompanyId,
        id: PaymentId,
    ) -> Result<Option<Payment>, RepoError> {
        let row: Option<DbPayment> = sqlx::query_as(
            r#"SELECT id, company_id, account_id, paid_at, amount, currency_code, currency_rate,
                      vendor_id, description, category_id, payment_method, reference, attachment, created_at
               FROM payments WHERE id = ? AND company_id = ?"#,
        )
        .bind(id.to_string())
        .bind(company_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(DbPayment::into_domain).transpose()
    }

    async fn list_payments(
        &self,
        company_id: CompanyId,
        filters: &PaymentFilters,
    ) -> Result<Vec<PaymentListItem>, RepoError> {
        let vendor = filters.vendor_id.map(|v| v.to_string());
        let category = filters.category_id.map(|c| c.to_string());
        let account = filters.account_id.map(|a| a.to_string());

        let rows: Vec<DbPaymentWithNames> = sqlx::query_as(
            r#"SELECT p.id, p.company_id, p.account_id, p.paid_at, p.amount, p.currency_code,
                      p.currency_rate, p.vendor_id, p.description, p.category_id,
                      p.payment_method, p.reference, p.attachment, p.created_at,
                      v.name AS vendor_name, a.name AS account_name, c.name AS category_name
               FROM payments p
               JOIN vendors v ON v.id = p.vendor_id
               JOIN accounts a ON a.id = p.account_id
               JOIN categories c ON c.id = p.category_id
               WHERE p.company_id = ?
                 AND (? IS NULL OR p.vendor_id = ?)
                 AND (? IS NULL OR p.category_id = ?)
                 AND (? IS NULL OR p.account_id = ?)
               ORDER BY p.paid_at DESC, p.created_at DESC"#,
        )
        .bind(company_id.to_string())
        .bind(&vendor)
        .bind(&vendor)
        .bind(&category)
        .bind(&category)
        .bind(&account)
        .bind(&account)
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.into_iter().map(DbPaymentWithNames::into_domain).collect()
    }

    async fn update_payment(
        &self,
        company_id: CompanyId,
        id: PaymentId,
        fields: &PaymentFields,
    ) -> Result<Payment, RepoError> {
        let result = sqlx::query(
            r#"UPDATE payments
               SET account_id = ?, paid_at = ?, amount = ?, currency_code = ?, currency_rate = ?,
                   vendor_id = ?, description = ?, category_id = ?, payment_method = ?, reference = ?
               WHERE id = ? AND company_id = ?"#,
        )
        .bind(fields.account_id.to_string())
        .bind(fields.paid_at.format("%Y-%m-%d").to_string())
        .bind(fields.amount)
        .bind(fields.currency_code.as_str())
        .bind(fields.currency_rate)
        .bind(fields.vendor_id.to_string())
        .bind(&fields.description)
        .bind(fields.category_id.to_string())
        .bind(&fields.payment_method)
        .bind(&fields.reference)
        .bind(id.to_string())
        .bind(company_id.to_string())
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        self.get_payment(company_id, id)
            .await?
            .ok_or(RepoError::NotFound)
    }

    async fn set_attachment(
        &self,
        company_id: CompanyId,
        id: PaymentId,
        media: MediaId,
    ) -> Result<(), RepoError> {
        let result =
            sqlx::query(r#"UPDATE payments SET attachment = ? WHERE id = ? AND company_id = ?"#)
                .bind(media.to_string())
                .bind(id.to_string())
                .bind(company_id.to_string())
                .execute(&self.pool)
                .await
                .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn delete_payment(
        &self,
        company_id: CompanyId,
        id: PaymentId,
    ) -> Result<bool, RepoError> {
        let result = sqlx::query(r#"DELETE FROM payments WHERE id = ? AND company_id = ?"#)
            .bind(id.to_string())
            .bind(company_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(result.rows_affected() > 0)
    }

    async fn enabled_vendors(&self, company_id: CompanyId) -> Result<Vec<Vendor>, RepoError> {
        let rows: Vec<DbVendor> = sqlx::query_as(
            r#"SELECT id, company_id, name, enabled FROM vendors
               WHERE company_id = ? AND enabled = 1 ORDER BY name"#,
        )
        .bind(company_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.into_iter().map(DbVendor::into_domain).collect()
    }

    async fn enabled_accounts(&self, company_id: CompanyId) -> Result<Vec<Account>, RepoError> {
        let rows: Vec<DbAccount> = sqlx::query_as(
            r#"SELECT id, company_id, name, currency_code, enabled FROM accounts
               WHERE company_id = ? AND enabled = 1 ORDER BY name"#,
        )
        .bind(company_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.into_iter().map(DbAccount::into_domain).collect()
    }

    async fn get_account(
        &self,
        company_id: CompanyId,
        id: AccountId,
    ) -> Result<Option<Account>, RepoError> {
        let row: Option<DbAccount> = sqlx::query_as(
            r#"SELECT id, company_id, name, currency_code, enabled FROM accounts
               WHERE id = ? AND company_id = ?"#,
        )
        .bind(id.to_string())
        .bind(company_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(DbAccount::into_domain).transpose()
    }

    async fn enabled_categories(
        &self,
        company_id: CompanyId,
        kind: CategoryKind,
    ) -> Result<Vec<Category>, RepoError> {
        let rows: Vec<DbCategory> = sqlx::query_as(
            r#"SELECT id, company_id, name, kind, enabled FROM categories
               WHERE company_id = ? AND kind = ? AND enabled = 1 ORDER BY name"#,
        )
        .bind(company_id.to_string())
        .bind(kind.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.into_iter().map(DbCategory::into_domain).collect()
    }

    async fn enabled_currencies(&self, company_id: CompanyId) -> Result<Vec<Currency>, RepoError> {
        let rows: Vec<DbCurrency> = sqlx::query_as(
            r#"SELECT company_id, code, name, rate, enabled FROM currencies
               WHERE company_id = ? AND enabled = 1 ORDER BY code"#,
        )
        .bind(company_id.to_string())
        .fetch_all(&self.pool)
        .await
        .map_err(db_err)?;

        rows.into_iter().map(DbCurrency::into_domain).collect()
    }

    async fn find_currency(
        &self,
        company_id: CompanyId,
        code: &CurrencyCode,
    ) -> Result<Option<Currency>, RepoError> {
        let row: Option<DbCurrency> = sqlx::query_as(
            r#"SELECT company_id, code, name, rate, enabled FROM currencies
               WHERE company_id = ? AND code = ?"#,
        )
        .bind(company_id.to_string())
        .bind(code.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(DbCurrency::into_domain).transpose()
    }

    async fn transfer_category(
        &self,
        company_id: CompanyId,
    ) -> Result<Option<CategoryId>, RepoError> {
        let row: Option<DbCategoryId> = sqlx::query_as(
            r#"SELECT id FROM categories WHERE company_id = ? AND kind = 'transfer' LIMIT 1"#,
        )
        .bind(company_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(DbCategoryId::into_domain).transpose()
    }

    async fn default_account(&self, company_id: CompanyId) -> Result<Option<Account>, RepoError> {
        let row: Option<DbAccount> = sqlx::query_as(
            r#"SELECT a.id, a.company_id, a.name, a.currency_code, a.enabled
               FROM accounts a
               JOIN companies co ON co.default_account_id = a.id
               WHERE co.id = ?"#,
        )
        .bind(company_id.to_string())
        .fetch_optional(&self.pool)
        .await
        .map_err(db_err)?;

        row.map(DbAccount::into_domain).transpose()
    }

    async fn create_company(&self, company: Company) -> Result<Company, RepoError> {
        sqlx::query(r#"INSERT INTO companies (id, name, default_account_id) VALUES (?, ?, ?)"#)
            .bind(company.id.to_string())
            .bind(&company.name)
            .bind(company.default_account_id.map(|a| a.to_string()))
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(company)
    }

    async fn set_default_account(
        &self,
        company_id: CompanyId,
        account_id: AccountId,
    ) -> Result<(), RepoError> {
        let result = sqlx::query(r#"UPDATE companies SET default_account_id = ? WHERE id = ?"#)
            .bind(account_id.to_string())
            .bind(company_id.to_string())
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        if result.rows_affected() == 0 {
            return Err(RepoError::NotFound);
        }

        Ok(())
    }

    async fn create_vendor(&self, vendor: Vendor) -> Result<Vendor, RepoError> {
        sqlx::query(r#"INSERT INTO vendors (id, company_id, name, enabled) VALUES (?, ?, ?, ?)"#)
            .bind(vendor.id.to_string())
            .bind(vendor.company_id.to_string())
            .bind(&vendor.name)
            .bind(vendor.enabled as i64)
            .execute(&self.pool)
            .await
            .map_err(db_err)?;

        Ok(vendor)
    }

    async fn create_account(&self, account: Account) -> Result<Account, RepoError> {
        sqlx::query(
            r#"INSERT INTO accounts (id, company_id, name, currency_code, enabled)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(account.id.to_string())
        .bind(account.company_id.to_string())
        .bind(&account.name)
        .bind(account.currency_code.as_str())
        .bind(account.enabled as i64)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(account)
    }

    async fn create_category(&self, category: Category) -> Result<Category, RepoError> {
        sqlx::query(
            r#"INSERT INTO categories (id, company_id, name, kind, enabled)
               VALUES (?, ?, ?, ?, ?)"#,
        )
        .bind(category.id.to_string())
        .bind(category.company_id.to_string())
        .bind(&category.name)
        .bind(category.kind.as_str())
        .bind(category.enabled as i64)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(category)
    }

    async fn upsert_currency(&self, currency: Currency) -> Result<Currency, RepoError> {
        sqlx::query(
            r#"INSERT INTO currencies (company_id, code, name, rate, enabled)
               VALUES (?, ?, ?, ?, ?)
               ON CONFLICT (company_id, code)
               DO UPDATE SET name = excluded.name, rate = excluded.rate, enabled = excluded.enabled"#,
        )
        .bind(currency.company_id.to_string())
        .bind(currency.code.as_str())
        .bind(&currency.name)
        .bind(currency.rate)
        .bind(currency.enabled as i64)
        .execute(&self.pool)
        .await
        .map_err(db_err)?;

        Ok(currency)
    }
}
