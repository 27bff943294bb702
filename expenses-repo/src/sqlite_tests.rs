//! SQLite repository integration tests.

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use expenses_types::{
        Account, AccountId, Category, CategoryId, CategoryKind, Company, CompanyId, Currency,
        CurrencyCode, MediaId, Payment, PaymentFields, PaymentFilters, PaymentId,
        PaymentRepository, RepoError, Vendor, VendorId,
    };

    use crate::SqliteRepo;

    async fn setup_repo() -> SqliteRepo {
        SqliteRepo::new("sqlite::memory:").await.unwrap()
    }

    struct Fixture {
        company: CompanyId,
        vendor: VendorId,
        account: AccountId,
        expense_category: CategoryId,
        transfer_category: CategoryId,
    }

    async fn seed(repo: &SqliteRepo) -> Fixture {
        let company = CompanyId::new();
        repo.create_company(Company {
            id: company,
            name: "Acme".to_string(),
            default_account_id: None,
        })
        .await
        .unwrap();

        let vendor = Vendor {
            id: VendorId::new(),
            company_id: company,
            name: "Paper Co".to_string(),
            enabled: true,
        };
        repo.create_vendor(vendor.clone()).await.unwrap();

        let account = Account {
            id: AccountId::new(),
            company_id: company,
            name: "Checking".to_string(),
            currency_code: CurrencyCode::new("USD").unwrap(),
            enabled: true,
        };
        repo.create_account(account.clone()).await.unwrap();
        repo.set_default_account(company, account.id).await.unwrap();

        let expense_category = Category {
            id: CategoryId::new(),
            company_id: company,
            name: "Supplies".to_string(),
            kind: CategoryKind::Expense,
            enabled: true,
        };
        repo.create_category(expense_category.clone()).await.unwrap();

        let transfer_category = Category {
            id: CategoryId::new(),
            company_id: company,
            name: "Transfer".to_string(),
            kind: CategoryKind::Transfer,
            enabled: true,
        };
        repo.create_category(transfer_category.clone())
            .await
            .unwrap();

        repo.upsert_currency(Currency {
            company_id: company,
            code: CurrencyCode::new("USD").unwrap(),
            name: "US Dollar".to_string(),
            rate: 1.0,
            enabled: true,
        })
        .await
        .unwrap();

        Fixture {
            company,
            vendor: vendor.id,
            account: account.id,
            expense_category: expense_category.id,
            transfer_category: transfer_category.id,
        }
    }

    fn fields(fx: &Fixture, amount: i64, paid_at: &str) -> PaymentFields {
        PaymentFields {
            account_id: fx.account,
            paid_at: NaiveDate::parse_from_str(paid_at, "%Y-%m-%d").unwrap(),
            amount,
            currency_code: CurrencyCode::new("USD").unwrap(),
            currency_rate: 1.0,
            vendor_id: fx.vendor,
            description: None,
            category_id: fx.expense_category,
            payment_method: "offline.cash".to_string(),
            reference: None,
        }
    }

    #[tokio::test]
    async fn test_create_and_get_payment() {
        let repo = setup_repo().await;
        let fx = seed(&repo).await;

        let payment = Payment::record(fx.company, fields(&fx, 10_000, "2024-03-15"));
        let created = repo.create_payment(payment.clone()).await.unwrap();

        let fetched = repo
            .get_payment(fx.company, created.id)
            .await
            .unwrap()
            .unwrap();

        assert_eq!(fetched.id, payment.id);
        assert_eq!(fetched.fields, payment.fields);
        assert!(fetched.attachment.is_none());
    }

    #[tokio::test]
    async fn test_get_payment_scoped_by_company() {
        let repo = setup_repo().await;
        let fx = seed(&repo).await;

        let payment = Payment::record(fx.company, fields(&fx, 500, "2024-01-01"));
        repo.create_payment(payment.clone()).await.unwrap();

        let other_company = CompanyId::new();
        let result = repo.get_payment(other_company, payment.id).await.unwrap();

        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_list_payments_ordered_by_paid_at_desc() {
        let repo = setup_repo().await;
        let fx = seed(&repo).await;

        let older = Payment::record(fx.company, fields(&fx, 100, "2024-01-01"));
        let newer = Payment::record(fx.company, fields(&fx, 200, "2024-06-01"));
        repo.create_payment(older.clone()).await.unwrap();
        repo.create_payment(newer.clone()).await.unwrap();

        let listing = repo
            .list_payments(fx.company, &PaymentFilters::default())
            .await
            .unwrap();

        assert_eq!(listing.len(), 2);
        assert_eq!(listing[0].payment.id, newer.id);
        assert_eq!(listing[1].payment.id, older.id);
        assert_eq!(listing[0].vendor_name, "Paper Co");
        assert_eq!(listing[0].account_name, "Checking");
        assert_eq!(listing[0].category_name, "Supplies");
    }

    #[tokio::test]
    async fn test_list_payments_filters_by_vendor() {
        let repo = setup_repo().await;
        let fx = seed(&repo).await;

        repo.create_payment(Payment::record(fx.company, fields(&fx, 100, "2024-01-01")))
            .await
            .unwrap();

        let filters = PaymentFilters {
            vendor_id: Some(VendorId::new()),
            ..Default::default()
        };
        let listing = repo.list_payments(fx.company, &filters).await.unwrap();
        assert!(listing.is_empty());

        let filters = PaymentFilters {
            vendor_id: Some(fx.vendor),
            ..Default::default()
        };
        let listing = repo.list_payments(fx.company, &filters).await.unwrap();
        assert_eq!(listing.len(), 1);
    }

    #[tokio::test]
    async fn test_update_payment_replaces_fields() {
        let repo = setup_repo().await;
        let fx = seed(&repo).await;

        let payment = Payment::record(fx.company, fields(&fx, 100, "2024-01-01"));
        repo.create_payment(payment.clone()).await.unwrap();

        let mut updated_fields = fields(&fx, 250, "2024-02-02");
        updated_fields.description = Some("Toner".to_string());

        let updated = repo
            .update_payment(fx.company, payment.id, &updated_fields)
            .await
            .unwrap();

        assert_eq!(updated.fields.amount, 250);
        assert_eq!(updated.fields.description.as_deref(), Some("Toner"));
    }

    #[tokio::test]
    async fn test_update_missing_payment_is_not_found() {
        let repo = setup_repo().await;
        let fx = seed(&repo).await;

        let result = repo
            .update_payment(fx.company, PaymentId::new(), &fields(&fx, 100, "2024-01-01"))
            .await;

        assert!(matches!(result, Err(RepoError::NotFound)));
    }

    #[tokio::test]
    async fn test_set_attachment_persists() {
        let repo = setup_repo().await;
        let fx = seed(&repo).await;

        let payment = Payment::record(fx.company, fields(&fx, 100, "2024-01-01"));
        repo.create_payment(payment.clone()).await.unwrap();

        let media = MediaId::new();
        repo.set_attachment(fx.company, payment.id, media)
            .await
            .unwrap();

        let fetched = repo
            .get_payment(fx.company, payment.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.attachment, Some(media));
    }

    #[tokio::test]
    async fn test_delete_payment_reports_removal() {
        let repo = setup_repo().await;
        let fx = seed(&repo).await;

        let payment = Payment::record(fx.company, fields(&fx, 100, "2024-01-01"));
        repo.create_payment(payment.clone()).await.unwrap();

        assert!(repo.delete_payment(fx.company, payment.id).await.unwrap());
        assert!(!repo.delete_payment(fx.company, payment.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_enabled_reference_lookups_filter_disabled_rows() {
        let repo = setup_repo().await;
        let fx = seed(&repo).await;

        repo.create_vendor(Vendor {
            id: VendorId::new(),
            company_id: fx.company,
            name: "Closed Shop".to_string(),
            enabled: false,
        })
        .await
        .unwrap();

        let vendors = repo.enabled_vendors(fx.company).await.unwrap();
        assert_eq!(vendors.len(), 1);
        assert_eq!(vendors[0].name, "Paper Co");
    }

    #[tokio::test]
    async fn test_get_account_ignores_enabled_flag() {
        let repo = setup_repo().await;
        let fx = seed(&repo).await;

        let closed = Account {
            id: AccountId::new(),
            company_id: fx.company,
            name: "Closed Savings".to_string(),
            currency_code: CurrencyCode::new("EUR").unwrap(),
            enabled: false,
        };
        repo.create_account(closed.clone()).await.unwrap();

        let fetched = repo
            .get_account(fx.company, closed.id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(fetched.currency_code.as_str(), "EUR");

        let enabled = repo.enabled_accounts(fx.company).await.unwrap();
        assert!(enabled.iter().all(|a| a.id != closed.id));

        let other_company = repo.get_account(CompanyId::new(), closed.id).await.unwrap();
        assert!(other_company.is_none());
    }

    #[tokio::test]
    async fn test_enabled_categories_filter_by_kind() {
        let repo = setup_repo().await;
        let fx = seed(&repo).await;

        let expense = repo
            .enabled_categories(fx.company, CategoryKind::Expense)
            .await
            .unwrap();
        assert_eq!(expense.len(), 1);
        assert_eq!(expense[0].id, fx.expense_category);
    }

    #[tokio::test]
    async fn test_transfer_category_lookup() {
        let repo = setup_repo().await;
        let fx = seed(&repo).await;

        let transfer = repo.transfer_category(fx.company).await.unwrap();
        assert_eq!(transfer, Some(fx.transfer_category));

        let other = repo.transfer_category(CompanyId::new()).await.unwrap();
        assert!(other.is_none());
    }

    #[tokio::test]
    async fn test_find_currency_and_default_account() {
        let repo = setup_repo().await;
        let fx = seed(&repo).await;

        let usd = repo
            .find_currency(fx.company, &CurrencyCode::new("usd").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(usd.rate, 1.0);

        let missing = repo
            .find_currency(fx.company, &CurrencyCode::new("XXX").unwrap())
            .await
            .unwrap();
        assert!(missing.is_none());

        let account = repo.default_account(fx.company).await.unwrap().unwrap();
        assert_eq!(account.id, fx.account);
    }

    #[tokio::test]
    async fn test_upsert_currency_replaces_rate() {
        let repo = setup_repo().await;
        let fx = seed(&repo).await;

        repo.upsert_currency(Currency {
            company_id: fx.company,
            code: CurrencyCode::new("USD").unwrap(),
            name: "US Dollar".to_string(),
            rate: 1.1,
            enabled: true,
        })
        .await
        .unwrap();

        let usd = repo
            .find_currency(fx.company, &CurrencyCode::new("USD").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(usd.rate, 1.1);
    }
}
