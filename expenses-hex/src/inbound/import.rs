//! CSV import-row reader.
//!
//! The import endpoint accepts a CSV document with a header row matching the
//! `PaymentImportRow` field names. Parsing stays lazy: each record becomes a
//! `Result`, and the service decides what a bad row means for the rows after
//! it.

use expenses_types::{DomainError, PaymentImportRow};

/// Reads import rows from CSV text. Fields are trimmed; the header row is
/// required.
pub fn read_rows(
    csv_text: &str,
) -> impl Iterator<Item = Result<PaymentImportRow, DomainError>> + '_ {
    csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(csv_text.as_bytes())
        .into_deserialize::<PaymentImportRow>()
        .map(|record| record.map_err(|e| DomainError::Validation(e.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn header() -> &'static str {
        "account_id,paid_at,amount,currency_code,currency_rate,vendor_id,description,category_id,payment_method,reference"
    }

    #[test]
    fn test_reads_valid_rows() {
        let account = Uuid::new_v4();
        let vendor = Uuid::new_v4();
        let category = Uuid::new_v4();

        let csv_text = format!(
            "{}\n{account},2024-03-15,5000,USD,1.0,{vendor},Office chairs,{category},offline.cash,INV-17\n",
            header()
        );

        let rows: Vec<_> = read_rows(&csv_text).collect();
        assert_eq!(rows.len(), 1);

        let row = rows[0].as_ref().unwrap();
        assert_eq!(row.amount, 5000);
        assert_eq!(row.currency_code.as_str(), "USD");
        assert_eq!(row.description.as_deref(), Some("Office chairs"));
        assert_eq!(row.reference.as_deref(), Some("INV-17"));
    }

    #[test]
    fn test_bad_row_becomes_error_without_stopping_iteration() {
        let account = Uuid::new_v4();
        let vendor = Uuid::new_v4();
        let category = Uuid::new_v4();

        let csv_text = format!(
            "{h}\n{account},2024-03-15,5000,USD,1.0,{vendor},,{category},offline.cash,\n{account},2024-03-16,not-a-number,USD,1.0,{vendor},,{category},offline.cash,\n",
            h = header()
        );

        let rows: Vec<_> = read_rows(&csv_text).collect();
        assert_eq!(rows.len(), 2);
        assert!(rows[0].is_ok());
        assert!(rows[1].is_err());
    }

    #[test]
    fn test_empty_optional_fields_are_none() {
        let account = Uuid::new_v4();
        let vendor = Uuid::new_v4();
        let category = Uuid::new_v4();

        let csv_text = format!(
            "{}\n{account},2024-03-15,5000,USD,1.0,{vendor},,{category},offline.cash,\n",
            header()
        );

        let row = read_rows(&csv_text).next().unwrap().unwrap();
        assert!(row.description.is_none());
        assert!(row.reference.is_none());
    }
}
