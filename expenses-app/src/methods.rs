//! Built-in payment method providers.
//!
//! Providers register at startup; the form endpoints only ever offer what the
//! registry was given here.

use expenses_types::PaymentMethodProvider;

/// The offline methods every installation starts with.
pub struct OfflinePaymentMethods;

impl PaymentMethodProvider for OfflinePaymentMethods {
    fn methods(&self) -> Vec<String> {
        vec![
            "offline.cash".to_string(),
            "offline.bank_transfer".to_string(),
            "offline.check".to_string(),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use expenses_types::PaymentMethodRegistry;

    #[test]
    fn test_offline_methods_are_listed_sorted() {
        let mut registry = PaymentMethodRegistry::new();
        registry.register(Box::new(OfflinePaymentMethods));

        let methods = registry.list_available();
        assert_eq!(
            methods,
            vec!["offline.bank_transfer", "offline.cash", "offline.check"]
        );
    }
}
