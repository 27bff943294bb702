//! Payment method provider port.
//!
//! Providers register into a [`PaymentMethodRegistry`] at startup; the form
//! endpoints ask the registry which method identifiers are available. This
//! replaces per-request module discovery with a fixed, typed registration
//! point.

use std::collections::BTreeSet;

/// Port trait for modules contributing payment methods.
pub trait PaymentMethodProvider: Send + Sync {
    /// Stable identifiers of the payment methods this provider offers,
    /// e.g. `"offline.cash"`.
    fn methods(&self) -> Vec<String>;
}

/// Registry of payment method providers, resolved once at startup.
#[derive(Default)]
pub struct PaymentMethodRegistry {
    providers: Vec<Box<dyn PaymentMethodProvider>>,
}

impl PaymentMethodRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a provider.
    pub fn register(&mut self, provider: Box<dyn PaymentMethodProvider>) {
        self.providers.push(provider);
    }

    /// All available method identifiers across providers, sorted and deduped.
    pub fn list_available(&self) -> Vec<String> {
        let set: BTreeSet<String> = self
            .providers
            .iter()
            .flat_map(|p| p.methods())
            .collect();
        set.into_iter().collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct StubProvider(Vec<&'static str>);

    impl PaymentMethodProvider for StubProvider {
        fn methods(&self) -> Vec<String> {
            self.0.iter().map(|s| s.to_string()).collect()
        }
    }

    #[test]
    fn test_empty_registry_lists_nothing() {
        let registry = PaymentMethodRegistry::new();
        assert!(registry.list_available().is_empty());
    }

    #[test]
    fn test_registry_merges_and_dedupes() {
        let mut registry = PaymentMethodRegistry::new();
        registry.register(Box::new(StubProvider(vec!["offline.cash", "offline.check"])));
        registry.register(Box::new(StubProvider(vec!["offline.cash", "gateway.card"])));

        assert_eq!(
            registry.list_available(),
            vec!["gateway.card", "offline.cash", "offline.check"]
        );
    }
}
