//! Name-keyed lookup of backend constructors.

use rustc_hash::FxHashMap;
use tracing::debug;

use crate::backend::{Backend, BackendConfig, BackendFactory};
use crate::error::{HalError, HalResult};

type Constructor = Box<dyn Fn(BackendConfig) -> HalResult<Box<dyn Backend>> + Send + Sync>;

/// Registry that turns a backend name and a [`BackendConfig`] into a
/// boxed [`Backend`].
///
/// Callers register concrete backends once at startup and afterwards only
/// deal with `dyn Backend`.
#[derive(Default)]
pub struct BackendRegistry {
    constructors: FxHashMap<String, Constructor>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a backend type that knows how to build itself from config.
    pub fn register<B>(&mut self, name: impl Into<String>)
    where
        B: BackendFactory + 'static,
    {
        let name = name.into();
        debug!(backend = %name, "registering backend");
        self.constructors.insert(
            name,
            Box::new(|config| Ok(Box::new(B::from_config(config)?) as Box<dyn Backend>)),
        );
    }

    /// Register a backend with a custom constructor closure.
    pub fn register_factory(
        &mut self,
        name: impl Into<String>,
        factory: impl Fn(BackendConfig) -> HalResult<Box<dyn Backend>> + Send + Sync + 'static,
    ) {
        let name = name.into();
        debug!(backend = %name, "registering backend factory");
        self.constructors.insert(name, Box::new(factory));
    }

    /// Build the backend registered under `name`.
    pub fn create(&self, name: &str, config: BackendConfig) -> HalResult<Box<dyn Backend>> {
        let constructor = self.constructors.get(name).ok_or_else(|| {
            HalError::BackendUnavailable(format!(
                "no backend registered with name '{name}' (available: {})",
                self.available_backends().join(", ")
            ))
        })?;
        constructor(config)
    }

    /// Registered names, sorted.
    pub fn available_backends(&self) -> Vec<String> {
        let mut names: Vec<_> = self.constructors.keys().cloned().collect();
        names.sort();
        names
    }

    pub fn has_backend(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn refuse(_: BackendConfig) -> HalResult<Box<dyn Backend>> {
        Err(HalError::BackendUnavailable("test only".into()))
    }

    #[test]
    fn test_empty_registry() {
        let registry = BackendRegistry::new();
        assert!(registry.available_backends().is_empty());
        assert!(!registry.has_backend("simulator"));
    }

    #[test]
    fn test_register_factory() {
        let mut registry = BackendRegistry::new();
        registry.register_factory("test", refuse);

        assert!(registry.has_backend("test"));
        assert!(matches!(
            registry.create("test", BackendConfig::new("test")),
            Err(HalError::BackendUnavailable(_))
        ));
    }

    #[test]
    fn test_unknown_backend_lists_alternatives() {
        let mut registry = BackendRegistry::new();
        registry.register_factory("simulator", refuse);

        let Err(err) = registry.create("qpu", BackendConfig::new("qpu")) else {
            panic!("unknown backend must fail");
        };
        let msg = err.to_string();
        assert!(msg.contains("'qpu'"));
        assert!(msg.contains("simulator"));
    }

    #[test]
    fn test_available_backends_sorted() {
        let mut registry = BackendRegistry::new();
        registry.register_factory("zebra", refuse);
        registry.register_factory("alpha", refuse);

        assert_eq!(registry.available_backends(), vec!["alpha", "zebra"]);
    }
}
