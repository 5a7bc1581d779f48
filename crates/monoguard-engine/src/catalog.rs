//! Registry of available rule types.

use crate::rule::RuleType;
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Clone, Default)]
pub struct RuleCatalog {
    types: BTreeMap<&'static str, Arc<dyn RuleType>>,
}

impl RuleCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a rule type under its kind. A later registration of the same kind wins.
    pub fn register(&mut self, rule_type: Arc<dyn RuleType>) {
        self.types.insert(rule_type.kind(), rule_type);
    }

    pub fn with(mut self, rule_type: Arc<dyn RuleType>) -> Self {
        self.register(rule_type);
        self
    }

    pub fn get(&self, kind: &str) -> Option<Arc<dyn RuleType>> {
        self.types.get(kind).cloned()
    }

    pub fn kinds(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.types.keys().copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn RuleType>> {
        self.types.values()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }
}

impl std::fmt::Debug for RuleCatalog {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list().entries(self.types.keys()).finish()
    }
}
