//! The `list-rules` use case.

use monoguard_engine::RuleCatalog;

/// One line per rule type: kind, padded, then its description.
pub fn list_rules(catalog: &RuleCatalog) -> String {
    let width = catalog.kinds().map(str::len).max().unwrap_or(0);
    let mut out = String::new();
    for rule_type in catalog.iter() {
        out.push_str(&format!(
            "{:<width$}  {}\n",
            rule_type.kind(),
            rule_type.description()
        ));
    }
    out
}
