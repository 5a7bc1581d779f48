//! Terminal formatting of sealed scope reports.

use monoguard_engine::ScopeReport;

/// Failing scopes as `<name> (<dir>)` followed by one indented line per failure.
///
/// Long messages are indented one level further. Passing scopes are left out.
pub fn format_failures(reports: &[ScopeReport]) -> String {
    let mut out = String::new();
    for report in reports.iter().filter(|r| r.failed()) {
        out.push_str(&format!("{} ({})\n", report.name, report.dir));
        for failure in &report.failures {
            out.push_str(&format!("  {}: {}\n", failure.file, failure.message));
            if let Some(long) = &failure.long_message {
                for line in long.lines() {
                    out.push_str(&format!("    {line}\n"));
                }
            }
        }
    }
    out
}

/// One-line run summary.
pub fn format_summary(reports: &[ScopeReport]) -> String {
    let failed = reports.iter().filter(|r| r.failed()).count();
    let failures: usize = reports.iter().map(|r| r.failures.len()).sum();
    if failed == 0 {
        format!("checked {} scope(s), all passed", reports.len())
    } else {
        format!(
            "checked {} scope(s), {failed} failed with {failures} failure(s)",
            reports.len()
        )
    }
}
