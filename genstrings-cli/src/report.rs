use genstrings::{RunMode, SyncReport};

fn join_keys<'a>(keys: impl IntoIterator<Item = &'a String>) -> String {
    keys.into_iter()
        .map(|key| format!("\"{}\"", key))
        .collect::<Vec<_>>()
        .join(", ")
}

pub fn render_human(report: &SyncReport) -> String {
    let mut lines = Vec::new();
    lines.push("=== genstrings ===".to_string());
    lines.push(format!(
        "Scanned: {} files, {} occurrences, {} unique keys",
        report.files_scanned, report.occurrences, report.extracted
    ));

    lines.push(format!("\nMaster: {}", report.master.display()));
    lines.push(format!("  entries: {}", report.master_entries));
    lines.push(format!("  added: {}", report.diff.added.len()));
    lines.push(format!("  removed: {}", report.diff.removed.len()));
    if !report.diff.added.is_empty() {
        lines.push(format!("  added keys: {}", join_keys(&report.diff.added)));
    }
    if !report.diff.removed.is_empty() {
        lines.push(format!("  removed keys: {}", join_keys(&report.diff.removed)));
    }

    for locale in &report.locales {
        lines.push(format!("\nLocale: {}", locale.locale));
        lines.push(format!("  needs translation: {}", locale.missing.len()));
        lines.push(format!("  new strings file: {}", locale.output.display()));
    }

    lines.push(String::new());
    match report.mode {
        RunMode::Write => {
            for path in &report.written {
                lines.push(format!("✅ Wrote {}", path.display()));
            }
        }
        RunMode::DryRun => lines.push("Dry-run mode: no files were written".to_string()),
        RunMode::Check => lines.push(format!("✅ {} is up to date", report.master.display())),
    }

    lines.join("\n")
}

pub fn render_json(report: &SyncReport) -> Result<String, String> {
    serde_json::to_string_pretty(report)
        .map_err(|e| format!("Failed to serialize report JSON: {}", e))
}
