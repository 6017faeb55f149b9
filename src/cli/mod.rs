//! CLI command definitions and report printing.
//!
//! Uses clap derive macros for ergonomic argument definitions.

pub mod args;

use std::path::Path;

use genpass::template::{Kind, Template};

/// Human-readable `check` report.
pub fn format_check_text(path: &Path, template: &Template) -> String {
    use colored::Colorize;

    let mut out = String::new();
    let count = template.records().count();
    out.push_str(&format!(
        "  {} {}  {}\n",
        "✔".green().bold(),
        path.display().to_string().bold(),
        format!("{count} record(s)").dimmed(),
    ));
    for record in template.records() {
        let unit = match record.kind {
            Kind::Word => "words",
            Kind::Hex | Kind::Base64 => "bytes",
        };
        out.push_str(&format!(
            "         {}  {} {} {}\n",
            record.key.cyan(),
            record.kind,
            record.length,
            unit.dimmed(),
        ));
    }
    out
}

/// Machine-readable `check` report.
pub fn format_check_json(template: &Template) -> Result<String, serde_json::Error> {
    let records: Vec<_> = template.records().collect();
    let output = serde_json::json!({ "records": records });
    serde_json::to_string_pretty(&output)
}
