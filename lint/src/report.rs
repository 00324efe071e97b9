use crate::error::LintError;
use crate::Issue;
use clap::ValueEnum;
use std::fmt::Write;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum Format {
    #[default]
    Text,
    Json,
}

pub fn render(issues: &[Issue], format: Format) -> Result<String, LintError> {
    match format {
        Format::Text => Ok(render_text(issues)),
        Format::Json => Ok(serde_json::to_string_pretty(issues)?),
    }
}

/// `path:line:column: severity[Rule]: message`, one issue per line, then a summary line.
pub fn render_text(issues: &[Issue]) -> String {
    let mut out = String::new();
    for issue in issues {
        let _ = write!(out, "{}:{}:{}: {}", issue.path.display(), issue.line, issue.column, issue.severity);
        if let Some(rule) = issue.rule {
            let _ = write!(out, "[{rule}]");
        }
        let _ = writeln!(out, ": {}", issue.message);
    }
    let errors = issues.iter().filter(|i| i.is_error()).count();
    let _ = writeln!(out, "{} issues ({} errors, {} warnings)", issues.len(), errors, issues.len() - errors);
    out
}
