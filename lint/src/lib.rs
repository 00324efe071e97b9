//! Advisory lint over entity declarations, running the generator's rule set on source files
//! without compiling them.

pub mod error;
pub mod report;
pub mod scan;
pub mod settings;

use codegen::attrs::EntityDecl;
use codegen::{rules, AdapterIndex, Diagnostic, Rule, Severity};
use error::LintError;
use serde::{Serialize, Serializer};
use settings::LintConfig;
use std::collections::HashSet;
use std::fmt::Display;
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct Issue {
    pub path: PathBuf,
    pub line: usize,
    pub column: usize,
    pub element: String,
    #[serde(serialize_with = "as_display")]
    pub severity: Severity,
    #[serde(serialize_with = "rule_id")]
    pub rule: Option<Rule>,
    pub title: Option<String>,
    pub message: String,
}

fn as_display<T: Display, S: Serializer>(value: &T, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

fn rule_id<S: Serializer>(rule: &Option<Rule>, serializer: S) -> Result<S::Ok, S::Error> {
    match rule {
        Some(rule) => serializer.serialize_some(rule.id()),
        None => serializer.serialize_none(),
    }
}

impl Issue {
    pub fn from_diagnostic(path: &Path, diagnostic: Diagnostic) -> Issue {
        let start = diagnostic.location.span.start();
        Issue {
            path: path.to_path_buf(),
            line: start.line,
            column: start.column + 1,
            element: diagnostic.location.element,
            severity: diagnostic.severity,
            rule: diagnostic.rule,
            title: diagnostic.rule.map(|rule| rule.title().to_string()),
            message: diagnostic.message,
        }
    }

    fn from_syn_error(path: &Path, element: &str, err: syn::Error) -> Issue {
        let start = err.span().start();
        Issue {
            path: path.to_path_buf(),
            line: start.line,
            column: start.column + 1,
            element: element.to_string(),
            severity: Severity::Error,
            rule: None,
            title: None,
            message: err.to_string(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}

pub struct Linter {
    disabled: HashSet<Rule>,
    warnings_as_errors: bool,
    exclude_dirs: Vec<String>,
}

impl Linter {
    pub fn new(config: &LintConfig) -> Result<Linter, LintError> {
        Ok(Linter {
            disabled: config.disabled()?,
            warnings_as_errors: config.warnings_as_errors,
            exclude_dirs: config.exclude_dirs.clone(),
        })
    }

    /// Lints every `.rs` file under `root`, or `root` itself when it is a file.
    pub fn lint_path(&self, root: &Path) -> Result<Vec<Issue>, LintError> {
        let mut files = Vec::new();
        self.rust_files(root, &mut files)?;
        let mut sources = Vec::with_capacity(files.len());
        for path in files {
            let source = fs::read_to_string(&path).map_err(|source| LintError::Io { path: path.clone(), source })?;
            sources.push((path, source));
        }
        Ok(self.lint_sources(&sources))
    }

    /// Adapters are indexed across all sources first, so an entity may use an adapter
    /// declared in another file.
    pub fn lint_sources(&self, sources: &[(PathBuf, String)]) -> Vec<Issue> {
        let mut issues = Vec::new();
        let mut parsed = Vec::with_capacity(sources.len());
        for (path, source) in sources {
            match syn::parse_file(source) {
                Ok(file) => parsed.push((path, file)),
                Err(e) => issues.push(Issue::from_syn_error(path, "file", e)),
            }
        }

        let mut adapters = AdapterIndex::default();
        for (_, file) in &parsed {
            scan::collect_adapters(&file.items, &mut adapters);
        }
        codegen::info!("indexed {} adapters in {} files", adapters.len(), parsed.len());

        for (path, file) in &parsed {
            let mut entities = Vec::new();
            scan::collect_entities(&file.items, &mut entities);
            for item in entities {
                match EntityDecl::parse(item) {
                    Ok(decl) => issues.extend(
                        rules::check_entity(&decl, &adapters)
                            .into_iter()
                            .filter(|d| d.rule.is_none_or(|rule| !self.disabled.contains(&rule)))
                            .map(|d| self.escalate(Issue::from_diagnostic(path, d))),
                    ),
                    Err(e) => issues.push(Issue::from_syn_error(path, &item.ident.to_string(), e)),
                }
            }
        }
        issues
    }

    fn escalate(&self, mut issue: Issue) -> Issue {
        if self.warnings_as_errors && issue.severity == Severity::Warning {
            issue.severity = Severity::Error;
        }
        issue
    }

    fn rust_files(&self, path: &Path, out: &mut Vec<PathBuf>) -> Result<(), LintError> {
        let io_err = |source| LintError::Io { path: path.to_path_buf(), source };
        if path.is_file() {
            if path.extension().is_some_and(|ext| ext == "rs") {
                out.push(path.to_path_buf());
            }
            return Ok(());
        }
        let mut entries = fs::read_dir(path).map_err(io_err)?.map(|e| e.map(|e| e.path())).collect::<Result<Vec<_>, _>>().map_err(io_err)?;
        entries.sort();
        for entry in entries {
            let excluded = entry.is_dir()
                && entry.file_name().and_then(|n| n.to_str()).is_some_and(|name| self.exclude_dirs.iter().any(|d| d == name));
            if !excluded {
                self.rust_files(&entry, out)?;
            }
        }
        Ok(())
    }
}
