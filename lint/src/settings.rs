use crate::error::LintError;
use codegen::Rule;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashSet;

pub const DEFAULT_CONFIG_FILE: &str = "sqlbit-lint";
pub const ENV_PREFIX: &str = "SQLBIT_LINT";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LintConfig {
    /// Rule ids that are never reported.
    pub disabled_rules: Vec<String>,
    pub warnings_as_errors: bool,
    /// Directory names skipped while walking the sources.
    pub exclude_dirs: Vec<String>,
}

impl Default for LintConfig {
    fn default() -> Self {
        LintConfig { disabled_rules: Vec::new(), warnings_as_errors: false, exclude_dirs: vec!["target".to_string(), ".git".to_string()] }
    }
}

impl LintConfig {
    /// Optional config file (any format `config` detects from the extension), overridden by
    /// `SQLBIT_LINT__*` environment variables.
    pub fn new(path: &str) -> Result<Self, ConfigError> {
        Config::builder()
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .try_parsing(true)
                    .separator("__")
                    .list_separator(",")
                    .with_list_parse_key("disabled_rules")
                    .with_list_parse_key("exclude_dirs"),
            )
            .build()?
            .try_deserialize()
    }

    pub fn disabled(&self) -> Result<HashSet<Rule>, LintError> {
        self.disabled_rules
            .iter()
            .map(|id| Rule::from_id(id).ok_or_else(|| LintError::UnknownRule(id.clone())))
            .collect()
    }
}
