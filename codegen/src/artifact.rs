//! Writes pretty-printed expansions next to the build output for inspection.

use proc_macro2::{Ident, TokenStream};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

pub const EXPAND_DIR_ENV: &str = "SQLBIT_EXPAND_DIR";
pub const EXPAND_ENV: &str = "SQLBIT_EXPAND";

#[derive(Debug, thiserror::Error)]
#[error("failed to write artifact {name}")]
pub struct ArtifactError {
    pub name: String,
    #[source]
    pub source: std::io::Error,
}

pub fn artifact_dir() -> Option<PathBuf> {
    if env::var(EXPAND_ENV).is_ok_and(|v| v == "0") {
        return None;
    }
    match env::var_os(EXPAND_DIR_ENV) {
        Some(dir) => Some(PathBuf::from(dir)),
        None => env::current_dir().ok().map(|dir| dir.join("target").join("sqlbit")),
    }
}

pub fn render(stream: &TokenStream, origin: &Ident) -> String {
    let body = match syn::parse2::<syn::File>(stream.clone()) {
        Ok(ast) => prettyplease::unparse(&ast),
        Err(_) => stream.to_string(),
    };
    format!("// Code generated by sqlbit from {origin}. Do not modify!\n\n{body}")
}

pub fn write_artifact(dir: &Path, kind: &str, name: &Ident, contents: &str) -> Result<PathBuf, ArtifactError> {
    let dir_path = dir.join(kind);
    let full_path = dir_path.join(format!("{name}.rs"));
    fs::create_dir_all(&dir_path)
        .and_then(|_| fs::write(&full_path, contents))
        .map_err(|source| ArtifactError { name: format!("{kind}/{name}"), source })?;
    Ok(full_path)
}

/// Writes the expansion when enabled and hands the stream back unchanged.
/// A failed write is logged and never fails the expansion.
pub fn submit(stream: TokenStream, kind: &str, name: &Ident) -> TokenStream {
    if let Some(dir) = artifact_dir() {
        if let Err(e) = write_artifact(&dir, kind, name, &render(&stream, name)) {
            crate::warn!("{}: {}", e, e.source);
        }
    }
    stream
}
