//! Entity model, validation and code generation behind the `sqlbit` macros.
//!
//! The proc-macro crate only parses input and forwards here, so the lint binary and the
//! unit tests can run the exact same extraction and rule set.

pub mod logger;
pub mod artifact;
pub mod attrs;
pub mod diagnostics;
pub mod extract;
pub mod generate;
pub mod macro_utils;
pub mod mapping;
pub mod model;
pub mod rules;

pub use artifact::ArtifactError;
pub use diagnostics::{AbortError, CollectingSink, CompileErrorSink, Diagnostic, DiagnosticSink, Location, LogSink, Severity};
pub use generate::{DatabaseMacros, EntityMacros};
pub use model::{ColumnDescriptor, EntityDescriptor, FieldType, StorageType};
pub use rules::{AdapterIndex, Rule};

use proc_macro2::TokenStream;
use syn::ItemStruct;

/// Extracts and generates one entity. Returns `None` when the entity was aborted,
/// the reason having been reported to `sink`.
pub fn expand_entity(item: &ItemStruct, sink: &mut dyn DiagnosticSink) -> Option<TokenStream> {
    let generated = extract::extract(item, sink).and_then(|entity| EntityMacros::new(&entity));
    match generated {
        Ok(macros) => Some(macros.expand()),
        Err(e) => {
            e.into_diagnostic().report_to(sink);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use syn::parse_quote;

    #[test]
    fn aborted_entity_generates_nothing() {
        let item: ItemStruct = parse_quote! {
            #[table(name = "t")]
            struct Twice {
                #[column] #[primary_key] pub a: i64,
                #[column] #[primary_key] pub b: i64,
            }
        };
        let mut sink = CollectingSink::default();
        assert!(expand_entity(&item, &mut sink).is_none());
        let errors: Vec<&Diagnostic> = sink.errors().collect();
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].rule, Some(Rule::PrimaryKeyAlreadyDefined));
    }

    #[test]
    fn warnings_do_not_abort() {
        let item: ItemStruct = parse_quote! {
            #[table(name = "t")]
            struct Hidden {
                #[column] #[primary_key] pub id: i64,
                #[column] secret: String,
            }
        };
        let mut sink = CollectingSink::default();
        let expanded = expand_entity(&item, &mut sink).unwrap().to_string();
        assert!(!sink.has_errors());
        assert_eq!(sink.warnings().count(), 1);
        assert!(!expanded.contains("secret"));
    }

    #[test]
    fn compile_error_sink_renders_errors() {
        let item: ItemStruct = parse_quote! {
            #[table(name = "t")]
            struct Narrow { #[column] #[primary_key] pub id: u32 }
        };
        let mut sink = CompileErrorSink::default();
        assert!(expand_entity(&item, &mut sink).is_none());
        assert!(sink.has_errors());
        let rendered = sink.into_compile_errors().to_string();
        assert!(rendered.contains("compile_error"));
        assert!(rendered.contains("primary key `id` must be of type i64"));
    }
}
