use quote::quote;
use syn::punctuated::Punctuated;
use syn::token::Comma;
use syn::{Attribute, ItemStruct, Path};

pub fn extract_derives(attr: &Attribute) -> syn::Result<Vec<Path>> {
    let mut derives = Vec::new();
    attr.parse_nested_meta(|meta| {
        derives.push(meta.path);
        Ok(())
    })?;
    Ok(derives)
}

/// Folds every `#[derive]` of the struct and `extra_derives` into one sorted, deduplicated attribute.
pub fn merge_struct_derives(input: &mut ItemStruct, extra_derives: Punctuated<Path, Comma>) -> syn::Result<()> {
    let mut derives_vec: Vec<Path> = extra_derives.into_iter().collect();
    let mut kept = Vec::with_capacity(input.attrs.len());
    for attr in input.attrs.drain(..) {
        if attr.path().is_ident("derive") {
            derives_vec.extend(extract_derives(&attr)?);
        } else {
            kept.push(attr);
        }
    }
    input.attrs = kept;

    derives_vec.sort_by_key(|path| derive_name(path));
    derives_vec.dedup_by(|a, b| derive_name(a) == derive_name(b));

    input.attrs.push(syn::parse_quote! {
        #[derive(#(#derives_vec),*)]
    });
    Ok(())
}

fn derive_name(path: &Path) -> String {
    path.segments.last().map(|seg| seg.ident.to_string()).unwrap_or_else(|| quote!(#path).to_string())
}
