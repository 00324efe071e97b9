//! Syntax-level discovery of adapters and entity structs in parsed sources.

use codegen::attrs::EntityDecl;
use codegen::AdapterIndex;
use syn::{ImplItem, Item, ItemImpl, ItemStruct, Type};

const ADAPTER_TRAIT: &str = "TypeAdapter";
const ADAPTER_VALUE: &str = "Value";

/// Records `impl TypeAdapter for X { type Value = T; }` as `X -> T`, inline modules included.
pub fn collect_adapters(items: &[Item], index: &mut AdapterIndex) {
    for item in items {
        match item {
            Item::Impl(imp) => {
                if let Some((name, value_type)) = adapter_impl(imp) {
                    index.insert(name, value_type);
                }
            }
            Item::Mod(module) => {
                if let Some((_, nested)) = &module.content {
                    collect_adapters(nested, index);
                }
            }
            _ => {}
        }
    }
}

fn adapter_impl(imp: &ItemImpl) -> Option<(String, Type)> {
    let (_, trait_path, _) = imp.trait_.as_ref()?;
    if trait_path.segments.last()?.ident != ADAPTER_TRAIT {
        return None;
    }
    let Type::Path(self_ty) = imp.self_ty.as_ref() else {
        return None;
    };
    let name = self_ty.path.segments.last()?.ident.to_string();
    imp.items.iter().find_map(|item| match item {
        ImplItem::Type(assoc) if assoc.ident == ADAPTER_VALUE => Some((name.clone(), assoc.ty.clone())),
        _ => None,
    })
}

pub fn collect_entities<'a>(items: &'a [Item], out: &mut Vec<&'a ItemStruct>) {
    for item in items {
        match item {
            Item::Struct(item) if EntityDecl::is_entity(item) => out.push(item),
            Item::Mod(module) => {
                if let Some((_, nested)) = &module.content {
                    collect_entities(nested, out);
                }
            }
            _ => {}
        }
    }
}
