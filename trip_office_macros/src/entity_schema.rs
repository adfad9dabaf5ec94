use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::{spanned::Spanned, ItemStruct, LitStr};

use crate::schema_extraction::{
    collect_doc_comments, collect_field_docs, ensure_named_struct, infer_description,
    infer_schema_name, kind_variant, parse_entity_schema_args,
};

pub fn expand(
    attr: proc_macro::TokenStream,
    item: proc_macro::TokenStream,
) -> syn::Result<TokenStream> {
    let args = parse_entity_schema_args(attr)?;
    let entity: ItemStruct = syn::parse(item)?;

    ensure_named_struct(&entity)?;
    if !entity.generics.params.is_empty() {
        return Err(syn::Error::new(
            entity.generics.span(),
            "entities are concrete wire shapes; `#[entity_schema]` takes no generics",
        ));
    }

    let schema_name = infer_schema_name(&entity, args.name.as_ref());
    let docs = collect_doc_comments(&entity.attrs);
    let description = match infer_description(args.description.as_ref(), docs) {
        Some(lit) => quote! { Some(#lit) },
        None => quote! { None },
    };
    let kind = kind_variant(args.kind.as_ref());

    let field_docs = collect_field_docs(&entity).into_iter().map(|(field, doc)| {
        let field = LitStr::new(&field, Span::call_site());
        let doc = LitStr::new(&doc, Span::call_site());
        quote! { (#field, #doc) }
    });

    let ident = &entity.ident;
    let type_name = LitStr::new(&ident.to_string(), ident.span());

    Ok(quote! {
        #entity

        impl trip_office::schema::EntitySchema for #ident {
            fn schema() -> &'static trip_office::schema::SchemaHandle {
                static HANDLE: std::sync::OnceLock<trip_office::schema::SchemaHandle> =
                    std::sync::OnceLock::new();
                HANDLE.get_or_init(|| {
                    let mut root = schemars::schema_for!(Self);
                    trip_office::schema::apply_doc_comments(
                        &mut root,
                        #schema_name,
                        #description,
                        &[#(#field_docs),*],
                    );
                    trip_office::schema::SchemaHandle::from_root_schema::<Self>(
                        #schema_name,
                        #type_name,
                        trip_office::schema::EntityKind::#kind,
                        root,
                    )
                })
            }
        }
    })
}
