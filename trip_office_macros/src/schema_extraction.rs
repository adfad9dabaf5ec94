use proc_macro2::Span;
use syn::{
    parse::Parser, punctuated::Punctuated, spanned::Spanned, Attribute, Expr, ExprLit, Fields,
    Ident, ItemStruct, Lit, LitStr, MetaNameValue, Token,
};

/// Arguments accepted by `#[entity_schema(...)]`.
#[derive(Default)]
pub struct EntitySchemaArgs {
    pub name: Option<LitStr>,
    pub description: Option<LitStr>,
    pub kind: Option<LitStr>,
}

const KNOWN_KINDS: &[&str] = &["raw", "normalized", "envelope"];

pub fn parse_entity_schema_args(attr: proc_macro::TokenStream) -> syn::Result<EntitySchemaArgs> {
    let mut result = EntitySchemaArgs::default();
    if attr.is_empty() {
        return Ok(result);
    }

    let parser = Punctuated::<MetaNameValue, Token![,]>::parse_terminated;

    for nested in parser.parse(attr)? {
        let ident = nested
            .path
            .get_ident()
            .ok_or_else(|| syn::Error::new_spanned(&nested.path, "expected identifier"))?;

        let Expr::Lit(ExprLit {
            lit: Lit::Str(lit_str),
            ..
        }) = &nested.value
        else {
            return Err(syn::Error::new_spanned(
                &nested.value,
                "expected string literal value",
            ));
        };

        let slot = match ident.to_string().as_str() {
            "name" => &mut result.name,
            "description" => &mut result.description,
            "kind" => {
                if !KNOWN_KINDS.contains(&lit_str.value().as_str()) {
                    return Err(syn::Error::new(
                        lit_str.span(),
                        format!("`kind` must be one of {}", KNOWN_KINDS.join(", ")),
                    ));
                }
                &mut result.kind
            }
            other => {
                return Err(syn::Error::new(
                    ident.span(),
                    format!("unsupported argument `{other}`"),
                ));
            }
        };

        if slot.is_some() {
            return Err(syn::Error::new(
                ident.span(),
                format!("duplicate `{ident}` argument"),
            ));
        }
        *slot = Some(lit_str.clone());
    }

    Ok(result)
}

pub fn ensure_named_struct(item: &ItemStruct) -> syn::Result<()> {
    match &item.fields {
        Fields::Named(_) => Ok(()),
        _ => Err(syn::Error::new(
            item.struct_token.span(),
            "`#[entity_schema]` only supports structs with named fields",
        )),
    }
}

/// Doc lines are joined into a single paragraph.
pub fn collect_doc_comments(attrs: &[Attribute]) -> Option<String> {
    let lines: Vec<String> = attrs
        .iter()
        .filter(|attr| attr.path().is_ident("doc"))
        .filter_map(|attr| match &attr.meta {
            syn::Meta::NameValue(MetaNameValue {
                value:
                    Expr::Lit(ExprLit {
                        lit: Lit::Str(lit), ..
                    }),
                ..
            }) => Some(lit.value().trim().to_string()),
            _ => None,
        })
        .filter(|line| !line.is_empty())
        .collect();

    if lines.is_empty() {
        None
    } else {
        Some(lines.join(" "))
    }
}

pub fn collect_field_docs(item: &ItemStruct) -> Vec<(String, String)> {
    let Fields::Named(fields) = &item.fields else {
        return Vec::new();
    };

    fields
        .named
        .iter()
        .filter_map(|field| {
            let ident = field.ident.as_ref()?;
            let doc = collect_doc_comments(&field.attrs)?;
            Some((ident.to_string(), doc))
        })
        .collect()
}

pub fn infer_schema_name(item: &ItemStruct, explicit: Option<&LitStr>) -> LitStr {
    explicit
        .cloned()
        .unwrap_or_else(|| LitStr::new(&item.ident.to_string(), Span::call_site()))
}

pub fn infer_description(explicit: Option<&LitStr>, doc: Option<String>) -> Option<LitStr> {
    explicit
        .cloned()
        .or_else(|| doc.map(|text| LitStr::new(&text, Span::call_site())))
}

/// Variant of `EntityKind` for a validated `kind = "..."` tag; untagged
/// entities are normalized shapes.
pub fn kind_variant(explicit: Option<&LitStr>) -> Ident {
    let variant = match explicit.map(LitStr::value).as_deref() {
        Some("raw") => "Raw",
        Some("envelope") => "Envelope",
        _ => "Normalized",
    };
    Ident::new(variant, explicit.map_or_else(Span::call_site, LitStr::span))
}
