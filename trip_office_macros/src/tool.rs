use proc_macro2::TokenStream;
use quote::{format_ident, quote};
use syn::{
    parse::{Parse, ParseStream},
    ExprClosure, Ident, LitStr, Token, Type,
};

/// `name = "...", description = "...", params = Type, |params| async move { ... }`
pub struct ToolDefinition {
    name: LitStr,
    description: LitStr,
    params: Type,
    handler: ExprClosure,
}

fn keyed<T: Parse>(input: ParseStream, key: &str) -> syn::Result<T> {
    let ident: Ident = input.parse()?;
    if ident != key {
        return Err(syn::Error::new_spanned(
            ident,
            format!("expected `{key} = ...`; tool! takes name, description, params, then a closure"),
        ));
    }
    input.parse::<Token![=]>()?;
    let value = input.parse()?;
    input.parse::<Token![,]>()?;
    Ok(value)
}

impl Parse for ToolDefinition {
    fn parse(input: ParseStream) -> syn::Result<Self> {
        let name: LitStr = keyed(input, "name")?;
        let tool_name = name.value();
        if tool_name.is_empty()
            || !tool_name
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_')
        {
            return Err(syn::Error::new(
                name.span(),
                "tool names are snake_case, e.g. \"normalize_flight\"",
            ));
        }

        Ok(ToolDefinition {
            name,
            description: keyed(input, "description")?,
            params: keyed(input, "params")?,
            handler: input.parse()?,
        })
    }
}

/// `normalize_hotel_search` -> `NormalizeHotelSearchTool`
fn tool_struct_ident(name: &LitStr) -> Ident {
    let pascal: String = name
        .value()
        .split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let (head, tail) = word.split_at(1);
            head.to_ascii_uppercase() + tail
        })
        .collect();
    format_ident!("{}Tool", pascal, span = name.span())
}

pub fn expand(definition: ToolDefinition) -> TokenStream {
    let ToolDefinition {
        name,
        description,
        params,
        handler,
    } = definition;
    let tool_struct = tool_struct_ident(&name);

    quote! {
        #[derive(Debug, Default, Clone, Copy)]
        pub struct #tool_struct;

        impl trip_office::tools::Tool for #tool_struct {
            fn name(&self) -> &'static str {
                #name
            }

            fn description(&self) -> &'static str {
                #description
            }

            fn parameters_schema(&self) -> serde_json::Value {
                static SCHEMA: std::sync::OnceLock<serde_json::Value> = std::sync::OnceLock::new();
                SCHEMA
                    .get_or_init(|| {
                        serde_json::to_value(schemars::schema_for!(#params)).unwrap_or_else(|err| {
                            panic!("failed to serialize parameters schema for {}: {}", #name, err)
                        })
                    })
                    .clone()
            }

            fn execute(
                &self,
                parameters: serde_json::Value,
            ) -> std::pin::Pin<
                Box<
                    dyn std::future::Future<Output = trip_office::Result<serde_json::Value>>
                        + Send
                        + '_,
                >,
            > {
                Box::pin(async move {
                    let params: #params =
                        trip_office::schemas::validator::deserialize_params(#name, parameters)?;
                    let handler = #handler;
                    handler(params).await
                })
            }
        }
    }
}
