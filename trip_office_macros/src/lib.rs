//! Derive-style helpers for trip-office: schema-carrying entities and
//! normalizer tools.

mod entity_schema;
mod schema_extraction;
mod tool;

use proc_macro::TokenStream;
use syn::parse_macro_input;

/// Declare a normalizer tool.
///
/// ```ignore
/// tool!(
///     name = "normalize_flight",
///     description = "Normalize one raw flight option",
///     params = NormalizeFlightParams,
///     |params: NormalizeFlightParams| async move { run_flight(params) }
/// );
/// ```
///
/// Expands to a `NormalizeFlightTool` unit struct implementing
/// `trip_office::tools::Tool`. Parameters are checked against the schema of
/// `params` before the closure runs.
#[proc_macro]
pub fn tool(input: TokenStream) -> TokenStream {
    tool::expand(parse_macro_input!(input as tool::ToolDefinition)).into()
}

/// Attach a cached JSON schema to an entity struct.
///
/// Accepts `kind = "raw" | "normalized" | "envelope"`, `name` and
/// `description`; doc comments fill in descriptions that are not given.
#[proc_macro_attribute]
pub fn entity_schema(attr: TokenStream, item: TokenStream) -> TokenStream {
    entity_schema::expand(attr, item)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
