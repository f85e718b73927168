//! Procedural macros for the osclient OpenSearch client.
//!
//! - `#[derive(Params)]` - Derive query parameter encoding for an options struct
//!
//! Use through the `osclient` crate, which re-exports the derive and the
//! traits it implements.

mod params_derive;

use proc_macro::TokenStream;

/// Derive the `ToParams` trait for a struct.
///
/// Each named field becomes one query parameter, encoded by type:
///
/// - `Option<T>` - emitted only when `Some`
/// - `Vec<T>` - emitted once, comma-joined, only when non-empty
/// - `String` - emitted only when non-empty
/// - `bool` - emitted as `true` only when set
/// - any other `ParamValue` type - always emitted
///
/// # Struct Attributes
///
/// - `#[params(format = "json")]` - Always emit a fixed `format` parameter
///
/// # Field Attributes
///
/// - `#[params(rename = "name")]` - Use a different parameter name
/// - `#[params(skip)]` - Never emit the field
///
/// # Example
///
/// ```ignore
/// use osclient::Params;
///
/// #[derive(Default, Params)]
/// #[params(format = "json")]
/// struct CatIndicesParams {
///     bytes: Option<ByteUnit>,
///     #[params(rename = "s")]
///     sort: Vec<String>,
///     pretty: bool,
/// }
/// ```
#[proc_macro_derive(Params, attributes(params))]
pub fn derive_params(input: TokenStream) -> TokenStream {
    params_derive::expand_params_derive(input.into())
        .unwrap_or_else(|e| e.to_compile_error())
        .into()
}
