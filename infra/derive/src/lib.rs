#![allow(unreachable_pub)]

//! # Macros
//!
//! Procedural macros shared by the planner crates.
//!
//! ## Usage
//! ```toml
//! [dependencies]
//! mplan-derive.workspace = true
//! thiserror.workspace = true
//! ```

mod error;

use proc_macro::TokenStream;
use syn::{DeriveInput, parse_macro_input};

/// Turns an enum into a crate error type with context support.
///
/// # Injected Behaviors
///
/// * **Derives**: `Debug` and `thiserror::Error` unless already derived.
/// * **Context**: a companion `<Name>Ext` trait adding `.context(..)` to
///   `Result<T, Name>` and to `Result<T, Source>` for every variant wrapping an
///   upstream error.
/// * **Conversions**: `From<Source>` for variants made of exactly a `source` and a
///   `context` field, so `?` works on upstream errors.
/// * **Internal fallback**: `From<&'static str>` and `From<String>` when an
///   `Internal { message, context }` variant exists.
/// * **Formatting**: a module-level `format_context` helper for `#[error(..)]` strings.
///
/// # Requirements
///
/// Every variant uses named fields. A variant with a `source` field (or a field
/// marked `#[source]`/`#[from]`) must also carry `context: Option<Cow<'static, str>>`.
///
/// # Example
///
/// ```rust,ignore
/// use std::borrow::Cow;
///
/// #[mplan_derive::planner_error]
/// pub enum CatalogError {
///     #[error("Bundle parse error{}: {source}", format_context(.context))]
///     Parse { source: serde_json::Error, context: Option<Cow<'static, str>> },
///
///     #[error("Internal catalog error{}: {message}", format_context(.context))]
///     Internal { message: Cow<'static, str>, context: Option<Cow<'static, str>> },
/// }
///
/// fn parse(raw: &str) -> Result<TenantPlugin, CatalogError> {
///     serde_json::from_str(raw).context("Parsing bundled tenant")
/// }
/// ```
#[proc_macro_attribute]
pub fn planner_error(_args: TokenStream, item: TokenStream) -> TokenStream {
    let input = parse_macro_input!(item as DeriveInput);
    error::expand(&input).unwrap_or_else(syn::Error::into_compile_error).into()
}
