//! Proc macros for handlekit: `attributes!` handler tables checked at compile time.
//!
//! This crate is not meant to be used directly; enable the `macros` feature on `handlekit`.

use proc_macro::TokenStream;

mod attributes_macro;

/// Compile-time attribute table macro.
///
/// Expands to a `Vec<(&'static str, handlekit::class::AttrHandler)>`, ready
/// for [`Class::with_attributes`](../handlekit/class/struct.Class.html).
///
/// # Syntax
///
/// ```ignore
/// let handlers = attributes! {
///     COLOR: default = "BLACK", get = color_get, set = color_set, flags = [NOT_MAPPED];
///     FONT: global = "DEFAULTFONT";
///     TITLE;
/// };
/// ```
///
/// Options are `default` (literal default), `global` (default read from a
/// global attribute), `get`, `set` (handler function paths) and `flags`
/// (`AttrFlags` constant names). Unknown options, unknown flags, duplicate
/// attributes and `default` together with `global` are compile errors.
#[proc_macro]
pub fn attributes(input: TokenStream) -> TokenStream {
    attributes_macro::attributes_impl(input.into())
        .unwrap_or_else(|err| err.to_compile_error())
        .into()
}
