//! attributes! macro: parse an attribute handler table at compile time and
//! generate `(name, AttrHandler)` pairs.

use std::collections::HashSet;

use proc_macro2::{Span, TokenStream};
use quote::quote;
use syn::parse::{Parse, ParseStream};
use syn::punctuated::Punctuated;
use syn::{bracketed, Error, Ident, LitStr, Path, Result, Token};

// ---------------------------------------------------------------------------
// AST types
// ---------------------------------------------------------------------------

/// One `key = value` option of an attribute entry.
#[derive(Debug, Clone)]
pub(crate) enum AttrOption {
    /// `default = "BLACK"`
    Default(LitStr),
    /// `global = "DEFAULTFONT"`
    Global(LitStr),
    /// `get = path::to::getter`
    Get(Path),
    /// `set = path::to::setter`
    Set(Path),
    /// `flags = [NOT_MAPPED, NO_INHERIT]`
    Flags(Vec<Ident>),
}

impl AttrOption {
    fn key(&self) -> &'static str {
        match self {
            AttrOption::Default(_) => "default",
            AttrOption::Global(_) => "global",
            AttrOption::Get(_) => "get",
            AttrOption::Set(_) => "set",
            AttrOption::Flags(_) => "flags",
        }
    }
}

/// A single entry: `NAME: option, option;` or just `NAME;`
#[derive(Debug, Clone)]
pub(crate) struct AttrEntry {
    pub name: String,
    pub name_span: Span,
    pub options: Vec<(AttrOption, Span)>,
}

#[derive(Debug)]
struct AttributesInput {
    entries: Vec<AttrEntry>,
}

// ---------------------------------------------------------------------------
// Parsing
// ---------------------------------------------------------------------------

impl Parse for AttributesInput {
    fn parse(input: ParseStream) -> Result<Self> {
        let mut entries = Vec::new();
        while !input.is_empty() {
            entries.push(parse_entry(input)?);
        }
        Ok(AttributesInput { entries })
    }
}

/// Parse `NAME: key = value, ...;`
pub(crate) fn parse_entry(input: ParseStream) -> Result<AttrEntry> {
    let name: Ident = input.parse()?;
    let mut options = Vec::new();

    if input.peek(Token![:]) {
        input.parse::<Token![:]>()?;
        loop {
            options.push(parse_option(input)?);
            if input.peek(Token![,]) {
                input.parse::<Token![,]>()?;
                // Trailing comma before `;`.
                if input.peek(Token![;]) {
                    break;
                }
            } else {
                break;
            }
        }
    }
    input.parse::<Token![;]>()?;

    Ok(AttrEntry {
        name: name.to_string(),
        name_span: name.span(),
        options,
    })
}

fn parse_option(input: ParseStream) -> Result<(AttrOption, Span)> {
    // `default` is a reserved word, so keys are parsed with `parse_any`.
    let key: Ident = syn::ext::IdentExt::parse_any(input)?;
    let span = key.span();
    input.parse::<Token![=]>()?;

    let option = match key.to_string().as_str() {
        "default" => AttrOption::Default(input.parse()?),
        "global" => AttrOption::Global(input.parse()?),
        "get" => AttrOption::Get(input.parse()?),
        "set" => AttrOption::Set(input.parse()?),
        "flags" => {
            let content;
            bracketed!(content in input);
            let flags: Punctuated<Ident, Token![,]> =
                content.parse_terminated(Ident::parse, Token![,])?;
            AttrOption::Flags(flags.into_iter().collect())
        }
        other => {
            return Err(Error::new(
                span,
                format!(
                    "unknown option `{other}`; expected `default`, `global`, `get`, `set` or `flags`"
                ),
            ))
        }
    };
    Ok((option, span))
}

// ---------------------------------------------------------------------------
// Code generation
// ---------------------------------------------------------------------------

/// Flag names accepted inside `flags = [...]`.
const KNOWN_FLAGS: &[&str] = &[
    "NOT_MAPPED",
    "NO_INHERIT",
    "READONLY",
    "WRITEONLY",
    "NO_DEFAULT_VALUE",
    "HANDLE_NAME",
    "NO_STRING",
    "NO_SAVE",
    "NOT_SUPPORTED",
];

/// Generate the handler expression for one entry.
fn generate_entry(entry: &AttrEntry) -> Result<TokenStream> {
    let mut seen = HashSet::new();
    let mut calls = Vec::new();
    let mut has_default = false;

    for (option, span) in &entry.options {
        if !seen.insert(option.key()) {
            return Err(Error::new(
                *span,
                format!("option `{}` given twice for `{}`", option.key(), entry.name),
            ));
        }
        match option {
            AttrOption::Default(lit) | AttrOption::Global(lit) => {
                if has_default {
                    return Err(Error::new(
                        *span,
                        format!("`{}` cannot have both `default` and `global`", entry.name),
                    ));
                }
                has_default = true;
                calls.push(match option {
                    AttrOption::Default(_) => quote! { .default_value(#lit) },
                    _ => quote! { .default_global(#lit) },
                });
            }
            AttrOption::Get(path) => calls.push(quote! { .getter(#path) }),
            AttrOption::Set(path) => calls.push(quote! { .setter(#path) }),
            AttrOption::Flags(flags) => {
                if flags.is_empty() {
                    continue;
                }
                let mut terms = Vec::new();
                for flag in flags {
                    let flag_name = flag.to_string();
                    if !KNOWN_FLAGS.contains(&flag_name.as_str()) {
                        return Err(Error::new(
                            flag.span(),
                            format!("unknown attribute flag `{flag_name}`"),
                        ));
                    }
                    terms.push(quote! { ::handlekit::attr::AttrFlags::#flag });
                }
                calls.push(quote! { .flags(#(#terms)|*) });
            }
        }
    }

    let name = LitStr::new(&entry.name, entry.name_span);
    Ok(quote! {
        (#name, ::handlekit::class::AttrHandler::new() #(#calls)*)
    })
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Entry point: generate code for the entire attributes! macro.
pub(crate) fn attributes_impl(input: TokenStream) -> Result<TokenStream> {
    let parsed: AttributesInput = syn::parse2(input)?;

    if parsed.entries.is_empty() {
        return Err(Error::new(
            Span::call_site(),
            "attributes! macro requires at least one attribute",
        ));
    }

    let mut names = HashSet::new();
    let mut pairs = Vec::new();
    for entry in &parsed.entries {
        if !names.insert(entry.name.as_str()) {
            return Err(Error::new(
                entry.name_span,
                format!("attribute `{}` declared twice", entry.name),
            ));
        }
        pairs.push(generate_entry(entry)?);
    }

    Ok(quote! {
        ::std::vec![#(#pairs),*]
    })
}

// ===========================================================================
// Tests
// ===========================================================================
