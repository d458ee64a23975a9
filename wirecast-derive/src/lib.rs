//! # wirecast Derive
//!
//! Procedural macro generating nil-safe accessors.
//!
//! The expansion is the same impl block the build-time generator writes,
//! produced by the same loader and synthesizer.
//!
//! Types whose accessors are written by a build script instead derive
//! [`AccessorFields`](macro@AccessorFields), which only registers the
//! `#[accessor]` attribute so the annotated source still compiles.

use proc_macro::TokenStream;
use quote::quote;
use syn::{DeriveInput, parse_macro_input};
use wirecast_codegen::{CodegenError, Generator};
use wirecast_schema::TypeLoader;

/// Derives getters and setters for fields marked `#[accessor]`.
///
/// Getters take `Option<&Self>` and return the field's zero value when the
/// owner is absent; setters take `Option<&mut Self>` and do nothing when it
/// is absent. A lock field named at type or field level is locked around
/// every access.
///
/// # Example
/// ```ignore
/// #[derive(Default, Accessors)]
/// #[accessor(lock = "mu")]
/// struct DeliveryTiming {
///     mu: parking_lot::Mutex<()>,
///     #[accessor]
///     time_transition: i32,
///     #[accessor(getter = "number_of_days", setter)]
///     number: Option<i64>,
/// }
///
/// assert_eq!(DeliveryTiming::get_time_transition(None), 0);
/// ```
#[proc_macro_derive(Accessors, attributes(accessor))]
pub fn derive_accessors(input: TokenStream) -> TokenStream {
    let input = parse_macro_input!(input as DeriveInput);

    match expand(&input) {
        Ok(tokens) => TokenStream::from(tokens),
        Err(err) => TokenStream::from(err.to_compile_error()),
    }
}

/// Registers the `#[accessor]` attribute without generating any code.
///
/// Use this on types listed in a build script's accessor inputs; the build
/// script reads the annotations and writes the accessors into `OUT_DIR`.
///
/// # Example
/// ```ignore
/// #[derive(Default, AccessorFields)]
/// pub struct Order {
///     #[accessor]
///     quantity: u64,
/// }
///
/// include!(concat!(env!("OUT_DIR"), "/order_accessor.rs"));
/// ```
#[proc_macro_derive(AccessorFields, attributes(accessor))]
pub fn derive_accessor_fields(_input: TokenStream) -> TokenStream {
    TokenStream::new()
}

fn expand(input: &DeriveInput) -> syn::Result<proc_macro2::TokenStream> {
    let span = input.ident.span();

    let desc = TypeLoader::new()
        .load_derive(input)
        .map_err(|e| e.to_syn_error(span))?;
    if desc.fields.is_empty() {
        return Ok(quote! {});
    }

    let source = Generator::default()
        .accessor_impl(&desc)
        .map_err(|e| match e {
            CodegenError::Load(load) => load.to_syn_error(span),
            other => syn::Error::new(span, other.to_string()),
        })?;
    let accessors: proc_macro2::TokenStream = syn::parse_str(&source)?;

    Ok(quote! {
        #accessors
    })
}
