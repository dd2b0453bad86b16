#![warn(missing_docs)]
#![forbid(unsafe_code)]
//! Derive macro for `replica`'s `Reflect` trait. Use it through the `replica`
//! crate, which re-exports it.

mod derive;

/// Derive `Reflect` and `Typed` for a struct or an enum.
///
/// Structs (named, tuple or unit) are reflected field by field. Enums are
/// reflected as leaves that can only be assigned from their own type, and
/// must implement `Clone`. Both must implement `Default`, which is their zero
/// value.
///
/// # Attributes
///
/// - `#[replica(stream)]` on the type: values are stream handles, shared
///   rather than duplicated when reached through `Rc`/`Arc`.
/// - `#[replica(skip)]` on a field: the field is invisible to reflection.
/// - `#[replica(rename = "name")]` on a field: the field is matched under
///   `name` instead of its Rust name.
///
/// ```ignore
/// #[derive(Default, Reflect)]
/// struct Request {
///     id: u64,
///     #[replica(rename = "labels")]
///     tags: Vec<String>,
///     #[replica(skip)]
///     cache: Option<Box<Vec<u8>>>,
/// }
/// ```
#[proc_macro_derive(Reflect, attributes(replica))]
pub fn derive_reflect(input: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let input = syn::parse_macro_input!(input as syn::DeriveInput);
    derive::expand(input)
        .unwrap_or_else(syn::Error::into_compile_error)
        .into()
}
