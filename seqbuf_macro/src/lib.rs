//! Macro `#[derive(Zeroable)]` for element types of `seqbuf` buffers.
//!
//! See [`seqbuf` crate](https://docs.rs/seqbuf).

use proc_macro2::TokenStream;
use quote::{quote, quote_spanned};
use syn::spanned::Spanned;
use syn::{parse_quote, Data, DeriveInput};

/// Derives `seqbuf::Zeroable` for a struct whose fields are all `Zeroable`.
///
/// The struct must also be `Copy`. Named, tuple and unit structs are supported.
///
/// # Examples
///
/// ```
/// use seqbuf::{SeqBuf, Zeroable};
///
/// #[derive(Clone, Copy, Debug, PartialEq, Zeroable)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// let mut s: SeqBuf<Point> = SeqBuf::new();
/// s.push(Point { x: 1, y: 2 });
/// s.resize_zeroed(2);
/// assert_eq!(s[1], Point { x: 0, y: 0 });
/// ```
///
/// Generic structs get one bound per field type:
///
/// ```
/// use seqbuf::Zeroable;
///
/// #[derive(Clone, Copy, Zeroable)]
/// struct Pair<T: Copy>(T, T);
///
/// fn zeroable<T: Zeroable>() {}
/// zeroable::<Pair<u8>>();
/// ```
///
/// A field with no valid all-zero value is rejected:
///
/// ```compile_fail
/// use seqbuf::Zeroable;
///
/// #[derive(Clone, Copy, Zeroable)]
/// struct Named {
///     name: &'static str,
/// }
/// ```
///
/// So are enums:
///
/// ```compile_fail
/// use seqbuf::Zeroable;
///
/// #[derive(Clone, Copy, Zeroable)]
/// enum Direction {
///     Up,
///     Down,
/// }
/// ```
#[proc_macro_derive(Zeroable)]
pub fn derive_zeroable(item: proc_macro::TokenStream) -> proc_macro::TokenStream {
    let item: TokenStream = item.into();
    match derive_zeroable_impl(item) {
        Ok(x) => x,
        Err(Error(msg, span)) => quote_spanned!(span =>
            ::core::compile_error!(#msg);
        ),
    }
    .into()
}

struct Error(&'static str, proc_macro2::Span);

fn derive_zeroable_impl(item: TokenStream) -> Result<TokenStream, Error> {
    let d: DeriveInput = syn::parse2(item)
        .map_err(|e| Error("derive(Zeroable) could not parse its input", e.span()))?;
    let fields = match &d.data {
        Data::Struct(s) => &s.fields,
        Data::Enum(e) => {
            return Err(Error(
                "derive(Zeroable) requires a struct",
                e.enum_token.span(),
            ))
        }
        Data::Union(u) => {
            return Err(Error(
                "derive(Zeroable) requires a struct",
                u.union_token.span(),
            ))
        }
    };

    let mut generics = d.generics.clone();
    let where_clause = generics.make_where_clause();
    for field in fields.iter() {
        let ty = &field.ty;
        where_clause
            .predicates
            .push(parse_quote!(#ty: ::seqbuf::Zeroable));
    }

    let name = &d.ident;
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();
    Ok(quote! {
        unsafe impl #impl_generics ::seqbuf::Zeroable for #name #ty_generics #where_clause {}
    })
}
