use std::collections::HashSet;

use proc_macro2::TokenStream;
use quote::quote;
use syn::ext::IdentExt;
use syn::spanned::Spanned;
use syn::{
    Attribute, Data, DeriveInput, Fields, GenericParam, Generics, Index, LitStr, Member, Result,
    parse_quote,
};

/// Attributes accepted on the deriving type.
#[derive(Default)]
struct ContainerAttrs {
    stream: bool,
}

impl ContainerAttrs {
    fn parse(attrs: &[Attribute]) -> Result<Self> {
        let mut parsed = Self::default();
        for attr in attrs.iter().filter(|attr| attr.path().is_ident("replica")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("stream") {
                    parsed.stream = true;
                    Ok(())
                } else {
                    Err(meta.error("unknown replica attribute, expected `stream`"))
                }
            })?;
        }
        Ok(parsed)
    }
}

/// Attributes accepted on fields.
#[derive(Default)]
struct FieldAttrs {
    skip: bool,
    rename: Option<LitStr>,
}

impl FieldAttrs {
    fn parse(attrs: &[Attribute]) -> Result<Self> {
        let mut parsed = Self::default();
        for attr in attrs.iter().filter(|attr| attr.path().is_ident("replica")) {
            attr.parse_nested_meta(|meta| {
                if meta.path.is_ident("skip") {
                    parsed.skip = true;
                    Ok(())
                } else if meta.path.is_ident("rename") {
                    parsed.rename = Some(meta.value()?.parse()?);
                    Ok(())
                } else {
                    Err(meta.error("unknown replica field attribute, expected `skip` or `rename`"))
                }
            })?;
        }
        Ok(parsed)
    }
}

/// A field that takes part in reflection.
struct ReflectedField {
    /// name the field is matched under
    name: String,
    member: Member,
    ty: syn::Type,
}

fn reflected_fields(fields: &Fields) -> Result<Vec<ReflectedField>> {
    let mut reflected = Vec::new();
    let mut seen = HashSet::new();

    for (index, field) in fields.iter().enumerate() {
        let attrs = FieldAttrs::parse(&field.attrs)?;
        if attrs.skip {
            continue;
        }

        let name = match (&attrs.rename, &field.ident) {
            (Some(rename), _) => rename.value(),
            (None, Some(ident)) => ident.unraw().to_string(),
            (None, None) => index.to_string(),
        };
        if !seen.insert(name.clone()) {
            let span = attrs
                .rename
                .as_ref()
                .map_or_else(|| field.span(), LitStr::span);
            return Err(syn::Error::new(
                span,
                format!("two fields are reflected under the name `{name}`"),
            ));
        }

        let member = match &field.ident {
            Some(ident) => Member::Named(ident.clone()),
            None => Member::Unnamed(Index::from(index)),
        };
        reflected.push(ReflectedField {
            name,
            member,
            ty: field.ty.clone(),
        });
    }

    Ok(reflected)
}

/// Every type parameter must itself be reflected.
fn add_bounds(mut generics: Generics) -> Generics {
    for param in &mut generics.params {
        if let GenericParam::Type(param) = param {
            param.bounds.push(parse_quote!(::replica::Typed));
        }
    }
    generics
}

pub(crate) fn expand(input: DeriveInput) -> Result<TokenStream> {
    if let Some(lifetime) = input.generics.lifetimes().next() {
        return Err(syn::Error::new(
            lifetime.span(),
            "`Reflect` cannot be derived for types with lifetime parameters, reflected values are 'static",
        ));
    }

    let container = ContainerAttrs::parse(&input.attrs)?;
    let name = &input.ident;
    let type_identifier = name.unraw().to_string();
    let generics = add_bounds(input.generics.clone());
    let (impl_generics, ty_generics, where_clause) = generics.split_for_impl();

    let flags = if container.stream {
        quote! { ::replica::ShapeFlags::STREAM }
    } else {
        quote! { ::replica::ShapeFlags::empty() }
    };

    let (view, def, view_impl) = match &input.data {
        Data::Struct(data) => {
            let fields = reflected_fields(&data.fields)?;
            let names: Vec<_> = fields.iter().map(|field| &field.name).collect();
            let members: Vec<_> = fields.iter().map(|field| &field.member).collect();
            let tys = fields.iter().map(|field| &field.ty);
            let count = fields.len();

            let def = quote! {
                ::replica::Def::Struct(::replica::StructDef::new(&const {
                    let fields: [::replica::Field; #count] = [
                        #(::replica::Field {
                            name: #names,
                            shape: ::replica::shape_of::<#tys>,
                        },)*
                    ];
                    fields
                }))
            };

            let view_impl = quote! {
                #[automatically_derived]
                impl #impl_generics ::replica::ReflectStruct for #name #ty_generics #where_clause {
                    fn field(&self, name: &str) -> ::core::option::Option<&dyn ::replica::Reflect> {
                        match name {
                            #(#names => ::core::option::Option::Some(&self.#members as &dyn ::replica::Reflect),)*
                            _ => ::core::option::Option::None,
                        }
                    }

                    fn field_mut(&mut self, name: &str) -> ::core::option::Option<&mut dyn ::replica::Reflect> {
                        match name {
                            #(#names => ::core::option::Option::Some(&mut self.#members as &mut dyn ::replica::Reflect),)*
                            _ => ::core::option::Option::None,
                        }
                    }
                }
            };

            (quote! { Struct }, def, view_impl)
        }
        Data::Enum(_) => {
            let view_impl = quote! {
                #[automatically_derived]
                impl #impl_generics ::replica::ReflectScalar for #name #ty_generics #where_clause {
                    fn assign_from(&mut self, src: &dyn ::replica::Reflect) -> bool {
                        let src: &dyn ::core::any::Any = src;
                        match src.downcast_ref::<Self>() {
                            ::core::option::Option::Some(value) => {
                                ::core::clone::Clone::clone_from(self, value);
                                true
                            }
                            ::core::option::Option::None => false,
                        }
                    }
                }
            };

            (quote! { Scalar }, quote! { ::replica::Def::Scalar }, view_impl)
        }
        Data::Union(data) => {
            return Err(syn::Error::new(
                data.union_token.span(),
                "`Reflect` cannot be derived for unions",
            ));
        }
    };

    Ok(quote! {
        #[automatically_derived]
        impl #impl_generics ::replica::Typed for #name #ty_generics #where_clause {
            const SHAPE: &'static ::replica::Shape = &const {
                ::replica::Shape::new(#type_identifier, #def).with_flags(#flags)
            };
        }

        #[automatically_derived]
        impl #impl_generics ::replica::Reflect for #name #ty_generics #where_clause {
            fn shape(&self) -> &'static ::replica::Shape {
                <Self as ::replica::Typed>::SHAPE
            }

            fn peek(&self) -> ::replica::Peek<'_> {
                ::replica::Peek::#view(self)
            }

            fn poke(&mut self) -> ::replica::Poke<'_> {
                ::replica::Poke::#view(self)
            }

            fn reset(&mut self) {
                *self = <Self as ::core::default::Default>::default();
            }

            fn zeroed(&self) -> ::std::boxed::Box<dyn ::replica::Reflect> {
                ::std::boxed::Box::new(<Self as ::core::default::Default>::default())
            }
        }

        #view_impl
    })
}
