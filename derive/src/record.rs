use proc_macro::TokenStream;
use quote::quote;
use syn::{
    Data, DeriveInput, Error, Field, Fields, Ident, LitInt, LitStr, Result, Token, Type,
    ext::IdentExt,
    parse::{Parse, ParseStream},
};

pub(crate) fn expand_record(input: &DeriveInput) -> Result<TokenStream> {
    let Data::Struct(data) = &input.data else {
        Err(Error::new_spanned(
            input,
            "`Record` may only be derived on structs.",
        ))?
    };

    let Fields::Named(fields) = &data.fields else {
        Err(Error::new_spanned(
            input,
            "`Record` may only be derived on structs with named fields.",
        ))?
    };

    if !input.generics.params.is_empty() {
        Err(Error::new_spanned(
            &input.generics,
            "`Record` may not be derived on generic structs.",
        ))?
    }

    let fields = fields
        .named
        .iter()
        .map(FieldMetadata::parse)
        .collect::<Result<Vec<_>>>()?;

    // Inert fields keep their place in the schema so indices line up.
    let definitions = fields.iter().map(|field| {
        let label = field.name.unraw().to_string();

        let Some(layout) = &field.layout else {
            return quote! { ::flatrec::FieldDef::inert(#label) };
        };

        let ty = &field.ty;
        let tag = &layout.tag;

        let shape = match layout.width {
            Some(width) => {
                let width = match width {
                    8 => quote! { ::flatrec::IntWidth::W8 },
                    16 => quote! { ::flatrec::IntWidth::W16 },
                    32 => quote! { ::flatrec::IntWidth::W32 },
                    _ => quote! { ::flatrec::IntWidth::W64 },
                };
                quote! { <#ty as ::flatrec::Decode>::shape().with_width(#width) }
            }
            None => quote! { <#ty as ::flatrec::Decode>::shape() },
        };

        quote! { ::flatrec::FieldDef::mapped(#label, #tag, #shape) }
    });

    let cases = fields
        .iter()
        .enumerate()
        .filter(|(_, field)| field.layout.is_some())
        .map(|(index, field)| {
            let name = &field.name;
            quote! {
                #index => ::flatrec::Decode::decode(&mut self.#name, r, layout, shape),
            }
        });

    let name = &input.ident;

    let expanded = quote! {
        impl ::flatrec::Record for #name {
            fn schema() -> &'static ::flatrec::Schema {
                static SCHEMA: ::std::sync::OnceLock<::flatrec::Schema> =
                    ::std::sync::OnceLock::new();

                SCHEMA.get_or_init(|| ::flatrec::Schema::new(::std::vec![#(#definitions),*]))
            }

            #[allow(unused_variables)]
            fn decode_field(
                &mut self,
                index: usize,
                r: &[u8],
                layout: &::flatrec::Layout,
                shape: &::flatrec::Shape,
            ) -> ::core::result::Result<(), ::flatrec::Error> {
                match index {
                    #(#cases)*
                    _ => ::core::result::Result::Err(::flatrec::Error::NotAReference { index }),
                }
            }
        }

        impl ::flatrec::Decode for #name {
            fn shape() -> ::flatrec::Shape {
                ::flatrec::Shape::Record(<Self as ::flatrec::Record>::schema)
            }

            fn decode(
                &mut self,
                r: &[u8],
                _: &::flatrec::Layout,
                _: &::flatrec::Shape,
            ) -> ::core::result::Result<(), ::flatrec::Error> {
                ::flatrec::decode(r, self, 0, 0)
            }
        }
    };

    Ok(expanded.into())
}

#[derive(Debug)]
struct FieldMetadata {
    name: Ident,
    ty: Type,
    layout: Option<LayoutAttribute>,
}

impl FieldMetadata {
    fn parse(field: &Field) -> Result<Self> {
        let name = field.ident.clone().unwrap();

        let layout = field
            .attrs
            .iter()
            .find(|a| a.path().is_ident("layout"))
            .map(|attr| attr.meta.require_list()?.parse_args())
            .transpose()?;

        Ok(Self {
            name,
            ty: field.ty.clone(),
            layout,
        })
    }
}

#[derive(Debug)]
struct LayoutAttribute {
    tag: LitStr,
    width: Option<u32>,
}

impl Parse for LayoutAttribute {
    fn parse(input: ParseStream) -> Result<Self> {
        let tag = input.parse::<LitStr>()?;

        let width = if !input.is_empty() {
            input.parse::<Token![,]>()?;

            let key = input.parse::<Ident>()?;
            if key != "width" {
                Err(Error::new_spanned(
                    key,
                    "Expected `width = 8`, `16`, `32` or `64` after the layout tag.",
                ))?
            }

            input.parse::<Token![=]>()?;

            let literal = input.parse::<LitInt>()?;
            let width = literal.base10_parse::<u32>()?;

            if ![8, 16, 32, 64].contains(&width) {
                Err(Error::new_spanned(
                    literal,
                    "Integer width must be one of 8, 16, 32 or 64.",
                ))?
            }

            Some(width)
        } else {
            None
        };

        Ok(Self { tag, width })
    }
}
