use crate::model::{DeriveContainer, DeriveOption};

impl TryFrom<syn::DeriveInput> for DeriveContainer {
    type Error = syn::Error;

    fn try_from(value: syn::DeriveInput) -> Result<Self, Self::Error> {
        if !value.generics.params.is_empty() {
            return Err(syn::Error::new_spanned(
                &value.generics,
                "Invalid - #[derive(Container)] does not support generics.",
            ));
        }

        match &value.data {
            syn::Data::Struct(syn::DataStruct {
                fields: syn::Fields::Named(fields),
                ..
            }) => {
                let options = fields
                    .named
                    .iter()
                    .map(DeriveOption::load)
                    .filter_map(Result::transpose)
                    .collect::<Result<Vec<_>, _>>()?;

                Ok(DeriveContainer {
                    struct_name: value.ident.clone(),
                    options,
                })
            }
            _ => Err(syn::Error::new(
                value.ident.span(),
                "Invalid - #[derive(Container)] requires a struct with named fields.",
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DeriveValue, OptionType};
    use quote::quote;
    use syn::parse_quote;

    #[test]
    fn load_empty() {
        // Setup
        let input: syn::DeriveInput = parse_quote! {
            struct Empty {}
        };

        // Execute
        let container = DeriveContainer::try_from(input).unwrap();

        // Verify
        assert_eq!(
            container,
            DeriveContainer {
                struct_name: parse_quote! { Empty },
                options: Vec::default(),
            }
        );
    }

    #[test]
    fn load_fields() {
        // Setup
        let input: syn::DeriveInput = parse_quote! {
            #[derive(Default)]
            struct Settings {
                #[argbind(position = 1)]
                path: String,
                #[argbind(skip)]
                cache: Vec<u8>,
                verbose: bool,
            }
        };

        // Execute
        let container = DeriveContainer::try_from(input).unwrap();

        // Verify
        assert_eq!(container.struct_name, "Settings");
        assert_eq!(
            container.options,
            vec![
                DeriveOption {
                    field_name: parse_quote! { path },
                    option_type: OptionType::Scalar,
                    name: DeriveValue {
                        tokens: quote! { "path" }
                    },
                    aliases: Vec::default(),
                    position: Some(DeriveValue {
                        tokens: quote! { 1 }
                    }),
                    required: false,
                    help: None,
                },
                DeriveOption {
                    field_name: parse_quote! { verbose },
                    option_type: OptionType::Toggle,
                    name: DeriveValue {
                        tokens: quote! { "verbose" }
                    },
                    aliases: Vec::default(),
                    position: None,
                    required: false,
                    help: None,
                },
            ]
        );
    }

    #[test]
    fn load_invalid_field() {
        // Setup
        let input: syn::DeriveInput = parse_quote! {
            struct Settings {
                ok: u8,
                #[argbind(required)]
                verbose: bool,
            }
        };

        // Execute
        let error = DeriveContainer::try_from(input).unwrap_err();

        // Verify
        assert_eq!(
            error.to_string(),
            "Invalid - field `verbose` cannot be both `bool` and `#[argbind(required)]`."
        );
    }

    #[test]
    fn load_rejected() {
        let inputs: Vec<(syn::DeriveInput, &str)> = vec![
            (
                parse_quote! { struct Tuple(u8); },
                "Invalid - #[derive(Container)] requires a struct with named fields.",
            ),
            (
                parse_quote! { struct Unit; },
                "Invalid - #[derive(Container)] requires a struct with named fields.",
            ),
            (
                parse_quote! { enum Choice { A, B } },
                "Invalid - #[derive(Container)] requires a struct with named fields.",
            ),
            (
                parse_quote! { struct Generic<T> { value: T } },
                "Invalid - #[derive(Container)] does not support generics.",
            ),
        ];

        for (input, expected) in inputs {
            let error = DeriveContainer::try_from(input).unwrap_err();
            assert_eq!(error.to_string(), expected);
        }
    }
}
