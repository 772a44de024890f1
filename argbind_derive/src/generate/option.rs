use crate::model::{DeriveOption, OptionType};
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;

impl From<DeriveOption> for TokenStream2 {
    fn from(value: DeriveOption) -> Self {
        let DeriveOption {
            field_name,
            option_type,
            name,
            aliases,
            position,
            required,
            help,
        } = value;
        let name = name.tokens;
        let binding = match option_type {
            OptionType::Collection => quote! {
                handle.collection(#name, |container| &mut container.#field_name)
            },
            OptionType::Optional => quote! {
                handle.optional(#name, |container| &mut container.#field_name)
            },
            OptionType::Scalar => quote! {
                handle.scalar(#name, |container| &mut container.#field_name)
            },
            OptionType::Toggle => quote! {
                handle.toggle(#name, |container| &mut container.#field_name)
            },
        };
        let aliases = aliases.into_iter().map(|alias| {
            let alias = alias.tokens;
            quote! { .alias(#alias) }
        });
        let position = position.map(|position| {
            let position = position.tokens;
            quote! { .position(#position) }
        });
        let required = if required {
            Some(quote! { .required() })
        } else {
            None
        };
        let help = help.map(|help| {
            let help = help.tokens;
            quote! { .help(#help) }
        });

        quote! {
            #binding #( #aliases )* #position #required #help
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::DeriveValue;
    use syn::parse_quote;

    fn option(option_type: OptionType) -> DeriveOption {
        DeriveOption {
            field_name: parse_quote! { items },
            option_type,
            name: DeriveValue {
                tokens: quote! { "items" },
            },
            aliases: Vec::default(),
            position: None,
            required: false,
            help: None,
        }
    }

    #[test]
    fn generate_types() {
        let cases = [
            (
                OptionType::Collection,
                quote! { handle.collection("items", |container| &mut container.items) },
            ),
            (
                OptionType::Optional,
                quote! { handle.optional("items", |container| &mut container.items) },
            ),
            (
                OptionType::Scalar,
                quote! { handle.scalar("items", |container| &mut container.items) },
            ),
            (
                OptionType::Toggle,
                quote! { handle.toggle("items", |container| &mut container.items) },
            ),
        ];

        for (option_type, expected) in cases {
            let token_stream = TokenStream2::from(option(option_type));
            assert_eq!(token_stream.to_string(), expected.to_string());
        }
    }

    #[test]
    fn generate_configured() {
        // Setup
        let mut derive_option = option(OptionType::Collection);
        derive_option.aliases = vec![
            DeriveValue {
                tokens: quote! { "i" },
            },
            DeriveValue {
                tokens: quote! { "it" },
            },
        ];
        derive_option.position = Some(DeriveValue {
            tokens: quote! { 2 },
        });
        derive_option.required = true;
        derive_option.help = Some(DeriveValue {
            tokens: quote! { "All the items." },
        });

        // Execute
        let token_stream = TokenStream2::from(derive_option);

        // Verify
        assert_eq!(
            token_stream.to_string(),
            quote! {
                handle.collection("items", |container| &mut container.items)
                    .alias("i")
                    .alias("it")
                    .position(2)
                    .required()
                    .help("All the items.")
            }
            .to_string()
        );
    }
}
