use crate::model::{DeriveValue, IntermediateAttributes};
use quote::ToTokens;

impl IntermediateAttributes {
    /// Merge every `#[argbind(..)]` attribute, ignoring all others.
    pub(crate) fn load(attributes: &[syn::Attribute]) -> Result<Self, syn::Error> {
        let mut out = Self::default();

        for attribute in attributes {
            if attribute.path().is_ident("argbind") {
                let IntermediateAttributes { singletons, pairs } = Self::try_from(attribute)?;
                out.singletons.extend(singletons);

                for (key, values) in pairs {
                    out.pairs.entry(key).or_default().extend(values);
                }
            }
        }

        Ok(out)
    }
}

impl TryFrom<&syn::Attribute> for IntermediateAttributes {
    type Error = syn::Error;

    fn try_from(value: &syn::Attribute) -> Result<Self, Self::Error> {
        let attributes_parser =
            syn::punctuated::Punctuated::<syn::Expr, syn::Token![,]>::parse_terminated;
        let expressions = value.parse_args_with(attributes_parser)?;
        let mut out = Self::default();

        for expression in expressions {
            match expression {
                syn::Expr::Assign(assignment) => {
                    let left = assignment.left.to_token_stream().to_string();
                    out.pairs.entry(left).or_default().push(DeriveValue {
                        tokens: assignment.right.to_token_stream(),
                    });
                }
                syn::Expr::Path(path) if path.path.get_ident().is_some() => {
                    out.singletons
                        .insert(path.path.to_token_stream().to_string());
                }
                other => {
                    return Err(syn::Error::new_spanned(
                        &other,
                        format!(
                            "Invalid - unparseable attribute `{}`.",
                            other.to_token_stream()
                        ),
                    ));
                }
            };
        }

        Ok(out)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proc_macro2::Literal;
    use std::collections::{HashMap, HashSet};
    use syn::parse_quote;

    #[test]
    fn construct_empty() {
        // Setup
        let attribute: syn::Attribute = parse_quote! {
            #[argbind()]
        };

        // Execute
        let attributes = IntermediateAttributes::try_from(&attribute).unwrap();

        // Verify
        assert_eq!(attributes, IntermediateAttributes::default());
    }

    #[test]
    fn construct() {
        // Setup
        let attribute: syn::Attribute = parse_quote! {
            #[argbind(required, alias = "a", alias = "b", position = 1)]
        };

        // Execute
        let attributes = IntermediateAttributes::try_from(&attribute).unwrap();

        // Verify
        assert_eq!(
            attributes,
            IntermediateAttributes {
                singletons: HashSet::from(["required".to_string()]),
                pairs: HashMap::from([
                    (
                        "alias".to_string(),
                        vec![
                            DeriveValue {
                                tokens: Literal::string("a").into_token_stream(),
                            },
                            DeriveValue {
                                tokens: Literal::string("b").into_token_stream(),
                            },
                        ]
                    ),
                    (
                        "position".to_string(),
                        vec![DeriveValue {
                            tokens: Literal::usize_unsuffixed(1).into_token_stream(),
                        }]
                    ),
                ])
            }
        );
    }

    #[test]
    fn construct_invalid() {
        let attribute: syn::Attribute = parse_quote! {
            #[argbind]
        };
        assert!(IntermediateAttributes::try_from(&attribute).is_err());
    }

    #[test]
    fn construct_invalid_expression() {
        // Setup
        let attribute: syn::Attribute = parse_quote! {
            #[argbind(1 + 2)]
        };

        // Execute
        let error = IntermediateAttributes::try_from(&attribute).unwrap_err();

        // Verify
        assert_eq!(
            error.to_string(),
            "Invalid - unparseable attribute `1 + 2`."
        );
    }

    #[test]
    fn load_merged() {
        // Setup
        let field: syn::Field = parse_quote! {
            #[doc = "ignored"]
            #[argbind(alias = "a")]
            #[argbind(required, alias = "b")]
            value: u32
        };

        // Execute
        let attributes = IntermediateAttributes::load(&field.attrs).unwrap();

        // Verify
        assert_eq!(attributes.singletons, HashSet::from(["required".to_string()]));
        assert_eq!(attributes.pairs["alias"].len(), 2);
        assert_eq!(attributes.pairs.len(), 1);
    }
}
