use crate::load::incompatible_error;
use crate::model::{DeriveOption, DeriveValue, IntermediateAttributes, OptionType};
use proc_macro2::Literal;
use quote::ToTokens;
use syn::ext::IdentExt;

const SINGLETONS: [&str; 3] = ["required", "skip", "collection"];
const PAIRS: [&str; 4] = ["name", "alias", "position", "help"];
const COLLECTIONS: [&str; 4] = ["Vec", "VecDeque", "HashSet", "BTreeSet"];

impl DeriveOption {
    /// Load the option for `field`, or `None` when the field is skipped.
    pub(crate) fn load(field: &syn::Field) -> Result<Option<Self>, syn::Error> {
        let field_name = match &field.ident {
            Some(ident) => ident.clone(),
            None => {
                return Err(syn::Error::new_spanned(
                    field,
                    "Invalid - options must be named fields.",
                ))
            }
        };
        let attributes = IntermediateAttributes::load(&field.attrs)?;

        for singleton in &attributes.singletons {
            if !SINGLETONS.contains(&singleton.as_str()) {
                return Err(unknown_error(&field_name, singleton));
            }
        }

        for key in attributes.pairs.keys() {
            if !PAIRS.contains(&key.as_str()) {
                return Err(unknown_error(&field_name, key));
            }
        }

        if attributes.singletons.contains("skip") {
            let mut others: Vec<String> = attributes
                .singletons
                .iter()
                .filter(|s| s.as_str() != "skip")
                .map(|s| format!("#[argbind({s})]"))
                .chain(
                    attributes
                        .pairs
                        .keys()
                        .map(|key| format!("#[argbind({key} = ..)]")),
                )
                .collect();
            others.sort();

            return match others.first() {
                Some(other) => Err(incompatible_error(&field_name, "#[argbind(skip)]", other)),
                None => Ok(None),
            };
        }

        let explicit_collection = attributes.singletons.contains("collection");
        let required = attributes.singletons.contains("required");
        let option_type = match type_ident(&field.ty).as_deref() {
            Some("bool") => {
                if explicit_collection {
                    return Err(incompatible_error(&field_name, "bool", "#[argbind(collection)]"));
                }

                if required {
                    return Err(incompatible_error(&field_name, "bool", "#[argbind(required)]"));
                }

                OptionType::Toggle
            }
            Some("Option") => {
                if explicit_collection {
                    return Err(incompatible_error(
                        &field_name,
                        "Option<..>",
                        "#[argbind(collection)]",
                    ));
                }

                OptionType::Optional
            }
            Some(ident) if COLLECTIONS.contains(&ident) => OptionType::Collection,
            _ => {
                if explicit_collection {
                    OptionType::Collection
                } else {
                    OptionType::Scalar
                }
            }
        };

        let name = match single(&field_name, &attributes, "name")? {
            Some(name) => name,
            None => DeriveValue {
                tokens: Literal::string(&field_name.unraw().to_string()).into_token_stream(),
            },
        };

        let position = single(&field_name, &attributes, "position")?;
        let help = single(&field_name, &attributes, "help")?;

        Ok(Some(DeriveOption {
            field_name,
            option_type,
            name,
            aliases: attributes.pairs.get("alias").cloned().unwrap_or_default(),
            position,
            required,
            help,
        }))
    }
}

/// The last path segment of the field type (ex: `HashSet` for `std::collections::HashSet<u8>`).
fn type_ident(ty: &syn::Type) -> Option<String> {
    match ty {
        syn::Type::Path(path) => path
            .path
            .segments
            .last()
            .map(|segment| segment.ident.to_string()),
        syn::Type::Group(group) => type_ident(&group.elem),
        syn::Type::Paren(paren) => type_ident(&paren.elem),
        _ => None,
    }
}

fn single(
    field_name: &syn::Ident,
    attributes: &IntermediateAttributes,
    key: &str,
) -> Result<Option<DeriveValue>, syn::Error> {
    match attributes.pairs.get(key).map(Vec::as_slice) {
        None | Some([]) => Ok(None),
        Some([value]) => Ok(Some(value.clone())),
        Some(_) => Err(syn::Error::new(
            field_name.span(),
            format!("Invalid - field `{field_name}` repeats `#[argbind({key} = ..)]`."),
        )),
    }
}

fn unknown_error(field_name: &syn::Ident, key: &str) -> syn::Error {
    syn::Error::new(
        field_name.span(),
        format!("Invalid - field `{field_name}` has unknown attribute `{key}`."),
    )
}
