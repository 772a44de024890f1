use proc_macro2::TokenStream as TokenStream2;
use std::collections::{HashMap, HashSet};

#[derive(Debug, Clone)]
pub struct DeriveValue {
    pub tokens: TokenStream2,
}

impl PartialEq for DeriveValue {
    fn eq(&self, other: &Self) -> bool {
        self.tokens.to_string() == other.tokens.to_string()
    }
}

impl Eq for DeriveValue {}

/// The contents of every `#[argbind(..)]` attribute on one item, merged.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct IntermediateAttributes {
    pub singletons: HashSet<String>,
    pub pairs: HashMap<String, Vec<DeriveValue>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionType {
    Collection,
    Optional,
    Scalar,
    Toggle,
}

#[derive(Debug, PartialEq, Eq)]
pub struct DeriveOption {
    pub field_name: syn::Ident,
    pub option_type: OptionType,
    pub name: DeriveValue,
    pub aliases: Vec<DeriveValue>,
    pub position: Option<DeriveValue>,
    pub required: bool,
    pub help: Option<DeriveValue>,
}

#[derive(Debug, PartialEq, Eq)]
pub struct DeriveContainer {
    pub struct_name: syn::Ident,
    pub options: Vec<DeriveOption>,
}
