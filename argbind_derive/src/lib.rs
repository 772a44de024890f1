extern crate proc_macro;

mod generate;
mod load;
mod model;

use crate::model::DeriveContainer;
use proc_macro::TokenStream;
use proc_macro2::TokenStream as TokenStream2;

#[proc_macro_derive(Container, attributes(argbind))]
pub fn container(input: TokenStream) -> TokenStream {
    let derive_input = syn::parse_macro_input!(input as syn::DeriveInput);

    match DeriveContainer::try_from(derive_input) {
        Ok(container) => TokenStream2::from(container).into(),
        Err(error) => error.to_compile_error().into(),
    }
}
