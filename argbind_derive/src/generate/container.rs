use crate::model::DeriveContainer;
use proc_macro2::TokenStream as TokenStream2;
use quote::quote;

impl From<DeriveContainer> for TokenStream2 {
    fn from(value: DeriveContainer) -> Self {
        let DeriveContainer {
            struct_name,
            options,
        } = value;
        let options = options.into_iter().map(TokenStream2::from);

        quote! {
            impl ::argbind::Container for #struct_name {
                #[allow(unused_variables)]
                fn options<'a>(
                    handle: &::argbind::ContainerHandle<Self>,
                ) -> ::std::vec::Vec<::argbind::OptionDefinition<'a>> {
                    ::std::vec![ #( #options ),* ]
                }
            }
        }
    }
}
