//! Derive Api for `argbind` containers.
//!
//! ### Getting Started
//! Use the derive Api by instrumenting a `Default` struct `S` with `#[derive(Container)]`.
//! This implements [`Container`](crate::Container) for `S`, binding each field to an option of the same name.
//! Register `S` with [`Parser::register`](crate::Parser::register), and collect the populated instance from the [`ParseResult`](crate::ParseResult).
//!
//! ```no_run
#![doc = include_str!("../demos/demo_copy_d.rs")]
//! ```
//!
//! ### Option Configuration
//! The option kind is inferred from the field type:
//! ```console
//! Type                                  | Option
//! -----------------------------------------------------------------------------------
//! bool                                  | handle.toggle(..)
//! Option<T>                             | handle.optional(..)
//! Vec<T>, VecDeque<T>, HashSet<T>,      | handle.collection(..)
//! BTreeSet<T>
//! T                                     | handle.scalar(..)
//! ```
//!
//! Each field may be further configured via `#[argbind(..)]`:
//! * `name = ".."`: use this name instead of the field name (raw identifiers such as `r#type` are named `type`).
//! * `alias = ".."`: add an alias; may be repeated.
//! * `position = N`: make the option positional.
//! * `required`: the option must be given.
//! Not applicable to `bool` fields.
//! * `help = ".."`: the help text.
//! * `collection`: bind a custom [Collectable](crate::prelude::Collectable) type as a collection.
//! * `skip`: leave the field out; incompatible with every other attribute.
//!
//! ```
//! use argbind::derive::*;
//! use argbind::Parser;
//!
//! #[derive(Debug, Default, Container)]
//! struct Params {
//!     #[argbind(name = "type", alias = "t", position = 1, required)]
//!     kind: String,
//!     #[argbind(help = "The sizes to accept.")]
//!     sizes: Vec<u16>,
//!     #[argbind(skip)]
//!     cache: Vec<String>,
//! }
//!
//! let mut parser = Parser::new("program");
//! parser.register::<Params>().unwrap();
//! let mut result = parser.parse_tokens(&["file", "-sizes", "1", "2"]).unwrap();
//! let params = result.take::<Params>().unwrap();
//! assert_eq!(params.kind, "file");
//! assert_eq!(params.sizes, vec![1, 2]);
//! assert!(params.cache.is_empty());
//! ```
pub use argbind_derive::Container;
