//! `argbind` is a single-pass shell argument parser for Rust.
//!
//! `argbind` reads a command line left to right exactly once, binding each value onto its destination as soon as it is resolved.
//! Destinations are plain variables, fields of a *container* struct, or callbacks.
//! Callbacks may register further options while parsing, and those options apply to the remainder of the same command line.
//!
//! `argbind` prioritizes the following design concerns:
//! * *Type safe binding*:
//! The user should not call any `&str -> T` conversion functions directly.
//! Every destination declares its item type, and conversion happens via the [`Convert`](./prelude/trait.Convert.html) trait.
//! * *Options with positions*:
//! Every option has a name.
//! An option may additionally have a position, in which case it may be given by order instead of by name.
//! * *Self extending grammar*:
//! An option's value may add options to the parser, which are immediately visible to the tokens that follow it.
//! * *Configurable syntax*:
//! Prefixes, name/value assignment characters, and boolean suffixes are all configurable via [`Settings`].
//!
//! # Usage
//! This page includes a few demos on using `argbind`.
//!
//! via [derive Api](./derive/index.html):
//! ```no_run
#![doc = include_str!("../demos/demo_copy_d.rs")]
//! ```
//! or equivalently via builder Api (this page):
//! ```no_run
#![doc = include_str!("../demos/demo_copy.rs")]
//! ```
//!
//! The builder program has the following help message (via [`Parser::short_help`]):
//! ```console
//! usage: copy [-force] SOURCE [DESTINATIONS ...]
//!
//! Copy a file to any number of destinations.
//!
//! positional options:
//!  SOURCE               The file to copy.            String   required
//!  [DESTINATIONS ...]   Where to copy the file to.   String
//!
//! named options:
//!  -force, -f           Overwrite existing files.    bool
//! ```
//!
//! ```console
//! $ copy a.txt b.txt c.txt -f
//! copy a.txt -> b.txt (force: true)
//! copy a.txt -> c.txt (force: true)
//!
//! $ copy
//! Parse error: The following option(s) are required, but were not given: [source].
//!
//! $ copy a.txt -force=maybe
//! Parse error: Could not parse value 'maybe' to type bool.
//! ```
//!
//! # Builder Api
//! Configure `argbind` by starting with a [`Parser`] and `add`ing an [`OptionDefinition`] per option.
//! Each definition pairs a name with a *destination*, and optionally aliases, a position, `required`, and help text.
//!
//! ### Destinations
//! * [`Scalar`]: assigns a single value `T`.
//! * [`Optional`]: assigns a single value `Some(T)` into an `Option<T>`.
//! * [`Collection`]: accumulates any number of values into a [Collectable](./prelude/trait.Collectable.html).
//! `argbind` provides `Collectable` implementations for `Vec<T>`, `VecDeque<T>`, `HashSet<T>`, and `BTreeSet<T>`.
//! * [`Toggle`]: a `bool` which flips when given without a value (ex: `-verbose`), or is assigned explicitly (ex: `-verbose=false`, `-verbose-`).
//! * [`Delegate`]: hands each value to a callback, along with the parser's [`Registrar`].
//!
//! Each of these may bind to a variable (`::new`), or to a field of a [`Container`] (`::bind`, typically via [`ContainerHandle`]).
//!
//! ### Containers
//! A [`Container`] is a `Default` struct whose fields are bound to options.
//! The parser owns one instance per registered container, and hands it over via the [`ParseResult`] once parsing completes.
//! Containers are usually implemented with `#[derive(Container)]` (see the [derive Api](./derive/index.html)).
//!
//! ### Dynamic registration
//! A [`Delegate`] callback receives the parser's [`Registrar`], through which it may add options or register containers.
//! These options are matched by name for the remainder of the command line.
//! ```no_run
#![doc = include_str!("../demos/demo_plugins.rs")]
//! ```
//!
//! ```console
//! $ plugins -p compress -level 9 -plugin=encrypt -key secret
//! compress: Compress { level: Some(9) }
//! encrypt: Encrypt { key: "secret" }
//!
//! $ plugins -level 9
//! Parse error: 'level' is not a valid option.
//! ```
//!
//! # Command Line Semantics
//! Using the default [`Settings`], tokens are interpreted as follows:
//! ```console
//! Token            | Meaning
//! -----------------------------------------------------------------
//! -name, --name    | Names the option 'name' (or any of its aliases, case insensitively).
//! -name=v, -name:v | Names the option 'name' with the value 'v'.
//! -name=           | Names the option 'name' with the empty value.
//! -flag+, -flag-   | Assigns true/false to the boolean option 'flag'.
//! v                | A value for the current option, or the next positional option.
//! ```
//!
//! The rules applied while reading the command line:
//! * Positional options are filled in position order, until the first named option is given.
//! After that point, bare values belong only to the current named option.
//! * A collection option keeps accepting values until the next named option.
//! A positional collection absorbs every remaining bare value.
//! * A boolean option given without a value is toggled.
//! * Any other option given without a value is an error, as is a value without an option.
//! * Names and aliases are matched case insensitively, and must be unique across the parser.
//!
//! Once the command line is consumed, every `required` option must have been given.
//!
//! # Features
//! * `unit_test`: For features that help with unit testing (ex: [`Parser::resolve_tokens`]).
//! * `tracing_debug`: Emit `tracing` debug events while registering, resolving, and binding options.
pub mod derive;
pub use argbind_builder::*;
