mod binder;
mod interface;
mod printer;
mod result;

use thiserror::Error;

use crate::api::ConversionError;
use crate::matcher::{InitializationError, ResolveError};

pub(crate) use binder::*;
pub(crate) use interface::*;
pub(crate) use printer::*;
pub use result::*;

/// A problem binding resolved tokens to their destinations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum BindError {
    /// An option token which matches no (canonical) option name.
    #[error("'{0}' is not a valid option.")]
    UnknownOption(String),

    /// A value token with no preceding option token.
    #[error("Expected an option instead of value '{0}'.")]
    UnexpectedValue(String),

    /// A value which could not be converted to its option's type.
    #[error("Could not parse value '{value}' to type {type_name}.")]
    Conversion {
        /// The raw value.
        value: String,
        /// The option's item type.
        type_name: &'static str,
        /// The underlying conversion failure.
        #[source]
        source: ConversionError,
    },

    /// The required options which were not given, sorted.
    #[error("The following option(s) are required, but were not given: [{}].", .0.join(", "))]
    MissingRequired(Vec<String>),
}

/// Any problem encountered while parsing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ParseError {
    /// Invalid option registration (possibly from a callback while parsing).
    #[error(transparent)]
    Initialization(#[from] InitializationError),

    /// The command line tokens do not match the options.
    #[error(transparent)]
    Resolve(#[from] ResolveError),

    /// A value could not be bound.
    #[error(transparent)]
    Bind(#[from] BindError),
}
