mod argument;
mod registry;
mod resolver;
mod validator;

use thiserror::Error;

pub(crate) use argument::*;
pub(crate) use registry::*;
pub(crate) use resolver::*;
pub(crate) use validator::*;

/// Names and aliases are compared in this (lower) case.
pub(crate) fn fold_case(identifier: &str) -> String {
    identifier.to_lowercase()
}

/// A structural problem with the registered options.
///
/// Raised when adding options (or registering a container), including while parsing is underway.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum InitializationError {
    /// Names and/or aliases which appear more than once (ignoring case).
    #[error("The following names or aliases are not unique: [{}].", .0.join(", "))]
    NotUnique(Vec<String>),

    /// The names of options which share a position.
    #[error("The following options share a position: [{}].", .0.join(", "))]
    PositionNotUnique(Vec<String>),

    /// The positions do not count up from 1.
    #[error("Option positions must be contiguous from 1, but found position {found} where {expected} was expected.")]
    PositionGap {
        /// The position found.
        found: usize,
        /// The position expected.
        expected: usize,
    },

    /// A required positional option after an optional one.
    #[error("Required positional option '{required}' cannot follow optional positional option '{optional}'.")]
    RequiredAfterOptional {
        /// The last optional positional before `required`.
        optional: String,
        /// The offending required positional.
        required: String,
    },

    /// More than one positional collection.
    #[error("Only one positional option may be a collection, but found '{first}' and '{second}'.")]
    MultipleCollections {
        /// The first positional collection.
        first: String,
        /// The second positional collection.
        second: String,
    },

    /// An option with an empty name.
    #[error("Every option must have a non-empty name.")]
    Unnamed,

    /// A container type registered more than once.
    #[error("Container '{0}' is already registered.")]
    DuplicateContainer(String),
}

/// A problem matching the command line tokens to the registered options.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResolveError {
    /// A name which matches no option.
    #[error("'{0}' is not a valid option.")]
    UnknownOption(String),

    /// A bare value with neither a preceding option nor a remaining positional option.
    #[error("Expected an option instead of value '{0}'.")]
    UnexpectedValue(String),

    /// A (non-boolean, non-collection) option given without a value.
    #[error("Option '{0}' has no value assigned.")]
    MissingValue(String),
}

/// A resolved command line unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// The canonical name of an option.
    Option(String),
    /// A raw value for the most recent option.
    Value(String),
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Token::Option(name) => write!(f, "Option({name})"),
            Token::Value(value) => write!(f, "Value({value})"),
        }
    }
}
