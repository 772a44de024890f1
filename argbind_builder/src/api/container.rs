use std::cell::RefCell;
use std::rc::Rc;

use crate::api::convert::Convert;
use crate::api::definition::OptionDefinition;
use crate::api::destination::{Collection, Field, Optional, Scalar, Toggle};
use crate::prelude::Collectable;

/// A type whose fields are bound to options.
///
/// The parser creates (via [`Default`]) and owns one instance per registered container.
/// After parsing, the populated instance is available from [`ParseResult`](crate::ParseResult).
///
/// Typically implemented via `#[derive(Container)]`; see `argbind::derive`.
///
/// ### Example
/// ```
/// # use argbind_builder as argbind;
/// use argbind::{Container, ContainerHandle, OptionDefinition, Parser};
///
/// #[derive(Debug, Default)]
/// struct Logging {
///     level: u8,
///     quiet: bool,
/// }
///
/// impl Container for Logging {
///     fn options<'a>(handle: &ContainerHandle<Self>) -> Vec<OptionDefinition<'a>> {
///         vec![
///             handle.scalar("level", |s| &mut s.level).position(1),
///             handle.toggle("quiet", |s| &mut s.quiet).alias("q"),
///         ]
///     }
/// }
///
/// let mut parser = Parser::new("program");
/// parser.register::<Logging>().unwrap();
/// let mut result = parser.parse_tokens(&["3", "-q"]).unwrap();
/// let logging = result.take::<Logging>().unwrap();
/// assert_eq!(logging.level, 3);
/// assert!(logging.quiet);
/// ```
pub trait Container: Default + 'static {
    /// Describe the options bound to the fields of `handle`'s instance.
    fn options<'a>(handle: &ContainerHandle<Self>) -> Vec<OptionDefinition<'a>>;
}

/// Builds option definitions bound to the fields of a container instance.
pub struct ContainerHandle<C> {
    instance: Rc<RefCell<C>>,
}

impl<C: 'static> ContainerHandle<C> {
    pub(crate) fn new(instance: Rc<RefCell<C>>) -> Self {
        Self { instance }
    }

    fn field<T>(&self, accessor: fn(&mut C) -> &mut T) -> Field<C, T> {
        Field::new(self.instance.clone(), accessor)
    }

    /// Bind a single valued field.
    pub fn scalar<'a, T>(
        &self,
        name: impl Into<String>,
        accessor: fn(&mut C) -> &mut T,
    ) -> OptionDefinition<'a>
    where
        T: Convert + Clone + 'static,
    {
        OptionDefinition::new(name, Scalar::bind(self.field(accessor)))
    }

    /// Bind an [`Option`] field.
    pub fn optional<'a, T>(
        &self,
        name: impl Into<String>,
        accessor: fn(&mut C) -> &mut Option<T>,
    ) -> OptionDefinition<'a>
    where
        T: Convert + Clone + 'static,
    {
        OptionDefinition::new(name, Optional::bind(self.field(accessor)))
    }

    /// Bind a [`Collectable`] field.
    pub fn collection<'a, V, T>(
        &self,
        name: impl Into<String>,
        accessor: fn(&mut C) -> &mut V,
    ) -> OptionDefinition<'a>
    where
        V: Collectable<T> + 'static,
        T: Convert + Clone + 'static,
    {
        OptionDefinition::new(name, Collection::bind(self.field(accessor)))
    }

    /// Bind a `bool` field which flips when given without a value.
    pub fn toggle<'a>(
        &self,
        name: impl Into<String>,
        accessor: fn(&mut C) -> &mut bool,
    ) -> OptionDefinition<'a> {
        OptionDefinition::new(name, Toggle::bind(self.field(accessor)))
    }
}
