use std::any::{type_name, Any, TypeId};
use std::cell::{Ref, RefCell};
use std::collections::HashMap;
use std::rc::Rc;
use thiserror::Error;

use crate::api::{Container, ContainerTable};

/// A problem retrieving a container from a [`ParseResult`].
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ResultError {
    /// The container type was never registered (or was already taken).
    #[error("No container of type {0} was registered.")]
    NotFound(String),

    /// The container is still referenced elsewhere (ex: a `Registrar` kept alive by a callback).
    #[error("The container of type {0} is still shared and cannot be taken.")]
    Shared(String),
}

/// The populated containers from a successful parse, keyed by type.
///
/// ### Example
/// ```
/// # use argbind_builder as argbind;
/// use argbind::{Container, ContainerHandle, OptionDefinition, Parser, ResultError};
///
/// #[derive(Debug, Default)]
/// struct Point {
///     x: i32,
///     y: i32,
/// }
///
/// impl Container for Point {
///     fn options<'a>(handle: &ContainerHandle<Self>) -> Vec<OptionDefinition<'a>> {
///         vec![
///             handle.scalar("x", |p| &mut p.x),
///             handle.scalar("y", |p| &mut p.y),
///         ]
///     }
/// }
///
/// let mut parser = Parser::new("program");
/// parser.register::<Point>().unwrap();
/// let mut result = parser.parse_tokens(&["-x", "1", "-y=-2"]).unwrap();
///
/// assert_eq!(result.get::<Point>().unwrap().x, 1);
/// let point = result.take::<Point>().unwrap();
/// assert_eq!(point.y, -2);
/// assert_matches::assert_matches!(result.get::<Point>(), Err(ResultError::NotFound(_)));
/// ```
#[derive(Debug, Default)]
pub struct ParseResult {
    containers: HashMap<TypeId, Rc<dyn Any>>,
}

impl ParseResult {
    pub(crate) fn new(containers: ContainerTable) -> Self {
        Self {
            containers: containers.into_inner(),
        }
    }

    /// Borrow the container `C`.
    pub fn get<C: Container>(&self) -> Result<Ref<'_, C>, ResultError> {
        self.containers
            .get(&TypeId::of::<C>())
            .and_then(|instance| instance.downcast_ref::<RefCell<C>>())
            .map(RefCell::borrow)
            .ok_or_else(not_found::<C>)
    }

    /// Take ownership of the container `C`.
    pub fn take<C: Container>(&mut self) -> Result<C, ResultError> {
        let type_id = TypeId::of::<C>();
        let instance = self
            .containers
            .remove(&type_id)
            .ok_or_else(not_found::<C>)?
            .downcast::<RefCell<C>>()
            .map_err(|_| not_found::<C>())?;

        match Rc::try_unwrap(instance) {
            Ok(cell) => Ok(cell.into_inner()),
            Err(instance) => {
                self.containers.insert(type_id, instance);
                Err(ResultError::Shared(type_name::<C>().to_string()))
            }
        }
    }

    /// Whether the container `C` is present.
    pub fn contains<C: Container>(&self) -> bool {
        self.containers.contains_key(&TypeId::of::<C>())
    }
}

fn not_found<C>() -> ResultError {
    ResultError::NotFound(type_name::<C>().to_string())
}
