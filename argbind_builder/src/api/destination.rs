use std::any::{type_name, Any};
use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::Rc;
use thiserror::Error;

use crate::api::convert::{ConversionError, Convert};
use crate::api::registrar::Registrar;
use crate::constant::TOGGLE_BOOLEAN;
use crate::matcher::InitializationError;
use crate::model::Settings;
use crate::prelude::Collectable;

/// The notification raised after a value is converted and applied.
pub struct ValueSet {
    owner: Option<&'static str>,
    declared_type: &'static str,
    value: Box<dyn Any>,
}

impl ValueSet {
    /// Describe an applied value.
    pub fn new<T: Any>(owner: Option<&'static str>, declared_type: &'static str, value: T) -> Self {
        Self {
            owner,
            declared_type,
            value: Box::new(value),
        }
    }

    /// The type name of the container which received the value (`None` for variables & callbacks).
    pub fn owner(&self) -> Option<&'static str> {
        self.owner
    }

    /// The type name of the converted value.
    pub fn declared_type(&self) -> &'static str {
        self.declared_type
    }

    /// The converted value, if it is a `T`.
    pub fn value<T: Any>(&self) -> Option<&T> {
        self.value.downcast_ref::<T>()
    }
}

impl std::fmt::Debug for ValueSet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ValueSet")
            .field("owner", &self.owner)
            .field("declared_type", &self.declared_type)
            .finish()
    }
}

/// Why a destination could not apply a value.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ApplyError {
    /// The raw value did not convert.
    #[error(transparent)]
    Conversion(#[from] ConversionError),
    /// A callback registered an invalid option or container.
    #[error(transparent)]
    Initialization(#[from] InitializationError),
}

/// What a destination may reach while applying a value.
pub struct ApplyContext<'r, 'a> {
    registrar: &'r Registrar<'a>,
    settings: &'r Settings,
}

impl<'r, 'a> ApplyContext<'r, 'a> {
    pub(crate) fn new(registrar: &'r Registrar<'a>, settings: &'r Settings) -> Self {
        Self {
            registrar,
            settings,
        }
    }

    /// The registrar for the parser currently running.
    pub fn registrar(&self) -> &'r Registrar<'a> {
        self.registrar
    }

    /// The token syntax of the parser currently running.
    pub fn settings(&self) -> &'r Settings {
        self.settings
    }
}

/// Behaviour to receive the raw values resolved for an option.
///
/// We use this at the bottom of the object graph so the compiler can maintain each option's type,
/// while the registry works across all of them.
pub trait ValueDestination<'a> {
    /// Convert & apply a single raw value.
    fn apply(&self, value: &str, context: &ApplyContext<'_, 'a>) -> Result<ValueSet, ApplyError>;

    /// The type name of the items this destination converts to.
    fn item_type(&self) -> &'static str;

    /// Whether the destination accepts the toggle sentinel.
    fn is_boolean(&self) -> bool {
        false
    }

    /// Whether the destination accepts any number of values.
    fn is_collection(&self) -> bool {
        false
    }
}

/// Storage for a value of type `T`.
pub trait Slot<T> {
    /// The type name of the owning container, if any.
    fn owner(&self) -> Option<&'static str>;

    /// Run `f` against the stored value.
    fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R;
}

/// A borrowed program variable.
pub struct Variable<'v, T> {
    variable: RefCell<&'v mut T>,
}

impl<'v, T> Variable<'v, T> {
    /// Bind the variable.
    pub fn new(variable: &'v mut T) -> Self {
        Self {
            variable: RefCell::new(variable),
        }
    }
}

impl<'v, T> Slot<T> for Variable<'v, T> {
    fn owner(&self) -> Option<&'static str> {
        None
    }

    fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut variable = self.variable.borrow_mut();
        f(&mut **variable)
    }
}

/// A field of a container instance owned by the parser.
pub struct Field<C, T> {
    instance: Rc<RefCell<C>>,
    accessor: fn(&mut C) -> &mut T,
}

impl<C, T> Field<C, T> {
    pub(crate) fn new(instance: Rc<RefCell<C>>, accessor: fn(&mut C) -> &mut T) -> Self {
        Self { instance, accessor }
    }
}

impl<C: 'static, T> Slot<T> for Field<C, T> {
    fn owner(&self) -> Option<&'static str> {
        Some(type_name::<C>())
    }

    fn update<R>(&self, f: impl FnOnce(&mut T) -> R) -> R {
        let mut instance = self.instance.borrow_mut();
        f((self.accessor)(&mut *instance))
    }
}

/// A destination that overwrites a single value.
pub struct Scalar<S, T> {
    slot: S,
    _phantom: PhantomData<fn() -> T>,
}

impl<'v, T> Scalar<Variable<'v, T>, T> {
    /// Create a scalar destination over a program variable.
    pub fn new(variable: &'v mut T) -> Self {
        Self::bind(Variable::new(variable))
    }
}

impl<S: Slot<T>, T> Scalar<S, T> {
    /// Create a scalar destination over any slot.
    pub fn bind(slot: S) -> Self {
        Self {
            slot,
            _phantom: PhantomData,
        }
    }
}

impl<'a, S, T> ValueDestination<'a> for Scalar<S, T>
where
    S: Slot<T>,
    T: Convert + Clone + 'static,
{
    fn apply(&self, value: &str, _context: &ApplyContext<'_, 'a>) -> Result<ValueSet, ApplyError> {
        let converted = T::convert(value)?;
        self.slot.update(|variable| *variable = converted.clone());
        Ok(ValueSet::new(self.slot.owner(), type_name::<T>(), converted))
    }

    fn item_type(&self) -> &'static str {
        type_name::<T>()
    }
}

/// A destination that maps down to [`Option`].
pub struct Optional<S, T> {
    slot: S,
    _phantom: PhantomData<fn() -> T>,
}

impl<'v, T> Optional<Variable<'v, Option<T>>, T> {
    /// Create an optional destination over a program variable.
    pub fn new(variable: &'v mut Option<T>) -> Self {
        Self::bind(Variable::new(variable))
    }
}

impl<S: Slot<Option<T>>, T> Optional<S, T> {
    /// Create an optional destination over any slot.
    pub fn bind(slot: S) -> Self {
        Self {
            slot,
            _phantom: PhantomData,
        }
    }
}

impl<'a, S, T> ValueDestination<'a> for Optional<S, T>
where
    S: Slot<Option<T>>,
    T: Convert + Clone + 'static,
{
    fn apply(&self, value: &str, _context: &ApplyContext<'_, 'a>) -> Result<ValueSet, ApplyError> {
        let converted = T::convert(value)?;
        self.slot.update(|variable| variable.replace(converted.clone()));
        Ok(ValueSet::new(self.slot.owner(), type_name::<T>(), converted))
    }

    fn item_type(&self) -> &'static str {
        type_name::<T>()
    }
}

/// A destination that adds each value to a [`Collectable`].
pub struct Collection<S, C, T> {
    slot: S,
    _phantom: PhantomData<fn() -> (C, T)>,
}

impl<'v, C: Collectable<T>, T> Collection<Variable<'v, C>, C, T> {
    /// Create a collection destination over a program variable.
    pub fn new(variable: &'v mut C) -> Self {
        Self::bind(Variable::new(variable))
    }
}

impl<S: Slot<C>, C: Collectable<T>, T> Collection<S, C, T> {
    /// Create a collection destination over any slot.
    pub fn bind(slot: S) -> Self {
        Self {
            slot,
            _phantom: PhantomData,
        }
    }
}

impl<'a, S, C, T> ValueDestination<'a> for Collection<S, C, T>
where
    S: Slot<C>,
    C: Collectable<T>,
    T: Convert + Clone + 'static,
{
    fn apply(&self, value: &str, _context: &ApplyContext<'_, 'a>) -> Result<ValueSet, ApplyError> {
        let converted = T::convert(value)?;
        self.slot.update(|collection| collection.add(converted.clone()));
        Ok(ValueSet::new(self.slot.owner(), type_name::<T>(), converted))
    }

    fn item_type(&self) -> &'static str {
        type_name::<T>()
    }

    fn is_collection(&self) -> bool {
        true
    }
}

/// A boolean destination which flips when given without a value.
pub struct Toggle<S> {
    slot: S,
}

impl<'v> Toggle<Variable<'v, bool>> {
    /// Create a toggle destination over a program variable.
    pub fn new(variable: &'v mut bool) -> Self {
        Self::bind(Variable::new(variable))
    }
}

impl<S: Slot<bool>> Toggle<S> {
    /// Create a toggle destination over any slot.
    pub fn bind(slot: S) -> Self {
        Self { slot }
    }
}

impl<'a, S: Slot<bool>> ValueDestination<'a> for Toggle<S> {
    fn apply(&self, value: &str, context: &ApplyContext<'_, 'a>) -> Result<ValueSet, ApplyError> {
        let result = if value == TOGGLE_BOOLEAN {
            self.slot.update(|variable| {
                *variable = !*variable;
                *variable
            })
        } else {
            let converted = read_boolean(value, context.settings())?;
            self.slot.update(|variable| *variable = converted);
            converted
        };
        Ok(ValueSet::new(self.slot.owner(), type_name::<bool>(), result))
    }

    fn item_type(&self) -> &'static str {
        type_name::<bool>()
    }

    fn is_boolean(&self) -> bool {
        true
    }
}

type Callback<'a, T> = Box<dyn FnMut(T, &Registrar<'a>) -> Result<(), InitializationError> + 'a>;

/// A destination that hands each value to a callback.
///
/// The callback receives the parser's [`Registrar`], so it may add options (or containers) which become
/// visible to the remaining command line tokens.
pub struct Delegate<'a, T> {
    callback: RefCell<Callback<'a, T>>,
    reader: fn(&str, &Settings) -> Result<T, ConversionError>,
    boolean: bool,
}

impl<'a, T: Convert> Delegate<'a, T> {
    /// Create a delegate destination.
    pub fn new(
        callback: impl FnMut(T, &Registrar<'a>) -> Result<(), InitializationError> + 'a,
    ) -> Self {
        Self {
            callback: RefCell::new(Box::new(callback)),
            reader: |value, _| T::convert(value),
            boolean: false,
        }
    }
}

impl<'a> Delegate<'a, bool> {
    /// Create a boolean delegate destination.
    /// When the option is given without a value, the callback receives `true`.
    pub fn flag(
        callback: impl FnMut(bool, &Registrar<'a>) -> Result<(), InitializationError> + 'a,
    ) -> Self {
        Self {
            callback: RefCell::new(Box::new(callback)),
            reader: |value, settings| {
                if value == TOGGLE_BOOLEAN {
                    Ok(true)
                } else {
                    read_boolean(value, settings)
                }
            },
            boolean: true,
        }
    }
}

impl<'a, T: Clone + 'static> ValueDestination<'a> for Delegate<'a, T> {
    fn apply(&self, value: &str, context: &ApplyContext<'_, 'a>) -> Result<ValueSet, ApplyError> {
        let converted = (self.reader)(value, context.settings())?;
        let mut callback = self.callback.borrow_mut();
        (callback)(converted.clone(), context.registrar())?;
        Ok(ValueSet::new(None, type_name::<T>(), converted))
    }

    fn item_type(&self) -> &'static str {
        type_name::<T>()
    }

    fn is_boolean(&self) -> bool {
        self.boolean
    }
}

fn read_boolean(value: &str, settings: &Settings) -> Result<bool, ConversionError> {
    match settings.short_boolean(value) {
        Some(b) => Ok(b),
        None => bool::convert(value),
    }
}
