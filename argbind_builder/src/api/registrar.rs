use std::any::{type_name, Any, TypeId};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::api::container::{Container, ContainerHandle};
use crate::api::definition::OptionDefinition;
use crate::matcher::{InitializationError, OptionRegistry};

/// The container instances owned by a parser, by type.
#[derive(Default)]
pub(crate) struct ContainerTable {
    containers: HashMap<TypeId, Rc<dyn Any>>,
}

impl ContainerTable {
    fn contains(&self, type_id: &TypeId) -> bool {
        self.containers.contains_key(type_id)
    }

    fn insert(&mut self, type_id: TypeId, instance: Rc<dyn Any>) {
        self.containers.insert(type_id, instance);
    }

    pub(crate) fn into_inner(self) -> HashMap<TypeId, Rc<dyn Any>> {
        self.containers
    }
}

/// The handle through which options and containers are registered.
///
/// A `Registrar` is shared between the [`Parser`](crate::Parser) and every [`Delegate`](crate::Delegate) callback,
/// so options may be added while parsing is underway.
/// Options added this way are visible to the command line tokens which follow the value that added them.
///
/// Cloning a `Registrar` produces another handle to the same registry.
#[derive(Clone, Default)]
pub struct Registrar<'a> {
    registry: Rc<RefCell<OptionRegistry<'a>>>,
    containers: Rc<RefCell<ContainerTable>>,
}

impl<'a> Registrar<'a> {
    /// Add a single option.
    ///
    /// Fails (leaving the registry unmodified) when the option conflicts with those already registered.
    pub fn add(&self, definition: OptionDefinition<'a>) -> Result<(), InitializationError> {
        self.add_range(vec![definition])
    }

    /// Add a batch of options, all or nothing.
    pub fn add_range(
        &self,
        definitions: impl IntoIterator<Item = OptionDefinition<'a>>,
    ) -> Result<(), InitializationError> {
        let definitions: Vec<OptionDefinition<'a>> = definitions.into_iter().collect();
        self.registry.borrow_mut().add_range(definitions)
    }

    /// Register the container `C`: create its instance and add its options.
    ///
    /// Each container type may be registered once.
    pub fn register<C: Container>(&self) -> Result<(), InitializationError> {
        let type_id = TypeId::of::<C>();
        if self.containers.borrow().contains(&type_id) {
            return Err(InitializationError::DuplicateContainer(
                type_name::<C>().to_string(),
            ));
        }

        let instance = Rc::new(RefCell::new(C::default()));
        let definitions = C::options(&ContainerHandle::new(instance.clone()));
        self.add_range(definitions)?;
        self.containers.borrow_mut().insert(type_id, instance);
        Ok(())
    }

    /// Whether an option is registered under `name` (by name or alias, ignoring case).
    pub fn contains_option(&self, name: &str) -> bool {
        self.registry.borrow().find(name).is_some()
    }

    /// Whether the container `C` is registered.
    pub fn contains_container<C: Container>(&self) -> bool {
        self.containers.borrow().contains(&TypeId::of::<C>())
    }

    pub(crate) fn registry(&self) -> &Rc<RefCell<OptionRegistry<'a>>> {
        &self.registry
    }

    pub(crate) fn take_containers(&self) -> ContainerTable {
        std::mem::take(&mut *self.containers.borrow_mut())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test::BlackHole;

    #[derive(Default)]
    struct Pair {
        left: u32,
        right: u32,
    }

    impl Container for Pair {
        fn options<'a>(handle: &ContainerHandle<Self>) -> Vec<OptionDefinition<'a>> {
            vec![
                handle.scalar("left", |p| &mut p.left).position(1),
                handle.scalar("right", |p| &mut p.right).position(2),
            ]
        }
    }

    #[derive(Default)]
    struct Clash {
        left: bool,
    }

    impl Container for Clash {
        fn options<'a>(handle: &ContainerHandle<Self>) -> Vec<OptionDefinition<'a>> {
            vec![handle.toggle("LEFT", |c| &mut c.left)]
        }
    }

    #[test]
    fn add() {
        let registrar = Registrar::default();
        registrar
            .add(OptionDefinition::new("abc", BlackHole::default()).alias("a"))
            .unwrap();
        assert!(registrar.contains_option("abc"));
        assert!(registrar.contains_option("A"));
        assert!(!registrar.contains_option("b"));
    }

    #[test]
    fn add_range_all_or_nothing() {
        // Setup
        let registrar = Registrar::default();
        registrar
            .add(OptionDefinition::new("abc", BlackHole::default()))
            .unwrap();

        // Execute
        let error = registrar
            .add_range([
                OptionDefinition::new("def", BlackHole::default()),
                OptionDefinition::new("ABC", BlackHole::default()),
            ])
            .unwrap_err();

        // Verify
        assert_eq!(error, InitializationError::NotUnique(vec!["abc".to_string()]));
        assert!(!registrar.contains_option("def"));
        assert_eq!(registrar.registry().borrow().options().len(), 1);
    }

    #[test]
    fn register() {
        let registrar = Registrar::default();
        registrar.register::<Pair>().unwrap();
        assert!(registrar.contains_container::<Pair>());
        assert!(!registrar.contains_container::<Clash>());
        assert!(registrar.contains_option("left"));
        assert!(registrar.contains_option("right"));
    }

    #[test]
    fn register_twice() {
        let registrar = Registrar::default();
        registrar.register::<Pair>().unwrap();
        let error = registrar.register::<Pair>().unwrap_err();
        assert_matches!(error, InitializationError::DuplicateContainer(_));
        assert_eq!(registrar.registry().borrow().options().len(), 2);
    }

    #[test]
    fn register_conflict() {
        let registrar = Registrar::default();
        registrar.register::<Pair>().unwrap();
        let error = registrar.register::<Clash>().unwrap_err();
        assert_eq!(error, InitializationError::NotUnique(vec!["left".to_string()]));
        assert!(!registrar.contains_container::<Clash>());
    }

    #[test]
    fn clones_share() {
        let registrar = Registrar::default();
        let other = registrar.clone();
        other
            .add(OptionDefinition::new("abc", BlackHole::default()))
            .unwrap();
        assert!(registrar.contains_option("abc"));
        assert!(registrar.take_containers().into_inner().is_empty());
    }
}
