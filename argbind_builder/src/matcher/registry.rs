use std::collections::VecDeque;
use std::rc::Rc;

use crate::api::OptionDefinition;
use crate::matcher::{fold_case, validate, InitializationError};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

type OptionListener<'a> = Box<dyn FnMut(&OptionDefinition<'a>) + 'a>;

/// The options known to a parser, in registration order.
///
/// Only grows: options are never removed nor replaced.
#[derive(Default)]
pub(crate) struct OptionRegistry<'a> {
    options: Vec<Rc<OptionDefinition<'a>>>,
    listeners: Vec<OptionListener<'a>>,
}

impl<'a> OptionRegistry<'a> {
    /// Add the definitions, all or nothing.
    ///
    /// The combined set of options is validated before any definition is committed.
    pub(crate) fn add_range(
        &mut self,
        definitions: Vec<OptionDefinition<'a>>,
    ) -> Result<(), InitializationError> {
        {
            let candidate: Vec<&OptionDefinition<'a>> = self
                .options
                .iter()
                .map(Rc::as_ref)
                .chain(definitions.iter())
                .collect();
            validate(&candidate)?;
        }

        for definition in definitions {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Registered {definition:?}.");
            }

            for listener in self.listeners.iter_mut() {
                listener(&definition);
            }

            self.options.push(Rc::new(definition));
        }

        Ok(())
    }

    /// Subscribe to each definition added from here on.
    pub(crate) fn subscribe(&mut self, listener: impl FnMut(&OptionDefinition<'a>) + 'a) {
        self.listeners.push(Box::new(listener));
    }

    /// Find an option by name, otherwise by alias (both ignoring case).
    pub(crate) fn find(&self, token: &str) -> Option<Rc<OptionDefinition<'a>>> {
        let token = fold_case(token);
        self.options
            .iter()
            .find(|option| fold_case(option.name()) == token)
            .or_else(|| {
                self.options.iter().find(|option| {
                    option
                        .alias_names()
                        .iter()
                        .any(|alias| fold_case(alias) == token)
                })
            })
            .cloned()
    }

    /// Get an option by its canonical name.
    pub(crate) fn get(&self, name: &str) -> Option<Rc<OptionDefinition<'a>>> {
        self.options
            .iter()
            .find(|option| option.name() == name)
            .cloned()
    }

    pub(crate) fn options(&self) -> &[Rc<OptionDefinition<'a>>] {
        &self.options
    }

    /// The names of the required options.
    pub(crate) fn required(&self) -> Vec<String> {
        self.options
            .iter()
            .filter(|option| option.is_required())
            .map(|option| option.name().to_string())
            .collect()
    }

    /// The positional options, in position order.
    pub(crate) fn positionals(&self) -> VecDeque<Rc<OptionDefinition<'a>>> {
        let mut positionals: Vec<Rc<OptionDefinition<'a>>> = self
            .options
            .iter()
            .filter(|option| option.is_positional())
            .cloned()
            .collect();
        positionals.sort_by_key(|option| option.position_index());
        positionals.into()
    }
}
