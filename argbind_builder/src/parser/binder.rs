use std::collections::HashSet;
use std::rc::Rc;

use crate::api::{ApplyContext, ApplyError, OptionDefinition, Registrar, ValueSet};
use crate::matcher::{ResolveError, Token};
use crate::model::Settings;
use crate::parser::{BindError, ParseError};

#[cfg(feature = "tracing_debug")]
use tracing::debug;

pub(crate) type ValueListener<'a> = Box<dyn FnMut(&str, &ValueSet) + 'a>;

/// Applies resolved tokens to their option destinations, in order.
pub(crate) struct Binder<'r, 'a> {
    registrar: &'r Registrar<'a>,
    settings: &'r Settings,
    listeners: &'r mut [ValueListener<'a>],
}

impl<'r, 'a> Binder<'r, 'a> {
    pub(crate) fn new(
        registrar: &'r Registrar<'a>,
        settings: &'r Settings,
        listeners: &'r mut [ValueListener<'a>],
    ) -> Self {
        Self {
            registrar,
            settings,
            listeners,
        }
    }

    /// Bind every token, then check the required options.
    ///
    /// The tokens are pulled one at a time, so options registered while applying a value are visible to
    /// the resolution of the tokens after it.
    pub(crate) fn bind(
        &mut self,
        tokens: impl IntoIterator<Item = Result<Token, ResolveError>>,
    ) -> Result<(), ParseError> {
        let mut current: Option<Rc<OptionDefinition<'a>>> = None;
        let mut satisfied: HashSet<String> = HashSet::default();

        for token in tokens {
            match token? {
                Token::Option(name) => {
                    let option = self.registrar.registry().borrow().get(&name);
                    match option {
                        Some(option) => current.replace(option),
                        None => return Err(BindError::UnknownOption(name).into()),
                    };
                }
                Token::Value(value) => match &current {
                    Some(option) => {
                        // No registry borrow may be held here: the destination may register options.
                        let value_set = self.apply(option, &value)?;
                        satisfied.insert(option.name().to_string());

                        for listener in self.listeners.iter_mut() {
                            listener(option.name(), &value_set);
                        }
                    }
                    None => return Err(BindError::UnexpectedValue(value).into()),
                },
            }
        }

        let mut missing: Vec<String> = self
            .registrar
            .registry()
            .borrow()
            .required()
            .into_iter()
            .filter(|name| !satisfied.contains(name))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            missing.sort();
            Err(BindError::MissingRequired(missing).into())
        }
    }

    fn apply(&self, option: &OptionDefinition<'a>, value: &str) -> Result<ValueSet, ParseError> {
        let context = ApplyContext::new(self.registrar, self.settings);

        match option.destination().apply(value, &context) {
            Ok(value_set) => {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!(
                        "Applied '{value}' to '{name}' as {t}.",
                        name = option.name(),
                        t = value_set.declared_type()
                    );
                }

                Ok(value_set)
            }
            Err(ApplyError::Conversion(source)) => Err(BindError::Conversion {
                value: value.to_string(),
                type_name: option.item_type(),
                source,
            }
            .into()),
            Err(ApplyError::Initialization(error)) => Err(error.into()),
        }
    }
}
