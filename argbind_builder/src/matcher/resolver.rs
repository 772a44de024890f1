use std::cell::RefCell;
use std::collections::VecDeque;
use std::rc::Rc;

use crate::api::OptionDefinition;
use crate::constant::TOGGLE_BOOLEAN;
use crate::matcher::{split, OptionRegistry, ResolveError, Token};
use crate::model::Settings;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

struct Pending<'a> {
    option: Rc<OptionDefinition<'a>>,
    announced: bool,
}

impl<'a> Pending<'a> {
    fn new(option: Rc<OptionDefinition<'a>>) -> Self {
        Self {
            option,
            announced: false,
        }
    }
}

/// Resolves raw command line tokens into [`Token`]s, lazily.
///
/// Option names are looked up in the live registry for every token, so options registered while
/// earlier tokens are being bound are visible to the later ones.
/// The positional queue, on the other hand, is taken once up front.
///
/// Tokens queued ahead of a failure are yielded before the error itself; nothing follows the error.
pub(crate) struct Resolver<'r, 'a, I> {
    registry: Rc<RefCell<OptionRegistry<'a>>>,
    settings: &'r Settings,
    tokens: I,
    positionals: VecDeque<Rc<OptionDefinition<'a>>>,
    pending: Option<Pending<'a>>,
    // A named token waiting for the output ahead of it to be consumed.
    stalled: Option<(String, Option<String>)>,
    last_collection: Option<String>,
    output: VecDeque<Token>,
    error: Option<ResolveError>,
    finished: bool,
}

impl<'r, 'a, I, S> Resolver<'r, 'a, I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    pub(crate) fn new(
        registry: Rc<RefCell<OptionRegistry<'a>>>,
        settings: &'r Settings,
        tokens: impl IntoIterator<Item = S, IntoIter = I>,
    ) -> Self {
        let positionals = registry.borrow().positionals();
        Self {
            registry,
            settings,
            tokens: tokens.into_iter(),
            positionals,
            pending: None,
            stalled: None,
            last_collection: None,
            output: VecDeque::default(),
            error: None,
            finished: false,
        }
    }

    fn feed(&mut self, raw: &str) -> Result<(), ResolveError> {
        let (name, value) = split(raw, self.settings).into_parts();

        match name {
            Some(name) => {
                self.finalize()?;

                if self.output.is_empty() {
                    self.resolve_named(&name, value)
                } else {
                    self.stalled.replace((name, value));
                    Ok(())
                }
            }
            None => self.resolve_bare(value.unwrap_or_default()),
        }
    }

    fn resolve_named(&mut self, name: &str, value: Option<String>) -> Result<(), ResolveError> {
        let option = self
            .registry
            .borrow()
            .find(name)
            .ok_or_else(|| ResolveError::UnknownOption(name.to_string()))?;
        // Once an option is named, bare values are never positional again.
        self.positionals.clear();
        self.pending.replace(Pending::new(option));

        match value {
            Some(value) => {
                self.push_value(value);
                Ok(())
            }
            None => Ok(()),
        }
    }

    fn resolve_bare(&mut self, value: String) -> Result<(), ResolveError> {
        if self.pending.is_none() {
            match self.positionals.pop_front() {
                Some(option) => {
                    self.pending.replace(Pending::new(option));
                }
                None => return Err(ResolveError::UnexpectedValue(value)),
            }
        }

        self.push_value(value);
        Ok(())
    }

    fn push_value(&mut self, value: String) {
        if let Some(mut pending) = self.pending.take() {
            if !pending.announced {
                self.announce(&pending.option);
                pending.announced = true;
            }

            self.output.push_back(Token::Value(value));

            if pending.option.is_collection() {
                self.pending.replace(pending);
            }
        }
    }

    fn announce(&mut self, option: &OptionDefinition<'a>) {
        if option.is_collection() {
            // Consecutive values for the same collection share one marker.
            if self.last_collection.as_deref() == Some(option.name()) {
                return;
            }
            self.last_collection.replace(option.name().to_string());
        } else {
            self.last_collection.take();
        }

        self.output
            .push_back(Token::Option(option.name().to_string()));
    }

    fn finalize(&mut self) -> Result<(), ResolveError> {
        match self.pending.take() {
            Some(pending) if !pending.announced => {
                if pending.option.is_boolean() {
                    self.announce(&pending.option);
                    self.output
                        .push_back(Token::Value(TOGGLE_BOOLEAN.to_string()));
                    Ok(())
                } else if pending.option.is_collection() {
                    Ok(())
                } else {
                    Err(ResolveError::MissingValue(pending.option.name().to_string()))
                }
            }
            _ => Ok(()),
        }
    }

    fn step(&mut self) -> Result<(), ResolveError> {
        if let Some((name, value)) = self.stalled.take() {
            return self.resolve_named(&name, value);
        }

        match self.tokens.next() {
            Some(raw) => self.feed(raw.as_ref()),
            None => {
                self.finished = true;
                self.finalize()
            }
        }
    }
}

impl<'r, 'a, I, S> Iterator for Resolver<'r, 'a, I>
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    type Item = Result<Token, ResolveError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(token) = self.output.pop_front() {
                #[cfg(feature = "tracing_debug")]
                {
                    debug!("Resolved {token}.");
                }

                return Some(Ok(token));
            }

            if let Some(error) = self.error.take() {
                return Some(Err(error));
            }

            if self.finished {
                return None;
            }

            if let Err(error) = self.step() {
                self.error.replace(error);
                self.finished = true;
            }
        }
    }
}
