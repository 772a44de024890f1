use std::env;

use crate::api::{Container, OptionDefinition, Registrar, ValueSet};
use crate::matcher::{InitializationError, Resolver};
use crate::model::Settings;
use crate::parser::{Binder, ParseError, ParseResult, Printer, ValueListener};

#[cfg(feature = "unit_test")]
use crate::matcher::{ResolveError, Token};

/// The command line parser.
///
/// Options are registered up front (via [`Parser::add`], [`Parser::add_range`], or [`Parser::register`]),
/// or while parsing from inside a [`Delegate`](crate::Delegate) callback.
///
/// ### Example
/// ```
/// # use argbind_builder as argbind;
/// use argbind::{OptionDefinition, Parser, Scalar, Toggle};
///
/// let mut name = String::default();
/// let mut verbose = false;
/// let mut parser = Parser::new("program");
/// parser
///     .add(OptionDefinition::new("name", Scalar::new(&mut name)).position(1))
///     .unwrap()
///     .add(OptionDefinition::new("verbose", Toggle::new(&mut verbose)).alias("v"))
///     .unwrap();
///
/// parser.parse_tokens(&["world", "-v"]).unwrap();
///
/// assert_eq!(name, "world");
/// assert!(verbose);
/// ```
pub struct Parser<'a> {
    program: String,
    about: Option<String>,
    settings: Settings,
    registrar: Registrar<'a>,
    listeners: Vec<ValueListener<'a>>,
}

impl<'a> Parser<'a> {
    /// Create a parser with the default [`Settings`].
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            about: None,
            settings: Settings::default(),
            registrar: Registrar::default(),
            listeners: Vec::default(),
        }
    }

    /// Document the program.
    /// If repeated, only the final message applies.
    pub fn about(mut self, description: impl Into<String>) -> Self {
        self.about.replace(description.into());
        self
    }

    /// Replace the token syntax.
    ///
    /// ### Example
    /// ```
    /// # use argbind_builder as argbind;
    /// use argbind::{OptionDefinition, Parser, Scalar, Settings};
    ///
    /// let mut size: u32 = 0;
    /// let mut parser = Parser::new("program").settings(Settings::default().prefixes(["/"]));
    /// parser
    ///     .add(OptionDefinition::new("size", Scalar::new(&mut size)))
    ///     .unwrap();
    ///
    /// parser.parse_tokens(&["/size:3"]).unwrap();
    /// assert_eq!(size, 3);
    /// ```
    pub fn settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Add an option.
    pub fn add(
        &mut self,
        definition: OptionDefinition<'a>,
    ) -> Result<&mut Self, InitializationError> {
        self.registrar.add(definition)?;
        Ok(self)
    }

    /// Add a batch of options, all or nothing.
    pub fn add_range(
        &mut self,
        definitions: impl IntoIterator<Item = OptionDefinition<'a>>,
    ) -> Result<&mut Self, InitializationError> {
        self.registrar.add_range(definitions)?;
        Ok(self)
    }

    /// Register the container `C`, whose populated instance is available from the [`ParseResult`].
    pub fn register<C: Container>(&mut self) -> Result<&mut Self, InitializationError> {
        self.registrar.register::<C>()?;
        Ok(self)
    }

    /// Observe every value bound while parsing, as `(option name, value)`.
    ///
    /// Fires once per value, in command line order, including for options registered while parsing.
    pub fn on_value_parsed(&mut self, listener: impl FnMut(&str, &ValueSet) + 'a) -> &mut Self {
        self.listeners.push(Box::new(listener));
        self
    }

    /// Observe every option added to this parser from now on.
    ///
    /// The listener runs while the option is being added, so it must not add options itself.
    pub fn on_option_added(
        &mut self,
        listener: impl FnMut(&OptionDefinition<'a>) + 'a,
    ) -> &mut Self {
        self.registrar.registry().borrow_mut().subscribe(listener);
        self
    }

    /// The handle through which options are registered.
    pub fn registrar(&self) -> &Registrar<'a> {
        &self.registrar
    }

    /// Render the help message for the options registered so far, sized to the attached terminal.
    pub fn short_help(&self) -> String {
        let registry = self.registrar.registry().borrow();
        Printer::terminal(&self.settings, registry.options().iter().map(|option| &**option))
            .render(&self.program, self.about.as_deref())
    }

    #[cfg(test)]
    fn help(&self, terminal_width: Option<usize>) -> String {
        let registry = self.registrar.registry().borrow();
        Printer::new(
            &self.settings,
            registry.options().iter().map(|option| &**option),
            terminal_width,
        )
        .render(&self.program, self.about.as_deref())
    }

    /// Parse the command line tokens, binding every value to its destination.
    ///
    /// ### Example
    /// ```
    /// # use argbind_builder as argbind;
    /// use argbind::{Collection, OptionDefinition, Parser};
    ///
    /// let mut items: Vec<u32> = Vec::default();
    /// let mut parser = Parser::new("program");
    /// parser
    ///     .add(OptionDefinition::new("items", Collection::new(&mut items)))
    ///     .unwrap();
    ///
    /// parser.parse_tokens(&["-items", "1", "2", "3"]).unwrap();
    /// assert_eq!(items, vec![1, 2, 3]);
    /// ```
    pub fn parse_tokens(self, tokens: &[&str]) -> Result<ParseResult, ParseError> {
        let Self {
            settings,
            registrar,
            mut listeners,
            ..
        } = self;

        {
            let resolver = Resolver::new(
                registrar.registry().clone(),
                &settings,
                tokens.iter().copied(),
            );
            Binder::new(&registrar, &settings, &mut listeners).bind(resolver)?;
        }

        let containers = registrar.take_containers();
        // The registry holds the other references to each container; release them before handing over.
        drop(listeners);
        drop(registrar);
        Ok(ParseResult::new(containers))
    }

    /// Parse the process' command line arguments (skipping the program name).
    pub fn parse(self) -> Result<ParseResult, ParseError> {
        let arguments: Vec<String> = env::args().skip(1).collect();
        let tokens: Vec<&str> = arguments.iter().map(String::as_str).collect();
        self.parse_tokens(tokens.as_slice())
    }

    /// Resolve the command line tokens without binding them.
    ///
    /// Since nothing is bound, no options are registered along the way.
    #[cfg(feature = "unit_test")]
    pub fn resolve_tokens(&self, tokens: &[&str]) -> Result<Vec<Token>, ResolveError> {
        Resolver::new(
            self.registrar.registry().clone(),
            &self.settings,
            tokens.iter().copied(),
        )
        .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{Collection, ContainerHandle, Delegate, Optional, Scalar, Toggle};
    use crate::matcher::ResolveError;
    use crate::parser::{BindError, ResultError};
    use crate::test::{assert_contains, BlackHole};

    #[derive(Debug, Default, PartialEq)]
    struct Transfer {
        source: String,
        destinations: Vec<String>,
        force: bool,
        mode: Option<u32>,
    }

    impl Container for Transfer {
        fn options<'a>(handle: &ContainerHandle<Self>) -> Vec<OptionDefinition<'a>> {
            vec![
                handle.scalar("source", |c| &mut c.source).position(1).required(),
                handle
                    .collection("destinations", |c| &mut c.destinations)
                    .position(2),
                handle.toggle("force", |c| &mut c.force).alias("f"),
                handle.optional("mode", |c| &mut c.mode),
            ]
        }
    }

    #[test]
    fn parse_empty() {
        let parser = Parser::new("program");
        let result = parser.parse_tokens(&[]).unwrap();
        assert!(!result.contains::<Transfer>());
    }

    #[test]
    fn parse_container() {
        // Setup
        let mut parser = Parser::new("program");
        parser.register::<Transfer>().unwrap();

        // Execute
        let mut result = parser
            .parse_tokens(&["a.txt", "b.txt", "c.txt", "-F", "--mode=644"])
            .unwrap();

        // Verify
        assert_eq!(
            result.take::<Transfer>().unwrap(),
            Transfer {
                source: "a.txt".to_string(),
                destinations: vec!["b.txt".to_string(), "c.txt".to_string()],
                force: true,
                mode: Some(644),
            }
        );
    }

    #[test]
    fn parse_container_by_name() {
        // Setup
        let mut parser = Parser::new("program");
        parser.register::<Transfer>().unwrap();

        // Execute
        let result = parser
            .parse_tokens(&["-SOURCE", "a.txt", "-force-", "-destinations"])
            .unwrap();

        // Verify
        let copy = result.get::<Transfer>().unwrap();
        assert_eq!(copy.source, "a.txt");
        assert!(copy.destinations.is_empty());
        assert!(!copy.force);
        assert_eq!(copy.mode, None);
    }

    #[test]
    fn parse_required_missing() {
        // Setup
        let mut a: u32 = 0;
        let mut parser = Parser::new("program");
        parser
            .add(OptionDefinition::new("a", Scalar::new(&mut a)).required())
            .unwrap();

        // Execute
        let error = parser.parse_tokens(&[]).unwrap_err();

        // Verify
        assert_eq!(
            error.to_string(),
            "The following option(s) are required, but were not given: [a]."
        );
    }

    #[test]
    fn parse_empty_assignment() {
        // Setup
        let mut a = "initial".to_string();
        let mut parser = Parser::new("program");
        parser
            .add(OptionDefinition::new("a", Scalar::new(&mut a)).required())
            .unwrap();

        // Execute
        parser.parse_tokens(&["-a="]).unwrap();

        // Verify
        assert_eq!(a, "");
    }

    #[test]
    fn parse_missing_value() {
        // Setup
        let mut a = String::default();
        let mut parser = Parser::new("program");
        parser
            .add(OptionDefinition::new("a", Scalar::new(&mut a)))
            .unwrap();

        // Execute
        let error = parser.parse_tokens(&["-a"]).unwrap_err();

        // Verify
        assert_eq!(
            error,
            ParseError::Resolve(ResolveError::MissingValue("a".to_string()))
        );
    }

    #[test]
    fn parse_conversion_error() {
        // Setup
        let mut count: u8 = 0;
        let mut parser = Parser::new("program");
        parser
            .add(OptionDefinition::new("count", Scalar::new(&mut count)).position(1))
            .unwrap();

        // Execute
        let error = parser.parse_tokens(&["256"]).unwrap_err();

        // Verify
        assert_matches!(error, ParseError::Bind(BindError::Conversion { .. }));
        assert_eq!(error.to_string(), "Could not parse value '256' to type u8.");
    }

    #[test]
    fn parse_dynamic_registration() {
        // Setup
        let mut level: u32 = 0;
        let mut parser = Parser::new("program");
        parser
            .add(OptionDefinition::new(
                "plugin",
                Delegate::new(|name: String, registrar| {
                    registrar.add(OptionDefinition::new(name, BlackHole::default()))
                }),
            ))
            .unwrap()
            .add(OptionDefinition::new("level", Scalar::new(&mut level)))
            .unwrap();

        // Execute
        parser
            .parse_tokens(&["-plugin", "extra", "-extra", "value", "-level", "2"])
            .unwrap();

        // Verify
        assert_eq!(level, 2);
    }

    #[test]
    fn parse_dynamic_toggle() {
        // Setup
        let mut seen: Vec<String> = Vec::default();

        {
            let mut parser = Parser::new("program");
            parser
                .add(OptionDefinition::new(
                    "enable",
                    Delegate::flag(|enabled, registrar| {
                        assert!(enabled);
                        registrar.add(OptionDefinition::new("late", BlackHole::default()))
                    }),
                ))
                .unwrap()
                .on_value_parsed(|name, _| seen.push(name.to_string()));

            // Execute
            parser.parse_tokens(&["-enable", "-late", "5"]).unwrap();
        }

        // Verify
        assert_eq!(seen, vec!["enable", "late"]);
    }

    #[test]
    fn parse_dynamic_duplicate() {
        // Setup
        let mut parser = Parser::new("program");
        parser
            .add(OptionDefinition::new(
                "add",
                Delegate::new(|_: u32, registrar| {
                    registrar.add(OptionDefinition::new("add", BlackHole::default()))
                }),
            ))
            .unwrap();

        // Execute
        let error = parser.parse_tokens(&["-add", "1"]).unwrap_err();

        // Verify
        assert_matches!(error, ParseError::Initialization(_));
        assert_eq!(
            error.to_string(),
            "The following names or aliases are not unique: [add]."
        );
    }

    #[test]
    fn parse_dynamic_container() {
        // Setup
        let mut parser = Parser::new("program");
        parser
            .add(OptionDefinition::new(
                "copy",
                Delegate::flag(|_, registrar| registrar.register::<Transfer>()),
            ))
            .unwrap();

        // Execute
        let mut result = parser
            .parse_tokens(&["-copy", "-source", "x", "-destinations", "y", "z"])
            .unwrap();

        // Verify
        let copy = result.take::<Transfer>().unwrap();
        assert_eq!(copy.source, "x");
        assert_eq!(copy.destinations, vec!["y", "z"]);
    }

    #[test]
    fn parse_shared_registrar() {
        // Setup
        let mut parser = Parser::new("program");
        parser.register::<Transfer>().unwrap();
        let registrar = parser.registrar().clone();

        // Execute
        let mut result = parser.parse_tokens(&["a"]).unwrap();

        // Verify
        assert_eq!(
            result.take::<Transfer>().unwrap_err(),
            ResultError::Shared(std::any::type_name::<Transfer>().to_string())
        );
        drop(registrar);
        assert_eq!(result.take::<Transfer>().unwrap().source, "a");
    }

    #[test]
    fn on_value_parsed() {
        // Setup
        let mut seen: Vec<String> = Vec::default();
        let mut items: Vec<u32> = Vec::default();
        let mut label: Option<String> = None;

        {
            let mut parser = Parser::new("program");
            parser
                .add(OptionDefinition::new("items", Collection::new(&mut items)))
                .unwrap()
                .add(OptionDefinition::new("label", Optional::new(&mut label)))
                .unwrap()
                .on_value_parsed(|name, value_set| {
                    seen.push(format!("{name}:{t}", t = value_set.declared_type()))
                });

            // Execute
            parser
                .parse_tokens(&["-items", "1", "2", "-label", "x"])
                .unwrap();
        }

        // Verify
        assert_eq!(
            seen,
            vec![
                "items:u32",
                "items:u32",
                "label:alloc::string::String"
            ]
        );
        assert_eq!(items, vec![1, 2]);
        assert_eq!(label, Some("x".to_string()));
    }

    #[test]
    fn on_option_added() {
        // Setup
        let mut added: Vec<String> = Vec::default();

        {
            let mut parser = Parser::new("program");
            parser
                .add(OptionDefinition::new("before", BlackHole::default()))
                .unwrap()
                .on_option_added(|option| added.push(option.name().to_string()))
                .add(OptionDefinition::new(
                    "after",
                    Delegate::new(|name: String, registrar| {
                        registrar.add(OptionDefinition::new(name, BlackHole::default()))
                    }),
                ))
                .unwrap();

            // Execute
            parser.parse_tokens(&["-after", "dynamic"]).unwrap();
        }

        // Verify
        assert_eq!(added, vec!["after", "dynamic"]);
    }

    #[test]
    fn add_invalid() {
        // Setup
        let mut parser = Parser::new("program");
        parser
            .add(OptionDefinition::new("a", BlackHole::default()).position(1))
            .unwrap();

        // Execute
        let error = parser
            .add(OptionDefinition::new("b", BlackHole::default()).position(3))
            .err()
            .unwrap();

        // Verify
        assert_eq!(
            error,
            InitializationError::PositionGap {
                found: 3,
                expected: 2
            }
        );
        assert!(!parser.registrar().contains_option("b"));
    }

    #[test]
    fn help() {
        // Setup
        let mut verbose = false;
        let mut parser = Parser::new("program").about("Copies things.");
        parser
            .add(
                OptionDefinition::new("verbose", Toggle::new(&mut verbose))
                    .help("Print more."),
            )
            .unwrap()
            .register::<Transfer>()
            .unwrap();

        // Execute
        let message = parser.help(None);

        // Verify
        assert_eq!(
            message,
            r#"usage: program [-verbose] [-force] [-mode MODE] SOURCE [DESTINATIONS ...]

Copies things.

positional options:
 SOURCE                             String   required
 [DESTINATIONS ...]                 String

named options:
 -verbose             Print more.   bool
 -force, -f                         bool
 -mode MODE                         u32"#
        );
    }

    #[test]
    fn short_help() {
        let mut parser = Parser::new("program");
        parser.register::<Transfer>().unwrap();
        let message = parser.short_help();
        assert_contains!(message, "usage: program");
        assert_contains!(message, "-force, -f");
        assert_contains!(message, "[DESTINATIONS ...]");
    }

    #[cfg(feature = "unit_test")]
    #[test]
    fn resolve_tokens() {
        // Setup
        let mut parser = Parser::new("program");
        parser.register::<Transfer>().unwrap();

        // Execute
        let tokens = parser.resolve_tokens(&["a", "b", "-f"]).unwrap();

        // Verify
        assert_eq!(
            tokens,
            vec![
                Token::Option("source".to_string()),
                Token::Value("a".to_string()),
                Token::Option("destinations".to_string()),
                Token::Value("b".to_string()),
                Token::Option("force".to_string()),
                Token::Value(crate::TOGGLE_BOOLEAN.to_string()),
            ]
        );
    }
}
