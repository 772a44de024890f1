use crate::api::destination::ValueDestination;
use crate::matcher::fold_case;

/// The declaration of a single option: its names, position, constraints, and where its values go.
///
/// Boolean and collection behaviour is taken from the destination.
///
/// ### Example
/// ```
/// # use argbind_builder as argbind;
/// use argbind::{OptionDefinition, Scalar};
///
/// let mut count: u32 = 0;
/// let definition = OptionDefinition::new("count", Scalar::new(&mut count))
///     .alias("c")
///     .position(1)
///     .required()
///     .help("How many times.");
/// assert_eq!(definition.name(), "count");
/// assert!(definition.matches("C"));
/// assert_eq!(definition.position_index(), 1);
/// ```
pub struct OptionDefinition<'a> {
    name: String,
    aliases: Vec<String>,
    position: usize,
    required: bool,
    boolean: bool,
    collection: bool,
    help: Option<String>,
    destination: Box<dyn ValueDestination<'a> + 'a>,
}

impl<'a> OptionDefinition<'a> {
    /// Create a named option.
    pub fn new(name: impl Into<String>, destination: impl ValueDestination<'a> + 'a) -> Self {
        let boolean = destination.is_boolean();
        let collection = destination.is_collection();
        Self {
            name: name.into(),
            aliases: Vec::default(),
            position: 0,
            required: false,
            boolean,
            collection,
            help: None,
            destination: Box::new(destination),
        }
    }

    /// Add an alternative name.
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Add alternative names.
    pub fn aliases<S: Into<String>>(mut self, aliases: impl IntoIterator<Item = S>) -> Self {
        self.aliases.extend(aliases.into_iter().map(Into::into));
        self
    }

    /// Make the option positional (1-based).
    /// Position 0 means the option may only be given by name.
    pub fn position(mut self, position: usize) -> Self {
        self.position = position;
        self
    }

    /// Require a value to be given.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    /// Document the option.
    pub fn help(mut self, description: impl Into<String>) -> Self {
        self.help = Some(description.into());
        self
    }
}

impl<'a> OptionDefinition<'a> {
    /// The canonical name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The alternative names, in declared order.
    pub fn alias_names(&self) -> &[String] {
        &self.aliases
    }

    /// The 1-based position, or 0 when named-only.
    pub fn position_index(&self) -> usize {
        self.position
    }

    /// Whether the option is required.
    pub fn is_required(&self) -> bool {
        self.required
    }

    /// Whether the option toggles when given without a value.
    pub fn is_boolean(&self) -> bool {
        self.boolean
    }

    /// Whether the option accepts any number of values.
    pub fn is_collection(&self) -> bool {
        self.collection
    }

    /// Whether the option is positional.
    pub fn is_positional(&self) -> bool {
        self.position > 0
    }

    /// The documentation, if any.
    pub fn description(&self) -> Option<&str> {
        self.help.as_deref()
    }

    /// The type name of the values this option converts to.
    pub fn item_type(&self) -> &'static str {
        self.destination.item_type()
    }

    /// The name & aliases, canonical name first.
    pub fn identifiers(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.name.as_str()).chain(self.aliases.iter().map(String::as_str))
    }

    /// Whether `token` names this option (by name or alias, ignoring case).
    pub fn matches(&self, token: &str) -> bool {
        let token = fold_case(token);
        self.identifiers()
            .any(|identifier| fold_case(identifier) == token)
    }

    pub(crate) fn destination(&self) -> &(dyn ValueDestination<'a> + 'a) {
        self.destination.as_ref()
    }
}

impl<'a> std::fmt::Debug for OptionDefinition<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let aliases = if self.aliases.is_empty() {
            "".to_string()
        } else {
            format!(" ({a})", a = self.aliases.join(", "))
        };
        let position = if self.position > 0 {
            format!(", @{p}", p = self.position)
        } else {
            "".to_string()
        };
        let flags = [
            (self.required, ", required"),
            (self.boolean, ", boolean"),
            (self.collection, ", collection"),
        ]
        .iter()
        .filter(|(set, _)| *set)
        .map(|(_, flag)| *flag)
        .collect::<String>();

        write!(
            f,
            "Option[{t}, {name}{aliases}{position}{flags}]",
            t = self.item_type(),
            name = self.name,
        )
    }
}
