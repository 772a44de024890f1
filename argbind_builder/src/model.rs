use crate::constant::*;

/// The token syntax recognized by the parser.
///
/// Each aspect may be configured independently, including emptied out entirely.
/// ```
/// # use argbind_builder as argbind;
/// use argbind::Settings;
///
/// // Windows flavoured syntax: `/name:value`, `/flag+`.
/// let settings = Settings::default()
///     .prefixes(["/"])
///     .assignments([':'])
///     .short_booleans([("+", true)]);
/// assert_eq!(settings.display_prefix(), "/");
/// assert_eq!(settings.short_boolean("+"), Some(true));
/// assert_eq!(settings.short_boolean("-"), None);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    prefixes: Vec<String>,
    assignments: Vec<char>,
    short_booleans: Vec<(String, bool)>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            prefixes: DEFAULT_PREFIXES.iter().map(|p| p.to_string()).collect(),
            assignments: DEFAULT_ASSIGNMENTS.to_vec(),
            short_booleans: DEFAULT_SHORT_BOOLEANS
                .iter()
                .map(|(suffix, value)| (suffix.to_string(), *value))
                .collect(),
        }
    }
}

impl Settings {
    /// Replace the option name prefixes (default: `-`, `--`).
    ///
    /// The first prefix is used when displaying options.
    /// Matching always prefers the longest prefix.
    pub fn prefixes<S: Into<String>>(mut self, prefixes: impl IntoIterator<Item = S>) -> Self {
        self.prefixes = prefixes
            .into_iter()
            .map(|prefix| -> String { prefix.into() })
            .filter(|prefix| !prefix.is_empty())
            .collect();
        self
    }

    /// Replace the name/value assignment characters (default: `=`, `:`).
    pub fn assignments(mut self, assignments: impl IntoIterator<Item = char>) -> Self {
        self.assignments = assignments.into_iter().collect();
        self
    }

    /// Replace the short-boolean suffixes (default: `+` for true, `-` for false).
    pub fn short_booleans<S: Into<String>>(
        mut self,
        short_booleans: impl IntoIterator<Item = (S, bool)>,
    ) -> Self {
        self.short_booleans = short_booleans
            .into_iter()
            .map(|(suffix, value)| -> (String, bool) { (suffix.into(), value) })
            .filter(|(suffix, _)| !suffix.is_empty())
            .collect();
        self
    }

    /// The prefixes, longest first.
    pub(crate) fn matching_prefixes(&self) -> Vec<&str> {
        let mut prefixes: Vec<&str> = self.prefixes.iter().map(String::as_str).collect();
        // Stable, so equal length prefixes keep their declared order.
        prefixes.sort_by(|a, b| b.len().cmp(&a.len()));
        prefixes
    }

    /// Whether `c` separates an option name from its value.
    pub(crate) fn is_assignment(&self, c: char) -> bool {
        self.assignments.contains(&c)
    }

    /// The short-boolean suffixes, in declared order.
    pub(crate) fn short_boolean_suffixes(&self) -> impl Iterator<Item = &str> {
        self.short_booleans.iter().map(|(suffix, _)| suffix.as_str())
    }

    /// The boolean meaning of a short-boolean suffix, if `value` is one.
    pub fn short_boolean(&self, value: &str) -> Option<bool> {
        self.short_booleans
            .iter()
            .find(|(suffix, _)| suffix == value)
            .map(|(_, b)| *b)
    }

    /// The prefix used to display option names (empty when no prefixes are configured).
    pub fn display_prefix(&self) -> &str {
        self.prefixes.first().map(String::as_str).unwrap_or("")
    }
}
