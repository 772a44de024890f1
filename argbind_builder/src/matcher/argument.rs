use crate::model::Settings;

#[cfg(feature = "tracing_debug")]
use tracing::debug;

/// A single raw token, split into its option name and value parts.
///
/// `Some("")` (an explicitly empty value, ex: `-name=`) is distinct from `None` (no value at all, ex: `-name`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Argument {
    name: Option<String>,
    value: Option<String>,
}

impl Argument {
    fn bare(token: &str) -> Self {
        Self {
            name: None,
            value: Some(token.to_string()),
        }
    }

    fn named(name: &str, value: Option<&str>) -> Self {
        Self {
            name: Some(name.to_string()),
            value: value.map(str::to_string),
        }
    }

    pub(crate) fn into_parts(self) -> (Option<String>, Option<String>) {
        (self.name, self.value)
    }
}

#[cfg(test)]
impl Argument {
    fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }
}

/// Split a raw token according to the token syntax in `settings`.
pub(crate) fn split(token: &str, settings: &Settings) -> Argument {
    let argument = split_inner(token, settings);
    #[cfg(feature = "tracing_debug")]
    {
        debug!("Split '{token}' into {argument:?}.");
    }
    argument
}

fn split_inner(token: &str, settings: &Settings) -> Argument {
    // Only one prefix is stripped: `-/-x` names the option `/-x`.
    let remainder = match settings
        .matching_prefixes()
        .into_iter()
        .find_map(|prefix| token.strip_prefix(prefix))
    {
        Some(remainder) if !remainder.is_empty() => remainder,
        _ => return Argument::bare(token),
    };

    if let Some((index, assignment)) = remainder
        .char_indices()
        .find(|(_, c)| settings.is_assignment(*c))
    {
        // An assignment with no name before it escapes the whole token: `-:value` is a value.
        if index == 0 {
            return Argument::bare(token);
        }

        let (name, value) = remainder.split_at(index);
        return Argument::named(name, Some(&value[assignment.len_utf8()..]));
    }

    if let Some(suffix) = settings
        .short_boolean_suffixes()
        .find(|suffix| remainder.ends_with(suffix))
    {
        // Nothing but a suffix leaves no name, only the suffix as a value.
        if remainder.len() == suffix.len() {
            return Argument::bare(suffix);
        }

        let name = &remainder[..remainder.len() - suffix.len()];
        return Argument::named(name, Some(suffix));
    }

    Argument::named(remainder, None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn windows() -> Settings {
        Settings::default()
            .prefixes(["/"])
            .assignments([':'])
            .short_booleans([("+", true)])
    }

    #[rstest]
    #[case("-name", Some("name"), None)]
    #[case("--name", Some("name"), None)]
    #[case("-name=", Some("name"), Some(""))]
    #[case("-name=value", Some("name"), Some("value"))]
    #[case("-name:value", Some("name"), Some("value"))]
    #[case("--name=a=b", Some("name"), Some("a=b"))]
    #[case("-name:a=b", Some("name"), Some("a=b"))]
    #[case("-name=a b c", Some("name"), Some("a b c"))]
    #[case("-name+", Some("name"), Some("+"))]
    #[case("-name-", Some("name"), Some("-"))]
    #[case("--name-", Some("name"), Some("-"))]
    #[case("-a-b", Some("a-b"), None)]
    #[case("-/-x", Some("/-x"), None)]
    #[case("---x", Some("-x"), None)]
    #[case("-é=ü", Some("é"), Some("ü"))]
    #[case("value", None, Some("value"))]
    #[case("", None, Some(""))]
    #[case("-", None, Some("-"))]
    #[case("--", None, Some("--"))]
    #[case("-:value", None, Some("-:value"))]
    #[case("--=value", None, Some("--=value"))]
    #[case("-=", None, Some("-="))]
    #[case("-+", None, Some("+"))]
    #[case("--+", None, Some("+"))]
    #[case("---", None, Some("-"))]
    #[case("/name", None, Some("/name"))]
    fn split_default(
        #[case] token: &str,
        #[case] expected_name: Option<&str>,
        #[case] expected_value: Option<&str>,
    ) {
        // Setup
        let settings = Settings::default();

        // Execute
        let argument = split(token, &settings);

        // Verify
        assert_eq!(argument.name(), expected_name);
        assert_eq!(argument.value(), expected_value);
    }

    #[rstest]
    #[case("/name", Some("name"), None)]
    #[case("/name:value", Some("name"), Some("value"))]
    #[case("/name=value", Some("name=value"), None)]
    #[case("/name+", Some("name"), Some("+"))]
    #[case("/name-", Some("name-"), None)]
    #[case("-name", None, Some("-name"))]
    #[case("/:x", None, Some("/:x"))]
    #[case("/+", None, Some("+"))]
    fn split_configured(
        #[case] token: &str,
        #[case] expected_name: Option<&str>,
        #[case] expected_value: Option<&str>,
    ) {
        let argument = split(token, &windows());
        assert_eq!(argument.name(), expected_name);
        assert_eq!(argument.value(), expected_value);
    }

    #[rstest]
    #[case("-name=value")]
    #[case("-name")]
    #[case("value")]
    #[case("")]
    fn split_unconfigured(#[case] token: &str) {
        // Setup
        let settings = Settings::default()
            .prefixes(Vec::<String>::default())
            .assignments([])
            .short_booleans(Vec::<(String, bool)>::default());

        // Execute
        let argument = split(token, &settings);

        // Verify
        assert_eq!(argument.name(), None);
        assert_eq!(argument.value(), Some(token));
    }

    #[test]
    fn split_empty_value_distinct() {
        let settings = Settings::default();
        let assigned = split("-name=", &settings);
        let absent = split("-name", &settings);
        assert_eq!(assigned.name(), absent.name());
        assert_ne!(assigned, absent);
        assert_eq!(
            assigned.into_parts(),
            (Some("name".to_string()), Some("".to_string()))
        );
        assert_eq!(absent.into_parts(), (Some("name".to_string()), None));
    }
}
