/// The reserved value meaning "no explicit value was given for a boolean option; flip it".
pub const TOGGLE_BOOLEAN: &str = "__TOGGLE_BOOLEAN__";

pub(crate) const DEFAULT_PREFIXES: [&str; 2] = ["-", "--"];
pub(crate) const DEFAULT_ASSIGNMENTS: [char; 2] = ['=', ':'];
pub(crate) const DEFAULT_SHORT_BOOLEANS: [(&str, bool); 2] = [("+", true), ("-", false)];

pub(crate) const USAGE: &str = "usage:";
pub(crate) const POSITIONAL_HEADING: &str = "positional options:";
pub(crate) const NAMED_HEADING: &str = "named options:";
pub(crate) const REQUIRED_MARKER: &str = "required";
