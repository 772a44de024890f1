use terminal_size::{terminal_size, Width};

use crate::api::OptionDefinition;
use crate::constant::*;
use crate::model::Settings;
use crate::parser::{ColumnRenderer, LeftWidth, MiddleWidth, PaddingWidth, RightWidth, TotalWidth};

struct HelpRow {
    position: usize,
    summary: String,
    left: String,
    help: String,
    meta: Vec<String>,
}

impl HelpRow {
    fn new(option: &OptionDefinition<'_>, prefix: &str) -> Self {
        let name_example = option.name().to_ascii_uppercase().replace('-', "_");
        let position = option.position_index();

        let (summary, left) = if position > 0 {
            let grammar = if option.is_collection() {
                format!("[{name_example} ...]")
            } else {
                name_example
            };
            let summary = if option.is_required() || option.is_collection() {
                grammar.clone()
            } else {
                format!("[{grammar}]")
            };
            (summary, grammar)
        } else {
            let grammar = if option.is_boolean() {
                "".to_string()
            } else if option.is_collection() {
                format!(" [{name_example} ...]")
            } else {
                format!(" {name_example}")
            };
            let flags = option
                .identifiers()
                .map(|identifier| format!("{prefix}{identifier}{grammar}"))
                .collect::<Vec<String>>()
                .join(", ");
            let usage = format!("{prefix}{name}{grammar}", name = option.name());
            let summary = if option.is_required() {
                usage
            } else {
                format!("[{usage}]")
            };
            (summary, flags)
        };

        let mut meta = vec![short_type(option.item_type())];
        if option.is_required() {
            meta.push(REQUIRED_MARKER.to_string());
        }

        Self {
            position,
            summary,
            left,
            help: option.description().unwrap_or_default().to_string(),
            meta,
        }
    }
}

/// Renders the usage summary and option tables for a set of definitions.
pub(crate) struct Printer {
    positionals: Vec<HelpRow>,
    named: Vec<HelpRow>,
    terminal_width: Option<usize>,
}

const PADDING_WIDTH: usize = 3;
const MAIN_INDENT: usize = 1;

impl Printer {
    /// A printer sized to the attached terminal, if any.
    pub(crate) fn terminal<'o, 'a: 'o>(
        settings: &Settings,
        options: impl IntoIterator<Item = &'o OptionDefinition<'a>>,
    ) -> Self {
        let terminal_width = if let Some((Width(terminal_width), _)) = terminal_size() {
            Some(terminal_width as usize)
        } else {
            None
        };

        Self::new(settings, options, terminal_width)
    }

    /// A printer for `terminal_width`, where `None` lays out the columns without wrapping.
    pub(crate) fn new<'o, 'a: 'o>(
        settings: &Settings,
        options: impl IntoIterator<Item = &'o OptionDefinition<'a>>,
        terminal_width: Option<usize>,
    ) -> Self {
        let prefix = settings.display_prefix();
        let (mut positionals, named): (Vec<HelpRow>, Vec<HelpRow>) = options
            .into_iter()
            .map(|option| HelpRow::new(option, prefix))
            .partition(|row| row.position > 0);
        positionals.sort_by_key(|row| row.position);

        Self {
            positionals,
            named,
            terminal_width,
        }
    }

    fn rows(&self) -> impl Iterator<Item = &HelpRow> {
        self.named.iter().chain(self.positionals.iter())
    }

    fn column_renderer(&self) -> ColumnRenderer {
        let mut left_column_width = 0;
        let mut middle_column_width = 0;
        let mut right_columns_widths: Vec<RightWidth> = Vec::default();

        for row in self.rows() {
            left_column_width = left_column_width.max(row.left.chars().count());
            middle_column_width = middle_column_width.max(row.help.chars().count() + MAIN_INDENT);

            for (i, m) in row.meta.iter().enumerate() {
                let width = m.chars().count();
                match right_columns_widths.get_mut(i) {
                    Some(right) if right.value() < width => *right = RightWidth::new(width),
                    Some(_) => {}
                    None => right_columns_widths.push(RightWidth::new(width)),
                }
            }
        }

        let padding = PaddingWidth::new(PADDING_WIDTH);
        let left = LeftWidth::new(left_column_width);
        let middle = MiddleWidth::new(middle_column_width);

        match self.terminal_width {
            Some(total_width) => ColumnRenderer::guided(
                padding,
                left,
                middle,
                right_columns_widths,
                TotalWidth(total_width),
            ),
            None => ColumnRenderer::new(padding, left, middle, right_columns_widths),
        }
    }

    /// Render the complete help text (without a trailing newline).
    pub(crate) fn render(&self, program: &str, about: Option<&str>) -> String {
        let column_renderer = self.column_renderer();
        let usage = std::iter::once(program)
            .chain(self.rows().map(|row| row.summary.as_str()))
            .collect::<Vec<&str>>()
            .join(" ");
        let mut lines = vec![format!("{USAGE} {usage}")];

        if let Some(about) = about {
            lines.push("".to_string());
            lines.push(about.to_string());
        }

        for (heading, rows) in [
            (POSITIONAL_HEADING, &self.positionals),
            (NAMED_HEADING, &self.named),
        ] {
            if !rows.is_empty() {
                lines.push("".to_string());
                lines.push(heading.to_string());

                for row in rows {
                    lines.extend(column_renderer.render(
                        MAIN_INDENT,
                        &row.left,
                        &row.help,
                        &row.meta,
                    ));
                }
            }
        }

        lines.join("\n")
    }
}

/// Strip the module paths from a type name: `alloc::vec::Vec<alloc::string::String>` becomes `Vec<String>`.
pub(crate) fn short_type(type_name: &str) -> String {
    let mut out = String::default();
    let mut path = String::default();

    for c in type_name.chars() {
        if c.is_alphanumeric() || c == '_' || c == ':' {
            path.push(c);
        } else {
            out.push_str(path.rsplit("::").next().unwrap_or_default());
            path.clear();
            out.push(c);
        }
    }

    out.push_str(path.rsplit("::").next().unwrap_or_default());
    out
}
