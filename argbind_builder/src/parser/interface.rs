#[cfg(feature = "tracing_debug")]
use tracing::debug;

#[derive(Debug, Clone, Copy)]
pub(crate) struct PaddingWidth(usize);

impl PaddingWidth {
    pub(crate) fn new(width: usize) -> Self {
        // padding must be at least 1
        Self(width.max(1))
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct LeftWidth(usize);

impl LeftWidth {
    pub(crate) fn new(width: usize) -> Self {
        Self(width.max(1))
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct MiddleWidth(usize);

impl MiddleWidth {
    pub(crate) fn new(width: usize) -> Self {
        // middle must be at least 2 (so we can hyphenate)
        Self(width.max(2))
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct RightWidth(usize);

impl RightWidth {
    pub(crate) fn new(width: usize) -> Self {
        Self(width.max(1))
    }

    pub(crate) fn value(&self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct TotalWidth(pub usize);

/// Lays out help rows as a left column, a wrapped middle column, and any number of right columns.
#[derive(Debug)]
pub(crate) struct ColumnRenderer {
    padding: PaddingWidth,
    left: LeftWidth,
    middle: MiddleWidth,
    rights: Vec<RightWidth>,
}

// Target 95% of the total width, so the renderer never literally uses the full line.
const TARGET_TOTAL_FACTOR: f64 = 0.95;

// Assuming an average word length of 5, 17 fits precisely 3 words with a space between them.
pub(crate) const MINIMUM_MIDDLE_WIDTH: usize = 17;

impl ColumnRenderer {
    /// Produce a renderer whose middle column is chosen to fit `total_width`.
    pub(crate) fn guided(
        padding: PaddingWidth,
        left: LeftWidth,
        middle: MiddleWidth,
        rights: Vec<RightWidth>,
        total_width: TotalWidth,
    ) -> Self {
        // There is always a left and a middle, with padding between them.
        let mut non_middle: usize = left.0 + padding.0;

        if !rights.is_empty() {
            non_middle += rights.iter().map(|r| r.0 + padding.0).sum::<usize>();
        }

        let target_total_width = (total_width.0 as f64 * TARGET_TOTAL_FACTOR) as usize;
        let guided_middle = std::cmp::min(middle.0, target_total_width.saturating_sub(non_middle));

        if middle.0 + non_middle <= target_total_width {
            #[cfg(feature = "tracing_debug")]
            {
                debug!(
                    "Columns {non_middle} and middle {m} fit within the target total {target_total_width}.",
                    m = middle.0
                );
            }

            Self::new(padding, left, middle, rights)
        } else if guided_middle >= MINIMUM_MIDDLE_WIDTH {
            #[cfg(feature = "tracing_debug")]
            {
                debug!("Columns {non_middle} fit within the target total {target_total_width}.  Selecting middle: {guided_middle}.");
            }

            Self::new(padding, left, MiddleWidth::new(guided_middle), rights)
        } else {
            let minimum_middle = std::cmp::min(middle.0, MINIMUM_MIDDLE_WIDTH);
            #[cfg(feature = "tracing_debug")]
            {
                debug!(
                    "Columns {non_middle} do not fit within the total {t}.  Selecting middle: {minimum_middle}.",
                    t = total_width.0
                );
            }

            Self::new(padding, left, MiddleWidth::new(minimum_middle), rights)
        }
    }

    pub(crate) fn new(
        padding: PaddingWidth,
        left: LeftWidth,
        middle: MiddleWidth,
        rights: Vec<RightWidth>,
    ) -> Self {
        Self {
            padding,
            left,
            middle,
            rights,
        }
    }

    /// Render a single row, wrapping the middle column onto as many lines as it needs.
    /// Trailing whitespace is removed from every line.
    pub(crate) fn render(
        &self,
        indent: usize,
        left: &str,
        middle: &str,
        rights: &[String],
    ) -> Vec<String> {
        let padding = " ".repeat(self.padding.0);
        let mut right = String::default();

        for (i, item) in rights.iter().enumerate() {
            let width = self.rights.get(i).map(RightWidth::value).unwrap_or(0);
            right.push_str(&padding);
            right.push_str(&format!("{item:width$}"));
        }

        let left_width = self.left.0;
        let middle_width = self.middle.0.saturating_sub(indent).max(2);
        let middle_parts = chunk(middle, middle_width);
        let mut out = Vec::default();

        if middle_parts.is_empty() {
            out.push(format!(
                "{:indent$}{left:left_width$}{padding}{:middle_width$}{right}",
                "", ""
            ));
        }

        for (i, part) in middle_parts.iter().enumerate() {
            if i == 0 {
                out.push(format!(
                    "{:indent$}{left:left_width$}{padding}{part:middle_width$}{right}",
                    ""
                ));
            } else {
                out.push(format!("{:indent$}{:left_width$}{padding}{part}", "", ""));
            }
        }

        out.into_iter()
            .map(|line| line.trim_end().to_string())
            .collect()
    }
}

fn chunk(paragraph: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in paragraph.split_whitespace() {
        if current.is_empty() {
            hyphenate(width, &mut lines, &mut current, word);
        } else if current.chars().count() + word.chars().count() < width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            hyphenate(width, &mut lines, &mut current, word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

fn hyphenate(width: usize, lines: &mut Vec<String>, current: &mut String, word: &str) {
    let increment = width.saturating_sub(1).max(1);
    let characters: Vec<char> = word.chars().collect();
    let mut start = 0;

    while characters.len() - start > width {
        let end = start + increment;
        lines.push(format!("{}-", characters[start..end].iter().collect::<String>()));
        start = end;
    }

    current.extend(&characters[start..]);
}
