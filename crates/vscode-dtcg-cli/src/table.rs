//! Plain-text summary table.
//!
//! ```text
//! source  tokens  skipped lines  non-color  missing
//! dark       412              0         31       12
//! light      398              2         31       26
//! ```
//!
//! Widths are measured with ANSI codes ignored, so styled cells line up.
//! Styling is dropped automatically when stdout is not a terminal.

use console::{measure_text_width, pad_str, Alignment, Style};
use unicode_width::UnicodeWidthChar;

/// Widest a source name may be before it is truncated.
const MAX_NAME_WIDTH: usize = 40;
const ELLIPSIS: &str = "…";
const GAP: &str = "  ";

/// One row of the summary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryRow {
    pub source: String,
    pub tokens: usize,
    pub skipped_lines: usize,
    pub non_color: usize,
    /// Placeholders filled in by the union, if it ran.
    pub missing: Option<usize>,
}

struct Column {
    header: &'static str,
    align: Alignment,
}

static COLUMNS: [Column; 5] = [
    Column {
        header: "source",
        align: Alignment::Left,
    },
    Column {
        header: "tokens",
        align: Alignment::Right,
    },
    Column {
        header: "skipped lines",
        align: Alignment::Right,
    },
    Column {
        header: "non-color",
        align: Alignment::Right,
    },
    Column {
        header: "missing",
        align: Alignment::Right,
    },
];

/// Renders rows as a table, one line per row plus a header, each ending in
/// a newline. The `missing` column only appears when some row has it.
pub fn render_summary(rows: &[SummaryRow]) -> String {
    let with_missing = rows.iter().any(|row| row.missing.is_some());
    let columns = if with_missing {
        &COLUMNS[..]
    } else {
        &COLUMNS[..4]
    };

    let bold = Style::new().bold();
    let yellow = Style::new().yellow();

    let header: Vec<String> = columns
        .iter()
        .map(|c| bold.apply_to(c.header).to_string())
        .collect();

    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            let mut cells = vec![
                truncate(&row.source, MAX_NAME_WIDTH),
                row.tokens.to_string(),
                row.skipped_lines.to_string(),
                row.non_color.to_string(),
            ];
            if with_missing {
                cells.push(match row.missing {
                    Some(0) => "0".to_string(),
                    Some(n) => yellow.apply_to(n).to_string(),
                    None => "-".to_string(),
                });
            }
            cells
        })
        .collect();

    let widths: Vec<usize> = (0..columns.len())
        .map(|i| {
            std::iter::once(&header)
                .chain(body.iter())
                .map(|cells| measure_text_width(&cells[i]))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    for cells in std::iter::once(&header).chain(body.iter()) {
        let line: Vec<String> = cells
            .iter()
            .zip(columns)
            .zip(&widths)
            .map(|((cell, column), &width)| {
                pad_str(cell, width, column.align, None).into_owned()
            })
            .collect();
        out.push_str(line.join(GAP).trim_end());
        out.push('\n');
    }
    out
}

/// Cuts `s` to at most `max_width` columns, ending in an ellipsis when cut.
fn truncate(s: &str, max_width: usize) -> String {
    if measure_text_width(s) <= max_width {
        return s.to_string();
    }
    let budget = max_width.saturating_sub(measure_text_width(ELLIPSIS));
    let mut result = String::new();
    let mut width = 0;
    for c in s.chars() {
        let char_width = c.width().unwrap_or(0);
        if width + char_width > budget {
            break;
        }
        result.push(c);
        width += char_width;
    }
    result.push_str(ELLIPSIS);
    result
}
