//! Plain-text panels and tables for command output.

use nanoslides::{NanoslidesError, NanoslidesErrorKind, ProviderFailure, SlideEntry};
use std::fmt;

const RULE_WIDTH: usize = 80;

/// Print a titled block of lines.
pub fn panel(title: &str, lines: &[String]) {
    println!("{}", format_panel(title, lines));
}

fn format_panel(title: &str, lines: &[String]) -> String {
    let mut out = format!("{}\n{:-<width$}\n", title, "", width = RULE_WIDTH);
    for line in lines {
        out.push_str(line);
        out.push('\n');
    }
    out.push_str(&format!("{:-<width$}", "", width = RULE_WIDTH));
    out
}

/// A titled table with left-aligned columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Table {
    title: String,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

impl Table {
    /// Empty table with column headers.
    pub fn new(title: impl Into<String>, headers: &[&str]) -> Self {
        Self {
            title: title.into(),
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: Vec::new(),
        }
    }

    /// Append a row; missing cells render empty.
    pub fn row<I, S>(&mut self, cells: I) -> &mut Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.rows.push(cells.into_iter().map(Into::into).collect());
        self
    }

    fn widths(&self) -> Vec<usize> {
        self.headers
            .iter()
            .enumerate()
            .map(|(column, header)| {
                self.rows
                    .iter()
                    .filter_map(|row| row.get(column))
                    .map(|cell| cell.chars().count())
                    .chain(std::iter::once(header.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect()
    }
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let widths = self.widths();
        writeln!(f, "{}", self.title)?;
        write_row(f, &widths, &self.headers)?;
        let total = widths.iter().sum::<usize>() + 2 * widths.len().saturating_sub(1);
        writeln!(f, "{:-<width$}", "", width = total)?;
        for row in &self.rows {
            write_row(f, &widths, row)?;
        }
        Ok(())
    }
}

fn write_row(f: &mut fmt::Formatter<'_>, widths: &[usize], cells: &[String]) -> fmt::Result {
    let rendered: Vec<String> = widths
        .iter()
        .enumerate()
        .map(|(column, width)| {
            let cell = cells.get(column).map(String::as_str).unwrap_or("");
            format!("{:<width$}", cell, width = *width)
        })
        .collect();
    writeln!(f, "{}", rendered.join("  ").trim_end())
}

/// Order table for main slides, as shown after reordering commands.
pub fn slide_order_table(title: &str, slides: &[&SlideEntry]) -> Table {
    let mut table = Table::new(title, &["Order", "ID", "Path"]);
    if slides.is_empty() {
        table.row(["-", "(no slides left)", "-"]);
    }
    for slide in slides {
        table.row([slide.order().to_string(), slide.id().clone(), image_label(slide)]);
    }
    table
}

/// Image path of a slide, `-` when it has none.
pub fn image_label(slide: &SlideEntry) -> String {
    slide
        .image_path()
        .as_ref()
        .map(|path| path.display().to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Collapse whitespace and cut `value` to `length` characters.
pub fn truncate(value: &str, length: usize) -> String {
    let cleaned = value.split_whitespace().collect::<Vec<_>>().join(" ");
    if cleaned.chars().count() <= length {
        return cleaned;
    }
    let cut: String = cleaned.chars().take(length.saturating_sub(3)).collect();
    format!("{}...", cut)
}

/// Report a failed command on stderr.
///
/// Provider failures get the classified panel headed by `action`; every
/// other error is a single line.
pub fn failure(error: &NanoslidesError, action: &str) {
    match error.kind() {
        NanoslidesErrorKind::Gemini(_) => {
            let lines = ProviderFailure::classify(error).render_lines(Some(action));
            eprintln!("{}", format_panel("nanoslides", &lines));
        }
        _ => eprintln!("Error: {}", error.message()),
    }
}
