use fractic_server_error::ServerError;

use crate::entities::{
    ColumnAlign, DocumentFormat, Field, Page, PrintableDocument, Section, TableColumn, TableRow,
};

use super::document_renderer::DocumentRenderer;

const LABEL_WIDTH: usize = 14;
const PAGE_SEPARATOR: &str = "\x0c\n";

/// Monospace rendering of a document. Output depends only on the document and
/// the line width, which makes it suitable for golden files.
pub struct TextRenderer {
    width: usize,
}

impl TextRenderer {
    pub fn new(width: usize) -> Self {
        Self { width }
    }

    pub fn render_to_string(&self, doc: &PrintableDocument) -> String {
        let mut output = String::new();
        for (i, page) in doc.pages.iter().enumerate() {
            if i > 0 {
                output.push_str(PAGE_SEPARATOR);
            }
            self.print_page(&mut output, page);
        }
        output
    }

    fn print_page(&self, output: &mut String, page: &Page) {
        for section in &page.sections {
            match section {
                Section::Header {
                    organization,
                    tagline,
                    title,
                    fields,
                } => {
                    self.push_centered(output, organization);
                    if let Some(tagline) = tagline {
                        self.push_centered(output, tagline);
                    }
                    self.push_rule(output, '=');
                    self.push_centered(output, title);
                    self.push_rule(output, '-');
                    self.print_fields(output, fields, "");
                }
                Section::Block { heading, fields } => {
                    output.push_str(heading);
                    output.push('\n');
                    self.print_fields(output, fields, "  ");
                }
                Section::Table { columns, rows } => self.print_table(output, columns, rows),
                Section::Highlight { label, value } => {
                    let inner = self.width.saturating_sub(4);
                    let gap = inner.saturating_sub(char_len(label) + char_len(value)).max(1);
                    output.push_str(&format!("+{}+\n", "-".repeat(self.width.saturating_sub(2))));
                    output.push_str(&format!("| {}{}{} |\n", label, " ".repeat(gap), value));
                    output.push_str(&format!("+{}+\n", "-".repeat(self.width.saturating_sub(2))));
                }
                Section::Signatures { zones } => self.print_signatures(output, zones),
                Section::Footer { lines } => {
                    self.push_rule(output, '-');
                    for line in lines {
                        self.push_centered(output, line);
                    }
                    continue;
                }
            }
            output.push('\n');
        }
    }

    fn print_fields(&self, output: &mut String, fields: &[Field], indent: &str) {
        let value_width = self
            .width
            .saturating_sub(indent.len() + LABEL_WIDTH + 3)
            .max(10);
        let continuation = " ".repeat(indent.len() + LABEL_WIDTH + 3);
        for field in fields {
            let wrapped = textwrap::wrap(&field.value, value_width);
            let first = wrapped.first().map(|l| l.to_string()).unwrap_or_default();
            output.push_str(&format!(
                "{}{} : {}\n",
                indent,
                pad_right(&field.label, LABEL_WIDTH),
                first
            ));
            for line in wrapped.iter().skip(1) {
                output.push_str(&format!("{}{}\n", continuation, line));
            }
        }
    }

    fn print_table(&self, output: &mut String, columns: &[TableColumn], rows: &[TableRow]) {
        // One space between columns.
        let usable = self.width.saturating_sub(columns.len().saturating_sub(1));
        let widths: Vec<usize> = columns
            .iter()
            .map(|c| (usable * c.width_pct as usize / 100).max(3))
            .collect();

        let header: Vec<String> = columns.iter().map(|c| c.title.clone()).collect();
        self.print_table_row(output, columns, &widths, &header);
        self.push_rule(output, '-');
        for row in rows {
            self.print_table_row(output, columns, &widths, &row.cells);
        }
    }

    fn print_table_row(
        &self,
        output: &mut String,
        columns: &[TableColumn],
        widths: &[usize],
        cells: &[String],
    ) {
        let wrapped: Vec<Vec<String>> = widths
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                textwrap::wrap(cell, *w)
                    .into_iter()
                    .map(|l| l.into_owned())
                    .collect()
            })
            .collect();
        let height = wrapped.iter().map(Vec::len).max().unwrap_or(0).max(1);
        for line in 0..height {
            let parts: Vec<String> = wrapped
                .iter()
                .zip(columns.iter().zip(widths))
                .map(|(cell_lines, (column, w))| {
                    let text = cell_lines.get(line).map(String::as_str).unwrap_or("");
                    match column.align {
                        ColumnAlign::Left => pad_right(text, *w),
                        ColumnAlign::Right => pad_left(text, *w),
                    }
                })
                .collect();
            output.push_str(parts.join(" ").trim_end());
            output.push('\n');
        }
    }

    fn print_signatures(&self, output: &mut String, zones: &[String]) {
        if zones.is_empty() {
            return;
        }
        let zone_width = self.width / zones.len();
        let line_width = zone_width.saturating_sub(4).max(4);
        let row = |cells: Vec<String>| -> String {
            cells
                .iter()
                .map(|c| pad_right(c, zone_width))
                .collect::<String>()
                .trim_end()
                .to_string()
        };
        output.push_str(&row(zones.to_vec()));
        output.push_str("\n\n\n");
        output.push_str(&row(zones.iter().map(|_| "_".repeat(line_width)).collect()));
        output.push('\n');
    }

    fn push_rule(&self, output: &mut String, c: char) {
        output.push_str(&c.to_string().repeat(self.width));
        output.push('\n');
    }

    fn push_centered(&self, output: &mut String, s: &str) {
        let len = char_len(s);
        let left = self.width.saturating_sub(len) / 2;
        output.push_str(&format!("{}{}\n", " ".repeat(left), s));
    }
}

impl DocumentRenderer for TextRenderer {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Text
    }

    fn render(&self, doc: &PrintableDocument) -> Result<Vec<u8>, ServerError> {
        tracing::debug!(title = %doc.title, pages = doc.pages.len(), "rendering text document");
        Ok(self.render_to_string(doc).into_bytes())
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn pad_right(s: &str, width: usize) -> String {
    format!("{}{}", s, " ".repeat(width.saturating_sub(char_len(s))))
}

fn pad_left(s: &str, width: usize) -> String {
    format!("{}{}", " ".repeat(width.saturating_sub(char_len(s))), s)
}

#[cfg(test)]
mod tests {
    use crate::entities::{DocumentBuilder, PageSize, RowKind};

    use super::*;

    const PAGE: PageSize = PageSize {
        width_mm: 148.0,
        height_mm: 210.0,
    };

    #[test]
    fn highlight_is_boxed_to_line_width() {
        let doc = DocumentBuilder::new("t", PAGE)
            .section(Section::Highlight {
                label: "MONTANT".into(),
                value: "15 000 MRU".into(),
            })
            .build();
        let text = TextRenderer::new(40).render_to_string(&doc);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], format!("+{}+", "-".repeat(38)));
        assert_eq!(lines[1], format!("| MONTANT{}15 000 MRU |", " ".repeat(19)));
        assert_eq!(lines[1].chars().count(), 40);
    }

    #[test]
    fn long_field_values_wrap_under_the_value_column() {
        let doc = DocumentBuilder::new("t", PAGE)
            .section(Section::Block {
                heading: "Détails".into(),
                fields: vec![Field::new(
                    "Motif",
                    "paiement des frais de manutention et de magasinage du conteneur",
                )],
            })
            .build();
        let text = TextRenderer::new(50).render_to_string(&doc);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Détails");
        assert!(lines[1].starts_with(&format!("  {:<14} : paiement", "Motif")));
        assert!(lines[2].starts_with(&" ".repeat(19)));
        assert!(lines.iter().all(|l| l.chars().count() <= 50));
    }

    #[test]
    fn table_right_aligns_amount_columns() {
        let doc = DocumentBuilder::new("t", PAGE)
            .section(Section::Table {
                columns: vec![
                    TableColumn::new("A", 50, ColumnAlign::Left),
                    TableColumn::new("B", 50, ColumnAlign::Right),
                ],
                rows: vec![TableRow {
                    kind: RowKind::Item,
                    cells: vec!["x".into(), "10 MRU".into()],
                }],
            })
            .build();
        let text = TextRenderer::new(41).render_to_string(&doc);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[2], format!("x{}10 MRU", " ".repeat(34)));
    }

    #[test]
    fn pages_are_separated_by_form_feed() {
        let doc = DocumentBuilder::new("t", PAGE)
            .section(Section::Footer { lines: vec!["a".into()] })
            .page_break()
            .section(Section::Footer { lines: vec!["b".into()] })
            .build();
        let text = TextRenderer::new(40).render_to_string(&doc);
        assert_eq!(text.matches('\x0c').count(), 1);
    }
}
