use fractic_server_error::ServerError;
use printpdf::{
    BuiltinFont, Color, IndirectFontRef, Mm, PdfDocument, PdfLayerReference, Rgb as PdfRgb,
};

use crate::{
    entities::{
        ColumnAlign, DocumentFormat, DocumentTheme, Field, Page, PageSize, PrintableDocument, Rgb,
        Section, TableColumn, TableRow,
    },
    errors::PdfRenderFailed,
};

use super::document_renderer::DocumentRenderer;

const MARGIN_MM: f32 = 12.0;
const PT_TO_MM: f32 = 0.3528;
/// Average Helvetica glyph width, as a fraction of the font size.
const AVG_GLYPH_EM: f32 = 0.5;
const LABEL_COLUMN_MM: f32 = 36.0;
const FOOTER_PT: f32 = 8.0;
const MAX_FIELD_LINES: usize = 4;
const MAX_CELL_LINES: usize = 3;
const ELLIPSIS: &str = "...";

fn text_width_mm(s: &str, size_pt: f32) -> f32 {
    s.chars().count() as f32 * size_pt * AVG_GLYPH_EM * PT_TO_MM
}

fn chars_fitting(width_mm: f32, size_pt: f32) -> usize {
    ((width_mm / (size_pt * AVG_GLYPH_EM * PT_TO_MM)) as usize).max(1)
}

fn line_height_mm(size_pt: f32) -> f32 {
    size_pt * PT_TO_MM * 1.4
}

/// Wraps `text` to `width` characters and keeps at most `max_lines` lines.
/// Text that does not fit ends with an ellipsis.
fn wrap_clamped(text: &str, width: usize, max_lines: usize) -> Vec<String> {
    let mut lines: Vec<String> = textwrap::wrap(text, width)
        .into_iter()
        .map(|l| l.into_owned())
        .collect();
    if lines.len() > max_lines {
        lines.truncate(max_lines);
        if let Some(last) = lines.last_mut() {
            let kept: String = last
                .chars()
                .take(width.saturating_sub(ELLIPSIS.len()))
                .collect();
            *last = format!("{}{ELLIPSIS}", kept.trim_end());
        }
    }
    lines
}

/// Lowest baseline, from the top edge, that body content may use on `page`.
/// Everything below is reserved for the page footer.
fn content_limit(page: &Page, size: PageSize) -> f32 {
    let footer_lines: usize = page
        .sections
        .iter()
        .map(|s| match s {
            Section::Footer { lines } => lines.len(),
            _ => 0,
        })
        .sum();
    let reserved = if footer_lines == 0 {
        0.0
    } else {
        line_height_mm(FOOTER_PT) * (footer_lines as f32 + 1.0)
    };
    size.height_mm - MARGIN_MM - reserved
}

fn color(rgb: Rgb) -> Color {
    Color::Rgb(PdfRgb::new(
        rgb.0 as f32 / 255.0,
        rgb.1 as f32 / 255.0,
        rgb.2 as f32 / 255.0,
        None,
    ))
}

struct Fonts {
    regular: IndirectFontRef,
    bold: IndirectFontRef,
}

/// Paints one page top-down, tracking the vertical position in millimetres
/// from the top edge.
struct PagePainter<'a> {
    layer: PdfLayerReference,
    fonts: &'a Fonts,
    theme: &'a DocumentTheme,
    size: PageSize,
    cursor: f32,
    limit: f32,
    overflowed: bool,
}

impl<'a> PagePainter<'a> {
    fn content_width(&self) -> f32 {
        self.size.width_mm - 2.0 * MARGIN_MM
    }

    /// Body text. Anything past the content limit is dropped.
    fn text(&mut self, s: &str, size_pt: f32, x: f32, from_top: f32, bold: bool, rgb: Rgb) {
        if from_top > self.limit {
            self.overflowed = true;
            return;
        }
        self.put_text(s, size_pt, x, from_top, bold, rgb);
    }

    fn put_text(&self, s: &str, size_pt: f32, x: f32, from_top: f32, bold: bool, rgb: Rgb) {
        self.layer.set_fill_color(color(rgb));
        let font = if bold {
            &self.fonts.bold
        } else {
            &self.fonts.regular
        };
        self.layer.use_text(
            s,
            size_pt,
            Mm(x),
            Mm(self.size.height_mm - from_top),
            font,
        );
    }

    fn line(&mut self, s: &str, size_pt: f32, x: f32, bold: bool, rgb: Rgb) {
        self.cursor += line_height_mm(size_pt);
        self.text(s, size_pt, x, self.cursor, bold, rgb);
    }

    fn centered(&mut self, s: &str, size_pt: f32, bold: bool, rgb: Rgb) {
        let x = (self.size.width_mm - text_width_mm(s, size_pt)) / 2.0;
        self.line(s, size_pt, x.max(MARGIN_MM), bold, rgb);
    }

    fn rule(&mut self) {
        let size = 6.0;
        let count = chars_fitting(self.content_width(), size);
        self.line(&"_".repeat(count), size, MARGIN_MM, false, self.theme.palette.muted);
        self.cursor += 2.0;
    }

    fn fields(&mut self, fields: &[Field], indent: f32) {
        let size = 10.0;
        let value_x = MARGIN_MM + indent + LABEL_COLUMN_MM;
        let capacity = chars_fitting(self.size.width_mm - MARGIN_MM - value_x, size);
        for field in fields {
            let wrapped = wrap_clamped(&field.value, capacity, MAX_FIELD_LINES);
            self.line(
                &format!("{} :", field.label),
                size,
                MARGIN_MM + indent,
                false,
                self.theme.palette.muted,
            );
            let mut lines = wrapped.iter();
            if let Some(first) = lines.next() {
                self.text(first, size, value_x, self.cursor, false, self.theme.palette.text);
            }
            for line in lines {
                self.line(line, size, value_x, false, self.theme.palette.text);
            }
        }
    }

    fn table(&mut self, columns: &[TableColumn], rows: &[TableRow]) {
        let size = 9.0;
        let width = self.content_width();
        let mut x = MARGIN_MM;
        let spans: Vec<(f32, f32)> = columns
            .iter()
            .map(|c| {
                let w = width * c.width_pct as f32 / 100.0;
                let span = (x, w);
                x += w;
                span
            })
            .collect();

        let header: Vec<String> = columns.iter().map(|c| c.title.clone()).collect();
        self.table_row(columns, &spans, &header, size, true);
        self.rule();
        for row in rows {
            self.table_row(columns, &spans, &row.cells, size, false);
        }
        self.cursor += 2.0;
    }

    fn table_row(
        &mut self,
        columns: &[TableColumn],
        spans: &[(f32, f32)],
        cells: &[String],
        size: f32,
        bold: bool,
    ) {
        let rgb = if bold {
            self.theme.palette.muted
        } else {
            self.theme.palette.text
        };
        let wrapped: Vec<Vec<String>> = spans
            .iter()
            .enumerate()
            .map(|(i, (_, w))| {
                let cell = cells.get(i).map(String::as_str).unwrap_or("");
                wrap_clamped(cell, chars_fitting(w - 2.0, size), MAX_CELL_LINES)
            })
            .collect();
        let height = wrapped.iter().map(Vec::len).max().unwrap_or(0).max(1);
        for line in 0..height {
            self.cursor += line_height_mm(size);
            for ((cell_lines, (x, w)), column) in wrapped.iter().zip(spans).zip(columns) {
                let Some(text) = cell_lines.get(line) else {
                    continue;
                };
                let x = match column.align {
                    ColumnAlign::Left => *x,
                    ColumnAlign::Right => x + w - 2.0 - text_width_mm(text, size),
                };
                self.text(text, size, x, self.cursor, bold, rgb);
            }
        }
    }

    fn highlight(&mut self, label: &str, value: &str) {
        let size = 14.0;
        let primary = self.theme.palette.primary;
        self.cursor += 4.0;
        self.line(label, size, MARGIN_MM, true, primary);
        let x = self.size.width_mm - MARGIN_MM - text_width_mm(value, size);
        self.text(value, size, x, self.cursor, true, primary);
        self.cursor += 4.0;
    }

    fn signatures(&mut self, zones: &[String]) {
        if zones.is_empty() {
            return;
        }
        let size = 10.0;
        let zone_width = self.content_width() / zones.len() as f32;
        self.cursor += line_height_mm(size);
        let label_y = self.cursor;
        let line_y = label_y + 20.0;
        let underline = "_".repeat(chars_fitting(zone_width - 8.0, size));
        for (i, zone) in zones.iter().enumerate() {
            let x = MARGIN_MM + i as f32 * zone_width;
            self.text(zone, size, x, label_y, true, self.theme.palette.text);
            self.text(&underline, size, x, line_y, false, self.theme.palette.muted);
        }
        self.cursor = line_y + 4.0;
    }

    /// Footers sit at the bottom of the page regardless of the cursor.
    fn footer(&self, lines: &[String]) {
        let line_height = line_height_mm(FOOTER_PT);
        let mut y = self.size.height_mm - MARGIN_MM - line_height * lines.len() as f32;
        for line in lines {
            y += line_height;
            let x = (self.size.width_mm - text_width_mm(line, FOOTER_PT)) / 2.0;
            self.put_text(line, FOOTER_PT, x.max(MARGIN_MM), y, false, self.theme.palette.muted);
        }
    }

    fn paint(&mut self, page: &Page) {
        for section in &page.sections {
            match section {
                Section::Header {
                    organization,
                    tagline,
                    title,
                    fields,
                } => {
                    let palette = self.theme.palette;
                    self.centered(organization, 16.0, true, palette.primary);
                    if let Some(tagline) = tagline {
                        self.centered(tagline, 9.0, false, palette.muted);
                    }
                    self.rule();
                    self.centered(title, 14.0, true, palette.text);
                    self.cursor += 2.0;
                    self.fields(fields, 0.0);
                    self.cursor += 4.0;
                }
                Section::Block { heading, fields } => {
                    self.line(heading, 11.0, MARGIN_MM, true, self.theme.palette.primary);
                    self.fields(fields, 4.0);
                    self.cursor += 4.0;
                }
                Section::Table { columns, rows } => self.table(columns, rows),
                Section::Highlight { label, value } => self.highlight(label, value),
                Section::Signatures { zones } => self.signatures(zones),
                Section::Footer { lines } => self.footer(lines),
            }
        }
    }
}

/// PDF output through printpdf's built-in Helvetica faces.
pub struct PdfRenderer<'a> {
    theme: &'a DocumentTheme,
}

impl<'a> PdfRenderer<'a> {
    pub fn new(theme: &'a DocumentTheme) -> Self {
        Self { theme }
    }
}

impl DocumentRenderer for PdfRenderer<'_> {
    fn format(&self) -> DocumentFormat {
        DocumentFormat::Pdf
    }

    fn render(&self, doc: &PrintableDocument) -> Result<Vec<u8>, ServerError> {
        tracing::debug!(title = %doc.title, pages = doc.pages.len(), "rendering PDF document");
        let size = doc.page_size;
        let (pdf, first_page, first_layer) = PdfDocument::new(
            doc.title.as_str(),
            Mm(size.width_mm),
            Mm(size.height_mm),
            "Page 1",
        );
        let fonts = Fonts {
            regular: pdf
                .add_builtin_font(BuiltinFont::Helvetica)
                .map_err(|e| PdfRenderFailed::with_debug(&doc.title, &e))?,
            bold: pdf
                .add_builtin_font(BuiltinFont::HelveticaBold)
                .map_err(|e| PdfRenderFailed::with_debug(&doc.title, &e))?,
        };

        for (i, page) in doc.pages.iter().enumerate() {
            let layer = if i == 0 {
                pdf.get_page(first_page).get_layer(first_layer)
            } else {
                let (p, l) = pdf.add_page(
                    Mm(size.width_mm),
                    Mm(size.height_mm),
                    format!("Page {}", i + 1),
                );
                pdf.get_page(p).get_layer(l)
            };
            let mut painter = PagePainter {
                layer,
                fonts: &fonts,
                theme: self.theme,
                size,
                cursor: MARGIN_MM,
                limit: content_limit(page, size),
                overflowed: false,
            };
            painter.paint(page);
            if painter.overflowed {
                tracing::warn!(
                    title = %doc.title,
                    page = i + 1,
                    "content does not fit the page, lines past the footer were dropped"
                );
            }
        }

        pdf.save_to_bytes()
            .map_err(|e| PdfRenderFailed::with_debug(&doc.title, &e))
    }
}
