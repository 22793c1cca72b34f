/// Physical page dimensions, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width_mm: f32,
    pub height_mm: f32,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Field {
    pub label: String,
    pub value: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnAlign {
    Left,
    Right,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableColumn {
    pub title: String,
    /// Share of the table width, in percent.
    pub width_pct: u8,
    pub align: ColumnAlign,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowKind {
    /// One row per input item.
    Item,
    /// Row computed by the composer rather than read from the record.
    Synthetic,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub kind: RowKind,
    pub cells: Vec<String>,
}

/// Building blocks of a printable page. What the page says, not how it is
/// painted: every renderer decides its own layout for each variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Section {
    /// Issuer identity, document title and document-level fields.
    Header {
        organization: String,
        tagline: Option<String>,
        title: String,
        fields: Vec<Field>,
    },
    /// Labelled block of fields (beneficiary, details, client...).
    Block { heading: String, fields: Vec<Field> },
    Table {
        columns: Vec<TableColumn>,
        rows: Vec<TableRow>,
    },
    /// Emphasized amount, such as a voucher amount or a receipt total.
    Highlight { label: String, value: String },
    /// Blank zones reserved for handwritten signatures.
    Signatures { zones: Vec<String> },
    Footer { lines: Vec<String> },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub sections: Vec<Section>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PrintableDocument {
    pub title: String,
    pub page_size: PageSize,
    pub pages: Vec<Page>,
}

// --

impl Field {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

impl TableColumn {
    pub fn new(title: impl Into<String>, width_pct: u8, align: ColumnAlign) -> Self {
        Self {
            title: title.into(),
            width_pct,
            align,
        }
    }
}

impl PrintableDocument {
    pub fn sections(&self) -> impl Iterator<Item = &Section> {
        self.pages.iter().flat_map(|p| p.sections.iter())
    }

    /// All table rows, across every page, in order.
    pub fn table_rows(&self) -> impl Iterator<Item = &TableRow> {
        self.sections().flat_map(|s| match s {
            Section::Table { rows, .. } => rows.as_slice(),
            _ => &[][..],
        })
    }

    pub fn highlights(&self) -> impl Iterator<Item = (&str, &str)> {
        self.sections().filter_map(|s| match s {
            Section::Highlight { label, value } => Some((label.as_str(), value.as_str())),
            _ => None,
        })
    }

    /// Value of the first field with the given label, in any header or block.
    pub fn field(&self, label: &str) -> Option<&str> {
        self.sections()
            .flat_map(|s| match s {
                Section::Header { fields, .. } | Section::Block { fields, .. } => {
                    fields.as_slice()
                }
                _ => &[][..],
            })
            .find(|f| f.label == label)
            .map(|f| f.value.as_str())
    }
}

/// Accumulates sections page by page.
#[derive(Debug)]
pub struct DocumentBuilder {
    title: String,
    page_size: PageSize,
    pages: Vec<Page>,
    current: Page,
}

impl DocumentBuilder {
    pub fn new(title: impl Into<String>, page_size: PageSize) -> Self {
        Self {
            title: title.into(),
            page_size,
            pages: Vec::new(),
            current: Page::default(),
        }
    }

    pub fn section(mut self, section: Section) -> Self {
        self.current.sections.push(section);
        self
    }

    pub fn page_break(mut self) -> Self {
        let page = std::mem::take(&mut self.current);
        self.pages.push(page);
        self
    }

    pub fn build(mut self) -> PrintableDocument {
        if !self.current.sections.is_empty() || self.pages.is_empty() {
            self.pages.push(self.current);
        }
        PrintableDocument {
            title: self.title,
            page_size: self.page_size,
            pages: self.pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const A4: PageSize = PageSize {
        width_mm: 210.0,
        height_mm: 297.0,
    };

    #[test]
    fn builder_splits_pages_on_break() {
        let doc = DocumentBuilder::new("t", A4)
            .section(Section::Footer { lines: vec!["1".into()] })
            .page_break()
            .section(Section::Footer { lines: vec!["2".into()] })
            .build();
        assert_eq!(doc.pages.len(), 2);
    }

    #[test]
    fn builder_ignores_trailing_empty_page() {
        let doc = DocumentBuilder::new("t", A4)
            .section(Section::Footer { lines: vec![] })
            .page_break()
            .build();
        assert_eq!(doc.pages.len(), 1);
    }

    #[test]
    fn empty_builder_still_yields_one_page() {
        assert_eq!(DocumentBuilder::new("t", A4).build().pages.len(), 1);
    }

    #[test]
    fn field_lookup_spans_headers_and_blocks() {
        let doc = DocumentBuilder::new("t", A4)
            .section(Section::Header {
                organization: "Org".into(),
                tagline: None,
                title: "T".into(),
                fields: vec![Field::new("N°", "R1")],
            })
            .section(Section::Block {
                heading: "B".into(),
                fields: vec![Field::new("Nom", "ACME")],
            })
            .build();
        assert_eq!(doc.field("N°"), Some("R1"));
        assert_eq!(doc.field("Nom"), Some("ACME"));
        assert_eq!(doc.field("Absent"), None);
    }
}
