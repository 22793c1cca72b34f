use fractic_server_error::ServerError;

use crate::{
    entities::{Sheet, SheetFormat},
    errors::CsvWriteFailed,
};

use super::document_renderer::SheetWriter;

/// Writes a sheet as CSV: the header row, then every row with amounts in
/// their display form.
pub struct CsvWriter;

impl CsvWriter {
    pub fn new() -> Self {
        Self
    }
}

impl SheetWriter for CsvWriter {
    fn format(&self) -> SheetFormat {
        SheetFormat::Csv
    }

    fn write(&self, sheet: &Sheet) -> Result<Vec<u8>, ServerError> {
        tracing::debug!(sheet = %sheet.name, rows = sheet.rows.len(), "writing CSV sheet");
        let mut wrt = csv::WriterBuilder::new().from_writer(Vec::new());
        wrt.write_record(sheet.headers())
            .map_err(|e| CsvWriteFailed::with_debug(&sheet.name, &e))?;
        for row in &sheet.rows {
            wrt.write_record(row.iter().map(|c| c.display()))
                .map_err(|e| CsvWriteFailed::with_debug(&sheet.name, &e))?;
        }
        wrt.into_inner()
            .map_err(|e| CsvWriteFailed::with_debug(&sheet.name, &e.error().to_string()))
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal_macros::dec;

    use crate::entities::{Cell, SheetColumn};

    use super::*;

    #[test]
    fn writes_header_then_display_values() {
        let sheet = Sheet {
            name: "Historique".into(),
            columns: vec![
                SheetColumn {
                    header: "Description".into(),
                    width: 40.0,
                },
                SheetColumn {
                    header: "Montant".into(),
                    width: 16.0,
                },
            ],
            rows: vec![vec![
                Cell::text("Remb."),
                Cell::Amount {
                    value: dec!(1250.5),
                    display: "1 250,5 MRU".into(),
                },
            ]],
        };
        let out = String::from_utf8(CsvWriter::new().write(&sheet).unwrap()).unwrap();
        assert_eq!(out, "Description,Montant\nRemb.,\"1 250,5 MRU\"\n");
    }
}
