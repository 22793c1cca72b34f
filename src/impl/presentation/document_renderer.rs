use fractic_server_error::ServerError;

use crate::entities::{DocumentFormat, PrintableDocument, Sheet, SheetFormat};

/// Paints a document description into bytes of one file format.
pub trait DocumentRenderer {
    fn format(&self) -> DocumentFormat;

    fn render(&self, doc: &PrintableDocument) -> Result<Vec<u8>, ServerError>;
}

/// Serializes a sheet into bytes of one spreadsheet format.
pub trait SheetWriter {
    fn format(&self) -> SheetFormat;

    fn write(&self, sheet: &Sheet) -> Result<Vec<u8>, ServerError>;
}
