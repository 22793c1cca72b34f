use fractic_server_error::ServerError;
use rust_decimal::{prelude::ToPrimitive as _, Decimal};
use rust_xlsxwriter::{Format, Workbook, XlsxError};

use crate::{
    entities::{Cell, Sheet, SheetFormat},
    errors::XlsxWriteFailed,
};

use super::document_renderer::SheetWriter;

/// Above this many significant digits an `f64` no longer holds the amount
/// exactly.
const MAX_EXACT_DIGITS: u32 = 15;

/// Number format showing exactly the digits `value` has, so a cell never
/// displays a rounded or zero-padded amount.
fn amount_num_format(value: Decimal, currency_code: &str) -> String {
    match value.normalize().scale() {
        0 => format!("#,##0 \"{}\"", currency_code),
        scale => format!("#,##0.{} \"{}\"", "0".repeat(scale as usize), currency_code),
    }
}

/// Numeric cell value, when it survives the conversion to `f64` unchanged.
fn exact_number(value: Decimal) -> Option<f64> {
    let normalized = value.normalize();
    if normalized.mantissa().unsigned_abs() >= 10u128.pow(MAX_EXACT_DIGITS) {
        return None;
    }
    normalized.to_f64()
}

/// Writes a sheet as a single-worksheet XLSX workbook. Amounts stay numeric,
/// displayed with the currency code as suffix and without rounding; an
/// amount too precise for a spreadsheet number is written as its display
/// string.
pub struct XlsxWriter {
    currency_code: &'static str,
}

impl XlsxWriter {
    pub fn new(currency_code: &'static str) -> Self {
        Self { currency_code }
    }

    fn write_workbook(&self, sheet: &Sheet) -> Result<Vec<u8>, XlsxError> {
        let header_format = Format::new().set_bold();

        let mut workbook = Workbook::new();
        let worksheet = workbook.add_worksheet();
        worksheet.set_name(sheet.name.as_str())?;

        for (col, column) in sheet.columns.iter().enumerate() {
            let col = col as u16;
            worksheet.set_column_width(col, column.width)?;
            worksheet.write_string_with_format(0, col, column.header.as_str(), &header_format)?;
        }
        for (i, row) in sheet.rows.iter().enumerate() {
            let r = (i + 1) as u32;
            for (c, cell) in row.iter().enumerate() {
                let c = c as u16;
                match cell {
                    Cell::Text(s) => {
                        worksheet.write_string(r, c, s.as_str())?;
                    }
                    Cell::Amount { value, display } => match exact_number(*value) {
                        Some(n) => {
                            let format = Format::new()
                                .set_num_format(amount_num_format(*value, self.currency_code));
                            worksheet.write_number_with_format(r, c, n, &format)?;
                        }
                        None => {
                            worksheet.write_string(r, c, display.as_str())?;
                        }
                    },
                }
            }
        }
        workbook.save_to_buffer()
    }
}

impl SheetWriter for XlsxWriter {
    fn format(&self) -> SheetFormat {
        SheetFormat::Xlsx
    }

    fn write(&self, sheet: &Sheet) -> Result<Vec<u8>, ServerError> {
        tracing::debug!(sheet = %sheet.name, rows = sheet.rows.len(), "writing XLSX workbook");
        self.write_workbook(sheet)
            .map_err(|e| XlsxWriteFailed::with_debug(&sheet.name, &e))
    }
}
