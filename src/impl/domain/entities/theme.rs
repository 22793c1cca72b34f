use chrono::FixedOffset;
use iso_currency::Currency;
use num_format::CustomFormat;

use super::document::PageSize;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Organization {
    pub name: String,
    pub tagline: Option<String>,
    pub address: String,
    pub phone: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Palette {
    /// Titles and highlighted amounts.
    pub primary: Rgb,
    pub text: Rgb,
    /// Footers and table headers.
    pub muted: Rgb,
}

/// The single locale every amount and date is displayed in. Validated when
/// the theme is loaded, so formatting itself never fails.
#[derive(Debug, Clone)]
pub struct DisplayLocale {
    pub(crate) grouping: CustomFormat,
    pub decimal_separator: String,
    pub date_format: String,
    pub time_format: String,
    pub offset: FixedOffset,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileNameTemplates {
    pub withdrawal_voucher: String,
    pub deposit_voucher: String,
    pub receipt: String,
    pub history: String,
}

/// Everything that controls how documents look, in one immutable value.
///
/// Built from `DocumentTheme::default()` or loaded from RON, where any
/// omitted setting keeps its default.
#[derive(Debug, Clone)]
pub struct DocumentTheme {
    pub organization: Organization,
    pub palette: Palette,
    pub currency: Currency,
    pub locale: DisplayLocale,
    pub voucher_page: PageSize,
    pub receipt_page: PageSize,
    pub receipt_rows_per_page: usize,
    /// Line width, in characters, of the text renderer.
    pub text_width: usize,
    pub file_names: FileNameTemplates,
}
