use chrono::{
    format::{Item, StrftimeItems},
    FixedOffset,
};
use fractic_server_error::ServerError;
use iso_currency::Currency;
use num_format::{CustomFormat, Grouping};

use crate::{
    entities::{
        DisplayLocale, DocumentTheme, FileNameTemplates, Organization, PageSize, Palette, Rgb,
    },
    domain::logic::file_names::{
        check_template, HISTORY_PLACEHOLDERS, RECEIPT_PLACEHOLDERS, VOUCHER_PLACEHOLDERS,
    },
    errors::{InvalidIsoCurrencyCode, InvalidThemeSetting},
};

// Every struct is `#[serde(default)]`, so a RON file only needs to list the
// settings it overrides.

#[derive(Debug, serde_derive::Deserialize)]
#[serde(default)]
pub(crate) struct OrganizationModel {
    name: String,
    tagline: Option<String>,
    address: String,
    phone: String,
}

#[derive(Debug, Clone, Copy, serde_derive::Deserialize)]
pub(crate) struct RgbModel(u8, u8, u8);

#[derive(Debug, serde_derive::Deserialize)]
#[serde(default)]
pub(crate) struct PaletteModel {
    primary: RgbModel,
    text: RgbModel,
    muted: RgbModel,
}

#[derive(Debug, serde_derive::Deserialize)]
#[serde(default)]
pub(crate) struct LocaleModel {
    thousands_separator: String,
    decimal_separator: String,
    date_format: String,
    time_format: String,
    utc_offset_seconds: i32,
}

#[derive(Debug, Clone, Copy, serde_derive::Deserialize)]
pub(crate) struct PageSizeModel {
    width_mm: f32,
    height_mm: f32,
}

#[derive(Debug, serde_derive::Deserialize)]
#[serde(default)]
pub(crate) struct FileNamesModel {
    withdrawal_voucher: String,
    deposit_voucher: String,
    receipt: String,
    history: String,
}

#[derive(Debug, serde_derive::Deserialize)]
#[serde(default)]
pub(crate) struct ThemeModel {
    organization: OrganizationModel,
    palette: PaletteModel,
    currency: String,
    locale: LocaleModel,
    voucher_page: PageSizeModel,
    receipt_page: PageSizeModel,
    receipt_rows_per_page: usize,
    text_width: usize,
    file_names: FileNamesModel,
}

// Defaults.
// ---

impl Default for OrganizationModel {
    fn default() -> Self {
        Self {
            name: "TRANSIT & LOGISTIQUE".to_string(),
            tagline: Some("Transit - Dédouanement - Logistique".to_string()),
            address: "Nouakchott, Mauritanie".to_string(),
            phone: "+222 45 25 00 00".to_string(),
        }
    }
}

impl Default for PaletteModel {
    fn default() -> Self {
        Self {
            primary: RgbModel(30, 58, 138),
            text: RgbModel(17, 24, 39),
            muted: RgbModel(107, 114, 128),
        }
    }
}

impl Default for LocaleModel {
    fn default() -> Self {
        Self {
            thousands_separator: " ".to_string(),
            decimal_separator: ",".to_string(),
            date_format: "%d/%m/%Y".to_string(),
            time_format: "%H:%M".to_string(),
            // Nouakchott.
            utc_offset_seconds: 0,
        }
    }
}

impl Default for FileNamesModel {
    fn default() -> Self {
        Self {
            withdrawal_voucher: "Bordereau_Retrait_{{reference}}".to_string(),
            deposit_voucher: "Bordereau_Depot_{{reference}}".to_string(),
            receipt: "Recu_BL_{{number}}".to_string(),
            history: "Historique_{{label}}_{{date}}".to_string(),
        }
    }
}

impl Default for ThemeModel {
    fn default() -> Self {
        Self {
            organization: Default::default(),
            palette: Default::default(),
            currency: "MRU".to_string(),
            locale: Default::default(),
            // A5 portrait.
            voucher_page: PageSizeModel {
                width_mm: 148.0,
                height_mm: 210.0,
            },
            // A4 portrait.
            receipt_page: PageSizeModel {
                width_mm: 210.0,
                height_mm: 297.0,
            },
            receipt_rows_per_page: 18,
            text_width: 72,
            file_names: Default::default(),
        }
    }
}

// Conversion (with validation).
// ---

fn validate_strftime(setting: &str, pattern: &str) -> Result<(), ServerError> {
    if pattern.is_empty() || StrftimeItems::new(pattern).any(|i| matches!(i, Item::Error)) {
        return Err(InvalidThemeSetting::new(
            setting,
            &format!("'{}' is not a valid strftime pattern", pattern),
        ));
    }
    Ok(())
}

fn validate_page(setting: &str, page: PageSizeModel) -> Result<PageSize, ServerError> {
    if !(page.width_mm > 0.0 && page.height_mm > 0.0) {
        return Err(InvalidThemeSetting::new(
            setting,
            "page dimensions must be positive",
        ));
    }
    Ok(PageSize {
        width_mm: page.width_mm,
        height_mm: page.height_mm,
    })
}

impl Into<Rgb> for RgbModel {
    fn into(self) -> Rgb {
        Rgb(self.0, self.1, self.2)
    }
}

impl TryFrom<LocaleModel> for DisplayLocale {
    type Error = ServerError;

    fn try_from(m: LocaleModel) -> Result<Self, Self::Error> {
        let grouping = CustomFormat::builder()
            .grouping(Grouping::Standard)
            .separator(&m.thousands_separator)
            .minus_sign("-")
            .build()
            .map_err(|e| {
                InvalidThemeSetting::with_debug(
                    "locale.thousands_separator",
                    "must be at most 8 bytes",
                    &e,
                )
            })?;
        if m.decimal_separator.is_empty() {
            return Err(InvalidThemeSetting::new(
                "locale.decimal_separator",
                "must not be empty",
            ));
        }
        validate_strftime("locale.date_format", &m.date_format)?;
        validate_strftime("locale.time_format", &m.time_format)?;
        let offset = FixedOffset::east_opt(m.utc_offset_seconds).ok_or_else(|| {
            InvalidThemeSetting::new(
                "locale.utc_offset_seconds",
                "must be strictly within one day",
            )
        })?;
        Ok(DisplayLocale {
            grouping,
            decimal_separator: m.decimal_separator,
            date_format: m.date_format,
            time_format: m.time_format,
            offset,
        })
    }
}

impl TryFrom<FileNamesModel> for FileNameTemplates {
    type Error = ServerError;

    fn try_from(m: FileNamesModel) -> Result<Self, Self::Error> {
        check_template(&m.withdrawal_voucher, VOUCHER_PLACEHOLDERS)?;
        check_template(&m.deposit_voucher, VOUCHER_PLACEHOLDERS)?;
        check_template(&m.receipt, RECEIPT_PLACEHOLDERS)?;
        check_template(&m.history, HISTORY_PLACEHOLDERS)?;
        Ok(FileNameTemplates {
            withdrawal_voucher: m.withdrawal_voucher,
            deposit_voucher: m.deposit_voucher,
            receipt: m.receipt,
            history: m.history,
        })
    }
}

impl TryFrom<ThemeModel> for DocumentTheme {
    type Error = ServerError;

    fn try_from(m: ThemeModel) -> Result<Self, Self::Error> {
        let currency = Currency::from_code(m.currency.trim())
            .ok_or_else(|| InvalidIsoCurrencyCode::new(&m.currency))?;
        if m.receipt_rows_per_page == 0 {
            return Err(InvalidThemeSetting::new(
                "receipt_rows_per_page",
                "must be at least 1",
            ));
        }
        if m.text_width < 40 {
            return Err(InvalidThemeSetting::new(
                "text_width",
                "must be at least 40 characters",
            ));
        }
        Ok(DocumentTheme {
            organization: Organization {
                name: m.organization.name,
                tagline: m.organization.tagline,
                address: m.organization.address,
                phone: m.organization.phone,
            },
            palette: Palette {
                primary: m.palette.primary.into(),
                text: m.palette.text.into(),
                muted: m.palette.muted.into(),
            },
            currency,
            locale: m.locale.try_into()?,
            voucher_page: validate_page("voucher_page", m.voucher_page)?,
            receipt_page: validate_page("receipt_page", m.receipt_page)?,
            receipt_rows_per_page: m.receipt_rows_per_page,
            text_width: m.text_width,
            file_names: m.file_names.try_into()?,
        })
    }
}

impl Default for DocumentTheme {
    fn default() -> Self {
        ThemeModel::default()
            .try_into()
            .expect("built-in theme should be valid")
    }
}
