use fractic_server_error::{define_client_error, define_internal_error};
use rust_decimal::Decimal;

// IO-related.
define_client_error!(ReadError, "Error reading file.");
define_internal_error!(WriteError, "Error writing file '{path}'.", { path: &str });
define_client_error!(InvalidFileName, "Invalid download file name: '{name}'.", { name: &str });

// Parsing-related.
define_client_error!(InvalidJson, "Invalid {record_type} (invalid JSON format).", { record_type: &str });
define_client_error!(InvalidRon, "Invalid {ron_type} (invalid RON format).", { ron_type: &str });
define_client_error!(InvalidIsoDateTime, "Invalid ISO date or timestamp: {value}.", { value: &str });
define_client_error!(InvalidIsoCurrencyCode, "Invalid ISO currency code: {code}.", { code: &str });
define_client_error!(InvalidAmount, "Invalid amount: '{value}'.", { value: &str });

// Theme-related.
define_client_error!(
    InvalidThemeSetting,
    "Invalid document theme setting '{setting}': {details}.",
    { setting: &str, details: &str }
);
define_client_error!(
    UnreplacedPlaceholdersRemain,
    "Unknown placeholders in file name template: {keys:?}.",
    { keys: &Vec<String> }
);

// Document-related.
define_client_error!(
    BillOfLadingTotalMismatch,
    "Bill of lading '{number}' declares a total of {declared}, but its charges and margin sum to {computed}.",
    { number: &str, declared: &Decimal, computed: &Decimal }
);
define_internal_error!(PdfRenderFailed, "Failed to render PDF document '{title}'.", { title: &str });
define_internal_error!(XlsxWriteFailed, "Failed to write spreadsheet '{sheet}'.", { sheet: &str });
define_internal_error!(CsvWriteFailed, "Failed to write CSV sheet '{sheet}'.", { sheet: &str });
