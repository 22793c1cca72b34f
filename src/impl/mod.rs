// Crate-internal.
// ---

pub(crate) mod data {
    pub(crate) mod datasources {
        pub(crate) mod records_json_datasource;
        pub(crate) mod theme_ron_datasource;
    }
    pub(crate) mod models {
        pub(crate) mod amount_model;
        pub(crate) mod bill_of_lading_model;
        pub(crate) mod iso_datetime_model;
        pub(crate) mod theme_model;
        pub(crate) mod transaction_model;
    }
    pub(crate) mod repositories {
        pub(crate) mod directory_sink;
    }
}

pub(crate) mod domain {
    pub(crate) mod entities {
        pub(crate) mod bill_of_lading;
        pub(crate) mod cash_transaction;
        pub(crate) mod document;
        pub(crate) mod download;
        pub(crate) mod sheet;
        pub(crate) mod theme;
    }
    pub(crate) mod logic {
        pub(crate) mod fallbacks;
        pub(crate) mod file_names;
        pub(crate) mod history_export;
        pub(crate) mod receipt_composer;
        pub(crate) mod voucher_template;
    }
    pub(crate) mod repositories {
        pub(crate) mod download_sink;
    }
    pub(crate) mod usecases {
        pub(crate) mod documents_usecase;
    }
}

pub(crate) mod presentation {
    pub(crate) mod csv_writer;
    pub(crate) mod document_renderer;
    pub(crate) mod formatting;
    pub(crate) mod pdf_renderer;
    pub(crate) mod text_renderer;
    pub(crate) mod xlsx_writer;
}

// Public exports.
// ---

#[doc(hidden)]
#[allow(unused_imports)]
pub mod exports {
    // This mod represents how clients see the library, and can differ from the
    // internal structure.
    //
    // The contents of this mod are re-exported in the root of the crate.

    pub mod entities {
        pub use crate::domain::entities::bill_of_lading::*;
        pub use crate::domain::entities::cash_transaction::*;
        pub use crate::domain::entities::document::*;
        pub use crate::domain::entities::download::*;
        pub use crate::domain::entities::sheet::*;
        pub use crate::domain::entities::theme::*;
        pub use crate::domain::logic::receipt_composer::{ReceiptOptions, TotalReconciliation};
    }

    pub mod formatting {
        pub use crate::presentation::formatting::*;
    }

    pub mod renderers {
        pub use crate::presentation::csv_writer::CsvWriter;
        pub use crate::presentation::document_renderer::{DocumentRenderer, SheetWriter};
        pub use crate::presentation::pdf_renderer::PdfRenderer;
        pub use crate::presentation::text_renderer::TextRenderer;
        pub use crate::presentation::xlsx_writer::XlsxWriter;
    }

    pub mod sinks {
        pub use crate::data::repositories::directory_sink::DirectorySink;
        pub use crate::domain::repositories::download_sink::DownloadSink;
    }
}
