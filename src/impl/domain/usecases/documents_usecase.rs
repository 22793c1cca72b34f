use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, Utc};
use fractic_server_error::ServerError;

use crate::{
    domain::{
        logic::{
            file_names::{history_file_name, receipt_file_name, voucher_file_name},
            history_export::HistoryExportBuilder,
            receipt_composer::{ReceiptComposer, ReceiptOptions},
            voucher_template::VoucherTemplate,
        },
        repositories::download_sink::DownloadSink,
    },
    entities::{
        BillOfLadingRecord, DocumentFormat, DocumentTheme, DownloadFile, PrintableDocument,
        Sheet, SheetFormat, TransactionKind, TransactionRecord,
    },
    presentation::{
        csv_writer::CsvWriter,
        document_renderer::{DocumentRenderer, SheetWriter},
        pdf_renderer::PdfRenderer,
        text_renderer::TextRenderer,
        xlsx_writer::XlsxWriter,
    },
};

/// Renders a document, serializes it and hands it to the sink. Every method
/// returns the name of the delivered file.
#[async_trait]
pub trait DocumentsUsecase: Send + Sync {
    async fn withdrawal_voucher(
        &self,
        tx: &TransactionRecord,
        format: DocumentFormat,
    ) -> Result<String, ServerError>;

    async fn deposit_voucher(
        &self,
        tx: &TransactionRecord,
        format: DocumentFormat,
    ) -> Result<String, ServerError>;

    async fn bill_of_lading_receipt(
        &self,
        bl: &BillOfLadingRecord,
        options: ReceiptOptions,
        format: DocumentFormat,
        rendered_at: DateTime<Utc>,
    ) -> Result<String, ServerError>;

    async fn history_export(
        &self,
        transactions: &[TransactionRecord],
        label: &str,
        format: SheetFormat,
        today: NaiveDate,
    ) -> Result<String, ServerError>;
}

/// Bytes plus the file type they were produced as, taken from the renderer
/// or writer that produced them.
struct Serialized {
    extension: &'static str,
    mime_type: &'static str,
    bytes: Vec<u8>,
}

pub(crate) struct DocumentsUsecaseImpl<S: DownloadSink> {
    theme: DocumentTheme,
    sink: S,
}

impl<S: DownloadSink> DocumentsUsecaseImpl<S> {
    pub(crate) fn new(theme: DocumentTheme, sink: S) -> Self {
        Self { theme, sink }
    }

    pub(crate) fn theme(&self) -> &DocumentTheme {
        &self.theme
    }

    pub(crate) fn sink(&self) -> &S {
        &self.sink
    }

    fn document_renderer(&self, format: DocumentFormat) -> Box<dyn DocumentRenderer + '_> {
        match format {
            DocumentFormat::Pdf => Box::new(PdfRenderer::new(&self.theme)),
            DocumentFormat::Text => Box::new(TextRenderer::new(self.theme.text_width)),
        }
    }

    fn sheet_writer(&self, format: SheetFormat) -> Box<dyn SheetWriter> {
        match format {
            SheetFormat::Xlsx => Box::new(XlsxWriter::new(self.theme.currency.code())),
            SheetFormat::Csv => Box::new(CsvWriter::new()),
        }
    }

    fn serialize_document(
        &self,
        doc: &PrintableDocument,
        format: DocumentFormat,
    ) -> Result<Serialized, ServerError> {
        let renderer = self.document_renderer(format);
        let produced = renderer.format();
        Ok(Serialized {
            extension: produced.extension(),
            mime_type: produced.mime_type(),
            bytes: renderer.render(doc)?,
        })
    }

    fn serialize_sheet(&self, sheet: &Sheet, format: SheetFormat) -> Result<Serialized, ServerError> {
        let writer = self.sheet_writer(format);
        let produced = writer.format();
        Ok(Serialized {
            extension: produced.extension(),
            mime_type: produced.mime_type(),
            bytes: writer.write(sheet)?,
        })
    }

    async fn deliver(&self, file_name: String, file: Serialized) -> Result<String, ServerError> {
        self.sink
            .deliver(DownloadFile {
                file_name: file_name.clone(),
                mime_type: file.mime_type,
                bytes: file.bytes,
            })
            .await?;
        Ok(file_name)
    }

    async fn voucher(
        &self,
        tx: &TransactionRecord,
        kind: TransactionKind,
        format: DocumentFormat,
    ) -> Result<String, ServerError> {
        let template = VoucherTemplate::new(&self.theme);
        let doc = match kind {
            TransactionKind::Withdrawal => template.render_withdrawal(tx),
            TransactionKind::Deposit => template.render_deposit(tx),
        };
        let file = self.serialize_document(&doc, format)?;
        let file_name = voucher_file_name(&self.theme, kind, tx, file.extension)?;
        self.deliver(file_name, file).await
    }
}

#[async_trait]
impl<S: DownloadSink> DocumentsUsecase for DocumentsUsecaseImpl<S> {
    async fn withdrawal_voucher(
        &self,
        tx: &TransactionRecord,
        format: DocumentFormat,
    ) -> Result<String, ServerError> {
        self.voucher(tx, TransactionKind::Withdrawal, format).await
    }

    async fn deposit_voucher(
        &self,
        tx: &TransactionRecord,
        format: DocumentFormat,
    ) -> Result<String, ServerError> {
        self.voucher(tx, TransactionKind::Deposit, format).await
    }

    async fn bill_of_lading_receipt(
        &self,
        bl: &BillOfLadingRecord,
        options: ReceiptOptions,
        format: DocumentFormat,
        rendered_at: DateTime<Utc>,
    ) -> Result<String, ServerError> {
        let doc = ReceiptComposer::new(&self.theme, options).compose(bl, rendered_at)?;
        let file = self.serialize_document(&doc, format)?;
        let file_name = receipt_file_name(&self.theme, bl, file.extension)?;
        self.deliver(file_name, file).await
    }

    async fn history_export(
        &self,
        transactions: &[TransactionRecord],
        label: &str,
        format: SheetFormat,
        today: NaiveDate,
    ) -> Result<String, ServerError> {
        let sheet = HistoryExportBuilder::new(&self.theme).build(transactions);
        let file = self.serialize_sheet(&sheet, format)?;
        let file_name = history_file_name(&self.theme, label, today, file.extension)?;
        self.deliver(file_name, file).await
    }
}
