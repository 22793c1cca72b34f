use std::sync::Mutex;

use async_trait::async_trait;
use chrono::{DateTime, NaiveDate, TimeZone as _, Utc};
use fractic_server_error::ServerError;
use rstest::{fixture, rstest};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use transit_documents::{
    entities::{
        BillOfLadingRecord, Charge, ClientRef, DocumentFormat, DocumentTheme, DownloadFile,
        Payment, ReceiptOptions, RowKind, SheetFormat, TotalReconciliation, TransactionKind,
        TransactionRecord,
    },
    renderers::TextRenderer,
    sinks::{DirectorySink, DownloadSink},
    util::TransitDocumentsUtil,
};

#[derive(Default)]
struct MemorySink {
    files: Mutex<Vec<DownloadFile>>,
}

impl MemorySink {
    fn delivered(&self) -> Vec<DownloadFile> {
        self.files.lock().unwrap().clone()
    }
}

#[async_trait]
impl DownloadSink for MemorySink {
    async fn deliver(&self, file: DownloadFile) -> Result<(), ServerError> {
        self.files.lock().unwrap().push(file);
        Ok(())
    }
}

#[fixture]
fn util() -> TransitDocumentsUtil<MemorySink> {
    TransitDocumentsUtil::new(DocumentTheme::default(), MemorySink::default())
}

fn at(y: i32, m: u32, d: u32, h: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap()
}

fn transaction(reference: &str, kind: TransactionKind, amount: Decimal) -> TransactionRecord {
    TransactionRecord::new(
        format!("id-{reference}"),
        reference,
        at(2024, 1, 1, 10),
        kind,
        amount,
    )
}

fn bill_of_lading(charges: usize) -> BillOfLadingRecord {
    BillOfLadingRecord {
        number: "BL-2024-001".into(),
        client: Some(ClientRef::named("ACME")),
        charges: (0..charges)
            .map(|i| Charge::new(format!("c{i}"), format!("Frais {i}"), dec!(1000)))
            .collect(),
        payments: vec![],
        margin: Some(dec!(500)),
        total: Some(Decimal::from(charges as u64) * dec!(1000) + dec!(500)),
    }
}

// Vouchers.
// ---

#[rstest]
fn withdrawal_voucher_from_api_json(util: TransitDocumentsUtil<MemorySink>) {
    let json = r#"{
        "_id": "65a1", "reference": "R1", "date": "2024-01-01T10:00:00Z",
        "type": "WITHDRAWAL", "montant": 15000,
        "idClient": { "nom": "ACME" }, "description": "Remb."
    }"#;
    let tx = util.transaction_from_json(json).unwrap();
    let doc = util.render_withdrawal_voucher(&tx);

    assert_eq!(doc.pages.len(), 1);
    assert_eq!(doc.field("Nom"), Some("ACME"));
    assert_eq!(doc.field("Motif"), Some("Remb."));
    assert_eq!(doc.field("Référence"), Some("R1"));
    assert_eq!(doc.field("Date"), Some("01/01/2024 10:00"));
    assert_eq!(doc.highlights().collect::<Vec<_>>(), [("MONTANT", "15 000 MRU")]);
}

#[rstest]
#[case::withdrawal(TransactionKind::Withdrawal, "Retrait de fonds")]
#[case::deposit(TransactionKind::Deposit, "Aucune description")]
fn voucher_placeholders_for_missing_fields(
    util: TransitDocumentsUtil<MemorySink>,
    #[case] kind: TransactionKind,
    #[case] description: &str,
) {
    let mut tx = transaction("R2", kind, dec!(250));
    tx.description = Some("   ".into());
    let doc = util.render_voucher(&tx);
    assert_eq!(doc.field("Nom"), Some("Client non spécifié"));
    assert_eq!(doc.field("Motif"), Some(description));
}

#[rstest]
fn deposit_voucher_rendering_is_idempotent(util: TransitDocumentsUtil<MemorySink>) {
    let mut tx = transaction("D7", TransactionKind::Deposit, dec!(1250.5));
    tx.client = Some(ClientRef::named("SOTRAM"));
    let first = util.render_deposit_voucher(&tx);
    let second = util.render_deposit_voucher(&tx);
    assert_eq!(first, second);

    let text = TextRenderer::new(util.theme().text_width);
    assert_eq!(text.render_to_string(&first), text.render_to_string(&second));
    assert!(text.render_to_string(&first).contains("1 250,5 MRU"));
}

// Bill of lading receipt.
// ---

#[rstest]
#[case(0)]
#[case(1)]
#[case(17)]
#[case(40)]
fn receipt_has_one_row_per_charge_plus_margin(
    util: TransitDocumentsUtil<MemorySink>,
    #[case] charges: usize,
) {
    let doc = util
        .compose_bill_of_lading_receipt(
            &bill_of_lading(charges),
            ReceiptOptions::default(),
            at(2024, 3, 1, 9),
        )
        .unwrap();
    let rows: Vec<_> = doc.table_rows().collect();
    assert_eq!(rows.len(), charges + 1);
    assert!(rows[..charges].iter().all(|r| r.kind == RowKind::Item));
    assert_eq!(rows[charges].kind, RowKind::Synthetic);
    assert_eq!(rows[charges].cells[1], "500 MRU");
    assert_eq!(rows[charges].cells[2], "01/03/2024");
}

#[rstest]
fn receipt_shows_payment_date_or_placeholder(util: TransitDocumentsUtil<MemorySink>) {
    let mut bl = bill_of_lading(3);
    bl.charges.push(Charge::default());
    bl.payments = vec![
        Payment::new("c2", at(2024, 2, 14, 8)),
        Payment::new("c0", at(2024, 2, 3, 8)),
        Payment::new("c0", at(2024, 2, 20, 8)),
    ];
    let doc = util
        .compose_bill_of_lading_receipt(&bl, ReceiptOptions::default(), at(2024, 3, 1, 9))
        .unwrap();
    let dates: Vec<&str> = doc.table_rows().map(|r| r.cells[2].as_str()).collect();
    assert_eq!(
        dates,
        ["03/02/2024", "---", "14/02/2024", "---", "01/03/2024"]
    );
    let unnamed: Vec<&str> = doc
        .table_rows()
        .nth(3)
        .unwrap()
        .cells
        .iter()
        .map(String::as_str)
        .collect();
    assert_eq!(unnamed, ["Frais non désigné", "0 MRU", "---"]);
}

#[rstest]
fn receipt_total_is_displayed_verbatim(util: TransitDocumentsUtil<MemorySink>) {
    let mut bl = bill_of_lading(2);
    // Rows sum to 2 500.
    bl.total = Some(dec!(99999));
    let doc = util
        .compose_bill_of_lading_receipt(&bl, ReceiptOptions::default(), at(2024, 3, 1, 9))
        .unwrap();
    assert_eq!(doc.highlights().last(), Some(("TOTAL", "99 999 MRU")));

    bl.total = None;
    let doc = util
        .compose_bill_of_lading_receipt(&bl, ReceiptOptions::default(), at(2024, 3, 1, 9))
        .unwrap();
    assert_eq!(doc.highlights().last(), Some(("TOTAL", "0 MRU")));
}

#[rstest]
#[case(TotalReconciliation::PassThrough, true)]
#[case(TotalReconciliation::Warn, true)]
#[case(TotalReconciliation::Strict, false)]
fn reconciliation_modes_on_inconsistent_total(
    util: TransitDocumentsUtil<MemorySink>,
    #[case] reconciliation: TotalReconciliation,
    #[case] renders: bool,
) {
    let mut bl = bill_of_lading(2);
    bl.total = Some(dec!(1));
    let result = util.compose_bill_of_lading_receipt(
        &bl,
        ReceiptOptions { reconciliation },
        at(2024, 3, 1, 9),
    );
    assert_eq!(result.is_ok(), renders);
}

#[rstest]
fn long_receipt_repeats_table_and_numbers_pages(util: TransitDocumentsUtil<MemorySink>) {
    // 40 charges + margin with 18 rows per page.
    let doc = util
        .compose_bill_of_lading_receipt(
            &bill_of_lading(40),
            ReceiptOptions::default(),
            at(2024, 3, 1, 9),
        )
        .unwrap();
    assert_eq!(doc.pages.len(), 3);
    let text = TextRenderer::new(72).render_to_string(&doc);
    assert_eq!(text.matches("Désignation").count(), 3);
    assert!(text.contains("Page 1/3"));
    assert!(text.contains("Page 3/3"));
    assert_eq!(text.matches("TOTAL").count(), 1);
}

#[rstest]
#[tokio::test]
async fn long_receipt_is_delivered_as_multi_page_pdf(util: TransitDocumentsUtil<MemorySink>) {
    let rendered_at = at(2024, 3, 1, 9);
    let short = util
        .bill_of_lading_receipt_at(
            &bill_of_lading(1),
            ReceiptOptions::default(),
            DocumentFormat::Pdf,
            rendered_at,
        )
        .await
        .unwrap();
    let long = util
        .bill_of_lading_receipt_at(
            &bill_of_lading(40),
            ReceiptOptions::default(),
            DocumentFormat::Pdf,
            rendered_at,
        )
        .await
        .unwrap();
    assert_eq!(short, long);
    assert!(long.ends_with(".pdf"));

    let files = util.sink().delivered();
    assert_eq!(files.len(), 2);
    assert!(files.iter().all(|f| f.mime_type == "application/pdf"));
    assert!(files[1].bytes.starts_with(b"%PDF"));
    assert!(files[1].bytes.len() > files[0].bytes.len());
}

// History export.
// ---

#[rstest]
fn history_sheet_has_header_and_fixed_columns(util: TransitDocumentsUtil<MemorySink>) {
    let mut txs = vec![
        transaction("R1", TransactionKind::Deposit, dec!(20000)),
        transaction("R2", TransactionKind::Withdrawal, dec!(5000)),
        transaction("R3", TransactionKind::Deposit, dec!(750)),
    ];
    txs[0].bill_of_lading_number = Some("BL-9".into());
    txs[1].balance_after = Some(dec!(15000));
    let sheet = util.build_history_sheet(&txs);

    assert_eq!(sheet.row_count(), 4);
    assert_eq!(sheet.column_count(), 7);
    assert_eq!(
        sheet.headers(),
        ["Date", "Heure", "Description", "Type", "N° BL", "Montant", "Solde après"]
    );
    let first: Vec<&str> = sheet.rows[0].iter().map(|c| c.display()).collect();
    assert_eq!(
        first,
        ["01/01/2024", "10:00", "", "Dépôt", "BL-9", "20 000 MRU", ""]
    );
    assert_eq!(sheet.rows[1][4].display(), "N/A");
    assert_eq!(sheet.rows[1][6].display(), "15 000 MRU");
}

// Delivery.
// ---

#[rstest]
#[tokio::test]
async fn csv_history_is_delivered_under_dated_name(util: TransitDocumentsUtil<MemorySink>) {
    let txs = vec![transaction("R1", TransactionKind::Deposit, dec!(10))];
    let name = util
        .history_export_on(
            &txs,
            "Caisse",
            SheetFormat::Csv,
            NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(name, "Historique_Caisse_2024-01-01.csv");

    let files = util.sink().delivered();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0].file_name, name);
    assert_eq!(files[0].mime_type, "text/csv; charset=utf-8");
    let body = String::from_utf8(files[0].bytes.clone()).unwrap();
    assert!(body.starts_with("Date,Heure,Description,Type,N° BL,Montant,Solde après\n"));
    assert_eq!(body.lines().count(), 2);
}

#[rstest]
#[tokio::test]
async fn xlsx_history_is_a_zip_container(util: TransitDocumentsUtil<MemorySink>) {
    let txs = vec![transaction("R1", TransactionKind::Withdrawal, dec!(10))];
    util.history_export_on(
        &txs,
        "Caisse",
        SheetFormat::Xlsx,
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    )
    .await
    .unwrap();
    let files = util.sink().delivered();
    assert_eq!(files[0].file_name, "Historique_Caisse_2024-01-01.xlsx");
    assert!(files[0].bytes.starts_with(b"PK"));
}

#[rstest]
#[tokio::test]
async fn vouchers_are_delivered_as_pdf(util: TransitDocumentsUtil<MemorySink>) {
    let tx = transaction("R/5", TransactionKind::Withdrawal, dec!(15000));
    let withdrawal = util.withdrawal_voucher(&tx, DocumentFormat::Pdf).await.unwrap();
    let deposit = util.deposit_voucher(&tx, DocumentFormat::Text).await.unwrap();
    assert_eq!(withdrawal, "Bordereau_Retrait_R-5.pdf");
    assert_eq!(deposit, "Bordereau_Depot_R-5.txt");

    let files = util.sink().delivered();
    assert!(files[0].bytes.starts_with(b"%PDF"));
    assert_eq!(files[0].mime_type, "application/pdf");
    let text = String::from_utf8(files[1].bytes.clone()).unwrap();
    assert!(text.contains("BORDEREAU DE DÉPÔT"));
    assert!(text.contains("ID : id-R/5"));
}

#[rstest]
#[tokio::test]
async fn strict_receipt_is_not_delivered(util: TransitDocumentsUtil<MemorySink>) {
    let mut bl = bill_of_lading(1);
    bl.total = Some(dec!(3));
    let strict = ReceiptOptions {
        reconciliation: TotalReconciliation::Strict,
    };
    assert!(util
        .bill_of_lading_receipt(&bl, strict, DocumentFormat::Pdf)
        .await
        .is_err());
    assert!(util.sink().delivered().is_empty());
}

#[rstest]
#[tokio::test]
async fn receipt_from_json_with_missing_collections(util: TransitDocumentsUtil<MemorySink>) {
    let json = r#"{ "numeroBL": "BL-77", "charges": null, "marge": 300, "total": 300 }"#;
    let name = util
        .bill_of_lading_receipt_from_json(json, ReceiptOptions::default(), DocumentFormat::Text)
        .await
        .unwrap();
    assert_eq!(name, "Recu_BL_BL-77.txt");
    let text = String::from_utf8(util.sink().delivered()[0].bytes.clone()).unwrap();
    assert!(text.contains("Marge de service"));
    assert!(text.contains("300 MRU"));
}

#[tokio::test]
async fn directory_sink_writes_delivered_file() {
    let dir = std::env::temp_dir().join(format!(
        "transit-documents-{}-{}",
        std::process::id(),
        Utc::now().timestamp_nanos_opt().unwrap_or_default()
    ));
    let util = TransitDocumentsUtil::new(DocumentTheme::default(), DirectorySink::new(&dir));
    let tx = transaction("R9", TransactionKind::Deposit, dec!(42));
    let name = util.deposit_voucher(&tx, DocumentFormat::Text).await.unwrap();

    let written = tokio::fs::read_to_string(dir.join(&name)).await.unwrap();
    assert!(written.contains("42 MRU"));
    tokio::fs::remove_dir_all(&dir).await.unwrap();
}

#[tokio::test]
async fn themed_documents_use_ron_overrides() {
    let theme = DocumentTheme::from_ron_str(
        r#"(
            organization: (name: "SOTRAM TRANSIT"),
            file_names: (receipt: "Recu_{{number}}"),
        )"#,
    )
    .unwrap();
    let util = TransitDocumentsUtil::new(theme, MemorySink::default());
    let tx = transaction("R1", TransactionKind::Withdrawal, dec!(1));
    let text = TextRenderer::new(72).render_to_string(&util.render_withdrawal_voucher(&tx));
    assert!(text.contains("SOTRAM TRANSIT"));

    let name = util
        .bill_of_lading_receipt(&bill_of_lading(1), ReceiptOptions::default(), DocumentFormat::Text)
        .await
        .unwrap();
    assert_eq!(name, "Recu_BL-2024-001.txt");
}

#[test]
fn theme_with_unknown_file_name_placeholder_is_rejected() {
    assert!(DocumentTheme::from_ron_str(r#"(file_names: (receipt: "Recu_{{numero}}"))"#).is_err());
}
