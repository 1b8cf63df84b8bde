//! Invoice and kwitansi (receipt).

use super::common::{date_text, fields, kop, place_date};
use super::Template;
use crate::calc::format::{capitalize, format_decimal, terbilang_rupiah};
use crate::calc::{format_percent, format_rupiah};
use crate::model::validation::{validate_required, ValidationError, ValidationErrors};
use crate::model::{ColumnSpec, DocumentModel, DocumentSchema, FieldSpec, FieldValue, Row, Variant};
use crate::render::{Align, Block, Column, Document, Paragraph, SignatureBlock, Signatory, Table};

pub struct Invoice;

#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceLine {
    pub nama: String,
    pub qty: f64,
    pub satuan: String,
    pub harga: f64,
    pub jumlah: f64,
}

/// Line amounts and totals.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceTotals {
    pub lines: Vec<InvoiceLine>,
    pub subtotal: f64,
    pub diskon: f64,
    /// Taxable base after discount.
    pub dpp: f64,
    pub ppn: f64,
    pub total: f64,
}

fn item(nama: &str, qty: f64, satuan: &str, harga: f64) -> Row {
    Row::new()
        .with("nama", FieldValue::text(nama))
        .with("qty", FieldValue::Number(qty))
        .with("satuan", FieldValue::text(satuan))
        .with("harga", FieldValue::Number(harga))
}

/// Totals for a list of lines with percentage discount and VAT.
pub fn totals(lines: Vec<InvoiceLine>, diskon_persen: f64, ppn_persen: f64) -> InvoiceTotals {
    let subtotal: f64 = lines.iter().map(|line| line.jumlah).sum();
    let diskon = subtotal * diskon_persen / 100.0;
    let dpp = subtotal - diskon;
    let ppn = (dpp * ppn_persen / 100.0).round();
    InvoiceTotals {
        lines,
        subtotal,
        diskon,
        dpp,
        ppn,
        total: dpp + ppn,
    }
}

impl Template for Invoice {
    const ID: &'static str = "invoice";
    const TITLE: &'static str = "Invoice & Kwitansi";
    const DESCRIPTION: &'static str = concat!(
        "Invoice (faktur tagihan) dengan daftar barang/jasa, diskon dan PPN, ",
        "atau kwitansi tanda terima pembayaran dengan jumlah terbilang."
    );
    const SUBJECT_FIELD: &'static str = "nomor";

    type Derived = InvoiceTotals;

    fn schema() -> DocumentSchema {
        DocumentSchema::new(vec![
            FieldSpec::image("logo", "Logo"),
            FieldSpec::text("perusahaan", "Nama Usaha", "CV Kreasi Digital Nusantara").required(),
            FieldSpec::text("alamat_perusahaan", "Alamat Usaha", "Jl. Pemuda No. 88, Rawamangun, Jakarta Timur"),
            FieldSpec::text("kontak_perusahaan", "Telepon / Email", "0821-9000-1234 · halo@kreasidigital.id"),
            FieldSpec::text("nomor", "Nomor Invoice", "INV/2024/03/0012").required(),
            FieldSpec::date("tanggal", "Tanggal", 2024, 3, 15),
            FieldSpec::date("jatuh_tempo", "Jatuh Tempo", 2024, 3, 29),
            FieldSpec::text("pelanggan_nama", "Ditagihkan Kepada", "PT Amanah Logistik Indonesia").required(),
            FieldSpec::paragraph("pelanggan_alamat", "Alamat Pelanggan", "Kawasan Industri Pulogadung Blok III No. 4, Jakarta Timur"),
            FieldSpec::list(
                "items",
                "Daftar Barang / Jasa",
                vec![
                    ColumnSpec::text("nama", "Deskripsi"),
                    ColumnSpec::number("qty", "Jumlah", 1.0),
                    ColumnSpec::text("satuan", "Satuan"),
                    ColumnSpec::money("harga", "Harga Satuan"),
                ],
                vec![
                    item("Desain ulang website perusahaan", 1.0, "paket", 12_500_000.0),
                    item("Hosting dan domain 1 tahun", 1.0, "tahun", 1_750_000.0),
                    item("Pelatihan admin konten", 2.0, "sesi", 1_250_000.0),
                ],
            ),
            FieldSpec::percent("diskon_persen", "Diskon (%)", 5.0),
            FieldSpec::percent("ppn_persen", "PPN (%)", 11.0),
            FieldSpec::text("bank", "Bank", "BCA"),
            FieldSpec::text("rekening", "Nomor Rekening", "527 088 1234"),
            FieldSpec::text("atas_nama", "Atas Nama", "CV Kreasi Digital Nusantara"),
            FieldSpec::paragraph("catatan", "Catatan", "Pembayaran dianggap sah setelah dana diterima di rekening kami."),
            FieldSpec::text("penandatangan", "Nama Penandatangan", "Rizky Ramadhan"),
            FieldSpec::text("kota", "Kota", "Jakarta"),
        ])
        .with_variants(&[(Variant::First, "Invoice"), (Variant::Second, "Kwitansi")])
    }

    fn derive(model: &DocumentModel) -> InvoiceTotals {
        let lines = model
            .rows("items")
            .iter()
            .map(|row| {
                let qty = row.number("qty");
                let harga = row.number("harga");
                InvoiceLine {
                    nama: row.text("nama").to_string(),
                    qty,
                    satuan: row.text("satuan").to_string(),
                    harga,
                    jumlah: qty * harga,
                }
            })
            .collect();
        totals(lines, model.number("diskon_persen"), model.number("ppn_persen"))
    }

    fn render(model: &DocumentModel, t: &InvoiceTotals, variant: Variant) -> Document {
        let mut doc = Document::new(Self::TITLE);
        doc.push(kop(model, "perusahaan", &["alamat_perusahaan", "kontak_perusahaan"]));

        match variant {
            Variant::First => {
                let mut table = Table::new(vec![
                    Column::center("No"),
                    Column::left("Deskripsi"),
                    Column::center("Jumlah"),
                    Column::right("Harga Satuan"),
                    Column::right("Total"),
                ]);
                for (i, line) in t.lines.iter().enumerate() {
                    table = table.row(vec![
                        (i + 1).to_string(),
                        line.nama.clone(),
                        format!("{} {}", format_decimal(line.qty, 2), line.satuan),
                        format_rupiah(line.harga),
                        format_rupiah(line.jumlah),
                    ]);
                }
                table = table.footer("Subtotal", format_rupiah(t.subtotal));
                if t.diskon != 0.0 {
                    table = table.footer(
                        format!("Diskon {}", format_percent(model.number("diskon_persen"))),
                        format_rupiah(-t.diskon),
                    );
                }
                table = table
                    .footer(
                        format!("PPN {}", format_percent(model.number("ppn_persen"))),
                        format_rupiah(t.ppn),
                    )
                    .footer("TOTAL", format_rupiah(t.total));

                doc.push(Block::title("INVOICE", Some(model.text("nomor").to_string())))
                    .push(fields([
                        ("Tanggal", date_text(model, "tanggal")),
                        ("Jatuh Tempo", date_text(model, "jatuh_tempo")),
                        ("Kepada", model.text("pelanggan_nama").to_string()),
                        ("Alamat", model.text("pelanggan_alamat").to_string()),
                    ]))
                    .push(Block::Table(table))
                    .push(Block::Paragraph(
                        Paragraph::plain("Terbilang: ")
                            .strong(capitalize(&terbilang_rupiah(t.total)))
                            .align(Align::Left),
                    ))
                    .push(Block::Paragraph(Paragraph::plain("Pembayaran ditransfer ke:").align(Align::Left)))
                    .push(fields([
                        ("Bank", model.text("bank")),
                        ("No. Rekening", model.text("rekening")),
                        ("Atas Nama", model.text("atas_nama")),
                    ]))
                    .push(Block::Paragraph(Paragraph::plain(model.text("catatan"))))
                    .push(Block::Signatures(SignatureBlock {
                        place_date: Some(place_date(model, "tanggal")),
                        signatories: vec![Signatory::new("Hormat kami,", model.text("penandatangan"))
                            .titled(model.text("perusahaan"))],
                        witnesses: Vec::new(),
                        stamp: false,
                    }));
            }
            Variant::Second => {
                let untuk = t
                    .lines
                    .iter()
                    .map(|line| line.nama.as_str())
                    .filter(|nama| !nama.trim().is_empty())
                    .collect::<Vec<_>>()
                    .join(", ");

                doc.push(Block::title("KWITANSI", Some(format!("No. {}", model.text("nomor")))))
                    .push(fields([
                        ("Telah terima dari", model.text("pelanggan_nama").to_string()),
                        ("Uang sejumlah", capitalize(&terbilang_rupiah(t.total))),
                        ("Untuk pembayaran", untuk),
                    ]))
                    .push(Block::Paragraph(
                        Paragraph::plain("Jumlah: ")
                            .strong(format_rupiah(t.total))
                            .align(Align::Left),
                    ))
                    .push(Block::Signatures(SignatureBlock {
                        place_date: Some(place_date(model, "tanggal")),
                        signatories: vec![Signatory::new("Penerima,", model.text("penandatangan"))
                            .titled(model.text("perusahaan"))],
                        witnesses: Vec::new(),
                        stamp: true,
                    }));
            }
        }
        doc
    }

    fn validate(model: &DocumentModel) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        validate_required(model.text("nomor"), "nomor", "Nomor Invoice", &mut errors);
        validate_required(model.text("pelanggan_nama"), "pelanggan_nama", "Nama Pelanggan", &mut errors);

        let rows = model.rows("items");
        if rows.is_empty() {
            errors.add(ValidationError::empty_list("items", "Daftar Barang / Jasa"));
        }
        for (i, row) in rows.iter().enumerate() {
            if row.number("qty") <= 0.0 {
                errors.add(ValidationError::new(
                    format!("items[{}].qty", i),
                    "Jumlah barang harus lebih dari 0",
                ));
            }
        }

        if let (Some(tanggal), Some(jatuh_tempo)) = (model.date("tanggal"), model.date("jatuh_tempo")) {
            if jatuh_tempo < tanggal {
                errors.add(ValidationError::date_order("jatuh_tempo", "Tanggal", "Jatuh Tempo"));
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Action, PageState};
    use crate::render::{render_document, text_content};
    use serde_json::json;

    #[test]
    fn test_sample_totals() {
        let t = Invoice::derive(&Invoice::schema().default_model());
        assert_eq!(t.subtotal, 16_750_000.0);
        assert_eq!(t.diskon, 837_500.0);
        assert_eq!(t.dpp, 15_912_500.0);
        assert_eq!(t.ppn, 1_750_375.0);
        assert_eq!(t.total, 17_662_875.0);
    }

    #[test]
    fn test_totals_without_discount() {
        let lines = vec![InvoiceLine {
            nama: "Jasa".into(),
            qty: 3.0,
            satuan: "jam".into(),
            harga: 100_000.0,
            jumlah: 300_000.0,
        }];
        let t = totals(lines, 0.0, 11.0);
        assert_eq!(t.ppn, 33_000.0);
        assert_eq!(t.total, 333_000.0);
    }

    #[test]
    fn test_editing_a_cell_updates_total() {
        let schema = Invoice::schema();
        let state = PageState::new(&schema)
            .reduce(
                &schema,
                Action::SetListItem {
                    list: "items".into(),
                    index: 2,
                    field: "qty".into(),
                    value: json!("4"),
                },
            )
            .unwrap();
        let t = Invoice::derive(&state.model);
        assert_eq!(t.lines[2].jumlah, 5_000_000.0);
        assert_eq!(t.subtotal, 19_250_000.0);
    }

    #[test]
    fn test_invoice_and_kwitansi_text() {
        let model = Invoice::schema().default_model();
        let t = Invoice::derive(&model);

        let invoice = text_content(&render_document(&Invoice::render(&model, &t, Variant::First)));
        assert!(invoice.contains("Diskon 5% -Rp 837.500"));
        assert!(invoice.contains("PPN 11% Rp 1.750.375"));
        assert!(invoice.contains("TOTAL Rp 17.662.875"));
        assert!(invoice.contains("2 sesi"));

        let kwitansi = text_content(&render_document(&Invoice::render(&model, &t, Variant::Second)));
        assert!(kwitansi.contains("Telah terima dari : PT Amanah Logistik Indonesia"));
        assert!(kwitansi.contains("Tujuh belas juta enam ratus enam puluh dua ribu delapan ratus tujuh puluh lima rupiah"));
        assert!(kwitansi.contains("Meterai 10.000"));
    }
}
