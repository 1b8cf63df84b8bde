//! Surat Garansi (warranty letter) with a list of covered products.

use super::common::{date_text, fields, kop, place_date};
use super::Template;
use crate::calc::format::{add_months, format_long_date};
use crate::model::validation::{validate_phone, validate_required, ValidationError, ValidationErrors};
use crate::model::{ColumnSpec, DocumentModel, DocumentSchema, FieldSpec, FieldValue, Row, Variant};
use crate::render::{
    Align, Block, Column, Document, Paragraph, SignatureBlock, Signatory, Table, Tone,
};

pub struct SuratGaransi;

/// One covered product with its computed expiry.
#[derive(Debug, Clone, PartialEq)]
pub struct Cakupan {
    pub nama: String,
    pub seri: String,
    pub bulan: u32,
    pub berlaku_hingga: String,
}

fn product(nama: &str, seri: &str, bulan: f64) -> Row {
    Row::new()
        .with("nama", FieldValue::text(nama))
        .with("seri", FieldValue::text(seri))
        .with("garansi_bulan", FieldValue::Number(bulan))
}

impl Template for SuratGaransi {
    const ID: &'static str = "surat_garansi";
    const TITLE: &'static str = "Surat Garansi";
    const DESCRIPTION: &'static str = concat!(
        "Surat Garansi produk dari penjual kepada pelanggan, memuat daftar produk, ",
        "nomor seri, masa garansi dan tanggal berakhirnya, beserta syarat dan ketentuan klaim."
    );
    const SUBJECT_FIELD: &'static str = "pelanggan_nama";

    type Derived = Vec<Cakupan>;

    fn schema() -> DocumentSchema {
        DocumentSchema::new(vec![
            FieldSpec::image("logo", "Logo Toko"),
            FieldSpec::text("perusahaan", "Nama Toko / Perusahaan", "CV Elektronik Jaya Abadi").required(),
            FieldSpec::text("alamat_perusahaan", "Alamat", "Ruko Harapan Indah Blok B No. 5, Bekasi"),
            FieldSpec::text("telepon_perusahaan", "Telepon", "(021) 8888 2345"),
            FieldSpec::text("nomor", "Nomor Garansi", "GR-2024-00318"),
            FieldSpec::text("pelanggan_nama", "Nama Pelanggan", "Yusuf Maulana").required(),
            FieldSpec::paragraph("pelanggan_alamat", "Alamat Pelanggan", "Jl. Cempaka Putih Tengah No. 9, Jakarta Pusat"),
            FieldSpec::text("pelanggan_telepon", "Telepon Pelanggan", "0813-1122-3344"),
            FieldSpec::date("tanggal_pembelian", "Tanggal Pembelian", 2024, 3, 10),
            FieldSpec::list(
                "produk",
                "Daftar Produk",
                vec![
                    ColumnSpec::text("nama", "Nama Produk"),
                    ColumnSpec::text("seri", "Nomor Seri"),
                    ColumnSpec::number("garansi_bulan", "Garansi (bulan)", 12.0),
                ],
                vec![
                    product("Kulkas 2 Pintu 320L", "KL320-8841-A", 24.0),
                    product("Mesin Cuci Front Load 8kg", "MC8F-22019", 12.0),
                ],
            ),
            FieldSpec::paragraph(
                "syarat",
                "Syarat & Ketentuan",
                "Garansi berlaku untuk kerusakan pabrik pada pemakaian normal.\nGaransi tidak berlaku untuk kerusakan akibat bencana alam, kelalaian pemakaian, atau perbaikan oleh pihak lain.\nKlaim wajib menyertakan surat garansi ini dan nota pembelian asli.",
            ),
            FieldSpec::text("penandatangan", "Nama Penandatangan", "Ferdi Gunawan"),
            FieldSpec::text("jabatan_penandatangan", "Jabatan", "Kepala Layanan Purna Jual"),
            FieldSpec::text("kota", "Kota", "Bekasi"),
            FieldSpec::date("tanggal_surat", "Tanggal Surat", 2024, 3, 10),
        ])
        .with_variants(&[(Variant::First, "Surat Formal"), (Variant::Second, "Kartu Garansi")])
    }

    fn derive(model: &DocumentModel) -> Vec<Cakupan> {
        let purchase = model.date("tanggal_pembelian");
        model
            .rows("produk")
            .iter()
            .map(|row| {
                let bulan = row.number("garansi_bulan").max(0.0).round() as u32;
                let berlaku_hingga = purchase
                    .and_then(|date| add_months(date, bulan))
                    .map(format_long_date)
                    .unwrap_or_else(|| date_text(model, "tanggal_pembelian"));
                Cakupan {
                    nama: row.text("nama").to_string(),
                    seri: row.text("seri").to_string(),
                    bulan,
                    berlaku_hingga,
                }
            })
            .collect()
    }

    fn render(model: &DocumentModel, cakupan: &Vec<Cakupan>, variant: Variant) -> Document {
        let mut table = Table::new(vec![
            Column::center("No"),
            Column::left("Produk"),
            Column::left("Nomor Seri"),
            Column::center("Masa Garansi"),
            Column::center("Berlaku Hingga"),
        ]);
        for (i, item) in cakupan.iter().enumerate() {
            table = table.row(vec![
                (i + 1).to_string(),
                item.nama.clone(),
                item.seri.clone(),
                format!("{} bulan", item.bulan),
                item.berlaku_hingga.clone(),
            ]);
        }

        let syarat: Vec<Paragraph> = model
            .text("syarat")
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .enumerate()
            .map(|(i, line)| Paragraph::plain(format!("{}. {}", i + 1, line)).align(Align::Left))
            .collect();

        let mut doc = Document::new(Self::TITLE);
        doc.push(kop(model, "perusahaan", &["alamat_perusahaan", "telepon_perusahaan"]));

        match variant {
            Variant::First => {
                doc.push(Block::title(
                    "SURAT GARANSI",
                    Some(format!("Nomor: {}", model.text("nomor"))),
                ))
                .push(Block::Paragraph(Paragraph::plain(format!(
                    "{} dengan ini memberikan jaminan (garansi) atas produk yang dibeli pada tanggal {} oleh:",
                    model.text("perusahaan"),
                    date_text(model, "tanggal_pembelian")
                ))))
                .push(fields([
                    ("Nama", model.text("pelanggan_nama")),
                    ("Alamat", model.text("pelanggan_alamat")),
                    ("Telepon", model.text("pelanggan_telepon")),
                ]))
                .push(Block::Paragraph(Paragraph::plain(
                    "dengan rincian produk sebagai berikut:",
                )))
                .push(Block::Table(table))
                .push(Block::Paragraph(Paragraph::plain("Syarat dan ketentuan:").align(Align::Left)));
                for paragraph in syarat {
                    doc.push(Block::Paragraph(paragraph));
                }
            }
            Variant::Second => {
                doc.push(Block::title("KARTU GARANSI", None))
                    .push(fields([
                        ("No. Garansi", model.text("nomor").to_string()),
                        ("Pelanggan", model.text("pelanggan_nama").to_string()),
                        ("Telepon", model.text("pelanggan_telepon").to_string()),
                        ("Tanggal Beli", date_text(model, "tanggal_pembelian")),
                    ]))
                    .push(Block::Table(table))
                    .push(Block::note(
                        Tone::Info,
                        syarat
                            .iter()
                            .flat_map(|p| p.spans.iter().map(|s| s.text.as_str()))
                            .collect::<Vec<_>>()
                            .join("\n"),
                    ));
            }
        }

        doc.push(Block::Signatures(SignatureBlock {
            place_date: Some(place_date(model, "tanggal_surat")),
            signatories: vec![Signatory::new(model.text("perusahaan").to_string(), model.text("penandatangan"))
                .titled(model.text("jabatan_penandatangan"))],
            witnesses: Vec::new(),
            stamp: false,
        }));
        doc
    }

    fn validate(model: &DocumentModel) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        validate_required(model.text("perusahaan"), "perusahaan", "Nama Toko", &mut errors);
        validate_required(model.text("pelanggan_nama"), "pelanggan_nama", "Nama Pelanggan", &mut errors);
        validate_phone(model.text("pelanggan_telepon"), "pelanggan_telepon", &mut errors);

        let rows = model.rows("produk");
        if rows.is_empty() {
            errors.add(ValidationError::empty_list("produk", "Daftar Produk"));
        }
        for (i, row) in rows.iter().enumerate() {
            validate_required(
                row.text("nama"),
                &format!("produk[{}].nama", i),
                "Nama Produk",
                &mut errors,
            );
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
    fn test_expiry_per_product() {
        let cakupan = SuratGaransi::derive(&SuratGaransi::schema().default_model());
        assert_eq!(cakupan.len(), 2);
        assert_eq!(cakupan[0].berlaku_hingga, "10 Maret 2026");
        assert_eq!(cakupan[1].berlaku_hingga, "10 Maret 2025");
    }

    #[test]
    fn test_added_product_appears_in_table() {
        let schema = SuratGaransi::schema();
        let state = PageState::new(&schema)
            .reduce(
                &schema,
                Action::AddListItem {
                    list: "produk".into(),
                    row: Some(json!({ "nama": "Televisi 43 inci", "seri": "TV43-001", "garansi_bulan": "6" })),
                },
            )
            .unwrap();

        let cakupan = SuratGaransi::derive(&state.model);
        assert_eq!(cakupan[2].berlaku_hingga, "10 September 2024");

        let text = text_content(&render_document(&SuratGaransi::render(
            &state.model,
            &cakupan,
            Variant::First,
        )));
        assert!(text.contains("3 Televisi 43 inci TV43-001 6 bulan"));
        assert!(text.contains("3. Klaim wajib menyertakan"));
    }

    #[test]
    fn test_card_variant() {
        let model = SuratGaransi::schema().default_model();
        let cakupan = SuratGaransi::derive(&model);
        let text = text_content(&render_document(&SuratGaransi::render(
            &model,
            &cakupan,
            Variant::Second,
        )));
        assert!(text.contains("KARTU GARANSI"));
        assert!(text.contains("No. Garansi : GR-2024-00318"));
    }

    #[test]
    fn test_empty_product_list_is_reported() {
        let schema = SuratGaransi::schema();
        let state = PageState::new(&schema);
        let state = (0..2).fold(state, |state, _| {
            state
                .reduce(&schema, Action::RemoveListItem { list: "produk".into(), index: 0 })
                .unwrap()
        });
        let errors = SuratGaransi::validate(&state.model);
        assert!(errors.iter().any(|e| e.field == "produk"));
    }
}
