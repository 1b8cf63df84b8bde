//! Pesangon (severance) calculation and the joint agreement (perjanjian
//! bersama) that settles it.

use super::common::{calc_note, date_text, fields, kop, place_date};
use super::Template;
use crate::calc::format::{capitalize, format_decimal, terbilang_rupiah};
use crate::calc::pesangon::{calculate_for_period, Severance, TerminationReason, UPH_RATE};
use crate::calc::{format_percent, format_rupiah, CalcError};
use crate::model::validation::{
    validate_nik_optional, validate_required, ValidationError, ValidationErrors,
};
use crate::model::{ColumnSpec, DocumentModel, DocumentSchema, FieldSpec, FieldValue, Row, Variant};
use crate::render::{
    Align, Block, Clause, Column, Document, PageSetup, Paragraph, SignatureBlock, Signatory, Table,
};

pub struct Pesangon;

fn reason(model: &DocumentModel) -> TerminationReason {
    // Choice coercion only admits known codes.
    model
        .text("alasan")
        .parse()
        .unwrap_or(TerminationReason::Efisiensi)
}

fn representative(nama: &str, jabatan: &str) -> Row {
    Row::new()
        .with("nama", FieldValue::text(nama))
        .with("jabatan", FieldValue::text(jabatan))
}

fn components(model: &DocumentModel, s: &Severance) -> Table {
    let upah = model.number("upah");
    Table::new(vec![
        Column::left("Komponen"),
        Column::left("Dasar Perhitungan"),
        Column::right("Jumlah"),
    ])
    .row(vec![
        "Uang Pesangon (UP)".to_string(),
        format!(
            "{} × {} × {}",
            s.up_multiplier,
            format_rupiah(upah),
            format_decimal(s.coefficient, 2)
        ),
        format_rupiah(s.up),
    ])
    .row(vec![
        "Uang Penghargaan Masa Kerja (UPMK)".to_string(),
        format!("{} × {}", s.upmk_multiplier, format_rupiah(upah)),
        format_rupiah(s.upmk),
    ])
    .row(vec![
        "Uang Penggantian Hak (UPH)".to_string(),
        format!("{} × (UP + UPMK)", format_percent(UPH_RATE * 100.0)),
        format_rupiah(s.uph),
    ])
    .footer("Total", format_rupiah(s.total))
}

fn tenure_text(s: &Severance) -> String {
    format!("{} tahun", format_decimal(s.tenure_years, 2))
}

impl Template for Pesangon {
    const ID: &'static str = "pesangon";
    const TITLE: &'static str = "Perhitungan Pesangon";
    const DESCRIPTION: &'static str = concat!(
        "Perhitungan uang pesangon, uang penghargaan masa kerja dan uang penggantian hak ",
        "berdasarkan masa kerja, upah dan alasan PHK, beserta perjanjian bersama penyelesaiannya."
    );

    type Derived = Result<Severance, CalcError>;

    fn schema() -> DocumentSchema {
        DocumentSchema::new(vec![
            FieldSpec::image("logo", "Logo Perusahaan"),
            FieldSpec::text("perusahaan", "Nama Perusahaan", "PT Cahaya Timur Logistik").required(),
            FieldSpec::text("alamat", "Alamat Perusahaan", "Jl. Raya Bekasi Km. 21, Cakung, Jakarta Timur"),
            FieldSpec::text("nomor", "Nomor Surat", "012/PB-HRD/I/2024"),
            FieldSpec::text("nama", "Nama Karyawan", "Hendra Saputra").required(),
            FieldSpec::text("nik", "NIK", "3175031204880002"),
            FieldSpec::text("jabatan", "Jabatan", "Staf Gudang"),
            FieldSpec::date("tanggal_masuk", "Tanggal Masuk", 2021, 1, 4),
            FieldSpec::date("tanggal_berhenti", "Tanggal Berhenti", 2024, 1, 4),
            FieldSpec::money("upah", "Upah Bulanan", 8_000_000.0),
            FieldSpec::choice("alasan", "Alasan PHK", TerminationReason::CHOICES, "efisiensi"),
            FieldSpec::list(
                "perwakilan",
                "Saksi / Perwakilan",
                vec![ColumnSpec::text("nama", "Nama"), ColumnSpec::text("jabatan", "Jabatan")],
                vec![
                    representative("Agus Setiawan", "Ketua Serikat Pekerja"),
                    representative("Maria Ulfa", "Staf Personalia"),
                ],
            ),
            FieldSpec::text("penandatangan", "Nama Penandatangan", "Lukas Wibowo").required(),
            FieldSpec::text("jabatan_penandatangan", "Jabatan Penandatangan", "Direktur Operasional"),
            FieldSpec::text("kota", "Kota", "Jakarta"),
            FieldSpec::date("tanggal_surat", "Tanggal Surat", 2024, 1, 10),
        ])
        .with_variants(&[(Variant::First, "Perhitungan"), (Variant::Second, "Perjanjian Bersama")])
    }

    fn derive(model: &DocumentModel) -> Self::Derived {
        let (Some(start), Some(end)) = (model.date("tanggal_masuk"), model.date("tanggal_berhenti"))
        else {
            return Err(CalcError::DateOutOfRange);
        };
        calculate_for_period(start, end, model.number("upah"), reason(model))
    }

    fn render(model: &DocumentModel, derived: &Self::Derived, variant: Variant) -> Document {
        let alasan = reason(model);
        let mut doc = match variant {
            Variant::First => Document::new(Self::TITLE),
            Variant::Second => Document::new(Self::TITLE).with_page(PageSetup::running(
                format!("Perjanjian Bersama No. {}", model.text("nomor")),
                "Paraf PIHAK PERTAMA: ........   Paraf PIHAK KEDUA: ........",
            )),
        };
        doc.push(kop(model, "perusahaan", &["alamat"]));

        let karyawan = fields([
            ("Nama", model.text("nama").to_string()),
            ("NIK", model.text("nik").to_string()),
            ("Jabatan", model.text("jabatan").to_string()),
            ("Tanggal Masuk", date_text(model, "tanggal_masuk")),
            ("Tanggal Berhenti", date_text(model, "tanggal_berhenti")),
            ("Upah Bulanan", format_rupiah(model.number("upah"))),
            ("Alasan PHK", alasan.label().to_string()),
        ]);

        match variant {
            Variant::First => {
                doc.push(Block::title(
                    "PERHITUNGAN PESANGON",
                    Some(format!("Nomor: {}", model.text("nomor"))),
                ))
                .push(karyawan);

                match derived {
                    Ok(s) => {
                        doc.push(fields([("Masa Kerja", tenure_text(s))]))
                            .push(Block::Table(components(model, s)))
                            .push(Block::Paragraph(
                                Paragraph::plain("Terbilang: ")
                                    .strong(capitalize(&terbilang_rupiah(s.total)))
                                    .align(Align::Left),
                            ));
                    }
                    Err(error) => {
                        doc.push(calc_note(error));
                    }
                }

                doc.push(Block::Signatures(SignatureBlock {
                    place_date: Some(place_date(model, "tanggal_surat")),
                    signatories: vec![Signatory::new(
                        model.text("perusahaan").to_string(),
                        model.text("penandatangan"),
                    )
                    .titled(model.text("jabatan_penandatangan"))],
                    witnesses: Vec::new(),
                    stamp: false,
                }));
            }
            Variant::Second => {
                doc.push(Block::title(
                    "PERJANJIAN BERSAMA",
                    Some(format!("Nomor: {}", model.text("nomor"))),
                ))
                .push(Block::Paragraph(Paragraph::plain(
                    "Pada hari ini telah dibuat dan disepakati Perjanjian Bersama antara:",
                )))
                .push(fields([
                    ("Nama", model.text("penandatangan")),
                    ("Jabatan", model.text("jabatan_penandatangan")),
                    ("Perusahaan", model.text("perusahaan")),
                ]))
                .push(Block::Paragraph(
                    Paragraph::plain("selanjutnya disebut ").strong("PIHAK PERTAMA").text(", dan"),
                ))
                .push(karyawan)
                .push(Block::Paragraph(
                    Paragraph::plain("selanjutnya disebut ").strong("PIHAK KEDUA").text("."),
                ));

                let s = match derived {
                    Ok(s) => s,
                    Err(error) => {
                        doc.push(calc_note(error));
                        return doc;
                    }
                };

                let clauses = vec![
                    Clause::new(
                        "Pasal 1\nPemutusan Hubungan Kerja",
                        vec![Paragraph::plain(format!(
                            "PARA PIHAK sepakat mengakhiri hubungan kerja terhitung sejak {} dengan alasan {}, setelah masa kerja {}.",
                            date_text(model, "tanggal_berhenti"),
                            alasan.label().to_lowercase(),
                            tenure_text(s)
                        ))],
                    ),
                    Clause::new(
                        "Pasal 2\nHak PIHAK KEDUA",
                        vec![
                            Paragraph::plain("PIHAK PERTAMA membayar kepada PIHAK KEDUA hak-hak sebagai berikut:"),
                            Paragraph::plain(format!("a. Uang Pesangon sebesar {};", format_rupiah(s.up))).align(Align::Left),
                            Paragraph::plain(format!("b. Uang Penghargaan Masa Kerja sebesar {};", format_rupiah(s.upmk))).align(Align::Left),
                            Paragraph::plain(format!("c. Uang Penggantian Hak sebesar {},", format_rupiah(s.uph))).align(Align::Left),
                            Paragraph::plain("seluruhnya berjumlah ")
                                .strong(format_rupiah(s.total))
                                .text(format!(" ({}).", terbilang_rupiah(s.total))),
                        ],
                    ),
                    Clause::new(
                        "Pasal 3\nPembayaran",
                        vec![Paragraph::plain(
                            "Pembayaran dilakukan sekaligus melalui transfer ke rekening PIHAK KEDUA paling lambat 14 (empat belas) hari sejak perjanjian ini ditandatangani.",
                        )],
                    ),
                    Clause::new(
                        "Pasal 4\nPenyelesaian",
                        vec![Paragraph::plain(
                            "Dengan dipenuhinya Pasal 2, PARA PIHAK menyatakan tidak ada lagi tuntutan apa pun di kemudian hari terkait hubungan kerja tersebut.",
                        )],
                    ),
                ];

                doc.push(Block::Clauses(clauses)).push(Block::Signatures(SignatureBlock {
                    place_date: Some(place_date(model, "tanggal_surat")),
                    signatories: vec![
                        Signatory::new("PIHAK PERTAMA", model.text("penandatangan"))
                            .titled(model.text("jabatan_penandatangan")),
                        Signatory::new("PIHAK KEDUA", model.text("nama")),
                    ],
                    witnesses: model
                        .rows("perwakilan")
                        .iter()
                        .filter(|row| !row.text("nama").trim().is_empty())
                        .map(|row| Signatory::new("Saksi", row.text("nama")).titled(row.text("jabatan")))
                        .collect(),
                    stamp: true,
                }));
            }
        }
        doc
    }

    fn validate(model: &DocumentModel) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        validate_required(model.text("perusahaan"), "perusahaan", "Nama Perusahaan", &mut errors);
        validate_required(model.text("nama"), "nama", "Nama Karyawan", &mut errors);
        validate_nik_optional(model.text("nik"), "nik", &mut errors);
        validate_required(model.text("penandatangan"), "penandatangan", "Nama Penandatangan", &mut errors);

        if model.number("upah") <= 0.0 {
            errors.add(ValidationError::new("upah", "Upah bulanan harus lebih dari 0"));
        }
        if let (Some(start), Some(end)) = (model.date("tanggal_masuk"), model.date("tanggal_berhenti")) {
            if end < start {
                errors.add(ValidationError::date_order(
                    "tanggal_berhenti",
                    "Tanggal Masuk",
                    "Tanggal Berhenti",
                ));
            }
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{render_document, text_content};
    use serde_json::json;

    fn model_with(overrides: serde_json::Value) -> DocumentModel {
        let schema = Pesangon::schema();
        schema
            .apply_fields(&schema.default_model(), overrides.as_object().unwrap())
            .unwrap()
    }

    #[test]
    fn test_sample_severance() {
        let s = Pesangon::derive(&model_with(json!({}))).unwrap();
        assert_eq!(s.tenure_years, 3.0);
        assert_eq!(s.up, 32_000_000.0);
        assert_eq!(s.upmk, 16_000_000.0);
        assert!((s.uph - 7_200_000.0).abs() < 1e-6);
        assert!((s.total - 55_200_000.0).abs() < 1e-6);
    }

    #[test]
    fn test_reason_changes_coefficient() {
        let s = Pesangon::derive(&model_with(json!({ "alasan": "meninggal" }))).unwrap();
        assert_eq!(s.coefficient, 2.0);
        assert_eq!(s.up, 64_000_000.0);
    }

    #[test]
    fn test_calculation_table() {
        let model = model_with(json!({}));
        let derived = Pesangon::derive(&model);
        let text = text_content(&render_document(&Pesangon::render(&model, &derived, Variant::First)));
        assert!(text.contains("Uang Pesangon (UP) 4 × Rp 8.000.000 × 1 Rp 32.000.000"));
        assert!(text.contains("15% × (UP + UPMK) Rp 7.200.000"));
        assert!(text.contains("Total Rp 55.200.000"));
        assert!(text.contains("Lima puluh lima juta dua ratus ribu rupiah"));
    }

    #[test]
    fn test_agreement_lists_representatives_as_witnesses() {
        let model = model_with(json!({}));
        let derived = Pesangon::derive(&model);
        let doc = Pesangon::render(&model, &derived, Variant::Second);
        assert!(doc.page.running_header.is_some());

        let text = text_content(&render_document(&doc));
        assert!(text.contains("Pasal 2 Hak PIHAK KEDUA"));
        assert!(text.contains("Agus Setiawan Ketua Serikat Pekerja"));
        assert!(text.contains("alasan efisiensi, setelah masa kerja 3 tahun"));
    }

    #[test]
    fn test_end_before_start_is_reported() {
        let model = model_with(json!({ "tanggal_berhenti": "2020-01-01" }));
        let derived = Pesangon::derive(&model);
        assert!(matches!(derived, Err(CalcError::EndBeforeStart { .. })));

        let text = text_content(&render_document(&Pesangon::render(&model, &derived, Variant::First)));
        assert!(text.contains("Perhitungan tidak dapat dibuat"));
        assert!(!text.contains("Uang Pesangon (UP)"));
        assert_eq!(Pesangon::validate(&model).len(), 1);
    }
}
