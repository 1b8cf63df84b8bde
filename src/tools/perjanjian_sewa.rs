//! Surat Perjanjian Sewa (rental agreement).
//!
//! Long enough to span several printed pages, so it uses the repeating
//! header/footer frame with initials in the footer.

use super::common::{date_text, fields, place_date};
use super::Template;
use crate::calc::format::{add_months, capitalize, format_day_date, format_long_date, terbilang_rupiah};
use crate::calc::format_rupiah;
use crate::model::validation::{
    validate_nik_optional, validate_required, ValidationError, ValidationErrors,
};
use crate::model::{DocumentModel, DocumentSchema, FieldSpec, Variant};
use crate::render::{
    Block, Clause, Document, PageSetup, Paragraph, SignatureBlock, Signatory,
};

pub struct PerjanjianSewa;

/// Computed terms of the agreement.
#[derive(Debug, Clone, PartialEq)]
pub struct Ketentuan {
    /// Opening date with weekday, e.g. "Jumat, 15 Maret 2024".
    pub hari_tanggal: String,
    pub mulai: String,
    pub selesai: String,
    pub lama_bulan: u32,
    pub harga_bulanan: f64,
    pub total_sewa: f64,
    pub deposit: f64,
}

impl Template for PerjanjianSewa {
    const ID: &'static str = "perjanjian_sewa";
    const TITLE: &'static str = "Surat Perjanjian Sewa";
    const DESCRIPTION: &'static str = concat!(
        "Surat Perjanjian Sewa rumah atau kamar kos antara pemilik dan penyewa, ",
        "berisi pasal-pasal jangka waktu, harga sewa, deposit, kewajiban para pihak, ",
        "dan tanda tangan dengan dua saksi."
    );
    const SUBJECT_FIELD: &'static str = "penyewa_nama";

    type Derived = Ketentuan;

    fn schema() -> DocumentSchema {
        DocumentSchema::new(vec![
            FieldSpec::text("nomor", "Nomor Perjanjian", "PS/017/III/2024"),
            FieldSpec::date("tanggal_perjanjian", "Tanggal Perjanjian", 2024, 3, 15),
            FieldSpec::text("kota", "Kota", "Jakarta"),
            FieldSpec::text("pemilik_nama", "Nama Pemilik", "Hendra Wijaya").required(),
            FieldSpec::text("pemilik_nik", "NIK Pemilik", "3175011203750004"),
            FieldSpec::paragraph(
                "pemilik_alamat",
                "Alamat Pemilik",
                "Jl. Pulo Gebang Permai Blok C2 No. 8, Jakarta Timur",
            ),
            FieldSpec::text("penyewa_nama", "Nama Penyewa", "Dewi Anggraini").required(),
            FieldSpec::text("penyewa_nik", "NIK Penyewa", "3275046609940002"),
            FieldSpec::paragraph(
                "penyewa_alamat",
                "Alamat Penyewa",
                "Perum Bumi Bekasi Baru Blok F No. 21, Bekasi",
            ),
            FieldSpec::paragraph(
                "objek_alamat",
                "Alamat Objek Sewa",
                "Jl. Kenanga Raya No. 12, RT 004/RW 007, Cakung Barat, Jakarta Timur",
            )
            .required(),
            FieldSpec::paragraph(
                "objek_keterangan",
                "Keterangan Objek",
                "Rumah tinggal satu lantai dengan dua kamar tidur, satu kamar mandi, dapur, listrik 2.200 VA dan air PAM.",
            ),
            FieldSpec::date("tanggal_mulai", "Tanggal Mulai Sewa", 2024, 4, 1),
            FieldSpec::number("lama_bulan", "Lama Sewa (bulan)", 12.0),
            FieldSpec::money("harga_sewa", "Harga Sewa per Bulan", 3_500_000.0),
            FieldSpec::money("deposit", "Uang Jaminan", 3_500_000.0),
            FieldSpec::number("jatuh_tempo", "Tanggal Jatuh Tempo Bayar", 5.0),
            FieldSpec::text("saksi1", "Saksi 1", "Agus Salim"),
            FieldSpec::text("saksi2", "Saksi 2", "Lina Marlina"),
        ])
        .with_variants(&[(Variant::First, "Sewa Rumah"), (Variant::Second, "Sewa Kos")])
    }

    fn derive(model: &DocumentModel) -> Ketentuan {
        let lama_bulan = model.number("lama_bulan").max(0.0).round() as u32;
        let harga_bulanan = model.number("harga_sewa");

        let selesai = model
            .date("tanggal_mulai")
            .and_then(|start| add_months(start, lama_bulan))
            .and_then(|end| end.pred_opt())
            .map(format_long_date)
            .unwrap_or_else(|| date_text(model, "tanggal_mulai"));

        Ketentuan {
            hari_tanggal: model
                .date("tanggal_perjanjian")
                .map(format_day_date)
                .unwrap_or_else(|| date_text(model, "tanggal_perjanjian")),
            mulai: date_text(model, "tanggal_mulai"),
            selesai,
            lama_bulan,
            harga_bulanan,
            total_sewa: harga_bulanan * lama_bulan as f64,
            deposit: model.number("deposit"),
        }
    }

    fn render(model: &DocumentModel, k: &Ketentuan, variant: Variant) -> Document {
        let kos = variant == Variant::Second;
        let objek = if kos { "kamar kos" } else { "rumah" };
        let title = if kos {
            "SURAT PERJANJIAN SEWA KAMAR KOS"
        } else {
            "SURAT PERJANJIAN SEWA RUMAH"
        };

        let page = PageSetup::running(
            format!("Perjanjian Sewa No. {}", model.text("nomor")),
            "Paraf Pihak Pertama: ________    Paraf Pihak Kedua: ________",
        );
        let mut doc = Document::new(Self::TITLE).with_page(page);

        doc.push(Block::title(title, Some(format!("Nomor: {}", model.text("nomor")))))
            .push(Block::Paragraph(Paragraph::plain(format!(
                "Pada hari ini, {}, bertempat di {}, kami yang bertanda tangan di bawah ini:",
                k.hari_tanggal,
                model.text("kota")
            ))))
            .push(fields([
                ("Nama", model.text("pemilik_nama")),
                ("NIK", model.text("pemilik_nik")),
                ("Alamat", model.text("pemilik_alamat")),
            ]))
            .push(Block::Paragraph(
                Paragraph::plain("selanjutnya disebut ").strong("PIHAK PERTAMA").text(" (pemilik)."),
            ))
            .push(fields([
                ("Nama", model.text("penyewa_nama")),
                ("NIK", model.text("penyewa_nik")),
                ("Alamat", model.text("penyewa_alamat")),
            ]))
            .push(Block::Paragraph(
                Paragraph::plain("selanjutnya disebut ").strong("PIHAK KEDUA").text(" (penyewa)."),
            ))
            .push(Block::Paragraph(Paragraph::plain(format!(
                "Kedua belah pihak sepakat untuk mengadakan perjanjian sewa-menyewa {} dengan ketentuan sebagai berikut:",
                objek
            ))));

        let harga = format!(
            "{} ({})",
            format_rupiah(k.harga_bulanan),
            capitalize(&terbilang_rupiah(k.harga_bulanan))
        );
        let deposit = format!(
            "{} ({})",
            format_rupiah(k.deposit),
            capitalize(&terbilang_rupiah(k.deposit))
        );

        let mut clauses = vec![
            Clause::new(
                "Pasal 1\nObjek Sewa",
                vec![
                    Paragraph::plain(format!(
                        "PIHAK PERTAMA menyewakan kepada PIHAK KEDUA {} yang terletak di {}.",
                        objek,
                        model.text("objek_alamat")
                    )),
                    Paragraph::plain(model.text("objek_keterangan")),
                ],
            ),
            Clause::new(
                "Pasal 2\nJangka Waktu",
                vec![Paragraph::plain(format!(
                    "Sewa berlangsung selama {} bulan, terhitung sejak {} sampai dengan {}.",
                    k.lama_bulan, k.mulai, k.selesai
                ))],
            ),
            Clause::new(
                "Pasal 3\nHarga Sewa dan Pembayaran",
                vec![
                    Paragraph::plain("Harga sewa disepakati sebesar ")
                        .strong(harga)
                        .text(format!(
                            " per bulan, sehingga seluruhnya berjumlah {} untuk {} bulan.",
                            format_rupiah(k.total_sewa),
                            k.lama_bulan
                        )),
                    Paragraph::plain(format!(
                        "Pembayaran dilakukan paling lambat tanggal {} setiap bulan.",
                        model.number("jatuh_tempo").round()
                    )),
                ],
            ),
            Clause::new(
                "Pasal 4\nUang Jaminan",
                vec![Paragraph::plain(format!(
                    "PIHAK KEDUA menyerahkan uang jaminan sebesar {} yang akan dikembalikan pada akhir masa sewa setelah dikurangi biaya kerusakan, bila ada.",
                    deposit
                ))],
            ),
        ];

        if kos {
            clauses.push(Clause::new(
                "Pasal 5\nTata Tertib",
                vec![
                    Paragraph::plain("PIHAK KEDUA wajib menjaga ketenangan dan kebersihan lingkungan kos."),
                    Paragraph::plain("Tamu menginap wajib melapor kepada PIHAK PERTAMA."),
                ],
            ));
        } else {
            clauses.push(Clause::new(
                "Pasal 5\nKewajiban Para Pihak",
                vec![
                    Paragraph::plain("PIHAK PERTAMA menjamin rumah bebas dari sengketa dan dapat dihuni dengan layak."),
                    Paragraph::plain("PIHAK KEDUA wajib memelihara rumah, membayar tagihan listrik, air dan iuran lingkungan selama masa sewa, serta tidak mengubah bangunan tanpa izin tertulis PIHAK PERTAMA."),
                ],
            ));
            clauses.push(Clause::new(
                "Pasal 6\nPengakhiran",
                vec![Paragraph::plain("Apabila PIHAK KEDUA mengakhiri sewa sebelum jangka waktu berakhir, uang sewa yang telah dibayarkan tidak dapat diminta kembali.")],
            ));
        }

        let last = clauses.len() + 1;
        clauses.push(Clause::new(
            format!("Pasal {}\nPenyelesaian Perselisihan", last),
            vec![Paragraph::plain(
                "Perselisihan yang timbul diselesaikan secara musyawarah untuk mufakat. Apabila tidak tercapai, para pihak sepakat menempuh jalur hukum yang berlaku.",
            )],
        ));

        doc.push(Block::Clauses(clauses))
            .push(Block::Paragraph(Paragraph::plain(
                "Demikian perjanjian ini dibuat dalam rangkap dua bermeterai cukup, masing-masing mempunyai kekuatan hukum yang sama.",
            )))
            .push(Block::Signatures(SignatureBlock {
                place_date: Some(place_date(model, "tanggal_perjanjian")),
                signatories: vec![
                    Signatory::new("PIHAK PERTAMA", model.text("pemilik_nama")),
                    Signatory::new("PIHAK KEDUA", model.text("penyewa_nama")),
                ],
                witnesses: [model.text("saksi1"), model.text("saksi2")]
                    .iter()
                    .enumerate()
                    .filter(|(_, name)| !name.trim().is_empty())
                    .map(|(i, name)| Signatory::new(format!("Saksi {}", i + 1), *name))
                    .collect(),
                stamp: true,
            }));
        doc
    }

    fn validate(model: &DocumentModel) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        validate_required(model.text("pemilik_nama"), "pemilik_nama", "Nama Pemilik", &mut errors);
        validate_nik_optional(model.text("pemilik_nik"), "pemilik_nik", &mut errors);
        validate_required(model.text("penyewa_nama"), "penyewa_nama", "Nama Penyewa", &mut errors);
        validate_nik_optional(model.text("penyewa_nik"), "penyewa_nik", &mut errors);
        validate_required(model.text("objek_alamat"), "objek_alamat", "Alamat Objek Sewa", &mut errors);

        if model.number("lama_bulan") < 1.0 {
            errors.add(
                ValidationError::new("lama_bulan", "Lama sewa minimal 1 bulan")
                    .with_suggestion("Isi lama sewa dalam bulan, contoh: 12"),
            );
        }
        let jatuh_tempo = model.number("jatuh_tempo");
        if !(1.0..=31.0).contains(&jatuh_tempo) {
            errors.add(ValidationError::new(
                "jatuh_tempo",
                "Tanggal jatuh tempo harus di antara 1 dan 31",
            ));
        }

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{render_document, text_content};
    use serde_json::json;

    #[test]
    fn test_derive_terms() {
        let k = PerjanjianSewa::derive(&PerjanjianSewa::schema().default_model());
        assert_eq!(k.hari_tanggal, "Jumat, 15 Maret 2024");
        assert_eq!(k.mulai, "1 April 2024");
        assert_eq!(k.selesai, "31 Maret 2025");
        assert_eq!(k.total_sewa, 42_000_000.0);
    }

    #[test]
    fn test_render_has_running_frame_and_witnesses() {
        let model = PerjanjianSewa::schema().default_model();
        let k = PerjanjianSewa::derive(&model);
        let doc = PerjanjianSewa::render(&model, &k, Variant::First);

        assert!(doc.page.running_header.is_some());
        let text = text_content(&render_document(&doc));
        assert!(text.contains("Rp 3.500.000 (Tiga juta lima ratus ribu rupiah)"));
        assert!(text.contains("Pasal 7 Penyelesaian Perselisihan"));
        assert!(text.contains("Saksi 2"));
    }

    #[test]
    fn test_kos_variant_wording() {
        let model = PerjanjianSewa::schema().default_model();
        let k = PerjanjianSewa::derive(&model);
        let text = text_content(&render_document(&PerjanjianSewa::render(
            &model,
            &k,
            Variant::Second,
        )));
        assert!(text.contains("SEWA KAMAR KOS"));
        assert!(text.contains("Tata Tertib"));
        assert!(text.contains("Pasal 6 Penyelesaian Perselisihan"));
    }

    #[test]
    fn test_validation_of_terms() {
        let schema = PerjanjianSewa::schema();
        let model = schema
            .apply_fields(
                &schema.default_model(),
                json!({ "lama_bulan": 0, "jatuh_tempo": "40" }).as_object().unwrap(),
            )
            .unwrap();
        assert_eq!(PerjanjianSewa::validate(&model).len(), 2);
    }
}
