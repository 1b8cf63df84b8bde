//! Surat Pernyataan Belum Memiliki Rumah.
//!
//! A statement letter for citizens who need to prove they don't own a house
//! yet, typically for KPR (mortgage) applications.

use super::common::{fields, place_date};
use super::Template;
use crate::model::validation::{
    validate_nik, validate_phone, validate_required, validate_ttl, ValidationErrors,
};
use crate::model::{ChoiceOption, DocumentModel, DocumentSchema, FieldSpec, Variant};
use crate::render::{Align, Block, Document, Paragraph, SignatureBlock, Signatory};

const JENIS_KELAMIN: &[ChoiceOption] = &[
    ChoiceOption {
        value: "L",
        label: "Laki-laki",
    },
    ChoiceOption {
        value: "P",
        label: "Perempuan",
    },
];

pub struct SuratBelumMemilikiRumah;

impl Template for SuratBelumMemilikiRumah {
    const ID: &'static str = "surat_belum_memiliki_rumah";
    const TITLE: &'static str = "Surat Pernyataan Belum Memiliki Rumah";
    const DESCRIPTION: &'static str = concat!(
        "Surat Pernyataan Belum Memiliki Rumah untuk keperluan pengajuan KPR ",
        "(Kredit Pemilikan Rumah) di bank. Data yang dibutuhkan: nama lengkap, NIK (16 digit), ",
        "tempat/tanggal lahir, jenis kelamin, agama, pekerjaan, alamat lengkap, nomor telepon, ",
        "kelurahan dan bank tujuan KPR."
    );

    type Derived = ();

    fn schema() -> DocumentSchema {
        DocumentSchema::new(vec![
            FieldSpec::text("nama", "Nama Pemohon", "Siti Nurhaliza").required(),
            FieldSpec::text("nik", "NIK", "3175024501900007").required(),
            FieldSpec::text("ttl", "Tempat, Tanggal Lahir", "Jakarta, 5 Januari 1990").required(),
            FieldSpec::choice("jenis_kelamin", "Jenis Kelamin", JENIS_KELAMIN, "P"),
            FieldSpec::text("agama", "Agama", "Islam").required(),
            FieldSpec::text("pekerjaan", "Pekerjaan", "Karyawan Swasta").required(),
            FieldSpec::paragraph(
                "alamat",
                "Alamat",
                "Jl. Raya Cakung Barat No. 17, RT 005/RW 003, Cakung Barat, Cakung, Jakarta Timur",
            )
            .required(),
            FieldSpec::text("telp", "Nomor Telepon", "0812-8765-4321").required(),
            FieldSpec::text("kelurahan", "Nama Kelurahan", "Cakung Barat").required(),
            FieldSpec::text("bank_tujuan", "Bank Tujuan KPR", "Bank BTN").required(),
            FieldSpec::text("kota", "Kota", "Jakarta"),
            FieldSpec::date("tanggal", "Tanggal Surat", 2024, 3, 15),
        ])
    }

    fn derive(_model: &DocumentModel) -> Self::Derived {}

    fn render(model: &DocumentModel, _derived: &(), _variant: Variant) -> Document {
        let jenis_kelamin = JENIS_KELAMIN
            .iter()
            .find(|o| o.value == model.text("jenis_kelamin"))
            .map(|o| o.label)
            .unwrap_or("");

        let mut doc = Document::new(Self::TITLE);
        doc.push(Block::title("SURAT PERNYATAAN BELUM MEMILIKI RUMAH", None))
            .push(Block::Paragraph(Paragraph::plain(
                "Yang bertanda tangan di bawah ini:",
            )))
            .push(fields([
                ("Nama", model.text("nama")),
                ("NIK", model.text("nik")),
                ("Tempat, Tanggal Lahir", model.text("ttl")),
                ("Jenis Kelamin", jenis_kelamin),
                ("Agama", model.text("agama")),
                ("Pekerjaan", model.text("pekerjaan")),
                ("Alamat", model.text("alamat")),
                ("No. Telepon", model.text("telp")),
            ]))
            .push(Block::Paragraph(
                Paragraph::plain("Dengan ini menyatakan dengan sesungguhnya bahwa saya ")
                    .strong("belum memiliki rumah")
                    .text(format!(
                        " atas nama sendiri maupun atas nama suami/istri, dan sampai saat ini masih berdomisili di wilayah Kelurahan {}.",
                        model.text("kelurahan")
                    ))
                    .indented(),
            ))
            .push(Block::Paragraph(
                Paragraph::plain(format!(
                    "Surat pernyataan ini saya buat untuk melengkapi persyaratan pengajuan Kredit Pemilikan Rumah (KPR) pada {}.",
                    model.text("bank_tujuan")
                ))
                .indented(),
            ))
            .push(Block::Paragraph(
                Paragraph::plain(
                    "Demikian surat pernyataan ini saya buat dengan sebenar-benarnya tanpa paksaan dari pihak mana pun. Apabila di kemudian hari pernyataan ini tidak benar, saya bersedia menerima sanksi sesuai ketentuan hukum yang berlaku.",
                )
                .indented(),
            ))
            .push(Block::Signatures(SignatureBlock {
                place_date: Some(place_date(model, "tanggal")),
                signatories: vec![
                    Signatory::new(format!("Mengetahui,\nLurah {}", model.text("kelurahan")), "(....................................)"),
                    Signatory::new("Yang membuat pernyataan,", model.text("nama")),
                ],
                witnesses: Vec::new(),
                stamp: true,
            }))
            .push(Block::Paragraph(
                Paragraph::plain("Lampiran: fotokopi KTP dan Kartu Keluarga").align(Align::Left),
            ));
        doc
    }

    fn validate(model: &DocumentModel) -> ValidationErrors {
        let mut errors = ValidationErrors::new();

        validate_required(model.text("nama"), "nama", "Nama Pemohon", &mut errors);
        validate_nik(model.text("nik"), "nik", &mut errors);
        validate_ttl(model.text("ttl"), "ttl", &mut errors);
        validate_required(model.text("agama"), "agama", "Agama", &mut errors);
        validate_required(model.text("pekerjaan"), "pekerjaan", "Pekerjaan", &mut errors);
        validate_required(model.text("alamat"), "alamat", "Alamat", &mut errors);
        validate_phone(model.text("telp"), "telp", &mut errors);
        validate_required(model.text("kelurahan"), "kelurahan", "Nama Kelurahan", &mut errors);
        validate_required(model.text("bank_tujuan"), "bank_tujuan", "Bank Tujuan KPR", &mut errors);

        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{render_document, text_content};
    use crate::tools::{TemplatedDocument, Tool};
    use serde_json::json;

    #[test]
    fn test_render_sample() {
        let tool = TemplatedDocument::<SuratBelumMemilikiRumah>::new();
        let model = tool.schema().default_model();
        let text = text_content(&render_document(&tool.build(&model, Variant::First)));

        assert!(text.contains("SURAT PERNYATAAN BELUM MEMILIKI RUMAH"));
        assert!(text.contains("Jenis Kelamin : Perempuan"));
        assert!(text.contains("pada Bank BTN"));
        assert!(text.contains("Jakarta, 15 Maret 2024"));
    }

    #[test]
    fn test_validation_reports_bad_identity() {
        let schema = SuratBelumMemilikiRumah::schema();
        let model = schema
            .apply_fields(
                &schema.default_model(),
                json!({ "nik": "12345", "telp": "12", "nama": " " })
                    .as_object()
                    .unwrap(),
            )
            .unwrap();

        let errors = SuratBelumMemilikiRumah::validate(&model);
        let fields: Vec<_> = errors.iter().map(|e| e.field.as_str()).collect();
        assert_eq!(fields, vec!["nama", "nik", "telp"]);
    }
}
