//! Surat Keterangan Kerja (employment certificate).

use super::common::{date_text, fields, kop, place_date};
use super::Template;
use crate::calc::format::format_duration;
use crate::model::validation::{
    validate_nik_optional, validate_required, ValidationError, ValidationErrors,
};
use crate::model::{ChoiceOption, DocumentModel, DocumentSchema, FieldSpec, Variant};
use crate::render::{Block, Document, Paragraph, SignatureBlock, Signatory};

const STATUS: &[ChoiceOption] = &[
    ChoiceOption {
        value: "aktif",
        label: "Masih bekerja",
    },
    ChoiceOption {
        value: "berhenti",
        label: "Sudah berhenti",
    },
];

pub struct SuratKeteranganKerja;

/// Employment period as printed in the letter.
#[derive(Debug, Clone, PartialEq)]
pub struct MasaKerja {
    pub masih_bekerja: bool,
    pub mulai: String,
    pub selesai: String,
    /// e.g. "4 tahun 11 bulan"
    pub lama: String,
}

impl Template for SuratKeteranganKerja {
    const ID: &'static str = "surat_keterangan_kerja";
    const TITLE: &'static str = "Surat Keterangan Kerja";
    const DESCRIPTION: &'static str = concat!(
        "Surat Keterangan Kerja dari perusahaan untuk karyawan aktif maupun mantan karyawan, ",
        "lengkap dengan masa kerja. Template: formal atau ringkas."
    );

    type Derived = MasaKerja;

    fn schema() -> DocumentSchema {
        DocumentSchema::new(vec![
            FieldSpec::image("logo", "Logo Perusahaan"),
            FieldSpec::text("perusahaan", "Nama Perusahaan", "PT Sinar Maju Sejahtera").required(),
            FieldSpec::text(
                "alamat_perusahaan",
                "Alamat Perusahaan",
                "Jl. Jend. Sudirman Kav. 52-53, Jakarta Selatan 12190",
            ),
            FieldSpec::text("kontak_perusahaan", "Telepon / Email", "(021) 5150 1234 · hrd@sinarmaju.co.id"),
            FieldSpec::text("nomor_surat", "Nomor Surat", "045/HRD-SKK/III/2024"),
            FieldSpec::text("nama", "Nama Karyawan", "Rina Kartika Sari").required(),
            FieldSpec::text("nik", "NIK", "3174056708920003"),
            FieldSpec::text("jabatan", "Jabatan", "Senior Accountant").required(),
            FieldSpec::text("departemen", "Departemen", "Keuangan"),
            FieldSpec::date("tanggal_masuk", "Tanggal Mulai Bekerja", 2019, 3, 1),
            FieldSpec::date("tanggal_keluar", "Tanggal Berhenti", 2024, 2, 29),
            FieldSpec::choice("status", "Status Karyawan", STATUS, "berhenti"),
            FieldSpec::paragraph(
                "penilaian",
                "Catatan Kinerja",
                "Selama bekerja yang bersangkutan menunjukkan dedikasi, loyalitas dan tanggung jawab yang baik terhadap pekerjaannya.",
            ),
            FieldSpec::text("keperluan", "Keperluan", "melamar pekerjaan"),
            FieldSpec::text("penandatangan", "Nama Penandatangan", "Budi Hartono").required(),
            FieldSpec::text("jabatan_penandatangan", "Jabatan Penandatangan", "HRD Manager"),
            FieldSpec::text("kota", "Kota", "Jakarta"),
            FieldSpec::date("tanggal_surat", "Tanggal Surat", 2024, 3, 15),
        ])
        .with_variants(&[(Variant::First, "Formal"), (Variant::Second, "Ringkas")])
    }

    fn derive(model: &DocumentModel) -> MasaKerja {
        let masih_bekerja = model.text("status") == "aktif";
        let end_field = if masih_bekerja {
            "tanggal_surat"
        } else {
            "tanggal_keluar"
        };

        let lama = match (model.date("tanggal_masuk"), model.date(end_field)) {
            (Some(start), Some(end)) => format_duration(start, end),
            _ => "-".to_string(),
        };

        MasaKerja {
            masih_bekerja,
            mulai: date_text(model, "tanggal_masuk"),
            selesai: date_text(model, "tanggal_keluar"),
            lama,
        }
    }

    fn render(model: &DocumentModel, masa: &MasaKerja, variant: Variant) -> Document {
        let mut doc = Document::new(Self::TITLE);
        doc.push(kop(
            model,
            "perusahaan",
            &["alamat_perusahaan", "kontak_perusahaan"],
        ))
        .push(Block::title(
            "SURAT KETERANGAN KERJA",
            Some(format!("Nomor: {}", model.text("nomor_surat"))),
        ));

        let periode = if masa.masih_bekerja {
            format!("sejak {} sampai dengan saat ini", masa.mulai)
        } else {
            format!("sejak {} sampai dengan {}", masa.mulai, masa.selesai)
        };

        match variant {
            Variant::First => {
                doc.push(Block::Paragraph(Paragraph::plain(
                    "Yang bertanda tangan di bawah ini:",
                )))
                .push(fields([
                    ("Nama", model.text("penandatangan")),
                    ("Jabatan", model.text("jabatan_penandatangan")),
                    ("Perusahaan", model.text("perusahaan")),
                ]))
                .push(Block::Paragraph(Paragraph::plain(
                    "dengan ini menerangkan bahwa:",
                )))
                .push(fields([
                    ("Nama", model.text("nama")),
                    ("NIK", model.text("nik")),
                    ("Jabatan", model.text("jabatan")),
                    ("Departemen", model.text("departemen")),
                    ("Masa Kerja", masa.lama.as_str()),
                ]))
                .push(Block::Paragraph(
                    Paragraph::plain(format!(
                        "adalah benar {} karyawan {} {} dengan jabatan terakhir ",
                        if masa.masih_bekerja { "merupakan" } else { "pernah menjadi" },
                        model.text("perusahaan"),
                        periode,
                    ))
                    .strong(model.text("jabatan"))
                    .text("."),
                ))
                .push(Block::Paragraph(Paragraph::plain(model.text("penilaian"))));
            }
            Variant::Second => {
                doc.push(Block::Paragraph(
                    Paragraph::plain(format!(
                        "{} menerangkan bahwa Saudara/i ",
                        model.text("perusahaan")
                    ))
                    .strong(model.text("nama"))
                    .text(format!(
                        " {} bekerja sebagai {} pada Departemen {} {} (masa kerja {}).",
                        if masa.masih_bekerja { "masih" } else { "telah" },
                        model.text("jabatan"),
                        model.text("departemen"),
                        periode,
                        masa.lama,
                    )),
                ));
            }
        }

        doc.push(Block::Paragraph(Paragraph::plain(format!(
            "Surat keterangan ini dibuat untuk keperluan {}. Demikian agar dapat dipergunakan sebagaimana mestinya.",
            model.text("keperluan")
        ))))
        .push(Block::Signatures(SignatureBlock {
            place_date: Some(place_date(model, "tanggal_surat")),
            signatories: vec![Signatory::new(
                model.text("perusahaan").to_string(),
                model.text("penandatangan"),
            )
            .titled(model.text("jabatan_penandatangan"))],
            witnesses: Vec::new(),
            stamp: false,
        }));
        doc
    }

    fn validate(model: &DocumentModel) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        validate_required(model.text("perusahaan"), "perusahaan", "Nama Perusahaan", &mut errors);
        validate_required(model.text("nama"), "nama", "Nama Karyawan", &mut errors);
        validate_nik_optional(model.text("nik"), "nik", &mut errors);
        validate_required(model.text("jabatan"), "jabatan", "Jabatan", &mut errors);
        validate_required(
            model.text("penandatangan"),
            "penandatangan",
            "Nama Penandatangan",
            &mut errors,
        );

        if model.text("status") == "berhenti" {
            if let (Some(start), Some(end)) =
                (model.date("tanggal_masuk"), model.date("tanggal_keluar"))
            {
                if end < start {
                    errors.add(ValidationError::date_order(
                        "tanggal_keluar",
                        "Tanggal Mulai Bekerja",
                        "Tanggal Berhenti",
                    ));
                }
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
        let schema = SuratKeteranganKerja::schema();
        schema
            .apply_fields(&schema.default_model(), overrides.as_object().unwrap())
            .unwrap()
    }

    fn text(model: &DocumentModel, variant: Variant) -> String {
        let masa = SuratKeteranganKerja::derive(model);
        text_content(&render_document(&SuratKeteranganKerja::render(
            model, &masa, variant,
        )))
    }

    #[test]
    fn test_masa_kerja_for_former_employee() {
        let masa = SuratKeteranganKerja::derive(&model_with(json!({})));
        assert!(!masa.masih_bekerja);
        assert_eq!(masa.lama, "4 tahun 11 bulan");
        assert_eq!(masa.selesai, "29 Februari 2024");
    }

    #[test]
    fn test_masa_kerja_for_active_employee_runs_to_letter_date() {
        let masa = SuratKeteranganKerja::derive(&model_with(json!({ "status": "aktif" })));
        assert!(masa.masih_bekerja);
        assert_eq!(masa.lama, "5 tahun");
    }

    #[test]
    fn test_variants_share_data_but_not_wording() {
        let model = model_with(json!({}));
        let formal = text(&model, Variant::First);
        let ringkas = text(&model, Variant::Second);

        assert!(formal.contains("Yang bertanda tangan di bawah ini"));
        assert!(!ringkas.contains("Yang bertanda tangan di bawah ini"));
        for text in [&formal, &ringkas] {
            assert!(text.contains("Rina Kartika Sari"));
            assert!(text.contains("sejak 1 Maret 2019 sampai dengan 29 Februari 2024"));
            assert!(text.contains("Jakarta, 15 Maret 2024"));
        }
    }

    #[test]
    fn test_validation_flags_reversed_dates() {
        let model = model_with(json!({ "tanggal_keluar": "2018-01-01" }));
        let errors = SuratKeteranganKerja::validate(&model);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors.iter().next().unwrap().field, "tanggal_keluar");
    }
}
