//! Simulasi KPR (mortgage simulation) with fixed and floating rate phases.

use super::common::{calc_note, date_text, fields, place_date};
use super::Template;
use crate::calc::kpr::{simulate, Affordability, KprInput, KprSimulation};
use crate::calc::{format_percent, format_rupiah, CalcError};
use crate::model::validation::{validate_required, ValidationError, ValidationErrors};
use crate::model::{DocumentModel, DocumentSchema, FieldSpec, Variant};
use crate::render::{
    Align, Block, Column, Document, PageSetup, Paragraph, SignatureBlock, Signatory, Table, Tone,
};

pub struct SimulasiKpr;

fn input(model: &DocumentModel) -> KprInput {
    KprInput {
        price: model.number("harga"),
        down_payment_percent: model.number("uang_muka_persen"),
        fixed_rate_percent: model.number("bunga_fix"),
        fixed_years: model.number("masa_fix"),
        floating_rate_percent: model.number("bunga_floating"),
        tenor_years: model.number("tenor"),
        monthly_income: model.number("penghasilan"),
    }
}

fn tone(affordability: Affordability) -> Tone {
    match affordability {
        Affordability::Safe => Tone::Safe,
        Affordability::Warning => Tone::Warning,
        Affordability::Danger => Tone::Danger,
    }
}

fn months_text(months: u32) -> String {
    match (months / 12, months % 12) {
        (y, 0) => format!("{y} tahun"),
        (0, m) => format!("{m} bulan"),
        (y, m) => format!("{y} tahun {m} bulan"),
    }
}

fn ratio_text(ratio_percent: f64) -> String {
    if ratio_percent.is_finite() {
        format_percent(ratio_percent)
    } else {
        "tidak dapat dihitung".to_string()
    }
}

fn summary(model: &DocumentModel, sim: &KprSimulation) -> Block {
    let mut rows = vec![
        ("Harga Properti".to_string(), format_rupiah(model.number("harga"))),
        (
            format!("Uang Muka ({})", format_percent(model.number("uang_muka_persen"))),
            format_rupiah(sim.down_payment),
        ),
        ("Pokok Pinjaman".to_string(), format_rupiah(sim.loan)),
        ("Tenor".to_string(), months_text(sim.total_months)),
        (
            format!(
                "Cicilan Bunga Tetap {} ({})",
                format_percent(model.number("bunga_fix")),
                months_text(sim.fixed_months)
            ),
            format!("{} / bulan", format_rupiah(sim.fixed_payment)),
        ),
    ];
    if sim.floating_months > 0 {
        rows.push((
            "Sisa Pokok Setelah Masa Tetap".to_string(),
            format_rupiah(sim.remaining_principal),
        ));
        rows.push((
            format!(
                "Cicilan Bunga Floating {} ({})",
                format_percent(model.number("bunga_floating")),
                months_text(sim.floating_months)
            ),
            format!("{} / bulan", format_rupiah(sim.floating_payment)),
        ));
    }
    rows.push(("Biaya Awal (estimasi)".to_string(), format_rupiah(sim.costs.total())));
    rows.push(("Dana Tunai Disiapkan".to_string(), format_rupiah(sim.upfront_cash)));
    rows.push(("Penghasilan Bulanan".to_string(), format_rupiah(model.number("penghasilan"))));
    rows.push(("Rasio Cicilan".to_string(), ratio_text(sim.ratio_percent)));
    fields(rows)
}

fn costs_table(sim: &KprSimulation) -> Table {
    let costs = &sim.costs;
    [
        ("Provisi bank (1% pinjaman)", costs.provision),
        ("Biaya administrasi", costs.admin),
        ("Biaya appraisal", costs.appraisal),
        ("Asuransi jiwa & kebakaran (2,5% pinjaman)", costs.insurance),
        ("Biaya notaris (1% harga)", costs.notary),
        ("BPHTB (5% × (harga − NPOPTKP))", costs.bphtb),
    ]
    .into_iter()
    .fold(
        Table::new(vec![Column::left("Komponen Biaya"), Column::right("Jumlah")]),
        |table, (label, amount)| table.row(vec![label.to_string(), format_rupiah(amount)]),
    )
    .footer("Total Biaya Awal", format_rupiah(costs.total()))
}

fn schedule_table(sim: &KprSimulation) -> Table {
    sim.schedule.iter().fold(
        Table::new(vec![
            Column::center("Tahun"),
            Column::center("Bunga"),
            Column::right("Cicilan/Bulan"),
            Column::right("Bunga Dibayar"),
            Column::right("Pokok Dibayar"),
            Column::right("Sisa Pokok"),
        ]),
        |table, year| {
            table.row(vec![
                year.year.to_string(),
                format_percent(year.annual_rate_percent),
                format_rupiah(year.monthly_payment),
                format_rupiah(year.interest),
                format_rupiah(year.principal),
                format_rupiah(year.closing_balance),
            ])
        },
    )
}

impl Template for SimulasiKpr {
    const ID: &'static str = "simulasi_kpr";
    const TITLE: &'static str = "Simulasi KPR";
    const DESCRIPTION: &'static str = concat!(
        "Simulasi Kredit Pemilikan Rumah dengan bunga tetap di tahun-tahun awal dan bunga floating ",
        "setelahnya: cicilan per bulan, biaya awal, rasio cicilan terhadap penghasilan dan tabel angsuran tahunan."
    );

    type Derived = Result<KprSimulation, CalcError>;

    fn schema() -> DocumentSchema {
        DocumentSchema::new(vec![
            FieldSpec::text("nama", "Nama Calon Debitur", "Andi Pratama").required(),
            FieldSpec::text("properti", "Properti", "Rumah tipe 45/90, Perumahan Griya Cakung Asri"),
            FieldSpec::money("harga", "Harga Properti", 850_000_000.0),
            FieldSpec::percent("uang_muka_persen", "Uang Muka (%)", 15.0),
            FieldSpec::percent("bunga_fix", "Bunga Tetap (% per tahun)", 4.99),
            FieldSpec::number("masa_fix", "Masa Bunga Tetap (tahun)", 3.0),
            FieldSpec::percent("bunga_floating", "Bunga Floating (% per tahun)", 11.5),
            FieldSpec::number("tenor", "Tenor (tahun)", 20.0),
            FieldSpec::money("penghasilan", "Penghasilan Bulanan", 15_000_000.0),
            FieldSpec::text("petugas", "Disiapkan oleh", "Dewi Lestari, Marketing KPR"),
            FieldSpec::text("kota", "Kota", "Jakarta"),
            FieldSpec::date("tanggal", "Tanggal Simulasi", 2024, 3, 15),
        ])
        .with_variants(&[(Variant::First, "Ringkasan"), (Variant::Second, "Rincian")])
    }

    fn derive(model: &DocumentModel) -> Self::Derived {
        simulate(&input(model))
    }

    fn render(model: &DocumentModel, derived: &Self::Derived, variant: Variant) -> Document {
        let mut doc = match variant {
            Variant::First => Document::new(Self::TITLE),
            Variant::Second => Document::new(Self::TITLE).with_page(PageSetup::running(
                format!("Simulasi KPR · {}", model.text("nama")),
                "Hasil simulasi bersifat estimasi dan dapat berbeda dengan ketentuan bank.",
            )),
        };

        doc.push(Block::title(
            "SIMULASI KREDIT PEMILIKAN RUMAH",
            Some(date_text(model, "tanggal")),
        ))
        .push(fields([
            ("Nama", model.text("nama")),
            ("Properti", model.text("properti")),
        ]));

        let sim = match derived {
            Ok(sim) => sim,
            Err(error) => {
                doc.push(calc_note(error));
                return doc;
            }
        };

        doc.push(summary(model, sim)).push(Block::note(
            tone(sim.affordability),
            format!(
                "{}: rasio cicilan {} dari penghasilan. {}",
                sim.affordability.label(),
                ratio_text(sim.ratio_percent),
                sim.affordability.advice()
            ),
        ));

        if variant == Variant::Second {
            doc.push(Block::Paragraph(
                Paragraph::new().strong("Estimasi biaya awal").align(Align::Left),
            ))
            .push(Block::Table(costs_table(sim)))
            .push(Block::Paragraph(
                Paragraph::new().strong("Tabel angsuran tahunan").align(Align::Left),
            ))
            .push(Block::Table(schedule_table(sim)))
            .push(Block::Paragraph(Paragraph::plain(format!(
                "Total pembayaran selama {}: {}.",
                months_text(sim.total_months),
                format_rupiah(
                    sim.schedule
                        .iter()
                        .map(|year| year.interest + year.principal)
                        .sum::<f64>()
                )
            ))));
        }

        doc.push(Block::Signatures(SignatureBlock {
            place_date: Some(place_date(model, "tanggal")),
            signatories: vec![Signatory::new("Disiapkan oleh,", model.text("petugas"))],
            witnesses: Vec::new(),
            stamp: false,
        }));
        doc
    }

    fn validate(model: &DocumentModel) -> ValidationErrors {
        let mut errors = ValidationErrors::new();
        validate_required(model.text("nama"), "nama", "Nama Calon Debitur", &mut errors);

        if model.number("harga") <= 0.0 {
            errors.add(ValidationError::new("harga", "Harga properti harus lebih dari 0"));
        }
        if model.number("penghasilan") <= 0.0 {
            errors.add(
                ValidationError::new("penghasilan", "Penghasilan bulanan belum diisi")
                    .with_suggestion("Isi penghasilan untuk menghitung rasio cicilan"),
            );
        }
        if let Err(error) = simulate(&input(model)) {
            let field = match error {
                CalcError::DownPaymentOutOfRange(_) => "uang_muka_persen",
                CalcError::FixedTermExceedsTenor { .. } => "masa_fix",
                _ => "tenor",
            };
            errors.add(ValidationError::new(field, error.to_string()));
        }
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calc::kpr::annuity_payment;
    use crate::render::{render_document, text_content};
    use serde_json::json;

    fn model_with(overrides: serde_json::Value) -> DocumentModel {
        let schema = SimulasiKpr::schema();
        schema
            .apply_fields(&schema.default_model(), overrides.as_object().unwrap())
            .unwrap()
    }

    #[test]
    fn test_sample_simulation() {
        let sim = SimulasiKpr::derive(&model_with(json!({}))).unwrap();
        assert_eq!(sim.loan, 722_500_000.0);
        assert_eq!(sim.fixed_months, 36);
        assert_eq!(sim.floating_months, 204);

        let expected = annuity_payment(722_500_000.0, 0.0499 / 12.0, 240);
        assert!((sim.fixed_payment - expected).abs() < 1e-6);
        assert!((sim.ratio_percent - 31.76).abs() < 0.01, "{}", sim.ratio_percent);
        assert_eq!(sim.affordability, Affordability::Warning);
    }

    #[test]
    fn test_summary_shows_warning_note() {
        let model = model_with(json!({}));
        let derived = SimulasiKpr::derive(&model);
        let doc = SimulasiKpr::render(&model, &derived, Variant::First);
        assert!(doc
            .blocks
            .iter()
            .any(|b| matches!(b, Block::Note { tone: Tone::Warning, .. })));
        assert!(doc.page.running_header.is_none());

        let text = text_content(&render_document(&doc));
        assert!(text.contains("Pokok Pinjaman : Rp 722.500.000"));
        assert!(text.contains("Waspada: rasio cicilan 31,76%"));
    }

    #[test]
    fn test_detail_variant_has_schedule() {
        let model = model_with(json!({}));
        let derived = SimulasiKpr::derive(&model);
        let doc = SimulasiKpr::render(&model, &derived, Variant::Second);
        assert!(doc.page.running_header.is_some());

        let text = text_content(&render_document(&doc));
        assert!(text.contains("Tabel angsuran tahunan"));
        assert!(text.contains("BPHTB (5% × (harga − NPOPTKP)) Rp 38.500.000"));
        assert!(text.contains("20 11,5%"));
    }

    #[test]
    fn test_zero_rate_divides_evenly() {
        let sim = SimulasiKpr::derive(&model_with(json!({
            "harga": "120000000",
            "uang_muka_persen": "0",
            "bunga_fix": "0",
            "bunga_floating": "0",
            "masa_fix": "0",
            "tenor": "10",
        })))
        .unwrap();
        assert_eq!(sim.fixed_payment, 1_000_000.0);
        assert_eq!(sim.floating_payment, 1_000_000.0);
    }

    #[test]
    fn test_invalid_tenor_renders_note_instead_of_numbers() {
        let model = model_with(json!({ "tenor": "0" }));
        let derived = SimulasiKpr::derive(&model);
        assert_eq!(derived, Err(CalcError::NonPositiveTenor));

        let text = text_content(&render_document(&SimulasiKpr::render(
            &model,
            &derived,
            Variant::First,
        )));
        assert!(text.contains("Perhitungan tidak dapat dibuat: tenor harus lebih dari 0 bulan."));
        assert!(!text.contains("Pokok Pinjaman"));

        let errors = SimulasiKpr::validate(&model);
        assert!(errors.iter().any(|e| e.field == "tenor"));
    }
}
