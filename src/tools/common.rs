//! Helpers shared by the document tools.

use crate::calc::format::{format_decimal, format_long_date, format_place_date, format_rupiah};
use crate::calc::{format_percent, CalcError};
use crate::model::{DocumentModel, DocumentSchema, FieldKind, FieldValue};
use crate::render::{Block, FieldRow, Kop, Tone};

/// Shown where a date cannot be displayed.
pub const INVALID_DATE: &str = "Tanggal tidak valid";

/// Field holding the uploaded logo.
pub const LOGO_FIELD: &str = "logo";

/// Field holding the place printed above signatures.
pub const PLACE_FIELD: &str = "kota";

/// Long-form date of a date field.
pub fn date_text(model: &DocumentModel, field: &str) -> String {
    model
        .date(field)
        .map(format_long_date)
        .unwrap_or_else(|| INVALID_DATE.to_string())
}

/// "Kota, 15 Maret 2024" from the place field and a date field.
pub fn place_date(model: &DocumentModel, date_field: &str) -> String {
    match model.date(date_field) {
        Some(date) => format_place_date(model.text(PLACE_FIELD), date),
        None => INVALID_DATE.to_string(),
    }
}

/// Letterhead from a name field and address/contact fields. Empty lines are
/// dropped by the renderer.
pub fn kop(model: &DocumentModel, name_field: &str, line_fields: &[&str]) -> Block {
    let logo = model.text(LOGO_FIELD);
    Block::Kop(Kop {
        logo: (!logo.is_empty()).then(|| logo.to_string()),
        name: model.text(name_field).to_string(),
        lines: line_fields
            .iter()
            .map(|field| model.text(field).to_string())
            .collect(),
    })
}

/// A Fields block from `(label, value)` pairs.
pub fn fields<L, V>(rows: impl IntoIterator<Item = (L, V)>) -> Block
where
    L: Into<String>,
    V: Into<String>,
{
    Block::Fields(
        rows.into_iter()
            .map(|(label, value)| FieldRow::new(label, value))
            .collect(),
    )
}

/// Note explaining why a calculation could not be made.
pub fn calc_note(error: &CalcError) -> Block {
    Block::note(
        Tone::Danger,
        format!("Perhitungan tidak dapat dibuat: {}.", error),
    )
}

/// Edit panel summary: every field with its display value.
pub fn edit_summary(schema: &DocumentSchema, model: &DocumentModel) -> Vec<(String, String)> {
    schema
        .fields()
        .iter()
        .map(|spec| {
            let value = match (&spec.kind, model.get(spec.name)) {
                (FieldKind::Money, Some(FieldValue::Number(n))) => format_rupiah(*n),
                (FieldKind::Percent, Some(FieldValue::Number(n))) => format_percent(*n),
                (_, Some(FieldValue::Number(n))) => format_decimal(*n, 2),
                (_, Some(FieldValue::Date(d))) => format_long_date(*d),
                (FieldKind::Image, Some(FieldValue::Text(t))) if t.is_empty() => {
                    "Belum ada logo".to_string()
                }
                (FieldKind::Image, Some(FieldValue::Text(_))) => "Logo terpasang".to_string(),
                (FieldKind::Choice(options), Some(FieldValue::Text(t))) => options
                    .iter()
                    .find(|o| o.value == t.as_str())
                    .map(|o| o.label.to_string())
                    .unwrap_or_else(|| t.clone()),
                (_, Some(FieldValue::Text(t))) => t.clone(),
                (_, Some(FieldValue::List(rows))) => format!("{} baris", rows.len()),
                (_, None) => String::new(),
            };
            (spec.label.to_string(), value)
        })
        .collect()
}

/// Sanitize a string for use in filenames.
pub fn slugify(name: &str, fallback: &str) -> String {
    let mut result = String::new();
    let mut last_dash = false;

    for ch in name.trim().chars() {
        if ch.is_ascii_alphanumeric() {
            result.push(ch.to_ascii_lowercase());
            last_dash = false;
        } else if (ch.is_whitespace() || ch == '-' || ch == '_' || ch == '.' || ch == '/')
            && !last_dash
            && !result.is_empty()
        {
            result.push('-');
            last_dash = true;
        }
    }

    let result = result.trim_matches('-');
    if result.is_empty() {
        fallback.to_string()
    } else {
        result.to_string()
    }
}

/// Output filename for a rendered page, e.g. `pesangon-rina-kartika.html`.
pub fn output_filename(tool_id: &str, subject: &str) -> String {
    format!(
        "{}-{}.html",
        slugify(tool_id, "surat"),
        slugify(subject, "dokumen")
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ChoiceOption, FieldSpec};

    const YES_NO: &[ChoiceOption] = &[
        ChoiceOption {
            value: "ya",
            label: "Ya",
        },
        ChoiceOption {
            value: "tidak",
            label: "Tidak",
        },
    ];

    fn schema() -> DocumentSchema {
        DocumentSchema::new(vec![
            FieldSpec::image(LOGO_FIELD, "Logo"),
            FieldSpec::text("nama", "Nama", "PT Maju"),
            FieldSpec::text("alamat", "Alamat", ""),
            FieldSpec::text(PLACE_FIELD, "Kota", "Bekasi"),
            FieldSpec::date("tanggal", "Tanggal", 2024, 3, 15),
            FieldSpec::money("harga", "Harga", 1_500_000.0),
            FieldSpec::percent("bunga", "Bunga", 4.99),
            FieldSpec::choice("setuju", "Setuju", YES_NO, "ya"),
        ])
    }

    #[test]
    fn test_slugify() {
        assert_eq!(slugify("Rina Kartika Sari", "x"), "rina-kartika-sari");
        assert_eq!(slugify("  PT. Maju / Jaya  ", "x"), "pt-maju-jaya");
        assert_eq!(slugify("???", "dokumen"), "dokumen");
    }

    #[test]
    fn test_output_filename() {
        assert_eq!(output_filename("invoice", "Budi"), "invoice-budi.html");
        assert_eq!(output_filename("invoice", ""), "invoice-dokumen.html");
    }

    #[test]
    fn test_place_date_and_kop() {
        let model = schema().default_model();
        assert_eq!(place_date(&model, "tanggal"), "Bekasi, 15 Maret 2024");
        assert_eq!(date_text(&model, "tidak_ada"), INVALID_DATE);

        match kop(&model, "nama", &["alamat"]) {
            Block::Kop(kop) => {
                assert_eq!(kop.logo, None);
                assert_eq!(kop.name, "PT Maju");
            }
            other => panic!("expected kop, got {:?}", other),
        }
    }

    #[test]
    fn test_edit_summary_formats_values() {
        let summary = edit_summary(&schema(), &schema().default_model());
        let value = |label: &str| {
            summary
                .iter()
                .find(|(l, _)| l == label)
                .map(|(_, v)| v.clone())
                .unwrap()
        };
        assert_eq!(value("Logo"), "Belum ada logo");
        assert_eq!(value("Harga"), "Rp 1.500.000");
        assert_eq!(value("Bunga"), "4,99%");
        assert_eq!(value("Tanggal"), "15 Maret 2024");
        assert_eq!(value("Setuju"), "Ya");
    }
}
