//! Field schema for a document tool.
//!
//! The schema is the only place that knows which fields a document has, what
//! kind of value each holds and what the Indonesian sample default is. Raw
//! edit-panel input is coerced here into typed [`FieldValue`]s.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use std::collections::BTreeMap;

use super::{DocumentModel, FieldValue, ModelError, Row};

/// One allowed value of a choice field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChoiceOption {
    pub value: &'static str,
    pub label: &'static str,
}

/// Kind of input a field accepts.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    Text,
    /// Multi-line free text.
    Paragraph,
    Number,
    /// Whole rupiah amount.
    Money,
    Percent,
    Date,
    /// Logo image, stored as a `data:` URL.
    Image,
    Choice(&'static [ChoiceOption]),
    List(Vec<ColumnSpec>),
}

impl FieldKind {
    fn json_type(&self, description: &str) -> Value {
        match self {
            Self::Text | Self::Paragraph | Self::Image => {
                json!({ "type": "string", "description": description })
            }
            Self::Number | Self::Money | Self::Percent => {
                json!({ "type": "number", "description": description })
            }
            Self::Date => json!({ "type": "string", "format": "date", "description": description }),
            Self::Choice(options) => json!({
                "type": "string",
                "description": description,
                "enum": options.iter().map(|o| o.value).collect::<Vec<_>>(),
            }),
            Self::List(columns) => {
                let properties: Map<String, Value> = columns
                    .iter()
                    .map(|c| (c.name.to_string(), c.kind.json_type(c.label)))
                    .collect();
                json!({
                    "type": "array",
                    "description": description,
                    "items": { "type": "object", "properties": properties },
                })
            }
        }
    }
}

/// One column of a list field.
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub default: FieldValue,
}

impl ColumnSpec {
    pub fn text(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Text,
            default: FieldValue::text(""),
        }
    }

    pub fn number(name: &'static str, label: &'static str, default: f64) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Number,
            default: FieldValue::Number(default),
        }
    }

    pub fn money(name: &'static str, label: &'static str) -> Self {
        Self {
            name,
            label,
            kind: FieldKind::Money,
            default: FieldValue::Number(0.0),
        }
    }
}

/// One field of a document.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub label: &'static str,
    pub kind: FieldKind,
    pub default: FieldValue,
    pub required: bool,
}

impl FieldSpec {
    fn new(name: &'static str, label: &'static str, kind: FieldKind, default: FieldValue) -> Self {
        Self {
            name,
            label,
            kind,
            default,
            required: false,
        }
    }

    pub fn text(name: &'static str, label: &'static str, default: &str) -> Self {
        Self::new(name, label, FieldKind::Text, FieldValue::text(default))
    }

    pub fn paragraph(name: &'static str, label: &'static str, default: &str) -> Self {
        Self::new(name, label, FieldKind::Paragraph, FieldValue::text(default))
    }

    pub fn number(name: &'static str, label: &'static str, default: f64) -> Self {
        Self::new(name, label, FieldKind::Number, FieldValue::Number(default))
    }

    pub fn money(name: &'static str, label: &'static str, default: f64) -> Self {
        Self::new(name, label, FieldKind::Money, FieldValue::Number(default))
    }

    pub fn percent(name: &'static str, label: &'static str, default: f64) -> Self {
        Self::new(name, label, FieldKind::Percent, FieldValue::Number(default))
    }

    pub fn date(name: &'static str, label: &'static str, year: i32, month: u32, day: u32) -> Self {
        let date = NaiveDate::from_ymd_opt(year, month, day).unwrap_or_default();
        Self::new(name, label, FieldKind::Date, FieldValue::Date(date))
    }

    pub fn image(name: &'static str, label: &'static str) -> Self {
        Self::new(name, label, FieldKind::Image, FieldValue::text(""))
    }

    pub fn choice(
        name: &'static str,
        label: &'static str,
        options: &'static [ChoiceOption],
        default: &'static str,
    ) -> Self {
        Self::new(name, label, FieldKind::Choice(options), FieldValue::text(default))
    }

    /// A list field. Default rows are completed with column defaults so the
    /// model never has a missing cell.
    pub fn list(
        name: &'static str,
        label: &'static str,
        columns: Vec<ColumnSpec>,
        rows: Vec<Row>,
    ) -> Self {
        let rows = rows
            .into_iter()
            .map(|mut row| {
                for column in &columns {
                    row.cells
                        .entry(column.name.to_string())
                        .or_insert_with(|| column.default.clone());
                }
                row
            })
            .collect();
        Self::new(name, label, FieldKind::List(columns), FieldValue::List(rows))
    }

    /// Mark the field as required for advisory validation.
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn columns(&self) -> Option<&[ColumnSpec]> {
        match &self.kind {
            FieldKind::List(columns) => Some(columns),
            _ => None,
        }
    }

    /// Coerce raw edit-panel input into a typed value for this field.
    pub fn coerce(&self, input: &Value) -> Result<FieldValue, ModelError> {
        match &self.kind {
            FieldKind::List(columns) => {
                let items = input.as_array().ok_or_else(|| ModelError::TypeMismatch {
                    field: self.name.to_string(),
                    expected: "list",
                })?;
                items
                    .iter()
                    .map(|item| coerce_row(self.name, columns, item))
                    .collect::<Result<Vec<_>, _>>()
                    .map(FieldValue::List)
            }
            kind => coerce_scalar(self.name, kind, input),
        }
    }

    fn blank_row(&self) -> Option<Row> {
        self.columns().map(|columns| {
            columns.iter().fold(Row::new(), |row, column| {
                row.with(column.name, column.default.clone())
            })
        })
    }
}

/// Template variant id. Switching variants changes wording and layout only.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Variant {
    #[default]
    First,
    Second,
}

impl Variant {
    pub fn id(self) -> u8 {
        match self {
            Self::First => 1,
            Self::Second => 2,
        }
    }
}

impl TryFrom<u8> for Variant {
    type Error = ModelError;

    fn try_from(id: u8) -> Result<Self, Self::Error> {
        match id {
            1 => Ok(Self::First),
            2 => Ok(Self::Second),
            other => Err(ModelError::UnsupportedVariant(other)),
        }
    }
}

impl From<Variant> for u8 {
    fn from(variant: Variant) -> Self {
        variant.id()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct VariantInfo {
    pub variant: Variant,
    pub label: &'static str,
}

/// Complete description of one tool's editable data.
#[derive(Debug, Clone)]
pub struct DocumentSchema {
    fields: Vec<FieldSpec>,
    variants: Vec<VariantInfo>,
}

impl DocumentSchema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self {
            fields,
            variants: vec![VariantInfo {
                variant: Variant::First,
                label: "Standar",
            }],
        }
    }

    pub fn with_variants(mut self, variants: &[(Variant, &'static str)]) -> Self {
        self.variants = variants
            .iter()
            .map(|&(variant, label)| VariantInfo { variant, label })
            .collect();
        self
    }

    pub fn fields(&self) -> &[FieldSpec] {
        &self.fields
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn variants(&self) -> &[VariantInfo] {
        &self.variants
    }

    pub fn supports(&self, variant: Variant) -> bool {
        self.variants.iter().any(|v| v.variant == variant)
    }

    /// First image field, where an uploaded logo is stored.
    pub fn image_field(&self) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.kind == FieldKind::Image)
    }

    /// A fully defined model holding every field's default.
    pub fn default_model(&self) -> DocumentModel {
        let fields: BTreeMap<String, FieldValue> = self
            .fields
            .iter()
            .map(|f| (f.name.to_string(), f.default.clone()))
            .collect();
        DocumentModel::from_fields(fields)
    }

    fn spec(&self, name: &str) -> Result<&FieldSpec, ModelError> {
        self.field(name)
            .ok_or_else(|| ModelError::UnknownField(name.to_string()))
    }

    fn list_spec(&self, list: &str) -> Result<(&FieldSpec, &[ColumnSpec]), ModelError> {
        let spec = self.spec(list)?;
        let columns = spec
            .columns()
            .ok_or_else(|| ModelError::NotAList(list.to_string()))?;
        Ok((spec, columns))
    }

    /// A new row for `list` holding each column's default.
    pub fn blank_row(&self, list: &str) -> Result<Row, ModelError> {
        let (spec, _) = self.list_spec(list)?;
        spec.blank_row()
            .ok_or_else(|| ModelError::NotAList(list.to_string()))
    }

    pub fn coerce(&self, name: &str, input: &Value) -> Result<FieldValue, ModelError> {
        self.spec(name)?.coerce(input)
    }

    pub fn coerce_cell(
        &self,
        list: &str,
        column: &str,
        input: &Value,
    ) -> Result<FieldValue, ModelError> {
        let (_, columns) = self.list_spec(list)?;
        let spec = columns
            .iter()
            .find(|c| c.name == column)
            .ok_or_else(|| ModelError::UnknownField(format!("{list}.{column}")))?;
        coerce_scalar(&format!("{list}.{column}"), &spec.kind, input)
    }

    pub fn coerce_row(&self, list: &str, input: &Value) -> Result<Row, ModelError> {
        let (_, columns) = self.list_spec(list)?;
        coerce_row(list, columns, input)
    }

    /// Apply a map of raw field inputs on top of `model`.
    pub fn apply_fields(
        &self,
        model: &DocumentModel,
        fields: &Map<String, Value>,
    ) -> Result<DocumentModel, ModelError> {
        fields.iter().try_fold(model.clone(), |model, (name, input)| {
            let value = self.coerce(name, input)?;
            model.set_field(name, value)
        })
    }

    /// JSON Schema describing the arguments accepted by a tool call.
    pub fn json_schema(&self) -> Value {
        let properties: Map<String, Value> = self
            .fields
            .iter()
            .map(|f| (f.name.to_string(), f.kind.json_type(f.label)))
            .collect();
        let variants: Vec<u8> = self.variants.iter().map(|v| v.variant.id()).collect();

        json!({
            "type": "object",
            "properties": {
                "variant": {
                    "type": "integer",
                    "description": "Nomor template",
                    "enum": variants,
                },
                "fields": {
                    "type": "object",
                    "description": "Nilai field yang menggantikan contoh bawaan",
                    "properties": properties,
                    "additionalProperties": false,
                }
            }
        })
    }
}

fn coerce_row(list: &str, columns: &[ColumnSpec], input: &Value) -> Result<Row, ModelError> {
    let object = input.as_object().ok_or_else(|| ModelError::TypeMismatch {
        field: list.to_string(),
        expected: "object",
    })?;

    let mut row = Row::new();
    for column in columns {
        let value = match object.get(column.name) {
            Some(raw) => coerce_scalar(&format!("{list}.{}", column.name), &column.kind, raw)?,
            None => column.default.clone(),
        };
        row.cells.insert(column.name.to_string(), value);
    }

    if let Some(unknown) = object
        .keys()
        .find(|key| !columns.iter().any(|c| c.name == key.as_str()))
    {
        return Err(ModelError::UnknownField(format!("{list}.{unknown}")));
    }

    Ok(row)
}

fn coerce_scalar(field: &str, kind: &FieldKind, input: &Value) -> Result<FieldValue, ModelError> {
    let mismatch = |expected| ModelError::TypeMismatch {
        field: field.to_string(),
        expected,
    };

    match kind {
        FieldKind::Text | FieldKind::Paragraph | FieldKind::Image => match input {
            Value::String(s) => Ok(FieldValue::text(s.as_str())),
            Value::Number(n) => Ok(FieldValue::Text(n.to_string())),
            Value::Null => Ok(FieldValue::text("")),
            _ => Err(mismatch("text")),
        },
        FieldKind::Number | FieldKind::Money | FieldKind::Percent => match input {
            Value::Number(n) => n.as_f64().map(FieldValue::Number).ok_or_else(|| {
                ModelError::InvalidNumber {
                    field: field.to_string(),
                    value: n.to_string(),
                }
            }),
            Value::String(s) => parse_number(s, *kind == FieldKind::Money)
                .map(FieldValue::Number)
                .ok_or_else(|| ModelError::InvalidNumber {
                    field: field.to_string(),
                    value: s.clone(),
                }),
            Value::Null => Ok(FieldValue::Number(0.0)),
            _ => Err(mismatch("number")),
        },
        FieldKind::Date => match input {
            Value::String(s) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
                .map(FieldValue::Date)
                .map_err(|_| ModelError::InvalidDate {
                    field: field.to_string(),
                    value: s.clone(),
                }),
            _ => Err(mismatch("date")),
        },
        FieldKind::Choice(options) => match input {
            Value::String(s) if options.iter().any(|o| o.value == s) => {
                Ok(FieldValue::text(s.as_str()))
            }
            Value::String(s) => Err(ModelError::InvalidChoice {
                field: field.to_string(),
                value: s.clone(),
            }),
            _ => Err(mismatch("text")),
        },
        FieldKind::List(_) => Err(mismatch("scalar")),
    }
}

/// Parse a number typed the Indonesian way.
///
/// `,` is the decimal separator and `.` groups thousands. A single `.` is
/// read as a decimal point except for rupiah amounts, which have no decimals.
/// Empty input is zero.
pub fn parse_number(raw: &str, rupiah: bool) -> Option<f64> {
    let cleaned: String = raw
        .trim()
        .trim_start_matches("Rp")
        .trim_end_matches('%')
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect();

    if cleaned.is_empty() {
        return Some(0.0);
    }

    let normalized = if cleaned.contains(',') {
        cleaned.replace('.', "").replace(',', ".")
    } else if rupiah || cleaned.matches('.').count() > 1 {
        cleaned.replace('.', "")
    } else {
        cleaned
    };

    normalized.parse::<f64>().ok().filter(|v| v.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;

    const STATUS: &[ChoiceOption] = &[
        ChoiceOption { value: "aktif", label: "Aktif" },
        ChoiceOption { value: "berhenti", label: "Berhenti" },
    ];

    fn schema() -> DocumentSchema {
        DocumentSchema::new(vec![
            FieldSpec::text("nama", "Nama", "Budi").required(),
            FieldSpec::money("harga", "Harga", 1_500_000.0),
            FieldSpec::percent("bunga", "Bunga", 4.99),
            FieldSpec::date("tanggal", "Tanggal", 2024, 3, 15),
            FieldSpec::choice("status", "Status", STATUS, "aktif"),
            FieldSpec::list(
                "items",
                "Barang",
                vec![
                    ColumnSpec::text("nama", "Nama"),
                    ColumnSpec::number("qty", "Jumlah", 1.0),
                ],
                vec![Row::new().with("nama", FieldValue::text("Semen"))],
            ),
        ])
        .with_variants(&[(Variant::First, "Formal"), (Variant::Second, "Ringkas")])
    }

    #[test]
    fn test_default_model_is_fully_defined() {
        let schema = schema();
        let model = schema.default_model();
        for spec in schema.fields() {
            let value = model.get(spec.name).expect("field missing");
            assert!(value.same_kind(&spec.default));
        }
        // Default rows are completed with column defaults
        assert_eq!(model.rows("items")[0].number("qty"), 1.0);
    }

    #[test]
    fn test_parse_number_indonesian_formats() {
        assert_eq!(parse_number("1.500.000", false), Some(1_500_000.0));
        assert_eq!(parse_number("Rp 2.000", true), Some(2_000.0));
        assert_eq!(parse_number("4,99", false), Some(4.99));
        assert_eq!(parse_number("4.99", false), Some(4.99));
        assert_eq!(parse_number("12%", false), Some(12.0));
        assert_eq!(parse_number("", false), Some(0.0));
        assert_eq!(parse_number("abc", false), None);
    }

    #[test]
    fn test_coerce_invalid_number_is_explicit() {
        let err = schema().coerce("harga", &json!("seratus")).unwrap_err();
        assert_eq!(
            err,
            ModelError::InvalidNumber {
                field: "harga".into(),
                value: "seratus".into()
            }
        );
    }

    #[test]
    fn test_coerce_date() {
        let schema = schema();
        let value = schema.coerce("tanggal", &json!("2024-12-31")).unwrap();
        assert_eq!(value, FieldValue::Date(NaiveDate::from_ymd_opt(2024, 12, 31).unwrap()));

        let err = schema.coerce("tanggal", &json!("31/12/2024")).unwrap_err();
        assert!(matches!(err, ModelError::InvalidDate { .. }));
    }

    #[test]
    fn test_coerce_choice() {
        let schema = schema();
        assert!(schema.coerce("status", &json!("berhenti")).is_ok());
        assert!(matches!(
            schema.coerce("status", &json!("cuti")),
            Err(ModelError::InvalidChoice { .. })
        ));
    }

    #[test]
    fn test_coerce_row_fills_missing_columns() {
        let row = schema().coerce_row("items", &json!({ "nama": "Pasir" })).unwrap();
        assert_eq!(row.text("nama"), "Pasir");
        assert_eq!(row.number("qty"), 1.0);
    }

    #[test]
    fn test_coerce_row_unknown_column() {
        let err = schema()
            .coerce_row("items", &json!({ "warna": "merah" }))
            .unwrap_err();
        assert_eq!(err, ModelError::UnknownField("items.warna".into()));
    }

    #[test]
    fn test_apply_fields() {
        let schema = schema();
        let model = schema.default_model();
        let mut fields = Map::new();
        fields.insert("nama".into(), json!("Siti"));
        fields.insert("harga".into(), json!("2.500.000"));

        let updated = schema.apply_fields(&model, &fields).unwrap();
        assert_eq!(updated.text("nama"), "Siti");
        assert_eq!(updated.number("harga"), 2_500_000.0);
        assert_eq!(updated.number("bunga"), 4.99);
    }

    #[test]
    fn test_variant_serde() {
        let v: Variant = serde_json::from_value(json!(2)).unwrap();
        assert_eq!(v, Variant::Second);
        assert!(serde_json::from_value::<Variant>(json!(3)).is_err());
        assert_eq!(serde_json::to_value(Variant::First).unwrap(), json!(1));
    }

    #[test]
    fn test_json_schema_lists_fields() {
        let schema = schema().json_schema();
        let fields = &schema["properties"]["fields"]["properties"];
        assert_eq!(fields["harga"]["type"], "number");
        assert_eq!(fields["tanggal"]["format"], "date");
        assert_eq!(fields["items"]["type"], "array");
        assert_eq!(schema["properties"]["variant"]["enum"], json!([1, 2]));
    }
}
