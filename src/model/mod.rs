//! Document model - the single source of truth for one document's fields.
//!
//! A model is created from its schema's defaults, so every field always has a
//! value. Mutations never touch the model in place: each operation returns a
//! new model and leaves the previous snapshot untouched.

pub mod action;
pub mod schema;
pub mod validation;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use uuid::Uuid;

pub use action::{Action, MobileView, PageState};
pub use schema::{ChoiceOption, ColumnSpec, DocumentSchema, FieldKind, FieldSpec, Variant, VariantInfo};

/// Errors raised by model mutations and edit-panel input coercion.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ModelError {
    #[error("field '{0}' is not part of this document")]
    UnknownField(String),
    #[error("field '{field}' expects a {expected} value")]
    TypeMismatch { field: String, expected: &'static str },
    #[error("field '{0}' is not a list")]
    NotAList(String),
    #[error("list '{list}' has no row {index} (length {len})")]
    IndexOutOfRange {
        list: String,
        index: usize,
        len: usize,
    },
    #[error("'{value}' is not a valid number for '{field}'")]
    InvalidNumber { field: String, value: String },
    #[error("'{value}' is not a valid YYYY-MM-DD date for '{field}'")]
    InvalidDate { field: String, value: String },
    #[error("'{value}' is not an allowed option for '{field}'")]
    InvalidChoice { field: String, value: String },
    #[error("template variant {0} is not available for this document")]
    UnsupportedVariant(u8),
}

/// A single field value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "lowercase")]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Date(NaiveDate),
    List(Vec<Row>),
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        Self::Text(value.into())
    }

    /// Name of the variant, used in type mismatch errors.
    pub fn kind_name(&self) -> &'static str {
        match self {
            Self::Text(_) => "text",
            Self::Number(_) => "number",
            Self::Date(_) => "date",
            Self::List(_) => "list",
        }
    }

    pub fn same_kind(&self, other: &FieldValue) -> bool {
        std::mem::discriminant(self) == std::mem::discriminant(other)
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(value) => Some(value),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<NaiveDate> {
        match self {
            Self::Date(value) => Some(*value),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<&[Row]> {
        match self {
            Self::List(rows) => Some(rows),
            _ => None,
        }
    }
}

/// One line item of a list field.
///
/// `key` only keeps list keys stable for the UI; rows are addressed by index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Row {
    #[serde(default = "Uuid::new_v4")]
    pub key: Uuid,
    pub cells: BTreeMap<String, FieldValue>,
}

impl Default for Row {
    fn default() -> Self {
        Self::new()
    }
}

impl Row {
    pub fn new() -> Self {
        Self {
            key: Uuid::new_v4(),
            cells: BTreeMap::new(),
        }
    }

    pub fn with(mut self, column: &str, value: FieldValue) -> Self {
        self.cells.insert(column.to_string(), value);
        self
    }

    pub fn get(&self, column: &str) -> Option<&FieldValue> {
        self.cells.get(column)
    }

    pub fn text(&self, column: &str) -> &str {
        self.get(column).and_then(FieldValue::as_text).unwrap_or("")
    }

    pub fn number(&self, column: &str) -> f64 {
        self.get(column).and_then(FieldValue::as_number).unwrap_or(0.0)
    }

    pub fn date(&self, column: &str) -> Option<NaiveDate> {
        self.get(column).and_then(FieldValue::as_date)
    }
}

/// All user-editable fields of one document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DocumentModel {
    fields: BTreeMap<String, FieldValue>,
}

impl DocumentModel {
    pub(crate) fn from_fields(fields: BTreeMap<String, FieldValue>) -> Self {
        Self { fields }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.fields.get(name)
    }

    pub fn fields(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.fields.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Text value of a field, or `""` for non-text fields.
    pub fn text(&self, name: &str) -> &str {
        self.get(name).and_then(FieldValue::as_text).unwrap_or("")
    }

    /// Numeric value of a field, or `0` for non-numeric fields.
    pub fn number(&self, name: &str) -> f64 {
        self.get(name).and_then(FieldValue::as_number).unwrap_or(0.0)
    }

    pub fn date(&self, name: &str) -> Option<NaiveDate> {
        self.get(name).and_then(FieldValue::as_date)
    }

    /// Rows of a list field, or an empty slice for non-list fields.
    pub fn rows(&self, name: &str) -> &[Row] {
        self.get(name).and_then(FieldValue::as_list).unwrap_or(&[])
    }

    /// Replace one field's value.
    pub fn set_field(&self, name: &str, value: FieldValue) -> Result<Self, ModelError> {
        let current = self
            .fields
            .get(name)
            .ok_or_else(|| ModelError::UnknownField(name.to_string()))?;

        if !current.same_kind(&value) {
            return Err(ModelError::TypeMismatch {
                field: name.to_string(),
                expected: current.kind_name(),
            });
        }

        let mut fields = self.fields.clone();
        fields.insert(name.to_string(), value);
        Ok(Self { fields })
    }

    /// Replace one cell of one row of a list field.
    pub fn set_list_item(
        &self,
        list: &str,
        index: usize,
        column: &str,
        value: FieldValue,
    ) -> Result<Self, ModelError> {
        let rows = self.list(list)?;
        let row = rows.get(index).ok_or_else(|| ModelError::IndexOutOfRange {
            list: list.to_string(),
            index,
            len: rows.len(),
        })?;

        let current = row
            .get(column)
            .ok_or_else(|| ModelError::UnknownField(format!("{list}.{column}")))?;
        if !current.same_kind(&value) {
            return Err(ModelError::TypeMismatch {
                field: format!("{list}.{column}"),
                expected: current.kind_name(),
            });
        }

        let mut updated = rows.to_vec();
        updated[index].cells.insert(column.to_string(), value);
        self.with_list(list, updated)
    }

    /// Append a row to a list field.
    pub fn add_list_item(&self, list: &str, row: Row) -> Result<Self, ModelError> {
        let mut updated = self.list(list)?.to_vec();
        updated.push(row);
        self.with_list(list, updated)
    }

    /// Remove the row at `index`; later rows keep their relative order.
    pub fn remove_list_item(&self, list: &str, index: usize) -> Result<Self, ModelError> {
        let rows = self.list(list)?;
        if index >= rows.len() {
            return Err(ModelError::IndexOutOfRange {
                list: list.to_string(),
                index,
                len: rows.len(),
            });
        }

        let mut updated = rows.to_vec();
        updated.remove(index);
        self.with_list(list, updated)
    }

    fn list(&self, list: &str) -> Result<&[Row], ModelError> {
        match self.fields.get(list) {
            Some(FieldValue::List(rows)) => Ok(rows),
            Some(_) => Err(ModelError::NotAList(list.to_string())),
            None => Err(ModelError::UnknownField(list.to_string())),
        }
    }

    fn with_list(&self, list: &str, rows: Vec<Row>) -> Result<Self, ModelError> {
        let mut fields = self.fields.clone();
        fields.insert(list.to_string(), FieldValue::List(rows));
        Ok(Self { fields })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> DocumentModel {
        let mut fields = BTreeMap::new();
        fields.insert("nama".to_string(), FieldValue::text("Budi Santoso"));
        fields.insert("gaji".to_string(), FieldValue::Number(7_500_000.0));
        fields.insert(
            "items".to_string(),
            FieldValue::List(vec![
                Row::new()
                    .with("nama", FieldValue::text("Semen"))
                    .with("qty", FieldValue::Number(10.0)),
                Row::new()
                    .with("nama", FieldValue::text("Pasir"))
                    .with("qty", FieldValue::Number(2.0)),
            ]),
        );
        DocumentModel::from_fields(fields)
    }

    #[test]
    fn test_set_field_replaces_only_target() {
        let model = sample();
        let updated = model
            .set_field("nama", FieldValue::text("Siti Aminah"))
            .unwrap();

        assert_eq!(updated.text("nama"), "Siti Aminah");
        assert_eq!(updated.number("gaji"), model.number("gaji"));
        assert_eq!(updated.rows("items"), model.rows("items"));
        assert_eq!(model.text("nama"), "Budi Santoso");
    }

    #[test]
    fn test_set_field_unknown_name() {
        let err = sample()
            .set_field("alamat", FieldValue::text("x"))
            .unwrap_err();
        assert_eq!(err, ModelError::UnknownField("alamat".into()));
    }

    #[test]
    fn test_set_field_kind_mismatch() {
        let err = sample()
            .set_field("gaji", FieldValue::text("banyak"))
            .unwrap_err();
        assert!(matches!(err, ModelError::TypeMismatch { expected: "number", .. }));
    }

    #[test]
    fn test_set_list_item_keeps_other_rows() {
        let model = sample();
        let updated = model
            .set_list_item("items", 1, "qty", FieldValue::Number(5.0))
            .unwrap();

        assert_eq!(updated.rows("items")[1].number("qty"), 5.0);
        assert_eq!(updated.rows("items")[0], model.rows("items")[0]);
        assert_eq!(updated.rows("items")[1].key, model.rows("items")[1].key);
    }

    #[test]
    fn test_set_list_item_out_of_range() {
        let err = sample()
            .set_list_item("items", 5, "qty", FieldValue::Number(1.0))
            .unwrap_err();
        assert_eq!(
            err,
            ModelError::IndexOutOfRange {
                list: "items".into(),
                index: 5,
                len: 2
            }
        );
    }

    #[test]
    fn test_remove_keeps_order() {
        let model = sample()
            .add_list_item("items", Row::new().with("nama", FieldValue::text("Bata")))
            .unwrap();
        let updated = model.remove_list_item("items", 0).unwrap();

        let names: Vec<&str> = updated.rows("items").iter().map(|r| r.text("nama")).collect();
        assert_eq!(names, vec!["Pasir", "Bata"]);
    }

    #[test]
    fn test_list_ops_on_scalar_field() {
        let err = sample().add_list_item("nama", Row::new()).unwrap_err();
        assert_eq!(err, ModelError::NotAList("nama".into()));
    }
}
