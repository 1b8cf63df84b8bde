//! Page state and the reducer that applies edit-panel actions to it.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{DocumentModel, DocumentSchema, FieldValue, ModelError, Variant};

/// Which half of the page is shown on narrow screens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MobileView {
    #[default]
    Form,
    Preview,
}

impl MobileView {
    pub fn toggled(self) -> Self {
        match self {
            Self::Form => Self::Preview,
            Self::Preview => Self::Form,
        }
    }
}

/// A user interaction with the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    SetField {
        name: String,
        value: Value,
    },
    SetListItem {
        list: String,
        index: usize,
        field: String,
        value: Value,
    },
    /// Append a row; without `row` the schema's blank row is used.
    AddListItem {
        list: String,
        #[serde(default)]
        row: Option<Value>,
    },
    RemoveListItem {
        list: String,
        index: usize,
    },
    SelectVariant {
        variant: Variant,
    },
    ToggleMobileView,
    /// Assign an already-read logo (`data:` URL) to the image field.
    SetLogo {
        data_url: String,
    },
}

/// Everything one page owns: the document model plus UI selections.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageState {
    pub model: DocumentModel,
    pub variant: Variant,
    pub mobile_view: MobileView,
}

impl PageState {
    pub fn new(schema: &DocumentSchema) -> Self {
        Self {
            model: schema.default_model(),
            variant: Variant::default(),
            mobile_view: MobileView::default(),
        }
    }

    /// Apply one action, producing the next state.
    ///
    /// A rejected action returns the error and leaves `self` as it was.
    pub fn reduce(&self, schema: &DocumentSchema, action: Action) -> Result<Self, ModelError> {
        match action {
            Action::SetField { name, value } => {
                let value = schema.coerce(&name, &value)?;
                Ok(self.with_model(self.model.set_field(&name, value)?))
            }
            Action::SetListItem {
                list,
                index,
                field,
                value,
            } => {
                let value = schema.coerce_cell(&list, &field, &value)?;
                Ok(self.with_model(self.model.set_list_item(&list, index, &field, value)?))
            }
            Action::AddListItem { list, row } => {
                let row = match row {
                    Some(raw) => schema.coerce_row(&list, &raw)?,
                    None => schema.blank_row(&list)?,
                };
                Ok(self.with_model(self.model.add_list_item(&list, row)?))
            }
            Action::RemoveListItem { list, index } => {
                Ok(self.with_model(self.model.remove_list_item(&list, index)?))
            }
            Action::SelectVariant { variant } => {
                if !schema.supports(variant) {
                    return Err(ModelError::UnsupportedVariant(variant.id()));
                }
                Ok(Self {
                    variant,
                    ..self.clone()
                })
            }
            Action::ToggleMobileView => Ok(Self {
                mobile_view: self.mobile_view.toggled(),
                ..self.clone()
            }),
            Action::SetLogo { data_url } => {
                let field = schema
                    .image_field()
                    .ok_or_else(|| ModelError::UnknownField("logo".to_string()))?;
                Ok(self.with_model(
                    self.model
                        .set_field(field.name, FieldValue::Text(data_url))?,
                ))
            }
        }
    }

    fn with_model(&self, model: DocumentModel) -> Self {
        Self {
            model,
            ..self.clone()
        }
    }
}
