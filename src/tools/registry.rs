//! Tool registry - listing and one-shot rendering of every document tool.

use log::info;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use thiserror::Error;

use super::common::PLACE_FIELD;
use super::{catalog, Tool};
use crate::config::AppConfig;
use crate::content::{ContentBuilder, ToolResult};
use crate::model::validation::ValidationErrors;
use crate::model::{Action, FieldValue, ModelError, PageState, Variant};
use crate::render::escape_html;
use crate::session::Session;

/// Name of the catalog page the document pages link back to.
pub const INDEX_FILENAME: &str = "index.html";

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("Tool '{name}' tidak tersedia. Tools yang tersedia: {available}")]
    UnknownTool { name: String, available: String },
    #[error("Argumen tidak valid: {0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Model(#[from] ModelError),
}

/// Tool descriptor as listed to callers.
#[derive(Debug, Serialize)]
pub struct ToolDescriptor {
    pub name: String,
    pub title: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: Value,
}

/// Arguments of a render call: an optional template and field overrides on
/// top of the tool's sample data.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RenderRequest {
    pub variant: Option<Variant>,
    pub fields: Map<String, Value>,
}

/// A rendered standalone page.
#[derive(Debug, Clone)]
pub struct RenderedPage {
    pub tool_title: String,
    pub filename: String,
    pub html: String,
    pub warnings: ValidationErrors,
}

/// Every tool plus the defaults new pages start from.
pub struct ToolRegistry {
    tools: Vec<Box<dyn Tool>>,
    place: Option<String>,
    viewport_width: u32,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: catalog(),
            place: None,
            viewport_width: AppConfig::default().viewport_width,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            tools: catalog(),
            place: Some(config.default_place.clone()),
            viewport_width: config.viewport_width,
        }
    }

    pub fn tools(&self) -> impl Iterator<Item = &dyn Tool> {
        self.tools.iter().map(|tool| tool.as_ref())
    }

    pub fn get(&self, name: &str) -> Result<&dyn Tool, RegistryError> {
        self.tools()
            .find(|tool| tool.id() == name)
            .ok_or_else(|| RegistryError::UnknownTool {
                name: name.to_string(),
                available: self.tools().map(|t| t.id()).collect::<Vec<_>>().join(", "),
            })
    }

    pub fn list_tools(&self) -> Vec<ToolDescriptor> {
        self.tools()
            .map(|tool| ToolDescriptor {
                name: tool.id().to_string(),
                title: tool.title().to_string(),
                description: tool.description().to_string(),
                input_schema: tool.schema().json_schema(),
            })
            .collect()
    }

    /// Sample state of a new page, with the configured place applied.
    pub fn initial_state(&self, tool: &dyn Tool) -> PageState {
        let mut state = PageState::new(tool.schema());
        if let (Some(place), Some(_)) = (&self.place, tool.schema().field(PLACE_FIELD)) {
            if let Ok(model) = state.model.set_field(PLACE_FIELD, FieldValue::text(place.as_str())) {
                state.model = model;
            }
        }
        state
    }

    /// Open an editing session on a tool's sample data.
    pub fn open(&self, name: &str) -> Result<Session<'_>, RegistryError> {
        let tool = self.get(name)?;
        Ok(Session::new(tool, self.initial_state(tool), self.viewport_width))
    }

    /// Render one page from sample data plus `request`.
    pub fn render(&self, name: &str, request: RenderRequest) -> Result<RenderedPage, RegistryError> {
        let tool = self.get(name)?;
        let schema = tool.schema();

        let mut state = self.initial_state(tool);
        state.model = schema.apply_fields(&state.model, &request.fields)?;
        if let Some(variant) = request.variant {
            state = state.reduce(schema, Action::SelectVariant { variant })?;
        }

        let session = Session::new(tool, state, self.viewport_width);
        let page = RenderedPage {
            tool_title: tool.title().to_string(),
            filename: session.filename(),
            html: session.page_html(Some(INDEX_FILENAME)),
            warnings: session.validation(),
        };
        info!(
            "rendered {} -> {} ({} catatan)",
            name,
            page.filename,
            page.warnings.len()
        );
        Ok(page)
    }

    /// Render a tool call into a text summary plus the HTML page.
    pub fn call_tool(&self, name: &str, arguments: Option<Value>) -> ToolResult {
        let request = match parse_arguments::<RenderRequest>(arguments) {
            Ok(request) => request,
            Err(err) => return ToolResult::error(err.to_string()),
        };

        match self.render(name, request) {
            Ok(page) => {
                let mut text = format!("{} berhasil dibuat.\nFile: {}", page.tool_title, page.filename);
                if !page.warnings.is_empty() {
                    text.push_str("\n\n");
                    text.push_str(&page.warnings.to_report());
                }
                ContentBuilder::new()
                    .text(text)
                    .html(&page.html, &page.filename)
                    .build()
            }
            Err(err) => ToolResult::error(err.to_string()),
        }
    }

    /// Sample page of every tool plus the catalog index linking them.
    pub fn render_catalog(&self) -> Result<(String, Vec<RenderedPage>), RegistryError> {
        let pages = self
            .tools()
            .map(|tool| self.render(tool.id(), RenderRequest::default()))
            .collect::<Result<Vec<_>, _>>()?;

        let entries: String = self
            .tools()
            .zip(&pages)
            .map(|(tool, page)| {
                format!(
                    "<li class=\"tool-card\"><a href=\"{}\"><h2>{}</h2></a><p>{}</p><p class=\"tool-variants\">{}</p></li>",
                    escape_html(&page.filename),
                    escape_html(tool.title()),
                    escape_html(tool.description()),
                    tool.schema()
                        .variants()
                        .iter()
                        .map(|info| escape_html(info.label))
                        .collect::<Vec<_>>()
                        .join(" · ")
                )
            })
            .collect();

        let index = format!(
            r#"<!DOCTYPE html>
<html lang="id">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>Generator Surat</title>
<style>body{{font-family:system-ui,sans-serif;margin:0 auto;max-width:960px;padding:24px}}.catalog{{list-style:none;padding:0;display:grid;gap:16px;grid-template-columns:repeat(auto-fill,minmax(260px,1fr))}}.tool-card{{border:1px solid #ddd;border-radius:8px;padding:16px}}.tool-card h2{{font-size:18px;margin:0 0 8px}}.tool-variants{{color:#666;font-size:13px}}</style>
</head>
<body>
<h1>Generator Surat</h1>
<ul class="catalog">{entries}</ul>
</body>
</html>
"#
        );
        Ok((index, pages))
    }
}

pub fn parse_arguments<T: for<'de> Deserialize<'de>>(
    arguments: Option<Value>,
) -> Result<T, RegistryError> {
    let value = arguments.unwrap_or_else(|| json!({}));
    serde_json::from_value(value).map_err(|err| RegistryError::InvalidArguments(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::text_content;

    #[test]
    fn test_list_tools() {
        let registry = ToolRegistry::new();
        let tools = registry.list_tools();
        assert_eq!(tools.len(), 7);
        assert_eq!(tools[0].name, "surat_keterangan_kerja");
        assert_eq!(tools[0].input_schema["properties"]["variant"]["enum"], json!([1, 2]));
    }

    #[test]
    fn test_unknown_tool_lists_available() {
        let result = ToolRegistry::new().call_tool("surat_cinta", None);
        assert!(result.is_error);
        let message = result.message().unwrap();
        assert!(message.contains("Tool 'surat_cinta' tidak tersedia"));
        assert!(message.contains("pesangon"));
    }

    #[test]
    fn test_call_tool_returns_summary_and_page() {
        let result = ToolRegistry::new().call_tool(
            "pesangon",
            Some(json!({ "variant": 2, "fields": { "nama": "Budi Santoso" } })),
        );
        assert!(!result.is_error);
        assert_eq!(result.content.len(), 2);
        assert!(result
            .message()
            .unwrap()
            .contains("File: pesangon-budi-santoso.html"));

        let html = String::from_utf8(result.resource_bytes().unwrap()).unwrap();
        assert!(html.contains("PERJANJIAN BERSAMA"));
        assert!(html.contains("class=\"print-frame\""));
    }

    #[test]
    fn test_invalid_arguments() {
        let registry = ToolRegistry::new();
        let result = registry.call_tool("invoice", Some(json!({ "variant": 3 })));
        assert!(result.is_error);
        assert!(result.message().unwrap().starts_with("Argumen tidak valid"));

        let result = registry.call_tool("invoice", Some(json!({ "fields": { "tanggal": "15/03/2024" } })));
        assert!(result.is_error);

        let err = registry
            .render(
                "surat_belum_memiliki_rumah",
                RenderRequest {
                    variant: Some(Variant::Second),
                    fields: Map::new(),
                },
            )
            .unwrap_err();
        assert!(matches!(err, RegistryError::Model(ModelError::UnsupportedVariant(2))));
    }

    #[test]
    fn test_warnings_are_reported_but_page_renders() {
        let result = ToolRegistry::new().call_tool(
            "surat_belum_memiliki_rumah",
            Some(json!({ "fields": { "nik": "123" } })),
        );
        assert!(!result.is_error);
        assert!(result.message().unwrap().contains("NIK harus terdiri dari 16 digit angka"));
    }

    #[test]
    fn test_configured_place() {
        let config = AppConfig {
            default_place: "Surabaya".to_string(),
            ..AppConfig::default()
        };
        let registry = ToolRegistry::from_config(&config);
        let page = registry.render("invoice", RenderRequest::default()).unwrap();
        assert!(text_content(&page.html).contains("Surabaya, 15 Maret 2024"));

        let session = registry.open("simulasi_kpr").unwrap();
        assert_eq!(session.state().model.text(PLACE_FIELD), "Surabaya");
    }

    #[test]
    fn test_catalog_links_every_page() {
        let (index, pages) = ToolRegistry::new().render_catalog().unwrap();
        assert_eq!(pages.len(), 7);
        for page in &pages {
            assert!(index.contains(&format!("href=\"{}\"", page.filename)));
        }
    }
}
