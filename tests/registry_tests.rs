use generator_surat::model::Action;
use generator_surat::render::text_content;
use generator_surat::session::protocol::handle_line;
use generator_surat::tools::{RenderRequest, ToolRegistry};
use generator_surat::{AppConfig, Session, SessionError};
use serde_json::{json, Value};
use std::io::Write;

const PNG_HEADER: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];

// Registry Tests

#[test]
fn test_catalog_order() {
    let ids: Vec<_> = ToolRegistry::new().tools().map(|tool| tool.id()).collect();
    assert_eq!(
        ids,
        vec![
            "surat_keterangan_kerja",
            "perjanjian_sewa",
            "surat_garansi",
            "invoice",
            "simulasi_kpr",
            "pesangon",
            "surat_belum_memiliki_rumah",
        ]
    );
}

#[test]
fn test_render_with_list_override() {
    let registry = ToolRegistry::new();
    let mut fields = serde_json::Map::new();
    fields.insert(
        "items".to_string(),
        json!([{ "nama": "Sewa server", "qty": 3, "satuan": "bulan", "harga": "1.000.000" }]),
    );
    fields.insert("diskon_persen".to_string(), json!(0));
    fields.insert("ppn_persen".to_string(), json!(0));

    let page = registry
        .render("invoice", RenderRequest { variant: None, fields })
        .unwrap();
    let text = text_content(&page.html);
    assert!(text.contains("Sewa server"));
    assert!(text.contains("Rp 3.000.000"));
    assert!(text.contains("Tiga juta rupiah"));
}

#[test]
fn test_call_tool_kpr_warning_note() {
    let result = ToolRegistry::new().call_tool(
        "simulasi_kpr",
        Some(json!({ "fields": { "penghasilan": 0 } })),
    );
    assert!(!result.is_error);
    let html = String::from_utf8(result.resource_bytes().unwrap()).unwrap();
    assert!(text_content(&html).contains("Berisiko"));
}

#[test]
fn test_kpr_tenor_past_limit_renders_note() {
    let result = ToolRegistry::new().call_tool(
        "simulasi_kpr",
        Some(json!({ "variant": 2, "fields": { "tenor": 1_000_000 } })),
    );
    assert!(!result.is_error);
    assert!(result.message().unwrap().contains("melebihi batas 50 tahun"));
    let html = String::from_utf8(result.resource_bytes().unwrap()).unwrap();
    assert!(text_content(&html).contains("Perhitungan tidak dapat dibuat"));
    assert!(html.len() < 200_000);
}

#[test]
fn test_configured_output_defaults() {
    let config = AppConfig::from_lookup(|key| match key {
        "SURAT_KOTA" => Some("Depok".to_string()),
        _ => None,
    });
    let registry = ToolRegistry::from_config(&config);
    let page = registry.render("surat_garansi", RenderRequest::default()).unwrap();
    assert!(text_content(&page.html).contains("Depok"));
}

// Session Tests

#[test]
fn test_session_refreshes_after_each_edit() {
    let registry = ToolRegistry::new();
    let mut session = registry.open("surat_keterangan_kerja").unwrap();
    let before = session.page_html(None);

    let revision = session
        .dispatch(Action::SetField {
            name: "nama".to_string(),
            value: json!("Sri Wahyuni"),
        })
        .unwrap();
    assert_eq!(revision, 1);
    assert!(text_content(&session.composition().preview).contains("Sri Wahyuni"));
    assert!(text_content(&session.composition().print).contains("Sri Wahyuni"));
    assert_ne!(session.page_html(None), before);
    assert_eq!(session.filename(), "surat-keterangan-kerja-sri-wahyuni.html");
}

#[test]
fn test_session_rejects_edit_without_refresh() {
    let registry = ToolRegistry::new();
    let mut session = registry.open("pesangon").unwrap();
    let before = session.composition().clone();

    let err = session
        .dispatch(Action::SetField {
            name: "alasan".to_string(),
            value: json!("dipecat"),
        })
        .unwrap_err();
    assert!(matches!(err, SessionError::Model(_)));
    assert_eq!(session.revision(), 0);
    assert_eq!(session.composition(), &before);
}

#[test]
fn test_session_loads_logo_file() {
    let registry = ToolRegistry::new();
    let mut session = registry.open("invoice").unwrap();

    let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
    file.write_all(&PNG_HEADER).unwrap();
    file.write_all(&[0u8; 32]).unwrap();

    session.load_logo(file.path()).unwrap();
    assert!(session
        .state()
        .model
        .text("logo")
        .starts_with("data:image/png;base64,"));
    assert!(session.composition().print.contains("<img"));
}

#[test]
fn test_session_rejects_non_image_logo() {
    let registry = ToolRegistry::new();
    let mut session = registry.open("invoice").unwrap();

    let mut file = tempfile::Builder::new().suffix(".txt").tempfile().unwrap();
    file.write_all(b"bukan gambar").unwrap();

    let err = session.load_logo(file.path()).unwrap_err();
    assert!(matches!(err, SessionError::Content(_)));
    assert_eq!(session.state().model.text("logo"), "");
}

// Protocol Tests

fn reply(session: &mut Session<'_>, registry: &ToolRegistry, line: &str) -> Value {
    serde_json::from_str(&handle_line(session, registry, line).unwrap()).unwrap()
}

#[test]
fn test_protocol_round_trip() {
    let registry = ToolRegistry::new();
    let mut session = registry.open("perjanjian_sewa").unwrap();

    let response = reply(
        &mut session,
        &registry,
        r#"{"jsonrpc":"2.0","id":1,"method":"session/dispatch","params":{"action":{"type":"select_variant","variant":2}}}"#,
    );
    assert_eq!(response["result"]["revision"], 1);

    let state = reply(&mut session, &registry, r#"{"jsonrpc":"2.0","id":2,"method":"session/state"}"#);
    assert_eq!(state["result"]["variant"], 2);
    assert_eq!(state["result"]["revision"], 1);

    let call = reply(
        &mut session,
        &registry,
        r#"{"jsonrpc":"2.0","id":3,"method":"tools/call","params":{"name":"surat_garansi"}}"#,
    );
    assert_eq!(call["result"]["isError"], false);
}
