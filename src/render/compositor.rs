//! Dual-surface compositor.
//!
//! The document body is rendered exactly once per snapshot. The preview
//! wraps it in a scaled A4 sheet; the print surface wraps it in a frame whose
//! header and footer rows repeat on every printed page, so the page padding
//! survives `@page { margin: 0 }` on every sheet a document spills onto.

use serde::Serialize;

use super::html::{escape_html, render_document};
use super::style::{A4_HEIGHT_PX, A4_WIDTH_PX, DOCUMENT_CSS, PRINT_CSS, SCREEN_CSS};
use super::Document;
use crate::model::MobileView;

/// Narrowest viewport that shows the form and the preview side by side.
pub const WIDE_BREAKPOINT_PX: u32 = 1024;

/// Horizontal room taken by the preview pane's padding.
const PREVIEW_GUTTER_PX: f64 = 48.0;

/// Share of a wide viewport given to the preview pane.
const PREVIEW_PANE_SHARE: f64 = 0.6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ViewOptions {
    pub viewport_width: u32,
    pub mobile_view: MobileView,
}

impl Default for ViewOptions {
    fn default() -> Self {
        Self {
            viewport_width: 1280,
            mobile_view: MobileView::Form,
        }
    }
}

/// Scale factor applied to the on-screen A4 sheet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PreviewScale(pub f64);

impl PreviewScale {
    pub const MIN: f64 = 0.35;
    pub const MAX: f64 = 1.0;

    /// Fit the sheet into the preview pane of a viewport `width` pixels wide.
    pub fn for_viewport(width: u32) -> Self {
        let width = width as f64;
        let pane = if width >= WIDE_BREAKPOINT_PX as f64 {
            width * PREVIEW_PANE_SHARE
        } else {
            width
        };
        let fit = ((pane - PREVIEW_GUTTER_PX) / A4_WIDTH_PX).clamp(Self::MIN, Self::MAX);
        Self((fit * 100.0).round() / 100.0)
    }

    pub fn factor(self) -> f64 {
        self.0
    }
}

/// Both surfaces of one snapshot.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Composition {
    pub scale: PreviewScale,
    pub preview: String,
    pub print: String,
}

fn running_block(class: &str, text: Option<&str>) -> String {
    text.filter(|t| !t.trim().is_empty())
        .map(|t| format!("<div class=\"{class}\">{}</div>", escape_html(t)))
        .unwrap_or_default()
}

/// Compose the preview and print surfaces of `doc`.
pub fn compose(doc: &Document, view: &ViewOptions) -> Composition {
    let body = render_document(doc);
    let scale = PreviewScale::for_viewport(view.viewport_width);
    let padding = doc.page.padding_mm;
    let header = running_block("running-header", doc.page.running_header.as_deref());
    let footer = running_block("running-footer", doc.page.running_footer.as_deref());

    let preview = format!(
        "<div class=\"sheet-frame\" style=\"width:{width:.0}px;height:{height:.0}px\"><div class=\"sheet\" style=\"transform:scale({s});padding:{padding}mm\">{header}{body}{footer}</div></div>",
        width = A4_WIDTH_PX * scale.factor(),
        height = A4_HEIGHT_PX * scale.factor(),
        s = scale.factor(),
    );

    let print = format!(
        "<table class=\"print-frame\"><thead><tr><td style=\"padding:{padding}mm {padding}mm 0\">{header}</td></tr></thead><tbody><tr><td style=\"padding:0 {padding}mm\">{body}</td></tr></tbody><tfoot><tr><td style=\"padding:0 {padding}mm {padding}mm\">{footer}</td></tr></tfoot></table>"
    );

    Composition {
        scale,
        preview,
        print,
    }
}

/// Page shell around a composition.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PageChrome {
    pub tool_title: String,
    /// Variant labels with whether each is the active one.
    pub variants: Vec<(String, bool)>,
    /// Edit panel contents as label / display value pairs.
    pub edit_summary: Vec<(String, String)>,
    /// Advisory validation notes shown above the edit panel.
    pub warnings: Vec<String>,
    pub mobile_view: MobileView,
    pub back_link: Option<String>,
}

/// Standalone HTML page holding the toolbar, edit panel, preview and print
/// surface.
pub fn compose_page(chrome: &PageChrome, composition: &Composition) -> String {
    let title = escape_html(&chrome.tool_title);
    let view_class = match chrome.mobile_view {
        MobileView::Form => "view-form",
        MobileView::Preview => "view-preview",
    };
    let toggle_label = match chrome.mobile_view {
        MobileView::Form => "Lihat Pratinjau",
        MobileView::Preview => "Edit Data",
    };

    let back = chrome
        .back_link
        .as_deref()
        .map(|href| format!("<a href=\"{}\">&larr; Katalog</a>", escape_html(href)))
        .unwrap_or_default();

    let variants: String = chrome
        .variants
        .iter()
        .enumerate()
        .map(|(i, (label, active))| {
            format!(
                "<li class=\"variant{}\" data-variant=\"{}\">{}</li>",
                if *active { " active" } else { "" },
                i + 1,
                escape_html(label)
            )
        })
        .collect();

    let warnings: String = chrome
        .warnings
        .iter()
        .map(|w| format!("<div class=\"note note-warning\">{}</div>", escape_html(w)))
        .collect();

    let summary: String = chrome
        .edit_summary
        .iter()
        .map(|(label, value)| {
            format!(
                "<dt>{}</dt><dd>{}</dd>",
                escape_html(label),
                escape_html(value)
            )
        })
        .collect();

    format!(
        r#"<!DOCTYPE html>
<html lang="id">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title}</title>
<style>{DOCUMENT_CSS}{SCREEN_CSS}{PRINT_CSS}</style>
</head>
<body class="{view_class}">
<nav class="toolbar no-print">{back}<h1>{title}</h1><ul class="variant-list">{variants}</ul><button class="mobile-toggle" type="button">{toggle_label}</button><button class="print-button" type="button" onclick="window.print()">Cetak / PDF</button></nav>
<main class="workspace no-print">
<aside class="edit-panel">{warnings}<dl>{summary}</dl></aside>
<section class="preview-pane">{preview}</section>
</main>
<div id="print-surface">{print}</div>
</body>
</html>
"#,
        preview = composition.preview,
        print = composition.print,
    )
}
