//! Stylesheets for the page shell.
//!
//! `SCREEN_CSS` lays out the editor and the scaled preview; `PRINT_CSS` hides
//! everything except `#print-surface` and sizes it to A4 with zero page margin.

/// A4 width at 96 dpi, in CSS pixels.
pub const A4_WIDTH_PX: f64 = 794.0;

/// A4 height at 96 dpi, in CSS pixels.
pub const A4_HEIGHT_PX: f64 = 1123.0;

pub const DOCUMENT_CSS: &str = r#"
.doc-body { font-family: "Times New Roman", Times, serif; font-size: 12pt; line-height: 1.5; color: #000; }
.doc-body p { margin: 0 0 8pt; }
.align-left { text-align: left; }
.align-center { text-align: center; }
.align-right { text-align: right; }
.align-justify { text-align: justify; }
.indent { text-indent: 1.25cm; }
.kop { display: flex; align-items: center; gap: 12pt; }
.kop-logo { max-height: 72px; max-width: 96px; object-fit: contain; }
.kop-text { flex: 1; text-align: center; }
.kop-name { font-size: 16pt; font-weight: bold; text-transform: uppercase; }
.kop-line { font-size: 10pt; }
.kop-rule { border: 0; border-top: 3px double #000; margin: 6pt 0 14pt; }
.doc-title { font-size: 14pt; text-align: center; text-decoration: underline; margin: 12pt 0 2pt; }
.doc-subtitle { text-align: center; margin-bottom: 14pt; }
.doc-fields { border-collapse: collapse; margin: 4pt 0 10pt 1cm; }
.doc-fields td { vertical-align: top; padding: 1pt 4pt; }
.field-label { width: 5cm; }
.field-sep { width: 8pt; }
.doc-table { width: 100%; border-collapse: collapse; margin: 6pt 0 12pt; font-size: 11pt; }
.doc-table th, .doc-table td { border: 1px solid #000; padding: 3pt 6pt; }
.doc-table th { background: #eee; }
.clause-heading { font-size: 12pt; text-align: center; margin: 12pt 0 4pt; }
.signatures { margin-top: 24pt; }
.place-date { text-align: right; }
.signature-row { display: flex; justify-content: space-between; gap: 16pt; }
.signatory { flex: 1; text-align: center; }
.sign-space { height: 72pt; display: flex; align-items: center; justify-content: center; }
.stamp-box { border: 1px dashed #999; color: #999; font-size: 8pt; padding: 10pt 6pt; }
.sign-name { font-weight: bold; text-decoration: underline; margin: 0; }
.sign-title { margin: 0; }
.witness-label { margin-top: 16pt; }
.note { border-left: 4px solid; padding: 6pt 10pt; margin: 8pt 0; font-size: 10.5pt; }
.note-info { border-color: #2563eb; background: #eff6ff; }
.note-safe { border-color: #16a34a; background: #f0fdf4; }
.note-warning { border-color: #d97706; background: #fffbeb; }
.note-danger { border-color: #dc2626; background: #fef2f2; }
.spacer { height: 18pt; }
.running-header, .running-footer { font-size: 9pt; color: #555; }
.running-header { border-bottom: 1px solid #999; margin-bottom: 10pt; }
.running-footer { border-top: 1px solid #999; margin-top: 10pt; }
"#;

pub const SCREEN_CSS: &str = r#"
* { box-sizing: border-box; }
body { margin: 0; font-family: system-ui, sans-serif; background: #f1f5f9; color: #0f172a; }
.toolbar { display: flex; align-items: center; gap: 12px; padding: 10px 16px; background: #0f172a; color: #fff; position: sticky; top: 0; z-index: 10; }
.toolbar h1 { font-size: 16px; margin: 0; flex: 1; }
.toolbar a { color: #cbd5e1; text-decoration: none; }
.variant-list { display: flex; gap: 6px; list-style: none; margin: 0; padding: 0; }
.variant { padding: 4px 10px; border-radius: 4px; background: #1e293b; }
.variant.active { background: #2563eb; }
.print-button { padding: 6px 14px; border: 0; border-radius: 4px; background: #16a34a; color: #fff; cursor: pointer; }
.mobile-toggle { display: none; }
.workspace { display: flex; gap: 24px; padding: 24px; align-items: flex-start; }
.edit-panel { flex: 0 0 40%; background: #fff; border-radius: 8px; padding: 16px; }
.edit-panel dl { margin: 0; }
.edit-panel dt { font-weight: 600; font-size: 13px; margin-top: 8px; }
.edit-panel dd { margin: 0; font-size: 13px; color: #475569; }
.preview-pane { flex: 1; overflow-x: hidden; }
.sheet-frame { overflow: visible; }
.sheet { width: 794px; min-height: 1123px; background: #fff; box-shadow: 0 2px 12px rgba(0,0,0,.15); transform-origin: top left; }
#print-surface { display: none; }
@media (max-width: 1023px) {
  .workspace { flex-direction: column; padding: 12px; }
  .edit-panel { flex: none; width: 100%; }
  .mobile-toggle { display: inline-block; }
  .view-form .preview-pane { display: none; }
  .view-preview .edit-panel { display: none; }
}
"#;

pub const PRINT_CSS: &str = r#"
@page { size: A4; margin: 0; }
@media print {
  html, body { margin: 0; padding: 0; background: #fff; height: auto; }
  .no-print, .toolbar, .workspace { display: none !important; }
  #print-surface { display: block; width: 210mm; height: auto; overflow: visible; }
  .print-frame { width: 100%; border-collapse: collapse; }
  .print-frame > thead { display: table-header-group; }
  .print-frame > tfoot { display: table-footer-group; }
  .print-frame td { padding: 0; vertical-align: top; }
  .keep-together, .signatures, .doc-table tr { break-inside: avoid; page-break-inside: avoid; }
  .doc-table thead { display: table-header-group; }
  .doc-title, .clause-heading { break-after: avoid; page-break-after: avoid; }
}
"#;
