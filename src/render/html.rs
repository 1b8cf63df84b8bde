//! HTML writer for the document tree.
//!
//! [`render_document`] is the one render function both surfaces share.

use super::{Block, Clause, Document, FieldRow, Kop, Paragraph, SignatureBlock, Signatory, Table, Tone};

/// Escape special characters for HTML text and attribute values.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(ch),
        }
    }
    escaped
}

/// Escaped text with line breaks kept.
fn escape_multiline(value: &str) -> String {
    escape_html(value).replace('\n', "<br>")
}

/// Render the document body. Surfaces wrap this markup, never rebuild it.
pub fn render_document(doc: &Document) -> String {
    let mut out = String::from("<div class=\"doc-body\">");
    for block in &doc.blocks {
        render_block(&mut out, block);
    }
    out.push_str("</div>");
    out
}

fn render_block(out: &mut String, block: &Block) {
    match block {
        Block::Kop(kop) => render_kop(out, kop),
        Block::Title { text, subtitle } => {
            out.push_str(&format!("<h1 class=\"doc-title\">{}</h1>", escape_html(text)));
            if let Some(subtitle) = subtitle {
                out.push_str(&format!(
                    "<p class=\"doc-subtitle\">{}</p>",
                    escape_html(subtitle)
                ));
            }
        }
        Block::Paragraph(paragraph) => render_paragraph(out, paragraph),
        Block::Fields(rows) => render_fields(out, rows),
        Block::Table(table) => render_table(out, table),
        Block::Clauses(clauses) => clauses.iter().for_each(|c| render_clause(out, c)),
        Block::Signatures(block) => render_signatures(out, block),
        Block::Note { tone, text } => {
            let tone = match tone {
                Tone::Info => "info",
                Tone::Safe => "safe",
                Tone::Warning => "warning",
                Tone::Danger => "danger",
            };
            out.push_str(&format!(
                "<div class=\"note note-{tone}\">{}</div>",
                escape_multiline(text)
            ));
        }
        Block::Spacer => out.push_str("<div class=\"spacer\"></div>"),
    }
}

fn render_kop(out: &mut String, kop: &Kop) {
    out.push_str("<header class=\"kop\">");
    if let Some(logo) = kop.logo.as_deref().filter(|l| !l.is_empty()) {
        out.push_str(&format!(
            "<img class=\"kop-logo\" src=\"{}\" alt=\"\">",
            escape_html(logo)
        ));
    }
    out.push_str(&format!(
        "<div class=\"kop-text\"><div class=\"kop-name\">{}</div>",
        escape_html(&kop.name)
    ));
    for line in kop.lines.iter().filter(|l| !l.trim().is_empty()) {
        out.push_str(&format!("<div class=\"kop-line\">{}</div>", escape_html(line)));
    }
    out.push_str("</div></header><hr class=\"kop-rule\">");
}

fn render_paragraph(out: &mut String, paragraph: &Paragraph) {
    let mut class = paragraph.align.css_class().to_string();
    if paragraph.indent {
        class.push_str(" indent");
    }
    out.push_str(&format!("<p class=\"{class}\">"));
    for span in &paragraph.spans {
        if span.strong {
            out.push_str(&format!("<strong>{}</strong>", escape_multiline(&span.text)));
        } else {
            out.push_str(&escape_multiline(&span.text));
        }
    }
    out.push_str("</p>");
}

fn render_fields(out: &mut String, rows: &[FieldRow]) {
    out.push_str("<table class=\"doc-fields\"><tbody>");
    for row in rows {
        out.push_str(&format!(
            "<tr><td class=\"field-label\">{}</td><td class=\"field-sep\">:</td><td class=\"field-value\">{}</td></tr>",
            escape_html(&row.label),
            escape_multiline(&row.value)
        ));
    }
    out.push_str("</tbody></table>");
}

fn render_table(out: &mut String, table: &Table) {
    out.push_str("<table class=\"doc-table\"><thead><tr>");
    for column in &table.columns {
        out.push_str(&format!(
            "<th class=\"{}\">{}</th>",
            column.align.css_class(),
            escape_html(&column.header)
        ));
    }
    out.push_str("</tr></thead><tbody>");

    for row in &table.rows {
        out.push_str("<tr class=\"keep-together\">");
        for (i, cell) in row.iter().enumerate() {
            let align = table
                .columns
                .get(i)
                .map(|c| c.align.css_class())
                .unwrap_or("align-left");
            out.push_str(&format!("<td class=\"{align}\">{}</td>", escape_multiline(cell)));
        }
        out.push_str("</tr>");
    }
    out.push_str("</tbody>");

    if !table.footer.is_empty() {
        let span = table.columns.len().saturating_sub(1).max(1);
        out.push_str("<tfoot>");
        for row in &table.footer {
            out.push_str(&format!(
                "<tr class=\"keep-together\"><td colspan=\"{span}\" class=\"align-right\"><strong>{}</strong></td><td class=\"align-right\"><strong>{}</strong></td></tr>",
                escape_html(&row.label),
                escape_html(&row.value)
            ));
        }
        out.push_str("</tfoot>");
    }

    out.push_str("</table>");
}

fn render_clause(out: &mut String, clause: &Clause) {
    out.push_str(&format!(
        "<section class=\"clause keep-together\"><h2 class=\"clause-heading\">{}</h2>",
        escape_multiline(&clause.heading)
    ));
    for paragraph in &clause.paragraphs {
        render_paragraph(out, paragraph);
    }
    out.push_str("</section>");
}

fn render_signatory(out: &mut String, signatory: &Signatory, stamp: bool) {
    out.push_str(&format!(
        "<div class=\"signatory\"><p class=\"sign-role\">{}</p><div class=\"sign-space\">",
        escape_multiline(&signatory.role)
    ));
    if stamp {
        out.push_str("<span class=\"stamp-box\">Meterai 10.000</span>");
    }
    out.push_str(&format!(
        "</div><p class=\"sign-name\">{}</p>",
        escape_html(&signatory.name)
    ));
    if let Some(title) = &signatory.title {
        out.push_str(&format!("<p class=\"sign-title\">{}</p>", escape_html(title)));
    }
    out.push_str("</div>");
}

fn render_signatures(out: &mut String, block: &SignatureBlock) {
    out.push_str("<section class=\"signatures keep-together\">");
    if let Some(place_date) = &block.place_date {
        out.push_str(&format!(
            "<p class=\"place-date\">{}</p>",
            escape_html(place_date)
        ));
    }

    let last = block.signatories.len().saturating_sub(1);
    out.push_str(&format!(
        "<div class=\"signature-row cols-{}\">",
        block.signatories.len().max(1)
    ));
    for (i, signatory) in block.signatories.iter().enumerate() {
        render_signatory(out, signatory, block.stamp && i == last);
    }
    out.push_str("</div>");

    if !block.witnesses.is_empty() {
        out.push_str(&format!(
            "<p class=\"witness-label\">Saksi-saksi:</p><div class=\"signature-row cols-{}\">",
            block.witnesses.len()
        ));
        for witness in &block.witnesses {
            render_signatory(out, witness, false);
        }
        out.push_str("</div>");
    }

    out.push_str("</section>");
}

/// Visible text of a fragment: tags dropped, entities decoded, whitespace
/// collapsed.
pub fn text_content(html: &str) -> String {
    let mut text = String::with_capacity(html.len());
    let mut in_tag = false;

    for ch in html.chars() {
        match ch {
            '<' => {
                in_tag = true;
                text.push(' ');
            }
            '>' if in_tag => in_tag = false,
            _ if !in_tag => text.push(ch),
            _ => {}
        }
    }

    let decoded = text
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");

    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::{Column, PageSetup};

    fn sample() -> Document {
        let mut doc = Document::new("Contoh").with_page(PageSetup::default());
        doc.push(Block::Kop(Kop {
            logo: None,
            name: "PT Maju & Jaya".into(),
            lines: vec!["Jl. Sudirman No. 1".into(), "".into()],
        }))
        .push(Block::title("SURAT KETERANGAN", Some("Nomor: 01/2024".into())))
        .push(Block::Paragraph(Paragraph::plain("Yang bertanda tangan ").strong("Budi")))
        .push(Block::Table(
            Table::new(vec![Column::left("Barang"), Column::right("Harga")])
                .row(vec!["Semen".into(), "Rp 50.000".into()])
                .footer("Total", "Rp 50.000"),
        ))
        .push(Block::Signatures(SignatureBlock {
            place_date: Some("Jakarta, 1 Maret 2024".into()),
            signatories: vec![Signatory::new("Hormat kami,", "Budi").titled("Direktur")],
            witnesses: vec![],
            stamp: true,
        }));
        doc
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn test_render_escapes_user_text() {
        let html = render_document(&sample());
        assert!(html.contains("PT Maju &amp; Jaya"));
        assert!(!html.contains("PT Maju & Jaya"));
    }

    #[test]
    fn test_render_skips_empty_kop_lines_and_logo() {
        let html = render_document(&sample());
        assert_eq!(html.matches("kop-line").count(), 1);
        assert!(!html.contains("<img"));
    }

    #[test]
    fn test_table_footer_colspan() {
        let html = render_document(&sample());
        assert!(html.contains("<td colspan=\"1\" class=\"align-right\"><strong>Total</strong>"));
        assert!(html.contains("<tr class=\"keep-together\"><td class=\"align-left\">Semen</td>"));
    }

    #[test]
    fn test_signature_stamp_on_last_signatory() {
        let html = render_document(&sample());
        assert!(html.contains("stamp-box"));
        assert!(html.contains("<p class=\"sign-title\">Direktur</p>"));
    }

    #[test]
    fn test_text_content() {
        let text = text_content(&render_document(&sample()));
        assert!(text.starts_with("PT Maju & Jaya Jl. Sudirman No. 1 SURAT KETERANGAN"));
        assert!(text.contains("Yang bertanda tangan Budi"));
        assert!(!text.contains('<'));
    }

    #[test]
    fn test_multiline_paragraph() {
        let mut doc = Document::new("x");
        doc.push(Block::Paragraph(Paragraph::plain("baris 1\nbaris 2")));
        assert!(render_document(&doc).contains("baris 1<br>baris 2"));
    }
}
