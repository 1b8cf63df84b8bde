//! Document tree produced by the template renderers, and the HTML surfaces
//! it is drawn on.
//!
//! A tool turns its model into a [`Document`]; [`html::render_document`]
//! turns that into markup once, and the [`compositor`] wraps the same markup
//! for the on-screen preview and for the print-only surface.

pub mod compositor;
pub mod html;
pub mod style;

use serde::Serialize;

pub use compositor::{compose, compose_page, Composition, PageChrome, PreviewScale, ViewOptions};
pub use html::{escape_html, render_document, text_content};

/// Physical page settings. `@page` margins are always zero; `padding_mm`
/// simulates the margin inside the sheet.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PageSetup {
    pub padding_mm: f32,
    /// Repeated at the top of every printed page.
    pub running_header: Option<String>,
    pub running_footer: Option<String>,
}

impl Default for PageSetup {
    fn default() -> Self {
        Self {
            padding_mm: 20.0,
            running_header: None,
            running_footer: None,
        }
    }
}

impl PageSetup {
    /// Page setup for long documents with a running header and footer.
    pub fn running(header: impl Into<String>, footer: impl Into<String>) -> Self {
        Self {
            running_header: Some(header.into()),
            running_footer: Some(footer.into()),
            ..Self::default()
        }
    }
}

/// A laid-out document, ready for HTML rendering.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Document {
    pub title: String,
    pub page: PageSetup,
    pub blocks: Vec<Block>,
}

impl Document {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            page: PageSetup::default(),
            blocks: Vec::new(),
        }
    }

    pub fn with_page(mut self, page: PageSetup) -> Self {
        self.page = page;
        self
    }

    pub fn push(&mut self, block: Block) -> &mut Self {
        self.blocks.push(block);
        self
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Align {
    Left,
    Center,
    Right,
    #[default]
    Justify,
}

impl Align {
    pub fn css_class(self) -> &'static str {
        match self {
            Self::Left => "align-left",
            Self::Center => "align-center",
            Self::Right => "align-right",
            Self::Justify => "align-justify",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    Info,
    Safe,
    Warning,
    Danger,
}

/// A run of text, optionally emphasized.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Span {
    pub text: String,
    pub strong: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Paragraph {
    pub spans: Vec<Span>,
    pub align: Align,
    pub indent: bool,
}

impl Paragraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn plain(text: impl Into<String>) -> Self {
        Self::new().text(text)
    }

    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.spans.push(Span {
            text: text.into(),
            strong: false,
        });
        self
    }

    pub fn strong(mut self, text: impl Into<String>) -> Self {
        self.spans.push(Span {
            text: text.into(),
            strong: true,
        });
        self
    }

    pub fn align(mut self, align: Align) -> Self {
        self.align = align;
        self
    }

    pub fn indented(mut self) -> Self {
        self.indent = true;
        self
    }
}

/// Letterhead (kop surat).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kop {
    /// `data:` URL of the uploaded logo, if any.
    pub logo: Option<String>,
    pub name: String,
    pub lines: Vec<String>,
}

/// A "label : value" row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldRow {
    pub label: String,
    pub value: String,
}

impl FieldRow {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Column {
    pub header: String,
    pub align: Align,
}

impl Column {
    pub fn left(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            align: Align::Left,
        }
    }

    pub fn center(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            align: Align::Center,
        }
    }

    pub fn right(header: impl Into<String>) -> Self {
        Self {
            header: header.into(),
            align: Align::Right,
        }
    }
}

/// A tabular section. Footer rows span all but the last column.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<String>>,
    pub footer: Vec<FieldRow>,
}

impl Table {
    pub fn new(columns: Vec<Column>) -> Self {
        Self {
            columns,
            ..Self::default()
        }
    }

    pub fn row(mut self, cells: Vec<String>) -> Self {
        self.rows.push(cells);
        self
    }

    pub fn footer(mut self, label: impl Into<String>, value: impl Into<String>) -> Self {
        self.footer.push(FieldRow::new(label, value));
        self
    }
}

/// A numbered article (pasal) of an agreement.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Clause {
    pub heading: String,
    pub paragraphs: Vec<Paragraph>,
}

impl Clause {
    pub fn new(heading: impl Into<String>, paragraphs: Vec<Paragraph>) -> Self {
        Self {
            heading: heading.into(),
            paragraphs,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Signatory {
    pub role: String,
    pub name: String,
    pub title: Option<String>,
}

impl Signatory {
    pub fn new(role: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            name: name.into(),
            title: None,
        }
    }

    pub fn titled(mut self, title: impl Into<String>) -> Self {
        let title = title.into();
        self.title = (!title.trim().is_empty()).then_some(title);
        self
    }
}

/// Signature area; never split across pages.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SignatureBlock {
    pub place_date: Option<String>,
    pub signatories: Vec<Signatory>,
    pub witnesses: Vec<Signatory>,
    /// Leave room for a duty stamp (materai) on the last signatory.
    pub stamp: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum Block {
    Kop(Kop),
    Title {
        text: String,
        subtitle: Option<String>,
    },
    Paragraph(Paragraph),
    Fields(Vec<FieldRow>),
    Table(Table),
    Clauses(Vec<Clause>),
    Signatures(SignatureBlock),
    Note {
        tone: Tone,
        text: String,
    },
    Spacer,
}

impl Block {
    pub fn title(text: impl Into<String>, subtitle: Option<String>) -> Self {
        Self::Title {
            text: text.into(),
            subtitle,
        }
    }

    pub fn note(tone: Tone, text: impl Into<String>) -> Self {
        Self::Note {
            tone,
            text: text.into(),
        }
    }
}
