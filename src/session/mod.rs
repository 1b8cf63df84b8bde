//! One open document page.
//!
//! A [`Session`] owns the page state of a single tool together with the
//! document and both surfaces rendered from it. Every accepted action is
//! followed by a synchronous recompute and re-render, so the preview and the
//! print surface always show the state the last action produced.

pub mod protocol;

use log::{debug, info, warn};
use std::path::Path;
use thiserror::Error;

use crate::content::{logo_data_url, ContentError};
use crate::model::validation::ValidationErrors;
use crate::model::{Action, ModelError, PageState};
use crate::render::{compose, compose_page, Composition, Document, PageChrome, ViewOptions};
use crate::tools::common::{edit_summary, output_filename};
use crate::tools::Tool;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Model(#[from] ModelError),
    #[error(transparent)]
    Content(#[from] ContentError),
}

pub struct Session<'t> {
    tool: &'t dyn Tool,
    state: PageState,
    revision: u64,
    viewport_width: u32,
    document: Document,
    composition: Composition,
}

impl<'t> Session<'t> {
    /// Open a page on `state` and render it once.
    pub fn new(tool: &'t dyn Tool, state: PageState, viewport_width: u32) -> Self {
        let document = tool.build(&state.model, state.variant);
        let composition = compose(&document, &view(&state, viewport_width));
        info!("opened {} (template {})", tool.id(), state.variant.id());
        Self {
            tool,
            state,
            revision: 0,
            viewport_width,
            document,
            composition,
        }
    }

    pub fn tool(&self) -> &'t dyn Tool {
        self.tool
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    /// Number of accepted actions so far.
    pub fn revision(&self) -> u64 {
        self.revision
    }

    pub fn document(&self) -> &Document {
        &self.document
    }

    pub fn composition(&self) -> &Composition {
        &self.composition
    }

    /// Apply `action` and re-render both surfaces before returning.
    ///
    /// A rejected action leaves the page exactly as it was.
    pub fn dispatch(&mut self, action: Action) -> Result<u64, SessionError> {
        let next = match self.state.reduce(self.tool.schema(), action) {
            Ok(next) => next,
            Err(err) => {
                warn!("{}: edit rejected: {}", self.tool.id(), err);
                return Err(err.into());
            }
        };

        self.state = next;
        self.revision += 1;
        self.refresh();
        Ok(self.revision)
    }

    /// Read an image from disk and put it in the letterhead.
    pub fn load_logo(&mut self, path: &Path) -> Result<u64, SessionError> {
        let logo = logo_data_url(path)?;
        self.dispatch(Action::SetLogo {
            data_url: logo.data_url,
        })
    }

    fn refresh(&mut self) {
        debug!(
            "{}: recompute revision {} (template {})",
            self.tool.id(),
            self.revision,
            self.state.variant.id()
        );
        self.document = self.tool.build(&self.state.model, self.state.variant);
        self.composition = compose(&self.document, &view(&self.state, self.viewport_width));
    }

    /// Advisory validation of the current model.
    pub fn validation(&self) -> ValidationErrors {
        self.tool.validate(&self.state.model)
    }

    /// Validation notes as shown above the edit panel.
    pub fn warnings(&self) -> Vec<String> {
        self.validation().iter().map(ToString::to_string).collect()
    }

    /// File name for the current snapshot, e.g. `invoice-inv-2024-03-0012.html`.
    pub fn filename(&self) -> String {
        output_filename(self.tool.id(), self.tool.subject(&self.state.model))
    }

    /// Standalone HTML page of the current snapshot.
    pub fn page_html(&self, back_link: Option<&str>) -> String {
        let schema = self.tool.schema();
        let chrome = PageChrome {
            tool_title: self.tool.title().to_string(),
            variants: schema
                .variants()
                .iter()
                .map(|info| (info.label.to_string(), info.variant == self.state.variant))
                .collect(),
            edit_summary: edit_summary(schema, &self.state.model),
            warnings: self.warnings(),
            mobile_view: self.state.mobile_view,
            back_link: back_link.map(str::to_string),
        };
        compose_page(&chrome, &self.composition)
    }
}

fn view(state: &PageState, viewport_width: u32) -> ViewOptions {
    ViewOptions {
        viewport_width,
        mobile_view: state.mobile_view,
    }
}
