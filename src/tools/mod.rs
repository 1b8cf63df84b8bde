//! Document tools.
//!
//! Every tool is one configuration of the same templated document: a field
//! schema, a derive step that turns the model into computed values, and a
//! render step per template variant. A [`Template`] supplies those pieces;
//! [`TemplatedDocument`] turns it into an object-safe [`Tool`] the registry
//! and the session work with.
//!
//! - `SuratKeteranganKerja` - employment certificate
//! - `PerjanjianSewa` - rental agreement (multi-page)
//! - `SuratGaransi` - warranty letter with product list
//! - `Invoice` - invoice and receipt
//! - `SimulasiKpr` - mortgage simulation
//! - `Pesangon` - severance calculation (multi-page)
//! - `SuratBelumMemilikiRumah` - statement of not owning a house

pub mod common;
pub mod invoice;
pub mod perjanjian_sewa;
pub mod pesangon;
pub mod registry;
pub mod simulasi_kpr;
pub mod surat_belum_memiliki_rumah;
pub mod surat_garansi;
pub mod surat_keterangan_kerja;

use std::marker::PhantomData;

use crate::model::validation::ValidationErrors;
use crate::model::{DocumentModel, DocumentSchema, Variant};
use crate::render::Document;

pub use registry::{RegistryError, RenderRequest, RenderedPage, ToolDescriptor, ToolRegistry};

/// The pieces that make up one kind of document.
pub trait Template {
    const ID: &'static str;
    const TITLE: &'static str;
    const DESCRIPTION: &'static str;
    /// Field whose value names the output file.
    const SUBJECT_FIELD: &'static str = "nama";

    /// Values computed from the model before rendering.
    type Derived;

    fn schema() -> DocumentSchema;

    fn derive(model: &DocumentModel) -> Self::Derived;

    fn render(model: &DocumentModel, derived: &Self::Derived, variant: Variant) -> Document;

    /// Advisory checks; never blocks rendering.
    fn validate(_model: &DocumentModel) -> ValidationErrors {
        ValidationErrors::new()
    }
}

/// A document tool as seen by the registry and the session.
pub trait Tool {
    fn id(&self) -> &'static str;
    fn title(&self) -> &'static str;
    fn description(&self) -> &'static str;
    fn schema(&self) -> &DocumentSchema;
    /// Text naming the output file, usually the person the letter is about.
    fn subject<'m>(&self, model: &'m DocumentModel) -> &'m str;
    /// Derive and render in one pass.
    fn build(&self, model: &DocumentModel, variant: Variant) -> Document;
    fn validate(&self, model: &DocumentModel) -> ValidationErrors;
}

/// A [`Template`] with its schema built once.
pub struct TemplatedDocument<T: Template> {
    schema: DocumentSchema,
    template: PhantomData<T>,
}

impl<T: Template> TemplatedDocument<T> {
    pub fn new() -> Self {
        Self {
            schema: T::schema(),
            template: PhantomData,
        }
    }
}

impl<T: Template> Default for TemplatedDocument<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Template> Tool for TemplatedDocument<T> {
    fn id(&self) -> &'static str {
        T::ID
    }

    fn title(&self) -> &'static str {
        T::TITLE
    }

    fn description(&self) -> &'static str {
        T::DESCRIPTION
    }

    fn schema(&self) -> &DocumentSchema {
        &self.schema
    }

    fn subject<'m>(&self, model: &'m DocumentModel) -> &'m str {
        model.text(T::SUBJECT_FIELD)
    }

    fn build(&self, model: &DocumentModel, variant: Variant) -> Document {
        let variant = if self.schema.supports(variant) {
            variant
        } else {
            Variant::First
        };
        let derived = T::derive(model);
        T::render(model, &derived, variant)
    }

    fn validate(&self, model: &DocumentModel) -> ValidationErrors {
        T::validate(model)
    }
}

/// Every tool in catalog order.
pub fn catalog() -> Vec<Box<dyn Tool>> {
    vec![
        Box::new(TemplatedDocument::<surat_keterangan_kerja::SuratKeteranganKerja>::new()),
        Box::new(TemplatedDocument::<perjanjian_sewa::PerjanjianSewa>::new()),
        Box::new(TemplatedDocument::<surat_garansi::SuratGaransi>::new()),
        Box::new(TemplatedDocument::<invoice::Invoice>::new()),
        Box::new(TemplatedDocument::<simulasi_kpr::SimulasiKpr>::new()),
        Box::new(TemplatedDocument::<pesangon::Pesangon>::new()),
        Box::new(TemplatedDocument::<surat_belum_memiliki_rumah::SuratBelumMemilikiRumah>::new()),
    ]
}
