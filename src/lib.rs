//! Catalog of Indonesian letter and document generators.
//!
//! Every tool keeps a typed document model, derives computed values from it
//! (dates, rupiah amounts, mortgage and severance figures) and renders an A4
//! page with two surfaces: a scaled on-screen preview and a print-only copy
//! for the browser's print-to-PDF.

pub mod calc;
pub mod cli;
pub mod config;
pub mod content;
pub mod model;
pub mod render;
pub mod session;
pub mod tools;

use clap::Parser;
use env_logger::Env;

pub use crate::config::AppConfig;
pub use crate::session::{Session, SessionError};
pub use crate::tools::{catalog, Tool, ToolRegistry};

pub fn run() -> anyhow::Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let config = AppConfig::from_env();
    let cli = cli::Cli::parse();
    cli::run(cli, &config)
}
