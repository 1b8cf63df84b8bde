//! Command line front end.

use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use log::{info, warn};
use serde_json::{Map, Value};
use std::fs;
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::content::logo_data_url;
use crate::model::Variant;
use crate::session::protocol::handle_line;
use crate::tools::registry::INDEX_FILENAME;
use crate::tools::{RenderRequest, ToolRegistry};

#[derive(Debug, Parser)]
#[command(
    name = "generator-surat",
    about = "Print-ready Indonesian letters and documents as standalone HTML pages",
    version
)]
pub struct Cli {
    /// Output directory (overrides SURAT_OUTPUT_DIR).
    #[arg(long, global = true, value_name = "DIR")]
    pub out: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List the available document tools.
    List,

    /// Render one document from its sample data plus overrides.
    Render(RenderArgs),

    /// Render the sample of every tool and the catalog index.
    Catalog,

    /// Edit one document over JSON-RPC lines on stdin.
    Session(SessionArgs),

    /// Print the JSON Schema of a tool's arguments.
    Schema {
        tool: String,
    },
}

#[derive(Debug, clap::Args)]
pub struct RenderArgs {
    pub tool: String,

    /// Template number (1 or 2).
    #[arg(short, long)]
    pub variant: Option<u8>,

    /// Field override, repeatable.
    #[arg(long = "set", value_name = "FIELD=VALUE", value_parser = parse_key_value)]
    pub set: Vec<(String, Value)>,

    /// JSON file with field overrides (lists included).
    #[arg(long, value_name = "FILE")]
    pub fields: Option<PathBuf>,

    /// Logo image for the letterhead.
    #[arg(long, value_name = "FILE")]
    pub logo: Option<PathBuf>,
}

#[derive(Debug, clap::Args)]
pub struct SessionArgs {
    pub tool: String,

    /// Logo image loaded before the first request.
    #[arg(long, value_name = "FILE")]
    pub logo: Option<PathBuf>,
}

/// `nama=Budi Santoso` → (`nama`, `"Budi Santoso"`).
pub fn parse_key_value(raw: &str) -> Result<(String, Value), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{raw}'"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("missing field name in '{raw}'"));
    }
    Ok((key.to_string(), Value::String(value.to_string())))
}

pub fn run(cli: Cli, config: &AppConfig) -> Result<()> {
    let out_dir = cli.out.unwrap_or_else(|| config.output_dir.clone());
    let registry = ToolRegistry::from_config(config);

    match cli.command {
        Commands::List => {
            for tool in registry.tools() {
                let variants: Vec<_> = tool
                    .schema()
                    .variants()
                    .iter()
                    .map(|info| format!("{}={}", info.variant.id(), info.label))
                    .collect();
                println!("{:<28} {} [{}]", tool.id(), tool.title(), variants.join(", "));
            }
            Ok(())
        }
        Commands::Schema { tool } => {
            let tool = registry.get(&tool)?;
            println!("{}", serde_json::to_string_pretty(&tool.schema().json_schema())?);
            Ok(())
        }
        Commands::Render(args) => {
            let path = render(&registry, args, &out_dir)?;
            println!("{}", path.display());
            Ok(())
        }
        Commands::Catalog => {
            let (index, pages) = registry.render_catalog()?;
            for page in &pages {
                write_page(&out_dir, &page.filename, &page.html)?;
            }
            let path = write_page(&out_dir, INDEX_FILENAME, &index)?;
            info!("catalog with {} documents written", pages.len());
            println!("{}", path.display());
            Ok(())
        }
        Commands::Session(args) => run_session(&registry, args, &out_dir),
    }
}

fn render(registry: &ToolRegistry, args: RenderArgs, out_dir: &Path) -> Result<PathBuf> {
    let tool = registry.get(&args.tool)?;

    let mut fields = match &args.fields {
        Some(path) => read_fields(path)?,
        None => Map::new(),
    };
    fields.extend(args.set);

    if let Some(path) = &args.logo {
        let field = tool
            .schema()
            .image_field()
            .ok_or_else(|| anyhow!("{} has no letterhead logo", tool.id()))?;
        let logo = logo_data_url(path)?;
        fields.insert(field.name.to_string(), Value::String(logo.data_url));
    }

    let variant = args.variant.map(Variant::try_from).transpose()?;
    let page = registry.render(tool.id(), RenderRequest { variant, fields })?;
    for warning in page.warnings.iter() {
        warn!("{}", warning);
    }
    write_page(out_dir, &page.filename, &page.html)
}

fn read_fields(path: &Path) -> Result<Map<String, Value>> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    match serde_json::from_str::<Value>(&text)
        .with_context(|| format!("{} is not valid JSON", path.display()))?
    {
        Value::Object(map) => Ok(map),
        _ => bail!("{} must contain a JSON object of fields", path.display()),
    }
}

fn write_page(out_dir: &Path, filename: &str, html: &str) -> Result<PathBuf> {
    fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;
    let path = out_dir.join(filename);
    fs::write(&path, html).with_context(|| format!("failed to write {}", path.display()))?;
    info!("wrote {}", path.display());
    Ok(path)
}

fn run_session(registry: &ToolRegistry, args: SessionArgs, out_dir: &Path) -> Result<()> {
    let mut session = registry.open(&args.tool)?;
    if let Some(path) = &args.logo {
        session.load_logo(path)?;
    }

    let mut written = write_page(out_dir, &session.filename(), &session.page_html(None))?;
    let mut revision = session.revision();
    eprintln!("{}", written.display());

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = stdout.lock();

    for line in stdin.lock().lines() {
        let line = line.context("failed to read request")?;
        if let Some(response) = handle_line(&mut session, registry, &line) {
            writeln!(out, "{}", response)?;
            out.flush()?;
        }

        if session.revision() != revision {
            revision = session.revision();
            let path = write_page(out_dir, &session.filename(), &session.page_html(None))?;
            if path != written {
                info!("subject changed, page moved to {}", path.display());
                written = path;
            }
        }
    }

    info!("session closed at revision {}", revision);
    Ok(())
}
