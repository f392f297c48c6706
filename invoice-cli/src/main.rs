//! billbook - render and keep invoices from the command line.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use invoice_core::model::{format_date, format_editor_amount};
use invoice_core::{generate_pdf, AppConfig, Invoice, InvoiceStore};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[derive(Parser, Debug)]
#[command(name = "billbook")]
#[command(author, version, about = "Render and store invoices as PDF", long_about = None)]
struct Args {
    /// Config file path (default: ./billbook.toml if present)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Invoice store file, overriding the config
    #[arg(long, global = true)]
    store: Option<PathBuf>,

    /// Write uncompressed page content
    #[arg(long, global = true)]
    no_compress: bool,

    /// Verbose output
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render an invoice JSON file to PDF
    Render {
        input: PathBuf,
        /// Output directory (default: from config)
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },
    /// Validate an invoice JSON file and save it to the store
    Save { input: PathBuf },
    /// List saved invoices
    List,
    /// Print a saved invoice as JSON
    Show { number: String },
    /// Delete a saved invoice
    Delete { number: String },
    /// Render a saved invoice to PDF
    RenderSaved {
        number: String,
        #[arg(short, long)]
        out_dir: Option<PathBuf>,
    },
}

fn read_invoice(path: &Path) -> Result<Invoice> {
    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Invoice::from_json(&json).with_context(|| format!("Invalid invoice in {}", path.display()))
}

fn open_store(config: &AppConfig) -> Result<InvoiceStore> {
    InvoiceStore::open(&config.store_path)
        .with_context(|| format!("Failed to open store {}", config.store_path.display()))
}

async fn render(invoice: &Invoice, config: &AppConfig, out_dir: Option<PathBuf>) -> Result<()> {
    let rendered = generate_pdf(invoice, config)
        .await
        .context("Failed to render invoice")?;
    let dir = out_dir.unwrap_or_else(|| config.output_dir.clone());
    let path = rendered
        .write_to(&dir)
        .with_context(|| format!("Failed to write PDF to {}", dir.display()))?;
    println!("{} ({} pages)", path.display(), rendered.page_count());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let log_level = match args.verbose {
        0 => Level::WARN,
        1 => Level::INFO,
        2 => Level::DEBUG,
        _ => Level::TRACE,
    };

    FmtSubscriber::builder()
        .with_max_level(log_level)
        .with_target(false)
        .init();

    let mut config = if let Some(config_path) = &args.config {
        AppConfig::from_file(config_path).context("Failed to load config file")?
    } else {
        AppConfig::load()
    };

    if let Some(store) = args.store {
        config.store_path = store;
    }
    if args.no_compress {
        config.compress = false;
    }

    match args.command {
        Command::Render { input, out_dir } => {
            let invoice = read_invoice(&input)?;
            render(&invoice, &config, out_dir).await?;
        }
        Command::Save { input } => {
            let invoice = read_invoice(&input)?;
            let mut store = open_store(&config)?;
            let saved = store.save(invoice).context("Failed to save invoice")?;
            println!(
                "saved {} (total {})",
                saved.header.invoice_number,
                format_editor_amount(saved.totals.total)
            );
        }
        Command::List => {
            let store = open_store(&config)?;
            if store.is_empty() {
                info!("No invoices in {}", store.path().display());
            }
            for summary in store.list() {
                let saved = summary
                    .saved_at
                    .map(|t| format_date(t.date_naive()))
                    .unwrap_or_default();
                println!(
                    "{}\t{}\t{}\t{}",
                    summary.invoice_number,
                    summary.customer_name,
                    format_editor_amount(summary.total),
                    saved
                );
            }
        }
        Command::Show { number } => {
            let store = open_store(&config)?;
            let invoice = store
                .get(&number)
                .with_context(|| format!("No saved invoice {}", number))?;
            println!("{}", invoice.to_json_pretty()?);
        }
        Command::Delete { number } => {
            let mut store = open_store(&config)?;
            if !store.delete(&number).context("Failed to delete invoice")? {
                anyhow::bail!("No saved invoice {}", number);
            }
            println!("deleted {}", number);
        }
        Command::RenderSaved { number, out_dir } => {
            let store = open_store(&config)?;
            let invoice = store
                .get(&number)
                .with_context(|| format!("No saved invoice {}", number))?;
            render(invoice, &config, out_dir).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn global_options_follow_subcommand() {
        let args =
            Args::try_parse_from(["billbook", "render", "inv.json", "-vv", "--store", "s.json"])
                .unwrap();
        assert_eq!(args.verbose, 2);
        assert_eq!(args.store, Some(PathBuf::from("s.json")));
        match args.command {
            Command::Render { input, out_dir } => {
                assert_eq!(input, PathBuf::from("inv.json"));
                assert!(out_dir.is_none());
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn render_saved_takes_number() {
        let args =
            Args::try_parse_from(["billbook", "render-saved", "INV-7", "--out-dir", "out"]).unwrap();
        assert!(matches!(
            args.command,
            Command::RenderSaved { ref number, out_dir: Some(_) } if number == "INV-7"
        ));
    }
}
