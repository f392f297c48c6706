use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::model::Invoice;

/// On-disk shape: one fixed `"invoices"` key mapping invoice numbers to
/// invoices. A missing key reads as an empty map.
#[derive(Debug, Default, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    invoices: BTreeMap<String, Invoice>,
}

/// One line of the saved-invoice list.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceSummary {
    pub invoice_number: String,
    pub customer_name: String,
    pub total: f64,
    pub saved_at: Option<DateTime<Utc>>,
}

/// Saved invoices keyed by invoice number. Saving an existing number
/// overwrites it; every change rewrites the whole file.
pub struct InvoiceStore {
    path: PathBuf,
    invoices: BTreeMap<String, Invoice>,
}

impl InvoiceStore {
    /// Read the store at `path`; a missing file is an empty store.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let invoices = match std::fs::read_to_string(&path) {
            Ok(content) if content.trim().is_empty() => BTreeMap::new(),
            Ok(content) => {
                let doc: StoreDocument = serde_json::from_str(&content).map_err(|e| {
                    Error::Store(format!("Failed to parse {}: {}", path.display(), e))
                })?;
                doc.invoices
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No invoice store at {}, starting empty", path.display());
                BTreeMap::new()
            }
            Err(e) => return Err(e.into()),
        };
        debug!("Opened invoice store at {} ({} invoices)", path.display(), invoices.len());
        Ok(Self { path, invoices })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> usize {
        self.invoices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.invoices.is_empty()
    }

    pub fn get(&self, invoice_number: &str) -> Option<&Invoice> {
        self.invoices.get(invoice_number)
    }

    /// Summaries ordered by invoice number.
    pub fn list(&self) -> Vec<InvoiceSummary> {
        self.invoices
            .iter()
            .map(|(number, invoice)| InvoiceSummary {
                invoice_number: number.clone(),
                customer_name: invoice.header.customer_name.clone(),
                total: invoice.totals.total,
                saved_at: invoice.saved_at,
            })
            .collect()
    }

    /// Validate, stamp and store the invoice under its number, replacing
    /// any earlier version.
    pub fn save(&mut self, mut invoice: Invoice) -> Result<&Invoice> {
        invoice.validate()?;
        invoice.refresh_totals();
        invoice.saved_at = Some(Utc::now());
        let key = invoice.header.invoice_number.clone();
        let mut invoices = self.invoices.clone();
        let replaced = invoices.insert(key.clone(), invoice).is_some();
        self.write(&invoices)?;
        self.invoices = invoices;
        info!(
            "{} invoice {}",
            if replaced { "Overwrote" } else { "Saved" },
            key
        );
        self.invoices
            .get(&key)
            .ok_or_else(|| Error::Store(format!("invoice {} vanished after save", key)))
    }

    /// Remove an invoice. Returns whether it existed.
    pub fn delete(&mut self, invoice_number: &str) -> Result<bool> {
        if !self.invoices.contains_key(invoice_number) {
            return Ok(false);
        }
        let mut invoices = self.invoices.clone();
        invoices.remove(invoice_number);
        self.write(&invoices)?;
        self.invoices = invoices;
        info!("Deleted invoice {}", invoice_number);
        Ok(true)
    }

    /// Write `invoices` to a temporary file, then rename it over the
    /// store so a crash never leaves a half-written file. The in-memory
    /// map is only replaced once this succeeds.
    fn write(&self, invoices: &BTreeMap<String, Invoice>) -> Result<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let doc = StoreDocumentRef { invoices };
        let json = serde_json::to_string_pretty(&doc)?;
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, json)?;
        std::fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

#[derive(Serialize)]
struct StoreDocumentRef<'a> {
    invoices: &'a BTreeMap<String, Invoice>,
}
