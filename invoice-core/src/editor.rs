//! Form state for entering an invoice.
//!
//! Fields are kept as the strings the user typed. Numbers are parsed
//! leniently: anything that is not a number counts as zero.

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::model::{
    format_editor_amount, Invoice, InvoiceHeader, InvoiceTotals, LineItem, OldDue,
};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a decimal, treating blank or malformed input as zero.
pub fn parse_amount(input: &str) -> f64 {
    input
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Parse a quantity; fractions are truncated and negatives become zero.
pub fn parse_quantity(input: &str) -> u32 {
    let value = parse_amount(input).trunc();
    if value <= 0.0 {
        0
    } else if value >= u32::MAX as f64 {
        u32::MAX
    } else {
        value as u32
    }
}

fn parse_date(input: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(input.trim(), DATE_FORMAT).ok()
}

/// One editable item row.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ItemForm {
    pub description: String,
    pub size: String,
    pub quantity: String,
    pub unit_price: String,
}

impl ItemForm {
    /// Uses the same whole-number quantity the saved item gets.
    pub fn amount(&self) -> f64 {
        parse_quantity(&self.quantity) as f64 * parse_amount(&self.unit_price)
    }

    /// Rows without a description, quantity or price are left out of the
    /// invoice.
    fn is_complete(&self) -> bool {
        !self.description.is_empty()
            && !self.quantity.trim().is_empty()
            && !self.unit_price.trim().is_empty()
    }

    fn to_line_item(&self) -> LineItem {
        LineItem {
            description: self.description.clone(),
            size: self.size.clone(),
            quantity: parse_quantity(&self.quantity),
            unit_price: parse_amount(&self.unit_price),
        }
    }

    fn from_line_item(item: &LineItem) -> Self {
        ItemForm {
            description: item.description.clone(),
            size: item.size.clone(),
            quantity: item.quantity.to_string(),
            unit_price: item.unit_price.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct OldDueForm {
    pub enabled: bool,
    pub bill_number: String,
    pub bill_date: String,
    pub amount: String,
}

/// Everything the invoice form holds.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceEditorState {
    pub invoice_number: String,
    /// `YYYY-MM-DD`.
    pub invoice_date: String,
    pub customer_name: String,
    pub customer_address: String,
    pub items: Vec<ItemForm>,
    pub old_due: OldDueForm,
    pub advance: String,
}

impl InvoiceEditorState {
    /// A blank form dated `today` with one empty item row.
    pub fn new(today: NaiveDate) -> Self {
        InvoiceEditorState {
            invoice_number: String::new(),
            invoice_date: today.format(DATE_FORMAT).to_string(),
            customer_name: String::new(),
            customer_address: String::new(),
            items: vec![ItemForm::default()],
            old_due: OldDueForm::default(),
            advance: String::new(),
        }
    }

    /// Append an empty row and return its index.
    pub fn add_item(&mut self) -> usize {
        self.items.push(ItemForm::default());
        self.items.len() - 1
    }

    /// Remove a row; later rows move up and are renumbered.
    pub fn remove_item(&mut self, index: usize) -> bool {
        if index < self.items.len() {
            self.items.remove(index);
            true
        } else {
            false
        }
    }

    /// Serial number shown for the row at `index`.
    pub fn serial_number(index: usize) -> usize {
        index + 1
    }

    /// Disabling the old due clears its fields.
    pub fn set_old_due_enabled(&mut self, enabled: bool) {
        if enabled {
            self.old_due.enabled = true;
        } else {
            self.old_due = OldDueForm::default();
        }
    }

    pub fn item_amount_display(&self, index: usize) -> Option<String> {
        self.items
            .get(index)
            .map(|item| format_editor_amount(item.amount()))
    }

    fn old_due(&self) -> OldDue {
        let number = self.old_due.bill_number.trim();
        OldDue {
            has_old_due: self.old_due.enabled,
            bill_number: (!number.is_empty()).then(|| number.to_string()),
            bill_date: parse_date(&self.old_due.bill_date),
            amount: parse_amount(&self.old_due.amount),
        }
    }

    /// Live totals over every row on the form.
    pub fn totals(&self) -> InvoiceTotals {
        let items_sum: f64 = self.items.iter().map(ItemForm::amount).sum();
        let subtotal = items_sum + self.old_due().carried_amount().unwrap_or(0.0);
        let advance = parse_amount(&self.advance);
        InvoiceTotals {
            subtotal,
            advance,
            total: subtotal - advance,
        }
    }

    pub fn subtotal_display(&self) -> String {
        format_editor_amount(self.totals().subtotal)
    }

    pub fn total_display(&self) -> String {
        format_editor_amount(self.totals().total)
    }

    /// Build the invoice from the complete rows, refusing it when required
    /// fields are missing.
    pub fn to_invoice(&self) -> Result<Invoice> {
        let invoice_date = parse_date(&self.invoice_date).ok_or_else(|| {
            Error::Validation(format!("invalid invoice date {:?}", self.invoice_date))
        })?;
        let header = InvoiceHeader {
            invoice_number: self.invoice_number.trim().to_string(),
            invoice_date,
            customer_name: self.customer_name.trim().to_string(),
            customer_address: self.customer_address.clone(),
        };
        let items = self
            .items
            .iter()
            .filter(|item| item.is_complete())
            .map(ItemForm::to_line_item)
            .collect();
        let invoice = Invoice::new(header, items, self.old_due(), parse_amount(&self.advance));
        invoice.validate()?;
        Ok(invoice)
    }

    /// Replace the whole form with a saved invoice.
    pub fn populate(&mut self, invoice: &Invoice) {
        let header = &invoice.header;
        self.invoice_number = header.invoice_number.clone();
        self.invoice_date = header.invoice_date.format(DATE_FORMAT).to_string();
        self.customer_name = header.customer_name.clone();
        self.customer_address = header.customer_address.clone();
        self.items = invoice.items.iter().map(ItemForm::from_line_item).collect();
        self.advance = invoice.totals.advance.to_string();
        let due = &invoice.old_due;
        self.old_due = if due.has_old_due {
            OldDueForm {
                enabled: true,
                bill_number: due.bill_number.clone().unwrap_or_default(),
                bill_date: due
                    .bill_date
                    .map(|d| d.format(DATE_FORMAT).to_string())
                    .unwrap_or_default(),
                amount: due.amount.to_string(),
            }
        } else {
            OldDueForm::default()
        };
    }

    /// Reset to a blank form dated `today`.
    pub fn clear(&mut self, today: NaiveDate) {
        *self = Self::new(today);
    }
}
