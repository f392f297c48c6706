use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Who is billed, for which invoice, and when.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceHeader {
    /// Required; also the key under which the invoice is stored.
    pub invoice_number: String,
    pub invoice_date: NaiveDate,
    pub customer_name: String,
    /// Free text, one address line per `\n`.
    #[serde(default)]
    pub customer_address: String,
}

impl InvoiceHeader {
    pub fn address_lines(&self) -> impl Iterator<Item = &str> {
        self.customer_address.split('\n')
    }

    pub fn first_address_line(&self) -> &str {
        self.address_lines().next().unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    /// May contain explicit `\n` line breaks. Items with identical
    /// descriptions are drawn as one grouped block.
    pub description: String,
    #[serde(default)]
    pub size: String,
    pub quantity: u32,
    pub unit_price: f64,
}

impl LineItem {
    pub fn new(description: &str, size: &str, quantity: u32, unit_price: f64) -> Self {
        LineItem {
            description: description.to_string(),
            size: size.to_string(),
            quantity,
            unit_price,
        }
    }

    /// Always derived from quantity and price; never stored.
    pub fn amount(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}

/// Optional balance carried over from an earlier bill.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OldDue {
    pub has_old_due: bool,
    pub bill_number: Option<String>,
    pub bill_date: Option<NaiveDate>,
    pub amount: f64,
}

impl OldDue {
    /// The amount that enters the subtotal, if any.
    pub fn carried_amount(&self) -> Option<f64> {
        (self.has_old_due && self.amount > 0.0).then_some(self.amount)
    }

    /// Description cell text for the old-due row.
    pub fn label(&self) -> String {
        let number = self.bill_number.as_deref().filter(|n| !n.trim().is_empty());
        match (number, self.bill_date) {
            (Some(n), Some(d)) => format!("Bill No.: {} dated: {}", n, format_date(d)),
            (Some(n), None) => format!("Bill No.: {}", n),
            (None, Some(d)) => format!("Dated: {}", format_date(d)),
            (None, None) => "Previous Due".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InvoiceTotals {
    /// Item amounts plus the carried old due.
    pub subtotal: f64,
    pub advance: f64,
    /// `subtotal - advance`, not clamped at zero.
    pub total: f64,
}

impl InvoiceTotals {
    pub fn compute(items: &[LineItem], old_due: &OldDue, advance: f64) -> Self {
        let items_sum: f64 = items.iter().map(LineItem::amount).sum();
        let subtotal = items_sum + old_due.carried_amount().unwrap_or(0.0);
        InvoiceTotals {
            subtotal,
            advance,
            total: subtotal - advance,
        }
    }
}

/// The persisted aggregate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    #[serde(flatten)]
    pub header: InvoiceHeader,
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub old_due: OldDue,
    #[serde(default)]
    pub totals: InvoiceTotals,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_at: Option<DateTime<Utc>>,
}

impl Invoice {
    pub fn new(header: InvoiceHeader, items: Vec<LineItem>, old_due: OldDue, advance: f64) -> Self {
        let totals = InvoiceTotals::compute(&items, &old_due, advance);
        Invoice {
            header,
            items,
            old_due,
            totals,
            saved_at: None,
        }
    }

    /// Recompute subtotal and total from the items, keeping the advance.
    pub fn refresh_totals(&mut self) {
        self.totals = InvoiceTotals::compute(&self.items, &self.old_due, self.totals.advance);
    }

    /// Parse an invoice and recompute its totals so stale numbers in the
    /// document never reach the layout.
    pub fn from_json(json: &str) -> Result<Self> {
        let mut invoice: Invoice = serde_json::from_str(json)?;
        invoice.refresh_totals();
        Ok(invoice)
    }

    pub fn to_json_pretty(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Refuse an invoice without a number, a customer, or any item. All
    /// problems are reported in one error.
    pub fn validate(&self) -> Result<()> {
        let mut missing = Vec::new();
        if self.header.invoice_number.trim().is_empty() {
            missing.push("invoice number");
        }
        if self.header.customer_name.trim().is_empty() {
            missing.push("customer name");
        }
        if self.items.is_empty() {
            missing.push("at least one item");
        }
        if missing.is_empty() {
            Ok(())
        } else {
            Err(Error::Validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )))
        }
    }
}

/// `DD/MM/YYYY`, the one date format used on the invoice.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// Whole-number amount as printed in the PDF, rounded half away from zero.
pub fn format_pdf_amount(value: f64) -> String {
    format!("{}", value.round() as i64)
}

/// Two-decimal amount as shown while editing.
pub fn format_editor_amount(value: f64) -> String {
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn old_due_only_counts_when_enabled_and_positive() {
        let mut due = OldDue {
            has_old_due: false,
            amount: 200.0,
            ..OldDue::default()
        };
        assert_eq!(due.carried_amount(), None);
        due.has_old_due = true;
        assert_eq!(due.carried_amount(), Some(200.0));
        due.amount = 0.0;
        assert_eq!(due.carried_amount(), None);
    }

    #[test]
    fn old_due_labels() {
        let mut due = OldDue::default();
        assert_eq!(due.label(), "Previous Due");
        due.bill_date = Some(date(2024, 3, 5));
        assert_eq!(due.label(), "Dated: 05/03/2024");
        due.bill_number = Some("B-17".into());
        assert_eq!(due.label(), "Bill No.: B-17 dated: 05/03/2024");
        due.bill_date = None;
        assert_eq!(due.label(), "Bill No.: B-17");
    }

    #[test]
    fn pdf_amount_rounds_half_away_from_zero() {
        assert_eq!(format_pdf_amount(100.0), "100");
        assert_eq!(format_pdf_amount(2.5), "3");
        assert_eq!(format_pdf_amount(-2.5), "-3");
        assert_eq!(format_pdf_amount(99.49), "99");
    }

    #[test]
    fn editor_amount_has_two_decimals() {
        assert_eq!(format_editor_amount(12.5), "12.50");
    }

    #[test]
    fn total_may_go_negative() {
        let items = vec![LineItem::new("Nails", "", 1, 10.0)];
        let totals = InvoiceTotals::compute(&items, &OldDue::default(), 25.0);
        assert_eq!(totals.subtotal, 10.0);
        assert_eq!(totals.total, -15.0);
    }
}
