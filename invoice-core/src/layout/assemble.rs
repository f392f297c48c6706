use std::io::Write;
use std::path::{Path, PathBuf};

use pdf_draw::{Color, ImageData, PdfDocument, TextAlign, TextStyle};
use tracing::info;

use crate::assets::BrandAssets;
use crate::config::{AppConfig, Branding};
use crate::error::Result;
use crate::model::{Invoice, InvoiceHeader};

use super::canvas::Canvas;
use super::flow::{paginate, Pagination};
use super::geometry::{STAMP_BASELINE, STAMP_FONT_SIZE, STAMP_RIGHT};
use super::header::{HeaderFooter, PageImage};
use super::measure::DescriptionWrapper;
use super::rows::{build_blocks, draw_block, DrawableBlock};
use super::totals::{draw_running_subtotal, draw_totals, FOOTER_OFFSET};

/// Blocks and their page plan, computed without drawing anything.
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceLayout {
    pub blocks: Vec<DrawableBlock>,
    pub pagination: Pagination,
}

impl InvoiceLayout {
    pub fn plan(invoice: &Invoice) -> Self {
        let blocks = build_blocks(
            &invoice.items,
            &invoice.old_due,
            &DescriptionWrapper::for_table(),
        );
        let pagination = paginate(&blocks);
        InvoiceLayout { blocks, pagination }
    }
}

/// A finished PDF and the name it should be saved under.
#[derive(Debug, Clone)]
pub struct RenderedInvoice {
    pub file_name: String,
    pub bytes: Vec<u8>,
    pub layout: InvoiceLayout,
}

impl RenderedInvoice {
    pub fn page_count(&self) -> usize {
        self.layout.pagination.page_count()
    }

    /// Write the PDF into `dir` under its file name.
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        std::fs::create_dir_all(dir)?;
        let path = dir.join(&self.file_name);
        std::fs::write(&path, &self.bytes)?;
        info!("wrote {} ({} bytes)", path.display(), self.bytes.len());
        Ok(path)
    }
}

/// `"<number> <customer>, <first address line>.pdf"`.
///
/// Customer and address keep only ASCII letters, digits and whitespace.
/// Path separators in the invoice number become `-`.
pub fn output_file_name(header: &InvoiceHeader) -> String {
    fn clean(s: &str) -> String {
        s.chars()
            .filter(|c| c.is_ascii_alphanumeric() || c.is_whitespace())
            .collect::<String>()
            .trim()
            .to_string()
    }
    let number = header.invoice_number.trim().replace(['/', '\\'], "-");
    format!(
        "{} {}, {}.pdf",
        number,
        clean(&header.customer_name),
        clean(header.first_address_line())
    )
}

/// Load the branding images, then render.
pub async fn generate_pdf(invoice: &Invoice, config: &AppConfig) -> Result<RenderedInvoice> {
    let assets = BrandAssets::load(&config.assets).await;
    render_invoice(invoice, &config.branding, &assets, config.compress)
}

/// Lay out and draw the invoice.
///
/// Refuses invalid invoices before drawing. Totals are recomputed from
/// the items, never taken from the stored values.
pub fn render_invoice(
    invoice: &Invoice,
    branding: &Branding,
    assets: &BrandAssets,
    compress: bool,
) -> Result<RenderedInvoice> {
    invoice.validate()?;
    let mut invoice = invoice.clone();
    invoice.refresh_totals();

    let layout = InvoiceLayout::plan(&invoice);

    let mut doc = PdfDocument::new(Vec::new());
    doc.set_compression(compress);
    doc.set_info("Title", &format!("Invoice {}", invoice.header.invoice_number));
    doc.set_info("Creator", "billbook");
    let mut canvas = Canvas::new(doc);

    let logo = assets.logo.clone().map(|img| register(&mut canvas, img));
    let signature = assets.signature.clone().map(|img| register(&mut canvas, img));
    let chrome = HeaderFooter {
        branding,
        invoice: &invoice,
        logo,
        signature,
    };

    draw_pages(&mut canvas, &chrome, &layout, &invoice, branding)?;
    stamp_page_numbers(&mut canvas)?;
    let bytes = canvas.finish()?;

    info!(
        "rendered invoice {} ({} pages, total {})",
        invoice.header.invoice_number,
        layout.pagination.page_count(),
        invoice.totals.total
    );
    Ok(RenderedInvoice {
        file_name: output_file_name(&invoice.header),
        bytes,
        layout,
    })
}

fn register<W: Write>(canvas: &mut Canvas<W>, image: ImageData) -> PageImage {
    let aspect_ratio = image.aspect_ratio();
    PageImage {
        id: canvas.add_image(image),
        aspect_ratio,
    }
}

fn draw_pages<W: Write>(
    canvas: &mut Canvas<W>,
    chrome: &HeaderFooter<'_>,
    layout: &InvoiceLayout,
    invoice: &Invoice,
    branding: &Branding,
) -> Result<()> {
    let pagination = &layout.pagination;
    let last = pagination.page_count() - 1;
    for (index, page) in pagination.pages.iter().enumerate() {
        canvas.begin_page();
        chrome.draw_page_header(canvas);
        let totals_only = index == last && pagination.has_totals_only_page();
        if !totals_only {
            chrome.draw_table_header(canvas);
        }

        for placement in &page.placements {
            draw_block(canvas, &layout.blocks[placement.block], placement.top);
        }
        if let Some(top) = page.running_subtotal_top {
            draw_running_subtotal(canvas, top, page.subtotal);
        }
        if index == pagination.totals.page {
            let top = pagination.totals.top;
            draw_totals(canvas, &invoice.totals, top, &branding.thank_you);
            chrome.draw_footer(canvas, top + FOOTER_OFFSET);
        }
        canvas.end_page()?;
    }
    Ok(())
}

/// Second pass: the page count is only known once every page exists.
fn stamp_page_numbers<W: Write>(canvas: &mut Canvas<W>) -> Result<()> {
    let total = canvas.page_count();
    let style = TextStyle::regular(STAMP_FONT_SIZE);
    for page in 1..=total {
        canvas.open_page(page)?;
        canvas.text(
            &format!("Page {} of {}", page, total),
            STAMP_RIGHT,
            STAMP_BASELINE,
            &style,
            TextAlign::Right,
            Color::gray(0.3),
        );
        canvas.end_page()?;
    }
    Ok(())
}
