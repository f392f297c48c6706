use std::io::Write;

use pdf_draw::{Color, ImageId, TextAlign, TextStyle};

use crate::config::Branding;
use crate::model::{format_date, format_pdf_amount, Invoice};

use super::canvas::Canvas;
use super::geometry::{
    brand_blue, COL_WIDTHS, COL_X, LINE_WIDTH, PAGE_WIDTH, TABLE_HEADER_HEIGHT, TABLE_HEADER_TOP,
};
use super::measure::text_width;

/// An image registered with the document, plus what is needed to size it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageImage {
    pub id: ImageId,
    pub aspect_ratio: f64,
}

const LOGO_HEIGHT: f64 = 25.0;
const LOGO_TOP: f64 = 42.0;
const COMPANY_X: f64 = 15.0;
const COMPANY_BASELINE: f64 = 38.0;

const PANEL_TOP: f64 = 70.0;
const PANEL_HEIGHT: f64 = 35.0;
const PANEL_HEADER_HEIGHT: f64 = 8.0;
const BILL_TO_X: f64 = 13.0;
const BILL_TO_WIDTH: f64 = 120.0;
const SUMMARY_X: f64 = 140.0;
const SUMMARY_WIDTH: f64 = 50.0;

const SIGNATURE_WIDTH: f64 = 36.0;
const SIGNATURE_HEIGHT: f64 = 16.0;

/// The static column captions and their text anchors.
const TABLE_CAPTIONS: [(&str, f64, f64); 7] = [
    ("SR", 15.0, 4.0),
    ("NO", 15.0, 7.0),
    ("DESCRIPTION", 60.0, 6.0),
    ("Size", 113.0, 6.0),
    ("QTY", 129.0, 6.0),
    ("PRICE", 145.0, 6.0),
    ("AMOUNT", 170.0, 6.0),
];

/// Draws what repeats on every page and the footer on the last one.
pub struct HeaderFooter<'a> {
    pub branding: &'a Branding,
    pub invoice: &'a Invoice,
    pub logo: Option<PageImage>,
    pub signature: Option<PageImage>,
}

impl HeaderFooter<'_> {
    /// Border, company block, bill-to panel and summary panel.
    pub fn draw_page_header<W: Write>(&self, canvas: &mut Canvas<W>) {
        self.draw_borders(canvas);
        self.draw_company_block(canvas);
        self.draw_bill_to(canvas);
        self.draw_summary(canvas);
    }

    fn draw_borders<W: Write>(&self, canvas: &mut Canvas<W>) {
        canvas.line_width(1.0);
        canvas.stroke_color(Color::rgb8(100, 100, 100));
        canvas.stroke_rect(10.0, 10.0, 190.0, 277.0);

        canvas.line_width(0.3);
        canvas.stroke_color(Color::rgb8(200, 200, 200));
        canvas.stroke_rect(12.0, 12.0, 186.0, 273.0);
    }

    fn draw_company_block<W: Write>(&self, canvas: &mut Canvas<W>) {
        let b = self.branding;
        canvas.text(
            &b.brand_line,
            PAGE_WIDTH / 2.0,
            22.0,
            &TextStyle::bold(14.0),
            TextAlign::Center,
            Color::BLACK,
        );

        let name_style = TextStyle::bold(16.0);
        canvas.text(
            &b.company_name,
            COMPANY_X,
            COMPANY_BASELINE,
            &name_style,
            TextAlign::Left,
            Color::BLACK,
        );

        match self.logo.filter(|l| l.aspect_ratio > 0.0) {
            Some(logo) => {
                let width = LOGO_HEIGHT * logo.aspect_ratio;
                let name_width = text_width(&b.company_name, &name_style);
                let x = COMPANY_X + name_width / 2.0 - width / 2.0;
                canvas.image(logo.id, x, LOGO_TOP, width, LOGO_HEIGHT);
            }
            None => canvas.text(
                &b.tagline,
                COMPANY_X,
                45.0,
                &TextStyle::regular(9.0),
                TextAlign::Left,
                Color::BLACK,
            ),
        }

        canvas.text(
            "INVOICE",
            155.0,
            COMPANY_BASELINE,
            &TextStyle::bold(18.0),
            TextAlign::Left,
            brand_blue(),
        );

        let address_style = TextStyle::regular(9.0);
        for (i, line) in b.address_lines.iter().enumerate() {
            canvas.text(
                line,
                190.0,
                48.0 + i as f64 * 5.0,
                &address_style,
                TextAlign::Right,
                Color::BLACK,
            );
        }
    }

    fn draw_bill_to<W: Write>(&self, canvas: &mut Canvas<W>) {
        canvas.fill_rect(BILL_TO_X, PANEL_TOP, BILL_TO_WIDTH, PANEL_HEADER_HEIGHT, brand_blue());
        canvas.line_width(LINE_WIDTH);
        canvas.stroke_color(Color::BLACK);
        canvas.stroke_rect(BILL_TO_X, PANEL_TOP, BILL_TO_WIDTH, PANEL_HEIGHT);
        canvas.text(
            "BILL TO",
            15.0,
            PANEL_TOP + 6.0,
            &TextStyle::bold(10.0),
            TextAlign::Left,
            Color::WHITE,
        );

        let center = BILL_TO_X + BILL_TO_WIDTH / 2.0;
        let header = &self.invoice.header;
        canvas.text(
            &header.customer_name,
            center,
            PANEL_TOP + 18.0,
            &TextStyle::bold(14.0),
            TextAlign::Center,
            Color::BLACK,
        );
        let address_style = TextStyle::regular(14.0);
        for (i, line) in header.address_lines().enumerate() {
            canvas.text(
                line,
                center,
                PANEL_TOP + 24.0 + i as f64 * 4.0,
                &address_style,
                TextAlign::Center,
                Color::BLACK,
            );
        }
    }

    fn draw_summary<W: Write>(&self, canvas: &mut Canvas<W>) {
        let half = SUMMARY_WIDTH / 2.0;
        canvas.line_width(LINE_WIDTH);
        canvas.stroke_color(Color::BLACK);
        canvas.stroke_rect(SUMMARY_X, PANEL_TOP, SUMMARY_WIDTH, PANEL_HEIGHT);
        canvas.fill_rect(SUMMARY_X, PANEL_TOP, SUMMARY_WIDTH, PANEL_HEADER_HEIGHT, brand_blue());
        canvas.line(SUMMARY_X + half, PANEL_TOP, SUMMARY_X + half, PANEL_TOP + 18.0);

        let caption = TextStyle::bold(11.0);
        canvas.text("INVOICE #", SUMMARY_X + 2.0, PANEL_TOP + 6.0, &caption, TextAlign::Left, Color::WHITE);
        canvas.text("DATE", SUMMARY_X + half + 2.0, PANEL_TOP + 6.0, &caption, TextAlign::Left, Color::WHITE);

        let header = &self.invoice.header;
        canvas.text(
            &header.invoice_number,
            SUMMARY_X + half / 2.0,
            PANEL_TOP + 14.0,
            &caption,
            TextAlign::Center,
            Color::BLACK,
        );
        canvas.text(
            &format_date(header.invoice_date),
            SUMMARY_X + half + half / 2.0,
            PANEL_TOP + 14.0,
            &caption,
            TextAlign::Center,
            Color::BLACK,
        );

        canvas.line(SUMMARY_X, PANEL_TOP + 18.0, SUMMARY_X + SUMMARY_WIDTH, PANEL_TOP + 18.0);
        canvas.fill_rect(SUMMARY_X, PANEL_TOP + 18.0, SUMMARY_WIDTH, PANEL_HEADER_HEIGHT, brand_blue());
        let center = SUMMARY_X + half;
        canvas.text("Total Amount To Pay", center, PANEL_TOP + 24.0, &caption, TextAlign::Center, Color::WHITE);
        canvas.text(
            &format_pdf_amount(self.invoice.totals.total),
            center,
            PANEL_TOP + 32.0,
            &TextStyle::bold(14.0),
            TextAlign::Center,
            Color::BLACK,
        );
    }

    /// Blue caption row above the items.
    pub fn draw_table_header<W: Write>(&self, canvas: &mut Canvas<W>) {
        canvas.line_width(LINE_WIDTH);
        canvas.stroke_color(Color::BLACK);
        for (x, width) in COL_X.iter().zip(COL_WIDTHS) {
            canvas.fill_rect(*x, TABLE_HEADER_TOP, width, TABLE_HEADER_HEIGHT, brand_blue());
            canvas.stroke_rect(*x, TABLE_HEADER_TOP, width, TABLE_HEADER_HEIGHT);
        }
        let style = TextStyle::bold(12.0);
        for (caption, x, dy) in TABLE_CAPTIONS {
            canvas.text(caption, x, TABLE_HEADER_TOP + dy, &style, TextAlign::Left, Color::WHITE);
        }
    }

    /// Separator, signature, "Authorized" and contact lines. `top` is the
    /// separator position.
    pub fn draw_footer<W: Write>(&self, canvas: &mut Canvas<W>, top: f64) {
        canvas.line_width(LINE_WIDTH);
        canvas.stroke_color(Color::rgb8(150, 150, 150));
        canvas.line(20.0, top, 190.0, top);

        if let Some(signature) = self.signature.filter(|s| s.aspect_ratio > 0.0) {
            // keep the aspect ratio inside the signature box
            let width = (SIGNATURE_HEIGHT * signature.aspect_ratio).min(SIGNATURE_WIDTH);
            let height = width / signature.aspect_ratio;
            canvas.image(signature.id, 20.0, top + 2.0 + SIGNATURE_HEIGHT - height, width, height);
        }

        canvas.text(
            "Authorized",
            20.0,
            top + 22.0,
            &TextStyle::bold(10.0),
            TextAlign::Left,
            Color::BLACK,
        );
        let contact = TextStyle::regular(9.0);
        canvas.text(
            &self.branding.contact_prompt,
            20.0,
            top + 29.0,
            &contact,
            TextAlign::Left,
            Color::rgb8(80, 80, 80),
        );
        canvas.text(
            &self.branding.contact_line,
            20.0,
            top + 34.0,
            &contact,
            TextAlign::Left,
            brand_blue(),
        );
    }
}
