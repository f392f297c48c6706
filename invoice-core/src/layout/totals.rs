use std::io::Write;

use pdf_draw::{Color, TextAlign, TextStyle};

use crate::model::{format_pdf_amount, InvoiceTotals};

use super::canvas::Canvas;
use super::geometry::{
    band_gray, brand_blue, column_right, COL_AMOUNT, COL_PRICE, COL_WIDTHS, COL_X, LINE_WIDTH,
    PAGE_WIDTH, SUBTOTAL_ROW_HEIGHT, TABLE_LEFT, TOTALS_LABEL_WIDTH, TOTALS_ROW_HEIGHTS,
    TOTALS_WIDTH, TOTALS_X,
};

/// Thank-you baseline below the totals top.
pub const THANK_YOU_OFFSET: f64 = 44.0;
/// Footer separator below the totals top.
pub const FOOTER_OFFSET: f64 = 50.0;

const CELL_MARGIN: f64 = 3.0;

struct TotalsRow {
    label: &'static str,
    label_size: f64,
    value: f64,
    value_size: f64,
    baseline: f64,
}

/// Draw the Subtotal/Advance/Total box with its top edge at `top`,
/// followed by the centred thank-you line.
pub fn draw_totals<W: Write>(
    canvas: &mut Canvas<W>,
    totals: &InvoiceTotals,
    top: f64,
    thank_you: &str,
) {
    let rows = [
        TotalsRow {
            label: "SUBTOTAL",
            label_size: 11.0,
            value: totals.subtotal,
            value_size: 11.0,
            baseline: 8.0,
        },
        TotalsRow {
            label: "Advance",
            label_size: 12.0,
            value: totals.advance,
            value_size: 12.0,
            baseline: 8.0,
        },
        TotalsRow {
            label: "TOTAL",
            label_size: 13.0,
            value: totals.total,
            value_size: 14.0,
            baseline: 9.0,
        },
    ];

    let value_x = TOTALS_X + TOTALS_LABEL_WIDTH;
    let mut y = top;
    for (row, height) in rows.iter().zip(TOTALS_ROW_HEIGHTS) {
        canvas.fill_rect(TOTALS_X, y, TOTALS_LABEL_WIDTH, height, brand_blue());
        canvas.fill_rect(value_x, y, TOTALS_WIDTH - TOTALS_LABEL_WIDTH, height, Color::WHITE);
        canvas.line_width(LINE_WIDTH);
        canvas.stroke_color(Color::BLACK);
        canvas.stroke_rect(TOTALS_X, y, TOTALS_WIDTH, height);
        canvas.line(value_x, y, value_x, y + height);

        canvas.text(
            row.label,
            TOTALS_X + CELL_MARGIN,
            y + row.baseline,
            &TextStyle::bold(row.label_size),
            TextAlign::Left,
            Color::WHITE,
        );
        canvas.text(
            &format_pdf_amount(row.value),
            TOTALS_X + TOTALS_WIDTH - CELL_MARGIN,
            y + row.baseline,
            &TextStyle::bold(row.value_size),
            TextAlign::Right,
            Color::BLACK,
        );
        y += height;
    }

    canvas.text(
        thank_you,
        PAGE_WIDTH / 2.0,
        top + THANK_YOU_OFFSET,
        &TextStyle::bold(9.0),
        TextAlign::Center,
        brand_blue(),
    );
}

/// Close a page with the sum of the amounts placed on it.
pub fn draw_running_subtotal<W: Write>(canvas: &mut Canvas<W>, top: f64, amount: f64) {
    let label_width = COL_X[COL_AMOUNT] - TABLE_LEFT;
    let height = SUBTOTAL_ROW_HEIGHT;
    let baseline = top + height / 2.0 + 2.0;

    canvas.fill_rect(TABLE_LEFT, top, label_width, height, band_gray());
    canvas.line_width(LINE_WIDTH);
    canvas.stroke_color(Color::BLACK);
    canvas.stroke_rect(TABLE_LEFT, top, label_width, height);
    canvas.stroke_rect(COL_X[COL_AMOUNT], top, COL_WIDTHS[COL_AMOUNT], height);

    canvas.text(
        "Page Subtotal",
        column_right(COL_PRICE) - CELL_MARGIN,
        baseline,
        &TextStyle::bold(12.0),
        TextAlign::Right,
        Color::BLACK,
    );
    canvas.text(
        &format_pdf_amount(amount),
        column_right(COL_AMOUNT) - CELL_MARGIN,
        baseline,
        &TextStyle::bold(14.0),
        TextAlign::Right,
        Color::BLACK,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::geometry::TOTALS_AND_FOOTER_HEIGHT;

    #[test]
    fn footer_sits_below_totals_box() {
        let box_height: f64 = TOTALS_ROW_HEIGHTS.iter().sum();
        assert!(THANK_YOU_OFFSET > box_height);
        assert!(FOOTER_OFFSET > THANK_YOU_OFFSET);
        // contact line baseline is 34 below the separator
        assert!(FOOTER_OFFSET + 34.0 <= TOTALS_AND_FOOTER_HEIGHT);
    }
}
