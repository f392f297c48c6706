//! Fixed page geometry in millimetres, origin at the top-left corner.

use pdf_draw::Color;

pub const PAGE_WIDTH: f64 = 210.0;
pub const PAGE_HEIGHT: f64 = 297.0;

// ── table columns ─────────────────────────────────────────────────────────────

pub const COL_SR: usize = 0;
pub const COL_DESCRIPTION: usize = 1;
pub const COL_SIZE: usize = 2;
pub const COL_QTY: usize = 3;
pub const COL_PRICE: usize = 4;
pub const COL_AMOUNT: usize = 5;

pub const COL_WIDTHS: [f64; 6] = [10.0, 85.0, 16.0, 16.0, 20.0, 30.0];
pub const COL_X: [f64; 6] = [13.0, 23.0, 108.0, 124.0, 140.0, 160.0];

pub const TABLE_LEFT: f64 = 13.0;
pub const TABLE_WIDTH: f64 = 177.0;

/// Horizontal space taken from the description column before wrapping.
pub const DESCRIPTION_PADDING: f64 = 4.0;
/// Description text starts this far right of the column edge.
pub const TEXT_INSET: f64 = 2.0;
/// Amount text ends this far left of the column's right edge.
pub const AMOUNT_RIGHT_MARGIN: f64 = 3.0;
/// Baseline offset below a cell's vertical centre.
pub const BASELINE_DROP: f64 = 2.0;

// ── row heights ───────────────────────────────────────────────────────────────

pub const LINE_HEIGHT: f64 = 5.0;
pub const BASE_ROW_HEIGHT: f64 = 6.0;
pub const SINGLE_ROW_PAD: f64 = 6.0;
pub const SUB_ROW_HEIGHT: f64 = 8.0;
pub const GROUP_ROW_PAD: f64 = 8.0;
pub const OLD_DUE_ROW_HEIGHT: f64 = 10.0;
pub const SUBTOTAL_ROW_HEIGHT: f64 = 10.0;

// ── vertical bands ────────────────────────────────────────────────────────────

pub const TABLE_HEADER_TOP: f64 = 108.0;
pub const TABLE_HEADER_HEIGHT: f64 = 12.0;
pub const FIRST_ROW_TOP: f64 = TABLE_HEADER_TOP + TABLE_HEADER_HEIGHT;

/// Nothing but the page stamp is drawn below this line.
pub const PAGE_BOTTOM_LIMIT: f64 = 276.0;

/// Space between the last table row and the totals box.
pub const TOTALS_GAP: f64 = 5.0;
/// Totals box, thank-you line and footer, measured from the totals top.
pub const TOTALS_AND_FOOTER_HEIGHT: f64 = 86.0;
/// Everything that must follow the last content row on one page.
pub const TRAILING_BLOCK_HEIGHT: f64 = TOTALS_GAP + TOTALS_AND_FOOTER_HEIGHT;

/// Reservation while placing item blocks: room for the running subtotal.
pub const ITEM_RESERVE: f64 = SUBTOTAL_ROW_HEIGHT;
/// Reservation before the old-due row: room for totals and footer.
pub const OLD_DUE_RESERVE: f64 = TRAILING_BLOCK_HEIGHT;

/// Totals start at the top of the table area on a page that carries
/// nothing else.
pub const TOTALS_ONLY_TOP: f64 = TABLE_HEADER_TOP;

// ── totals box ────────────────────────────────────────────────────────────────

pub const TOTALS_X: f64 = 140.0;
pub const TOTALS_WIDTH: f64 = 50.0;
pub const TOTALS_LABEL_WIDTH: f64 = 25.0;
pub const TOTALS_ROW_HEIGHTS: [f64; 3] = [12.0, 12.0, 14.0];

// ── page stamp ────────────────────────────────────────────────────────────────

pub const STAMP_RIGHT: f64 = 196.0;
pub const STAMP_BASELINE: f64 = 282.0;
pub const STAMP_FONT_SIZE: f64 = 9.0;

// ── fonts & colours ───────────────────────────────────────────────────────────

pub const BODY_FONT_SIZE: f64 = 14.0;
pub const LINE_WIDTH: f64 = 0.5;

pub fn brand_blue() -> Color {
    Color::rgb8(41, 128, 185)
}

pub fn band_gray() -> Color {
    Color::rgb8(220, 220, 220)
}

/// Usable width for wrapped description text.
pub fn description_width() -> f64 {
    COL_WIDTHS[COL_DESCRIPTION] - DESCRIPTION_PADDING
}

/// Horizontal centre of a column.
pub fn column_center(col: usize) -> f64 {
    COL_X[col] + COL_WIDTHS[col] / 2.0
}

/// Right edge of a column.
pub fn column_right(col: usize) -> f64 {
    COL_X[col] + COL_WIDTHS[col]
}
