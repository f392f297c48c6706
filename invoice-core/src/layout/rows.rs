use std::collections::HashMap;
use std::io::Write;

use pdf_draw::{Color, TextAlign, TextStyle};

use crate::model::{format_pdf_amount, LineItem, OldDue};

use super::canvas::Canvas;
use super::geometry::{
    band_gray, column_center, column_right, AMOUNT_RIGHT_MARGIN, BASELINE_DROP, BASE_ROW_HEIGHT,
    BODY_FONT_SIZE, COL_AMOUNT, COL_DESCRIPTION, COL_PRICE, COL_QTY, COL_SIZE, COL_SR, COL_WIDTHS,
    COL_X, GROUP_ROW_PAD, LINE_HEIGHT, LINE_WIDTH, OLD_DUE_ROW_HEIGHT, SINGLE_ROW_PAD,
    SUB_ROW_HEIGHT, TABLE_LEFT, TABLE_WIDTH, TEXT_INSET,
};
use super::measure::{text_width, DescriptionWrapper};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BlockKind {
    /// One item with a unique description.
    Single,
    /// Several items sharing one description cell.
    Grouped,
    /// The carried-over balance, always the last content row.
    OldDue,
}

/// The size/qty/price/amount cells of one item.
#[derive(Debug, Clone, PartialEq)]
pub struct SubRow {
    pub size: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub amount: f64,
}

impl From<&LineItem> for SubRow {
    fn from(item: &LineItem) -> Self {
        SubRow {
            size: item.size.clone(),
            quantity: item.quantity,
            unit_price: item.unit_price,
            amount: item.amount(),
        }
    }
}

/// One unit of table content. A block is never split across pages.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawableBlock {
    pub kind: BlockKind,
    /// Serial number shown in the SR column; `None` for the old-due row.
    pub serial: Option<usize>,
    /// Lines drawn in the description cell.
    pub lines: Vec<String>,
    pub sub_rows: Vec<SubRow>,
    /// Height in millimetres.
    pub height: f64,
}

impl DrawableBlock {
    /// What this block adds to the page subtotal.
    pub fn amount(&self) -> f64 {
        self.sub_rows.iter().map(|r| r.amount).sum()
    }

    /// Height of the slice each sub-row is centred in. Grouped sub-rows
    /// stack in fixed slices from the top; a single row uses the whole
    /// block.
    pub fn sub_row_height(&self) -> f64 {
        match self.kind {
            BlockKind::Grouped => SUB_ROW_HEIGHT,
            BlockKind::Single | BlockKind::OldDue => self.height,
        }
    }

    /// Offsets from the block top of each sub-row's vertical centre.
    pub fn sub_row_centers(&self) -> Vec<f64> {
        let slice = self.sub_row_height();
        (0..self.sub_rows.len())
            .map(|i| i as f64 * slice + slice / 2.0)
            .collect()
    }

    /// Offsets from the block top of the lines between sub-rows.
    pub fn sub_row_separators(&self) -> Vec<f64> {
        let slice = self.sub_row_height();
        (1..self.sub_rows.len()).map(|i| i as f64 * slice).collect()
    }
}

pub fn single_row_height(line_count: usize) -> f64 {
    BASE_ROW_HEIGHT.max(line_count as f64 * LINE_HEIGHT + SINGLE_ROW_PAD)
}

pub fn grouped_row_height(sub_rows: usize, line_count: usize) -> f64 {
    (sub_rows as f64 * SUB_ROW_HEIGHT).max(line_count as f64 * LINE_HEIGHT + GROUP_ROW_PAD)
}

/// Partition items by exact description, keeping the order in which each
/// description first appears and the item order within a group.
pub fn group_items(items: &[LineItem]) -> Vec<(&str, Vec<&LineItem>)> {
    let mut groups: Vec<(&str, Vec<&LineItem>)> = Vec::new();
    let mut index: HashMap<&str, usize> = HashMap::new();
    for item in items {
        match index.get(item.description.as_str()) {
            Some(&i) => groups[i].1.push(item),
            None => {
                index.insert(item.description.as_str(), groups.len());
                groups.push((item.description.as_str(), vec![item]));
            }
        }
    }
    groups
}

/// Turn the item list (and the old due, when it is carried) into the
/// ordered blocks the page flow places.
pub fn build_blocks(
    items: &[LineItem],
    old_due: &OldDue,
    wrapper: &DescriptionWrapper,
) -> Vec<DrawableBlock> {
    let mut blocks: Vec<DrawableBlock> = group_items(items)
        .into_iter()
        .enumerate()
        .map(|(i, (description, group))| {
            let lines = wrapper.wrap(description);
            let (kind, height) = if group.len() == 1 {
                (BlockKind::Single, single_row_height(lines.len()))
            } else {
                (BlockKind::Grouped, grouped_row_height(group.len(), lines.len()))
            };
            DrawableBlock {
                kind,
                serial: Some(i + 1),
                lines,
                sub_rows: group.into_iter().map(SubRow::from).collect(),
                height,
            }
        })
        .collect();

    if let Some(amount) = old_due.carried_amount() {
        blocks.push(DrawableBlock {
            kind: BlockKind::OldDue,
            serial: None,
            lines: vec![old_due.label()],
            sub_rows: vec![SubRow {
                size: "-".to_string(),
                quantity: 0,
                unit_price: 0.0,
                amount,
            }],
            height: OLD_DUE_ROW_HEIGHT,
        });
    }
    blocks
}

// ── drawing ───────────────────────────────────────────────────────────────────

/// Draw a placed block with its top edge at `top`.
pub fn draw_block<W: Write>(canvas: &mut Canvas<W>, block: &DrawableBlock, top: f64) {
    canvas.line_width(LINE_WIDTH);
    canvas.stroke_color(Color::BLACK);
    match block.kind {
        BlockKind::Single | BlockKind::Grouped => draw_item_block(canvas, block, top),
        BlockKind::OldDue => draw_old_due(canvas, block, top),
    }
}

fn draw_item_block<W: Write>(canvas: &mut Canvas<W>, block: &DrawableBlock, top: f64) {
    for (x, width) in COL_X.iter().zip(COL_WIDTHS) {
        canvas.stroke_rect(*x, top, width, block.height);
    }

    for offset in block.sub_row_separators() {
        let y = top + offset;
        for col in COL_SIZE..=COL_AMOUNT {
            canvas.line(COL_X[col], y, column_right(col), y);
        }
    }

    let style = TextStyle::regular(BODY_FONT_SIZE);
    let center = top + block.height / 2.0 + BASELINE_DROP;
    if let Some(serial) = block.serial {
        canvas.text(
            &serial.to_string(),
            COL_X[COL_SR] + TEXT_INSET,
            center,
            &style,
            TextAlign::Left,
            Color::BLACK,
        );
    }
    draw_description(canvas, &block.lines, center, &style);

    for (row, center) in block.sub_rows.iter().zip(block.sub_row_centers()) {
        let baseline = top + center + BASELINE_DROP;
        let cells = [
            (COL_SIZE, row.size.clone()),
            (COL_QTY, row.quantity.to_string()),
            (COL_PRICE, format_pdf_amount(row.unit_price)),
        ];
        for (col, text) in cells {
            canvas.text(&text, column_center(col), baseline, &style, TextAlign::Center, Color::BLACK);
        }
        canvas.text(
            &format_pdf_amount(row.amount),
            column_right(COL_AMOUNT) - AMOUNT_RIGHT_MARGIN,
            baseline,
            &style,
            TextAlign::Right,
            Color::BLACK,
        );
    }
}

/// Description lines centred as a whole around `center`.
fn draw_description<W: Write>(canvas: &mut Canvas<W>, lines: &[String], center: f64, style: &TextStyle) {
    let x = COL_X[COL_DESCRIPTION] + TEXT_INSET;
    if lines.len() <= 1 {
        let line = lines.first().map(String::as_str).unwrap_or("");
        canvas.text(line, x, center, style, TextAlign::Left, Color::BLACK);
        return;
    }
    let start = center - lines.len() as f64 * LINE_HEIGHT / 2.0 + BASELINE_DROP;
    for (i, line) in lines.iter().enumerate() {
        canvas.text(line, x, start + i as f64 * LINE_HEIGHT, style, TextAlign::Left, Color::BLACK);
    }
}

/// Grey band; "OLD DUE" and the bill reference share the merged SR and
/// description cells.
fn draw_old_due<W: Write>(canvas: &mut Canvas<W>, block: &DrawableBlock, top: f64) {
    let height = block.height;
    canvas.fill_rect(TABLE_LEFT, top, TABLE_WIDTH, height, band_gray());
    canvas.stroke_rect(TABLE_LEFT, top, COL_X[COL_SIZE] - TABLE_LEFT, height);
    for col in COL_SIZE..=COL_AMOUNT {
        canvas.stroke_rect(COL_X[col], top, COL_WIDTHS[col], height);
    }

    let center = top + height / 2.0 + BASELINE_DROP;
    let caption = TextStyle::bold(12.0);
    let x = COL_X[COL_SR] + TEXT_INSET;
    canvas.text("OLD DUE", x, center, &caption, TextAlign::Left, Color::BLACK);

    let label_x = x + text_width("OLD DUE", &caption) + 3.0;
    let label = block.lines.first().map(String::as_str).unwrap_or("");
    canvas.text(label, label_x, center, &TextStyle::regular(10.0), TextAlign::Left, Color::BLACK);

    let body = TextStyle::regular(BODY_FONT_SIZE);
    for col in [COL_SIZE, COL_QTY, COL_PRICE] {
        canvas.text("-", column_center(col), center, &body, TextAlign::Center, Color::BLACK);
    }
    canvas.text(
        &format_pdf_amount(block.amount()),
        column_right(COL_AMOUNT) - AMOUNT_RIGHT_MARGIN,
        center,
        &TextStyle::bold(BODY_FONT_SIZE),
        TextAlign::Right,
        Color::BLACK,
    );
}
