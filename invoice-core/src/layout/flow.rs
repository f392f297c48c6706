//! Page flow: decides where every block goes before anything is drawn.
//!
//! The controller walks the blocks with an explicit [`PageState`]. Before a
//! block of height `h` is placed at cursor `y` it checks
//! `y + h > PAGE_BOTTOM_LIMIT - reserve`; when that fails on a page that
//! already holds a block, the page is closed with a running subtotal and
//! the block is retried on a fresh page. Item blocks reserve room for the
//! running subtotal row, the old-due row reserves room for the whole
//! totals and footer block.

use tracing::{debug, warn};

use super::geometry::{
    FIRST_ROW_TOP, ITEM_RESERVE, OLD_DUE_RESERVE, PAGE_BOTTOM_LIMIT, SUBTOTAL_ROW_HEIGHT,
    TOTALS_GAP, TOTALS_ONLY_TOP, TRAILING_BLOCK_HEIGHT,
};
use super::rows::{BlockKind, DrawableBlock};

/// Where one block sits on its page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// Index into the block list.
    pub block: usize,
    /// Top edge in millimetres.
    pub top: f64,
}

/// Everything drawn in the table area of one page.
#[derive(Debug, Clone, PartialEq)]
pub struct PagePlan {
    pub placements: Vec<Placement>,
    /// Sum of the amounts of the blocks on this page.
    pub subtotal: f64,
    /// Top of the running-subtotal row; `None` on the page carrying the
    /// final totals.
    pub running_subtotal_top: Option<f64>,
}

impl PagePlan {
    pub fn block_indices(&self) -> Vec<usize> {
        self.placements.iter().map(|p| p.block).collect()
    }
}

/// Page (0-based) and top edge of the final totals box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TotalsAnchor {
    pub page: usize,
    pub top: f64,
}

/// The complete, deterministic page plan for one invoice.
#[derive(Debug, Clone, PartialEq)]
pub struct Pagination {
    pub pages: Vec<PagePlan>,
    pub totals: TotalsAnchor,
}

impl Pagination {
    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    pub fn page_subtotals(&self) -> Vec<f64> {
        self.pages.iter().map(|p| p.subtotal).collect()
    }

    /// True when the totals needed a page of their own.
    pub fn has_totals_only_page(&self) -> bool {
        self.pages
            .last()
            .is_some_and(|p| p.placements.is_empty() && self.pages.len() > 1)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlowState {
    Filling,
    PageBreakPending,
    Closing,
}

/// The page currently being filled.
#[derive(Debug)]
struct PageState {
    index: usize,
    cursor: f64,
    subtotal: f64,
    placements: Vec<Placement>,
}

impl PageState {
    fn fresh(index: usize) -> Self {
        PageState {
            index,
            cursor: FIRST_ROW_TOP,
            subtotal: 0.0,
            placements: Vec::new(),
        }
    }

    fn is_empty(&self) -> bool {
        self.placements.is_empty()
    }

    fn fits(&self, height: f64, reserve: f64) -> bool {
        self.cursor + height <= PAGE_BOTTOM_LIMIT - reserve
    }

    fn place(&mut self, index: usize, block: &DrawableBlock) {
        self.placements.push(Placement {
            block: index,
            top: self.cursor,
        });
        self.cursor += block.height;
        self.subtotal += block.amount();
    }

    /// Close the page with a running subtotal row at the cursor. The row
    /// never extends past the bottom limit; only an oversize block can
    /// push the cursor into the reserve.
    fn close_with_subtotal(self) -> PagePlan {
        PagePlan {
            running_subtotal_top: Some(self.cursor.min(PAGE_BOTTOM_LIMIT - SUBTOTAL_ROW_HEIGHT)),
            placements: self.placements,
            subtotal: self.subtotal,
        }
    }

    fn close_final(self) -> PagePlan {
        PagePlan {
            running_subtotal_top: None,
            placements: self.placements,
            subtotal: self.subtotal,
        }
    }
}

fn reserve_for(block: &DrawableBlock) -> f64 {
    match block.kind {
        BlockKind::OldDue => OLD_DUE_RESERVE,
        BlockKind::Single | BlockKind::Grouped => ITEM_RESERVE,
    }
}

/// Assign every block to a page and find room for the totals and footer.
pub fn paginate(blocks: &[DrawableBlock]) -> Pagination {
    let mut pages = Vec::new();
    let mut page = PageState::fresh(0);
    let mut next = 0;
    let mut state = FlowState::Filling;

    while state != FlowState::Closing {
        state = match state {
            FlowState::Filling => match blocks.get(next) {
                None => FlowState::Closing,
                Some(block) if page.fits(block.height, reserve_for(block)) => {
                    page.place(next, block);
                    next += 1;
                    FlowState::Filling
                }
                Some(block) if page.is_empty() => {
                    // Nothing to gain from a fresh page.
                    warn!(
                        block = next,
                        height = block.height,
                        "block does not fit an empty page with its reserve; placing it alone"
                    );
                    page.place(next, block);
                    next += 1;
                    FlowState::Filling
                }
                Some(_) => FlowState::PageBreakPending,
            },
            FlowState::PageBreakPending => {
                debug!(
                    page = page.index + 1,
                    subtotal = page.subtotal,
                    cursor = page.cursor,
                    "page full, closing with running subtotal"
                );
                let index = page.index + 1;
                pages.push(page.close_with_subtotal());
                page = PageState::fresh(index);
                FlowState::Filling
            }
            FlowState::Closing => FlowState::Closing,
        };
    }

    let totals = if page.cursor > PAGE_BOTTOM_LIMIT - TRAILING_BLOCK_HEIGHT {
        debug!(
            page = page.index + 1,
            cursor = page.cursor,
            "no room for totals, adding a totals page"
        );
        let index = page.index + 1;
        pages.push(page.close_with_subtotal());
        pages.push(PageState::fresh(index).close_final());
        TotalsAnchor {
            page: index,
            top: TOTALS_ONLY_TOP,
        }
    } else {
        let anchor = TotalsAnchor {
            page: page.index,
            top: page.cursor + TOTALS_GAP,
        };
        pages.push(page.close_final());
        anchor
    };

    debug!(
        pages = pages.len(),
        blocks = blocks.len(),
        "pagination complete"
    );
    Pagination { pages, totals }
}
