//! Invoice layout: row model, page flow and drawing.
//!
//! Planning ([`rows`], [`flow`]) is pure and works in millimetres on a
//! top-left origin; [`canvas`] converts to PDF points at the drawing
//! boundary.

pub mod assemble;
pub mod canvas;
pub mod flow;
pub mod geometry;
pub mod header;
pub mod measure;
pub mod rows;
pub mod totals;

pub use assemble::{generate_pdf, output_file_name, render_invoice, InvoiceLayout, RenderedInvoice};
pub use flow::{paginate, PagePlan, Pagination, Placement, TotalsAnchor};
pub use measure::DescriptionWrapper;
pub use rows::{build_blocks, group_items, BlockKind, DrawableBlock, SubRow};
