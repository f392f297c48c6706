pub mod assets;
pub mod config;
pub mod editor;
pub mod error;
pub mod layout;
pub mod model;
pub mod store;

pub use assets::BrandAssets;
pub use config::{AppConfig, AssetPaths, Branding};
pub use editor::{InvoiceEditorState, ItemForm, OldDueForm};
pub use error::{Error, Result};
pub use layout::{generate_pdf, output_file_name, render_invoice, InvoiceLayout, RenderedInvoice};
pub use model::{Invoice, InvoiceHeader, InvoiceTotals, LineItem, OldDue};
pub use store::{InvoiceStore, InvoiceSummary};
