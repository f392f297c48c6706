pub mod document;
pub mod error;
pub mod fonts;
pub mod graphics;
pub mod images;
pub mod objects;
pub mod wrap;
pub mod writer;

pub use document::PdfDocument;
pub use error::{DrawError, Result};
pub use fonts::{BuiltinFont, FontMetrics, TextStyle};
pub use graphics::{Color, TextAlign};
pub use images::{load_image, ColorSpace, ImageData, ImageEncoding, ImageId};
pub use wrap::{break_word, wrap_text};
