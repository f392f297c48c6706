use pdf_draw::{wrap_text, TextStyle};

use super::canvas::{mm_to_pt, pt_to_mm};
use super::geometry::{description_width, BODY_FONT_SIZE};

/// Width of `text` in millimetres.
pub fn text_width(text: &str, style: &TextStyle) -> f64 {
    pt_to_mm(style.measure(text))
}

/// Breaks item descriptions into the lines drawn in the description cell.
#[derive(Debug, Clone, Copy)]
pub struct DescriptionWrapper {
    style: TextStyle,
    max_width: f64,
}

impl DescriptionWrapper {
    /// `max_width` is in millimetres.
    pub fn new(style: TextStyle, max_width: f64) -> Self {
        DescriptionWrapper { style, max_width }
    }

    /// The wrapper used for the items table.
    pub fn for_table() -> Self {
        Self::new(TextStyle::regular(BODY_FONT_SIZE), description_width())
    }

    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    /// Explicit line breaks are honoured first, then each segment is
    /// wrapped to the usable width. A blank segment stays as one empty
    /// line.
    pub fn wrap(&self, text: &str) -> Vec<String> {
        let width_pt = mm_to_pt(self.max_width);
        let mut lines = Vec::new();
        for segment in text.split('\n') {
            let segment = segment.trim_end_matches('\r');
            if segment.trim().is_empty() {
                lines.push(String::new());
            } else {
                lines.extend(wrap_text(segment, width_pt, &self.style));
            }
        }
        lines
    }
}
