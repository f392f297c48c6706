use std::io::Write;

use pdf_draw::{Color, ImageData, ImageId, PdfDocument, TextAlign, TextStyle};

use super::geometry::{PAGE_HEIGHT, PAGE_WIDTH};

/// Points per millimetre.
pub const MM: f64 = 72.0 / 25.4;

pub fn mm_to_pt(mm: f64) -> f64 {
    mm * MM
}

pub fn pt_to_mm(pt: f64) -> f64 {
    pt / MM
}

/// A `PdfDocument` addressed in millimetres from the top-left corner, the
/// coordinate system every layout constant is written in.
pub struct Canvas<W: Write> {
    doc: PdfDocument<W>,
}

impl<W: Write> Canvas<W> {
    pub fn new(doc: PdfDocument<W>) -> Self {
        Canvas { doc }
    }

    fn y(top: f64) -> f64 {
        mm_to_pt(PAGE_HEIGHT - top)
    }

    pub fn begin_page(&mut self) {
        self.doc.begin_page(mm_to_pt(PAGE_WIDTH), mm_to_pt(PAGE_HEIGHT));
    }

    pub fn end_page(&mut self) -> pdf_draw::Result<()> {
        self.doc.end_page()
    }

    /// Switch back to an already finished page (1-based).
    pub fn open_page(&mut self, page_num: usize) -> pdf_draw::Result<()> {
        self.doc.open_page(page_num)
    }

    pub fn page_count(&self) -> usize {
        self.doc.page_count()
    }

    pub fn finish(self) -> pdf_draw::Result<W> {
        self.doc.end_document()
    }

    pub fn add_image(&mut self, image: ImageData) -> ImageId {
        self.doc.add_image(image)
    }

    pub fn line_width(&mut self, width: f64) {
        self.doc.set_line_width(mm_to_pt(width));
    }

    pub fn stroke_color(&mut self, color: Color) {
        self.doc.set_stroke_color(color);
    }

    fn rect_path(&mut self, x: f64, top: f64, width: f64, height: f64) {
        self.doc.rect(
            mm_to_pt(x),
            Self::y(top + height),
            mm_to_pt(width),
            mm_to_pt(height),
        );
    }

    /// Outline a rectangle given its top-left corner.
    pub fn stroke_rect(&mut self, x: f64, top: f64, width: f64, height: f64) {
        self.rect_path(x, top, width, height);
        self.doc.stroke();
    }

    pub fn fill_rect(&mut self, x: f64, top: f64, width: f64, height: f64, color: Color) {
        self.doc.set_fill_color(color);
        self.rect_path(x, top, width, height);
        self.doc.fill();
    }

    pub fn line(&mut self, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.doc
            .move_to(mm_to_pt(x1), Self::y(y1))
            .line_to(mm_to_pt(x2), Self::y(y2))
            .stroke();
    }

    /// Draw text whose baseline sits at `baseline`, anchored at `x`.
    pub fn text(
        &mut self,
        text: &str,
        x: f64,
        baseline: f64,
        style: &TextStyle,
        align: TextAlign,
        color: Color,
    ) {
        self.doc.set_fill_color(color);
        self.doc
            .place_text_aligned(text, mm_to_pt(x), Self::y(baseline), style, align);
    }

    pub fn image(&mut self, id: ImageId, x: f64, top: f64, width: f64, height: f64) {
        self.doc.place_image(
            id,
            mm_to_pt(x),
            Self::y(top + height),
            mm_to_pt(width),
            mm_to_pt(height),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn a4_in_points() {
        assert!((mm_to_pt(PAGE_WIDTH) - 595.28).abs() < 0.01);
        assert!((mm_to_pt(PAGE_HEIGHT) - 841.89).abs() < 0.01);
    }

    #[test]
    fn conversions_invert() {
        assert!((pt_to_mm(mm_to_pt(42.0)) - 42.0).abs() < 1e-9);
    }

    #[test]
    fn top_edge_maps_to_page_height() {
        assert!((Canvas::<Vec<u8>>::y(0.0) - mm_to_pt(PAGE_HEIGHT)).abs() < 1e-9);
        assert_eq!(Canvas::<Vec<u8>>::y(PAGE_HEIGHT), 0.0);
    }
}
