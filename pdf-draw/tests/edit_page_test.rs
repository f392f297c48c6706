use pdf_draw::{DrawError, PdfDocument, TextAlign, TextStyle};

// -------------------------------------------------------
// page_count
// -------------------------------------------------------

#[test]
fn page_count_is_zero_before_any_pages() {
    let doc = PdfDocument::new(Vec::<u8>::new());
    assert_eq!(doc.page_count(), 0);
}

#[test]
fn page_count_returns_number_of_completed_pages() {
    let mut doc = PdfDocument::new(Vec::<u8>::new());
    doc.begin_page(612.0, 792.0);
    // only completed pages count
    assert_eq!(doc.page_count(), 0);

    doc.end_page().unwrap();
    assert_eq!(doc.page_count(), 1);

    doc.begin_page(612.0, 792.0);
    doc.end_page().unwrap();
    assert_eq!(doc.page_count(), 2);
}

#[test]
fn page_count_not_incremented_by_open_page() {
    let mut doc = PdfDocument::new(Vec::<u8>::new());
    doc.begin_page(612.0, 792.0);
    doc.end_page().unwrap();

    doc.open_page(1).unwrap();
    assert_eq!(doc.page_count(), 1);
    doc.end_page().unwrap();
    assert_eq!(doc.page_count(), 1);
}

// -------------------------------------------------------
// open_page: error cases
// -------------------------------------------------------

#[test]
fn open_page_zero_returns_error() {
    let mut doc = PdfDocument::new(Vec::<u8>::new());
    doc.begin_page(612.0, 792.0);
    doc.end_page().unwrap();
    assert!(matches!(
        doc.open_page(0),
        Err(DrawError::PageOutOfRange { page: 0, total: 1 })
    ));
}

#[test]
fn open_page_out_of_range_returns_error() {
    let mut doc = PdfDocument::new(Vec::<u8>::new());
    doc.begin_page(612.0, 792.0);
    doc.end_page().unwrap();
    assert!(doc.open_page(2).is_err());
}

// -------------------------------------------------------
// open_page: overlays
// -------------------------------------------------------

#[test]
fn overlay_is_appended_to_original_content() {
    let mut doc = PdfDocument::new(Vec::<u8>::new());
    doc.begin_page(612.0, 792.0);
    doc.place_text("Body", 20.0, 700.0);
    doc.end_page().unwrap();

    doc.open_page(1).unwrap();
    doc.place_text("Stamp", 20.0, 20.0);
    doc.end_page().unwrap();

    let bytes = doc.end_document().unwrap();
    let output = String::from_utf8_lossy(&bytes);
    let body = output.find("(Body) Tj").unwrap();
    let stamp = output.find("(Stamp) Tj").unwrap();
    assert!(body < stamp);
    // original content isolated in its own graphics state
    assert!(output.contains("q\nBT\n/F1 12 Tf\n20 700 Td\n(Body) Tj\nET\nQ\nBT"));
    assert!(output.contains("/Count 1"));
}

#[test]
fn page_x_of_y_on_every_page() {
    let mut doc = PdfDocument::new(Vec::<u8>::new());
    for i in 1..=3 {
        doc.begin_page(612.0, 792.0);
        doc.place_text(&format!("Content {}", i), 72.0, 700.0);
        doc.end_page().unwrap();
    }

    let total = doc.page_count();
    let style = TextStyle::regular(9.0);
    for i in 1..=total {
        doc.open_page(i).unwrap();
        doc.place_text_aligned(
            &format!("Page {} of {}", i, total),
            540.0,
            30.0,
            &style,
            TextAlign::Right,
        );
        doc.end_page().unwrap();
    }

    let bytes = doc.end_document().unwrap();
    let output = String::from_utf8_lossy(&bytes);
    for i in 1..=3 {
        assert!(output.contains(&format!("(Page {} of 3) Tj", i)));
    }
    assert!(output.contains("/Count 3"));
}

#[test]
fn reopening_a_page_auto_closes_the_open_one() {
    let mut doc = PdfDocument::new(Vec::<u8>::new());
    doc.begin_page(612.0, 792.0);
    doc.end_page().unwrap();
    doc.begin_page(612.0, 792.0);
    // second page still open
    doc.open_page(1).unwrap();
    assert_eq!(doc.page_count(), 2);
}
