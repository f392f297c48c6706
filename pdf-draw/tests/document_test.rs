use pdf_draw::{PdfDocument, TextAlign, TextStyle};

fn render(build: impl FnOnce(&mut PdfDocument<Vec<u8>>)) -> String {
    let mut doc = PdfDocument::new(Vec::<u8>::new());
    build(&mut doc);
    let bytes = doc.end_document().unwrap();
    String::from_utf8_lossy(&bytes).into_owned()
}

#[test]
fn create_empty_document() {
    let output = render(|doc| {
        doc.begin_page(595.28, 841.89);
        doc.end_page().unwrap();
    });
    assert!(output.starts_with("%PDF-1.7"));
    assert!(output.contains("%%EOF"));
    assert!(output.contains("/MediaBox [0 0 595.28 841.89]"));
    assert!(output.contains("/Count 1"));
}

#[test]
fn set_info_appears_in_output() {
    let output = render(|doc| {
        doc.set_info("Creator", "billbook");
        doc.set_info("Title", "Invoice 42");
        doc.begin_page(612.0, 792.0);
        doc.end_page().unwrap();
    });
    assert!(output.contains("/Creator (billbook)"));
    assert!(output.contains("/Title (Invoice 42)"));
    assert!(output.contains("/Info"));
}

#[test]
fn place_text_in_content_stream() {
    let output = render(|doc| {
        doc.begin_page(612.0, 792.0);
        doc.place_text("Hello", 20.0, 20.0);
    });
    assert!(output.contains("(Hello) Tj"));
    assert!(output.contains("/F1 12 Tf"));
    assert!(output.contains("20 20 Td"));
}

#[test]
fn bold_text_uses_second_font() {
    let output = render(|doc| {
        doc.begin_page(612.0, 792.0);
        doc.place_text_styled("TOTAL", 10.0, 10.0, &TextStyle::bold(13.0));
    });
    assert!(output.contains("/F2 13 Tf"));
    assert!(output.contains("/BaseFont /Helvetica-Bold"));
    assert!(output.contains("/Encoding /WinAnsiEncoding"));
}

#[test]
fn right_aligned_text_ends_at_anchor() {
    let style = TextStyle::regular(10.0);
    // "00" is 2 * 5.56pt wide at 10pt.
    let output = render(|doc| {
        doc.begin_page(612.0, 792.0);
        doc.place_text_aligned("00", 100.0, 50.0, &style, TextAlign::Right);
    });
    assert!(output.contains("88.88 50 Td"), "{}", output);
}

#[test]
fn centered_text_straddles_anchor() {
    let style = TextStyle::regular(10.0);
    let output = render(|doc| {
        doc.begin_page(612.0, 792.0);
        doc.place_text_aligned("00", 100.0, 50.0, &style, TextAlign::Center);
    });
    assert!(output.contains("94.44 50 Td"), "{}", output);
}

#[test]
fn parens_in_text_are_escaped() {
    let output = render(|doc| {
        doc.begin_page(612.0, 792.0);
        doc.place_text("Bricks (red)", 20.0, 20.0);
    });
    assert!(output.contains("(Bricks \\(red\\)) Tj"));
}

#[test]
fn auto_close_page_on_begin_page() {
    let output = render(|doc| {
        doc.begin_page(612.0, 792.0);
        doc.place_text("Page 1", 20.0, 20.0);
        doc.begin_page(612.0, 792.0);
        doc.place_text("Page 2", 20.0, 20.0);
        doc.end_page().unwrap();
    });
    assert!(output.contains("/Count 2"));
}

#[test]
fn auto_close_page_on_end_document() {
    let output = render(|doc| {
        doc.begin_page(612.0, 792.0);
        doc.place_text("Hello", 20.0, 20.0);
    });
    assert!(output.contains("/Count 1"));
    assert!(output.contains("(Hello) Tj"));
}

#[test]
fn compressed_pdf_is_smaller_than_uncompressed() {
    let make_pdf = |compress: bool| -> Vec<u8> {
        let mut doc = PdfDocument::new(Vec::<u8>::new());
        doc.set_compression(compress);
        for i in 0..10 {
            doc.begin_page(612.0, 792.0);
            for y in 0..20 {
                doc.place_text(
                    &format!("Page {} line {} repetitive content for compression", i, y),
                    20.0,
                    700.0 - (y as f64 * 30.0),
                );
            }
            doc.end_page().unwrap();
        }
        doc.end_document().unwrap()
    };

    let uncompressed = make_pdf(false);
    let compressed = make_pdf(true);
    assert!(
        compressed.len() < uncompressed.len(),
        "compressed ({}) should be smaller than uncompressed ({})",
        compressed.len(),
        uncompressed.len(),
    );
    assert!(String::from_utf8_lossy(&compressed).contains("/Filter /FlateDecode"));
}

#[test]
fn create_writes_file() {
    let dir = std::env::temp_dir().join(format!("pdf-draw-create-{}", std::process::id()));
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("out.pdf");

    let mut doc = PdfDocument::create(&path).unwrap();
    doc.begin_page(612.0, 792.0);
    doc.place_text("on disk", 20.0, 20.0);
    doc.end_document().unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-1.7"));
    std::fs::remove_dir_all(&dir).unwrap();
}

#[test]
fn page_resources_list_regular_and_bold_only() {
    let output = render(|doc| {
        doc.begin_page(595.28, 841.89);
        doc.end_page().unwrap();
    });
    assert!(output.contains("/F1"));
    assert!(output.contains("/BaseFont /Helvetica-Bold"));
    assert!(!output.contains("Helvetica-Oblique"));
    assert!(!output.contains("/F3"));
}
