use pdf_draw::{ColorSpace, DrawError, ImageEncoding, PdfDocument};

/// Encode a small solid-color PNG in memory.
fn make_png(width: u32, height: u32, color: png::ColorType) -> Vec<u8> {
    let channels = match color {
        png::ColorType::Rgba => 4,
        png::ColorType::Rgb => 3,
        png::ColorType::GrayscaleAlpha => 2,
        _ => 1,
    };
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(color);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        let data = vec![200u8; (width * height) as usize * channels];
        writer.write_image_data(&data).unwrap();
    }
    out
}

#[test]
fn load_png_from_bytes() {
    let mut doc = PdfDocument::new(Vec::<u8>::new());
    let img = doc.load_image_bytes(make_png(4, 2, png::ColorType::Rgb));
    assert!(img.is_ok(), "PNG should load successfully");
}

#[test]
fn rgba_png_splits_alpha() {
    let image = pdf_draw::load_image(make_png(3, 3, png::ColorType::Rgba)).unwrap();
    assert_eq!(image.encoding, ImageEncoding::Raw);
    assert_eq!(image.color_space, ColorSpace::DeviceRGB);
    assert_eq!(image.data.len(), 27);
    assert_eq!(image.alpha.as_ref().map(Vec::len), Some(9));
}

#[test]
fn invalid_data_returns_error() {
    let mut doc = PdfDocument::new(Vec::<u8>::new());
    let result = doc.load_image_bytes(b"not an image".to_vec());
    assert!(matches!(result, Err(DrawError::UnsupportedImage(_))));
}

#[test]
fn truncated_png_returns_decode_error() {
    let mut bytes = make_png(8, 8, png::ColorType::Rgb);
    bytes.truncate(20);
    let result = pdf_draw::load_image(bytes);
    assert!(matches!(result, Err(DrawError::ImageDecode(_))));
}

#[test]
fn placed_image_is_referenced_by_page() {
    let mut doc = PdfDocument::new(Vec::<u8>::new());
    let id = doc
        .load_image_bytes(make_png(4, 2, png::ColorType::Rgb))
        .unwrap();
    doc.begin_page(612.0, 792.0);
    doc.place_image(id, 10.0, 20.0, 40.0, 20.0);
    let bytes = doc.end_document().unwrap();
    let output = String::from_utf8_lossy(&bytes);

    assert!(output.contains("40 0 0 20 10 20 cm\n/Im0 Do"));
    assert!(output.contains("/XObject << /Im0"));
    assert!(output.contains("/Subtype /Image"));
    assert!(output.contains("/Width 4 /Height 2"));
}

#[test]
fn alpha_png_gets_soft_mask() {
    let mut doc = PdfDocument::new(Vec::<u8>::new());
    let id = doc
        .load_image_bytes(make_png(2, 2, png::ColorType::Rgba))
        .unwrap();
    doc.begin_page(612.0, 792.0);
    doc.place_image(id, 0.0, 0.0, 10.0, 10.0);
    let bytes = doc.end_document().unwrap();
    let output = String::from_utf8_lossy(&bytes);
    assert!(output.contains("/SMask"));
    assert!(output.contains("/ColorSpace /DeviceGray"));
}

#[test]
fn unused_image_is_not_in_page_resources() {
    let mut doc = PdfDocument::new(Vec::<u8>::new());
    doc.load_image_bytes(make_png(1, 1, png::ColorType::Grayscale))
        .unwrap();
    doc.begin_page(612.0, 792.0);
    let bytes = doc.end_document().unwrap();
    assert!(!String::from_utf8_lossy(&bytes).contains("/XObject <<"));
}
