use std::path::Path;

use chrono::NaiveDate;
use invoice_core::{
    generate_pdf, render_invoice, AppConfig, AssetPaths, BrandAssets, Branding, Invoice,
    InvoiceHeader, LineItem, OldDue,
};

fn sample_invoice() -> Invoice {
    let header = InvoiceHeader {
        invoice_number: "INV-009".to_string(),
        invoice_date: NaiveDate::from_ymd_opt(2024, 2, 1).unwrap(),
        customer_name: "Acme".to_string(),
        customer_address: "Line1\nLine2".to_string(),
    };
    let items = (1..=20)
        .map(|i| LineItem::new(&format!("Item {}", i), "", 1, 25.0))
        .collect();
    Invoice::new(header, items, OldDue::default(), 0.0)
}

fn write_png(path: &Path, width: u32, height: u32) {
    let mut out = Vec::new();
    {
        let mut encoder = png::Encoder::new(&mut out, width, height);
        encoder.set_color(png::ColorType::Rgb);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header().unwrap();
        writer
            .write_image_data(&vec![90u8; (width * height * 3) as usize])
            .unwrap();
    }
    std::fs::write(path, out).unwrap();
}

fn config_for(dir: &Path) -> AppConfig {
    AppConfig {
        assets: AssetPaths {
            logo: dir.join("Our Logo.jpg"),
            signature: dir.join("sign.png"),
        },
        output_dir: dir.to_path_buf(),
        compress: false,
        ..AppConfig::default()
    }
}

#[tokio::test]
async fn missing_assets_load_as_none() {
    let dir = tempfile::tempdir().unwrap();
    let assets = BrandAssets::load(&config_for(dir.path()).assets).await;
    assert!(assets.logo.is_none());
    assert!(assets.signature.is_none());
}

#[tokio::test]
async fn undecodable_logo_loads_as_none() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("Our Logo.jpg"), b"<html>404</html>").unwrap();
    write_png(&dir.path().join("sign.png"), 8, 4);

    let assets = BrandAssets::load(&config_for(dir.path()).assets).await;
    assert!(assets.logo.is_none());
    let signature = assets.signature.expect("signature should decode");
    assert_eq!((signature.width, signature.height), (8, 4));
}

#[tokio::test]
async fn logo_failure_falls_back_to_tagline() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("Our Logo.jpg"), b"not an image").unwrap();
    let config = config_for(dir.path());

    let rendered = generate_pdf(&sample_invoice(), &config).await.unwrap();
    let pdf = String::from_utf8_lossy(&rendered.bytes);
    assert!(pdf.contains("(Quality Products at Best Rates) Tj"));
    assert!(!pdf.contains("/XObject"));

    // same invoice with a working logo
    write_png(&dir.path().join("Our Logo.jpg"), 40, 20);
    let with_logo = generate_pdf(&sample_invoice(), &config).await.unwrap();
    let pdf_with_logo = String::from_utf8_lossy(&with_logo.bytes);
    assert!(!pdf_with_logo.contains("(Quality Products at Best Rates) Tj"));
    assert!(pdf_with_logo.contains("/Im0 Do"));

    assert_eq!(rendered.layout, with_logo.layout);
    assert_eq!(rendered.page_count(), with_logo.page_count());
}

#[test]
fn signature_is_drawn_in_footer() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sign.png");
    write_png(&path, 30, 10);
    let assets = BrandAssets {
        logo: None,
        signature: Some(pdf_draw::load_image(std::fs::read(&path).unwrap()).unwrap()),
    };
    let rendered = render_invoice(&sample_invoice(), &Branding::default(), &assets, false).unwrap();
    let pdf = String::from_utf8_lossy(&rendered.bytes);
    assert!(pdf.contains("/Im0 Do"));
    assert!(pdf.contains("(Authorized) Tj"));
}

#[tokio::test]
async fn rendered_pdf_is_written_under_its_file_name() {
    let dir = tempfile::tempdir().unwrap();
    let config = config_for(dir.path());
    let rendered = generate_pdf(&sample_invoice(), &config).await.unwrap();
    let path = rendered.write_to(&config.output_dir).unwrap();

    assert_eq!(path, dir.path().join("INV-009 Acme, Line1.pdf"));
    let bytes = std::fs::read(&path).unwrap();
    assert!(bytes.starts_with(b"%PDF-1.7"));
}
