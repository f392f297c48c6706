use pdf_draw::{BuiltinFont, FontMetrics, TextStyle};

#[test]
fn digit_width_is_uniform() {
    for d in '0'..='9' {
        assert_eq!(FontMetrics::char_width(BuiltinFont::Helvetica, d), 556);
        assert_eq!(FontMetrics::char_width(BuiltinFont::HelveticaBold, d), 556);
    }
}

#[test]
fn bold_is_wider_than_regular() {
    let text = "SUPER SON ENTERPRISE";
    let regular = FontMetrics::measure_text(text, BuiltinFont::Helvetica, 16.0);
    let bold = FontMetrics::measure_text(text, BuiltinFont::HelveticaBold, 16.0);
    assert!(bold > regular);
}

#[test]
fn measure_scales_with_size() {
    let small = TextStyle::regular(10.0).measure("Invoice");
    let large = TextStyle::regular(20.0).measure("Invoice");
    assert!((large - 2.0 * small).abs() < 1e-9);
}

#[test]
fn non_ascii_uses_default_width() {
    assert_eq!(FontMetrics::char_width(BuiltinFont::Helvetica, '\u{20b9}'), 556);
}

#[test]
fn only_helvetica_faces_are_registered() {
    let bases: Vec<_> = BuiltinFont::ALL.iter().map(|f| f.pdf_base_name()).collect();
    assert_eq!(bases, vec!["Helvetica", "Helvetica-Bold"]);
}

#[test]
fn font_resource_names() {
    let names: Vec<_> = BuiltinFont::ALL.iter().map(|f| f.pdf_name()).collect();
    assert_eq!(names, vec!["F1", "F2"]);
}
