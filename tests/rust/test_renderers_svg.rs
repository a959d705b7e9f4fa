use super::*;

#[test]
fn test_escape() {
    assert_eq!(escape(r#"a<b & "c">"#), "a&lt;b &amp; &quot;c&quot;&gt;");
}

#[test]
fn test_write_self_closing() {
    let mut out = String::new();
    write_element(&mut out, &Element::new("circle").attr("r", 5), 0);
    assert_eq!(out, "<circle r=\"5\"/>\n");
}

#[test]
fn test_write_text_inline() {
    let mut out = String::new();
    write_element(&mut out, &Element::new("title").text("a & b"), 1);
    assert_eq!(out, "  <title>a &amp; b</title>\n");
}

#[test]
fn test_write_nested_indentation() {
    let el = Element::group()
        .id("g")
        .child(Element::new("rect").attr("width", 3));
    let mut out = String::new();
    write_element(&mut out, &el, 0);
    assert_eq!(out, "<g id=\"g\">\n  <rect width=\"3\"/>\n</g>\n");
}

#[test]
fn test_render_document_wraps_body() {
    let svg = render_document("circuit", 800.0, 600.0, &[Element::group().id("root-component")]);
    assert!(svg.starts_with("<svg xmlns=\"http://www.w3.org/2000/svg\" id=\"circuit\""));
    assert!(svg.contains("viewBox=\"0 0 800 600\""));
    assert!(svg.contains("<style>"));
    assert!(svg.contains("  <g id=\"root-component\"/>\n"));
    assert!(svg.ends_with("</svg>\n"));
}
