//! SVG serializer: converts an `Element` tree to an SVG string.

use crate::scene::Element;

const SVG_NS: &str = "http://www.w3.org/2000/svg";

/// Stylesheet embedded in every document.
const STYLE: &str = "\
.component > rect { stroke: #222; stroke-width: 1.5; }
.label { font-family: sans-serif; fill: #fff; text-anchor: middle; dominant-baseline: central; }
.pin { fill: #eee; stroke: #222; stroke-width: 1; }
.wire { fill: none; stroke: #ddd; stroke-width: 2; }
.subcomponent.toggle { cursor: pointer; }
.viewbox-pin-rect { fill: #444; stroke: #222; }
.empty { font-family: sans-serif; fill: #bbb; text-anchor: middle; }";

pub fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Serialize one element (and its subtree) with two-space indentation.
pub fn write_element(out: &mut String, el: &Element, depth: usize) {
    let indent = "  ".repeat(depth);
    out.push_str(&indent);
    out.push('<');
    out.push_str(el.tag);
    for (name, value) in &el.attrs {
        out.push(' ');
        out.push_str(name);
        out.push_str("=\"");
        out.push_str(&escape(value));
        out.push('"');
    }

    if el.children.is_empty() && el.text.is_none() {
        out.push_str("/>\n");
        return;
    }
    out.push('>');
    if let Some(text) = &el.text {
        out.push_str(&escape(text));
    }
    if el.children.is_empty() {
        out.push_str(&format!("</{}>\n", el.tag));
        return;
    }
    out.push('\n');
    for child in &el.children {
        write_element(out, child, depth + 1);
    }
    out.push_str(&indent);
    out.push_str(&format!("</{}>\n", el.tag));
}

/// Wrap top-level elements into a complete `<svg>` document.
pub fn render_document(id: &str, width: f64, height: f64, body: &[Element]) -> String {
    let mut out = String::new();
    out.push_str(&format!(
        r#"<svg xmlns="{SVG_NS}" id="{}" width="{width}" height="{height}" viewBox="0 0 {width} {height}">"#,
        escape(id)
    ));
    out.push('\n');
    out.push_str("  <style>");
    out.push_str(STYLE);
    out.push_str("</style>\n");
    for el in body {
        write_element(&mut out, el, 1);
    }
    out.push_str("</svg>\n");
    out
}

#[cfg(test)]
#[path = "../../tests/rust/test_renderers_svg.rs"]
mod tests;
