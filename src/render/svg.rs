use std::fmt::Write as _;

use crate::render::{
    layout::{ASCENT, LINE_HEIGHT},
    preview::{Preview, TextBlock},
};

/// Render a preview as a standalone SVG document sized to the canvas.
///
/// Paint order: white base, flat fill, background image (cover-fitted, dimmed), text blocks.
pub fn to_svg(p: &Preview) -> String {
    let w = p.canvas.width;
    let h = p.canvas.height;
    let mut out = String::with_capacity(1024);

    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" xmlns:xlink="http://www.w3.org/1999/xlink" width="{w}" height="{h}" viewBox="0 0 {w} {h}">"#
    );

    if p.image.is_some() {
        let b = p.image_brightness;
        let _ = write!(
            out,
            r#"<defs><filter id="dim" x="0" y="0" width="1" height="1" color-interpolation-filters="sRGB"><feComponentTransfer><feFuncR type="linear" slope="{b}"/><feFuncG type="linear" slope="{b}"/><feFuncB type="linear" slope="{b}"/></feComponentTransfer></filter></defs>"#
        );
    }

    let _ = write!(out, r##"<rect width="{w}" height="{h}" fill="#ffffff"/>"##);
    let _ = write!(
        out,
        r#"<rect width="{w}" height="{h}" fill="{}" fill-opacity="{:.3}"/>"#,
        p.fill.rgb_hex(),
        p.fill.opacity()
    );

    if let Some(image) = &p.image {
        let _ = write!(
            out,
            r#"<image x="0" y="0" width="{w}" height="{h}" preserveAspectRatio="xMidYMid slice" filter="url(#dim)" xlink:href="{}"/>"#,
            escape(image.as_str())
        );
    }

    let ink = p.ink.rgb_hex();
    let family = escape(&p.font_family);
    for block in &p.blocks {
        write_block(&mut out, block, &family, &ink);
    }

    out.push_str("</svg>");
    out
}

fn write_block(out: &mut String, block: &TextBlock, family: &str, ink: &str) {
    if block.text.trim().is_empty() {
        return;
    }

    let px = f64::from(block.font_px);
    let x = round2(block.position.x);
    let y = round2(block.position.y + px * ASCENT);
    let weight = if block.bold { "700" } else { "400" };

    let _ = write!(
        out,
        r#"<text id="{}" x="{x}" y="{y}" font-family="{family}" font-size="{px}" font-weight="{weight}" fill="{ink}">"#,
        block.id
    );
    for (i, line) in block.text.split('\n').enumerate() {
        let dy = if i == 0 { 0.0 } else { round2(px * LINE_HEIGHT) };
        let _ = write!(
            out,
            r#"<tspan x="{x}" dy="{dy}">{}</tspan>"#,
            escape(line)
        );
    }
    out.push_str("</text>");
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Escape text for use in XML content and double-quoted attributes.
///
/// Characters outside the XML 1.0 `Char` production are dropped.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars().filter(|&c| is_xml_char(c)) {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            c => out.push(c),
        }
    }
    out
}

fn is_xml_char(c: char) -> bool {
    matches!(c,
        '\t' | '\n' | '\r'
        | '\u{20}'..='\u{D7FF}'
        | '\u{E000}'..='\u{FFFD}'
        | '\u{10000}'..='\u{10FFFF}')
}

#[cfg(test)]
#[path = "../../tests/unit/render/svg.rs"]
mod tests;
